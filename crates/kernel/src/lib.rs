//! AdminLTE admin site library
//!
//! Menus, view registration, pagination and the staff guard for an
//! AdminLTE-themed admin site. The `adminlte` binary serves it.

pub mod auth;
pub mod cli;
pub mod config;
pub mod context;
pub mod error;
pub mod guard;
pub mod menu;
pub mod models;
pub mod pager;
pub mod query;
pub mod routes;
pub mod session;
pub mod state;
pub mod theme;
pub mod view;
pub mod views;

pub use config::Config;
pub use state::AppState;
