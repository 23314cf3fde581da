//! Theme engine and template rendering.
//!
//! Provides Tera-based rendering of the admin pages. The AdminLTE templates
//! are compiled in; a directory of overrides can replace any of them.

mod engine;

pub use engine::ThemeEngine;
