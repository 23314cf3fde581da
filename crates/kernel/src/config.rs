//! Configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port (default: 3000).
    pub port: u16,

    /// Prefix the admin views are mounted under (default: /admin).
    pub admin_prefix: String,

    /// Directory with template overrides. Built-in templates are used for
    /// anything it does not provide.
    pub templates_dir: Option<PathBuf>,

    /// Directory served under /static (default: ./static).
    pub static_dir: PathBuf,

    /// TOML file listing user accounts (default: ./users.toml).
    pub users_file: PathBuf,

    /// Avatar shown for the current user.
    pub avatar_url: String,

    /// Cookie SameSite policy: "strict", "lax", or "none" (default: "strict").
    pub cookie_same_site: String,

    /// Only send the session cookie over HTTPS (default: true).
    pub secure_cookies: bool,

    /// Page size when a request does not pass `size` (default: 20).
    pub default_page_size: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 3000,
            admin_prefix: "/admin".to_string(),
            templates_dir: None,
            static_dir: PathBuf::from("./static"),
            users_file: PathBuf::from("./users.toml"),
            avatar_url: "/static/adminLTE/img/avatar5.png".to_string(),
            cookie_same_site: "strict".to_string(),
            secure_cookies: true,
            default_page_size: crate::pager::DEFAULT_PAGE_SIZE,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let port = match env::var("PORT") {
            Ok(v) => v.parse().context("PORT must be a valid u16")?,
            Err(_) => defaults.port,
        };

        let admin_prefix = env::var("ADMIN_PREFIX").unwrap_or(defaults.admin_prefix);

        let templates_dir = env::var("TEMPLATES_DIR")
            .ok()
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);

        let static_dir = env::var("STATIC_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.static_dir);

        let users_file = env::var("USERS_FILE")
            .map(PathBuf::from)
            .unwrap_or(defaults.users_file);

        let avatar_url = env::var("AVATAR_URL").unwrap_or(defaults.avatar_url);

        let cookie_same_site = env::var("COOKIE_SAME_SITE")
            .unwrap_or(defaults.cookie_same_site)
            .to_lowercase();

        let secure_cookies = match env::var("SECURE_COOKIES") {
            Ok(v) => parse_bool(&v).context("SECURE_COOKIES must be true or false")?,
            Err(_) => defaults.secure_cookies,
        };

        let default_page_size = match env::var("DEFAULT_PAGE_SIZE") {
            Ok(v) => v
                .parse()
                .ok()
                .filter(|size: &u64| *size > 0)
                .context("DEFAULT_PAGE_SIZE must be a positive integer")?,
            Err(_) => defaults.default_page_size,
        };

        Ok(Self {
            port,
            admin_prefix,
            templates_dir,
            static_dir,
            users_file,
            avatar_url,
            cookie_same_site,
            secure_cookies,
            default_page_size,
        })
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
