//! Application state shared across all handlers.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use crate::config::Config;
use crate::guard::LOGIN_ROUTE;
use crate::menu::MenuNode;
use crate::models::UserDirectory;
use crate::theme::ThemeEngine;
use crate::view::{UrlTable, ViewRegistry};
use crate::views;

/// Shared application state.
///
/// Wrapped in Arc internally so Clone is cheap.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    /// Application configuration.
    config: Config,

    /// Every registered admin view.
    registry: Arc<ViewRegistry>,

    /// URL table built from the registry, mounted at the admin prefix.
    urls: Arc<UrlTable>,

    /// Sorted top-level menu forest, built once at startup.
    menus: Arc<Vec<MenuNode>>,

    /// User accounts.
    users: Arc<UserDirectory>,

    /// Template engine.
    theme: Arc<ThemeEngine>,

    /// Resolved path of the login view.
    login_url: String,
}

impl AppState {
    /// Create the application state from configuration.
    pub fn new(config: &Config) -> Result<Self> {
        let users = UserDirectory::load(&config.users_file)
            .with_context(|| format!("failed to load users from {}", config.users_file.display()))?;
        info!(count = users.len(), "user directory loaded");

        let theme = ThemeEngine::new(config.templates_dir.as_deref())
            .context("failed to initialize theme engine")?;
        info!("theme engine initialized");

        let registry = views::builtin_views().context("failed to register admin views")?;
        info!(views = registry.len(), "admin views registered");

        Self::from_parts(config.clone(), registry, users, theme)
    }

    /// Assemble state from already-built parts.
    ///
    /// Builds the URL table and the menu forest from `registry`.
    pub fn from_parts(
        config: Config,
        registry: ViewRegistry,
        users: UserDirectory,
        theme: ThemeEngine,
    ) -> Result<Self> {
        let urls = registry
            .build_url_table(&config.admin_prefix)
            .context("failed to build URL table")?;
        let menus = registry.collect_menus();

        let login_url = urls
            .reverse(LOGIN_ROUTE)
            .unwrap_or_else(|| format!("{}/login", urls.prefix()));

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                registry: Arc::new(registry),
                urls: Arc::new(urls),
                menus: Arc::new(menus),
                users: Arc::new(users),
                theme: Arc::new(theme),
                login_url,
            }),
        })
    }

    /// State with default config, the built-in views and templates, and no
    /// users.
    #[cfg(test)]
    #[allow(clippy::expect_used)]
    pub(crate) fn for_tests() -> Self {
        let registry = views::builtin_views().expect("built-in views register");
        let theme = ThemeEngine::builtin().expect("built-in templates load");
        Self::from_parts(Config::default(), registry, UserDirectory::default(), theme)
            .expect("test state builds")
    }

    /// Get the configuration.
    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    /// Get the view registry.
    pub fn registry(&self) -> &ViewRegistry {
        &self.inner.registry
    }

    /// Get the URL table.
    pub fn urls(&self) -> &UrlTable {
        &self.inner.urls
    }

    /// Get the top-level menus.
    pub fn menus(&self) -> &[MenuNode] {
        &self.inner.menus
    }

    /// Get the user directory.
    pub fn users(&self) -> &UserDirectory {
        &self.inner.users
    }

    /// Get the theme engine.
    pub fn theme(&self) -> &ThemeEngine {
        &self.inner.theme
    }

    /// Path of the login view.
    pub fn login_url(&self) -> &str {
        &self.inner.login_url
    }
}
