//! View registry: the explicit list of admin views and what derives from it.

use std::sync::Arc;

use regex::Regex;
use thiserror::Error;
use tracing::debug;

use super::naming::{INDEX_PATTERN, ROOT_PATTERN, VIEW_SUFFIX};
use super::urls::{UrlPattern, UrlTable};
use super::AdminView;
use crate::menu::{MenuNode, assemble_forest};

/// Errors raised while registering views or building the URL table.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("view `{0}` is already registered")]
    Duplicate(String),

    #[error("view `{view}` derives the same URL or name as `{existing}`")]
    Conflict { view: String, existing: String },

    #[error("view name `{0}` is empty once the `View` suffix is removed")]
    EmptyName(String),

    #[error("view name `{0}` may only contain ASCII letters, digits and underscores")]
    InvalidName(String),

    #[error("invalid URL pattern `{pattern}`")]
    Pattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// Registry of all admin views, in registration order.
#[derive(Debug, Default)]
pub struct ViewRegistry {
    views: Vec<Arc<AdminView>>,
}

impl ViewRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from a list of views.
    pub fn from_views<I>(views: I) -> Result<Self, RegistryError>
    where
        I: IntoIterator<Item = AdminView>,
    {
        let mut registry = Self::new();
        for view in views {
            registry.register(view)?;
        }
        Ok(registry)
    }

    /// Register a view. Class names, canonical names and URL patterns must
    /// all be unique.
    pub fn register(&mut self, view: AdminView) -> Result<(), RegistryError> {
        let class_name = view.class_name();

        let base = class_name.strip_suffix(VIEW_SUFFIX).unwrap_or(class_name);
        if base.is_empty() {
            return Err(RegistryError::EmptyName(class_name.to_string()));
        }
        if !class_name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            return Err(RegistryError::InvalidName(class_name.to_string()));
        }
        if self.get(class_name).is_some() {
            return Err(RegistryError::Duplicate(class_name.to_string()));
        }

        let canonical_name = view.canonical_name();
        let path_pattern = view.path_pattern();
        if let Some(existing) = self
            .views
            .iter()
            .find(|v| v.canonical_name() == canonical_name || v.path_pattern() == path_pattern)
        {
            return Err(RegistryError::Conflict {
                view: class_name.to_string(),
                existing: existing.class_name().to_string(),
            });
        }

        debug!(
            view = %class_name,
            name = %canonical_name,
            pattern = %path_pattern,
            "registered admin view"
        );
        self.views.push(Arc::new(view));
        Ok(())
    }

    /// Look up a view by class name.
    pub fn get(&self, class_name: &str) -> Option<&Arc<AdminView>> {
        self.views.iter().find(|v| v.class_name() == class_name)
    }

    pub fn views(&self) -> &[Arc<AdminView>] {
        &self.views
    }

    pub fn len(&self) -> usize {
        self.views.len()
    }

    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }

    /// Build the menu forest from every view that declares a menu.
    ///
    /// Each node is bound to its view's canonical name. The returned list is
    /// the sorted top level; see [`assemble_forest`].
    pub fn collect_menus(&self) -> Vec<MenuNode> {
        let nodes = self.views.iter().filter_map(|view| {
            view.menu_node().map(|menu| {
                let mut node = menu.clone();
                node.view_name = Some(view.canonical_name());
                node
            })
        });

        assemble_forest(nodes)
    }

    /// Build the URL table mounted under `prefix`.
    ///
    /// One named entry per view. `IndexView` additionally gets an unnamed
    /// entry for the empty path, listed before its own.
    pub fn build_url_table(&self, prefix: &str) -> Result<UrlTable, RegistryError> {
        let mut patterns = Vec::with_capacity(self.views.len() + 1);

        for view in &self.views {
            let pattern = view.path_pattern();
            if pattern == INDEX_PATTERN {
                patterns.push(UrlPattern::new(compile(ROOT_PATTERN)?, None, view.clone()));
            }
            patterns.push(UrlPattern::new(
                compile(&pattern)?,
                Some(view.canonical_name()),
                view.clone(),
            ));
        }

        debug!(patterns = patterns.len(), prefix = %prefix, "built URL table");
        Ok(UrlTable::new(prefix, patterns))
    }
}

fn compile(pattern: &str) -> Result<Regex, RegistryError> {
    Regex::new(pattern).map_err(|source| RegistryError::Pattern {
        pattern: pattern.to_string(),
        source,
    })
}
