//! The URL table built from registered views.

use std::collections::BTreeMap;
use std::sync::Arc;

use regex::Regex;

use super::AdminView;
use super::naming::pattern_to_path;

/// One entry of the URL table.
#[derive(Debug, Clone)]
pub struct UrlPattern {
    regex: Regex,
    name: Option<String>,
    view: Arc<AdminView>,
}

impl UrlPattern {
    pub(crate) fn new(regex: Regex, name: Option<String>, view: Arc<AdminView>) -> Self {
        Self { regex, name, view }
    }

    /// The anchored pattern source, e.g. `^user/list$`.
    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }

    /// Route name; `None` for the implicit root entry.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn view(&self) -> &Arc<AdminView> {
        &self.view
    }
}

/// Result of resolving a path against the table.
#[derive(Debug, Clone)]
pub struct ResolverMatch<'a> {
    /// Name of the matched pattern, if it has one.
    pub route_name: Option<&'a str>,
    pub view: &'a Arc<AdminView>,
}

/// Ordered pattern table, mounted under an admin prefix.
#[derive(Debug, Clone)]
pub struct UrlTable {
    prefix: String,
    patterns: Vec<UrlPattern>,
}

impl UrlTable {
    pub(crate) fn new(prefix: &str, patterns: Vec<UrlPattern>) -> Self {
        Self {
            prefix: normalize_prefix(prefix),
            patterns,
        }
    }

    /// Prefix the table is mounted under, without a trailing slash.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn patterns(&self) -> &[UrlPattern] {
        &self.patterns
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Resolve a full request path. First matching pattern wins.
    pub fn resolve(&self, path: &str) -> Option<ResolverMatch<'_>> {
        let relative = path.strip_prefix(self.prefix.as_str())?;
        // "/admin" must not match "/administrator".
        if !relative.is_empty() && !relative.starts_with('/') {
            return None;
        }
        let relative = relative.trim_matches('/');

        self.patterns
            .iter()
            .find(|p| p.regex.is_match(relative))
            .map(|p| ResolverMatch {
                route_name: p.name(),
                view: &p.view,
            })
    }

    /// Absolute path for a named route.
    pub fn reverse(&self, name: &str) -> Option<String> {
        self.patterns
            .iter()
            .find(|p| p.name() == Some(name))
            .map(|p| self.absolute(pattern_to_path(p.pattern())))
    }

    /// Every named route and its absolute path, for templates.
    pub fn named_paths(&self) -> BTreeMap<String, String> {
        self.patterns
            .iter()
            .filter_map(|p| {
                p.name()
                    .map(|name| (name.to_string(), self.absolute(pattern_to_path(p.pattern()))))
            })
            .collect()
    }

    fn absolute(&self, relative: &str) -> String {
        format!("{}/{relative}", self.prefix)
    }
}

/// `"/admin/"` and `"admin"` both become `"/admin"`; `"/"` becomes `""`.
pub(crate) fn normalize_prefix(prefix: &str) -> String {
    let trimmed = prefix.trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{trimmed}")
    }
}
