//! Theme engine: built-in Tera templates plus on-disk overrides.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tera::Tera;
use tracing::debug;

/// Templates compiled into the binary, by name.
const BUILTIN_TEMPLATES: &[(&str, &str)] = &[
    (
        "adminlte/base.html",
        include_str!("../../templates/adminlte/base.html"),
    ),
    (
        "adminlte/pagination.html",
        include_str!("../../templates/adminlte/pagination.html"),
    ),
    (
        "adminlte/index.html",
        include_str!("../../templates/adminlte/index.html"),
    ),
    (
        "adminlte/login.html",
        include_str!("../../templates/adminlte/login.html"),
    ),
    (
        "adminlte/user_list.html",
        include_str!("../../templates/adminlte/user_list.html"),
    ),
    (
        "adminlte/user_profile.html",
        include_str!("../../templates/adminlte/user_profile.html"),
    ),
];

/// Theme engine for rendering templates.
pub struct ThemeEngine {
    /// Tera template engine instance.
    tera: Tera,
}

impl ThemeEngine {
    /// Create a theme engine with the built-in templates, replacing any of
    /// them (or adding new ones) from `overrides_dir`.
    ///
    /// Override names are paths relative to the directory, so
    /// `<dir>/adminlte/index.html` replaces `adminlte/index.html`.
    pub fn new(overrides_dir: Option<&Path>) -> Result<Self> {
        let mut tera = Tera::default();
        tera.add_raw_templates(BUILTIN_TEMPLATES.iter().copied())
            .context("failed to load built-in templates")?;

        if let Some(dir) = overrides_dir {
            let mut files = Vec::new();
            collect_templates(dir, dir, &mut files)
                .with_context(|| format!("failed to read templates from {}", dir.display()))?;

            debug!(count = files.len(), dir = %dir.display(), "loading template overrides");
            tera.add_template_files(files)
                .context("failed to load template overrides")?;
        }

        Self::register_filters(&mut tera);

        let template_names: Vec<_> = tera.get_template_names().collect();
        debug!(count = template_names.len(), "loaded templates");

        Ok(Self { tera })
    }

    /// Create a theme engine with only the built-in templates.
    pub fn builtin() -> Result<Self> {
        Self::new(None)
    }

    /// Register custom Tera filters.
    fn register_filters(tera: &mut Tera) {
        // Formats an RFC 3339 timestamp as a human-readable date
        tera.register_filter(
            "format_date",
            |value: &tera::Value, _args: &HashMap<String, tera::Value>| {
                let formatted = value
                    .as_str()
                    .and_then(|s| chrono::DateTime::parse_from_rfc3339(s).ok())
                    .map(|dt| dt.format("%B %-d, %Y").to_string())
                    .unwrap_or_default();

                Ok(tera::Value::String(formatted))
            },
        );
    }

    /// Get the underlying Tera instance.
    pub fn tera(&self) -> &Tera {
        &self.tera
    }

    /// Whether a template with this name is loaded.
    pub fn has_template(&self, name: &str) -> bool {
        self.tera.get_template_names().any(|n| n == name)
    }
}

/// Collect `(path, name)` pairs for every `.html` file under `dir`.
fn collect_templates(
    root: &Path,
    dir: &Path,
    out: &mut Vec<(PathBuf, Option<String>)>,
) -> std::io::Result<()> {
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            collect_templates(root, &path, out)?;
        } else if path.extension().is_some_and(|ext| ext == "html")
            && let Ok(relative) = path.strip_prefix(root)
        {
            let name = relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");
            out.push((path.clone(), Some(name)));
        }
    }
    Ok(())
}
