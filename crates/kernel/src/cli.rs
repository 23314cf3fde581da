//! CLI command implementations.
//!
//! These commands run without starting the server.

use anyhow::{Context, Result};

use crate::models::hash_password;
use crate::view::{UrlTable, ViewRegistry};
use crate::views;

/// Print the URL table, in resolution order.
pub fn cmd_routes(admin_prefix: &str) -> Result<()> {
    let registry = views::builtin_views().context("failed to register admin views")?;
    let table = registry
        .build_url_table(admin_prefix)
        .context("failed to build URL table")?;

    print_routes(&registry, &table);
    Ok(())
}

fn print_routes(registry: &ViewRegistry, table: &UrlTable) {
    println!(
        "{:<18} {:<24} {:<18} {:<6}",
        "PATTERN", "NAME", "VIEW", "STAFF"
    );
    println!("{}", "-".repeat(70));

    for pattern in table.patterns() {
        let view = pattern.view();
        let staff = if view.requires_login() { "yes" } else { "no" };
        println!(
            "{:<18} {:<24} {:<18} {}",
            pattern.pattern(),
            pattern.name().unwrap_or("-"),
            view.class_name(),
            staff
        );
    }

    println!();
    println!(
        "{} views mounted at {}/",
        registry.len(),
        table.prefix()
    );
}

/// Print an Argon2 hash of `password` for the users file.
pub fn cmd_hash_password(password: &str) -> Result<()> {
    let hash = hash_password(password).context("failed to hash password")?;
    println!("{hash}");
    Ok(())
}
