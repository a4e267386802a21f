//! Shared helpers for command handlers.

use std::io::{self, Write};

use tenra_core::{Backoffice, CategoryProperty, EntityId, FetchOptions, PropertyType};

use crate::cli::ListArgs;
use crate::error::CliError;

/// Ask for confirmation unless `--yes` was passed.
pub fn confirm(prompt: &str, yes: bool) -> Result<bool, CliError> {
    if yes {
        return Ok(true);
    }

    eprint!("{prompt} [y/N] ");
    io::stderr().flush()?;

    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(matches!(line.trim(), "y" | "Y" | "yes"))
}

/// Fetch options for a list command: `--refresh` overrides the cache.
pub fn list_fetch_options(list: &ListArgs) -> FetchOptions {
    FetchOptions {
        override_cache: list.refresh,
        with_loading: false,
    }
}

/// Parse a `--property` spec: `"name:type"` or `"name:select:a|b|c"`.
pub fn parse_property(spec: &str) -> Result<CategoryProperty, CliError> {
    let mut parts = spec.splitn(3, ':');
    let name = parts.next().unwrap_or_default();
    let kind = parts.next().unwrap_or("text");
    let options = parts.next();

    if name.is_empty() {
        return Err(CliError::Validation {
            field: "property".into(),
            reason: format!("missing property name in '{spec}'"),
        });
    }

    let property_type: PropertyType = kind.parse().map_err(|_| CliError::Validation {
        field: "property".into(),
        reason: format!("unknown property type '{kind}' (expected text, number, or select)"),
    })?;

    let options = match (property_type, options) {
        (PropertyType::Select, Some(raw)) => raw.split('|').map(str::to_owned).collect(),
        (PropertyType::Select, None) => {
            return Err(CliError::Validation {
                field: "property".into(),
                reason: format!("select property '{name}' needs options: {name}:select:a|b"),
            });
        }
        (_, Some(_)) => {
            return Err(CliError::Validation {
                field: "property".into(),
                reason: format!("only select properties take options ('{spec}')"),
            });
        }
        (_, None) => Vec::new(),
    };

    Ok(CategoryProperty {
        name: name.to_owned(),
        property_type,
        options,
    })
}

pub fn parse_properties(specs: &[String]) -> Result<Vec<CategoryProperty>, CliError> {
    specs.iter().map(|s| parse_property(s)).collect()
}

/// Resolve the store a store-scoped command works against:
/// explicit flag > selected store > the account's own store binding.
pub fn resolve_store(backoffice: &Backoffice, flag: Option<&str>) -> Result<EntityId, CliError> {
    if let Some(raw) = flag {
        return Ok(EntityId::from(raw));
    }
    if let Some(store) = backoffice.store().current_store() {
        return Ok(store.id.clone());
    }
    if let Some(session) = backoffice.session() {
        if let Some(ref store_ref) = session.user.store {
            return Ok(store_ref.id.clone());
        }
    }
    Err(CliError::NoStoreSelected)
}
