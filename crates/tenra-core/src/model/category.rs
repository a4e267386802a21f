// ── Category domain type ──

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use strum::{Display, EnumString};

use super::entity_id::EntityId;
use crate::error::CoreError;

/// A product category with its ordered custom-property schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: EntityId,
    pub name: String,
    /// Ordered; order is part of the category definition.
    pub properties: Vec<CategoryProperty>,
}

/// One custom property a product in this category can carry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryProperty {
    pub name: String,
    pub property_type: PropertyType,
    /// Enumerated values; only meaningful for [`PropertyType::Select`].
    #[serde(default)]
    pub options: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PropertyType {
    Text,
    Number,
    Select,
}

/// Property names must be unique within a category. Enforced before any
/// create/update request leaves the client.
pub(crate) fn validate_properties(properties: &[CategoryProperty]) -> Result<(), CoreError> {
    let mut seen = HashSet::new();
    for property in properties {
        if property.name.trim().is_empty() {
            return Err(CoreError::ValidationFailed {
                message: "category property name must not be empty".into(),
            });
        }
        if !seen.insert(property.name.as_str()) {
            return Err(CoreError::ValidationFailed {
                message: format!("duplicate category property name: {}", property.name),
            });
        }
    }
    Ok(())
}
