//! Menu Item Model

use super::serde_helpers;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use surrealdb::RecordId;
use validator::Validate;

/// Translated name/description for one language code
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuTranslation {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Menu item entity (read-mostly)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItem {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: Decimal,
    pub category: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub allergens: Vec<String>,
    #[serde(default)]
    pub nutritional_info: Option<serde_json::Value>,
    /// Keyed by language code ("es", "zh", ...)
    #[serde(default)]
    pub translations: HashMap<String, MenuTranslation>,
}

/// Create menu item payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MenuItemCreate {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    #[validate(length(min = 1, message = "category must not be empty"))]
    pub category: String,
    pub image_url: Option<String>,
    #[serde(default)]
    pub allergens: Vec<String>,
    pub nutritional_info: Option<serde_json::Value>,
    #[serde(default)]
    pub translations: HashMap<String, MenuTranslation>,
}

/// Update menu item payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItemUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allergens: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nutritional_info: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub translations: Option<HashMap<String, MenuTranslation>>,
}
