use serde::{Deserialize, Serialize};

use crate::models::{MenuItem, VariantId};

/// Variant picks made against a fetched catalog. Ids are numeric.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RichSelection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<VariantId>,

    #[serde(default)]
    pub extras: Vec<VariantId>,

    #[serde(default)]
    pub addons: Vec<VariantId>,

    #[serde(default)]
    pub substitutes: Vec<VariantId>,

    /// Trimmed; absent rather than empty.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special_instructions: Option<String>,
}

/// Picks made against the fixed flat-rate catalog. Options are named, not numbered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegacySelection {
    pub size: String,

    #[serde(default)]
    pub extras: Vec<String>,

    #[serde(rename = "specialInstructions", default)]
    pub special_instructions: String,
}

/// What the cart receives for one customized item.
///
/// The two shapes are not interchangeable: consumers must match on `kind`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Customization {
    Rich(RichSelection),
    Legacy(LegacySelection),
}

impl Customization {
    pub fn is_legacy(&self) -> bool {
        matches!(self, Customization::Legacy(_))
    }
}

/// A confirmed `(item, quantity, customization)` hand-off, with the price
/// computed at confirmation time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartLine {
    pub item: MenuItem,

    pub quantity: u32,

    pub customization: Customization,

    #[serde(default)]
    pub unit_price: i64,

    #[serde(default)]
    pub total: i64,
}
