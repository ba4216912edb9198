use std::fmt;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::models::MenuItem;

/// Variant ids are unique within one item's catalog.
pub type VariantId = u64;

/// The four variant groups a menu item can offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VariantKind {
    Size,
    Extra,
    Addon,
    Substitute,
}

impl VariantKind {
    pub const ALL: [VariantKind; 4] = [
        VariantKind::Size,
        VariantKind::Extra,
        VariantKind::Addon,
        VariantKind::Substitute,
    ];

    /// Sizes are exclusive; every other group allows any number of picks.
    #[inline]
    pub fn is_exclusive(self) -> bool {
        self == VariantKind::Size
    }

    /// Plural heading used when listing a group.
    pub fn heading(self) -> &'static str {
        match self {
            VariantKind::Size => "Sizes",
            VariantKind::Extra => "Extras",
            VariantKind::Addon => "Add-ons",
            VariantKind::Substitute => "Substitutes",
        }
    }
}

impl fmt::Display for VariantKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            VariantKind::Size => "size",
            VariantKind::Extra => "extra",
            VariantKind::Addon => "addon",
            VariantKind::Substitute => "substitute",
        };
        f.write_str(name)
    }
}

/// One selectable modifier with a signed price delta.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variant {
    pub id: VariantId,

    pub name: String,

    #[serde(rename = "type")]
    pub kind: VariantKind,

    #[serde(alias = "priceModifier", default, deserialize_with = "de_modifier")]
    pub price_modifier: i64,

    #[serde(alias = "isRequired", default)]
    pub is_required: bool,

    /// Display only; never used for arithmetic.
    #[serde(alias = "formattedPrice", default, skip_serializing_if = "Option::is_none")]
    pub formatted_price: Option<String>,
}

/// Accepts integers, floats (truncated) and numeric strings such as `"-250"`.
fn de_modifier<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64))
            .ok_or_else(|| D::Error::custom(format!("price modifier out of range: {n}"))),
        Value::String(s) => {
            let trimmed = s.trim();
            trimmed
                .parse::<i64>()
                .ok()
                .or_else(|| {
                    trimmed
                        .parse::<f64>()
                        .ok()
                        .filter(|f| f.is_finite())
                        .map(|f| f.trunc() as i64)
                })
                .ok_or_else(|| D::Error::custom(format!("invalid price modifier: {s:?}")))
        }
        Value::Null => Ok(0),
        other => Err(D::Error::custom(format!("invalid price modifier: {other}"))),
    }
}

/// Variants of one item, grouped by kind. Each group keeps catalog order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VariantCatalog {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub size: Vec<Variant>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extra: Vec<Variant>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub addon: Vec<Variant>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub substitute: Vec<Variant>,
}

impl VariantCatalog {
    /// The variants of a single group.
    pub fn group(&self, kind: VariantKind) -> &[Variant] {
        match kind {
            VariantKind::Size => &self.size,
            VariantKind::Extra => &self.extra,
            VariantKind::Addon => &self.addon,
            VariantKind::Substitute => &self.substitute,
        }
    }

    /// Look up a variant by id within its own group only.
    pub fn find(&self, kind: VariantKind, id: VariantId) -> Option<&Variant> {
        self.group(kind).iter().find(|v| v.id == id)
    }

    pub fn contains(&self, kind: VariantKind, id: VariantId) -> bool {
        self.find(kind, id).is_some()
    }

    /// Case-insensitive exact name lookup within a group.
    pub fn find_by_name(&self, kind: VariantKind, name: &str) -> Option<&Variant> {
        let wanted = name.trim().to_lowercase();
        self.group(kind)
            .iter()
            .find(|v| v.name.to_lowercase() == wanted)
    }

    /// All variants, group by group.
    pub fn iter(&self) -> impl Iterator<Item = &Variant> {
        VariantKind::ALL
            .into_iter()
            .flat_map(move |kind| self.group(kind).iter())
    }

    pub fn total_variants(&self) -> usize {
        self.size.len() + self.extra.len() + self.addon.len() + self.substitute.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total_variants() == 0
    }

    /// Derive the summary counts from the catalog itself.
    pub fn summary(&self) -> CustomizationSummary {
        CustomizationSummary {
            has_sizes: !self.size.is_empty(),
            has_extras: !self.extra.is_empty(),
            has_addons: !self.addon.is_empty(),
            has_substitutes: !self.substitute.is_empty(),
            total_variants: self.total_variants(),
            required_variants: self.iter().filter(|v| v.is_required).count(),
        }
    }
}

/// Counts used to decide whether an item offers customization at all.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomizationSummary {
    #[serde(default)]
    pub has_sizes: bool,

    #[serde(default)]
    pub has_extras: bool,

    #[serde(default)]
    pub has_addons: bool,

    #[serde(default)]
    pub has_substitutes: bool,

    #[serde(default)]
    pub total_variants: usize,

    #[serde(default)]
    pub required_variants: usize,
}

impl CustomizationSummary {
    #[inline]
    pub fn has_variants(&self) -> bool {
        self.total_variants > 0
    }
}

/// Body of `GET /menu-items/{id}/customization`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CustomizationResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub menu_item: Option<MenuItem>,

    #[serde(default)]
    pub variants: VariantCatalog,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customization_summary: Option<CustomizationSummary>,
}

impl CustomizationResponse {
    /// The summary sent by the server, or one derived from the variants.
    pub fn summary(&self) -> CustomizationSummary {
        self.customization_summary
            .clone()
            .unwrap_or_else(|| self.variants.summary())
    }
}
