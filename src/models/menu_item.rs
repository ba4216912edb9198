use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::warn;

/// Currency assumed when the upstream item does not carry one.
pub const DEFAULT_CURRENCY: &str = "NGN";

/// The shapes an upstream item price arrives in.
///
/// Menu listings send prices as plain numbers, as display strings such as
/// `"₦2,500"`, or as objects carrying `amount` or `value`. Object members are
/// read at deserialization, so they hold whole units already. Anything else is
/// kept as `Unrecognized` and normalizes to zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PriceRepresentation {
    Cents(i64),
    Fractional(f64),
    Display(String),
    Structured {
        #[serde(skip_serializing_if = "Option::is_none")]
        amount: Option<i64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        value: Option<i64>,
    },
    Unrecognized(Value),
}

impl PriceRepresentation {
    /// Canonical price in whole currency units, or `None` if the shape carries none.
    ///
    /// Display strings keep only their ASCII digits, so `"2,500.50"` reads as
    /// `250050`. Fractional numbers truncate toward zero.
    pub fn try_units(&self) -> Option<i64> {
        match self {
            PriceRepresentation::Cents(units) => Some(*units),
            PriceRepresentation::Fractional(raw) => truncate(*raw),
            PriceRepresentation::Display(text) => parse_digits(text),
            PriceRepresentation::Structured { amount, value } => amount.or(*value),
            PriceRepresentation::Unrecognized(_) => None,
        }
    }

    /// Like [`try_units`](Self::try_units), but falls back to 0 and logs.
    pub fn units(&self) -> i64 {
        self.try_units().unwrap_or_else(|| {
            warn!(price = ?self, "could not normalize item price, using 0");
            0
        })
    }
}

impl From<Value> for PriceRepresentation {
    fn from(raw: Value) -> Self {
        match raw {
            Value::Number(n) => match n.as_i64() {
                Some(units) => PriceRepresentation::Cents(units),
                None => match n.as_f64() {
                    Some(f) => PriceRepresentation::Fractional(f),
                    None => PriceRepresentation::Unrecognized(Value::Number(n)),
                },
            },
            Value::String(s) => PriceRepresentation::Display(s),
            Value::Object(map) => PriceRepresentation::Structured {
                amount: map.get("amount").and_then(member_units),
                value: map.get("value").and_then(member_units),
            },
            other => PriceRepresentation::Unrecognized(other),
        }
    }
}

impl<'de> Deserialize<'de> for PriceRepresentation {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(PriceRepresentation::from)
    }
}

impl Default for PriceRepresentation {
    fn default() -> Self {
        PriceRepresentation::Cents(0)
    }
}

/// Normalize any upstream price shape to whole units. Never fails.
pub fn normalize_price(price: &PriceRepresentation) -> i64 {
    price.units()
}

/// Concatenate every ASCII digit in `text` and parse the result.
fn parse_digits(text: &str) -> Option<i64> {
    let digits: String = text.chars().filter(char::is_ascii_digit).collect();
    digits.parse().ok()
}

/// Units carried by one member of a structured price. Strings get the same
/// digit parse as display prices.
fn member_units(member: &Value) -> Option<i64> {
    match member {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().and_then(truncate)),
        Value::String(text) => parse_digits(text),
        _ => None,
    }
}

fn truncate(raw: f64) -> Option<i64> {
    if raw.is_finite() && raw.abs() < i64::MAX as f64 {
        Some(raw.trunc() as i64)
    } else {
        None
    }
}

/// A menu item as listed by the marketplace API. Read-only here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: u64,

    pub name: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(alias = "price", alias = "basePrice", default)]
    pub base_price: PriceRepresentation,

    #[serde(default = "default_currency")]
    pub currency: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preparation_time: Option<u32>,

    #[serde(default)]
    pub ingredients: Vec<String>,

    #[serde(default)]
    pub allergens: Vec<String>,

    #[serde(default)]
    pub is_vegetarian: bool,

    #[serde(default)]
    pub is_spicy: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calories: Option<u32>,
}

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

impl MenuItem {
    /// Base price in whole currency units (0 when the price is malformed).
    #[inline]
    pub fn base_price_units(&self) -> i64 {
        self.base_price.units()
    }
}
