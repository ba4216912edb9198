use tracing::error;

use crate::models::{normalize_price, PriceRepresentation};
use crate::pricing::calculations::{PriceBreakdown, PriceLine};
use crate::pricing::constants::{legacy_extra, legacy_size};
use crate::state::LegacySelectionState;

/// Checked flat-rate total. `None` only on arithmetic overflow.
fn try_legacy_total(base_price: i64, selection: &LegacySelectionState) -> Option<i64> {
    let size_delta = legacy_size(selection.size()).map_or(0, |(_, delta)| delta);

    let mut unit = base_price.checked_add(size_delta)?;
    for name in selection.extras() {
        let delta = legacy_extra(name).map_or(0, |(_, delta)| delta);
        unit = unit.checked_add(delta)?;
    }

    unit.checked_mul(selection.quantity() as i64)
}

/// Flat-rate total: `(base + size + extras) * quantity`.
///
/// The price is normalized first, so a malformed price counts as 0. If the
/// arithmetic still fails the error is logged and the total is 0.
pub fn calculate_legacy_total(price: &PriceRepresentation, selection: &LegacySelectionState) -> i64 {
    let base_price = normalize_price(price);
    try_legacy_total(base_price, selection).unwrap_or_else(|| {
        error!(base_price, quantity = selection.quantity(), "flat-rate total overflowed, using 0");
        0
    })
}

/// Itemized flat-rate price. Unknown names get no line.
pub fn legacy_breakdown(price: &PriceRepresentation, selection: &LegacySelectionState) -> PriceBreakdown {
    let mut modifiers = Vec::new();

    if let Some((name, delta)) = legacy_size(selection.size()) {
        modifiers.push(PriceLine {
            kind: None,
            label: format!("Size: {}", name),
            amount: delta,
        });
    }

    modifiers.extend(
        selection
            .extras()
            .iter()
            .filter_map(|name| legacy_extra(name))
            .map(|(name, delta)| PriceLine {
                kind: None,
                label: name.to_string(),
                amount: delta,
            }),
    );

    let mut breakdown = PriceBreakdown::new(normalize_price(price), modifiers, selection.quantity());
    breakdown.total = calculate_legacy_total(price, selection);
    breakdown
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_selection() {
        let selection = LegacySelectionState::new();
        let price = PriceRepresentation::Display("₦2,500".to_string());
        assert_eq!(calculate_legacy_total(&price, &selection), 2500);
    }

    #[test]
    fn test_large_with_extras() {
        let mut selection = LegacySelectionState::new();
        selection.select_size("Large").unwrap();
        selection.toggle_extra("Extra Cheese").unwrap();
        selection.toggle_extra("Boiled Egg").unwrap();
        selection.set_quantity(2);

        let price = PriceRepresentation::Cents(1500);
        // (1500 + 2000 + 500 + 300) * 2
        assert_eq!(calculate_legacy_total(&price, &selection), 8600);
    }

    #[test]
    fn test_malformed_price_is_zero_base() {
        let mut selection = LegacySelectionState::new();
        selection.set_quantity(4);
        let price = PriceRepresentation::Structured {
            amount: None,
            value: None,
        };
        assert_eq!(calculate_legacy_total(&price, &selection), 0);
    }

    #[test]
    fn test_overflow_is_zero() {
        let mut selection = LegacySelectionState::new();
        selection.set_quantity(2);
        let price = PriceRepresentation::Cents(i64::MAX - 10);
        assert_eq!(calculate_legacy_total(&price, &selection), 0);
    }

    #[test]
    fn test_breakdown_lines() {
        let mut selection = LegacySelectionState::new();
        selection.toggle_extra("Coleslaw").unwrap();
        let price = PriceRepresentation::Cents(1000);

        let breakdown = legacy_breakdown(&price, &selection);
        let labels: Vec<&str> = breakdown.lines.iter().map(|l| l.label.as_str()).collect();
        assert_eq!(labels, ["Base price", "Size: Regular", "Coleslaw"]);
        assert_eq!(breakdown.total, 1400);
    }
}
