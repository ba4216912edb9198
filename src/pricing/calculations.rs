use tracing::{debug, error};

use crate::models::{Variant, VariantCatalog, VariantId, VariantKind};
use crate::state::Selection;

/// One priced contribution to a unit price.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceLine {
    /// `None` for the base price.
    pub kind: Option<VariantKind>,
    pub label: String,
    pub amount: i64,
}

/// Unit price split into its contributions, then scaled by quantity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceBreakdown {
    pub lines: Vec<PriceLine>,
    pub unit_price: i64,
    pub quantity: u32,
    pub total: i64,
}

impl PriceBreakdown {
    /// Build a breakdown from the base price and the modifier lines.
    pub fn new(base_price: i64, modifiers: Vec<PriceLine>, quantity: u32) -> Self {
        let unit_price = modifiers
            .iter()
            .fold(base_price, |acc, l| acc.saturating_add(l.amount));
        let mut lines = Vec::with_capacity(modifiers.len() + 1);
        lines.push(PriceLine {
            kind: None,
            label: "Base price".to_string(),
            amount: base_price,
        });
        lines.extend(modifiers);

        Self {
            lines,
            unit_price,
            quantity,
            total: unit_price.saturating_mul(quantity as i64),
        }
    }
}

/// Sum the modifiers of `ids` found in `group`. Unknown ids add nothing.
///
/// `None` only on arithmetic overflow.
pub fn sum_modifiers(group: &[Variant], ids: &[VariantId]) -> Option<i64> {
    ids.iter().try_fold(0_i64, |acc, id| {
        let delta = match group.iter().find(|v| v.id == *id) {
            Some(variant) => variant.price_modifier,
            None => {
                debug!(variant_id = id, "selected variant not in catalog, adding 0");
                0
            }
        };
        acc.checked_add(delta)
    })
}

/// Modifier of the selected size, or 0 if none is selected or it is stale.
pub fn size_modifier(catalog: &VariantCatalog, selection: &Selection) -> i64 {
    selection
        .size()
        .and_then(|id| catalog.find(VariantKind::Size, id))
        .map_or(0, |variant| variant.price_modifier)
}

/// Checked unit price. Each group is matched only against its own ids.
fn try_unit_price(base_price: i64, catalog: &VariantCatalog, selection: &Selection) -> Option<i64> {
    let mut unit = base_price.checked_add(size_modifier(catalog, selection))?;
    for kind in [VariantKind::Extra, VariantKind::Addon, VariantKind::Substitute] {
        unit = unit.checked_add(sum_modifiers(catalog.group(kind), selection.ids(kind))?)?;
    }
    Some(unit)
}

/// Base price plus every selected modifier, or 0 (logged) on overflow.
pub fn unit_price(base_price: i64, catalog: &VariantCatalog, selection: &Selection) -> i64 {
    try_unit_price(base_price, catalog, selection).unwrap_or_else(|| {
        error!(base_price, "unit price overflowed, using 0");
        0
    })
}

/// Total for the selection: the unit price multiplied once by quantity.
///
/// Overflow is logged and the total is 0, the same as the flat-rate path.
pub fn calculate_total(base_price: i64, catalog: &VariantCatalog, selection: &Selection) -> i64 {
    try_unit_price(base_price, catalog, selection)
        .and_then(|unit| unit.checked_mul(selection.quantity() as i64))
        .unwrap_or_else(|| {
            error!(base_price, quantity = selection.quantity(), "catalog total overflowed, using 0");
            0
        })
}

/// Itemized version of [`calculate_total`]. Stale ids get no line.
pub fn price_breakdown(
    base_price: i64,
    catalog: &VariantCatalog,
    selection: &Selection,
) -> PriceBreakdown {
    let modifiers = VariantKind::ALL
        .into_iter()
        .flat_map(|kind| {
            selection
                .ids(kind)
                .iter()
                .filter_map(move |id| catalog.find(kind, *id))
                .map(move |variant| PriceLine {
                    kind: Some(kind),
                    label: variant.name.clone(),
                    amount: variant.price_modifier,
                })
        })
        .collect();

    let mut breakdown = PriceBreakdown::new(base_price, modifiers, selection.quantity());
    breakdown.total = calculate_total(base_price, catalog, selection);
    breakdown
}
