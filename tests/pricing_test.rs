use menu_customizer_rs::models::{PriceRepresentation, Variant, VariantCatalog, VariantKind};
use menu_customizer_rs::pricing::{calculate_legacy_total, calculate_total};
use menu_customizer_rs::state::{LegacySelectionState, Selection};

fn make_variant(id: u64, name: &str, kind: VariantKind, modifier: i64) -> Variant {
    Variant {
        id,
        name: name.to_string(),
        kind,
        price_modifier: modifier,
        is_required: false,
        formatted_price: None,
    }
}

fn sample_catalog() -> VariantCatalog {
    VariantCatalog {
        size: vec![
            make_variant(1, "Medium", VariantKind::Size, 0),
            make_variant(2, "Large", VariantKind::Size, 500),
        ],
        extra: vec![
            make_variant(10, "Extra Beef", VariantKind::Extra, 300),
            make_variant(11, "Pepper Sauce", VariantKind::Extra, 200),
            make_variant(12, "Free Onions", VariantKind::Extra, 0),
        ],
        addon: vec![make_variant(20, "Zobo Drink", VariantKind::Addon, 600)],
        substitute: vec![make_variant(30, "Ofada Rice", VariantKind::Substitute, 250)],
    }
}

#[test]
fn test_empty_selection_scenario() {
    let selection = Selection::new();
    assert_eq!(calculate_total(2500, &sample_catalog(), &selection), 2500);
}

#[test]
fn test_size_and_extras_scenario() {
    let catalog = sample_catalog();
    let mut selection = Selection::new();
    selection.toggle_variant(2, VariantKind::Size);
    selection.toggle_variant(10, VariantKind::Extra);
    selection.toggle_variant(11, VariantKind::Extra);
    selection.set_quantity(2);

    // (2500 + 500 + 300 + 200) * 2
    assert_eq!(calculate_total(2500, &catalog, &selection), 7000);
}

#[test]
fn test_extra_toggle_twice_restores_selection() {
    for variant in sample_catalog().extra {
        let mut selection = Selection::new();
        selection.toggle_variant(11, VariantKind::Extra);
        let before = selection.clone();

        selection.toggle_variant(variant.id, VariantKind::Extra);
        selection.toggle_variant(variant.id, VariantKind::Extra);

        assert_eq!(
            selection.ids(VariantKind::Extra),
            before.ids(VariantKind::Extra),
            "toggling {} twice changed the selection",
            variant.name
        );
    }
}

#[test]
fn test_size_exclusivity_and_repeat_deselect() {
    let mut selection = Selection::new();
    selection.toggle_variant(1, VariantKind::Size);
    selection.toggle_variant(2, VariantKind::Size);
    assert_eq!(selection.size(), Some(2));

    selection.toggle_variant(2, VariantKind::Size);
    assert_eq!(selection.size(), None);
}

#[test]
fn test_non_negative_modifiers_never_lower_total() {
    let catalog = sample_catalog();

    for kind in [VariantKind::Extra, VariantKind::Addon, VariantKind::Substitute] {
        for variant in catalog.group(kind) {
            let mut selection = Selection::new();
            selection.toggle_variant(2, VariantKind::Size);
            selection.set_quantity(3);
            let before = calculate_total(2500, &catalog, &selection);

            selection.toggle_variant(variant.id, kind);
            let after = calculate_total(2500, &catalog, &selection);

            assert!(after >= before, "{} lowered the total", variant.name);
        }
    }
}

#[test]
fn test_quantity_scales_total() {
    let catalog = sample_catalog();
    let mut selection = Selection::new();
    selection.toggle_variant(2, VariantKind::Size);
    selection.toggle_variant(20, VariantKind::Addon);
    selection.toggle_variant(30, VariantKind::Substitute);

    let single = calculate_total(2500, &catalog, &selection);
    for n in [1_i64, 2, 5, 12] {
        selection.set_quantity(n);
        assert_eq!(calculate_total(2500, &catalog, &selection), single * n);
    }
}

#[test]
fn test_stale_ids_are_ignored() {
    let catalog = sample_catalog();
    let mut selection = Selection::new();
    selection.toggle_variant(10, VariantKind::Extra);
    let expected = calculate_total(2500, &catalog, &selection);

    selection.toggle_variant(999, VariantKind::Extra);
    selection.toggle_variant(998, VariantKind::Addon);
    selection.toggle_variant(997, VariantKind::Substitute);
    assert_eq!(calculate_total(2500, &catalog, &selection), expected);

    let mut stale_size = Selection::new();
    stale_size.toggle_variant(42, VariantKind::Size);
    assert_eq!(calculate_total(2500, &catalog, &stale_size), 2500);
}

#[test]
fn test_legacy_display_price_parse() {
    let price: PriceRepresentation = serde_json::from_str(r#""₦2,500""#).unwrap();
    assert_eq!(price.units(), 2500);
    assert_eq!(calculate_legacy_total(&price, &LegacySelectionState::new()), 2500);
}

#[test]
fn test_legacy_malformed_price_object() {
    let price: PriceRepresentation = serde_json::from_str(r#"{"foo": 1}"#).unwrap();
    let mut selection = LegacySelectionState::new();
    selection.set_quantity(3);

    assert_eq!(price.units(), 0);
    assert_eq!(calculate_legacy_total(&price, &selection), 0);
}

#[test]
fn test_legacy_large_size_delta() {
    let price = PriceRepresentation::Cents(3000);
    let mut selection = LegacySelectionState::new();
    selection.select_size("Small").unwrap();
    assert_eq!(calculate_legacy_total(&price, &selection), 3000);

    selection.select_size("Large").unwrap();
    assert_eq!(calculate_legacy_total(&price, &selection), 5000);
}
