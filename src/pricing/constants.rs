/// Smallest quantity a session can hold.
pub const MIN_QUANTITY: u32 = 1;

// ─────────────────────────────────────────────────────────────────────────────
// Flat-rate catalog, used when an item has no fetched variants
// ─────────────────────────────────────────────────────────────────────────────

/// Fixed size options and their deltas, in display order.
pub const LEGACY_SIZES: [(&str, i64); 3] = [("Small", 0), ("Regular", 0), ("Large", 2000)];

/// Size preselected when a flat-rate session opens.
pub const DEFAULT_LEGACY_SIZE: &str = "Regular";

/// Fixed extras and their deltas, in display order.
pub const LEGACY_EXTRAS: [(&str, i64); 6] = [
    ("Extra Cheese", 500),
    ("Extra Meat", 1000),
    ("Fried Plantain", 500),
    ("Boiled Egg", 300),
    ("Coleslaw", 400),
    ("Extra Sauce", 200),
];

// ─────────────────────────────────────────────────────────────────────────────
// CLI name matching
// ─────────────────────────────────────────────────────────────────────────────

/// Minimum Jaro-Winkler similarity for a typed name to match a variant.
pub const NAME_MATCH_THRESHOLD: f64 = 0.85;

/// Find a flat-rate size by name (case-insensitive).
pub fn legacy_size(name: &str) -> Option<(&'static str, i64)> {
    lookup(&LEGACY_SIZES, name)
}

/// Find a flat-rate extra by name (case-insensitive).
pub fn legacy_extra(name: &str) -> Option<(&'static str, i64)> {
    lookup(&LEGACY_EXTRAS, name)
}

fn lookup(table: &[(&'static str, i64)], name: &str) -> Option<(&'static str, i64)> {
    let wanted = name.trim();
    table
        .iter()
        .copied()
        .find(|(option, _)| option.eq_ignore_ascii_case(wanted))
}
