pub mod calculations;
pub mod constants;
pub mod legacy;

pub use calculations::{
    calculate_total, price_breakdown, size_modifier, sum_modifiers, unit_price, PriceBreakdown,
    PriceLine,
};
pub use constants::*;
pub use legacy::{calculate_legacy_total, legacy_breakdown};
