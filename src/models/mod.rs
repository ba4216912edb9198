mod customization;
mod menu_item;
mod variant;

pub use customization::{CartLine, Customization, LegacySelection, RichSelection};
pub use menu_item::{normalize_price, MenuItem, PriceRepresentation, DEFAULT_CURRENCY};
pub use variant::{
    CustomizationResponse, CustomizationSummary, Variant, VariantCatalog, VariantId, VariantKind,
};
