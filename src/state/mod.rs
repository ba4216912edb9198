mod persistence;
mod provider;
mod selection;
mod session;

pub use persistence::{find_menu_item, load_cart, load_menu, save_cart, CartConsumer, CartFile};
pub use provider::{CustomizationProvider, JsonDirProvider};
pub use selection::{LegacySelectionState, Quantity, Selection};
pub use session::{
    fetch_customization, has_variants, CustomizationSession, CustomizationSurface, PricingMode,
};
