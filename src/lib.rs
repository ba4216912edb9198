pub mod cli;
pub mod error;
pub mod interface;
pub mod models;
pub mod pricing;
pub mod state;

pub use error::{CustomizeError, Result};
pub use models::{CartLine, Customization, MenuItem, Variant, VariantCatalog, VariantKind};
pub use state::{CustomizationSession, Selection};
