use thiserror::Error;

use crate::models::VariantKind;

#[derive(Debug, Error)]
pub enum CustomizeError {
    #[error("Menu item not found: {0}")]
    MenuItemNotFound(u64),

    #[error("No customization data for menu item {0}")]
    CustomizationUnavailable(u64),

    #[error("Variant {id} is not in the {kind} group")]
    UnknownVariant { id: u64, kind: VariantKind },

    #[error("Variant not found: {0}")]
    VariantNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, CustomizeError>;
