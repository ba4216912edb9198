use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::{CustomizeError, Result};
use crate::models::CustomizationResponse;

/// Source of per-item customization data (`GET /menu-items/{id}/customization`).
pub trait CustomizationProvider {
    fn fetch_customization(&self, item_id: u64) -> Result<CustomizationResponse>;
}

/// Serves customization data from a directory laid out like the API:
/// `<root>/menu-items/<id>/customization.json`.
#[derive(Debug, Clone)]
pub struct JsonDirProvider {
    root: PathBuf,
}

impl JsonDirProvider {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// File that stands in for the endpoint of `item_id`.
    pub fn path_for(&self, item_id: u64) -> PathBuf {
        self.root
            .join("menu-items")
            .join(item_id.to_string())
            .join("customization.json")
    }
}

impl CustomizationProvider for JsonDirProvider {
    fn fetch_customization(&self, item_id: u64) -> Result<CustomizationResponse> {
        let content = match fs::read_to_string(self.path_for(item_id)) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(CustomizeError::CustomizationUnavailable(item_id));
            }
            Err(e) => return Err(e.into()),
        };

        Ok(serde_json::from_str(&content)?)
    }
}

impl CustomizationProvider for HashMap<u64, CustomizationResponse> {
    fn fetch_customization(&self, item_id: u64) -> Result<CustomizationResponse> {
        self.get(&item_id)
            .cloned()
            .ok_or(CustomizeError::CustomizationUnavailable(item_id))
    }
}
