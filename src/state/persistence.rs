use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::{CustomizeError, Result};
use crate::models::{CartLine, MenuItem};

/// Load menu items from a JSON array.
///
/// Deduplicates by id (last occurrence wins) and returns items ordered by id.
pub fn load_menu<P: AsRef<Path>>(path: P) -> Result<Vec<MenuItem>> {
    let content = fs::read_to_string(path)?;
    let items: Vec<MenuItem> = serde_json::from_str(&content)?;

    let mut seen: BTreeMap<u64, MenuItem> = BTreeMap::new();
    for item in items {
        seen.insert(item.id, item);
    }

    Ok(seen.into_values().collect())
}

/// Pick one item out of a loaded menu.
pub fn find_menu_item(menu: &[MenuItem], item_id: u64) -> Result<MenuItem> {
    menu.iter()
        .find(|item| item.id == item_id)
        .cloned()
        .ok_or(CustomizeError::MenuItemNotFound(item_id))
}

/// Load confirmed cart lines. A missing file is an empty cart.
pub fn load_cart<P: AsRef<Path>>(path: P) -> Result<Vec<CartLine>> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(serde_json::from_str(&content)?),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
        Err(e) => Err(e.into()),
    }
}

/// Save cart lines as a JSON array.
pub fn save_cart<P: AsRef<Path>>(path: P, lines: &[CartLine]) -> Result<()> {
    let json = serde_json::to_string_pretty(lines)?;
    fs::write(path, json)?;
    Ok(())
}

/// Receives confirmed cart lines.
pub trait CartConsumer {
    fn add_to_cart(&mut self, line: CartLine) -> Result<()>;
}

impl CartConsumer for Vec<CartLine> {
    fn add_to_cart(&mut self, line: CartLine) -> Result<()> {
        self.push(line);
        Ok(())
    }
}

/// Cart kept in a JSON file; each confirmed line is appended.
#[derive(Debug, Clone)]
pub struct CartFile {
    path: PathBuf,
}

impl CartFile {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn lines(&self) -> Result<Vec<CartLine>> {
        load_cart(&self.path)
    }
}

impl CartConsumer for CartFile {
    fn add_to_cart(&mut self, line: CartLine) -> Result<()> {
        let mut lines = load_cart(&self.path)?;
        lines.push(line);
        save_cart(&self.path, &lines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Customization, RichSelection};
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    #[test]
    fn test_load_menu_deduplicates_by_id() {
        let json = r#"[
            {"id": 2, "name": "Suya", "price": 1500},
            {"id": 1, "name": "Puff Puff", "price": "₦500"},
            {"id": 2, "name": "Beef Suya", "price": 1800}
        ]"#;

        let mut file = NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let menu = load_menu(file.path()).unwrap();
        assert_eq!(menu.len(), 2);
        assert_eq!(menu[0].id, 1);
        // Last occurrence wins
        assert_eq!(menu[1].name, "Beef Suya");
        assert_eq!(menu[1].base_price_units(), 1800);
    }

    #[test]
    fn test_find_menu_item() {
        let json = r#"[{"id": 5, "name": "Moi Moi", "price": 700}]"#;
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();
        let menu = load_menu(file.path()).unwrap();

        assert_eq!(find_menu_item(&menu, 5).unwrap().name, "Moi Moi");
        assert!(matches!(
            find_menu_item(&menu, 6),
            Err(CustomizeError::MenuItemNotFound(6))
        ));
    }

    #[test]
    fn test_cart_file_appends() {
        let dir = TempDir::new().unwrap();
        let mut cart = CartFile::new(dir.path().join("cart.json"));
        assert!(cart.lines().unwrap().is_empty());

        let item: MenuItem =
            serde_json::from_str(r#"{"id": 1, "name": "Puff Puff", "price": 500}"#).unwrap();
        let line = CartLine {
            item,
            quantity: 2,
            customization: Customization::Rich(RichSelection::default()),
            unit_price: 500,
            total: 1000,
        };

        cart.add_to_cart(line.clone()).unwrap();
        cart.add_to_cart(line).unwrap();

        let lines = cart.lines().unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1].total, 1000);
    }
}
