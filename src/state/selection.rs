use crate::error::{CustomizeError, Result};
use crate::models::{LegacySelection, RichSelection, VariantId, VariantKind};
use crate::pricing::constants::{legacy_extra, legacy_size, DEFAULT_LEGACY_SIZE, MIN_QUANTITY};

/// Item count for one cart line. Never below [`MIN_QUANTITY`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Quantity(u32);

impl Quantity {
    /// Clamp any requested count into range.
    pub fn new(requested: i64) -> Self {
        Self(requested.clamp(MIN_QUANTITY as i64, u32::MAX as i64) as u32)
    }

    #[inline]
    pub fn get(self) -> u32 {
        self.0
    }

    pub fn increment(&mut self) {
        self.0 = self.0.saturating_add(1);
    }

    pub fn decrement(&mut self) {
        self.0 = self.0.saturating_sub(1).max(MIN_QUANTITY);
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Self(MIN_QUANTITY)
    }
}

/// The user's picks for one item against a fetched variant catalog.
///
/// Sizes behave like a radio group that can be cleared by picking the
/// current size again. The other groups behave like checkboxes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    size: Option<VariantId>,
    extras: Vec<VariantId>,
    addons: Vec<VariantId>,
    substitutes: Vec<VariantId>,
    special_instructions: String,
    quantity: Quantity,
}

impl Selection {
    /// Empty selection with quantity 1.
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip one variant. Returns whether it is selected afterwards.
    ///
    /// Ids are not checked against any catalog here.
    pub fn toggle_variant(&mut self, id: VariantId, kind: VariantKind) -> bool {
        let group = match kind {
            VariantKind::Size => {
                self.size = if self.size == Some(id) { None } else { Some(id) };
                return self.size.is_some();
            }
            VariantKind::Extra => &mut self.extras,
            VariantKind::Addon => &mut self.addons,
            VariantKind::Substitute => &mut self.substitutes,
        };

        match group.iter().position(|selected| *selected == id) {
            Some(index) => {
                group.remove(index);
                false
            }
            None => {
                group.push(id);
                true
            }
        }
    }

    pub fn is_selected(&self, id: VariantId, kind: VariantKind) -> bool {
        match kind {
            VariantKind::Size => self.size == Some(id),
            _ => self.ids(kind).contains(&id),
        }
    }

    /// Selected ids of one group, in the order they were picked.
    pub fn ids(&self, kind: VariantKind) -> &[VariantId] {
        match kind {
            VariantKind::Size => self.size.as_slice(),
            VariantKind::Extra => &self.extras,
            VariantKind::Addon => &self.addons,
            VariantKind::Substitute => &self.substitutes,
        }
    }

    pub fn size(&self) -> Option<VariantId> {
        self.size
    }

    /// True when nothing in any group is selected.
    pub fn is_empty(&self) -> bool {
        VariantKind::ALL.into_iter().all(|kind| self.ids(kind).is_empty())
    }

    #[inline]
    pub fn quantity(&self) -> u32 {
        self.quantity.get()
    }

    pub fn set_quantity(&mut self, requested: i64) {
        self.quantity = Quantity::new(requested);
    }

    pub fn increment_quantity(&mut self) {
        self.quantity.increment();
    }

    pub fn decrement_quantity(&mut self) {
        self.quantity.decrement();
    }

    /// Instructions exactly as typed.
    pub fn special_instructions(&self) -> &str {
        &self.special_instructions
    }

    pub fn set_special_instructions(&mut self, text: impl Into<String>) {
        self.special_instructions = text.into();
    }

    /// Instructions as submitted: trimmed, `None` when blank.
    pub fn submitted_instructions(&self) -> Option<String> {
        let trimmed = self.special_instructions.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    }

    /// Package the selection for the cart.
    pub fn to_payload(&self) -> RichSelection {
        RichSelection {
            size: self.size,
            extras: self.extras.clone(),
            addons: self.addons.clone(),
            substitutes: self.substitutes.clone(),
            special_instructions: self.submitted_instructions(),
        }
    }
}

/// The user's picks against the fixed flat-rate catalog.
///
/// A size is always chosen; extras are toggled by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegacySelectionState {
    size: String,
    extras: Vec<String>,
    special_instructions: String,
    quantity: Quantity,
}

impl LegacySelectionState {
    pub fn new() -> Self {
        Self {
            size: DEFAULT_LEGACY_SIZE.to_string(),
            extras: Vec::new(),
            special_instructions: String::new(),
            quantity: Quantity::default(),
        }
    }

    pub fn size(&self) -> &str {
        &self.size
    }

    pub fn extras(&self) -> &[String] {
        &self.extras
    }

    /// Pick a size by name (case-insensitive).
    pub fn select_size(&mut self, name: &str) -> Result<()> {
        let (canonical, _) =
            legacy_size(name).ok_or_else(|| CustomizeError::VariantNotFound(name.to_string()))?;
        self.size = canonical.to_string();
        Ok(())
    }

    /// Flip one extra by name. Returns whether it is selected afterwards.
    pub fn toggle_extra(&mut self, name: &str) -> Result<bool> {
        let (canonical, _) =
            legacy_extra(name).ok_or_else(|| CustomizeError::VariantNotFound(name.to_string()))?;

        match self.extras.iter().position(|e| e == canonical) {
            Some(index) => {
                self.extras.remove(index);
                Ok(false)
            }
            None => {
                self.extras.push(canonical.to_string());
                Ok(true)
            }
        }
    }

    pub fn is_extra_selected(&self, name: &str) -> bool {
        self.extras.iter().any(|e| e.eq_ignore_ascii_case(name.trim()))
    }

    #[inline]
    pub fn quantity(&self) -> u32 {
        self.quantity.get()
    }

    pub fn set_quantity(&mut self, requested: i64) {
        self.quantity = Quantity::new(requested);
    }

    pub fn increment_quantity(&mut self) {
        self.quantity.increment();
    }

    pub fn decrement_quantity(&mut self) {
        self.quantity.decrement();
    }

    pub fn special_instructions(&self) -> &str {
        &self.special_instructions
    }

    pub fn set_special_instructions(&mut self, text: impl Into<String>) {
        self.special_instructions = text.into();
    }

    /// Package the selection for the cart. Instructions are trimmed but kept
    /// as a string, since flat-rate consumers expect one.
    pub fn to_payload(&self) -> LegacySelection {
        LegacySelection {
            size: self.size.clone(),
            extras: self.extras.clone(),
            special_instructions: self.special_instructions.trim().to_string(),
        }
    }
}

impl Default for LegacySelectionState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_selection_is_empty() {
        let selection = Selection::new();
        assert!(selection.is_empty());
        assert_eq!(selection.size(), None);
        assert_eq!(selection.quantity(), 1);
        assert_eq!(selection.special_instructions(), "");
    }

    #[test]
    fn test_size_is_exclusive() {
        let mut selection = Selection::new();
        assert!(selection.toggle_variant(1, VariantKind::Size));
        assert!(selection.toggle_variant(2, VariantKind::Size));

        assert!(selection.is_selected(2, VariantKind::Size));
        assert!(!selection.is_selected(1, VariantKind::Size));
        assert_eq!(selection.ids(VariantKind::Size), &[2]);
    }

    #[test]
    fn test_size_deselects_on_repeat() {
        let mut selection = Selection::new();
        selection.toggle_variant(1, VariantKind::Size);
        assert!(!selection.toggle_variant(1, VariantKind::Size));
        assert_eq!(selection.size(), None);
    }

    #[test]
    fn test_checkbox_groups_toggle() {
        let mut selection = Selection::new();
        selection.toggle_variant(5, VariantKind::Extra);
        selection.toggle_variant(6, VariantKind::Extra);
        selection.toggle_variant(5, VariantKind::Addon);
        assert_eq!(selection.ids(VariantKind::Extra), &[5, 6]);
        assert!(selection.is_selected(5, VariantKind::Addon));
        assert!(!selection.is_selected(6, VariantKind::Addon));

        selection.toggle_variant(5, VariantKind::Extra);
        assert_eq!(selection.ids(VariantKind::Extra), &[6]);
    }

    #[test]
    fn test_quantity_clamps_at_one() {
        let mut selection = Selection::new();
        selection.decrement_quantity();
        assert_eq!(selection.quantity(), 1);

        selection.set_quantity(0);
        assert_eq!(selection.quantity(), 1);
        selection.set_quantity(-4);
        assert_eq!(selection.quantity(), 1);

        selection.set_quantity(3);
        selection.increment_quantity();
        assert_eq!(selection.quantity(), 4);
        selection.decrement_quantity();
        assert_eq!(selection.quantity(), 3);
    }

    #[test]
    fn test_instructions_trimmed_on_submit() {
        let mut selection = Selection::new();
        selection.set_special_instructions("   ");
        assert_eq!(selection.special_instructions(), "   ");
        assert_eq!(selection.submitted_instructions(), None);

        selection.set_special_instructions("  no onions ");
        assert_eq!(selection.to_payload().special_instructions.as_deref(), Some("no onions"));
    }

    #[test]
    fn test_legacy_defaults() {
        let selection = LegacySelectionState::new();
        assert_eq!(selection.size(), DEFAULT_LEGACY_SIZE);
        assert!(selection.extras().is_empty());
        assert_eq!(selection.quantity(), 1);
    }

    #[test]
    fn test_legacy_rejects_unknown_names() {
        let mut selection = LegacySelectionState::new();
        assert!(selection.select_size("Gigantic").is_err());
        assert!(selection.toggle_extra("Truffle").is_err());
        assert_eq!(selection.size(), DEFAULT_LEGACY_SIZE);
    }

    #[test]
    fn test_legacy_extras_use_canonical_names() {
        let mut selection = LegacySelectionState::new();
        assert!(selection.toggle_extra("extra cheese").unwrap());
        assert!(selection.is_extra_selected("Extra Cheese"));
        assert_eq!(selection.to_payload().extras, vec!["Extra Cheese".to_string()]);

        assert!(!selection.toggle_extra("EXTRA CHEESE").unwrap());
        assert!(selection.extras().is_empty());
    }
}
