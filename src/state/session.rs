use tracing::{debug, warn};

use crate::error::{CustomizeError, Result};
use crate::models::{
    CartLine, Customization, CustomizationResponse, CustomizationSummary, MenuItem,
    PriceRepresentation, Variant, VariantCatalog, VariantId, VariantKind,
};
use crate::pricing::{calculate_legacy_total, calculate_total, legacy_breakdown, price_breakdown};
use crate::pricing::{unit_price, PriceBreakdown};
use crate::state::persistence::CartConsumer;
use crate::state::provider::CustomizationProvider;
use crate::state::selection::{LegacySelectionState, Selection};

/// Whether an item should open the customization step.
///
/// No summary (failed or empty fetch) means no.
pub fn has_variants(summary: Option<&CustomizationSummary>) -> bool {
    summary.is_some_and(CustomizationSummary::has_variants)
}

/// Fetch customization data, swallowing failures.
///
/// Errors are logged and reported as `None` so that adding to the cart
/// always remains possible.
pub fn fetch_customization<P>(provider: &P, item_id: u64) -> Option<CustomizationResponse>
where
    P: CustomizationProvider + ?Sized,
{
    match provider.fetch_customization(item_id) {
        Ok(response) => Some(response),
        Err(e) => {
            warn!(item_id, error = %e, "customization fetch failed, falling back to basic add");
            None
        }
    }
}

/// Which pricing path a session runs on. Fixed for the session's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PricingMode {
    Catalog,
    Legacy,
}

#[derive(Debug, Clone)]
enum SessionState {
    Catalog {
        base_price: PriceRepresentation,
        catalog: VariantCatalog,
        summary: CustomizationSummary,
        selection: Selection,
    },
    Legacy {
        selection: LegacySelectionState,
    },
}

/// One customization of one menu item, from open to confirm or cancel.
///
/// Every session starts from a fresh selection; confirming consumes it.
#[derive(Debug, Clone)]
pub struct CustomizationSession {
    item: MenuItem,
    state: SessionState,
}

impl CustomizationSession {
    /// Open a session, fetching the item's customization data.
    pub fn open<P>(item: MenuItem, provider: &P) -> Self
    where
        P: CustomizationProvider + ?Sized,
    {
        let response = fetch_customization(provider, item.id);
        Self::with_customization(item, response)
    }

    /// Open a session from already fetched data.
    ///
    /// The catalog path is used when the summary reports variants; otherwise
    /// the flat-rate path. The server's `menu_item` price wins over the
    /// listing price when present.
    pub fn with_customization(item: MenuItem, response: Option<CustomizationResponse>) -> Self {
        let state = match response {
            Some(response) if has_variants(Some(&response.summary())) => {
                let summary = response.summary();
                let base_price = response
                    .menu_item
                    .map(|m| m.base_price)
                    .unwrap_or_else(|| item.base_price.clone());
                SessionState::Catalog {
                    base_price,
                    catalog: response.variants,
                    summary,
                    selection: Selection::new(),
                }
            }
            _ => SessionState::Legacy {
                selection: LegacySelectionState::new(),
            },
        };

        let session = Self { item, state };
        debug!(item_id = session.item.id, mode = ?session.mode(), "customization session opened");
        session
    }

    pub fn item(&self) -> &MenuItem {
        &self.item
    }

    pub fn mode(&self) -> PricingMode {
        match self.state {
            SessionState::Catalog { .. } => PricingMode::Catalog,
            SessionState::Legacy { .. } => PricingMode::Legacy,
        }
    }

    pub fn catalog(&self) -> Option<&VariantCatalog> {
        match &self.state {
            SessionState::Catalog { catalog, .. } => Some(catalog),
            SessionState::Legacy { .. } => None,
        }
    }

    pub fn summary(&self) -> Option<&CustomizationSummary> {
        match &self.state {
            SessionState::Catalog { summary, .. } => Some(summary),
            SessionState::Legacy { .. } => None,
        }
    }

    pub fn selection(&self) -> Option<&Selection> {
        match &self.state {
            SessionState::Catalog { selection, .. } => Some(selection),
            SessionState::Legacy { .. } => None,
        }
    }

    pub fn legacy_selection(&self) -> Option<&LegacySelectionState> {
        match &self.state {
            SessionState::Legacy { selection } => Some(selection),
            SessionState::Catalog { .. } => None,
        }
    }

    /// Toggle a catalog variant. The id must exist in its own group.
    pub fn toggle_variant(&mut self, id: VariantId, kind: VariantKind) -> Result<bool> {
        match &mut self.state {
            SessionState::Catalog {
                catalog, selection, ..
            } if catalog.contains(kind, id) => {
                let selected = selection.toggle_variant(id, kind);
                debug!(variant_id = id, %kind, selected, "variant toggled");
                Ok(selected)
            }
            _ => Err(CustomizeError::UnknownVariant { id, kind }),
        }
    }

    pub fn is_selected(&self, id: VariantId, kind: VariantKind) -> bool {
        self.selection()
            .is_some_and(|selection| selection.is_selected(id, kind))
    }

    /// Pick a flat-rate size. Only valid on the legacy path.
    pub fn select_legacy_size(&mut self, name: &str) -> Result<()> {
        match &mut self.state {
            SessionState::Legacy { selection } => selection.select_size(name),
            SessionState::Catalog { .. } => Err(CustomizeError::VariantNotFound(name.to_string())),
        }
    }

    /// Flip a flat-rate extra. Only valid on the legacy path.
    pub fn toggle_legacy_extra(&mut self, name: &str) -> Result<bool> {
        match &mut self.state {
            SessionState::Legacy { selection } => selection.toggle_extra(name),
            SessionState::Catalog { .. } => Err(CustomizeError::VariantNotFound(name.to_string())),
        }
    }

    pub fn quantity(&self) -> u32 {
        match &self.state {
            SessionState::Catalog { selection, .. } => selection.quantity(),
            SessionState::Legacy { selection } => selection.quantity(),
        }
    }

    pub fn set_quantity(&mut self, requested: i64) {
        match &mut self.state {
            SessionState::Catalog { selection, .. } => selection.set_quantity(requested),
            SessionState::Legacy { selection } => selection.set_quantity(requested),
        }
    }

    pub fn increment_quantity(&mut self) {
        match &mut self.state {
            SessionState::Catalog { selection, .. } => selection.increment_quantity(),
            SessionState::Legacy { selection } => selection.increment_quantity(),
        }
    }

    pub fn decrement_quantity(&mut self) {
        match &mut self.state {
            SessionState::Catalog { selection, .. } => selection.decrement_quantity(),
            SessionState::Legacy { selection } => selection.decrement_quantity(),
        }
    }

    pub fn special_instructions(&self) -> &str {
        match &self.state {
            SessionState::Catalog { selection, .. } => selection.special_instructions(),
            SessionState::Legacy { selection } => selection.special_instructions(),
        }
    }

    pub fn set_special_instructions(&mut self, text: impl Into<String>) {
        match &mut self.state {
            SessionState::Catalog { selection, .. } => selection.set_special_instructions(text),
            SessionState::Legacy { selection } => selection.set_special_instructions(text),
        }
    }

    /// Base price in whole units for the active path.
    pub fn base_price(&self) -> i64 {
        match &self.state {
            SessionState::Catalog { base_price, .. } => base_price.units(),
            SessionState::Legacy { .. } => self.item.base_price_units(),
        }
    }

    /// Current total for the selection.
    pub fn total(&self) -> i64 {
        match &self.state {
            SessionState::Catalog {
                base_price,
                catalog,
                selection,
                ..
            } => calculate_total(base_price.units(), catalog, selection),
            SessionState::Legacy { selection } => {
                calculate_legacy_total(&self.item.base_price, selection)
            }
        }
    }

    /// Itemized view of [`total`](Self::total).
    pub fn breakdown(&self) -> PriceBreakdown {
        match &self.state {
            SessionState::Catalog {
                base_price,
                catalog,
                selection,
                ..
            } => price_breakdown(base_price.units(), catalog, selection),
            SessionState::Legacy { selection } => legacy_breakdown(&self.item.base_price, selection),
        }
    }

    /// Required variants whose group has nothing picked.
    ///
    /// Checked per group, not per variant: any pick in a group satisfies every
    /// required variant in it. Informational; confirming is still allowed.
    pub fn missing_required(&self) -> Vec<&Variant> {
        let SessionState::Catalog {
            catalog, selection, ..
        } = &self.state
        else {
            return Vec::new();
        };

        catalog
            .iter()
            .filter(|v| v.is_required && selection.ids(v.kind).is_empty())
            .collect()
    }

    /// Finish the session and package it for the cart.
    pub fn confirm(self) -> CartLine {
        let quantity = self.quantity();
        let total = self.total();
        let (customization, unit) = match &self.state {
            SessionState::Catalog {
                base_price,
                catalog,
                selection,
                ..
            } => (
                Customization::Rich(selection.to_payload()),
                unit_price(base_price.units(), catalog, selection),
            ),
            SessionState::Legacy { selection } => (
                Customization::Legacy(selection.to_payload()),
                legacy_breakdown(&self.item.base_price, selection).unit_price,
            ),
        };

        debug!(item_id = self.item.id, quantity, total, "customization confirmed");
        CartLine {
            item: self.item,
            quantity,
            customization,
            unit_price: unit,
            total,
        }
    }

    /// Confirm and hand the line to `consumer`.
    pub fn confirm_into<C>(self, consumer: &mut C) -> Result<()>
    where
        C: CartConsumer + ?Sized,
    {
        consumer.add_to_cart(self.confirm())
    }
}

/// The customization surface: closed, or open on exactly one session.
///
/// Opening always builds a new session, so nothing carries over between items.
#[derive(Debug, Default)]
pub struct CustomizationSurface {
    session: Option<CustomizationSession>,
}

impl CustomizationSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open on `item`, discarding any session that was still open.
    pub fn open<P>(&mut self, item: MenuItem, provider: &P) -> &mut CustomizationSession
    where
        P: CustomizationProvider + ?Sized,
    {
        self.session.insert(CustomizationSession::open(item, provider))
    }

    /// Close without adding anything.
    pub fn close(&mut self) {
        if let Some(session) = self.session.take() {
            debug!(item_id = session.item.id, "customization cancelled");
        }
    }

    pub fn is_open(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&CustomizationSession> {
        self.session.as_ref()
    }

    pub fn session_mut(&mut self) -> Option<&mut CustomizationSession> {
        self.session.as_mut()
    }

    /// Confirm the open session and close. `None` if nothing was open.
    pub fn confirm(&mut self) -> Option<CartLine> {
        self.session.take().map(CustomizationSession::confirm)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn item() -> MenuItem {
        serde_json::from_value(json!({"id": 1, "name": "Jollof Rice", "price": "₦2,000"})).unwrap()
    }

    fn response() -> CustomizationResponse {
        serde_json::from_value(json!({
            "menu_item": {"id": 1, "name": "Jollof Rice", "base_price": 2500},
            "variants": {
                "size": [
                    {"id": 1, "name": "Regular", "type": "size", "price_modifier": 0, "is_required": true},
                    {"id": 2, "name": "Large", "type": "size", "price_modifier": 500, "is_required": true}
                ],
                "extra": [{"id": 3, "name": "Chicken", "type": "extra", "price_modifier": 1200}]
            },
            "customization_summary": {"has_sizes": true, "has_extras": true, "total_variants": 3, "required_variants": 2}
        }))
        .unwrap()
    }

    #[test]
    fn test_gate() {
        assert!(!has_variants(None));
        assert!(!has_variants(Some(&CustomizationSummary::default())));
        assert!(has_variants(Some(&response().summary())));
    }

    #[test]
    fn test_catalog_session_uses_server_price() {
        let session = CustomizationSession::with_customization(item(), Some(response()));
        assert_eq!(session.mode(), PricingMode::Catalog);
        assert_eq!(session.base_price(), 2500);
        assert_eq!(session.total(), 2500);
    }

    #[test]
    fn test_empty_catalog_falls_back_to_legacy() {
        let empty = CustomizationResponse::default();
        let session = CustomizationSession::with_customization(item(), Some(empty));
        assert_eq!(session.mode(), PricingMode::Legacy);
        assert_eq!(session.total(), 2000);
    }

    #[test]
    fn test_toggle_rejects_ids_outside_group() {
        let mut session = CustomizationSession::with_customization(item(), Some(response()));
        assert!(session.toggle_variant(3, VariantKind::Extra).unwrap());
        assert!(matches!(
            session.toggle_variant(3, VariantKind::Size),
            Err(CustomizeError::UnknownVariant { id: 3, kind: VariantKind::Size })
        ));
        assert!(session.is_selected(3, VariantKind::Extra));
    }

    #[test]
    fn test_legacy_only_operations() {
        let mut catalog_session = CustomizationSession::with_customization(item(), Some(response()));
        assert!(catalog_session.toggle_legacy_extra("Extra Cheese").is_err());

        let mut legacy_session = CustomizationSession::with_customization(item(), None);
        assert!(legacy_session.toggle_variant(3, VariantKind::Extra).is_err());
        assert!(legacy_session.toggle_legacy_extra("Extra Cheese").unwrap());
        assert_eq!(legacy_session.total(), 2500);
    }

    #[test]
    fn test_missing_required() {
        let mut session = CustomizationSession::with_customization(item(), Some(response()));
        assert_eq!(session.missing_required().len(), 2);

        session.toggle_variant(2, VariantKind::Size).unwrap();
        assert!(session.missing_required().is_empty());
    }

    #[test]
    fn test_confirm_packages_rich_payload() {
        let mut session = CustomizationSession::with_customization(item(), Some(response()));
        session.toggle_variant(2, VariantKind::Size).unwrap();
        session.toggle_variant(3, VariantKind::Extra).unwrap();
        session.set_quantity(2);
        session.set_special_instructions("  ");

        let line = session.confirm();
        assert_eq!(line.quantity, 2);
        assert_eq!(line.unit_price, 4200);
        assert_eq!(line.total, 8400);
        match line.customization {
            Customization::Rich(rich) => {
                assert_eq!(rich.size, Some(2));
                assert_eq!(rich.extras, vec![3]);
                assert_eq!(rich.special_instructions, None);
            }
            Customization::Legacy(_) => panic!("expected catalog payload"),
        }
    }

    #[test]
    fn test_surface_reopen_is_fresh() {
        let mut provider = std::collections::HashMap::new();
        provider.insert(1, response());

        let mut surface = CustomizationSurface::new();
        let session = surface.open(item(), &provider);
        session.toggle_variant(2, VariantKind::Size).unwrap();
        session.increment_quantity();
        surface.close();
        assert!(!surface.is_open());

        let session = surface.open(item(), &provider);
        assert_eq!(session.selection(), Some(&Selection::new()));
        assert_eq!(session.quantity(), 1);
    }
}
