//! # Order Session
//!
//! One "configure your açaí" modal: a product, the size and topping
//! snapshots loaded for it, and the shopper's selection.
//!
//! ## Session Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Order Session Lifecycle                              │
//! │                                                                         │
//! │  OrderSession::new(product)      sizes: Loading, toppings: Loading     │
//! │       │                                                                 │
//! │       ├── apply_sizes(result)    → Loaded / Failed, size defaulted     │
//! │       ├── apply_toppings(result) → Loaded / Failed, stale picks pruned │
//! │       │     (either order, independently)                              │
//! │       ▼                                                                 │
//! │  choose_size(id) / toggle_topping(id)                                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  priced() ──► PricedOrder ──► order_link(channel, greeting)            │
//! │                                                                         │
//! │  can_submit() is false while no size can be priced.                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use tracing::{debug, warn};

use acai_core::{
    compute_order, CoreError, CoreResult, LoadState, PricedOrder, Product, Selection, Size,
    Topping, WhatsAppChannel,
};

use crate::error::ApiError;

/// State of one order configuration session.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSession {
    product: Product,
    sizes: LoadState<Size>,
    toppings: LoadState<Topping>,
    selection: Selection,
}

impl OrderSession {
    /// Opens a session for `product` with both catalogs still loading.
    pub fn new(product: Product) -> Self {
        debug!(product_id = %product.id, "Opening order session");
        OrderSession {
            product,
            sizes: LoadState::Loading,
            toppings: LoadState::Loading,
            selection: Selection::new(),
        }
    }

    pub fn product(&self) -> &Product {
        &self.product
    }

    pub fn sizes(&self) -> &LoadState<Size> {
        &self.sizes
    }

    pub fn toppings(&self) -> &LoadState<Topping> {
        &self.toppings
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Applies the result of a size load.
    ///
    /// ## Errors
    /// - `LoadFailure` when the load failed (state becomes `Failed`)
    /// - `NoActiveSizes` when it succeeded with nothing to offer
    pub fn apply_sizes(&mut self, result: CoreResult<Vec<Size>>) -> Result<(), ApiError> {
        match result {
            Ok(sizes) => {
                let outcome = self.selection.on_catalog_loaded(&sizes);
                self.sizes = LoadState::Loaded(sizes);
                outcome.map_err(ApiError::from)
            }
            Err(err) => {
                warn!(product_id = %self.product.id, error = %err, "Size load failed");
                self.sizes = LoadState::from_result(Err(err.clone()));
                Err(ApiError::from(err))
            }
        }
    }

    /// Applies the result of a topping load.
    pub fn apply_toppings(&mut self, result: CoreResult<Vec<Topping>>) -> Result<(), ApiError> {
        match result {
            Ok(toppings) => {
                self.selection.on_toppings_loaded(&toppings);
                self.toppings = LoadState::Loaded(toppings);
                Ok(())
            }
            Err(err) => {
                warn!(product_id = %self.product.id, error = %err, "Topping load failed");
                self.toppings = LoadState::from_result(Err(err.clone()));
                Err(ApiError::from(err))
            }
        }
    }

    /// Picks a size from the loaded snapshot.
    pub fn choose_size(&mut self, id: &str) -> Result<(), ApiError> {
        self.selection.choose_size(id)?;
        debug!(size_id = %id, "Size chosen");
        Ok(())
    }

    /// Adds or removes a topping. Returns true when it is now selected.
    pub fn toggle_topping(&mut self, id: &str) -> Result<bool, ApiError> {
        let selected = self.selection.toggle_topping(id)?;
        debug!(topping_id = %id, selected, "Topping toggled");
        Ok(selected)
    }

    /// Current price of the selection.
    pub fn priced(&self) -> Result<PricedOrder, ApiError> {
        let sizes = self.sizes.items().unwrap_or(&[]);
        let toppings = self.toppings.items().unwrap_or(&[]);
        compute_order(&self.product, sizes, toppings, &self.selection).map_err(ApiError::from)
    }

    /// Why the order cannot be submitted yet, if it can't.
    ///
    /// `None` exactly when [`can_submit`](Self::can_submit) is true. A stale
    /// topping left over from a failed reload shows up as
    /// `INVALID_SELECTION` so the caller can ask for it to be removed.
    pub fn submission_blocker(&self) -> Option<ApiError> {
        if self.sizes.is_empty_loaded() {
            return Some(ApiError::from(CoreError::NoActiveSizes));
        }
        self.priced().err()
    }

    /// True when "Finalizar Pedido" is enabled.
    pub fn can_submit(&self) -> bool {
        self.submission_blocker().is_none()
    }

    /// WhatsApp link for the current selection.
    pub fn order_link(&self, channel: &WhatsAppChannel, greeting: &str) -> Result<String, ApiError> {
        let order = self.priced()?;
        Ok(channel.order_link(greeting, &order))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use acai_core::{Money, DEFAULT_GREETING};

    fn product() -> Product {
        Product::new("p1", "Açaí Tradicional", Money::from_cents(1200))
    }

    fn sizes() -> Vec<Size> {
        vec![
            Size::new("s1", "300ml", Money::from_cents(1200), 0),
            Size::new("s2", "500ml", Money::from_cents(1800), 1),
        ]
    }

    fn toppings() -> Vec<Topping> {
        vec![
            Topping::new("t1", "Granola", Money::from_cents(200), 0),
            Topping::new("t2", "Nutella", Money::from_cents(500), 1),
        ]
    }

    fn loaded() -> OrderSession {
        let mut session = OrderSession::new(product());
        session.apply_sizes(Ok(sizes())).unwrap();
        session.apply_toppings(Ok(toppings())).unwrap();
        session
    }

    #[test]
    fn test_reference_order() {
        let mut session = loaded();
        session.choose_size("s2").unwrap();
        assert!(session.toggle_topping("t1").unwrap());
        assert!(session.toggle_topping("t2").unwrap());

        let order = session.priced().unwrap();
        assert_eq!(order.total_price.cents(), 2500);
        assert!(session.can_submit());

        let channel = WhatsAppChannel::new("5577981336827").unwrap();
        let link = session.order_link(&channel, DEFAULT_GREETING).unwrap();
        assert!(link.starts_with("https://wa.me/5577981336827?text="));
        assert!(link.contains("R%24%2025%2C00"));
    }

    #[test]
    fn test_loading_session_cannot_submit() {
        let session = OrderSession::new(product());
        assert!(session.sizes().is_loading());
        assert!(!session.can_submit());
        assert_eq!(session.submission_blocker().map(|e| e.code), Some(ErrorCode::MissingSize));
    }

    #[test]
    fn test_empty_sizes_block_submission() {
        let mut session = OrderSession::new(product());
        let err = session.apply_sizes(Ok(Vec::new())).unwrap_err();

        assert_eq!(err.code, ErrorCode::NoActiveSizes);
        assert!(session.sizes().is_empty_loaded());
        assert!(!session.can_submit());
        assert_eq!(session.submission_blocker().map(|e| e.code), Some(ErrorCode::NoActiveSizes));
    }

    #[test]
    fn test_toppings_may_arrive_first() {
        let mut session = OrderSession::new(product());
        session.apply_toppings(Ok(toppings())).unwrap();
        session.toggle_topping("t2").unwrap();
        assert!(!session.can_submit());

        session.apply_sizes(Ok(sizes())).unwrap();
        assert_eq!(session.priced().unwrap().total_price.cents(), 1700);
    }

    #[test]
    fn test_failed_topping_load_still_allows_plain_order() {
        let mut session = OrderSession::new(product());
        session.apply_sizes(Ok(sizes())).unwrap();
        let err = session
            .apply_toppings(Err(CoreError::LoadFailure("timeout".to_string())))
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::LoadFailure);
        assert!(session.toppings().is_failed());
        assert_eq!(session.priced().unwrap().total_price.cents(), 1200);
        assert!(session.toggle_topping("t1").is_err());
    }

    #[test]
    fn test_failed_topping_reload_reports_stale_choice() {
        let mut session = loaded();
        session.toggle_topping("t1").unwrap();

        let _ = session.apply_toppings(Err(CoreError::LoadFailure("timeout".to_string())));

        assert!(!session.can_submit());
        let blocker = session.submission_blocker().unwrap();
        assert_eq!(blocker.code, ErrorCode::InvalidSelection);
        assert!(blocker.message.contains("t1"));
        assert!(!blocker.blocks_submission());
    }

    #[test]
    fn test_failed_size_load() {
        let mut session = OrderSession::new(product());
        let err = session
            .apply_sizes(Err(CoreError::LoadFailure("timeout".to_string())))
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::LoadFailure);
        assert_eq!(session.sizes().error(), Some("timeout"));
        assert!(!session.can_submit());
    }

    #[test]
    fn test_reload_without_chosen_size_redefaults() {
        let mut session = loaded();
        session.choose_size("s2").unwrap();

        let reloaded = vec![Size::new("s3", "700ml", Money::from_cents(2400), 0)];
        session.apply_sizes(Ok(reloaded)).unwrap();
        assert_eq!(session.selection().chosen_size_id(), Some("s3"));
        assert_eq!(session.priced().unwrap().size_name, "700ml");
    }

    #[test]
    fn test_unknown_ids_rejected() {
        let mut session = loaded();
        assert_eq!(session.choose_size("s9").unwrap_err().code, ErrorCode::InvalidSelection);
        assert_eq!(session.toggle_topping("t9").unwrap_err().code, ErrorCode::InvalidSelection);
    }
}
