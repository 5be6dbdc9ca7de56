//! # Order Commands
//!
//! Drives an [`OrderSession`] from "Escolher" on a product card to the
//! WhatsApp hand-off.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  open_session(loader, product_id)                                      │
//! │       │                                                                 │
//! │       ├── load_products() → find product ──── missing? ──► NOT_FOUND   │
//! │       ▼                                                                 │
//! │  load_catalog(loader, &mut session)                                    │
//! │       │   tokio::join!(load_sizes(), load_toppings())                  │
//! │       │   each result applied on its own                               │
//! │       ▼                                                                 │
//! │  session.choose_size() / session.toggle_topping()                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  price_order(&session, config) ──► { order, summary, whatsappLink }    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use tracing::{debug, info, warn};

use acai_core::{CatalogLoader, CatalogStore, PricedOrder};

use crate::config::ShopConfig;
use crate::error::ApiError;
use crate::state::OrderSession;

/// What "Finalizar Pedido" produces.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    pub order: PricedOrder,
    pub summary: String,
    pub whatsapp_link: String,
}

/// Opens a session for an active product and loads its catalog.
///
/// A failed or empty size/topping load does not fail the call; it is
/// recorded in the session's load states and `submission_blocker()`.
pub async fn open_session<S: CatalogStore>(
    loader: &CatalogLoader<S>,
    product_id: &str,
) -> Result<OrderSession, ApiError> {
    debug!(product_id = %product_id, "open_session command");

    let product = loader
        .load_products()
        .await?
        .into_iter()
        .find(|p| p.id == product_id)
        .ok_or_else(|| ApiError::not_found("Product", product_id))?;

    let mut session = OrderSession::new(product);
    if let Err(err) = load_catalog(loader, &mut session).await {
        warn!(product_id = %product_id, error = %err, "Session opened with incomplete catalog");
    }

    info!(product_id = %product_id, can_submit = session.can_submit(), "Order session opened");
    Ok(session)
}

/// Loads sizes and toppings concurrently into `session`.
///
/// Both results are applied even if one fails. The size error wins when
/// both fail.
pub async fn load_catalog<S: CatalogStore>(
    loader: &CatalogLoader<S>,
    session: &mut OrderSession,
) -> Result<(), ApiError> {
    let (sizes, toppings) = tokio::join!(loader.load_sizes(), loader.load_toppings());

    let sizes = session.apply_sizes(sizes);
    let toppings = session.apply_toppings(toppings);

    sizes.and(toppings)
}

/// Prices the session and builds the WhatsApp link.
pub fn price_order(session: &OrderSession, config: &ShopConfig) -> Result<OrderResponse, ApiError> {
    let order = session.priced()?;
    let summary = order.summary();
    let whatsapp_link = config.whatsapp.order_link(&config.greeting, &order);

    info!(
        product = %order.product_name,
        size = %order.size_name,
        toppings = order.toppings.len(),
        total_cents = order.total_price.cents(),
        "Order priced"
    );

    Ok(OrderResponse {
        order,
        summary,
        whatsapp_link,
    })
}

/// Case-insensitive lookup by display name.
pub fn find_by_name<'a, T>(items: &'a [T], name: &str, name_of: impl Fn(&T) -> &str) -> Option<&'a T> {
    let wanted = name.trim().to_lowercase();
    items.iter().find(|item| name_of(item).to_lowercase() == wanted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use acai_core::{ComboRecord, ProductRecord, SizeRecord, StoreError, ToppingRecord};
    use async_trait::async_trait;

    #[derive(Default)]
    struct FakeStore {
        no_sizes: bool,
        fail_toppings: bool,
    }

    fn size(id: &str, name: &str, cents: i64, order: i64) -> SizeRecord {
        SizeRecord {
            id: id.to_string(),
            name: name.to_string(),
            price_cents: cents,
            display_order: order,
            is_active: true,
        }
    }

    fn topping(id: &str, name: &str, cents: i64, order: i64) -> ToppingRecord {
        ToppingRecord {
            id: id.to_string(),
            name: name.to_string(),
            price_cents: cents,
            category: None,
            display_order: order,
            is_active: true,
        }
    }

    #[async_trait]
    impl CatalogStore for FakeStore {
        async fn fetch_sizes(&self) -> Result<Vec<SizeRecord>, StoreError> {
            if self.no_sizes {
                return Ok(Vec::new());
            }
            Ok(vec![size("s2", "500ml", 1800, 1), size("s1", "300ml", 1200, 0)])
        }

        async fn fetch_toppings(&self) -> Result<Vec<ToppingRecord>, StoreError> {
            if self.fail_toppings {
                return Err(StoreError::new("timeout"));
            }
            Ok(vec![topping("t1", "Granola", 200, 0), topping("t2", "Nutella", 500, 1)])
        }

        async fn fetch_combos(&self) -> Result<Vec<ComboRecord>, StoreError> {
            Ok(Vec::new())
        }

        async fn fetch_products(&self) -> Result<Vec<ProductRecord>, StoreError> {
            Ok(vec![ProductRecord {
                id: "p1".to_string(),
                name: "Açaí Tradicional".to_string(),
                description: None,
                base_price_cents: 1200,
                badge: Some("Mais Pedido".to_string()),
                display_order: 0,
                is_active: true,
            }])
        }
    }

    fn config() -> ShopConfig {
        ShopConfig::from_lookup(|key| match key {
            "ACAI_DB_PATH" => Some("/tmp/acai-test.db".to_string()),
            "ACAI_GREETING" => Some("Oi!".to_string()),
            _ => None,
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_full_order_flow() {
        let loader = CatalogLoader::new(FakeStore::default());
        let mut session = open_session(&loader, "p1").await.unwrap();

        // First by display order
        assert_eq!(session.selection().chosen_size_id(), Some("s1"));

        session.choose_size("s2").unwrap();
        session.toggle_topping("t1").unwrap();
        session.toggle_topping("t2").unwrap();

        let response = price_order(&session, &config()).unwrap();
        assert_eq!(response.order.total_price.cents(), 2500);
        assert!(response.summary.ends_with("Total: R$ 25,00"));
        assert!(response.whatsapp_link.starts_with("https://wa.me/5577981336827?text=Oi%21%0A%0A"));
    }

    #[tokio::test]
    async fn test_unknown_product() {
        let loader = CatalogLoader::new(FakeStore::default());
        let err = open_session(&loader, "p9").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn test_no_sizes_blocks_submission() {
        let loader = CatalogLoader::new(FakeStore {
            no_sizes: true,
            ..Default::default()
        });
        let session = open_session(&loader, "p1").await.unwrap();

        assert!(!session.can_submit());
        let err = price_order(&session, &config()).unwrap_err();
        assert_eq!(err.code, ErrorCode::MissingSize);
        assert_eq!(session.submission_blocker().map(|e| e.code), Some(ErrorCode::NoActiveSizes));
    }

    #[tokio::test]
    async fn test_load_catalog_reports_partial_failure() {
        let loader = CatalogLoader::new(FakeStore {
            fail_toppings: true,
            ..Default::default()
        });
        let mut session = OrderSession::new(acai_core::Product::new(
            "p1",
            "Açaí Zero",
            acai_core::Money::from_cents(1400),
        ));

        let err = load_catalog(&loader, &mut session).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::LoadFailure);
        assert!(session.sizes().items().is_some());
        assert!(session.toppings().is_failed());
        assert!(session.can_submit());
    }

    #[test]
    fn test_find_by_name_is_case_insensitive() {
        let names = vec!["Granola".to_string(), "Leite em Pó".to_string()];
        let found = find_by_name(&names, " leite em pó ", |n| n.as_str());
        assert_eq!(found.map(String::as_str), Some("Leite em Pó"));
        assert!(find_by_name(&names, "Mel", |n| n.as_str()).is_none());
    }
}
