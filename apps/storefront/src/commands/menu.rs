//! # Menu Commands
//!
//! The storefront landing page: products, sizes, toppings and combos, each
//! loaded independently so one failing list doesn't blank the others.

use serde::Serialize;
use tracing::{debug, info};

use acai_core::{
    CatalogLoader, CatalogStats, CatalogStore, Combo, LoadState, Money, Product, Size, Topping,
};
use acai_db::Database;

use crate::config::ShopConfig;
use crate::error::ApiError;

/// A combo as the combos section shows it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComboCard {
    #[serde(flatten)]
    pub combo: Combo,
    /// Discount against the original price, if any.
    pub savings: Option<Money>,
    /// "Pedir Combo" button target.
    pub order_link: String,
}

impl ComboCard {
    pub fn new(combo: Combo, config: &ShopConfig) -> Self {
        let order_link = config.whatsapp.combo_link(&config.greeting, &combo);
        ComboCard {
            savings: combo.savings(),
            combo,
            order_link,
        }
    }
}

/// Everything the landing page renders.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuResponse {
    pub shop_name: String,
    /// Header/footer WhatsApp button target.
    pub contact_link: String,
    pub products: LoadState<Product>,
    pub sizes: LoadState<Size>,
    pub toppings: LoadState<Topping>,
    pub combos: LoadState<ComboCard>,
}

/// Loads the whole menu concurrently.
///
/// Never fails as a whole: each list carries its own [`LoadState`].
pub async fn load_menu<S: CatalogStore>(loader: &CatalogLoader<S>, config: &ShopConfig) -> MenuResponse {
    debug!("load_menu command");

    let (products, sizes, toppings, combos) = tokio::join!(
        loader.load_products(),
        loader.load_sizes(),
        loader.load_toppings(),
        loader.load_combos(),
    );

    let combos = combos.map(|combos| {
        combos
            .into_iter()
            .map(|combo| ComboCard::new(combo, config))
            .collect()
    });

    let menu = MenuResponse {
        shop_name: config.shop_name.clone(),
        contact_link: config.contact_link(),
        products: LoadState::from_result(products),
        sizes: LoadState::from_result(sizes),
        toppings: LoadState::from_result(toppings),
        combos: LoadState::from_result(combos),
    };

    info!(
        products = menu.products.items().map_or(0, <[Product]>::len),
        combos = menu.combos.items().map_or(0, <[ComboCard]>::len),
        "Menu loaded"
    );

    menu
}

/// Row counts for the admin dashboard.
pub async fn catalog_stats(db: &Database) -> Result<CatalogStats, ApiError> {
    debug!("catalog_stats command");
    Ok(db.stats().await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use acai_core::{ComboRecord, ProductRecord, SizeRecord, StoreError, ToppingRecord};
    use async_trait::async_trait;

    struct FakeStore {
        fail_toppings: bool,
    }

    #[async_trait]
    impl CatalogStore for FakeStore {
        async fn fetch_sizes(&self) -> Result<Vec<SizeRecord>, StoreError> {
            Ok(vec![SizeRecord {
                id: "s1".to_string(),
                name: "300ml".to_string(),
                price_cents: 1200,
                display_order: 0,
                is_active: true,
            }])
        }

        async fn fetch_toppings(&self) -> Result<Vec<ToppingRecord>, StoreError> {
            if self.fail_toppings {
                return Err(StoreError::new("timeout"));
            }
            Ok(Vec::new())
        }

        async fn fetch_combos(&self) -> Result<Vec<ComboRecord>, StoreError> {
            Ok(vec![ComboRecord {
                id: "c1".to_string(),
                name: "Combo Casal".to_string(),
                description: None,
                original_price_cents: Some(4200),
                price_cents: 3490,
                badge: Some("Promoção".to_string()),
                icon: Some("Flame".to_string()),
                display_order: 0,
                is_active: true,
            }])
        }

        async fn fetch_products(&self) -> Result<Vec<ProductRecord>, StoreError> {
            Ok(Vec::new())
        }
    }

    fn config() -> ShopConfig {
        ShopConfig::from_lookup(|key| match key {
            "ACAI_DB_PATH" => Some("/tmp/acai-test.db".to_string()),
            _ => None,
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_one_failing_list_does_not_blank_the_menu() {
        let loader = CatalogLoader::new(FakeStore { fail_toppings: true });
        let menu = load_menu(&loader, &config()).await;

        assert!(menu.toppings.is_failed());
        assert_eq!(menu.sizes.items().map(<[Size]>::len), Some(1));
        assert!(menu.products.is_empty_loaded());
        assert!(menu.contact_link.starts_with("https://wa.me/5577981336827?text=Ol%C3%A1"));
    }

    #[tokio::test]
    async fn test_combo_cards() {
        let loader = CatalogLoader::new(FakeStore { fail_toppings: false });
        let menu = load_menu(&loader, &config()).await;

        let cards = menu.combos.items().unwrap();
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].savings, Some(Money::from_cents(710)));
        assert!(cards[0].order_link.contains("Combo%20Casal"));
        assert!(cards[0].order_link.contains("R%24%2034%2C90"));

        let json = serde_json::to_value(&menu).unwrap();
        assert_eq!(json["combos"]["status"], "loaded");
        assert_eq!(json["combos"]["data"][0]["name"], "Combo Casal");
    }
}
