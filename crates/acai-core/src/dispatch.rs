//! # Order Dispatch
//!
//! Builds the `wa.me` deep links that hand an order to WhatsApp.
//!
//! ## Hand-off
//! ```text
//! PricedOrder ──► order_message(greeting, order) ──► link(text)
//!                                                       │
//!                                                       ▼
//!              https://wa.me/5577981336827?text=Ol%C3%A1%2C%20...
//! ```
//!
//! Delivery, retries and confirmation happen outside this system. The only
//! obligation here is producing the same link for the same order.

use serde::{Deserialize, Serialize};

use crate::error::CoreResult;
use crate::order::PricedOrder;
use crate::types::Combo;
use crate::validation::validate_phone;

const WHATSAPP_BASE_URL: &str = "https://wa.me";

/// A WhatsApp destination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WhatsAppChannel {
    phone: String,
}

impl WhatsAppChannel {
    /// Creates a channel for a phone-number-shaped string.
    ///
    /// Formatting characters are stripped; see
    /// [`validate_phone`](crate::validation::validate_phone).
    pub fn new(phone: &str) -> CoreResult<Self> {
        Ok(WhatsAppChannel {
            phone: validate_phone(phone)?,
        })
    }

    /// Destination digits.
    pub fn phone(&self) -> &str {
        &self.phone
    }

    /// Deep link that opens a chat pre-filled with `text`.
    ///
    /// ## Example
    /// ```rust
    /// use acai_core::WhatsAppChannel;
    ///
    /// let channel = WhatsAppChannel::new("5577981336827").unwrap();
    /// assert_eq!(
    ///     channel.link("Oi, tudo bem?"),
    ///     "https://wa.me/5577981336827?text=Oi%2C%20tudo%20bem%3F"
    /// );
    /// ```
    pub fn link(&self, text: &str) -> String {
        format!(
            "{}/{}?text={}",
            WHATSAPP_BASE_URL,
            self.phone,
            urlencoding::encode(text)
        )
    }

    /// Link for a configured order.
    pub fn order_link(&self, greeting: &str, order: &PricedOrder) -> String {
        self.link(&order_message(greeting, order))
    }

    /// Link for the "Pedir Combo" button.
    pub fn combo_link(&self, greeting: &str, combo: &Combo) -> String {
        self.link(&combo_message(greeting, combo))
    }
}

/// Greeting, blank line, order summary.
pub fn order_message(greeting: &str, order: &PricedOrder) -> String {
    format!("{}\n\n{}", greeting, order.summary())
}

/// Greeting, blank line, combo name and price.
pub fn combo_message(greeting: &str, combo: &Combo) -> String {
    format!("{}\n\n*{}*\nValor: {}", greeting, combo.name, combo.price)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;
    use crate::order::PricedTopping;
    use crate::DEFAULT_GREETING;

    fn order() -> PricedOrder {
        PricedOrder {
            product_name: "Açaí Tradicional".to_string(),
            size_name: "500ml".to_string(),
            size_unit_price: Money::from_cents(1800),
            toppings: vec![PricedTopping {
                name: "Granola".to_string(),
                price: Money::from_cents(200),
            }],
            total_price: Money::from_cents(2000),
        }
    }

    #[test]
    fn test_phone_is_normalized() {
        let channel = WhatsAppChannel::new("+55 77 98133-6827").unwrap();
        assert_eq!(channel.phone(), "5577981336827");
        assert!(WhatsAppChannel::new("not a phone").is_err());
    }

    #[test]
    fn test_order_message() {
        let message = order_message(DEFAULT_GREETING, &order());
        assert!(message.starts_with("Olá, gostaria de fazer um pedido!\n\n*Açaí Tradicional*\n"));
        assert!(message.ends_with("Total: R$ 20,00"));
    }

    #[test]
    fn test_order_link_is_encoded_and_deterministic() {
        let channel = WhatsAppChannel::new("5577981336827").unwrap();
        let link = channel.order_link(DEFAULT_GREETING, &order());

        assert!(link.starts_with("https://wa.me/5577981336827?text=Ol%C3%A1%2C%20gostaria"));
        assert!(!link.contains(' '));
        assert!(!link.contains('\n'));
        assert!(link.contains("%0A%0A"));
        assert_eq!(link, channel.order_link(DEFAULT_GREETING, &order()));
    }

    #[test]
    fn test_combo_message() {
        let combo = Combo::new("c1", "Combo Casal", Money::from_cents(3490));
        assert_eq!(
            combo_message("Oi!", &combo),
            "Oi!\n\n*Combo Casal*\nValor: R$ 34,90"
        );
    }
}
