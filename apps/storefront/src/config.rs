//! # Shop Configuration
//!
//! Loaded once at startup from environment variables, with defaults for
//! everything. Read-only afterwards.
//!
//! ## Environment Variables
//! | Variable                  | Default                              |
//! |---------------------------|--------------------------------------|
//! | `ACAI_DB_PATH`            | `<platform data dir>/acai.db`        |
//! | `ACAI_WHATSAPP_NUMBER`    | `5577981336827`                      |
//! | `ACAI_SHOP_NAME`          | `Açaí da Casa`                       |
//! | `ACAI_GREETING`           | `Olá, gostaria de fazer um pedido!`  |
//! | `ACAI_DB_MAX_CONNECTIONS` | `5`                                  |

use directories::ProjectDirs;
use serde::Serialize;
use std::env;
use std::path::PathBuf;

use acai_core::{WhatsAppChannel, DEFAULT_GREETING};
use acai_db::DbConfig;

/// Number that receives orders unless overridden.
pub const DEFAULT_WHATSAPP_NUMBER: &str = "5577981336827";

/// Shop name shown in the menu header.
pub const DEFAULT_SHOP_NAME: &str = "Açaí da Casa";

const DEFAULT_DB_FILE: &str = "acai.db";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Storefront configuration.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShopConfig {
    /// SQLite file holding the catalog.
    pub db_path: PathBuf,

    /// Validated WhatsApp destination for orders.
    pub whatsapp: WhatsAppChannel,

    pub shop_name: String,

    /// First line of every WhatsApp message.
    pub greeting: String,

    pub db_max_connections: u32,
}

impl ShopConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    ///
    /// Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let db_path = match get("ACAI_DB_PATH") {
            Some(path) => PathBuf::from(path),
            None => default_db_path()?,
        };

        let number = get("ACAI_WHATSAPP_NUMBER").unwrap_or_else(|| DEFAULT_WHATSAPP_NUMBER.to_string());
        let whatsapp = WhatsAppChannel::new(&number)
            .map_err(|_| ConfigError::InvalidValue("ACAI_WHATSAPP_NUMBER".to_string()))?;

        let db_max_connections = match get("ACAI_DB_MAX_CONNECTIONS") {
            Some(value) => value
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|max| *max > 0)
                .ok_or_else(|| ConfigError::InvalidValue("ACAI_DB_MAX_CONNECTIONS".to_string()))?,
            None => DEFAULT_MAX_CONNECTIONS,
        };

        Ok(ShopConfig {
            db_path,
            whatsapp,
            shop_name: get("ACAI_SHOP_NAME").unwrap_or_else(|| DEFAULT_SHOP_NAME.to_string()),
            greeting: get("ACAI_GREETING").unwrap_or_else(|| DEFAULT_GREETING.to_string()),
            db_max_connections,
        })
    }

    /// Database settings derived from this configuration.
    pub fn db_config(&self) -> DbConfig {
        DbConfig::new(self.db_path.clone()).max_connections(self.db_max_connections)
    }

    /// Link for the header and footer "fale conosco" buttons.
    pub fn contact_link(&self) -> String {
        self.whatsapp.link(&self.greeting)
    }
}

/// Platform data directory, created if missing.
///
/// - **macOS**: `~/Library/Application Support/com.acai.storefront/acai.db`
/// - **Windows**: `%APPDATA%\acai\storefront\data\acai.db`
/// - **Linux**: `~/.local/share/storefront/acai.db`
fn default_db_path() -> Result<PathBuf, ConfigError> {
    let dirs = ProjectDirs::from("com", "acai", "storefront").ok_or(ConfigError::NoDataDir)?;
    let data_dir = dirs.data_dir();

    std::fs::create_dir_all(data_dir)
        .map_err(|e| ConfigError::DataDir(format!("{}: {}", data_dir.display(), e)))?;

    Ok(data_dir.join(DEFAULT_DB_FILE))
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Could not determine app data directory")]
    NoDataDir,

    #[error("Could not create data directory {0}")]
    DataDir(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ShopConfig::from_lookup(lookup(&[("ACAI_DB_PATH", "/tmp/acai-test.db")])).unwrap();

        assert_eq!(config.db_path, PathBuf::from("/tmp/acai-test.db"));
        assert_eq!(config.whatsapp.phone(), DEFAULT_WHATSAPP_NUMBER);
        assert_eq!(config.shop_name, DEFAULT_SHOP_NAME);
        assert_eq!(config.greeting, DEFAULT_GREETING);
        assert_eq!(config.db_max_connections, 5);
        assert_eq!(config.db_config().max_connections, 5);
    }

    #[test]
    fn test_overrides() {
        let config = ShopConfig::from_lookup(lookup(&[
            ("ACAI_DB_PATH", "/tmp/acai-test.db"),
            ("ACAI_WHATSAPP_NUMBER", "+55 11 91234-5678"),
            ("ACAI_SHOP_NAME", "Açaí do Porto"),
            ("ACAI_GREETING", "Oi!"),
            ("ACAI_DB_MAX_CONNECTIONS", "2"),
        ]))
        .unwrap();

        assert_eq!(config.whatsapp.phone(), "5511912345678");
        assert_eq!(config.shop_name, "Açaí do Porto");
        assert_eq!(config.contact_link(), "https://wa.me/5511912345678?text=Oi%21");
        assert_eq!(config.db_config().max_connections, 2);
    }

    #[test]
    fn test_invalid_values() {
        let bad_phone = ShopConfig::from_lookup(lookup(&[
            ("ACAI_DB_PATH", "/tmp/acai-test.db"),
            ("ACAI_WHATSAPP_NUMBER", "123"),
        ]));
        assert!(matches!(bad_phone, Err(ConfigError::InvalidValue(key)) if key == "ACAI_WHATSAPP_NUMBER"));

        let bad_pool = ShopConfig::from_lookup(lookup(&[
            ("ACAI_DB_PATH", "/tmp/acai-test.db"),
            ("ACAI_DB_MAX_CONNECTIONS", "0"),
        ]));
        assert!(matches!(bad_pool, Err(ConfigError::InvalidValue(_))));
    }

    #[test]
    fn test_blank_values_fall_back() {
        let config = ShopConfig::from_lookup(lookup(&[
            ("ACAI_DB_PATH", "/tmp/acai-test.db"),
            ("ACAI_GREETING", "   "),
        ]))
        .unwrap();
        assert_eq!(config.greeting, DEFAULT_GREETING);
    }
}
