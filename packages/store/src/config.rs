//! # Client configuration — `lessonpilot.toml`
//!
//! Defines the TOML configuration the web client reads at start-up (stored in
//! browser storage under the `config` key, or shipped next to a native build).
//!
//! ## Structure
//!
//! ```toml
//! [api]
//! base_url = "https://api.lessonpilot.app/api"
//!
//! [list]
//! default_page_size = 10
//!
//! [export]
//! page_width = 595.0      # points (A4)
//! page_height = 842.0
//! margin = 48.0
//! font_size = 11.0
//! line_height = 1.4       # multiple of the font size
//! ```
//!
//! All structs derive or implement `Default` so that a missing or empty config
//! is equivalent to the default configuration. The default API base URL comes
//! from the `LESSONPILOT_API_URL` build-time environment variable when set.

use serde::{Deserialize, Serialize};

const FALLBACK_API_URL: &str = "http://localhost:5000/api";

/// Top-level configuration stored in `lessonpilot.toml`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub list: ListConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

/// REST backend settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    option_env!("LESSONPILOT_API_URL")
        .unwrap_or(FALLBACK_API_URL)
        .to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

/// Resource list screens.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ListConfig {
    #[serde(default = "default_page_size")]
    pub default_page_size: u32,
}

fn default_page_size() -> u32 {
    10
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            default_page_size: default_page_size(),
        }
    }
}

/// Page geometry used by the PDF exporter. Units are PDF points.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExportConfig {
    #[serde(default = "default_page_width")]
    pub page_width: f32,
    #[serde(default = "default_page_height")]
    pub page_height: f32,
    #[serde(default = "default_margin")]
    pub margin: f32,
    #[serde(default = "default_font_size")]
    pub font_size: f32,
    #[serde(default = "default_line_height")]
    pub line_height: f32,
}

fn default_page_width() -> f32 {
    595.0
}

fn default_page_height() -> f32 {
    842.0
}

fn default_margin() -> f32 {
    48.0
}

fn default_font_size() -> f32 {
    11.0
}

fn default_line_height() -> f32 {
    1.4
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            page_width: default_page_width(),
            page_height: default_page_height(),
            margin: default_margin(),
            font_size: default_font_size(),
            line_height: default_line_height(),
        }
    }
}

impl ClientConfig {
    /// Create a config pointing at the given API base URL.
    pub fn new(base_url: String) -> Self {
        Self::default().with_base_url(base_url)
    }

    /// Builder method to set the API base URL. Trailing slashes are dropped.
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.api.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Builder method to set the default list page size.
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.list.default_page_size = page_size.max(1);
        self
    }

    /// The well-known filename for the config file.
    pub fn filename() -> &'static str {
        "lessonpilot.toml"
    }

    /// Parse from TOML string.
    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Serialize to TOML string.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Load from the `config` key of a store, falling back to defaults when the
    /// key is missing or does not parse.
    pub fn load(store: &impl crate::KeyValueStore) -> Self {
        store
            .get(crate::keys::CONFIG)
            .and_then(|raw| Self::from_toml(&raw).ok())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{KeyValueStore, MemoryStore};

    #[test]
    fn test_empty_toml_is_default() {
        let config = ClientConfig::from_toml("").unwrap();
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.list.default_page_size, 10);
        assert_eq!(config.export.page_width, 595.0);
    }

    #[test]
    fn test_partial_sections() {
        let config = ClientConfig::from_toml(
            r#"
            [api]
            base_url = "https://api.example.org/api"

            [export]
            margin = 36.0
            "#,
        )
        .unwrap();
        assert_eq!(config.api.base_url, "https://api.example.org/api");
        assert_eq!(config.export.margin, 36.0);
        assert_eq!(config.export.font_size, 11.0);
        assert_eq!(config.list.default_page_size, 10);
    }

    #[test]
    fn test_builder_and_toml_roundtrip() {
        let config = ClientConfig::new("https://api.example.org/api/".to_string()).with_page_size(25);
        assert_eq!(config.api.base_url, "https://api.example.org/api");

        let text = config.to_toml().unwrap();
        assert_eq!(ClientConfig::from_toml(&text).unwrap(), config);
    }

    #[test]
    fn test_page_size_never_zero() {
        assert_eq!(ClientConfig::default().with_page_size(0).list.default_page_size, 1);
    }

    #[test]
    fn test_load_from_store() {
        let store = MemoryStore::new();
        assert_eq!(ClientConfig::load(&store), ClientConfig::default());

        store.set(crate::keys::CONFIG, "[list]\ndefault_page_size = 20\n");
        assert_eq!(ClientConfig::load(&store).list.default_page_size, 20);

        store.set(crate::keys::CONFIG, "not = [valid");
        assert_eq!(ClientConfig::load(&store), ClientConfig::default());
    }
}
