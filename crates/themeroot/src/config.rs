//! Manager configuration.
//!
//! One manager serves both deployment contexts of the site: the public
//! pages talk to `/api/theme/...`, the admin area to
//! `/administracion/api/theme/...`. Everything else (cookie and header
//! names, where the page embeds the stored theme) is shared but can be
//! overridden from JSON or TOML.
//!
//! ```rust
//! use themeroot::ManagerConfig;
//!
//! let config = ManagerConfig::from_toml(r#"endpointPrefix = "/administracion""#).unwrap();
//! assert_eq!(config.save_url(), "/administracion/api/theme/save/");
//! assert_eq!(config.csrf_cookie, "csrftoken");
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::descriptor::ThemeLoadError;

/// Prefix of the admin deployment's routes.
pub const ADMIN_PREFIX: &str = "/administracion";

/// Settings for a [`ThemeManager`](crate::ThemeManager).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ManagerConfig {
    /// Path prepended to the `/api/theme/...` routes. Empty for the public
    /// site. A trailing slash is ignored.
    pub endpoint_prefix: String,

    /// Cookie holding the CSRF token.
    pub csrf_cookie: String,

    /// Request header carrying the CSRF token on writes.
    pub csrf_header: String,

    /// `data-*` key on `<body>` holding the server-rendered theme JSON.
    pub theme_attribute: String,
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self::public()
    }
}

impl ManagerConfig {
    /// Settings for the public site.
    pub fn public() -> Self {
        Self {
            endpoint_prefix: String::new(),
            csrf_cookie: "csrftoken".to_string(),
            csrf_header: "X-CSRFToken".to_string(),
            theme_attribute: "theme".to_string(),
        }
    }

    /// Settings for the admin area.
    pub fn admin() -> Self {
        Self::public().with_endpoint_prefix(ADMIN_PREFIX)
    }

    /// Sets the endpoint prefix.
    pub fn with_endpoint_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.endpoint_prefix = prefix.into();
        self
    }

    /// Sets the CSRF cookie name.
    pub fn with_csrf_cookie(mut self, name: impl Into<String>) -> Self {
        self.csrf_cookie = name.into();
        self
    }

    /// Sets the CSRF header name.
    pub fn with_csrf_header(mut self, name: impl Into<String>) -> Self {
        self.csrf_header = name.into();
        self
    }

    /// Sets the `data-*` key the embedded theme is read from.
    pub fn with_theme_attribute(mut self, key: impl Into<String>) -> Self {
        self.theme_attribute = key.into();
        self
    }

    /// URL of the save endpoint.
    pub fn save_url(&self) -> String {
        self.url("save/")
    }

    /// URL of the active-theme endpoint.
    pub fn active_url(&self) -> String {
        self.url("active/")
    }

    fn url(&self, leaf: &str) -> String {
        let prefix = self.endpoint_prefix.trim_end_matches('/');
        format!("{prefix}/api/theme/{leaf}")
    }

    /// Loads settings from JSON; missing keys keep public-site defaults.
    ///
    /// # Errors
    /// Returns `ThemeLoadError::Json` on malformed input.
    pub fn from_json(json: &str) -> Result<Self, ThemeLoadError> {
        let config: ManagerConfig = serde_json::from_str(json)?;
        debug!(config.prefix = %config.endpoint_prefix, "Loaded manager config");
        Ok(config)
    }

    /// Loads settings from TOML; missing keys keep public-site defaults.
    ///
    /// # Errors
    /// Returns `ThemeLoadError::Toml` on malformed input.
    pub fn from_toml(toml: &str) -> Result<Self, ThemeLoadError> {
        let config: ManagerConfig = toml::from_str(toml)?;
        debug!(config.prefix = %config.endpoint_prefix, "Loaded manager config");
        Ok(config)
    }
}
