//! Theme descriptors: flat records of optional color and shape fields.
//!
//! A [`ThemeDescriptor`] is what the page embeds, what the backend stores,
//! and what the preset catalog is built from. Every field is optional; an
//! absent field leaves the matching CSS custom property alone so the
//! stylesheet default keeps applying.
//!
//! The JSON form uses the camelCase keys the backend speaks:
//!
//! ```rust
//! use themeroot::{ColorField, ThemeDescriptor};
//!
//! let theme = ThemeDescriptor::from_json(r##"{"primaryColor": "#3498db", "borderRadius": "sharp"}"##)
//!     .expect("valid descriptor");
//! assert_eq!(theme.color(ColorField::PrimaryColor), Some("#3498db"));
//! assert_eq!(theme.color(ColorField::PrimaryDark), None);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::scale::{BorderRadius, ShadowIntensity};

/// The color fields of a descriptor, in the order they are applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorField {
    PrimaryColor,
    PrimaryDark,
    PrimaryLight,
    SecondaryColor,
    SecondaryDark,
    SecondaryLight,
    SuccessColor,
    SuccessBg,
    SuccessDark,
    ErrorColor,
    ErrorBg,
    ErrorDark,
    WarningColor,
    WarningBg,
    WarningDark,
    InfoColor,
    InfoBg,
    InfoDark,
}

impl ColorField {
    /// Every color field, in application order.
    pub const ALL: [ColorField; 18] = [
        ColorField::PrimaryColor,
        ColorField::PrimaryDark,
        ColorField::PrimaryLight,
        ColorField::SecondaryColor,
        ColorField::SecondaryDark,
        ColorField::SecondaryLight,
        ColorField::SuccessColor,
        ColorField::SuccessBg,
        ColorField::SuccessDark,
        ColorField::ErrorColor,
        ColorField::ErrorBg,
        ColorField::ErrorDark,
        ColorField::WarningColor,
        ColorField::WarningBg,
        ColorField::WarningDark,
        ColorField::InfoColor,
        ColorField::InfoBg,
        ColorField::InfoDark,
    ];

    /// Key used in the JSON wire format.
    pub fn json_key(self) -> &'static str {
        match self {
            ColorField::PrimaryColor => "primaryColor",
            ColorField::PrimaryDark => "primaryDark",
            ColorField::PrimaryLight => "primaryLight",
            ColorField::SecondaryColor => "secondaryColor",
            ColorField::SecondaryDark => "secondaryDark",
            ColorField::SecondaryLight => "secondaryLight",
            ColorField::SuccessColor => "successColor",
            ColorField::SuccessBg => "successBg",
            ColorField::SuccessDark => "successDark",
            ColorField::ErrorColor => "errorColor",
            ColorField::ErrorBg => "errorBg",
            ColorField::ErrorDark => "errorDark",
            ColorField::WarningColor => "warningColor",
            ColorField::WarningBg => "warningBg",
            ColorField::WarningDark => "warningDark",
            ColorField::InfoColor => "infoColor",
            ColorField::InfoBg => "infoBg",
            ColorField::InfoDark => "infoDark",
        }
    }

    /// CSS custom property written for this field.
    pub fn css_property(self) -> &'static str {
        match self {
            ColorField::PrimaryColor => "--primary-color",
            ColorField::PrimaryDark => "--primary-dark",
            ColorField::PrimaryLight => "--primary-light",
            ColorField::SecondaryColor => "--secondary-color",
            ColorField::SecondaryDark => "--secondary-dark",
            ColorField::SecondaryLight => "--secondary-light",
            ColorField::SuccessColor => "--success-color",
            ColorField::SuccessBg => "--success-bg",
            ColorField::SuccessDark => "--success-dark",
            ColorField::ErrorColor => "--error-color",
            ColorField::ErrorBg => "--error-bg",
            ColorField::ErrorDark => "--error-dark",
            ColorField::WarningColor => "--warning-color",
            ColorField::WarningBg => "--warning-bg",
            ColorField::WarningDark => "--warning-dark",
            ColorField::InfoColor => "--info-color",
            ColorField::InfoBg => "--info-bg",
            ColorField::InfoDark => "--info-dark",
        }
    }
}

impl fmt::Display for ColorField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.json_key())
    }
}

/// A palette description with every field optional.
///
/// Color values are passed through verbatim; nothing here checks that they
/// are valid CSS. The two categorical fields keep the raw string so a save
/// sends back exactly what the caller chose, and are interpreted through
/// [`ThemeDescriptor::border_radius`] / [`ThemeDescriptor::shadow_intensity`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ThemeDescriptor {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_dark: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_light: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub secondary_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secondary_dark: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secondary_light: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub success_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub success_bg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub success_dark: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_bg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_dark: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning_bg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning_dark: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub info_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub info_bg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub info_dark: Option<String>,

    /// Raw corner category (`sharp`, `normal`, `rounded`).
    #[serde(rename = "borderRadius", skip_serializing_if = "Option::is_none")]
    pub border_radius_name: Option<String>,

    /// Raw shadow category (`light`, `medium`, `strong`).
    #[serde(rename = "shadowIntensity", skip_serializing_if = "Option::is_none")]
    pub shadow_intensity_name: Option<String>,
}

impl ThemeDescriptor {
    /// Creates an empty descriptor (every field absent).
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a color field, treating empty strings as absent.
    pub fn color(&self, field: ColorField) -> Option<&str> {
        self.slot(field).as_deref().filter(|v| !v.is_empty())
    }

    /// Sets or clears a color field.
    pub fn set_color(&mut self, field: ColorField, value: Option<String>) {
        *self.slot_mut(field) = value;
    }

    /// Builder form of [`set_color`](Self::set_color).
    pub fn with_color(mut self, field: ColorField, value: impl Into<String>) -> Self {
        self.set_color(field, Some(value.into()));
        self
    }

    /// Sets the corner category.
    pub fn with_border_radius(mut self, radius: BorderRadius) -> Self {
        self.border_radius_name = Some(radius.as_str().to_string());
        self
    }

    /// Sets the shadow category.
    pub fn with_shadow_intensity(mut self, shadow: ShadowIntensity) -> Self {
        self.shadow_intensity_name = Some(shadow.as_str().to_string());
        self
    }

    /// Corner category, defaulting to `normal` when absent or unknown.
    pub fn border_radius(&self) -> BorderRadius {
        self.border_radius_name
            .as_deref()
            .map_or_else(BorderRadius::default, BorderRadius::from_name_or_default)
    }

    /// Shadow category, defaulting to `medium` when absent or unknown.
    pub fn shadow_intensity(&self) -> ShadowIntensity {
        self.shadow_intensity_name
            .as_deref()
            .map_or_else(ShadowIntensity::default, ShadowIntensity::from_name_or_default)
    }

    /// Iterates the present color fields in application order.
    pub fn colors(&self) -> impl Iterator<Item = (ColorField, &str)> + '_ {
        ColorField::ALL
            .into_iter()
            .filter_map(move |field| self.color(field).map(|value| (field, value)))
    }

    /// Parses a descriptor from JSON. Unknown keys are ignored.
    ///
    /// # Errors
    /// Returns `ThemeLoadError::Json` if the text is not a JSON object of
    /// string fields.
    pub fn from_json(json: &str) -> Result<Self, ThemeLoadError> {
        let theme: ThemeDescriptor = serde_json::from_str(json)?;
        debug!(theme.fields = theme.colors().count(), "Parsed theme descriptor");
        Ok(theme)
    }

    /// Serializes to compact JSON, omitting absent fields.
    ///
    /// # Errors
    /// Returns `serde_json::Error` if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    fn slot(&self, field: ColorField) -> &Option<String> {
        match field {
            ColorField::PrimaryColor => &self.primary_color,
            ColorField::PrimaryDark => &self.primary_dark,
            ColorField::PrimaryLight => &self.primary_light,
            ColorField::SecondaryColor => &self.secondary_color,
            ColorField::SecondaryDark => &self.secondary_dark,
            ColorField::SecondaryLight => &self.secondary_light,
            ColorField::SuccessColor => &self.success_color,
            ColorField::SuccessBg => &self.success_bg,
            ColorField::SuccessDark => &self.success_dark,
            ColorField::ErrorColor => &self.error_color,
            ColorField::ErrorBg => &self.error_bg,
            ColorField::ErrorDark => &self.error_dark,
            ColorField::WarningColor => &self.warning_color,
            ColorField::WarningBg => &self.warning_bg,
            ColorField::WarningDark => &self.warning_dark,
            ColorField::InfoColor => &self.info_color,
            ColorField::InfoBg => &self.info_bg,
            ColorField::InfoDark => &self.info_dark,
        }
    }

    fn slot_mut(&mut self, field: ColorField) -> &mut Option<String> {
        match field {
            ColorField::PrimaryColor => &mut self.primary_color,
            ColorField::PrimaryDark => &mut self.primary_dark,
            ColorField::PrimaryLight => &mut self.primary_light,
            ColorField::SecondaryColor => &mut self.secondary_color,
            ColorField::SecondaryDark => &mut self.secondary_dark,
            ColorField::SecondaryLight => &mut self.secondary_light,
            ColorField::SuccessColor => &mut self.success_color,
            ColorField::SuccessBg => &mut self.success_bg,
            ColorField::SuccessDark => &mut self.success_dark,
            ColorField::ErrorColor => &mut self.error_color,
            ColorField::ErrorBg => &mut self.error_bg,
            ColorField::ErrorDark => &mut self.error_dark,
            ColorField::WarningColor => &mut self.warning_color,
            ColorField::WarningBg => &mut self.warning_bg,
            ColorField::WarningDark => &mut self.warning_dark,
            ColorField::InfoColor => &mut self.info_color,
            ColorField::InfoBg => &mut self.info_bg,
            ColorField::InfoDark => &mut self.info_dark,
        }
    }
}

/// Error loading a descriptor or configuration.
#[derive(Error, Debug)]
pub enum ThemeLoadError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_descriptor() {
        let theme = ThemeDescriptor::new();
        assert_eq!(theme.colors().count(), 0);
        assert_eq!(theme.to_json().unwrap(), "{}");
    }

    #[test]
    fn test_camel_case_wire_keys() {
        let theme = ThemeDescriptor::new()
            .with_color(ColorField::SuccessBg, "#c6f6d5")
            .with_shadow_intensity(ShadowIntensity::Strong);
        let json = theme.to_json().unwrap();
        assert_eq!(json, r##"{"successBg":"#c6f6d5","shadowIntensity":"strong"}"##);
    }

    #[test]
    fn test_json_keys_match_serde() {
        for field in ColorField::ALL {
            let theme = ThemeDescriptor::new().with_color(field, "x");
            let value: serde_json::Value = serde_json::from_str(&theme.to_json().unwrap()).unwrap();
            assert_eq!(value[field.json_key()], "x", "field {field}");
        }
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let theme =
            ThemeDescriptor::from_json(r##"{"name": "Bosque", "infoDark": "#0d47a1"}"##).unwrap();
        assert_eq!(theme.color(ColorField::InfoDark), Some("#0d47a1"));
    }

    #[test]
    fn test_malformed_json_is_error() {
        assert!(matches!(
            ThemeDescriptor::from_json("{not json"),
            Err(ThemeLoadError::Json(_))
        ));
        assert!(ThemeDescriptor::from_json(r#"{"primaryColor": 5}"#).is_err());
    }

    #[test]
    fn test_empty_color_counts_as_absent() {
        let theme = ThemeDescriptor::new().with_color(ColorField::PrimaryColor, "");
        assert_eq!(theme.color(ColorField::PrimaryColor), None);
        assert_eq!(theme.colors().count(), 0);
    }

    #[test]
    fn test_categories_keep_raw_value() {
        let theme = ThemeDescriptor::from_json(r#"{"borderRadius": "giant"}"#).unwrap();
        assert_eq!(theme.border_radius_name.as_deref(), Some("giant"));
        assert_eq!(theme.border_radius(), BorderRadius::Normal);
        assert_eq!(theme.shadow_intensity(), ShadowIntensity::Medium);
    }

    #[test]
    fn test_css_properties_are_unique() {
        let mut names: Vec<_> = ColorField::ALL.iter().map(|f| f.css_property()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), ColorField::ALL.len());
    }
}
