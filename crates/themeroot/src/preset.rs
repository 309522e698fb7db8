//! Built-in palettes: the default theme and the preset catalog.
//!
//! Every preset is a complete descriptor (all eighteen colors plus both
//! shape categories) with a display name shown in the picker. The catalog
//! keeps display order, and lookups go by id.
//!
//! # Example
//!
//! ```rust
//! use themeroot::{ColorField, PresetCatalog};
//!
//! let catalog = PresetCatalog::builtin();
//! let ocean = catalog.get("ocean").expect("builtin preset");
//! assert_eq!(ocean.name(), "Océano");
//! assert_eq!(ocean.theme().color(ColorField::PrimaryColor), Some("#006994"));
//! ```

use std::ops::Index;

use serde::ser::{Serialize, SerializeMap, Serializer};
use tracing::debug;

use crate::descriptor::{ColorField, ThemeDescriptor};
use crate::scale::{BorderRadius, ShadowIntensity};

/// Fallback for `--primary-gradient` when the primary color is absent.
pub const DEFAULT_PRIMARY: &str = "#667eea";

/// Fallback for `--primary-gradient` when the dark primary is absent.
pub const DEFAULT_PRIMARY_DARK: &str = "#764ba2";

/// Colors of the built-in palette, in [`ColorField::ALL`] order.
const DEFAULT_COLORS: [&str; 18] = [
    DEFAULT_PRIMARY,
    DEFAULT_PRIMARY_DARK,
    "#a8b9ff",
    "#48bb78",
    "#38a169",
    "#9ae6b4",
    "#48bb78",
    "#c6f6d5",
    "#2f855a",
    "#e53e3e",
    "#fed7d7",
    "#c53030",
    "#ed8936",
    "#ffd89a",
    "#c05621",
    "#3182ce",
    "#bee3f8",
    "#2b6cb0",
];

/// The built-in palette applied by a reset.
pub fn default_theme() -> ThemeDescriptor {
    complete(DEFAULT_COLORS, BorderRadius::Normal, ShadowIntensity::Medium)
}

fn complete(
    colors: [&str; 18],
    radius: BorderRadius,
    shadow: ShadowIntensity,
) -> ThemeDescriptor {
    ColorField::ALL
        .into_iter()
        .zip(colors)
        .fold(ThemeDescriptor::new(), |theme, (field, value)| {
            theme.with_color(field, value)
        })
        .with_border_radius(radius)
        .with_shadow_intensity(shadow)
}

/// A named, complete built-in theme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresetTheme {
    id: &'static str,
    name: &'static str,
    theme: ThemeDescriptor,
}

impl PresetTheme {
    /// Catalog key (`"default"`, `"ocean"`, ...).
    pub fn id(&self) -> &'static str {
        self.id
    }

    /// Human-readable display name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The palette itself.
    pub fn theme(&self) -> &ThemeDescriptor {
        &self.theme
    }
}

/// Serialized as the descriptor's fields plus `name`, the shape the picker
/// consumes.
impl Serialize for PresetTheme {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("name", self.name)?;
        for (field, value) in self.theme.colors() {
            map.serialize_entry(field.json_key(), value)?;
        }
        map.serialize_entry("borderRadius", self.theme.border_radius().as_str())?;
        map.serialize_entry("shadowIntensity", self.theme.shadow_intensity().as_str())?;
        map.end()
    }
}

fn preset(
    id: &'static str,
    name: &'static str,
    colors: [&str; 18],
    radius: BorderRadius,
    shadow: ShadowIntensity,
) -> PresetTheme {
    PresetTheme {
        id,
        name,
        theme: complete(colors, radius, shadow),
    }
}

/// Immutable catalog of built-in presets, in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresetCatalog {
    presets: Vec<PresetTheme>,
}

impl PresetCatalog {
    /// Builds the built-in catalog.
    pub fn builtin() -> Self {
        let presets = builtin_presets();
        debug!(presets.count = presets.len(), "Built preset catalog");
        Self { presets }
    }

    /// Looks up a preset by id.
    pub fn get(&self, id: &str) -> Option<&PresetTheme> {
        self.presets.iter().find(|preset| preset.id == id)
    }

    /// True if the id names a preset.
    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Preset ids in display order.
    pub fn ids(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.presets.iter().map(|preset| preset.id)
    }

    /// Presets in display order.
    pub fn iter(&self) -> std::slice::Iter<'_, PresetTheme> {
        self.presets.iter()
    }

    /// Number of presets.
    pub fn len(&self) -> usize {
        self.presets.len()
    }

    /// True if the catalog holds no presets.
    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }
}

impl Default for PresetCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Index<&str> for PresetCatalog {
    type Output = PresetTheme;

    fn index(&self, id: &str) -> &PresetTheme {
        self.get(id)
            .unwrap_or_else(|| panic!("no preset theme with id '{id}'"))
    }
}

impl<'a> IntoIterator for &'a PresetCatalog {
    type Item = &'a PresetTheme;
    type IntoIter = std::slice::Iter<'a, PresetTheme>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Serialized as an id-keyed object in display order.
impl Serialize for PresetCatalog {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.presets.iter().map(|preset| (preset.id, preset)))
    }
}

#[rustfmt::skip]
fn builtin_presets() -> Vec<PresetTheme> {
    vec![
        preset(
            "default",
            "Predeterminado",
            DEFAULT_COLORS,
            BorderRadius::Normal,
            ShadowIntensity::Medium,
        ),
        preset(
            "azul_solido",
            "Azul Sólido",
            [
                "#3498db", "#2980b9", "#5dade2", "#3498db", "#2980b9", "#85c1e9",
                "#2ecc71", "#d5f5e3", "#27ae60", "#e74c3c", "#fadbd8", "#c0392b",
                "#f39c12", "#fdebd0", "#d35400", "#5dade2", "#d6eaf8", "#2980b9",
            ],
            BorderRadius::Normal,
            ShadowIntensity::Medium,
        ),
        preset(
            "verde_solido",
            "Verde Sólido",
            [
                "#2ecc71", "#27ae60", "#58d68d", "#2ecc71", "#27ae60", "#82e0aa",
                "#2ecc71", "#d5f5e3", "#27ae60", "#e74c3c", "#fadbd8", "#c0392b",
                "#f39c12", "#fdebd0", "#d35400", "#58d68d", "#d5f5e3", "#27ae60",
            ],
            BorderRadius::Rounded,
            ShadowIntensity::Light,
        ),
        preset(
            "rojo_solido",
            "Rojo Sólido",
            [
                "#e74c3c", "#c0392b", "#f1948a", "#e74c3c", "#c0392b", "#f5b7b1",
                "#2ecc71", "#d5f5e3", "#27ae60", "#e74c3c", "#fadbd8", "#c0392b",
                "#f39c12", "#fdebd0", "#d35400", "#f1948a", "#fadbd8", "#c0392b",
            ],
            BorderRadius::Sharp,
            ShadowIntensity::Strong,
        ),
        preset(
            "purpura_solido",
            "Púrpura Sólido",
            [
                "#9b59b6", "#8e44ad", "#bb8fce", "#9b59b6", "#8e44ad", "#d2b4de",
                "#2ecc71", "#d5f5e3", "#27ae60", "#e74c3c", "#fadbd8", "#c0392b",
                "#f39c12", "#fdebd0", "#d35400", "#bb8fce", "#e8daef", "#8e44ad",
            ],
            BorderRadius::Normal,
            ShadowIntensity::Medium,
        ),
        preset(
            "naranja_solido",
            "Naranja Sólido",
            [
                "#f39c12", "#e67e22", "#f8c471", "#f39c12", "#e67e22", "#f9b379",
                "#2ecc71", "#d5f5e3", "#27ae60", "#e74c3c", "#fadbd8", "#c0392b",
                "#f39c12", "#fdebd0", "#d35400", "#f8c471", "#fdebd0", "#e67e22",
            ],
            BorderRadius::Rounded,
            ShadowIntensity::Light,
        ),
        preset(
            "corporate",
            "Corporativo",
            [
                "#2c3e50", "#1a252f", "#34495e", "#3498db", "#2980b9", "#85c1e9",
                "#27ae60", "#d5f5e3", "#219653", "#e74c3c", "#fadbd8", "#c0392b",
                "#f39c12", "#fdebd0", "#d35400", "#3498db", "#d6eaf8", "#2980b9",
            ],
            BorderRadius::Normal,
            ShadowIntensity::Medium,
        ),
        preset(
            "moderno",
            "Moderno",
            [
                "#7f8c8d", "#34495e", "#bdc3c7", "#95a5a6", "#7f8c8d", "#ecf0f1",
                "#2ecc71", "#d5f5e3", "#27ae60", "#e74c3c", "#fadbd8", "#c0392b",
                "#f39c12", "#fdebd0", "#d35400", "#3498db", "#d6eaf8", "#2980b9",
            ],
            BorderRadius::Rounded,
            ShadowIntensity::Medium,
        ),
        preset(
            "dark_classic",
            "Oscuro Clásico",
            [
                "#424242", "#212121", "#757575", "#616161", "#424242", "#9e9e9e",
                "#4caf50", "#c8e6c9", "#388e3c", "#f44336", "#ffcdd2", "#d32f2f",
                "#ff9800", "#ffe0b2", "#f57c00", "#2196f3", "#bbdefb", "#1976d2",
            ],
            BorderRadius::Normal,
            ShadowIntensity::Medium,
        ),
        preset(
            "vibrant",
            "Vibrante",
            [
                "#ff6b6b", "#ee5a52", "#ff9e7d", "#4ecdc4", "#2a9d8f", "#88d8b0",
                "#51cf66", "#d3f9d8", "#37b24d", "#ff6b6b", "#ffe3e3", "#e03131",
                "#fcc419", "#fff3bf", "#e67700", "#3bc9db", "#d0f0fd", "#1098ad",
            ],
            BorderRadius::Rounded,
            ShadowIntensity::Light,
        ),
        preset(
            "pastel",
            "Pastel",
            [
                "#a5d8ff", "#74c0fc", "#d0ebff", "#ff929f", "#ff6b7f", "#ffe3e6",
                "#96f2d7", "#e6fcf5", "#40c057", "#ff8787", "#ffe3e3", "#f06565",
                "#ffd8a8", "#fff9db", "#ff9d00", "#a5d8ff", "#e7f5ff", "#4dabf7",
            ],
            BorderRadius::Rounded,
            ShadowIntensity::Light,
        ),
        preset(
            "forest",
            "Bosque",
            [
                "#2d5016", "#1e3a0e", "#4a7c2d", "#4a7c2d", "#2d5016", "#6b9c4a",
                "#4a7c2d", "#e8f5e9", "#388e3c", "#d32f2f", "#ffebee", "#b71c1c",
                "#f57c00", "#fff3e0", "#e65100", "#1976d2", "#e3f2fd", "#0d47a1",
            ],
            BorderRadius::Normal,
            ShadowIntensity::Medium,
        ),
        preset(
            "ocean",
            "Océano",
            [
                "#006994", "#004e70", "#0085a1", "#0085a1", "#006994", "#00a8cc",
                "#00a8cc", "#e0f7fa", "#006994", "#d32f2f", "#ffebee", "#b71c1c",
                "#f57c00", "#fff3e0", "#e65100", "#0085a1", "#e0f7fa", "#006994",
            ],
            BorderRadius::Rounded,
            ShadowIntensity::Medium,
        ),
        preset(
            "sunset",
            "Atardecer",
            [
                "#ff6b35", "#e55525", "#ff9e7d", "#f7931e", "#e07d12", "#ffd8a8",
                "#40c057", "#d3f9d8", "#2b8a3e", "#f03e3e", "#ffe3e3", "#c92a2a",
                "#f59f00", "#fff3bf", "#e67700", "#3bc9db", "#d0f0fd", "#1864ab",
            ],
            BorderRadius::Sharp,
            ShadowIntensity::Strong,
        ),
        preset(
            "minimal",
            "Minimalista",
            [
                "#6c757d", "#495057", "#adb5bd", "#868e96", "#495057", "#ced4da",
                "#20c997", "#d1f2eb", "#15967d", "#e03131", "#ffdce0", "#c52222",
                "#ffa94d", "#fff0d9", "#ff9500", "#339af0", "#d0ebff", "#1c7ed6",
            ],
            BorderRadius::Sharp,
            ShadowIntensity::Light,
        ),
        preset(
            "high_contrast",
            "Alto Contraste",
            [
                "#000000", "#000000", "#333333", "#ffffff", "#ffffff", "#ffffff",
                "#00ff00", "#ccffcc", "#00cc00", "#ff0000", "#ffcccc", "#cc0000",
                "#ffff00", "#ffffcc", "#cccc00", "#0080ff", "#cce6ff", "#0066cc",
            ],
            BorderRadius::Sharp,
            ShadowIntensity::Strong,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOCUMENTED_IDS: [&str; 16] = [
        "default",
        "azul_solido",
        "verde_solido",
        "rojo_solido",
        "purpura_solido",
        "naranja_solido",
        "corporate",
        "moderno",
        "dark_classic",
        "vibrant",
        "pastel",
        "forest",
        "ocean",
        "sunset",
        "minimal",
        "high_contrast",
    ];

    #[test]
    fn test_default_preset_primary() {
        let catalog = PresetCatalog::builtin();
        assert_eq!(
            catalog["default"].theme().color(ColorField::PrimaryColor),
            Some("#667eea")
        );
        assert_eq!(catalog["default"].theme(), &default_theme());
    }

    #[test]
    fn test_catalog_ids_in_display_order() {
        let catalog = PresetCatalog::builtin();
        let ids: Vec<_> = catalog.ids().collect();
        assert_eq!(ids, DOCUMENTED_IDS);
    }

    #[test]
    fn test_presets_are_complete() {
        for preset in &PresetCatalog::builtin() {
            assert!(!preset.name().is_empty(), "{} has no name", preset.id());
            assert_eq!(preset.theme().colors().count(), 18, "{}", preset.id());
            assert!(preset.theme().border_radius_name.is_some());
            assert!(preset.theme().shadow_intensity_name.is_some());
        }
    }

    #[test]
    fn test_unknown_preset() {
        let catalog = PresetCatalog::builtin();
        assert!(catalog.get("neon").is_none());
        assert!(!catalog.contains("neon"));
    }

    #[test]
    fn test_preset_serializes_with_name() {
        let catalog = PresetCatalog::builtin();
        let value = serde_json::to_value(&catalog["high_contrast"]).unwrap();
        assert_eq!(value["name"], "Alto Contraste");
        assert_eq!(value["primaryColor"], "#000000");
        assert_eq!(value["borderRadius"], "sharp");
        assert_eq!(value["shadowIntensity"], "strong");
    }

    #[test]
    fn test_catalog_serializes_in_order() {
        let json = serde_json::to_string(&PresetCatalog::builtin()).unwrap();
        let first = json.find("\"default\"").unwrap();
        let last = json.find("\"high_contrast\"").unwrap();
        assert!(first < last);
    }
}
