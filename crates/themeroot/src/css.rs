//! Translation of a descriptor into CSS custom-property assignments.
//!
//! [`css_assignments`] is the single source of truth for what applying a
//! theme writes. The manager pushes these onto the live document root;
//! [`render_root_css`] prints the same list as a `:root` block so a server
//! can pre-render the active theme into the page head.

use std::fmt::{self, Write as _};

use crate::descriptor::{ColorField, ThemeDescriptor};
use crate::preset::{DEFAULT_PRIMARY, DEFAULT_PRIMARY_DARK};
use crate::scale::Step;

/// Derived property recomputed on every apply.
pub const GRADIENT_PROPERTY: &str = "--primary-gradient";

/// One `--name: value` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CssAssignment {
    pub property: &'static str,
    pub value: String,
}

impl CssAssignment {
    fn new(property: &'static str, value: impl Into<String>) -> Self {
        Self {
            property,
            value: value.into(),
        }
    }
}

impl fmt::Display for CssAssignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {};", self.property, self.value)
    }
}

/// `--radius-*` property for a step.
pub fn radius_property(step: Step) -> &'static str {
    match step {
        Step::Sm => "--radius-sm",
        Step::Md => "--radius-md",
        Step::Lg => "--radius-lg",
        Step::Xl => "--radius-xl",
    }
}

/// `--shadow-*` property for a step.
pub fn shadow_property(step: Step) -> &'static str {
    match step {
        Step::Sm => "--shadow-sm",
        Step::Md => "--shadow-md",
        Step::Lg => "--shadow-lg",
        Step::Xl => "--shadow-xl",
    }
}

/// The 135° primary gradient, with the built-in colors standing in for
/// absent fields.
pub fn primary_gradient(theme: &ThemeDescriptor) -> String {
    let from = theme
        .color(ColorField::PrimaryColor)
        .unwrap_or(DEFAULT_PRIMARY);
    let to = theme
        .color(ColorField::PrimaryDark)
        .unwrap_or(DEFAULT_PRIMARY_DARK);
    format!("linear-gradient(135deg, {from} 0%, {to} 100%)")
}

/// Every property write applying `theme` performs, in order.
///
/// Present color fields come first, then the four radius and four shadow
/// values (defaulted categories when absent), then the gradient. Absent
/// color fields produce nothing.
pub fn css_assignments(theme: &ThemeDescriptor) -> Vec<CssAssignment> {
    let mut out = Vec::with_capacity(27);

    out.extend(
        theme
            .colors()
            .map(|(field, value)| CssAssignment::new(field.css_property(), value)),
    );

    let radii = theme.border_radius().scale();
    out.extend(
        radii
            .iter()
            .map(|(step, value)| CssAssignment::new(radius_property(step), value)),
    );

    let shadows = theme.shadow_intensity().scale();
    out.extend(
        shadows
            .iter()
            .map(|(step, value)| CssAssignment::new(shadow_property(step), value)),
    );

    out.push(CssAssignment::new(
        GRADIENT_PROPERTY,
        primary_gradient(theme),
    ));
    out
}

/// Renders the assignments for `theme` as a `:root { ... }` block.
///
/// ```rust
/// use themeroot::{css::render_root_css, ThemeDescriptor};
///
/// let css = render_root_css(&ThemeDescriptor::new());
/// assert!(css.starts_with(":root {\n"));
/// assert!(css.contains("  --radius-md: 12px;\n"));
/// ```
pub fn render_root_css(theme: &ThemeDescriptor) -> String {
    let mut css = String::from(":root {\n");
    for assignment in css_assignments(theme) {
        let _ = writeln!(css, "  {assignment}");
    }
    css.push_str("}\n");
    css
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preset::default_theme;
    use crate::scale::{BorderRadius, ShadowIntensity};

    fn properties(theme: &ThemeDescriptor) -> Vec<&'static str> {
        css_assignments(theme).into_iter().map(|a| a.property).collect()
    }

    #[test]
    fn test_empty_theme_writes_only_derived_properties() {
        let props = properties(&ThemeDescriptor::new());
        assert_eq!(
            props,
            [
                "--radius-sm",
                "--radius-md",
                "--radius-lg",
                "--radius-xl",
                "--shadow-sm",
                "--shadow-md",
                "--shadow-lg",
                "--shadow-xl",
                "--primary-gradient",
            ]
        );
    }

    #[test]
    fn test_full_theme_writes_everything() {
        assert_eq!(css_assignments(&default_theme()).len(), 18 + 4 + 4 + 1);
    }

    #[test]
    fn test_gradient_fallbacks() {
        assert_eq!(
            primary_gradient(&ThemeDescriptor::new()),
            "linear-gradient(135deg, #667eea 0%, #764ba2 100%)"
        );
        let theme = ThemeDescriptor::new().with_color(ColorField::PrimaryColor, "#ff0000");
        assert_eq!(
            primary_gradient(&theme),
            "linear-gradient(135deg, #ff0000 0%, #764ba2 100%)"
        );
    }

    #[test]
    fn test_unknown_radius_matches_normal() {
        let giant = ThemeDescriptor::from_json(r#"{"borderRadius": "giant"}"#).unwrap();
        let normal = ThemeDescriptor::new().with_border_radius(BorderRadius::Normal);
        assert_eq!(css_assignments(&giant), css_assignments(&normal));
    }

    #[test]
    fn test_shadow_category_values() {
        let theme = ThemeDescriptor::new().with_shadow_intensity(ShadowIntensity::Light);
        let xl = css_assignments(&theme)
            .into_iter()
            .find(|a| a.property == "--shadow-xl")
            .unwrap();
        assert_eq!(xl.value, "0 10px 25px rgba(0,0,0,0.1)");
    }

    #[test]
    fn test_render_root_css() {
        let theme = ThemeDescriptor::new().with_color(ColorField::InfoBg, "#bee3f8");
        let css = render_root_css(&theme);
        assert!(css.contains("  --info-bg: #bee3f8;\n"));
        assert!(css.contains("  --primary-gradient: linear-gradient(135deg, #667eea 0%, #764ba2 100%);\n"));
        assert!(css.ends_with("}\n"));
        assert_eq!(css.lines().count(), 1 + 1 + 9 + 1);
    }
}
