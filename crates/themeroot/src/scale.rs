//! Categorical shape scales: corner radius and shadow depth.
//!
//! Both categories map onto a four-step size scale (`sm`, `md`, `lg`, `xl`)
//! that lands in the `--radius-*` and `--shadow-*` custom properties.
//! Unknown category names are never an error at apply time; they resolve to
//! [`BorderRadius::Normal`] and [`ShadowIntensity::Medium`].
//!
//! # Example
//!
//! ```rust
//! use themeroot::scale::{BorderRadius, ShadowIntensity, Step};
//!
//! let radii = BorderRadius::from_name_or_default("rounded").scale();
//! assert_eq!(radii.get(Step::Sm), "12px");
//!
//! // Unknown names fall back silently.
//! assert_eq!(ShadowIntensity::from_name_or_default("giant"), ShadowIntensity::Medium);
//! ```

use std::fmt;
use std::str::FromStr;

use thiserror::Error;
use tracing::trace;

/// One step of a four-entry size scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Step {
    Sm,
    Md,
    Lg,
    Xl,
}

impl Step {
    /// All steps, smallest first.
    pub const ALL: [Step; 4] = [Step::Sm, Step::Md, Step::Lg, Step::Xl];

    /// Suffix used in custom property names (`--radius-sm`, ...).
    pub fn suffix(self) -> &'static str {
        match self {
            Step::Sm => "sm",
            Step::Md => "md",
            Step::Lg => "lg",
            Step::Xl => "xl",
        }
    }
}

/// Four literal CSS values, one per [`Step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scale {
    pub sm: &'static str,
    pub md: &'static str,
    pub lg: &'static str,
    pub xl: &'static str,
}

impl Scale {
    /// Returns the value for a step.
    pub fn get(&self, step: Step) -> &'static str {
        match step {
            Step::Sm => self.sm,
            Step::Md => self.md,
            Step::Lg => self.lg,
            Step::Xl => self.xl,
        }
    }

    /// Iterate `(step, value)` pairs, smallest first.
    pub fn iter(&self) -> impl Iterator<Item = (Step, &'static str)> + '_ {
        Step::ALL.into_iter().map(move |step| (step, self.get(step)))
    }
}

/// Corner rounding category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BorderRadius {
    Sharp,
    #[default]
    Normal,
    Rounded,
}

/// Drop-shadow strength category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ShadowIntensity {
    Light,
    #[default]
    Medium,
    Strong,
}

const RADIUS_SHARP: Scale = Scale {
    sm: "4px",
    md: "6px",
    lg: "8px",
    xl: "10px",
};

const RADIUS_NORMAL: Scale = Scale {
    sm: "8px",
    md: "12px",
    lg: "15px",
    xl: "20px",
};

const RADIUS_ROUNDED: Scale = Scale {
    sm: "12px",
    md: "16px",
    lg: "20px",
    xl: "25px",
};

const SHADOW_LIGHT: Scale = Scale {
    sm: "0 1px 2px rgba(0,0,0,0.03)",
    md: "0 2px 8px rgba(0,0,0,0.05)",
    lg: "0 5px 15px rgba(0,0,0,0.07)",
    xl: "0 10px 25px rgba(0,0,0,0.1)",
};

const SHADOW_MEDIUM: Scale = Scale {
    sm: "0 2px 4px rgba(0,0,0,0.05)",
    md: "0 4px 12px rgba(0,0,0,0.08)",
    lg: "0 10px 30px rgba(0,0,0,0.1)",
    xl: "0 20px 40px rgba(0,0,0,0.15)",
};

const SHADOW_STRONG: Scale = Scale {
    sm: "0 3px 6px rgba(0,0,0,0.08)",
    md: "0 6px 16px rgba(0,0,0,0.12)",
    lg: "0 12px 35px rgba(0,0,0,0.15)",
    xl: "0 25px 50px rgba(0,0,0,0.2)",
};

impl BorderRadius {
    /// All categories in display order.
    pub const ALL: [BorderRadius; 3] = [
        BorderRadius::Sharp,
        BorderRadius::Normal,
        BorderRadius::Rounded,
    ];

    /// Wire name of the category.
    pub fn as_str(self) -> &'static str {
        match self {
            BorderRadius::Sharp => "sharp",
            BorderRadius::Normal => "normal",
            BorderRadius::Rounded => "rounded",
        }
    }

    /// Resolve a wire name, falling back to [`BorderRadius::Normal`].
    pub fn from_name_or_default(name: &str) -> Self {
        name.parse().unwrap_or_else(|_| {
            trace!(scale.category = name, "Unknown border radius, using normal");
            Self::default()
        })
    }

    /// The four radius values for this category.
    pub fn scale(self) -> Scale {
        match self {
            BorderRadius::Sharp => RADIUS_SHARP,
            BorderRadius::Normal => RADIUS_NORMAL,
            BorderRadius::Rounded => RADIUS_ROUNDED,
        }
    }
}

impl ShadowIntensity {
    /// All categories in display order.
    pub const ALL: [ShadowIntensity; 3] = [
        ShadowIntensity::Light,
        ShadowIntensity::Medium,
        ShadowIntensity::Strong,
    ];

    /// Wire name of the category.
    pub fn as_str(self) -> &'static str {
        match self {
            ShadowIntensity::Light => "light",
            ShadowIntensity::Medium => "medium",
            ShadowIntensity::Strong => "strong",
        }
    }

    /// Resolve a wire name, falling back to [`ShadowIntensity::Medium`].
    pub fn from_name_or_default(name: &str) -> Self {
        name.parse().unwrap_or_else(|_| {
            trace!(scale.category = name, "Unknown shadow intensity, using medium");
            Self::default()
        })
    }

    /// The four box-shadow values for this category.
    pub fn scale(self) -> Scale {
        match self {
            ShadowIntensity::Light => SHADOW_LIGHT,
            ShadowIntensity::Medium => SHADOW_MEDIUM,
            ShadowIntensity::Strong => SHADOW_STRONG,
        }
    }
}

impl fmt::Display for BorderRadius {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for ShadowIntensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BorderRadius {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sharp" => Ok(Self::Sharp),
            "normal" => Ok(Self::Normal),
            "rounded" => Ok(Self::Rounded),
            _ => Err(ParseCategoryError {
                kind: "border radius",
                value: s.to_string(),
            }),
        }
    }
}

impl FromStr for ShadowIntensity {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Self::Light),
            "medium" => Ok(Self::Medium),
            "strong" => Ok(Self::Strong),
            _ => Err(ParseCategoryError {
                kind: "shadow intensity",
                value: s.to_string(),
            }),
        }
    }
}

/// Error returned by the strict `FromStr` parsers.
///
/// Category matching is exact and case-sensitive.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown {kind} category '{value}'")]
pub struct ParseCategoryError {
    kind: &'static str,
    value: String,
}

impl ParseCategoryError {
    /// The rejected input.
    pub fn value(&self) -> &str {
        &self.value
    }
}
