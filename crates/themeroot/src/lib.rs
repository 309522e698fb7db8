#![forbid(unsafe_code)]
// Allow these clippy lints for API ergonomics and browser-host code
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::use_self)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::new_without_default)]
#![allow(clippy::missing_fields_in_debug)]
#![allow(clippy::option_if_let_else)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::future_not_send)]

//! # Themeroot
//!
//! Runtime theming for server-rendered pages.
//!
//! A theme is a flat set of named colors plus two categorical knobs (corner
//! radius and shadow intensity). Themeroot maps a theme onto CSS custom
//! properties on the document root, so every stylesheet that reads
//! `var(--primary-color)` or `var(--radius-md)` follows along:
//! - **Apply** a theme, a built-in preset, or the default palette
//! - **Persist** the chosen theme to the backend, guarded by a CSRF token
//! - **Fetch** the theme the backend currently serves
//! - **Render** the same properties as a `:root { ... }` block
//!
//! ## Quick Start
//!
//! ```rust
//! use themeroot::prelude::*;
//! use themeroot::transport::MemoryTransport;
//!
//! let manager = ThemeManager::new(
//!     MemoryDocument::new(),
//!     MemoryTransport::new(),
//!     ManagerConfig::public(),
//! );
//!
//! manager.apply_preset("ocean").unwrap();
//! assert_eq!(
//!     manager.document().style_property("--primary-color").as_deref(),
//!     Some("#006994"),
//! );
//! ```
//!
//! ## Themes
//!
//! Colors are opaque strings; anything the browser accepts as a CSS value
//! goes. Unknown radius or shadow names fall back to the defaults rather
//! than failing:
//!
//! ```rust
//! use themeroot::{BorderRadius, ThemeDescriptor};
//!
//! let theme = ThemeDescriptor::from_json(r#"{"borderRadius": "blobby"}"#).unwrap();
//! assert_eq!(theme.border_radius(), BorderRadius::Normal);
//! ```
//!
//! ## Browser
//!
//! With the `web` feature, [`web`] binds the manager to the live DOM and
//! `fetch`, and exports a `ThemeManager` class to JavaScript.

pub mod config;
pub mod cookie;
pub mod css;
pub mod descriptor;
pub mod document;
pub mod manager;
pub mod preset;
pub mod scale;
pub mod transport;

#[cfg(feature = "web")]
pub mod web;

// Re-exports
pub use config::{ADMIN_PREFIX, ManagerConfig};
pub use cookie::{DecodeError, cookie_value, percent_decode};
pub use css::{CssAssignment, css_assignments, primary_gradient, render_root_css};
pub use descriptor::{ColorField, ThemeDescriptor, ThemeLoadError};
pub use document::{Document, MemoryDocument, StyleError};
pub use manager::{ListenerId, SyncError, ThemeError, ThemeManager};
pub use preset::{PresetCatalog, PresetTheme, default_theme};
pub use scale::{BorderRadius, ParseCategoryError, Scale, ShadowIntensity, Step};
pub use transport::{Method, Request, Response, Transport, TransportError};

#[cfg(feature = "web")]
pub use web::{BrowserDocument, FetchTransport, JsThemeManager};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::config::ManagerConfig;
    pub use crate::descriptor::{ColorField, ThemeDescriptor};
    pub use crate::document::{Document, MemoryDocument};
    pub use crate::manager::{ListenerId, SyncError, ThemeError, ThemeManager};
    pub use crate::preset::{PresetCatalog, PresetTheme, default_theme};
    pub use crate::scale::{BorderRadius, ShadowIntensity};
    pub use crate::transport::Transport;
    #[cfg(feature = "web")]
    pub use crate::web::{BrowserDocument, FetchTransport};
}
