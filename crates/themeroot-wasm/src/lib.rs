//! # themeroot-wasm
//!
//! Runtime page theming for the browser, compiled to WebAssembly.
//!
//! This crate bundles the `web` bindings of `themeroot`: the JavaScript
//! `ThemeManager` class working on the live DOM and `fetch`, plus console
//! logging and panic reporting.
//!
//! ## Quick Start (JavaScript)
//!
//! ```javascript
//! import init, { ThemeManager, initLogging } from 'themeroot-wasm';
//!
//! async function main() {
//!     await init();
//!     initLogging('themeroot=debug');
//!
//!     const themes = new ThemeManager();
//!     themes.init();
//!
//!     document.querySelector('#reset').onclick = () => themes.resetTheme();
//!     const active = await themes.getActiveTheme();
//!     if (active) themes.applyTheme(active);
//! }
//!
//! main();
//! ```
//!
//! ## Available APIs
//!
//! ### ThemeManager
//!
//! - `new ThemeManager(options?)` - Options: `endpointPrefix`, `csrfCookie`,
//!   `csrfHeader`, `themeAttribute`
//! - `init()` - Apply the theme embedded in `<body data-theme>`
//! - `applyTheme(theme)` / `applyPreset(id)` / `resetTheme()`
//! - `saveTheme(theme)` - Resolves to `{ success, theme, error }`
//! - `getActiveTheme()` - Resolves to the stored theme or `null`
//! - `getPresetThemes()` - The built-in catalog
//! - `getCookie(name)` / `rootCss(theme)`
//!
//! ### Utilities
//!
//! - `version()` - Crate version
//! - `isReady()` - Always `true` once loaded
//! - `initLogging(filter?)` - Route `tracing` output to the console

#![forbid(unsafe_code)]

pub mod logging;

use wasm_bindgen::prelude::*;

// Re-export the browser bindings
pub use themeroot::web::*;

/// Runs when the module is instantiated.
#[wasm_bindgen(start)]
pub fn start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Module version information.
#[must_use]
#[wasm_bindgen(js_name = "version")]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Check if the module is properly initialized.
#[must_use]
#[wasm_bindgen(js_name = "isReady")]
#[allow(clippy::missing_const_for_fn)] // wasm_bindgen doesn't support const fn
pub fn is_ready() -> bool {
    true
}

/// Route `tracing` output to the browser console.
///
/// `filter` takes `tracing` directives (`"info"`, `"themeroot=debug"`);
/// unparseable or missing filters mean `"info"`. Returns `false` if logging
/// was already initialized.
#[wasm_bindgen(js_name = "initLogging")]
pub fn init_logging(filter: Option<String>) -> bool {
    let installed = logging::install(filter.as_deref());
    if installed {
        tracing::debug!(version = env!("CARGO_PKG_VERSION"), "Console logging ready");
    }
    installed
}
