//! The theme manager: applies, resets, persists and fetches themes.
//!
//! A [`ThemeManager`] owns a [`Document`] (where CSS custom properties are
//! written and the CSRF cookie is read) and a [`Transport`] (how the backend
//! is reached). The hosting page builds one manager, calls
//! [`init`](ThemeManager::init) once the DOM is ready, and hands the manager
//! to whatever UI lets users pick themes.
//!
//! # Example
//!
//! ```rust
//! use themeroot::transport::MemoryTransport;
//! use themeroot::{
//!     ColorField, Document, ManagerConfig, MemoryDocument, ThemeDescriptor, ThemeManager,
//! };
//!
//! let manager = ThemeManager::new(MemoryDocument::new(), MemoryTransport::new(), ManagerConfig::public());
//! manager.apply_theme(&ThemeDescriptor::new().with_color(ColorField::PrimaryColor, "#3498db"));
//!
//! let doc = manager.document();
//! assert_eq!(doc.style_property("--primary-color").as_deref(), Some("#3498db"));
//! assert_eq!(doc.style_property("--radius-md").as_deref(), Some("12px"));
//! ```

use std::cell::{Cell, RefCell};
use std::fmt;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::rc::Rc;

use thiserror::Error;
use tracing::{debug, info, trace, warn};

use crate::config::ManagerConfig;
use crate::cookie::cookie_value;
use crate::css::{css_assignments, render_root_css};
use crate::descriptor::ThemeDescriptor;
use crate::document::Document;
use crate::preset::{PresetCatalog, default_theme};
use crate::transport::{ApiResponse, Request, Response, Transport, TransportError};

const SAVE_FAILED: &str = "Failed to save theme";
const FETCH_FAILED: &str = "Failed to fetch active theme";

/// Identifier for a registered theme change listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener = Rc<dyn Fn(&ThemeDescriptor)>;

/// Applies theme descriptors to a document and syncs them with the backend.
pub struct ThemeManager<D, T> {
    document: D,
    transport: T,
    config: ManagerConfig,
    default_theme: ThemeDescriptor,
    presets: PresetCatalog,
    listeners: RefCell<Vec<(ListenerId, Listener)>>,
    next_listener_id: Cell<u64>,
}

impl<D, T> fmt::Debug for ThemeManager<D, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThemeManager")
            .field("config", &self.config)
            .field("presets", &self.presets.len())
            .field(
                "listeners",
                &format!("{} listeners", self.listeners.borrow().len()),
            )
            .finish()
    }
}

impl<D: Document, T: Transport> ThemeManager<D, T> {
    /// Creates a manager. Nothing is read or written until [`init`](Self::init).
    pub fn new(document: D, transport: T, config: ManagerConfig) -> Self {
        Self {
            document,
            transport,
            config,
            default_theme: default_theme(),
            presets: PresetCatalog::builtin(),
            listeners: RefCell::new(Vec::new()),
            next_listener_id: Cell::new(1),
        }
    }

    /// Applies the theme embedded in the page, if there is a usable one.
    ///
    /// Returns the applied descriptor. A missing or malformed attribute
    /// leaves the page untouched.
    pub fn init(&self) -> Option<ThemeDescriptor> {
        let theme = self.saved_theme()?;
        info!(theme.fields = theme.colors().count(), "Applying embedded theme");
        self.apply_theme(&theme);
        Some(theme)
    }

    /// Parses the theme the server embedded in the page without applying it.
    pub fn saved_theme(&self) -> Option<ThemeDescriptor> {
        let raw = self
            .document
            .data_attribute(&self.config.theme_attribute)
            .filter(|raw| !raw.is_empty())?;

        match ThemeDescriptor::from_json(&raw) {
            Ok(theme) => Some(theme),
            Err(err) => {
                warn!(
                    theme.attribute = %self.config.theme_attribute,
                    error = %err,
                    "Embedded theme is malformed; ignoring"
                );
                None
            }
        }
    }

    /// Writes `theme` onto the document root.
    ///
    /// Present colors are set verbatim; absent ones are left alone. The
    /// radius, shadow and gradient properties are always written, using
    /// the defaults where the descriptor is silent. Applying the same
    /// descriptor twice yields the same properties.
    pub fn apply_theme(&self, theme: &ThemeDescriptor) {
        let assignments = css_assignments(theme);
        let mut refused = 0usize;
        for assignment in &assignments {
            match self
                .document
                .set_style_property(assignment.property, &assignment.value)
            {
                Ok(()) => trace!(
                    css.property = assignment.property,
                    css.value = %assignment.value,
                    "Set custom property"
                ),
                Err(err) => {
                    refused += 1;
                    warn!(css.property = assignment.property, error = %err, "Style write refused");
                }
            }
        }

        debug!(
            css.written = assignments.len() - refused,
            css.refused = refused,
            theme.radius = %theme.border_radius(),
            theme.shadow = %theme.shadow_intensity(),
            "Theme applied"
        );
        self.notify_listeners(theme);
    }

    /// Applies the built-in default palette.
    pub fn reset_theme(&self) {
        info!("Resetting theme to default");
        self.apply_theme(&self.default_theme);
    }

    /// Applies a preset by id.
    ///
    /// # Errors
    /// Returns `ThemeError::UnknownPreset` if no preset has that id; the
    /// page is left untouched.
    pub fn apply_preset(&self, id: &str) -> Result<(), ThemeError> {
        let preset = self
            .presets
            .get(id)
            .ok_or_else(|| ThemeError::UnknownPreset(id.to_string()))?;
        info!(theme.preset = id, theme.name = preset.name(), "Applying preset");
        self.apply_theme(preset.theme());
        Ok(())
    }

    /// The built-in catalog.
    pub fn preset_themes(&self) -> &PresetCatalog {
        &self.presets
    }

    /// The palette [`reset_theme`](Self::reset_theme) applies.
    pub fn default_theme(&self) -> &ThemeDescriptor {
        &self.default_theme
    }

    /// Reads a cookie from the document, percent-decoded.
    pub fn get_cookie(&self, name: &str) -> Option<String> {
        let cookies = self.document.cookie_string()?;
        cookie_value(&cookies, name)
    }

    /// Persists `theme`, then applies it locally.
    ///
    /// The save counts only when the backend answers with a 2xx status AND
    /// `"success": true`. On success the descriptor is applied and the
    /// server's normalized copy is returned when it sent a well-formed one;
    /// a malformed echo is logged and dropped. On failure nothing is applied.
    ///
    /// # Errors
    /// Returns `SyncError` describing why the save did not happen.
    pub async fn save_theme(
        &self,
        theme: &ThemeDescriptor,
    ) -> Result<Option<ThemeDescriptor>, SyncError> {
        let body = theme.to_json().map_err(SyncError::Encode)?;
        let mut request = Request::post_json(self.config.save_url(), body);
        match self.get_cookie(&self.config.csrf_cookie) {
            Some(token) => request = request.header(self.config.csrf_header.clone(), token),
            None => warn!(
                cookie.name = %self.config.csrf_cookie,
                "No CSRF token cookie; saving without it"
            ),
        }

        let result = self
            .exchange(request, SAVE_FAILED)
            .await
            .map(|api| match api.decode_theme() {
                Ok(echoed) => echoed,
                Err(err) => {
                    warn!(error = %err, "Saved theme echo is malformed; ignoring it");
                    None
                }
            });

        match &result {
            Ok(echoed) => {
                info!(theme.echoed = echoed.is_some(), "Theme saved");
                self.apply_theme(theme);
            }
            Err(err) => warn!(error = %err, "Error saving theme"),
        }
        result
    }

    /// Fetches the theme the backend currently serves, `None` on any failure.
    pub async fn get_active_theme(&self) -> Option<ThemeDescriptor> {
        self.fetch_active_theme().await.unwrap_or_else(|err| {
            warn!(error = %err, "Error getting active theme");
            None
        })
    }

    /// Fetches the active theme, reporting why it failed.
    ///
    /// `Ok(None)` means the backend has no active theme stored.
    ///
    /// # Errors
    /// Returns `SyncError` on transport, HTTP or body-level failure.
    pub async fn fetch_active_theme(&self) -> Result<Option<ThemeDescriptor>, SyncError> {
        let request = Request::get(self.config.active_url());
        let api = self.exchange(request, FETCH_FAILED).await?;
        let theme = api.decode_theme().map_err(SyncError::Decode)?;
        debug!(theme.present = theme.is_some(), "Fetched active theme");
        Ok(theme)
    }

    /// Renders what applying `theme` writes as a `:root` block.
    pub fn root_css(&self, theme: &ThemeDescriptor) -> String {
        render_root_css(theme)
    }

    /// Registers a callback run after every applied theme.
    ///
    /// Where panics unwind, a panicking callback is logged and skipped; under
    /// `panic = "abort"` (release and wasm32 builds) it aborts as usual.
    pub fn on_change<F>(&self, callback: F) -> ListenerId
    where
        F: Fn(&ThemeDescriptor) + 'static,
    {
        let id = ListenerId(self.next_listener_id.get());
        self.next_listener_id.set(id.0 + 1);
        self.listeners.borrow_mut().push((id, Rc::new(callback)));
        debug!(theme.listener_id = id.0, "Theme listener registered");
        id
    }

    /// Removes a listener by id.
    pub fn remove_listener(&self, id: ListenerId) {
        let mut listeners = self.listeners.borrow_mut();
        let before = listeners.len();
        listeners.retain(|(existing, _)| *existing != id);
        if listeners.len() != before {
            debug!(theme.listener_id = id.0, "Theme listener removed");
        }
    }

    pub fn config(&self) -> &ManagerConfig {
        &self.config
    }

    pub fn document(&self) -> &D {
        &self.document
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    async fn exchange(&self, request: Request, fallback: &str) -> Result<ApiResponse, SyncError> {
        debug!(http.method = %request.method, http.url = %request.url, "Theme API request");
        let response = self.transport.send(request).await?;
        interpret(&response, fallback)
    }

    fn notify_listeners(&self, theme: &ThemeDescriptor) {
        // Snapshot so a listener may register, remove, or re-apply.
        let listeners: Vec<(ListenerId, Listener)> = self.listeners.borrow().clone();
        for (id, listener) in listeners {
            let result = catch_unwind(AssertUnwindSafe(|| listener(theme)));
            if result.is_err() {
                warn!(theme.listener_id = id.0, "Theme listener panicked");
            }
        }
    }
}

/// Classifies a backend reply. The body must be JSON; success needs a 2xx
/// status and `"success": true`.
fn interpret(response: &Response, fallback: &str) -> Result<ApiResponse, SyncError> {
    let api: ApiResponse = match serde_json::from_str(&response.body) {
        Ok(api) => api,
        Err(_) if !response.is_success() => {
            return Err(SyncError::Http {
                status: response.status,
                message: fallback.to_string(),
            });
        }
        Err(err) => return Err(SyncError::Decode(err)),
    };

    if !response.is_success() {
        return Err(SyncError::Http {
            status: response.status,
            message: api.error.unwrap_or_else(|| fallback.to_string()),
        });
    }
    if !api.success {
        return Err(SyncError::Rejected(
            api.error.unwrap_or_else(|| fallback.to_string()),
        ));
    }
    Ok(api)
}

/// Why a save or fetch did not go through.
#[derive(Error, Debug)]
pub enum SyncError {
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },
    #[error("{0}")]
    Rejected(String),
    #[error("Invalid response body: {0}")]
    Decode(#[source] serde_json::Error),
    #[error("Could not encode theme: {0}")]
    Encode(#[source] serde_json::Error),
}

impl SyncError {
    /// Message suitable for showing to the user.
    ///
    /// Server-provided messages are passed through unchanged.
    pub fn user_message(&self) -> String {
        match self {
            SyncError::Http { message, .. } | SyncError::Rejected(message) => message.clone(),
            other => other.to_string(),
        }
    }
}

/// Error from a local theme operation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ThemeError {
    #[error("Unknown preset theme '{0}'")]
    UnknownPreset(String),
}
