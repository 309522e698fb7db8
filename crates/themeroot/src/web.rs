//! Browser bindings: the live DOM, `fetch`, and the JavaScript-facing class.
//!
//! # Example (JavaScript)
//!
//! ```javascript
//! import init, { ThemeManager } from 'themeroot-wasm';
//!
//! await init();
//!
//! const themes = new ThemeManager({ endpointPrefix: '/administracion' });
//! themes.init();
//!
//! const result = await themes.saveTheme({ primaryColor: '#3498db', borderRadius: 'sharp' });
//! if (!result.success) {
//!     alert(result.error);
//! }
//! ```

use std::rc::Rc;

use js_sys::Promise;
use serde::Serialize;
use serde_json::json;
use tracing::debug;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::{JsFuture, future_to_promise};
use web_sys::{HtmlDocument, HtmlElement, RequestInit};

use crate::config::ManagerConfig;
use crate::css::render_root_css;
use crate::descriptor::ThemeDescriptor;
use crate::document::{Document, StyleError};
use crate::manager::ThemeManager;
use crate::transport::{Request, Response, Transport, TransportError};

/// Best-effort text for a thrown JavaScript value.
fn js_error_message(value: &JsValue) -> String {
    if let Some(error) = value.dyn_ref::<js_sys::Error>() {
        return String::from(error.message());
    }
    value
        .as_string()
        .unwrap_or_else(|| format!("{value:?}"))
}

fn js_error(message: impl AsRef<str>) -> JsValue {
    js_sys::Error::new(message.as_ref()).into()
}

/// The page's live DOM.
#[derive(Debug, Clone)]
pub struct BrowserDocument {
    document: web_sys::Document,
}

impl BrowserDocument {
    pub fn new(document: web_sys::Document) -> Self {
        Self { document }
    }

    /// The document of the current window, if there is one.
    pub fn from_window() -> Option<Self> {
        web_sys::window()?.document().map(Self::new)
    }

    fn root(&self) -> Option<HtmlElement> {
        self.document
            .document_element()?
            .dyn_into::<HtmlElement>()
            .ok()
    }
}

impl Document for BrowserDocument {
    fn set_style_property(&self, name: &str, value: &str) -> Result<(), StyleError> {
        let root = self
            .root()
            .ok_or_else(|| StyleError::new(name, "document has no root element"))?;
        root.style()
            .set_property(name, value)
            .map_err(|err| StyleError::new(name, js_error_message(&err)))
    }

    fn style_property(&self, name: &str) -> Option<String> {
        self.root()?
            .style()
            .get_property_value(name)
            .ok()
            .filter(|value| !value.is_empty())
    }

    fn cookie_string(&self) -> Option<String> {
        self.document.dyn_ref::<HtmlDocument>()?.cookie().ok()
    }

    fn data_attribute(&self, key: &str) -> Option<String> {
        self.document.body()?.dataset().get(key)
    }
}

/// [`Transport`] over the browser `fetch` API.
///
/// Requests go to the page's own origin, so the session cookie rides along.
#[derive(Debug, Clone, Copy, Default)]
pub struct FetchTransport;

impl FetchTransport {
    async fn fetch(request: Request) -> Result<Response, JsValue> {
        let init = RequestInit::new();
        init.set_method(request.method.as_str());
        if let Some(body) = &request.body {
            init.set_body(&JsValue::from_str(body));
        }

        let js_request = web_sys::Request::new_with_str_and_init(&request.url, &init)?;
        let headers = js_request.headers();
        for (name, value) in &request.headers {
            headers.set(name, value)?;
        }

        let window = web_sys::window().ok_or_else(|| js_error("no window available"))?;
        let response: web_sys::Response = JsFuture::from(window.fetch_with_request(&js_request))
            .await?
            .dyn_into()?;
        let body = JsFuture::from(response.text()?)
            .await?
            .as_string()
            .unwrap_or_default();

        Ok(Response::new(response.status(), body))
    }
}

impl Transport for FetchTransport {
    async fn send(&self, request: Request) -> Result<Response, TransportError> {
        debug!(http.method = %request.method, http.url = %request.url, "fetch");
        Self::fetch(request)
            .await
            .map_err(|err| TransportError::new(js_error_message(&err)))
    }
}

fn descriptor_from_js(value: &JsValue) -> Result<ThemeDescriptor, JsValue> {
    let json = js_sys::JSON::stringify(value)?
        .as_string()
        .ok_or_else(|| js_error("theme must be an object"))?;
    ThemeDescriptor::from_json(&json).map_err(|err| js_error(err.to_string()))
}

fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsValue> {
    let json = serde_json::to_string(value).map_err(|err| js_error(err.to_string()))?;
    js_sys::JSON::parse(&json)
}

fn config_from_js(options: &JsValue) -> Result<ManagerConfig, JsValue> {
    if options.is_undefined() || options.is_null() {
        return Ok(ManagerConfig::public());
    }
    let json = js_sys::JSON::stringify(options)?
        .as_string()
        .ok_or_else(|| js_error("options must be an object"))?;
    ManagerConfig::from_json(&json).map_err(|err| js_error(err.to_string()))
}

type BrowserManager = ThemeManager<BrowserDocument, FetchTransport>;

/// JavaScript handle to a [`ThemeManager`] bound to the current page.
#[wasm_bindgen(js_name = "ThemeManager")]
pub struct JsThemeManager {
    inner: Rc<BrowserManager>,
}

#[wasm_bindgen(js_class = "ThemeManager")]
impl JsThemeManager {
    /// Create a manager for the current page.
    ///
    /// `options` may override `endpointPrefix`, `csrfCookie`, `csrfHeader`
    /// and `themeAttribute`.
    #[wasm_bindgen(constructor)]
    pub fn new(options: JsValue) -> Result<JsThemeManager, JsValue> {
        let config = config_from_js(&options)?;
        let document =
            BrowserDocument::from_window().ok_or_else(|| js_error("no document available"))?;
        Ok(Self {
            inner: Rc::new(ThemeManager::new(document, FetchTransport, config)),
        })
    }

    /// Apply the theme embedded in the page. Returns it, or `null`.
    #[wasm_bindgen]
    pub fn init(&self) -> Result<JsValue, JsValue> {
        match self.inner.init() {
            Some(theme) => to_js(&theme),
            None => Ok(JsValue::NULL),
        }
    }

    /// Write a theme object onto the document root.
    #[wasm_bindgen(js_name = "applyTheme")]
    pub fn apply_theme(&self, theme: JsValue) -> Result<(), JsValue> {
        let theme = descriptor_from_js(&theme)?;
        self.inner.apply_theme(&theme);
        Ok(())
    }

    /// Persist a theme. Resolves to `{ success, theme, error }`; never rejects.
    #[wasm_bindgen(js_name = "saveTheme")]
    pub fn save_theme(&self, theme: JsValue) -> Promise {
        let manager = Rc::clone(&self.inner);
        let parsed = descriptor_from_js(&theme);
        future_to_promise(async move {
            let outcome = match parsed {
                Ok(theme) => match manager.save_theme(&theme).await {
                    Ok(echoed) => json!({ "success": true, "theme": echoed }),
                    Err(err) => json!({ "success": false, "error": err.user_message() }),
                },
                Err(err) => json!({ "success": false, "error": js_error_message(&err) }),
            };
            to_js(&outcome)
        })
    }

    /// Fetch the active theme. Resolves to the theme object or `null`.
    #[wasm_bindgen(js_name = "getActiveTheme")]
    pub fn get_active_theme(&self) -> Promise {
        let manager = Rc::clone(&self.inner);
        future_to_promise(async move {
            match manager.get_active_theme().await {
                Some(theme) => to_js(&theme),
                None => Ok(JsValue::NULL),
            }
        })
    }

    /// Apply the built-in default palette.
    #[wasm_bindgen(js_name = "resetTheme")]
    pub fn reset_theme(&self) {
        self.inner.reset_theme();
    }

    /// The preset catalog as `{ id: { name, ...fields } }`.
    #[wasm_bindgen(js_name = "getPresetThemes")]
    pub fn get_preset_themes(&self) -> Result<JsValue, JsValue> {
        to_js(self.inner.preset_themes())
    }

    /// Apply a preset by id. Returns `false` for an unknown id.
    #[wasm_bindgen(js_name = "applyPreset")]
    pub fn apply_preset(&self, id: &str) -> bool {
        self.inner.apply_preset(id).is_ok()
    }

    /// The embedded page theme without applying it, or `null`.
    #[wasm_bindgen(js_name = "savedTheme")]
    pub fn saved_theme(&self) -> Result<JsValue, JsValue> {
        match self.inner.saved_theme() {
            Some(theme) => to_js(&theme),
            None => Ok(JsValue::NULL),
        }
    }

    /// A decoded cookie value, or `null`.
    #[wasm_bindgen(js_name = "getCookie")]
    pub fn get_cookie(&self, name: &str) -> JsValue {
        self.inner
            .get_cookie(name)
            .map_or(JsValue::NULL, |value| JsValue::from_str(&value))
    }

    /// The `:root { ... }` block applying `theme` would produce.
    #[wasm_bindgen(js_name = "rootCss")]
    pub fn root_css(&self, theme: JsValue) -> Result<String, JsValue> {
        let theme = descriptor_from_js(&theme)?;
        Ok(render_root_css(&theme))
    }
}
