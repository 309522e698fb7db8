//! The page the manager themes.
//!
//! [`Document`] is the seam between the manager and its host: the root
//! element's inline style, the ambient cookie string, and the `data-*`
//! attributes the server rendered onto `<body>`. The browser implementation
//! lives in [`crate::web`]; [`MemoryDocument`] backs tests and server-side
//! use.
//!
//! All methods take `&self`. A browser DOM is shared mutable state by
//! nature, so implementations carry their own interior mutability.

use std::cell::RefCell;
use std::collections::BTreeMap;

use thiserror::Error;

/// The host refused a style write.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("cannot set {property}: {reason}")]
pub struct StyleError {
    pub property: String,
    pub reason: String,
}

impl StyleError {
    pub fn new(property: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            reason: reason.into(),
        }
    }
}

/// Host page access needed by the manager.
pub trait Document {
    /// Sets a custom property on the root element's inline style.
    ///
    /// # Errors
    /// Returns `StyleError` if the host refuses the write.
    fn set_style_property(&self, name: &str, value: &str) -> Result<(), StyleError>;

    /// Reads a custom property from the root element's inline style.
    fn style_property(&self, name: &str) -> Option<String>;

    /// The raw cookie string, or `None` when there is no cookie store.
    fn cookie_string(&self) -> Option<String>;

    /// A `data-*` attribute of `<body>`, keyed by its dataset name.
    fn data_attribute(&self, key: &str) -> Option<String>;
}

/// In-memory [`Document`].
///
/// ```rust
/// use themeroot::{Document, MemoryDocument};
///
/// let doc = MemoryDocument::new().with_cookies("csrftoken=abc");
/// doc.set_style_property("--primary-color", "#fff").unwrap();
/// assert_eq!(doc.style_property("--primary-color").as_deref(), Some("#fff"));
/// ```
#[derive(Debug, Default)]
pub struct MemoryDocument {
    style: RefCell<BTreeMap<String, String>>,
    cookies: Option<String>,
    data: BTreeMap<String, String>,
    read_only: bool,
}

impl MemoryDocument {
    /// An empty page with no cookie store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the cookie string.
    pub fn with_cookies(mut self, cookies: impl Into<String>) -> Self {
        self.cookies = Some(cookies.into());
        self
    }

    /// Sets a `data-*` attribute on the body.
    pub fn with_data(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    /// Makes every style write fail, as a detached or sealed element would.
    pub fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }

    /// Snapshot of every custom property currently set.
    pub fn properties(&self) -> BTreeMap<String, String> {
        self.style.borrow().clone()
    }

    /// Removes every custom property.
    pub fn clear_style(&self) {
        self.style.borrow_mut().clear();
    }
}

impl Document for MemoryDocument {
    fn set_style_property(&self, name: &str, value: &str) -> Result<(), StyleError> {
        if self.read_only {
            return Err(StyleError::new(name, "style is read-only"));
        }
        self.style
            .borrow_mut()
            .insert(name.to_string(), value.to_string());
        Ok(())
    }

    fn style_property(&self, name: &str) -> Option<String> {
        self.style.borrow().get(name).cloned()
    }

    fn cookie_string(&self) -> Option<String> {
        self.cookies.clone()
    }

    fn data_attribute(&self, key: &str) -> Option<String> {
        self.data.get(key).cloned()
    }
}

impl<D: Document + ?Sized> Document for &D {
    fn set_style_property(&self, name: &str, value: &str) -> Result<(), StyleError> {
        (**self).set_style_property(name, value)
    }

    fn style_property(&self, name: &str) -> Option<String> {
        (**self).style_property(name)
    }

    fn cookie_string(&self) -> Option<String> {
        (**self).cookie_string()
    }

    fn data_attribute(&self, key: &str) -> Option<String> {
        (**self).data_attribute(key)
    }
}

impl<D: Document + ?Sized> Document for std::rc::Rc<D> {
    fn set_style_property(&self, name: &str, value: &str) -> Result<(), StyleError> {
        (**self).set_style_property(name, value)
    }

    fn style_property(&self, name: &str) -> Option<String> {
        (**self).style_property(name)
    }

    fn cookie_string(&self) -> Option<String> {
        (**self).cookie_string()
    }

    fn data_attribute(&self, key: &str) -> Option<String> {
        (**self).data_attribute(key)
    }
}
