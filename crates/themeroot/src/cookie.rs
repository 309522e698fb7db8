//! Reading a single value out of a `document.cookie` string.
//!
//! The cookie string is a `;`-separated list of `name=value` records.
//! Values are percent-decoded: `%XX` escapes are reversed and must form
//! valid UTF-8, and `+` stays a plus.

use percent_encoding::percent_decode_str;
use thiserror::Error;
use tracing::warn;

/// Error decoding a percent-encoded cookie value.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("Decoded bytes are not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),
}

/// Looks up `name` in a cookie string and returns its decoded value.
///
/// Returns `None` when the string is empty, the name is missing, or the
/// value does not decode to UTF-8 (logged at warn level). The first
/// matching record wins.
///
/// ```rust
/// use themeroot::cookie::cookie_value;
///
/// let jar = "a=1; csrftoken=abc%20def; b=2";
/// assert_eq!(cookie_value(jar, "csrftoken").as_deref(), Some("abc def"));
/// assert_eq!(cookie_value(jar, "sessionid"), None);
/// ```
pub fn cookie_value(cookies: &str, name: &str) -> Option<String> {
    let raw = cookies
        .split(';')
        .map(str::trim)
        .find_map(|record| record.strip_prefix(name)?.strip_prefix('='))?;

    match percent_decode(raw) {
        Ok(value) => Some(value),
        Err(err) => {
            warn!(cookie.name = name, error = %err, "Cookie value could not be decoded");
            None
        }
    }
}

/// Reverses percent-encoding.
///
/// Escapes that are not followed by two hex digits are kept literally.
///
/// # Errors
/// Returns `DecodeError::InvalidUtf8` when the decoded bytes are not UTF-8.
pub fn percent_decode(input: &str) -> Result<String, DecodeError> {
    Ok(percent_decode_str(input).decode_utf8()?.into_owned())
}
