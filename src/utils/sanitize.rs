//! Allow-list sanitizing and HTML escaping
//!
//! Sanitizing decides whether an untrusted value may be used as a storage key
//! or identity. Escaping makes text safe inside HTML markup. They are separate
//! operations and are never substituted for each other: stored values are
//! never escaped, and escaped values are never used as keys.

use crate::errors::{Result, SmartlinkError};

/// Longest platform name accepted from a click report.
pub const MAX_PLATFORM_NAME_LEN: usize = 50;

#[inline]
fn is_id_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-'
}

#[inline]
fn is_platform_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, ' ' | '_' | '.' | '-')
}

/// Strip every character outside `[A-Za-z0-9-]`.
pub fn sanitize_id(raw: &str) -> String {
    raw.chars().filter(|&c| is_id_char(c)).collect()
}

/// Strip every character outside `[A-Za-z0-9 _.-]`.
pub fn sanitize_platform(raw: &str) -> String {
    raw.chars().filter(|&c| is_platform_char(c)).collect()
}

/// True when `raw` is non-empty and already sanitized.
#[inline]
pub fn is_valid_link_id(raw: &str) -> bool {
    !raw.is_empty() && raw.chars().all(is_id_char)
}

/// Accept a link id only when sanitizing leaves it unchanged.
///
/// A value that would be altered by sanitizing is rejected outright instead of
/// being silently cleaned, so `ab<c` can never resolve to `abc`.
pub fn checked_id(raw: &str) -> Result<&str> {
    if raw.is_empty() {
        return Err(SmartlinkError::malformed_input("Link ID is empty"));
    }
    if sanitize_id(raw) != raw {
        return Err(SmartlinkError::malformed_input("Invalid link ID format"));
    }
    Ok(raw)
}

/// Same policy as [`checked_id`] for platform names, plus a length cap.
pub fn checked_platform(raw: &str) -> Result<&str> {
    if raw.is_empty() {
        return Err(SmartlinkError::malformed_input("Platform is empty"));
    }
    if raw.len() > MAX_PLATFORM_NAME_LEN {
        return Err(SmartlinkError::malformed_input(format!(
            "Platform name longer than {} characters",
            MAX_PLATFORM_NAME_LEN
        )));
    }
    if sanitize_platform(raw) != raw {
        return Err(SmartlinkError::malformed_input("Invalid platform format"));
    }
    Ok(raw)
}

/// Five-entity HTML substitution.
pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len() + raw.len() / 8);
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(c),
        }
    }
    out
}
