//! Destination URL checks for platform entries
//!
//! Landing pages put these URLs straight into `href`, so escaping alone is not
//! enough: a `javascript:` URL survives HTML escaping intact.

use url::Url;

use crate::errors::{Result, SmartlinkError};

const ALLOWED_SCHEMES: &[&str] = &["http", "https"];

/// Validate the destination URL of one platform entry.
///
/// Returns the trimmed URL as it should be stored.
pub fn validate_destination_url<'a>(platform: &str, url: &'a str) -> Result<&'a str> {
    let trimmed = url.trim();
    if trimmed.is_empty() {
        return Err(SmartlinkError::validation(format!(
            "URL for {} cannot be empty",
            platform
        )));
    }

    let parsed = Url::parse(trimmed).map_err(|e| {
        SmartlinkError::validation(format!("Invalid URL for {}: {}", platform, e))
    })?;

    if !ALLOWED_SCHEMES.contains(&parsed.scheme()) {
        return Err(SmartlinkError::validation(format!(
            "URL for {} must start with http:// or https:// (got {}:)",
            platform,
            parsed.scheme()
        )));
    }

    if parsed.host_str().is_none_or(str::is_empty) {
        return Err(SmartlinkError::validation(format!(
            "URL for {} has no host",
            platform
        )));
    }

    Ok(trimmed)
}
