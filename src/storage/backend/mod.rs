//! Storage backends
//!
//! Both backends apply mutations through the same helpers so their behaviour
//! for unknown ids, duplicate inserts and counters stays identical.

mod file;
mod memory;
pub mod retry;

pub use file::FileStore;
pub use memory::MemoryStore;

use tracing::warn;

use super::{ClickOutcome, LinkMap, LinkRecord};
use crate::errors::{Result, SmartlinkError};

pub(crate) fn apply_insert(links: &mut LinkMap, record: LinkRecord) -> Result<()> {
    if links.contains_key(&record.id) {
        return Err(SmartlinkError::already_exists(format!(
            "Link ID '{}' already exists",
            record.id
        )));
    }
    links.insert(record.id.clone(), record);
    Ok(())
}

pub(crate) fn apply_click(links: &mut LinkMap, id: &str) -> ClickOutcome {
    match links.get_mut(id) {
        Some(record) => {
            record.clicks = record.clicks.saturating_add(1);
            ClickOutcome::Recorded
        }
        None => ClickOutcome::UnknownLink,
    }
}

pub(crate) fn apply_platform_click(links: &mut LinkMap, id: &str, platform: &str) -> ClickOutcome {
    match links.get_mut(id) {
        Some(record) => {
            let counter = record
                .platform_clicks
                .entry(platform.to_string())
                .or_insert(0);
            *counter = counter.saturating_add(1);
            ClickOutcome::Recorded
        }
        None => ClickOutcome::UnknownLink,
    }
}

pub(crate) fn apply_remove(links: &mut LinkMap, id: &str) -> Result<LinkRecord> {
    links
        .remove(id)
        .ok_or_else(|| SmartlinkError::not_found(format!("Link {} not found", id)))
}

/// Warn about loaded entries that break the id invariants; they are kept as-is.
pub(crate) fn audit_loaded(links: &LinkMap) {
    for (key, record) in links {
        if !crate::utils::is_valid_link_id(key) {
            warn!("Stored link key {:?} is not a valid link ID", key);
        }
        if &record.id != key {
            warn!(
                "Stored link {:?} carries mismatched id {:?}",
                key, record.id
            );
        }
    }
}
