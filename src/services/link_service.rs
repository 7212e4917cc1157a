//! Link management service
//!
//! Business rules on top of [`LinkStore`]: request validation, collision-free
//! id generation, the malformed-input policy for ids and platform names, and
//! administrative export/import. Shared by the HTTP edge and the CLI.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::LinksConfig;
use crate::errors::{Result, SmartlinkError};
use crate::storage::{ClickOutcome, LinkMap, LinkRecord, LinkStore, Platform};
use crate::utils::url_validator::validate_destination_url;
use crate::utils::{checked_id, checked_platform, generate_random_code, is_valid_link_id};

// ============ Request/Response DTOs ============

/// Request to create a new smart link
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateLinkRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub artist: String,
    /// Platform display name -> destination URL
    #[serde(default)]
    pub platforms: BTreeMap<String, String>,
}

/// What happened to a platform click report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackOutcome {
    Recorded,
    /// No link with that id; nothing stored.
    UnknownLink,
    /// The link does not offer that platform and the report was dropped.
    Ignored,
}

/// Import conflict resolution mode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportMode {
    /// Skip existing links
    #[default]
    Skip,
    /// Overwrite existing links
    Overwrite,
    /// Report existing links as failures
    Error,
}

impl ImportMode {
    pub fn from_overwrite_flag(overwrite: bool) -> Self {
        if overwrite {
            ImportMode::Overwrite
        } else {
            ImportMode::Skip
        }
    }
}

/// Result of import operation
#[derive(Debug, Clone, Default, Serialize)]
pub struct ImportResult {
    pub success: usize,
    pub skipped: usize,
    pub failed: usize,
    pub errors: Vec<ImportError>,
}

/// Single import error
#[derive(Debug, Clone, Serialize)]
pub struct ImportError {
    pub id: String,
    pub message: String,
}

// ============ Id generation ============

/// Source of candidate link ids.
pub trait IdGenerator: Send + Sync {
    fn generate(&self, length: usize) -> String;
}

/// Uniform draw from the 62-character alphanumeric alphabet.
pub struct RandomIdGenerator;

impl IdGenerator for RandomIdGenerator {
    fn generate(&self, length: usize) -> String {
        generate_random_code(length)
    }
}

// ============ LinkService Implementation ============

pub struct LinkService {
    store: Arc<dyn LinkStore>,
    ids: Arc<dyn IdGenerator>,
    config: LinksConfig,
}

impl LinkService {
    pub fn new(store: Arc<dyn LinkStore>, config: LinksConfig) -> Self {
        Self {
            store,
            ids: Arc::new(RandomIdGenerator),
            config,
        }
    }

    /// Swap the id source, e.g. to force collisions in tests.
    pub fn with_id_generator(mut self, ids: Arc<dyn IdGenerator>) -> Self {
        self.ids = ids;
        self
    }

    pub fn store(&self) -> &Arc<dyn LinkStore> {
        &self.store
    }

    pub fn config(&self) -> &LinksConfig {
        &self.config
    }

    /// Check the creation request and normalize the platform map.
    ///
    /// Title and artist are stored exactly as given; only URLs are trimmed.
    fn validate_request(req: &CreateLinkRequest) -> Result<BTreeMap<String, String>> {
        if req.title.trim().is_empty() {
            return Err(SmartlinkError::validation("Title is required"));
        }
        if req.artist.trim().is_empty() {
            return Err(SmartlinkError::validation("Artist is required"));
        }
        if req.platforms.is_empty() {
            return Err(SmartlinkError::validation(
                "At least one platform is required",
            ));
        }

        let mut platforms = BTreeMap::new();
        for (name, url) in &req.platforms {
            let platform = Platform::from_name(name).ok_or_else(|| {
                SmartlinkError::validation(format!(
                    "Unsupported platform '{}'. Valid: {}",
                    name,
                    Platform::all_names().join(", ")
                ))
            })?;
            let url = validate_destination_url(platform.name(), url)?;
            platforms.insert(platform.name().to_string(), url.to_string());
        }
        Ok(platforms)
    }

    // ============ Core Operations ============

    /// Create a new smart link with a freshly drawn id.
    ///
    /// The store's insert refuses taken ids inside its own locked cycle, so a
    /// collision is detected atomically and answered with a new draw.
    pub async fn create_link(&self, req: CreateLinkRequest) -> Result<LinkRecord> {
        let platforms = Self::validate_request(&req)?;
        let length = self.config.effective_id_length();

        for attempt in 1..=self.config.max_id_attempts.max(1) {
            let id = self.ids.generate(length);
            if !is_valid_link_id(&id) {
                warn!("Id generator produced unusable id {:?}, redrawing", id);
                continue;
            }

            let record = LinkRecord::new(
                id.clone(),
                req.title.clone(),
                req.artist.clone(),
                platforms.clone(),
            );

            match self.store.insert(record.clone()).await {
                Ok(()) => {
                    info!(
                        "LinkService: created link '{}' for \"{}\" by \"{}\" ({} platforms)",
                        id,
                        record.title,
                        record.artist,
                        record.platforms.len()
                    );
                    return Ok(record);
                }
                Err(SmartlinkError::AlreadyExists(_)) => {
                    debug!("Link id collision on '{}' (attempt {})", id, attempt);
                }
                Err(e) => return Err(e),
            }
        }

        Err(SmartlinkError::id_exhausted(format!(
            "No free link ID after {} attempts",
            self.config.max_id_attempts.max(1)
        )))
    }

    /// Every link, newest first.
    pub async fn list_links(&self) -> Result<Vec<LinkRecord>> {
        let mut links: Vec<LinkRecord> = self.store.load_all().await?.into_values().collect();
        links.sort_by(|a, b| b.created.cmp(&a.created).then_with(|| a.id.cmp(&b.id)));
        Ok(links)
    }

    /// The whole document, keyed by id.
    pub async fn links_document(&self) -> Result<LinkMap> {
        self.store.load_all().await
    }

    /// Look up one link; ids that do not survive sanitizing are rejected.
    pub async fn get_link(&self, raw_id: &str) -> Result<LinkRecord> {
        let id = checked_id(raw_id)?;
        self.store
            .get(id)
            .await?
            .ok_or_else(|| SmartlinkError::not_found(format!("Link {} not found", id)))
    }

    /// Count one landing-page view. Unknown ids are a no-op.
    pub async fn record_view(&self, raw_id: &str) -> Result<ClickOutcome> {
        let id = checked_id(raw_id)?;
        let outcome = self.store.increment_clicks(id).await?;
        if outcome == ClickOutcome::UnknownLink {
            debug!("View for unknown link '{}' ignored", id);
        }
        Ok(outcome)
    }

    /// Count one platform button click.
    ///
    /// Malformed ids or platform names are rejected. Unknown ids are a silent
    /// no-op. A platform the link never offered is anomalous: it is logged
    /// and, depending on `links.reject_unknown_platform_clicks`, either
    /// recorded anyway or dropped.
    pub async fn track_platform_click(
        &self,
        raw_id: &str,
        raw_platform: &str,
    ) -> Result<TrackOutcome> {
        let id = checked_id(raw_id)?;
        let platform = checked_platform(raw_platform)?;

        let Some(record) = self.store.get(id).await? else {
            debug!("Platform click for unknown link '{}' ignored", id);
            return Ok(TrackOutcome::UnknownLink);
        };

        if !record.offers(platform) {
            if self.config.reject_unknown_platform_clicks {
                warn!(
                    "Dropped click for platform '{}' not offered by link '{}'",
                    platform, id
                );
                return Ok(TrackOutcome::Ignored);
            }
            warn!(
                "Recording click for platform '{}' not offered by link '{}'",
                platform, id
            );
        }

        match self.store.increment_platform_click(id, platform).await? {
            ClickOutcome::Recorded => Ok(TrackOutcome::Recorded),
            ClickOutcome::UnknownLink => Ok(TrackOutcome::UnknownLink),
        }
    }

    // ============ Administrative Operations ============

    pub async fn delete_link(&self, raw_id: &str) -> Result<LinkRecord> {
        let id = checked_id(raw_id)?;
        let removed = self.store.remove(id).await?;
        info!("LinkService: deleted '{}'", id);
        Ok(removed)
    }

    /// Serialize the whole document in the on-disk format.
    pub async fn export_links(&self) -> Result<String> {
        let links = self.store.load_all().await?;
        Ok(serde_json::to_string_pretty(&links)?)
    }

    /// Check an imported record. Platform names only need to be well formed:
    /// documents from older deployments may name platforms outside the catalogue.
    fn validate_imported(key: &str, record: &mut LinkRecord) -> Result<()> {
        checked_id(key)?;
        if record.id.is_empty() {
            record.id = key.to_string();
        }
        if record.id != key {
            return Err(SmartlinkError::validation(format!(
                "Record id '{}' does not match its key",
                record.id
            )));
        }
        if record.title.trim().is_empty() || record.artist.trim().is_empty() {
            return Err(SmartlinkError::validation("Title and artist are required"));
        }
        if record.platforms.is_empty() {
            return Err(SmartlinkError::validation(
                "At least one platform is required",
            ));
        }
        for (name, url) in &record.platforms {
            checked_platform(name)?;
            validate_destination_url(name, url)?;
        }
        for name in record.platform_clicks.keys() {
            checked_platform(name)?;
        }
        Ok(())
    }

    /// Merge an exported document into the store.
    pub async fn import_links(&self, document: LinkMap, mode: ImportMode) -> Result<ImportResult> {
        let mut result = ImportResult::default();

        let mut entries: Vec<(String, LinkRecord)> = document.into_iter().collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));

        for (key, mut record) in entries {
            if let Err(e) = Self::validate_imported(&key, &mut record) {
                result.failed += 1;
                result.errors.push(ImportError {
                    id: key,
                    message: e.message().to_string(),
                });
                continue;
            }

            let outcome = match mode {
                ImportMode::Overwrite => self.store.upsert(record).await.map(|()| true),
                ImportMode::Skip | ImportMode::Error => match self.store.insert(record).await {
                    Ok(()) => Ok(true),
                    Err(SmartlinkError::AlreadyExists(msg)) if mode == ImportMode::Error => {
                        Err(SmartlinkError::AlreadyExists(msg))
                    }
                    Err(SmartlinkError::AlreadyExists(_)) => Ok(false),
                    Err(e) => Err(e),
                },
            };

            match outcome {
                Ok(true) => result.success += 1,
                Ok(false) => result.skipped += 1,
                Err(e) if e.is_client_error() => {
                    result.failed += 1;
                    result.errors.push(ImportError {
                        id: key,
                        message: e.message().to_string(),
                    });
                }
                Err(e) => return Err(e),
            }
        }

        info!(
            "LinkService: import finished ({} imported, {} skipped, {} failed)",
            result.success, result.skipped, result.failed
        );
        Ok(result)
    }
}
