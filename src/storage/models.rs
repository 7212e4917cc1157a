use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumIter, EnumString, IntoEnumIterator};

/// 持久化文档：link id -> LinkRecord
pub type LinkMap = HashMap<String, LinkRecord>;

/// One smart link as stored in the links document.
///
/// Field names follow the document format already on disk (`platformClicks`,
/// `created`), so documents written by earlier deployments load unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkRecord {
    pub id: String,
    pub title: String,
    pub artist: String,
    pub platforms: BTreeMap<String, String>,
    #[serde(default)]
    pub clicks: u64,
    #[serde(default)]
    pub platform_clicks: BTreeMap<String, u64>,
    pub created: DateTime<Utc>,
}

impl LinkRecord {
    pub fn new(
        id: String,
        title: String,
        artist: String,
        platforms: BTreeMap<String, String>,
    ) -> Self {
        Self {
            id,
            title,
            artist,
            platforms,
            clicks: 0,
            platform_clicks: BTreeMap::new(),
            created: Utc::now(),
        }
    }

    /// Whether `platform` is one of the destinations this link offers.
    pub fn offers(&self, platform: &str) -> bool {
        self.platforms.contains_key(platform)
    }

    pub fn platform_click_count(&self, platform: &str) -> u64 {
        self.platform_clicks.get(platform).copied().unwrap_or(0)
    }
}

/// Streaming platforms a link may point to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumString, AsRefStr)]
pub enum Platform {
    Spotify,
    #[strum(serialize = "Apple Music")]
    AppleMusic,
    #[strum(serialize = "YouTube Music")]
    YouTubeMusic,
    #[strum(serialize = "Amazon Music")]
    AmazonMusic,
    Deezer,
    Tidal,
    SoundCloud,
    Bandcamp,
    #[strum(serialize = "iTunes")]
    ITunes,
}

impl Platform {
    /// Look up a platform by its display name (exact match).
    pub fn from_name(name: &str) -> Option<Self> {
        name.parse().ok()
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Spotify => "Spotify",
            Self::AppleMusic => "Apple Music",
            Self::YouTubeMusic => "YouTube Music",
            Self::AmazonMusic => "Amazon Music",
            Self::Deezer => "Deezer",
            Self::Tidal => "Tidal",
            Self::SoundCloud => "SoundCloud",
            Self::Bandcamp => "Bandcamp",
            Self::ITunes => "iTunes",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Self::Spotify => "🎵",
            Self::AppleMusic | Self::ITunes => "🍎",
            Self::YouTubeMusic => "▶️",
            Self::AmazonMusic => "📦",
            Self::Deezer => "🎶",
            Self::Tidal => "🌊",
            Self::SoundCloud => "☁️",
            Self::Bandcamp => "🎸",
        }
    }

    /// Icon for an arbitrary stored platform name, falling back to a note.
    pub fn icon_for(name: &str) -> &'static str {
        Self::from_name(name).map_or("🎵", |p| p.icon())
    }

    pub fn all_names() -> Vec<&'static str> {
        Self::iter().map(|p| p.name()).collect()
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_names_round_trip() {
        for p in Platform::iter() {
            assert_eq!(Platform::from_name(p.name()), Some(p));
            assert_eq!(p.as_ref(), p.name());
        }
        assert_eq!(Platform::all_names().len(), 9);
    }

    #[test]
    fn test_platform_lookup_is_exact() {
        assert_eq!(Platform::from_name("Apple Music"), Some(Platform::AppleMusic));
        assert_eq!(Platform::from_name("apple music"), None);
        assert_eq!(Platform::from_name("Napster"), None);
        assert_eq!(Platform::icon_for("Napster"), "🎵");
        assert_eq!(Platform::icon_for("Tidal"), "🌊");
    }

    #[test]
    fn test_record_reads_legacy_document_entry() {
        // 旧版本写入的记录没有 platformClicks 字段
        let json = r#"{
            "id": "1a2b3c4d",
            "title": "Song A",
            "artist": "Artist A",
            "platforms": {"Spotify": "https://open.spotify.com/x"},
            "clicks": 7,
            "created": "2024-05-01T12:30:00.000Z"
        }"#;
        let record: LinkRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.clicks, 7);
        assert!(record.platform_clicks.is_empty());
        assert!(record.offers("Spotify"));
        assert_eq!(record.platform_click_count("Spotify"), 0);
    }

    #[test]
    fn test_record_serializes_camel_case() {
        let mut platforms = BTreeMap::new();
        platforms.insert("Deezer".to_string(), "https://deezer.com/x".to_string());
        let mut record = LinkRecord::new(
            "abc".into(),
            "T".into(),
            "A".into(),
            platforms,
        );
        record.platform_clicks.insert("Deezer".into(), 2);
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["platformClicks"]["Deezer"], 2);
        assert!(value.get("created").is_some());
        assert!(value.get("platform_clicks").is_none());
    }
}
