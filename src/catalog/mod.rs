// SPDX-License-Identifier: MPL-2.0
//! The static episode catalog shown after every analysis.
//!
//! The catalog is a TOML asset compiled into the binary. It is parsed and
//! validated once at start-up and never changes afterwards, whatever the
//! user uploaded.

use crate::error::{Error, Result};
use rust_embed::RustEmbed;
use serde::Deserialize;
use std::collections::HashSet;
use std::fmt;
use std::path::{Component, Path, PathBuf};

#[derive(RustEmbed)]
#[folder = "assets/catalog/"]
struct CatalogAsset;

const CATALOG_FILE: &str = "episodes.toml";

/// Highest allowed match score.
pub const MAX_MATCH_SCORE: u8 = 100;

/// Display length of an episode, written `m:ss`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(try_from = "String")]
pub struct EpisodeDuration(u32);

impl EpisodeDuration {
    #[must_use]
    pub fn from_secs(secs: u32) -> Self {
        Self(secs)
    }

    #[must_use]
    pub fn as_secs(self) -> u32 {
        self.0
    }
}

impl TryFrom<String> for EpisodeDuration {
    type Error = String;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        value.parse()
    }
}

impl std::str::FromStr for EpisodeDuration {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let invalid = || format!("invalid duration '{s}', expected m:ss");
        let (minutes, seconds) = s.split_once(':').ok_or_else(invalid)?;
        if minutes.is_empty() || seconds.len() != 2 {
            return Err(invalid());
        }
        let minutes: u32 = minutes.parse().map_err(|_| invalid())?;
        let seconds: u32 = seconds.parse().map_err(|_| invalid())?;
        if seconds >= 60 {
            return Err(invalid());
        }
        minutes
            .checked_mul(60)
            .and_then(|total| total.checked_add(seconds))
            .map(Self)
            .ok_or_else(invalid)
    }
}

impl fmt::Display for EpisodeDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{:02}", self.0 / 60, self.0 % 60)
    }
}

/// One entry of the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EpisodeRecord {
    pub id: String,
    pub title: String,
    pub duration: EpisodeDuration,
    /// File name relative to the media directory.
    #[serde(rename = "media")]
    pub media_reference: String,
    pub description: String,
    /// Percentage shown on the card. Descriptive only.
    pub match_score: u8,
}

impl EpisodeRecord {
    /// Absolute location of this episode's media below `media_root`.
    #[must_use]
    pub fn resolve_media(&self, media_root: &Path) -> PathBuf {
        media_root.join(&self.media_reference)
    }
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    episode: Vec<EpisodeRecord>,
}

/// The validated, immutable list of episodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    records: Vec<EpisodeRecord>,
}

impl Catalog {
    /// Loads the catalog compiled into the binary.
    pub fn load_embedded() -> Result<Self> {
        let file = CatalogAsset::get(CATALOG_FILE)
            .ok_or_else(|| Error::Catalog(format!("missing asset {CATALOG_FILE}")))?;
        let source = std::str::from_utf8(file.data.as_ref())
            .map_err(|e| Error::Catalog(format!("{CATALOG_FILE} is not UTF-8: {e}")))?;
        Self::from_toml_str(source)
    }

    /// Parses and validates a catalog document.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let file: CatalogFile =
            toml::from_str(source).map_err(|e| Error::Catalog(e.to_string()))?;
        Self::from_records(file.episode)
    }

    /// Validates `records`: non-empty, unique ids, scores within 0..=100,
    /// media references relative and inside the media directory.
    pub fn from_records(records: Vec<EpisodeRecord>) -> Result<Self> {
        if records.is_empty() {
            return Err(Error::Catalog("catalog has no episodes".into()));
        }

        let mut seen = HashSet::new();
        for record in &records {
            if !seen.insert(record.id.as_str()) {
                return Err(Error::Catalog(format!("duplicate episode id '{}'", record.id)));
            }
            if record.match_score > MAX_MATCH_SCORE {
                return Err(Error::Catalog(format!(
                    "episode '{}' has match score {} above {MAX_MATCH_SCORE}",
                    record.id, record.match_score
                )));
            }
            let reference = Path::new(&record.media_reference);
            let escapes = reference
                .components()
                .any(|c| !matches!(c, Component::Normal(_)));
            if record.media_reference.is_empty() || escapes {
                return Err(Error::Catalog(format!(
                    "episode '{}' has invalid media reference '{}'",
                    record.id, record.media_reference
                )));
            }
        }

        Ok(Self { records })
    }

    #[must_use]
    pub fn records(&self) -> &[EpisodeRecord] {
        &self.records
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&EpisodeRecord> {
        self.records.iter().find(|record| record.id == id)
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, score: u8) -> EpisodeRecord {
        EpisodeRecord {
            id: id.into(),
            title: format!("Episode {id}"),
            duration: EpisodeDuration::from_secs(80),
            media_reference: format!("episode-{id}.mp4"),
            description: String::new(),
            match_score: score,
        }
    }

    #[test]
    fn embedded_catalog_has_five_episodes() {
        let catalog = Catalog::load_embedded().expect("embedded catalog is valid");
        assert_eq!(catalog.len(), 5);

        let first = catalog.get("1").expect("episode 1");
        assert_eq!(first.title, "Episode 1");
        assert_eq!(first.duration.to_string(), "1:20");
        assert_eq!(first.media_reference, "episode-01.mp4");
        assert_eq!(first.match_score, 95);

        let scores: Vec<u8> = catalog.records().iter().map(|r| r.match_score).collect();
        assert_eq!(scores, [95, 87, 82, 78, 76]);
    }

    #[test]
    fn embedded_catalog_is_identical_between_loads() {
        let a = Catalog::load_embedded().expect("catalog");
        let b = Catalog::load_embedded().expect("catalog");
        assert_eq!(a, b);
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let result = Catalog::from_records(vec![record("1", 10), record("1", 20)]);
        assert!(matches!(result, Err(Error::Catalog(msg)) if msg.contains("duplicate")));
    }

    #[test]
    fn out_of_range_score_is_rejected() {
        assert!(Catalog::from_records(vec![record("1", 101)]).is_err());
        assert!(Catalog::from_records(vec![record("1", 100)]).is_ok());
    }

    #[test]
    fn empty_catalog_is_rejected() {
        assert!(Catalog::from_toml_str("").is_err());
    }

    #[test]
    fn escaping_media_reference_is_rejected() {
        let mut bad = record("1", 50);
        bad.media_reference = "../secret.mp4".into();
        assert!(Catalog::from_records(vec![bad]).is_err());

        let mut absolute = record("2", 50);
        absolute.media_reference = "/etc/passwd".into();
        assert!(Catalog::from_records(vec![absolute]).is_err());
    }

    #[test]
    fn malformed_duration_fails_parsing() {
        let doc = r#"
            [[episode]]
            id = "1"
            title = "Episode 1"
            duration = "1:2"
            media = "episode-01.mp4"
            description = ""
            match_score = 10
        "#;
        assert!(matches!(Catalog::from_toml_str(doc), Err(Error::Catalog(_))));
    }

    #[test]
    fn duration_parses_and_displays() {
        let d: EpisodeDuration = "1:33".parse().expect("valid");
        assert_eq!(d.as_secs(), 93);
        assert_eq!(d.to_string(), "1:33");
        assert!("1:60".parse::<EpisodeDuration>().is_err());
        assert!(":30".parse::<EpisodeDuration>().is_err());
        assert!("abc".parse::<EpisodeDuration>().is_err());
    }

    #[test]
    fn oversized_minutes_are_rejected() {
        assert!("4294967295:00".parse::<EpisodeDuration>().is_err());
        assert!("71582789:00".parse::<EpisodeDuration>().is_err());
        assert!("71582788:16".parse::<EpisodeDuration>().is_err());

        let longest: EpisodeDuration = "71582788:15".parse().expect("fits");
        assert_eq!(longest.as_secs(), u32::MAX);
    }

    #[test]
    fn unknown_id_lookup_returns_none() {
        let catalog = Catalog::load_embedded().expect("catalog");
        assert!(catalog.get("42").is_none());
        assert!(!catalog.contains("42"));
    }

    #[test]
    fn media_resolves_below_root() {
        let catalog = Catalog::load_embedded().expect("catalog");
        let record = catalog.get("3").expect("episode 3");
        assert_eq!(
            record.resolve_media(Path::new("/media")),
            PathBuf::from("/media/episode-03.mp4")
        );
    }
}
