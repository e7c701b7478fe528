//! Seed snapshot ingestion
//!
//! Builds the store's mappings from a JSON document of festivals with
//! embedded lineups. Artists embedded in several festivals are reconciled
//! into a single pooled artist, by id when the record carries one and by
//! name otherwise.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use indexmap::{IndexMap, IndexSet};
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info};

use super::festival_store::{Catalog, FestivalStore};
use crate::models::{Artist, Festival};

/// Errors raised while reading a seed snapshot
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("failed to read snapshot {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse snapshot {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Counts reported after a successful load
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadSummary {
    pub festivals: usize,
    pub artists: usize,
}

#[derive(Debug, Default, Deserialize)]
pub struct SeedDocument {
    #[serde(default)]
    pub festivals: Option<Vec<SeedFestival>>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SeedFestival {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub place: String,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(with = "rust_decimal::serde::arbitrary_precision_option", default)]
    pub price: Option<Decimal>,
    #[serde(default)]
    pub photos: Option<Vec<String>>,
    #[serde(default)]
    pub lineup: Option<Vec<SeedArtist>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedArtist {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub photo_url: Option<String>,
    #[serde(default)]
    pub genre: Option<String>,
}

impl SeedArtist {
    fn to_artist(&self, id: i64) -> Artist {
        Artist::new(id, self.name.clone(), self.photo_url.clone(), self.genre.clone())
    }
}

impl SeedDocument {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

impl FestivalStore {
    /// Load the snapshot at `path`.
    ///
    /// Returns `Ok(None)` when the file does not exist or holds no festival
    /// list; the store is left untouched in that case.
    pub fn load_snapshot(&self, path: &Path) -> Result<Option<LoadSummary>, LoadError> {
        if !path.exists() {
            info!("No snapshot at {:?}, starting with an empty catalog", path);
            return Ok(None);
        }

        let content = std::fs::read_to_string(path).map_err(|source| LoadError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let document = SeedDocument::from_json(&content).map_err(|source| LoadError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        let summary = self.load_document(document);
        if let Some(summary) = summary {
            info!(
                "Loaded {} festivals and {} artists from {:?}",
                summary.festivals, summary.artists, path
            );
        }
        Ok(summary)
    }

    /// Rebuild both mappings from a parsed document.
    ///
    /// Not additive: whatever the store held before is replaced.
    pub fn load_document(&self, document: SeedDocument) -> Option<LoadSummary> {
        let mut records = document.festivals?;

        let mut artists = self.pool_artists(&mut records);
        if let Some(max_id) = artists.keys().copied().max() {
            self.advance_artist_seq(max_id);
        }

        let mut festivals = IndexMap::new();
        for record in records {
            let id = record.id.unwrap_or_else(|| self.next_festival_id());

            let mut lineup = IndexSet::new();
            for member in record.lineup.iter().flatten() {
                lineup.insert(self.resolve_member(&mut artists, member));
            }

            let festival = Festival {
                id,
                name: record.name,
                place: record.place,
                date: record.date,
                price: record.price,
                photos: record.photos.unwrap_or_default(),
                lineup,
            };
            festivals.insert(id, festival);
        }
        if let Some(max_id) = festivals.keys().copied().max() {
            self.advance_festival_seq(max_id);
        }

        let summary = LoadSummary {
            festivals: festivals.len(),
            artists: artists.len(),
        };
        self.install(Catalog { festivals, artists });
        Some(summary)
    }

    /// Collect every embedded artist into one pool.
    ///
    /// Records with an id keep the first occurrence. Records without one are
    /// bound to a pooled artist of the same name, or to a freshly drawn id;
    /// the bound id is written back so festival construction resolves the
    /// record to the same artist.
    fn pool_artists(&self, records: &mut [SeedFestival]) -> IndexMap<i64, Artist> {
        let mut pool: IndexMap<i64, Artist> = IndexMap::new();

        for member in records.iter_mut().flat_map(|r| r.lineup.iter_mut().flatten()) {
            let id = match member.id {
                Some(id) => id,
                None => match find_by_name(&pool, &member.name) {
                    Some(id) => id,
                    None => self.next_artist_id(),
                },
            };
            member.id = Some(id);
            pool.entry(id).or_insert_with(|| member.to_artist(id));
        }

        pool
    }

    /// Resolve one lineup record to a pooled artist id, minting an artist
    /// when neither its id nor its name is known
    fn resolve_member(&self, pool: &mut IndexMap<i64, Artist>, member: &SeedArtist) -> i64 {
        if let Some(id) = member.id.filter(|id| pool.contains_key(id)) {
            return id;
        }
        if let Some(id) = find_by_name(pool, &member.name) {
            return id;
        }

        // ids drawn before the pool was built may already be taken
        let id = loop {
            let id = self.next_artist_id();
            if !pool.contains_key(&id) {
                break id;
            }
        };
        debug!("Minted artist {} for {:?}", id, member.name);
        pool.insert(id, member.to_artist(id));
        id
    }
}

fn find_by_name(pool: &IndexMap<i64, Artist>, name: &str) -> Option<i64> {
    pool.values().find(|a| a.name == name).map(|a| a.id)
}
