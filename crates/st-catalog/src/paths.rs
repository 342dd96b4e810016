//! Cached display polylines, keyed by `"{road}|{name}"`.
//!
//! Route-fetch tooling fills this cache from a routing service and writes it
//! next to the catalog; the app merges it into the catalog at startup.  A
//! missing cache file is not an error, it just means no detailed paths yet.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use st_core::Coordinate;

use crate::{CatalogResult, SegmentCatalog, SegmentKey};

/// Minimum number of points for a cached path to be usable.
const MIN_PATH_POINTS: usize = 2;

/// `"{road}|{name}"` → ordered path coordinates.
///
/// Backed by a `BTreeMap` so saved files have a stable key order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PathCache(BTreeMap<String, Vec<Coordinate>>);

impl PathCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the cache at `path`, or an empty cache if the file does not exist.
    pub fn load(path: &Path) -> CatalogResult<Self> {
        if !path.exists() {
            log::debug!("no path cache at {}", path.display());
            return Ok(Self::new());
        }
        let file = std::fs::File::open(path)?;
        let cache: PathCache = serde_json::from_reader(file)?;
        log::info!("loaded {} cached paths from {}", cache.len(), path.display());
        Ok(cache)
    }

    /// Write the cache as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> CatalogResult<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, key: &SegmentKey) -> Option<&[Coordinate]> {
        self.0.get(&key.cache_key()).map(Vec::as_slice)
    }

    /// Store a fetched path.  Paths shorter than two points are rejected and
    /// `false` is returned.
    pub fn insert(&mut self, key: &SegmentKey, path: Vec<Coordinate>) -> bool {
        if path.len() < MIN_PATH_POINTS {
            return false;
        }
        self.0.insert(key.cache_key(), path);
        true
    }

    /// Keys of catalog segments that have no cached path yet, in catalog
    /// order.  Fetch tooling only requests these.
    pub fn missing(&self, catalog: &SegmentCatalog) -> Vec<SegmentKey> {
        catalog
            .segments()
            .iter()
            .filter(|s| !self.0.contains_key(&s.cache_key()))
            .map(|s| s.key())
            .collect()
    }

    /// Attach cached paths to the matching catalog segments.
    ///
    /// Only entries with at least two points are merged.  Returns how many
    /// segments received a path.
    pub fn merge_into(&self, catalog: &mut SegmentCatalog) -> usize {
        let mut merged = 0;
        for segment in catalog.segments_mut() {
            if let Some(path) = self.0.get(&segment.cache_key()) {
                if path.len() >= MIN_PATH_POINTS {
                    segment.path = Some(path.clone());
                    merged += 1;
                }
            }
        }
        merged
    }
}
