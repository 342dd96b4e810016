//! Catalog loaders.
//!
//! # JSON format
//!
//! An array of segment objects in catalog order, the shape the mobile app
//! ships as its static segment list:
//!
//! ```json
//! [
//!   {
//!     "road": "E18",
//!     "name": "Sandvika - Lysaker",
//!     "start":  { "latitude": 59.8890, "longitude": 10.5226 },
//!     "finish": { "latitude": 59.9130, "longitude": 10.6375 },
//!     "radiusMeters": 40
//!   }
//! ]
//! ```
//!
//! `radiusMeters` and `path` are optional.
//!
//! # CSV format
//!
//! One row per segment, header required, empty `radius_m` means default:
//!
//! ```csv
//! road,name,start_lat,start_lon,finish_lat,finish_lon,radius_m
//! E18,Sandvika - Lysaker,59.8890,10.5226,59.9130,10.6375,40
//! Rv4,Grorud - Sinsen,59.9610,10.8810,59.9370,10.7780,
//! ```
//!
//! Both loaders validate through [`SegmentCatalog::new`], so duplicate keys
//! fail at load time.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use st_core::Coordinate;

use crate::{CatalogResult, Segment, SegmentCatalog};

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct SegmentRecord {
    road:       String,
    name:       String,
    start_lat:  f64,
    start_lon:  f64,
    finish_lat: f64,
    finish_lon: f64,
    radius_m:   Option<f64>,
}

impl From<SegmentRecord> for Segment {
    fn from(r: SegmentRecord) -> Self {
        Segment {
            road:          r.road,
            name:          r.name,
            start:         Coordinate::new(r.start_lat, r.start_lon),
            finish:        Coordinate::new(r.finish_lat, r.finish_lon),
            radius_meters: r.radius_m,
            path:          None,
        }
    }
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load a catalog from a JSON file.
pub fn load_catalog_json(path: &Path) -> CatalogResult<SegmentCatalog> {
    let file = std::fs::File::open(path)?;
    let catalog = read_catalog_json(file)?;
    log::info!("loaded {} segments from {}", catalog.len(), path.display());
    Ok(catalog)
}

/// Like [`load_catalog_json`] but accepts any `Read` source.
pub fn read_catalog_json<R: Read>(reader: R) -> CatalogResult<SegmentCatalog> {
    let segments: Vec<Segment> = serde_json::from_reader(reader)?;
    SegmentCatalog::new(segments)
}

/// Load a catalog from a CSV file.
pub fn load_catalog_csv(path: &Path) -> CatalogResult<SegmentCatalog> {
    let file = std::fs::File::open(path)?;
    let catalog = read_catalog_csv(file)?;
    log::info!("loaded {} segments from {}", catalog.len(), path.display());
    Ok(catalog)
}

/// Like [`load_catalog_csv`] but accepts any `Read` source.
///
/// Useful for testing (pass a `std::io::Cursor` or a `&[u8]`).
pub fn read_catalog_csv<R: Read>(reader: R) -> CatalogResult<SegmentCatalog> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let segments = csv_reader
        .deserialize::<SegmentRecord>()
        .map(|row| row.map(Segment::from))
        .collect::<Result<Vec<_>, csv::Error>>()?;
    SegmentCatalog::new(segments)
}
