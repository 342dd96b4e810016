//! `st-catalog`: the static inputs of the tracking engine.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                 |
//! |-----------------|----------------------------------------------------------|
//! | [`segment`]     | `Segment`, `SegmentKey`, `SegmentId`                     |
//! | [`catalog`]     | `SegmentCatalog` (validated, ordered), `ScanStrategy`    |
//! | [`index`]       | `StartIndex`: R-tree over segment start points           |
//! | [`loader`]      | JSON / CSV catalog loaders                               |
//! | [`paths`]       | `PathCache`: display polylines keyed by road and name   |
//! | [`limits`]      | `LimitsTable`, `SegmentLimits` sidecar                   |
//! | [`checkpoints`] | `CheckpointPair` for legacy single-segment mode          |
//! | [`error`]       | `CatalogError`, `CatalogResult<T>`                       |
//!
//! # Ordering
//!
//! Catalog order is significant: when several start geofences overlap, the
//! engine picks the segment that appears first.  Loaders preserve file order
//! and [`SegmentCatalog`] never reorders.

pub mod catalog;
pub mod checkpoints;
pub mod error;
pub mod index;
pub mod limits;
pub mod loader;
pub mod paths;
pub mod segment;

#[cfg(test)]
mod tests;

pub use catalog::{ScanStrategy, SegmentCatalog};
pub use checkpoints::{load_checkpoints_json, Checkpoint, CheckpointPair};
pub use error::{CatalogError, CatalogResult};
pub use index::StartIndex;
pub use limits::{LimitsTable, SegmentLimits};
pub use loader::{load_catalog_csv, load_catalog_json, read_catalog_csv, read_catalog_json};
pub use paths::PathCache;
pub use segment::{Segment, SegmentId, SegmentKey};
