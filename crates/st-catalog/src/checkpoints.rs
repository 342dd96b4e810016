//! The legacy global start/finish checkpoint pair.
//!
//! Before the segment catalog existed the app tracked a single hard-coded
//! stretch.  The pair is still honoured as a fallback: the engine tries it
//! before scanning the catalog, and uses it as the effective start/finish
//! when no segment is active.

use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use st_core::Coordinate;

use crate::{CatalogError, CatalogResult};

/// A named point.  Serialized flat: `{ "name": "...", "latitude": .., "longitude": .. }`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Checkpoint {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(flatten)]
    pub position: Coordinate,
}

impl Checkpoint {
    pub fn new(position: Coordinate) -> Self {
        Self { name: None, position }
    }
}

/// Start and finish of the legacy stretch.
#[derive(Clone, Debug, PartialEq)]
pub struct CheckpointPair {
    pub start:  Checkpoint,
    pub finish: Checkpoint,
}

impl CheckpointPair {
    pub fn new(start: Coordinate, finish: Coordinate) -> Self {
        Self {
            start:  Checkpoint::new(start),
            finish: Checkpoint::new(finish),
        }
    }

    /// Straight-line start → finish distance in metres.
    pub fn length_m(&self) -> f64 {
        self.start.position.distance_m(self.finish.position)
    }

    /// Build from a JSON array of at least two checkpoints; the first is the
    /// start, the second the finish, any further entries are ignored.
    pub fn read_json<R: Read>(reader: R) -> CatalogResult<Self> {
        let points: Vec<Checkpoint> = serde_json::from_reader(reader)?;
        let mut iter = points.into_iter();
        let (Some(start), Some(finish)) = (iter.next(), iter.next()) else {
            return Err(CatalogError::Checkpoints(
                "expected at least two checkpoints (start, finish)".into(),
            ));
        };
        for cp in [&start, &finish] {
            cp.position
                .validate()
                .map_err(|e| CatalogError::Checkpoints(e.to_string()))?;
        }
        Ok(Self { start, finish })
    }
}

/// Load a [`CheckpointPair`] from a JSON file.
pub fn load_checkpoints_json(path: &Path) -> CatalogResult<CheckpointPair> {
    let file = std::fs::File::open(path)?;
    CheckpointPair::read_json(file)
}
