//! The immutable song dataset.

use std::path::Path;

use crate::error::DatasetError;
use crate::record::{Record, RecordId};

/// Closed numeric interval `[min, max]` observed over a column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extent {
    /// Smallest value.
    pub min: f64,
    /// Largest value.
    pub max: f64,
}

impl Extent {
    /// `max - min`.
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Smallest extent covering every value, `None` for an empty iterator.
    pub fn of(values: impl IntoIterator<Item = f64>) -> Option<Extent> {
        values.into_iter().fold(None, |acc, v| {
            Some(match acc {
                None => Extent { min: v, max: v },
                Some(e) => Extent {
                    min: e.min.min(v),
                    max: e.max.max(v),
                },
            })
        })
    }
}

/// Every record of the session, in load order.
///
/// Loaded once and never mutated; [`RecordId`] is the index into this list.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<Record>,
}

impl Dataset {
    /// Wrap already-parsed records.
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    /// Parse a JSON array of records.
    pub fn from_json_str(json: &str) -> Result<Self, DatasetError> {
        let records: Vec<Record> = serde_json::from_str(json)?;
        Ok(Self::new(records))
    }

    /// Read and parse a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        let path = path.as_ref();
        let json =
            std::fs::read_to_string(path).map_err(|e| DatasetError::read_file(path, e))?;
        Self::from_json_str(&json)
    }

    /// Record by id.
    pub fn get(&self, id: RecordId) -> Option<&Record> {
        self.records.get(id.index())
    }

    /// All records in load order.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// `(id, record)` pairs in load order.
    pub fn iter(&self) -> impl Iterator<Item = (RecordId, &Record)> {
        self.records
            .iter()
            .enumerate()
            .map(|(i, r)| (RecordId::from_index(i), r))
    }

    /// All ids in load order.
    pub fn ids(&self) -> impl Iterator<Item = RecordId> + '_ {
        (0..self.records.len()).map(RecordId::from_index)
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when the dataset has no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Extents of the two projection coordinates over records that have one.
    pub fn projection_extent(&self) -> Option<(Extent, Extent)> {
        let xs = Extent::of(self.records.iter().filter_map(|r| r.projection.map(|p| p.0)))?;
        let ys = Extent::of(self.records.iter().filter_map(|r| r.projection.map(|p| p.1)))?;
        Some((xs, ys))
    }

    /// Extent of the stream counts.
    pub fn streams_extent(&self) -> Option<Extent> {
        Extent::of(self.records.iter().filter_map(|r| r.streams))
    }
}
