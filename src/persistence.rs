use std::io::{Read, Write};

use egui::{Color32, Pos2};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::stroke::Stroke;
use crate::util::time;

/// Version written into every saved document
pub const DOCUMENT_VERSION: u32 = 1;

/// Errors that can occur while saving or loading strokes
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("Failed to serialize strokes: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Unsupported document version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },
}

/// Result type for persistence operations
pub type PersistenceResult<T> = Result<T, PersistenceError>;

/// What a host needs to store for one stroke.
///
/// Ids, bounds and paths are not stored: they are regenerated on load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrokeRecord {
    pub points: Vec<Pos2>,
    pub color: Color32,
    pub width: f32,
}

impl StrokeRecord {
    pub fn from_stroke(stroke: &Stroke) -> Self {
        Self {
            points: stroke.points().to_vec(),
            color: stroke.color(),
            width: stroke.width(),
        }
    }

    /// Rehydrate into a pen stroke with a fresh id. `None` without points.
    pub fn into_stroke(self) -> Option<Stroke> {
        Stroke::from_points(self.points, self.color, self.width)
    }
}

impl From<&Stroke> for StrokeRecord {
    fn from(stroke: &Stroke) -> Self {
        Self::from_stroke(stroke)
    }
}

/// A serializable list of strokes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanvasDocument {
    pub version: u32,
    /// Seconds since the UNIX epoch when the document was created
    pub timestamp: u64,
    pub strokes: Vec<StrokeRecord>,
}

impl Default for CanvasDocument {
    fn default() -> Self {
        Self {
            version: DOCUMENT_VERSION,
            timestamp: time::timestamp_secs(),
            strokes: Vec::new(),
        }
    }
}

impl CanvasDocument {
    /// Records for `strokes`. Eraser strokes are left out.
    pub fn from_strokes<'a>(strokes: impl IntoIterator<Item = &'a Stroke>) -> Self {
        Self {
            strokes: strokes
                .into_iter()
                .filter(|stroke| !stroke.is_eraser())
                .map(StrokeRecord::from_stroke)
                .collect(),
            ..Self::default()
        }
    }

    pub fn to_json(&self) -> PersistenceResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> PersistenceResult<Self> {
        let document: Self = serde_json::from_str(json)?;
        document.check_version()
    }

    pub fn write_to(&self, writer: impl Write) -> PersistenceResult<()> {
        serde_json::to_writer(writer, self)?;
        Ok(())
    }

    pub fn read_from(reader: impl Read) -> PersistenceResult<Self> {
        let document: Self = serde_json::from_reader(reader)?;
        document.check_version()
    }

    /// Rehydrated strokes, skipping records without points
    pub fn to_strokes(&self) -> Vec<Stroke> {
        self.strokes
            .iter()
            .cloned()
            .filter_map(StrokeRecord::into_stroke)
            .collect()
    }

    fn check_version(self) -> PersistenceResult<Self> {
        if self.version > DOCUMENT_VERSION {
            return Err(PersistenceError::UnsupportedVersion {
                found: self.version,
                expected: DOCUMENT_VERSION,
            });
        }
        Ok(self)
    }
}
