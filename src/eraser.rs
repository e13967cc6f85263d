use egui::Pos2;
use log::trace;
use serde::{Deserialize, Serialize};

use crate::geometry;
use crate::stroke::{Stroke, StrokeId, StrokeRef};

/// Settings for turning an eraser stroke's width into a hit radius.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EraserConfig {
    /// Smallest radius ever used, no matter how thin the eraser is
    pub min_radius: f32,
    /// Fraction of the eraser width used as radius
    pub width_factor: f32,
}

impl Default for EraserConfig {
    fn default() -> Self {
        Self {
            min_radius: Self::MIN_RADIUS_DEFAULT,
            width_factor: Self::WIDTH_FACTOR_DEFAULT,
        }
    }
}

impl EraserConfig {
    pub const MIN_RADIUS_DEFAULT: f32 = 10.0;
    pub const WIDTH_FACTOR_DEFAULT: f32 = 0.9;

    /// Hit radius for an eraser of the given width.
    pub fn radius(&self, width: f32) -> f32 {
        (self.width_factor * width).round().max(self.min_radius)
    }
}

/// Result of running the eraser once against a stroke list.
#[derive(Debug, Clone, Default)]
pub struct EraseOutcome {
    /// The new stroke list, in the original z-order
    pub strokes: Vec<StrokeRef>,
    /// Strokes that were touched and therefore removed or replaced
    pub removed: Vec<StrokeRef>,
    /// Ids of the replacement strokes minted by this pass
    pub added: Vec<StrokeId>,
}

impl EraseOutcome {
    pub fn changed(&self) -> bool {
        !self.removed.is_empty()
    }
}

/// Erase everything within `radius` of `eraser` from `strokes`.
///
/// Untouched strokes are passed through as the same `Arc`. A touched stroke is
/// replaced by one new stroke per surviving run of at least two points; the
/// replacements keep the original's color and width but get new ids.
pub fn erase_at(strokes: &[StrokeRef], eraser: Pos2, radius: f32) -> EraseOutcome {
    let probe = geometry::point_rect(eraser);
    let radius_sq = radius * radius;

    let mut outcome = EraseOutcome {
        strokes: Vec::with_capacity(strokes.len()),
        removed: Vec::new(),
        added: Vec::new(),
    };
    let mut rejected = 0usize;

    for stroke in strokes {
        if stroke.is_eraser() || !geometry::intersects(geometry::inflate(stroke.bounds(), radius), probe) {
            rejected += 1;
            outcome.strokes.push(StrokeRef::clone(stroke));
            continue;
        }

        match surviving_runs(stroke, eraser, radius_sq) {
            None => outcome.strokes.push(StrokeRef::clone(stroke)),
            Some(runs) => {
                trace!("Eraser split stroke {} into {} piece(s)", stroke.id(), runs.len());
                outcome.added.extend(runs.iter().map(|run| run.id()));
                outcome.strokes.extend(runs);
                outcome.removed.push(StrokeRef::clone(stroke));
            }
        }
    }

    trace!(
        "Erase at ({:.1}, {:.1}) r={}: {} rejected by bounds, {} removed",
        eraser.x,
        eraser.y,
        radius,
        rejected,
        outcome.removed.len()
    );

    outcome
}

/// Replacement strokes for `stroke`, or `None` if no point is within reach.
fn surviving_runs(stroke: &Stroke, eraser: Pos2, radius_sq: f32) -> Option<Vec<StrokeRef>> {
    let points = stroke.points();
    let touched = |p: &Pos2| geometry::distance_sq(*p, eraser) <= radius_sq;

    if !points.iter().any(touched) {
        return None;
    }

    let runs = points
        .split(touched)
        .filter(|run| run.len() >= 2)
        .filter_map(|run| Stroke::from_points(run.to_vec(), stroke.color(), stroke.width()))
        .map(Stroke::into_ref)
        .collect();

    Some(runs)
}
