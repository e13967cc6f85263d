use std::fmt;
use std::sync::Arc;

use egui::{Color32, Pos2, Rect, Shape};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::geometry::{self, InkPath};

/// Opaque identifier of a stroke. Minted once, never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StrokeId(Uuid);

impl StrokeId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for StrokeId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for StrokeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One continuous pen or eraser gesture: sampled points plus style.
///
/// `bounds` and `path` are derived from `points` and kept private so they can
/// never drift from them.
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    id: StrokeId,
    color: Color32,
    width: f32,
    erase: bool,
    points: Vec<Pos2>,
    bounds: Rect,
    path: InkPath,
}

/// Finalized strokes are immutable and shared between the canvas and history.
pub type StrokeRef = Arc<Stroke>;

impl Stroke {
    /// Start a stroke at `first_point`.
    pub fn new(first_point: Pos2, color: Color32, width: f32, erase: bool) -> Self {
        Self {
            id: StrokeId::new(),
            color,
            width,
            erase,
            points: vec![first_point],
            bounds: geometry::point_rect(first_point),
            path: InkPath::from_points(&[first_point]),
        }
    }

    /// Build a pen stroke from an existing point run, with a fresh id.
    ///
    /// Returns `None` for an empty run since every stroke holds at least one point.
    pub fn from_points(points: Vec<Pos2>, color: Color32, width: f32) -> Option<Self> {
        if points.is_empty() {
            return None;
        }
        Some(Self {
            id: StrokeId::new(),
            color,
            width,
            erase: false,
            bounds: geometry::compute_bounds(&points),
            path: InkPath::from_points(&points),
            points,
        })
    }

    // Create a new reference-counted Stroke
    pub fn into_ref(self) -> StrokeRef {
        Arc::new(self)
    }

    /// Append a sampled point, growing the path and bounds in place.
    pub fn append_point(&mut self, point: Pos2) {
        self.points.push(point);
        self.path.line_to(point);
        self.bounds = geometry::extend_bounds(self.bounds, point);
    }

    /// A copy with `bounds` and `path` recomputed from `points` alone.
    pub fn rebuilt(&self) -> Self {
        Self {
            bounds: geometry::compute_bounds(&self.points),
            path: InkPath::from_points(&self.points),
            ..self.clone()
        }
    }

    pub(crate) fn with_fresh_id(mut self) -> Self {
        self.id = StrokeId::new();
        self
    }

    pub(crate) fn into_pen(mut self) -> Self {
        self.erase = false;
        self
    }

    pub fn id(&self) -> StrokeId {
        self.id
    }

    pub fn color(&self) -> Color32 {
        self.color
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn is_eraser(&self) -> bool {
        self.erase
    }

    pub fn points(&self) -> &[Pos2] {
        &self.points
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn path(&self) -> &InkPath {
        &self.path
    }

    /// Shape for an egui painter. Eraser strokes render as nothing.
    pub fn to_shape(&self) -> Shape {
        if self.erase {
            return Shape::Noop;
        }
        match self.points.as_slice() {
            [] => Shape::Noop,
            [point] => Shape::circle_filled(*point, self.width / 2.0, self.color),
            points => Shape::line(points.to_vec(), egui::Stroke::new(self.width, self.color)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_stroke_is_a_single_point() {
        let stroke = Stroke::new(Pos2::new(4.0, 5.0), Color32::BLACK, 3.0, false);
        assert_eq!(stroke.points(), &[Pos2::new(4.0, 5.0)]);
        assert_eq!(stroke.bounds().min, stroke.bounds().max);
        assert_eq!(stroke.path().len(), 1);
    }

    #[test]
    fn appended_points_match_rebuild() {
        let mut stroke = Stroke::new(Pos2::new(0.0, 0.0), Color32::RED, 2.0, false);
        stroke.append_point(Pos2::new(10.0, -3.0));
        stroke.append_point(Pos2::new(-7.0, 12.0));
        assert_eq!(stroke, stroke.rebuilt());
    }

    #[test]
    fn ids_are_unique() {
        let a = Stroke::new(Pos2::ZERO, Color32::RED, 2.0, false);
        let b = Stroke::new(Pos2::ZERO, Color32::RED, 2.0, false);
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn eraser_strokes_do_not_render() {
        let mut stroke = Stroke::new(Pos2::ZERO, Color32::RED, 20.0, true);
        stroke.append_point(Pos2::new(5.0, 5.0));
        assert!(matches!(stroke.to_shape(), Shape::Noop));
    }
}
