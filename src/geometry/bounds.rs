use egui::{Pos2, Rect};

/// Calculate the bounding box for a set of points.
///
/// An empty slice yields a zero-sized box at the origin rather than
/// `Rect::NOTHING`, so callers always get finite coordinates back.
pub fn compute_bounds(points: &[Pos2]) -> Rect {
    let Some((first, rest)) = points.split_first() else {
        return Rect::from_min_max(Pos2::ZERO, Pos2::ZERO);
    };

    let mut min_x = first.x;
    let mut min_y = first.y;
    let mut max_x = first.x;
    let mut max_y = first.y;

    for point in rest {
        min_x = min_x.min(point.x);
        min_y = min_y.min(point.y);
        max_x = max_x.max(point.x);
        max_y = max_y.max(point.y);
    }

    Rect::from_min_max(Pos2::new(min_x, min_y), Pos2::new(max_x, max_y))
}

/// Grow `bounds` so that it also covers `point`.
///
/// Uses the same min/max folding as [`compute_bounds`], so growing one point at
/// a time ends at exactly the box a full recompute would give.
pub fn extend_bounds(bounds: Rect, point: Pos2) -> Rect {
    Rect::from_min_max(
        Pos2::new(bounds.min.x.min(point.x), bounds.min.y.min(point.y)),
        Pos2::new(bounds.max.x.max(point.x), bounds.max.y.max(point.y)),
    )
}

/// Expand all four edges of `bounds` by `pad`.
pub fn inflate(bounds: Rect, pad: f32) -> Rect {
    Rect::from_min_max(
        Pos2::new(bounds.min.x - pad, bounds.min.y - pad),
        Pos2::new(bounds.max.x + pad, bounds.max.y + pad),
    )
}

/// A zero-sized rectangle sitting on `point`.
pub fn point_rect(point: Pos2) -> Rect {
    Rect::from_min_max(point, point)
}

/// Axis-aligned overlap test. Touching edges count as intersecting.
pub fn intersects(a: Rect, b: Rect) -> bool {
    a.min.x <= b.max.x && b.min.x <= a.max.x && a.min.y <= b.max.y && b.min.y <= a.max.y
}

/// Squared euclidean distance between two points.
#[inline]
pub fn distance_sq(p: Pos2, q: Pos2) -> f32 {
    let dx = p.x - q.x;
    let dy = p.y - q.y;
    dx * dx + dy * dy
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_bounds_sit_at_origin() {
        let rect = compute_bounds(&[]);
        assert_eq!(rect.min, Pos2::ZERO);
        assert_eq!(rect.max, Pos2::ZERO);
    }

    #[test]
    fn bounds_cover_every_point() {
        let points = [Pos2::new(3.0, -2.0), Pos2::new(-1.0, 7.5), Pos2::new(4.0, 0.0)];
        let rect = compute_bounds(&points);
        assert_eq!(rect.min, Pos2::new(-1.0, -2.0));
        assert_eq!(rect.max, Pos2::new(4.0, 7.5));
    }

    #[test]
    fn incremental_bounds_match_full_recompute() {
        let points = [
            Pos2::new(10.0, 10.0),
            Pos2::new(12.5, 3.0),
            Pos2::new(-4.0, 8.0),
            Pos2::new(0.0, 20.0),
        ];
        let mut rect = point_rect(points[0]);
        for &p in &points[1..] {
            rect = extend_bounds(rect, p);
        }
        assert_eq!(rect, compute_bounds(&points));
    }

    #[test]
    fn touching_edges_intersect() {
        let a = Rect::from_min_max(Pos2::new(0.0, 0.0), Pos2::new(10.0, 10.0));
        let b = Rect::from_min_max(Pos2::new(10.0, 10.0), Pos2::new(20.0, 20.0));
        let c = Rect::from_min_max(Pos2::new(10.5, 0.0), Pos2::new(20.0, 10.0));
        assert!(intersects(a, b));
        assert!(!intersects(a, c));
    }

    #[test]
    fn inflate_pads_every_edge() {
        let rect = inflate(point_rect(Pos2::new(5.0, 5.0)), 2.0);
        assert_eq!(rect.min, Pos2::new(3.0, 3.0));
        assert_eq!(rect.max, Pos2::new(7.0, 7.0));
    }

    #[test]
    fn squared_distance() {
        assert_eq!(distance_sq(Pos2::new(0.0, 0.0), Pos2::new(3.0, 4.0)), 25.0);
    }
}
