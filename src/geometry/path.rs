use egui::Pos2;

/// One drawing instruction of a polyline path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo(Pos2),
    LineTo(Pos2),
}

impl PathCommand {
    pub fn point(&self) -> Pos2 {
        match *self {
            PathCommand::MoveTo(p) | PathCommand::LineTo(p) => p,
        }
    }
}

/// Renderable polyline derived from a stroke's sampled points.
///
/// Never the source of truth: it can always be rebuilt from the points.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InkPath {
    commands: Vec<PathCommand>,
}

impl InkPath {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a polyline: move to the first point, then a line to each
    /// subsequent one. A single point gives a lone move-to.
    pub fn from_points(points: &[Pos2]) -> Self {
        let mut path = Self {
            commands: Vec::with_capacity(points.len()),
        };
        for &point in points {
            path.line_to(point);
        }
        path
    }

    /// Extend the path to `point`. Starts the path if it is still empty.
    pub fn line_to(&mut self, point: Pos2) {
        let command = if self.commands.is_empty() {
            PathCommand::MoveTo(point)
        } else {
            PathCommand::LineTo(point)
        };
        self.commands.push(command);
    }

    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    pub fn points(&self) -> impl Iterator<Item = Pos2> + '_ {
        self.commands.iter().map(PathCommand::point)
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handles_zero_one_and_many_points() {
        assert!(InkPath::from_points(&[]).is_empty());

        let single = InkPath::from_points(&[Pos2::new(1.0, 2.0)]);
        assert_eq!(single.commands(), &[PathCommand::MoveTo(Pos2::new(1.0, 2.0))]);

        let many = InkPath::from_points(&[Pos2::new(0.0, 0.0), Pos2::new(1.0, 0.0), Pos2::new(1.0, 1.0)]);
        assert_eq!(
            many.commands(),
            &[
                PathCommand::MoveTo(Pos2::new(0.0, 0.0)),
                PathCommand::LineTo(Pos2::new(1.0, 0.0)),
                PathCommand::LineTo(Pos2::new(1.0, 1.0)),
            ]
        );
    }

    #[test]
    fn incremental_line_to_matches_rebuild() {
        let points = [Pos2::new(0.0, 0.0), Pos2::new(5.0, 5.0), Pos2::new(9.0, 1.0)];
        let mut path = InkPath::new();
        for &p in &points {
            path.line_to(p);
        }
        assert_eq!(path, InkPath::from_points(&points));
    }
}
