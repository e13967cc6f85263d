use egui::{Color32, Pos2};

use crate::tool::Tool;

/// Style of the stroke a gesture draws
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Brush {
    pub tool: Tool,
    pub color: Color32,
    /// Line thickness in device pixels; the eraser radius derives from it
    pub width: f32,
}

impl Brush {
    pub fn pen(color: Color32, width: f32) -> Self {
        Self {
            tool: Tool::Pen,
            color,
            width,
        }
    }

    pub fn eraser(width: f32) -> Self {
        Self {
            tool: Tool::Eraser,
            color: Color32::TRANSPARENT,
            width,
        }
    }
}

/// Pointer events as the host translates them for the engine
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureEvent {
    /// Pointer went down: a new stroke starts here
    Start { point: Pos2, brush: Brush },
    /// Pointer moved while down
    Update { point: Pos2 },
    /// Pointer went up
    End { point: Pos2 },
    /// The host interrupted the gesture
    Cancel,
}

impl GestureEvent {
    pub fn point(&self) -> Option<Pos2> {
        match *self {
            GestureEvent::Start { point, .. }
            | GestureEvent::Update { point }
            | GestureEvent::End { point } => Some(point),
            GestureEvent::Cancel => None,
        }
    }
}
