use crate::stroke::{StrokeId, StrokeRef};
use crate::tool::Tool;

#[derive(Debug, Clone)]
pub enum CanvasEvent {
    /// Coalesced publish of the canvas, at most once per frame
    Changed {
        strokes: Vec<StrokeRef>,
    },
    GestureStarted {
        tool: Tool,
        stroke_id: StrokeId,
    },
    GestureEnded {
        tool: Tool,
        cancelled: bool,
        /// Pre-existing strokes the gesture removed or split
        erased: usize,
    },
    HistoryChanged {
        can_undo: bool,
        can_redo: bool,
    },
}
