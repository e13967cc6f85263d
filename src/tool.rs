use serde::{Deserialize, Serialize};

/// What a gesture does to the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Tool {
    /// Freehand ink
    #[default]
    Pen,
    /// Removes ink within the eraser radius
    Eraser,
}

impl Tool {
    pub fn name(&self) -> &'static str {
        match self {
            Tool::Pen => "Pen",
            Tool::Eraser => "Eraser",
        }
    }

    pub fn is_eraser(&self) -> bool {
        matches!(self, Tool::Eraser)
    }
}
