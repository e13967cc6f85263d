#![warn(clippy::all, rust_2018_idioms)]

pub mod config;
pub mod engine;
pub mod eraser;
pub mod error;
pub mod event;
pub mod frame;
pub mod geometry;
pub mod history;
pub mod input;
pub mod persistence;
pub mod stroke;
pub mod tool;
pub mod util;

pub use config::EngineConfig;
pub use engine::InkEngine;
pub use eraser::{EraseOutcome, EraserConfig};
pub use error::GestureError;
pub use event::{CanvasEvent, EventBus, EventHandler};
pub use frame::{FrameScheduler, ManualFrames, NoFrames};
pub use history::{CanvasSnapshot, History, HistoryEntry};
pub use input::{Brush, GestureEvent};
pub use persistence::{CanvasDocument, StrokeRecord};
pub use stroke::{Stroke, StrokeId, StrokeRef};
pub use tool::Tool;
