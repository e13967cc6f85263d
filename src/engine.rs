//! The annotation engine: owns the canvas, its history and the gesture in
//! progress, and turns host commands into canvas mutations.
//!
//! # Gestures
//!
//! - `Start`: snapshot the canvas into a provisional history entry and create
//!   the active stroke.
//! - `Update`: append the sample. An eraser also runs the splitter against
//!   every finalized stroke and replaces the canvas with the result.
//! - `End` / `Cancel`: finalize. A pen stroke joins the canvas, an eraser
//!   stroke is discarded. Either way the provisional entry is sealed with the
//!   resulting canvas, so the whole gesture undoes as one step.
//!
//! # Publishing
//!
//! Mutations only mark the canvas dirty and ask the [`FrameScheduler`] for a
//! frame; [`InkEngine::on_frame`] publishes [`CanvasEvent::Changed`]. Reads
//! such as [`InkEngine::get_paths`] always see the latest state.

use std::collections::HashSet;

use egui::{Color32, Pos2};
use log::{debug, info, trace, warn};

use crate::config::EngineConfig;
use crate::eraser;
use crate::error::GestureError;
use crate::event::{CanvasEvent, EventBus, EventHandler};
use crate::frame::{FrameCoalescer, FrameScheduler};
use crate::history::{CanvasSnapshot, History};
use crate::input::{Brush, GestureEvent};
use crate::persistence::{CanvasDocument, StrokeRecord};
use crate::stroke::{Stroke, StrokeId, StrokeRef};
use crate::tool::Tool;

/// The stroke currently following the pointer
#[derive(Debug)]
struct ActiveGesture {
    tool: Tool,
    stroke: Stroke,
    /// Fragments the eraser created during this gesture
    minted: HashSet<StrokeId>,
}

/// Vector stroke canvas with gesture handling and snapshot undo/redo.
///
/// One engine per canvas; engines share no state.
#[derive(Debug)]
pub struct InkEngine {
    config: EngineConfig,
    /// Finalized strokes in z-order
    strokes: CanvasSnapshot,
    history: History,
    gesture: Option<ActiveGesture>,
    /// Pre-gesture strokes removed or split by the eraser gesture in progress
    erased_originals: Vec<StrokeRef>,
    frames: FrameCoalescer,
    event_bus: EventBus,
}

impl Default for InkEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl InkEngine {
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            history: History::with_limit(config.max_history),
            config,
            strokes: Vec::new(),
            gesture: None,
            erased_originals: Vec::new(),
            frames: FrameCoalescer::default(),
            event_bus: EventBus::new(),
        }
    }

    /// Use `scheduler` to request frames for publishing.
    pub fn with_scheduler(mut self, scheduler: impl FrameScheduler + 'static) -> Self {
        self.frames = FrameCoalescer::new(Box::new(scheduler));
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }

    pub fn subscribe(&self, handler: impl EventHandler + 'static) {
        self.event_bus.subscribe(Box::new(handler));
    }

    // ---- Reads ----

    /// Copy of the canvas, including the stroke of a gesture in progress.
    pub fn get_paths(&self) -> Vec<Stroke> {
        self.strokes
            .iter()
            .map(|stroke| Stroke::clone(stroke))
            .chain(self.gesture.as_ref().map(|gesture| gesture.stroke.clone()))
            .collect()
    }

    /// Number of strokes [`get_paths`](Self::get_paths) would return
    pub fn stroke_count(&self) -> usize {
        self.strokes.len() + usize::from(self.gesture.is_some())
    }

    pub fn is_drawing(&self) -> bool {
        self.gesture.is_some()
    }

    pub fn active_tool(&self) -> Option<Tool> {
        self.gesture.as_ref().map(|gesture| gesture.tool)
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo() || self.is_drawing()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo() && !self.is_drawing()
    }

    /// Strokes that existed before the current eraser gesture and have been
    /// removed or split by it so far. Empty outside an eraser gesture.
    pub fn erased_originals(&self) -> &[StrokeRef] {
        &self.erased_originals
    }

    // ---- Commands ----

    /// Insert a finished stroke as one undoable step.
    ///
    /// The stroke gets a fresh id and its bounds and path are rebuilt from its
    /// points. Eraser strokes are inserted as ink.
    pub fn add_path(&mut self, stroke: Stroke) {
        if let Err(err) = self.try_add_path(stroke) {
            warn!("Ignoring add_path: {err}");
        }
    }

    fn try_add_path(&mut self, stroke: Stroke) -> Result<(), GestureError> {
        if stroke.points().is_empty() {
            return Err(GestureError::EmptyStroke);
        }
        self.finish_active_gesture();

        let stroke = stroke.rebuilt().with_fresh_id().into_pen();
        debug!("Adding stroke {} with {} points", stroke.id(), stroke.points().len());

        let before = self.strokes.clone();
        self.strokes.push(stroke.into_ref());
        self.history.record(before, self.strokes.clone());
        self.history_changed();
        self.mark_dirty();
        Ok(())
    }

    /// Remove every stroke as one undoable step.
    pub fn clear(&mut self) {
        self.finish_active_gesture();
        info!("Clearing {} strokes", self.strokes.len());

        let before = std::mem::take(&mut self.strokes);
        self.history.record(before, Vec::new());
        self.history_changed();
        self.mark_dirty();
    }

    pub fn undo(&mut self) {
        self.finish_active_gesture();
        match self.history.undo() {
            Some(before) => {
                self.strokes = before;
                self.history_changed();
                self.mark_dirty();
            }
            None => trace!("Nothing to undo"),
        }
    }

    pub fn redo(&mut self) {
        self.finish_active_gesture();
        match self.history.redo() {
            Some(after) => {
                self.strokes = after;
                self.history_changed();
                self.mark_dirty();
            }
            None => trace!("Nothing to redo"),
        }
    }

    // ---- Gestures ----

    /// Route a host pointer event.
    pub fn handle_gesture(&mut self, event: GestureEvent) {
        match event {
            GestureEvent::Start { point, brush } => self.gesture_start(point, brush),
            GestureEvent::Update { point } => self.gesture_update(point),
            GestureEvent::End { .. } => self.gesture_end(),
            GestureEvent::Cancel => self.gesture_cancel(),
        }
    }

    /// Pointer down. A gesture still in progress is ended first.
    pub fn gesture_start(&mut self, point: Pos2, brush: Brush) {
        if self.gesture.is_some() {
            warn!("Gesture started while another was in progress; ending the previous one");
            self.finish_active_gesture();
        }

        self.history.begin(self.strokes.clone());

        let stroke = Stroke::new(point, brush.color, brush.width, brush.tool.is_eraser());
        debug!("{} gesture {} started at ({:.1}, {:.1})", brush.tool.name(), stroke.id(), point.x, point.y);
        self.event_bus.emit(CanvasEvent::GestureStarted {
            tool: brush.tool,
            stroke_id: stroke.id(),
        });

        self.gesture = Some(ActiveGesture {
            tool: brush.tool,
            stroke,
            minted: HashSet::new(),
        });
        self.history_changed();
        self.mark_dirty();
    }

    /// Pointer down with a pen.
    pub fn start_pen(&mut self, point: Pos2, color: Color32, width: f32) {
        self.gesture_start(point, Brush::pen(color, width));
    }

    /// Pointer down with an eraser.
    pub fn start_eraser(&mut self, point: Pos2, width: f32) {
        self.gesture_start(point, Brush::eraser(width));
    }

    /// Pointer move. Ignored without a gesture in progress.
    pub fn gesture_update(&mut self, point: Pos2) {
        if let Err(err) = self.try_update(point) {
            warn!("Ignoring gesture update: {err}");
        }
    }

    fn try_update(&mut self, point: Pos2) -> Result<(), GestureError> {
        let gesture = self.gesture.as_mut().ok_or(GestureError::NoActiveGesture)?;
        gesture.stroke.append_point(point);

        if gesture.tool.is_eraser() {
            let radius = self.config.eraser.radius(gesture.stroke.width());
            let outcome = eraser::erase_at(&self.strokes, point, radius);
            if outcome.changed() {
                trace!(
                    "Eraser sample removed {} stroke(s), minted {}",
                    outcome.removed.len(),
                    outcome.added.len()
                );
                for removed in outcome.removed {
                    if !gesture.minted.remove(&removed.id()) {
                        self.erased_originals.push(removed);
                    }
                }
                gesture.minted.extend(outcome.added);
                self.strokes = outcome.strokes;
            }
        }

        self.mark_dirty();
        Ok(())
    }

    /// Pointer up. Ignored without a gesture in progress.
    pub fn gesture_end(&mut self) {
        if let Err(err) = self.try_end(false) {
            warn!("Ignoring gesture end: {err}");
        }
    }

    /// The host interrupted the gesture. Finalizes exactly like
    /// [`gesture_end`](Self::gesture_end) so no history entry stays open.
    pub fn gesture_cancel(&mut self) {
        if let Err(err) = self.try_end(true) {
            warn!("Ignoring gesture cancel: {err}");
        }
    }

    fn try_end(&mut self, cancelled: bool) -> Result<(), GestureError> {
        let gesture = self.gesture.take().ok_or(GestureError::NoActiveGesture)?;
        let tool = gesture.tool;

        match tool {
            Tool::Pen => self.strokes.push(gesture.stroke.into_ref()),
            // The eraser's own stroke never reaches a committed snapshot.
            Tool::Eraser => {}
        }

        let erased = std::mem::take(&mut self.erased_originals).len();
        let sealed = self.history.seal(self.strokes.clone());

        debug!(
            "{} gesture {}: {} strokes on canvas, {} erased",
            tool.name(),
            if cancelled { "cancelled" } else { "ended" },
            self.strokes.len(),
            erased
        );
        self.event_bus.emit(CanvasEvent::GestureEnded { tool, cancelled, erased });
        self.history_changed();
        self.mark_dirty();

        sealed.map_err(GestureError::from)
    }

    /// End the gesture in progress, if any, so history has no open entry.
    fn finish_active_gesture(&mut self) {
        if self.gesture.is_some() {
            if let Err(err) = self.try_end(false) {
                warn!("Failed to finish gesture: {err}");
            }
        }
    }

    // ---- Persistence ----

    /// The finalized canvas as serializable records.
    pub fn export_document(&self) -> CanvasDocument {
        CanvasDocument::from_strokes(self.strokes.iter().map(|stroke| &**stroke))
    }

    /// Replace the canvas with `document` and start a fresh history.
    ///
    /// Bounds and paths are regenerated from the stored points; records
    /// without points are skipped.
    pub fn load_document(&mut self, document: CanvasDocument) {
        self.gesture = None;
        self.erased_originals.clear();
        self.history.clear_all();

        let total = document.strokes.len();
        self.strokes = document
            .strokes
            .into_iter()
            .filter_map(StrokeRecord::into_stroke)
            .map(Stroke::into_ref)
            .collect();
        if self.strokes.len() < total {
            warn!("Skipped {} stroke records without points", total - self.strokes.len());
        }
        info!("Loaded {} strokes", self.strokes.len());

        self.history_changed();
        self.mark_dirty();
    }

    // ---- Frames ----

    /// Frame boundary: publish the canvas if anything changed since the last
    /// frame. Returns true if an update was published.
    pub fn on_frame(&mut self) -> bool {
        if !self.frames.take_pending() {
            return false;
        }
        let strokes = self
            .strokes
            .iter()
            .cloned()
            .chain(self.gesture.as_ref().map(|gesture| gesture.stroke.clone().into_ref()))
            .collect();
        self.event_bus.emit(CanvasEvent::Changed { strokes });
        true
    }

    /// True if a publish is waiting for the next frame
    pub fn has_pending_frame(&self) -> bool {
        self.frames.is_pending()
    }

    fn mark_dirty(&mut self) {
        if self.frames.mark_dirty() {
            trace!("Requested frame");
        }
    }

    fn history_changed(&self) {
        self.event_bus.emit(CanvasEvent::HistoryChanged {
            can_undo: self.can_undo(),
            can_redo: self.can_redo(),
        });
    }
}
