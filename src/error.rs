use thiserror::Error;

use crate::history::HistoryError;

/// Faults in the sequence of gesture events handed to the engine.
///
/// These never escape the public canvas commands; the engine logs them and
/// treats the offending event as a no-op.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GestureError {
    #[error("no gesture in progress")]
    NoActiveGesture,

    #[error("stroke has no points")]
    EmptyStroke,

    #[error(transparent)]
    History(#[from] HistoryError),
}
