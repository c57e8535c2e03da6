//! Errors in the library.
use thiserror::Error;

/// Errors raised by the learning core.
///
/// All of these are fatal to the caller; the single-process, synchronous
/// execution model has no transient failures and no retry path.
#[derive(Error, Debug)]
pub enum PixelqError {
    /// The replay buffer holds fewer valid transitions than requested.
    #[error("insufficient replay data: {stored} transitions stored, {requested} requested")]
    InsufficientData {
        /// Number of valid transitions in the buffer.
        stored: usize,
        /// Requested batch size.
        requested: usize,
    },

    /// An observation or frame disagrees with the configured fixed shape.
    #[error("shape mismatch: expected {expected:?}, got {got:?}")]
    ShapeMismatch {
        /// The configured shape.
        expected: Vec<usize>,
        /// The shape actually seen.
        got: Vec<usize>,
    },

    /// A failure inside the value approximator's predict or train step.
    #[error("value approximator failure: {0}")]
    Approximator(String),
}
