//! Pixel observation pipeline.
//!
//! Turns the raw RGB frames of a base environment into the bounded-size
//! stacked observation consumed by the learning agent. The pipeline is an
//! explicit composition of three stages applied in order on every step:
//!
//! 1. [`FrameRepeatMaxPool`] repeats the chosen action for a fixed number of
//!    environment sub-steps, accumulates reward and takes the pixel-wise
//!    maximum over the last two raw frames to suppress flicker artifacts;
//! 2. [`FramePreprocessor`] converts the pooled frame to a small normalized
//!    grayscale frame;
//! 3. [`FrameStacker`] maintains a sliding window of the most recent
//!    preprocessed frames.
//!
//! [`PixelPipeline`] owns the stages and the wrapped environment and
//! re-exposes the [`Env`](pixelq_core::Env) contract with the observation
//! replaced by the stacked form. Preprocessing follows the common Atari
//! wrapper conventions described in
//! [`atari_wrapper.py`](https://github.com/openai/baselines/blob/master/baselines/common/atari_wrappers.py).
mod act;
mod env;
mod obs;
mod preprocess;
mod repeat;
mod stack;
pub mod util;
pub use act::DiscreteAct;
pub use env::{PixelPipeline, PixelPipelineConfig};
pub use obs::{PixelObs, RawFrame};
pub use preprocess::FramePreprocessor;
pub use repeat::FrameRepeatMaxPool;
pub use stack::FrameStacker;
