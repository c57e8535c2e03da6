//! Environment.
use super::{Act, Info, Obs, Step};
use anyhow::Result;

/// Represents an environment with a discrete action set, typically an MDP.
///
/// The observation pipeline in `pixelq-pixel-env` wraps a base environment
/// implementing this trait and re-exposes the same contract with the
/// observation type replaced by the stacked, preprocessed form.
pub trait Env {
    /// Observation of the environment.
    type Obs: Obs;

    /// Action of the environment.
    type Act: Act;

    /// Information attached to each [`Step`] object.
    type Info: Info;

    /// Resets the environment and returns the initial observation.
    fn reset(&mut self) -> Result<Self::Obs>;

    /// Performs an environment step.
    fn step(&mut self, act: &Self::Act) -> Result<Step<Self>>
    where
        Self: Sized;

    /// Returns the size of the discrete action set.
    fn n_actions(&self) -> usize;

    /// Returns the shape of the observations this environment emits.
    fn obs_shape(&self) -> Vec<usize>;
}
