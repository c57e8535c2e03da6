//! Environment step.
use super::Env;

/// Additional information attached to [`Step`].
pub trait Info {}

impl Info for () {}

/// Represents an observation, reward and termination flag emitted by the
/// environment at every interaction step.
pub struct Step<E: Env> {
    /// Observation after the step.
    pub obs: E::Obs,

    /// Action applied in the step.
    pub act: E::Act,

    /// Reward of the step.
    pub reward: f32,

    /// Flag denoting if the episode terminated at this step.
    pub is_done: bool,

    /// Information defined by the environment.
    pub info: E::Info,
}

impl<E: Env> Step<E> {
    /// Constructs a [`Step`] object.
    pub fn new(obs: E::Obs, act: E::Act, reward: f32, is_done: bool, info: E::Info) -> Self {
        Step {
            obs,
            act,
            reward,
            is_done,
            info,
        }
    }
}
