//! Core traits.
mod approximator;
mod env;
mod policy;
mod step;
pub use approximator::ValueApproximator;
pub use env::Env;
pub use policy::Policy;
pub use step::{Info, Step};
use std::fmt::Debug;

/// An observation of an environment.
///
/// Observations are cloned when they enter the replay buffer, so the trait
/// requires [`Clone`].
pub trait Obs: Clone + Debug {}

/// An action on an environment.
pub trait Act: Clone + Debug {}
