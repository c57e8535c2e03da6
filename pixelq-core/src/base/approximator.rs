//! Interface of the action-value function approximator.
use anyhow::Result;
use ndarray::Array2;
use std::path::Path;

/// A trainable action-value function over batches of observations.
///
/// The agent depends only on this capability set; any numeric backend
/// satisfying the contract is substitutable. The two instances owned by the
/// agent (online and target network) share an architecture but never share
/// parameter storage: synchronization goes through an opaque [`Params`]
/// snapshot, which is a full copy, not an alias.
///
/// [`Params`]: ValueApproximator::Params
pub trait ValueApproximator {
    /// Batch of observations consumed by the approximator.
    type Input;

    /// Opaque snapshot of the parameters.
    type Params;

    /// Returns per-action value estimates, one row per observation in the
    /// batch, with `n_actions` columns.
    fn predict(&self, obs: &Self::Input) -> Result<Array2<f32>>;

    /// Applies one optimizer update minimizing the mean-squared error between
    /// the values currently predicted for the taken actions and `targets`,
    /// and returns the loss magnitude.
    ///
    /// `acts[i]` selects the predicted value of sample `i` that is regressed
    /// towards `targets[i]`; the remaining actions of the row contribute no
    /// gradient.
    fn train_step(&mut self, obs: &Self::Input, acts: &[u8], targets: &[f32]) -> Result<f32>;

    /// Takes a full snapshot of the current parameters.
    fn parameters(&self) -> Result<Self::Params>;

    /// Overwrites the parameters from a snapshot taken on an identical
    /// architecture.
    fn load_parameters(&mut self, params: &Self::Params) -> Result<()>;

    /// Saves the parameters to the given file path.
    fn save(&self, path: &Path) -> Result<()>;

    /// Loads the parameters from the given file path.
    fn load(&mut self, path: &Path) -> Result<()>;
}
