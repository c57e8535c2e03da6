//! Candle-backed value approximator.
//!
//! Implements the `pixelq-core` [`ValueApproximator`](pixelq_core::ValueApproximator)
//! contract with a convolutional Q-network on the
//! [candle](https://crates.io/crates/candle-core) framework. The network
//! topology follows the classic DQN paper; the agent itself stays
//! backend-agnostic and lives in `pixelq-agent`.
mod cnn;
mod opt;
mod qnet;
pub mod util;
pub use cnn::{Cnn, CnnConfig};
pub use opt::{Optimizer, OptimizerConfig};
pub use qnet::{QNetwork, QNetworkConfig};
