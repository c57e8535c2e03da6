//! Fixed-capacity experience replay with ring overwrite semantics.
//!
//! The buffer stores transitions in five parallel fixed-length stores and
//! samples uniformly at random without replacement. It is deliberately not
//! age-weighted: every valid transition is equally likely regardless of
//! recency.
mod base;
mod batch;
mod config;
pub use base::ReplayBuffer;
pub use batch::{BatchBase, ObsBatch, TransitionBatch};
pub use config::ReplayBufferConfig;
