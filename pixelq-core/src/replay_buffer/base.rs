//! The replay buffer.
use super::{BatchBase, ReplayBufferConfig, TransitionBatch};
use crate::error::PixelqError;
use anyhow::Result;
use rand::{rngs::StdRng, SeedableRng};

/// A fixed-capacity circular store of transitions.
///
/// Five parallel fixed-length stores are written at slot `count % capacity`;
/// once the buffer is full the oldest slot is overwritten in place (ring
/// semantics, no removal). The write counter `count` is monotonically
/// increasing and the number of valid entries is `min(count, capacity)`.
pub struct ReplayBuffer<O: BatchBase> {
    capacity: usize,

    // Total number of writes since construction, never decreasing.
    count: usize,

    obs: O,
    next_obs: O,
    act: Vec<u8>,
    reward: Vec<f32>,
    done: Vec<bool>,

    rng: StdRng,
}

impl<O: BatchBase> ReplayBuffer<O> {
    /// Builds an empty buffer for observations of the given shape.
    pub fn build(config: &ReplayBufferConfig, obs_shape: &[usize]) -> Self {
        let capacity = config.capacity;
        assert!(capacity > 0);
        Self {
            capacity,
            count: 0,
            obs: O::with_capacity(capacity, obs_shape),
            next_obs: O::with_capacity(capacity, obs_shape),
            act: vec![0; capacity],
            reward: vec![0.0; capacity],
            done: vec![false; capacity],
            rng: StdRng::seed_from_u64(config.seed),
        }
    }

    /// Returns the number of valid transitions, `min(count, capacity)`.
    pub fn len(&self) -> usize {
        self.count.min(self.capacity)
    }

    /// Returns `true` if no transition has been stored yet.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Returns the total number of writes since construction.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Returns the capacity.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Stores one transition, overwriting the oldest slot once full.
    ///
    /// O(1) and infallible; the buffer never grows beyond `capacity`.
    pub fn store(&mut self, obs: O, act: u8, reward: f32, next_obs: O, done: bool) {
        let i = self.count % self.capacity;
        self.obs.push(i, &obs);
        self.next_obs.push(i, &next_obs);
        self.act[i] = act;
        self.reward[i] = reward;
        self.done[i] = done;
        self.count += 1;
    }

    /// Samples `size` distinct transitions uniformly at random.
    ///
    /// Indices are drawn without replacement from `[0, len())`; every valid
    /// transition is equally likely regardless of its age. Fails with
    /// [`PixelqError::InsufficientData`] if fewer than `size` transitions are
    /// stored; the agent guards its learning step on occupancy, so this does
    /// not surface under normal driving-loop use.
    pub fn batch(&mut self, size: usize) -> Result<TransitionBatch<O>> {
        let len = self.len();
        if size > len {
            return Err(PixelqError::InsufficientData {
                stored: len,
                requested: size,
            }
            .into());
        }
        let ixs = rand::seq::index::sample(&mut self.rng, len, size).into_vec();

        Ok(TransitionBatch {
            obs: self.obs.sample(&ixs),
            act: ixs.iter().map(|&i| self.act[i]).collect(),
            next_obs: self.next_obs.sample(&ixs),
            reward: ixs.iter().map(|&i| self.reward[i]).collect(),
            done: ixs.iter().map(|&i| self.done[i]).collect(),
        })
    }
}
