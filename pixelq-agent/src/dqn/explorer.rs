//! Exploration strategy of the Double-DQN agent.
use ndarray::ArrayView1;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Epsilon-greedy action selection with a linearly decaying epsilon.
///
/// Epsilon is decremented by a fixed step once per learning call and floored
/// at the minimum, so it is monotonically non-increasing over a run.
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct EpsilonGreedy {
    eps: f32,
    eps_min: f32,
    eps_dec: f32,
}

impl EpsilonGreedy {
    /// Constructs the explorer with its decay schedule.
    pub fn new(eps_start: f32, eps_min: f32, eps_dec: f32) -> Self {
        Self {
            eps: eps_start,
            eps_min,
            eps_dec,
        }
    }

    /// Current epsilon.
    pub fn eps(&self) -> f32 {
        self.eps
    }

    /// Draws whether the next action should be random.
    pub fn explores(&self, rng: &mut impl Rng) -> bool {
        rng.gen::<f32>() < self.eps
    }

    /// One decay step, floored at the minimum.
    pub fn decrement(&mut self) {
        self.eps = (self.eps - self.eps_dec).max(self.eps_min);
    }
}

/// Index of the row maximum; ties resolve to the lowest index (first-max).
pub(crate) fn argmax(values: ArrayView1<f32>) -> usize {
    let mut best = 0;
    let mut best_value = f32::NEG_INFINITY;
    for (i, &v) in values.iter().enumerate() {
        if v > best_value {
            best = i;
            best_value = v;
        }
    }
    best
}
