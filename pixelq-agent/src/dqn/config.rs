//! Configuration of [`DoubleDqn`](super::DoubleDqn).
use anyhow::Result;
use pixelq_core::replay_buffer::ReplayBufferConfig;
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, Write},
    path::Path,
};

/// Configuration of [`DoubleDqn`](super::DoubleDqn).
///
/// The learning rate and optimizer belong to the value approximator's own
/// configuration; this struct covers the agent's schedules and shapes. None
/// of these values can change after construction.
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct DoubleDqnConfig {
    /// Discount factor for future rewards.
    pub gamma: f32,

    /// Initial epsilon-greedy parameter.
    pub eps_start: f32,

    /// Minimum epsilon-greedy parameter.
    pub eps_min: f32,

    /// Amount epsilon is decremented by per learning step.
    pub eps_dec: f32,

    /// Number of transitions per learning batch; `learn` is a no-op until
    /// the replay buffer holds at least this many.
    pub batch_size: usize,

    /// Number of learning steps between target-network synchronizations.
    pub replace_interval: usize,

    /// Size of the discrete action set.
    pub n_actions: usize,

    /// Shape of a single observation.
    pub obs_shape: Vec<usize>,

    /// Random seed for action exploration.
    pub seed: u64,

    /// Name used to derive checkpoint file names, typically combining the
    /// environment identifier and an algorithm tag.
    pub run_name: String,

    /// Configuration of the replay buffer owned by the agent.
    pub replay: ReplayBufferConfig,
}

impl Default for DoubleDqnConfig {
    fn default() -> Self {
        Self {
            gamma: 0.99,
            eps_start: 1.0,
            eps_min: 0.1,
            eps_dec: 1e-5,
            batch_size: 32,
            replace_interval: 1000,
            n_actions: 0,
            obs_shape: vec![],
            seed: 42,
            run_name: "ddqn".to_string(),
            replay: ReplayBufferConfig::default(),
        }
    }
}

impl DoubleDqnConfig {
    /// Sets the discount factor.
    pub fn gamma(mut self, gamma: f32) -> Self {
        self.gamma = gamma;
        self
    }

    /// Sets the epsilon schedule (start, minimum, decrement per step).
    pub fn epsilon(mut self, eps_start: f32, eps_min: f32, eps_dec: f32) -> Self {
        self.eps_start = eps_start;
        self.eps_min = eps_min;
        self.eps_dec = eps_dec;
        self
    }

    /// Sets the batch size.
    pub fn batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Sets the target-network replace cadence.
    pub fn replace_interval(mut self, replace_interval: usize) -> Self {
        self.replace_interval = replace_interval;
        self
    }

    /// Sets the size of the action set.
    pub fn n_actions(mut self, n_actions: usize) -> Self {
        self.n_actions = n_actions;
        self
    }

    /// Sets the observation shape.
    pub fn obs_shape(mut self, obs_shape: Vec<usize>) -> Self {
        self.obs_shape = obs_shape;
        self
    }

    /// Sets the exploration seed.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Sets the checkpoint run name.
    pub fn run_name(mut self, run_name: impl Into<String>) -> Self {
        self.run_name = run_name.into();
        self
    }

    /// Sets the replay buffer configuration.
    pub fn replay(mut self, replay: ReplayBufferConfig) -> Self {
        self.replay = replay;
        self
    }

    /// Constructs [`DoubleDqnConfig`] from a YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let b = serde_yaml::from_reader(rdr)?;
        Ok(b)
    }

    /// Saves [`DoubleDqnConfig`] as a YAML file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempdir::TempDir;

    #[test]
    fn yaml_roundtrip() -> Result<()> {
        let dir = TempDir::new("double_dqn_config")?;
        let path = dir.path().join("agent.yaml");
        let config = DoubleDqnConfig::default()
            .gamma(0.95)
            .epsilon(1.0, 0.02, 1e-4)
            .batch_size(64)
            .replace_interval(500)
            .n_actions(6)
            .obs_shape(vec![4, 84, 84])
            .run_name("pong_ddqn")
            .replay(ReplayBufferConfig::default().capacity(20_000));
        config.save(&path)?;
        assert_eq!(DoubleDqnConfig::load(&path)?, config);
        Ok(())
    }
}
