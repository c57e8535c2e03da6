//! The Double-DQN agent.
use super::{
    config::DoubleDqnConfig,
    explorer::{argmax, EpsilonGreedy},
};
use anyhow::Result;
use log::{debug, info};
use pixelq_core::{
    replay_buffer::{ObsBatch, ReplayBuffer},
    Env, Policy, ValueApproximator,
};
use rand::{rngs::SmallRng, Rng, SeedableRng};
use std::{fs, marker::PhantomData, path::Path};

/// A Double-DQN agent over an environment with pixel observations.
///
/// Owns the replay buffer, the epsilon-greedy explorer and two value
/// approximators: `qnet` is updated on every learning step, `qnet_tgt` is
/// overwritten with a full copy of `qnet`'s parameters every
/// `replace_interval` learning steps. Double-DQN decoupling selects the
/// next-state action with the online network and evaluates it with the
/// target network, reducing value overestimation bias.
///
/// The external episode loop drives the agent once per environment step:
/// `choose_action` → `store_transition` → `learn`.
pub struct DoubleDqn<E, Q>
where
    E: Env,
    E::Obs: Into<ObsBatch>,
    E::Act: From<u8>,
    Q: ValueApproximator<Input = ObsBatch>,
{
    qnet: Q,
    qnet_tgt: Q,
    buffer: ReplayBuffer<ObsBatch>,
    explorer: EpsilonGreedy,
    gamma: f32,
    batch_size: usize,
    replace_interval: usize,
    n_actions: usize,
    learn_step_counter: usize,
    run_name: String,
    rng: SmallRng,
    phantom: PhantomData<E>,
}

impl<E, Q> DoubleDqn<E, Q>
where
    E: Env,
    E::Obs: Into<ObsBatch>,
    E::Act: From<u8>,
    Q: ValueApproximator<Input = ObsBatch>,
{
    /// Constructs the agent around an online/target approximator pair.
    ///
    /// Both approximators must share an architecture; they never share
    /// parameter storage.
    pub fn new(qnet: Q, qnet_tgt: Q, config: &DoubleDqnConfig) -> Self {
        assert!(config.n_actions > 0);
        assert!(config.batch_size > 0);
        assert!(config.replace_interval > 0);
        Self {
            qnet,
            qnet_tgt,
            buffer: ReplayBuffer::build(&config.replay, &config.obs_shape),
            explorer: EpsilonGreedy::new(config.eps_start, config.eps_min, config.eps_dec),
            gamma: config.gamma,
            batch_size: config.batch_size,
            replace_interval: config.replace_interval,
            n_actions: config.n_actions,
            learn_step_counter: 0,
            run_name: config.run_name.clone(),
            rng: SmallRng::seed_from_u64(config.seed),
            phantom: PhantomData,
        }
    }

    /// Current epsilon-greedy parameter.
    pub fn eps(&self) -> f32 {
        self.explorer.eps()
    }

    /// Number of learning steps taken so far.
    pub fn learn_steps(&self) -> usize {
        self.learn_step_counter
    }

    /// Number of valid transitions in the replay buffer.
    pub fn n_transitions(&self) -> usize {
        self.buffer.len()
    }

    /// The online network.
    pub fn qnet(&self) -> &Q {
        &self.qnet
    }

    /// The target network.
    pub fn qnet_tgt(&self) -> &Q {
        &self.qnet_tgt
    }

    /// Epsilon-greedy action selection.
    ///
    /// With probability epsilon a uniformly random action; otherwise the
    /// argmax of the online network's values, ties resolving to the lowest
    /// action index.
    pub fn choose_action(&mut self, obs: &E::Obs) -> Result<u8> {
        if self.explorer.explores(&mut self.rng) {
            Ok(self.rng.gen_range(0..self.n_actions) as u8)
        } else {
            let q = self.qnet.predict(&obs.clone().into())?;
            Ok(argmax(q.row(0)) as u8)
        }
    }

    /// Stores one transition in the replay buffer.
    pub fn store_transition(
        &mut self,
        obs: E::Obs,
        act: u8,
        reward: f32,
        next_obs: E::Obs,
        done: bool,
    ) {
        self.buffer
            .store(obs.into(), act, reward, next_obs.into(), done);
    }

    /// One learning step.
    ///
    /// Returns `Ok(None)` without touching any state while the buffer holds
    /// fewer than `batch_size` transitions. Otherwise synchronizes the target
    /// network when the replace cadence is due (before this step's update,
    /// including at step 0), samples a batch, regresses the online network
    /// towards the Double-DQN targets and decays epsilon. Approximator
    /// failures are fatal and propagate to the caller.
    pub fn learn(&mut self) -> Result<Option<f32>> {
        if self.buffer.len() < self.batch_size {
            return Ok(None);
        }

        if self.learn_step_counter % self.replace_interval == 0 {
            self.sync_target()?;
        }

        let batch = self.buffer.batch(self.batch_size)?;
        let (obs, act, next_obs, reward, done) = batch.unpack();

        // Action selection by the online network, evaluation by the target.
        let q_next = self.qnet.predict(&next_obs)?;
        let q_next_tgt = self.qnet_tgt.predict(&next_obs)?;

        let mut targets = Vec::with_capacity(reward.len());
        for i in 0..reward.len() {
            let best = argmax(q_next.row(i));
            // Terminal states have zero future value.
            let future = if done[i] { 0.0 } else { q_next_tgt[[i, best]] };
            targets.push(reward[i] + self.gamma * future);
        }

        let loss = self.qnet.train_step(&obs, &act, &targets)?;
        self.learn_step_counter += 1;
        self.explorer.decrement();
        debug!(
            "learn step {}: loss {:.6}, eps {:.4}",
            self.learn_step_counter,
            loss,
            self.eps()
        );

        Ok(Some(loss))
    }

    fn sync_target(&mut self) -> Result<()> {
        let params = self.qnet.parameters()?;
        self.qnet_tgt.load_parameters(&params)?;
        debug!(
            "synchronized target network at learn step {}",
            self.learn_step_counter
        );
        Ok(())
    }

    /// Saves both networks under the given directory.
    ///
    /// File names combine the configured run name with the network role.
    pub fn save_params<T: AsRef<Path>>(&self, dir: T) -> Result<()> {
        fs::create_dir_all(&dir)?;
        let dir = dir.as_ref();
        self.qnet
            .save(&dir.join(format!("{}_qnet.safetensors", self.run_name)))?;
        self.qnet_tgt
            .save(&dir.join(format!("{}_qnet_tgt.safetensors", self.run_name)))?;
        info!("saved agent parameters to {:?}", dir);
        Ok(())
    }

    /// Loads both networks from the given directory.
    pub fn load_params<T: AsRef<Path>>(&mut self, dir: T) -> Result<()> {
        let dir = dir.as_ref();
        self.qnet
            .load(&dir.join(format!("{}_qnet.safetensors", self.run_name)))?;
        self.qnet_tgt
            .load(&dir.join(format!("{}_qnet_tgt.safetensors", self.run_name)))?;
        info!("loaded agent parameters from {:?}", dir);
        Ok(())
    }
}

impl<E, Q> Policy<E> for DoubleDqn<E, Q>
where
    E: Env,
    E::Obs: Into<ObsBatch>,
    E::Act: From<u8>,
    Q: ValueApproximator<Input = ObsBatch>,
{
    fn sample(&mut self, obs: &E::Obs) -> E::Act {
        let act = self
            .choose_action(obs)
            .expect("value approximator failure is fatal");
        E::Act::from(act)
    }
}
