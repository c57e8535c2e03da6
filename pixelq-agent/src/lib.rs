//! Double-DQN agent.
//!
//! The agent composes a replay buffer, an epsilon-greedy explorer and a pair
//! of value approximators (online and target network) into the learning
//! engine driven by an external episode loop: `choose_action` →
//! `store_transition` → `learn`, once per environment step.
mod dqn;
pub use dqn::{DoubleDqn, DoubleDqnConfig, EpsilonGreedy};
