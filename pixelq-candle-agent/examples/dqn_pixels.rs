//! Trains a Double-DQN agent on the synthetic pixel environment.
//!
//! The driving loop is the usual one: choose an action, step the wrapped
//! environment, store the transition, learn. Checkpoints are written whenever
//! the trailing mean of episode scores improves; the mean is recomputed every
//! episode before the comparison.
use anyhow::Result;
use candle_core::Device;
use log::info;
use pixelq_agent::{DoubleDqn, DoubleDqnConfig};
use pixelq_candle_agent::{OptimizerConfig, QNetwork, QNetworkConfig};
use pixelq_core::{replay_buffer::ReplayBufferConfig, Env as _};
use pixelq_pixel_env::{
    util::test::SyntheticPixelEnv, DiscreteAct, PixelPipeline, PixelPipelineConfig,
};
use std::collections::VecDeque;

type Env = PixelPipeline<SyntheticPixelEnv>;
type Agent = DoubleDqn<Env, QNetwork>;

const N_EPISODES: usize = 200;
const SCORE_WINDOW: usize = 20;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let pipeline_config = PixelPipelineConfig::default()
        .frame_size(84, 84)
        .stack_depth(4)
        .action_repeat(2);
    let mut env = Env::new(SyntheticPixelEnv::new(32, 32, 200), &pipeline_config);
    let n_actions = env.n_actions();

    let qnet_config = QNetworkConfig::default()
        .n_stack(4)
        .frame_size(84, 84)
        .n_actions(n_actions)
        .opt_config(OptimizerConfig::Adam { lr: 1e-4 });
    let qnet = QNetwork::build(&qnet_config, Device::Cpu)?;
    let qnet_tgt = QNetwork::build(&qnet_config, Device::Cpu)?;

    let agent_config = DoubleDqnConfig::default()
        .gamma(0.99)
        .epsilon(1.0, 0.05, 1e-4)
        .batch_size(32)
        .replace_interval(500)
        .n_actions(n_actions)
        .obs_shape(env.obs_shape())
        .run_name("synthetic_ddqn")
        .replay(ReplayBufferConfig::default().capacity(20_000));
    let mut agent = Agent::new(qnet, qnet_tgt, &agent_config);

    let mut scores: VecDeque<f32> = VecDeque::with_capacity(SCORE_WINDOW);
    let mut best_score = f32::NEG_INFINITY;

    for episode in 0..N_EPISODES {
        let mut obs = env.reset()?;
        let mut score = 0.0;

        loop {
            let act = agent.choose_action(&obs)?;
            let step = env.step(&DiscreteAct::new(act))?;
            score += step.reward;
            agent.store_transition(obs, act, step.reward, step.obs.clone(), step.is_done);
            agent.learn()?;
            obs = step.obs;
            if step.is_done {
                break;
            }
        }

        if scores.len() == SCORE_WINDOW {
            scores.pop_front();
        }
        scores.push_back(score);
        let ave_score = scores.iter().sum::<f32>() / scores.len() as f32;
        info!(
            "episode {}: score {:.1}, trailing mean {:.2}, eps {:.3}, steps {}",
            episode,
            score,
            ave_score,
            agent.eps(),
            agent.learn_steps(),
        );

        if ave_score > best_score {
            best_score = ave_score;
            agent.save_params("checkpoints")?;
        }
    }

    Ok(())
}
