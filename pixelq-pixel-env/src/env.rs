//! The composed pipeline environment.
mod config;
use crate::{FramePreprocessor, FrameRepeatMaxPool, FrameStacker, PixelObs, RawFrame};
use anyhow::Result;
pub use config::PixelPipelineConfig;
use pixelq_core::{Env, Step};

/// The pixel observation pipeline wrapped around a base environment.
///
/// Holds the three stages in order and forwards `reset`/`step` through them,
/// transforming the observation (and accumulating the reward) on the way
/// back. The base environment is owned by value; the pipeline re-exposes the
/// [`Env`] contract with `Obs = PixelObs`.
pub struct PixelPipeline<E> {
    env: E,
    repeat: FrameRepeatMaxPool,
    preproc: FramePreprocessor,
    stacker: FrameStacker,
    stack_depth: usize,
    frame_height: u32,
    frame_width: u32,
}

impl<E> PixelPipeline<E>
where
    E: Env<Obs = RawFrame>,
{
    /// Composes the pipeline around `env`.
    pub fn new(env: E, config: &PixelPipelineConfig) -> Self {
        Self {
            env,
            repeat: FrameRepeatMaxPool::new(config.action_repeat),
            preproc: FramePreprocessor::new(config.frame_height, config.frame_width),
            stacker: FrameStacker::new(config.stack_depth),
            stack_depth: config.stack_depth,
            frame_height: config.frame_height,
            frame_width: config.frame_width,
        }
    }

    /// Returns a reference to the wrapped environment.
    pub fn env(&self) -> &E {
        &self.env
    }
}

impl<E> Env for PixelPipeline<E>
where
    E: Env<Obs = RawFrame>,
{
    type Obs = PixelObs;
    type Act = E::Act;
    type Info = E::Info;

    fn reset(&mut self) -> Result<PixelObs> {
        let raw = self.env.reset()?;
        let raw = self.repeat.reset(raw);
        let frame = self.preproc.observation(&raw)?;
        Ok(self.stacker.reset(frame))
    }

    fn step(&mut self, act: &Self::Act) -> Result<Step<Self>> {
        let (raw, reward, is_done, info) = self.repeat.step(&mut self.env, act)?;
        let frame = self.preproc.observation(&raw)?;
        let obs = self.stacker.observation(frame);
        Ok(Step::new(obs, act.clone(), reward, is_done, info))
    }

    fn n_actions(&self) -> usize {
        self.env.n_actions()
    }

    fn obs_shape(&self) -> Vec<usize> {
        vec![
            self.stack_depth,
            self.frame_height as usize,
            self.frame_width as usize,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::test::SyntheticPixelEnv;
    use crate::DiscreteAct;

    fn pipeline() -> PixelPipeline<SyntheticPixelEnv> {
        let config = PixelPipelineConfig::default()
            .frame_size(16, 16)
            .stack_depth(4)
            .action_repeat(2);
        PixelPipeline::new(SyntheticPixelEnv::new(32, 32, 20), &config)
    }

    #[test]
    fn reset_emits_cold_started_stack() {
        let mut env = pipeline();
        let obs = env.reset().unwrap();
        assert_eq!(obs.frames.shape(), &[4, 16, 16]);
        let first = obs.frames.index_axis(ndarray::Axis(0), 0).to_owned();
        for i in 1..4 {
            assert_eq!(obs.frames.index_axis(ndarray::Axis(0), i), first);
        }
    }

    #[test]
    fn step_keeps_shape_and_bounds() {
        let mut env = pipeline();
        env.reset().unwrap();
        let step = env.step(&DiscreteAct::new(1)).unwrap();
        assert_eq!(step.obs.frames.shape(), &[4, 16, 16]);
        assert!(step.obs.frames.iter().all(|&v| (0.0..=1.0).contains(&v)));
    }

    #[test]
    fn episode_terminates_through_the_pipeline() {
        let mut env = pipeline();
        env.reset().unwrap();
        let mut steps = 0;
        loop {
            let step = env.step(&DiscreteAct::new(0)).unwrap();
            steps += 1;
            if step.is_done {
                break;
            }
            assert!(steps < 100, "episode must terminate");
        }
        // With action repeat 2 and an episode length of 20 base steps, the
        // wrapped episode ends within 10 pipeline steps.
        assert!(steps <= 10);
    }

    #[test]
    fn pooled_maximum_reaches_the_stack() {
        use pixelq_core::Act;

        #[derive(Debug, Clone)]
        struct NoAct;
        impl Act for NoAct {}

        // Emits solid gray frames with the scripted values, one per step.
        struct GrayEnv {
            values: Vec<u8>,
            t: usize,
        }

        impl Env for GrayEnv {
            type Obs = RawFrame;
            type Act = NoAct;
            type Info = ();

            fn reset(&mut self) -> Result<RawFrame> {
                self.t = 0;
                Ok(RawFrame::new(2, 2, vec![0; 12]))
            }

            fn step(&mut self, act: &NoAct) -> Result<Step<Self>> {
                let v = self.values[self.t];
                self.t += 1;
                Ok(Step::new(
                    RawFrame::new(2, 2, vec![v; 12]),
                    act.clone(),
                    0.0,
                    false,
                    (),
                ))
            }

            fn n_actions(&self) -> usize {
                1
            }

            fn obs_shape(&self) -> Vec<usize> {
                vec![2, 2, 3]
            }
        }

        // Frame size equals the source size, so preprocessing reduces to
        // grayscale and scaling and the pooled maximum is exactly the
        // maximum of the two preprocessed frames.
        let config = PixelPipelineConfig::default()
            .frame_size(2, 2)
            .stack_depth(2)
            .action_repeat(2);
        let mut env = PixelPipeline::new(
            GrayEnv {
                values: vec![60, 200],
                t: 0,
            },
            &config,
        );
        env.reset().unwrap();
        let step = env.step(&NoAct).unwrap();
        let newest = step.obs.frames.index_axis(ndarray::Axis(0), 1);
        for &v in newest.iter() {
            assert!((v - 200.0 / 255.0).abs() < 1e-6);
        }
    }

    #[test]
    fn n_actions_passes_through() {
        let env = pipeline();
        assert_eq!(env.n_actions(), 3);
        assert_eq!(env.obs_shape(), vec![4, 16, 16]);
    }
}
