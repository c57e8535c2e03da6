//! Utilities for tests and examples.
use crate::{DiscreteAct, RawFrame};
use anyhow::Result;
use pixelq_core::{Env, Step};

/// A deterministic pixel environment without an emulator behind it.
///
/// A target pixel drifts one column per step along the top row while the
/// agent moves a paddle pixel along the bottom row (actions: left, stay,
/// right). The reward is 1 when the paddle column matches the target column.
/// Episodes end after a fixed number of steps.
pub struct SyntheticPixelEnv {
    width: u32,
    height: u32,
    episode_len: usize,
    t: usize,
    target: u32,
    paddle: u32,
}

impl SyntheticPixelEnv {
    pub fn new(width: u32, height: u32, episode_len: usize) -> Self {
        assert!(width >= 2 && height >= 2);
        Self {
            width,
            height,
            episode_len,
            t: 0,
            target: 0,
            paddle: width / 2,
        }
    }

    fn render(&self) -> RawFrame {
        let mut buf = vec![0u8; (self.width * self.height * 3) as usize];
        let top = (self.target * 3) as usize;
        buf[top..top + 3].copy_from_slice(&[255, 255, 255]);
        let bottom = (((self.height - 1) * self.width + self.paddle) * 3) as usize;
        buf[bottom..bottom + 3].copy_from_slice(&[255, 255, 255]);
        RawFrame::new(self.width, self.height, buf)
    }
}

impl Env for SyntheticPixelEnv {
    type Obs = RawFrame;
    type Act = DiscreteAct;
    type Info = ();

    fn reset(&mut self) -> Result<RawFrame> {
        self.t = 0;
        self.target = 0;
        self.paddle = self.width / 2;
        Ok(self.render())
    }

    fn step(&mut self, act: &DiscreteAct) -> Result<Step<Self>> {
        match act.act {
            0 => self.paddle = self.paddle.saturating_sub(1),
            2 => self.paddle = (self.paddle + 1).min(self.width - 1),
            _ => {}
        }
        self.target = (self.target + 1) % self.width;
        self.t += 1;

        let reward = if self.paddle == self.target { 1.0 } else { 0.0 };
        let is_done = self.t >= self.episode_len;
        Ok(Step::new(self.render(), act.clone(), reward, is_done, ()))
    }

    fn n_actions(&self) -> usize {
        3
    }

    fn obs_shape(&self) -> Vec<usize> {
        vec![self.height as usize, self.width as usize, 3]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frames_have_declared_dimensions() {
        let mut env = SyntheticPixelEnv::new(8, 6, 10);
        let obs = env.reset().unwrap();
        assert_eq!(obs.buf.len(), 8 * 6 * 3);
        assert_eq!(env.obs_shape(), vec![6, 8, 3]);
    }

    #[test]
    fn episode_ends_after_configured_length() {
        let mut env = SyntheticPixelEnv::new(8, 6, 3);
        env.reset().unwrap();
        for t in 1..=3 {
            let step = env.step(&DiscreteAct::new(1)).unwrap();
            assert_eq!(step.is_done, t == 3);
        }
    }

    #[test]
    fn tracking_the_target_earns_reward() {
        let mut env = SyntheticPixelEnv::new(4, 4, 100);
        env.reset().unwrap();
        // Paddle starts at column 2, target at 0; the target advances to 1
        // while the paddle moves left to 1.
        let step = env.step(&DiscreteAct::new(0)).unwrap();
        assert_eq!(step.reward, 1.0);
    }
}
