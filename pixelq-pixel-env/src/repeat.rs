//! Action repeat with two-frame max pooling.
use crate::obs::RawFrame;
use anyhow::Result;
use pixelq_core::Env;

/// Repeats a chosen action for a fixed number of environment sub-steps.
///
/// Rewards are accumulated additively and the raw observation of sub-step
/// `i` is kept in slot `i % 2` of a two-slot buffer; the stage returns the
/// pixel-wise maximum of the two slots, which suppresses sprite flicker in
/// emulators that draw on alternating frames. A terminal sub-step ends the
/// cycle early without padding the remaining repeats.
pub struct FrameRepeatMaxPool {
    repeat: usize,
    slots: [RawFrame; 2],
}

impl FrameRepeatMaxPool {
    pub fn new(repeat: usize) -> Self {
        assert!(repeat >= 1);
        Self {
            repeat,
            slots: [RawFrame::empty(), RawFrame::empty()],
        }
    }

    /// Reinitializes the buffer at episode start.
    ///
    /// Both slots mirror the reset observation, so a terminal on the very
    /// first sub-step max-pools against the reset frame rather than against
    /// stale data.
    pub fn reset(&mut self, frame: RawFrame) -> RawFrame {
        self.slots[0] = frame.clone();
        self.slots[1] = frame.clone();
        frame
    }

    /// Drives `env` up to `repeat` sub-steps with the same action.
    ///
    /// Returns the pooled frame, the total accumulated reward, the terminal
    /// flag, and the info of the last executed sub-step.
    pub fn step<E>(&mut self, env: &mut E, act: &E::Act) -> Result<(RawFrame, f32, bool, E::Info)>
    where
        E: Env<Obs = RawFrame>,
    {
        let first = env.step(act)?;
        self.slots[0] = first.obs;
        let mut total_reward = first.reward;
        let mut is_done = first.is_done;
        let mut info = first.info;

        if !is_done {
            for i in 1..self.repeat {
                let step = env.step(act)?;
                self.slots[i % 2] = step.obs;
                total_reward += step.reward;
                is_done = step.is_done;
                info = step.info;
                if is_done {
                    break;
                }
            }
        }

        let obs = self.slots[0].pixel_max(&self.slots[1])?;
        Ok((obs, total_reward, is_done, info))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pixelq_core::{Act, Step};

    #[derive(Debug, Clone)]
    struct NoAct;
    impl Act for NoAct {}

    // Plays back a fixed sequence of (frame value, reward, done) triples.
    struct ScriptedEnv {
        script: Vec<(u8, f32, bool)>,
        t: usize,
    }

    impl ScriptedEnv {
        fn new(script: Vec<(u8, f32, bool)>) -> Self {
            Self { script, t: 0 }
        }

        fn frame(value: u8) -> RawFrame {
            RawFrame::new(2, 2, vec![value; 2 * 2 * 3])
        }
    }

    impl Env for ScriptedEnv {
        type Obs = RawFrame;
        type Act = NoAct;
        type Info = ();

        fn reset(&mut self) -> anyhow::Result<RawFrame> {
            self.t = 0;
            Ok(Self::frame(0))
        }

        fn step(&mut self, act: &NoAct) -> anyhow::Result<Step<Self>> {
            let (value, reward, done) = self.script[self.t];
            self.t += 1;
            Ok(Step::new(Self::frame(value), act.clone(), reward, done, ()))
        }

        fn n_actions(&self) -> usize {
            1
        }

        fn obs_shape(&self) -> Vec<usize> {
            vec![2, 2, 3]
        }
    }

    #[test]
    fn pools_maximum_of_last_two_frames() {
        let mut env = ScriptedEnv::new(vec![(30, 0.0, false), (90, 0.0, false)]);
        let mut repeat = FrameRepeatMaxPool::new(2);
        repeat.reset(env.reset().unwrap());
        let (obs, _, _, _) = repeat.step(&mut env, &NoAct).unwrap();
        assert!(obs.buf.iter().all(|&v| v == 90));
    }

    #[test]
    fn accumulates_reward_over_sub_steps() {
        let mut env = ScriptedEnv::new(vec![
            (1, 1.0, false),
            (2, 2.0, false),
            (3, 4.0, false),
            (4, 8.0, false),
        ]);
        let mut repeat = FrameRepeatMaxPool::new(4);
        repeat.reset(env.reset().unwrap());
        let (_, reward, is_done, _) = repeat.step(&mut env, &NoAct).unwrap();
        assert_eq!(reward, 15.0);
        assert!(!is_done);
    }

    #[test]
    fn terminal_sub_step_exits_early() {
        let mut env = ScriptedEnv::new(vec![(10, 1.0, false), (20, 1.0, true), (99, 99.0, false)]);
        let mut repeat = FrameRepeatMaxPool::new(4);
        repeat.reset(env.reset().unwrap());
        let (_, reward, is_done, _) = repeat.step(&mut env, &NoAct).unwrap();
        assert_eq!(reward, 2.0);
        assert!(is_done);
        assert_eq!(env.t, 2, "remaining repeats are not executed");
    }

    #[test]
    fn first_sub_step_terminal_pools_against_reset_frame() {
        let mut env = ScriptedEnv::new(vec![(7, 0.5, true)]);
        let mut repeat = FrameRepeatMaxPool::new(4);
        repeat.reset(ScriptedEnv::frame(40));
        let (obs, _, is_done, _) = repeat.step(&mut env, &NoAct).unwrap();
        assert!(is_done);
        // Slot 1 still mirrors the reset frame, which dominates the pool.
        assert!(obs.buf.iter().all(|&v| v == 40));
    }
}
