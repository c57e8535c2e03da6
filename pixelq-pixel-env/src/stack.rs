//! Frame stacking.
use crate::obs::PixelObs;
use ndarray::{concatenate, Array3, Axis};
use std::collections::VecDeque;

/// A sliding window over the most recent preprocessed frames.
///
/// The stacked view gives the approximator short-term temporal context.
/// After the first reset the window always holds exactly `depth` frames.
pub struct FrameStacker {
    depth: usize,
    frames: VecDeque<Array3<f32>>,
}

impl FrameStacker {
    pub fn new(depth: usize) -> Self {
        assert!(depth >= 1);
        Self {
            depth,
            frames: VecDeque::with_capacity(depth),
        }
    }

    /// Clears the history and fills the whole window with the first
    /// post-reset frame (cold start).
    pub fn reset(&mut self, frame: Array3<f32>) -> PixelObs {
        self.frames.clear();
        for _ in 0..self.depth {
            self.frames.push_back(frame.clone());
        }
        self.stacked()
    }

    /// Pushes a frame into the window, evicting the oldest, and returns the
    /// new stacked view.
    pub fn observation(&mut self, frame: Array3<f32>) -> PixelObs {
        self.frames.pop_front();
        self.frames.push_back(frame);
        self.stacked()
    }

    fn stacked(&self) -> PixelObs {
        let views = self.frames.iter().map(|f| f.view()).collect::<Vec<_>>();
        let frames = concatenate(Axis(0), &views).expect("frames in the window share one shape");
        PixelObs { frames }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(value: f32) -> Array3<f32> {
        Array3::from_elem((1, 2, 2), value)
    }

    #[test]
    fn cold_start_fills_window_with_first_frame() {
        let mut stacker = FrameStacker::new(4);
        let obs = stacker.reset(frame(0.25));
        assert_eq!(obs.frames.shape(), &[4, 2, 2]);
        assert!(obs.frames.iter().all(|&v| v == 0.25));
    }

    #[test]
    fn pushes_evict_oldest_frame() {
        let mut stacker = FrameStacker::new(3);
        stacker.reset(frame(0.0));
        stacker.observation(frame(0.1));
        let obs = stacker.observation(frame(0.2));
        assert_eq!(obs.frames.shape(), &[3, 2, 2]);
        assert_eq!(obs.frames[[0, 0, 0]], 0.0);
        assert_eq!(obs.frames[[1, 0, 0]], 0.1);
        assert_eq!(obs.frames[[2, 0, 0]], 0.2);
    }

    #[test]
    fn window_length_is_invariant() {
        let mut stacker = FrameStacker::new(2);
        stacker.reset(frame(0.0));
        for i in 0..10 {
            let obs = stacker.observation(frame(i as f32));
            assert_eq!(obs.frames.shape(), &[2, 2, 2]);
        }
    }

    #[test]
    fn reset_clears_previous_episode() {
        let mut stacker = FrameStacker::new(2);
        stacker.reset(frame(0.9));
        stacker.observation(frame(0.8));
        let obs = stacker.reset(frame(0.5));
        assert!(obs.frames.iter().all(|&v| v == 0.5));
    }
}
