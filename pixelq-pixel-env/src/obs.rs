//! Observations of pixel environments.
use ndarray::Array3;
use pixelq_core::{
    error::PixelqError,
    replay_buffer::ObsBatch,
    Obs,
};

/// A raw RGB8 frame as emitted by the base environment.
#[derive(Debug, Clone)]
pub struct RawFrame {
    pub width: u32,
    pub height: u32,
    /// Interleaved RGB bytes, `width * height * 3` of them.
    pub buf: Vec<u8>,
}

impl RawFrame {
    pub fn new(width: u32, height: u32, buf: Vec<u8>) -> Self {
        Self { width, height, buf }
    }

    /// An empty placeholder frame, used before the first reset.
    pub fn empty() -> Self {
        Self {
            width: 0,
            height: 0,
            buf: vec![],
        }
    }

    /// Pixel-wise maximum of two frames of identical dimensions.
    pub fn pixel_max(&self, other: &Self) -> Result<Self, PixelqError> {
        if self.width != other.width || self.height != other.height {
            return Err(PixelqError::ShapeMismatch {
                expected: vec![self.height as usize, self.width as usize, 3],
                got: vec![other.height as usize, other.width as usize, 3],
            });
        }
        let buf = self
            .buf
            .iter()
            .zip(other.buf.iter())
            .map(|(&a, &b)| a.max(b))
            .collect();
        Ok(Self {
            width: self.width,
            height: self.height,
            buf,
        })
    }
}

impl Obs for RawFrame {}

/// The stacked observation produced by the pipeline.
///
/// Shape is `(stack_depth, height, width)` with values in `[0, 1]`, invariant
/// for the lifetime of a run.
#[derive(Debug, Clone)]
pub struct PixelObs {
    pub frames: Array3<f32>,
}

impl From<Array3<f32>> for PixelObs {
    fn from(frames: Array3<f32>) -> Self {
        Self { frames }
    }
}

impl Obs for PixelObs {}

impl From<PixelObs> for ObsBatch {
    fn from(obs: PixelObs) -> Self {
        let shape = obs.frames.shape().to_vec();
        let buf = obs.frames.iter().copied().collect();
        ObsBatch::single(&shape, buf)
    }
}
