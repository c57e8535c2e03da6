//! Frame reduction.
use crate::obs::RawFrame;
use anyhow::Result;
use image::{
    imageops::{grayscale, resize, FilterType::Triangle},
    ImageBuffer, Luma, Rgb,
};
use ndarray::Array3;
use pixelq_core::error::PixelqError;

/// Reduces a raw RGB frame to a small normalized grayscale frame.
///
/// A pure function of its input: no history, no side effects. The output has
/// shape `(1, height, width)` with intensities scaled into `[0, 1]`. The
/// Triangle filter gives anti-aliased downsampling.
#[derive(Debug, Clone)]
pub struct FramePreprocessor {
    height: u32,
    width: u32,
}

impl FramePreprocessor {
    pub fn new(height: u32, width: u32) -> Self {
        assert!(height > 0 && width > 0);
        Self { height, width }
    }

    /// Grayscales, resizes and normalizes one raw frame.
    pub fn observation(&self, frame: &RawFrame) -> Result<Array3<f32>> {
        let img = ImageBuffer::<Rgb<u8>, Vec<u8>>::from_vec(
            frame.width,
            frame.height,
            frame.buf.clone(),
        )
        .ok_or_else(|| PixelqError::ShapeMismatch {
            expected: vec![frame.height as usize, frame.width as usize, 3],
            got: vec![frame.buf.len()],
        })?;
        let img = resize(&img, self.width, self.height, Triangle);
        let img: ImageBuffer<Luma<u8>, Vec<u8>> = grayscale(&img);
        let data = img
            .to_vec()
            .iter()
            .map(|&v| v as f32 / 255.0)
            .collect::<Vec<_>>();
        let frame = Array3::from_shape_vec(
            (1, self.height as usize, self.width as usize),
            data,
        )?;
        Ok(frame)
    }
}
