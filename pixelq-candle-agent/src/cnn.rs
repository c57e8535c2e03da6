//! Convolutional Q-network with the architecture of the DQN paper.
use anyhow::Result;
use candle_core::Tensor;
use candle_nn::{
    conv::Conv2dConfig,
    conv2d_no_bias, linear,
    sequential::{seq, Sequential},
    Module, VarBuilder,
};
use serde::{Deserialize, Serialize};

/// Configuration of [`Cnn`].
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct CnnConfig {
    /// Number of stacked frames, the input channel count.
    pub n_stack: usize,

    /// Height of an input frame.
    pub height: usize,

    /// Width of an input frame.
    pub width: usize,

    /// Output dimension, equal to the number of actions.
    pub out_dim: usize,
}

impl CnnConfig {
    pub fn new(n_stack: usize, height: usize, width: usize, out_dim: usize) -> Self {
        Self {
            n_stack,
            height,
            width,
            out_dim,
        }
    }
}

/// Convolutional feature extractor with a fully connected head.
pub struct Cnn {
    seq: Sequential,
}

impl Cnn {
    fn stride(s: usize) -> Conv2dConfig {
        Conv2dConfig {
            stride: s,
            ..Default::default()
        }
    }

    fn conv_out(n: usize, k: usize, s: usize) -> usize {
        assert!(n >= k, "input extent {} is smaller than kernel {}", n, k);
        (n - k) / s + 1
    }

    /// Builds the network on the given [`VarBuilder`].
    ///
    /// The width of the fully connected head is derived from the configured
    /// input shape, so frame sizes other than 84x84 work unchanged.
    pub fn build(vb: VarBuilder, config: &CnnConfig) -> Result<Self> {
        let h = Self::conv_out(Self::conv_out(Self::conv_out(config.height, 8, 4), 4, 2), 3, 1);
        let w = Self::conv_out(Self::conv_out(Self::conv_out(config.width, 8, 4), 4, 2), 3, 1);
        let fc_in = 64 * h * w;

        let seq = seq()
            .add(conv2d_no_bias(
                config.n_stack,
                32,
                8,
                Self::stride(4),
                vb.pp("c1"),
            )?)
            .add_fn(|xs| xs.relu())
            .add(conv2d_no_bias(32, 64, 4, Self::stride(2), vb.pp("c2"))?)
            .add_fn(|xs| xs.relu())
            .add(conv2d_no_bias(64, 64, 3, Self::stride(1), vb.pp("c3"))?)
            .add_fn(|xs| xs.relu()?.flatten_from(1))
            .add(linear(fc_in, 512, vb.pp("l1"))?)
            .add_fn(|xs| xs.relu())
            .add(linear(512, config.out_dim, vb.pp("l2"))?);

        Ok(Self { seq })
    }

    /// Forward pass over a `(batch, n_stack, height, width)` tensor.
    pub fn forward(&self, xs: &Tensor) -> Result<Tensor> {
        Ok(self.seq.forward(xs)?)
    }
}
