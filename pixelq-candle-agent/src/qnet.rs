//! The Q-network model.
use crate::{
    cnn::{Cnn, CnnConfig},
    opt::{Optimizer, OptimizerConfig},
    util::NamedTensors,
};
use anyhow::Result;
use candle_core::{shape::D, DType, Device, Tensor};
use candle_nn::{loss::mse, VarBuilder, VarMap};
use log::info;
use ndarray::Array2;
use pixelq_core::{error::PixelqError, replay_buffer::ObsBatch, ValueApproximator};
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, Write},
    path::Path,
};

/// Configuration of [`QNetwork`].
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct QNetworkConfig {
    /// Number of stacked frames in an observation.
    pub n_stack: usize,

    /// Height of an input frame.
    pub height: usize,

    /// Width of an input frame.
    pub width: usize,

    /// Size of the discrete action set.
    pub n_actions: usize,

    /// Optimizer configuration.
    pub opt_config: OptimizerConfig,
}

impl Default for QNetworkConfig {
    fn default() -> Self {
        Self {
            n_stack: 4,
            height: 84,
            width: 84,
            n_actions: 0,
            opt_config: OptimizerConfig::default(),
        }
    }
}

impl QNetworkConfig {
    /// Sets the number of stacked frames.
    pub fn n_stack(mut self, n_stack: usize) -> Self {
        self.n_stack = n_stack;
        self
    }

    /// Sets the input frame size.
    pub fn frame_size(mut self, height: usize, width: usize) -> Self {
        self.height = height;
        self.width = width;
        self
    }

    /// Sets the number of actions.
    pub fn n_actions(mut self, n_actions: usize) -> Self {
        self.n_actions = n_actions;
        self
    }

    /// Sets the optimizer configuration.
    pub fn opt_config(mut self, opt_config: OptimizerConfig) -> Self {
        self.opt_config = opt_config;
        self
    }

    /// Constructs [`QNetworkConfig`] from a YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let b = serde_yaml::from_reader(rdr)?;
        Ok(b)
    }

    /// Saves [`QNetworkConfig`] as a YAML file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        Ok(())
    }
}

/// A convolutional action-value function on candle.
///
/// Owns its [`VarMap`] and optimizer; the agent owns two instances of this
/// model (online and target network) and keeps them synchronized through
/// [`NamedTensors`] snapshots.
pub struct QNetwork {
    device: Device,
    varmap: VarMap,
    cnn: Cnn,
    opt: Optimizer,
    n_stack: usize,
    height: usize,
    width: usize,
    n_actions: usize,
}

impl QNetwork {
    /// Builds a freshly initialized network on the given device.
    pub fn build(config: &QNetworkConfig, device: Device) -> Result<Self> {
        let varmap = VarMap::new();
        let cnn = {
            let vb = VarBuilder::from_varmap(&varmap, DType::F32, &device);
            let cnn_config = CnnConfig::new(
                config.n_stack,
                config.height,
                config.width,
                config.n_actions,
            );
            Cnn::build(vb, &cnn_config)?
        };
        let opt = config.opt_config.build(varmap.all_vars())?;

        Ok(Self {
            device,
            varmap,
            cnn,
            opt,
            n_stack: config.n_stack,
            height: config.height,
            width: config.width,
            n_actions: config.n_actions,
        })
    }

    fn input_tensor(&self, obs: &ObsBatch) -> Result<Tensor> {
        let m = self.n_stack * self.height * self.width;
        if obs.m != m {
            return Err(PixelqError::ShapeMismatch {
                expected: vec![self.n_stack, self.height, self.width],
                got: obs.shape.clone(),
            }
            .into());
        }
        let xs = Tensor::from_slice(
            &obs.buf,
            (obs.n, self.n_stack, self.height, self.width),
            &self.device,
        )?;
        Ok(xs)
    }

    fn forward_values(&self, xs: &Tensor) -> Result<Vec<Vec<f32>>> {
        let ys = self.cnn.forward(xs)?.detach();
        Ok(ys.to_vec2::<f32>()?)
    }

    fn fit(&mut self, xs: &Tensor, acts: &[u8], targets: &[f32]) -> Result<f32> {
        let acts = acts.iter().map(|&a| a as i64).collect::<Vec<_>>();
        let acts = Tensor::from_slice(&acts, (targets.len(), 1), &self.device)?;
        let tgt = Tensor::from_slice(targets, &[targets.len()], &self.device)?;

        let pred = self
            .cnn
            .forward(xs)?
            .gather(&acts, D::Minus1)?
            .squeeze(D::Minus1)?;
        let loss = mse(&pred, &tgt)?;
        self.opt.backward_step(&loss)?;

        Ok(loss.to_scalar::<f32>()?)
    }
}

impl ValueApproximator for QNetwork {
    type Input = ObsBatch;
    type Params = NamedTensors;

    fn predict(&self, obs: &ObsBatch) -> Result<Array2<f32>> {
        let xs = self.input_tensor(obs)?;
        let values = self
            .forward_values(&xs)
            .map_err(|e| PixelqError::Approximator(e.to_string()))?;
        let flat = values.into_iter().flatten().collect::<Vec<_>>();
        Ok(Array2::from_shape_vec((obs.n, self.n_actions), flat)?)
    }

    fn train_step(&mut self, obs: &ObsBatch, acts: &[u8], targets: &[f32]) -> Result<f32> {
        let xs = self.input_tensor(obs)?;
        self.fit(&xs, acts, targets)
            .map_err(|e| PixelqError::Approximator(e.to_string()).into())
    }

    fn parameters(&self) -> Result<NamedTensors> {
        NamedTensors::copy_from(&self.varmap)
    }

    fn load_parameters(&mut self, params: &NamedTensors) -> Result<()> {
        params.copy_to(&self.varmap)
    }

    fn save(&self, path: &Path) -> Result<()> {
        self.varmap.save(path)?;
        info!("saved q-network parameters to {:?}", path);
        Ok(())
    }

    fn load(&mut self, path: &Path) -> Result<()> {
        self.varmap.load(path)?;
        info!("loaded q-network parameters from {:?}", path);
        Ok(())
    }
}
