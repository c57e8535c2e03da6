//! Configuration of [`PixelPipeline`](super::PixelPipeline).
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, Write},
    path::Path,
};

/// Configuration of [`PixelPipeline`](super::PixelPipeline).
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct PixelPipelineConfig {
    /// Height of a preprocessed frame.
    pub frame_height: u32,

    /// Width of a preprocessed frame.
    pub frame_width: u32,

    /// Number of preprocessed frames stacked into one observation.
    pub stack_depth: usize,

    /// Number of environment sub-steps a chosen action is repeated for.
    pub action_repeat: usize,
}

impl Default for PixelPipelineConfig {
    fn default() -> Self {
        Self {
            frame_height: 84,
            frame_width: 84,
            stack_depth: 4,
            action_repeat: 4,
        }
    }
}

impl PixelPipelineConfig {
    /// Sets the size of a preprocessed frame.
    pub fn frame_size(mut self, height: u32, width: u32) -> Self {
        self.frame_height = height;
        self.frame_width = width;
        self
    }

    /// Sets the number of stacked frames.
    pub fn stack_depth(mut self, stack_depth: usize) -> Self {
        self.stack_depth = stack_depth;
        self
    }

    /// Sets the action repeat count.
    pub fn action_repeat(mut self, action_repeat: usize) -> Self {
        self.action_repeat = action_repeat;
        self
    }

    /// Constructs [`PixelPipelineConfig`] from a YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let b = serde_yaml::from_reader(rdr)?;
        Ok(b)
    }

    /// Saves [`PixelPipelineConfig`] as a YAML file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempdir::TempDir;

    #[test]
    fn yaml_roundtrip() -> Result<()> {
        let dir = TempDir::new("pixel_pipeline_config")?;
        let path = dir.path().join("pipeline.yaml");
        let config = PixelPipelineConfig::default()
            .frame_size(64, 48)
            .stack_depth(3)
            .action_repeat(2);
        config.save(&path)?;
        assert_eq!(PixelPipelineConfig::load(&path)?, config);
        Ok(())
    }
}
