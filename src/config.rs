use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::ModelError;
use crate::growth::DEFAULT_KERNEL_SIZE;
use crate::model::ThresholdRule;

fn default_builtup_class() -> i32 {
    1
}

fn default_kernel_size() -> usize {
    DEFAULT_KERNEL_SIZE
}

fn default_cell_size() -> f64 {
    30.0
}

/// Run parameters for one simulation, usually loaded from a JSON file.
/// `factor_thresholds` are signed magnitudes in factor registration order;
/// see [`ThresholdRule`] for the sign convention.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SimulationConfig {
    #[serde(default = "default_builtup_class")]
    pub builtup_class: i32,
    pub builtup_neighbor_threshold: usize,
    #[serde(default = "default_kernel_size")]
    pub kernel_size: usize,
    /// Linear cell size in the raster's spatial units (meters).
    #[serde(default = "default_cell_size")]
    pub cell_size: f64,
    pub factor_thresholds: Vec<f64>,
}

impl SimulationConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("opening run configuration {}", path.display()))?;
        let config: SimulationConfig = serde_json::from_reader(file)
            .with_context(|| format!("parsing run configuration {}", path.display()))?;
        Ok(config)
    }

    /// Threshold rules in registration order. Fails on any zero magnitude.
    pub fn rules(&self) -> Result<Vec<ThresholdRule>, ModelError> {
        ThresholdRule::from_signed_list(&self.factor_thresholds)
    }
}
