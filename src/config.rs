//! Configuration structures for training
//!
//! This module provides the training parameters a run is driven by: starting
//! learning rate, iteration cap, weight seeding range, optional clamp range for
//! the post-step sanitize pass, and an optional RNG seed.

use std::fs;
use std::path::Path;

use rand::rngs::StdRng;
use serde::Deserialize;

use crate::error::{Error, Result};
use crate::matrix::check_sampling_range;
use crate::network::training::{WeightBounds, DEFAULT_MAX_ITERATIONS};
use crate::utils::rng::seeded_or_entropy;

fn default_max_iterations() -> usize {
    DEFAULT_MAX_ITERATIONS
}

fn default_init_min() -> f64 {
    -1.0
}

fn default_init_max() -> f64 {
    1.0
}

/// Training parameters, usually parsed from a JSON file.
///
/// Only `learning_rate` is required:
///
/// - **max_iterations**: default 100
/// - **init_min** / **init_max**: weight seeding range, default `[-1, 1)`
/// - **clamp_min** / **clamp_max**: give both to clamp weights after each step
/// - **seed**: fixed seed for reproducible runs; entropy-seeded when absent
///
/// # Example
///
/// ```json
/// {
///   "learning_rate": 0.5,
///   "max_iterations": 2000,
///   "init_min": -0.5,
///   "init_max": 0.5,
///   "seed": 42
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TrainingConfig {
    /// Starting learning rate; adapted during training
    pub learning_rate: f64,

    /// Number of iterations before training stops
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,

    /// Lower bound for random weight seeding
    #[serde(default = "default_init_min")]
    pub init_min: f64,

    /// Upper bound (exclusive) for random weight seeding
    #[serde(default = "default_init_max")]
    pub init_max: f64,

    /// Lower clamp bound applied after every step
    pub clamp_min: Option<f64>,

    /// Upper clamp bound applied after every step
    pub clamp_max: Option<f64>,

    /// Seed for the weight-seeding generator
    pub seed: Option<u64>,
}

impl TrainingConfig {
    /// Parses and validates a configuration from JSON text.
    pub fn from_json(text: &str) -> Result<Self> {
        let config: TrainingConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks value ranges that serde cannot express.
    ///
    /// # Returns
    ///
    /// `Err(Error::Config)` for a non-positive or non-finite learning rate, a
    /// zero iteration cap, an empty or non-finite init range, or a clamp range
    /// that is inverted or only half specified.
    pub fn validate(&self) -> Result<()> {
        if !(self.learning_rate.is_finite() && self.learning_rate > 0.0) {
            return Err(Error::Config(format!(
                "learning_rate must be finite and positive, got {}",
                self.learning_rate
            )));
        }
        if self.max_iterations == 0 {
            return Err(Error::Config("max_iterations must be positive".to_string()));
        }
        check_sampling_range(self.init_min, self.init_max)
            .map_err(|e| Error::Config(format!("init range: {}", e)))?;
        self.weight_bounds()?;
        Ok(())
    }

    /// Sanitize bounds for each gradient step.
    pub fn weight_bounds(&self) -> Result<WeightBounds> {
        match (self.clamp_min, self.clamp_max) {
            (None, None) => Ok(WeightBounds::Unbounded),
            (Some(min), Some(max)) => WeightBounds::range(min, max)
                .map_err(|e| Error::Config(format!("clamp range: {}", e))),
            _ => Err(Error::Config(
                "clamp_min and clamp_max must be given together".to_string(),
            )),
        }
    }

    /// Continuation predicate: stop at `max_iterations` or when the learning
    /// rate reaches zero.
    pub fn keep_training(&self) -> impl FnMut(usize, f64, f64) -> bool {
        let max_iterations = self.max_iterations;
        move |iteration, learning_rate, _cost| iteration < max_iterations && learning_rate > 0.0
    }

    /// Generator for weight seeding: seeded when `seed` is set.
    pub fn rng(&self) -> StdRng {
        seeded_or_entropy(self.seed)
    }
}

/// Loads a training configuration from a JSON file.
///
/// # Examples
///
/// ```no_run
/// use dense_network::config::load_config;
///
/// let cfg = load_config("config/xor_training.json").unwrap();
/// assert!(cfg.learning_rate > 0.0);
/// ```
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<TrainingConfig> {
    let contents = fs::read_to_string(path)?;
    TrainingConfig::from_json(&contents)
}
