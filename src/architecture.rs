//! Architecture configuration structures
//!
//! This module describes a network topology in JSON so networks can be built
//! without code changes.
//!
//! ```json
//! {
//!   "inputs": 2,
//!   "layers": [
//!     { "size": 4, "activation": "tanh" },
//!     { "size": 1, "activation": "sigmoid" }
//!   ]
//! }
//! ```

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::network::FeedForwardNetwork;
use crate::utils::activations::ActivationKind;

/// One layer of the architecture: its width and activation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LayerConfig {
    /// Number of units in the layer
    pub size: usize,

    /// Activation name: "identity", "tanh", "sigmoid", "relu", "softplus" or "leaky_relu"
    pub activation: ActivationKind,
}

/// Network input width plus the ordered layer list.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ArchitectureConfig {
    /// Number of input columns
    pub inputs: usize,

    /// Layers from first hidden layer to output layer
    pub layers: Vec<LayerConfig>,
}

impl ArchitectureConfig {
    /// Parses and validates an architecture from JSON text.
    pub fn from_json(text: &str) -> Result<Self> {
        let config: ArchitectureConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the topology rules a network enforces at construction.
    pub fn validate(&self) -> Result<()> {
        if self.inputs < 1 {
            return Err(Error::Config("inputs must be at least 1".to_string()));
        }
        if self.layers.is_empty() {
            return Err(Error::Config(
                "architecture must contain at least one layer".to_string(),
            ));
        }
        if let Some(index) = self.layers.iter().position(|layer| layer.size < 1) {
            return Err(Error::Config(format!(
                "layer {} must have size at least 1",
                index
            )));
        }
        Ok(())
    }

    /// Layer widths in order.
    pub fn layer_sizes(&self) -> Vec<usize> {
        self.layers.iter().map(|layer| layer.size).collect()
    }

    /// Layer activations in order.
    pub fn activations(&self) -> Vec<ActivationKind> {
        self.layers.iter().map(|layer| layer.activation).collect()
    }

    /// Builds a zero-weight network with this topology.
    pub fn build(&self) -> Result<FeedForwardNetwork> {
        FeedForwardNetwork::new(self.inputs, &self.layer_sizes(), &self.activations())
    }
}

/// Loads an architecture configuration from a JSON file.
///
/// # Examples
///
/// ```no_run
/// use dense_network::architecture::load_architecture;
///
/// let arch = load_architecture("config/xor_architecture.json").unwrap();
/// let network = arch.build().unwrap();
/// assert_eq!(network.input_count(), 3);
/// ```
pub fn load_architecture<P: AsRef<Path>>(path: P) -> Result<ArchitectureConfig> {
    let contents = fs::read_to_string(path)?;
    ArchitectureConfig::from_json(&contents)
}
