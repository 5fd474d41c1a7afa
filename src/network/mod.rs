//! Feed-forward neural network built on [`DenseMatrix`]
//!
//! A network is an input width, an ordered list of layer widths, one
//! [`ActivationKind`] per layer and one weight matrix per layer. Layer `i`'s
//! weights have shape `(width of layer i-1 or input width, width of layer i)`.
//! There are no bias terms.
//!
//! Datasets are matrices whose rows are samples: input columns must equal the
//! input width, expected-output columns must equal the last layer width, and
//! both must have the same number of rows.
//!
//! - [`propagation`]: forward pass, cost and backpropagated gradient
//! - [`training`]: single gradient step, weight sanitizing and the adaptive
//!   training loop

pub mod propagation;
pub mod training;

use log::debug;
use rand::Rng;

use crate::error::{Error, Result};
use crate::matrix::{check_sampling_range, DenseMatrix};
use crate::utils::activations::ActivationKind;

pub use propagation::ForwardTrace;
pub use training::{default_keep_training, WeightBounds};

/// Fully connected feed-forward network without biases.
///
/// Cloning produces an independent deep copy, including the weights. Give
/// every thread its own clone; a network is never shared mutably.
///
/// # Example
///
/// ```
/// use dense_network::matrix::DenseMatrix;
/// use dense_network::network::FeedForwardNetwork;
/// use dense_network::utils::ActivationKind;
///
/// let mut network =
///     FeedForwardNetwork::new(2, &[1], &[ActivationKind::Identity]).unwrap();
/// network
///     .set_weights(0, DenseMatrix::from_array(&[[1.0], [1.0]]).unwrap())
///     .unwrap();
///
/// let input = DenseMatrix::from_array(&[[1.0, 2.0]]).unwrap();
/// let expected = DenseMatrix::from_array(&[[5.0]]).unwrap();
/// assert_eq!(network.forward(&input).unwrap().as_slice(), &[3.0]);
/// assert_eq!(network.cost(&input, &expected).unwrap(), 2.0);
/// ```
#[derive(Debug, Clone)]
pub struct FeedForwardNetwork {
    inputs: usize,
    layers: Vec<usize>,
    activations: Vec<ActivationKind>,
    weights: Vec<DenseMatrix>,
    trace: Option<ForwardTrace>,
}

impl FeedForwardNetwork {
    /// Creates a network with zero weights.
    ///
    /// Fails with [`Error::InvalidArgument`] when `inputs` is zero, `layers` is
    /// empty, any layer width is zero, or the activation count differs from
    /// the layer count.
    pub fn new(inputs: usize, layers: &[usize], activations: &[ActivationKind]) -> Result<Self> {
        if inputs < 1 {
            return Err(Error::InvalidArgument(
                "network needs at least one input".to_string(),
            ));
        }
        if layers.is_empty() {
            return Err(Error::InvalidArgument(
                "network needs at least one layer".to_string(),
            ));
        }
        if activations.len() != layers.len() {
            return Err(Error::InvalidArgument(format!(
                "{} activation functions given for {} layers",
                activations.len(),
                layers.len()
            )));
        }
        if let Some(layer) = layers.iter().position(|&size| size < 1) {
            return Err(Error::InvalidArgument(format!(
                "layer {} must have at least one unit",
                layer
            )));
        }

        let mut weights = Vec::with_capacity(layers.len());
        let mut fan_in = inputs;
        for &size in layers {
            weights.push(DenseMatrix::new(fan_in, size)?);
            fan_in = size;
        }

        debug!(
            "created network: {} inputs, layers {:?}, activations {:?}",
            inputs, layers, activations
        );

        Ok(Self {
            inputs,
            layers: layers.to_vec(),
            activations: activations.to_vec(),
            weights,
            trace: None,
        })
    }

    /// Number of input columns the network expects.
    pub fn input_count(&self) -> usize {
        self.inputs
    }

    /// Width of the last layer.
    pub fn output_count(&self) -> usize {
        // Construction guarantees at least one layer.
        self.layers[self.layers.len() - 1]
    }

    /// Number of layers, output layer included.
    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// Width of every layer, in order.
    pub fn layer_sizes(&self) -> &[usize] {
        &self.layers
    }

    /// Width of one layer; fails with [`Error::IndexOutOfRange`] past the last layer.
    pub fn layer_size(&self, layer: usize) -> Result<usize> {
        self.check_layer(layer)?;
        Ok(self.layers[layer])
    }

    /// Activation of every layer, in order.
    pub fn activations(&self) -> &[ActivationKind] {
        &self.activations
    }

    /// Activation of one layer.
    pub fn activation(&self, layer: usize) -> Result<ActivationKind> {
        self.check_layer(layer)?;
        Ok(self.activations[layer])
    }

    /// Replaces a layer's activation. The layer's weights are untouched.
    pub fn set_activation(&mut self, layer: usize, activation: ActivationKind) -> Result<()> {
        self.check_layer(layer)?;
        self.activations[layer] = activation;
        Ok(())
    }

    /// Total number of weights across all layers.
    pub fn parameter_count(&self) -> usize {
        self.weights.iter().map(|w| w.height() * w.width()).sum()
    }

    /// Copy of one layer's weight matrix.
    pub fn weights(&self, layer: usize) -> Result<DenseMatrix> {
        self.check_layer(layer)?;
        Ok(self.weights[layer].clone())
    }

    /// Copies of every layer's weight matrix, in layer order.
    pub fn all_weights(&self) -> Vec<DenseMatrix> {
        self.weights.clone()
    }

    /// Replaces one layer's weights. The new matrix must have the same shape.
    pub fn set_weights(&mut self, layer: usize, weights: DenseMatrix) -> Result<()> {
        self.check_layer(layer)?;
        self.check_weight_shape(layer, &weights)?;
        self.weights[layer] = weights;
        Ok(())
    }

    /// Replaces every layer's weights at once; nothing changes unless every
    /// matrix has the right shape.
    pub fn set_all_weights(&mut self, weights: Vec<DenseMatrix>) -> Result<()> {
        if weights.len() != self.layers.len() {
            return Err(Error::InvalidArgument(format!(
                "{} weight matrices given for {} layers",
                weights.len(),
                self.layers.len()
            )));
        }
        for (layer, matrix) in weights.iter().enumerate() {
            self.check_weight_shape(layer, matrix)?;
        }
        self.weights = weights;
        Ok(())
    }

    /// Draws every weight uniformly from `[min, max)`.
    pub fn randomize_weights<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        min: f64,
        max: f64,
    ) -> Result<()> {
        check_sampling_range(min, max)?;
        for weights in &mut self.weights {
            weights.fill_random(rng, min, max)?;
        }
        debug!("seeded {} weights from [{}, {})", self.parameter_count(), min, max);
        Ok(())
    }

    /// Draws layer `i`'s weights uniformly from `bounds[i]`.
    ///
    /// All bounds are validated before any weight changes.
    pub fn randomize_weights_per_layer<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        bounds: &[(f64, f64)],
    ) -> Result<()> {
        if bounds.len() != self.layers.len() {
            return Err(Error::InvalidArgument(format!(
                "{} weight bounds given for {} layers",
                bounds.len(),
                self.layers.len()
            )));
        }
        for &(min, max) in bounds {
            check_sampling_range(min, max)?;
        }
        for (weights, &(min, max)) in self.weights.iter_mut().zip(bounds) {
            weights.fill_random(rng, min, max)?;
        }
        debug!("seeded {} layers from per-layer bounds {:?}", bounds.len(), bounds);
        Ok(())
    }

    fn check_layer(&self, layer: usize) -> Result<()> {
        if layer >= self.layers.len() {
            return Err(Error::IndexOutOfRange {
                axis: "layer",
                index: layer,
                bound: self.layers.len(),
            });
        }
        Ok(())
    }

    fn check_weight_shape(&self, layer: usize, weights: &DenseMatrix) -> Result<()> {
        let expected = self.weights[layer].shape();
        if weights.shape() != expected {
            return Err(Error::DimensionMismatch {
                operation: "set_weights",
                lhs: expected,
                rhs: weights.shape(),
            });
        }
        Ok(())
    }
}
