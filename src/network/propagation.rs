//! Forward pass, cost and gradient
//!
//! For layer 0, `z0 = input · W0` and `a0 = f0(z0)`; for every later layer
//! `z_i = a_{i-1} · W_i` and `a_i = f_i(z_i)`. The cost is the mean squared
//! error with a 1/2 factor:
//!
//! `cost = 1 / (2 · rows) · Σ (expected - prediction)²`
//!
//! and [`FeedForwardNetwork::gradient`] returns `∂cost/∂W_i` for every layer.

use super::FeedForwardNetwork;
use crate::error::{Error, Result};
use crate::matrix::DenseMatrix;

/// Pre-activation (`z`) and activation (`a`) values of every layer for one
/// input batch.
#[derive(Debug, Clone)]
pub struct ForwardTrace {
    pre_activations: Vec<DenseMatrix>,
    activations: Vec<DenseMatrix>,
}

impl ForwardTrace {
    /// `z_i` for every layer.
    pub fn pre_activations(&self) -> &[DenseMatrix] {
        &self.pre_activations
    }

    /// `a_i = f_i(z_i)` for every layer.
    pub fn activations(&self) -> &[DenseMatrix] {
        &self.activations
    }

    /// Activation of the last layer.
    pub fn output(&self) -> &DenseMatrix {
        &self.activations[self.activations.len() - 1]
    }
}

impl FeedForwardNetwork {
    fn check_input(&self, input: &DenseMatrix) -> Result<()> {
        if input.width() != self.inputs {
            return Err(Error::DimensionMismatch {
                operation: "forward",
                lhs: input.shape(),
                rhs: self.weights[0].shape(),
            });
        }
        Ok(())
    }

    pub(crate) fn check_dataset(&self, input: &DenseMatrix, expected: &DenseMatrix) -> Result<()> {
        self.check_input(input)?;
        if expected.width() != self.output_count() {
            return Err(Error::ShapeMismatch(format!(
                "expected output has {} columns but the network produces {}",
                expected.width(),
                self.output_count()
            )));
        }
        if expected.height() != input.height() {
            return Err(Error::ShapeMismatch(format!(
                "input has {} rows but expected output has {}",
                input.height(),
                expected.height()
            )));
        }
        Ok(())
    }

    /// Runs the forward pass without touching the cached trace.
    pub fn trace(&self, input: &DenseMatrix) -> Result<ForwardTrace> {
        self.check_input(input)?;

        let mut pre_activations = Vec::with_capacity(self.layers.len());
        let mut activations: Vec<DenseMatrix> = Vec::with_capacity(self.layers.len());
        for (layer, (weights, &kind)) in self.weights.iter().zip(&self.activations).enumerate() {
            let previous = if layer == 0 {
                input
            } else {
                &activations[layer - 1]
            };
            let z = previous.dot(weights)?;
            let a = z.apply(|x| kind.function(x));
            pre_activations.push(z);
            activations.push(a);
        }

        Ok(ForwardTrace {
            pre_activations,
            activations,
        })
    }

    /// Runs the forward pass and returns a copy of the last layer's activation.
    ///
    /// The per-layer `z`/`a` values are cached for inspection through
    /// [`last_trace`](Self::last_trace) and are replaced on every call.
    pub fn forward(&mut self, input: &DenseMatrix) -> Result<DenseMatrix> {
        let trace = self.trace(input)?;
        let output = trace.output().clone();
        self.trace = Some(trace);
        Ok(output)
    }

    /// Forward pass for callers holding a shared reference; the cache is left
    /// alone.
    pub fn predict(&self, input: &DenseMatrix) -> Result<DenseMatrix> {
        let trace = self.trace(input)?;
        Ok(trace.output().clone())
    }

    /// Trace recorded by the most recent [`forward`](Self::forward), [`cost`](Self::cost)
    /// or [`gradient`](Self::gradient) call.
    pub fn last_trace(&self) -> Option<&ForwardTrace> {
        self.trace.as_ref()
    }

    /// Mean squared error of the network's prediction against `expected`.
    pub fn cost(&mut self, input: &DenseMatrix, expected: &DenseMatrix) -> Result<f64> {
        self.check_dataset(input, expected)?;
        let prediction = self.forward(input)?;
        Ok(mean_squared_error(&prediction, expected))
    }

    /// Gradient of [`cost`](Self::cost) with respect to every weight, one
    /// matrix per layer shaped like that layer's weights.
    pub fn gradient(
        &mut self,
        input: &DenseMatrix,
        expected: &DenseMatrix,
    ) -> Result<Vec<DenseMatrix>> {
        self.check_dataset(input, expected)?;
        let trace = self.trace(input)?;
        let gradients = self.backpropagate(input, expected, &trace)?;
        self.trace = Some(trace);
        Ok(gradients)
    }

    fn backpropagate(
        &self,
        input: &DenseMatrix,
        expected: &DenseMatrix,
        trace: &ForwardTrace,
    ) -> Result<Vec<DenseMatrix>> {
        let last = self.layers.len() - 1;
        // The cost averages over rows, so every sample's error carries 1/rows.
        let scale = 1.0 / input.height() as f64;

        let error = trace.output().subtract(expected)?.scalar_multiply(scale);
        let mut delta = error.multiply_elementwise(&self.slope(last, trace))?;

        let mut gradients = Vec::with_capacity(self.layers.len());
        for layer in (1..=last).rev() {
            gradients.push(trace.activations[layer - 1].transpose().dot(&delta)?);
            delta = delta
                .dot(&self.weights[layer].transpose())?
                .multiply_elementwise(&self.slope(layer - 1, trace))?;
        }
        gradients.push(input.transpose().dot(&delta)?);
        gradients.reverse();

        Ok(gradients)
    }

    /// `f'_layer(z_layer)` elementwise.
    fn slope(&self, layer: usize, trace: &ForwardTrace) -> DenseMatrix {
        let kind = self.activations[layer];
        trace.pre_activations[layer].apply(|x| kind.derivative(x))
    }
}

fn mean_squared_error(prediction: &DenseMatrix, expected: &DenseMatrix) -> f64 {
    let sum: f64 = prediction
        .as_slice()
        .iter()
        .zip(expected.as_slice())
        .map(|(p, e)| (e - p) * (e - p))
        .sum();
    sum / (2.0 * prediction.height() as f64)
}
