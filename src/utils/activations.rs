//! Activation functions for feed-forward layers
//!
//! This module provides the closed catalog of pointwise activations a layer can
//! use. Each kind yields a function and its analytic derivative, both taken
//! with respect to the pre-activation value `z`:
//! - Identity
//! - Hyperbolic tangent
//! - Logistic sigmoid
//! - Rectified linear unit
//! - Softplus
//! - Leaky rectified linear unit (fixed leak of 0.01)

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::Error;

/// Slope of [`ActivationKind::LeakyRelu`] for negative inputs.
pub const LEAKY_RELU_ALPHA: f64 = 0.01;

/// Sigmoid activation function.
///
/// Returns the sigmoid of the input: 1 / (1 + exp(-x))
pub fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// Sigmoid derivative with respect to the pre-activation `x`.
pub fn sigmoid_derivative(x: f64) -> f64 {
    let s = sigmoid(x);
    s * (1.0 - s)
}

/// Softplus `ln(1 + exp(x))`, evaluated without overflow for large `x`.
pub fn softplus(x: f64) -> f64 {
    if x > 0.0 {
        x + (-x).exp().ln_1p()
    } else {
        x.exp().ln_1p()
    }
}

/// Activation selected for a layer.
///
/// Kinds are compared by tag. They deserialize from snake_case names, so an
/// architecture file can say `"activation": "leaky_relu"`.
///
/// # Example
///
/// ```
/// use dense_network::utils::activations::ActivationKind;
///
/// let tanh: ActivationKind = "tanh".parse().unwrap();
/// assert_eq!(tanh.function(0.0), 0.0);
/// assert_eq!(tanh.derivative(0.0), 1.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivationKind {
    /// `f(x) = x`
    Identity,
    Tanh,
    /// `1 / (1 + e^-x)`
    Sigmoid,
    Relu,
    /// `ln(1 + e^x)`
    Softplus,
    /// `x` for positive input, `0.01 x` otherwise
    LeakyRelu,
}

impl ActivationKind {
    /// Every kind in the catalog.
    pub const ALL: [ActivationKind; 6] = [
        ActivationKind::Identity,
        ActivationKind::Tanh,
        ActivationKind::Sigmoid,
        ActivationKind::Relu,
        ActivationKind::Softplus,
        ActivationKind::LeakyRelu,
    ];

    /// Evaluates the activation at `x`.
    pub fn function(self, x: f64) -> f64 {
        match self {
            ActivationKind::Identity => x,
            ActivationKind::Tanh => x.tanh(),
            ActivationKind::Sigmoid => sigmoid(x),
            ActivationKind::Relu => x.max(0.0),
            ActivationKind::Softplus => softplus(x),
            ActivationKind::LeakyRelu => {
                if x > 0.0 {
                    x
                } else {
                    LEAKY_RELU_ALPHA * x
                }
            }
        }
    }

    /// Evaluates the derivative of the activation at `x`.
    ///
    /// The rectifiers use the left derivative at zero.
    pub fn derivative(self, x: f64) -> f64 {
        match self {
            ActivationKind::Identity => 1.0,
            ActivationKind::Tanh => {
                let t = x.tanh();
                1.0 - t * t
            }
            ActivationKind::Sigmoid => sigmoid_derivative(x),
            ActivationKind::Relu => {
                if x > 0.0 {
                    1.0
                } else {
                    0.0
                }
            }
            ActivationKind::Softplus => sigmoid(x),
            ActivationKind::LeakyRelu => {
                if x > 0.0 {
                    1.0
                } else {
                    LEAKY_RELU_ALPHA
                }
            }
        }
    }

    /// The `(function, derivative)` pair as standalone function values.
    pub fn pair(self) -> (impl Fn(f64) -> f64, impl Fn(f64) -> f64) {
        (move |x| self.function(x), move |x| self.derivative(x))
    }

    /// Snake-case name used in architecture files and by `Display`.
    pub fn name(self) -> &'static str {
        match self {
            ActivationKind::Identity => "identity",
            ActivationKind::Tanh => "tanh",
            ActivationKind::Sigmoid => "sigmoid",
            ActivationKind::Relu => "relu",
            ActivationKind::Softplus => "softplus",
            ActivationKind::LeakyRelu => "leaky_relu",
        }
    }
}

impl fmt::Display for ActivationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ActivationKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.to_lowercase();
        ActivationKind::ALL
            .into_iter()
            .find(|kind| kind.name() == lowered)
            .ok_or_else(|| {
                let names: Vec<&str> = ActivationKind::ALL.iter().map(|k| k.name()).collect();
                Error::InvalidArgument(format!(
                    "unknown activation '{}'. Must be one of: {}",
                    s,
                    names.join(", ")
                ))
            })
    }
}
