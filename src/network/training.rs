//! Gradient steps and the adaptive training loop
//!
//! [`FeedForwardNetwork::single_step`] moves every weight against its gradient
//! and then sanitizes the result. [`FeedForwardNetwork::train`] repeats that
//! step under an accept/reject rule:
//!
//! 1. snapshot the weights and take one step at the current learning rate
//! 2. recompute the cost
//! 3. if the cost did not increase, keep the step and grow the rate by 1.1
//! 4. otherwise restore the snapshot and halve the rate
//!
//! so the weights always hold the best cost seen so far. The loop runs while a
//! caller-supplied predicate `(iteration, learning_rate, cost) -> bool` holds.

use log::{info, trace, warn};

use super::FeedForwardNetwork;
use crate::error::{Error, Result};
use crate::matrix::{check_bounds, DenseMatrix};
use crate::utils::lr_scheduler::{AdaptiveLearningRate, LRScheduler};

/// Iteration cap of [`default_keep_training`].
pub const DEFAULT_MAX_ITERATIONS: usize = 100;

/// How weights are sanitized after a gradient step.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum WeightBounds {
    /// NaN becomes 0 and infinities become `f64::MAX` / `f64::MIN`.
    #[default]
    Unbounded,
    /// NaN becomes the midpoint and values are clamped into `[min, max]`.
    Range { min: f64, max: f64 },
}

impl WeightBounds {
    /// Checked constructor for [`WeightBounds::Range`].
    pub fn range(min: f64, max: f64) -> Result<Self> {
        check_bounds(min, max)?;
        Ok(WeightBounds::Range { min, max })
    }

    fn validate(&self) -> Result<()> {
        match *self {
            WeightBounds::Unbounded => Ok(()),
            WeightBounds::Range { min, max } => check_bounds(min, max),
        }
    }

    /// Sanitizes `weights` in place and returns how many elements changed.
    fn apply(&self, weights: &mut DenseMatrix) -> Result<usize> {
        match *self {
            WeightBounds::Unbounded => Ok(weights.sanitize()),
            WeightBounds::Range { min, max } => weights.clamp(min, max),
        }
    }
}

/// Keeps training for [`DEFAULT_MAX_ITERATIONS`] iterations or until the
/// learning rate has shrunk to zero.
pub fn default_keep_training(iteration: usize, learning_rate: f64, _cost: f64) -> bool {
    iteration < DEFAULT_MAX_ITERATIONS && learning_rate > 0.0
}

fn check_learning_rate(learning_rate: f64) -> Result<()> {
    if !learning_rate.is_finite() {
        return Err(Error::InvalidArgument(format!(
            "learning rate must be finite, got {}",
            learning_rate
        )));
    }
    Ok(())
}

impl FeedForwardNetwork {
    /// One gradient-descent step: `W_i ← W_i − learning_rate · ∂cost/∂W_i`,
    /// followed by sanitizing every weight according to `bounds`.
    ///
    /// Fails without changing any weight if the dataset does not fit the
    /// network, the learning rate is not finite, or `bounds` is an inverted
    /// range.
    pub fn single_step(
        &mut self,
        learning_rate: f64,
        input: &DenseMatrix,
        expected: &DenseMatrix,
        bounds: WeightBounds,
    ) -> Result<()> {
        check_learning_rate(learning_rate)?;
        bounds.validate()?;

        let gradients = self.gradient(input, expected)?;
        let mut updated = Vec::with_capacity(self.weights.len());
        for (weights, gradient) in self.weights.iter().zip(&gradients) {
            updated.push(weights.subtract(&gradient.scalar_multiply(learning_rate))?);
        }

        let mut rewritten = 0;
        for weights in &mut updated {
            rewritten += bounds.apply(weights)?;
        }
        if rewritten > 0 && bounds == WeightBounds::Unbounded {
            warn!(
                "gradient step at learning rate {} produced {} non-finite weights",
                learning_rate, rewritten
            );
        }

        self.weights = updated;
        Ok(())
    }

    /// Trains until `keep_training(iteration, learning_rate, cost)` returns
    /// false and returns the last accepted cost.
    ///
    /// Weights are sanitized without bounds after each step. See the module
    /// documentation for the accept/reject rule.
    pub fn train<P>(
        &mut self,
        learning_rate: f64,
        input: &DenseMatrix,
        expected: &DenseMatrix,
        keep_training: P,
    ) -> Result<f64>
    where
        P: FnMut(usize, f64, f64) -> bool,
    {
        self.train_observed(
            learning_rate,
            input,
            expected,
            WeightBounds::Unbounded,
            keep_training,
            |_, _| {},
        )
    }

    /// [`train`](Self::train) with [`default_keep_training`].
    pub fn train_default(
        &mut self,
        learning_rate: f64,
        input: &DenseMatrix,
        expected: &DenseMatrix,
    ) -> Result<f64> {
        self.train(learning_rate, input, expected, default_keep_training)
    }

    /// Full training entry point.
    ///
    /// `bounds` selects the sanitize pass applied after every step, and
    /// `observer(iteration, cost)` is called once per iteration with the cost
    /// the network holds after the accept/reject decision.
    pub fn train_observed<P, O>(
        &mut self,
        learning_rate: f64,
        input: &DenseMatrix,
        expected: &DenseMatrix,
        bounds: WeightBounds,
        mut keep_training: P,
        mut observer: O,
    ) -> Result<f64>
    where
        P: FnMut(usize, f64, f64) -> bool,
        O: FnMut(usize, f64),
    {
        check_learning_rate(learning_rate)?;
        bounds.validate()?;
        self.check_dataset(input, expected)?;

        let mut rate = AdaptiveLearningRate::new(learning_rate);
        let mut cost = self.cost(input, expected)?;
        let mut iteration = 0;

        while keep_training(iteration, rate.get_lr(), cost) {
            let snapshot = self.weights.clone();
            self.single_step(rate.get_lr(), input, expected, bounds)?;
            let candidate = self.cost(input, expected)?;

            let accepted = candidate <= cost;
            if accepted {
                trace!(
                    "iteration {}: accepted step at learning rate {}, cost {} -> {}",
                    iteration,
                    rate.get_lr(),
                    cost,
                    candidate
                );
                cost = candidate;
            } else {
                trace!(
                    "iteration {}: rejected step at learning rate {}, cost {} would become {}",
                    iteration,
                    rate.get_lr(),
                    cost,
                    candidate
                );
                self.weights = snapshot;
            }
            rate.step(accepted);

            observer(iteration, cost);
            iteration += 1;
        }

        info!(
            "training stopped after {} iterations ({} accepted, {} rejected): cost {}, learning rate {} -> {}",
            iteration,
            rate.accepted_steps(),
            rate.rejected_steps(),
            cost,
            rate.initial(),
            rate.get_lr()
        );
        Ok(cost)
    }
}
