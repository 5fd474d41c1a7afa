//! Learning rate scheduler trait and the adaptive accept/reject schedule
//!
//! Unlike epoch-driven decay, the schedule here reacts to the outcome of each
//! gradient step: an accepted step (cost did not increase) grows the rate, a
//! rejected step shrinks it.

/// Multiplier applied after an accepted step.
pub const GROWTH_FACTOR: f64 = 1.1;

/// Divisor applied after a rejected step.
pub const SHRINK_DIVISOR: f64 = 2.0;

/// Core trait for learning rate schedulers driven by step outcomes.
///
/// The training loop reads the rate with [`get_lr`](LRScheduler::get_lr),
/// takes a step at that rate, and reports whether the step was kept through
/// [`step`](LRScheduler::step).
///
/// # Example
///
/// ```
/// use dense_network::utils::lr_scheduler::{AdaptiveLearningRate, LRScheduler};
///
/// let mut scheduler = AdaptiveLearningRate::new(0.5);
/// let lr = scheduler.get_lr();
/// // ... take a gradient step at `lr` and compare costs ...
/// scheduler.step(false);
/// assert_eq!(scheduler.get_lr(), lr / 2.0);
/// ```
pub trait LRScheduler {
    /// Get the learning rate for the next step.
    fn get_lr(&self) -> f64;

    /// Record the outcome of the last step.
    ///
    /// `accepted` is true when the step did not increase the cost and was
    /// kept.
    fn step(&mut self, accepted: bool);
}

/// Learning rate that grows by [`GROWTH_FACTOR`] on success and is divided by
/// [`SHRINK_DIVISOR`] on failure.
///
/// Growth saturates at `f64::MAX`; repeated shrinking eventually reaches zero.
///
/// # Example
///
/// ```
/// use dense_network::utils::lr_scheduler::{AdaptiveLearningRate, LRScheduler};
///
/// let mut lr = AdaptiveLearningRate::new(1.0);
/// lr.step(false);
/// assert_eq!(lr.get_lr(), 0.5);
/// lr.step(true);
/// assert!((lr.get_lr() - 0.55).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdaptiveLearningRate {
    initial: f64,
    current: f64,
    accepted: usize,
    rejected: usize,
}

impl AdaptiveLearningRate {
    /// Creates a schedule starting at `initial`, with both counters at zero.
    pub fn new(initial: f64) -> Self {
        Self {
            initial,
            current: initial,
            accepted: 0,
            rejected: 0,
        }
    }

    /// Rate the schedule started from.
    pub fn initial(&self) -> f64 {
        self.initial
    }

    /// Number of steps reported as accepted.
    pub fn accepted_steps(&self) -> usize {
        self.accepted
    }

    /// Number of steps reported as rejected.
    pub fn rejected_steps(&self) -> usize {
        self.rejected
    }
}

impl LRScheduler for AdaptiveLearningRate {
    fn get_lr(&self) -> f64 {
        self.current
    }

    fn step(&mut self, accepted: bool) {
        if accepted {
            self.current = (self.current * GROWTH_FACTOR).min(f64::MAX);
            self.accepted += 1;
        } else {
            self.current /= SHRINK_DIVISOR;
            self.rejected += 1;
        }
    }
}
