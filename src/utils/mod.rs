//! Shared utilities for the network
//!
//! This module provides the activation catalog, random-source helpers and the
//! adaptive learning-rate schedule used by training.

pub mod activations;
pub mod lr_scheduler;
pub mod rng;

pub use activations::ActivationKind;
pub use lr_scheduler::{AdaptiveLearningRate, LRScheduler};
