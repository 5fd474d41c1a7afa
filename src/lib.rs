//! Dense matrix algebra and a feed-forward neural network
//!
//! This library provides a from-scratch dense matrix engine and a bias-free
//! fully connected network trained by gradient descent with an adaptive,
//! rollback-protected learning rate.
//!
//! # Modules
//!
//! - `matrix`: `DenseMatrix` with algebraic and sub-matrix operations
//! - `network`: `FeedForwardNetwork` forward pass, cost, gradient and training
//! - `utils`: Activation catalog, random sources, adaptive learning rate
//! - `config`: Training configuration structures
//! - `architecture`: Architecture configuration and network building
//! - `error`: Error taxonomy shared by every module

pub mod architecture;
pub mod config;
pub mod error;
pub mod matrix;
pub mod network;
pub mod utils;

pub use error::{Error, Result};
pub use matrix::DenseMatrix;
pub use network::{FeedForwardNetwork, WeightBounds};
pub use utils::ActivationKind;
