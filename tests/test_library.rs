//! Tests for the dense_network public API
//!
//! This file exercises the library end to end through its re-exports:
//! - DenseMatrix: construction, algebra, sanitizing
//! - FeedForwardNetwork: seeding, weight interchange, training
//! - Random sources and the adaptive learning rate

use approx::assert_relative_eq;
use dense_network::utils::lr_scheduler::{AdaptiveLearningRate, LRScheduler};
use dense_network::utils::rng::{from_entropy, seeded, seeded_or_entropy};
use dense_network::{ActivationKind, DenseMatrix, Error, FeedForwardNetwork, WeightBounds};
use rand::Rng;

// ============================================================================
// DenseMatrix Tests
// ============================================================================

mod dense_matrix_tests {
    use super::*;

    #[test]
    fn test_random_matrix_within_range() {
        let m = DenseMatrix::random(20, 20, &mut seeded(1), -0.5, 0.5).unwrap();
        assert!(m.as_slice().iter().all(|&v| (-0.5..0.5).contains(&v)));
        let mean = m.sum() / 400.0;
        assert!(mean.abs() < 0.1, "mean {} far from zero", mean);
    }

    #[test]
    fn test_random_rejects_bad_range() {
        assert!(matches!(
            DenseMatrix::random(2, 2, &mut seeded(1), 1.0, 1.0),
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(
            DenseMatrix::random(2, 2, &mut seeded(1), f64::NEG_INFINITY, 0.0),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_random_spans_whole_representable_range() {
        let m = DenseMatrix::random(16, 16, &mut seeded(2), f64::MIN, f64::MAX).unwrap();
        assert!(m.as_slice().iter().all(|v| v.is_finite()));
        assert!(m.as_slice().iter().any(|&v| v < 0.0));
        assert!(m.as_slice().iter().any(|&v| v > 0.0));
    }

    #[test]
    fn test_clamp_with_infinite_bounds_removes_nan() {
        let mut m = DenseMatrix::from_array(&[[f64::NAN, f64::INFINITY]]).unwrap();
        m.clamp(f64::NEG_INFINITY, f64::INFINITY).unwrap();
        assert_eq!(m.as_slice(), &[0.0, f64::MAX]);
    }

    #[test]
    fn test_sanitize_replaces_special_values() {
        let mut m =
            DenseMatrix::from_array(&[[f64::NAN, f64::INFINITY, f64::NEG_INFINITY, 1.5]]).unwrap();
        assert_eq!(m.sanitize(), 3);
        assert_eq!(m.as_slice(), &[0.0, f64::MAX, f64::MIN, 1.5]);
    }

    #[test]
    fn test_clamp_maps_nan_to_midpoint() {
        let mut m = DenseMatrix::from_array(&[[f64::NAN, -9.0, 9.0, 0.5]]).unwrap();
        assert_eq!(m.clamp(-1.0, 3.0).unwrap(), 3);
        assert_eq!(m.as_slice(), &[1.0, -1.0, 3.0, 0.5]);
        assert!(m.clamp(2.0, 2.0).is_err());
    }

    #[test]
    fn test_row_views() {
        let m = DenseMatrix::from_array(&[[1.0, 2.0], [3.0, 4.0]]).unwrap();
        assert_eq!(m.row_slice(1).unwrap(), &[3.0, 4.0]);
        assert!(m.row_slice(2).is_err());
    }
}

// ============================================================================
// FeedForwardNetwork Tests
// ============================================================================

mod network_tests {
    use super::*;

    #[test]
    fn test_seeded_networks_are_identical() {
        let build = || {
            let mut net = FeedForwardNetwork::new(
                4,
                &[3, 2],
                &[ActivationKind::Sigmoid, ActivationKind::Identity],
            )
            .unwrap();
            net.randomize_weights(&mut seeded(77), -1.0, 1.0).unwrap();
            net
        };
        assert_eq!(build().all_weights(), build().all_weights());
    }

    #[test]
    fn test_weights_copy_is_detached() {
        let mut net = FeedForwardNetwork::new(2, &[2], &[ActivationKind::Tanh]).unwrap();
        let mut copy = net.weights(0).unwrap();
        copy.fill(4.0);
        assert!(net.weights(0).unwrap().as_slice().iter().all(|&w| w == 0.0));
        net.set_weights(0, copy).unwrap();
        assert!(net.weights(0).unwrap().as_slice().iter().all(|&w| w == 4.0));
    }

    #[test]
    fn test_transfer_weights_between_networks() {
        let mut source = FeedForwardNetwork::new(
            3,
            &[4, 1],
            &[ActivationKind::Tanh, ActivationKind::Sigmoid],
        )
        .unwrap();
        source.randomize_weights(&mut seeded(3), -1.0, 1.0).unwrap();

        let mut target = FeedForwardNetwork::new(
            3,
            &[4, 1],
            &[ActivationKind::Tanh, ActivationKind::Sigmoid],
        )
        .unwrap();
        target.set_all_weights(source.all_weights()).unwrap();

        let input = DenseMatrix::random(5, 3, &mut seeded(4), -1.0, 1.0).unwrap();
        assert_eq!(source.predict(&input).unwrap(), target.predict(&input).unwrap());
    }

    #[test]
    fn test_train_then_predict() {
        let mut net = FeedForwardNetwork::new(2, &[1], &[ActivationKind::Identity]).unwrap();
        let input = DenseMatrix::from_array(&[[1.0, 0.0], [0.0, 1.0], [1.0, 1.0]]).unwrap();
        let expected = DenseMatrix::from_array(&[[2.0], [-1.0], [1.0]]).unwrap();
        let cost = net.train_default(0.1, &input, &expected).unwrap();
        assert!(cost < 1e-3, "cost {} did not converge", cost);

        let prediction = net.predict(&input).unwrap();
        for (p, e) in prediction.as_slice().iter().zip(expected.as_slice()) {
            assert_relative_eq!(*p, *e, epsilon = 0.1);
        }
    }

    #[test]
    fn test_weight_bounds_default_is_unbounded() {
        assert_eq!(WeightBounds::default(), WeightBounds::Unbounded);
    }
}

// ============================================================================
// Utility Tests
// ============================================================================

mod utility_tests {
    use super::*;

    #[test]
    fn test_seeded_sources_repeat() {
        let a: u64 = seeded(5).gen();
        let b: u64 = seeded(5).gen();
        let c: u64 = seeded_or_entropy(Some(5)).gen();
        assert_eq!(a, b);
        assert_eq!(a, c);
    }

    #[test]
    fn test_entropy_sources_differ() {
        let a: u64 = from_entropy().gen();
        let b: u64 = seeded_or_entropy(None).gen();
        assert_ne!(a, b);
    }

    #[test]
    fn test_learning_rate_alternation() {
        let mut lr = AdaptiveLearningRate::new(0.8);
        lr.step(false);
        lr.step(false);
        lr.step(true);
        assert_relative_eq!(lr.get_lr(), 0.22, max_relative = 1e-12);
        assert_eq!(lr.initial(), 0.8);
        assert_eq!((lr.accepted_steps(), lr.rejected_steps()), (1, 2));
    }
}
