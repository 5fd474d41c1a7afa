//! Tests for training configuration parsing
//!
//! This file tests the config module including:
//! - Loading the bundled JSON fixtures
//! - Defaults for optional fields
//! - Clamp range and seed handling
//! - Handling invalid JSON, invalid values and missing files

use dense_network::config::{load_config, TrainingConfig};
use dense_network::network::WeightBounds;
use dense_network::Error;
use rand::Rng;
use std::fs;

// ============================================================================
// Fixture Loading Tests
// ============================================================================

mod fixture_tests {
    use super::*;

    #[test]
    fn test_load_xor_training() {
        let config =
            load_config("config/xor_training.json").expect("Failed to load xor training config");

        assert_eq!(config.learning_rate, 0.5);
        assert_eq!(config.max_iterations, 2000);
        assert_eq!(config.init_min, -1.0);
        assert_eq!(config.init_max, 1.0);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.weight_bounds().unwrap(), WeightBounds::Unbounded);
    }

    #[test]
    fn test_load_clamped_training() {
        let config = load_config("config/clamped_training.json")
            .expect("Failed to load clamped training config");

        assert_eq!(config.max_iterations, 50);
        assert_eq!(config.seed, None);
        assert_eq!(
            config.weight_bounds().unwrap(),
            WeightBounds::Range { min: -2.0, max: 2.0 }
        );
    }

    #[test]
    fn test_seeded_rng_is_reproducible() {
        let config = load_config("config/xor_training.json").unwrap();
        let mut first = config.rng();
        let mut second = config.rng();
        let x: Vec<f64> = (0..5).map(|_| first.gen()).collect();
        let y: Vec<f64> = (0..5).map(|_| second.gen()).collect();
        assert_eq!(x, y);
    }
}

// ============================================================================
// Temporary Config Tests
// ============================================================================

mod temp_config_tests {
    use super::*;

    #[test]
    fn test_parse_minimal() {
        let temp_file = "test_temp_training_minimal.json";
        fs::write(temp_file, r#"{ "learning_rate": 0.01 }"#).unwrap();
        let config = load_config(temp_file);
        fs::remove_file(temp_file).unwrap();
        let config = config.unwrap();

        assert_eq!(config.learning_rate, 0.01);
        assert_eq!(config.max_iterations, 100);
        assert_eq!(config.clamp_min, None);
        assert_eq!(config.clamp_max, None);
    }

    #[test]
    fn test_parse_all_fields() {
        let config = TrainingConfig::from_json(
            r#"{
  "learning_rate": 0.3,
  "max_iterations": 7,
  "init_min": -0.1,
  "init_max": 0.2,
  "clamp_min": -5.0,
  "clamp_max": 5.0,
  "seed": 9
}"#,
        )
        .unwrap();

        assert_eq!(config.max_iterations, 7);
        assert_eq!(config.init_min, -0.1);
        assert_eq!(config.init_max, 0.2);
        assert_eq!(config.clamp_min, Some(-5.0));
        assert_eq!(config.seed, Some(9));
    }

    #[test]
    fn test_keep_training_stops_at_cap() {
        let config =
            TrainingConfig::from_json(r#"{ "learning_rate": 0.3, "max_iterations": 2 }"#).unwrap();
        let mut keep = config.keep_training();
        assert!(keep(0, 0.3, 10.0));
        assert!(keep(1, 0.3, 10.0));
        assert!(!keep(2, 0.3, 10.0));
    }
}

// ============================================================================
// Error Handling Tests
// ============================================================================

mod error_handling_tests {
    use super::*;

    #[test]
    fn test_missing_file() {
        let result = load_config("nonexistent_training.json");
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[test]
    fn test_invalid_json() {
        let temp_file = "test_temp_training_invalid.json";
        fs::write(temp_file, "{ \"learning_rate\": ").unwrap();
        let result = load_config(temp_file);
        fs::remove_file(temp_file).unwrap();
        assert!(matches!(result, Err(Error::Json(_))));
    }

    #[test]
    fn test_missing_learning_rate() {
        let result = TrainingConfig::from_json(r#"{ "max_iterations": 10 }"#);
        assert!(matches!(result, Err(Error::Json(_))));
    }

    #[test]
    fn test_zero_iterations() {
        let result =
            TrainingConfig::from_json(r#"{ "learning_rate": 0.1, "max_iterations": 0 }"#);
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_empty_init_range() {
        let result = TrainingConfig::from_json(
            r#"{ "learning_rate": 0.1, "init_min": 0.5, "init_max": 0.5 }"#,
        );
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_inverted_clamp_range() {
        let result = TrainingConfig::from_json(
            r#"{ "learning_rate": 0.1, "clamp_min": 1.0, "clamp_max": -1.0 }"#,
        );
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_half_clamp_range() {
        let result =
            TrainingConfig::from_json(r#"{ "learning_rate": 0.1, "clamp_max": 1.0 }"#);
        assert!(matches!(result, Err(Error::Config(_))));
    }
}
