use dense_network::architecture::load_architecture;
use dense_network::config::load_config;
use dense_network::{DenseMatrix, FeedForwardNetwork, Result};
use log::info;

// Small MLP to learn XOR (educational example).
const ARCHITECTURE_PATH: &str = "config/xor_architecture.json";
const TRAINING_PATH: &str = "config/xor_training.json";
// Progress is logged every this many iterations.
const REPORT_EVERY: usize = 100;

// XOR dataset with a constant 1 column appended, since layers carry no bias.
fn xor_dataset() -> Result<(DenseMatrix, DenseMatrix)> {
    let inputs = DenseMatrix::from_array(&[[0.0, 0.0], [0.0, 1.0], [1.0, 0.0], [1.0, 1.0]])?;
    let mut bias = DenseMatrix::new(inputs.height(), 1)?;
    bias.fill(1.0);
    let expected = DenseMatrix::from_array(&[[0.0], [1.0], [1.0], [0.0]])?;
    Ok((inputs.append_columns(&bias)?, expected))
}

// Simple evaluation on XOR samples.
fn test(nn: &FeedForwardNetwork, inputs: &DenseMatrix, expected: &DenseMatrix) -> Result<()> {
    println!("\nTesting the trained network:");
    let predictions = nn.predict(inputs)?;
    for sample in 0..inputs.height() {
        println!(
            "Input: {:.1}, {:.1}, Expected Output: {:.1}, Predicted Output: {:.3}",
            inputs.get(sample, 0)?,
            inputs.get(sample, 1)?,
            expected.get(sample, 0)?,
            predictions.get(sample, 0)?
        );
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::default()
        .parse_env(env_logger::Env::default().filter_or("DENSE_NETWORK_LOG", "info"))
        .init();

    let architecture = load_architecture(ARCHITECTURE_PATH)?;
    let training = load_config(TRAINING_PATH)?;

    let mut nn = architecture.build()?;
    let mut rng = training.rng();
    nn.randomize_weights(&mut rng, training.init_min, training.init_max)?;

    let (inputs, expected) = xor_dataset()?;
    let final_cost = nn.train_observed(
        training.learning_rate,
        &inputs,
        &expected,
        training.weight_bounds()?,
        training.keep_training(),
        |iteration, cost| {
            if (iteration + 1) % REPORT_EVERY == 0 {
                info!("Iteration {}, Cost: {:.6}", iteration + 1, cost);
            }
        },
    )?;
    println!("Final cost: {:.6}", final_cost);

    test(&nn, &inputs, &expected)
}
