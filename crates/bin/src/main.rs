//! Hobart CLI binary.
//!
//! Trains the census income random forest from a stored data file and
//! uploads the model artifact.

mod integration;

use clap::Parser;
use integration::train_pipeline;
use std::process;

#[derive(Parser)]
#[command(name = "hobart")]
#[command(about = "Hobart: census income random forest trainer", long_about = None)]
#[command(version)]
struct Cli {
    /// Storage bucket holding the training data
    input_bucket: String,

    /// Object key of the training data within the bucket
    input_file: String,
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    train_pipeline::train_and_upload(&cli.input_bucket, &cli.input_file).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_requires_both_arguments() {
        assert!(Cli::try_parse_from(["hobart"]).is_err());
        assert!(Cli::try_parse_from(["hobart", "bucket-only"]).is_err());
    }

    #[test]
    fn test_cli_parses_bucket_and_object_key() {
        let cli = Cli::try_parse_from(["hobart", "my-bucket", "census/adult.data"]).unwrap();
        assert_eq!(cli.input_bucket, "my-bucket");
        assert_eq!(cli.input_file, "census/adult.data");
    }
}
