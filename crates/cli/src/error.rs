use filter_compiler::{ConfigError, ConvertError, SetupError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Failed to load the configuration file: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to set up the filter converter: {0}")]
    Setup(#[from] SetupError),

    #[error("Filter rejected: {0}")]
    Convert(#[from] ConvertError),

    #[error("Failed to serialize data to JSON: {0}")]
    JsonSerialize(#[from] serde_json::Error),

    #[error("Failed to write output: {0}")]
    Write(#[from] std::io::Error),
}
