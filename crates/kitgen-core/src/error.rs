//! Error types for argument resolution, registry loading and orchestration

use thiserror::Error;

/// A CLI token that could not be coerced to its declared flag type
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ArgumentError {
    #[error("Flag --{flag} expects true or false, got '{value}'")]
    InvalidBoolean { flag: String, value: String },

    #[error("Flag --{flag} expects a value")]
    MissingValue { flag: String },

    #[error("Flag --{flag} takes a value and cannot be negated")]
    NotBoolean { flag: String },
}

/// Problems building the generator registry
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Generator '{0}' is registered more than once")]
    DuplicateGenerator(String),

    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Errors that end an orchestration run
#[derive(Debug, Error)]
pub enum KitError {
    #[error(transparent)]
    Arguments(#[from] ArgumentError),

    #[error(
        "No valid generators were selected. Use positional arguments or choose from the prompt.\n\
         Valid generators are: {}\n\
         To see this list at any time, use the --help command.",
        valid.join(", ")
    )]
    NoGeneratorSelected { valid: Vec<String> },

    /// Prompt engine or console failure (including a cancelled prompt)
    #[error("Prompt failed: {0}")]
    Prompt(#[source] anyhow::Error),

    #[error("Console output failed: {0}")]
    Console(#[from] std::io::Error),

    /// Failure raised while executing the plan, passed through unchanged
    #[error(transparent)]
    Action(anyhow::Error),
}

pub type KitResult<T> = Result<T, KitError>;
