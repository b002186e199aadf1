//! # Dataset error variants
use rust_tokenizers::error::TokenizerError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SstError {
    #[error("Neutral label (2) cannot be converted to a binary label, filter it out before collapsing")]
    NeutralLabel,

    #[error("Invalid sentiment label {0}, expected a value in 0..=4")]
    InvalidLabel(i64),

    #[error("Invalid dataset split `{0}`, expected one of train, dev (val), test")]
    InvalidSplit(String),

    #[error("Malformed tree at line {line}, position {position}: {message}")]
    TreeParse {
        line: usize,
        position: usize,
        message: String,
    },

    #[error("File not found error: {0}")]
    FileNotFound(String),

    #[error("IO error: {0}")]
    IOError(String),

    #[error("Download error: {0}")]
    Download(String),

    #[error("Tokenizer error: {0}")]
    Tokenizer(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Worker pool error: {0}")]
    ThreadPool(String),
}

impl From<std::io::Error> for SstError {
    fn from(error: std::io::Error) -> Self {
        SstError::IOError(error.to_string())
    }
}

impl From<TokenizerError> for SstError {
    fn from(error: TokenizerError) -> Self {
        SstError::Tokenizer(error.to_string())
    }
}

impl From<serde_json::Error> for SstError {
    fn from(error: serde_json::Error) -> Self {
        SstError::Config(error.to_string())
    }
}

impl From<cached_path::Error> for SstError {
    fn from(error: cached_path::Error) -> Self {
        SstError::Download(error.to_string())
    }
}

impl From<rayon::ThreadPoolBuildError> for SstError {
    fn from(error: rayon::ThreadPoolBuildError) -> Self {
        SstError::ThreadPool(error.to_string())
    }
}
