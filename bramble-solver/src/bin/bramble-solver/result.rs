use std::fmt::Display;

use bramble_solver::ModelError;
use thiserror::Error;

pub(crate) type BrambleResult<T> = Result<T, BrambleError>;

#[derive(Error, Debug)]
pub(crate) enum BrambleError {
    #[error("IO error, more details: {0}")]
    IOError(#[from] std::io::Error),
    #[error("The file {0} is not supported.")]
    InvalidInstanceFile(String),
    #[error("Failed to parse the instance at line {line}: {message}")]
    Parse { line: usize, message: String },
    #[error("The instance does not describe a valid model, more details: {0}")]
    InvalidModel(#[from] ModelError),
}

impl BrambleError {
    pub(crate) fn invalid_instance(path: impl Display) -> Self {
        Self::InvalidInstanceFile(format!("{path}"))
    }

    pub(crate) fn parse(line: usize, message: impl Display) -> Self {
        Self::Parse {
            line,
            message: message.to_string(),
        }
    }
}
