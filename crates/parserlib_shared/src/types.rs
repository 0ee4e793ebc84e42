//! Errors that are not about the stylesheet itself

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Parser options that could not be read
    #[error("config error: {0}")]
    Config(String),

    #[error("io error: {0}")]
    IO(#[from] std::io::Error),
}
