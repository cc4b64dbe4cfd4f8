//! Error types for skyage

use thiserror::Error;

use crate::bsky::LookupError;

#[derive(Error, Debug)]
pub enum Error {
    /// Input outside the documented domain of a computation
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Profile came back without a creation timestamp
    #[error("profile {handle} has no creation date")]
    MissingCreatedAt { handle: String },

    /// Remote profile lookup failed
    #[error(transparent)]
    Lookup(#[from] LookupError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
