//! Crate-wide error aggregate.
//!
//! Each module has its own error type. [`Error`] wraps all of them for
//! callers that chain several operations with `?`.

use crate::builder::BuildError;
use crate::encoding::EncodeError;
use crate::fee::FeeError;
use crate::keypair::KeypairError;
use crate::submit::SubmitError;

/// Any error produced by this crate.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Secret key decoding failed.
    #[error(transparent)]
    Keypair(#[from] KeypairError),
    /// Integer encoding failed.
    #[error(transparent)]
    Encode(#[from] EncodeError),
    /// Priority fee conversion failed.
    #[error(transparent)]
    Fee(#[from] FeeError),
    /// Transaction assembly failed.
    #[error(transparent)]
    Build(#[from] BuildError),
    /// Sending or confirming failed.
    #[error(transparent)]
    Submit(#[from] SubmitError),
}
