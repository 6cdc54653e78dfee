//! Top-level error type.

use miette::Diagnostic;
use thiserror::Error;

use crate::config::ConfigError;
use crate::definition::PatchError;
use crate::store::StoreError;

/// Any failure of an errcode command
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    File(#[from] StoreError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Patch(#[from] PatchError),

    #[error("failed to read input: {0}")]
    #[diagnostic(code(errcode::input))]
    Prompt(#[from] std::io::Error),

    #[error("invalid argument: {0}")]
    #[diagnostic(code(errcode::usage))]
    Usage(String),
}

pub type Result<T> = std::result::Result<T, Error>;
