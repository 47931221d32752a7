//! Unified error type surfaced to callers of the core.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::gateway::GatewayError;
use crate::intent::ValidationError;
use crate::tree::{NotFound, TreeLoadError};

/// Any failure the core can report. None of them is retried.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    NotFound(#[from] NotFound),

    #[error("failed to generate email: {0}")]
    Generation(#[from] GatewayError),

    #[error("failed to load decision tree: {0}")]
    Load(#[from] TreeLoadError),
}

/// Machine-checkable category of a [`CoreError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Validation,
    NotFound,
    Generation,
    Load,
}

impl CoreError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Generation(_) => ErrorKind::Generation,
            Self::Load(_) => ErrorKind::Load,
        }
    }
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::NotFound => "not_found",
            Self::Generation => "generation",
            Self::Load => "load",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
