//! State error types

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StateError {
    #[error("Route key already exists: {0}")]
    DuplicateKey(String),

    #[error("Route key not found: {0}")]
    KeyNotFound(String),

    #[error("Index {index} out of range for {len} routes")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Navigation state must contain at least one route")]
    EmptyRoutes,
}
