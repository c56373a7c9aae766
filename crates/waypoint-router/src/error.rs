//! Router error types

use thiserror::Error;
use waypoint_state::StateError;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RouterError {
    #[error("Unknown route: {0}")]
    UnknownRoute(String),

    #[error("Reset index {index} out of range for {len} actions")]
    ResetIndexOutOfRange { index: usize, len: usize },

    #[error("Missing param `{param}` for the path of route {route}")]
    MissingPathParam { route: String, param: String },

    #[error("Invalid path pattern `{pattern}`: {reason}")]
    InvalidPathPattern { pattern: String, reason: String },

    #[error("Invalid router configuration: {0}")]
    InvalidConfig(String),

    #[error("setParams cannot be called by the root navigator")]
    SetParamsOnRoot,

    #[error("Dispatch failed: {0}")]
    Dispatch(String),

    #[error("State error: {0}")]
    State(#[from] StateError),
}
