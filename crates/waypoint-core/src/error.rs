//! Core error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Router error: {0}")]
    Router(#[from] waypoint_router::RouterError),

    #[error("Scene error: {0}")]
    Scene(#[from] waypoint_scenes::SceneError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid URI: {0}")]
    InvalidUri(String),
}

impl From<CoreError> for waypoint_router::RouterError {
    /// Router errors pass through unchanged so screens can match on them
    fn from(e: CoreError) -> Self {
        match e {
            CoreError::Router(e) => e,
            other => waypoint_router::RouterError::Dispatch(other.to_string()),
        }
    }
}
