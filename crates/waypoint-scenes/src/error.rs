//! Scene error types

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SceneError {
    #[error("Route {index} has scene key {key} which conflicts with another route")]
    DuplicateKey { index: usize, key: String },

    #[error("Expected exactly one active scene, found {0}")]
    ActiveSceneCount(usize),
}
