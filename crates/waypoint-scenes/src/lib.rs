//! Waypoint Scenes
//!
//! Scenes are the render-side view of a navigator's routes during a
//! transition:
//! - one scene per route of the next state, plus routes that just left
//! - a route removed by the transition stays as a stale scene for exactly
//!   one transition so its exit can be animated
//! - exactly one scene is active, the one at the next state's index

mod error;
mod scene;
mod tracker;

pub use error::SceneError;
pub use scene::{reduce_scenes, Scene, SCENE_KEY_PREFIX};
pub use tracker::SceneTracker;

pub type Result<T> = std::result::Result<T, SceneError>;
