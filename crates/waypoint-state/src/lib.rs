//! Waypoint Navigation State
//!
//! The immutable state tree a navigator owns, and the actions that drive it.
//! A `NavigationState` is local to one navigator; a child navigator keeps its
//! own state inside the `state` field of the route that hosts it, so the root
//! state describes the whole application.

mod action;
mod error;
mod route;
mod state;

pub use action::{
    Action, BackAction, InitAction, NavigateAction, ResetAction, SetParamsAction, UriAction,
};
pub use error::StateError;
pub use route::{Params, Route};
pub use state::NavigationState;

pub type Result<T> = std::result::Result<T, StateError>;
