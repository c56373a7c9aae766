//! Waypoint Routers
//!
//! A router is the capability set of one navigator:
//! - a pure reducer, `(action, previous state) -> new state | unhandled`
//! - a path codec mapping URI-like paths to actions and back
//! - component resolution for route names and states
//!
//! Two flavours share the action model and the codec:
//! - `StackRouter`: ordered history with push, pop and reset
//! - `TabRouter`: fixed set of routes, navigation only moves the index

mod config;
mod error;
mod navigation;
mod path;
mod router;
mod screen;
mod stack;
mod tab;
mod table;

pub use config::{BackBehavior, RouteConfig, RouteConfigMap, StackRouterConfig, TabRouterConfig};
pub use error::RouterError;
pub use navigation::{Dispatch, NavigationProp, NavigationSubject};
pub use path::{PathAndParams, PathPattern};
pub use router::Router;
pub use screen::{DynamicOption, LeafScreen, NavigatorScreen, Screen, ScreenOption, ScreenOptions};
pub use stack::StackRouter;
pub use tab::TabRouter;

pub use waypoint_state::{Action, NavigateAction, NavigationState, Params, Route};

pub type Result<T> = std::result::Result<T, RouterError>;
