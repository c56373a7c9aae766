//! Waypoint Core
//!
//! The navigation container owns the root navigation state. Screens never
//! hold state of their own: they read it from the container and send
//! actions back through `dispatch`.

mod config;
mod container;
mod error;

pub use config::ContainerConfig;
pub use container::{Listener, NavigationContainer};
pub use error::CoreError;

// Re-export the engine
pub use waypoint_router::{
    BackBehavior, Dispatch, LeafScreen, NavigationProp, NavigatorScreen, PathAndParams,
    PathPattern, RouteConfig, RouteConfigMap, Router, RouterError, Screen, ScreenOption,
    ScreenOptions, StackRouter, StackRouterConfig, TabRouter, TabRouterConfig,
};
pub use waypoint_scenes::{reduce_scenes, Scene, SceneError, SceneTracker};
pub use waypoint_state::{
    Action, BackAction, InitAction, NavigateAction, NavigationState, Params, ResetAction, Route,
    SetParamsAction, StateError, UriAction,
};

pub type Result<T> = std::result::Result<T, CoreError>;

/// Initialize logging
pub fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt().with_env_filter(filter).with_target(true).init();
}
