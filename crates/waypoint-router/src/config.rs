//! Route and router configuration

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::screen::{Screen, ScreenOptions};
use waypoint_state::Params;

type ScreenLoader = Arc<dyn Fn() -> Arc<dyn Screen> + Send + Sync>;

#[derive(Clone)]
enum ScreenSource {
    Eager(Arc<dyn Screen>),
    /// Resolved once, when the router is built
    Lazy(ScreenLoader),
}

/// Configuration of a single route: the screen to show, plus optional path
/// and navigation options
#[derive(Clone)]
pub struct RouteConfig {
    screen: ScreenSource,
    path: Option<String>,
    options: ScreenOptions,
}

impl RouteConfig {
    pub fn screen(screen: impl Screen + 'static) -> Self {
        Self::shared(Arc::new(screen))
    }

    pub fn shared(screen: Arc<dyn Screen>) -> Self {
        Self {
            screen: ScreenSource::Eager(screen),
            path: None,
            options: ScreenOptions::new(),
        }
    }

    pub fn lazy<F>(loader: F) -> Self
    where
        F: Fn() -> Arc<dyn Screen> + Send + Sync + 'static,
    {
        Self {
            screen: ScreenSource::Lazy(Arc::new(loader)),
            path: None,
            options: ScreenOptions::new(),
        }
    }

    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn options(mut self, options: ScreenOptions) -> Self {
        self.options = options;
        self
    }

    pub(crate) fn resolve_screen(&self) -> Arc<dyn Screen> {
        match &self.screen {
            ScreenSource::Eager(screen) => Arc::clone(screen),
            ScreenSource::Lazy(loader) => loader(),
        }
    }

    pub(crate) fn route_path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    pub(crate) fn route_options(&self) -> &ScreenOptions {
        &self.options
    }
}

/// Route configs keyed by route name, in insertion order
#[derive(Clone, Default)]
pub struct RouteConfigMap {
    routes: Vec<(String, RouteConfig)>,
}

impl RouteConfigMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route(mut self, name: impl Into<String>, config: RouteConfig) -> Self {
        self.insert(name, config);
        self
    }

    /// Insert a route, replacing an existing one with the same name in place
    pub fn insert(&mut self, name: impl Into<String>, config: RouteConfig) {
        let name = name.into();
        match self.routes.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = config,
            None => self.routes.push((name, config)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&RouteConfig> {
        self.routes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, config)| config)
    }

    pub fn names(&self) -> Vec<&str> {
        self.routes.iter().map(|(n, _)| n.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StackRouterConfig {
    /// Defaults to the first configured route
    pub initial_route_name: Option<String>,
    pub initial_route_params: Params,
    /// Path patterns by route name, overriding `RouteConfig::path`
    pub paths: BTreeMap<String, String>,
    /// Defaults applied to every screen of this navigator
    #[serde(skip)]
    pub navigation_options: ScreenOptions,
}

impl StackRouterConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn initial_route_name(mut self, name: impl Into<String>) -> Self {
        self.initial_route_name = Some(name.into());
        self
    }

    pub fn initial_route_params(mut self, params: Params) -> Self {
        self.initial_route_params = params;
        self
    }

    pub fn path(mut self, route_name: impl Into<String>, pattern: impl Into<String>) -> Self {
        self.paths.insert(route_name.into(), pattern.into());
        self
    }

    pub fn navigation_options(mut self, options: ScreenOptions) -> Self {
        self.navigation_options = options;
        self
    }
}

/// What Back does in a tab navigator
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BackBehavior {
    /// Return to the initial tab, then leave Back unhandled
    #[default]
    InitialRoute,
    /// Never handle Back at this level
    None,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TabRouterConfig {
    /// Defaults to the first tab in `order`
    pub initial_route_name: Option<String>,
    pub paths: BTreeMap<String, String>,
    /// Tab order; defaults to route config insertion order
    pub order: Option<Vec<String>>,
    pub back_behavior: BackBehavior,
    #[serde(skip)]
    pub navigation_options: ScreenOptions,
}

impl TabRouterConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn initial_route_name(mut self, name: impl Into<String>) -> Self {
        self.initial_route_name = Some(name.into());
        self
    }

    pub fn path(mut self, route_name: impl Into<String>, pattern: impl Into<String>) -> Self {
        self.paths.insert(route_name.into(), pattern.into());
        self
    }

    pub fn order<I, S>(mut self, order: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.order = Some(order.into_iter().map(Into::into).collect());
        self
    }

    pub fn back_behavior(mut self, behavior: BackBehavior) -> Self {
        self.back_behavior = behavior;
        self
    }

    pub fn navigation_options(mut self, options: ScreenOptions) -> Self {
        self.navigation_options = options;
        self
    }
}
