//! Router capability set

use serde_json::Value;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::navigation::NavigationProp;
use crate::path::PathAndParams;
use crate::screen::Screen;
use crate::Result;
use waypoint_state::{Action, NavigationState, Params, Route};

/// The capability set of one navigator.
///
/// Routers are stateless apart from their key counter: every state lives in
/// the `NavigationState` values passed in and out.
pub trait Router: Send + Sync {
    /// Reduce `action` against `state`.
    ///
    /// `Ok(None)` means the action was not handled here and should travel to
    /// an ancestor. A missing `state` is initialised first, so the result is
    /// always `Some` in that case.
    fn get_state_for_action(
        &self,
        action: &Action,
        state: Option<&NavigationState>,
    ) -> Result<Option<NavigationState>>;

    /// Map a path plus query params to an action. `None` when no route matches.
    fn get_action_for_path_and_params(&self, path: &str, params: &Params) -> Option<Action>;

    fn get_path_and_params_for_state(&self, state: &NavigationState) -> Result<PathAndParams>;

    fn get_component_for_route_name(&self, route_name: &str) -> Result<Arc<dyn Screen>>;

    /// Screen for the active route, descending into nested navigators
    fn get_component_for_state(&self, state: &NavigationState) -> Result<Arc<dyn Screen>>;

    /// Resolve one navigation option for the screen behind `navigation`
    fn get_screen_config(
        &self,
        navigation: &NavigationProp<Route>,
        option: &str,
    ) -> Result<Option<Value>>;

    /// Route names configured directly on this router
    fn route_names(&self) -> Vec<&str>;

    fn initial_route_name(&self) -> &str;

    fn has_route(&self, route_name: &str) -> bool {
        self.route_names().contains(&route_name)
    }

    /// True if this router or any nested navigator owns `route_name`
    fn knows_route(&self, route_name: &str) -> bool;
}

/// Hands out route keys of the form `{routeName}-{n}`
#[derive(Debug, Default)]
pub(crate) struct KeyGenerator {
    next: AtomicU64,
}

impl KeyGenerator {
    pub(crate) fn next_key(&self, route_name: &str) -> String {
        let n = self.next.fetch_add(1, Ordering::Relaxed);
        format!("{}-{}", route_name, n)
    }
}
