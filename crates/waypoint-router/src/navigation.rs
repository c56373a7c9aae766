//! Navigation prop
//!
//! Wraps a `(state, dispatch)` pair into the helpers handed to screens:
//! `navigate`, `go_back` and `set_params`. Every helper builds the matching
//! action and returns whatever `dispatch` reports: `true` when a reducer
//! produced a state, `false` when the action went unhandled.

use std::sync::Arc;

use crate::error::RouterError;
use crate::Result;
use waypoint_state::{Action, BackAction, NavigateAction, NavigationState, Params, Route};

pub type Dispatch = Arc<dyn Fn(Action) -> Result<bool> + Send + Sync>;

/// State a navigation prop can wrap
pub trait NavigationSubject {
    /// Key of the route this prop belongs to. Navigator-level props have none.
    fn route_key(&self) -> Option<&str>;
}

impl NavigationSubject for Route {
    fn route_key(&self) -> Option<&str> {
        Some(&self.key)
    }
}

impl NavigationSubject for NavigationState {
    fn route_key(&self) -> Option<&str> {
        None
    }
}

#[derive(Clone)]
pub struct NavigationProp<S> {
    pub state: S,
    dispatch: Dispatch,
}

impl<S> NavigationProp<S> {
    pub fn new(state: S, dispatch: Dispatch) -> Self {
        Self { state, dispatch }
    }

    pub fn dispatch(&self, action: Action) -> Result<bool> {
        (self.dispatch)(action)
    }

    pub fn dispatcher(&self) -> Dispatch {
        Arc::clone(&self.dispatch)
    }

    pub fn navigate(
        &self,
        route_name: impl Into<String>,
        params: Params,
        action: Option<Action>,
    ) -> Result<bool> {
        let mut navigate = NavigateAction::new(route_name).with_params(params);
        if let Some(action) = action {
            navigate = navigate.with_action(action);
        }
        self.dispatch(navigate.into())
    }

    /// Prop for a route owned by this state, sharing the same dispatch
    pub fn child(&self, route: Route) -> NavigationProp<Route> {
        NavigationProp::new(route, self.dispatcher())
    }
}

impl<S: NavigationSubject> NavigationProp<S> {
    /// Go back from `key`, or from this prop's own route when `key` is `None`.
    /// On a navigator-level prop without a key this pops the top of the stack.
    pub fn go_back(&self, key: Option<&str>) -> Result<bool> {
        let key = key.or_else(|| self.state.route_key()).map(str::to_string);
        self.dispatch(Action::Back(BackAction { key }))
    }

    pub fn set_params(&self, params: Params) -> Result<bool> {
        let key = self.state.route_key().ok_or(RouterError::SetParamsOnRoot)?;
        self.dispatch(Action::set_params(key, params))
    }
}

impl NavigationProp<NavigationState> {
    /// Props for every route of this navigator, in order
    pub fn routes(&self) -> Vec<NavigationProp<Route>> {
        self.state
            .routes
            .iter()
            .map(|route| self.child(route.clone()))
            .collect()
    }

    pub fn active(&self) -> Result<NavigationProp<Route>> {
        Ok(self.child(self.state.active_route()?.clone()))
    }
}

impl<S: std::fmt::Debug> std::fmt::Debug for NavigationProp<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NavigationProp")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}
