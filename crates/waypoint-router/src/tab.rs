//! Tab router
//!
//! A fixed set of routes, one per tab, selected by index. Navigating never
//! grows the route list; Back returns to the initial tab depending on the
//! configured [`BackBehavior`].

use serde_json::Value;
use std::sync::Arc;

use crate::config::{BackBehavior, RouteConfigMap, TabRouterConfig};
use crate::error::RouterError;
use crate::navigation::NavigationProp;
use crate::path::PathAndParams;
use crate::router::Router;
use crate::screen::Screen;
use crate::table::RouteTable;
use crate::Result;
use waypoint_state::{
    Action, BackAction, NavigateAction, NavigationState, Params, ResetAction, Route,
};

pub struct TabRouter {
    table: RouteTable,
    initial_index: usize,
    back_behavior: BackBehavior,
}

impl TabRouter {
    pub fn new(routes: RouteConfigMap, config: TabRouterConfig) -> Result<Self> {
        let table = RouteTable::build(
            &routes,
            config.order.as_deref(),
            &config.paths,
            config.navigation_options,
        )?;

        let initial_index = match &config.initial_route_name {
            Some(name) => table.position(name).ok_or_else(|| {
                RouterError::InvalidConfig(format!("initial tab {name} is not configured"))
            })?,
            None => 0,
        };

        Ok(Self {
            table,
            initial_index,
            back_behavior: config.back_behavior,
        })
    }

    /// Every tab is created up front; init params go to the initial tab
    fn initial_state(&self, params: &Params) -> Result<NavigationState> {
        let routes = self
            .table
            .entries()
            .iter()
            .enumerate()
            .map(|(i, entry)| -> Result<Route> {
                let params = if i == self.initial_index {
                    params.clone()
                } else {
                    Params::new()
                };
                let state = self.table.child_state(&entry.name, &params, None)?;
                let mut route =
                    Route::new(entry.name.as_str(), entry.name.as_str()).with_params(params);
                route.state = state;
                Ok(route)
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(NavigationState::new(routes, self.initial_index)?)
    }

    fn reduce(&self, action: &Action, state: &NavigationState) -> Result<Option<NavigationState>> {
        match action {
            Action::Init(_) => Ok(Some(state.clone())),
            Action::Navigate(navigate) => self.navigate(action, navigate, state),
            Action::Back(back) => self.back(action, back, state),
            Action::SetParams(set) => Ok(Some(self.table.set_params(action, set, state)?)),
            Action::Reset(reset) => self.reset(action, reset, state),
            Action::Uri(_) => Ok(None),
        }
    }

    fn navigate(
        &self,
        action: &Action,
        navigate: &NavigateAction,
        state: &NavigationState,
    ) -> Result<Option<NavigationState>> {
        let name = navigate.route_name.as_str();
        if !self.table.knows(name) {
            return Err(RouterError::UnknownRoute(name.to_string()));
        }

        if let Some(position) = self.table.position(name) {
            let mut next = state.clone();
            if let Some(nested) = navigate.action.as_deref() {
                if let Some(delegated) = self.table.delegate(nested, &next, position)? {
                    next = delegated;
                }
            }
            if !navigate.params.is_empty() {
                let route = next.routes[position].merge_params(&navigate.params);
                next = next.replace_at_index(position, route)?;
            }
            if next.index != position {
                tracing::debug!(from = state.index, to = position, tab = %name, "Switched tab");
                next = next.jump_to_index(position)?;
            }
            return Ok(Some(next));
        }

        // The target lives inside a tab: the active tab gets the first try
        if let Some(next) = self.table.delegate(action, state, state.index)? {
            return Ok(Some(next));
        }
        for (i, entry) in self.table.entries().iter().enumerate() {
            if i == state.index || !entry.router.as_ref().is_some_and(|r| r.knows_route(name)) {
                continue;
            }
            if let Some(next) = self.table.delegate(action, state, i)? {
                tracing::debug!(from = state.index, to = i, tab = %entry.name, target = %name, "Switched tab");
                return Ok(Some(next.jump_to_index(i)?));
            }
        }

        tracing::trace!(route = %name, "No tab handled navigate");
        Ok(None)
    }

    fn back(
        &self,
        action: &Action,
        back: &BackAction,
        state: &NavigationState,
    ) -> Result<Option<NavigationState>> {
        if let Some(next) = self.table.delegate(action, state, state.index)? {
            return Ok(Some(next));
        }

        let active = state.active_route()?;
        if back.key.as_deref().is_some_and(|key| key != active.key) {
            return Ok(None);
        }
        match self.back_behavior {
            BackBehavior::InitialRoute if state.index != self.initial_index => {
                tracing::debug!(from = state.index, to = self.initial_index, "Back to initial tab");
                Ok(Some(state.jump_to_index(self.initial_index)?))
            }
            _ => Ok(None),
        }
    }

    fn reset(
        &self,
        action: &Action,
        reset: &ResetAction,
        state: &NavigationState,
    ) -> Result<Option<NavigationState>> {
        if let Some(unknown) = reset.actions.iter().find(|a| !self.table.knows(&a.route_name)) {
            return Err(RouterError::UnknownRoute(unknown.route_name.clone()));
        }

        let active = state.active_route()?;
        let child_owns_all = self
            .table
            .child_router(&active.route_name)
            .is_some_and(|child| reset.actions.iter().all(|a| child.knows_route(&a.route_name)));
        if child_owns_all {
            return self.table.delegate(action, state, state.index);
        }
        Ok(None)
    }
}

impl Router for TabRouter {
    fn get_state_for_action(
        &self,
        action: &Action,
        state: Option<&NavigationState>,
    ) -> Result<Option<NavigationState>> {
        match (action, state) {
            (_, Some(state)) => self.reduce(action, state),
            (Action::Init(init), None) => Ok(Some(self.initial_state(&init.params)?)),
            (_, None) => {
                let initial = self.initial_state(&Params::new())?;
                Ok(Some(self.reduce(action, &initial)?.unwrap_or(initial)))
            }
        }
    }

    fn get_action_for_path_and_params(&self, path: &str, params: &Params) -> Option<Action> {
        let path = path.trim_matches('/');
        if path.is_empty() {
            return Some(
                NavigateAction::new(self.initial_route_name())
                    .with_params(params.clone())
                    .into(),
            );
        }

        if let Some(matched) = self.table.match_path(path, params) {
            let mut merged = params.clone();
            merged.extend(matched.params);
            let mut navigate = NavigateAction::new(matched.entry.name.as_str()).with_params(merged);
            if let Some(router) = &matched.entry.router {
                if let Some(nested) =
                    router.get_action_for_path_and_params(&matched.rest, &Params::new())
                {
                    navigate = navigate.with_action(nested);
                }
            }
            return Some(navigate.into());
        }

        // No tab claims the first segment: let each tab's navigator try the whole path
        self.table.entries().iter().find_map(|entry| {
            let router = entry.router.as_ref()?;
            let nested = router.get_action_for_path_and_params(path, params)?;
            Some(
                NavigateAction::new(entry.name.as_str())
                    .with_action(nested)
                    .into(),
            )
        })
    }

    fn get_path_and_params_for_state(&self, state: &NavigationState) -> Result<PathAndParams> {
        self.table.path_and_params_for_state(state)
    }

    fn get_component_for_route_name(&self, route_name: &str) -> Result<Arc<dyn Screen>> {
        self.table.component(route_name)
    }

    fn get_component_for_state(&self, state: &NavigationState) -> Result<Arc<dyn Screen>> {
        self.table.component_for_state(state)
    }

    fn get_screen_config(
        &self,
        navigation: &NavigationProp<Route>,
        option: &str,
    ) -> Result<Option<Value>> {
        self.table.screen_config(navigation, option)
    }

    fn route_names(&self) -> Vec<&str> {
        self.table.names()
    }

    fn initial_route_name(&self) -> &str {
        self.table
            .entries()
            .get(self.initial_index)
            .map(|e| e.name.as_str())
            .unwrap_or_default()
    }

    fn knows_route(&self, route_name: &str) -> bool {
        self.table.knows(route_name)
    }
}
