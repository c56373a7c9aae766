//! Resolved route table shared by the stack and tab routers

use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::config::RouteConfigMap;
use crate::error::RouterError;
use crate::navigation::NavigationProp;
use crate::path::{join_path, split_path, PathAndParams, PathPattern};
use crate::router::Router;
use crate::screen::{Screen, ScreenOptions};
use crate::Result;
use waypoint_state::{Action, InitAction, NavigationState, Params, Route, SetParamsAction};

pub(crate) struct RouteEntry {
    pub(crate) name: String,
    pub(crate) screen: Arc<dyn Screen>,
    pub(crate) router: Option<Arc<dyn Router>>,
    options: ScreenOptions,
    pattern: PathPattern,
    /// Explicit path on a leaf route: the whole path has to match
    exact: bool,
}

/// A successful path lookup
pub(crate) struct PathMatch<'a> {
    pub(crate) entry: &'a RouteEntry,
    pub(crate) params: Params,
    /// Segments left over for a nested navigator
    pub(crate) rest: String,
}

pub(crate) struct RouteTable {
    entries: Vec<RouteEntry>,
    default_options: ScreenOptions,
}

impl RouteTable {
    pub(crate) fn build(
        routes: &RouteConfigMap,
        order: Option<&[String]>,
        paths: &BTreeMap<String, String>,
        default_options: ScreenOptions,
    ) -> Result<Self> {
        if routes.is_empty() {
            return Err(RouterError::InvalidConfig(
                "a navigator needs at least one route".to_string(),
            ));
        }
        if let Some(unknown) = paths.keys().find(|name| routes.get(name).is_none()) {
            return Err(RouterError::InvalidConfig(format!(
                "path configured for unknown route {unknown}"
            )));
        }

        let names: Vec<String> = match order {
            Some(order) => {
                for (i, name) in order.iter().enumerate() {
                    if routes.get(name).is_none() {
                        return Err(RouterError::InvalidConfig(format!(
                            "order names unknown route {name}"
                        )));
                    }
                    if order[..i].contains(name) {
                        return Err(RouterError::InvalidConfig(format!(
                            "order names {name} twice"
                        )));
                    }
                }
                if order.len() != routes.len() {
                    return Err(RouterError::InvalidConfig(
                        "order must list every route".to_string(),
                    ));
                }
                order.to_vec()
            }
            None => routes.names().into_iter().map(str::to_string).collect(),
        };

        let mut entries = Vec::with_capacity(names.len());
        for name in names {
            let Some(config) = routes.get(&name) else {
                continue;
            };
            let screen = config.resolve_screen();
            let router = screen.router();
            let explicit = paths
                .get(&name)
                .map(String::as_str)
                .or_else(|| config.route_path());
            let pattern = PathPattern::parse(explicit.unwrap_or(&name))?;
            entries.push(RouteEntry {
                exact: explicit.is_some() && router.is_none(),
                options: config.route_options().clone(),
                name,
                screen,
                router,
                pattern,
            });
        }

        Ok(Self {
            entries,
            default_options,
        })
    }

    pub(crate) fn entries(&self) -> &[RouteEntry] {
        &self.entries
    }

    pub(crate) fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.name.as_str()).collect()
    }

    pub(crate) fn get(&self, name: &str) -> Option<&RouteEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    pub(crate) fn position(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.name == name)
    }

    pub(crate) fn has(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub(crate) fn child_router(&self, name: &str) -> Option<&Arc<dyn Router>> {
        self.get(name).and_then(|e| e.router.as_ref())
    }

    pub(crate) fn knows(&self, name: &str) -> bool {
        self.has(name)
            || self
                .entries
                .iter()
                .filter_map(|e| e.router.as_ref())
                .any(|r| r.knows_route(name))
    }

    fn entry(&self, name: &str) -> Result<&RouteEntry> {
        self.get(name)
            .ok_or_else(|| RouterError::UnknownRoute(name.to_string()))
    }

    /// Initial state of the navigator hosted by `name`, with `action` applied.
    /// `None` for leaf routes.
    pub(crate) fn child_state(
        &self,
        name: &str,
        params: &Params,
        action: Option<&Action>,
    ) -> Result<Option<NavigationState>> {
        let Some(router) = self.child_router(name) else {
            return Ok(None);
        };
        let init = Action::Init(InitAction {
            params: params.clone(),
        });
        let mut state = router.get_state_for_action(&init, None)?.ok_or_else(|| {
            RouterError::InvalidConfig(format!("navigator {name} produced no initial state"))
        })?;
        if let Some(action) = action {
            if let Some(next) = router.get_state_for_action(action, Some(&state))? {
                state = next;
            }
        }
        Ok(Some(state))
    }

    /// Offer `action` to the navigator hosted by `state.routes[index]` and
    /// splice its answer back in. The index of `state` is left alone.
    pub(crate) fn delegate(
        &self,
        action: &Action,
        state: &NavigationState,
        index: usize,
    ) -> Result<Option<NavigationState>> {
        let Some(route) = state.routes.get(index) else {
            return Ok(None);
        };
        let Some(router) = self.child_router(&route.route_name) else {
            return Ok(None);
        };
        let Some(next) = router.get_state_for_action(action, route.state.as_ref())? else {
            tracing::trace!(route = %route.route_name, action = %action, "Nested navigator left action unhandled");
            return Ok(None);
        };
        if route.state.as_ref() == Some(&next) {
            return Ok(Some(state.clone()));
        }
        let updated = Route {
            state: Some(next),
            ..route.clone()
        };
        Ok(Some(state.replace_at_index(index, updated)?))
    }

    /// Merge params into the route with the action's key. Only this
    /// navigator's routes and the focused child are searched; a key that
    /// belongs to an unfocused child leaves the state unchanged.
    pub(crate) fn set_params(
        &self,
        action: &Action,
        set: &SetParamsAction,
        state: &NavigationState,
    ) -> Result<NavigationState> {
        if let Some(next) = state.set_params(&set.key, &set.params) {
            tracing::debug!(key = %set.key, "Set route params");
            return Ok(next);
        }
        if let Some(next) = self.delegate(action, state, state.index)? {
            return Ok(next);
        }
        tracing::trace!(key = %set.key, "No focused route matches setParams key");
        Ok(state.clone())
    }

    pub(crate) fn component(&self, name: &str) -> Result<Arc<dyn Screen>> {
        Ok(Arc::clone(&self.entry(name)?.screen))
    }

    pub(crate) fn component_for_state(&self, state: &NavigationState) -> Result<Arc<dyn Screen>> {
        let route = state.active_route()?;
        let entry = self.entry(&route.route_name)?;
        match (&entry.router, &route.state) {
            (Some(router), Some(child)) => router.get_component_for_state(child),
            _ => Ok(Arc::clone(&entry.screen)),
        }
    }

    /// Layers, lowest precedence first: the active nested screen, this
    /// navigator's defaults, the screen's own options, the route config.
    pub(crate) fn screen_config(
        &self,
        navigation: &NavigationProp<Route>,
        option: &str,
    ) -> Result<Option<Value>> {
        let route = &navigation.state;
        let entry = self.entry(&route.route_name)?;

        let mut value = match (&entry.router, &route.state) {
            (Some(router), Some(child)) => {
                let active = navigation.child(child.active_route()?.clone());
                router.get_screen_config(&active, option)?
            }
            _ => None,
        };
        value = self.default_options.resolve(option, navigation, value);
        if let Some(own) = entry.screen.navigation_options() {
            value = own.resolve(option, navigation, value);
        }
        Ok(entry.options.resolve(option, navigation, value))
    }

    pub(crate) fn path_and_params_for_state(
        &self,
        state: &NavigationState,
    ) -> Result<PathAndParams> {
        let route = state.active_route()?;
        let entry = self.entry(&route.route_name)?;
        let mut path =
            entry
                .pattern
                .to_path(&route.params)
                .map_err(|param| RouterError::MissingPathParam {
                    route: route.route_name.clone(),
                    param,
                })?;
        let mut params = route.params.clone();

        if let (Some(router), Some(child)) = (&entry.router, &route.state) {
            let nested = router.get_path_and_params_for_state(child)?;
            path = join_path(&path, &nested.path);
            params.extend(nested.params);
        }
        Ok(PathAndParams { path, params })
    }

    /// Longest matching pattern wins; ties go to the earlier route.
    /// `supplied` holds query params, which may stand in for empty segments.
    pub(crate) fn match_path(&self, path: &str, supplied: &Params) -> Option<PathMatch<'_>> {
        let parts = split_path(path);
        let mut best: Option<(&RouteEntry, Params, usize)> = None;

        for entry in &self.entries {
            let Some((params, consumed)) = entry.pattern.match_prefix(&parts, supplied) else {
                continue;
            };
            if entry.exact && consumed != parts.len() {
                continue;
            }
            if best.as_ref().map_or(true, |(_, _, b)| consumed > *b) {
                best = Some((entry, params, consumed));
            }
        }

        best.map(|(entry, params, consumed)| PathMatch {
            entry,
            params,
            rest: parts[consumed..].join("/"),
        })
    }
}

