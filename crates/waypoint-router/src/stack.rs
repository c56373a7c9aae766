//! Stack router
//!
//! Ordered history of routes. Navigate pushes, Back pops, Reset replaces the
//! whole history. Actions aimed at a nested navigator are handed to it first,
//! so the innermost stack pops before its parent does.

use serde_json::Value;
use std::sync::Arc;

use crate::config::{RouteConfigMap, StackRouterConfig};
use crate::error::RouterError;
use crate::navigation::NavigationProp;
use crate::path::PathAndParams;
use crate::router::{KeyGenerator, Router};
use crate::screen::Screen;
use crate::table::RouteTable;
use crate::Result;
use waypoint_state::{
    Action, BackAction, NavigateAction, NavigationState, Params, ResetAction, Route,
};

pub struct StackRouter {
    table: RouteTable,
    initial_route_name: String,
    initial_route_params: Params,
    keys: KeyGenerator,
}

impl StackRouter {
    pub fn new(routes: RouteConfigMap, config: StackRouterConfig) -> Result<Self> {
        let table = RouteTable::build(&routes, None, &config.paths, config.navigation_options)?;

        let initial_route_name = match config.initial_route_name {
            Some(name) if table.has(&name) => name,
            Some(name) => {
                return Err(RouterError::InvalidConfig(format!(
                    "initial route {name} is not configured"
                )))
            }
            None => table.names()[0].to_string(),
        };

        Ok(Self {
            table,
            initial_route_name,
            initial_route_params: config.initial_route_params,
            keys: KeyGenerator::default(),
        })
    }

    fn initial_state(&self, params: &Params) -> Result<NavigationState> {
        let mut route_params = self.initial_route_params.clone();
        route_params.extend(params.iter().map(|(k, v)| (k.clone(), v.clone())));
        let route = self.build_route(&self.initial_route_name, route_params, None, None)?;
        Ok(NavigationState::single(route))
    }

    /// Create a route, initialising the navigator it hosts if any
    fn build_route(
        &self,
        route_name: &str,
        params: Params,
        nested: Option<&Action>,
        key: Option<String>,
    ) -> Result<Route> {
        let key = key.unwrap_or_else(|| self.keys.next_key(route_name));
        let state = self.table.child_state(route_name, &params, nested)?;
        let mut route = Route::new(key, route_name).with_params(params);
        route.state = state;
        Ok(route)
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

        // Deep link into the navigator on top instead of pushing a new one
        let active = state.active_route()?;
        if let Some(child) = self.table.child_router(&active.route_name) {
            let nested = if active.route_name == name {
                navigate.action.as_deref().cloned()
            } else if !self.table.has(name) && child.knows_route(name) {
                Some(action.clone())
            } else {
                None
            };
            if let Some(nested) = nested {
                if let Some(next) = self.table.delegate(&nested, state, state.index)? {
                    return Ok(Some(next));
                }
            }
        }

        if self.table.has(name) {
            // Navigating to the route already on top updates its params
            // unless a key asks for a distinct instance
            if active.route_name == name && navigate.key.is_none() && navigate.action.is_none() {
                let route = active.merge_params(&navigate.params);
                if route == *active {
                    tracing::trace!(route = %name, "Already on top of the stack");
                    return Ok(Some(state.clone()));
                }
                tracing::debug!(route = %name, key = %route.key, "Updated params of top route");
                return Ok(Some(state.replace_at_index(state.index, route)?));
            }

            let route = self.build_route(
                name,
                navigate.params.clone(),
                navigate.action.as_deref(),
                navigate.key.clone(),
            )?;
            tracing::debug!(route = %name, key = %route.key, depth = state.len() + 1, "Pushed route");
            return Ok(Some(state.push(route)?));
        }

        // The route lives in a navigator that is not on top: push that navigator
        for entry in self.table.entries() {
            let Some(child) = &entry.router else {
                continue;
            };
            if !child.knows_route(name) {
                continue;
            }
            let route = self.build_route(&entry.name, Params::new(), Some(action), None)?;
            tracing::debug!(route = %entry.name, target = %name, key = %route.key, "Pushed navigator");
            return Ok(Some(state.push(route)?));
        }

        Ok(None)
    }

    fn back(
        &self,
        action: &Action,
        back: &BackAction,
        state: &NavigationState,
    ) -> Result<Option<NavigationState>> {
        if let Some(key) = &back.key {
            let Some(position) = state.index_of(key) else {
                // The key may belong to a nested stack
                return self.table.delegate(action, state, state.index);
            };
            if position == 0 {
                return Ok(None);
            }
            let routes = state.routes[..position].to_vec();
            tracing::debug!(key = %key, depth = position, "Went back from route");
            return Ok(Some(NavigationState::new(routes, position - 1)?));
        }

        if let Some(next) = self.table.delegate(action, state, state.index)? {
            return Ok(Some(next));
        }
        let popped = state.pop();
        if popped.is_some() {
            tracing::debug!(depth = state.len() - 1, "Popped route");
        }
        Ok(popped)
    }

    fn reset(
        &self,
        action: &Action,
        reset: &ResetAction,
        state: &NavigationState,
    ) -> Result<Option<NavigationState>> {
        // The innermost navigator that owns every target handles the reset
        let active = state.active_route()?;
        if let Some(child) = self.table.child_router(&active.route_name) {
            let child_owns_all = reset
                .actions
                .iter()
                .all(|a| child.knows_route(&a.route_name));
            if child_owns_all {
                if let Some(next) = self.table.delegate(action, state, state.index)? {
                    return Ok(Some(next));
                }
            }
        }

        if let Some(unknown) = reset.actions.iter().find(|a| !self.table.knows(&a.route_name)) {
            return Err(RouterError::UnknownRoute(unknown.route_name.clone()));
        }
        if !reset.actions.iter().all(|a| self.table.has(&a.route_name)) {
            return Ok(None);
        }
        if reset.index >= reset.actions.len() {
            return Err(RouterError::ResetIndexOutOfRange {
                index: reset.index,
                len: reset.actions.len(),
            });
        }

        let routes = reset
            .actions
            .iter()
            .map(|a| {
                self.build_route(
                    &a.route_name,
                    a.params.clone(),
                    a.action.as_deref(),
                    a.key.clone(),
                )
            })
            .collect::<Result<Vec<_>>>()?;
        tracing::debug!(index = reset.index, routes = routes.len(), "Reset stack");
        Ok(Some(NavigationState::new(routes, reset.index)?))
    }
}

impl Router for StackRouter {
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
                NavigateAction::new(self.initial_route_name.as_str())
                    .with_params(params.clone())
                    .into(),
            );
        }

        let Some(matched) = self.table.match_path(path, params) else {
            tracing::trace!(path = %path, "No stack route matches path");
            return None;
        };

        let mut merged = params.clone();
        merged.extend(matched.params);
        let mut navigate = NavigateAction::new(matched.entry.name.as_str()).with_params(merged);
        if let Some(router) = &matched.entry.router {
            if let Some(nested) = router.get_action_for_path_and_params(&matched.rest, &Params::new())
            {
                navigate = navigate.with_action(nested);
            }
        }
        Some(navigate.into())
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
        &self.initial_route_name
    }

    fn knows_route(&self, route_name: &str) -> bool {
        self.table.knows(route_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screen::{LeafScreen, NavigatorScreen, ScreenOptions};
    use crate::RouteConfig;
    use waypoint_state::StateError;

    fn leaf(name: &str) -> RouteConfig {
        RouteConfig::screen(LeafScreen::new(name))
    }

    fn basic_router() -> StackRouter {
        StackRouter::new(
            RouteConfigMap::new()
                .route("Home", leaf("Home"))
                .route("Profile", leaf("Profile"))
                .route("Settings", leaf("Settings")),
            StackRouterConfig::default(),
        )
        .unwrap()
    }

    fn navigate(router: &StackRouter, state: &NavigationState, action: Action) -> NavigationState {
        router
            .get_state_for_action(&action, Some(state))
            .unwrap()
            .unwrap()
    }

    fn init(router: &dyn Router) -> NavigationState {
        router
            .get_state_for_action(&Action::init(), None)
            .unwrap()
            .unwrap()
    }

    fn profile(id: &str) -> Action {
        NavigateAction::new("Profile").with_param("id", id).into()
    }

    fn nested_router() -> StackRouter {
        let inner = StackRouter::new(
            RouteConfigMap::new()
                .route("Inbox", leaf("Inbox"))
                .route("Message", leaf("Message").path("message/:id")),
            StackRouterConfig::default(),
        )
        .unwrap();
        StackRouter::new(
            RouteConfigMap::new()
                .route("Home", leaf("Home"))
                .route(
                    "Mail",
                    RouteConfig::screen(NavigatorScreen::new("Mail", inner)).path("mail"),
                ),
            StackRouterConfig::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_init() {
        let router = basic_router();
        let state = init(&router);
        assert_eq!(state.index, 0);
        assert_eq!(state.route_names(), vec!["Home"]);
        assert_eq!(state.routes[0].key, "Home-0");

        // Init is a no-op once state exists
        let again = router
            .get_state_for_action(&Action::init(), Some(&state))
            .unwrap()
            .unwrap();
        assert_eq!(again, state);
    }

    #[test]
    fn test_initial_route_config() {
        let mut params = Params::new();
        params.insert("user".to_string(), "jane".to_string());
        let router = StackRouter::new(
            RouteConfigMap::new()
                .route("Home", leaf("Home"))
                .route("Profile", leaf("Profile")),
            StackRouterConfig::new()
                .initial_route_name("Profile")
                .initial_route_params(params),
        )
        .unwrap();
        let state = init(&router);
        assert_eq!(state.route_names(), vec!["Profile"]);
        assert_eq!(state.routes[0].param("user"), Some("jane"));
    }

    #[test]
    fn test_invalid_config() {
        let result = StackRouter::new(RouteConfigMap::new(), StackRouterConfig::default());
        assert!(matches!(result, Err(RouterError::InvalidConfig(_))));

        let result = StackRouter::new(
            RouteConfigMap::new().route("Home", leaf("Home")),
            StackRouterConfig::new().initial_route_name("Missing"),
        );
        assert!(matches!(result, Err(RouterError::InvalidConfig(_))));

        let result = StackRouter::new(
            RouteConfigMap::new().route("Home", leaf("Home")),
            StackRouterConfig::new().path("Home", "home/:"),
        );
        assert!(matches!(result, Err(RouterError::InvalidPathPattern { .. })));
    }

    #[test]
    fn test_navigate_from_null_state() {
        let router = basic_router();
        let state = router
            .get_state_for_action(&profile("42"), None)
            .unwrap()
            .unwrap();
        assert_eq!(state.route_names(), vec!["Home", "Profile"]);
        assert_eq!(state.index, 1);
        assert_eq!(state.routes[1].param("id"), Some("42"));
    }

    #[test]
    fn test_navigate_then_back() {
        let router = basic_router();
        let start = init(&router);
        let pushed = navigate(&router, &start, profile("42"));
        assert_eq!(pushed.index, 1);

        let back = navigate(&router, &pushed, Action::back());
        assert_eq!(back.route_names(), start.route_names());
        assert_eq!(back.index, 0);
    }

    #[test]
    fn test_back_at_root_unhandled() {
        let router = basic_router();
        let state = init(&router);
        let result = router
            .get_state_for_action(&Action::back(), Some(&state))
            .unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_back_with_key() {
        let router = basic_router();
        let mut state = init(&router);
        state = navigate(&router, &state, profile("1"));
        state = navigate(&router, &state, Action::navigate("Settings"));
        assert_eq!(state.len(), 3);

        // Going back from Profile drops Profile and everything above it
        let profile_key = state.routes[1].key.clone();
        let back = navigate(&router, &state, Action::back_from(profile_key));
        assert_eq!(back.route_names(), vec!["Home"]);
        assert_eq!(back.index, 0);

        // Back from the first route is unhandled
        let home_key = state.routes[0].key.clone();
        let result = router
            .get_state_for_action(&Action::back_from(home_key), Some(&state))
            .unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_navigate_same_route_on_top() {
        let router = basic_router();
        let state = navigate(&router, &init(&router), profile("1"));

        let same = navigate(&router, &state, profile("1"));
        assert_eq!(same, state);

        let updated = navigate(&router, &state, profile("2"));
        assert_eq!(updated.route_names(), vec!["Home", "Profile"]);
        assert_eq!(updated.routes[1].key, state.routes[1].key);
        assert_eq!(updated.routes[1].param("id"), Some("2"));

        // An explicit key still asks for a new instance
        let keyed: Action = NavigateAction::new("Profile").with_key("other").into();
        let pushed = navigate(&router, &updated, keyed);
        assert_eq!(pushed.route_names(), vec!["Home", "Profile", "Profile"]);
    }

    #[test]
    fn test_explicit_and_duplicate_keys() {
        let router = basic_router();
        let state = init(&router);
        let keyed: Action = NavigateAction::new("Profile").with_key("me").into();
        let pushed = navigate(&router, &state, keyed.clone());
        assert_eq!(pushed.routes[1].key, "me");

        let settings: Action = NavigateAction::new("Settings").with_key("me").into();
        let result = router.get_state_for_action(&settings, Some(&pushed));
        assert_eq!(
            result,
            Err(RouterError::State(StateError::DuplicateKey("me".to_string())))
        );
    }

    #[test]
    fn test_unknown_route() {
        let router = basic_router();
        let state = init(&router);
        let result = router.get_state_for_action(&Action::navigate("Nowhere"), Some(&state));
        assert_eq!(result, Err(RouterError::UnknownRoute("Nowhere".to_string())));
    }

    #[test]
    fn test_set_params() {
        let router = basic_router();
        let state = navigate(&router, &init(&router), profile("1"));
        let key = state.routes[1].key.clone();

        let mut params = Params::new();
        params.insert("tab".to_string(), "likes".to_string());
        let updated = navigate(&router, &state, Action::set_params(key, params.clone()));
        assert_eq!(updated.routes[1].param("tab"), Some("likes"));
        assert_eq!(updated.routes[1].param("id"), Some("1"));
        assert_eq!(updated.index, state.index);

        let unchanged = navigate(&router, &state, Action::set_params("missing", params));
        assert_eq!(unchanged, state);
    }

    #[test]
    fn test_reset() {
        let router = basic_router();
        let state = navigate(&router, &init(&router), profile("1"));

        let reset = Action::reset(
            1,
            vec![NavigateAction::new("Settings"), NavigateAction::new("Home")],
        );
        let next = navigate(&router, &state, reset);
        assert_eq!(next.route_names(), vec!["Settings", "Home"]);
        assert_eq!(next.index, 1);

        let out_of_range = Action::reset(2, vec![NavigateAction::new("Home"), NavigateAction::new("Profile")]);
        assert_eq!(
            router.get_state_for_action(&out_of_range, Some(&state)),
            Err(RouterError::ResetIndexOutOfRange { index: 2, len: 2 })
        );

        let empty = Action::reset(0, vec![]);
        assert!(matches!(
            router.get_state_for_action(&empty, Some(&state)),
            Err(RouterError::ResetIndexOutOfRange { .. })
        ));
    }

    #[test]
    fn test_index_invariant_holds() {
        let router = basic_router();
        let mut state = init(&router);
        let actions = vec![
            profile("1"),
            Action::navigate("Settings"),
            Action::back(),
            profile("2"),
            Action::reset(0, vec![NavigateAction::new("Home")]),
            Action::back(),
        ];
        for action in actions {
            if let Some(next) = router.get_state_for_action(&action, Some(&state)).unwrap() {
                state = next;
            }
            assert!(state.index < state.routes.len());
            state.validate().unwrap();
        }
    }

    #[test]
    fn test_nested_navigate_into_active_navigator() {
        let router = nested_router();
        let state = navigate(&router, &init(&router), Action::navigate("Mail"));
        assert_eq!(state.route_names(), vec!["Home", "Mail"]);
        let mail = &state.routes[1];
        assert_eq!(mail.state.as_ref().unwrap().route_names(), vec!["Inbox"]);

        // Message lives only in Mail: the stack of Mail grows, ours does not
        let message: Action = NavigateAction::new("Message").with_param("id", "7").into();
        let next = navigate(&router, &state, message);
        assert_eq!(next.index, 1);
        assert_eq!(next.route_names(), vec!["Home", "Mail"]);
        let inner = next.routes[1].state.as_ref().unwrap();
        assert_eq!(inner.route_names(), vec!["Inbox", "Message"]);
        assert_eq!(next.routes[1].key, mail.key);
    }

    #[test]
    fn test_nested_action_on_same_route_name() {
        let router = nested_router();
        let state = navigate(&router, &init(&router), Action::navigate("Mail"));
        let action: Action = NavigateAction::new("Mail")
            .with_action(NavigateAction::new("Message").with_param("id", "1"))
            .into();
        let next = navigate(&router, &state, action);
        assert_eq!(next.len(), 2);
        let inner = next.routes[1].state.as_ref().unwrap();
        assert_eq!(inner.route_names(), vec!["Inbox", "Message"]);
    }

    #[test]
    fn test_navigate_pushes_navigator_not_on_top() {
        let router = nested_router();
        let state = init(&router);
        let message: Action = NavigateAction::new("Message").with_param("id", "7").into();
        let next = navigate(&router, &state, message);
        assert_eq!(next.route_names(), vec!["Home", "Mail"]);
        let inner = next.routes[1].state.as_ref().unwrap();
        assert_eq!(inner.route_names(), vec!["Inbox", "Message"]);
        assert_eq!(inner.routes[1].param("id"), Some("7"));
    }

    #[test]
    fn test_nested_back_pops_inner_first() {
        let router = nested_router();
        let mut state = init(&router);
        state = navigate(&router, &state, Action::navigate("Message"));
        assert_eq!(state.routes[1].state.as_ref().unwrap().len(), 2);

        state = navigate(&router, &state, Action::back());
        assert_eq!(state.len(), 2);
        assert_eq!(state.routes[1].state.as_ref().unwrap().len(), 1);

        state = navigate(&router, &state, Action::back());
        assert_eq!(state.route_names(), vec!["Home"]);
    }

    #[test]
    fn test_nested_set_params() {
        let router = nested_router();
        let state = navigate(&router, &init(&router), Action::navigate("Message"));
        let inner_key = state.routes[1].state.as_ref().unwrap().routes[1].key.clone();

        let mut params = Params::new();
        params.insert("read".to_string(), "true".to_string());
        let next = navigate(&router, &state, Action::set_params(inner_key, params));
        let inner = next.routes[1].state.as_ref().unwrap();
        assert_eq!(inner.routes[1].param("read"), Some("true"));
    }

    #[test]
    fn test_reset_inside_nested_stack() {
        let router = nested_router();
        let state = navigate(&router, &init(&router), Action::navigate("Message"));
        let reset = Action::reset(0, vec![NavigateAction::new("Inbox")]);
        let next = navigate(&router, &state, reset);
        assert_eq!(next.route_names(), vec!["Home", "Mail"]);
        assert_eq!(
            next.routes[1].state.as_ref().unwrap().route_names(),
            vec!["Inbox"]
        );
    }

    #[test]
    fn test_path_round_trip() {
        let router = basic_router();
        let state = navigate(&router, &init(&router), profile("42"));

        let encoded = router.get_path_and_params_for_state(&state).unwrap();
        assert_eq!(encoded.path, "Profile");

        let action = router
            .get_action_for_path_and_params(&encoded.path, &encoded.params)
            .unwrap();
        match action {
            Action::Navigate(nav) => {
                assert_eq!(nav.route_name, "Profile");
                assert_eq!(nav.params.get("id").map(String::as_str), Some("42"));
            }
            other => panic!("Expected Navigate, got {other}"),
        }
    }

    #[test]
    fn test_path_templates() {
        let router = StackRouter::new(
            RouteConfigMap::new()
                .route("Home", leaf("Home").path(""))
                .route("Profile", leaf("Profile").path("people/:id"))
                .route("Posts", leaf("Posts").path("people/:id/posts")),
            StackRouterConfig::default(),
        )
        .unwrap();

        let state = navigate(&router, &init(&router), profile("42"));
        let encoded = router.get_path_and_params_for_state(&state).unwrap();
        assert_eq!(encoded.path, "people/42");

        // Longest matching template wins
        let action = router
            .get_action_for_path_and_params("people/42/posts", &Params::new())
            .unwrap();
        assert!(matches!(&action, Action::Navigate(nav) if nav.route_name == "Posts"));

        // Explicit leaf paths must match exactly
        assert!(router
            .get_action_for_path_and_params("people/42/likes", &Params::new())
            .is_none());
        assert!(router
            .get_action_for_path_and_params("nowhere", &Params::new())
            .is_none());
    }

    #[test]
    fn test_query_params_merge() {
        let router = StackRouter::new(
            RouteConfigMap::new()
                .route("Home", leaf("Home"))
                .route("Profile", leaf("Profile").path("people/:id")),
            StackRouterConfig::default(),
        )
        .unwrap();
        let mut query = Params::new();
        query.insert("id".to_string(), "query".to_string());
        query.insert("ref".to_string(), "mail".to_string());

        let action = router
            .get_action_for_path_and_params("people/42", &query)
            .unwrap();
        let Action::Navigate(nav) = action else {
            panic!("Expected Navigate");
        };
        // Path params win over query params
        assert_eq!(nav.params.get("id").map(String::as_str), Some("42"));
        assert_eq!(nav.params.get("ref").map(String::as_str), Some("mail"));
    }

    fn people_router() -> StackRouter {
        StackRouter::new(
            RouteConfigMap::new()
                .route("Home", leaf("Home"))
                .route("Profile", leaf("Profile").path("people/:id")),
            StackRouterConfig::default(),
        )
        .unwrap()
    }

    fn decoded_id(router: &StackRouter, path: &str, params: &Params) -> Option<String> {
        match router.get_action_for_path_and_params(path, params)? {
            Action::Navigate(nav) if nav.route_name == "Profile" => nav.params.get("id").cloned(),
            _ => None,
        }
    }

    #[test]
    fn test_path_params_are_percent_encoded() {
        let router = people_router();

        let state = navigate(&router, &init(&router), profile("a/b"));
        let encoded = router.get_path_and_params_for_state(&state).unwrap();
        assert_eq!(encoded.path, "people/a%2Fb");
        assert_eq!(
            decoded_id(&router, &encoded.path, &encoded.params).as_deref(),
            Some("a/b")
        );

        let state = navigate(&router, &init(&router), profile("jane doe"));
        let encoded = router.get_path_and_params_for_state(&state).unwrap();
        assert_eq!(encoded.path, "people/jane%20doe");
        assert_eq!(
            decoded_id(&router, "people/jane%20doe", &Params::new()).as_deref(),
            Some("jane doe")
        );

        let state = navigate(&router, &init(&router), profile("100%"));
        let encoded = router.get_path_and_params_for_state(&state).unwrap();
        assert_eq!(encoded.path, "people/100%25");
        assert_eq!(
            decoded_id(&router, &encoded.path, &Params::new()).as_deref(),
            Some("100%")
        );
    }

    #[test]
    fn test_empty_path_param_travels_in_params() {
        let router = people_router();
        let state = navigate(&router, &init(&router), profile(""));

        let encoded = router.get_path_and_params_for_state(&state).unwrap();
        assert_eq!(encoded.path, "people");
        assert_eq!(encoded.params.get("id").map(String::as_str), Some(""));

        assert_eq!(
            decoded_id(&router, &encoded.path, &encoded.params).as_deref(),
            Some("")
        );
        // Without the param the segment is still required
        assert_eq!(decoded_id(&router, "people", &Params::new()), None);
    }

    #[test]
    fn test_empty_path_navigates_to_initial_route() {
        let router = basic_router();
        let action = router
            .get_action_for_path_and_params("", &Params::new())
            .unwrap();
        assert_eq!(action, Action::navigate("Home"));
    }

    #[test]
    fn test_missing_path_param() {
        let router = StackRouter::new(
            RouteConfigMap::new().route("Profile", leaf("Profile").path("people/:id")),
            StackRouterConfig::default(),
        )
        .unwrap();
        let state = init(&router);
        assert_eq!(
            router.get_path_and_params_for_state(&state),
            Err(RouterError::MissingPathParam {
                route: "Profile".to_string(),
                param: "id".to_string(),
            })
        );
    }

    #[test]
    fn test_nested_path_round_trip() {
        let router = nested_router();
        let message: Action = NavigateAction::new("Message").with_param("id", "7").into();
        let state = navigate(&router, &init(&router), message);

        let encoded = router.get_path_and_params_for_state(&state).unwrap();
        assert_eq!(encoded.path, "mail/message/7");

        let action = router
            .get_action_for_path_and_params(&encoded.path, &Params::new())
            .unwrap();
        let fresh = router.get_state_for_action(&action, None).unwrap().unwrap();
        let names: Vec<&str> = fresh
            .active_chain()
            .iter()
            .map(|r| r.route_name.as_str())
            .collect();
        assert_eq!(names, vec!["Mail", "Message"]);
        let leaf = fresh.active_chain()[1];
        assert_eq!(leaf.param("id"), Some("7"));
    }

    #[test]
    fn test_components() {
        let router = nested_router();
        assert_eq!(router.get_component_for_route_name("Home").unwrap().name(), "Home");
        assert!(router.get_component_for_route_name("Nope").is_err());

        let state = navigate(&router, &init(&router), Action::navigate("Message"));
        assert_eq!(router.get_component_for_state(&state).unwrap().name(), "Message");
        assert!(router.knows_route("Message"));
        assert!(!router.has_route("Message"));
    }

    #[test]
    fn test_screen_config_layers() {
        let router = StackRouter::new(
            RouteConfigMap::new().route(
                "Home",
                RouteConfig::screen(
                    LeafScreen::new("Home").with_options(
                        ScreenOptions::new().with("title", "Screen title"),
                    ),
                )
                .options(ScreenOptions::new().with_fn("title", |nav, current| {
                    let base = current.and_then(Value::as_str).unwrap_or_default();
                    Value::from(format!("{base} ({})", nav.state.route_name))
                })),
            ),
            StackRouterConfig::new().navigation_options(
                ScreenOptions::new()
                    .with("title", "Default")
                    .with("header", serde_json::json!({ "visible": true })),
            ),
        )
        .unwrap();

        let state = init(&router);
        let dispatch: crate::Dispatch = Arc::new(|_| Ok(true));
        let nav = NavigationProp::new(state, dispatch).active().unwrap();

        assert_eq!(
            router.get_screen_config(&nav, "title").unwrap(),
            Some(Value::from("Screen title (Home)"))
        );
        assert_eq!(
            router.get_screen_config(&nav, "header").unwrap(),
            Some(serde_json::json!({ "visible": true }))
        );
        assert_eq!(router.get_screen_config(&nav, "tabBar").unwrap(), None);
    }
}
