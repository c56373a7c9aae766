//! Navigation container
//!
//! Owns the root state of a navigator tree. One dispatch runs at a time:
//! the next state and its scenes are computed first, then committed
//! together, so readers never see a half-applied transition.

use parking_lot::{Mutex, RwLock};
use serde_json::Value;
use std::sync::Arc;

use waypoint_router::{Dispatch, NavigationProp, PathAndParams, Router, RouterError, Screen};
use waypoint_scenes::{Scene, SceneTracker};
use waypoint_state::{Action, NavigationState, Params};

use crate::config::ContainerConfig;
use crate::error::CoreError;
use crate::Result;

/// Called after every committed transition with the new state and the
/// action that produced it
pub type Listener = Arc<dyn Fn(&NavigationState, &Action) + Send + Sync>;

pub struct NavigationContainer {
    config: ContainerConfig,
    router: Arc<dyn Router>,
    /// Root navigation state
    state: Arc<RwLock<NavigationState>>,
    scenes: Arc<RwLock<SceneTracker>>,
    listeners: Arc<RwLock<Vec<Listener>>>,
    /// Serialises dispatch
    dispatch_lock: Arc<Mutex<()>>,
}

impl NavigationContainer {
    pub fn new(router: impl Router + 'static, config: ContainerConfig) -> Result<Self> {
        Self::with_router(Arc::new(router), config)
    }

    /// Build a container around a shared router and initialise its state
    pub fn with_router(router: Arc<dyn Router>, config: ContainerConfig) -> Result<Self> {
        config.validate()?;

        let state = router
            .get_state_for_action(&Action::init(), None)?
            .ok_or_else(|| CoreError::Config("router produced no initial state".to_string()))?;

        let mut scenes = SceneTracker::new();
        scenes.update(&state)?;

        tracing::info!(
            initial_route = %router.initial_route_name(),
            routes = router.route_names().len(),
            "Created navigation container"
        );

        Ok(Self {
            config,
            router,
            state: Arc::new(RwLock::new(state)),
            scenes: Arc::new(RwLock::new(scenes)),
            listeners: Arc::new(RwLock::new(Vec::new())),
            dispatch_lock: Arc::new(Mutex::new(())),
        })
    }

    pub fn config(&self) -> &ContainerConfig {
        &self.config
    }

    pub fn router(&self) -> &Arc<dyn Router> {
        &self.router
    }

    // === Dispatch ===

    /// Reduce `action` against the root state.
    ///
    /// Returns `false` when no navigator handled the action; the state is
    /// left untouched in that case.
    pub fn dispatch(&self, action: Action) -> Result<bool> {
        let guard = self.dispatch_lock.lock();

        let action = match action {
            Action::Uri(uri) => match self.action_for_uri(&uri.uri)? {
                Some(action) => action,
                None => {
                    tracing::warn!(uri = %uri.uri, "No route matches URI");
                    return Ok(false);
                }
            },
            action => action,
        };

        let current = self.state.read().clone();
        let Some(next) = self.router.get_state_for_action(&action, Some(&current))? else {
            tracing::warn!(action = %action, "Unhandled action");
            return Ok(false);
        };
        if next == current {
            tracing::trace!(action = %action, "Action left state unchanged");
            return Ok(true);
        }

        let scenes = self.scenes.read().preview(&next)?;
        *self.state.write() = next.clone();
        self.scenes.write().commit(next.clone(), scenes);

        if self.config.trace_transitions {
            let active = next
                .active_chain()
                .iter()
                .map(|r| r.route_name.as_str())
                .collect::<Vec<_>>()
                .join("/");
            tracing::debug!(action = %action, active = %active, depth = next.len(), "Committed transition");
        }

        // Listeners may dispatch again
        drop(guard);
        let listeners = self.listeners.read().clone();
        for listener in listeners {
            listener(&next, &action);
        }

        Ok(true)
    }

    /// Parse and dispatch an action in its wire form
    pub fn dispatch_json(&self, json: &str) -> Result<bool> {
        let action = Action::from_json(json)?;
        self.dispatch(action)
    }

    /// Map a deep link such as `myapp://mail/message/7?ref=push` to an action
    pub fn action_for_uri(&self, uri: &str) -> Result<Option<Action>> {
        let uri = uri.trim();
        if uri.is_empty() {
            return Err(CoreError::InvalidUri("uri is empty".to_string()));
        }

        let rest = match uri.split_once(self.config.uri_prefix.as_str()) {
            Some((_, rest)) => rest,
            None => uri,
        };
        let (path, query) = rest.split_once('?').unwrap_or((rest, ""));
        let params: Params = url::form_urlencoded::parse(query.as_bytes())
            .into_owned()
            .collect();

        let action = self.router.get_action_for_path_and_params(path, &params);
        if action.is_some() {
            tracing::info!(uri = %uri, path = %path, "Resolved deep link");
        }
        Ok(action)
    }

    // === Listeners ===

    pub fn subscribe<F>(&self, listener: F)
    where
        F: Fn(&NavigationState, &Action) + Send + Sync + 'static,
    {
        self.listeners.write().push(Arc::new(listener));
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.read().len()
    }

    // === State ===

    pub fn state(&self) -> NavigationState {
        self.state.read().clone()
    }

    pub fn state_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&*self.state.read())?)
    }

    pub fn scenes(&self) -> Vec<Scene> {
        self.scenes.read().scenes().to_vec()
    }

    /// Drop stale scenes once exit animations have finished
    pub fn complete_transition(&self) -> usize {
        self.scenes.write().complete_transition()
    }

    pub fn path_and_params(&self) -> Result<PathAndParams> {
        Ok(self.router.get_path_and_params_for_state(&self.state.read())?)
    }

    // === Screens ===

    /// Navigation prop for the root navigator, dispatching into this container
    pub fn navigation(&self) -> NavigationProp<NavigationState> {
        let container = self.clone();
        let dispatch: Dispatch =
            Arc::new(move |action| container.dispatch(action).map_err(RouterError::from));
        NavigationProp::new(self.state(), dispatch)
    }

    pub fn active_screen(&self) -> Result<Arc<dyn Screen>> {
        Ok(self.router.get_component_for_state(&self.state.read())?)
    }

    /// Resolve a navigation option for the active screen
    pub fn screen_config(&self, option: &str) -> Result<Option<Value>> {
        let navigation = self.navigation().active()?;
        Ok(self.router.get_screen_config(&navigation, option)?)
    }
}

impl Clone for NavigationContainer {
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
            router: Arc::clone(&self.router),
            state: Arc::clone(&self.state),
            scenes: Arc::clone(&self.scenes),
            listeners: Arc::clone(&self.listeners),
            dispatch_lock: Arc::clone(&self.dispatch_lock),
        }
    }
}
