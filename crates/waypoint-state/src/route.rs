//! Route data structure
//!
//! A route is one entry in a navigator's `routes` sequence. It identifies a
//! leaf screen, or a child navigator when `state` is present.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::state::NavigationState;

/// Route parameters, e.g. `{ "id": "42" }` on a profile screen
pub type Params = BTreeMap<String, String>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    /// Unique within the owning routes sequence. Assigned by the router, never reassigned.
    pub key: String,
    /// Name of the entry in the route config map, e.g. `Home`
    pub route_name: String,
    /// Path used for deep linking
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Params passed when navigating to this route
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub params: Params,
    /// State of the child navigator hosted by this route
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<NavigationState>,
}

impl Route {
    pub fn new(key: impl Into<String>, route_name: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            route_name: route_name.into(),
            path: None,
            params: Params::new(),
            state: None,
        }
    }

    pub fn with_params(mut self, params: Params) -> Self {
        self.params = params;
        self
    }

    pub fn with_state(mut self, state: NavigationState) -> Self {
        self.state = Some(state);
        self
    }

    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    /// Merge `params` over the existing params, returning the updated route
    pub fn merge_params(&self, params: &Params) -> Self {
        let mut merged = self.params.clone();
        merged.extend(params.iter().map(|(k, v)| (k.clone(), v.clone())));
        Self {
            params: merged,
            ..self.clone()
        }
    }
}
