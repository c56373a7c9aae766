//! Navigation state tree
//!
//! ```text
//! NavigationState { index: 1 }
//!   routes[0]  Home
//!   routes[1]  Settings  (active)
//!     state: NavigationState { index: 0 }
//!       routes[0]  General
//! ```
//!
//! Every helper here is pure: it returns a new state and leaves `self`
//! untouched. Contract violations are reported as `StateError`.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::StateError;
use crate::route::{Params, Route};
use crate::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationState {
    /// Position of the active route in `routes`
    pub index: usize,
    pub routes: Vec<Route>,
}

impl NavigationState {
    /// Build a state, checking the index bound and key uniqueness
    pub fn new(routes: Vec<Route>, index: usize) -> Result<Self> {
        let state = Self { index, routes };
        state.validate()?;
        Ok(state)
    }

    /// A state holding a single, active route
    pub fn single(route: Route) -> Self {
        Self {
            index: 0,
            routes: vec![route],
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.routes.is_empty() {
            return Err(StateError::EmptyRoutes);
        }
        if self.index >= self.routes.len() {
            return Err(StateError::IndexOutOfRange {
                index: self.index,
                len: self.routes.len(),
            });
        }
        let mut seen = HashSet::with_capacity(self.routes.len());
        for route in &self.routes {
            if !seen.insert(route.key.as_str()) {
                return Err(StateError::DuplicateKey(route.key.clone()));
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub fn active_route(&self) -> Result<&Route> {
        self.routes.get(self.index).ok_or(StateError::IndexOutOfRange {
            index: self.index,
            len: self.routes.len(),
        })
    }

    /// Active routes from this level down through every nested navigator
    pub fn active_chain(&self) -> Vec<&Route> {
        let mut chain = Vec::new();
        let mut current = Some(self);
        while let Some(state) = current {
            match state.routes.get(state.index) {
                Some(route) => {
                    chain.push(route);
                    current = route.state.as_ref();
                }
                None => break,
            }
        }
        chain
    }

    pub fn get(&self, key: &str) -> Option<&Route> {
        self.routes.iter().find(|r| r.key == key)
    }

    pub fn index_of(&self, key: &str) -> Option<usize> {
        self.routes.iter().position(|r| r.key == key)
    }

    pub fn has(&self, key: &str) -> bool {
        self.index_of(key).is_some()
    }

    /// Append a route and make it active
    pub fn push(&self, route: Route) -> Result<Self> {
        if self.has(&route.key) {
            return Err(StateError::DuplicateKey(route.key));
        }
        let mut routes = self.routes.clone();
        routes.push(route);
        Ok(Self {
            index: routes.len() - 1,
            routes,
        })
    }

    /// Drop the last route. `None` when the active route is the first one.
    pub fn pop(&self) -> Option<Self> {
        if self.index == 0 || self.routes.len() < 2 {
            return None;
        }
        let routes = self.routes[..self.routes.len() - 1].to_vec();
        Some(Self {
            index: self.index - 1,
            routes,
        })
    }

    pub fn jump_to_index(&self, index: usize) -> Result<Self> {
        if index >= self.routes.len() {
            return Err(StateError::IndexOutOfRange {
                index,
                len: self.routes.len(),
            });
        }
        Ok(Self {
            index,
            routes: self.routes.clone(),
        })
    }

    pub fn jump_to(&self, key: &str) -> Result<Self> {
        let index = self
            .index_of(key)
            .ok_or_else(|| StateError::KeyNotFound(key.to_string()))?;
        self.jump_to_index(index)
    }

    /// Activate the previous route without removing anything
    pub fn back(&self) -> Option<Self> {
        if self.index == 0 {
            return None;
        }
        self.jump_to_index(self.index - 1).ok()
    }

    /// Activate the next route without removing anything
    pub fn forward(&self) -> Option<Self> {
        self.jump_to_index(self.index + 1).ok()
    }

    /// Replace the route with `key`, keeping the index
    pub fn replace_at(&self, key: &str, route: Route) -> Result<Self> {
        let index = self
            .index_of(key)
            .ok_or_else(|| StateError::KeyNotFound(key.to_string()))?;
        self.replace_at_index(index, route)
    }

    pub fn replace_at_index(&self, index: usize, route: Route) -> Result<Self> {
        let current = self.routes.get(index).ok_or(StateError::IndexOutOfRange {
            index,
            len: self.routes.len(),
        })?;
        if current.key != route.key && self.has(&route.key) {
            return Err(StateError::DuplicateKey(route.key));
        }
        let mut routes = self.routes.clone();
        routes[index] = route;
        Ok(Self {
            index: self.index,
            routes,
        })
    }

    /// Replace every route. The index defaults to the last route.
    pub fn reset(&self, routes: Vec<Route>, index: Option<usize>) -> Result<Self> {
        let index = index.unwrap_or_else(|| routes.len().saturating_sub(1));
        Self::new(routes, index)
    }

    /// Merge params into the route with `key`. `None` when no route matches.
    pub fn set_params(&self, key: &str, params: &Params) -> Option<Self> {
        let index = self.index_of(key)?;
        let mut routes = self.routes.clone();
        routes[index] = routes[index].merge_params(params);
        Some(Self {
            index: self.index,
            routes,
        })
    }

    /// Route names in order, handy for comparing histories
    pub fn route_names(&self) -> Vec<&str> {
        self.routes.iter().map(|r| r.route_name.as_str()).collect()
    }
}
