//! Screen registry types
//!
//! A route name resolves to a `Screen`: the capability set a rendering host
//! needs to show the route. Screens that own a router are navigators.

use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::navigation::NavigationProp;
use crate::router::Router;
use waypoint_state::Route;

pub trait Screen: Send + Sync {
    fn name(&self) -> &str;

    /// Options declared by the screen itself
    fn navigation_options(&self) -> Option<&ScreenOptions> {
        None
    }

    /// Router of a child navigator, `None` for leaf screens
    fn router(&self) -> Option<Arc<dyn Router>> {
        None
    }
}

/// A plain screen with a name and static options
#[derive(Debug, Clone)]
pub struct LeafScreen {
    name: String,
    options: ScreenOptions,
}

impl LeafScreen {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            options: ScreenOptions::new(),
        }
    }

    pub fn with_options(mut self, options: ScreenOptions) -> Self {
        self.options = options;
        self
    }
}

impl Screen for LeafScreen {
    fn name(&self) -> &str {
        &self.name
    }

    fn navigation_options(&self) -> Option<&ScreenOptions> {
        Some(&self.options)
    }
}

/// A screen hosting a child navigator
#[derive(Clone)]
pub struct NavigatorScreen {
    name: String,
    router: Arc<dyn Router>,
    options: ScreenOptions,
}

impl NavigatorScreen {
    pub fn new(name: impl Into<String>, router: impl Router + 'static) -> Self {
        Self::shared(name, Arc::new(router))
    }

    pub fn shared(name: impl Into<String>, router: Arc<dyn Router>) -> Self {
        Self {
            name: name.into(),
            router,
            options: ScreenOptions::new(),
        }
    }

    pub fn with_options(mut self, options: ScreenOptions) -> Self {
        self.options = options;
        self
    }
}

impl Screen for NavigatorScreen {
    fn name(&self) -> &str {
        &self.name
    }

    fn navigation_options(&self) -> Option<&ScreenOptions> {
        Some(&self.options)
    }

    fn router(&self) -> Option<Arc<dyn Router>> {
        Some(Arc::clone(&self.router))
    }
}

/// Computes an option from the screen's navigation prop and the value
/// resolved so far by lower-precedence layers
pub type DynamicOption =
    Arc<dyn Fn(&NavigationProp<Route>, Option<&Value>) -> Value + Send + Sync>;

#[derive(Clone)]
pub enum ScreenOption {
    Static(Value),
    Dynamic(DynamicOption),
}

/// Named options such as `title`, `header` or `tabBar`
#[derive(Clone, Default)]
pub struct ScreenOptions {
    options: BTreeMap<String, ScreenOption>,
}

impl ScreenOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.options
            .insert(name.into(), ScreenOption::Static(value.into()));
        self
    }

    pub fn with_fn<F>(mut self, name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&NavigationProp<Route>, Option<&Value>) -> Value + Send + Sync + 'static,
    {
        self.options
            .insert(name.into(), ScreenOption::Dynamic(Arc::new(f)));
        self
    }

    pub fn get(&self, name: &str) -> Option<&ScreenOption> {
        self.options.get(name)
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    /// Apply this layer on top of `current`.
    ///
    /// Static objects are shallow-merged over an object `current`; any other
    /// static value replaces it. Dynamic options decide for themselves.
    pub fn resolve(
        &self,
        name: &str,
        navigation: &NavigationProp<Route>,
        current: Option<Value>,
    ) -> Option<Value> {
        match self.options.get(name) {
            None => current,
            Some(ScreenOption::Static(value)) => Some(merge(current, value.clone())),
            Some(ScreenOption::Dynamic(f)) => Some(f(navigation, current.as_ref())),
        }
    }
}

impl std::fmt::Debug for ScreenOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.options.keys()).finish()
    }
}

fn merge(current: Option<Value>, next: Value) -> Value {
    match (current, next) {
        (Some(Value::Object(mut base)), Value::Object(over)) => {
            base.extend(over);
            Value::Object(base)
        }
        (_, next) => next,
    }
}
