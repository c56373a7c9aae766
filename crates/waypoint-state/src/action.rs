//! Navigation actions
//!
//! Actions are immutable instructions, created by UI event handlers or by the
//! path codec and consumed once by a reducer. They serialise to the wire
//! shapes shared with other navigation hosts:
//!
//! ```text
//! {"type":"Navigation/NAVIGATE","routeName":"Profile","params":{"id":"42"}}
//! {"type":"Navigation/BACK","key":"Profile-3"}
//! {"type":"Navigation/SET_PARAMS","key":"Profile-3","params":{"tab":"likes"}}
//! {"type":"Navigation/INIT"}
//! {"type":"Navigation/RESET","index":0,"actions":[{"type":"Navigation/NAVIGATE","routeName":"Home"}]}
//! {"type":"Navigation/URI","uri":"myapp://profile/42"}
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::route::Params;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Action {
    #[serde(rename = "Navigation/INIT")]
    Init(InitAction),
    #[serde(rename = "Navigation/NAVIGATE")]
    Navigate(NavigateAction),
    #[serde(rename = "Navigation/BACK")]
    Back(BackAction),
    #[serde(rename = "Navigation/SET_PARAMS")]
    SetParams(SetParamsAction),
    #[serde(rename = "Navigation/RESET")]
    Reset(ResetAction),
    #[serde(rename = "Navigation/URI")]
    Uri(UriAction),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitAction {
    /// Handed to the initial route of a nested navigator
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub params: Params,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigateAction {
    pub route_name: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub params: Params,
    /// The action to run inside the sub-router
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<Box<Action>>,
    /// Key for the pushed route; generated by the router when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackAction {
    /// Go back from this route; `None` pops the top of the stack
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetParamsAction {
    /// The key of the route where the params should be set
    pub key: String,
    /// Merged into the existing route params
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub params: Params,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResetAction {
    pub index: usize,
    #[serde(with = "navigate_list")]
    pub actions: Vec<NavigateAction>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UriAction {
    pub uri: String,
}

impl Action {
    pub fn init() -> Self {
        Action::Init(InitAction::default())
    }

    pub fn navigate(route_name: impl Into<String>) -> Self {
        Action::Navigate(NavigateAction::new(route_name))
    }

    /// Pop the top of the stack
    pub fn back() -> Self {
        Action::Back(BackAction::default())
    }

    /// Go back from the route with `key`
    pub fn back_from(key: impl Into<String>) -> Self {
        Action::Back(BackAction {
            key: Some(key.into()),
        })
    }

    pub fn set_params(key: impl Into<String>, params: Params) -> Self {
        Action::SetParams(SetParamsAction {
            key: key.into(),
            params,
        })
    }

    pub fn reset(index: usize, actions: Vec<NavigateAction>) -> Self {
        Action::Reset(ResetAction { index, actions })
    }

    pub fn uri(uri: impl Into<String>) -> Self {
        Action::Uri(UriAction { uri: uri.into() })
    }

    /// Wire name of the action, e.g. `Navigation/BACK`
    pub fn kind(&self) -> &'static str {
        match self {
            Action::Init(_) => "Navigation/INIT",
            Action::Navigate(_) => "Navigation/NAVIGATE",
            Action::Back(_) => "Navigation/BACK",
            Action::SetParams(_) => "Navigation/SET_PARAMS",
            Action::Reset(_) => "Navigation/RESET",
            Action::Uri(_) => "Navigation/URI",
        }
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::Navigate(nav) => write!(f, "{}({})", self.kind(), nav.route_name),
            Action::Back(BackAction { key: Some(key) }) => write!(f, "{}({})", self.kind(), key),
            Action::SetParams(set) => write!(f, "{}({})", self.kind(), set.key),
            Action::Reset(reset) => {
                write!(f, "{}({}/{})", self.kind(), reset.index, reset.actions.len())
            }
            Action::Uri(uri) => write!(f, "{}({})", self.kind(), uri.uri),
            _ => f.write_str(self.kind()),
        }
    }
}

impl NavigateAction {
    pub fn new(route_name: impl Into<String>) -> Self {
        Self {
            route_name: route_name.into(),
            params: Params::new(),
            action: None,
            key: None,
        }
    }

    pub fn with_params(mut self, params: Params) -> Self {
        self.params = params;
        self
    }

    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    pub fn with_action(mut self, action: impl Into<Action>) -> Self {
        self.action = Some(Box::new(action.into()));
        self
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }
}

impl From<NavigateAction> for Action {
    fn from(action: NavigateAction) -> Self {
        Action::Navigate(action)
    }
}

/// Reset carries navigate actions in their full wire form, `type` included.
mod navigate_list {
    use serde::de::Error as _;
    use serde::ser::SerializeSeq;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::{Action, NavigateAction};

    #[allow(clippy::ptr_arg)]
    pub fn serialize<S: Serializer>(
        actions: &Vec<NavigateAction>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(actions.len()))?;
        for action in actions {
            seq.serialize_element(&Action::Navigate(action.clone()))?;
        }
        seq.end()
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Vec<NavigateAction>, D::Error> {
        Vec::<Action>::deserialize(deserializer)?
            .into_iter()
            .map(|action| match action {
                Action::Navigate(nav) => Ok(nav),
                other => Err(D::Error::custom(format!(
                    "reset expects navigate actions, got {}",
                    other.kind()
                ))),
            })
            .collect()
    }
}
