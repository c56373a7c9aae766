//! Scene calculation

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashSet;

use crate::error::SceneError;
use crate::Result;
use waypoint_state::{NavigationState, Route};

pub const SCENE_KEY_PREFIX: &str = "scene_";

/// A route wrapped for rendering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scene {
    /// Position of the route in the state it was taken from
    pub index: usize,
    pub key: String,
    pub route: Route,
    pub is_active: bool,
    /// The route left the navigator during the last transition
    pub is_stale: bool,
}

impl Scene {
    fn new(index: usize, route: &Route, is_stale: bool) -> Self {
        Self {
            index,
            key: scene_key(route),
            route: route.clone(),
            is_active: false,
            is_stale,
        }
    }
}

fn scene_key(route: &Route) -> String {
    format!("{}{}", SCENE_KEY_PREFIX, route.key)
}

/// Index first, then shorter keys, then key order
fn compare_scenes(a: &Scene, b: &Scene) -> Ordering {
    a.index
        .cmp(&b.index)
        .then_with(|| a.key.len().cmp(&b.key.len()))
        .then_with(|| a.key.cmp(&b.key))
}

/// Compute the scenes for the transition `prev -> next`.
///
/// Routes of `prev` missing from `next` come back as stale scenes. Scenes
/// that were already stale in `prev_scenes` are dropped: a stale scene lives
/// for one transition only. Fresh scenes reuse the matching previous scene
/// when nothing about it changed.
pub fn reduce_scenes(
    prev_scenes: &[Scene],
    next: &NavigationState,
    prev: Option<&NavigationState>,
) -> Result<Vec<Scene>> {
    let mut next_keys = HashSet::with_capacity(next.routes.len());
    let mut scenes = Vec::with_capacity(next.routes.len());

    for (index, route) in next.routes.iter().enumerate() {
        let scene = Scene::new(index, route, false);
        if !next_keys.insert(scene.key.clone()) {
            return Err(SceneError::DuplicateKey {
                index,
                key: scene.key,
            });
        }
        let reused = prev_scenes
            .iter()
            .find(|s| !s.is_stale && s.key == scene.key && s.index == index && s.route == *route);
        scenes.push(reused.cloned().unwrap_or(scene));
    }

    if let Some(prev) = prev {
        for (index, route) in prev.routes.iter().enumerate() {
            if next_keys.contains(&scene_key(route)) {
                continue;
            }
            let scene = Scene::new(index, route, true);
            tracing::trace!(key = %scene.key, index, "Scene became stale");
            scenes.push(scene);
        }
    }

    scenes.sort_by(compare_scenes);

    let mut active = 0;
    for scene in &mut scenes {
        scene.is_active = !scene.is_stale && scene.index == next.index;
        if scene.is_active {
            active += 1;
        }
    }
    if active != 1 {
        return Err(SceneError::ActiveSceneCount(active));
    }

    Ok(scenes)
}
