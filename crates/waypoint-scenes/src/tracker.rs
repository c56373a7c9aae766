//! Scene tracking across transitions

use crate::scene::{reduce_scenes, Scene};
use crate::Result;
use waypoint_state::NavigationState;

/// Keeps the last state and its scenes so each new state can be diffed
/// against the previous one.
#[derive(Debug, Clone, Default)]
pub struct SceneTracker {
    state: Option<NavigationState>,
    scenes: Vec<Scene>,
}

impl SceneTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scenes `next` would produce, without recording it
    pub fn preview(&self, next: &NavigationState) -> Result<Vec<Scene>> {
        reduce_scenes(&self.scenes, next, self.state.as_ref())
    }

    /// Record a state together with scenes computed by [`SceneTracker::preview`]
    pub fn commit(&mut self, next: NavigationState, scenes: Vec<Scene>) {
        self.state = Some(next);
        self.scenes = scenes;
    }

    pub fn update(&mut self, next: &NavigationState) -> Result<&[Scene]> {
        let scenes = self.preview(next)?;
        self.commit(next.clone(), scenes);
        Ok(&self.scenes)
    }

    pub fn scenes(&self) -> &[Scene] {
        &self.scenes
    }

    pub fn state(&self) -> Option<&NavigationState> {
        self.state.as_ref()
    }

    /// True while stale scenes are still waiting for their exit animation
    pub fn is_transitioning(&self) -> bool {
        self.scenes.iter().any(|s| s.is_stale)
    }

    /// Drop stale scenes once the exit animation has finished.
    ///
    /// Returns the number of scenes dropped.
    pub fn complete_transition(&mut self) -> usize {
        let before = self.scenes.len();
        self.scenes.retain(|s| !s.is_stale);
        let dropped = before - self.scenes.len();
        if dropped > 0 {
            tracing::debug!(dropped, "Completed scene transition");
        }
        dropped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use waypoint_state::Route;

    fn state(keys: &[&str], index: usize) -> NavigationState {
        NavigationState {
            index,
            routes: keys.iter().map(|k| Route::new(*k, *k)).collect(),
        }
    }

    #[test]
    fn test_tracks_transitions() {
        let mut tracker = SceneTracker::new();
        assert!(tracker.scenes().is_empty());

        tracker.update(&state(&["A", "B"], 1)).unwrap();
        assert_eq!(tracker.scenes().len(), 2);
        assert!(!tracker.is_transitioning());

        let scenes = tracker.update(&state(&["A"], 0)).unwrap();
        assert_eq!(scenes.len(), 2);
        assert!(scenes[1].is_stale);
        assert!(tracker.is_transitioning());

        assert_eq!(tracker.complete_transition(), 1);
        assert_eq!(tracker.scenes().len(), 1);
        assert!(tracker.scenes()[0].is_active);
        assert_eq!(tracker.complete_transition(), 0);
    }

    #[test]
    fn test_preview_does_not_commit() {
        let mut tracker = SceneTracker::new();
        tracker.update(&state(&["A"], 0)).unwrap();

        let preview = tracker.preview(&state(&["A", "B"], 1)).unwrap();
        assert_eq!(preview.len(), 2);
        assert_eq!(tracker.scenes().len(), 1);
        assert_eq!(tracker.state().map(|s| s.len()), Some(1));
    }

    #[test]
    fn test_failed_update_keeps_previous_scenes() {
        let mut tracker = SceneTracker::new();
        tracker.update(&state(&["A"], 0)).unwrap();
        assert!(tracker.update(&state(&["B", "B"], 0)).is_err());
        assert_eq!(tracker.scenes()[0].route.key, "A");
    }
}
