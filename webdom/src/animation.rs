use std::collections::HashMap;
use std::time::Duration;

use crate::element::NodeId;
use crate::style::StyleProperty;
use crate::transitions::{Easing, TransitionConfig};

/// A single active transition.
#[derive(Debug, Clone)]
struct ActiveTransition {
    from: f32,
    to: f32,
    start: Duration,
    duration: Duration,
    easing: Easing,
}

impl ActiveTransition {
    fn value_at(&self, now: Duration) -> f32 {
        let elapsed = now.saturating_sub(self.start);
        let progress = if self.duration.is_zero() {
            1.0
        } else {
            (elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
        };
        lerp(self.from, self.to, self.easing.apply(progress))
    }

    fn finished(&self, now: Duration) -> bool {
        now.saturating_sub(self.start) >= self.duration
    }
}

/// Tracks in-flight property transitions against the document clock.
#[derive(Debug, Default)]
pub struct AnimationState {
    /// Currently active transitions: (node, property) -> transition.
    active: HashMap<(NodeId, StyleProperty), ActiveTransition>,
    /// Number of transitions started since creation.
    started: usize,
    /// Reduced motion flag - when true, transitions complete instantly.
    reduced_motion: bool,
}

impl AnimationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable reduced motion (accessibility).
    pub fn set_reduced_motion(&mut self, enabled: bool) {
        self.reduced_motion = enabled;
    }

    /// Returns true if any transition is currently active.
    pub fn has_active_transitions(&self) -> bool {
        !self.active.is_empty()
    }

    pub fn is_animating(&self, node: NodeId, property: &StyleProperty) -> bool {
        self.active.contains_key(&(node, property.clone()))
    }

    pub fn started(&self) -> usize {
        self.started
    }

    /// Start a transition towards `to`.
    ///
    /// If the property is already moving, the new transition starts from the
    /// current interpolated value rather than `from`. Returns whether a
    /// transition was started.
    pub fn start(
        &mut self,
        node: NodeId,
        property: StyleProperty,
        from: f32,
        to: f32,
        config: TransitionConfig,
        now: Duration,
    ) -> bool {
        let key = (node, property);
        let from = self
            .active
            .get(&key)
            .map(|existing| existing.value_at(now))
            .unwrap_or(from);

        if self.reduced_motion || config.duration.is_zero() || from == to {
            self.active.remove(&key);
            return false;
        }

        self.active.insert(
            key,
            ActiveTransition {
                from,
                to,
                start: now,
                duration: config.duration,
                easing: config.easing,
            },
        );
        self.started += 1;
        true
    }

    /// Drop a transition so the property snaps to its target.
    pub fn cancel(&mut self, node: NodeId, property: &StyleProperty) {
        self.active.remove(&(node, property.clone()));
    }

    /// Get the interpolated value for a property.
    /// Returns None if no active transition for this property.
    pub fn interpolated(&self, node: NodeId, property: &StyleProperty, now: Duration) -> Option<f32> {
        self.active
            .get(&(node, property.clone()))
            .map(|transition| transition.value_at(now))
    }

    /// Remove completed transitions.
    pub fn prune(&mut self, now: Duration) {
        self.active.retain(|_, transition| !transition.finished(now));
    }
}

fn lerp(from: f32, to: f32, t: f32) -> f32 {
    from + (to - from) * t
}
