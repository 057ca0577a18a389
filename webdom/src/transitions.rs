use std::time::Duration;

use serde::Deserialize;

use crate::style::StyleProperty;

/// Configuration for a single property transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionConfig {
    pub duration: Duration,
    pub easing: Easing,
}

impl TransitionConfig {
    pub fn new(duration: Duration, easing: Easing) -> Self {
        Self { duration, easing }
    }
}

/// Easing function for transitions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Easing {
    #[default]
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
    /// Cubic ease out, `1 - (1 - t)^3`.
    EaseOutCubic,
}

impl Easing {
    /// Apply easing to progress (0.0 to 1.0).
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseIn => t * t,
            Easing::EaseOut => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
            Easing::EaseOutCubic => 1.0 - (1.0 - t).powi(3),
        }
    }
}

/// Transitions configured on an element.
///
/// An empty `Transitions` means style writes apply instantly.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Transitions {
    pub height: Option<TransitionConfig>,
    pub padding_top: Option<TransitionConfig>,
    pub padding_bottom: Option<TransitionConfig>,
    pub opacity: Option<TransitionConfig>,
}

impl Transitions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn height(mut self, duration: Duration, easing: Easing) -> Self {
        self.height = Some(TransitionConfig::new(duration, easing));
        self
    }

    pub fn padding_top(mut self, duration: Duration, easing: Easing) -> Self {
        self.padding_top = Some(TransitionConfig::new(duration, easing));
        self
    }

    pub fn padding_bottom(mut self, duration: Duration, easing: Easing) -> Self {
        self.padding_bottom = Some(TransitionConfig::new(duration, easing));
        self
    }

    pub fn opacity(mut self, duration: Duration, easing: Easing) -> Self {
        self.opacity = Some(TransitionConfig::new(duration, easing));
        self
    }

    /// Set transition for vertical padding (top, bottom).
    pub fn padding(self, duration: Duration, easing: Easing) -> Self {
        self.padding_top(duration, easing)
            .padding_bottom(duration, easing)
    }

    /// Set transition for the vertical box (height and padding).
    pub fn vertical_box(self, duration: Duration, easing: Easing) -> Self {
        self.height(duration, easing).padding(duration, easing)
    }

    /// Transition configured for a property, if any.
    pub fn get(&self, property: &StyleProperty) -> Option<TransitionConfig> {
        match property {
            StyleProperty::Height => self.height,
            StyleProperty::PaddingTop => self.padding_top,
            StyleProperty::PaddingBottom => self.padding_bottom,
            StyleProperty::Opacity => self.opacity,
            StyleProperty::Transform | StyleProperty::ZIndex | StyleProperty::Custom(_) => None,
        }
    }

    /// Returns true if any transition is configured.
    pub fn has_any(&self) -> bool {
        self.height.is_some()
            || self.padding_top.is_some()
            || self.padding_bottom.is_some()
            || self.opacity.is_some()
    }
}
