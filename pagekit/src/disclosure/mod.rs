//! Disclosure groups (accordions) with at most one open panel.
//!
//! Each panel owns a trigger, an icon and a body. The body's natural height
//! and vertical padding are measured once, before the first collapse, and
//! used as explicit transition targets when the panel opens, since a height
//! of `auto` cannot be interpolated.
//!
//! ```ignore
//! let groups = disclosure::init(&doc, &DisclosureConfig::default());
//! doc.click(trigger);
//! assert_eq!(groups[0].open_index(), Some(0));
//! ```

mod group;
mod panel;

use std::time::Duration;

use serde::Deserialize;
use webdom::Easing;

pub use group::{init, DisclosureGroup};
pub use panel::{Panel, PanelError, PanelState, Role};

/// Selectors, classes and timing for disclosure groups.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DisclosureConfig {
    /// Container of one group. Without any, all panels form one group.
    pub group_selector: String,
    pub panel_selector: String,
    pub trigger_selector: String,
    pub icon_selector: String,
    pub body_selector: String,
    /// Set on the panel root while open.
    pub open_class: String,
    /// Set on the icon while open.
    pub active_class: String,
    /// Set on the icon while the pointer is over the trigger.
    pub hovered_class: String,
    pub transition_ms: u64,
    pub easing: Easing,
}

impl Default for DisclosureConfig {
    fn default() -> Self {
        Self {
            group_selector: ".accordion".into(),
            panel_selector: ".accordion__item".into(),
            trigger_selector: ".accordion__header".into(),
            icon_selector: ".accordion__icon".into(),
            body_selector: ".accordion__body".into(),
            open_class: "open".into(),
            active_class: "active".into(),
            hovered_class: "hovered".into(),
            transition_ms: 700,
            easing: Easing::EaseInOut,
        }
    }
}

impl DisclosureConfig {
    pub fn transition(&self) -> Duration {
        Duration::from_millis(self.transition_ms)
    }

    pub fn with_transition_ms(mut self, ms: u64) -> Self {
        self.transition_ms = ms;
        self
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub(crate) fn selectors(&self) -> [&str; 5] {
        [
            &self.group_selector,
            &self.panel_selector,
            &self.trigger_selector,
            &self.icon_selector,
            &self.body_selector,
        ]
    }
}
