use std::fmt;

use thiserror::Error;
use webdom::{Host, NodeId};

use super::DisclosureConfig;

/// Sub-element a panel needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Trigger,
    Icon,
    Body,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Role::Trigger => "trigger",
            Role::Icon => "icon",
            Role::Body => "body",
        })
    }
}

/// A candidate that cannot take part in a group. Never surfaced to the page.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PanelError {
    #[error("malformed panel {root}: no {role} element")]
    Malformed { root: NodeId, role: Role },
}

/// Mutable per-panel state. `open` is authoritative; classes are projections.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PanelState {
    pub open: bool,
    pub hovered: bool,
}

/// One disclosure unit with its measurements.
#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    root: NodeId,
    trigger: NodeId,
    icon: NodeId,
    body: NodeId,
    natural_height: f32,
    padding_top: f32,
    padding_bottom: f32,
}

impl Panel {
    /// Resolve the sub-elements of `root` and measure the body.
    ///
    /// Must run before the body is collapsed, or the measurement is zero.
    pub fn discover(
        host: &dyn Host,
        root: NodeId,
        config: &DisclosureConfig,
    ) -> Result<Self, PanelError> {
        // Sub-elements of nested panels belong to those panels.
        let find = |selector: &str, role: Role| {
            host.query_within_all(root, selector)
                .into_iter()
                .find(|&node| {
                    host.parent(node)
                        .and_then(|parent| host.closest(parent, &config.panel_selector))
                        == Some(root)
                })
                .ok_or(PanelError::Malformed { root, role })
        };

        let trigger = find(&config.trigger_selector, Role::Trigger)?;
        let icon = find(&config.icon_selector, Role::Icon)?;
        let body = find(&config.body_selector, Role::Body)?;

        let metrics = host.measure(body);
        Ok(Self {
            root,
            trigger,
            icon,
            body,
            natural_height: metrics.height,
            padding_top: metrics.padding.top,
            padding_bottom: metrics.padding.bottom,
        })
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn trigger(&self) -> NodeId {
        self.trigger
    }

    pub fn icon(&self) -> NodeId {
        self.icon
    }

    pub fn body(&self) -> NodeId {
        self.body
    }

    /// Body content height measured before the first collapse.
    pub fn natural_height(&self) -> f32 {
        self.natural_height
    }

    pub fn padding_top(&self) -> f32 {
        self.padding_top
    }

    pub fn padding_bottom(&self) -> f32 {
        self.padding_bottom
    }
}
