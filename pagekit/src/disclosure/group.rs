use std::collections::HashSet;
use std::sync::{Arc, RwLock};

use log::{debug, info};
use webdom::{Event, EventKind, Host, NodeId, StyleProperty, StyleValue, Transitions};

use super::{DisclosureConfig, Panel, PanelState};

/// Discover and bind every disclosure group in the document.
///
/// Panels are grouped by `group_selector`, each panel belonging to its
/// nearest group container; when the page has no group containers, every
/// panel in the document forms a single group. Every panel is measured
/// before any group collapses its bodies. Groups without a single valid
/// panel are dropped.
pub fn init(host: &dyn Host, config: &DisclosureConfig) -> Vec<Arc<DisclosureGroup>> {
    let roots = host.query_all(&config.group_selector);
    let candidates: Vec<(Option<NodeId>, Vec<NodeId>)> = if roots.is_empty() {
        vec![(None, host.query_all(&config.panel_selector))]
    } else {
        let mut claimed = HashSet::new();
        roots
            .into_iter()
            .map(|root| {
                let panels = host
                    .query_within_all(root, &config.panel_selector)
                    .into_iter()
                    .filter(|&panel| nearest_group(host, panel, config) == Some(root))
                    .filter(|&panel| claimed.insert(panel))
                    .collect();
                (Some(root), panels)
            })
            .collect()
    };

    let discovered: Vec<(Option<NodeId>, Vec<Panel>)> = candidates
        .into_iter()
        .map(|(root, panels)| {
            let panels = panels
                .into_iter()
                .filter_map(|candidate| match Panel::discover(host, candidate, config) {
                    Ok(panel) => Some(panel),
                    Err(e) => {
                        debug!("disclosure: skipping {e}");
                        None
                    }
                })
                .collect();
            (root, panels)
        })
        .collect();

    let groups: Vec<_> = discovered
        .into_iter()
        .filter(|(_, panels)| !panels.is_empty())
        .map(|(root, panels)| DisclosureGroup::new(host, root, panels, config.clone()))
        .collect();

    for group in &groups {
        group.bind(host);
    }

    info!(
        "disclosure: {} groups, {} panels",
        groups.len(),
        groups.iter().map(|g| g.len()).sum::<usize>()
    );
    groups
}

/// Closest group container strictly above `panel`.
fn nearest_group(host: &dyn Host, panel: NodeId, config: &DisclosureConfig) -> Option<NodeId> {
    host.parent(panel)
        .and_then(|parent| host.closest(parent, &config.group_selector))
}

/// A set of panels of which at most one is open.
#[derive(Debug)]
pub struct DisclosureGroup {
    root: Option<NodeId>,
    panels: Vec<Panel>,
    state: RwLock<Vec<PanelState>>,
    config: DisclosureConfig,
}

impl DisclosureGroup {
    /// Build a group from discovered panels.
    ///
    /// Every panel is collapsed with transitions disabled. Transitions are
    /// enabled by a deferred task so the initial collapse never animates.
    /// Listeners are attached separately by [`bind`](Self::bind).
    pub fn new(
        host: &dyn Host,
        root: Option<NodeId>,
        panels: Vec<Panel>,
        config: DisclosureConfig,
    ) -> Arc<Self> {
        for panel in &panels {
            host.set_transitions(panel.body(), Transitions::new());
            host.set_style(panel.body(), StyleProperty::Height, StyleValue::Px(0.0));
            host.set_style(panel.body(), StyleProperty::PaddingTop, StyleValue::Px(0.0));
            host.set_style(panel.body(), StyleProperty::PaddingBottom, StyleValue::Px(0.0));
            host.set_style(panel.body(), StyleProperty::Opacity, StyleValue::Number(1.0));
        }

        let bodies: Vec<NodeId> = panels.iter().map(Panel::body).collect();
        let transitions = Transitions::new().vertical_box(config.transition(), config.easing);
        host.defer(Box::new(move |host: &dyn Host| {
            for body in bodies {
                host.set_transitions(body, transitions.clone());
            }
        }));

        Arc::new(Self {
            root,
            state: RwLock::new(vec![PanelState::default(); panels.len()]),
            panels,
            config,
        })
    }

    /// Attach activation and hover listeners to every trigger.
    pub fn bind(self: &Arc<Self>, host: &dyn Host) {
        for (index, panel) in self.panels.iter().enumerate() {
            let group = Arc::clone(self);
            host.listen(
                panel.trigger(),
                EventKind::Click,
                Arc::new(move |host: &dyn Host, _: &Event| group.toggle(host, index)),
            );

            let group = Arc::clone(self);
            host.listen(
                panel.trigger(),
                EventKind::MouseEnter,
                Arc::new(move |host: &dyn Host, _: &Event| group.set_hovered(host, index, true)),
            );

            let group = Arc::clone(self);
            host.listen(
                panel.trigger(),
                EventKind::MouseLeave,
                Arc::new(move |host: &dyn Host, _: &Event| group.set_hovered(host, index, false)),
            );
        }
    }

    // -------------------------------------------------------------------------
    // Read methods
    // -------------------------------------------------------------------------

    /// Container element, or None for the document-wide fallback group.
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn len(&self) -> usize {
        self.panels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }

    pub fn panel(&self, index: usize) -> Option<&Panel> {
        self.panels.get(index)
    }

    pub fn panels(&self) -> &[Panel] {
        &self.panels
    }

    /// Index of the panel whose trigger is `node`.
    pub fn index_of_trigger(&self, node: NodeId) -> Option<usize> {
        self.panels.iter().position(|p| p.trigger() == node)
    }

    pub fn state(&self, index: usize) -> Option<PanelState> {
        self.state
            .read()
            .ok()
            .and_then(|guard| guard.get(index).copied())
    }

    pub fn is_open(&self, index: usize) -> bool {
        self.state(index).is_some_and(|s| s.open)
    }

    pub fn is_hovered(&self, index: usize) -> bool {
        self.state(index).is_some_and(|s| s.hovered)
    }

    /// The open panel, if any.
    pub fn open_index(&self) -> Option<usize> {
        self.state
            .read()
            .ok()
            .and_then(|guard| guard.iter().position(|s| s.open))
    }

    // -------------------------------------------------------------------------
    // Write methods
    // -------------------------------------------------------------------------

    /// Flip panel `index`, then collapse every other panel.
    ///
    /// The other panels are collapsed even when closing, which also repairs
    /// any inconsistent prior state.
    pub fn toggle(&self, host: &dyn Host, index: usize) {
        let Some(target) = self.panels.get(index) else {
            return;
        };
        let Ok(mut state) = self.state.write() else {
            return;
        };

        let was_open = state[index].open;
        if was_open {
            self.render_collapsed(host, target);
        } else {
            self.render_expanded(host, target);
        }
        state[index].open = !was_open;

        for (other, panel) in self.panels.iter().enumerate() {
            if other != index {
                self.render_collapsed(host, panel);
                state[other].open = false;
            }
        }

        debug!(
            "disclosure: panel {} {}",
            index,
            if was_open { "closed" } else { "opened" }
        );
    }

    /// Open panel `index` unless it already is.
    pub fn open(&self, host: &dyn Host, index: usize) {
        if index < self.len() && !self.is_open(index) {
            self.toggle(host, index);
        }
    }

    /// Close panel `index` if it is open.
    pub fn close(&self, host: &dyn Host, index: usize) {
        if self.is_open(index) {
            self.toggle(host, index);
        }
    }

    /// Update the hover indicator. Does not touch the open state.
    pub fn set_hovered(&self, host: &dyn Host, index: usize, hovered: bool) {
        let Some(panel) = self.panels.get(index) else {
            return;
        };
        if let Ok(mut state) = self.state.write() {
            state[index].hovered = hovered;
        }
        host.set_class(panel.icon(), &self.config.hovered_class, hovered);
    }

    fn render_collapsed(&self, host: &dyn Host, panel: &Panel) {
        host.set_style(panel.body(), StyleProperty::Height, StyleValue::Px(0.0));
        host.set_class(panel.root(), &self.config.open_class, false);
        host.set_class(panel.icon(), &self.config.active_class, false);
        host.set_style(panel.body(), StyleProperty::PaddingTop, StyleValue::Px(0.0));
        host.set_style(panel.body(), StyleProperty::PaddingBottom, StyleValue::Px(0.0));
    }

    fn render_expanded(&self, host: &dyn Host, panel: &Panel) {
        host.set_style(
            panel.body(),
            StyleProperty::Height,
            StyleValue::Px(panel.natural_height()),
        );
        host.set_class(panel.root(), &self.config.open_class, true);
        host.set_class(panel.icon(), &self.config.active_class, true);
        host.set_style(
            panel.body(),
            StyleProperty::PaddingTop,
            StyleValue::Px(panel.padding_top()),
        );
        host.set_style(
            panel.body(),
            StyleProperty::PaddingBottom,
            StyleValue::Px(panel.padding_bottom()),
        );
    }
}
