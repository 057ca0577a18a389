//! Hover indicators: a class follows the pointer over an item.

use std::sync::Arc;

use log::{debug, info};
use serde::Deserialize;
use webdom::{Event, EventKind, Host, NodeId};

/// One kind of hoverable item.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HoverBinding {
    pub item_selector: String,
    /// Elements inside the item that receive the class. Items missing any of
    /// them are skipped.
    #[serde(default)]
    pub targets: Vec<String>,
    pub class: String,
    /// Also toggle the class on the item itself.
    #[serde(default)]
    pub include_item: bool,
}

impl HoverBinding {
    pub fn new(item_selector: &str, targets: &[&str], class: &str) -> Self {
        Self {
            item_selector: item_selector.into(),
            targets: targets.iter().map(|t| t.to_string()).collect(),
            class: class.into(),
            include_item: false,
        }
    }

    pub fn including_item(mut self) -> Self {
        self.include_item = true;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct HoverConfig {
    pub bindings: Vec<HoverBinding>,
}

impl Default for HoverConfig {
    fn default() -> Self {
        Self {
            bindings: vec![
                HoverBinding::new(".service__option", &[".option__icon"], "hovered"),
                HoverBinding::new(
                    ".header__nav-item",
                    &[".header__submenu", ".header__nav-item-arrow"],
                    "active",
                ),
                HoverBinding::new(".direction", &[".direction__btn"], "hovered").including_item(),
            ],
        }
    }
}

/// A bound item and the nodes its class is toggled on.
#[derive(Debug, Clone, PartialEq)]
pub struct HoverItem {
    pub item: NodeId,
    pub nodes: Vec<NodeId>,
    pub class: String,
}

impl HoverItem {
    fn apply(&self, host: &dyn Host, on: bool) {
        for &node in &self.nodes {
            host.set_class(node, &self.class, on);
        }
    }
}

pub fn bind(host: &dyn Host, binding: &HoverBinding) -> Vec<Arc<HoverItem>> {
    let mut bound = Vec::new();
    for item in host.query_all(&binding.item_selector) {
        let targets: Option<Vec<NodeId>> = binding
            .targets
            .iter()
            .map(|selector| host.query_within(item, selector))
            .collect();
        let Some(mut nodes) = targets else {
            debug!("hover: {item} lacks a target of `{}`", binding.item_selector);
            continue;
        };
        if binding.include_item {
            nodes.insert(0, item);
        }

        let hover = Arc::new(HoverItem {
            item,
            nodes,
            class: binding.class.clone(),
        });
        let target = Arc::clone(&hover);
        host.listen(
            item,
            EventKind::MouseEnter,
            Arc::new(move |host: &dyn Host, _: &Event| target.apply(host, true)),
        );
        let target = Arc::clone(&hover);
        host.listen(
            item,
            EventKind::MouseLeave,
            Arc::new(move |host: &dyn Host, _: &Event| target.apply(host, false)),
        );
        bound.push(hover);
    }
    bound
}

pub fn init(host: &dyn Host, config: &HoverConfig) -> Vec<Arc<HoverItem>> {
    let items: Vec<_> = config
        .bindings
        .iter()
        .flat_map(|binding| bind(host, binding))
        .collect();
    info!("hover: {} items", items.len());
    items
}
