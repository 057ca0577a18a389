//! Open/close hooks around modal dialogs.

use std::collections::BTreeSet;
use std::sync::{Arc, RwLock};

use log::{debug, info};
use serde::Deserialize;
use webdom::{Event, EventKind, Host, NodeId};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ModalConfig {
    /// Attribute naming the id of the modal a trigger opens.
    pub trigger_attribute: String,
    /// Attribute marking close controls inside a modal.
    pub close_attribute: String,
    pub open_class: String,
    /// Set on the body while a modal is open.
    pub body_class: String,
}

impl Default for ModalConfig {
    fn default() -> Self {
        Self {
            trigger_attribute: "data-modal-trigger".into(),
            close_attribute: "data-modal-close".into(),
            open_class: "is-open".into(),
            body_class: "modal-open".into(),
        }
    }
}

#[derive(Debug)]
pub struct ModalController {
    current: RwLock<Option<NodeId>>,
    modals: Vec<NodeId>,
    config: ModalConfig,
}

impl ModalController {
    /// The open modal, if any.
    pub fn current(&self) -> Option<NodeId> {
        self.current.read().ok().and_then(|guard| *guard)
    }

    pub fn modals(&self) -> &[NodeId] {
        &self.modals
    }

    /// Show `modal`, closing any other open one first.
    pub fn open(&self, host: &dyn Host, modal: NodeId) {
        let Ok(mut current) = self.current.write() else {
            return;
        };
        if let Some(previous) = current.take() {
            host.set_class(previous, &self.config.open_class, false);
        }
        host.set_class(modal, &self.config.open_class, true);
        host.set_class(host.body(), &self.config.body_class, true);
        *current = Some(modal);
        debug!("modal: opened {modal}");
    }

    /// Hide `modal` if it is the open one.
    pub fn close(&self, host: &dyn Host, modal: NodeId) {
        let Ok(mut current) = self.current.write() else {
            return;
        };
        if *current != Some(modal) {
            return;
        }
        host.set_class(modal, &self.config.open_class, false);
        host.set_class(host.body(), &self.config.body_class, false);
        *current = None;
        debug!("modal: closed {modal}");
    }
}

pub fn init(host: &dyn Host, config: &ModalConfig) -> Option<Arc<ModalController>> {
    let triggers: Vec<(NodeId, NodeId)> = host
        .query_all(&format!("[{}]", config.trigger_attribute))
        .into_iter()
        .filter_map(|trigger| {
            let target = host.attribute(trigger, &config.trigger_attribute)?;
            match host.by_id(&target) {
                Some(modal) => Some((trigger, modal)),
                None => {
                    debug!("modal: trigger {trigger} names missing modal `{target}`");
                    None
                }
            }
        })
        .collect();

    if triggers.is_empty() {
        debug!("modal: no triggers");
        return None;
    }

    let modals: Vec<NodeId> = triggers
        .iter()
        .map(|(_, modal)| *modal)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let controller = Arc::new(ModalController {
        current: RwLock::new(None),
        modals,
        config: config.clone(),
    });

    for &(trigger, modal) in &triggers {
        let target = Arc::clone(&controller);
        host.listen(
            trigger,
            EventKind::Click,
            Arc::new(move |host: &dyn Host, _: &Event| target.open(host, modal)),
        );
    }

    for &modal in &controller.modals {
        for close in host.query_within_all(modal, &format!("[{}]", config.close_attribute)) {
            let target = Arc::clone(&controller);
            host.listen(
                close,
                EventKind::Click,
                Arc::new(move |host: &dyn Host, _: &Event| target.close(host, modal)),
            );
        }
    }

    info!("modal: {} modals, {} triggers", controller.modals.len(), triggers.len());
    Some(controller)
}
