//! Publishes the header height as a CSS custom property.

use std::sync::Arc;

use log::{debug, info};
use serde::Deserialize;
use webdom::{Event, EventKind, Host, NodeId, StyleProperty, StyleValue};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct HeaderConfig {
    pub header_selector: String,
    /// Custom property written on the document element.
    pub property: String,
}

impl Default for HeaderConfig {
    fn default() -> Self {
        Self {
            header_selector: ".header".into(),
            property: "--header-height".into(),
        }
    }
}

#[derive(Debug)]
pub struct HeaderHeight {
    header: NodeId,
    property: StyleProperty,
}

impl HeaderHeight {
    pub fn header(&self) -> NodeId {
        self.header
    }

    /// Write the header's current border-box height.
    pub fn update(&self, host: &dyn Host) {
        let height = host.measure(self.header).rect.height;
        host.set_style(
            host.document_element(),
            self.property.clone(),
            StyleValue::Px(height),
        );
    }
}

pub fn init(host: &dyn Host, config: &HeaderConfig) -> Option<Arc<HeaderHeight>> {
    let Some(header) = host.query(&config.header_selector) else {
        debug!("header: no `{}`", config.header_selector);
        return None;
    };

    let tracker = Arc::new(HeaderHeight {
        header,
        property: StyleProperty::custom(&config.property),
    });
    tracker.update(host);

    for kind in [EventKind::Load, EventKind::Resize] {
        let target = Arc::clone(&tracker);
        host.listen(
            host.window(),
            kind,
            Arc::new(move |host: &dyn Host, _: &Event| target.update(host)),
        );
    }
    let target = Arc::clone(&tracker);
    host.observe_resize(
        header,
        Arc::new(move |host: &dyn Host, _: &Event| target.update(host)),
    );

    info!("header: tracking {header}");
    Some(tracker)
}
