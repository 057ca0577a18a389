//! Tags that swell and drift away from the pointer as it nears them.

use std::sync::Arc;

use log::{debug, info};
use serde::Deserialize;
use webdom::{Event, EventKind, Host, NodeId, StyleProperty, StyleValue, Transform};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ProximityConfig {
    pub grid_selector: String,
    pub tag_selector: String,
    /// Pointer distance (px) beyond which tags are left alone.
    pub max_distance: f32,
    /// Scale reached with the pointer on the tag center.
    pub scale_factor: f32,
    /// Fraction of the pointer offset a tag is pushed away by.
    pub push_factor: f32,
    pub hovered_class: String,
}

impl Default for ProximityConfig {
    fn default() -> Self {
        Self {
            grid_selector: ".ecosystem__grid".into(),
            tag_selector: ".ecosystem__tag".into(),
            max_distance: 220.0,
            scale_factor: 1.15,
            push_factor: 0.2,
            hovered_class: "hovered".into(),
        }
    }
}

/// Transform of a tag centered at `center` with the pointer at `pointer`.
///
/// Returns None when the pointer is out of range.
pub fn proximity_transform(
    pointer: (f32, f32),
    center: (f32, f32),
    config: &ProximityConfig,
) -> Option<Transform> {
    let dx = pointer.0 - center.0;
    let dy = pointer.1 - center.1;
    let distance = (dx * dx + dy * dy).sqrt();
    if distance >= config.max_distance {
        return None;
    }

    let proximity = 1.0 - distance / config.max_distance;
    Some(Transform::new(
        -dx * config.push_factor * proximity,
        -dy * config.push_factor * proximity,
        1.0 + (config.scale_factor - 1.0) * proximity,
    ))
}

#[derive(Debug)]
pub struct ProximityGrid {
    grid: NodeId,
    tags: Vec<NodeId>,
    config: ProximityConfig,
}

impl ProximityGrid {
    pub fn grid(&self) -> NodeId {
        self.grid
    }

    pub fn tags(&self) -> &[NodeId] {
        &self.tags
    }

    /// Re-place every tag for a pointer at client coordinates `(x, y)`.
    pub fn track(&self, host: &dyn Host, x: f32, y: f32) {
        for &tag in &self.tags {
            let center = host.measure(tag).rect.center();
            match proximity_transform((x, y), center, &self.config) {
                Some(transform) => {
                    host.set_style(tag, StyleProperty::Transform, StyleValue::Transform(transform));
                    host.set_class(tag, &self.config.hovered_class, true);
                }
                None => self.reset_tag(host, tag),
            }
        }
    }

    pub fn reset(&self, host: &dyn Host) {
        for &tag in &self.tags {
            self.reset_tag(host, tag);
        }
    }

    fn reset_tag(&self, host: &dyn Host, tag: NodeId) {
        host.set_style(
            tag,
            StyleProperty::Transform,
            StyleValue::Transform(Transform::IDENTITY),
        );
        host.set_class(tag, &self.config.hovered_class, false);
    }
}

pub fn init(host: &dyn Host, config: &ProximityConfig) -> Option<Arc<ProximityGrid>> {
    let Some(grid) = host.query(&config.grid_selector) else {
        debug!("proximity: no grid `{}`", config.grid_selector);
        return None;
    };

    let controller = Arc::new(ProximityGrid {
        grid,
        tags: host.query_all(&config.tag_selector),
        config: config.clone(),
    });

    let tracker = Arc::clone(&controller);
    host.listen(
        grid,
        EventKind::MouseMove,
        Arc::new(move |host: &dyn Host, event: &Event| {
            if let Event::MouseMove { x, y } = event {
                tracker.track(host, *x, *y);
            }
        }),
    );

    let tracker = Arc::clone(&controller);
    host.listen(
        grid,
        EventKind::MouseLeave,
        Arc::new(move |host: &dyn Host, _: &Event| tracker.reset(host)),
    );

    info!("proximity: {} tags", controller.tags.len());
    Some(controller)
}
