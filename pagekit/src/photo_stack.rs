//! Stacked photos that rise to the top after a short hover.

use std::sync::{Arc, RwLock};
use std::time::Duration;

use log::{debug, info};
use serde::Deserialize;
use webdom::{Event, EventKind, Host, NodeId, StyleProperty, StyleValue, TimerId};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PhotoStackConfig {
    pub wrapper_selector: String,
    pub raised_z_index: i32,
    pub enter_delay_ms: u64,
    pub leave_delay_ms: u64,
}

impl Default for PhotoStackConfig {
    fn default() -> Self {
        Self {
            wrapper_selector: ".photos-stack__img-wrapper".into(),
            raised_z_index: 10,
            enter_delay_ms: 250,
            leave_delay_ms: 150,
        }
    }
}

#[derive(Debug, Default)]
struct PendingTimers {
    enter: Option<TimerId>,
    leave: Option<TimerId>,
}

/// One photo of the stack and its pending raise/lower timers.
#[derive(Debug)]
pub struct StackedPhoto {
    node: NodeId,
    z_index: i32,
    raised_z_index: i32,
    enter_delay: Duration,
    leave_delay: Duration,
    timers: RwLock<PendingTimers>,
}

impl StackedPhoto {
    pub fn node(&self) -> NodeId {
        self.node
    }

    /// Resting z-index, one above the previous photo.
    pub fn z_index(&self) -> i32 {
        self.z_index
    }

    fn on_enter(self: &Arc<Self>, host: &dyn Host) {
        let Ok(mut timers) = self.timers.write() else {
            return;
        };
        if let Some(leave) = timers.leave.take() {
            host.clear_timeout(leave);
        }
        if let Some(enter) = timers.enter.take() {
            host.clear_timeout(enter);
        }
        let photo = Arc::clone(self);
        timers.enter = Some(host.set_timeout(
            self.enter_delay,
            Box::new(move |host: &dyn Host| {
                if let Ok(mut timers) = photo.timers.write() {
                    timers.enter = None;
                }
                host.set_style(
                    photo.node,
                    StyleProperty::ZIndex,
                    StyleValue::Integer(photo.raised_z_index),
                );
            }),
        ));
    }

    fn on_leave(self: &Arc<Self>, host: &dyn Host) {
        let Ok(mut timers) = self.timers.write() else {
            return;
        };
        if let Some(enter) = timers.enter.take() {
            host.clear_timeout(enter);
        }
        if let Some(leave) = timers.leave.take() {
            host.clear_timeout(leave);
        }
        let photo = Arc::clone(self);
        timers.leave = Some(host.set_timeout(
            self.leave_delay,
            Box::new(move |host: &dyn Host| {
                if let Ok(mut timers) = photo.timers.write() {
                    timers.leave = None;
                }
                host.set_style(
                    photo.node,
                    StyleProperty::ZIndex,
                    StyleValue::Integer(photo.z_index),
                );
            }),
        ));
    }
}

pub fn init(host: &dyn Host, config: &PhotoStackConfig) -> Vec<Arc<StackedPhoto>> {
    let wrappers = host.query_all(&config.wrapper_selector);
    if wrappers.is_empty() {
        debug!("photo stack: no `{}`", config.wrapper_selector);
        return Vec::new();
    }

    let photos: Vec<Arc<StackedPhoto>> = wrappers
        .into_iter()
        .enumerate()
        .map(|(index, node)| {
            let photo = Arc::new(StackedPhoto {
                node,
                z_index: index as i32 + 1,
                raised_z_index: config.raised_z_index,
                enter_delay: Duration::from_millis(config.enter_delay_ms),
                leave_delay: Duration::from_millis(config.leave_delay_ms),
                timers: RwLock::new(PendingTimers::default()),
            });
            host.set_style(node, StyleProperty::ZIndex, StyleValue::Integer(photo.z_index));

            let target = Arc::clone(&photo);
            host.listen(
                node,
                EventKind::MouseEnter,
                Arc::new(move |host: &dyn Host, _: &Event| target.on_enter(host)),
            );
            let target = Arc::clone(&photo);
            host.listen(
                node,
                EventKind::MouseLeave,
                Arc::new(move |host: &dyn Host, _: &Event| target.on_leave(host)),
            );
            photo
        })
        .collect();

    info!("photo stack: {} photos", photos.len());
    photos
}
