//! Count-up numbers that start once their section scrolls into view.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use log::{debug, info};
use serde::Deserialize;
use webdom::{Easing, Event, Host, NodeId, ObserverId};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CounterConfig {
    pub section_selector: String,
    pub number_selector: String,
    /// Attribute holding the final value.
    pub target_attribute: String,
    pub duration_ms: u64,
    /// Visible ratio of the section that starts the count.
    pub threshold: f32,
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self {
            section_selector: "#counters-section".into(),
            number_selector: ".counters__number".into(),
            target_attribute: "data-target".into(),
            duration_ms: 1500,
            threshold: 0.5,
        }
    }
}

impl CounterConfig {
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }
}

/// Value shown `elapsed` into a count towards `target`, floored.
pub fn count_at(target: f64, elapsed: Duration, duration: Duration) -> f64 {
    let progress = if duration.is_zero() {
        1.0
    } else {
        elapsed.as_secs_f64() / duration.as_secs_f64()
    };
    let eased = f64::from(Easing::EaseOutCubic.apply(progress.min(1.0) as f32));
    (eased * target).floor()
}

/// Parse a `data-target` value. Anything that is not a number counts to 0.
pub fn parse_target(raw: &str) -> f64 {
    match raw.trim().parse::<f64>() {
        Ok(value) if !value.is_nan() => value,
        _ => 0.0,
    }
}

/// Text for a count: integers without a fraction, no negative zero.
pub fn format_count(value: f64) -> String {
    if value == 0.0 {
        "0".to_string()
    } else {
        value.to_string()
    }
}

/// The counters of one section.
#[derive(Debug)]
pub struct Counters {
    section: NodeId,
    observer: ObserverId,
    started: Arc<AtomicBool>,
}

impl Counters {
    pub fn section(&self) -> NodeId {
        self.section
    }

    pub fn observer(&self) -> ObserverId {
        self.observer
    }

    /// Whether the section has been seen and the count started.
    pub fn has_started(&self) -> bool {
        self.started.load(Ordering::SeqCst)
    }
}

pub fn init(host: &dyn Host, config: &CounterConfig) -> Option<Counters> {
    let Some(section) = host.query(&config.section_selector) else {
        debug!("counters: no section `{}`", config.section_selector);
        return None;
    };

    let numbers: Vec<(NodeId, f64)> = host
        .query_all(&config.number_selector)
        .into_iter()
        .map(|node| {
            let target = host
                .attribute(node, &config.target_attribute)
                .map_or(0.0, |raw| parse_target(&raw));
            (node, target)
        })
        .collect();

    let started = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&started);
    let duration = config.duration();
    let observer = host.observe_intersection(
        section,
        config.threshold,
        Arc::new(move |host: &dyn Host, event: &Event| {
            let Event::Intersect {
                observer,
                intersecting: true,
                ..
            } = event
            else {
                return;
            };
            if flag.swap(true, Ordering::SeqCst) {
                return;
            }
            for &(node, target) in &numbers {
                schedule_frame(host, node, target, duration, None);
            }
            host.unobserve(*observer);
        }),
    );

    info!("counters: observing {section}");
    Some(Counters {
        section,
        observer,
        started,
    })
}

fn schedule_frame(
    host: &dyn Host,
    node: NodeId,
    target: f64,
    duration: Duration,
    start: Option<Duration>,
) {
    host.request_frame(Box::new(move |host: &dyn Host, timestamp: Duration| {
        let start = start.unwrap_or(timestamp);
        let elapsed = timestamp.saturating_sub(start);
        if elapsed < duration {
            host.set_text(node, &format_count(count_at(target, elapsed, duration)));
            schedule_frame(host, node, target, duration, Some(start));
        } else {
            host.set_text(node, &format_count(target));
        }
    }));
}
