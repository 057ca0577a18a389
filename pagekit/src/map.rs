//! Zoom controls for an embedded map.
//!
//! The map itself comes from an external SDK, reached through
//! [`MapSurface`]. This module only owns the zoom level and the marker setup.

use std::sync::{Arc, RwLock};

use log::{debug, info};
use serde::Deserialize;
use webdom::{Event, EventKind, Host, NodeId};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct MarkerConfig {
    pub width: f32,
    pub height: f32,
    pub image: String,
}

impl Default for MarkerConfig {
    fn default() -> Self {
        Self {
            width: 72.0,
            height: 90.0,
            image: "/img/decor/marker.png".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    pub container_selector: String,
    pub zoom_in_selector: String,
    pub zoom_out_selector: String,
    /// Longitude, latitude.
    pub center: [f64; 2],
    pub zoom: u8,
    pub min_zoom: u8,
    pub max_zoom: u8,
    pub marker: MarkerConfig,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            container_selector: "#map".into(),
            zoom_in_selector: "#zoom-in".into(),
            zoom_out_selector: "#zoom-out".into(),
            center: [30.314997, 59.938784],
            zoom: 14,
            min_zoom: 0,
            max_zoom: 21,
            marker: MarkerConfig::default(),
        }
    }
}

/// A marker pinned at `coordinates`, anchored at its bottom center.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub coordinates: [f64; 2],
    pub width: f32,
    pub height: f32,
    pub image: String,
    /// Offset of the anchor as a fraction of the marker size.
    pub anchor: (f32, f32),
    pub draggable: bool,
}

/// The map widget provided by the SDK.
pub trait MapSurface: Send + Sync {
    fn mount(&self, container: NodeId, center: [f64; 2], zoom: u8);
    fn set_zoom(&self, zoom: u8);
    fn add_marker(&self, marker: Marker);
}

/// Recorded state of a [`RecordingSurface`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SurfaceState {
    pub container: Option<NodeId>,
    pub center: Option<[f64; 2]>,
    pub zoom: Option<u8>,
    pub markers: Vec<Marker>,
}

/// A surface that only remembers what it was told.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    state: RwLock<SurfaceState>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SurfaceState {
        self.state
            .read()
            .map(|guard| guard.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }
}

impl MapSurface for RecordingSurface {
    fn mount(&self, container: NodeId, center: [f64; 2], zoom: u8) {
        if let Ok(mut guard) = self.state.write() {
            guard.container = Some(container);
            guard.center = Some(center);
            guard.zoom = Some(zoom);
        }
    }

    fn set_zoom(&self, zoom: u8) {
        if let Ok(mut guard) = self.state.write() {
            guard.zoom = Some(zoom);
        }
    }

    fn add_marker(&self, marker: Marker) {
        if let Ok(mut guard) = self.state.write() {
            guard.markers.push(marker);
        }
    }
}

pub struct MapController {
    zoom: RwLock<u8>,
    min_zoom: u8,
    max_zoom: u8,
    surface: Arc<dyn MapSurface>,
}

impl std::fmt::Debug for MapController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MapController")
            .field("zoom", &self.zoom())
            .field("min_zoom", &self.min_zoom)
            .field("max_zoom", &self.max_zoom)
            .finish()
    }
}

impl MapController {
    pub fn zoom(&self) -> u8 {
        self.zoom.read().map(|guard| *guard).unwrap_or(self.min_zoom)
    }

    pub fn zoom_in(&self) {
        self.step(|zoom| zoom.saturating_add(1).min(self.max_zoom));
    }

    pub fn zoom_out(&self) {
        self.step(|zoom| zoom.saturating_sub(1).max(self.min_zoom));
    }

    fn step(&self, next: impl FnOnce(u8) -> u8) {
        let Ok(mut zoom) = self.zoom.write() else {
            return;
        };
        *zoom = next(*zoom);
        self.surface.set_zoom(*zoom);
    }
}

fn bind_button(host: &dyn Host, selector: &str, controller: &Arc<MapController>, zoom_in: bool) {
    let Some(button) = host.query(selector) else {
        debug!("map: no zoom button `{selector}`");
        return;
    };
    let controller = Arc::clone(controller);
    host.listen(
        button,
        EventKind::Click,
        Arc::new(move |_: &dyn Host, _: &Event| {
            if zoom_in {
                controller.zoom_in();
            } else {
                controller.zoom_out();
            }
        }),
    );
}

pub fn init(
    host: &dyn Host,
    config: &MapConfig,
    surface: Arc<dyn MapSurface>,
) -> Option<Arc<MapController>> {
    let Some(container) = host.query(&config.container_selector) else {
        debug!("map: no container `{}`", config.container_selector);
        return None;
    };

    let zoom = config.zoom.max(config.min_zoom).min(config.max_zoom);
    surface.mount(container, config.center, zoom);
    surface.add_marker(Marker {
        coordinates: config.center,
        width: config.marker.width,
        height: config.marker.height,
        image: config.marker.image.clone(),
        anchor: (-0.5, -1.0),
        draggable: false,
    });

    let controller = Arc::new(MapController {
        zoom: RwLock::new(zoom),
        min_zoom: config.min_zoom,
        max_zoom: config.max_zoom,
        surface,
    });
    bind_button(host, &config.zoom_in_selector, &controller, true);
    bind_button(host, &config.zoom_out_selector, &controller, false);

    info!("map: mounted at zoom {zoom}");
    Some(controller)
}
