use pagekit::map::SurfaceState;
use serde::Serialize;
use webdom::{Document, NodeSnapshot};

#[derive(Debug, Serialize)]
pub struct MapReport {
    pub center: Option<[f64; 2]>,
    pub zoom: Option<u8>,
    pub markers: usize,
}

#[derive(Debug, Serialize)]
pub struct Report {
    pub time_ms: u128,
    pub elements: Vec<NodeSnapshot>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub map: Option<MapReport>,
}

/// Elements carrying an id or a class, plus the map surface when mounted.
pub fn build(document: &Document, map: &SurfaceState) -> Report {
    let elements = document
        .snapshot()
        .into_iter()
        .filter(|node| node.id.is_some() || !node.classes.is_empty() || !node.style.is_empty())
        .collect();

    Report {
        time_ms: document.now().as_millis(),
        elements,
        map: map.container.map(|_| MapReport {
            center: map.center,
            zoom: map.zoom,
            markers: map.markers.len(),
        }),
    }
}
