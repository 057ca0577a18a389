use std::sync::Arc;
use std::time::Duration;

use pagekit::prelude::*;
use webdom::{StyleProperty, StyleValue};

fn landing() -> Document {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../pagesim/fixtures/landing.json");
    Document::from_file(path).unwrap()
}

fn init(doc: &Document) -> (Page, Arc<RecordingSurface>) {
    let surface = Arc::new(RecordingSurface::new());
    let page = Page::init(doc, &PageConfig::default(), surface.clone()).unwrap();
    doc.flush();
    (page, surface)
}

// =============================================================================
// Page Initialization
// =============================================================================

#[test]
fn test_landing_page_wires_every_behavior() {
    let doc = landing();
    let (page, surface) = init(&doc);

    assert!(page.counters.is_some());
    assert_eq!(page.proximity.as_ref().map(|p| p.tags().len()), Some(2));
    assert_eq!(page.photos.len(), 2);
    assert_eq!(page.hover.len(), 1);
    assert_eq!(page.phones.len(), 1);
    assert!(page.map.is_some());
    assert_eq!(page.modal.as_ref().map(|m| m.modals().len()), Some(1));
    assert!(page.header.is_some());
    assert!(page.nav.is_some());
    assert_eq!(page.disclosures.len(), 1);
    assert_eq!(page.disclosures[0].len(), 2);

    assert_eq!(surface.state().zoom, Some(14));
}

#[test]
fn test_page_interactions() {
    let doc = landing();
    let (page, surface) = init(&doc);
    let faq = doc.by_id("faq-1").unwrap();

    doc.click(faq);
    doc.advance(Duration::from_millis(700));
    let group = &page.disclosures[0];
    assert_eq!(group.open_index(), Some(0));
    let body = group.panel(0).unwrap().body();
    assert_eq!(
        doc.style(body, &StyleProperty::Height),
        Some(StyleValue::Px(120.0))
    );

    doc.click(doc.by_id("zoom-in").unwrap());
    assert_eq!(surface.state().zoom, Some(15));

    doc.click(doc.by_id("callback").unwrap());
    assert!(doc.has_class(doc.by_id("modal-callback").unwrap(), "is-open"));
}

#[test]
fn test_empty_page() {
    let doc = Document::new();
    let (page, surface) = init(&doc);

    assert!(page.counters.is_none());
    assert!(page.proximity.is_none());
    assert!(page.photos.is_empty());
    assert!(page.map.is_none());
    assert!(page.disclosures.is_empty());
    assert_eq!(surface.state().container, None);
}

#[test]
fn test_invalid_config_fails_before_touching_document() {
    let doc = landing();
    let mut config = PageConfig::default();
    config.map.min_zoom = 22;

    let surface = Arc::new(RecordingSurface::new());
    let err = Page::init(&doc, &config, surface.clone()).unwrap_err();

    assert!(matches!(err, PageError::Invalid(_)));
    assert!(doc.style_writes().is_empty());
    assert_eq!(surface.state().container, None);
}
