use std::sync::Arc;
use std::time::Duration;

use pagekit::disclosure::{self, DisclosureConfig, DisclosureGroup, PanelError, Role};
use webdom::{
    Document, Easing, Edges, Element, Host, NodeId, Rect, StyleProperty, StyleValue, Transitions,
};

/// One panel: body border-box height and vertical padding.
fn item(n: impl std::fmt::Display, height: f32, padding: f32) -> Element {
    Element::div()
        .id(format!("item-{n}"))
        .class("accordion__item")
        .child(
            Element::new("button")
                .id(format!("header-{n}"))
                .class("accordion__header")
                .child(Element::new("span").id(format!("icon-{n}")).class("accordion__icon")),
        )
        .child(
            Element::div()
                .id(format!("body-{n}"))
                .class("accordion__body")
                .rect(Rect::new(0.0, 0.0, 600.0, height))
                .padding(Edges::vertical(padding)),
        )
}

fn accordion(panels: &[(f32, f32)]) -> Element {
    Element::div().class("accordion").children(
        panels
            .iter()
            .enumerate()
            .map(|(n, &(height, padding))| item(n, height, padding)),
    )
}

fn setup(panels: &[(f32, f32)]) -> (Document, Arc<DisclosureGroup>) {
    let doc = Document::from_element(&accordion(panels));
    let mut groups = disclosure::init(&doc, &DisclosureConfig::default());
    doc.flush();
    assert_eq!(groups.len(), 1);
    (doc, groups.remove(0))
}

fn node(doc: &Document, id: &str) -> NodeId {
    doc.by_id(id).unwrap_or_else(|| panic!("no #{id}"))
}

fn px(doc: &Document, node: NodeId, property: StyleProperty) -> f32 {
    match doc.style(node, &property) {
        Some(StyleValue::Px(v)) => v,
        other => panic!("{property} on {node} is {other:?}"),
    }
}

fn settle(doc: &Document) {
    doc.advance(Duration::from_millis(700));
    assert!(!doc.has_active_transitions());
}

// =============================================================================
// Initialization
// =============================================================================

#[test]
fn test_init_collapses_every_panel() {
    let (doc, group) = setup(&[(140.0, 20.0), (90.0, 15.0)]);

    assert_eq!(group.len(), 2);
    assert_eq!(group.open_index(), None);
    for n in 0..2 {
        let body = node(&doc, &format!("body-{n}"));
        assert_eq!(px(&doc, body, StyleProperty::Height), 0.0);
        assert_eq!(px(&doc, body, StyleProperty::PaddingTop), 0.0);
        assert_eq!(px(&doc, body, StyleProperty::PaddingBottom), 0.0);
        assert_eq!(
            doc.style(body, &StyleProperty::Opacity),
            Some(StyleValue::Number(1.0))
        );
        assert!(!doc.has_class(node(&doc, &format!("item-{n}")), "open"));
        assert!(!doc.has_class(node(&doc, &format!("icon-{n}")), "active"));
    }
}

#[test]
fn test_initial_collapse_is_not_animated() {
    let (doc, _group) = setup(&[(140.0, 20.0), (90.0, 15.0)]);

    assert!(!doc.style_writes().is_empty());
    assert!(doc.style_writes().iter().all(|w| !w.animated));
    assert_eq!(doc.transitions_started(), 0);
}

#[test]
fn test_transitions_enabled_after_flush() {
    let doc = Document::from_element(&accordion(&[(140.0, 20.0)]));
    disclosure::init(&doc, &DisclosureConfig::default());
    let body = node(&doc, "body-0");

    assert!(!doc.transitions(body).has_any());

    doc.flush();
    assert_eq!(
        doc.transitions(body),
        Transitions::new().vertical_box(Duration::from_millis(700), Easing::EaseInOut)
    );
}

#[test]
fn test_natural_height_measured_before_collapse() {
    let (_doc, group) = setup(&[(140.0, 20.0), (90.0, 15.0)]);

    let first = group.panel(0).unwrap();
    assert_eq!(first.natural_height(), 100.0);
    assert_eq!(first.padding_top(), 20.0);
    assert_eq!(first.padding_bottom(), 20.0);

    let second = group.panel(1).unwrap();
    assert_eq!(second.natural_height(), 60.0);
    assert_eq!(second.padding_top(), 15.0);
}

#[test]
fn test_custom_transition_timing() {
    let doc = Document::from_element(&accordion(&[(140.0, 20.0)]));
    let config = DisclosureConfig::default()
        .with_transition_ms(300)
        .with_easing(Easing::Linear);
    disclosure::init(&doc, &config);
    doc.flush();

    assert_eq!(
        doc.transitions(node(&doc, "body-0")).height.map(|t| t.duration),
        Some(Duration::from_millis(300))
    );
}

// =============================================================================
// Toggle
// =============================================================================

#[test]
fn test_click_opens_panel_with_animation() {
    let (doc, group) = setup(&[(140.0, 20.0), (90.0, 15.0)]);
    doc.clear_style_writes();

    doc.click(node(&doc, "header-0"));

    assert_eq!(group.open_index(), Some(0));
    assert!(doc.has_class(node(&doc, "item-0"), "open"));
    assert!(doc.has_class(node(&doc, "icon-0"), "active"));

    let body = node(&doc, "body-0");
    assert!(doc.is_animating(body, &StyleProperty::Height));
    assert!(doc
        .style_writes()
        .iter()
        .any(|w| w.node == body && w.property == StyleProperty::Height && w.animated));

    settle(&doc);
    assert_eq!(px(&doc, body, StyleProperty::Height), 100.0);
    assert_eq!(px(&doc, body, StyleProperty::PaddingTop), 20.0);
    assert_eq!(px(&doc, body, StyleProperty::PaddingBottom), 20.0);
    assert_eq!(doc.measure(body).rect.height, 140.0);
}

#[test]
fn test_click_on_icon_bubbles_to_trigger() {
    let (doc, group) = setup(&[(140.0, 20.0)]);

    doc.click(node(&doc, "icon-0"));

    assert_eq!(group.open_index(), Some(0));
}

#[test]
fn test_second_click_closes() {
    let (doc, group) = setup(&[(140.0, 20.0)]);
    let header = node(&doc, "header-0");
    let body = node(&doc, "body-0");

    doc.click(header);
    settle(&doc);
    doc.click(header);

    assert_eq!(group.open_index(), None);
    assert!(!doc.has_class(node(&doc, "item-0"), "open"));
    assert!(!doc.has_class(node(&doc, "icon-0"), "active"));
    settle(&doc);
    assert_eq!(px(&doc, body, StyleProperty::Height), 0.0);
    assert_eq!(doc.measure(body).rect.height, 0.0);
}

#[test]
fn test_opening_one_closes_the_other() {
    let (doc, group) = setup(&[(140.0, 20.0), (90.0, 15.0), (60.0, 10.0)]);

    // A, then B, then C, then C again.
    doc.click(node(&doc, "header-0"));
    assert_eq!(group.open_index(), Some(0));

    doc.click(node(&doc, "header-1"));
    assert_eq!(group.open_index(), Some(1));
    assert!(!group.is_open(0));
    assert!(!doc.has_class(node(&doc, "item-0"), "open"));

    doc.click(node(&doc, "header-2"));
    assert_eq!(group.open_index(), Some(2));
    assert!(!group.is_open(1));

    doc.click(node(&doc, "header-2"));
    assert_eq!(group.open_index(), None);

    settle(&doc);
    for n in 0..3 {
        assert_eq!(px(&doc, node(&doc, &format!("body-{n}")), StyleProperty::Height), 0.0);
    }
}

#[test]
fn test_three_panel_scenario() {
    let (doc, group) = setup(&[(140.0, 20.0), (90.0, 15.0), (60.0, 10.0)]);
    let (a, b, c) = (0, 1, 2);
    let body_a = node(&doc, "body-0");
    let body_b = node(&doc, "body-1");

    doc.click(node(&doc, "header-0"));
    settle(&doc);
    assert!(group.is_open(a));
    assert!(!group.is_open(b) && !group.is_open(c));
    assert_eq!(px(&doc, body_a, StyleProperty::Height), 100.0);

    doc.click(node(&doc, "header-1"));
    settle(&doc);
    assert!(group.is_open(b));
    assert!(!group.is_open(a) && !group.is_open(c));
    assert_eq!(px(&doc, body_a, StyleProperty::Height), 0.0);
    assert_eq!(px(&doc, body_b, StyleProperty::Height), 60.0);

    doc.click(node(&doc, "header-1"));
    settle(&doc);
    assert_eq!(group.open_index(), None);
    assert_eq!(px(&doc, body_b, StyleProperty::Height), 0.0);
    assert_eq!(px(&doc, body_a, StyleProperty::Height), 0.0);
}

#[test]
fn test_at_most_one_open_after_any_sequence() {
    let (doc, group) = setup(&[(140.0, 20.0), (90.0, 15.0), (60.0, 10.0)]);
    let headers: Vec<NodeId> = (0..3).map(|n| node(&doc, &format!("header-{n}"))).collect();

    for &pick in &[0, 0, 1, 2, 1, 1, 0, 2, 2, 2, 1, 0] {
        doc.click(headers[pick]);
        doc.advance(Duration::from_millis(120));

        let open: Vec<usize> = (0..3).filter(|&n| group.is_open(n)).collect();
        assert!(open.len() <= 1, "open panels: {open:?}");
        let marked = (0..3)
            .filter(|n| doc.has_class(node(&doc, &format!("item-{n}")), "open"))
            .count();
        assert_eq!(marked, open.len());
    }
}

#[test]
fn test_closing_does_not_reopen_others() {
    let (doc, group) = setup(&[(140.0, 20.0), (90.0, 15.0)]);

    doc.click(node(&doc, "header-1"));
    doc.click(node(&doc, "header-1"));

    assert_eq!(group.open_index(), None);
    assert!(!group.is_open(0));
}

#[test]
fn test_collapse_of_others_is_idempotent() {
    let (doc, _group) = setup(&[(140.0, 20.0), (90.0, 15.0)]);
    let other = node(&doc, "body-1");

    doc.click(node(&doc, "header-0"));
    settle(&doc);
    doc.click(node(&doc, "header-0"));
    settle(&doc);

    // The second panel was re-collapsed twice but never moved.
    assert!(doc
        .style_writes()
        .iter()
        .filter(|w| w.node == other)
        .all(|w| !w.animated));
    assert_eq!(px(&doc, other, StyleProperty::Height), 0.0);
}

#[test]
fn test_natural_height_survives_repeated_cycles() {
    let (doc, _group) = setup(&[(140.0, 20.0), (90.0, 15.0)]);
    let header = node(&doc, "header-1");
    let body = node(&doc, "body-1");

    for _ in 0..3 {
        doc.click(header);
        settle(&doc);
        assert_eq!(px(&doc, body, StyleProperty::Height), 60.0);
        assert_eq!(px(&doc, body, StyleProperty::PaddingTop), 15.0);

        doc.click(header);
        settle(&doc);
        assert_eq!(px(&doc, body, StyleProperty::Height), 0.0);
    }
}

#[test]
fn test_toggle_mid_transition_reverses() {
    let (doc, _group) = setup(&[(140.0, 20.0)]);
    let header = node(&doc, "header-0");
    let body = node(&doc, "body-0");

    doc.click(header);
    doc.advance(Duration::from_millis(350));
    let midway = doc.measure(body).height;
    assert!(midway > 0.0 && midway < 100.0, "midway height {midway}");

    doc.click(header);
    assert!(doc.is_animating(body, &StyleProperty::Height));
    settle(&doc);
    assert_eq!(doc.measure(body).height, 0.0);
}

#[test]
fn test_open_and_close_methods() {
    let (doc, group) = setup(&[(140.0, 20.0), (90.0, 15.0)]);

    group.open(&doc, 1);
    group.open(&doc, 1);
    assert_eq!(group.open_index(), Some(1));

    group.close(&doc, 0);
    assert_eq!(group.open_index(), Some(1));

    group.close(&doc, 1);
    assert_eq!(group.open_index(), None);

    group.open(&doc, 7);
    assert_eq!(group.open_index(), None);
}

#[test]
fn test_toggle_out_of_range_is_ignored() {
    let (doc, group) = setup(&[(140.0, 20.0)]);
    doc.clear_style_writes();

    group.toggle(&doc, 3);

    assert!(doc.style_writes().is_empty());
    assert_eq!(group.open_index(), None);
}

// =============================================================================
// Hover
// =============================================================================

#[test]
fn test_hover_marks_icon_only() {
    let (doc, group) = setup(&[(140.0, 20.0), (90.0, 15.0)]);
    let header = node(&doc, "header-0");
    let icon = node(&doc, "icon-0");

    doc.enter(header);
    assert!(doc.has_class(icon, "hovered"));
    assert!(group.is_hovered(0));
    assert_eq!(group.open_index(), None);

    doc.leave(header);
    assert!(!doc.has_class(icon, "hovered"));
    assert!(!group.is_hovered(0));
}

#[test]
fn test_hover_keeps_open_state() {
    let (doc, group) = setup(&[(140.0, 20.0), (90.0, 15.0)]);
    let header = node(&doc, "header-0");

    doc.click(header);
    doc.enter(header);
    doc.leave(header);
    doc.enter(node(&doc, "header-1"));

    assert_eq!(group.open_index(), Some(0));
    assert!(doc.has_class(node(&doc, "icon-0"), "active"));
}

// =============================================================================
// Discovery
// =============================================================================

#[test]
fn test_malformed_panel_is_skipped() {
    // Trigger and body, but no icon.
    let broken = Element::div()
        .id("broken")
        .class("accordion__item")
        .child(Element::new("button").id("broken-header").class("accordion__header"))
        .child(
            Element::div()
                .class("accordion__body")
                .rect(Rect::new(0.0, 0.0, 600.0, 80.0)),
        );
    let doc = Document::from_element(
        &Element::div()
            .class("accordion")
            .child(item(0, 140.0, 20.0))
            .child(broken)
            .child(item(2, 60.0, 10.0)),
    );

    let groups = disclosure::init(&doc, &DisclosureConfig::default());
    doc.flush();

    assert_eq!(groups.len(), 1);
    let group = &groups[0];
    assert_eq!(group.len(), 2);
    assert_eq!(group.index_of_trigger(node(&doc, "header-2")), Some(1));
    assert_eq!(group.index_of_trigger(node(&doc, "broken-header")), None);

    doc.click(node(&doc, "header-0"));
    doc.click(node(&doc, "broken-header"));
    assert_eq!(group.open_index(), Some(0));
    assert!(!doc.has_class(node(&doc, "broken"), "open"));

    doc.click(node(&doc, "header-2"));
    assert_eq!(group.open_index(), Some(1));
}

#[test]
fn test_panel_discovery_reports_missing_role() {
    let doc = Document::from_element(
        &Element::div()
            .id("lonely")
            .class("accordion__item")
            .child(Element::new("button").class("accordion__header"))
            .child(Element::new("span").class("accordion__icon")),
    );
    let root = node(&doc, "lonely");

    let err = pagekit::disclosure::Panel::discover(&doc, root, &DisclosureConfig::default())
        .unwrap_err();
    assert_eq!(err, PanelError::Malformed { root, role: Role::Body });
}

#[test]
fn test_group_without_valid_panels_is_dropped() {
    let doc = Document::from_element(
        &Element::new("body")
            .child(Element::div().class("accordion").child(Element::div().class("accordion__item")))
            .child(accordion(&[(140.0, 20.0)])),
    );

    let groups = disclosure::init(&doc, &DisclosureConfig::default());

    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].len(), 1);
}

#[test]
fn test_groups_are_independent() {
    let doc = Document::from_element(
        &Element::new("body")
            .child(Element::div().id("first").class("accordion").child(item(0, 140.0, 20.0)))
            .child(Element::div().id("second").class("accordion").child(item(1, 90.0, 15.0))),
    );
    let groups = disclosure::init(&doc, &DisclosureConfig::default());
    doc.flush();
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].root(), doc.by_id("first"));

    doc.click(node(&doc, "header-0"));
    doc.click(node(&doc, "header-1"));

    assert_eq!(groups[0].open_index(), Some(0));
    assert_eq!(groups[1].open_index(), Some(0));
}

#[test]
fn test_nested_group_keeps_its_own_panels() {
    let inner = Element::div()
        .id("inner")
        .class("accordion")
        .child(item("i0", 60.0, 10.0))
        .child(item("i1", 30.0, 0.0));
    let mut host_panel = item("o0", 280.0, 0.0);
    host_panel.children[1].children.push(inner);
    let doc = Document::from_element(
        &Element::div()
            .id("outer")
            .class("accordion")
            .child(host_panel)
            .child(item("o1", 90.0, 15.0)),
    );

    let groups = disclosure::init(&doc, &DisclosureConfig::default());
    doc.flush();

    assert_eq!(groups.len(), 2);
    let (outer, inner) = (&groups[0], &groups[1]);
    assert_eq!(outer.root(), doc.by_id("outer"));
    assert_eq!(inner.root(), doc.by_id("inner"));
    assert_eq!(outer.len(), 2);
    assert_eq!(inner.len(), 2);
    assert_eq!(outer.index_of_trigger(node(&doc, "header-i0")), None);
    assert_eq!(outer.panel(0).unwrap().body(), node(&doc, "body-o0"));

    // Inner bodies were measured before anything collapsed.
    assert_eq!(outer.panel(0).unwrap().natural_height(), 280.0);
    assert_eq!(inner.panel(0).unwrap().natural_height(), 40.0);
    assert_eq!(inner.panel(1).unwrap().natural_height(), 30.0);

    doc.click(node(&doc, "header-o0"));
    settle(&doc);
    doc.click(node(&doc, "header-i0"));
    settle(&doc);

    assert_eq!(outer.open_index(), Some(0));
    assert_eq!(inner.open_index(), Some(0));
    assert_eq!(px(&doc, node(&doc, "body-o0"), StyleProperty::Height), 280.0);
    assert_eq!(px(&doc, node(&doc, "body-i0"), StyleProperty::Height), 40.0);
}

#[test]
fn test_panels_without_container_form_one_group() {
    let doc = Document::from_element(
        &Element::new("body")
            .child(item(0, 140.0, 20.0))
            .child(Element::div().child(item(1, 90.0, 15.0))),
    );

    let groups = disclosure::init(&doc, &DisclosureConfig::default());
    doc.flush();

    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].root(), None);
    assert_eq!(groups[0].len(), 2);

    doc.click(node(&doc, "header-0"));
    doc.click(node(&doc, "header-1"));
    assert_eq!(groups[0].open_index(), Some(1));
}

#[test]
fn test_empty_document_has_no_groups() {
    let doc = Document::new();
    assert!(disclosure::init(&doc, &DisclosureConfig::default()).is_empty());
}
