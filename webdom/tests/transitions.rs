use std::time::Duration;

use webdom::{
    Document, Easing, Edges, Element, Host, Rect, StyleProperty, StyleValue, TransitionConfig,
    Transitions,
};

fn panel_body() -> (Document, webdom::NodeId) {
    let doc = Document::from_element(
        &Element::div()
            .id("body")
            .rect(Rect::new(0.0, 0.0, 300.0, 140.0))
            .padding(Edges::vertical(20.0)),
    );
    let body = doc.by_id("body").unwrap();
    (doc, body)
}

// =============================================================================
// Easing Function Tests
// =============================================================================

#[test]
fn test_easing_linear() {
    assert_eq!(Easing::Linear.apply(0.0), 0.0);
    assert_eq!(Easing::Linear.apply(0.5), 0.5);
    assert_eq!(Easing::Linear.apply(1.0), 1.0);
    assert_eq!(Easing::Linear.apply(0.25), 0.25);
}

#[test]
fn test_easing_ease_in() {
    assert_eq!(Easing::EaseIn.apply(0.5), 0.25);
    assert!((Easing::EaseIn.apply(0.25) - 0.0625).abs() < 0.0001);
}

#[test]
fn test_easing_ease_out() {
    assert_eq!(Easing::EaseOut.apply(0.5), 0.75);
}

#[test]
fn test_easing_ease_in_out() {
    assert_eq!(Easing::EaseInOut.apply(0.5), 0.5);
    assert!(Easing::EaseInOut.apply(0.25) < 0.25);
    assert!(Easing::EaseInOut.apply(0.75) > 0.75);
}

#[test]
fn test_easing_ease_out_cubic() {
    // 1 - (1 - 0.5)^3
    assert!((Easing::EaseOutCubic.apply(0.5) - 0.875).abs() < 0.0001);
}

#[test]
fn test_easing_boundaries_and_monotonic() {
    for easing in [
        Easing::Linear,
        Easing::EaseIn,
        Easing::EaseOut,
        Easing::EaseInOut,
        Easing::EaseOutCubic,
    ] {
        assert_eq!(easing.apply(0.0), 0.0, "{:?} at 0", easing);
        assert_eq!(easing.apply(1.0), 1.0, "{:?} at 1", easing);

        let mut prev = 0.0;
        for i in 1..=10 {
            let t = i as f32 / 10.0;
            let val = easing.apply(t);
            assert!(val >= prev, "{:?} not monotonic at t={}", easing, t);
            prev = val;
        }
    }
}

#[test]
fn test_easing_clamps_progress() {
    assert_eq!(Easing::Linear.apply(1.5), 1.0);
    assert_eq!(Easing::EaseIn.apply(-0.5), 0.0);
}

// =============================================================================
// Transitions Builder Tests
// =============================================================================

#[test]
fn test_transitions_default_empty() {
    let t = Transitions::new();
    assert!(!t.has_any());
    assert!(t.get(&StyleProperty::Height).is_none());
}

#[test]
fn test_transitions_vertical_box_group() {
    let t = Transitions::new().vertical_box(Duration::from_millis(700), Easing::EaseInOut);

    let expected = Some(TransitionConfig::new(
        Duration::from_millis(700),
        Easing::EaseInOut,
    ));
    assert_eq!(t.get(&StyleProperty::Height), expected);
    assert_eq!(t.get(&StyleProperty::PaddingTop), expected);
    assert_eq!(t.get(&StyleProperty::PaddingBottom), expected);
    assert!(t.opacity.is_none());
}

#[test]
fn test_transitions_never_cover_discrete_properties() {
    let t = Transitions::new()
        .vertical_box(Duration::from_millis(100), Easing::Linear)
        .opacity(Duration::from_millis(100), Easing::Linear);
    assert!(t.get(&StyleProperty::ZIndex).is_none());
    assert!(t.get(&StyleProperty::Transform).is_none());
    assert!(t.get(&StyleProperty::custom("--x")).is_none());
}

// =============================================================================
// Animated Style Writes
// =============================================================================

#[test]
fn test_write_without_transition_is_instant() {
    let (doc, body) = panel_body();

    doc.set_style(body, StyleProperty::Height, StyleValue::Px(0.0));

    assert!(!doc.has_active_transitions());
    assert_eq!(
        doc.computed_style(body, &StyleProperty::Height),
        Some(StyleValue::Px(0.0))
    );
    assert!(!doc.style_writes()[0].animated);
}

#[test]
fn test_write_with_transition_interpolates() {
    let (doc, body) = panel_body();
    doc.set_transitions(
        body,
        Transitions::new().height(Duration::from_millis(100), Easing::Linear),
    );

    // Natural content height is 140 - 40 padding.
    doc.set_style(body, StyleProperty::Height, StyleValue::Px(0.0));
    assert!(doc.is_animating(body, &StyleProperty::Height));
    assert_eq!(doc.transitions_started(), 1);

    doc.advance(Duration::from_millis(50));
    let mid = doc
        .computed_style(body, &StyleProperty::Height)
        .and_then(|v| v.as_f32())
        .unwrap();
    assert!((mid - 50.0).abs() < 0.01, "mid-transition height {mid}");
    assert!((doc.measure(body).height - 50.0).abs() < 0.01);

    doc.advance(Duration::from_millis(50));
    assert!(!doc.is_animating(body, &StyleProperty::Height));
    assert_eq!(
        doc.computed_style(body, &StyleProperty::Height),
        Some(StyleValue::Px(0.0))
    );
}

#[test]
fn test_retarget_starts_from_current_value() {
    let (doc, body) = panel_body();
    doc.set_transitions(
        body,
        Transitions::new().height(Duration::from_millis(100), Easing::Linear),
    );

    doc.set_style(body, StyleProperty::Height, StyleValue::Px(0.0));
    doc.advance(Duration::from_millis(50));
    doc.set_style(body, StyleProperty::Height, StyleValue::Px(100.0));

    // Restarts at 50 and heads back to 100.
    assert!((doc.measure(body).height - 50.0).abs() < 0.01);
    doc.advance(Duration::from_millis(50));
    assert!((doc.measure(body).height - 75.0).abs() < 0.01);
}

#[test]
fn test_reduced_motion_skips_transitions() {
    let doc = Document::with_config(webdom::DocumentConfig {
        reduced_motion: true,
        ..Default::default()
    });
    doc.mount(&Element::div().id("body").rect(Rect::from_size(10.0, 100.0)));
    let body = doc.by_id("body").unwrap();
    doc.set_transitions(
        body,
        Transitions::new().height(Duration::from_millis(100), Easing::Linear),
    );

    doc.set_style(body, StyleProperty::Height, StyleValue::Px(0.0));

    assert!(!doc.has_active_transitions());
    assert_eq!(doc.measure(body).height, 0.0);
}
