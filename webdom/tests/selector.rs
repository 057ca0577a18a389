use webdom::{Document, DocumentError, Element, Host, Selector};

fn sample() -> Document {
    Document::from_element(
        &Element::new("body").children([
            Element::div()
                .id("grid")
                .class("ecosystem__grid wide")
                .child(Element::new("button").class("ecosystem__tag"))
                .child(Element::new("button").class("ecosystem__tag hot")),
            Element::new("input").id("phone").attr("aria-mask", ""),
            Element::new("button").attr("data-modal-trigger", "callback"),
        ]),
    )
}

// ============================================================================
// Parsing
// ============================================================================

#[test]
fn test_parse_compound_selectors() {
    assert!(Selector::parse("#map").is_ok());
    assert!(Selector::parse(".a.b").is_ok());
    assert!(Selector::parse("div.accordion__item").is_ok());
    assert!(Selector::parse("[aria-mask]").is_ok());
    assert!(Selector::parse("[data-modal-trigger=\"callback\"]").is_ok());
    assert!(Selector::parse("*").is_ok());
    assert!("button#zoom-in".parse::<Selector>().is_ok());
}

#[test]
fn test_parse_rejects_malformed_selectors() {
    for bad in ["", "#", ".", "[unterminated", "[]", ".a .b", "a > b", "a, b", ".a!"] {
        let err = Selector::parse(bad).unwrap_err();
        assert!(
            matches!(err, DocumentError::Selector { .. }),
            "{bad:?} gave {err:?}"
        );
    }
}

#[test]
fn test_tag_must_come_first() {
    assert!(Selector::parse(".a div").is_err());
    assert!(Selector::parse(".adiv").is_ok());
}

// ============================================================================
// Matching
// ============================================================================

#[test]
fn test_query_by_class_in_document_order() {
    let doc = sample();
    let tags = doc.query_all(".ecosystem__tag");
    assert_eq!(tags.len(), 2);
    assert!(tags[0] < tags[1]);
    assert_eq!(doc.query_all(".ecosystem__tag.hot"), vec![tags[1]]);
}

#[test]
fn test_query_by_id_tag_and_attribute() {
    let doc = sample();
    assert_eq!(doc.query("#phone"), doc.by_id("phone"));
    assert_eq!(doc.query_all("button").len(), 3);
    assert_eq!(doc.query_all("[aria-mask]"), vec![doc.by_id("phone").unwrap()]);
    assert_eq!(doc.query_all("[data-modal-trigger=callback]").len(), 1);
    assert!(doc.query_all("[data-modal-trigger='other']").is_empty());
}

#[test]
fn test_query_within_excludes_root() {
    let doc = sample();
    let grid = doc.by_id("grid").unwrap();
    assert_eq!(doc.query_within_all(grid, "button").len(), 2);
    assert!(doc.query_within(grid, ".ecosystem__grid").is_none());
}

#[test]
fn test_invalid_selector_matches_nothing() {
    let doc = sample();
    assert!(doc.query_all(".a .b").is_empty());
    assert!(doc.try_query_all(".a .b").is_err());
}

// ============================================================================
// Ancestry
// ============================================================================

#[test]
fn test_closest_walks_up_from_node() {
    let doc = sample();
    let grid = doc.by_id("grid").unwrap();
    let tag = doc.query(".hot").unwrap();

    assert_eq!(doc.parent(tag), Some(grid));
    assert!(doc.matches(tag, "button.ecosystem__tag"));
    assert!(!doc.matches(tag, "#grid"));
    assert_eq!(doc.closest(tag, ".ecosystem__grid"), Some(grid));
    assert_eq!(doc.closest(grid, ".ecosystem__grid"), Some(grid));
    assert_eq!(doc.closest(tag, ".missing"), None);
    assert!(!doc.matches(tag, ".a .b"));
}

#[test]
fn test_by_id_compares_verbatim() {
    let doc = Document::from_element(&Element::div().id("modal.callback:1"));
    assert!(doc.by_id("modal.callback:1").is_some());
    assert!(doc.query("#modal.callback:1").is_none());
    assert!(doc.by_id("modal").is_none());
}
