use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use crate::style::{StyleProperty, StyleValue};
use crate::transitions::Transitions;
use crate::types::{Edges, Rect};

/// Handle to a node owned by a [`Document`](crate::Document).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node#{}", self.0)
    }
}

/// Element description used to build a document.
///
/// Doubles as the JSON fixture format: every field is optional and `class`
/// accepts either a space separated string or a list.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Element {
    pub tag: String,
    pub id: Option<String>,
    #[serde(deserialize_with = "deserialize_classes")]
    pub class: Vec<String>,
    pub attrs: BTreeMap<String, String>,
    pub text: String,
    pub value: String,
    /// Border box of the element.
    pub rect: Rect,
    pub padding: Edges,
    pub children: Vec<Element>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Default::default()
        }
    }

    pub fn div() -> Self {
        Self::new("div")
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Add one or more space separated classes.
    pub fn class(mut self, class: &str) -> Self {
        self.class
            .extend(class.split_whitespace().map(str::to_string));
        self
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    pub fn rect(mut self, rect: Rect) -> Self {
        self.rect = rect;
        self
    }

    pub fn padding(mut self, padding: Edges) -> Self {
        self.padding = padding;
        self
    }

    pub fn child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = Element>) -> Self {
        self.children.extend(children);
        self
    }
}

fn deserialize_classes<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Classes {
        Joined(String),
        List(Vec<String>),
    }

    Ok(match Classes::deserialize(deserializer)? {
        Classes::Joined(s) => s.split_whitespace().map(str::to_string).collect(),
        Classes::List(list) => list,
    })
}

/// A live node inside a document.
#[derive(Debug, Clone)]
pub(crate) struct Node {
    pub tag: String,
    pub id: Option<String>,
    pub classes: Vec<String>,
    pub attributes: BTreeMap<String, String>,
    pub text: String,
    pub value: String,
    pub rect: Rect,
    pub padding: Edges,
    pub style: BTreeMap<StyleProperty, StyleValue>,
    pub transitions: Transitions,
    pub visibility: f32,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
}

impl Node {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            id: None,
            classes: Vec::new(),
            attributes: BTreeMap::new(),
            text: String::new(),
            value: String::new(),
            rect: Rect::default(),
            padding: Edges::default(),
            style: BTreeMap::new(),
            transitions: Transitions::default(),
            visibility: 0.0,
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn from_element(element: &Element) -> Self {
        let mut node = Node::new(if element.tag.is_empty() {
            "div"
        } else {
            element.tag.as_str()
        });
        node.id = element.id.clone();
        node.classes = element.class.clone();
        node.attributes = element.attrs.clone();
        node.text = element.text.clone();
        node.value = element.value.clone();
        node.rect = element.rect;
        node.padding = element.padding;
        node
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn set_class(&mut self, class: &str, on: bool) -> bool {
        let present = self.has_class(class);
        if on && !present {
            self.classes.push(class.to_string());
            true
        } else if !on && present {
            self.classes.retain(|c| c != class);
            true
        } else {
            false
        }
    }

    /// Content height as laid out without inline overrides.
    pub fn natural_content_height(&self) -> f32 {
        (self.rect.height - self.padding.vertical_total()).max(0.0)
    }
}
