//! Compound selectors: `tag`, `#id`, `.class`, `[attr]` and `[attr="value"]`.
//!
//! Combinators are not supported; scoped lookups go through
//! [`Host::query_within_all`](crate::Host::query_within_all) instead.

use std::str::FromStr;

use crate::element::Node;
use crate::error::DocumentError;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Selector {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attributes: Vec<AttributeMatch>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct AttributeMatch {
    name: String,
    value: Option<String>,
}

impl Selector {
    pub fn parse(input: &str) -> Result<Self, DocumentError> {
        let source = input.trim();
        let fail = |reason: &str| DocumentError::Selector {
            selector: input.to_string(),
            reason: reason.to_string(),
        };

        if source.is_empty() {
            return Err(fail("empty selector"));
        }

        let mut selector = Selector::default();
        let mut chars = source.chars().peekable();

        while let Some(&c) = chars.peek() {
            match c {
                '#' => {
                    chars.next();
                    let ident = take_ident(&mut chars);
                    if ident.is_empty() {
                        return Err(fail("expected id after `#`"));
                    }
                    selector.id = Some(ident);
                }
                '.' => {
                    chars.next();
                    let ident = take_ident(&mut chars);
                    if ident.is_empty() {
                        return Err(fail("expected class after `.`"));
                    }
                    selector.classes.push(ident);
                }
                '[' => {
                    chars.next();
                    let mut body = String::new();
                    let mut closed = false;
                    for c in chars.by_ref() {
                        if c == ']' {
                            closed = true;
                            break;
                        }
                        body.push(c);
                    }
                    if !closed {
                        return Err(fail("unterminated attribute selector"));
                    }
                    selector.attributes.push(parse_attribute(&body).ok_or_else(|| {
                        fail("malformed attribute selector")
                    })?);
                }
                '*' if selector == Selector::default() => {
                    chars.next();
                }
                c if is_ident_char(c) && selector == Selector::default() => {
                    selector.tag = Some(take_ident(&mut chars).to_ascii_lowercase());
                }
                c if c.is_whitespace() || matches!(c, '>' | '+' | '~' | ',') => {
                    return Err(fail("combinators are not supported"));
                }
                _ => return Err(fail(&format!("unexpected `{c}`"))),
            }
        }

        Ok(selector)
    }

    pub(crate) fn matches(&self, node: &Node) -> bool {
        if let Some(tag) = &self.tag {
            if !node.tag.eq_ignore_ascii_case(tag) {
                return false;
            }
        }
        if let Some(id) = &self.id {
            if node.id.as_deref() != Some(id.as_str()) {
                return false;
            }
        }
        if !self.classes.iter().all(|class| node.has_class(class)) {
            return false;
        }
        self.attributes.iter().all(|attr| {
            match (node.attributes.get(&attr.name), &attr.value) {
                (Some(actual), Some(expected)) => actual == expected,
                (Some(_), None) => true,
                (None, _) => false,
            }
        })
    }
}

impl FromStr for Selector {
    type Err = DocumentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Selector::parse(s)
    }
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

fn take_ident(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> String {
    let mut ident = String::new();
    while let Some(&c) = chars.peek() {
        if !is_ident_char(c) {
            break;
        }
        ident.push(c);
        chars.next();
    }
    ident
}

fn parse_attribute(body: &str) -> Option<AttributeMatch> {
    let (name, value) = match body.split_once('=') {
        Some((name, value)) => {
            let value = value.trim();
            let unquoted = value
                .strip_prefix('"')
                .and_then(|v| v.strip_suffix('"'))
                .or_else(|| value.strip_prefix('\'').and_then(|v| v.strip_suffix('\'')))
                .unwrap_or(value);
            (name.trim(), Some(unquoted.to_string()))
        }
        None => (body.trim(), None),
    };

    if name.is_empty() || !name.chars().all(is_ident_char) {
        return None;
    }

    Some(AttributeMatch {
        name: name.to_string(),
        value,
    })
}
