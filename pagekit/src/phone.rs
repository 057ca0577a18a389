//! Phone inputs formatted against a fixed mask.
//!
//! Mask syntax: `{…}` holds fixed digits that are always present, `0` is a
//! digit slot and any other character is a literal. Placeholders are shown
//! eagerly and typing overwrites slots left to right.

use std::sync::Arc;

use log::{debug, info};
use regex::Regex;
use serde::Deserialize;
use webdom::{Event, EventKind, Host, NodeId};

use crate::error::PageError;

const MASK_TOKEN: &str = r"\{([^}]*)\}|(.)";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PhoneConfig {
    pub input_selector: String,
    pub mask: String,
    pub placeholder: char,
    /// Present while nothing beyond the fixed digits has been typed.
    pub empty_class: String,
}

impl Default for PhoneConfig {
    fn default() -> Self {
        Self {
            input_selector: "[aria-mask]".into(),
            mask: "+{7} (000) 000 00 00".into(),
            placeholder: '_',
            empty_class: "empty".into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MaskToken {
    Fixed(char),
    Slot,
    Literal(char),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhoneMask {
    tokens: Vec<MaskToken>,
    placeholder: char,
}

impl PhoneMask {
    pub fn parse(pattern: &str, placeholder: char) -> Result<Self, PageError> {
        let invalid = |reason: &str| PageError::Mask {
            pattern: pattern.to_string(),
            reason: reason.to_string(),
        };

        let token = Regex::new(MASK_TOKEN)?;
        let mut tokens = Vec::new();
        for caps in token.captures_iter(pattern) {
            if let Some(fixed) = caps.get(1) {
                let fixed = fixed.as_str();
                if fixed.is_empty() || !fixed.chars().all(|c| c.is_ascii_digit()) {
                    return Err(invalid("fixed part must be digits"));
                }
                tokens.extend(fixed.chars().map(MaskToken::Fixed));
            } else if let Some(c) = caps.get(2).and_then(|m| m.as_str().chars().next()) {
                tokens.push(match c {
                    '0' => MaskToken::Slot,
                    '{' | '}' => return Err(invalid("unbalanced braces")),
                    c => MaskToken::Literal(c),
                });
            }
        }

        if !tokens.contains(&MaskToken::Slot) {
            return Err(invalid("no digit slots"));
        }
        Ok(Self {
            tokens,
            placeholder,
        })
    }

    pub fn slots(&self) -> usize {
        self.tokens.iter().filter(|t| **t == MaskToken::Slot).count()
    }

    fn fixed_digits(&self) -> Vec<char> {
        self.tokens
            .iter()
            .filter_map(|t| match t {
                MaskToken::Fixed(c) => Some(*c),
                _ => None,
            })
            .collect()
    }

    /// Fit the digits of `input` into the mask.
    ///
    /// A leading copy of the fixed digits is dropped when the input starts
    /// with `+` or carries more digits than there are slots. Extra digits are
    /// discarded.
    pub fn format(&self, input: &str) -> String {
        let fixed = self.fixed_digits();
        let mut digits: Vec<char> = input.chars().filter(char::is_ascii_digit).collect();
        if !fixed.is_empty()
            && digits.starts_with(&fixed)
            && (input.trim_start().starts_with('+') || digits.len() > self.slots())
        {
            digits.drain(..fixed.len());
        }

        let mut digits = digits.into_iter();
        self.tokens
            .iter()
            .map(|token| match token {
                MaskToken::Fixed(c) | MaskToken::Literal(c) => *c,
                MaskToken::Slot => digits.next().unwrap_or(self.placeholder),
            })
            .collect()
    }

    /// True when `value` holds no digits beyond the fixed ones.
    pub fn is_blank(&self, value: &str) -> bool {
        value.chars().filter(char::is_ascii_digit).count() <= self.fixed_digits().len()
    }
}

/// A masked input element.
#[derive(Debug)]
pub struct PhoneField {
    node: NodeId,
    mask: Arc<PhoneMask>,
    empty_class: String,
}

impl PhoneField {
    pub fn node(&self) -> NodeId {
        self.node
    }

    /// Reformat the field after the user typed `raw`.
    pub fn on_input(&self, host: &dyn Host, raw: &str) {
        let formatted = self.mask.format(raw);
        host.set_class(self.node, &self.empty_class, self.mask.is_blank(&formatted));
        host.set_value(self.node, &formatted);
    }
}

pub fn init(host: &dyn Host, config: &PhoneConfig) -> Result<Vec<Arc<PhoneField>>, PageError> {
    let inputs = host.query_all(&config.input_selector);
    if inputs.is_empty() {
        debug!("phone: no `{}`", config.input_selector);
        return Ok(Vec::new());
    }

    let mask = Arc::new(PhoneMask::parse(&config.mask, config.placeholder)?);
    let fields: Vec<Arc<PhoneField>> = inputs
        .into_iter()
        .map(|node| {
            let field = Arc::new(PhoneField {
                node,
                mask: Arc::clone(&mask),
                empty_class: config.empty_class.clone(),
            });
            host.set_value(node, &mask.format(""));
            host.set_class(node, &config.empty_class, true);

            let target = Arc::clone(&field);
            host.listen(
                node,
                EventKind::Input,
                Arc::new(move |host: &dyn Host, event: &Event| {
                    if let Event::Input { value } = event {
                        target.on_input(host, value);
                    }
                }),
            );
            field
        })
        .collect();

    info!("phone: {} masked inputs", fields.len());
    Ok(fields)
}
