use std::fmt;

/// An inline style property that behaviors write.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StyleProperty {
    Height,
    PaddingTop,
    PaddingBottom,
    Opacity,
    Transform,
    ZIndex,
    /// A custom property such as `--header-height`.
    Custom(String),
}

impl StyleProperty {
    pub fn custom(name: impl Into<String>) -> Self {
        StyleProperty::Custom(name.into())
    }

    /// CSS name of the property.
    pub fn name(&self) -> &str {
        match self {
            StyleProperty::Height => "height",
            StyleProperty::PaddingTop => "padding-top",
            StyleProperty::PaddingBottom => "padding-bottom",
            StyleProperty::Opacity => "opacity",
            StyleProperty::Transform => "transform",
            StyleProperty::ZIndex => "z-index",
            StyleProperty::Custom(name) => name,
        }
    }
}

impl fmt::Display for StyleProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A 2D translate followed by a uniform scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub translate_x: f32,
    pub translate_y: f32,
    pub scale: f32,
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        translate_x: 0.0,
        translate_y: 0.0,
        scale: 1.0,
    };

    pub const fn new(translate_x: f32, translate_y: f32, scale: f32) -> Self {
        Self {
            translate_x,
            translate_y,
            scale,
        }
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "translate({}px, {}px) scale({})",
            self.translate_x, self.translate_y, self.scale
        )
    }
}

/// A typed inline style value.
#[derive(Debug, Clone, PartialEq)]
pub enum StyleValue {
    Px(f32),
    Number(f32),
    Integer(i32),
    Transform(Transform),
    Keyword(String),
}

impl StyleValue {
    /// Numeric payload of values that can be interpolated.
    pub fn as_f32(&self) -> Option<f32> {
        match self {
            StyleValue::Px(v) | StyleValue::Number(v) => Some(*v),
            _ => None,
        }
    }

    /// Rebuild a value of the same unit with a new magnitude.
    pub(crate) fn with_magnitude(&self, value: f32) -> StyleValue {
        match self {
            StyleValue::Px(_) => StyleValue::Px(value),
            StyleValue::Number(_) => StyleValue::Number(value),
            other => other.clone(),
        }
    }
}

impl fmt::Display for StyleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StyleValue::Px(v) => write!(f, "{v}px"),
            StyleValue::Number(v) => write!(f, "{v}"),
            StyleValue::Integer(v) => write!(f, "{v}"),
            StyleValue::Transform(t) => write!(f, "{t}"),
            StyleValue::Keyword(k) => f.write_str(k),
        }
    }
}
