use crate::host::ObserverId;

/// Events delivered to listeners.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Pointer activation (click or tap)
    Click,
    /// Pointer entered the element
    MouseEnter,
    /// Pointer left the element
    MouseLeave,
    /// Pointer moved over the element, in client coordinates
    MouseMove { x: f32, y: f32 },
    /// The element's value changed through user input
    Input { value: String },
    /// The page finished loading (window only)
    Load,
    /// Window or observed element resized
    Resize { width: f32, height: f32 },
    /// Observed element crossed its intersection threshold
    Intersect {
        observer: ObserverId,
        ratio: f32,
        intersecting: bool,
    },
}

/// Discriminant used to subscribe to events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Click,
    MouseEnter,
    MouseLeave,
    MouseMove,
    Input,
    Load,
    Resize,
    Intersect,
}

impl Event {
    pub fn kind(&self) -> EventKind {
        match self {
            Event::Click => EventKind::Click,
            Event::MouseEnter => EventKind::MouseEnter,
            Event::MouseLeave => EventKind::MouseLeave,
            Event::MouseMove { .. } => EventKind::MouseMove,
            Event::Input { .. } => EventKind::Input,
            Event::Load => EventKind::Load,
            Event::Resize { .. } => EventKind::Resize,
            Event::Intersect { .. } => EventKind::Intersect,
        }
    }

    /// Whether the event propagates to ancestors after the target.
    pub fn bubbles(&self) -> bool {
        matches!(self, Event::Click | Event::Input { .. } | Event::MouseMove { .. })
    }
}
