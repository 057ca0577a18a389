//! The interface page behaviors use to reach the document.
//!
//! Behaviors never hold on to a host. Every callback receives the host it is
//! running against, so listeners and timers only capture their own state.

use std::sync::Arc;
use std::time::Duration;

use crate::element::NodeId;
use crate::event::{Event, EventKind};
use crate::style::{StyleProperty, StyleValue};
use crate::transitions::Transitions;
use crate::types::{Edges, Rect};

/// Event handler registered on a node.
pub type Listener = Arc<dyn Fn(&dyn Host, &Event) + Send + Sync>;

/// One-shot continuation (deferred task or timer).
pub type Task = Box<dyn FnOnce(&dyn Host) + Send>;

/// Animation frame callback, invoked with the frame timestamp.
pub type FrameCallback = Box<dyn FnOnce(&dyn Host, Duration) + Send>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(pub(crate) u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(pub(crate) u64);

/// Layout measurements of a node.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Metrics {
    /// Border box, including padding.
    pub rect: Rect,
    /// Content height, excluding padding.
    pub height: f32,
    pub padding: Edges,
}

/// Document access for page behaviors.
///
/// Queries with a malformed selector match nothing. Operations on nodes that
/// do not exist are ignored.
pub trait Host {
    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    /// All matching elements, in document order.
    fn query_all(&self, selector: &str) -> Vec<NodeId>;

    /// Matching descendants of `root`, in document order.
    fn query_within_all(&self, root: NodeId, selector: &str) -> Vec<NodeId>;

    fn query(&self, selector: &str) -> Option<NodeId> {
        self.query_all(selector).into_iter().next()
    }

    fn query_within(&self, root: NodeId, selector: &str) -> Option<NodeId> {
        self.query_within_all(root, selector).into_iter().next()
    }

    /// Element whose `id` attribute equals `id`, compared verbatim.
    fn by_id(&self, id: &str) -> Option<NodeId>;

    fn parent(&self, node: NodeId) -> Option<NodeId>;

    /// Whether `node` matches `selector`. Malformed selectors match nothing.
    fn matches(&self, node: NodeId, selector: &str) -> bool;

    /// `node` or its nearest ancestor matching `selector`.
    fn closest(&self, node: NodeId, selector: &str) -> Option<NodeId> {
        let mut current = Some(node);
        while let Some(candidate) = current {
            if self.matches(candidate, selector) {
                return Some(candidate);
            }
            current = self.parent(candidate);
        }
        None
    }

    fn window(&self) -> NodeId;

    fn document_element(&self) -> NodeId;

    fn body(&self) -> NodeId;

    // -------------------------------------------------------------------------
    // Reading
    // -------------------------------------------------------------------------

    fn attribute(&self, node: NodeId, name: &str) -> Option<String>;

    fn text(&self, node: NodeId) -> String;

    fn value(&self, node: NodeId) -> String;

    fn has_class(&self, node: NodeId, class: &str) -> bool;

    /// Current layout of the node, reflecting inline overrides.
    fn measure(&self, node: NodeId) -> Metrics;

    /// Inline style value (the target of any running transition).
    fn style(&self, node: NodeId, property: &StyleProperty) -> Option<StyleValue>;

    // -------------------------------------------------------------------------
    // Writing
    // -------------------------------------------------------------------------

    /// Write an inline style. Animates when a transition is configured for
    /// the property on this node.
    fn set_style(&self, node: NodeId, property: StyleProperty, value: StyleValue);

    /// Replace the transitions applied to subsequent style writes.
    fn set_transitions(&self, node: NodeId, transitions: Transitions);

    fn set_class(&self, node: NodeId, class: &str, on: bool);

    fn set_text(&self, node: NodeId, text: &str);

    fn set_value(&self, node: NodeId, value: &str);

    // -------------------------------------------------------------------------
    // Events and scheduling
    // -------------------------------------------------------------------------

    fn listen(&self, node: NodeId, kind: EventKind, listener: Listener);

    /// Run `task` after the current synchronous pass.
    fn defer(&self, task: Task);

    fn set_timeout(&self, delay: Duration, task: Task) -> TimerId;

    /// Cancel a pending timer. Unknown or fired timers are ignored.
    fn clear_timeout(&self, id: TimerId);

    fn request_frame(&self, callback: FrameCallback);

    /// Notify `listener` with [`Event::Intersect`] whenever the node's visible
    /// ratio crosses `threshold`.
    fn observe_intersection(&self, node: NodeId, threshold: f32, listener: Listener) -> ObserverId;

    /// Notify `listener` with [`Event::Resize`] when the node's size changes.
    fn observe_resize(&self, node: NodeId, listener: Listener) -> ObserverId;

    fn unobserve(&self, id: ObserverId);
}
