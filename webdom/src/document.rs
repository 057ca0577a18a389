//! In-memory document with a virtual clock.
//!
//! Nothing runs on its own: events are injected with [`Document::dispatch`]
//! and friends, deferred tasks run on [`Document::flush`], and timers, frames
//! and transitions progress only through [`Document::advance`].

use std::collections::{BTreeMap, HashMap, VecDeque};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use log::{debug, warn};
use serde::Serialize;

use crate::animation::AnimationState;
use crate::element::{Element, Node, NodeId};
use crate::error::DocumentError;
use crate::event::{Event, EventKind};
use crate::host::{FrameCallback, Host, Listener, Metrics, ObserverId, Task, TimerId};
use crate::selector::Selector;
use crate::style::{StyleProperty, StyleValue};
use crate::transitions::Transitions;
use crate::types::Rect;

/// Clock and motion settings for a document.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DocumentConfig {
    /// Spacing between animation frames.
    pub frame_interval: Duration,
    /// When set, style writes never animate.
    pub reduced_motion: bool,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            frame_interval: Duration::from_millis(16),
            reduced_motion: false,
        }
    }
}

/// One recorded inline style mutation.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleWrite {
    pub node: NodeId,
    pub property: StyleProperty,
    pub value: StyleValue,
    /// Document time of the write.
    pub at: Duration,
    /// Whether the write started a transition.
    pub animated: bool,
}

/// Serializable view of one element.
#[derive(Debug, Clone, Serialize)]
pub struct NodeSnapshot {
    pub node: NodeId,
    pub tag: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub classes: Vec<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub style: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub text: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub value: String,
}

struct Timer {
    id: TimerId,
    due: Duration,
    task: Task,
}

struct IntersectionObserver {
    id: ObserverId,
    node: NodeId,
    threshold: f32,
    listener: Listener,
    intersecting: bool,
}

struct ResizeObserver {
    id: ObserverId,
    node: NodeId,
    listener: Listener,
    size: (f32, f32),
}

struct Inner {
    nodes: Vec<Node>,
    window: NodeId,
    html: NodeId,
    body: NodeId,
    listeners: HashMap<(NodeId, EventKind), Vec<Listener>>,
    deferred: VecDeque<Task>,
    timers: Vec<Timer>,
    frames: Vec<FrameCallback>,
    intersections: Vec<IntersectionObserver>,
    pending_intersections: Vec<ObserverId>,
    resizes: Vec<ResizeObserver>,
    animations: AnimationState,
    writes: Vec<StyleWrite>,
    now: Duration,
    next_frame: Duration,
    next_id: u64,
    config: DocumentConfig,
}

impl Inner {
    fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0)
    }

    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    fn push(&mut self, parent: Option<NodeId>, mut node: Node) -> NodeId {
        let id = NodeId(self.nodes.len());
        node.parent = parent;
        self.nodes.push(node);
        if let Some(parent) = parent.and_then(|p| self.nodes.get_mut(p.0)) {
            parent.children.push(id);
        }
        id
    }

    fn append(&mut self, parent: NodeId, element: &Element) -> NodeId {
        let id = self.push(Some(parent), Node::from_element(element));
        for child in &element.children {
            self.append(id, child);
        }
        id
    }

    /// Descendants of `root` in document order, excluding `root`.
    fn descendants(&self, root: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self
            .node(root)
            .map(|n| n.children.iter().rev().copied().collect())
            .unwrap_or_default();
        while let Some(id) = stack.pop() {
            out.push(id);
            if let Some(node) = self.node(id) {
                stack.extend(node.children.iter().rev().copied());
            }
        }
        out
    }

    fn query_within(&self, root: NodeId, selector: &Selector) -> Vec<NodeId> {
        self.descendants(root)
            .into_iter()
            .filter(|id| self.node(*id).is_some_and(|n| selector.matches(n)))
            .collect()
    }

    /// Value a property has before any inline override.
    fn base_value(&self, id: NodeId, property: &StyleProperty) -> Option<f32> {
        let node = self.node(id)?;
        match property {
            StyleProperty::Height => Some(node.natural_content_height()),
            StyleProperty::PaddingTop => Some(node.padding.top),
            StyleProperty::PaddingBottom => Some(node.padding.bottom),
            StyleProperty::Opacity => Some(1.0),
            _ => None,
        }
    }

    /// Numeric value currently rendered: mid-transition, inline, or base.
    fn current_numeric(&self, id: NodeId, property: &StyleProperty) -> Option<f32> {
        self.animations
            .interpolated(id, property, self.now)
            .or_else(|| {
                self.node(id)
                    .and_then(|n| n.style.get(property))
                    .and_then(StyleValue::as_f32)
            })
            .or_else(|| self.base_value(id, property))
    }

    fn computed(&self, id: NodeId, property: &StyleProperty) -> Option<StyleValue> {
        let inline = self.node(id)?.style.get(property)?;
        match self.animations.interpolated(id, property, self.now) {
            Some(value) => Some(inline.with_magnitude(value)),
            None => Some(inline.clone()),
        }
    }

    fn measure(&self, id: NodeId) -> Metrics {
        let Some(node) = self.node(id) else {
            return Metrics::default();
        };
        let height = self
            .current_numeric(id, &StyleProperty::Height)
            .unwrap_or_default();
        let mut padding = node.padding;
        padding.top = self
            .current_numeric(id, &StyleProperty::PaddingTop)
            .unwrap_or(padding.top);
        padding.bottom = self
            .current_numeric(id, &StyleProperty::PaddingBottom)
            .unwrap_or(padding.bottom);

        Metrics {
            rect: Rect::new(
                node.rect.x,
                node.rect.y,
                node.rect.width,
                height + padding.vertical_total(),
            ),
            height,
            padding,
        }
    }

    fn snapshot(&self, id: NodeId) -> Option<NodeSnapshot> {
        let node = self.node(id)?;
        let style = node
            .style
            .keys()
            .filter_map(|property| {
                self.computed(id, property)
                    .map(|value| (property.to_string(), value.to_string()))
            })
            .collect();
        Some(NodeSnapshot {
            node: id,
            tag: node.tag.clone(),
            id: node.id.clone(),
            classes: node.classes.clone(),
            style,
            text: node.text.clone(),
            value: node.value.clone(),
        })
    }
}

/// Headless document implementing [`Host`].
pub struct Document {
    inner: Mutex<Inner>,
}

impl Document {
    /// Create an empty document (window, `html` and `body`).
    pub fn new() -> Self {
        Self::with_config(DocumentConfig::default())
    }

    pub fn with_config(config: DocumentConfig) -> Self {
        let mut animations = AnimationState::new();
        animations.set_reduced_motion(config.reduced_motion);
        let frame_interval = config.frame_interval.max(Duration::from_millis(1));

        let mut inner = Inner {
            nodes: Vec::new(),
            window: NodeId(0),
            html: NodeId(0),
            body: NodeId(0),
            listeners: HashMap::new(),
            deferred: VecDeque::new(),
            timers: Vec::new(),
            frames: Vec::new(),
            intersections: Vec::new(),
            pending_intersections: Vec::new(),
            resizes: Vec::new(),
            animations,
            writes: Vec::new(),
            now: Duration::ZERO,
            next_frame: frame_interval,
            next_id: 0,
            config: DocumentConfig {
                frame_interval,
                ..config
            },
        };
        inner.window = inner.push(None, Node::new("#window"));
        inner.html = inner.push(None, Node::new("html"));
        let html = inner.html;
        inner.body = inner.push(Some(html), Node::new("body"));

        Self {
            inner: Mutex::new(inner),
        }
    }

    /// Build a document from an element tree.
    ///
    /// A `body` root is merged into the document body; any other root is
    /// appended to it.
    pub fn from_element(root: &Element) -> Self {
        let doc = Self::new();
        doc.mount(root);
        doc
    }

    pub fn from_json(json: &str) -> Result<Self, DocumentError> {
        let root: Element = serde_json::from_str(json)?;
        Ok(Self::from_element(&root))
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, DocumentError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Add an element tree to the body.
    pub fn mount(&self, root: &Element) {
        let mut inner = self.lock();
        let body = inner.body;
        if root.tag.eq_ignore_ascii_case("body") {
            if let Some(node) = inner.node_mut(body) {
                let mut merged = Node::from_element(root);
                merged.parent = node.parent;
                *node = merged;
            }
            for child in &root.children {
                inner.append(body, child);
            }
        } else {
            inner.append(body, root);
        }
    }

    /// Append an element tree under `parent`.
    pub fn append(&self, parent: NodeId, element: &Element) -> NodeId {
        self.lock().append(parent, element)
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    // -------------------------------------------------------------------------
    // Inspection
    // -------------------------------------------------------------------------

    pub fn try_query_all(&self, selector: &str) -> Result<Vec<NodeId>, DocumentError> {
        let selector = Selector::parse(selector)?;
        let inner = self.lock();
        Ok(inner.query_within(inner.html, &selector))
    }

    pub fn now(&self) -> Duration {
        self.lock().now
    }

    /// Style value as currently rendered, interpolated mid-transition.
    pub fn computed_style(&self, node: NodeId, property: &StyleProperty) -> Option<StyleValue> {
        self.lock().computed(node, property)
    }

    pub fn transitions(&self, node: NodeId) -> Transitions {
        self.lock()
            .node(node)
            .map(|n| n.transitions.clone())
            .unwrap_or_default()
    }

    pub fn classes(&self, node: NodeId) -> Vec<String> {
        self.lock()
            .node(node)
            .map(|n| n.classes.clone())
            .unwrap_or_default()
    }

    pub fn has_active_transitions(&self) -> bool {
        self.lock().animations.has_active_transitions()
    }

    pub fn is_animating(&self, node: NodeId, property: &StyleProperty) -> bool {
        self.lock().animations.is_animating(node, property)
    }

    /// Number of transitions started since the document was created.
    pub fn transitions_started(&self) -> usize {
        self.lock().animations.started()
    }

    pub fn style_writes(&self) -> Vec<StyleWrite> {
        self.lock().writes.clone()
    }

    pub fn clear_style_writes(&self) {
        self.lock().writes.clear();
    }

    pub fn pending_timers(&self) -> usize {
        self.lock().timers.len()
    }

    /// Snapshot of every element in document order.
    pub fn snapshot(&self) -> Vec<NodeSnapshot> {
        let inner = self.lock();
        let html = inner.html;
        std::iter::once(html)
            .chain(inner.descendants(html))
            .filter_map(|id| inner.snapshot(id))
            .collect()
    }

    // -------------------------------------------------------------------------
    // Input injection
    // -------------------------------------------------------------------------

    /// Deliver an event to `target` and, if it bubbles, to its ancestors.
    pub fn dispatch(&self, target: NodeId, event: Event) {
        let listeners: Vec<Listener> = {
            let mut inner = self.lock();
            if let Event::Input { value } = &event {
                if let Some(node) = inner.node_mut(target) {
                    node.value = value.clone();
                }
            }

            let mut path = vec![target];
            if event.bubbles() {
                let mut current = inner.node(target).and_then(|n| n.parent);
                while let Some(parent) = current {
                    path.push(parent);
                    current = inner.node(parent).and_then(|n| n.parent);
                }
            }

            let kind = event.kind();
            path.iter()
                .filter_map(|node| inner.listeners.get(&(*node, kind)))
                .flatten()
                .cloned()
                .collect()
        };

        debug!("dispatch {:?} to {} ({} listeners)", event.kind(), target, listeners.len());
        for listener in listeners {
            listener(self, &event);
        }
    }

    pub fn click(&self, target: NodeId) {
        self.dispatch(target, Event::Click);
    }

    pub fn enter(&self, target: NodeId) {
        self.dispatch(target, Event::MouseEnter);
    }

    pub fn leave(&self, target: NodeId) {
        self.dispatch(target, Event::MouseLeave);
    }

    pub fn move_pointer(&self, target: NodeId, x: f32, y: f32) {
        self.dispatch(target, Event::MouseMove { x, y });
    }

    pub fn input(&self, target: NodeId, value: &str) {
        self.dispatch(
            target,
            Event::Input {
                value: value.to_string(),
            },
        );
    }

    /// Fire the window `load` event.
    pub fn load(&self) {
        let window = self.lock().window;
        self.dispatch(window, Event::Load);
    }

    /// Resize the viewport and fire the window `resize` event.
    pub fn resize_window(&self, width: f32, height: f32) {
        let window = {
            let mut inner = self.lock();
            let window = inner.window;
            if let Some(node) = inner.node_mut(window) {
                node.rect = Rect::from_size(width, height);
            }
            window
        };
        self.dispatch(window, Event::Resize { width, height });
    }

    /// Change the border box of a node, notifying resize observers when its
    /// size changed.
    pub fn set_rect(&self, node: NodeId, rect: Rect) {
        let notify: Vec<(Listener, Event)> = {
            let mut inner = self.lock();
            let Some(target) = inner.node_mut(node) else {
                return;
            };
            target.rect = rect;
            let size = (rect.width, rect.height);
            inner
                .resizes
                .iter_mut()
                .filter(|o| o.node == node && o.size != size)
                .map(|o| {
                    o.size = size;
                    (
                        o.listener.clone(),
                        Event::Resize {
                            width: rect.width,
                            height: rect.height,
                        },
                    )
                })
                .collect()
        };
        for (listener, event) in notify {
            listener(self, &event);
        }
    }

    /// Set the visible ratio of a node, notifying intersection observers whose
    /// threshold was crossed.
    pub fn set_visibility(&self, node: NodeId, ratio: f32) {
        let notify = {
            let mut inner = self.lock();
            let Some(target) = inner.node_mut(node) else {
                return;
            };
            target.visibility = ratio.clamp(0.0, 1.0);
            Self::crossed_intersections(&mut inner, |o| o.node == node)
        };
        for (listener, event) in notify {
            listener(self, &event);
        }
    }

    fn crossed_intersections(
        inner: &mut Inner,
        select: impl Fn(&IntersectionObserver) -> bool,
    ) -> Vec<(Listener, Event)> {
        let visibility: HashMap<NodeId, f32> = inner
            .intersections
            .iter()
            .filter(|o| select(o))
            .filter_map(|o| inner.node(o.node).map(|n| (o.node, n.visibility)))
            .collect();

        inner
            .intersections
            .iter_mut()
            .filter(|o| select(o))
            .filter_map(|o| {
                let ratio = visibility.get(&o.node).copied().unwrap_or_default();
                let intersecting = ratio > 0.0 && ratio >= o.threshold;
                if intersecting == o.intersecting {
                    return None;
                }
                o.intersecting = intersecting;
                Some((
                    o.listener.clone(),
                    Event::Intersect {
                        observer: o.id,
                        ratio,
                        intersecting,
                    },
                ))
            })
            .collect()
    }

    // -------------------------------------------------------------------------
    // Clock
    // -------------------------------------------------------------------------

    /// Run deferred tasks and pending observer checks until none remain.
    pub fn flush(&self) {
        loop {
            let (task, notify) = {
                let mut inner = self.lock();
                let pending = std::mem::take(&mut inner.pending_intersections);
                let notify = Self::crossed_intersections(&mut inner, |o| pending.contains(&o.id));
                (inner.deferred.pop_front(), notify)
            };
            let idle = task.is_none() && notify.is_empty();
            for (listener, event) in notify {
                listener(self, &event);
            }
            if let Some(task) = task {
                task(self);
            }
            if idle {
                break;
            }
        }
    }

    /// Move the clock forward, running timers and animation frames in order.
    pub fn advance(&self, dt: Duration) {
        let target = self.now() + dt;
        self.flush();

        loop {
            let (next, is_frame) = {
                let inner = self.lock();
                let next_timer = inner.timers.iter().map(|t| t.due.max(inner.now)).min();
                match next_timer {
                    Some(due) if due <= inner.next_frame => (due, false),
                    _ => (inner.next_frame, true),
                }
            };

            if next > target {
                let mut inner = self.lock();
                inner.now = target;
                inner.animations.prune(target);
                break;
            }

            self.lock().now = next;
            if is_frame {
                self.run_frame(next);
            } else {
                self.run_timers(next);
            }
            self.flush();
        }
    }

    fn run_timers(&self, now: Duration) {
        let due: Vec<Timer> = {
            let mut inner = self.lock();
            let (mut due, pending): (Vec<Timer>, Vec<Timer>) =
                std::mem::take(&mut inner.timers)
                    .into_iter()
                    .partition(|t| t.due <= now);
            inner.timers = pending;
            due.sort_by_key(|t| (t.due, t.id));
            due
        };
        for timer in due {
            (timer.task)(self);
        }
    }

    fn run_frame(&self, now: Duration) {
        let callbacks = {
            let mut inner = self.lock();
            inner.next_frame = now + inner.config.frame_interval;
            inner.animations.prune(now);
            std::mem::take(&mut inner.frames)
        };
        for callback in callbacks {
            callback(self, now);
        }
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Host for Document {
    fn query_all(&self, selector: &str) -> Vec<NodeId> {
        match self.try_query_all(selector) {
            Ok(nodes) => nodes,
            Err(e) => {
                warn!("{e}");
                Vec::new()
            }
        }
    }

    fn query_within_all(&self, root: NodeId, selector: &str) -> Vec<NodeId> {
        match Selector::parse(selector) {
            Ok(selector) => self.lock().query_within(root, &selector),
            Err(e) => {
                warn!("{e}");
                Vec::new()
            }
        }
    }

    fn by_id(&self, id: &str) -> Option<NodeId> {
        let inner = self.lock();
        let html = inner.html;
        inner
            .descendants(html)
            .into_iter()
            .find(|n| inner.node(*n).and_then(|n| n.id.as_deref()) == Some(id))
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.lock().node(node).and_then(|n| n.parent)
    }

    fn matches(&self, node: NodeId, selector: &str) -> bool {
        match Selector::parse(selector) {
            Ok(selector) => self.lock().node(node).is_some_and(|n| selector.matches(n)),
            Err(e) => {
                warn!("{e}");
                false
            }
        }
    }

    fn window(&self) -> NodeId {
        self.lock().window
    }

    fn document_element(&self) -> NodeId {
        self.lock().html
    }

    fn body(&self) -> NodeId {
        self.lock().body
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<String> {
        self.lock()
            .node(node)
            .and_then(|n| n.attributes.get(name).cloned())
    }

    fn text(&self, node: NodeId) -> String {
        self.lock()
            .node(node)
            .map(|n| n.text.clone())
            .unwrap_or_default()
    }

    fn value(&self, node: NodeId) -> String {
        self.lock()
            .node(node)
            .map(|n| n.value.clone())
            .unwrap_or_default()
    }

    fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.lock().node(node).is_some_and(|n| n.has_class(class))
    }

    fn measure(&self, node: NodeId) -> Metrics {
        self.lock().measure(node)
    }

    fn style(&self, node: NodeId, property: &StyleProperty) -> Option<StyleValue> {
        self.lock()
            .node(node)
            .and_then(|n| n.style.get(property).cloned())
    }

    fn set_style(&self, node: NodeId, property: StyleProperty, value: StyleValue) {
        let mut inner = self.lock();
        let Some(config) = inner.node(node).map(|n| n.transitions.get(&property)) else {
            warn!("set_style on unknown {node}");
            return;
        };
        let now = inner.now;
        let from = inner.current_numeric(node, &property);

        let animated = match (config, from, value.as_f32()) {
            (Some(config), Some(from), Some(to)) => {
                inner
                    .animations
                    .start(node, property.clone(), from, to, config, now)
            }
            _ => {
                inner.animations.cancel(node, &property);
                false
            }
        };

        if let Some(target) = inner.node_mut(node) {
            target.style.insert(property.clone(), value.clone());
        }
        inner.writes.push(StyleWrite {
            node,
            property,
            value,
            at: now,
            animated,
        });
    }

    fn set_transitions(&self, node: NodeId, transitions: Transitions) {
        if let Some(target) = self.lock().node_mut(node) {
            target.transitions = transitions;
        }
    }

    fn set_class(&self, node: NodeId, class: &str, on: bool) {
        if let Some(target) = self.lock().node_mut(node) {
            target.set_class(class, on);
        }
    }

    fn set_text(&self, node: NodeId, text: &str) {
        if let Some(target) = self.lock().node_mut(node) {
            target.text = text.to_string();
        }
    }

    fn set_value(&self, node: NodeId, value: &str) {
        if let Some(target) = self.lock().node_mut(node) {
            target.value = value.to_string();
        }
    }

    fn listen(&self, node: NodeId, kind: EventKind, listener: Listener) {
        self.lock()
            .listeners
            .entry((node, kind))
            .or_default()
            .push(listener);
    }

    fn defer(&self, task: Task) {
        self.lock().deferred.push_back(task);
    }

    fn set_timeout(&self, delay: Duration, task: Task) -> TimerId {
        let mut inner = self.lock();
        let id = TimerId(inner.next_id());
        let due = inner.now + delay;
        inner.timers.push(Timer { id, due, task });
        id
    }

    fn clear_timeout(&self, id: TimerId) {
        self.lock().timers.retain(|t| t.id != id);
    }

    fn request_frame(&self, callback: FrameCallback) {
        self.lock().frames.push(callback);
    }

    fn observe_intersection(&self, node: NodeId, threshold: f32, listener: Listener) -> ObserverId {
        let mut inner = self.lock();
        let id = ObserverId(inner.next_id());
        inner.intersections.push(IntersectionObserver {
            id,
            node,
            threshold,
            listener,
            intersecting: false,
        });
        inner.pending_intersections.push(id);
        id
    }

    fn observe_resize(&self, node: NodeId, listener: Listener) -> ObserverId {
        let mut inner = self.lock();
        let id = ObserverId(inner.next_id());
        let size = inner
            .node(node)
            .map(|n| (n.rect.width, n.rect.height))
            .unwrap_or_default();
        inner.resizes.push(ResizeObserver {
            id,
            node,
            listener,
            size,
        });
        id
    }

    fn unobserve(&self, id: ObserverId) {
        let mut inner = self.lock();
        inner.intersections.retain(|o| o.id != id);
        inner.resizes.retain(|o| o.id != id);
        inner.pending_intersections.retain(|o| *o != id);
    }
}
