pub mod animation;
pub mod document;
pub mod element;
pub mod error;
pub mod event;
pub mod host;
pub mod selector;
pub mod style;
pub mod transitions;
pub mod types;

pub use document::{Document, DocumentConfig, NodeSnapshot, StyleWrite};
pub use element::{Element, NodeId};
pub use error::DocumentError;
pub use event::{Event, EventKind};
pub use host::{FrameCallback, Host, Listener, Metrics, ObserverId, Task, TimerId};
pub use selector::Selector;
pub use style::{StyleProperty, StyleValue, Transform};
pub use transitions::{Easing, TransitionConfig, Transitions};
pub use types::*;
