pub mod config;
pub mod counter;
pub mod disclosure;
pub mod error;
pub mod header;
pub mod hover;
pub mod map;
pub mod modal;
pub mod nav;
pub mod page;
pub mod phone;
pub mod photo_stack;
pub mod proximity;

pub use config::PageConfig;
pub use error::PageError;
pub use page::Page;

pub mod prelude {
    pub use crate::config::PageConfig;
    pub use crate::disclosure::{DisclosureConfig, DisclosureGroup, Panel, PanelError};
    pub use crate::error::PageError;
    pub use crate::map::{MapSurface, RecordingSurface};
    pub use crate::page::Page;

    pub use webdom::{Document, Element, Host, NodeId};
}
