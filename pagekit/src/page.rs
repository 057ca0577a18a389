use std::sync::Arc;

use log::info;
use webdom::Host;

use crate::config::PageConfig;
use crate::counter::{self, Counters};
use crate::disclosure::{self, DisclosureGroup};
use crate::error::PageError;
use crate::header::{self, HeaderHeight};
use crate::hover::{self, HoverItem};
use crate::map::{self, MapController, MapSurface};
use crate::modal::{self, ModalController};
use crate::nav::{self, MobileNav};
use crate::phone::{self, PhoneField};
use crate::photo_stack::{self, StackedPhoto};
use crate::proximity::{self, ProximityGrid};

/// Every behavior wired on a page.
///
/// Sections absent from the document are `None` or empty.
#[derive(Debug)]
pub struct Page {
    pub counters: Option<Counters>,
    pub proximity: Option<Arc<ProximityGrid>>,
    pub photos: Vec<Arc<StackedPhoto>>,
    pub hover: Vec<Arc<HoverItem>>,
    pub phones: Vec<Arc<PhoneField>>,
    pub map: Option<Arc<MapController>>,
    pub modal: Option<Arc<ModalController>>,
    pub header: Option<Arc<HeaderHeight>>,
    pub nav: Option<Arc<MobileNav>>,
    pub disclosures: Vec<Arc<DisclosureGroup>>,
}

impl Page {
    /// Validate `config` and initialize every behavior against `host`.
    pub fn init(
        host: &dyn Host,
        config: &PageConfig,
        map_surface: Arc<dyn MapSurface>,
    ) -> Result<Self, PageError> {
        config.validate()?;

        let page = Self {
            counters: counter::init(host, &config.counters),
            proximity: proximity::init(host, &config.proximity),
            photos: photo_stack::init(host, &config.photo_stack),
            hover: hover::init(host, &config.hover),
            phones: phone::init(host, &config.phone)?,
            map: map::init(host, &config.map, map_surface),
            modal: modal::init(host, &config.modal),
            header: header::init(host, &config.header),
            nav: nav::init(host, &config.nav),
            disclosures: disclosure::init(host, &config.disclosure),
        };

        info!("page initialized");
        Ok(page)
    }
}
