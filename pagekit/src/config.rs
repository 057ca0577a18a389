//! Page configuration.
//!
//! Every section defaults to the values the page ships with, so an empty
//! TOML document is a valid configuration.

use std::path::Path;

use serde::Deserialize;
use webdom::Selector;

use crate::counter::CounterConfig;
use crate::disclosure::DisclosureConfig;
use crate::error::PageError;
use crate::header::HeaderConfig;
use crate::hover::HoverConfig;
use crate::map::MapConfig;
use crate::modal::ModalConfig;
use crate::nav::NavConfig;
use crate::phone::{PhoneConfig, PhoneMask};
use crate::photo_stack::PhotoStackConfig;
use crate::proximity::ProximityConfig;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    pub disclosure: DisclosureConfig,
    pub counters: CounterConfig,
    pub proximity: ProximityConfig,
    pub photo_stack: PhotoStackConfig,
    pub hover: HoverConfig,
    pub phone: PhoneConfig,
    pub map: MapConfig,
    pub modal: ModalConfig,
    pub header: HeaderConfig,
    pub nav: NavConfig,
}

impl PageConfig {
    pub fn from_toml_str(source: &str) -> Result<Self, PageError> {
        let config: PageConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, PageError> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    pub fn with_disclosure(mut self, disclosure: DisclosureConfig) -> Self {
        self.disclosure = disclosure;
        self
    }

    pub fn with_map(mut self, map: MapConfig) -> Self {
        self.map = map;
        self
    }

    /// Check selectors, the phone mask and numeric ranges.
    pub fn validate(&self) -> Result<(), PageError> {
        let mut selectors: Vec<&str> = self.disclosure.selectors().to_vec();
        selectors.extend([
            self.counters.section_selector.as_str(),
            self.counters.number_selector.as_str(),
            self.proximity.grid_selector.as_str(),
            self.proximity.tag_selector.as_str(),
            self.photo_stack.wrapper_selector.as_str(),
            self.phone.input_selector.as_str(),
            self.map.container_selector.as_str(),
            self.map.zoom_in_selector.as_str(),
            self.map.zoom_out_selector.as_str(),
            self.header.header_selector.as_str(),
            self.nav.burger_selector.as_str(),
            self.nav.menu_selector.as_str(),
            self.nav.link_selector.as_str(),
        ]);
        for binding in &self.hover.bindings {
            selectors.push(&binding.item_selector);
            selectors.extend(binding.targets.iter().map(String::as_str));
        }
        for selector in selectors {
            Selector::parse(selector)?;
        }
        for attribute in [&self.modal.trigger_attribute, &self.modal.close_attribute] {
            Selector::parse(&format!("[{attribute}]"))?;
        }

        PhoneMask::parse(&self.phone.mask, self.phone.placeholder)?;

        if self.map.min_zoom > self.map.max_zoom {
            return Err(PageError::Invalid(format!(
                "map.min_zoom ({}) exceeds map.max_zoom ({})",
                self.map.min_zoom, self.map.max_zoom
            )));
        }
        if !(0.0..=1.0).contains(&self.counters.threshold) {
            return Err(PageError::Invalid(format!(
                "counters.threshold ({}) must be within 0..=1",
                self.counters.threshold
            )));
        }
        if self.proximity.max_distance <= 0.0 {
            return Err(PageError::Invalid(
                "proximity.max_distance must be positive".into(),
            ));
        }
        Ok(())
    }
}
