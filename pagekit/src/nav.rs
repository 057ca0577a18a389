//! Burger-toggled navigation menu for narrow viewports.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use log::{debug, info};
use serde::Deserialize;
use webdom::{Event, EventKind, Host, NodeId};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct NavConfig {
    pub burger_selector: String,
    pub menu_selector: String,
    /// Links inside the menu that close it.
    pub link_selector: String,
    pub open_class: String,
    /// Set on the body while the menu is open.
    pub body_class: String,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            burger_selector: ".header__burger".into(),
            menu_selector: ".header__nav".into(),
            link_selector: "a".into(),
            open_class: "open".into(),
            body_class: "menu-open".into(),
        }
    }
}

#[derive(Debug)]
pub struct MobileNav {
    burger: NodeId,
    menu: NodeId,
    open: AtomicBool,
    config: NavConfig,
}

impl MobileNav {
    pub fn is_open(&self) -> bool {
        self.open.load(Ordering::SeqCst)
    }

    pub fn set_open(&self, host: &dyn Host, open: bool) {
        self.open.store(open, Ordering::SeqCst);
        host.set_class(self.menu, &self.config.open_class, open);
        host.set_class(self.burger, &self.config.open_class, open);
        host.set_class(host.body(), &self.config.body_class, open);
    }

    pub fn toggle(&self, host: &dyn Host) {
        self.set_open(host, !self.is_open());
    }
}

pub fn init(host: &dyn Host, config: &NavConfig) -> Option<Arc<MobileNav>> {
    let (Some(burger), Some(menu)) = (
        host.query(&config.burger_selector),
        host.query(&config.menu_selector),
    ) else {
        debug!("nav: no burger or menu");
        return None;
    };

    let nav = Arc::new(MobileNav {
        burger,
        menu,
        open: AtomicBool::new(false),
        config: config.clone(),
    });

    let target = Arc::clone(&nav);
    host.listen(
        burger,
        EventKind::Click,
        Arc::new(move |host: &dyn Host, _: &Event| target.toggle(host)),
    );

    for link in host.query_within_all(menu, &config.link_selector) {
        let target = Arc::clone(&nav);
        host.listen(
            link,
            EventKind::Click,
            Arc::new(move |host: &dyn Host, _: &Event| {
                if target.is_open() {
                    target.set_open(host, false);
                }
            }),
        );
    }

    info!("nav: menu {menu}");
    Some(nav)
}
