use hairzone::config::{ControllerConfig, Selectors};
use hairzone::page::{PageInventory, ScrollOrigin};
use hairzone::reveal::{RevealKind, RevealTarget};
use wasm_bindgen::JsCast;

use crate::CONFIG_ATTR;

pub(super) fn js_err(what: &'static str) -> impl Fn(wasm_bindgen::JsValue) -> String {
    move |_| format!("{what} failed")
}

/// Where scroll offsets are read from.
#[derive(Clone)]
pub(super) enum ScrollSource {
    Container(web_sys::Element),
    Window(web_sys::Window),
}

impl ScrollSource {
    pub(super) fn offset(&self) -> f64 {
        match self {
            Self::Container(el) => f64::from(el.scroll_top()),
            Self::Window(w) => w.scroll_y().unwrap_or(0.0),
        }
    }

    pub(super) fn event_target(&self) -> &web_sys::EventTarget {
        match self {
            Self::Container(el) => el.as_ref(),
            Self::Window(w) => w.as_ref(),
        }
    }
}

/// Elements the controller's commands refer to, looked up once at bootstrap.
pub(super) struct PageDom {
    pub(super) window: web_sys::Window,
    pub(super) document: web_sys::Document,
    pub(super) selectors: Selectors,
    pub(super) container: Option<web_sys::Element>,
    pub(super) scroll_source: ScrollSource,
    pub(super) preloader: Option<web_sys::HtmlElement>,
    pub(super) floating_button: Option<web_sys::HtmlElement>,
    pub(super) hero_background: Option<web_sys::HtmlElement>,
    pub(super) reveal_on_scroll: Vec<web_sys::Element>,
    pub(super) service_cards: Vec<web_sys::Element>,
    pub(super) hero_fade_in: Vec<web_sys::HtmlElement>,
}

impl PageDom {
    pub(super) fn discover(window: web_sys::Window, cfg: &ControllerConfig) -> Result<Self, String> {
        let document = window.document().ok_or("no document".to_string())?;
        let sel = cfg.selectors.clone();

        let container = document
            .query_selector(&sel.app_container)
            .map_err(js_err("document: query_selector"))?;

        let scroll_source = match (ScrollOrigin::for_container(container.is_some()), &container) {
            (ScrollOrigin::Container, Some(el)) => ScrollSource::Container(el.clone()),
            _ => ScrollSource::Window(window.clone()),
        };

        Ok(Self {
            preloader: html_by_id(&document, &sel.preloader_id),
            floating_button: html_by_id(&document, &sel.floating_button_id),
            hero_background: html_by_id(&document, &sel.hero_background_id),
            reveal_on_scroll: query_all(&document, &sel.reveal_on_scroll),
            service_cards: query_all(&document, &sel.service_card),
            hero_fade_in: query_all(&document, &sel.hero_fade_in)
                .into_iter()
                .filter_map(|el| el.dyn_into::<web_sys::HtmlElement>().ok())
                .collect(),
            window,
            document,
            selectors: sel,
            container,
            scroll_source,
        })
    }

    pub(super) fn inventory(&self) -> PageInventory {
        PageInventory {
            has_app_container: self.container.is_some(),
            has_preloader: self.preloader.is_some(),
            has_floating_button: self.floating_button.is_some(),
            has_hero_background: self.hero_background.is_some(),
            reveal_on_scroll_count: self.reveal_on_scroll.len(),
            service_card_count: self.service_cards.len(),
            hero_fade_in_count: self.hero_fade_in.len(),
        }
    }

    pub(super) fn reveal_element(&self, target: RevealTarget) -> Option<web_sys::Element> {
        match target.kind {
            RevealKind::OnScroll => self.reveal_on_scroll.get(target.index).cloned(),
            RevealKind::ServiceCard => self.service_cards.get(target.index).cloned(),
            RevealKind::HeroFadeIn => self
                .hero_fade_in
                .get(target.index)
                .map(|el| el.clone().unchecked_into()),
        }
    }
}

/// Read the JSON override on the root container, falling back to defaults.
pub(super) fn load_config(document: &web_sys::Document) -> ControllerConfig {
    let defaults = ControllerConfig::default();
    let raw = document
        .query_selector(&defaults.selectors.app_container)
        .ok()
        .flatten()
        .and_then(|el| el.get_attribute(CONFIG_ATTR));
    let Some(raw) = raw else {
        return defaults;
    };
    match ControllerConfig::from_json(&raw) {
        Ok(cfg) => cfg,
        Err(e) => {
            web_sys::console::warn_1(&format!("{e}; using defaults").into());
            defaults
        }
    }
}

fn html_by_id(document: &web_sys::Document, id: &str) -> Option<web_sys::HtmlElement> {
    document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<web_sys::HtmlElement>().ok())
}

pub(super) fn query_all(document: &web_sys::Document, selector: &str) -> Vec<web_sys::Element> {
    let Ok(list) = document.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<web_sys::Element>().ok())
        .collect()
}

pub(super) fn set_style(el: &web_sys::HtmlElement, property: &str, value: &str) -> Result<(), String> {
    el.style()
        .set_property(property, value)
        .map_err(|_| format!("style: set {property} failed"))
}

/// Inline-style an element that may only be known as an `Element`.
pub(super) fn set_element_style(el: &web_sys::Element, property: &str, value: &str) -> Result<(), String> {
    match el.dyn_ref::<web_sys::HtmlElement>() {
        Some(html) => set_style(html, property, value),
        None => Ok(()),
    }
}
