//! Browser binding: finds the trackable elements, registers them with one
//! shared [`ItemToggler`] and routes their clicks into it.
use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlElement, window};

use super::{ItemSurface, ItemToggler, TrackerConfig, parse_opacity};
use crate::error::TrackerError;

/// Items are keyed by their position in the class collection at setup time.
type SharedToggler = Rc<RefCell<ItemToggler<usize>>>;

impl ItemSurface for HtmlElement {
    fn opacity(&self) -> Result<f64, TrackerError> {
        let win = window().ok_or_else(|| TrackerError::Dom("no window".into()))?;
        let style = win
            .get_computed_style(self)
            .map_err(TrackerError::dom)?
            .ok_or_else(|| TrackerError::Dom("no computed style".into()))?;
        let raw = style
            .get_property_value("opacity")
            .map_err(TrackerError::dom)?;
        parse_opacity(&raw)
    }

    fn set_opacity(&mut self, opacity: f64) -> Result<(), TrackerError> {
        self.style()
            .set_property("opacity", &opacity.to_string())
            .map_err(TrackerError::dom)
    }

    fn set_source(&mut self, source: &str) -> Result<(), TrackerError> {
        self.set_attribute("src", source).map_err(TrackerError::dom)
    }
}

/// Registers every element carrying `config.item_class` and binds its click handler.
///
/// Each element gets a single `onclick` handler, so running setup again replaces
/// the previous handlers (and their state) instead of stacking them.
pub fn start_tracker(config: TrackerConfig) -> Result<(), JsValue> {
    let win = window().ok_or_else(|| JsValue::from_str("no window"))?;
    let doc = win
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    let elements = trackable_elements(&doc, &config.item_class);
    let toggler: SharedToggler = Rc::new(RefCell::new(ItemToggler::new()));

    for (key, element) in elements.iter().enumerate() {
        toggler.borrow_mut().register(key);
        bind_click(key, element, toggler.clone());
    }

    {
        let mut t = toggler.borrow_mut();
        for item in &config.progressive {
            let Some(target) = doc.get_element_by_id(&item.id) else {
                log::warn!("progressive item '{}' not found in document", item.id);
                continue;
            };
            let Some(key) = elements.iter().position(|e| same_element(e, &target)) else {
                log::warn!(
                    "progressive item '{}' lacks class '{}'; skipped",
                    item.id,
                    config.item_class
                );
                continue;
            };
            t.set_variants(&key, item.variants.clone())?;
        }
        log::info!(
            "tracking {} items ({} progressive)",
            t.len(),
            t.progressive_count()
        );
    }
    Ok(())
}

fn trackable_elements(doc: &Document, class: &str) -> Vec<HtmlElement> {
    let collection = doc.get_elements_by_class_name(class);
    (0..collection.length())
        .filter_map(|i| collection.item(i))
        .filter_map(|el| match el.dyn_into::<HtmlElement>() {
            Ok(html) => Some(html),
            Err(other) => {
                log::warn!("skipping non-html element <{}>", other.tag_name());
                None
            }
        })
        .collect()
}

fn same_element(a: &HtmlElement, b: &Element) -> bool {
    let a: &JsValue = a.as_ref();
    let b: &JsValue = b.as_ref();
    a == b
}

fn bind_click(key: usize, element: &HtmlElement, toggler: SharedToggler) {
    let mut surface = element.clone();
    let closure = Closure::wrap(Box::new(move |_evt: web_sys::MouseEvent| {
        if let Err(err) = toggler.borrow_mut().click(&key, &mut surface) {
            log::error!("click on item {key} failed: {err}");
        }
    }) as Box<dyn FnMut(_)>);
    element.set_onclick(Some(closure.as_ref().unchecked_ref()));
    closure.forget();
}
