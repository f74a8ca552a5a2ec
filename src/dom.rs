use crate::constants::{DEPTH_LAYER_SELECTOR, INLINE_LAYER_HANDLES};
use smallvec::SmallVec;
use tilt_core::{parse_depth, SurfaceBounds, TiltConfig, ATTR_DEPTH};
use wasm_bindgen::JsCast;
use web_sys as web;

/// Depth layer elements, in the same order as `TiltConfig::layers`.
pub type LayerHandles = SmallVec<[web::HtmlElement; INLINE_LAYER_HANDLES]>;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

/// Geometry of `el` right now. `None` once the element left the document.
#[inline]
pub fn surface_bounds(el: &web::HtmlElement) -> Option<SurfaceBounds> {
    if !el.is_connected() {
        return None;
    }
    let rect = el.get_bounding_client_rect();
    Some(SurfaceBounds::new(
        rect.left() as f32,
        rect.top() as f32,
        rect.width() as f32,
        rect.height() as f32,
    ))
}

pub fn query_elements(
    document: &web::Document,
    selector: &str,
) -> anyhow::Result<Vec<web::HtmlElement>> {
    let list = document
        .query_selector_all(selector)
        .map_err(|e| anyhow::anyhow!("bad selector {:?}: {:?}", selector, e))?;
    Ok((0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|node| node.dyn_into::<web::HtmlElement>().ok())
        .collect())
}

/// Read a card's configuration from its `data-tilt-*` attributes and collect
/// its depth layers. Invalid card attributes fall back to the defaults;
/// invalid layers are skipped.
pub fn read_card_config(el: &web::HtmlElement) -> (TiltConfig, LayerHandles) {
    let mut config = match TiltConfig::from_attributes(|name| el.get_attribute(name)) {
        Ok(c) => c,
        Err(e) => {
            log::warn!("[config] {}: {}; using defaults", describe(el), e);
            TiltConfig::default()
        }
    };

    let mut handles = LayerHandles::new();
    let list = match el.query_selector_all(DEPTH_LAYER_SELECTOR) {
        Ok(l) => l,
        Err(e) => {
            log::warn!("[config] {}: depth query failed: {:?}", describe(el), e);
            return (config, handles);
        }
    };
    for i in 0..list.length() {
        let Some(layer_el) = list
            .get(i)
            .and_then(|n| n.dyn_into::<web::HtmlElement>().ok())
        else {
            continue;
        };
        let raw = layer_el.get_attribute(ATTR_DEPTH).unwrap_or_default();
        match parse_depth(&raw) {
            Ok(layer) => {
                config.layers.push(layer);
                handles.push(layer_el);
            }
            Err(e) => log::warn!("[config] {}: depth layer skipped: {}", describe(el), e),
        }
    }
    (config, handles)
}

#[inline]
pub fn set_style(el: &web::HtmlElement, property: &str, value: &str) {
    if let Err(e) = el.style().set_property(property, value) {
        log::debug!("[style] set {} failed: {:?}", property, e);
    }
}

#[inline]
pub fn clear_style(el: &web::HtmlElement, property: &str) {
    _ = el.style().remove_property(property);
}

fn describe(el: &web::HtmlElement) -> String {
    let id = el.id();
    if id.is_empty() {
        el.tag_name().to_ascii_lowercase()
    } else {
        format!("#{}", id)
    }
}
