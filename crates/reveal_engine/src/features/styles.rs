use ego_tree::NodeId;
use engine_logging::{engine_debug, engine_warn};
use reveal_core::{stylesheet, RevealConfig, STYLE_MARKER_ATTR, STYLE_MARKER_VERSION};

use crate::dom::{Dom, ElementData};
use crate::matcher::Predicate;

/// Appends the reveal stylesheet to `<head>` unless a marked one is already there.
/// Returns the new `<style>` element.
pub fn inject_styles(dom: &mut Dom, config: &RevealConfig) -> Option<NodeId> {
    if let Some(existing) = injected_style(dom) {
        engine_debug!("stylesheet already present ({})", dom.describe(existing));
        return None;
    }
    let Some(head) = dom.first_element_named("head") else {
        engine_warn!("document has no <head>; stylesheet not injected");
        return None;
    };
    let style = ElementData::new("style").with_attr(STYLE_MARKER_ATTR, STYLE_MARKER_VERSION);
    let style = dom.append_element(head, style)?;
    dom.set_text(style, &stylesheet(config));
    engine_debug!("stylesheet injected");
    Some(style)
}

pub fn injected_style(dom: &Dom) -> Option<NodeId> {
    dom.elements().into_iter().find(|&id| {
        Predicate::Tag("style").matches_node(dom, id) && dom.attr(id, STYLE_MARKER_ATTR).is_some()
    })
}
