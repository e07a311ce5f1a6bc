//! Small fixes applied before classification.

use ego_tree::NodeId;
use engine_logging::engine_debug;
use reveal_core::class;

use crate::dom::{Dom, ElementData};
use crate::matcher::{AppIconMatcher, RoleMatcher};

/// Forces elements left at inline `opacity:0` by hydration back to visible.
pub fn fix_hydration_opacity(dom: &mut Dom) -> usize {
    let stuck: Vec<NodeId> = dom
        .elements()
        .into_iter()
        .filter(|&id| {
            dom.attr(id, "style")
                .is_some_and(|style| style.contains("opacity:0") || style.contains("opacity: 0"))
        })
        .collect();
    for &id in &stuck {
        dom.update_element(id, |el| {
            el.set_style_property("opacity", "1");
            el.set_style_property("transform", "translateY(0)");
        });
    }
    if !stuck.is_empty() {
        engine_debug!("reset inline opacity on {} elements", stuck.len());
    }
    stuck.len()
}

/// Wraps the app icon in a soft-edge shadow container. Returns the wrapper.
pub fn wrap_app_icon(dom: &mut Dom) -> Option<NodeId> {
    let icon = AppIconMatcher.find(dom)?;
    let wrapper = dom.wrap(icon, ElementData::new("div").with_attr("class", class::ICON_WRAPPER))?;
    engine_debug!("app icon wrapped");
    Some(wrapper)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hydration_fix_rewrites_both_spellings() {
        let mut dom = Dom::parse_document(
            "<html><body><div id=\"a\" style=\"opacity:0;transform:translateY(20px)\"></div>\
             <div id=\"b\" style=\"opacity: 0\"></div><div id=\"c\" style=\"opacity:0.5\"></div></body></html>",
        );
        // `opacity:0.5` contains the fragment too, matching the selector it stands in for.
        assert_eq!(fix_hydration_opacity(&mut dom), 3);
        let a = dom.get_element_by_id("a").unwrap();
        assert_eq!(dom.attr(a, "style"), Some("opacity: 1; transform: translateY(0);"));
    }

    #[test]
    fn icon_is_wrapped_once() {
        let mut dom = Dom::parse_document(
            "<html><body><p><img alt=\"App Icon\" src=\"icon.png\"></p></body></html>",
        );
        assert!(wrap_app_icon(&mut dom).is_some());
        assert!(wrap_app_icon(&mut dom).is_none());
        assert_eq!(dom.to_html().matches(class::ICON_WRAPPER).count(), 1);
    }
}
