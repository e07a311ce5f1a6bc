use ego_tree::NodeId;
use engine_logging::{engine_debug, engine_info};
use reveal_core::{render_panel_html, TabPanelCatalog};

use crate::dom::Dom;
use crate::matcher::{PanelMatcher, RoleMatcher, TAB, TAB_LIST};

/// Fills every catalogued panel that exists and is still empty.
/// Returns the number of panels filled.
pub fn synthesize_panels(dom: &mut Dom, catalog: &TabPanelCatalog) -> usize {
    let mut filled = 0;
    for (panel_id, spec) in catalog.iter() {
        let Some(panel) = (PanelMatcher { panel_id }).find(dom) else {
            continue;
        };
        if !dom.inner_html(panel).trim().is_empty() {
            engine_debug!("panel {panel_id} already has content");
            continue;
        }
        dom.set_inner_html(panel, &render_panel_html(spec));
        engine_info!("filled panel {panel_id} with \"{}\"", spec.title);
        filled += 1;
    }
    filled
}

/// Click routing for `[role="tab"]` elements present when it was wired.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TabController {
    tabs: Vec<NodeId>,
}

impl TabController {
    pub fn wire(dom: &Dom) -> Self {
        Self {
            tabs: TAB.select_all(dom),
        }
    }

    pub fn tabs(&self) -> &[NodeId] {
        &self.tabs
    }

    /// Dispatches a click on `target`, bubbling up to the nearest wired tab.
    /// Returns true if a tab was activated.
    pub fn handle_click(&self, dom: &mut Dom, target: NodeId) -> bool {
        let Some(tab) = self.wired_ancestor(dom, target) else {
            return false;
        };
        let Some(tablist) = dom.closest(tab, |el| TAB_LIST.matches(el)) else {
            engine_debug!("{} is outside any tablist", dom.describe(tab));
            return false;
        };

        let siblings: Vec<NodeId> = dom
            .descendant_elements(tablist)
            .into_iter()
            .filter(|&id| TAB.matches_node(dom, id))
            .collect();
        for sibling in siblings {
            dom.set_attr(sibling, "aria-selected", "false");
            dom.set_attr(sibling, "data-state", "inactive");
            if let Some(panel) = controlled_panel(dom, sibling) {
                dom.set_attr(panel, "hidden", "");
            }
        }

        dom.set_attr(tab, "aria-selected", "true");
        dom.set_attr(tab, "data-state", "active");
        if let Some(panel) = controlled_panel(dom, tab) {
            dom.remove_attr(panel, "hidden");
        }
        engine_debug!("activated {}", dom.describe(tab));
        true
    }

    fn wired_ancestor(&self, dom: &Dom, target: NodeId) -> Option<NodeId> {
        let mut current = Some(target);
        while let Some(candidate) = current {
            if self.tabs.contains(&candidate) {
                return Some(candidate);
            }
            current = dom.parent_element(candidate);
        }
        None
    }
}

fn controlled_panel(dom: &Dom, tab: NodeId) -> Option<NodeId> {
    let panel_id = dom.attr(tab, "aria-controls")?.to_string();
    dom.get_element_by_id(&panel_id)
}
