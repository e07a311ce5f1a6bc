use ego_tree::NodeId;
use reveal_core::CounterState;

use crate::dom::Dom;
use crate::matcher::{ProfitMatcher, RoleMatcher};

/// A profit display that drifts around its parsed baseline.
#[derive(Debug, Clone, PartialEq)]
pub struct LiveCounter {
    node: NodeId,
    state: CounterState,
}

impl LiveCounter {
    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn state(&self) -> &CounterState {
        &self.state
    }

    /// Moves the value by `delta` and writes it back into the element.
    pub fn tick(&mut self, dom: &mut Dom, delta: f64) -> String {
        let text = self.state.apply_jitter(delta);
        dom.set_text(self.node, &text);
        text
    }
}

pub fn find_counters(dom: &Dom) -> Vec<LiveCounter> {
    ProfitMatcher
        .find(dom)
        .unwrap_or_default()
        .into_iter()
        .map(|(node, state)| LiveCounter { node, state })
        .collect()
}
