use ego_tree::NodeId;
use reveal_core::Role;

use crate::features::ticker::TickerHandle;
use crate::timer::TimerHandle;

/// One element turning visible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevealEvent {
    pub at_ms: u64,
    pub node: NodeId,
    pub role: Role,
    pub label: String,
}

/// What `init` found and set up.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InitReport {
    pub styles_injected: bool,
    pub hydration_fixed: usize,
    pub icon_wrapped: bool,
    pub hero: usize,
    pub sections: usize,
    pub cards: usize,
    pub ticker: Option<TickerHandle>,
    pub dates_hidden: usize,
    /// One interval per live counter, never cancelled by the runtime itself.
    pub counters: Vec<TimerHandle>,
    pub panels_filled: usize,
    pub tabs_wired: usize,
}
