use crate::{Role, TargetId};

/// Class names shared between the scheduler, the runtime and the stylesheet.
pub mod class {
    pub const ANIMATE: &str = "polar-animate";
    pub const ANIMATE_SCALE: &str = "polar-animate-scale";
    pub const VISIBLE: &str = "visible";
    pub const TICKER: &str = "activity-ticker-wrapper";
    pub const DATE_HIDDEN: &str = "activity-date-hidden";
    pub const ICON_WRAPPER: &str = "app-icon-wrapper";
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    AddClass {
        target: TargetId,
        class: &'static str,
    },
    Observe {
        role: Role,
        target: TargetId,
    },
    Unobserve {
        role: Role,
        target: TargetId,
    },
    /// Deliver `Msg::RevealDue` for `target` after `delay_ms`.
    ScheduleReveal { target: TargetId, delay_ms: u64 },
}
