//! Reveal core: pure scheduler state machine and the data the page runtime renders.
mod activity;
mod config;
mod counter;
mod effect;
mod msg;
mod panel;
mod state;
mod styles;
mod update;
mod view_model;

pub use activity::{is_activity_date, is_activity_heading, ACTIVITY_HEADINGS};
pub use config::RevealConfig;
pub use counter::{format_currency, CounterState, PROFIT_LABEL};
pub use effect::{class, Effect};
pub use msg::{IntersectionEntry, Msg};
pub use panel::{escape_code, render_panel_html, TabPanelCatalog, TabPanelSpec};
pub use state::{Observation, RevealTarget, Role, SchedulerState, TargetId, Visibility};
pub use styles::{stylesheet, STYLE_MARKER_ATTR, STYLE_MARKER_VERSION};
pub use update::update;
pub use view_model::SchedulerView;
