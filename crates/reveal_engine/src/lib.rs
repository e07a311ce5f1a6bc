//! Reveal engine: headless page runtime and the DOM work behind each enhancement.
mod catalog;
mod classify;
mod decode;
mod dom;
mod features;
mod layout;
mod matcher;
mod observer;
mod persist;
mod runtime;
mod serialize;
mod timer;
mod types;

pub use catalog::{catalog_to_ron, load_catalog, parse_catalog, CatalogError};
pub use classify::{classify, Classification};
pub use decode::{decode_page, DecodeError, DecodedPage};
pub use dom::{Dom, DomNode, ElementData};
pub use features::counter::{find_counters, LiveCounter};
pub use features::styles::{inject_styles, injected_style};
pub use features::tabs::{synthesize_panels, TabController};
pub use features::ticker::{build_ticker, TickerHandle, TickerOutcome};
pub use features::touchups::{fix_hydration_opacity, wrap_app_icon};
pub use layout::{FixedLayout, FlowLayout, Layout, LayoutSnapshot, Rect, Viewport};
pub use matcher::{
    ActivityMatch, ActivityMatcher, AppIconMatcher, CardMatcher, HeroMatch, HeroMatcher,
    PanelMatcher, Predicate, ProfitMatcher, RoleMatcher, SectionMatcher,
};
pub use observer::{intersection_ratio, IntersectionObserver, ObserverOptions};
pub use persist::{ensure_output_dir, AtomicFileWriter, PersistError};
pub use runtime::{PageRuntime, RuntimeOptions};
pub use timer::{TimerHandle, TimerQueue};
pub use types::{InitReport, RevealEvent};

pub use ego_tree::NodeId;
