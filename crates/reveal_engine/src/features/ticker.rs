use ego_tree::NodeId;
use engine_logging::{engine_debug, engine_info};
use reveal_core::{class, is_activity_date};

use crate::dom::Dom;
use crate::matcher::{ActivityMatcher, RoleMatcher, ACTIVITY_DATE_CANDIDATE};

/// Handle to a running ticker. Cancelling stops the scroll animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickerHandle {
    wrapper: NodeId,
}

impl TickerHandle {
    pub fn wrapper(&self) -> NodeId {
        self.wrapper
    }

    /// Returns false if the animation class was already gone.
    pub fn cancel(self, dom: &mut Dom) -> bool {
        dom.remove_class(self.wrapper, class::TICKER)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickerOutcome {
    pub handle: Option<TickerHandle>,
    pub dates_hidden: usize,
}

/// Turns the activity list into a looping ticker and hides its date labels.
pub fn build_ticker(dom: &mut Dom) -> TickerOutcome {
    let Some(activity) = ActivityMatcher.find(dom) else {
        engine_debug!("no activity heading; ticker skipped");
        return TickerOutcome::default();
    };

    let handle = match activity.items {
        Some(items) if dom.has_class(items, class::TICKER) => {
            engine_debug!("activity list already loops");
            None
        }
        Some(items) => {
            dom.update_element(items, |el| el.set_style_property("transform", ""));
            let copied = dom.duplicate_children(items);
            dom.add_class(items, class::TICKER);
            engine_info!("activity ticker built from {copied} items");
            Some(TickerHandle { wrapper: items })
        }
        None => {
            engine_debug!("activity widget has an unexpected shape; ticker skipped");
            None
        }
    };

    TickerOutcome {
        handle,
        dates_hidden: hide_activity_dates(dom),
    }
}

fn hide_activity_dates(dom: &mut Dom) -> usize {
    let dates: Vec<NodeId> = ACTIVITY_DATE_CANDIDATE
        .select_all(dom)
        .into_iter()
        .filter(|&id| is_activity_date(&dom.text_content(id)))
        .collect();
    dates
        .into_iter()
        .filter(|&id| dom.add_class(id, class::DATE_HIDDEN))
        .count()
}
