use crate::{Role, TargetId};

/// One observed target's intersection state as delivered by an observer callback.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntersectionEntry {
    pub target: TargetId,
    /// Visible fraction of the target inside the (margin adjusted) viewport.
    pub ratio: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// Classification pass finished; lists are in document order.
    Classified {
        hero: Vec<TargetId>,
        sections: Vec<TargetId>,
        cards: Vec<TargetId>,
    },
    /// One observer callback invocation for the given tier.
    Intersections {
        role: Role,
        entries: Vec<IntersectionEntry>,
    },
    /// A scheduled reveal timer elapsed.
    RevealDue { target: TargetId },
    /// Makes every still hidden target visible and drops pending observations.
    /// Used when the page is written out with no script to finish the job.
    RevealAll,
}
