use std::collections::BTreeMap;

use crate::view_model::SchedulerView;
use crate::RevealConfig;

/// Host-assigned handle for a classified element.
pub type TargetId = usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Role {
    HeroChild,
    Section,
    Card,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::HeroChild => "hero",
            Role::Section => "section",
            Role::Card => "card",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Hidden,
    Visible,
}

/// Observer registration of a target. `Fired` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Observation {
    Unobserved,
    Pending,
    Fired,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevealTarget {
    pub id: TargetId,
    pub role: Role,
    pub visibility: Visibility,
    pub observation: Observation,
    /// Stagger applied on top of the trigger, once known.
    pub delay_ms: Option<u64>,
}

impl RevealTarget {
    pub fn is_visible(&self) -> bool {
        self.visibility == Visibility::Visible
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SchedulerState {
    config: RevealConfig,
    targets: BTreeMap<TargetId, RevealTarget>,
    dirty: bool,
}

impl Default for SchedulerState {
    fn default() -> Self {
        Self::new(RevealConfig::DEFAULT)
    }
}

impl SchedulerState {
    pub fn new(config: RevealConfig) -> Self {
        Self {
            config,
            targets: BTreeMap::new(),
            dirty: false,
        }
    }

    pub fn config(&self) -> &RevealConfig {
        &self.config
    }

    pub fn target(&self, id: TargetId) -> Option<&RevealTarget> {
        self.targets.get(&id)
    }

    pub fn targets(&self) -> impl Iterator<Item = &RevealTarget> {
        self.targets.values()
    }

    pub fn view(&self) -> SchedulerView {
        let mut view = SchedulerView {
            dirty: self.dirty,
            ..SchedulerView::default()
        };
        for target in self.targets.values() {
            view.tracked += 1;
            match target.visibility {
                Visibility::Hidden => view.hidden += 1,
                Visibility::Visible => view.visible += 1,
            }
            if target.observation == Observation::Pending {
                view.observing += 1;
            }
        }
        view
    }

    /// Returns whether anything changed since the last call and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// Starts tracking `id`; returns false if it is already tracked under any role.
    pub(crate) fn track(&mut self, id: TargetId, role: Role, observation: Observation) -> bool {
        if self.targets.contains_key(&id) {
            return false;
        }
        self.targets.insert(
            id,
            RevealTarget {
                id,
                role,
                visibility: Visibility::Hidden,
                observation,
                delay_ms: None,
            },
        );
        self.dirty = true;
        true
    }

    pub(crate) fn target_mut(&mut self, id: TargetId) -> Option<&mut RevealTarget> {
        self.targets.get_mut(&id)
    }

    /// Flips a hidden target to visible. Returns false if it was not hidden.
    pub(crate) fn reveal(&mut self, id: TargetId) -> bool {
        match self.targets.get_mut(&id) {
            Some(target) if target.visibility == Visibility::Hidden => {
                target.visibility = Visibility::Visible;
                self.dirty = true;
                true
            }
            _ => false,
        }
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}
