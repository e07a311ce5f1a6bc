use crate::Role;

/// Compile-time tuning for every enhancement the runtime applies.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevealConfig {
    /// Length of the opacity/transform transition.
    pub duration_ms: u64,
    /// Offset multiplied by sibling (or batch) index.
    pub stagger_ms: u64,
    /// Visible fraction a section needs before it reveals.
    pub threshold: f64,
    /// Visible fraction a card needs before it reveals.
    pub card_threshold: f64,
    /// CSS timing function used by both transitions.
    pub easing: &'static str,
    /// Delay before the hero cascade starts, so the hidden state is painted first.
    pub hero_base_delay_ms: u64,
    /// Sections must clear the viewport bottom by this much before they count.
    pub section_margin_bottom_px: f64,
    /// One full ticker loop.
    pub ticker_period_s: u32,
    /// Interval between counter perturbations.
    pub counter_interval_ms: u64,
    /// Largest absolute change applied to the counter per tick.
    pub counter_jitter: f64,
}

impl RevealConfig {
    pub const DEFAULT: Self = Self {
        duration_ms: 600,
        stagger_ms: 100,
        threshold: 0.15,
        card_threshold: 0.1,
        easing: "cubic-bezier(0.22, 1, 0.36, 1)",
        hero_base_delay_ms: 50,
        section_margin_bottom_px: 50.0,
        ticker_period_s: 25,
        counter_interval_ms: 2_000,
        counter_jitter: 1.0,
    };

    /// Intersection ratio an observed target must reach to reveal.
    /// Hero children are time driven and always report 0.
    pub fn threshold_for(&self, role: Role) -> f64 {
        match role {
            Role::HeroChild => 0.0,
            Role::Section => self.threshold,
            Role::Card => self.card_threshold,
        }
    }

    /// Negative bottom root margin applied to a role's observer.
    pub fn margin_bottom_for(&self, role: Role) -> f64 {
        match role {
            Role::Section => self.section_margin_bottom_px,
            Role::HeroChild | Role::Card => 0.0,
        }
    }

    /// Time after the classification pass at which hero child `index` reveals.
    pub fn hero_delay_ms(&self, index: usize) -> u64 {
        self.hero_base_delay_ms + self.stagger_ms * index as u64
    }
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
