//! Live "profit" counter: parsing, perturbation and rendering.
//!
//! Displays look like `$12.34` or `-$0.50`. Anything else is not a counter.

use std::sync::LazyLock;

use regex::Regex;

/// Whole-text shape of a counter display.
static DISPLAY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-?\$[0-9]+\.[0-9]{2}$").expect("counter display pattern compiles"));

/// Text of the label element that must directly precede a counter.
pub const PROFIT_LABEL: &str = "Profit";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CounterState {
    baseline: f64,
    current: f64,
}

impl CounterState {
    /// Parses a rendered display. Returns `None` unless the whole text is
    /// an optional `-`, a `$`, one or more digits, a `.` and exactly two digits.
    pub fn parse(text: &str) -> Option<Self> {
        if !DISPLAY_RE.is_match(text) {
            return None;
        }
        let negative = text.starts_with('-');
        let magnitude: f64 = text.trim_start_matches('-').trim_start_matches('$').parse().ok()?;
        let baseline = if negative { -magnitude } else { magnitude };
        Some(Self {
            baseline,
            current: baseline,
        })
    }

    pub fn baseline(&self) -> f64 {
        self.baseline
    }

    pub fn current(&self) -> f64 {
        self.current
    }

    /// Moves the live value by `delta` and returns the new display text.
    pub fn apply_jitter(&mut self, delta: f64) -> String {
        self.current += delta;
        self.render()
    }

    pub fn render(&self) -> String {
        format_currency(self.current)
    }
}

/// Two decimals, `$` prefix, leading `-` iff the value is negative.
pub fn format_currency(value: f64) -> String {
    let sign = if value < 0.0 { "-" } else { "" };
    format!("{sign}${:.2}", value.abs())
}
