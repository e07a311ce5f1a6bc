use ego_tree::NodeId;

use crate::layout::{LayoutSnapshot, Viewport};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObserverOptions {
    pub threshold: f64,
    /// Pixels trimmed off the bottom of the viewport (a negative root margin).
    pub margin_bottom: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Observed {
    node: NodeId,
    /// Whether the last reported ratio met the threshold; `None` before the
    /// initial notification.
    last: Option<bool>,
}

/// Viewport intersection tracking for one group of elements sharing options.
///
/// Every newly observed element gets one initial notification; afterwards an
/// element is only reported when it crosses the threshold.
#[derive(Debug, Clone)]
pub struct IntersectionObserver {
    options: ObserverOptions,
    observed: Vec<Observed>,
}

impl IntersectionObserver {
    pub fn new(options: ObserverOptions) -> Self {
        Self {
            options,
            observed: Vec::new(),
        }
    }

    pub fn options(&self) -> ObserverOptions {
        self.options
    }

    pub fn observe(&mut self, node: NodeId) {
        if self.is_observing(node) {
            return;
        }
        self.observed.push(Observed { node, last: None });
    }

    pub fn unobserve(&mut self, node: NodeId) -> bool {
        let before = self.observed.len();
        self.observed.retain(|entry| entry.node != node);
        self.observed.len() != before
    }

    pub fn is_observing(&self, node: NodeId) -> bool {
        self.observed.iter().any(|entry| entry.node == node)
    }

    pub fn len(&self) -> usize {
        self.observed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observed.is_empty()
    }

    /// Entries due for delivery, in observation order.
    pub fn collect(&mut self, layout: &LayoutSnapshot, viewport: Viewport) -> Vec<(NodeId, f64)> {
        let options = self.options;
        let mut entries = Vec::new();
        for observed in &mut self.observed {
            let ratio = layout
                .get(observed.node)
                .map(|rect| intersection_ratio(rect.top, rect.height, viewport, options.margin_bottom))
                .unwrap_or(0.0);
            let meets = ratio > 0.0 && ratio >= options.threshold;
            if observed.last != Some(meets) {
                observed.last = Some(meets);
                entries.push((observed.node, ratio));
            }
        }
        entries
    }
}

/// Visible fraction of a box against the viewport shrunk by `margin_bottom`.
/// A zero-height box inside the root counts as fully visible.
pub fn intersection_ratio(top: f64, height: f64, viewport: Viewport, margin_bottom: f64) -> f64 {
    let root_top = viewport.scroll_y;
    let root_bottom = viewport.scroll_y + (viewport.height - margin_bottom).max(0.0);
    if height <= 0.0 {
        return if top >= root_top && top <= root_bottom && root_bottom > root_top {
            1.0
        } else {
            0.0
        };
    }
    let overlap = (top + height).min(root_bottom) - top.max(root_top);
    (overlap.max(0.0) / height).clamp(0.0, 1.0)
}
