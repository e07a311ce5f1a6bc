//! Geometry providers for intersection checks.
//!
//! There is no CSS engine here: a [`Layout`] either reports rectangles it was
//! given up front, or estimates a vertical block flow from the tree.

use std::collections::HashMap;

use ego_tree::NodeId;

use crate::dom::{Dom, DomNode};

/// Vertical extent of an element in document coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub top: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(top: f64, height: f64) -> Self {
        Self {
            top,
            height: height.max(0.0),
        }
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub height: f64,
    pub scroll_y: f64,
}

impl Viewport {
    pub fn new(height: f64) -> Self {
        Self {
            height,
            scroll_y: 0.0,
        }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(800.0)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayoutSnapshot {
    rects: HashMap<NodeId, Rect>,
    document_height: f64,
}

impl LayoutSnapshot {
    pub fn get(&self, id: NodeId) -> Option<Rect> {
        self.rects.get(&id).copied()
    }

    pub fn document_height(&self) -> f64 {
        self.document_height
    }

    fn insert(&mut self, id: NodeId, rect: Rect) {
        self.document_height = self.document_height.max(rect.bottom());
        self.rects.insert(id, rect);
    }
}

pub trait Layout {
    fn measure(&self, dom: &Dom) -> LayoutSnapshot;
}

/// Rectangles assigned by element `id` attribute. Unlisted elements have no box.
#[derive(Debug, Clone, Default)]
pub struct FixedLayout {
    rects: HashMap<String, Rect>,
}

impl FixedLayout {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_rect(mut self, element_id: impl Into<String>, top: f64, height: f64) -> Self {
        self.rects.insert(element_id.into(), Rect::new(top, height));
        self
    }
}

impl Layout for FixedLayout {
    fn measure(&self, dom: &Dom) -> LayoutSnapshot {
        let mut snapshot = LayoutSnapshot::default();
        for id in dom.elements() {
            let rect = dom
                .attr(id, "id")
                .and_then(|element_id| self.rects.get(element_id));
            if let Some(rect) = rect {
                snapshot.insert(id, *rect);
            }
        }
        snapshot
    }
}

const UNRENDERED: &[&str] = &["head", "script", "style", "template", "noscript"];

/// Naive block flow: every element stacks below the previous one, each
/// non-blank text run takes one line and images take `image_height`.
#[derive(Debug, Clone, Copy)]
pub struct FlowLayout {
    pub line_height: f64,
    pub image_height: f64,
}

impl Default for FlowLayout {
    fn default() -> Self {
        Self {
            line_height: 24.0,
            image_height: 96.0,
        }
    }
}

impl Layout for FlowLayout {
    fn measure(&self, dom: &Dom) -> LayoutSnapshot {
        let mut snapshot = LayoutSnapshot::default();
        let mut cursor = 0.0;
        self.flow(dom, dom.root(), &mut cursor, &mut snapshot);
        snapshot
    }
}

impl FlowLayout {
    fn flow(&self, dom: &Dom, id: NodeId, cursor: &mut f64, snapshot: &mut LayoutSnapshot) {
        let Some(node) = dom.node(id) else {
            return;
        };
        match node.value() {
            DomNode::Text(text) => {
                if !text.trim().is_empty() {
                    *cursor += self.line_height;
                }
            }
            DomNode::Element(element) => {
                let top = *cursor;
                let rendered = !UNRENDERED.contains(&element.name())
                    && element.attr("hidden").is_none();
                if rendered {
                    if element.name() == "img" {
                        *cursor += self.image_height;
                    }
                    for child in node.children() {
                        self.flow(dom, child.id(), cursor, snapshot);
                    }
                }
                snapshot.insert(id, Rect::new(top, *cursor - top));
            }
            DomNode::Document => {
                for child in node.children() {
                    self.flow(dom, child.id(), cursor, snapshot);
                }
            }
            DomNode::Doctype(_) | DomNode::Comment(_) => {}
        }
    }
}
