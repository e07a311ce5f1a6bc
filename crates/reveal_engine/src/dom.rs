//! Mutable document tree the runtime enhances in place.
//!
//! Markup is parsed with `scraper` and copied into an `ego_tree` arena of
//! plain nodes so classes, attributes and children can be rewritten freely.

use ego_tree::{NodeId, NodeRef, Tree};
use html5ever::{ns, LocalName, QualName};
use scraper::node::Node;
use scraper::Html;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomNode {
    Document,
    Doctype(String),
    Comment(String),
    Text(String),
    Element(ElementData),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementData {
    name: QualName,
    /// Qualified so foreign attributes such as `xlink:href` survive serialization.
    attrs: Vec<(QualName, String)>,
}

impl ElementData {
    /// An HTML element with no attributes.
    pub fn new(name: &str) -> Self {
        Self {
            name: QualName::new(None, ns!(html), LocalName::from(name.to_ascii_lowercase())),
            attrs: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_attr(mut self, name: &str, value: &str) -> Self {
        self.set_attr(name, value);
        self
    }

    /// Local tag name, e.g. `div` or `use`.
    pub fn name(&self) -> &str {
        &self.name.local
    }

    pub fn qual_name(&self) -> &QualName {
        &self.name
    }

    pub fn attrs(&self) -> impl Iterator<Item = (&QualName, &str)> {
        self.attrs.iter().map(|(k, v)| (k, v.as_str()))
    }

    /// Looks up an attribute without a namespace, the way `getAttribute` does for HTML.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| is_plain_attr(k, name))
            .map(|(_, v)| v.as_str())
    }

    pub fn set_attr(&mut self, name: &str, value: &str) {
        match self.attrs.iter_mut().find(|(k, _)| is_plain_attr(k, name)) {
            Some((_, existing)) => *existing = value.to_string(),
            None => self.attrs.push((
                QualName::new(None, ns!(), LocalName::from(name)),
                value.to_string(),
            )),
        }
    }

    /// Returns true if the attribute was present.
    pub fn remove_attr(&mut self, name: &str) -> bool {
        let before = self.attrs.len();
        self.attrs.retain(|(k, _)| !is_plain_attr(k, name));
        self.attrs.len() != before
    }

    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.attr("class").unwrap_or_default().split_whitespace()
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes().any(|c| c == class)
    }

    /// Returns true if the class was added.
    pub fn add_class(&mut self, class: &str) -> bool {
        if self.has_class(class) {
            return false;
        }
        let joined = match self.attr("class").map(str::trim) {
            Some(existing) if !existing.is_empty() => format!("{existing} {class}"),
            _ => class.to_string(),
        };
        self.set_attr("class", &joined);
        true
    }

    /// Returns true if the class was present.
    pub fn remove_class(&mut self, class: &str) -> bool {
        if !self.has_class(class) {
            return false;
        }
        let kept: Vec<&str> = self.classes().filter(|c| *c != class).collect();
        let joined = kept.join(" ");
        self.set_attr("class", &joined);
        true
    }

    pub fn style_property(&self, property: &str) -> Option<String> {
        parse_style(self.attr("style").unwrap_or_default())
            .into_iter()
            .find(|(p, _)| p == property)
            .map(|(_, v)| v)
    }

    /// Writes one inline style property. An empty value removes it.
    pub fn set_style_property(&mut self, property: &str, value: &str) {
        let mut declarations = parse_style(self.attr("style").unwrap_or_default());
        declarations.retain(|(p, _)| p != property);
        if !value.is_empty() {
            declarations.push((property.to_string(), value.to_string()));
        }
        if declarations.is_empty() {
            self.remove_attr("style");
            return;
        }
        let rendered = declarations
            .iter()
            .map(|(p, v)| format!("{p}: {v};"))
            .collect::<Vec<_>>()
            .join(" ");
        self.set_attr("style", &rendered);
    }
}

fn is_plain_attr(key: &QualName, name: &str) -> bool {
    key.ns == ns!() && &*key.local == name
}

fn parse_style(style: &str) -> Vec<(String, String)> {
    style
        .split(';')
        .filter_map(|declaration| {
            let (property, value) = declaration.split_once(':')?;
            let property = property.trim().to_ascii_lowercase();
            if property.is_empty() {
                return None;
            }
            Some((property, value.trim().to_string()))
        })
        .collect()
}

#[derive(Debug, Clone)]
pub struct Dom {
    tree: Tree<DomNode>,
}

impl Dom {
    pub fn parse_document(html: &str) -> Self {
        let parsed = Html::parse_document(html);
        let mut tree = Tree::new(DomNode::Document);
        let root = tree.root().id();
        graft(&mut tree, root, parsed.tree.root());
        Self { tree }
    }

    pub fn root(&self) -> NodeId {
        self.tree.root().id()
    }

    pub fn node(&self, id: NodeId) -> Option<NodeRef<'_, DomNode>> {
        self.tree.get(id)
    }

    pub fn element(&self, id: NodeId) -> Option<&ElementData> {
        match self.tree.get(id)?.value() {
            DomNode::Element(element) => Some(element),
            _ => None,
        }
    }

    /// Runs `f` against the element at `id`; `None` if it is not an element.
    pub fn update_element<R>(
        &mut self,
        id: NodeId,
        f: impl FnOnce(&mut ElementData) -> R,
    ) -> Option<R> {
        let mut node = self.tree.get_mut(id)?;
        match node.value() {
            DomNode::Element(element) => Some(f(element)),
            _ => None,
        }
    }

    pub fn add_class(&mut self, id: NodeId, class: &str) -> bool {
        self.update_element(id, |el| el.add_class(class))
            .unwrap_or(false)
    }

    pub fn remove_class(&mut self, id: NodeId, class: &str) -> bool {
        self.update_element(id, |el| el.remove_class(class))
            .unwrap_or(false)
    }

    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.element(id).is_some_and(|el| el.has_class(class))
    }

    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        self.element(id)?.attr(name)
    }

    pub fn set_attr(&mut self, id: NodeId, name: &str, value: &str) {
        self.update_element(id, |el| el.set_attr(name, value));
    }

    pub fn remove_attr(&mut self, id: NodeId, name: &str) -> bool {
        self.update_element(id, |el| el.remove_attr(name))
            .unwrap_or(false)
    }

    /// Every element under the document root, in document order.
    pub fn elements(&self) -> Vec<NodeId> {
        self.descendant_elements(self.root())
    }

    /// Elements strictly below `id`, in document order.
    pub fn descendant_elements(&self, id: NodeId) -> Vec<NodeId> {
        let Some(node) = self.tree.get(id) else {
            return Vec::new();
        };
        node.descendants()
            .skip(1)
            .filter(|n| matches!(n.value(), DomNode::Element(_)))
            .map(|n| n.id())
            .collect()
    }

    pub fn element_children(&self, id: NodeId) -> Vec<NodeId> {
        let Some(node) = self.tree.get(id) else {
            return Vec::new();
        };
        node.children()
            .filter(|n| matches!(n.value(), DomNode::Element(_)))
            .map(|n| n.id())
            .collect()
    }

    pub fn parent_element(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.tree.get(id)?.parent()?;
        matches!(parent.value(), DomNode::Element(_)).then(|| parent.id())
    }

    pub fn previous_element_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.tree
            .get(id)?
            .prev_siblings()
            .find(|n| matches!(n.value(), DomNode::Element(_)))
            .map(|n| n.id())
    }

    /// Nearest element, starting at `id` itself, that satisfies `pred`.
    pub fn closest(&self, id: NodeId, pred: impl Fn(&ElementData) -> bool) -> Option<NodeId> {
        let mut current = Some(id);
        while let Some(candidate) = current {
            if self.element(candidate).is_some_and(&pred) {
                return Some(candidate);
            }
            current = self.parent_element(candidate);
        }
        None
    }

    pub fn text_content(&self, id: NodeId) -> String {
        let Some(node) = self.tree.get(id) else {
            return String::new();
        };
        let mut text = String::new();
        for descendant in node.descendants() {
            if let DomNode::Text(chunk) = descendant.value() {
                text.push_str(chunk);
            }
        }
        text
    }

    pub fn get_element_by_id(&self, element_id: &str) -> Option<NodeId> {
        self.elements()
            .into_iter()
            .find(|&id| self.attr(id, "id") == Some(element_id))
    }

    pub fn first_element_named(&self, name: &str) -> Option<NodeId> {
        self.elements()
            .into_iter()
            .find(|&id| self.element(id).is_some_and(|el| el.name() == name))
    }

    pub fn inner_html(&self, id: NodeId) -> String {
        crate::serialize::inner_html(&self.tree, id)
    }

    pub fn to_html(&self) -> String {
        crate::serialize::inner_html(&self.tree, self.root())
    }

    /// Replaces the children of `id` with the parsed fragment.
    pub fn set_inner_html(&mut self, id: NodeId, html: &str) {
        self.clear_children(id);
        let fragment = Html::parse_fragment(html);
        graft(&mut self.tree, id, *fragment.root_element());
    }

    /// Replaces the children of `id` with a single text node.
    pub fn set_text(&mut self, id: NodeId, text: &str) {
        self.clear_children(id);
        if let Some(mut node) = self.tree.get_mut(id) {
            node.append(DomNode::Text(text.to_string()));
        }
    }

    pub fn append_element(&mut self, parent: NodeId, element: ElementData) -> Option<NodeId> {
        let mut node = self.tree.get_mut(parent)?;
        Some(node.append(DomNode::Element(element)).id())
    }

    pub fn append_text(&mut self, parent: NodeId, text: &str) {
        if let Some(mut node) = self.tree.get_mut(parent) {
            node.append(DomNode::Text(text.to_string()));
        }
    }

    /// Appends a deep copy of every current child of `id` to `id`.
    /// Returns the number of element children copied.
    pub fn duplicate_children(&mut self, id: NodeId) -> usize {
        let Some(node) = self.tree.get(id) else {
            return 0;
        };
        let originals: Vec<NodeId> = node.children().map(|n| n.id()).collect();
        let mut copied = 0;
        for child in originals {
            if self.element(child).is_some() {
                copied += 1;
            }
            copy_subtree(&mut self.tree, child, id);
        }
        copied
    }

    /// Moves `id` into a new `wrapper` element placed where `id` was.
    pub fn wrap(&mut self, id: NodeId, wrapper: ElementData) -> Option<NodeId> {
        self.tree.get(id)?.parent()?;
        let mut node = self.tree.get_mut(id)?;
        let wrapper_id = node.insert_before(DomNode::Element(wrapper)).id();
        let mut wrapper_node = self.tree.get_mut(wrapper_id)?;
        wrapper_node.append_id(id);
        Some(wrapper_id)
    }

    /// Short human label such as `section#pricing` or `a.rounded-2xl`.
    pub fn describe(&self, id: NodeId) -> String {
        let Some(element) = self.element(id) else {
            return "#node".to_string();
        };
        let mut label = element.name().to_string();
        if let Some(element_id) = element.attr("id") {
            label.push('#');
            label.push_str(element_id);
            return label;
        }
        for class in element.classes().take(2) {
            label.push('.');
            label.push_str(class);
        }
        label
    }

    fn clear_children(&mut self, id: NodeId) {
        let Some(node) = self.tree.get(id) else {
            return;
        };
        let children: Vec<NodeId> = node.children().map(|n| n.id()).collect();
        for child in children {
            if let Some(mut child) = self.tree.get_mut(child) {
                child.detach();
            }
        }
    }
}

fn convert(node: &Node) -> Option<DomNode> {
    match node {
        Node::Doctype(doctype) => Some(DomNode::Doctype(doctype.name().to_string())),
        Node::Comment(comment) => Some(DomNode::Comment((**comment).to_string())),
        Node::Text(text) => Some(DomNode::Text((**text).to_string())),
        Node::Element(element) => Some(DomNode::Element(ElementData {
            name: element.name.clone(),
            attrs: element
                .attrs
                .iter()
                .map(|(k, v)| (k.clone(), String::from(&**v)))
                .collect(),
        })),
        _ => None,
    }
}

fn graft(tree: &mut Tree<DomNode>, parent: NodeId, source: NodeRef<'_, Node>) {
    for child in source.children() {
        let Some(value) = convert(child.value()) else {
            continue;
        };
        let Some(mut target) = tree.get_mut(parent) else {
            return;
        };
        let appended = target.append(value).id();
        graft(tree, appended, child);
    }
}

fn copy_subtree(tree: &mut Tree<DomNode>, source: NodeId, parent: NodeId) {
    let Some(node) = tree.get(source) else {
        return;
    };
    let value = node.value().clone();
    let children: Vec<NodeId> = node.children().map(|n| n.id()).collect();
    let Some(mut target) = tree.get_mut(parent) else {
        return;
    };
    let copy = target.append(value).id();
    for child in children {
        copy_subtree(tree, child, copy);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_list_edits_preserve_other_classes() {
        let mut el = ElementData::new("div").with_attr("class", "flex  flex-col");
        assert!(el.add_class("visible"));
        assert!(!el.add_class("visible"));
        assert_eq!(el.attr("class"), Some("flex  flex-col visible"));
        assert!(el.remove_class("flex"));
        assert_eq!(el.attr("class"), Some("flex-col visible"));
    }

    #[test]
    fn style_properties_round_trip() {
        let mut el = ElementData::new("div").with_attr("style", "opacity:0;transform:translateY(20px)");
        assert_eq!(el.style_property("opacity").as_deref(), Some("0"));
        el.set_style_property("opacity", "1");
        el.set_style_property("transform", "");
        assert_eq!(el.attr("style"), Some("opacity: 1;"));
        el.set_style_property("opacity", "");
        assert_eq!(el.attr("style"), None);
    }

    #[test]
    fn duplicate_children_copies_deeply() {
        let mut dom = Dom::parse_document(
            "<html><body><ul id=\"list\"><li><b>a</b></li><li>b</li></ul></body></html>",
        );
        let list = dom.get_element_by_id("list").unwrap();
        assert_eq!(dom.duplicate_children(list), 2);
        assert_eq!(dom.element_children(list).len(), 4);
        assert_eq!(dom.text_content(list), "abab");
    }

    #[test]
    fn wrap_moves_node_into_wrapper() {
        let mut dom = Dom::parse_document("<html><body><p id=\"p\"><img id=\"i\"></p></body></html>");
        let img = dom.get_element_by_id("i").unwrap();
        let wrapper = dom.wrap(img, ElementData::new("div")).unwrap();
        assert_eq!(dom.parent_element(img), Some(wrapper));
        let p = dom.get_element_by_id("p").unwrap();
        assert_eq!(dom.element_children(p), vec![wrapper]);
    }

    #[test]
    fn closest_includes_self() {
        let dom = Dom::parse_document("<html><body><div id=\"a\"><span id=\"b\"></span></div></body></html>");
        let span = dom.get_element_by_id("b").unwrap();
        assert_eq!(dom.closest(span, |el| el.name() == "span"), Some(span));
        assert_eq!(
            dom.closest(span, |el| el.name() == "div"),
            dom.get_element_by_id("a")
        );
        assert_eq!(dom.closest(span, |el| el.name() == "table"), None);
    }
}
