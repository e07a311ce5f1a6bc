use std::io;

use ego_tree::iter::Edge;
use ego_tree::{NodeId, NodeRef, Tree};
use engine_logging::engine_warn;
use html5ever::serialize::{serialize, Serialize, SerializeOpts, Serializer, TraversalScope};

use crate::dom::DomNode;

/// A subtree of the document handed to the html5ever serializer.
struct Subtree<'a> {
    root: NodeRef<'a, DomNode>,
}

impl Serialize for Subtree<'_> {
    fn serialize<S: Serializer>(
        &self,
        serializer: &mut S,
        traversal_scope: TraversalScope,
    ) -> io::Result<()> {
        let skip_root = matches!(traversal_scope, TraversalScope::ChildrenOnly(_));
        for edge in self.root.traverse() {
            match edge {
                Edge::Open(node) => {
                    if skip_root && node == self.root {
                        continue;
                    }
                    match node.value() {
                        DomNode::Document => {}
                        DomNode::Doctype(name) => serializer.write_doctype(name)?,
                        DomNode::Comment(comment) => serializer.write_comment(comment)?,
                        DomNode::Text(text) => serializer.write_text(text)?,
                        DomNode::Element(element) => {
                            serializer.start_elem(element.qual_name().clone(), element.attrs())?
                        }
                    }
                }
                Edge::Close(node) => {
                    if skip_root && node == self.root {
                        continue;
                    }
                    if let DomNode::Element(element) = node.value() {
                        serializer.end_elem(element.qual_name().clone())?;
                    }
                }
            }
        }
        Ok(())
    }
}

/// Markup of the children of `id`. Raw-text parents (`style`, `script`,
/// `noscript` and the like) keep their text unescaped.
pub(crate) fn inner_html(tree: &Tree<DomNode>, id: NodeId) -> String {
    let Some(root) = tree.get(id) else {
        return String::new();
    };
    let parent = match root.value() {
        DomNode::Element(element) => Some(element.qual_name().clone()),
        _ => None,
    };
    // Parsing runs with scripting enabled, so `noscript` content is raw text.
    let opts = SerializeOpts {
        scripting_enabled: true,
        traversal_scope: TraversalScope::ChildrenOnly(parent),
        create_missing_parent: false,
    };
    let mut buf = Vec::new();
    if let Err(err) = serialize(&mut buf, &Subtree { root }, opts) {
        engine_warn!("serialization stopped early: {err}");
    }
    String::from_utf8_lossy(&buf).into_owned()
}

#[cfg(test)]
mod tests {
    use crate::Dom;

    #[test]
    fn round_trips_simple_markup() {
        let html = r#"<!DOCTYPE html><html><head><style>a > b { color: red; }</style></head><body><p class="x" data-v="a&quot;b">1 &lt; 2<br></p><!--note--></body></html>"#;
        assert_eq!(Dom::parse_document(html).to_html(), html);
    }

    #[test]
    fn keeps_foreign_attribute_prefixes() {
        let html = r##"<html><head></head><body><svg viewBox="0 0 8 8"><use xlink:href="#icon"></use></svg></body></html>"##;
        let dom = Dom::parse_document(html);
        assert_eq!(dom.to_html(), html);
        let svg = dom.first_element_named("svg").unwrap();
        assert_eq!(dom.attr(svg, "viewBox"), Some("0 0 8 8"));
    }

    #[test]
    fn noscript_in_head_stays_raw_text() {
        let html = r#"<html><head><noscript><style>.x{}</style></noscript></head><body><xmp><b>&</b></xmp></body></html>"#;
        assert_eq!(Dom::parse_document(html).to_html(), html);
    }

    #[test]
    fn inner_html_of_a_style_element_is_unescaped() {
        let dom = Dom::parse_document("<html><head><style>a > b {}</style></head><body></body></html>");
        let style = dom.first_element_named("style").unwrap();
        assert_eq!(dom.inner_html(style), "a > b {}");
    }
}
