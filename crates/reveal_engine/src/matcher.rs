//! Structural predicates over markup the runtime does not control.
//!
//! Every role has a matcher that answers `Option`: a miss means the feature
//! is skipped, never that initialization fails.

use ego_tree::NodeId;
use reveal_core::{class, is_activity_heading, CounterState, PROFIT_LABEL};

use crate::dom::{Dom, ElementData};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Predicate {
    /// Element name, lowercase.
    Tag(&'static str),
    /// Every listed class is present.
    HasClasses(&'static [&'static str]),
    /// Raw `class` attribute contains the fragment (like `[class*="..."]`).
    ClassContains(&'static str),
    AttrEquals(&'static str, &'static str),
    AnyOf(&'static [Predicate]),
    AllOf(&'static [Predicate]),
}

impl Predicate {
    pub fn matches(&self, element: &ElementData) -> bool {
        match self {
            Predicate::Tag(name) => element.name() == *name,
            Predicate::HasClasses(classes) => classes.iter().all(|c| element.has_class(c)),
            Predicate::ClassContains(fragment) => element
                .attr("class")
                .is_some_and(|value| value.contains(*fragment)),
            Predicate::AttrEquals(name, value) => element.attr(name) == Some(*value),
            Predicate::AnyOf(options) => options.iter().any(|p| p.matches(element)),
            Predicate::AllOf(parts) => parts.iter().all(|p| p.matches(element)),
        }
    }

    pub fn matches_node(&self, dom: &Dom, id: NodeId) -> bool {
        dom.element(id).is_some_and(|el| self.matches(el))
    }

    /// All matching elements in document order.
    pub fn select_all(&self, dom: &Dom) -> Vec<NodeId> {
        dom.elements()
            .into_iter()
            .filter(|&id| self.matches_node(dom, id))
            .collect()
    }

    pub fn select_first(&self, dom: &Dom) -> Option<NodeId> {
        dom.elements()
            .into_iter()
            .find(|&id| self.matches_node(dom, id))
    }
}

pub const HERO: Predicate = Predicate::HasClasses(&[
    "relative",
    "flex",
    "flex-col",
    "items-center",
    "justify-center",
    "gap-4",
]);

pub const SECTION: Predicate = Predicate::AnyOf(&[
    Predicate::Tag("section"),
    Predicate::ClassContains("flex flex-col gap-4"),
    Predicate::ClassContains("flex flex-col gap-y-6"),
]);

pub const CARD: Predicate =
    Predicate::AllOf(&[Predicate::Tag("a"), Predicate::ClassContains("rounded-2xl")]);

pub const TAB: Predicate = Predicate::AttrEquals("role", "tab");
pub const TAB_LIST: Predicate = Predicate::AttrEquals("role", "tablist");

pub const ACTIVITY_DATE_CANDIDATE: Predicate =
    Predicate::AllOf(&[Predicate::Tag("p"), Predicate::HasClasses(&["xl:flex"])]);

const TICKER_ITEMS_VIEWPORT: Predicate = Predicate::HasClasses(&["overflow-hidden"]);
const TICKER_ITEMS: Predicate = Predicate::HasClasses(&["flex", "flex-col"]);

pub const APP_ICON: Predicate =
    Predicate::AllOf(&[Predicate::Tag("img"), Predicate::AttrEquals("alt", "App Icon")]);

/// Finds one role's elements in a document.
pub trait RoleMatcher {
    type Output;

    fn find(&self, dom: &Dom) -> Option<Self::Output>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeroMatch {
    pub container: NodeId,
    pub children: Vec<NodeId>,
}

/// The hero container and its direct children.
#[derive(Debug, Default, Clone, Copy)]
pub struct HeroMatcher;

impl RoleMatcher for HeroMatcher {
    type Output = HeroMatch;

    fn find(&self, dom: &Dom) -> Option<HeroMatch> {
        let container = HERO.select_first(dom)?;
        Some(HeroMatch {
            container,
            children: dom.element_children(container),
        })
    }
}

/// Section-like blocks outside the hero. Cards are left to [`CardMatcher`].
#[derive(Debug, Default, Clone, Copy)]
pub struct SectionMatcher;

impl RoleMatcher for SectionMatcher {
    type Output = Vec<NodeId>;

    fn find(&self, dom: &Dom) -> Option<Vec<NodeId>> {
        let sections: Vec<NodeId> = SECTION
            .select_all(dom)
            .into_iter()
            .filter(|&id| dom.closest(id, |el| HERO.matches(el)).is_none())
            .filter(|&id| !CARD.matches_node(dom, id))
            .collect();
        (!sections.is_empty()).then_some(sections)
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct CardMatcher;

impl RoleMatcher for CardMatcher {
    type Output = Vec<NodeId>;

    fn find(&self, dom: &Dom) -> Option<Vec<NodeId>> {
        let cards = CARD.select_all(dom);
        (!cards.is_empty()).then_some(cards)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityMatch {
    pub heading: NodeId,
    /// Scrollable item list; `None` when the widget does not have the expected shape.
    pub items: Option<NodeId>,
}

/// Activity widget: `h3` heading -> box two levels up -> second child with
/// `overflow-hidden` -> first `.flex.flex-col` inside it.
#[derive(Debug, Default, Clone, Copy)]
pub struct ActivityMatcher;

impl RoleMatcher for ActivityMatcher {
    type Output = ActivityMatch;

    fn find(&self, dom: &Dom) -> Option<ActivityMatch> {
        let heading = Predicate::Tag("h3")
            .select_all(dom)
            .into_iter()
            .find(|&id| is_activity_heading(&dom.text_content(id)))?;
        Some(ActivityMatch {
            heading,
            items: activity_items(dom, heading),
        })
    }
}

fn activity_items(dom: &Dom, heading: NodeId) -> Option<NodeId> {
    let activity_box = dom.parent_element(dom.parent_element(heading)?)?;
    let viewport = *dom.element_children(activity_box).get(1)?;
    if !TICKER_ITEMS_VIEWPORT.matches_node(dom, viewport) {
        return None;
    }
    dom.descendant_elements(viewport)
        .into_iter()
        .find(|&id| TICKER_ITEMS.matches_node(dom, id))
}

/// `span`s showing a signed currency amount right after a `Profit` label.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProfitMatcher;

impl RoleMatcher for ProfitMatcher {
    type Output = Vec<(NodeId, CounterState)>;

    fn find(&self, dom: &Dom) -> Option<Self::Output> {
        let counters: Vec<_> = Predicate::Tag("span")
            .select_all(dom)
            .into_iter()
            .filter(|&id| {
                dom.previous_element_sibling(id)
                    .is_some_and(|label| dom.text_content(label) == PROFIT_LABEL)
            })
            .filter_map(|id| CounterState::parse(&dom.text_content(id)).map(|state| (id, state)))
            .collect();
        (!counters.is_empty()).then_some(counters)
    }
}

/// Element with the given `id` attribute.
#[derive(Debug, Clone, Copy)]
pub struct PanelMatcher<'a> {
    pub panel_id: &'a str,
}

impl RoleMatcher for PanelMatcher<'_> {
    type Output = NodeId;

    fn find(&self, dom: &Dom) -> Option<NodeId> {
        dom.get_element_by_id(self.panel_id)
    }
}

/// `img[alt="App Icon"]` whose parent is not already the wrapper.
#[derive(Debug, Default, Clone, Copy)]
pub struct AppIconMatcher;

impl RoleMatcher for AppIconMatcher {
    type Output = NodeId;

    fn find(&self, dom: &Dom) -> Option<NodeId> {
        let icon = APP_ICON.select_first(dom)?;
        let parent = dom.parent_element(icon)?;
        (!dom.has_class(parent, class::ICON_WRAPPER)).then_some(icon)
    }
}
