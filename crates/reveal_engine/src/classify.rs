use ego_tree::NodeId;

use crate::dom::Dom;
use crate::matcher::{CardMatcher, HeroMatcher, RoleMatcher, SectionMatcher};

/// Reveal candidates per role, each in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    pub hero: Vec<NodeId>,
    pub sections: Vec<NodeId>,
    pub cards: Vec<NodeId>,
}

impl Classification {
    pub fn len(&self) -> usize {
        self.hero.len() + self.sections.len() + self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub fn classify(dom: &Dom) -> Classification {
    Classification {
        hero: HeroMatcher
            .find(dom)
            .map(|hero| hero.children)
            .unwrap_or_default(),
        sections: SectionMatcher.find(dom).unwrap_or_default(),
        cards: CardMatcher.find(dom).unwrap_or_default(),
    }
}
