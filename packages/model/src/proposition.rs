use crate::clause_item::ClauseItem;
use crate::ids::{ClauseItemId, PropositionId, RelationId};
use crate::language::SyntacticalFunction;
use crate::relation::AssociateRole;
use serde::{Deserialize, Serialize};

/// Clause-level unit of analysed text.
///
/// A proposition may be split into a chain of parts linked through
/// `part_before_arrow` / `part_after_arrow`. Only the first part of a chain
/// carries a `parent`, a `function` and a superordinate relation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proposition {
    pub id: PropositionId,

    /// Never empty
    pub items: Vec<ClauseItem>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub syntactical_translation: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub semantic_translation: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,

    /// Function relative to the parent, set when indented
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function: Option<SyntacticalFunction>,

    /// The part whose child lists contain this proposition
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<PropositionId>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub prior_children: Vec<PropositionId>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub later_children: Vec<PropositionId>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub part_before_arrow: Option<PropositionId>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub part_after_arrow: Option<PropositionId>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub super_ordinated_relation: Option<RelationId>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<AssociateRole>,
}

impl Proposition {
    pub fn new(id: PropositionId, items: Vec<ClauseItem>) -> Self {
        Self {
            id,
            items,
            label: None,
            syntactical_translation: None,
            semantic_translation: None,
            comment: None,
            function: None,
            parent: None,
            prior_children: Vec::new(),
            later_children: Vec::new(),
            part_before_arrow: None,
            part_after_arrow: None,
            super_ordinated_relation: None,
            role: None,
        }
    }

    pub fn is_first_part(&self) -> bool {
        self.part_before_arrow.is_none()
    }

    pub fn is_last_part(&self) -> bool {
        self.part_after_arrow.is_none()
    }

    pub fn has_children(&self) -> bool {
        !self.prior_children.is_empty() || !self.later_children.is_empty()
    }

    pub fn item_index(&self, item: ClauseItemId) -> Option<usize> {
        self.items.iter().position(|i| i.id == item)
    }

    pub fn item(&self, item: ClauseItemId) -> Option<&ClauseItem> {
        self.items.iter().find(|i| i.id == item)
    }

    pub fn item_mut(&mut self, item: ClauseItemId) -> Option<&mut ClauseItem> {
        self.items.iter_mut().find(|i| i.id == item)
    }

    /// Origin text of all items, separated by spaces
    pub fn text(&self) -> String {
        self.items
            .iter()
            .map(|item| item.origin_text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Take over the text fields of a proposition being merged into this one.
    ///
    /// `self` is the textually earlier side.
    pub fn absorb_text_fields(&mut self, later: &Proposition) {
        self.label = first_present(self.label.take(), later.label.clone());
        self.syntactical_translation = join_optional(
            self.syntactical_translation.take(),
            later.syntactical_translation.clone(),
            " ",
        );
        self.semantic_translation = join_optional(
            self.semantic_translation.take(),
            later.semantic_translation.clone(),
            " ",
        );
        self.comment = join_optional(self.comment.take(), later.comment.clone(), "\n");
    }
}

/// Concatenate two optional texts; an empty side yields the other unchanged
pub fn join_optional(first: Option<String>, second: Option<String>, separator: &str) -> Option<String> {
    let first = first.filter(|text| !text.is_empty());
    let second = second.filter(|text| !text.is_empty());
    match (first, second) {
        (Some(first), Some(second)) => Some(format!("{first}{separator}{second}")),
        (first, second) => first.or(second),
    }
}

fn first_present(first: Option<String>, second: Option<String>) -> Option<String> {
    first.filter(|text| !text.is_empty()).or(second)
}
