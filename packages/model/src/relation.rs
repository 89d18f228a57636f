use crate::ids::{PropositionId, RelationId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Role of one associate inside a relation, with its weight
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssociateRole {
    pub role: String,
    pub high_weight: bool,
}

impl AssociateRole {
    pub fn new(role: impl Into<String>, high_weight: bool) -> Self {
        Self {
            role: role.into(),
            high_weight,
        }
    }

    pub fn high(role: &str) -> Self {
        Self::new(role, true)
    }

    pub fn low(role: &str) -> Self {
        Self::new(role, false)
    }
}

/// Anything that can be an associate of a relation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "camelCase")]
pub enum Connectable {
    Proposition(PropositionId),
    Relation(RelationId),
}

impl From<PropositionId> for Connectable {
    fn from(id: PropositionId) -> Self {
        Connectable::Proposition(id)
    }
}

impl From<RelationId> for Connectable {
    fn from(id: RelationId) -> Self {
        Connectable::Relation(id)
    }
}

impl fmt::Display for Connectable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Connectable::Proposition(id) => write!(f, "{id}"),
            Connectable::Relation(id) => write!(f, "{id}"),
        }
    }
}

/// Semantic grouping of neighbouring propositions and relations.
///
/// Associates are referenced, not owned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relation {
    pub id: RelationId,

    pub associates: Vec<Connectable>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub super_ordinated_relation: Option<RelationId>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<AssociateRole>,
}

impl Relation {
    pub fn new(id: RelationId, associates: Vec<Connectable>) -> Self {
        Self {
            id,
            associates,
            comment: None,
            super_ordinated_relation: None,
            role: None,
        }
    }

    pub fn first_associate(&self) -> Option<Connectable> {
        self.associates.first().copied()
    }

    pub fn last_associate(&self) -> Option<Connectable> {
        self.associates.last().copied()
    }

    pub fn index_of(&self, associate: Connectable) -> Option<usize> {
        self.associates.iter().position(|a| *a == associate)
    }
}
