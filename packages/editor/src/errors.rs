//! Error types for the editor

use crate::undo_stack::UndoError;
use hermeneutix_model::{ClauseItemId, ModelError, PropositionId, RelationId};
use thiserror::Error;

pub type EditResult<T> = Result<T, EditError>;

/// Rejected edit.
///
/// Most variants are business-rule violations a user can trigger and recover
/// from. Contract violations (references to elements that do not exist or do
/// not belong together) indicate a bug in the caller; see
/// [`EditError::is_contract_violation`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EditError {
    // -- indentation --------------------------------------------------------
    #[error("Cannot indent {target} under {parent}: they are not neighbours on a reachable level")]
    IndentationNotAdjacent {
        target: PropositionId,
        parent: PropositionId,
    },

    #[error("Cannot indent {target} under {parent}: the parent is part of the target's subtree")]
    IndentationCycle {
        target: PropositionId,
        parent: PropositionId,
    },

    #[error("{0} is not indented")]
    NotIndented(PropositionId),

    #[error("{0} is enclosed between two parts of its parent and cannot be moved up")]
    EnclosedChild(PropositionId),

    // -- propositions -------------------------------------------------------
    #[error("Cannot merge {0} and {1}: they are not adjacent")]
    MergeNotAdjacent(PropositionId, PropositionId),

    #[error("Cannot merge {0} and {1}: other propositions are enclosed between them")]
    MergeEnclosedChildren(PropositionId, PropositionId),

    #[error("{0} has no following part to split off")]
    SplitNothingToSplit(PropositionId),

    #[error("Nothing selected")]
    NothingSelected,

    #[error("At least one proposition must remain")]
    NoneLeft,

    #[error("{0} is indented and cannot be removed")]
    RemoveIndented(PropositionId),

    #[error("{0} is part of a split proposition and cannot be removed")]
    RemoveSplitPart(PropositionId),

    #[error("{0} has indented children and cannot be removed")]
    RemoveHasChildren(PropositionId),

    #[error("The language models '{ours}' and '{theirs}' differ")]
    LanguageModelMismatch { ours: String, theirs: String },

    // -- clause items -------------------------------------------------------
    #[error("{0} has no prior clause item to merge with")]
    ClauseItemNoPrior(ClauseItemId),

    #[error("{0} has no following clause item to merge with")]
    ClauseItemNoFollower(ClauseItemId),

    #[error("Cannot split {item} at '{first_part}'")]
    ClauseItemInvalidSplit {
        item: ClauseItemId,
        first_part: String,
    },

    // -- relations ----------------------------------------------------------
    #[error("A relation needs at least two associates")]
    RelationTooFewAssociates,

    #[error("The relation type does not allow {0} associates")]
    RelationTooManyAssociates(usize),

    #[error("{0} already belongs to a relation")]
    RelationAlreadyConnected(String),

    #[error("{0} and {1} are not neighbours")]
    RelationNotNeighbours(String, String),

    // -- files --------------------------------------------------------------
    #[error("File is invalid: {0}")]
    FileInvalid(String),

    #[error("IO error: {0}")]
    Io(String),

    #[error("Document is not file-backed")]
    NotFileBacked,

    #[error(transparent)]
    History(#[from] UndoError),

    // -- contract violations ------------------------------------------------
    #[error("Unknown proposition: {0}")]
    UnknownProposition(PropositionId),

    #[error("Unknown clause item: {0}")]
    UnknownClauseItem(ClauseItemId),

    #[error("Unknown relation: {0}")]
    UnknownRelation(RelationId),

    #[error("{item} does not belong to {proposition}")]
    ItemNotInProposition {
        item: ClauseItemId,
        proposition: PropositionId,
    },
}

impl EditError {
    /// Whether this error stems from invalid arguments rather than a
    /// rejected user request
    pub fn is_contract_violation(&self) -> bool {
        matches!(
            self,
            EditError::UnknownProposition(_)
                | EditError::UnknownClauseItem(_)
                | EditError::UnknownRelation(_)
                | EditError::ItemNotInProposition { .. }
        )
    }
}

impl From<std::io::Error> for EditError {
    fn from(e: std::io::Error) -> Self {
        EditError::Io(e.to_string())
    }
}

impl From<serde_json::Error> for EditError {
    fn from(e: serde_json::Error) -> Self {
        EditError::FileInvalid(e.to_string())
    }
}

impl From<ModelError> for EditError {
    fn from(e: ModelError) -> Self {
        EditError::FileInvalid(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contract_violations_are_flagged() {
        assert!(EditError::UnknownProposition(PropositionId::new(1)).is_contract_violation());
        assert!(EditError::ItemNotInProposition {
            item: ClauseItemId::new(2),
            proposition: PropositionId::new(1),
        }
        .is_contract_violation());
        assert!(!EditError::NoneLeft.is_contract_violation());
        assert!(!EditError::MergeNotAdjacent(PropositionId::new(1), PropositionId::new(2))
            .is_contract_violation());
    }

    #[test]
    fn test_messages() {
        assert_eq!(EditError::NothingSelected.to_string(), "Nothing selected");
        assert_eq!(
            EditError::NotIndented(PropositionId::new(3)).to_string(),
            "p-3 is not indented"
        );
    }
}
