//! # Mutations
//!
//! Every edit a front end can request, as serializable commands.
//!
//! ## Mutation Semantics
//!
//! ### Structure
//! - Indentation, merging, splitting, adding and removing propositions
//! - Relations between neighbouring propositions and relations
//! - Emit [`ModelChange::Full`](crate::ModelChange::Full)
//!
//! ### Properties
//! - Labels, translations, comments, functions and font styles
//! - Emit a change scoped to the edited proposition or relation
//!
//! All mutations validate before touching the pericope; a rejected mutation
//! leaves it unchanged.

mod clause_items;
mod indentation;
mod merge;
mod properties;
mod propositions;
mod relations;
mod split;

use crate::errors::EditResult;
use crate::handler::ModelHandler;
use hermeneutix_model::{
    ClauseItemId, Connectable, FontStyle, Pericope, PropositionId, RelationId, RelationTemplate,
    SyntacticalFunction,
};
use serde::{Deserialize, Serialize};

/// Semantic edit operations
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Mutation {
    IndentProposition {
        target: PropositionId,
        parent: PropositionId,
        function: SyntacticalFunction,
    },

    RemoveOneIndentation {
        target: PropositionId,
    },

    /// Order of the two propositions does not matter
    MergePropositions {
        first: PropositionId,
        second: PropositionId,
    },

    SplitProposition {
        target: PropositionId,
        last_item_in_first_part: ClauseItemId,
    },

    MergeClauseItemWithPrior {
        item: ClauseItemId,
    },

    MergeClauseItemWithFollower {
        item: ClauseItemId,
    },

    SplitClauseItem {
        item: ClauseItemId,
        first_part: String,
    },

    CreateRelation {
        associates: Vec<Connectable>,
        template: RelationTemplate,
    },

    RotateAssociateRoles {
        relation: RelationId,
    },

    AlterRelationType {
        relation: RelationId,
        template: RelationTemplate,
    },

    RemoveRelation {
        relation: RelationId,
    },

    /// Tokenize text into new top-level propositions
    AddPropositions {
        text: String,
        #[serde(default)]
        in_front: bool,
    },

    /// Import every element of another pericope
    MergePericope {
        other: Box<Pericope>,
        #[serde(default)]
        in_front: bool,
    },

    RemovePropositions {
        targets: Vec<PropositionId>,
    },

    SetPropositionLabel {
        proposition: PropositionId,
        #[serde(default)]
        label: Option<String>,
    },

    SetPropositionTranslations {
        proposition: PropositionId,
        #[serde(default)]
        syntactical: Option<String>,
        #[serde(default)]
        semantic: Option<String>,
    },

    SetPropositionComment {
        proposition: PropositionId,
        #[serde(default)]
        comment: Option<String>,
    },

    SetPropositionFunction {
        proposition: PropositionId,
        #[serde(default)]
        function: Option<SyntacticalFunction>,
    },

    SetClauseItemFunction {
        item: ClauseItemId,
        #[serde(default)]
        function: Option<SyntacticalFunction>,
    },

    SetClauseItemFontStyle {
        item: ClauseItemId,
        font_style: FontStyle,
    },

    SetClauseItemComment {
        item: ClauseItemId,
        #[serde(default)]
        comment: Option<String>,
    },

    SetRelationComment {
        relation: RelationId,
        #[serde(default)]
        comment: Option<String>,
    },

    SetPericopeMetadata {
        #[serde(default)]
        title: Option<String>,
        #[serde(default)]
        author: Option<String>,
        #[serde(default)]
        comment: Option<String>,
    },
}

/// What a successfully applied mutation produced
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum MutationOutcome {
    Done,
    Propositions(Vec<PropositionId>),
    Proposition(PropositionId),
    ClauseItem(ClauseItemId),
    Relation(RelationId),
}

impl ModelHandler {
    /// Apply a mutation, dispatching to the matching operation
    pub fn apply(&mut self, mutation: Mutation) -> EditResult<MutationOutcome> {
        use MutationOutcome::Done;

        match mutation {
            Mutation::IndentProposition { target, parent, function } => self
                .indent_proposition_under_parent(target, parent, function)
                .map(|_| Done),
            Mutation::RemoveOneIndentation { target } => {
                self.remove_one_indentation(target).map(|_| Done)
            }
            Mutation::MergePropositions { first, second } => {
                self.merge_propositions(first, second).map(|_| Done)
            }
            Mutation::SplitProposition { target, last_item_in_first_part } => self
                .split_proposition(target, last_item_in_first_part)
                .map(MutationOutcome::Proposition),
            Mutation::MergeClauseItemWithPrior { item } => {
                self.merge_clause_item_with_prior(item).map(|_| Done)
            }
            Mutation::MergeClauseItemWithFollower { item } => {
                self.merge_clause_item_with_follower(item).map(|_| Done)
            }
            Mutation::SplitClauseItem { item, first_part } => self
                .split_clause_item(item, &first_part)
                .map(MutationOutcome::ClauseItem),
            Mutation::CreateRelation { associates, template } => self
                .create_relation(&associates, &template)
                .map(MutationOutcome::Relation),
            Mutation::RotateAssociateRoles { relation } => {
                self.rotate_associate_roles(relation).map(|_| Done)
            }
            Mutation::AlterRelationType { relation, template } => {
                self.alter_relation_type(relation, &template).map(|_| Done)
            }
            Mutation::RemoveRelation { relation } => self.remove_relation(relation).map(|_| Done),
            Mutation::AddPropositions { text, in_front } => Ok(MutationOutcome::Propositions(
                self.add_new_propositions(&text, in_front),
            )),
            Mutation::MergePericope { other, in_front } => self
                .merge_with_other_pericope(*other, in_front)
                .map(MutationOutcome::Propositions),
            Mutation::RemovePropositions { targets } => {
                self.remove_propositions(&targets).map(|_| Done)
            }
            Mutation::SetPropositionLabel { proposition, label } => {
                self.set_proposition_label(proposition, label).map(|_| Done)
            }
            Mutation::SetPropositionTranslations { proposition, syntactical, semantic } => self
                .set_proposition_translations(proposition, syntactical, semantic)
                .map(|_| Done),
            Mutation::SetPropositionComment { proposition, comment } => {
                self.set_proposition_comment(proposition, comment).map(|_| Done)
            }
            Mutation::SetPropositionFunction { proposition, function } => {
                self.set_proposition_function(proposition, function).map(|_| Done)
            }
            Mutation::SetClauseItemFunction { item, function } => {
                self.set_clause_item_function(item, function).map(|_| Done)
            }
            Mutation::SetClauseItemFontStyle { item, font_style } => {
                self.set_clause_item_font_style(item, font_style).map(|_| Done)
            }
            Mutation::SetClauseItemComment { item, comment } => {
                self.set_clause_item_comment(item, comment).map(|_| Done)
            }
            Mutation::SetRelationComment { relation, comment } => {
                self.set_relation_comment(relation, comment).map(|_| Done)
            }
            Mutation::SetPericopeMetadata { title, author, comment } => {
                self.set_pericope_metadata(title, author, comment);
                Ok(Done)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::EditError;
    use hermeneutix_model::LanguageModel;

    fn handler(text: &str) -> ModelHandler {
        ModelHandler::new(Pericope::from_text(text, LanguageModel::default()), vec![])
    }

    #[test]
    fn test_apply_dispatches_and_reports_outcome() {
        let mut handler = handler("a b\nc");
        let roots = handler.pericope().roots().to_vec();
        let item = handler.pericope().proposition(roots[0]).unwrap().items[0].id;

        let outcome = handler
            .apply(Mutation::SplitClauseItem { item, first_part: "a".into() })
            .unwrap_err();
        assert!(matches!(outcome, EditError::ClauseItemInvalidSplit { .. }));

        let outcome = handler
            .apply(Mutation::AddPropositions { text: "d".into(), in_front: false })
            .unwrap();
        let MutationOutcome::Propositions(added) = outcome else {
            panic!("expected propositions, got {outcome:?}");
        };
        assert_eq!(handler.pericope().roots()[2], added[0]);

        assert_eq!(
            handler.apply(Mutation::MergePropositions { first: roots[0], second: roots[1] }),
            Ok(MutationOutcome::Done)
        );
        assert_eq!(handler.pericope().proposition(roots[0]).unwrap().text(), "a b c");
    }

    #[test]
    fn test_mutation_json_round_trip() {
        let json = r#"{"SetPropositionLabel":{"proposition":3,"label":"1a"}}"#;
        let mutation: Mutation = serde_json::from_str(json).unwrap();
        assert_eq!(
            mutation,
            Mutation::SetPropositionLabel {
                proposition: PropositionId::new(3),
                label: Some("1a".into())
            }
        );

        let cleared: Mutation =
            serde_json::from_str(r#"{"SetPropositionLabel":{"proposition":3}}"#).unwrap();
        assert_eq!(
            cleared,
            Mutation::SetPropositionLabel { proposition: PropositionId::new(3), label: None }
        );
    }
}
