//! Splitting a proposition into two.

use crate::errors::{EditError, EditResult};
use crate::handler::ModelHandler;
use crate::notification::ModelChange;
use hermeneutix_model::{ClauseItemId, Connectable, PropositionId, Slot};
use tracing::debug;

impl ModelHandler {
    /// Split `target` behind `last_item_in_first_part`.
    ///
    /// If the item is not the last one, the remaining items (and the later
    /// children of `target`) move into a new part right after `target`.
    /// If it is the last item, the part following `target` is detached from
    /// the chain and becomes an independent proposition placed right after
    /// the chain in the same list.
    ///
    /// Returns the proposition holding the second half.
    pub fn split_proposition(
        &mut self,
        target: PropositionId,
        last_item_in_first_part: ClauseItemId,
    ) -> EditResult<PropositionId> {
        let proposition = self.require(target)?;
        let index = proposition.item_index(last_item_in_first_part).ok_or(
            EditError::ItemNotInProposition {
                item: last_item_in_first_part,
                proposition: target,
            },
        )?;

        let second = if index + 1 < proposition.items.len() {
            self.split_items(target, index)
        } else {
            let next = proposition
                .part_after_arrow
                .ok_or(EditError::SplitNothingToSplit(target))?;
            self.detach_following_part(target, next);
            next
        };
        self.notify(ModelChange::Full);
        Ok(second)
    }

    fn split_items(&mut self, target: PropositionId, index: usize) -> PropositionId {
        let remaining = self
            .pericope
            .proposition_mut(target)
            .map(|p| p.items.split_off(index + 1))
            .unwrap_or_default();
        let old_next = self.pericope.proposition(target).and_then(|p| p.part_after_arrow);
        let created = self.pericope.create_proposition(remaining);

        let later = self.pericope.take_children(Slot::Later(target));
        self.pericope.set_children(Slot::Later(created), later);
        self.link_parts(target, Some(created));
        if let Some(next) = old_next {
            self.link_parts(created, Some(next));
        }
        debug!(%target, %created, "split proposition into parts");
        created
    }

    fn detach_following_part(&mut self, target: PropositionId, next: PropositionId) {
        let chain = self.pericope.first_part(target);
        self.link_parts(target, None);
        if let Some(proposition) = self.pericope.proposition_mut(next) {
            proposition.part_before_arrow = None;
        }

        let function = self.pericope.proposition(chain).and_then(|p| p.function.clone());
        if let Some(position) = self.pericope.position_of(chain) {
            self.pericope.attach(next, position.slot, position.index + 1);
        }
        if let Some(proposition) = self.pericope.proposition_mut(next) {
            proposition.function = function;
        }
        debug!(%chain, %next, "detached following part");

        self.release_interrupted_relations(chain);
    }

    /// A new connectable now follows `chain`; kill the relations that expect
    /// their next associate right there
    fn release_interrupted_relations(&mut self, chain: PropositionId) {
        let mut current = Connectable::Proposition(chain);
        while let Some(relation) = self.pericope.super_ordinated_relation(current) {
            let is_last = self
                .pericope
                .relation(relation)
                .and_then(|r| r.last_associate())
                == Some(current);
            if !is_last {
                let killed = self.pericope.kill_relation(relation);
                debug!(?killed, "killed relations interrupted by split");
                break;
            }
            current = Connectable::Relation(relation);
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::errors::EditError;
    use crate::handler::ModelHandler;
    use crate::notification::{ChangeRecorder, ModelChange};
    use hermeneutix_model::{
        AssociateRole, ClauseItemId, LanguageModel, Pericope, RelationTemplate, Slot,
        SyntacticalFunction,
    };

    fn handler(text: &str) -> ModelHandler {
        ModelHandler::new(Pericope::from_text(text, LanguageModel::default()), vec![])
    }

    fn template() -> RelationTemplate {
        RelationTemplate::new(AssociateRole::high("Action"), AssociateRole::low("Purpose"))
    }

    #[test]
    fn test_split_inside_items_creates_part() {
        let recorder = ChangeRecorder::new();
        let mut handler = ModelHandler::new(
            Pericope::from_text("a b c\nd", LanguageModel::default()),
            vec![Box::new(recorder.clone())],
        );
        let roots = handler.pericope().roots().to_vec();
        handler
            .indent_proposition_under_parent(roots[1], roots[0], SyntacticalFunction::new("O", "Object"))
            .unwrap();
        recorder.clear();
        let first_item = handler.pericope().proposition(roots[0]).unwrap().items[0].id;

        let created = handler.split_proposition(roots[0], first_item).unwrap();

        let pericope = handler.pericope();
        let target = pericope.proposition(roots[0]).unwrap();
        let second = pericope.proposition(created).unwrap();
        assert_eq!(target.text(), "a");
        assert_eq!(second.text(), "b c");
        assert_eq!(target.part_after_arrow, Some(created));
        assert!(target.later_children.is_empty());
        assert_eq!(second.later_children, vec![roots[1]]);
        assert_eq!(pericope.parent_of(roots[1]), Some(created));
        assert_eq!(pericope.text_order(), vec![roots[0], created, roots[1]]);
        assert_eq!(recorder.changes(), vec![ModelChange::Full]);
        assert!(pericope.check_invariants().is_ok());
    }

    #[test]
    fn test_split_at_last_item_detaches_next_part() {
        let mut handler = handler("a\nb\nc");
        let roots = handler.pericope().roots().to_vec();
        handler.merge_propositions(roots[0], roots[2]).unwrap();
        let last_item = handler.pericope().proposition(roots[0]).unwrap().items[0].id;

        let detached = handler.split_proposition(roots[0], last_item).unwrap();

        let pericope = handler.pericope();
        assert_eq!(detached, roots[2]);
        assert_eq!(pericope.roots(), &[roots[0], roots[2]]);
        assert_eq!(pericope.proposition(roots[0]).unwrap().part_after_arrow, None);
        assert_eq!(pericope.proposition(roots[2]).unwrap().part_before_arrow, None);
        assert_eq!(
            pericope.position_of(roots[1]).map(|p| p.slot),
            Some(Slot::Prior(roots[2]))
        );
        assert_eq!(pericope.text_order(), roots);
        assert!(pericope.check_invariants().is_ok());
    }

    #[test]
    fn test_detached_part_takes_chain_function() {
        let mut handler = handler("x\na b");
        let roots = handler.pericope().roots().to_vec();
        let rel = SyntacticalFunction::new("Rel", "Relative clause");
        handler.indent_proposition_under_parent(roots[1], roots[0], rel.clone()).unwrap();
        let item = handler.pericope().proposition(roots[1]).unwrap().items[0].id;

        let part = handler.split_proposition(roots[1], item).unwrap();
        assert_eq!(handler.pericope().proposition(part).unwrap().function, None);
        let detached = handler.split_proposition(roots[1], item).unwrap();

        let pericope = handler.pericope();
        assert_eq!(detached, part);
        assert_eq!(
            pericope.proposition(roots[0]).unwrap().later_children,
            vec![roots[1], part]
        );
        assert_eq!(pericope.proposition(part).unwrap().function, Some(rel.clone()));
        assert_eq!(pericope.proposition(roots[1]).unwrap().function, Some(rel));
        assert!(pericope.check_invariants().is_ok());
    }

    #[test]
    fn test_split_then_merge_restores_proposition() {
        let mut handler = handler("a b c\nd");
        let roots = handler.pericope().roots().to_vec();
        handler.require_mut(roots[0]).unwrap().label = Some("1".into());
        let before = handler.pericope().clone();
        let middle = before.proposition(roots[0]).unwrap().items[1].id;

        let created = handler.split_proposition(roots[0], middle).unwrap();
        handler.merge_propositions(roots[0], created).unwrap();

        let restored = handler.pericope().proposition(roots[0]).unwrap();
        assert_eq!(restored, before.proposition(roots[0]).unwrap());
        assert_eq!(handler.pericope().roots(), before.roots());
    }

    #[test]
    fn test_split_rejects_foreign_item() {
        let mut handler = handler("a b\nc");
        let roots = handler.pericope().roots().to_vec();
        let foreign = handler.pericope().proposition(roots[1]).unwrap().items[0].id;

        let error = handler.split_proposition(roots[0], foreign).unwrap_err();
        assert_eq!(
            error,
            EditError::ItemNotInProposition {
                item: foreign,
                proposition: roots[0]
            }
        );
        assert!(error.is_contract_violation());
        assert_eq!(
            handler.split_proposition(roots[1], foreign),
            Err(EditError::SplitNothingToSplit(roots[1]))
        );
        assert!(handler
            .split_proposition(roots[1], ClauseItemId::new(999))
            .is_err());
    }

    #[test]
    fn test_split_kills_relation_expecting_next_associate() {
        let mut handler = handler("a\nb\nc\nd");
        let roots = handler.pericope().roots().to_vec();
        handler.merge_propositions(roots[0], roots[2]).unwrap();
        let relation = handler
            .create_relation(&[roots[0].into(), roots[1].into()], &template())
            .unwrap();
        let item = handler.pericope().proposition(roots[0]).unwrap().items[0].id;

        handler.split_proposition(roots[0], item).unwrap();

        let pericope = handler.pericope();
        assert!(pericope.relation(relation).is_none());
        assert!(pericope.proposition(roots[0]).unwrap().role.is_none());
        assert!(pericope.check_invariants().is_ok());
    }

    #[test]
    fn test_split_keeps_relation_ending_with_chain() {
        let mut handler = handler("x\na\nb\nc");
        let roots = handler.pericope().roots().to_vec();
        handler.merge_propositions(roots[1], roots[3]).unwrap();
        let relation = handler
            .create_relation(&[roots[0].into(), roots[1].into()], &template())
            .unwrap();
        let item = handler.pericope().proposition(roots[1]).unwrap().items[0].id;

        handler.split_proposition(roots[1], item).unwrap();

        let pericope = handler.pericope();
        assert!(pericope.relation(relation).is_some());
        assert_eq!(pericope.roots(), &[roots[0], roots[1], roots[3]]);
        assert!(pericope.check_invariants().is_ok());
    }
}
