//! Merging two propositions into one.
//!
//! The two propositions are ordered by reading position first. Depending on
//! how they touch, the later one is either joined into the earlier one
//! (items concatenated) or linked behind it as a further part, when other
//! propositions end up enclosed between them.

use crate::errors::{EditError, EditResult};
use crate::handler::ModelHandler;
use crate::notification::ModelChange;
use hermeneutix_model::{PropositionId, Slot};
use tracing::debug;

/// How the earlier proposition `x` and the later proposition `y` touch
#[derive(Debug, Clone, PartialEq, Eq)]
enum Adjacency {
    /// `y` is the part right after `x` in one chain
    SameChain,
    /// Both chains sit in one list; `between` lies between them
    Siblings { between: Vec<PropositionId> },
    /// `y` is a later child of part `x`
    LaterChild { index: usize },
    /// The chain of `x` is a prior child of part `y`
    PriorChild { index: usize },
    /// `x` is the last later child of one part, `y` the first prior child of
    /// the following part
    EnclosedNeighbours,
    /// `y` is the first prior child of the part following `x`
    PriorChildOfNextPart,
    /// The chain of `x` is the last later child of `owner`, the part right
    /// before `y`
    LaterChildOfPreviousPart { owner: PropositionId },
}

impl ModelHandler {
    /// Merge two propositions into one
    pub fn merge_propositions(&mut self, a: PropositionId, b: PropositionId) -> EditResult<()> {
        self.require(a)?;
        self.require(b)?;
        if a == b {
            return Ok(());
        }

        let positions = self.pericope.text_positions();
        let (x, y) = match (positions.get(&a), positions.get(&b)) {
            (Some(pa), Some(pb)) if pa < pb => (a, b),
            (Some(_), Some(_)) => (b, a),
            (None, _) => return Err(EditError::UnknownProposition(a)),
            (_, None) => return Err(EditError::UnknownProposition(b)),
        };

        let adjacency = self.adjacency(x, y)?;
        debug!(%x, %y, ?adjacency, "merging propositions");
        match adjacency {
            Adjacency::SameChain => self.join_chain_parts(x, y),
            Adjacency::Siblings { between } => self.merge_siblings(x, y, between),
            Adjacency::LaterChild { index } => self.merge_later_child(x, y, index),
            Adjacency::PriorChild { index } => self.merge_prior_child(x, y, index),
            Adjacency::EnclosedNeighbours | Adjacency::PriorChildOfNextPart => {
                let x_first = self.pericope.first_part(x);
                self.hand_over_relation(y, x_first);
                self.pericope.detach(y);
                self.splice_after(x, y);
            }
            Adjacency::LaterChildOfPreviousPart { owner } => {
                self.merge_into_previous_part(owner, x, y)
            }
        }
        self.notify(ModelChange::Full);
        Ok(())
    }

    fn adjacency(&self, x: PropositionId, y: PropositionId) -> EditResult<Adjacency> {
        let pericope = &self.pericope;
        let x_first = pericope.first_part(x);
        let y_first = pericope.first_part(y);
        let x_prop = self.require(x)?;
        let y_prop = self.require(y)?;

        if x_first == y_first {
            if x_prop.part_after_arrow != Some(y) {
                return Err(EditError::MergeNotAdjacent(x, y));
            }
            if !x_prop.later_children.is_empty() || !y_prop.prior_children.is_empty() {
                return Err(EditError::MergeEnclosedChildren(x, y));
            }
            return Ok(Adjacency::SameChain);
        }

        let x_is_last = x_prop.is_last_part();
        let y_is_first = y_prop.is_first_part();
        let x_position = pericope.position_of(x_first);
        let y_position = pericope.position_of(y_first);

        if let (Some(xp), Some(yp)) = (x_position, y_position) {
            if xp.slot == yp.slot && x_is_last && y_is_first && xp.index < yp.index {
                let between = pericope.list(xp.slot)[xp.index + 1..yp.index].to_vec();
                return Ok(Adjacency::Siblings { between });
            }
        }

        if let Some(yp) = y_position {
            if y_is_first && yp.slot == Slot::Later(x) {
                return Ok(Adjacency::LaterChild { index: yp.index });
            }
        }

        if let Some(xp) = x_position {
            if x_is_last && xp.slot == Slot::Prior(y) {
                return Ok(Adjacency::PriorChild { index: xp.index });
            }
        }

        if let (Some(xp), Some(yp)) = (x_position, y_position) {
            if let (Slot::Later(x_owner), Slot::Prior(y_owner)) = (xp.slot, yp.slot) {
                let owners_linked = pericope
                    .proposition(x_owner)
                    .map(|owner| owner.part_after_arrow == Some(y_owner))
                    .unwrap_or(false);
                let x_is_outermost = xp.index + 1 == pericope.list(xp.slot).len();
                if owners_linked && x_is_last && y_is_first && x_is_outermost && yp.index == 0 {
                    return Ok(Adjacency::EnclosedNeighbours);
                }
            }
        }

        if let Some(yp) = y_position {
            let next_part = x_prop.part_after_arrow.map(Slot::Prior);
            if y_is_first
                && yp.index == 0
                && next_part == Some(yp.slot)
                && x_prop.later_children.is_empty()
            {
                return Ok(Adjacency::PriorChildOfNextPart);
            }
        }

        if let Some(xp) = x_position {
            if let Slot::Later(owner) = xp.slot {
                let owner_precedes_y = pericope
                    .proposition(owner)
                    .map(|owner| owner.part_after_arrow == Some(y))
                    .unwrap_or(false);
                let x_is_outermost = xp.index + 1 == pericope.list(xp.slot).len();
                if owner_precedes_y
                    && x_is_last
                    && x_is_outermost
                    && y_prop.prior_children.is_empty()
                {
                    return Ok(Adjacency::LaterChildOfPreviousPart { owner });
                }
            }
        }

        Err(EditError::MergeNotAdjacent(x, y))
    }

    /// Two consecutive parts of one chain without anything between them
    fn join_chain_parts(&mut self, x: PropositionId, y: PropositionId) {
        self.join_into(x, y);
    }

    fn merge_siblings(&mut self, x: PropositionId, y: PropositionId, between: Vec<PropositionId>) {
        let x_first = self.pericope.first_part(x);
        self.hand_over_relation(y, x_first);
        self.pericope.detach(y);
        for enclosed in &between {
            self.pericope.detach(*enclosed);
            if let Some(proposition) = self.pericope.proposition_mut(*enclosed) {
                proposition.function = None;
            }
        }
        let mut prior = between;
        prior.extend(self.pericope.take_children(Slot::Prior(y)));
        self.pericope.set_children(Slot::Prior(y), prior);
        self.splice_after(x, y);
    }

    fn merge_later_child(&mut self, x: PropositionId, y: PropositionId, index: usize) {
        let x_first = self.pericope.first_part(x);
        self.hand_over_relation(y, x_first);

        let mut siblings = self.pericope.take_children(Slot::Later(x));
        let following = siblings.split_off(index + 1);
        siblings.truncate(index);
        self.pericope.set_children(Slot::Later(x), siblings);
        if let Some(proposition) = self.pericope.proposition_mut(y) {
            proposition.parent = None;
        }

        let y_last = self.pericope.last_part(y);
        let mut later = self.pericope.take_children(Slot::Later(y_last));
        later.extend(following);
        self.pericope.set_children(Slot::Later(y_last), later);
        self.splice_after(x, y);
    }

    fn merge_prior_child(&mut self, x: PropositionId, y: PropositionId, index: usize) {
        let x_first = self.pericope.first_part(x);
        let y_is_first = self
            .pericope
            .proposition(y)
            .map(|p| p.is_first_part())
            .unwrap_or(false);

        let mut before = self.pericope.take_children(Slot::Prior(y));
        let after = before.split_off(index + 1);
        before.truncate(index);

        let mut prior = before;
        prior.extend(self.pericope.take_children(Slot::Prior(x_first)));
        self.pericope.set_children(Slot::Prior(x_first), prior);
        let mut later = self.pericope.take_children(Slot::Later(x));
        later.extend(after);
        self.pericope.set_children(Slot::Later(x), later);

        if y_is_first {
            // the chain of x takes over the place of y
            self.hand_over_relation(y, x_first);
            let function = self
                .pericope
                .proposition_mut(y)
                .and_then(|p| p.function.take());
            if let Some(position) = self.pericope.detach(y) {
                self.pericope.attach(x_first, position.slot, position.index);
            }
            if let Some(proposition) = self.pericope.proposition_mut(x_first) {
                proposition.function = function;
            }
        } else {
            // the chain of x becomes the parts in front of y
            let y_chain = self.pericope.first_part(y);
            self.hand_over_relation(x_first, y_chain);
            let previous = self.pericope.proposition(y).and_then(|p| p.part_before_arrow);
            if let Some(proposition) = self.pericope.proposition_mut(x_first) {
                proposition.parent = None;
            }
            if let Some(previous) = previous {
                self.link_parts(previous, Some(x_first));
            }
        }
        if let Some(proposition) = self.pericope.proposition_mut(y) {
            proposition.part_before_arrow = None;
        }
        self.splice_after(x, y);
    }

    /// The chain of `x` leaves the later children of `owner` and becomes the
    /// parts between `owner` and `y`
    fn merge_into_previous_part(&mut self, owner: PropositionId, x: PropositionId, y: PropositionId) {
        let x_first = self.pericope.first_part(x);
        let chain = self.pericope.first_part(owner);
        self.hand_over_relation(x_first, chain);
        self.pericope.detach(x_first);
        self.link_parts(owner, Some(x_first));
        if let Some(proposition) = self.pericope.proposition_mut(y) {
            proposition.part_before_arrow = None;
        }
        self.splice_after(x, y);
    }

    /// Put the detached chain starting at `y` right after part `x`.
    ///
    /// Joins `y` into `x` when nothing would be enclosed between them,
    /// otherwise links it as the next part.
    fn splice_after(&mut self, x: PropositionId, y: PropositionId) {
        let old_next = self.pericope.proposition(x).and_then(|p| p.part_after_arrow);
        let y_last = self.pericope.last_part(y);
        let nothing_between = self
            .pericope
            .proposition(x)
            .map(|p| p.later_children.is_empty())
            .unwrap_or(false)
            && self
                .pericope
                .proposition(y)
                .map(|p| p.prior_children.is_empty())
                .unwrap_or(false);

        if nothing_between {
            let tail = if y_last == y { x } else { y_last };
            self.link_parts(x, Some(y));
            self.join_into(x, y);
            if let Some(next) = old_next {
                self.link_parts(tail, Some(next));
            }
        } else {
            self.link_parts(x, Some(y));
            if let Some(next) = old_next {
                self.link_parts(y_last, Some(next));
            }
        }
    }

    /// Join part `y` (linked right after `x`, no children between them) into `x`
    fn join_into(&mut self, x: PropositionId, y: PropositionId) {
        let Some(removed) = self.pericope.discard_proposition(y) else {
            return;
        };
        let later = removed.later_children.clone();
        if let Some(proposition) = self.pericope.proposition_mut(x) {
            proposition.items.extend(removed.items.iter().cloned());
            proposition.absorb_text_fields(&removed);
            proposition.part_after_arrow = None;
        }
        self.pericope.set_children(Slot::Later(x), later);
        if let Some(next) = removed.part_after_arrow {
            self.link_parts(x, Some(next));
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::errors::EditError;
    use crate::handler::ModelHandler;
    use hermeneutix_model::{
        AssociateRole, LanguageModel, Pericope, RelationTemplate, Slot, SyntacticalFunction,
    };

    fn handler(text: &str) -> ModelHandler {
        ModelHandler::new(Pericope::from_text(text, LanguageModel::default()), vec![])
    }

    fn rel() -> SyntacticalFunction {
        SyntacticalFunction::new("Rel", "Relative clause")
    }

    fn texts(handler: &ModelHandler) -> Vec<String> {
        let pericope = handler.pericope();
        pericope
            .text_order()
            .into_iter()
            .map(|id| pericope.proposition(id).unwrap().text())
            .collect()
    }

    #[test]
    fn test_merge_with_itself_is_a_no_op() {
        let mut handler = handler("a\nb");
        let before = handler.pericope().clone();
        let first = before.roots()[0];

        handler.merge_propositions(first, first).unwrap();

        assert_eq!(handler.pericope(), &before);
    }

    #[test]
    fn test_merge_adjacent_siblings_joins_items() {
        let mut handler = handler("a b\nc\nd");
        let roots = handler.pericope().roots().to_vec();
        handler.require_mut(roots[0]).unwrap().comment = Some("one".into());
        handler.require_mut(roots[1]).unwrap().comment = Some("two".into());

        // argument order does not matter
        handler.merge_propositions(roots[1], roots[0]).unwrap();

        let pericope = handler.pericope();
        assert_eq!(pericope.roots(), &[roots[0], roots[2]]);
        let merged = pericope.proposition(roots[0]).unwrap();
        assert_eq!(merged.text(), "a b c");
        assert_eq!(merged.comment.as_deref(), Some("one\ntwo"));
        assert!(pericope.proposition(roots[1]).is_none());
        assert!(pericope.check_invariants().is_ok());
    }

    #[test]
    fn test_merge_with_enclosed_sibling_links_parts() {
        let mut handler = handler("1 2\t3\n4\t\t5\n6\n7\t8 9\n10");
        let roots = handler.pericope().roots().to_vec();

        handler.merge_propositions(roots[0], roots[2]).unwrap();

        let pericope = handler.pericope();
        assert_eq!(pericope.roots(), &[roots[0], roots[3], roots[4]]);
        let first = pericope.proposition(roots[0]).unwrap();
        let trailing = pericope.proposition(roots[2]).unwrap();
        assert_eq!(first.part_after_arrow, Some(roots[2]));
        assert_eq!(trailing.part_before_arrow, Some(roots[0]));
        assert_eq!(trailing.prior_children, vec![roots[1]]);
        assert_eq!(pericope.parent_of(roots[1]), Some(roots[2]));
        assert_eq!(texts(&handler), vec!["1 2 3", "4 5", "6", "7 8 9", "10"]);
        assert!(handler.pericope().check_invariants().is_ok());
    }

    #[test]
    fn test_merge_consecutive_parts_collapses_chain() {
        let mut handler = handler("a\nb\nc");
        let roots = handler.pericope().roots().to_vec();
        handler.merge_propositions(roots[0], roots[2]).unwrap();

        // b is enclosed between the two parts
        assert_eq!(
            handler.merge_propositions(roots[0], roots[2]),
            Err(EditError::MergeEnclosedChildren(roots[0], roots[2]))
        );

        // merge the enclosed one into the trailing part, then the parts
        handler.merge_propositions(roots[1], roots[2]).unwrap();
        assert!(handler.pericope().check_invariants().is_ok());
        assert_eq!(handler.pericope().roots(), &[roots[0]]);
        assert_eq!(texts(&handler), vec!["a", "b c"]);
    }

    #[test]
    fn test_merge_later_child_into_parent() {
        let mut handler = handler("a\nb\nc");
        let roots = handler.pericope().roots().to_vec();
        handler.indent_proposition_under_parent(roots[1], roots[0], rel()).unwrap();
        handler.indent_proposition_under_parent(roots[2], roots[0], rel()).unwrap();

        handler.merge_propositions(roots[0], roots[1]).unwrap();

        let pericope = handler.pericope();
        let merged = pericope.proposition(roots[0]).unwrap();
        assert_eq!(merged.text(), "a b");
        assert_eq!(merged.later_children, vec![roots[2]]);
        assert_eq!(pericope.parent_of(roots[2]), Some(roots[0]));
        assert!(pericope.check_invariants().is_ok());
    }

    #[test]
    fn test_merge_second_later_child_encloses_first() {
        let mut handler = handler("a\nb\nc\nd");
        let roots = handler.pericope().roots().to_vec();
        for child in &roots[1..] {
            handler.indent_proposition_under_parent(*child, roots[0], rel()).unwrap();
        }

        handler.merge_propositions(roots[0], roots[2]).unwrap();

        let pericope = handler.pericope();
        let first = pericope.proposition(roots[0]).unwrap();
        assert_eq!(first.part_after_arrow, Some(roots[2]));
        assert_eq!(first.later_children, vec![roots[1]]);
        assert_eq!(pericope.proposition(roots[2]).unwrap().later_children, vec![roots[3]]);
        assert_eq!(pericope.proposition(roots[2]).unwrap().function, None);
        assert_eq!(texts(&handler), vec!["a", "b", "c", "d"]);
        assert!(pericope.check_invariants().is_ok());
    }

    #[test]
    fn test_merge_prior_child_takes_parent_position() {
        let mut handler = handler("x\na\nb");
        let roots = handler.pericope().roots().to_vec();
        handler.indent_proposition_under_parent(roots[1], roots[2], rel()).unwrap();
        handler.indent_proposition_under_parent(roots[2], roots[0], rel()).unwrap();

        handler.merge_propositions(roots[2], roots[1]).unwrap();

        let pericope = handler.pericope();
        assert_eq!(pericope.proposition(roots[0]).unwrap().later_children, vec![roots[1]]);
        let merged = pericope.proposition(roots[1]).unwrap();
        assert_eq!(merged.text(), "a b");
        assert_eq!(merged.function, Some(rel()));
        assert!(pericope.proposition(roots[2]).is_none());
        assert!(pericope.check_invariants().is_ok());
    }

    #[test]
    fn test_merge_first_prior_child_links_over_second() {
        let mut handler = handler("a\nb\nc");
        let roots = handler.pericope().roots().to_vec();
        handler.indent_proposition_under_parent(roots[1], roots[2], rel()).unwrap();
        handler.indent_proposition_under_parent(roots[0], roots[2], rel()).unwrap();

        handler.merge_propositions(roots[0], roots[2]).unwrap();

        let pericope = handler.pericope();
        assert_eq!(pericope.roots(), &[roots[0]]);
        let first = pericope.proposition(roots[0]).unwrap();
        assert_eq!(first.part_after_arrow, Some(roots[2]));
        assert_eq!(first.later_children, vec![roots[1]]);
        assert_eq!(first.function, None);
        assert_eq!(texts(&handler), vec!["a", "b", "c"]);
        assert!(pericope.check_invariants().is_ok());
    }

    #[test]
    fn test_merge_enclosed_neighbours() {
        let mut handler = handler("a\nb\nc\nd");
        let roots = handler.pericope().roots().to_vec();
        handler.indent_proposition_under_parent(roots[1], roots[0], rel()).unwrap();
        // a -> d with b enclosed after a and c enclosed before d
        handler.merge_propositions(roots[0], roots[3]).unwrap();
        assert_eq!(
            handler.pericope().position_of(roots[2]).map(|p| p.slot),
            Some(Slot::Prior(roots[3]))
        );

        handler.merge_propositions(roots[1], roots[2]).unwrap();

        let pericope = handler.pericope();
        assert_eq!(pericope.proposition(roots[1]).unwrap().text(), "b c");
        assert!(pericope.proposition(roots[3]).unwrap().prior_children.is_empty());
        assert!(pericope.check_invariants().is_ok());
    }

    #[test]
    fn test_merge_part_with_first_prior_child_of_next_part() {
        let mut handler = handler("1 2\t3\n4\t\t5\n6\n7\t8 9\n10");
        let roots = handler.pericope().roots().to_vec();
        handler.merge_propositions(roots[0], roots[2]).unwrap();

        // 4 5 now sits between the two parts, right after 1 2 3
        handler.merge_propositions(roots[0], roots[1]).unwrap();

        let pericope = handler.pericope();
        assert_eq!(pericope.roots(), &[roots[0], roots[3], roots[4]]);
        let first = pericope.proposition(roots[0]).unwrap();
        assert_eq!(first.text(), "1 2 3 4 5");
        assert_eq!(first.part_after_arrow, Some(roots[2]));
        assert!(pericope.proposition(roots[2]).unwrap().prior_children.is_empty());
        assert!(pericope.proposition(roots[1]).is_none());
        assert_eq!(texts(&handler), vec!["1 2 3 4 5", "6", "7 8 9", "10"]);
        assert!(pericope.check_invariants().is_ok());
    }

    #[test]
    fn test_merge_last_later_child_with_next_part_of_parent() {
        let mut handler = handler("a\nb\nc\nd");
        let roots = handler.pericope().roots().to_vec();
        for child in &roots[1..] {
            handler.indent_proposition_under_parent(*child, roots[0], rel()).unwrap();
        }
        handler.merge_propositions(roots[0], roots[2]).unwrap();

        // b is the last later child of a, c the part right after a
        handler.merge_propositions(roots[1], roots[2]).unwrap();

        let pericope = handler.pericope();
        assert_eq!(pericope.roots(), &[roots[0]]);
        let first = pericope.proposition(roots[0]).unwrap();
        assert!(first.later_children.is_empty());
        assert_eq!(first.part_after_arrow, Some(roots[1]));
        let merged = pericope.proposition(roots[1]).unwrap();
        assert_eq!(merged.text(), "b c");
        assert_eq!(merged.part_before_arrow, Some(roots[0]));
        assert_eq!(merged.function, None);
        assert_eq!(merged.later_children, vec![roots[3]]);
        assert_eq!(pericope.parent_of(roots[3]), Some(roots[1]));
        assert!(pericope.proposition(roots[2]).is_none());
        assert_eq!(texts(&handler), vec!["a", "b c", "d"]);
        assert!(pericope.check_invariants().is_ok());
    }

    #[test]
    fn test_merge_rejects_distant_propositions() {
        let mut handler = handler("a\nb\nc");
        let roots = handler.pericope().roots().to_vec();
        handler.indent_proposition_under_parent(roots[1], roots[0], rel()).unwrap();

        // b is nested under a, c sits on the root level after it
        assert_eq!(
            handler.merge_propositions(roots[1], roots[2]),
            Err(EditError::MergeNotAdjacent(roots[1], roots[2]))
        );
    }

    #[test]
    fn test_merge_transfers_or_kills_relations() {
        let mut handler = handler("a\nb\nc\nd");
        let roots = handler.pericope().roots().to_vec();
        let template = RelationTemplate::new(AssociateRole::high("Action"), AssociateRole::low("Purpose"));
        let relation = handler
            .create_relation(&[roots[1].into(), roots[2].into()], &template)
            .unwrap();

        // a has no relation: b's relation moves over to it
        handler.merge_propositions(roots[0], roots[1]).unwrap();
        let pericope = handler.pericope();
        assert_eq!(pericope.relation(relation).unwrap().associates[0], roots[0].into());
        assert_eq!(pericope.proposition(roots[0]).unwrap().role, Some(AssociateRole::high("Action")));
        assert!(pericope.check_invariants().is_ok());

        // merging the two associates kills the relation
        handler.merge_propositions(roots[0], roots[2]).unwrap();
        let pericope = handler.pericope();
        assert!(pericope.relation(relation).is_none());
        assert!(pericope.proposition(roots[0]).unwrap().role.is_none());
        assert!(pericope.check_invariants().is_ok());
    }
}
