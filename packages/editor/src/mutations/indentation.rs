//! Indenting propositions beneath each other and moving them back up.

use crate::errors::{EditError, EditResult};
use crate::handler::ModelHandler;
use crate::notification::ModelChange;
use hermeneutix_model::{PropositionId, Slot, SyntacticalFunction};
use tracing::debug;

/// Propositions moving one level up and where they go
struct UnindentPlan {
    moved: Vec<PropositionId>,
    destination: Slot,
    insert_at: usize,
}

impl ModelHandler {
    /// Make `target` a child of `parent` with the given function.
    ///
    /// The target becomes the last later child of the parent's last part if
    /// it directly follows the parent's subtree, or the first prior child of
    /// the parent's first part if it directly precedes it. The parent may sit
    /// deeper than the target, as long as it lies on the edge of the target's
    /// list neighbour facing the target.
    pub fn indent_proposition_under_parent(
        &mut self,
        target: PropositionId,
        parent: PropositionId,
        function: SyntacticalFunction,
    ) -> EditResult<()> {
        self.require(target)?;
        self.require(parent)?;

        let pericope = &self.pericope;
        let target = pericope.first_part(target);
        let parent_parts = pericope.parts(parent);
        let parent_first = parent_parts[0];

        if target == parent_first {
            return Err(EditError::IndentationNotAdjacent { target, parent });
        }
        if let Some(current_parent) = pericope.parent_of(target) {
            if parent_parts.contains(&current_parent) {
                self.require_mut(target)?.function = Some(function);
                self.notify(ModelChange::Proposition(target));
                return Ok(());
            }
        }
        if pericope.is_descendant_of(parent_first, target) {
            return Err(EditError::IndentationCycle { target, parent });
        }

        let position = pericope
            .position_of(target)
            .ok_or(EditError::UnknownProposition(target))?;
        let siblings = pericope.list(position.slot);
        let reaches_parent = |neighbour: PropositionId| {
            neighbour == parent_first || pericope.is_descendant_of(parent_first, neighbour)
        };

        let mut destination = None;
        if position.index > 0 {
            let neighbour = siblings[position.index - 1];
            if reaches_parent(neighbour)
                && pericope.subtree_end(neighbour) == pericope.subtree_end(parent_first)
            {
                let last = pericope.last_part(parent_first);
                destination = Some((Slot::Later(last), pericope.list(Slot::Later(last)).len()));
            }
        }
        if destination.is_none() && position.index + 1 < siblings.len() {
            let neighbour = siblings[position.index + 1];
            if reaches_parent(neighbour)
                && pericope.subtree_start(neighbour) == pericope.subtree_start(parent_first)
            {
                destination = Some((Slot::Prior(parent_first), 0));
            }
        }
        let Some((slot, index)) = destination else {
            return Err(EditError::IndentationNotAdjacent { target, parent });
        };

        self.pericope.detach(target);
        self.pericope.attach(target, slot, index);
        self.require_mut(target)?.function = Some(function);
        debug!(%target, %parent_first, ?slot, "indented proposition");
        self.notify(ModelChange::Full);
        Ok(())
    }

    /// Move `target` one level up, together with every sibling between it and
    /// the outer edge of its child list
    pub fn remove_one_indentation(&mut self, target: PropositionId) -> EditResult<()> {
        let plan = self.unindent_plan(target)?;
        for (offset, moved) in plan.moved.iter().enumerate() {
            self.pericope.detach(*moved);
            self.pericope.attach(*moved, plan.destination, plan.insert_at + offset);
            self.require_mut(*moved)?.function = None;
        }
        debug!(moved = plan.moved.len(), destination = ?plan.destination, "removed one indentation");
        self.notify(ModelChange::Full);
        Ok(())
    }

    /// Whether removing the indentation of `target` would move other
    /// propositions as well
    pub fn remove_one_indentation_affects_others(&self, target: PropositionId) -> EditResult<bool> {
        Ok(self.unindent_plan(target)?.moved.len() > 1)
    }

    fn unindent_plan(&self, target: PropositionId) -> EditResult<UnindentPlan> {
        self.require(target)?;
        let pericope = &self.pericope;
        let target = pericope.first_part(target);
        let position = pericope
            .position_of(target)
            .ok_or(EditError::UnknownProposition(target))?;

        let owner = match position.slot {
            Slot::Root => return Err(EditError::NotIndented(target)),
            Slot::Prior(owner) | Slot::Later(owner) => owner,
        };
        if pericope.is_enclosed_slot(position.slot) {
            return Err(EditError::EnclosedChild(target));
        }
        let owner_position = pericope
            .position_of(owner)
            .ok_or(EditError::UnknownProposition(owner))?;

        let siblings = pericope.list(position.slot);
        let (moved, insert_at) = match position.slot {
            Slot::Prior(_) => (siblings[..=position.index].to_vec(), owner_position.index),
            _ => (siblings[position.index..].to_vec(), owner_position.index + 1),
        };
        Ok(UnindentPlan {
            moved,
            destination: owner_position.slot,
            insert_at,
        })
    }
}
