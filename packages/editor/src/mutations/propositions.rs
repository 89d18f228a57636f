//! Adding and removing top-level propositions.

use crate::errors::{EditError, EditResult};
use crate::handler::ModelHandler;
use crate::notification::ModelChange;
use hermeneutix_model::{Pericope, PropositionId};
use std::collections::HashSet;
use tracing::{debug, info};

impl ModelHandler {
    /// Parse `text` into new top-level propositions, in front of or behind
    /// the existing ones
    pub fn add_new_propositions(&mut self, text: &str, in_front: bool) -> Vec<PropositionId> {
        let created = self.pericope.add_text(text, in_front);
        if !created.is_empty() {
            info!(count = created.len(), in_front, "added propositions");
            self.notify(ModelChange::Full);
        }
        created
    }

    /// Move every element of `other` into this pericope.
    ///
    /// Returns the new ids of the other pericope's top-level propositions.
    pub fn merge_with_other_pericope(
        &mut self,
        other: Pericope,
        in_front: bool,
    ) -> EditResult<Vec<PropositionId>> {
        if self.pericope.language != other.language {
            return Err(EditError::LanguageModelMismatch {
                ours: self.pericope.language.name.clone(),
                theirs: other.language.name.clone(),
            });
        }
        let added = self.pericope.absorb(other, in_front);
        if !added.is_empty() {
            info!(count = added.len(), in_front, "merged other pericope");
            self.notify(ModelChange::Full);
        }
        Ok(added)
    }

    /// Delete top-level propositions that are neither split nor have
    /// children
    pub fn remove_propositions(&mut self, targets: &[PropositionId]) -> EditResult<()> {
        if targets.is_empty() {
            return Err(EditError::NothingSelected);
        }
        for target in targets {
            self.require(*target)?;
        }
        let selected: HashSet<_> = targets.iter().copied().collect();
        if self.pericope.roots().iter().all(|root| selected.contains(root)) {
            return Err(EditError::NoneLeft);
        }
        for target in targets {
            let proposition = self.require(*target)?;
            if proposition.parent.is_some() {
                return Err(EditError::RemoveIndented(*target));
            }
            if !proposition.is_first_part() || !proposition.is_last_part() {
                return Err(EditError::RemoveSplitPart(*target));
            }
            if proposition.has_children() {
                return Err(EditError::RemoveHasChildren(*target));
            }
        }

        for target in selected {
            if let Some(relation) = self
                .pericope
                .proposition(target)
                .and_then(|p| p.super_ordinated_relation)
            {
                self.pericope.kill_relation(relation);
            }
            self.pericope.detach(target);
            self.pericope.discard_proposition(target);
            debug!(%target, "removed proposition");
        }
        self.notify(ModelChange::Full);
        Ok(())
    }
}
