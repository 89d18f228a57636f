//! Whole-document consistency check.
//!
//! Run after loading a file and by tests after every structural edit.

use crate::error::{ModelError, ModelResult};
use crate::ids::PropositionId;
use crate::pericope::Pericope;
use crate::relation::Connectable;
use std::collections::HashSet;

impl Pericope {
    pub fn check_invariants(&self) -> ModelResult<()> {
        let mut seen = HashSet::new();
        let mut item_ids = HashSet::new();
        let mut pending: Vec<(PropositionId, Option<PropositionId>)> =
            self.roots.iter().map(|root| (*root, None)).collect();

        while let Some((first, expected_parent)) = pending.pop() {
            let proposition = self
                .proposition(first)
                .ok_or_else(|| ModelError::invariant(format!("{first} is listed but missing")))?;
            if !proposition.is_first_part() {
                return Err(ModelError::invariant(format!(
                    "{first} is listed as a child but is not a first part"
                )));
            }
            if proposition.parent != expected_parent {
                return Err(ModelError::invariant(format!(
                    "{first} has parent {:?}, expected {:?}",
                    proposition.parent, expected_parent
                )));
            }

            let mut previous: Option<PropositionId> = None;
            let mut current = Some(first);
            while let Some(part_id) = current {
                let part = self
                    .proposition(part_id)
                    .ok_or_else(|| ModelError::invariant(format!("part {part_id} is missing")))?;
                if !seen.insert(part_id) {
                    return Err(ModelError::invariant(format!("{part_id} is reachable twice")));
                }
                if part.items.is_empty() {
                    return Err(ModelError::invariant(format!("{part_id} has no clause items")));
                }
                for item in &part.items {
                    if !item_ids.insert(item.id) {
                        return Err(ModelError::invariant(format!("{} is used twice", item.id)));
                    }
                    if item.id.raw() > self.ids.last() {
                        return Err(ModelError::invariant(format!("{} exceeds the id counter", item.id)));
                    }
                }
                if part.part_before_arrow != previous {
                    return Err(ModelError::invariant(format!(
                        "{part_id} has a broken part_before_arrow link"
                    )));
                }
                if previous.is_some()
                    && (part.parent.is_some()
                        || part.function.is_some()
                        || part.super_ordinated_relation.is_some())
                {
                    return Err(ModelError::invariant(format!(
                        "{part_id} is a later part but carries parent, function or relation"
                    )));
                }
                for child in part.prior_children.iter().chain(part.later_children.iter()) {
                    pending.push((*child, Some(part_id)));
                }
                previous = Some(part_id);
                current = part.part_after_arrow;
            }
        }

        if seen.len() != self.propositions.len() {
            return Err(ModelError::invariant(format!(
                "{} propositions are not reachable from the roots",
                self.propositions.len() - seen.len()
            )));
        }

        for proposition in self.propositions.values() {
            if proposition.id.raw() > self.ids.last() {
                return Err(ModelError::invariant(format!("{} exceeds the id counter", proposition.id)));
            }
            if let Some(relation) = proposition.super_ordinated_relation {
                self.check_membership(Connectable::Proposition(proposition.id), relation.into())?;
            }
        }

        for relation in self.relations.values() {
            if relation.id.raw() > self.ids.last() {
                return Err(ModelError::invariant(format!("{} exceeds the id counter", relation.id)));
            }
            if relation.associates.len() < 2 {
                return Err(ModelError::invariant(format!(
                    "{} has fewer than two associates",
                    relation.id
                )));
            }
            for associate in &relation.associates {
                if !self.contains_connectable(*associate) {
                    return Err(ModelError::invariant(format!(
                        "{} references missing {associate}",
                        relation.id
                    )));
                }
                if let Connectable::Proposition(id) = associate {
                    if self.first_part(*id) != *id {
                        return Err(ModelError::invariant(format!(
                            "{} references {id}, which is not a first part",
                            relation.id
                        )));
                    }
                }
                if self.super_ordinated_relation(*associate) != Some(relation.id) {
                    return Err(ModelError::invariant(format!(
                        "{associate} does not point back to {}",
                        relation.id
                    )));
                }
                if self.role(*associate).is_none() {
                    return Err(ModelError::invariant(format!("{associate} has no role")));
                }
            }
            if let Some(parent) = relation.super_ordinated_relation {
                self.check_membership(Connectable::Relation(relation.id), parent.into())?;
            }
        }
        Ok(())
    }

    fn check_membership(&self, associate: Connectable, holder: Connectable) -> ModelResult<()> {
        let Connectable::Relation(holder) = holder else {
            return Ok(());
        };
        let holds = self
            .relation(holder)
            .map(|relation| relation.associates.contains(&associate))
            .unwrap_or(false);
        if holds {
            Ok(())
        } else {
            Err(ModelError::invariant(format!(
                "{associate} points to {holder}, which does not hold it"
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::ids::IdGenerator;
    use crate::language::LanguageModel;
    use crate::pericope::Pericope;

    #[test]
    fn test_detects_empty_items() {
        let mut pericope = Pericope::from_text("a\nb", LanguageModel::default());
        let first = pericope.roots()[0];
        pericope.proposition_mut(first).unwrap().items.clear();
        assert!(pericope.check_invariants().is_err());
    }

    #[test]
    fn test_detects_unreachable_proposition() {
        let mut pericope = Pericope::from_text("a\nb", LanguageModel::default());
        let second = pericope.roots()[1];
        pericope.detach(second);
        assert!(pericope.check_invariants().is_err());
    }

    #[test]
    fn test_detects_relation_beyond_id_counter() {
        let mut pericope = Pericope::from_text("a\nb", LanguageModel::default());
        let roots = pericope.roots().to_vec();
        let role = crate::relation::AssociateRole::high("Series");
        let relation =
            pericope.insert_relation(vec![roots[0].into(), roots[1].into()], vec![role.clone(), role]);
        assert!(pericope.check_invariants().is_ok());

        pericope.ids = IdGenerator::starting_after(relation.raw() - 1);
        assert!(pericope.check_invariants().is_err());
    }

    #[test]
    fn test_detects_broken_back_reference() {
        let mut pericope = Pericope::from_text("a\nb", LanguageModel::default());
        let roots = pericope.roots().to_vec();
        let role = crate::relation::AssociateRole::high("Series");
        pericope.insert_relation(vec![roots[0].into(), roots[1].into()], vec![role.clone(), role]);
        pericope.proposition_mut(roots[1]).unwrap().super_ordinated_relation = None;
        assert!(pericope.check_invariants().is_err());
    }
}
