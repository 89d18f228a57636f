//! Creating, retyping and removing semantic relations.

use crate::errors::{EditError, EditResult};
use crate::handler::ModelHandler;
use crate::notification::ModelChange;
use hermeneutix_model::{Connectable, PropositionId, RelationId, RelationTemplate};
use std::collections::HashMap;
use tracing::debug;

impl ModelHandler {
    /// Group neighbouring connectables under a new relation.
    ///
    /// Proposition associates are normalised to the first part of their
    /// chain. Roles are taken from `template` in associate order.
    pub fn create_relation(
        &mut self,
        associates: &[Connectable],
        template: &RelationTemplate,
    ) -> EditResult<RelationId> {
        if associates.len() < 2 {
            return Err(EditError::RelationTooFewAssociates);
        }
        let roles = template
            .roles_for(associates.len())
            .ok_or(EditError::RelationTooManyAssociates(associates.len()))?;

        let mut normalised = Vec::with_capacity(associates.len());
        for associate in associates {
            self.require_connectable(*associate)?;
            let associate = match *associate {
                Connectable::Proposition(id) => {
                    Connectable::Proposition(self.pericope.first_part(id))
                }
                relation => relation,
            };
            if self.pericope.super_ordinated_relation(associate).is_some() {
                return Err(EditError::RelationAlreadyConnected(associate.to_string()));
            }
            normalised.push(associate);
        }
        self.check_neighbours(&normalised)?;

        let relation = self.pericope.insert_relation(normalised, roles);
        debug!(%relation, associates = associates.len(), "created relation");
        self.notify(ModelChange::Full);
        Ok(relation)
    }

    fn check_neighbours(&self, associates: &[Connectable]) -> EditResult<()> {
        let order: HashMap<_, _> = self
            .pericope
            .connectable_order()
            .into_iter()
            .enumerate()
            .map(|(index, id)| (id, index))
            .collect();
        let index_of = |proposition: PropositionId| order.get(&proposition).copied();

        for pair in associates.windows(2) {
            let (left, right) = (pair[0], pair[1]);
            let trailing = self
                .pericope
                .trailing_proposition(left)
                .and_then(index_of);
            let leading = self
                .pericope
                .leading_proposition(right)
                .and_then(index_of);
            match (trailing, leading) {
                (Some(trailing), Some(leading)) if trailing + 1 == leading => {}
                _ => {
                    return Err(EditError::RelationNotNeighbours(
                        left.to_string(),
                        right.to_string(),
                    ))
                }
            }
        }
        Ok(())
    }

    /// Shift every role one associate towards the front; the first role
    /// wraps around to the last associate
    pub fn rotate_associate_roles(&mut self, relation: RelationId) -> EditResult<()> {
        let associates = self.require_relation(relation)?.associates.clone();
        let roles: Vec<_> = associates
            .iter()
            .map(|associate| self.pericope.role(*associate).cloned())
            .collect();
        for (index, associate) in associates.iter().enumerate() {
            let role = roles[(index + 1) % roles.len()].clone();
            self.pericope.set_association(*associate, Some(relation), role);
        }
        self.notify(ModelChange::Relation(relation));
        Ok(())
    }

    /// Reassign the roles of `relation` from another template
    pub fn alter_relation_type(
        &mut self,
        relation: RelationId,
        template: &RelationTemplate,
    ) -> EditResult<()> {
        let associates = self.require_relation(relation)?.associates.clone();
        let roles = template
            .roles_for(associates.len())
            .ok_or(EditError::RelationTooManyAssociates(associates.len()))?;
        for (associate, role) in associates.into_iter().zip(roles) {
            self.pericope.set_association(associate, Some(relation), Some(role));
        }
        self.notify(ModelChange::Relation(relation));
        Ok(())
    }

    /// Dissolve `relation` together with every relation above it
    pub fn remove_relation(&mut self, relation: RelationId) -> EditResult<()> {
        self.require_relation(relation)?;
        let killed = self.pericope.kill_relation(relation);
        debug!(?killed, "removed relation");
        self.notify(ModelChange::Full);
        Ok(())
    }
}
