//! # Model Handler
//!
//! The single point of mutation for a [`Pericope`]. Every public edit
//! validates its arguments first, then mutates, then emits exactly one
//! [`ModelChange`] to the registered listeners. A rejected edit leaves the
//! pericope untouched and emits nothing.
//!
//! The operations themselves are grouped by concern in `crate::mutations`.

use crate::errors::{EditError, EditResult};
use crate::notification::{ListenerList, ModelChange, ModelChangeListener};
use hermeneutix_model::{
    Connectable, Pericope, Proposition, PropositionId, Relation, RelationId,
};

#[derive(Debug)]
pub struct ModelHandler {
    pub(crate) pericope: Pericope,
    listeners: ListenerList,
}

impl ModelHandler {
    pub fn new(pericope: Pericope, listeners: Vec<Box<dyn ModelChangeListener>>) -> Self {
        Self {
            pericope,
            listeners: ListenerList::new(listeners),
        }
    }

    pub fn pericope(&self) -> &Pericope {
        &self.pericope
    }

    pub fn into_pericope(self) -> Pericope {
        self.pericope
    }

    pub fn add_listener(&mut self, listener: Box<dyn ModelChangeListener>) {
        self.listeners.add(listener);
    }

    /// Swap in a whole new model state (e.g. an undo snapshot)
    pub fn replace_pericope(&mut self, pericope: Pericope) {
        self.pericope = pericope;
        self.notify(ModelChange::Full);
    }

    pub(crate) fn notify(&mut self, change: ModelChange) {
        self.listeners.notify(change);
    }

    pub(crate) fn require(&self, id: PropositionId) -> EditResult<&Proposition> {
        self.pericope
            .proposition(id)
            .ok_or(EditError::UnknownProposition(id))
    }

    pub(crate) fn require_mut(&mut self, id: PropositionId) -> EditResult<&mut Proposition> {
        self.pericope
            .proposition_mut(id)
            .ok_or(EditError::UnknownProposition(id))
    }

    pub(crate) fn require_relation(&self, id: RelationId) -> EditResult<&Relation> {
        self.pericope
            .relation(id)
            .ok_or(EditError::UnknownRelation(id))
    }

    pub(crate) fn require_connectable(&self, connectable: Connectable) -> EditResult<()> {
        match connectable {
            Connectable::Proposition(id) => self.require(id).map(|_| ()),
            Connectable::Relation(id) => self.require_relation(id).map(|_| ()),
        }
    }

    /// Point `before.part_after_arrow` at `after` and back
    pub(crate) fn link_parts(&mut self, before: PropositionId, after: Option<PropositionId>) {
        if let Some(proposition) = self.pericope.proposition_mut(before) {
            proposition.part_after_arrow = after;
        }
        if let Some(after) = after {
            if let Some(proposition) = self.pericope.proposition_mut(after) {
                proposition.part_before_arrow = Some(before);
                proposition.parent = None;
                proposition.function = None;
            }
        }
    }

    /// Hand the relation of a chain that stops being a chain of its own over
    /// to the surviving chain, or kill it if the survivor already has one
    pub(crate) fn hand_over_relation(&mut self, discarded: PropositionId, survivor: PropositionId) {
        let Some(relation) = self
            .pericope
            .proposition(discarded)
            .and_then(|p| p.super_ordinated_relation)
        else {
            return;
        };
        let survivor_connected = self
            .pericope
            .proposition(survivor)
            .map(|p| p.super_ordinated_relation.is_some())
            .unwrap_or(true);
        if survivor_connected {
            let killed = self.pericope.kill_relation(relation);
            tracing::debug!(?killed, %discarded, "killed relations of merged proposition");
        } else {
            self.pericope
                .replace_associate(relation, discarded.into(), survivor.into());
            tracing::debug!(%relation, %discarded, %survivor, "transferred relation");
        }
    }
}
