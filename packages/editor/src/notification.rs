//! # Change Notifications
//!
//! Every successful edit ends with exactly one [`ModelChange`], describing
//! the coarsest scope a view has to refresh. Listeners are registered on the
//! [`ModelHandler`](crate::ModelHandler) explicitly; there is no global
//! listener registry.

use hermeneutix_model::{PropositionId, RelationId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "scope", content = "id", rename_all = "camelCase")]
pub enum ModelChange {
    /// Only fields of this proposition (or its clause items) changed
    Proposition(PropositionId),

    /// Only roles or the comment of this relation changed
    Relation(RelationId),

    /// The structure changed; rebuild every view
    Full,
}

/// Receives model change notifications
pub trait ModelChangeListener: std::fmt::Debug {
    fn model_changed(&mut self, change: &ModelChange);
}

/// Ordered list of listeners, notified synchronously
#[derive(Debug, Default)]
pub struct ListenerList {
    listeners: Vec<Box<dyn ModelChangeListener>>,
}

impl ListenerList {
    pub fn new(listeners: Vec<Box<dyn ModelChangeListener>>) -> Self {
        Self { listeners }
    }

    pub fn add(&mut self, listener: Box<dyn ModelChangeListener>) {
        self.listeners.push(listener);
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    pub fn notify(&mut self, change: ModelChange) {
        tracing::debug!(?change, listeners = self.listeners.len(), "model changed");
        for listener in &mut self.listeners {
            listener.model_changed(&change);
        }
    }
}

/// Listener that records every change into a shared log
#[derive(Debug, Clone, Default)]
pub struct ChangeRecorder {
    log: std::rc::Rc<std::cell::RefCell<Vec<ModelChange>>>,
}

impl ChangeRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded changes, oldest first
    pub fn changes(&self) -> Vec<ModelChange> {
        self.log.borrow().clone()
    }

    pub fn clear(&self) {
        self.log.borrow_mut().clear();
    }
}

impl ModelChangeListener for ChangeRecorder {
    fn model_changed(&mut self, change: &ModelChange) {
        self.log.borrow_mut().push(*change);
    }
}
