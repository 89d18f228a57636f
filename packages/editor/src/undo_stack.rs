//! # Undo/Redo Stack
//!
//! Snapshot based history of a model state.
//!
//! ## Design
//!
//! - The stack always knows the current state
//! - Every undoable edit pushes the previous current state and clears redo
//! - Undo and redo hand back a clone of the state to restore
//! - The oldest snapshots are dropped beyond the limit; a limit of 0
//!   disables the history
//!
//! ## Example
//!
//! ```rust,ignore
//! let mut stack = UndoStack::new(pericope.clone(), 50);
//!
//! handler.merge_propositions(a, b)?;
//! stack.undoable_edit_happened(handler.pericope());
//!
//! let previous = stack.undo()?;
//! handler.replace_pericope(previous);
//! ```

use std::collections::VecDeque;
use thiserror::Error;

/// Default number of undo levels
pub const DEFAULT_UNDO_LIMIT: usize = 50;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum UndoError {
    #[error("Nothing to undo")]
    NothingToUndo,

    #[error("Nothing to redo")]
    NothingToRedo,
}

/// Undo/redo history of states of type `T`
#[derive(Debug, Clone)]
pub struct UndoStack<T> {
    /// Older states (most recent last)
    undo_stack: VecDeque<T>,

    /// Undone states (most recent last)
    redo_stack: Vec<T>,

    current: T,

    /// Maximum number of undo levels (0 = disabled)
    limit: usize,
}

impl<T: Clone + PartialEq> UndoStack<T> {
    pub fn new(initial: T, limit: usize) -> Self {
        Self {
            undo_stack: VecDeque::new(),
            redo_stack: Vec::new(),
            current: initial,
            limit,
        }
    }

    /// Record `state` as the result of an undoable edit.
    ///
    /// With a limit of 0 only the current state is tracked.
    pub fn undoable_edit_happened(&mut self, state: &T) {
        if *state == self.current {
            return;
        }
        if self.limit == 0 {
            self.current = state.clone();
            return;
        }
        let previous = std::mem::replace(&mut self.current, state.clone());
        self.undo_stack.push_back(previous);
        self.trim();
        self.redo_stack.clear();
    }

    /// Step back, returning the state to restore
    pub fn undo(&mut self) -> Result<T, UndoError> {
        let previous = self.undo_stack.pop_back().ok_or(UndoError::NothingToUndo)?;
        let undone = std::mem::replace(&mut self.current, previous);
        self.redo_stack.push(undone);
        Ok(self.current.clone())
    }

    /// Step forward again, returning the state to restore
    pub fn redo(&mut self) -> Result<T, UndoError> {
        let next = self.redo_stack.pop().ok_or(UndoError::NothingToRedo)?;
        let replaced = std::mem::replace(&mut self.current, next);
        self.undo_stack.push_back(replaced);
        self.trim();
        Ok(self.current.clone())
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_levels(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_levels(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Change the limit, dropping the oldest snapshots beyond it
    pub fn set_limit(&mut self, limit: usize) {
        self.limit = limit;
        if limit == 0 {
            self.undo_stack.clear();
            self.redo_stack.clear();
            return;
        }
        self.trim();
    }

    fn trim(&mut self) {
        while self.undo_stack.len() > self.limit {
            self.undo_stack.pop_front();
        }
    }

    /// Forget all history and start over from `state`
    pub fn reset(&mut self, state: &T) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.current = state.clone();
    }

    pub fn current(&self) -> &T {
        &self.current
    }
}
