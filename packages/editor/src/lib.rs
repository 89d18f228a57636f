//! # HermeneutiX Editor
//!
//! Edit engine for analysed pericopes.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ model: Pericope, propositions, relations    │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: ModelHandler + Mutation commands    │
//! │  - Validate, mutate, notify listeners       │
//! │  - Snapshot undo history                    │
//! │  - Load/save JSON documents                 │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ front end: views refresh on ModelChange     │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use hermeneutix_editor::{Document, Mutation};
//!
//! let mut doc = Document::load(Path::new("john.json"), 50)?;
//!
//! doc.apply(Mutation::MergePropositions { first, second })?;
//! doc.undo()?;
//!
//! doc.save()?;
//! ```

mod config;
mod document;
mod errors;
mod handler;
mod mutations;
mod notification;
mod undo_stack;

pub use config::{EditorConfig, DEFAULT_CONFIG_NAME};
pub use document::Document;
pub use errors::{EditError, EditResult};
pub use handler::ModelHandler;
pub use mutations::{Mutation, MutationOutcome};
pub use notification::{ChangeRecorder, ListenerList, ModelChange, ModelChangeListener};
pub use undo_stack::{UndoError, UndoStack, DEFAULT_UNDO_LIMIT};

// Re-export the model for convenience
pub use hermeneutix_model as model;
