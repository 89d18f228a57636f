//! # Document Handle
//!
//! A Document is one analysed pericope and its editing state: the
//! [`ModelHandler`] applying edits, the undo history and, once saved or
//! loaded, the file backing it.
//!
//! ## Lifecycle
//!
//! ```text
//! Text/File → Pericope → Mutations → Undo/Redo → Save
//!                ↓           ↓                      ↓
//!           invariants   listeners             pretty JSON
//! ```

use crate::errors::{EditError, EditResult};
use crate::handler::ModelHandler;
use crate::mutations::{Mutation, MutationOutcome};
use crate::notification::ModelChangeListener;
use crate::undo_stack::UndoStack;
use hermeneutix_model::{LanguageModel, Pericope};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument, warn};

/// Editable pericope document
#[derive(Debug)]
pub struct Document {
    /// Backing file, `None` until saved or when created from text
    pub path: Option<PathBuf>,

    /// Current version number (increments on each applied mutation, undo and redo)
    pub version: u64,

    handler: ModelHandler,

    history: UndoStack<Pericope>,

    dirty: bool,
}

impl Document {
    /// Create a memory-backed document
    pub fn new(pericope: Pericope, undo_limit: usize) -> Self {
        Self {
            path: None,
            version: 0,
            history: UndoStack::new(pericope.clone(), undo_limit),
            handler: ModelHandler::new(pericope, Vec::new()),
            dirty: false,
        }
    }

    /// Create a memory-backed document by tokenizing `text`
    pub fn from_text(text: &str, language: LanguageModel, undo_limit: usize) -> Self {
        Self::new(Pericope::from_text(text, language), undo_limit)
    }

    /// Load a document from a JSON file
    #[instrument(skip(undo_limit))]
    pub fn load(path: &Path, undo_limit: usize) -> EditResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let pericope: Pericope = serde_json::from_str(&content)?;
        if let Err(e) = pericope.check_invariants() {
            warn!(error = %e, "rejected inconsistent document");
            return Err(EditError::FileInvalid(e.to_string()));
        }
        info!(propositions = pericope.proposition_count(), "loaded document");

        let mut document = Self::new(pericope, undo_limit);
        document.path = Some(path.to_path_buf());
        Ok(document)
    }

    /// Write the document to its file
    #[instrument(skip(self), fields(path = ?self.path))]
    pub fn save(&mut self) -> EditResult<()> {
        let path = self.path.as_ref().ok_or(EditError::NotFileBacked)?;
        let json = serde_json::to_string_pretty(self.handler.pericope())?;
        std::fs::write(path, json)?;
        self.dirty = false;
        info!("saved document");
        Ok(())
    }

    /// Write the document to `path`, which becomes its backing file
    pub fn save_as(&mut self, path: &Path) -> EditResult<()> {
        self.path = Some(path.to_path_buf());
        self.save()
    }

    /// Apply a mutation and record the result for undo
    #[instrument(skip(self, mutation))]
    pub fn apply(&mut self, mutation: Mutation) -> EditResult<MutationOutcome> {
        debug!(?mutation, "applying mutation");
        let outcome = self.handler.apply(mutation)?;
        if self.handler.pericope() != self.history.current() {
            self.history.undoable_edit_happened(self.handler.pericope());
            self.version += 1;
            self.dirty = true;
        }
        Ok(outcome)
    }

    #[instrument(skip(self))]
    pub fn undo(&mut self) -> EditResult<()> {
        let previous = self.history.undo()?;
        self.restore(previous);
        Ok(())
    }

    #[instrument(skip(self))]
    pub fn redo(&mut self) -> EditResult<()> {
        let next = self.history.redo()?;
        self.restore(next);
        Ok(())
    }

    fn restore(&mut self, pericope: Pericope) {
        self.handler.replace_pericope(pericope);
        self.version += 1;
        self.dirty = true;
    }

    pub fn pericope(&self) -> &Pericope {
        self.handler.pericope()
    }

    pub fn add_listener(&mut self, listener: Box<dyn ModelChangeListener>) {
        self.handler.add_listener(listener);
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn set_undo_limit(&mut self, limit: usize) {
        self.history.set_limit(limit);
    }

    /// Check if document has unsaved changes
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notification::{ChangeRecorder, ModelChange};
    use crate::undo_stack::UndoError;
    use hermeneutix_model::RelationModel;

    fn document(text: &str) -> Document {
        Document::from_text(text, LanguageModel::default(), 10)
    }

    #[test]
    fn test_create_memory_document() {
        let doc = document("a b\nc");
        assert_eq!(doc.version, 0);
        assert!(!doc.is_dirty());
        assert_eq!(doc.path, None);
        assert_eq!(doc.pericope().roots().len(), 2);
    }

    #[test]
    fn test_failed_mutation_changes_nothing() {
        let mut doc = document("a");
        let root = doc.pericope().roots()[0];

        let result = doc.apply(Mutation::RemovePropositions { targets: vec![root] });

        assert_eq!(result, Err(EditError::NoneLeft));
        assert_eq!(doc.version, 0);
        assert!(!doc.is_dirty());
        assert!(!doc.can_undo());
    }

    #[test]
    fn test_no_op_mutation_is_not_counted() {
        let mut doc = document("a\nb");
        let root = doc.pericope().roots()[0];

        doc.apply(Mutation::MergePropositions { first: root, second: root })
            .unwrap();

        assert_eq!(doc.version, 0);
        assert!(!doc.is_dirty());
        assert!(!doc.can_undo());
    }

    #[test]
    fn test_undo_and_redo_restore_snapshots() {
        let mut doc = document("a\nb");
        let recorder = ChangeRecorder::new();
        doc.add_listener(Box::new(recorder.clone()));
        let original = doc.pericope().clone();
        let roots = original.roots().to_vec();

        doc.apply(Mutation::MergePropositions { first: roots[0], second: roots[1] })
            .unwrap();
        let merged = doc.pericope().clone();
        assert_eq!(doc.version, 1);

        doc.undo().unwrap();
        assert_eq!(doc.pericope(), &original);
        assert!(doc.can_redo());

        doc.redo().unwrap();
        assert_eq!(doc.pericope(), &merged);
        assert_eq!(doc.redo(), Err(EditError::History(UndoError::NothingToRedo)));
        assert_eq!(doc.version, 3);
        assert_eq!(recorder.changes(), vec![ModelChange::Full; 3]);
    }

    #[test]
    fn test_save_requires_path() {
        let mut doc = document("a");
        assert_eq!(doc.save(), Err(EditError::NotFileBacked));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("john.json");
        let mut doc = document("en arche\nen ho logos");
        doc.apply(Mutation::SetPericopeMetadata {
            title: Some("John 1".into()),
            author: None,
            comment: None,
        })
        .unwrap();

        doc.save_as(&path).unwrap();
        assert!(!doc.is_dirty());

        let loaded = Document::load(&path, 10).unwrap();
        assert_eq!(loaded.pericope(), doc.pericope());
        assert_eq!(loaded.path.as_deref(), Some(path.as_path()));
        assert!(!loaded.can_undo());
    }

    #[test]
    fn test_load_rejects_invalid_files() {
        let dir = tempfile::tempdir().unwrap();
        let garbage = dir.path().join("garbage.json");
        std::fs::write(&garbage, "{ not json").unwrap();
        assert!(matches!(
            Document::load(&garbage, 10),
            Err(EditError::FileInvalid(_))
        ));

        // parses, but the second proposition is unreachable
        let mut pericope = Pericope::from_text("a\nb", LanguageModel::default());
        let second = pericope.roots()[1];
        pericope.detach(second);
        let broken = dir.path().join("broken.json");
        std::fs::write(&broken, serde_json::to_string(&pericope).unwrap()).unwrap();
        assert!(matches!(
            Document::load(&broken, 10),
            Err(EditError::FileInvalid(_))
        ));

        // the id counter lags behind an existing relation
        let mut doc = document("a\nb");
        let roots = doc.pericope().roots().to_vec();
        let template = RelationModel::default()
            .templates()
            .next()
            .unwrap()
            .clone();
        let MutationOutcome::Relation(relation) = doc
            .apply(Mutation::CreateRelation {
                associates: vec![roots[0].into(), roots[1].into()],
                template,
            })
            .unwrap()
        else {
            panic!("expected a relation");
        };
        let mut json = serde_json::to_value(doc.pericope()).unwrap();
        json["ids"]["count"] = serde_json::json!(relation.raw() - 1);
        let stale = dir.path().join("stale.json");
        std::fs::write(&stale, json.to_string()).unwrap();
        assert!(matches!(
            Document::load(&stale, 10),
            Err(EditError::FileInvalid(_))
        ));

        assert!(matches!(
            Document::load(&dir.path().join("missing.json"), 10),
            Err(EditError::Io(_))
        ));
    }
}
