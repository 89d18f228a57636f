//! # HermeneutiX Model
//!
//! In-memory document model for syntactical and semantic text analysis.
//!
//! ```text
//! Pericope
//!  ├─ LanguageModel          (catalog of syntactical functions)
//!  ├─ roots: [Proposition]   (ordered, may be indented and split into parts)
//!  │     └─ items: [ClauseItem]
//!  └─ relations: [Relation]  (semantic groupings of propositions/relations)
//! ```
//!
//! Elements live in arenas owned by the [`Pericope`] and reference each other
//! by typed ids. Structural editing is done by the `hermeneutix-editor` crate;
//! this crate offers the data types, read-side queries and the primitives
//! the editor builds on.

mod clause_item;
mod error;
mod ids;
mod invariants;
mod language;
mod pericope;
mod proposition;
mod relation;
mod relation_model;
mod tokenizer;
mod visitor;

pub use clause_item::{ClauseItem, FontStyle};
pub use error::{ModelError, ModelResult};
pub use ids::{ClauseItemId, IdGenerator, PropositionId, RelationId};
pub use language::{FunctionElement, LanguageModel, SyntacticalFunction, SyntacticalFunctionGroup};
pub use pericope::{Font, Pericope, Position, Slot};
pub use proposition::{join_optional, Proposition};
pub use relation::{AssociateRole, Connectable, Relation};
pub use relation_model::{RelationModel, RelationTemplate, RelationTemplateGroup};
pub use tokenizer::tokenize;
pub use visitor::{walk_part, walk_pericope, walk_proposition, walk_relation, Visitor};
