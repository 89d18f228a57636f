//! Plain field edits that leave the structure untouched.

use crate::errors::EditResult;
use crate::handler::ModelHandler;
use crate::notification::ModelChange;
use hermeneutix_model::{
    ClauseItem, ClauseItemId, FontStyle, PropositionId, RelationId, SyntacticalFunction,
};

impl ModelHandler {
    pub fn set_proposition_label(&mut self, id: PropositionId, label: Option<String>) -> EditResult<()> {
        self.require_mut(id)?.label = label;
        self.notify(ModelChange::Proposition(id));
        Ok(())
    }

    pub fn set_proposition_translations(
        &mut self,
        id: PropositionId,
        syntactical: Option<String>,
        semantic: Option<String>,
    ) -> EditResult<()> {
        let proposition = self.require_mut(id)?;
        proposition.syntactical_translation = syntactical;
        proposition.semantic_translation = semantic;
        self.notify(ModelChange::Proposition(id));
        Ok(())
    }

    pub fn set_proposition_comment(&mut self, id: PropositionId, comment: Option<String>) -> EditResult<()> {
        self.require_mut(id)?.comment = comment;
        self.notify(ModelChange::Proposition(id));
        Ok(())
    }

    /// Set the function of the chain containing `id`; only first parts carry one
    pub fn set_proposition_function(
        &mut self,
        id: PropositionId,
        function: Option<SyntacticalFunction>,
    ) -> EditResult<()> {
        self.require(id)?;
        let first = self.pericope.first_part(id);
        self.require_mut(first)?.function = function;
        self.notify(ModelChange::Proposition(first));
        Ok(())
    }

    pub fn set_clause_item_function(
        &mut self,
        item: ClauseItemId,
        function: Option<SyntacticalFunction>,
    ) -> EditResult<()> {
        self.edit_item(item, |item| item.function = function)
    }

    pub fn set_clause_item_font_style(&mut self, item: ClauseItemId, font_style: FontStyle) -> EditResult<()> {
        self.edit_item(item, |item| item.font_style = font_style)
    }

    pub fn set_clause_item_comment(&mut self, item: ClauseItemId, comment: Option<String>) -> EditResult<()> {
        self.edit_item(item, |item| item.comment = comment)
    }

    pub fn set_relation_comment(&mut self, relation: RelationId, comment: Option<String>) -> EditResult<()> {
        self.require_relation(relation)?;
        if let Some(entry) = self.pericope.relation_mut(relation) {
            entry.comment = comment;
        }
        self.notify(ModelChange::Relation(relation));
        Ok(())
    }

    /// Replace title, author and comment of the pericope
    pub fn set_pericope_metadata(
        &mut self,
        title: Option<String>,
        author: Option<String>,
        comment: Option<String>,
    ) {
        self.pericope.title = title;
        self.pericope.author = author;
        self.pericope.comment = comment;
        self.notify(ModelChange::Full);
    }

    fn edit_item(&mut self, item: ClauseItemId, edit: impl FnOnce(&mut ClauseItem)) -> EditResult<()> {
        let (owner, index) = self.locate_item(item)?;
        edit(&mut self.require_mut(owner)?.items[index]);
        self.notify(ModelChange::Proposition(owner));
        Ok(())
    }
}
