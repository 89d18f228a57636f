//! Merging and splitting clause items inside one proposition.

use crate::errors::{EditError, EditResult};
use crate::handler::ModelHandler;
use crate::notification::ModelChange;
use hermeneutix_model::{join_optional, ClauseItemId, PropositionId};

impl ModelHandler {
    /// The proposition holding `item`, and the item's index in it
    pub(crate) fn locate_item(&self, item: ClauseItemId) -> EditResult<(PropositionId, usize)> {
        self.pericope
            .find_item(item)
            .ok_or(EditError::UnknownClauseItem(item))
    }

    /// Merge `item` into the clause item in front of it
    pub fn merge_clause_item_with_prior(&mut self, item: ClauseItemId) -> EditResult<()> {
        let (owner, index) = self.locate_item(item)?;
        if index == 0 {
            return Err(EditError::ClauseItemNoPrior(item));
        }
        self.join_items(owner, index - 1);
        Ok(())
    }

    /// Merge the clause item following `item` into it
    pub fn merge_clause_item_with_follower(&mut self, item: ClauseItemId) -> EditResult<()> {
        let (owner, index) = self.locate_item(item)?;
        let count = self.require(owner)?.items.len();
        if index + 1 >= count {
            return Err(EditError::ClauseItemNoFollower(item));
        }
        self.join_items(owner, index);
        Ok(())
    }

    /// The earlier item survives and absorbs the one after it
    fn join_items(&mut self, owner: PropositionId, index: usize) {
        let Some(proposition) = self.pericope.proposition_mut(owner) else {
            return;
        };
        let later = proposition.items.remove(index + 1);
        let earlier = &mut proposition.items[index];
        earlier.origin_text = format!("{} {}", earlier.origin_text, later.origin_text);
        earlier.function = earlier.function.take().or(later.function);
        earlier.comment = join_optional(earlier.comment.take(), later.comment, "\n");
        tracing::debug!(item = %earlier.id, removed = %later.id, "merged clause items");
        self.notify(ModelChange::Proposition(owner));
    }

    /// Split `item` after the prefix `first_part`.
    ///
    /// Both halves are trimmed. The first half keeps the item's id, function
    /// and comment; the second is a new item with the same font style.
    pub fn split_clause_item(
        &mut self,
        item: ClauseItemId,
        first_part: &str,
    ) -> EditResult<ClauseItemId> {
        let (owner, index) = self.locate_item(item)?;
        let invalid = || EditError::ClauseItemInvalidSplit {
            item,
            first_part: first_part.to_string(),
        };

        let (head, tail, font_style) = {
            let existing = &self.require(owner)?.items[index];
            let text = existing.origin_text.as_str();
            if first_part.is_empty() || first_part.len() >= text.len() || !text.starts_with(first_part) {
                return Err(invalid());
            }
            let head = first_part.trim();
            let tail = text[first_part.len()..].trim();
            if head.is_empty() || tail.is_empty() {
                return Err(invalid());
            }
            (head.to_string(), tail.to_string(), existing.font_style)
        };

        let mut second = self.pericope.new_item(tail);
        second.font_style = font_style;
        let created = second.id;
        let proposition = self.require_mut(owner)?;
        proposition.items[index].origin_text = head;
        proposition.items.insert(index + 1, second);

        self.notify(ModelChange::Proposition(owner));
        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    use crate::errors::EditError;
    use crate::handler::ModelHandler;
    use crate::notification::{ChangeRecorder, ModelChange};
    use hermeneutix_model::{FontStyle, LanguageModel, Pericope, SyntacticalFunction};

    fn handler(text: &str) -> (ModelHandler, ChangeRecorder) {
        let recorder = ChangeRecorder::new();
        let handler = ModelHandler::new(
            Pericope::from_text(text, LanguageModel::default()),
            vec![Box::new(recorder.clone())],
        );
        (handler, recorder)
    }

    #[test]
    fn test_merge_with_prior_joins_texts_and_fields() {
        let (mut handler, recorder) = handler("in principio erat");
        let root = handler.pericope().roots()[0];
        let ids: Vec<_> = handler
            .pericope()
            .proposition(root)
            .unwrap()
            .items
            .iter()
            .map(|item| item.id)
            .collect();
        let predicate = SyntacticalFunction::new("P", "Predicate");
        {
            let proposition = handler.require_mut(root).unwrap();
            proposition.items[0].comment = Some("preposition".into());
            proposition.items[1].function = Some(predicate.clone());
            proposition.items[1].comment = Some("noun".into());
        }

        handler.merge_clause_item_with_prior(ids[1]).unwrap();

        let proposition = handler.pericope().proposition(root).unwrap();
        assert_eq!(proposition.items.len(), 2);
        assert_eq!(proposition.items[0].id, ids[0]);
        assert_eq!(proposition.items[0].origin_text, "in principio");
        assert_eq!(proposition.items[0].function, Some(predicate));
        assert_eq!(proposition.items[0].comment.as_deref(), Some("preposition\nnoun"));
        assert_eq!(recorder.changes(), vec![ModelChange::Proposition(root)]);
    }

    #[test]
    fn test_merge_with_follower_keeps_earlier_function() {
        let (mut handler, _) = handler("a b");
        let root = handler.pericope().roots()[0];
        let subject = SyntacticalFunction::new("S", "Subject");
        {
            let proposition = handler.require_mut(root).unwrap();
            proposition.items[0].function = Some(subject.clone());
            proposition.items[1].function = Some(SyntacticalFunction::new("P", "Predicate"));
        }
        let first = handler.pericope().proposition(root).unwrap().items[0].id;

        handler.merge_clause_item_with_follower(first).unwrap();

        let item = handler.pericope().item(first).unwrap();
        assert_eq!(item.origin_text, "a b");
        assert_eq!(item.function, Some(subject));
    }

    #[test]
    fn test_merge_without_neighbour_fails() {
        let (mut handler, recorder) = handler("a b");
        let root = handler.pericope().roots()[0];
        let items: Vec<_> = handler
            .pericope()
            .proposition(root)
            .unwrap()
            .items
            .iter()
            .map(|item| item.id)
            .collect();

        assert_eq!(
            handler.merge_clause_item_with_prior(items[0]),
            Err(EditError::ClauseItemNoPrior(items[0]))
        );
        assert_eq!(
            handler.merge_clause_item_with_follower(items[1]),
            Err(EditError::ClauseItemNoFollower(items[1]))
        );
        assert!(recorder.changes().is_empty());
    }

    #[test]
    fn test_split_clause_item_trims_both_halves() {
        let (mut handler, recorder) = handler("kai egeneto");
        let root = handler.pericope().roots()[0];
        let first = handler.pericope().proposition(root).unwrap().items[0].id;
        handler.merge_clause_item_with_follower(first).unwrap();
        handler.require_mut(root).unwrap().items[0].font_style = FontStyle::Italic;
        recorder.clear();

        let created = handler.split_clause_item(first, "kai ").unwrap();

        let proposition = handler.pericope().proposition(root).unwrap();
        assert_eq!(proposition.items.len(), 2);
        assert_eq!(proposition.items[0].origin_text, "kai");
        assert_eq!(proposition.items[1].id, created);
        assert_eq!(proposition.items[1].origin_text, "egeneto");
        assert_eq!(proposition.items[1].font_style, FontStyle::Italic);
        assert_eq!(recorder.changes(), vec![ModelChange::Proposition(root)]);
        assert!(handler.pericope().check_invariants().is_ok());
    }

    #[test]
    fn test_split_clause_item_rejects_invalid_prefixes() {
        let (mut handler, _) = handler("abc");
        let root = handler.pericope().roots()[0];
        let item = handler.pericope().proposition(root).unwrap().items[0].id;

        for prefix in ["", "abc", "x", "abcd"] {
            assert_eq!(
                handler.split_clause_item(item, prefix),
                Err(EditError::ClauseItemInvalidSplit {
                    item,
                    first_part: prefix.to_string()
                })
            );
        }
        assert_eq!(handler.pericope().proposition(root).unwrap().items.len(), 1);
    }

    #[test]
    fn test_split_clause_item_rejects_blank_half() {
        let (mut handler, _) = handler("a b");
        let root = handler.pericope().roots()[0];
        let first = handler.pericope().proposition(root).unwrap().items[0].id;
        handler.merge_clause_item_with_follower(first).unwrap();
        handler.require_mut(root).unwrap().items[0].origin_text = "a  ".into();

        assert!(matches!(
            handler.split_clause_item(first, "a "),
            Err(EditError::ClauseItemInvalidSplit { .. })
        ));
    }
}
