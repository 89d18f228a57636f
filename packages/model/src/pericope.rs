//! # Pericope
//!
//! The analysed document. A pericope owns every proposition, clause item and
//! relation in arena maps keyed by typed ids, plus the ordered list of
//! top-level propositions.
//!
//! ## Structure
//!
//! ```text
//! roots ─┬─ P1 ──arrow──> P1'           (one proposition split in two parts)
//!        │   └─ later: C1               (enclosed between P1 and P1')
//!        └─ P2
//!            └─ prior: C2               (indented before its parent)
//! ```
//!
//! Reading order is: prior children, part, later children, next part.
//!
//! This module only offers queries and low-level primitives that keep parent
//! pointers and relation back references consistent. The structural edit
//! rules live in the editor crate.

use crate::clause_item::ClauseItem;
use crate::ids::{ClauseItemId, IdGenerator, PropositionId, RelationId};
use crate::language::LanguageModel;
use crate::proposition::Proposition;
use crate::relation::{AssociateRole, Connectable, Relation};
use crate::tokenizer::tokenize;
use crate::visitor::{walk_proposition, Visitor};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Font {
    pub name: String,
    pub size: u16,
}

/// A list that can hold propositions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    Root,
    Prior(PropositionId),
    Later(PropositionId),
}

impl Slot {
    /// The part owning this list, `None` for the root list
    pub fn owner(self) -> Option<PropositionId> {
        match self {
            Slot::Root => None,
            Slot::Prior(owner) | Slot::Later(owner) => Some(owner),
        }
    }
}

/// Location of a chain's first part inside its containing list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub slot: Slot,
    pub index: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pericope {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,

    pub language: LanguageModel,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font: Option<Font>,

    pub(crate) roots: Vec<PropositionId>,

    pub(crate) propositions: BTreeMap<PropositionId, Proposition>,

    #[serde(default)]
    pub(crate) relations: BTreeMap<RelationId, Relation>,

    #[serde(default)]
    pub(crate) ids: IdGenerator,
}

impl Pericope {
    /// Create an empty pericope
    pub fn new(language: LanguageModel) -> Self {
        Self {
            title: None,
            author: None,
            comment: None,
            language,
            font: None,
            roots: Vec::new(),
            propositions: BTreeMap::new(),
            relations: BTreeMap::new(),
            ids: IdGenerator::new(),
        }
    }

    /// Create a pericope from origin text
    pub fn from_text(text: &str, language: LanguageModel) -> Self {
        let mut pericope = Self::new(language);
        pericope.add_text(text, false);
        pericope
    }

    // ---------------------------------------------------------------------
    // Element access
    // ---------------------------------------------------------------------

    pub fn roots(&self) -> &[PropositionId] {
        &self.roots
    }

    pub fn proposition(&self, id: PropositionId) -> Option<&Proposition> {
        self.propositions.get(&id)
    }

    pub fn proposition_mut(&mut self, id: PropositionId) -> Option<&mut Proposition> {
        self.propositions.get_mut(&id)
    }

    pub fn propositions(&self) -> impl Iterator<Item = &Proposition> {
        self.propositions.values()
    }

    pub fn proposition_count(&self) -> usize {
        self.propositions.len()
    }

    pub fn relation(&self, id: RelationId) -> Option<&Relation> {
        self.relations.get(&id)
    }

    pub fn relation_mut(&mut self, id: RelationId) -> Option<&mut Relation> {
        self.relations.get_mut(&id)
    }

    pub fn relations(&self) -> impl Iterator<Item = &Relation> {
        self.relations.values()
    }

    pub fn contains_connectable(&self, connectable: Connectable) -> bool {
        match connectable {
            Connectable::Proposition(id) => self.propositions.contains_key(&id),
            Connectable::Relation(id) => self.relations.contains_key(&id),
        }
    }

    /// The proposition owning a clause item, with the item's index
    pub fn find_item(&self, item: ClauseItemId) -> Option<(PropositionId, usize)> {
        self.propositions
            .values()
            .find_map(|p| p.item_index(item).map(|index| (p.id, index)))
    }

    pub fn item(&self, item: ClauseItemId) -> Option<&ClauseItem> {
        let (owner, index) = self.find_item(item)?;
        self.propositions.get(&owner).map(|p| &p.items[index])
    }

    pub fn item_mut(&mut self, item: ClauseItemId) -> Option<&mut ClauseItem> {
        let (owner, index) = self.find_item(item)?;
        self.propositions.get_mut(&owner).map(|p| &mut p.items[index])
    }

    // ---------------------------------------------------------------------
    // Chains of parts
    // ---------------------------------------------------------------------

    /// First part of the chain containing `id` (the chain's representative)
    pub fn first_part(&self, id: PropositionId) -> PropositionId {
        let mut current = id;
        while let Some(before) = self.proposition(current).and_then(|p| p.part_before_arrow) {
            current = before;
        }
        current
    }

    pub fn last_part(&self, id: PropositionId) -> PropositionId {
        let mut current = id;
        while let Some(after) = self.proposition(current).and_then(|p| p.part_after_arrow) {
            current = after;
        }
        current
    }

    /// All parts of the chain containing `id`, first to last
    pub fn parts(&self, id: PropositionId) -> Vec<PropositionId> {
        let mut parts = vec![self.first_part(id)];
        while let Some(after) = parts
            .last()
            .and_then(|last| self.proposition(*last))
            .and_then(|p| p.part_after_arrow)
        {
            parts.push(after);
        }
        parts
    }

    /// The part that holds the chain of `id` as a child, if indented
    pub fn parent_of(&self, id: PropositionId) -> Option<PropositionId> {
        self.proposition(self.first_part(id)).and_then(|p| p.parent)
    }

    /// Where the chain of `id` sits in its containing list
    pub fn position_of(&self, id: PropositionId) -> Option<Position> {
        let first = self.first_part(id);
        let proposition = self.proposition(first)?;
        let slot = match proposition.parent {
            None => Slot::Root,
            Some(parent) => {
                let parent = self.proposition(parent)?;
                if parent.prior_children.contains(&first) {
                    Slot::Prior(parent.id)
                } else {
                    Slot::Later(parent.id)
                }
            }
        };
        let index = self.list(slot).iter().position(|c| *c == first)?;
        Some(Position { slot, index })
    }

    pub fn list(&self, slot: Slot) -> &[PropositionId] {
        match slot {
            Slot::Root => &self.roots,
            Slot::Prior(owner) => self
                .proposition(owner)
                .map(|p| p.prior_children.as_slice())
                .unwrap_or(&[]),
            Slot::Later(owner) => self
                .proposition(owner)
                .map(|p| p.later_children.as_slice())
                .unwrap_or(&[]),
        }
    }

    fn list_mut(&mut self, slot: Slot) -> Option<&mut Vec<PropositionId>> {
        match slot {
            Slot::Root => Some(&mut self.roots),
            Slot::Prior(owner) => self.proposition_mut(owner).map(|p| &mut p.prior_children),
            Slot::Later(owner) => self.proposition_mut(owner).map(|p| &mut p.later_children),
        }
    }

    /// Whether `slot` is a child list sitting between two parts of a chain
    pub fn is_enclosed_slot(&self, slot: Slot) -> bool {
        match slot {
            Slot::Root => false,
            Slot::Prior(owner) => self
                .proposition(owner)
                .map(|p| !p.is_first_part())
                .unwrap_or(false),
            Slot::Later(owner) => self
                .proposition(owner)
                .map(|p| !p.is_last_part())
                .unwrap_or(false),
        }
    }

    /// Whether the chain of `id` lies (transitively) inside the chain of `ancestor`
    pub fn is_descendant_of(&self, id: PropositionId, ancestor: PropositionId) -> bool {
        let ancestor = self.first_part(ancestor);
        let mut current = self.parent_of(id);
        while let Some(parent) = current {
            let parent_chain = self.first_part(parent);
            if parent_chain == ancestor {
                return true;
            }
            current = self.parent_of(parent_chain);
        }
        false
    }

    /// First proposition of the subtree of the chain containing `id`
    pub fn subtree_start(&self, id: PropositionId) -> PropositionId {
        let mut current = self.first_part(id);
        while let Some(first_child) = self
            .proposition(current)
            .and_then(|p| p.prior_children.first().copied())
        {
            current = first_child;
        }
        current
    }

    /// Last proposition of the subtree of the chain containing `id`
    pub fn subtree_end(&self, id: PropositionId) -> PropositionId {
        let mut current = self.last_part(id);
        while let Some(last_child) = self
            .proposition(current)
            .and_then(|p| p.later_children.last().copied())
        {
            current = self.last_part(last_child);
        }
        current
    }

    // ---------------------------------------------------------------------
    // Reading order
    // ---------------------------------------------------------------------

    /// Every part in reading order
    pub fn text_order(&self) -> Vec<PropositionId> {
        struct PartCollector(Vec<PropositionId>);

        impl Visitor for PartCollector {
            fn visit_part(&mut self, _pericope: &Pericope, part: &Proposition, _depth: usize) {
                self.0.push(part.id);
            }
        }

        let mut collector = PartCollector(Vec::with_capacity(self.propositions.len()));
        for root in &self.roots {
            if let Some(proposition) = self.proposition(*root) {
                walk_proposition(&mut collector, self, proposition, 0);
            }
        }
        collector.0
    }

    /// Chain representatives (first parts) in reading order
    pub fn connectable_order(&self) -> Vec<PropositionId> {
        self.text_order()
            .into_iter()
            .filter(|id| {
                self.proposition(*id)
                    .map(Proposition::is_first_part)
                    .unwrap_or(false)
            })
            .collect()
    }

    /// Index of each part in reading order
    pub fn text_positions(&self) -> HashMap<PropositionId, usize> {
        self.text_order()
            .into_iter()
            .enumerate()
            .map(|(index, id)| (id, index))
            .collect()
    }

    /// The proposition representing the start of a connectable
    pub fn leading_proposition(&self, connectable: Connectable) -> Option<PropositionId> {
        match connectable {
            Connectable::Proposition(id) => Some(self.first_part(id)),
            Connectable::Relation(id) => self
                .relation(id)?
                .first_associate()
                .and_then(|first| self.leading_proposition(first)),
        }
    }

    /// The proposition representing the end of a connectable
    pub fn trailing_proposition(&self, connectable: Connectable) -> Option<PropositionId> {
        match connectable {
            Connectable::Proposition(id) => Some(self.first_part(id)),
            Connectable::Relation(id) => self
                .relation(id)?
                .last_associate()
                .and_then(|last| self.trailing_proposition(last)),
        }
    }

    pub fn super_ordinated_relation(&self, connectable: Connectable) -> Option<RelationId> {
        match connectable {
            Connectable::Proposition(id) => self.proposition(id)?.super_ordinated_relation,
            Connectable::Relation(id) => self.relation(id)?.super_ordinated_relation,
        }
    }

    pub fn role(&self, connectable: Connectable) -> Option<&AssociateRole> {
        match connectable {
            Connectable::Proposition(id) => self.proposition(id)?.role.as_ref(),
            Connectable::Relation(id) => self.relation(id)?.role.as_ref(),
        }
    }

    // ---------------------------------------------------------------------
    // Primitives
    // ---------------------------------------------------------------------

    pub fn new_item(&mut self, origin_text: impl Into<String>) -> ClauseItem {
        ClauseItem::new(self.ids.next_clause_item(), origin_text)
    }

    /// Create a detached proposition holding the given items
    pub fn create_proposition(&mut self, items: Vec<ClauseItem>) -> PropositionId {
        let id = self.ids.next_proposition();
        self.propositions.insert(id, Proposition::new(id, items));
        id
    }

    /// Drop a proposition from the arena; list membership is not touched
    pub fn discard_proposition(&mut self, id: PropositionId) -> Option<Proposition> {
        self.propositions.remove(&id)
    }

    /// Remove a chain's first part from its containing list
    pub fn detach(&mut self, id: PropositionId) -> Option<Position> {
        let position = self.position_of(id)?;
        let first = self.first_part(id);
        if let Some(list) = self.list_mut(position.slot) {
            list.remove(position.index);
        }
        if let Some(proposition) = self.proposition_mut(first) {
            proposition.parent = None;
        }
        Some(position)
    }

    /// Insert a detached chain into a list; the index is clamped to the list length
    pub fn attach(&mut self, id: PropositionId, slot: Slot, index: usize) {
        let first = self.first_part(id);
        if let Some(list) = self.list_mut(slot) {
            let index = index.min(list.len());
            list.insert(index, first);
        }
        if let Some(proposition) = self.proposition_mut(first) {
            proposition.parent = slot.owner();
        }
    }

    /// Replace the whole content of a child list, fixing parent pointers
    pub fn set_children(&mut self, slot: Slot, children: Vec<PropositionId>) {
        let owner = slot.owner();
        for child in &children {
            if let Some(proposition) = self.proposition_mut(*child) {
                proposition.parent = owner;
            }
        }
        if let Some(list) = self.list_mut(slot) {
            *list = children;
        }
    }

    /// Remove and return a child list's content, leaving parent pointers stale
    pub fn take_children(&mut self, slot: Slot) -> Vec<PropositionId> {
        self.list_mut(slot).map(std::mem::take).unwrap_or_default()
    }

    /// Parse `text` into new top-level propositions
    pub fn add_text(&mut self, text: &str, in_front: bool) -> Vec<PropositionId> {
        let mut created = Vec::new();
        for words in tokenize(text) {
            let items = words.into_iter().map(|word| self.new_item(word)).collect();
            created.push(self.create_proposition(items));
        }
        if in_front {
            self.roots.splice(0..0, created.iter().copied());
        } else {
            self.roots.extend(created.iter().copied());
        }
        created
    }

    /// Create a relation and register it with its associates
    pub fn insert_relation(
        &mut self,
        associates: Vec<Connectable>,
        roles: Vec<AssociateRole>,
    ) -> RelationId {
        let id = self.ids.next_relation();
        for (associate, role) in associates.iter().zip(roles) {
            self.set_association(*associate, Some(id), Some(role));
        }
        self.relations.insert(id, Relation::new(id, associates));
        id
    }

    /// Set an associate's back reference and role
    pub fn set_association(
        &mut self,
        connectable: Connectable,
        relation: Option<RelationId>,
        role: Option<AssociateRole>,
    ) {
        match connectable {
            Connectable::Proposition(id) => {
                if let Some(proposition) = self.proposition_mut(id) {
                    proposition.super_ordinated_relation = relation;
                    proposition.role = role;
                }
            }
            Connectable::Relation(id) => {
                if let Some(relation_entry) = self.relation_mut(id) {
                    relation_entry.super_ordinated_relation = relation;
                    relation_entry.role = role;
                }
            }
        }
    }

    /// Move a relation membership from one connectable to another
    pub fn replace_associate(&mut self, relation: RelationId, old: Connectable, new: Connectable) {
        let role = self.role(old).cloned();
        let Some(entry) = self.relation_mut(relation) else {
            return;
        };
        let Some(index) = entry.index_of(old) else {
            return;
        };
        entry.associates[index] = new;
        self.set_association(old, None, None);
        self.set_association(new, Some(relation), role);
    }

    /// Dissolve a relation.
    ///
    /// Every associate loses its role and back reference. The relation
    /// holding the killed one as an associate is killed too, because it would
    /// be left with fewer than two associates. Returns all killed relations.
    pub fn kill_relation(&mut self, id: RelationId) -> Vec<RelationId> {
        let mut killed = Vec::new();
        let mut next = Some(id);
        while let Some(current) = next {
            let Some(relation) = self.relations.remove(&current) else {
                break;
            };
            for associate in &relation.associates {
                self.set_association(*associate, None, None);
            }
            killed.push(current);
            next = relation.super_ordinated_relation;
        }
        killed
    }

    /// Move every element of `other` into this pericope with fresh ids
    pub fn absorb(&mut self, other: Pericope, in_front: bool) -> Vec<PropositionId> {
        let mut proposition_ids = HashMap::new();
        for id in other.propositions.keys() {
            proposition_ids.insert(*id, self.ids.next_proposition());
        }
        let mut relation_ids = HashMap::new();
        for id in other.relations.keys() {
            relation_ids.insert(*id, self.ids.next_relation());
        }
        let map_p = |id: PropositionId| proposition_ids.get(&id).copied().unwrap_or(id);
        let map_r = |id: RelationId| relation_ids.get(&id).copied().unwrap_or(id);
        let map_c = |c: Connectable| match c {
            Connectable::Proposition(id) => Connectable::Proposition(map_p(id)),
            Connectable::Relation(id) => Connectable::Relation(map_r(id)),
        };

        for (_, mut proposition) in other.propositions {
            proposition.id = map_p(proposition.id);
            for item in &mut proposition.items {
                item.id = self.ids.next_clause_item();
            }
            proposition.parent = proposition.parent.map(map_p);
            proposition.prior_children = proposition.prior_children.into_iter().map(map_p).collect();
            proposition.later_children = proposition.later_children.into_iter().map(map_p).collect();
            proposition.part_before_arrow = proposition.part_before_arrow.map(map_p);
            proposition.part_after_arrow = proposition.part_after_arrow.map(map_p);
            proposition.super_ordinated_relation = proposition.super_ordinated_relation.map(map_r);
            self.propositions.insert(proposition.id, proposition);
        }
        for (_, mut relation) in other.relations {
            relation.id = map_r(relation.id);
            relation.associates = relation.associates.into_iter().map(map_c).collect();
            relation.super_ordinated_relation = relation.super_ordinated_relation.map(map_r);
            self.relations.insert(relation.id, relation);
        }

        let new_roots: Vec<PropositionId> = other.roots.into_iter().map(map_p).collect();
        if in_front {
            self.roots.splice(0..0, new_roots.iter().copied());
        } else {
            self.roots.extend(new_roots.iter().copied());
        }
        new_roots
    }
}
