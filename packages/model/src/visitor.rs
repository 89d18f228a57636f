use crate::clause_item::ClauseItem;
use crate::pericope::Pericope;
use crate::proposition::Proposition;
use crate::relation::{Connectable, Relation};

/// Visitor pattern for traversing a pericope in reading order
///
/// The default implementations walk the entire document. Override specific
/// visit_* methods to act on single elements.
pub trait Visitor: Sized {
    fn visit_pericope(&mut self, pericope: &Pericope) {
        walk_pericope(self, pericope);
    }

    /// Called once per chain, with the chain's first part
    fn visit_proposition(&mut self, pericope: &Pericope, proposition: &Proposition, depth: usize) {
        walk_proposition(self, pericope, proposition, depth);
    }

    /// Called for every part at its reading position
    fn visit_part(&mut self, pericope: &Pericope, part: &Proposition, depth: usize) {
        walk_part(self, pericope, part, depth);
    }

    fn visit_clause_item(&mut self, _item: &ClauseItem) {
        // Leaf node, no children to walk
    }

    fn visit_relation(&mut self, pericope: &Pericope, relation: &Relation, depth: usize) {
        walk_relation(self, pericope, relation, depth);
    }
}

/// Walk all propositions, then all top-level relations
pub fn walk_pericope<V: Visitor>(visitor: &mut V, pericope: &Pericope) {
    for root in pericope.roots() {
        if let Some(proposition) = pericope.proposition(*root) {
            visitor.visit_proposition(pericope, proposition, 0);
        }
    }
    for relation in pericope.relations() {
        if relation.super_ordinated_relation.is_none() {
            visitor.visit_relation(pericope, relation, 0);
        }
    }
}

/// Walk every part of a chain together with its children
pub fn walk_proposition<V: Visitor>(
    visitor: &mut V,
    pericope: &Pericope,
    proposition: &Proposition,
    depth: usize,
) {
    let mut part = Some(proposition);
    while let Some(current) = part {
        for child in &current.prior_children {
            if let Some(child) = pericope.proposition(*child) {
                visitor.visit_proposition(pericope, child, depth + 1);
            }
        }
        visitor.visit_part(pericope, current, depth);
        for child in &current.later_children {
            if let Some(child) = pericope.proposition(*child) {
                visitor.visit_proposition(pericope, child, depth + 1);
            }
        }
        part = current
            .part_after_arrow
            .and_then(|next| pericope.proposition(next));
    }
}

pub fn walk_part<V: Visitor>(visitor: &mut V, _pericope: &Pericope, part: &Proposition, _depth: usize) {
    for item in &part.items {
        visitor.visit_clause_item(item);
    }
}

/// Walk nested relations depth-first
pub fn walk_relation<V: Visitor>(
    visitor: &mut V,
    pericope: &Pericope,
    relation: &Relation,
    depth: usize,
) {
    for associate in &relation.associates {
        if let Connectable::Relation(nested) = associate {
            if let Some(nested) = pericope.relation(*nested) {
                visitor.visit_relation(pericope, nested, depth + 1);
            }
        }
    }
}
