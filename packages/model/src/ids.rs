use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(u32);

        impl $name {
            pub fn new(raw: u32) -> Self {
                Self(raw)
            }

            pub fn raw(self) -> u32 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "-{}"), self.0)
            }
        }
    };
}

define_id!(
    /// Identifies a proposition (or one part of a split proposition)
    PropositionId,
    "p"
);
define_id!(
    /// Identifies a clause item inside its proposition
    ClauseItemId,
    "c"
);
define_id!(
    /// Identifies a semantic relation
    RelationId,
    "r"
);

/// Sequential id source owned by a pericope.
///
/// One counter is shared by all element kinds so that ids stay unique even
/// when printed without their prefix.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdGenerator {
    count: u32,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start after the given raw id (used after loading a document)
    pub fn starting_after(last: u32) -> Self {
        Self { count: last }
    }

    fn next_raw(&mut self) -> u32 {
        self.count += 1;
        self.count
    }

    pub fn next_proposition(&mut self) -> PropositionId {
        PropositionId(self.next_raw())
    }

    pub fn next_clause_item(&mut self) -> ClauseItemId {
        ClauseItemId(self.next_raw())
    }

    pub fn next_relation(&mut self) -> RelationId {
        RelationId(self.next_raw())
    }

    pub fn last(&self) -> u32 {
        self.count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_sequential_across_kinds() {
        let mut ids = IdGenerator::new();
        let p = ids.next_proposition();
        let c = ids.next_clause_item();
        let r = ids.next_relation();

        assert_eq!(p.raw(), 1);
        assert_eq!(c.raw(), 2);
        assert_eq!(r.raw(), 3);
        assert_eq!(ids.last(), 3);
    }

    #[test]
    fn test_display_uses_kind_prefix() {
        assert_eq!(PropositionId::new(4).to_string(), "p-4");
        assert_eq!(ClauseItemId::new(5).to_string(), "c-5");
        assert_eq!(RelationId::new(6).to_string(), "r-6");
    }

    #[test]
    fn test_starting_after_continues_count() {
        let mut ids = IdGenerator::starting_after(41);
        assert_eq!(ids.next_proposition().raw(), 42);
    }
}
