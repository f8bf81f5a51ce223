//! Entity identity and dirty-tracking contracts.
//!
//! # Responsibility
//! - Generate stable 64-bit ids for freshly created entities.
//! - Define the capabilities shared by Item, CardList and Board.
//!
//! # Invariants
//! - Generated ids are drawn uniformly from `[1, i64::MAX]`; `0` is never
//!   produced.
//! - Id uniqueness is enforced by the owning collection, not the generator.

use rand::Rng;

/// Stable identifier carried by every board entity.
pub type EntityId = u64;

/// Largest id the generator will hand out.
///
/// Kept inside the signed range so ids survive tools that read them as `i64`.
pub const MAX_ENTITY_ID: EntityId = i64::MAX as EntityId;

/// Draws a fresh entity id from the thread-local generator.
///
/// Best-effort unique, not cryptographic.
pub fn generate_id() -> EntityId {
    rand::rng().random_range(1..=MAX_ENTITY_ID)
}

/// Named entity with a stable id.
pub trait Entity {
    fn id(&self) -> EntityId;
    fn name(&self) -> &str;
}

/// "Changed since last save" capability.
///
/// Composites fold their children into `is_modified`.
pub trait Modifiable {
    /// Returns whether this entity or anything it owns changed since the
    /// last save checkpoint.
    fn is_modified(&self) -> bool;
}

/// Clears dirty flags after a successful save or load.
///
/// Only `storage` records checkpoints.
pub(crate) trait Checkpoint {
    /// Records a save checkpoint for this entity and everything it owns.
    fn mark_saved(&mut self);
}

/// Serialized text of one entity before it is nested into a parent.
pub trait Fragment {
    fn to_fragment(&self) -> String;
}

/// Moves the entry with id `moved` so it sits immediately after `sibling`.
///
/// Returns `false` and leaves `entries` untouched when either id is absent.
pub(crate) fn move_after<T: Entity>(
    entries: &mut Vec<T>,
    moved: EntityId,
    sibling: EntityId,
) -> bool {
    let Some(from) = entries.iter().position(|entry| entry.id() == moved) else {
        return false;
    };
    if !entries.iter().any(|entry| entry.id() == sibling) {
        return false;
    }
    if moved == sibling {
        return true;
    }

    let entry = entries.remove(from);
    // Sibling index shifts when the moved entry sat before it.
    let anchor = entries
        .iter()
        .position(|candidate| candidate.id() == sibling)
        .unwrap_or(entries.len());
    entries.insert(anchor + 1, entry);
    true
}

#[cfg(test)]
mod tests {
    use super::{generate_id, move_after, Entity, EntityId, MAX_ENTITY_ID};
    use std::collections::HashSet;

    struct Stub(EntityId);

    impl Entity for Stub {
        fn id(&self) -> EntityId {
            self.0
        }

        fn name(&self) -> &str {
            "stub"
        }
    }

    fn ids(entries: &[Stub]) -> Vec<EntityId> {
        entries.iter().map(|entry| entry.0).collect()
    }

    #[test]
    fn generated_ids_stay_in_positive_signed_range() {
        for _ in 0..1_000 {
            let id = generate_id();
            assert!(id >= 1);
            assert!(id <= MAX_ENTITY_ID);
        }
    }

    #[test]
    fn generated_ids_are_distinct_over_many_samples() {
        let ids: HashSet<EntityId> = (0..10_000).map(|_| generate_id()).collect();
        assert_eq!(ids.len(), 10_000);
    }

    #[test]
    fn move_after_handles_forward_and_backward_moves() {
        let mut entries = vec![Stub(1), Stub(2), Stub(3), Stub(4)];

        assert!(move_after(&mut entries, 1, 3));
        assert_eq!(ids(&entries), vec![2, 3, 1, 4]);

        assert!(move_after(&mut entries, 4, 2));
        assert_eq!(ids(&entries), vec![2, 4, 3, 1]);

        assert!(move_after(&mut entries, 2, 1));
        assert_eq!(ids(&entries), vec![4, 3, 1, 2]);
    }

    #[test]
    fn move_after_rejects_unknown_ids() {
        let mut entries = vec![Stub(1), Stub(2)];

        assert!(!move_after(&mut entries, 9, 1));
        assert!(!move_after(&mut entries, 1, 9));
        assert_eq!(ids(&entries), vec![1, 2]);
    }

    #[test]
    fn move_after_self_is_a_no_op() {
        let mut entries = vec![Stub(1), Stub(2)];
        assert!(move_after(&mut entries, 2, 2));
        assert_eq!(ids(&entries), vec![1, 2]);
    }
}
