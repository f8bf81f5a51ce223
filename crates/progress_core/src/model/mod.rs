//! Board domain model.
//!
//! # Responsibility
//! - Define the Board → CardList → Item ownership tree.
//! - Track which parts of the tree changed since the last save.
//!
//! # Invariants
//! - Every entity has a stable id that never changes after construction.
//! - Ownership is exclusive; callers hold id handles, never shared owners.
//! - Ids are unique among siblings.

pub mod background;
pub mod board;
pub mod cardlist;
pub mod entity;
pub mod item;
