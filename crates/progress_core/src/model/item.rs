//! Item domain model.
//!
//! # Responsibility
//! - Define the leaf entity owned by card lists.
//! - Emit the item's opening tag for the board document.
//!
//! # Invariants
//! - `id` never changes after construction.
//! - Equality only considers `name` and `id`.

use crate::document::escape_attribute;
use crate::document::schema::{ATTR_ID, ATTR_NAME, ITEM_TAG};
use crate::model::entity::{generate_id, Checkpoint, Entity, EntityId, Fragment, Modifiable};
use std::ops::Deref;

/// Leaf card on a card list.
#[derive(Debug, Clone)]
pub struct Item {
    id: EntityId,
    name: String,
    name_modified: bool,
}

impl Item {
    /// Creates a new item with a generated id.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_id(name, generate_id())
    }

    /// Creates an item with a caller-provided id.
    ///
    /// Used by the loader; uniqueness is checked by the owning card list.
    pub fn with_id(name: impl Into<String>, id: EntityId) -> Self {
        Self {
            id,
            name: name.into(),
            name_modified: false,
        }
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Renames the item. Assigning the current name is not a change.
    pub fn set_name(&mut self, name: impl Into<String>) {
        let name = name.into();
        if name != self.name {
            self.name = name;
            self.name_modified = true;
        }
    }
}

impl PartialEq for Item {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.id == other.id
    }
}

impl Eq for Item {}

impl Entity for Item {
    fn id(&self) -> EntityId {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl Modifiable for Item {
    fn is_modified(&self) -> bool {
        self.name_modified
    }
}

impl Checkpoint for Item {
    fn mark_saved(&mut self) {
        self.name_modified = false;
    }
}

impl Fragment for Item {
    /// Opening tag only; the owning card list closes it.
    fn to_fragment(&self) -> String {
        format!(
            "\t\t<{ITEM_TAG} {ATTR_ID}=\"{}\" {ATTR_NAME}=\"{}\">",
            self.id,
            escape_attribute(&self.name)
        )
    }
}

/// Non-owning reference to an item inside one card list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ItemHandle(pub(crate) EntityId);

impl ItemHandle {
    pub fn id(self) -> EntityId {
        self.0
    }
}

impl From<&Item> for ItemHandle {
    fn from(item: &Item) -> Self {
        Self(item.id)
    }
}

/// Write access to an item owned by a card list.
///
/// Reads go through `Deref`; the item itself is never handed out mutably.
///
/// ```compile_fail
/// use progress_core::{CardList, Item};
///
/// let mut cardlist = CardList::new("Todo");
/// let handle = cardlist.add_item(Item::new("milk")).unwrap();
/// *cardlist.item_mut(handle).unwrap() = Item::with_id("milk", 1);
/// ```
#[derive(Debug)]
pub struct ItemMut<'a> {
    item: &'a mut Item,
}

impl<'a> ItemMut<'a> {
    pub(crate) fn new(item: &'a mut Item) -> Self {
        Self { item }
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.item.set_name(name);
    }
}

impl Deref for ItemMut<'_> {
    type Target = Item;

    fn deref(&self) -> &Item {
        self.item
    }
}
