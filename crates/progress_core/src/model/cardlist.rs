//! Card list domain model.
//!
//! # Responsibility
//! - Own an ordered sequence of items (one board column).
//! - Serialize itself and its items as one nested fragment.
//!
//! # Invariants
//! - Item ids are unique within one card list.
//! - Item order is insertion order unless explicitly reordered.
//! - Equality only considers `name` and `id`.

use crate::document::escape_attribute;
use crate::document::schema::{ATTR_ID, ATTR_NAME, CARDLIST_TAG, ITEM_TAG};
use crate::model::entity::{
    generate_id, move_after, Checkpoint, Entity, EntityId, Fragment, Modifiable,
};
use crate::model::item::{Item, ItemHandle, ItemMut};
use std::ops::Deref;

/// Named column of items.
#[derive(Debug, Clone)]
pub struct CardList {
    id: EntityId,
    name: String,
    items: Vec<Item>,
    name_modified: bool,
    items_modified: bool,
}

impl CardList {
    /// Creates an empty card list with a generated id.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_id(name, generate_id())
    }

    /// Creates an empty card list with a caller-provided id.
    pub fn with_id(name: impl Into<String>, id: EntityId) -> Self {
        Self {
            id,
            name: name.into(),
            items: Vec::new(),
            name_modified: false,
            items_modified: false,
        }
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        let name = name.into();
        if name != self.name {
            self.name = name;
            self.name_modified = true;
        }
    }

    /// Appends an item to the end of the list.
    ///
    /// Returns `None` without changing the list when an item with the same
    /// id is already present.
    pub fn add_item(&mut self, item: Item) -> Option<ItemHandle> {
        if self.contains_id(item.id()) {
            return None;
        }
        let handle = ItemHandle::from(&item);
        self.items.push(item);
        self.items_modified = true;
        Some(handle)
    }

    /// Removes the item equal (name and id) to `item`.
    pub fn remove_item(&mut self, item: &Item) -> bool {
        match self.items.iter().position(|candidate| candidate == item) {
            Some(index) => {
                self.items.remove(index);
                self.items_modified = true;
                true
            }
            None => false,
        }
    }

    /// Removes the item with the given id.
    pub fn remove_item_by_id(&mut self, id: EntityId) -> bool {
        match self.items.iter().position(|candidate| candidate.id() == id) {
            Some(index) => {
                self.items.remove(index);
                self.items_modified = true;
                true
            }
            None => false,
        }
    }

    /// Places `moved` immediately after `sibling`.
    ///
    /// Returns `false` when either item is not in this list.
    pub fn reorder_item(&mut self, moved: ItemHandle, sibling: ItemHandle) -> bool {
        let changed = moved != sibling;
        let found = move_after(&mut self.items, moved.id(), sibling.id());
        if found && changed {
            self.items_modified = true;
        }
        found
    }

    pub fn item(&self, handle: ItemHandle) -> Option<&Item> {
        self.items.iter().find(|item| item.id() == handle.id())
    }

    /// Rename access to one item. Adding or removing goes through the list.
    pub fn item_mut(&mut self, handle: ItemHandle) -> Option<ItemMut<'_>> {
        self.items
            .iter_mut()
            .find(|item| item.id() == handle.id())
            .map(ItemMut::new)
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains_id(&self, id: EntityId) -> bool {
        self.items.iter().any(|item| item.id() == id)
    }
}

impl PartialEq for CardList {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.id == other.id
    }
}

impl Eq for CardList {}

impl Entity for CardList {
    fn id(&self) -> EntityId {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl Modifiable for CardList {
    fn is_modified(&self) -> bool {
        self.name_modified || self.items_modified || self.items.iter().any(Item::is_modified)
    }
}

impl Checkpoint for CardList {
    fn mark_saved(&mut self) {
        self.name_modified = false;
        self.items_modified = false;
        self.items.iter_mut().for_each(Item::mark_saved);
    }
}

impl Fragment for CardList {
    fn to_fragment(&self) -> String {
        let mut fragment = format!(
            "\t<{CARDLIST_TAG} {ATTR_ID}=\"{}\" {ATTR_NAME}=\"{}\">\n",
            self.id,
            escape_attribute(&self.name)
        );
        for item in &self.items {
            fragment.push_str(&item.to_fragment());
            fragment.push_str(&format!("</{ITEM_TAG}>\n"));
        }
        fragment.push_str(&format!("\t</{CARDLIST_TAG}>\n"));
        fragment
    }
}

/// Non-owning reference to a card list on one board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CardListHandle(pub(crate) EntityId);

impl CardListHandle {
    pub fn id(self) -> EntityId {
        self.0
    }
}

impl From<&CardList> for CardListHandle {
    fn from(cardlist: &CardList) -> Self {
        Self(cardlist.id)
    }
}

/// Write access to a card list owned by a board.
///
/// Forwards the list's own mutators; the list itself is never handed out
/// mutably, so its id and dirty flags stay under the board's control.
///
/// ```compile_fail
/// use progress_core::{Board, CardList};
///
/// let mut board = Board::new();
/// let handle = board.add_cardlist(&CardList::new("Todo")).unwrap();
/// *board.cardlist_mut(handle).unwrap() = CardList::with_id("Done", 1);
/// ```
#[derive(Debug)]
pub struct CardListMut<'a> {
    cardlist: &'a mut CardList,
}

impl<'a> CardListMut<'a> {
    pub(crate) fn new(cardlist: &'a mut CardList) -> Self {
        Self { cardlist }
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.cardlist.set_name(name);
    }

    pub fn add_item(&mut self, item: Item) -> Option<ItemHandle> {
        self.cardlist.add_item(item)
    }

    pub fn remove_item(&mut self, item: &Item) -> bool {
        self.cardlist.remove_item(item)
    }

    pub fn remove_item_by_id(&mut self, id: EntityId) -> bool {
        self.cardlist.remove_item_by_id(id)
    }

    pub fn reorder_item(&mut self, moved: ItemHandle, sibling: ItemHandle) -> bool {
        self.cardlist.reorder_item(moved, sibling)
    }

    pub fn item_mut(&mut self, handle: ItemHandle) -> Option<ItemMut<'_>> {
        self.cardlist.item_mut(handle)
    }
}

impl Deref for CardListMut<'_> {
    type Target = CardList;

    fn deref(&self) -> &CardList {
        self.cardlist
    }
}

#[cfg(test)]
mod tests {
    use super::{CardList, CardListMut};
    use crate::model::entity::{Checkpoint, Fragment, Modifiable};
    use crate::model::item::{Item, ItemHandle};

    fn names(cardlist: &CardList) -> Vec<&str> {
        cardlist.items().iter().map(Item::name).collect()
    }

    #[test]
    fn add_item_rejects_duplicate_ids() {
        let mut cardlist = CardList::with_id("Todo", 1);
        assert!(cardlist.add_item(Item::with_id("a", 10)).is_some());
        assert!(cardlist.add_item(Item::with_id("b", 10)).is_none());
        assert_eq!(names(&cardlist), vec!["a"]);
    }

    #[test]
    fn remove_item_by_value_and_by_id() {
        let mut cardlist = CardList::with_id("Todo", 1);
        cardlist.add_item(Item::with_id("a", 10));
        cardlist.add_item(Item::with_id("b", 11));

        assert!(!cardlist.remove_item(&Item::with_id("a", 11)));
        assert!(cardlist.remove_item(&Item::with_id("a", 10)));
        assert!(!cardlist.remove_item_by_id(10));
        assert!(cardlist.remove_item_by_id(11));
        assert!(cardlist.is_empty());
    }

    #[test]
    fn reorder_item_places_moved_after_sibling() {
        let mut cardlist = CardList::with_id("Todo", 1);
        let a = cardlist.add_item(Item::with_id("a", 10)).unwrap();
        let b = cardlist.add_item(Item::with_id("b", 11)).unwrap();
        let c = cardlist.add_item(Item::with_id("c", 12)).unwrap();

        assert!(cardlist.reorder_item(a, c));
        assert_eq!(names(&cardlist), vec!["b", "c", "a"]);

        assert!(!cardlist.reorder_item(ItemHandle(99), b));
        assert_eq!(names(&cardlist), vec!["b", "c", "a"]);
    }

    #[test]
    fn modified_folds_in_item_changes() {
        let mut cardlist = CardList::with_id("Todo", 1);
        let handle = cardlist.add_item(Item::with_id("a", 10)).unwrap();
        assert!(cardlist.is_modified());

        cardlist.mark_saved();
        assert!(!cardlist.is_modified());

        cardlist.item_mut(handle).unwrap().set_name("renamed");
        assert!(cardlist.is_modified());
    }

    #[test]
    fn guard_edits_keep_item_ids_unique() {
        let mut cardlist = CardList::with_id("Todo", 1);
        cardlist.add_item(Item::with_id("a", 10));
        cardlist.mark_saved();

        let mut guard = CardListMut::new(&mut cardlist);
        assert!(guard.add_item(Item::with_id("copy", 10)).is_none());
        let b = guard.add_item(Item::with_id("b", 11)).unwrap();
        guard.item_mut(b).unwrap().set_name("bee");
        assert_eq!(guard.len(), 2);

        let ids: Vec<u64> = cardlist.items().iter().map(Item::id).collect();
        assert_eq!(ids, vec![10, 11]);
        assert_eq!(names(&cardlist), vec!["a", "bee"]);
        assert!(cardlist.is_modified());
    }

    #[test]
    fn fragment_nests_items_in_order() {
        let mut cardlist = CardList::with_id("Doing", 3);
        cardlist.add_item(Item::with_id("one", 4));
        cardlist.add_item(Item::with_id("two", 5));

        assert_eq!(
            cardlist.to_fragment(),
            "\t<cardlist id=\"3\" name=\"Doing\">\n\
             \t\t<item id=\"4\" name=\"one\"></item>\n\
             \t\t<item id=\"5\" name=\"two\"></item>\n\
             \t</cardlist>\n"
        );
    }
}
