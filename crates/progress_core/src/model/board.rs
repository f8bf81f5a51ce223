//! Board aggregate root.
//!
//! # Responsibility
//! - Own the ordered card lists of one kanban board.
//! - Hold the board background and the file the board persists to.
//! - Drive document serialization and load/save through `storage`.
//!
//! # Invariants
//! - No two card lists on a board share an id.
//! - `background` is never an invalid value; invalid input stores
//!   `BACKGROUND_DEFAULT`.
//! - Callers reach card lists through handles and borrowed views only; the
//!   sequence itself changes through board methods.
//!
//! # See also
//! - storage/codec.rs

use crate::document::schema::{
    ATTR_BACKGROUND, ATTR_ID, ATTR_NAME, BOARD_TAG, XML_DECLARATION,
};
use crate::document::{escape_attribute, DocumentParser, XmlDocumentParser};
use crate::model::background::{classify_background, BackgroundType, BACKGROUND_DEFAULT};
use crate::model::cardlist::{CardList, CardListHandle, CardListMut};
use crate::model::entity::{
    generate_id, move_after, Checkpoint, Entity, EntityId, Fragment, Modifiable,
};
use crate::storage::{
    load_board, new_filename_in, save_board, FileSystem, LoadResult, LocalFileSystem,
    SaveResult,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Kanban board: a named, ordered set of card lists.
#[derive(Debug, Clone)]
pub struct Board {
    id: EntityId,
    name: String,
    background: String,
    file_path: Option<PathBuf>,
    cardlists: Vec<CardList>,
    name_modified: bool,
    background_modified: bool,
    cardlists_modified: bool,
}

impl Board {
    /// Creates an unnamed empty board with the default background.
    pub fn new() -> Self {
        Self::restore(generate_id(), "", BACKGROUND_DEFAULT)
    }

    /// Creates an empty board.
    ///
    /// An invalid `background` silently becomes `BACKGROUND_DEFAULT`.
    pub fn with_background(name: impl Into<String>, background: &str) -> Self {
        let mut board = Self::new();
        board.name = name.into();
        board.background = accepted_background(background).to_string();
        board
    }

    /// Rebuilds a board shell with a persisted id. Not marked modified.
    pub(crate) fn restore(id: EntityId, name: &str, background: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            background: accepted_background(background).to_string(),
            file_path: None,
            cardlists: Vec::new(),
            name_modified: false,
            background_modified: false,
            cardlists_modified: false,
        }
    }

    /// Loads the board stored at `path` from the local file system.
    ///
    /// # Errors
    /// - Returns an error when the file cannot be read.
    /// - Returns an error when the text is not a valid board document.
    pub fn from_path(path: impl AsRef<Path>) -> LoadResult<Self> {
        Self::from_path_with(&LocalFileSystem, &XmlDocumentParser, path)
    }

    /// Loads the board stored at `path` through the given collaborators.
    pub fn from_path_with<F, P>(fs: &F, parser: &P, path: impl AsRef<Path>) -> LoadResult<Self>
    where
        F: FileSystem + ?Sized,
        P: DocumentParser + ?Sized,
    {
        load_board(fs, parser, path.as_ref())
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

    pub fn background(&self) -> &str {
        &self.background
    }

    /// Replaces the background and returns its classification.
    ///
    /// `BackgroundType::Invalid` means `BACKGROUND_DEFAULT` was stored
    /// instead; callers may ignore the return value.
    pub fn set_background(&mut self, value: &str) -> BackgroundType {
        let kind = classify_background(value);
        let stored = accepted_background(value);
        if stored != self.background {
            self.background = stored.to_string();
            self.background_modified = true;
        }
        kind
    }

    /// Classifies a background value without touching any board.
    pub fn background_type(value: &str) -> BackgroundType {
        classify_background(value)
    }

    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    /// Points the next save at `path`. Rejects an empty path.
    pub fn set_file_path(&mut self, path: impl Into<PathBuf>) -> bool {
        let path = path.into();
        if path.as_os_str().is_empty() {
            return false;
        }
        self.file_path = Some(path);
        true
    }

    /// Appends a copy of `cardlist` to the end of the board.
    ///
    /// Returns `None` without changing the board when a card list with the
    /// same id is already present.
    pub fn add_cardlist(&mut self, cardlist: &CardList) -> Option<CardListHandle> {
        self.insert_cardlist(cardlist.clone())
    }

    pub(crate) fn insert_cardlist(&mut self, cardlist: CardList) -> Option<CardListHandle> {
        if self.cardlists.iter().any(|owned| owned.id() == cardlist.id()) {
            return None;
        }
        let handle = CardListHandle::from(&cardlist);
        self.cardlists.push(cardlist);
        self.cardlists_modified = true;
        Some(handle)
    }

    /// Removes the card list equal (name and id) to `cardlist`, with its items.
    pub fn remove_cardlist(&mut self, cardlist: &CardList) -> bool {
        match self.cardlists.iter().position(|owned| owned == cardlist) {
            Some(index) => {
                self.cardlists.remove(index);
                self.cardlists_modified = true;
                true
            }
            None => false,
        }
    }

    /// Moves `next` so it directly follows `sibling`.
    ///
    /// Returns `false` when either card list is not on this board.
    pub fn reorder_cardlist(&mut self, next: CardListHandle, sibling: CardListHandle) -> bool {
        let found = move_after(&mut self.cardlists, next.id(), sibling.id());
        if found && next != sibling {
            self.cardlists_modified = true;
        }
        found
    }

    pub fn cardlist(&self, handle: CardListHandle) -> Option<&CardList> {
        self.cardlists.iter().find(|cardlist| cardlist.id() == handle.id())
    }

    /// Write access to one card list for item edits and renames.
    pub fn cardlist_mut(&mut self, handle: CardListHandle) -> Option<CardListMut<'_>> {
        self.cardlists
            .iter_mut()
            .find(|cardlist| cardlist.id() == handle.id())
            .map(CardListMut::new)
    }

    /// Card lists in column order.
    pub fn cardlists(&self) -> &[CardList] {
        &self.cardlists
    }

    pub fn cardlist_count(&self) -> usize {
        self.cardlists.len()
    }

    /// Total items across all card lists.
    pub fn item_count(&self) -> usize {
        self.cardlists.iter().map(CardList::len).sum()
    }

    /// Serializes the whole board as one XML document.
    pub fn xml_structure(&self) -> String {
        let mut document = format!(
            "{XML_DECLARATION}\n<{BOARD_TAG} {ATTR_ID}=\"{}\" {ATTR_NAME}=\"{}\" {ATTR_BACKGROUND}=\"{}\">\n",
            self.id,
            escape_attribute(&self.name),
            escape_attribute(&self.background)
        );
        for cardlist in &self.cardlists {
            document.push_str(&cardlist.to_fragment());
        }
        document.push_str(&format!("</{BOARD_TAG}>\n"));
        document
    }

    /// Saves into the current directory. See `try_save_in`.
    pub fn save_as_xml(&mut self) -> bool {
        self.save_as_xml_in(&LocalFileSystem, Path::new(""))
    }

    /// Saves through `fs`, reporting only success or failure.
    pub fn save_as_xml_in<F>(&mut self, fs: &F, dir: &Path) -> bool
    where
        F: FileSystem + ?Sized,
    {
        self.try_save_in(fs, dir).is_ok()
    }

    /// Writes the board to its file path, or to a newly named file in `dir`
    /// when it has none yet, and returns the written path.
    ///
    /// # Errors
    /// - Returns an error when the target file already exists.
    /// - Returns an error when the write fails.
    pub fn try_save_in<F>(&mut self, fs: &F, dir: &Path) -> SaveResult<PathBuf>
    where
        F: FileSystem + ?Sized,
    {
        save_board(self, fs, dir)
    }

    /// Next free file name for `base` in the current directory.
    pub fn new_filename(base: &str) -> String {
        new_filename_in(&LocalFileSystem, Path::new(""), base)
    }

    /// Records a save checkpoint at `path` for the whole tree.
    pub(crate) fn checkpoint(&mut self, path: PathBuf) {
        self.file_path = Some(path);
        self.mark_saved();
    }

    /// Read-only snapshot for display and export.
    pub fn summary(&self) -> BoardSummary {
        BoardSummary {
            id: self.id,
            name: self.name.clone(),
            background: self.background.clone(),
            background_type: classify_background(&self.background),
            file_path: self
                .file_path
                .as_ref()
                .map(|path| path.display().to_string()),
            modified: self.is_modified(),
            cardlists: self
                .cardlists
                .iter()
                .map(|cardlist| CardListSummary {
                    id: cardlist.id(),
                    name: cardlist.name().to_string(),
                    items: cardlist.len(),
                })
                .collect(),
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for Board {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.id == other.id
    }
}

impl Eq for Board {}

impl Entity for Board {
    fn id(&self) -> EntityId {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl Modifiable for Board {
    fn is_modified(&self) -> bool {
        self.name_modified
            || self.background_modified
            || self.cardlists_modified
            || self.cardlists.iter().any(CardList::is_modified)
    }
}

impl Checkpoint for Board {
    fn mark_saved(&mut self) {
        self.name_modified = false;
        self.background_modified = false;
        self.cardlists_modified = false;
        self.cardlists.iter_mut().for_each(CardList::mark_saved);
    }
}

fn accepted_background(value: &str) -> &str {
    match classify_background(value) {
        BackgroundType::Invalid => BACKGROUND_DEFAULT,
        _ => value,
    }
}

/// Serializable snapshot of a board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSummary {
    pub id: EntityId,
    pub name: String,
    pub background: String,
    pub background_type: BackgroundType,
    pub file_path: Option<String>,
    pub modified: bool,
    pub cardlists: Vec<CardListSummary>,
}

/// Card list entry of a `BoardSummary`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardListSummary {
    pub id: EntityId,
    pub name: String,
    pub items: usize,
}
