//! Board document load/save.
//!
//! # Responsibility
//! - Walk a parsed node tree and rebuild the Board → CardList → Item graph.
//! - Write a board's document to a fresh file and record the checkpoint.
//!
//! # Invariants
//! - Persisted ids are restored exactly.
//! - A freshly loaded or saved board reports `is_modified() == false`.
//! - Log lines carry counts and timings only, never names or backgrounds.

use super::filename::new_filename_in;
use super::filesystem::FileSystem;
use super::{BoardLoadError, BoardSaveError, LoadResult, SaveResult};
use crate::document::schema::{
    ATTR_BACKGROUND, ATTR_ID, ATTR_NAME, BOARD_TAG, CARDLIST_TAG, ITEM_TAG,
};
use crate::document::{DocumentNode, DocumentParser};
use crate::model::background::{classify_background, BackgroundType};
use crate::model::board::Board;
use crate::model::cardlist::CardList;
use crate::model::entity::{generate_id, Checkpoint, EntityId};
use crate::model::item::Item;
use log::{error, info, warn};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Reads, parses and decodes the board stored at `path`.
///
/// # Side effects
/// - Emits `board_load` logging events with duration and status.
pub fn load_board<F, P>(fs: &F, parser: &P, path: &Path) -> LoadResult<Board>
where
    F: FileSystem + ?Sized,
    P: DocumentParser + ?Sized,
{
    let started_at = Instant::now();
    info!("event=board_load module=storage status=start");

    let result = read_and_decode(fs, parser, path);
    match &result {
        Ok(board) => info!(
            "event=board_load module=storage status=ok cardlists={} items={} duration_ms={}",
            board.cardlist_count(),
            board.item_count(),
            started_at.elapsed().as_millis()
        ),
        Err(err) => error!(
            "event=board_load module=storage status=error duration_ms={} error_code={}",
            started_at.elapsed().as_millis(),
            err.code()
        ),
    }
    result
}

fn read_and_decode<F, P>(fs: &F, parser: &P, path: &Path) -> LoadResult<Board>
where
    F: FileSystem + ?Sized,
    P: DocumentParser + ?Sized,
{
    let text = fs.read(path).map_err(|source| BoardLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let root = parser.parse(&text)?;
    let mut board = decode_board(&root)?;
    board.checkpoint(path.to_path_buf());
    Ok(board)
}

/// Rebuilds a board from a parsed document tree.
///
/// The returned board has no file path; `load_board` records it.
pub fn decode_board(root: &DocumentNode) -> LoadResult<Board> {
    if root.tag != BOARD_TAG {
        return Err(BoardLoadError::UnexpectedRoot(root.tag.clone()));
    }

    let id = required_id(root, BOARD_TAG)?;
    let name = required_attribute(root, BOARD_TAG, ATTR_NAME)?;
    let background = required_attribute(root, BOARD_TAG, ATTR_BACKGROUND)?;
    if classify_background(background) == BackgroundType::Invalid {
        warn!("event=board_decode module=storage status=fallback field=background");
    }

    let mut board = Board::restore(id, name, background);
    for child in root.children() {
        let cardlist = decode_cardlist(child)?;
        let cardlist_id = cardlist.id();
        if board.insert_cardlist(cardlist).is_none() {
            return Err(BoardLoadError::DuplicateId {
                tag: CARDLIST_TAG,
                id: cardlist_id,
            });
        }
    }

    board.mark_saved();
    Ok(board)
}

fn decode_cardlist(node: &DocumentNode) -> LoadResult<CardList> {
    if node.tag != CARDLIST_TAG {
        return Err(BoardLoadError::UnexpectedElement {
            parent: BOARD_TAG,
            tag: node.tag.clone(),
        });
    }

    let id = required_id(node, CARDLIST_TAG)?;
    let name = required_attribute(node, CARDLIST_TAG, ATTR_NAME)?;
    let mut cardlist = CardList::with_id(name, id);
    for child in node.children() {
        let item = decode_item(child)?;
        let item_id = item.id();
        if cardlist.add_item(item).is_none() {
            return Err(BoardLoadError::DuplicateId {
                tag: ITEM_TAG,
                id: item_id,
            });
        }
    }
    Ok(cardlist)
}

fn decode_item(node: &DocumentNode) -> LoadResult<Item> {
    if node.tag != ITEM_TAG {
        return Err(BoardLoadError::UnexpectedElement {
            parent: CARDLIST_TAG,
            tag: node.tag.clone(),
        });
    }
    if let Some(child) = node.children().first() {
        return Err(BoardLoadError::UnexpectedElement {
            parent: ITEM_TAG,
            tag: child.tag.clone(),
        });
    }

    let name = required_attribute(node, ITEM_TAG, ATTR_NAME)?;
    let id = match node.attribute(ATTR_ID) {
        Some(value) => parse_id(ITEM_TAG, value)?,
        // Older files wrote items without ids.
        None => {
            warn!("event=board_decode module=storage status=fallback field=item_id");
            generate_id()
        }
    };
    Ok(Item::with_id(name, id))
}

fn required_attribute<'a>(
    node: &'a DocumentNode,
    tag: &'static str,
    attribute: &'static str,
) -> LoadResult<&'a str> {
    node.attribute(attribute)
        .ok_or(BoardLoadError::MissingAttribute { tag, attribute })
}

fn required_id(node: &DocumentNode, tag: &'static str) -> LoadResult<EntityId> {
    parse_id(tag, required_attribute(node, tag, ATTR_ID)?)
}

fn parse_id(tag: &'static str, value: &str) -> LoadResult<EntityId> {
    match value.trim().parse::<EntityId>() {
        Ok(id) if id != 0 => Ok(id),
        _ => Err(BoardLoadError::InvalidId {
            tag,
            value: value.to_string(),
        }),
    }
}

/// Writes `board` to its file path, or to a new file in `dir` on first save.
///
/// On success the board's file path is updated and every modified flag in
/// the tree is cleared. On failure the board is left untouched.
///
/// # Side effects
/// - Emits `board_save` logging events with duration and status.
pub fn save_board<F>(board: &mut Board, fs: &F, dir: &Path) -> SaveResult<PathBuf>
where
    F: FileSystem + ?Sized,
{
    let started_at = Instant::now();
    let first_save = board.file_path().is_none();
    info!("event=board_save module=storage status=start first_save={first_save}");

    let target = match board.file_path() {
        Some(path) => path.to_path_buf(),
        None => dir.join(new_filename_in(fs, dir, board.name())),
    };
    let document = board.xml_structure();

    match write_new(fs, &target, &document) {
        Ok(()) => {
            board.checkpoint(target.clone());
            info!(
                "event=board_save module=storage status=ok bytes={} cardlists={} duration_ms={}",
                document.len(),
                board.cardlist_count(),
                started_at.elapsed().as_millis()
            );
            Ok(target)
        }
        Err(err) => {
            error!(
                "event=board_save module=storage status=error duration_ms={} error_code={}",
                started_at.elapsed().as_millis(),
                err.code()
            );
            Err(err)
        }
    }
}

fn write_new<F>(fs: &F, target: &Path, contents: &str) -> SaveResult<()>
where
    F: FileSystem + ?Sized,
{
    if fs.exists(target) {
        return Err(BoardSaveError::TargetExists(target.to_path_buf()));
    }
    fs.write(target, contents).map_err(|source| {
        if source.kind() == ErrorKind::AlreadyExists {
            BoardSaveError::TargetExists(target.to_path_buf())
        } else {
            BoardSaveError::Io {
                path: target.to_path_buf(),
                source,
            }
        }
    })
}
