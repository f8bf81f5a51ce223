//! Board persistence: file access, file naming and the document codec.
//!
//! # Responsibility
//! - Read and write board documents through the `FileSystem` contract.
//! - Decode parsed document trees into boards, rejecting invalid input.
//! - Allocate collision-free file names for first saves.
//!
//! # Invariants
//! - Loading never yields a partially built board: any structural problem
//!   is an error.
//! - Saving never overwrites an existing file.

use crate::document::DocumentError;
use crate::model::entity::EntityId;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io;
use std::path::PathBuf;

mod codec;
pub mod filename;
pub mod filesystem;

pub use codec::{decode_board, load_board, save_board};
pub use filename::{
    new_filename_in, sanitize_file_stem, BOARD_FILE_EXTENSION, DEFAULT_FILE_STEM,
    MAX_FILE_STEM_BYTES,
};
pub use filesystem::{FileSystem, LocalFileSystem};

pub type LoadResult<T> = Result<T, BoardLoadError>;
pub type SaveResult<T> = Result<T, BoardSaveError>;

/// Reasons a board document cannot be loaded.
#[derive(Debug)]
pub enum BoardLoadError {
    /// The file could not be read.
    Io { path: PathBuf, source: io::Error },
    /// The text is not a well-formed document.
    Document(DocumentError),
    /// Root element is not a board.
    UnexpectedRoot(String),
    /// Element that does not belong under `parent`.
    UnexpectedElement { parent: &'static str, tag: String },
    /// Required attribute is absent.
    MissingAttribute {
        tag: &'static str,
        attribute: &'static str,
    },
    /// Id attribute is not a positive integer.
    InvalidId { tag: &'static str, value: String },
    /// Two siblings share an id.
    DuplicateId { tag: &'static str, id: EntityId },
}

impl BoardLoadError {
    /// Stable code for log lines.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Io { .. } => "read_failed",
            Self::Document(_) => "parse_failed",
            Self::UnexpectedRoot(_) => "unexpected_root",
            Self::UnexpectedElement { .. } => "unexpected_element",
            Self::MissingAttribute { .. } => "missing_attribute",
            Self::InvalidId { .. } => "invalid_id",
            Self::DuplicateId { .. } => "duplicate_id",
        }
    }
}

impl Display for BoardLoadError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read board file `{}`: {source}", path.display())
            }
            Self::Document(err) => write!(f, "invalid board document: {err}"),
            Self::UnexpectedRoot(tag) => {
                write!(f, "expected root element `board`, found `{tag}`")
            }
            Self::UnexpectedElement { parent, tag } => {
                write!(f, "unexpected element `{tag}` inside `{parent}`")
            }
            Self::MissingAttribute { tag, attribute } => {
                write!(f, "element `{tag}` is missing attribute `{attribute}`")
            }
            Self::InvalidId { tag, value } => {
                write!(f, "element `{tag}` has invalid id `{value}`")
            }
            Self::DuplicateId { tag, id } => write!(f, "duplicate `{tag}` id {id}"),
        }
    }
}

impl Error for BoardLoadError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Document(err) => Some(err),
            Self::UnexpectedRoot(_) => None,
            Self::UnexpectedElement { .. } => None,
            Self::MissingAttribute { .. } => None,
            Self::InvalidId { .. } => None,
            Self::DuplicateId { .. } => None,
        }
    }
}

impl From<DocumentError> for BoardLoadError {
    fn from(value: DocumentError) -> Self {
        Self::Document(value)
    }
}

/// Reasons a board could not be saved.
#[derive(Debug)]
pub enum BoardSaveError {
    /// Something already exists at the target path.
    TargetExists(PathBuf),
    /// The write itself failed.
    Io { path: PathBuf, source: io::Error },
}

impl BoardSaveError {
    /// Stable code for log lines.
    pub fn code(&self) -> &'static str {
        match self {
            Self::TargetExists(_) => "target_exists",
            Self::Io { .. } => "write_failed",
        }
    }
}

impl Display for BoardSaveError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TargetExists(path) => {
                write!(f, "refusing to overwrite existing file `{}`", path.display())
            }
            Self::Io { path, source } => {
                write!(f, "failed to write board file `{}`: {source}", path.display())
            }
        }
    }
}

impl Error for BoardSaveError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::TargetExists(_) => None,
            Self::Io { source, .. } => Some(source),
        }
    }
}
