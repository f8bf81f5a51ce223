//! Persistence and identity core for progress kanban boards.
//! This crate owns the board data model and its on-disk document format.

pub mod document;
pub mod logging;
pub mod model;
pub mod storage;

pub use document::{DocumentError, DocumentNode, DocumentParser, XmlDocumentParser};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::background::{classify_background, BackgroundType, BACKGROUND_DEFAULT};
pub use model::board::{Board, BoardSummary, CardListSummary};
pub use model::cardlist::{CardList, CardListHandle, CardListMut};
pub use model::entity::{generate_id, Entity, EntityId, Fragment, Modifiable};
pub use model::item::{Item, ItemHandle, ItemMut};
pub use storage::{
    new_filename_in, BoardLoadError, BoardSaveError, FileSystem, LoadResult, LocalFileSystem,
    SaveResult,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
