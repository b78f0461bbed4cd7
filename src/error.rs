use thiserror::Error;

use crate::value::{CellId, FsId};

/// Errors raised by the heap's builder API.
///
/// Rendering never fails; these only come from constructing or looking up
/// cells and records.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CellError {
    /// Heap capacity exceeded.
    #[error("heap capacity of {0} cells exceeded")]
    HeapOverflow(usize),

    /// A handle that does not name a live cell.
    #[error("dangling cell handle {0}")]
    Dangling(CellId),

    /// A live cell that was expected to be a filesystem.
    #[error("cell {0} is not a filesystem")]
    NotFilesystem(CellId),

    /// A filesystem id with no record behind it.
    #[error("no filesystem record for id {0}")]
    UnknownFilesystem(FsId),
}

pub type CellResult<T> = Result<T, CellError>;
