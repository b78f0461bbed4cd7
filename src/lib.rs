//! Canonical text writer for tagged cell graphs.
//!
//! Cells live in a [`heap::Heap`] owned by the runtime. The printer borrows
//! the heap read-only and renders any cell, including null references and
//! corrupted tags, to a single-line, truncation-safe string.

pub mod bounded;
pub mod config;
pub mod errcode;
pub mod error;
pub mod heap;
pub mod printer;
pub mod tag;
pub mod value;

pub use config::WriterConfig;
pub use error::{CellError, CellResult};
pub use heap::Heap;
pub use printer::{to_text, write, write_to_cell, write_to_cell_with, Printer};
pub use tag::{tag_name, Tag};
pub use value::{Cell, CellId, FsId, StreamId};
