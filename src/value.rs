use std::fmt;

use crate::tag::Tag;

/// Index into the cell heap. This is the only way to refer to a cell.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellId(pub u32);

/// Unique identifier for an open stream record.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct StreamId(pub u32);

/// Unique identifier for a mounted filesystem record.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct FsId(pub u32);

/// A single cell of the expression graph.
///
/// Each variant carries only the data it needs. Structural references are
/// `Option<CellId>`: `None` is the null reference.
#[derive(Clone, PartialEq, Eq)]
pub enum Cell {
    Int(i64),
    /// Cons cell. Both slots `None` is the empty list.
    Pair {
        first: Option<CellId>,
        rest: Option<CellId>,
    },
    Symbol(String),
    /// Arbitrary-precision integer, stored as its canonical digit string.
    Bignum(String),
    /// String payload; the text ends at the first NUL byte.
    Str(Vec<u8>),
    Bytes(Vec<u8>),
    Vector(Vec<u8>),
    /// Points at a `(params . body)` pair.
    Lambda(Option<CellId>),
    /// Opaque builtin operator index.
    Builtin(i64),
    /// Error code, see [`crate::errcode`].
    Error(i64),
    Stream(StreamId),
    Filesystem(FsId),
    Freed,
    Any,
    Void,
    Mark,
    /// A cell whose raw discriminant is not one we know.
    Unknown(i64),
}

impl Cell {
    /// The empty list.
    pub const NIL: Cell = Cell::Pair {
        first: None,
        rest: None,
    };

    /// Raw discriminant of this cell, as the runtime would store it.
    pub fn raw_tag(&self) -> i64 {
        match self {
            Cell::Unknown(raw) => *raw,
            other => other.tag().map(Tag::raw).unwrap_or(-1),
        }
    }

    /// The known tag of this cell, or `None` for [`Cell::Unknown`].
    pub fn tag(&self) -> Option<Tag> {
        let tag = match self {
            Cell::Int(_) => Tag::Int,
            Cell::Pair { .. } => Tag::Cons,
            Cell::Symbol(_) => Tag::Sym,
            Cell::Bignum(_) => Tag::Bignum,
            Cell::Str(_) => Tag::Str,
            Cell::Bytes(_) => Tag::Bytes,
            Cell::Vector(_) => Tag::Vec,
            Cell::Lambda(_) => Tag::Lambda,
            Cell::Builtin(_) => Tag::Builtin,
            Cell::Error(_) => Tag::Error,
            Cell::Stream(_) => Tag::Stream,
            Cell::Filesystem(_) => Tag::Fs,
            Cell::Freed => Tag::Freed,
            Cell::Any => Tag::Any,
            Cell::Void => Tag::Void,
            Cell::Mark => Tag::Mark,
            Cell::Unknown(raw) => return Tag::from_raw(*raw),
        };
        Some(tag)
    }

    pub fn is_nil(&self) -> bool {
        matches!(
            self,
            Cell::Pair {
                first: None,
                rest: None
            }
        )
    }

    pub fn is_pair(&self) -> bool {
        matches!(self, Cell::Pair { .. })
    }

    /// Byte length of the variant-specific data; 0 for scalar variants.
    pub fn size(&self) -> usize {
        match self {
            Cell::Symbol(s) | Cell::Bignum(s) => s.len(),
            Cell::Str(b) | Cell::Bytes(b) | Cell::Vector(b) => b.len(),
            _ => 0,
        }
    }

    /// Text of a string-like cell: the name of a symbol or bignum, or a
    /// string payload up to its first NUL.
    pub fn text(&self) -> Option<&[u8]> {
        match self {
            Cell::Symbol(s) | Cell::Bignum(s) => Some(s.as_bytes()),
            Cell::Str(b) => {
                let end = b.iter().position(|&c| c == 0).unwrap_or(b.len());
                Some(&b[..end])
            }
            _ => None,
        }
    }
}

impl fmt::Debug for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Int(n) => write!(f, "Int({})", n),
            Cell::Pair { first, rest } => write!(f, "Pair({:?}, {:?})", first, rest),
            Cell::Symbol(s) => write!(f, "Sym({})", s),
            Cell::Bignum(s) => write!(f, "Bignum({})", s),
            Cell::Str(b) => write!(f, "Str({} bytes)", b.len()),
            Cell::Bytes(b) => write!(f, "Bytes({} bytes)", b.len()),
            Cell::Vector(b) => write!(f, "Vector({} bytes)", b.len()),
            Cell::Lambda(def) => write!(f, "Lambda({:?})", def),
            Cell::Builtin(op) => write!(f, "Builtin({})", op),
            Cell::Error(code) => write!(f, "Error({})", code),
            Cell::Stream(id) => write!(f, "Stream({})", id.0),
            Cell::Filesystem(id) => write!(f, "Fs({})", id.0),
            Cell::Freed => write!(f, "Freed"),
            Cell::Any => write!(f, "Any"),
            Cell::Void => write!(f, "Void"),
            Cell::Mark => write!(f, "Mark"),
            Cell::Unknown(raw) => write!(f, "Unknown({})", raw),
        }
    }
}

impl fmt::Debug for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CellId({})", self.0)
    }
}

impl fmt::Debug for StreamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StreamId({})", self.0)
    }
}

impl fmt::Debug for FsId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FsId({})", self.0)
    }
}

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl fmt::Display for StreamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for FsId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
