//! Canonical single-line rendering of cell graphs.
//!
//! The printer only reads the heap. The graph must not be mutated by anyone
//! else while a call is in progress; the heap borrow enforces that within
//! safe code, and callers sharing a heap across threads must hold a lock or
//! a snapshot for the duration of the call.

use std::fmt::Write;

use tracing::{debug, trace};

use crate::bounded::Bounded;
use crate::config::WriterConfig;
use crate::errcode;
use crate::heap::Heap;
use crate::value::{Cell, CellId, StreamId};

const HEX: &[u8; 16] = b"0123456789abcdef";

/// A read-only view of a heap that renders cells.
pub struct Printer<'h> {
    heap: &'h Heap,
    config: WriterConfig,
}

impl<'h> Printer<'h> {
    pub fn new(heap: &'h Heap) -> Self {
        Self::with_config(heap, WriterConfig::default())
    }

    pub fn with_config(heap: &'h Heap, config: WriterConfig) -> Self {
        Printer { heap, config }
    }

    /// Render `cell` as a standalone expression into a fresh buffer of
    /// `capacity` bytes (terminator included).
    pub fn render(&self, cell: Option<CellId>, capacity: usize) -> Bounded {
        let mut out = Bounded::new(capacity);
        self.print_inner(cell, &mut out, 0);
        out
    }

    /// Render a freestanding expression. `depth` counts nesting only: it grows
    /// through a pair's `first` slot and a closure body, never along a tail.
    fn print_inner(&self, cell: Option<CellId>, out: &mut Bounded, depth: usize) {
        if depth > self.config.max_depth {
            out.push_str("...");
            return;
        }

        let Some(val) = cell.and_then(|id| self.heap.get(id)) else {
            out.push_str("null");
            return;
        };

        match val {
            Cell::Int(n) => {
                let _ = write!(out, "{}", n);
            }
            Cell::Pair {
                first: None,
                rest: None,
            } => out.push_str("nil"),
            Cell::Pair { first, rest } => self.print_pair(*first, *rest, out, depth),
            Cell::Symbol(name) => out.push_str(name),
            Cell::Str(_) => {
                let text = val.text().unwrap_or_default();
                print_string(text, out);
            }
            Cell::Bignum(digits) => out.push_str(digits),
            Cell::Lambda(def) => self.print_lambda(*def, out, depth),
            Cell::Builtin(op) => {
                let _ = write!(out, "(op {})", op);
            }
            Cell::Error(code) => {
                let desc = errcode::describe(*code).unwrap_or("unknown");
                let _ = write!(out, "<e{}:{}>", code, desc);
            }
            Cell::Bytes(data) => print_hex(data, out),
            Cell::Stream(sid) => self.print_stream(*sid, out),
            other => {
                let _ = write!(out, "<tag:{}>", other.raw_tag());
            }
        }
    }

    fn is_pair(&self, cell: Option<CellId>) -> bool {
        cell.and_then(|id| self.heap.get(id))
            .is_some_and(Cell::is_pair)
    }

    fn print_pair(
        &self,
        first: Option<CellId>,
        rest: Option<CellId>,
        out: &mut Bounded,
        depth: usize,
    ) {
        if !self.is_pair(rest) {
            self.print_dotted(first, rest, out, depth);
            return;
        }

        let mut left = Bounded::new(self.config.scratch);
        self.print_inner(first, &mut left, depth + 1);
        let mut right = Bounded::new(self.config.scratch);
        self.print_tail(rest, &mut right, depth);

        out.push_byte(b'(');
        out.push(left.as_bytes());
        if !right.is_empty() {
            out.push_byte(b' ');
            out.push(right.as_bytes());
        }
        out.push_byte(b')');
    }

    /// Improper tail: dotted, no list spacing.
    fn print_dotted(
        &self,
        first: Option<CellId>,
        rest: Option<CellId>,
        out: &mut Bounded,
        depth: usize,
    ) {
        let mut left = Bounded::new(self.config.scratch);
        self.print_inner(first, &mut left, depth + 1);
        let mut right = Bounded::new(self.config.scratch);
        self.print_inner(rest, &mut right, depth + 1);
        out.push_byte(b'(');
        out.push(left.as_bytes());
        out.push_byte(b'.');
        out.push(right.as_bytes());
        out.push_byte(b')');
    }

    /// The remainder of a list, in tail position: elements separated by
    /// spaces, no parentheses, and nothing for the empty-list terminator.
    ///
    /// Walks the tail iteratively and stops once `out` is full, so a cyclic
    /// tail terminates without counting against `max_depth`.
    fn print_tail(&self, tail: Option<CellId>, out: &mut Bounded, depth: usize) {
        let mut current = tail;
        let mut leading = true;
        while out.remaining() > 0 {
            let Some(Cell::Pair { first, rest }) = current.and_then(|id| self.heap.get(id)) else {
                break;
            };
            if first.is_none() && rest.is_none() {
                break;
            }
            if !leading {
                out.push_byte(b' ');
            }
            leading = false;

            if !self.is_pair(*rest) {
                // An improper pair inside a list keeps its own parentheses.
                self.print_dotted(*first, *rest, out, depth);
                break;
            }
            let mut item = Bounded::new(self.config.scratch);
            self.print_inner(*first, &mut item, depth + 1);
            out.push(item.as_bytes());
            current = *rest;
        }
    }

    fn print_lambda(&self, def: Option<CellId>, out: &mut Bounded, depth: usize) {
        let params = def.and_then(|id| self.heap.first(id));
        let body = def.and_then(|id| self.heap.rest(id));

        // Every step appends at least a space, so a full buffer also ends a
        // cyclic parameter list.
        let mut args = Bounded::new(self.config.scratch);
        let mut current = params;
        while args.remaining() > 0 {
            let Some(Cell::Pair {
                first: Some(desc),
                rest: Some(next),
            }) = current.and_then(|id| self.heap.get(id))
            else {
                break;
            };
            let name = self
                .heap
                .first(*desc)
                .and_then(|id| self.heap.get(id))
                .and_then(|c| match c {
                    Cell::Symbol(name) => Some(name),
                    _ => None,
                });
            let Some(name) = name else { break };
            args.push_str(name);
            args.push_byte(b' ');
            current = Some(*next);
        }

        let mut body_out = Bounded::new(self.config.body_scratch);
        self.print_inner(body, &mut body_out, depth + 1);

        out.push_str("(fn ");
        out.push(args.as_bytes());
        out.push_byte(b' ');
        out.push(body_out.as_bytes());
        out.push_byte(b')');
    }

    fn print_stream(&self, sid: StreamId, out: &mut Bounded) {
        let Some(stream) = self.heap.stream_record(sid) else {
            let _ = write!(out, "<tag:{}>", Cell::Stream(sid).raw_tag());
            return;
        };
        let mount = self
            .heap
            .fs_record(stream.fs)
            .and_then(|fs| fs.mount_point);

        let _ = write!(out, "<stream:{}:", stream.id);
        out.push(self.text_of(stream.path));
        out.push_byte(b':');
        out.push(self.text_of(mount));
        out.push_byte(b'>');
    }

    fn text_of(&self, cell: Option<CellId>) -> &'h [u8] {
        cell.and_then(|id| self.heap.get(id))
            .and_then(Cell::text)
            .unwrap_or(b"null")
    }
}

/// Quoted string. The content is cut first so both quotes always fit.
fn print_string(text: &[u8], out: &mut Bounded) {
    let room = out.remaining().saturating_sub(2);
    out.push_byte(b'"');
    out.push(&text[..text.len().min(room)]);
    out.push_byte(b'"');
}

/// Lowercase hex in square brackets, two digits per byte, bounded by what
/// is left of the destination after the brackets.
fn print_hex(data: &[u8], out: &mut Bounded) {
    let count = data.len().min(out.remaining().saturating_sub(2) / 2);
    let mut hex = Vec::with_capacity(count * 2);
    for &b in &data[..count] {
        hex.push(HEX[(b >> 4) as usize]);
        hex.push(HEX[(b & 0x0f) as usize]);
    }
    out.push_byte(b'[');
    out.push(&hex);
    out.push_byte(b']');
}

/// Render `cell` into `buf` as a NUL-terminated string, truncating to fit.
///
/// Returns the text written, without the terminator, which sits at
/// `buf[text.len()]`. An empty `buf` is returned as is.
pub fn write<'b>(heap: &Heap, cell: Option<CellId>, buf: &'b mut [u8]) -> &'b [u8] {
    write_with(heap, WriterConfig::default(), cell, buf)
}

/// [`write`] with explicit scratch sizes.
pub fn write_with<'b>(
    heap: &Heap,
    config: WriterConfig,
    cell: Option<CellId>,
    buf: &'b mut [u8],
) -> &'b [u8] {
    if buf.is_empty() {
        return buf;
    }
    let out = Printer::with_config(heap, config).render(cell, buf.len());
    if out.truncated() {
        trace!(capacity = buf.len(), rendered = out.len(), "rendering truncated");
    }
    let n = out.copy_to(buf);
    let buf: &'b [u8] = buf;
    &buf[..n]
}

/// Render `cell` into the payload of the string or byte cell `dest`, using
/// its size minus one as capacity.
///
/// Any other kind of destination is left alone. Returns `dest` either way.
pub fn write_to_cell(heap: &mut Heap, cell: Option<CellId>, dest: CellId) -> CellId {
    write_to_cell_with(heap, WriterConfig::default(), cell, dest)
}

/// [`write_to_cell`] with explicit scratch sizes.
pub fn write_to_cell_with(
    heap: &mut Heap,
    config: WriterConfig,
    cell: Option<CellId>,
    dest: CellId,
) -> CellId {
    let size = match heap.get(dest) {
        Some(target @ (Cell::Str(_) | Cell::Bytes(_))) => target.size(),
        other => {
            debug!(?dest, found = ?other, "write target is not a string or byte cell, skipping");
            return dest;
        }
    };

    let out = Printer::with_config(heap, config).render(cell, size.saturating_sub(1));
    if out.truncated() {
        trace!(?dest, size, rendered = out.len(), "rendering truncated");
    }
    if let Some(payload) = heap.payload_mut(dest) {
        out.copy_to(payload);
    }
    dest
}

/// Render to an owned string, replacing invalid UTF-8. For REPLs and logs.
pub fn to_text(heap: &Heap, cell: Option<CellId>, capacity: usize) -> String {
    let out = Printer::new(heap).render(cell, capacity);
    String::from_utf8(out.into_bytes())
        .unwrap_or_else(|e| String::from_utf8_lossy(e.as_bytes()).into_owned())
}
