use crate::error::{CellError, CellResult};
use crate::value::{Cell, CellId, FsId, StreamId};

/// Display metadata of an open stream.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StreamRecord {
    /// Stable logical id, shown when the stream is printed.
    pub id: u32,
    /// String cell holding the stream's path.
    pub path: Option<CellId>,
    pub fs: FsId,
}

/// A mounted filesystem.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FsRecord {
    /// String cell holding the mount point.
    pub mount_point: Option<CellId>,
}

/// The cell heap. All cells are allocated here; a `CellId` is an index into
/// `cells`. Stream and filesystem records live in side tables.
///
/// The heap is the runtime's side of the writer: the writer only ever
/// borrows it, except for the payload of a destination cell.
pub struct Heap {
    cells: Vec<Cell>,
    streams: Vec<StreamRecord>,
    filesystems: Vec<FsRecord>,
    capacity: usize,
}

impl Heap {
    pub fn new(capacity: usize) -> Self {
        Heap {
            cells: Vec::with_capacity(capacity.min(1024)),
            streams: Vec::new(),
            filesystems: Vec::new(),
            capacity,
        }
    }

    /// Allocate a new cell.
    /// Returns Err(HeapOverflow) if capacity is exceeded.
    pub fn alloc(&mut self, cell: Cell) -> CellResult<CellId> {
        if self.cells.len() >= self.capacity {
            return Err(CellError::HeapOverflow(self.capacity));
        }
        let id = CellId(self.cells.len() as u32);
        self.cells.push(cell);
        Ok(id)
    }

    /// Look up a cell. Dangling handles yield `None`.
    #[inline]
    pub fn get(&self, id: CellId) -> Option<&Cell> {
        self.cells.get(id.0 as usize)
    }

    /// Like [`Heap::get`], but a dangling handle is an error.
    pub fn cell(&self, id: CellId) -> CellResult<&Cell> {
        self.get(id).ok_or(CellError::Dangling(id))
    }

    /// First slot of a pair; `None` for anything else.
    #[inline]
    pub fn first(&self, id: CellId) -> Option<CellId> {
        match self.get(id)? {
            Cell::Pair { first, .. } => *first,
            _ => None,
        }
    }

    /// Rest slot of a pair; `None` for anything else.
    #[inline]
    pub fn rest(&self, id: CellId) -> Option<CellId> {
        match self.get(id)? {
            Cell::Pair { rest, .. } => *rest,
            _ => None,
        }
    }

    pub fn int(&mut self, n: i64) -> CellResult<CellId> {
        self.alloc(Cell::Int(n))
    }

    pub fn symbol(&mut self, name: &str) -> CellResult<CellId> {
        self.alloc(Cell::Symbol(name.to_string()))
    }

    pub fn bignum(&mut self, digits: &str) -> CellResult<CellId> {
        self.alloc(Cell::Bignum(digits.to_string()))
    }

    pub fn string(&mut self, text: &str) -> CellResult<CellId> {
        self.alloc(Cell::Str(text.as_bytes().to_vec()))
    }

    pub fn bytes(&mut self, data: &[u8]) -> CellResult<CellId> {
        self.alloc(Cell::Bytes(data.to_vec()))
    }

    pub fn vector(&mut self, data: &[u8]) -> CellResult<CellId> {
        self.alloc(Cell::Vector(data.to_vec()))
    }

    pub fn builtin(&mut self, op: i64) -> CellResult<CellId> {
        self.alloc(Cell::Builtin(op))
    }

    pub fn error(&mut self, code: i64) -> CellResult<CellId> {
        self.alloc(Cell::Error(code))
    }

    /// A fresh empty-list cell.
    pub fn nil(&mut self) -> CellResult<CellId> {
        self.alloc(Cell::NIL)
    }

    pub fn cons(&mut self, first: Option<CellId>, rest: Option<CellId>) -> CellResult<CellId> {
        self.alloc(Cell::Pair { first, rest })
    }

    /// Build a proper list from a slice of values, terminated by a fresh
    /// empty-list cell.
    pub fn list(&mut self, values: &[Option<CellId>]) -> CellResult<CellId> {
        let mut result = self.nil()?;
        for &val in values.iter().rev() {
            result = self.cons(val, Some(result))?;
        }
        Ok(result)
    }

    /// Build a closure over `params` with `body`.
    ///
    /// Each parameter becomes a one-element descriptor list `(name)`, and the
    /// closure points at the `(params . body)` pair.
    pub fn lambda(&mut self, params: &[&str], body: Option<CellId>) -> CellResult<CellId> {
        let mut descriptors = Vec::with_capacity(params.len());
        for name in params {
            let sym = self.symbol(name)?;
            descriptors.push(Some(self.list(&[Some(sym)])?));
        }
        let param_list = self.list(&descriptors)?;
        let def = self.cons(Some(param_list), body)?;
        self.alloc(Cell::Lambda(Some(def)))
    }

    /// Register a filesystem mounted at `mount_point` and return its cell.
    pub fn filesystem(&mut self, mount_point: &str) -> CellResult<CellId> {
        let mount = self.string(mount_point)?;
        let id = FsId(self.filesystems.len() as u32);
        self.filesystems.push(FsRecord {
            mount_point: Some(mount),
        });
        self.alloc(Cell::Filesystem(id))
    }

    /// Open a stream record on `fs` and return its cell. Stream ids are
    /// handed out sequentially and never reused.
    pub fn stream(&mut self, path: &str, fs: FsId) -> CellResult<CellId> {
        if self.fs_record(fs).is_none() {
            return Err(CellError::UnknownFilesystem(fs));
        }
        let path = self.string(path)?;
        let sid = StreamId(self.streams.len() as u32);
        self.streams.push(StreamRecord {
            id: sid.0,
            path: Some(path),
            fs,
        });
        self.alloc(Cell::Stream(sid))
    }

    /// Filesystem id behind a filesystem cell.
    pub fn fs_of(&self, id: CellId) -> CellResult<FsId> {
        match self.cell(id)? {
            Cell::Filesystem(fs) => Ok(*fs),
            _ => Err(CellError::NotFilesystem(id)),
        }
    }

    pub fn stream_record(&self, id: StreamId) -> Option<&StreamRecord> {
        self.streams.get(id.0 as usize)
    }

    pub fn fs_record(&self, id: FsId) -> Option<&FsRecord> {
        self.filesystems.get(id.0 as usize)
    }

    /// A zero-filled string cell of `size` bytes, for use as a write target.
    pub fn buffer(&mut self, size: usize) -> CellResult<CellId> {
        self.alloc(Cell::Str(vec![0; size]))
    }

    /// A zero-filled byte cell of `size` bytes, for use as a write target.
    pub fn byte_buffer(&mut self, size: usize) -> CellResult<CellId> {
        self.alloc(Cell::Bytes(vec![0; size]))
    }

    /// The writable payload of a string or byte cell. `None` for every other
    /// variant and for dangling handles.
    pub fn payload_mut(&mut self, id: CellId) -> Option<&mut [u8]> {
        match self.cells.get_mut(id.0 as usize)? {
            Cell::Str(b) | Cell::Bytes(b) => Some(b.as_mut_slice()),
            _ => None,
        }
    }

    /// Number of allocated cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alloc_respects_capacity() {
        let mut heap = Heap::new(2);
        heap.int(1).unwrap();
        heap.int(2).unwrap();
        assert_eq!(heap.int(3), Err(CellError::HeapOverflow(2)));
        assert_eq!(heap.len(), 2);
        assert_eq!(heap.capacity(), 2);
    }

    #[test]
    fn list_is_terminated_by_empty_list() {
        let mut heap = Heap::new(64);
        let a = heap.int(1).unwrap();
        let list = heap.list(&[Some(a)]).unwrap();
        assert_eq!(heap.first(list), Some(a));
        let tail = heap.rest(list).unwrap();
        assert!(heap.get(tail).unwrap().is_nil());
    }

    #[test]
    fn first_and_rest_of_non_pairs_are_none() {
        let mut heap = Heap::new(8);
        let n = heap.int(7).unwrap();
        assert_eq!(heap.first(n), None);
        assert_eq!(heap.rest(n), None);
        assert_eq!(heap.first(CellId(99)), None);
    }

    #[test]
    fn dangling_handles() {
        let heap = Heap::new(8);
        assert!(heap.get(CellId(3)).is_none());
        assert_eq!(heap.cell(CellId(3)), Err(CellError::Dangling(CellId(3))));
    }

    #[test]
    fn streams_need_a_mounted_filesystem() {
        let mut heap = Heap::new(64);
        assert_eq!(
            heap.stream("/x", FsId(0)),
            Err(CellError::UnknownFilesystem(FsId(0)))
        );
        let fs_cell = heap.filesystem("/sd").unwrap();
        let fs = heap.fs_of(fs_cell).unwrap();
        let n = heap.int(0).unwrap();
        assert_eq!(heap.fs_of(n), Err(CellError::NotFilesystem(n)));
        let s1 = heap.stream("/sd/a", fs).unwrap();
        let s2 = heap.stream("/sd/b", fs).unwrap();
        let id_of = |heap: &Heap, c: CellId| match heap.get(c) {
            Some(Cell::Stream(sid)) => heap.stream_record(*sid).unwrap().id,
            other => panic!("not a stream: {:?}", other),
        };
        assert_eq!(id_of(&heap, s1), 0);
        assert_eq!(id_of(&heap, s2), 1);
    }

    #[test]
    fn payload_only_for_text_and_bytes() {
        let mut heap = Heap::new(8);
        let s = heap.buffer(4).unwrap();
        let b = heap.byte_buffer(2).unwrap();
        let n = heap.int(0).unwrap();
        assert_eq!(heap.payload_mut(s).map(|p| p.len()), Some(4));
        assert_eq!(heap.payload_mut(b).map(|p| p.len()), Some(2));
        assert!(heap.payload_mut(n).is_none());
    }
}
