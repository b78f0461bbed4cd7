/// Type tags of the cell runtime, with their raw discriminants.
///
/// The numbering is fixed: it is what the runtime stores in a cell header and
/// what the writer echoes back for cells it has no dedicated syntax for.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Tag {
    Freed,
    Int,
    Cons,
    Sym,
    Lambda,
    Builtin,
    Bignum,
    Str,
    Bytes,
    Vec,
    Error,
    Any,
    Void,
    Stream,
    Fs,
    Mark,
}

pub const TAG_FREED: i64 = 0;
pub const TAG_INT: i64 = 1;
pub const TAG_CONS: i64 = 2;
pub const TAG_SYM: i64 = 3;
pub const TAG_LAMBDA: i64 = 4;
pub const TAG_BUILTIN: i64 = 5;
pub const TAG_BIGNUM: i64 = 6;
pub const TAG_STR: i64 = 7;
pub const TAG_BYTES: i64 = 8;
pub const TAG_VEC: i64 = 9;
pub const TAG_ERROR: i64 = 10;
pub const TAG_ANY: i64 = 11;
pub const TAG_VOID: i64 = 12;
pub const TAG_STREAM: i64 = 13;
pub const TAG_FS: i64 = 14;
/// The collector's mark bit lives well above the variant range.
pub const TAG_MARK: i64 = 2048;

impl Tag {
    pub fn raw(self) -> i64 {
        match self {
            Tag::Freed => TAG_FREED,
            Tag::Int => TAG_INT,
            Tag::Cons => TAG_CONS,
            Tag::Sym => TAG_SYM,
            Tag::Lambda => TAG_LAMBDA,
            Tag::Builtin => TAG_BUILTIN,
            Tag::Bignum => TAG_BIGNUM,
            Tag::Str => TAG_STR,
            Tag::Bytes => TAG_BYTES,
            Tag::Vec => TAG_VEC,
            Tag::Error => TAG_ERROR,
            Tag::Any => TAG_ANY,
            Tag::Void => TAG_VOID,
            Tag::Stream => TAG_STREAM,
            Tag::Fs => TAG_FS,
            Tag::Mark => TAG_MARK,
        }
    }

    pub fn from_raw(raw: i64) -> Option<Tag> {
        let tag = match raw {
            TAG_FREED => Tag::Freed,
            TAG_INT => Tag::Int,
            TAG_CONS => Tag::Cons,
            TAG_SYM => Tag::Sym,
            TAG_LAMBDA => Tag::Lambda,
            TAG_BUILTIN => Tag::Builtin,
            TAG_BIGNUM => Tag::Bignum,
            TAG_STR => Tag::Str,
            TAG_BYTES => Tag::Bytes,
            TAG_VEC => Tag::Vec,
            TAG_ERROR => Tag::Error,
            TAG_ANY => Tag::Any,
            TAG_VOID => Tag::Void,
            TAG_STREAM => Tag::Stream,
            TAG_FS => Tag::Fs,
            TAG_MARK => Tag::Mark,
            _ => return None,
        };
        Some(tag)
    }

    /// Short human-readable label, for diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            Tag::Freed => "freed",
            Tag::Int => "int",
            Tag::Cons => "cons",
            Tag::Sym => "sym",
            Tag::Lambda => "lambda",
            Tag::Builtin => "builtin",
            Tag::Bignum => "bignum",
            Tag::Str => "string",
            Tag::Bytes => "bytes",
            Tag::Vec => "vector",
            Tag::Error => "error",
            Tag::Any => "any",
            Tag::Void => "void",
            Tag::Stream => "stream",
            Tag::Fs => "filesystem",
            Tag::Mark => "gc_mark",
        }
    }
}

/// Classify a raw discriminant. Anything outside the known set is `"unknown"`.
pub fn tag_name(raw: i64) -> &'static str {
    Tag::from_raw(raw).map_or("unknown", Tag::name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_tags_have_names() {
        assert_eq!(tag_name(TAG_INT), "int");
        assert_eq!(tag_name(TAG_CONS), "cons");
        assert_eq!(tag_name(TAG_STR), "string");
        assert_eq!(tag_name(TAG_FS), "filesystem");
        assert_eq!(tag_name(TAG_MARK), "gc_mark");
    }

    #[test]
    fn unknown_discriminants_are_unknown() {
        assert_eq!(tag_name(-1), "unknown");
        assert_eq!(tag_name(15), "unknown");
        assert_eq!(tag_name(i64::MAX), "unknown");
    }

    #[test]
    fn raw_round_trips_through_from_raw() {
        for raw in (0..=14).chain([TAG_MARK]) {
            let tag = Tag::from_raw(raw).unwrap();
            assert_eq!(tag.raw(), raw);
        }
    }
}
