//! Runtime error codes carried by error cells.

pub const ERR_SYNTAX: i64 = 0;
pub const ERR_MAX_EVAL_DEPTH: i64 = 1;
pub const ERR_UNKNOWN_OP: i64 = 2;
pub const ERR_APPLY_NIL: i64 = 3;
pub const ERR_INVALID_PARAM_TYPE: i64 = 4;
pub const ERR_OUT_OF_BOUNDS: i64 = 5;

static DESCRIPTIONS: [(i64, &str); 6] = [
    (ERR_SYNTAX, "syntax error."),
    (ERR_MAX_EVAL_DEPTH, "deepest level of evaluation reached."),
    (ERR_UNKNOWN_OP, "unknown operation."),
    (ERR_APPLY_NIL, "cannot apply nil."),
    (ERR_INVALID_PARAM_TYPE, "invalid or no parameter given."),
    (ERR_OUT_OF_BOUNDS, "out of bounds."),
];

/// Description of a known error code.
pub fn describe(code: i64) -> Option<&'static str> {
    DESCRIPTIONS
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, desc)| *desc)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codes() {
        assert_eq!(describe(ERR_UNKNOWN_OP), Some("unknown operation."));
        assert_eq!(describe(ERR_OUT_OF_BOUNDS), Some("out of bounds."));
    }

    #[test]
    fn unknown_codes() {
        assert_eq!(describe(-1), None);
        assert_eq!(describe(6), None);
        assert_eq!(describe(99), None);
    }
}
