/// Scratch sizes used when composing a parent rendering from its children.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriterConfig {
    /// Capacity of the scratch buffer each child (list element, list tail,
    /// parameter list) is rendered into.
    pub scratch: usize,
    /// Capacity for a closure body, which tends to be a larger expression.
    pub body_scratch: usize,
    /// Nesting depth past which the writer emits `...` instead of recursing.
    /// Keeps cyclic or very deep graphs from exhausting the stack.
    pub max_depth: usize,
}

pub const DEFAULT_SCRATCH: usize = 1024;
pub const DEFAULT_BODY_SCRATCH: usize = DEFAULT_SCRATCH * 4;
pub const DEFAULT_MAX_DEPTH: usize = 1024;

impl Default for WriterConfig {
    fn default() -> Self {
        WriterConfig {
            scratch: DEFAULT_SCRATCH,
            body_scratch: DEFAULT_BODY_SCRATCH,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl WriterConfig {
    /// Set the element scratch size; the body scratch stays four times that.
    pub fn with_scratch(mut self, scratch: usize) -> Self {
        self.scratch = scratch;
        self.body_scratch = scratch.saturating_mul(4);
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}
