//! Evaluator configuration.

/// Default bound on nested user function calls.
pub const DEFAULT_MAX_CALL_DEPTH: usize = 10_000;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InterpreterConfig {
    /// Calls nested deeper than this fail with a stack overflow error.
    pub max_call_depth: usize,
}

impl InterpreterConfig {
    pub fn new() -> Self {
        InterpreterConfig {
            max_call_depth: DEFAULT_MAX_CALL_DEPTH,
        }
    }

    #[must_use]
    pub fn with_max_call_depth(mut self, depth: usize) -> Self {
        self.max_call_depth = depth;
        self
    }
}

impl Default for InterpreterConfig {
    fn default() -> Self {
        Self::new()
    }
}
