//! Stack of active user function calls.
//!
//! Bounds recursion depth and provides the backtrace attached to runtime
//! errors.

use lu_ir::Span;

use crate::error::{BacktraceFrame, EvalErrorKind};

#[derive(Clone, Debug)]
pub struct CallFrame {
    pub name: String,
    pub call_span: Span,
}

pub struct CallStack {
    frames: Vec<CallFrame>,
    max_depth: usize,
}

impl CallStack {
    pub fn new(max_depth: usize) -> Self {
        CallStack {
            frames: Vec::new(),
            max_depth,
        }
    }

    /// Push a frame. The frame is not pushed if the limit is reached.
    pub fn push(&mut self, frame: CallFrame) -> Result<(), EvalErrorKind> {
        if self.frames.len() >= self.max_depth {
            return Err(EvalErrorKind::StackOverflow(self.max_depth));
        }
        self.frames.push(frame);
        Ok(())
    }

    pub fn pop(&mut self) {
        debug_assert!(!self.frames.is_empty(), "CallStack::pop() on empty stack");
        self.frames.pop();
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Active calls, innermost first.
    pub fn backtrace(&self) -> Vec<BacktraceFrame> {
        self.frames
            .iter()
            .rev()
            .map(|frame| BacktraceFrame {
                function: frame.name.clone(),
                call_span: frame.call_span,
            })
            .collect()
    }
}
