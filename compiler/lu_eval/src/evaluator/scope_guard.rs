//! RAII scope guard for the evaluator's context.
//!
//! [`ScopedEvaluator`] pushes a scope (or a call frame) on creation and pops
//! it on drop, so it is released on every exit path, including runtime
//! errors and panics.

use std::ops::{Deref, DerefMut};

use super::Evaluator;

/// Guard giving access to the evaluator while a scope is pushed.
pub struct ScopedEvaluator<'a> {
    evaluator: &'a mut Evaluator,
    frame: bool,
}

impl Drop for ScopedEvaluator<'_> {
    fn drop(&mut self) {
        if self.frame {
            self.evaluator.context.pop_frame();
        } else {
            self.evaluator.context.pop_scope();
        }
    }
}

impl Deref for ScopedEvaluator<'_> {
    type Target = Evaluator;

    fn deref(&self) -> &Self::Target {
        self.evaluator
    }
}

impl DerefMut for ScopedEvaluator<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.evaluator
    }
}

impl Evaluator {
    /// Push a scope that is popped when the guard drops.
    pub fn scoped(&mut self) -> ScopedEvaluator<'_> {
        self.context.push_scope();
        ScopedEvaluator {
            evaluator: self,
            frame: false,
        }
    }

    /// Push a call frame linked to the scope the callee was declared in.
    pub fn framed(&mut self, static_link: usize) -> ScopedEvaluator<'_> {
        self.context.push_frame(static_link);
        ScopedEvaluator {
            evaluator: self,
            frame: true,
        }
    }

    /// Run `f` inside a fresh scope.
    pub fn with_scope<T>(&mut self, f: impl FnOnce(&mut Evaluator) -> T) -> T {
        let mut scoped = self.scoped();
        f(&mut *scoped)
    }
}
