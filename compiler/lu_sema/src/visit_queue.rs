//! Deferred visiting of function bodies.
//!
//! Name resolution registers a function as soon as it sees the declaration
//! but parks its body here. A run of consecutive function declarations is
//! therefore fully registered before any of their bodies is resolved, which
//! is what makes mutual recursion between them work. The queue is flushed
//! at the first statement that is not a function declaration and at the end
//! of every statement list.

use std::rc::Rc;

use lu_ir::FunctionDecl;

#[derive(Debug, Default)]
pub struct DeclarationVisitQueue {
    pending: Vec<Rc<FunctionDecl>>,
}

impl DeclarationVisitQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enqueue(&mut self, decl: Rc<FunctionDecl>) {
        self.pending.push(decl);
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Take the queued bodies in declaration order, leaving the queue empty.
    ///
    /// Bodies visited from the returned list may enqueue their own nested
    /// declarations without interfering with the outer run.
    pub fn take(&mut self) -> Vec<Rc<FunctionDecl>> {
        std::mem::take(&mut self.pending)
    }
}
