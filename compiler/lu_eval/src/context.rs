//! Runtime scopes.
//!
//! [`Context`] keeps a stack of flat [`Scope`]s, innermost last, split into
//! call frames. A lookup walks the current frame from the top, then follows
//! the frame's static link to the scope the called function was declared in
//! and continues from there. Caller frames are never consulted, so names
//! resolve to the same bindings the checker bound them to. The global scope
//! is never popped.

use std::rc::Rc;

use lu_ir::{FunctionDecl, FunctionId, Value};
use rustc_hash::FxHashMap;

use crate::error::{EvalErrorKind, EvalResult};

/// One level of variable and function bindings.
#[derive(Default)]
pub struct Scope {
    variables: FxHashMap<String, Value>,
    functions: FxHashMap<FunctionId, Rc<FunctionDecl>>,
}

impl Scope {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.variables.get(name)
    }

    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.variables.contains_key(name)
    }
}

/// Scopes belonging to one activation.
#[derive(Copy, Clone, Debug)]
struct Frame {
    /// Index of the frame's outermost scope.
    base: usize,
    /// Scope the active function was declared in; `None` for the program.
    static_link: Option<usize>,
}

/// A function found by [`Context::get_function`].
pub struct FunctionRef {
    pub decl: Rc<FunctionDecl>,
    /// Index of the scope holding the declaration.
    pub scope: usize,
}

/// The scope stack of a running program.
pub struct Context {
    scopes: Vec<Scope>,
    frames: Vec<Frame>,
}

impl Context {
    /// A context holding only the global scope.
    pub fn new() -> Self {
        Context {
            scopes: vec![Scope::new()],
            frames: vec![Frame {
                base: 0,
                static_link: None,
            }],
        }
    }

    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    pub fn push_scope(&mut self) {
        self.scopes.push(Scope::new());
        tracing::trace!(depth = self.scopes.len(), "push scope");
    }

    /// Pop the innermost scope; the global scope stays.
    pub fn pop_scope(&mut self) {
        if self.scopes.len() > 1 {
            self.scopes.pop();
        }
        tracing::trace!(depth = self.scopes.len(), "pop scope");
    }

    /// Enter a function declared in scope `static_link`.
    ///
    /// The new frame starts with one fresh scope for the parameters.
    pub fn push_frame(&mut self, static_link: usize) {
        self.frames.push(Frame {
            base: self.scopes.len(),
            static_link: Some(static_link),
        });
        self.push_scope();
    }

    /// Leave the innermost function frame, dropping all of its scopes.
    pub fn pop_frame(&mut self) {
        if self.frames.len() > 1 {
            if let Some(frame) = self.frames.pop() {
                self.scopes.truncate(frame.base.max(1));
            }
        }
        tracing::trace!(depth = self.scopes.len(), "pop frame");
    }

    fn current(&mut self) -> &mut Scope {
        if self.scopes.is_empty() {
            self.scopes.push(Scope::new());
        }
        let last = self.scopes.len() - 1;
        &mut self.scopes[last]
    }

    /// Index of the nearest visible scope matching `pred`.
    fn find_scope(&self, pred: impl Fn(&Scope) -> bool) -> Option<usize> {
        let mut frame = self.frames.len().checked_sub(1)?;
        let mut top = self.scopes.len();
        loop {
            let base = self.frames[frame].base.min(top);
            if let Some(index) = (base..top).rev().find(|&index| pred(&self.scopes[index])) {
                return Some(index);
            }
            let link = self.frames[frame].static_link?;
            frame = self.frames[..frame]
                .iter()
                .rposition(|outer| outer.base <= link)?;
            top = link + 1;
        }
    }

    /// Value of the nearest visible variable called `name`.
    pub fn get_value(&self, name: &str) -> EvalResult {
        self.find_scope(|scope| scope.contains(name))
            .and_then(|index| self.scopes[index].get(name))
            .cloned()
            .ok_or_else(|| EvalErrorKind::UndefinedVariable(name.to_owned()))
    }

    /// Overwrite the nearest visible variable called `name`.
    pub fn assign_variable(&mut self, name: &str, value: Value) -> EvalResult<()> {
        let slot = self
            .find_scope(|scope| scope.contains(name))
            .and_then(|index| self.scopes[index].variables.get_mut(name))
            .ok_or_else(|| EvalErrorKind::UndefinedVariable(name.to_owned()))?;
        *slot = value;
        Ok(())
    }

    /// Bind a new variable in the innermost scope.
    pub fn define_variable(&mut self, name: &str, value: Value) -> EvalResult<()> {
        let scope = self.current();
        if scope.contains(name) {
            return Err(EvalErrorKind::DuplicateDefinition(name.to_owned()));
        }
        scope.variables.insert(name.to_owned(), value);
        Ok(())
    }

    /// Register a function declaration in the innermost scope.
    pub fn define_function(&mut self, decl: Rc<FunctionDecl>) -> EvalResult<()> {
        let scope = self.current();
        if scope.functions.contains_key(&decl.id) {
            return Err(EvalErrorKind::DuplicateDefinition(decl.name.clone()));
        }
        scope.functions.insert(decl.id, decl);
        Ok(())
    }

    /// The nearest visible declaration with this id.
    pub fn get_function(&self, id: FunctionId, name: &str) -> EvalResult<FunctionRef> {
        self.find_scope(|scope| scope.functions.contains_key(&id))
            .and_then(|scope| {
                let decl = self.scopes[scope].functions.get(&id)?;
                Some(FunctionRef {
                    decl: Rc::clone(decl),
                    scope,
                })
            })
            .ok_or_else(|| EvalErrorKind::UndefinedFunction(name.to_owned()))
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_define_and_get() {
        let mut ctx = Context::new();
        ctx.define_variable("x", Value::Int(42)).unwrap();
        assert_eq!(ctx.get_value("x").unwrap(), Value::Int(42));
    }

    #[test]
    fn test_undefined_variable() {
        let ctx = Context::new();
        assert_eq!(
            ctx.get_value("missing"),
            Err(EvalErrorKind::UndefinedVariable("missing".into()))
        );
    }

    #[test]
    fn test_inner_scope_shadows_and_disappears() {
        let mut ctx = Context::new();
        ctx.define_variable("x", Value::Int(1)).unwrap();
        ctx.push_scope();
        ctx.define_variable("x", Value::Int(2)).unwrap();
        assert_eq!(ctx.get_value("x").unwrap(), Value::Int(2));
        ctx.pop_scope();
        assert_eq!(ctx.get_value("x").unwrap(), Value::Int(1));
    }

    #[test]
    fn test_inner_declaration_invisible_after_pop() {
        let mut ctx = Context::new();
        ctx.push_scope();
        ctx.define_variable("y", Value::Int(1)).unwrap();
        ctx.pop_scope();
        assert!(ctx.get_value("y").is_err());
    }

    #[test]
    fn test_assign_updates_nearest_definition() {
        let mut ctx = Context::new();
        ctx.define_variable("x", Value::Int(1)).unwrap();
        ctx.push_scope();
        ctx.assign_variable("x", Value::Int(5)).unwrap();
        ctx.pop_scope();
        assert_eq!(ctx.get_value("x").unwrap(), Value::Int(5));
    }

    #[test]
    fn test_assign_undefined_fails() {
        let mut ctx = Context::new();
        assert_eq!(
            ctx.assign_variable("x", Value::Int(1)),
            Err(EvalErrorKind::UndefinedVariable("x".into()))
        );
    }

    #[test]
    fn test_duplicate_in_same_scope() {
        let mut ctx = Context::new();
        ctx.define_variable("x", Value::Int(1)).unwrap();
        assert_eq!(
            ctx.define_variable("x", Value::Int(2)),
            Err(EvalErrorKind::DuplicateDefinition("x".into()))
        );
    }

    #[test]
    fn test_frame_skips_caller_scopes() {
        let mut ctx = Context::new();
        ctx.define_variable("x", Value::Int(1)).unwrap();
        ctx.push_frame(0);
        ctx.define_variable("x", Value::Int(2)).unwrap();
        // callee declared at global scope, called from the frame above
        ctx.push_frame(0);
        assert_eq!(ctx.get_value("x").unwrap(), Value::Int(1));
        ctx.assign_variable("x", Value::Int(7)).unwrap();
        ctx.pop_frame();
        assert_eq!(ctx.get_value("x").unwrap(), Value::Int(2));
        ctx.pop_frame();
        assert_eq!(ctx.get_value("x").unwrap(), Value::Int(7));
        assert_eq!(ctx.depth(), 1);
    }

    #[test]
    fn test_static_link_reaches_enclosing_frame() {
        let mut ctx = Context::new();
        ctx.push_frame(0);
        ctx.define_variable("a", Value::Int(3)).unwrap();
        let outer = ctx.depth() - 1;
        ctx.push_scope();
        ctx.define_variable("hidden", Value::Int(0)).unwrap();
        ctx.push_frame(outer);
        assert_eq!(ctx.get_value("a").unwrap(), Value::Int(3));
        assert!(ctx.get_value("hidden").is_err());
    }

    #[test]
    fn test_pop_frame_drops_every_frame_scope() {
        let mut ctx = Context::new();
        ctx.push_frame(0);
        ctx.push_scope();
        ctx.push_scope();
        ctx.pop_frame();
        assert_eq!(ctx.depth(), 1);
        ctx.pop_frame();
        assert_eq!(ctx.depth(), 1);
    }

    #[test]
    fn test_global_scope_is_never_popped() {
        let mut ctx = Context::new();
        ctx.define_variable("x", Value::Int(1)).unwrap();
        ctx.pop_scope();
        assert_eq!(ctx.depth(), 1);
        assert_eq!(ctx.get_value("x").unwrap(), Value::Int(1));
    }
}
