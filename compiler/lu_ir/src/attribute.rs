//! Write-once attribute slots.
//!
//! Semantic passes decorate the AST by filling attribute slots on nodes.
//! Each slot is written exactly once and read any number of times
//! afterwards. Both misuse cases are compiler bugs, never user errors, so
//! they panic with the attribute's name.

use std::cell::OnceCell;
use std::fmt;

/// A typed cell that can be set once and then only read.
pub struct Attribute<T> {
    name: &'static str,
    cell: OnceCell<T>,
}

impl<T> Attribute<T> {
    /// Create an empty slot. `name` appears in misuse panics.
    pub const fn new(name: &'static str) -> Self {
        Attribute {
            name,
            cell: OnceCell::new(),
        }
    }

    /// Read the attribute.
    ///
    /// # Panics
    /// Panics if no pass has set the attribute yet.
    #[track_caller]
    pub fn get(&self) -> &T {
        match self.cell.get() {
            Some(value) => value,
            None => panic!("attribute `{}` is not set", self.name),
        }
    }

    /// Set the attribute.
    ///
    /// # Panics
    /// Panics if the attribute already has a value.
    #[track_caller]
    pub fn set(&self, value: T) {
        if self.cell.set(value).is_err() {
            panic!("attribute `{}` already has a value", self.name);
        }
    }

    /// Read the attribute without panicking.
    #[inline]
    pub fn try_get(&self) -> Option<&T> {
        self.cell.get()
    }

    #[inline]
    pub fn is_set(&self) -> bool {
        self.cell.get().is_some()
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl<T: Copy> Attribute<T> {
    /// Read a `Copy` attribute by value.
    #[track_caller]
    pub fn value(&self) -> T {
        *self.get()
    }
}

impl<T: fmt::Debug> fmt::Debug for Attribute<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.cell.get() {
            Some(value) => value.fmt(f),
            None => write!(f, "<unset {}>", self.name),
        }
    }
}
