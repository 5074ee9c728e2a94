//! Grammar productions, split by syntactic category.

mod expr;
mod operators;
mod stmt;
