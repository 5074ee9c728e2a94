//! Diagnostic system for Lu error reporting.
//!
//! Every phase error converts into a [`Diagnostic`]:
//! - Error code for searchability
//! - Message (what went wrong)
//! - Primary label (where it went wrong)
//! - Notes and suggestions (context and how to fix)
//!
//! Emitters in [`emitter`] render diagnostics for a terminal, either as
//! compact text or as source snippets.

mod diagnostic;
pub mod emitter;
mod error_code;
pub mod span_utils;

pub use diagnostic::{Diagnostic, Label, Severity};
pub use error_code::ErrorCode;
