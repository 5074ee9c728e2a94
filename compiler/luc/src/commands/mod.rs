//! Implementations of the `lu` subcommands.
//!
//! Each command reads its file, runs the phases it needs and reports the
//! first error as a diagnostic on stderr.

mod check;
mod debug;
mod run;

use std::io::IsTerminal;
use std::process::ExitCode;

use lu_diagnostic::emitter::{ColorMode, DiagnosticEmitter, SnippetEmitter};

use crate::LuError;

pub use check::check_file;
pub use debug::{lex_file, parse_file};
pub use run::{run_file, RunOptions};

/// Read a source file, reporting failures on stderr.
fn read_file(path: &str) -> Option<String> {
    match std::fs::read_to_string(path) {
        Ok(source) => Some(source),
        Err(err) => {
            eprintln!("error: cannot read '{path}': {err}");
            None
        }
    }
}

/// Render `err` against its source and return the failure exit code.
fn report(err: &LuError, path: &str, source: &str, color: ColorMode) -> ExitCode {
    tracing::debug!(code = %err.code().as_str(), "reporting error");
    let colors = color.should_use_colors(std::io::stderr().is_terminal());
    let mut emitter = SnippetEmitter::stderr(path, source, colors);
    emitter.emit(&err.to_diagnostic());
    emitter.flush();
    ExitCode::FAILURE
}
