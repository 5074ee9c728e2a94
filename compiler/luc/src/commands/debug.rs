//! Debug commands: `parse` and `lex` for inspecting the front end.

use std::process::ExitCode;

use lu_diagnostic::emitter::ColorMode;

use super::{read_file, report};
use crate::{lex_source, parse_source};

/// Parse a file and print the AST.
pub fn parse_file(path: &str, color: ColorMode) -> ExitCode {
    let Some(source) = read_file(path) else {
        return ExitCode::FAILURE;
    };
    match parse_source(&source) {
        Ok(program) => {
            println!("Parse result for '{path}' ({} statements):", program.statements.len());
            println!("{program:#?}");
            ExitCode::SUCCESS
        }
        Err(err) => report(&err, path, &source, color),
    }
}

/// Lex a file and print one token per line.
pub fn lex_file(path: &str, color: ColorMode) -> ExitCode {
    let Some(source) = read_file(path) else {
        return ExitCode::FAILURE;
    };
    match lex_source(&source) {
        Ok(tokens) => {
            println!("Tokens for '{path}' ({} tokens):", tokens.len());
            for token in &tokens {
                println!("  {token:?}");
            }
            ExitCode::SUCCESS
        }
        Err(err) => report(&err, path, &source, color),
    }
}
