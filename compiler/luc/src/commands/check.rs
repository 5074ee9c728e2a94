//! The `check` command: static analysis without evaluation.

use std::process::ExitCode;

use lu_diagnostic::emitter::ColorMode;

use super::{read_file, report};
use crate::check_source;

pub fn check_file(path: &str, color: ColorMode) -> ExitCode {
    let Some(source) = read_file(path) else {
        return ExitCode::FAILURE;
    };
    match check_source(&source) {
        Ok(_) => {
            println!("OK: {path}");
            ExitCode::SUCCESS
        }
        Err(err) => report(&err, path, &source, color),
    }
}
