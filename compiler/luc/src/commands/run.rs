//! The `run` command.

use std::process::ExitCode;

use lu_diagnostic::emitter::ColorMode;
use lu_eval::{console_environment, InterpreterConfig};

use super::{read_file, report};
use crate::Interpreter;

/// Flags accepted by `lu run`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunOptions {
    pub config: InterpreterConfig,
    pub color: ColorMode,
}

impl RunOptions {
    /// Apply one `--flag=value` argument; `Err` carries the message to show.
    pub fn apply_flag(&mut self, arg: &str) -> Result<(), String> {
        if let Some(depth) = arg.strip_prefix("--max-depth=") {
            let depth = depth
                .parse::<usize>()
                .map_err(|_| format!("invalid --max-depth value '{depth}'"))?;
            self.config = InterpreterConfig::new().with_max_call_depth(depth);
        } else if let Some(mode) = arg.strip_prefix("--color=") {
            self.color = ColorMode::parse(mode)
                .ok_or_else(|| format!("invalid --color value '{mode}' (expected auto, always or never)"))?;
        } else {
            return Err(format!("unknown option '{arg}'"));
        }
        Ok(())
    }
}

/// Evaluate a program with stdin/stdout as its environment.
pub fn run_file(path: &str, options: &RunOptions) -> ExitCode {
    let Some(source) = read_file(path) else {
        return ExitCode::FAILURE;
    };
    let interpreter = Interpreter::new(console_environment(), options.config.clone());
    match interpreter.execute(&source) {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => report(&err, path, &source, options.color),
    }
}
