//! I/O boundary used by built-in functions.
//!
//! `input()` and the print family never touch stdin/stdout directly; they go
//! through an [`Environment`]. The console variant is used by the CLI, the
//! buffer variant scripts input and records output for tests.
//!
//! Enum dispatch, like the rest of the evaluator's hot paths.

use std::collections::VecDeque;
use std::io::{self, BufRead};
use std::sync::Arc;

use parking_lot::Mutex;

/// Reads lines from stdin and prints to stdout.
#[derive(Default)]
pub struct ConsoleEnvironment;

impl ConsoleEnvironment {
    /// Next line of stdin without its line terminator, `None` at end of input.
    pub fn input(&self) -> Option<String> {
        let mut line = String::new();
        match io::stdin().lock().read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => {
                let trimmed = line.trim_end_matches(['\n', '\r']).len();
                line.truncate(trimmed);
                Some(line)
            }
        }
    }

    pub fn print(&self, text: &str) {
        println!("{text}");
    }
}

/// Scripted input and captured output.
#[derive(Default)]
pub struct BufferEnvironment {
    input: Mutex<VecDeque<String>>,
    output: Mutex<Vec<String>>,
}

impl BufferEnvironment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Environment whose `input()` calls return `lines` in order.
    pub fn with_input<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        BufferEnvironment {
            input: Mutex::new(lines.into_iter().map(Into::into).collect()),
            output: Mutex::default(),
        }
    }

    pub fn input(&self) -> Option<String> {
        self.input.lock().pop_front()
    }

    pub fn print(&self, text: &str) {
        self.output.lock().push(text.to_owned());
    }

    /// Every printed line so far, oldest first.
    pub fn output(&self) -> Vec<String> {
        self.output.lock().clone()
    }

    pub fn clear(&self) {
        self.output.lock().clear();
    }
}

/// Environment implementation selected at construction.
pub enum Environment {
    Console(ConsoleEnvironment),
    Buffer(BufferEnvironment),
}

impl Environment {
    pub fn input(&self) -> Option<String> {
        match self {
            Self::Console(env) => env.input(),
            Self::Buffer(env) => env.input(),
        }
    }

    /// Print one line.
    pub fn print(&self, text: &str) {
        match self {
            Self::Console(env) => env.print(text),
            Self::Buffer(env) => env.print(text),
        }
    }

    /// Captured output; empty for the console, which does not capture.
    pub fn output(&self) -> Vec<String> {
        match self {
            Self::Console(_) => Vec::new(),
            Self::Buffer(env) => env.output(),
        }
    }

    pub fn clear(&self) {
        if let Self::Buffer(env) = self {
            env.clear();
        }
    }
}

/// Environment shared between the evaluator and its caller.
pub type SharedEnvironment = Arc<Environment>;

pub fn console_environment() -> SharedEnvironment {
    Arc::new(Environment::Console(ConsoleEnvironment))
}

pub fn buffer_environment() -> SharedEnvironment {
    Arc::new(Environment::Buffer(BufferEnvironment::new()))
}

/// Buffer environment pre-loaded with input lines.
pub fn scripted_environment<I, S>(lines: I) -> SharedEnvironment
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    Arc::new(Environment::Buffer(BufferEnvironment::with_input(lines)))
}
