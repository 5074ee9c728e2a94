//! Lu interpreter CLI.

use std::process::ExitCode;

use luc::commands::{check_file, lex_file, parse_file, run_file, RunOptions};

fn main() -> ExitCode {
    luc::init_tracing();
    let args: Vec<String> = std::env::args().collect();

    let Some(command) = args.get(1) else {
        print_usage();
        return ExitCode::SUCCESS;
    };

    match command.as_str() {
        "run" | "check" | "parse" | "lex" => {
            let mut options = RunOptions::default();
            let mut file_path = None;
            for arg in args.iter().skip(2) {
                if arg.starts_with("--") {
                    if let Err(message) = options.apply_flag(arg) {
                        eprintln!("error: {message}");
                        return ExitCode::FAILURE;
                    }
                } else if file_path.is_none() {
                    file_path = Some(arg.as_str());
                }
            }

            let Some(path) = file_path else {
                eprintln!("error: missing file path");
                eprintln!("Usage: lu {command} <file.lu>");
                return ExitCode::FAILURE;
            };

            match command.as_str() {
                "run" => run_file(path, &options),
                "check" => check_file(path, options.color),
                "parse" => parse_file(path, options.color),
                _ => lex_file(path, options.color),
            }
        }
        "help" | "--help" | "-h" => {
            print_usage();
            ExitCode::SUCCESS
        }
        "version" | "--version" | "-v" => {
            println!("Lu {}", env!("CARGO_PKG_VERSION"));
            ExitCode::SUCCESS
        }
        _ => {
            // A bare `.lu` path runs the file.
            if std::path::Path::new(command)
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("lu"))
            {
                run_file(command, &RunOptions::default())
            } else {
                eprintln!("Unknown command: {command}");
                eprintln!();
                print_usage();
                ExitCode::FAILURE
            }
        }
    }
}

fn print_usage() {
    println!("Lu interpreter");
    println!();
    println!("Usage: lu <command> <file.lu> [options]");
    println!();
    println!("Commands:");
    println!("  run <file.lu>        Check and run a program");
    println!("  check <file.lu>      Check a program without running it");
    println!("  parse <file.lu>      Parse and print the AST");
    println!("  lex <file.lu>        Tokenize and print tokens");
    println!("  help                 Show this help message");
    println!("  version              Show version information");
    println!();
    println!("Options:");
    println!("  --max-depth=<n>      Maximum call depth (default: {})", lu_eval::DEFAULT_MAX_CALL_DEPTH);
    println!("  --color=<mode>       Diagnostic colors: auto, always, never");
    println!();
    println!("Environment:");
    println!("  RUST_LOG=<filter>    Enable tracing output (e.g. RUST_LOG=lu_sema=debug)");
    println!("  LU_LOG_TREE=1        Render tracing as an indented span tree");
}
