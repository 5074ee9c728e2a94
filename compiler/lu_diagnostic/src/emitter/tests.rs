#![allow(clippy::unwrap_used)]

use super::*;
use crate::ErrorCode;
use lu_ir::Span;

fn sample_diagnostic() -> Diagnostic {
    Diagnostic::error(ErrorCode::E2004)
        .with_message("cannot assign `float` to variable `x` of type `int`")
        .with_label(Span::new(12, 15), "this is `float`")
        .with_secondary_label(Span::new(4, 5), "declared here")
        .with_note("assignment requires exactly matching types")
        .with_suggestion("convert with `ftoi`")
}

fn render_terminal(diag: &Diagnostic, colors: ColorMode) -> String {
    let mut emitter = TerminalEmitter::with_color_mode(Vec::new(), colors, false);
    emitter.emit(diag);
    emitter.flush();
    String::from_utf8(emitter.into_inner()).unwrap()
}

#[test]
fn test_terminal_emitter_no_color() {
    let text = render_terminal(&sample_diagnostic(), ColorMode::Never);
    assert!(text.starts_with("error[E2004]: cannot assign"));
    assert!(text.contains("--> 12..15: this is `float`"));
    assert!(text.contains("note: assignment requires"));
    assert!(text.contains("help: convert with `ftoi`"));
    assert!(!text.contains("\x1b["));
}

#[test]
fn test_terminal_emitter_with_color() {
    let text = render_terminal(&sample_diagnostic(), ColorMode::Always);
    assert!(text.contains("\x1b["));
    assert!(text.contains("E2004"));
}

#[test]
fn test_terminal_emitter_with_source_location() {
    let source = "let x = 1;\nx = 2.5;";
    let diag = Diagnostic::error(ErrorCode::E2004)
        .with_message("type mismatch")
        .with_label(Span::new(15, 18), "this is `float`");
    let mut emitter = TerminalEmitter::with_color_mode(Vec::new(), ColorMode::Never, false)
        .with_source("main.lu", source);
    emitter.emit(&diag);
    let text = String::from_utf8(emitter.into_inner()).unwrap();
    assert!(text.contains("--> main.lu:2:5: this is `float`"));
}

#[test]
fn test_emit_summary() {
    let mut emitter = TerminalEmitter::with_color_mode(Vec::new(), ColorMode::Never, false);
    emitter.emit_summary(2, 0);
    let text = String::from_utf8(emitter.into_inner()).unwrap();
    assert_eq!(text, "error: aborting due to 2 previous errors\n");
}

#[test]
fn test_color_mode_parse() {
    assert_eq!(ColorMode::parse("always"), Some(ColorMode::Always));
    assert_eq!(ColorMode::parse("never"), Some(ColorMode::Never));
    assert_eq!(ColorMode::parse("auto"), Some(ColorMode::Auto));
    assert_eq!(ColorMode::parse("sometimes"), None);
    assert!(ColorMode::Auto.should_use_colors(true));
    assert!(!ColorMode::Auto.should_use_colors(false));
}

#[test]
fn test_snippet_emitter_shows_source_line() {
    let source = "let x: int = 1.5;";
    let diag = Diagnostic::error(ErrorCode::E2004)
        .with_message("type mismatch")
        .with_label(Span::new(13, 16), "this is `float`");
    let mut emitter = SnippetEmitter::new(Vec::new(), "main.lu", source, false);
    emitter.emit(&diag);
    let text = String::from_utf8(emitter.into_inner()).unwrap();
    assert!(text.contains("E2004"));
    assert!(text.contains("type mismatch"));
    assert!(text.contains("let x: int = 1.5;"));
    assert!(text.contains("this is `float`"));
}
