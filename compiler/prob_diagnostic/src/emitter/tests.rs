#![expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use super::*;
use crate::ErrorCode;
use pretty_assertions::assert_eq;
use prob_ir::Span;

fn render(diagnostic: &Diagnostic, mode: ColorMode, source: Option<&str>) -> String {
    let mut output = Vec::new();
    {
        let emitter = TerminalEmitter::with_color_mode(&mut output, mode, false);
        let mut emitter = match source {
            Some(text) => emitter.with_source("demo.prob", text),
            None => emitter,
        };
        emitter.emit(diagnostic);
        emitter.flush();
    }
    String::from_utf8(output).unwrap()
}

fn reserved_keyword() -> Diagnostic {
    Diagnostic::error(ErrorCode::E2001)
        .with_message("reserved keyword `define` cannot be used as an identifier")
        .with_label(Span::new(10, 16), "reserved keyword")
        .with_note("rename the binding")
}

#[test]
fn plain_output_without_source() {
    let text = render(&reserved_keyword(), ColorMode::Never, None);
    assert_eq!(
        text,
        "error[E2001]: reserved keyword `define` cannot be used as an identifier\n\
         \x20 --> 10..16: reserved keyword\n\
         \x20 = note: rename the binding\n\n"
    );
}

#[test]
fn colored_output_uses_escapes() {
    let text = render(&reserved_keyword(), ColorMode::Always, None);
    assert!(text.contains("\x1b["));
    assert!(text.contains("E2001"));
}

#[test]
fn primary_label_quotes_the_source_line() {
    let source = "(block\n  (define x 1))";
    let diag = Diagnostic::warning(ErrorCode::W3001)
        .with_message("definition of `x` is the last statement of its block")
        .with_label(Span::new(9, 21), "nothing follows this definition");
    let text = render(&diag, ColorMode::Never, Some(source));
    assert_eq!(
        text,
        "warning[W3001]: definition of `x` is the last statement of its block\n\
         \x20--> demo.prob:2:3\n\
         \x20 |\n\
         2 |   (define x 1))\n\
         \x20 |   ^^^^^^^^^^^^ nothing follows this definition\n\n"
    );
}

#[test]
fn underline_stops_at_end_of_line() {
    let source = "(f\n  (program x\n    x))";
    let diag = Diagnostic::error(ErrorCode::E1001)
        .with_message("spans lines")
        .with_label(Span::new(5, 24), "here");
    let text = render(&diag, ColorMode::Never, Some(source));
    assert!(text.contains("2 |   (program x\n"), "{text}");
    assert!(text.contains("  |   ^^^^^^^^^^ here\n"), "{text}");
}

#[test]
fn secondary_labels_are_located() {
    let source = "(block\n  (define x 1))";
    let diag = Diagnostic::warning(ErrorCode::W3001)
        .with_message("late definition")
        .with_label(Span::new(9, 21), "here")
        .with_secondary_label(Span::new(0, 22), "in this block");
    let text = render(&diag, ColorMode::Never, Some(source));
    assert!(text.contains("  ... demo.prob:1:1: in this block\n"), "{text}");
}

#[test]
fn summary_counts() {
    let mut output = Vec::new();
    {
        let mut emitter = TerminalEmitter::with_color_mode(&mut output, ColorMode::Never, false);
        emitter.emit_summary(0, 2);
        emitter.emit_summary(1, 1);
        emitter.emit_summary(3, 0);
        emitter.emit_summary(0, 0);
    }
    assert_eq!(
        String::from_utf8(output).unwrap(),
        "warning: 2 warnings emitted\n\
         error: aborting due to previous error; 1 warning emitted\n\
         error: aborting due to 3 previous errors\n"
    );
}
