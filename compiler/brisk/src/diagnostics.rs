//! Source-annotated error reports.

use std::ops::Range;

use ariadne::{Config, Label, Report, ReportKind, Source};
use brisk_eval::ScriptError;
use brisk_ir::Position;

/// Byte offset of a 1-based line/column position, clamped to the source.
fn offset_of(source: &str, position: Position) -> usize {
    let line = position.line.saturating_sub(1) as usize;
    let line_start: usize = source.split_inclusive('\n').take(line).map(str::len).sum();
    let rest = source.get(line_start..).unwrap_or_default();
    let column = position.column.saturating_sub(1) as usize;
    rest.char_indices()
        .nth(column)
        .map_or(source.len(), |(i, _)| line_start + i)
}

fn label_range(source: &str, err: &ScriptError) -> Option<Range<usize>> {
    if let Some(span) = err.span() {
        let range = span.to_range();
        let end = range.end.max(range.start + 1).min(source.len());
        return Some(range.start.min(end)..end);
    }
    let start = offset_of(source, err.position()?);
    Some(start..(start + 1).min(source.len()).max(start))
}

fn phase(err: &ScriptError) -> &'static str {
    match err {
        ScriptError::Lex(_) => "lex error",
        ScriptError::Parse(_) => "syntax error",
        ScriptError::Lower(_) => "invalid program",
        ScriptError::Eval(_) => "runtime error",
    }
}

/// Render `err` against the text it came from, without colors.
///
/// Errors that carry no location are rendered as a plain header.
pub fn render_error(path: &str, source: &str, err: &ScriptError) -> String {
    let message = match err {
        ScriptError::Lex(e) => e.to_string(),
        ScriptError::Parse(e) => e.to_string(),
        ScriptError::Lower(e) => e.kind.to_string(),
        ScriptError::Eval(e) => e.message.clone(),
    };
    let range = label_range(source, err).unwrap_or(0..0);
    let mut report = Report::build(ReportKind::Error, (path, range.clone()))
        .with_config(Config::default().with_color(false))
        .with_message(format!("{}: {message}", phase(err)));
    if err.position().is_some() {
        report = report.with_label(Label::new((path, range)).with_message(message));
    }
    let mut buf = Vec::new();
    if report
        .finish()
        .write((path, Source::from(source)), &mut buf)
        .is_err()
    {
        return err.to_string();
    }
    String::from_utf8_lossy(&buf).into_owned()
}
