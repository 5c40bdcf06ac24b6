use ariadne::{Color, Fmt, Label, Report, ReportKind, Source};
use thiserror::Error;

/// Character offsets into the source text, end exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn single(pos: usize) -> Self {
        Self {
            start: pos,
            end: pos + 1,
        }
    }
}

/// A syntax error collected by the parser. Parsing keeps going after one of
/// these is recorded, so a program usually yields a list of them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ParseError {
    pub span: Span,
    pub message: String,
}

impl ParseError {
    pub fn new(span: Span, message: String) -> Self {
        Self { span, message }
    }

    /// Render this error against `source` on stderr.
    pub fn report(&self, source: &str, filename: Option<&str>) -> std::io::Result<()> {
        let filename = filename.unwrap_or("<repl>");
        let color = Color::Yellow;

        // Clamp so an EOF span never points past the end of the input
        let len = source.chars().count();
        let start = self.span.start.min(len);
        let end = self.span.end.min(len).max(start);

        Report::build(ReportKind::Error, filename, start)
            .with_message(format!("{}: {}", "Parse Error".fg(color), self.message))
            .with_label(
                Label::new((filename, start..end))
                    .with_message(&self.message)
                    .with_color(color),
            )
            .finish()
            .eprint((filename, Source::from(source)))
    }
}

/// Failures of the host surface (CLI, REPL, runner). Inside the evaluator
/// runtime errors are `Object::Error` values; `Runtime` only carries one out
/// to the process boundary.
#[derive(Debug, Error)]
pub enum MonkeyError {
    #[error("{} syntax error(s)", .0.len())]
    Parse(Vec<ParseError>),

    #[error("runtime error: {0}")]
    Runtime(String),

    #[error("could not read '{path}': {source}")]
    ReadFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

/// Print every parse error as a diagnostic.
pub fn report_all(errors: &[ParseError], source: &str, filename: Option<&str>) -> Result<(), MonkeyError> {
    for error in errors {
        error.report(source, filename)?;
    }
    Ok(())
}
