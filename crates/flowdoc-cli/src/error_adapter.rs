//! Error adapter for converting [`FlowError`] to miette diagnostics.
//!
//! Definition parse errors carry the source text and the byte span the TOML
//! parser reported, so they are rendered with a labelled snippet. Every
//! other variant is reported as a plain diagnostic with a stable code.

use std::{fmt, ops::Range};

use miette::{Diagnostic as MietteDiagnostic, GraphicalReportHandler, LabeledSpan, SourceSpan};

use flowdoc::FlowError;

/// Adapter for a TOML parse failure inside a flow definition.
pub struct ParseAdapter<'a> {
    err: &'a toml::de::Error,
    src: &'a str,
}

impl<'a> ParseAdapter<'a> {
    pub fn new(err: &'a toml::de::Error, src: &'a str) -> Self {
        Self { err, src }
    }

    fn span(&self) -> Option<Range<usize>> {
        self.err.span()
    }
}

impl fmt::Debug for ParseAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParseAdapter")
            .field("err", &self.err)
            .finish()
    }
}

impl fmt::Display for ParseAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid flow definition: {}", self.err.message().trim_end())
    }
}

impl std::error::Error for ParseAdapter<'_> {}

impl MietteDiagnostic for ParseAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new("flowdoc::parse"))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(
            "a definition needs [[nodes]] with id, label and type, and [[edges]] with from and to",
        ))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(&self.src as &dyn miette::SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let span = self.span()?;
        let span = SourceSpan::new(span.start.into(), span.len());
        let label = LabeledSpan::new_primary_with_span(Some("here".to_string()), span);
        Some(Box::new(std::iter::once(label)))
    }
}

/// Adapter for [`FlowError`] variants without source locations.
pub struct ErrorAdapter<'a>(pub &'a FlowError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            FlowError::Definition(_) => "flowdoc::definition",
            FlowError::Layout(_) => "flowdoc::layout",
            FlowError::Palette(_) => "flowdoc::palette",
            FlowError::Render(_) => "flowdoc::render",
            FlowError::Parse { .. } => "flowdoc::parse",
            FlowError::Config(_) => "flowdoc::config",
            FlowError::Io(_) => "flowdoc::io",
            FlowError::Export(_) => "flowdoc::export",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match &self.0 {
            FlowError::Layout(_) => "give every node a coordinate or set layout.gap_policy = \"fill\"",
            FlowError::Palette(_) => "add an entry for this node type to the [palette] table",
            _ => return None,
        };
        Some(Box::new(help))
    }
}

/// A reportable error that can be rendered by miette.
#[derive(Debug)]
pub enum Reportable<'a> {
    /// A parse failure with a labelled source snippet.
    Parse(ParseAdapter<'a>),
    /// Any other failure.
    Error(ErrorAdapter<'a>),
}

impl<'a> Reportable<'a> {
    fn diagnostic(&self) -> &(dyn MietteDiagnostic + 'a) {
        match self {
            Reportable::Parse(p) => p,
            Reportable::Error(e) => e,
        }
    }
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.diagnostic(), f)
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.diagnostic().source()
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'b>(&'b self) -> Option<Box<dyn fmt::Display + 'b>> {
        self.diagnostic().code()
    }

    fn help<'b>(&'b self) -> Option<Box<dyn fmt::Display + 'b>> {
        self.diagnostic().help()
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        self.diagnostic().source_code()
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        self.diagnostic().labels()
    }
}

/// Wrap a [`FlowError`] in the adapter that renders it best.
pub fn to_reportable(err: &FlowError) -> Reportable<'_> {
    match err {
        FlowError::Parse { err, src } => Reportable::Parse(ParseAdapter::new(err, src)),
        _ => Reportable::Error(ErrorAdapter(err)),
    }
}

/// Render `err` as a graphical miette report.
///
/// Falls back to the plain error message if the handler fails.
pub fn render_report(err: &FlowError, handler: &GraphicalReportHandler) -> String {
    let mut report = String::new();
    match handler.render_report(&mut report, &to_reportable(err)) {
        Ok(()) => report,
        Err(_) => err.to_string(),
    }
}
