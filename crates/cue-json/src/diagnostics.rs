use ariadne::{Color, Label, Report, ReportKind, Source};
use std::fmt;

use crate::error::{ParseError, Span};
use crate::lexer::{self, Token};

/// Severity level for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The document cannot be used.
    Error,
    /// The document loads but something looks wrong.
    Warning,
}

/// A diagnostic message with source location.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    /// How serious the problem is.
    pub severity: Severity,
    /// Byte range the message points at.
    pub span: Span,
    /// Headline message.
    pub message: String,
    /// Text attached to the highlighted span; defaults to the message.
    pub label: Option<String>,
}

impl Diagnostic {
    /// An error diagnostic.
    pub fn error(span: Span, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            span,
            message: message.into(),
            label: None,
        }
    }

    /// A warning diagnostic.
    pub fn warning(span: Span, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            span,
            message: message.into(),
            label: None,
        }
    }

    /// Attach a label to the highlighted span.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

impl From<&ParseError> for Diagnostic {
    fn from(err: &ParseError) -> Self {
        Diagnostic::error(err.span.clone(), err.message.clone()).with_label(err.kind.to_string())
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        write!(f, "{prefix}: {}", self.message)
    }
}

/// Warnings for raw control characters inside string literals. The parser
/// keeps them, but strict JSON readers reject the document.
///
/// Returns nothing for text that does not lex.
pub fn control_character_warnings(source: &str) -> Vec<Diagnostic> {
    let Ok(tokens) = lexer::lex(source) else {
        return Vec::new();
    };
    tokens
        .iter()
        .filter(|(token, _)| matches!(token, Token::Str(_)))
        .flat_map(|(_, span)| {
            source[span.clone()]
                .char_indices()
                .filter(|&(_, c)| c < '\u{20}')
                .map(move |(i, c)| {
                    let at = span.start + i;
                    Diagnostic::warning(at..at + 1, format!("raw control character {c:?} in string"))
                        .with_label("write it as an escape")
                })
        })
        .collect()
}

/// Render diagnostics using ariadne for pretty terminal output.
pub fn render_diagnostics(source: &str, filename: &str, diagnostics: &[Diagnostic]) -> String {
    let mut output = Vec::new();

    for diag in diagnostics {
        let kind = match diag.severity {
            Severity::Error => ReportKind::Error,
            Severity::Warning => ReportKind::Warning,
        };
        let color = match diag.severity {
            Severity::Error => Color::Red,
            Severity::Warning => Color::Yellow,
        };

        let span = (filename, diag.span.clone());
        let mut report = Report::build(kind, span).with_message(&diag.message);

        let label_text = diag.label.as_deref().unwrap_or(&diag.message);
        report = report.with_label(
            Label::new((filename, diag.span.clone()))
                .with_message(label_text)
                .with_color(color),
        );

        report
            .finish()
            .write((filename, Source::from(source)), &mut output)
            .ok();
    }

    String::from_utf8(output).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ParseErrorKind;

    #[test]
    fn diagnostic_display() {
        let d = Diagnostic::error(0..5, "invalid literal: nul");
        assert_eq!(d.to_string(), "error: invalid literal: nul");
    }

    #[test]
    fn from_parse_error_labels_kind() {
        let err = ParseError::new(ParseErrorKind::InvalidEscape, 3..5, "invalid escape: \\u");
        let d = Diagnostic::from(&err);
        assert_eq!(d.severity, Severity::Error);
        assert_eq!(d.span, 3..5);
        assert_eq!(d.label.as_deref(), Some("invalid escape"));
    }

    #[test]
    fn control_characters_in_strings_are_warnings() {
        let source = "{\"text\": \"a\tb\nc\"}";
        let warnings = control_character_warnings(source);
        assert_eq!(warnings.len(), 2);
        assert_eq!(warnings[0].severity, Severity::Warning);
        assert_eq!(warnings[0].span, 11..12);
        assert_eq!(warnings[1].span, 13..14);
        assert_eq!(warnings[0].to_string(), "warning: raw control character '\\t' in string");
    }

    #[test]
    fn escaped_control_characters_are_clean() {
        assert!(control_character_warnings(r#"{"text": "a\tb\nc"}"#).is_empty());
        assert!(control_character_warnings("[1,\n 2]").is_empty());
        assert!(control_character_warnings("\"open\t").is_empty());
    }

    #[test]
    fn render_warning() {
        let source = "[\"a\tb\"]";
        let output = render_diagnostics(source, "tab.json", &control_character_warnings(source));
        assert!(output.contains("raw control character"));
    }

    #[test]
    fn render_produces_output() {
        let source = "{\"Commands\": [\n  {\"CommandName\": tru}\n]}";
        let diags = vec![Diagnostic::error(33..36, "invalid literal: tru").with_label("not a literal")];
        let output = render_diagnostics(source, "intro.json", &diags);
        assert!(!output.is_empty());
        assert!(output.contains("invalid literal: tru"));
    }
}
