use std::fmt;

/// Byte range in the source text.
pub type Span = std::ops::Range<usize>;

/// Alias for `Result<T, ParseError>`.
pub type ParseResult<T> = Result<T, ParseError>;

/// What went wrong while reading JSON text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// A character that cannot start any token.
    UnexpectedCharacter,
    /// A well-formed token in a position the grammar does not allow.
    UnexpectedToken,
    /// The input ended before the value was complete.
    UnexpectedEnd,
    /// A string literal without its closing quote.
    UnterminatedString,
    /// A backslash escape outside `\" \\ \/ \b \f \n \r \t`.
    InvalidEscape,
    /// A bare word that is neither `null`, `true`, `false`, nor a finite number.
    InvalidLiteral,
    /// Arrays and objects nested past the depth limit.
    TooDeep,
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::UnexpectedCharacter => "unexpected character",
            Self::UnexpectedToken => "unexpected token",
            Self::UnexpectedEnd => "unexpected end of input",
            Self::UnterminatedString => "unterminated string",
            Self::InvalidEscape => "invalid escape",
            Self::InvalidLiteral => "invalid literal",
            Self::TooDeep => "nesting too deep",
        };
        f.write_str(text)
    }
}

/// A syntax error. Parsing stops at the first one; no partial tree is produced.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{message} at byte {}", .span.start)]
pub struct ParseError {
    /// Category of the failure.
    pub kind: ParseErrorKind,
    /// Byte range of the offending input.
    pub span: Span,
    /// Human-readable description.
    pub message: String,
}

impl ParseError {
    /// Create an error of `kind` covering `span`.
    pub fn new(kind: ParseErrorKind, span: Span, message: impl Into<String>) -> Self {
        Self {
            kind,
            span,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_offset() {
        let err = ParseError::new(ParseErrorKind::InvalidEscape, 7..9, "invalid escape: \\u");
        assert_eq!(err.to_string(), "invalid escape: \\u at byte 7");
    }

    #[test]
    fn kind_display() {
        assert_eq!(ParseErrorKind::UnexpectedEnd.to_string(), "unexpected end of input");
    }
}
