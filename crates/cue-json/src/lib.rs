//! A small JSON engine: text to a generic [`Value`] tree and back.
//!
//! The grammar is a strict subset of JSON. String escapes are limited to
//! `\" \\ \/ \b \f \n \r \t`; `\u` escapes fail the parse. Serialization is
//! compact and only escapes `\\` and `"`.

/// Terminal rendering of parse errors.
pub mod diagnostics;
/// Parse error type.
pub mod error;
/// Tokenizer.
pub mod lexer;
/// Token-stream parser.
pub mod parser;
/// Value tree to text.
pub mod serializer;
/// The value tree.
pub mod value;

pub use diagnostics::{Diagnostic, Severity};
pub use error::{ParseError, ParseErrorKind, ParseResult, Span};
pub use serializer::{serialize, to_string, to_string_pretty};
pub use value::{Object, Value, ValueKind};

/// Parse JSON text into a value tree.
///
/// The text must hold exactly one value. The first syntax error aborts the
/// parse.
pub fn parse(source: &str) -> ParseResult<Value> {
    let tokens = lexer::lex(source)?;
    parser::parse(&tokens, source.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_and_serialize() {
        let value = parse(r#"{ "text" : "He said \"hi\"" }"#).unwrap();
        assert_eq!(
            value.as_object().and_then(|o| o.get("text")),
            Some(&Value::from("He said \"hi\""))
        );
        assert_eq!(to_string(&value), r#"{"text":"He said \"hi\""}"#);
    }

    #[test]
    fn lex_errors_surface_through_parse() {
        let err = parse(r#"["\x"]"#).unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::InvalidEscape);
    }
}
