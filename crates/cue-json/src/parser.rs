use chumsky::input::{Stream, ValueInput};
use chumsky::prelude::*;

use crate::error::{ParseError, ParseErrorKind, ParseResult};
use crate::lexer::Token;
use crate::value::{Object, Value};

type Span = SimpleSpan;

/// Deepest nesting of arrays and objects a document may have.
pub const MAX_DEPTH: usize = 64;

/// Build the value parser.
///
/// The grammar is strict JSON structure: no trailing commas, string keys only.
fn value_parser<'a, I>() -> impl Parser<'a, I, Value, extra::Err<Rich<'a, Token>>> + Clone
where
    I: ValueInput<'a, Token = Token, Span = Span>,
{
    recursive(|value| {
        let scalar = select! {
            Token::Null => Value::Null,
            Token::True => Value::Bool(true),
            Token::False => Value::Bool(false),
            Token::Number(n) => Value::Number(n),
            Token::Str(s) => Value::String(s),
        }
        .labelled("value");

        let array = value
            .clone()
            .separated_by(just(Token::Comma))
            .collect::<Vec<Value>>()
            .delimited_by(just(Token::LBracket), just(Token::RBracket))
            .map(Value::Array)
            .labelled("array");

        let key = select! { Token::Str(s) => s }.labelled("object key");

        let member = key.then_ignore(just(Token::Colon)).then(value);

        let object = member
            .separated_by(just(Token::Comma))
            .collect::<Vec<(String, Value)>>()
            .delimited_by(just(Token::LBrace), just(Token::RBrace))
            .map(|members| Value::Object(members.into_iter().collect::<Object>()))
            .labelled("object");

        choice((scalar, array, object))
    })
}

/// Parse a token stream into exactly one value.
///
/// Only the first error is reported; it is the one furthest along the input.
pub fn parse(tokens: &[(Token, std::ops::Range<usize>)], source_len: usize) -> ParseResult<Value> {
    check_depth(tokens)?;

    let token_iter = tokens
        .iter()
        .map(|(tok, span)| (tok.clone(), Span::from(span.clone())));

    let eoi: Span = (source_len..source_len).into();
    let stream = Stream::from_iter(token_iter).map(eoi, |(t, s): (_, _)| (t, s));

    value_parser()
        .then_ignore(end())
        .parse(stream)
        .into_result()
        .map_err(|errors| {
            errors
                .into_iter()
                .next()
                .map(to_parse_error)
                .unwrap_or_else(|| {
                    ParseError::new(
                        ParseErrorKind::UnexpectedEnd,
                        source_len..source_len,
                        "unexpected end of input",
                    )
                })
        })
}

/// Reject documents nested deeper than [`MAX_DEPTH`] before the recursive
/// grammar runs.
fn check_depth(tokens: &[(Token, std::ops::Range<usize>)]) -> ParseResult<()> {
    let mut depth = 0usize;
    for (token, span) in tokens {
        match token {
            Token::LBrace | Token::LBracket => {
                depth += 1;
                if depth > MAX_DEPTH {
                    return Err(ParseError::new(
                        ParseErrorKind::TooDeep,
                        span.clone(),
                        format!("nesting deeper than {MAX_DEPTH} levels"),
                    ));
                }
            }
            Token::RBrace | Token::RBracket => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    Ok(())
}

fn to_parse_error(err: Rich<'_, Token>) -> ParseError {
    let span = err.span().into_range();
    match err.found() {
        None => ParseError::new(
            ParseErrorKind::UnexpectedEnd,
            span,
            "unexpected end of input",
        ),
        Some(token) => ParseError::new(
            ParseErrorKind::UnexpectedToken,
            span,
            format!("unexpected {token}"),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer;

    fn parse_source(source: &str) -> ParseResult<Value> {
        let tokens = lexer::lex(source).expect("lex errors");
        parse(&tokens, source.len())
    }

    #[test]
    fn parse_scalars() {
        assert_eq!(parse_source("null").unwrap(), Value::Null);
        assert_eq!(parse_source("true").unwrap(), Value::Bool(true));
        assert_eq!(parse_source(" 2.5 ").unwrap(), Value::Number(2.5));
        assert_eq!(parse_source(r#""x""#).unwrap(), Value::from("x"));
    }

    #[test]
    fn parse_nested_structure() {
        let value = parse_source(r#"{"a": [1, {"b": false}], "c": {}}"#).unwrap();
        let obj = value.as_object().unwrap();
        assert_eq!(obj.len(), 2);

        let a = obj.get("a").and_then(Value::as_array).unwrap();
        assert_eq!(a.len(), 2);
        assert_eq!(a[0], Value::Number(1.0));
        assert_eq!(
            a[1].as_object().and_then(|o| o.get("b")),
            Some(&Value::Bool(false))
        );
        assert!(obj.get("c").and_then(Value::as_object).unwrap().is_empty());
    }

    #[test]
    fn parse_empty_containers() {
        assert_eq!(parse_source("[]").unwrap(), Value::Array(vec![]));
        assert_eq!(parse_source("{}").unwrap(), Value::Object(Object::new()));
    }

    #[test]
    fn object_preserves_insertion_order() {
        let value = parse_source(r#"{"z": 1, "a": 2, "m": 3}"#).unwrap();
        let keys: Vec<_> = value.as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["z", "a", "m"]);
    }

    #[test]
    fn missing_closing_brackets() {
        let err = parse_source(r#"{"Commands":[{"CommandName":"X","Parameters":{}}"#).unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnexpectedEnd);
    }

    #[test]
    fn empty_input_is_unexpected_end() {
        let err = parse_source("").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnexpectedEnd);
    }

    #[test]
    fn trailing_comma_is_rejected() {
        let err = parse_source("[1, 2,]").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnexpectedToken);
        assert_eq!(err.span, 6..7);
    }

    #[test]
    fn non_string_key_is_rejected() {
        let err = parse_source("{1: 2}").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnexpectedToken);
        assert_eq!(err.span, 1..2);
    }

    #[test]
    fn missing_colon() {
        let err = parse_source(r#"{"a" 1}"#).unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnexpectedToken);
        assert!(err.message.contains('1'));
    }

    #[test]
    fn trailing_content_is_rejected() {
        let err = parse_source(r#"{"a": 1} {"#).unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnexpectedToken);
        assert_eq!(err.span, 9..10);
    }

    #[test]
    fn exact_duplicate_keys_keep_last_value() {
        let value = parse_source(r#"{"a": 1, "a": 2}"#).unwrap();
        let obj = value.as_object().unwrap();
        assert_eq!(obj.len(), 1);
        assert_eq!(obj.get("a"), Some(&Value::Number(2.0)));
    }

    #[test]
    fn nesting_within_limit_parses() {
        let source = format!("{}{}", "[".repeat(MAX_DEPTH), "]".repeat(MAX_DEPTH));
        assert!(parse_source(&source).is_ok());
    }

    #[test]
    fn deep_nesting_is_rejected() {
        let err = parse_source(&"[".repeat(100_000)).unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::TooDeep);
        assert_eq!(err.span, MAX_DEPTH..MAX_DEPTH + 1);

        let objects = r#"{"a":"#.repeat(MAX_DEPTH + 1);
        let err = parse_source(&objects).unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::TooDeep);
    }
}
