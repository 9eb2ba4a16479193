use logos::Logos;
use std::fmt;

use crate::error::{ParseError, ParseErrorKind, ParseResult, Span};

/// Token type for JSON text.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Left brace `{`.
    LBrace,
    /// Right brace `}`.
    RBrace,
    /// Left bracket `[`.
    LBracket,
    /// Right bracket `]`.
    RBracket,
    /// Key/value separator `:`.
    Colon,
    /// Member separator `,`.
    Comma,
    /// String literal with escapes decoded.
    Str(String),
    /// Numeric literal.
    Number(f64),
    /// `true`.
    True,
    /// `false`.
    False,
    /// `null`.
    Null,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::LBrace => write!(f, "{{"),
            Token::RBrace => write!(f, "}}"),
            Token::LBracket => write!(f, "["),
            Token::RBracket => write!(f, "]"),
            Token::Colon => write!(f, ":"),
            Token::Comma => write!(f, ","),
            Token::Str(s) => write!(f, "\"{s}\""),
            Token::Number(n) => write!(f, "{n}"),
            Token::True => write!(f, "true"),
            Token::False => write!(f, "false"),
            Token::Null => write!(f, "null"),
        }
    }
}

/// Internal logos token. Strings are only recognised by their opening quote;
/// the body is scanned by hand so escapes can be checked one by one.
#[derive(Logos, Debug)]
#[logos(skip r"[ \t\r\n\f]+")]
enum RawToken {
    #[token("{")]
    LBrace,

    #[token("}")]
    RBrace,

    #[token("[")]
    LBracket,

    #[token("]")]
    RBracket,

    #[token(":")]
    Colon,

    #[token(",")]
    Comma,

    #[token("\"")]
    Quote,

    /// A run of word and number characters: keywords, numbers, or junk
    /// words such as `True` that are rejected later.
    #[regex(r"[A-Za-z0-9+\-.]+")]
    Literal,
}

/// Lex JSON text into `(Token, Span)` pairs.
///
/// Stops at the first malformed token.
pub fn lex(source: &str) -> ParseResult<Vec<(Token, Span)>> {
    let mut tokens = Vec::new();
    let mut lexer = RawToken::lexer(source);

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        let raw = match result {
            Ok(raw) => raw,
            Err(()) => {
                return Err(ParseError::new(
                    ParseErrorKind::UnexpectedCharacter,
                    span.clone(),
                    format!("unexpected character: {:?}", &source[span]),
                ));
            }
        };

        let token = match raw {
            RawToken::LBrace => Token::LBrace,
            RawToken::RBrace => Token::RBrace,
            RawToken::LBracket => Token::LBracket,
            RawToken::RBracket => Token::RBracket,
            RawToken::Colon => Token::Colon,
            RawToken::Comma => Token::Comma,
            RawToken::Quote => {
                let (text, consumed) = scan_string(lexer.remainder(), span.end)?;
                lexer.bump(consumed);
                tokens.push((Token::Str(text), span.start..lexer.span().end));
                continue;
            }
            RawToken::Literal => literal(lexer.slice(), span.clone())?,
        };
        tokens.push((token, span));
    }

    Ok(tokens)
}

/// Scan a string body that starts right after the opening quote at byte
/// `offset`. Returns the decoded text and the bytes consumed, closing quote
/// included.
fn scan_string(rest: &str, offset: usize) -> ParseResult<(String, usize)> {
    let mut out = String::new();
    let mut chars = rest.char_indices();

    while let Some((i, c)) = chars.next() {
        match c {
            '"' => return Ok((out, i + 1)),
            '\\' => {
                let Some((_, escaped)) = chars.next() else {
                    break;
                };
                match unescape(escaped) {
                    Some(decoded) => out.push(decoded),
                    None => {
                        let start = offset + i;
                        return Err(ParseError::new(
                            ParseErrorKind::InvalidEscape,
                            start..start + 1 + escaped.len_utf8(),
                            format!("invalid escape: \\{escaped}"),
                        ));
                    }
                }
            }
            other => out.push(other),
        }
    }

    Err(ParseError::new(
        ParseErrorKind::UnterminatedString,
        offset - 1..offset + rest.len(),
        "unterminated string (missing closing \")",
    ))
}

/// Decode the character after a backslash. `\u` is not supported.
fn unescape(c: char) -> Option<char> {
    match c {
        '"' => Some('"'),
        '\\' => Some('\\'),
        '/' => Some('/'),
        'b' => Some('\u{8}'),
        'f' => Some('\u{c}'),
        'n' => Some('\n'),
        'r' => Some('\r'),
        't' => Some('\t'),
        _ => None,
    }
}

fn literal(slice: &str, span: Span) -> ParseResult<Token> {
    match slice {
        "null" => Ok(Token::Null),
        "true" => Ok(Token::True),
        "false" => Ok(Token::False),
        other => match other.parse::<f64>() {
            Ok(n) if n.is_finite() => Ok(Token::Number(n)),
            _ => Err(ParseError::new(
                ParseErrorKind::InvalidLiteral,
                span,
                format!("invalid literal: {other}"),
            )),
        },
    }
}
