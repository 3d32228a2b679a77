//! Character-level lexer.
//!
//! Turns the decoded document into the complete token vector, terminated by
//! an [`TokenKind::Eof`] token. Each scanner is a `nom` parser over [`Input`],
//! and [`Lexer`] owns the cursor that those scanners advance.

use crate::config::{Config, EscapePolicy};
use crate::error::{Error, Kind};
use crate::input::Input;
use crate::token::{Token, TokenKind};
use nom::{
    branch::alt,
    bytes::complete::{tag, take_till1, take_while_m_n},
    character::complete::{anychar, char, digit0, digit1, multispace0, none_of, one_of},
    combinator::{opt, recognize},
    multi::fold_many0,
    sequence::pair,
    Err, IResult, Offset, Slice,
};
use tracing::{trace, warn};

pub type Span<'a> = Input<'a>;

pub type Result<'a, R> = IResult<Span<'a>, R, Error>;

/// Fails the whole scan, no alternative is tried after this.
fn failure<'a, T>(start: Span<'a>, end: Span<'a>, kind: Kind) -> Result<'a, T> {
    Err(Err::Failure(Error::new(start.location(), end.location(), kind)))
}

fn is_delimiter(c: char) -> bool {
    TokenKind::structural(c).is_some() || c == '"' || c.is_whitespace()
}

fn structural(i: Span) -> Result<TokenKind> {
    let (rest, c) = anychar(i)?;

    match TokenKind::structural(c) {
        Some(kind) => Ok((rest, kind)),
        None => failure(i, rest, Kind::UnexpectedChar(c)),
    }
}

fn keyword<'a>(i: Span<'a>) -> Result<'a, (TokenKind, &'a str)> {
    let (rest, word) = take_till1(is_delimiter)(i)?;

    let kind = match word.fragment() {
        "true" | "false" => TokenKind::Boolean,
        "null" => TokenKind::Null,
        other => return failure(i, rest, Kind::UnknownKeyword(other.to_string())),
    };

    Ok((rest, (kind, word.fragment())))
}

fn integer_part(i: Span) -> Result<Span> {
    alt((tag("0"), recognize(pair(one_of("123456789"), digit0))))(i)
}

/// `'-'? integer_part ('.' digit+)? (('e'|'E') ('+'|'-')? digit+)?`
fn number<'a>(i: Span<'a>) -> Result<'a, &'a str> {
    let (rest, _) = opt(char('-'))(i)?;

    let (rest, int) = integer_part(rest).or_else(|_: Err<Error>| {
        failure(
            i,
            rest,
            Kind::InvalidNumber(format!("expected a digit after '-' in '{}'", spelled(i, rest))),
        )
    })?;

    if int.fragment() == "0" && rest.current().map_or(false, |c| c.is_ascii_digit()) {
        let (end, _) = digit1(rest)?;

        return failure(
            i,
            end,
            Kind::InvalidNumber(format!("leading zero in '{}'", spelled(i, end))),
        );
    }

    let (rest, dot) = opt(char('.'))(rest)?;
    let rest = match dot {
        Some(_) => {
            let (rest, _) = digit1(rest).or_else(|_: Err<Error>| {
                failure(
                    i,
                    rest,
                    Kind::InvalidNumber(format!(
                        "expected a digit after '.' in '{}'",
                        spelled(i, rest)
                    )),
                )
            })?;
            rest
        }
        None => rest,
    };

    let (rest, marker) = opt(one_of("eE"))(rest)?;
    let rest = match marker {
        Some(_) => {
            let (rest, _) = opt(one_of("+-"))(rest)?;
            let (rest, _) = digit1(rest).or_else(|_: Err<Error>| {
                failure(
                    i,
                    rest,
                    Kind::InvalidNumber(format!(
                        "expected a digit in the exponent of '{}'",
                        spelled(i, rest)
                    )),
                )
            })?;
            rest
        }
        None => rest,
    };

    Ok((rest, spelled(i, rest)))
}

/// The text consumed between `start` and `end`.
fn spelled<'a>(start: Span<'a>, end: Span<'a>) -> &'a str {
    start.slice(..start.offset(&end)).fragment()
}

fn hex4(i: Span) -> Result<u16> {
    let (rest, digits) = take_while_m_n(4, 4, |c: char| c.is_ascii_hexdigit())(i).or_else(
        |_: Err<Error>| {
            let shown: String = i.fragment().chars().take(4).collect();
            let end = i.slice(shown.len()..);

            failure(i, end, Kind::InvalidUnicodeEscape(shown))
        },
    )?;

    let unit = u16::from_str_radix(digits.fragment(), 16)
        .map_err(|e| Err::Failure(Error::from(e).at(i.location(), rest.location())))?;

    Ok((rest, unit))
}

/// Continues after `\u`. `escape` points at the backslash.
fn unicode_escape<'a>(escape: Span<'a>, i: Span<'a>, escapes: EscapePolicy) -> Result<'a, char> {
    let (rest, unit) = hex4(i)?;

    match unit {
        0xD800..=0xDBFF => {
            let (low_start, _) = tag("\\u")(rest).or_else(|_: Err<Error>| {
                failure(escape, rest, Kind::UnpairedSurrogate(unit))
            })?;
            let (rest, low) = hex4(low_start)?;

            if !(0xDC00..=0xDFFF).contains(&low) {
                return failure(escape, rest, Kind::UnpairedSurrogate(unit));
            }

            let code_point = 0x10000 + (((unit as u32) - 0xD800) << 10) + ((low as u32) - 0xDC00);

            match std::char::from_u32(code_point) {
                Some(c) => Ok((rest, c)),
                None => failure(escape, rest, Kind::UnpairedSurrogate(unit)),
            }
        }
        0xDC00..=0xDFFF => match escapes {
            EscapePolicy::Strict => failure(escape, rest, Kind::LoneSurrogate(unit)),
            EscapePolicy::Lenient => {
                let at = escape.location();
                warn!(
                    line = at.line,
                    col = at.col,
                    "lone low surrogate \\u{:04X}, replaced with U+FFFD",
                    unit
                );

                Ok((rest, std::char::REPLACEMENT_CHARACTER))
            }
        },
        _ => match std::char::from_u32(unit as u32) {
            Some(c) => Ok((rest, c)),
            None => failure(escape, rest, Kind::InvalidUnicodeEscape(format!("{:04X}", unit))),
        },
    }
}

fn parse_char(i: Span, escapes: EscapePolicy) -> Result<char> {
    let (rest, c) = none_of("\"")(i)?;

    if c != '\\' {
        return Ok((rest, c));
    }

    let (rest, escaped) =
        anychar(rest).or_else(|_: Err<Error>| failure(i, rest, Kind::UnterminatedString))?;

    let c = match escaped {
        '"' | '\\' | '/' => escaped,
        'b' => '\x08',
        'f' => '\x0C',
        'n' => '\n',
        'r' => '\r',
        't' => '\t',
        'u' => return unicode_escape(i, rest, escapes),
        other => match escapes {
            EscapePolicy::Strict => return failure(i, rest, Kind::InvalidEscape(other)),
            EscapePolicy::Lenient => {
                let at = i.location();
                warn!(
                    line = at.line,
                    col = at.col,
                    "invalid escape sequence \\{}, taking it literally",
                    other
                );

                other
            }
        },
    };

    Ok((rest, c))
}

/// Scans from the opening quote to the closing one, resolving escapes.
fn string(i: Span, escapes: EscapePolicy) -> Result<String> {
    let (body, _) = char('"')(i)?;

    let (rest, content) = fold_many0(
        |i| parse_char(i, escapes),
        String::new,
        |mut string, c| {
            string.push(c);
            string
        },
    )(body)?;

    let (rest, _) =
        char('"')(rest).or_else(|_: Err<Error>| failure(i, rest, Kind::UnterminatedString))?;

    Ok((rest, content))
}

/// Lexer over one document. It is consumed by [`Lexer::tokenize`].
pub struct Lexer<'a> {
    rest: Span<'a>,
    escapes: EscapePolicy,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str, config: Config) -> Self {
        Self {
            rest: Span::new(source),
            escapes: config.escapes,
        }
    }

    /// Lexes the whole input. The last token is always `Eof`, and nothing is
    /// returned if any token is malformed.
    pub fn tokenize(mut self) -> std::result::Result<Vec<Token>, Error> {
        let mut tokens = Vec::new();

        loop {
            self.advance(multispace0)?;

            if self.rest.is_empty() {
                tokens.push(Token::eof(self.rest.location()));
                break;
            }

            tokens.push(self.next_token()?);
        }

        trace!(count = tokens.len(), "tokenized document");

        Ok(tokens)
    }

    /// Runs one scanner on the remaining input and moves the cursor past
    /// what it consumed.
    fn advance<O, P>(&mut self, mut scanner: P) -> std::result::Result<O, Error>
    where
        P: FnMut(Span<'a>) -> Result<'a, O>,
    {
        match scanner(self.rest) {
            Ok((rest, output)) => {
                self.rest = rest;
                Ok(output)
            }
            Err(Err::Error(e)) | Err(Err::Failure(e)) => Err(e),
            Err(Err::Incomplete(_)) => {
                let at = self.rest.location();
                Err(Error::new(at, at, Kind::NomError(nom::error::ErrorKind::Eof)))
            }
        }
    }

    fn next_token(&mut self) -> std::result::Result<Token, Error> {
        let start = self.rest.location();
        let escapes = self.escapes;

        let (kind, text) = match self.rest.current() {
            Some(c) if c.is_ascii_alphabetic() => {
                let (kind, word) = self.advance(keyword)?;
                (kind, word.to_string())
            }
            Some('-' | '0'..='9') => (TokenKind::Number, self.advance(number)?.to_string()),
            Some('"') => (TokenKind::String, self.advance(|i| string(i, escapes))?),
            _ => {
                let kind = self.advance(structural)?;
                (kind, kind.spelling().to_string())
            }
        };

        Ok(Token::new(kind, text, start, self.rest.location()))
    }
}

/// Shorthand for `Lexer::new(source, config).tokenize()`.
pub fn tokenize(source: &str, config: Config) -> std::result::Result<Vec<Token>, Error> {
    Lexer::new(source, config).tokenize()
}
