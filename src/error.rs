use crate::input::{Input, Position};
use nom::error::{ErrorKind, ParseError};
use std::fmt::Display;
use std::num::IntErrorKind;
use std::num::ParseFloatError;
use std::num::ParseIntError;

/// The three families every failure falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Lexical,
    Syntax,
    Io,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Kind {
    #[error("unexpected character '{0}'")]
    UnexpectedChar(char),
    #[error("unrecognized keyword '{0}'")]
    UnknownKeyword(String),
    #[error("invalid number: {0}")]
    InvalidNumber(String),
    #[error("unterminated string")]
    UnterminatedString,
    #[error("invalid unicode escape '\\u{0}'")]
    InvalidUnicodeEscape(String),
    #[error("high surrogate \\u{0:04X} is not followed by a low surrogate")]
    UnpairedSurrogate(u16),
    #[error("lone low surrogate \\u{0:04X}")]
    LoneSurrogate(u16),
    #[error("invalid escape sequence '\\{0}'")]
    InvalidEscape(char),
    #[error("expected {expected}, found {found}")]
    Expected { expected: String, found: String },
    #[error("trailing comma before closing delimiter")]
    TrailingComma,
    #[error("unexpected data after the document: {0}")]
    TrailingData(String),
    #[error("nesting deeper than {0} levels")]
    NestingTooDeep(usize),
    #[error("inconsistent token: {0}")]
    Inconsistent(String),
    #[error("i/o error: {0}")]
    Io(String),
    #[error("invalid utf-8: {0}")]
    InvalidUtf8(String),
    #[error("malformed input ({0:?})")]
    NomError(ErrorKind),
}

impl Kind {
    pub fn category(&self) -> Category {
        match self {
            Self::UnexpectedChar(_)
            | Self::UnknownKeyword(_)
            | Self::InvalidNumber(_)
            | Self::UnterminatedString
            | Self::InvalidUnicodeEscape(_)
            | Self::UnpairedSurrogate(_)
            | Self::LoneSurrogate(_)
            | Self::InvalidEscape(_)
            | Self::NomError(_) => Category::Lexical,
            Self::Expected { .. }
            | Self::TrailingComma
            | Self::TrailingData(_)
            | Self::NestingTooDeep(_)
            | Self::Inconsistent(_) => Category::Syntax,
            Self::Io(_) | Self::InvalidUtf8(_) => Category::Io,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    pub start: Position,
    pub end: Position,
    pub kind: Kind,
}

impl Error {
    pub fn new(start: Position, end: Position, kind: Kind) -> Self {
        Self { start, end, kind }
    }

    /// Replaces the span, used once the caller knows where a conversion failed.
    pub fn at(mut self, start: Position, end: Position) -> Self {
        self.start = start;
        self.end = end;
        self
    }

    pub fn category(&self) -> Category {
        self.kind.category()
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.start.is_known() {
            write!(f, "{} at {}", self.kind, self.start)
        } else {
            write!(f, "{}", self.kind)
        }
    }
}

impl std::error::Error for Error {}

impl From<Kind> for Error {
    fn from(kind: Kind) -> Self {
        Self::new(Position::default(), Position::default(), kind)
    }
}

impl From<ParseIntError> for Error {
    fn from(value: ParseIntError) -> Self {
        let reason = match value.kind() {
            IntErrorKind::Empty => "empty",
            IntErrorKind::InvalidDigit => "not a valid integer",
            IntErrorKind::PosOverflow => "integer too large",
            IntErrorKind::NegOverflow => "integer too small",
            _ => "unknown",
        };

        Kind::InvalidNumber(format!("failed to parse integer, reason: {}", reason)).into()
    }
}

impl From<ParseFloatError> for Error {
    fn from(value: ParseFloatError) -> Self {
        Kind::InvalidNumber(format!("failed to parse float, reason: {}", value)).into()
    }
}

impl From<std::io::Error> for Error {
    fn from(value: std::io::Error) -> Self {
        Kind::Io(value.to_string()).into()
    }
}

impl<'a> ParseError<Input<'a>> for Error {
    fn from_error_kind(input: Input<'a>, kind: ErrorKind) -> Self {
        let position = Position::from(input);

        Self::new(position, position, Kind::NomError(kind))
    }

    fn append(_input: Input<'a>, _kind: ErrorKind, other: Self) -> Self {
        other
    }
}
