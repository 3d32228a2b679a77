#![forbid(unsafe_code)]
#![warn(clippy::all)]
//! This crate is a json parser built in two passes: a lexer turns the text into a flat vector of
//! tokens, then a recursive-descent parser with a single token of lookahead turns the tokens into
//! a [`Value`](value::Value) tree.
//!
//! ## How to use it ?
//!
//! The crate exposes a `Value` close to the one of [serde_json](https://docs.rs/serde_json/latest/serde_json/value/enum.Value.html),
//! except that numbers keep track of how they were written:
//!
//! ```rust
//! use jayson::{parse, value::{Number, Value}};
//!
//! let parsed = parse("[1, 2.0, 1e3, -2.5E-2]").unwrap();
//!
//! assert_eq!(
//!     parsed,
//!     Value::Array(vec![
//!         Value::Number(Number::Integer(1)),
//!         Value::Number(Number::Float(2.0)),
//!         Value::Number(Number::Float(1000.0)),
//!         Value::Number(Number::Float(-0.025)),
//!     ])
//! );
//! ```
//!
//! ### Reading from a file or a stream
//!
//! ```rust,no_run
//! use jayson::from_file;
//!
//! let parsed = from_file("path/to/file.json");
//!
//! println!("Parsed: {:#?}", parsed);
//! ```
//!
//! ### Errors
//!
//! Every failure is fatal, nothing is returned but the error. Errors carry the position of the
//! offending input:
//!
//! ```rust
//! use jayson::{parse, error::{Category, Kind}};
//!
//! let error = parse("[1, 2, 3,]").unwrap_err();
//!
//! assert_eq!(error.kind, Kind::TrailingComma);
//! assert_eq!(error.category(), Category::Syntax);
//! assert_eq!(error.to_string(), "trailing comma before closing delimiter at line 1, column 10");
//! ```
//!
//! ### Strictness
//!
//! By default an unknown escape such as `\q` is taken literally and a lone low surrogate becomes
//! U+FFFD, both with a `tracing` warning. [`Config::strict`] rejects them instead, and
//! [`Config::max_depth`] bounds how deep arrays and objects may nest.

extern crate bytecount;
extern crate memchr;
extern crate nom;

mod input;
mod lexer;
mod parser;
mod source;
mod token;

pub mod config;
pub mod error;
pub mod value;

pub use config::{Config, EscapePolicy};
pub use input::Position;
pub use lexer::{tokenize, Lexer};
pub use parser::{parse, parse_with_config, Parser};
pub use source::{
    from_file, from_file_with_config, from_reader, from_reader_with_config, from_slice,
    from_slice_with_config,
};
pub use token::{Token, TokenKind};
