//! Byte-stream entry points. They read the whole stream, decode it as UTF-8
//! and hand the text to the lexer and parser.

use crate::config::Config;
use crate::error::{Error, Kind};
use crate::input::Position;
use crate::parser::{parse_with_config, ParseResult};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

pub fn from_slice(bytes: &[u8]) -> ParseResult {
    from_slice_with_config(bytes, Config::default())
}

pub fn from_slice_with_config(bytes: &[u8], config: Config) -> ParseResult {
    let text = std::str::from_utf8(bytes).map_err(|e| {
        let valid = &bytes[..e.valid_up_to()];
        // valid_up_to marks a prefix that decodes
        let at = std::str::from_utf8(valid)
            .map(|prefix| Position::new(1, 1).advanced_by(prefix))
            .unwrap_or_default();

        Error::new(at, at, Kind::InvalidUtf8(e.to_string()))
    })?;

    parse_with_config(text, config)
}

/// Reads `reader` to the end before lexing.
pub fn from_reader<R: Read>(reader: R) -> ParseResult {
    from_reader_with_config(reader, Config::default())
}

pub fn from_reader_with_config<R: Read>(mut reader: R, config: Config) -> ParseResult {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;

    from_slice_with_config(&bytes, config)
}

/// The file is closed when this returns, whether parsing succeeded or not.
pub fn from_file<P: AsRef<Path>>(path: P) -> ParseResult {
    from_file_with_config(path, Config::default())
}

pub fn from_file_with_config<P: AsRef<Path>>(path: P, config: Config) -> ParseResult {
    let file = File::open(path.as_ref()).map_err(|e| {
        Error::from(Kind::Io(format!("{}: {}", path.as_ref().display(), e)))
    })?;

    from_reader_with_config(BufReader::new(file), config)
}
