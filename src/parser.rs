use crate::config::Config;
use crate::error::{Error, Kind};
use crate::input::Position;
use crate::lexer::Lexer;
use crate::token::{Token, TokenKind};
use crate::value::{Number, Value};
use std::collections::HashMap;
use std::vec::IntoIter;
use tracing::{debug, trace};

pub type ParseResult = std::result::Result<Value, Error>;

/// Recursive-descent parser over one token vector, with a single token of
/// lookahead in `current`. Tokens are drained in order, each one once.
pub struct Parser {
    tokens: IntoIter<Token>,
    current: Token,
    depth: usize,
    max_depth: usize,
}

impl Parser {
    pub fn new(tokens: Vec<Token>, config: Config) -> Self {
        let mut tokens = tokens.into_iter();
        let current = tokens
            .next()
            .unwrap_or_else(|| Token::eof(Position::new(1, 1)));

        Self {
            tokens,
            current,
            depth: 0,
            max_depth: config.max_depth,
        }
    }

    /// `document := value EOF`
    pub fn parse(mut self) -> ParseResult {
        let value = self.parse_value()?;

        if self.current.kind != TokenKind::Eof {
            return Err(self.error_here(Kind::TrailingData(self.current.describe())));
        }

        trace!(kind = value.type_name(), "parsed document");

        Ok(value)
    }

    /// Moves the lookahead forward and returns the token it held. The
    /// sequence always ends with `Eof`, which is never consumed.
    fn advance(&mut self) -> Token {
        let next = match self.tokens.next() {
            Some(token) => token,
            None => Token::eof(self.current.end),
        };

        std::mem::replace(&mut self.current, next)
    }

    fn eat(&mut self, kind: TokenKind) -> bool {
        if self.current.kind == kind {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: TokenKind, expected: &str) -> Result<Token, Error> {
        if self.current.kind == kind {
            Ok(self.advance())
        } else {
            Err(self.unexpected(expected))
        }
    }

    fn unexpected(&self, expected: &str) -> Error {
        self.error_here(Kind::Expected {
            expected: expected.to_string(),
            found: self.current.describe(),
        })
    }

    fn error_here(&self, kind: Kind) -> Error {
        Error::new(self.current.start, self.current.end, kind)
    }

    fn enter(&mut self) -> Result<(), Error> {
        self.depth += 1;

        if self.depth > self.max_depth {
            return Err(self.error_here(Kind::NestingTooDeep(self.max_depth)));
        }

        Ok(())
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    fn parse_value(&mut self) -> ParseResult {
        match self.current.kind {
            TokenKind::LeftBrace => self.parse_object(),
            TokenKind::LeftBracket => self.parse_array(),
            TokenKind::String => Ok(Value::String(self.advance().text)),
            TokenKind::Number => self.parse_number(),
            TokenKind::Boolean => self.parse_boolean(),
            TokenKind::Null => self.parse_null(),
            _ => Err(self.unexpected("value")),
        }
    }

    /// `object := '{' ( member (',' member)* )? '}'`, `member := string ':' value`
    fn parse_object(&mut self) -> ParseResult {
        self.enter()?;
        self.expect(TokenKind::LeftBrace, "'{'")?;

        let mut object = HashMap::new();

        if !self.eat(TokenKind::RightBrace) {
            loop {
                let key = self.expect(TokenKind::String, "object key")?;
                self.expect(TokenKind::Colon, "':'")?;
                let value = self.parse_value()?;

                if object.insert(key.text, value).is_some() {
                    debug!(
                        line = key.start.line,
                        col = key.start.col,
                        "duplicate object key, keeping the later value"
                    );
                }

                if self.eat(TokenKind::Comma) {
                    if self.current.kind == TokenKind::RightBrace {
                        return Err(self.error_here(Kind::TrailingComma));
                    }
                    continue;
                }

                self.expect(TokenKind::RightBrace, "',' or '}'")?;
                break;
            }
        }

        self.leave();

        Ok(Value::Object(object))
    }

    /// `array := '[' ( value (',' value)* )? ']'`
    fn parse_array(&mut self) -> ParseResult {
        self.enter()?;
        self.expect(TokenKind::LeftBracket, "'['")?;

        let mut array = Vec::new();

        if !self.eat(TokenKind::RightBracket) {
            loop {
                array.push(self.parse_value()?);

                if self.eat(TokenKind::Comma) {
                    if self.current.kind == TokenKind::RightBracket {
                        return Err(self.error_here(Kind::TrailingComma));
                    }
                    continue;
                }

                self.expect(TokenKind::RightBracket, "',' or ']'")?;
                break;
            }
        }

        self.leave();

        Ok(Value::Array(array))
    }

    fn parse_number(&mut self) -> ParseResult {
        let token = self.advance();
        let text = token.text.as_str();

        let number = if text.contains(&['.', 'e', 'E'][..]) {
            text.parse().map(Number::Float).map_err(Error::from)
        } else {
            text.parse().map(Number::Integer).map_err(Error::from)
        }
        .map_err(|e| e.at(token.start, token.end))?;

        Ok(Value::Number(number))
    }

    fn parse_boolean(&mut self) -> ParseResult {
        let value = match self.current.text.as_str() {
            "true" => true,
            "false" => false,
            other => {
                return Err(self.error_here(Kind::Inconsistent(format!(
                    "boolean token spelled '{}'",
                    other
                ))))
            }
        };

        self.advance();

        Ok(Value::Bool(value))
    }

    fn parse_null(&mut self) -> ParseResult {
        if self.current.text != "null" {
            return Err(self.error_here(Kind::Inconsistent(format!(
                "null token spelled '{}'",
                self.current.text
            ))));
        }

        self.advance();

        Ok(Value::Null)
    }
}

/// Parses a whole document with the default (lenient) configuration.
pub fn parse(s: &str) -> ParseResult {
    parse_with_config(s, Config::default())
}

pub fn parse_with_config(s: &str, config: Config) -> ParseResult {
    let tokens = Lexer::new(s, config).tokenize()?;

    Parser::new(tokens, config).parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(kinds: &[(TokenKind, &str)]) -> Vec<Token> {
        let at = Position::new(1, 1);
        let mut tokens: Vec<Token> = kinds
            .iter()
            .map(|(kind, text)| Token::new(*kind, *text, at, at))
            .collect();
        tokens.push(Token::eof(at));
        tokens
    }

    fn check(input: &[(TokenKind, &str)], expected: Value) {
        let value = Parser::new(tokens(input), Config::default())
            .parse()
            .unwrap();
        assert_eq!(value, expected);
    }

    fn error_kind(input: &str) -> Kind {
        parse(input).unwrap_err().kind
    }

    #[test]
    fn parses_null() {
        check(&[(TokenKind::Null, "null")], Value::Null);
    }

    #[test]
    fn parses_booleans() {
        check(&[(TokenKind::Boolean, "true")], Value::Bool(true));
        check(&[(TokenKind::Boolean, "false")], Value::Bool(false));
    }

    #[test]
    fn parses_string_as_is() {
        check(
            &[(TokenKind::String, "hello 💩 world")],
            Value::String("hello 💩 world".into()),
        );
    }

    #[test]
    fn classifies_numbers_by_spelling() {
        check(&[(TokenKind::Number, "16")], Value::Number(Number::Integer(16)));
        check(&[(TokenKind::Number, "-0")], Value::Number(Number::Integer(0)));
        check(&[(TokenKind::Number, "2.0")], Value::Number(Number::Float(2.0)));
        check(&[(TokenKind::Number, "1e3")], Value::Number(Number::Float(1000.0)));
        check(&[(TokenKind::Number, "1E3")], Value::Number(Number::Float(1000.0)));
    }

    #[test]
    fn parses_empty_array() {
        check(
            &[(TokenKind::LeftBracket, "["), (TokenKind::RightBracket, "]")],
            Value::Array(vec![]),
        );
    }

    #[test]
    fn parses_nested_array() {
        // [null, [null]]
        check(
            &[
                (TokenKind::LeftBracket, "["),
                (TokenKind::Null, "null"),
                (TokenKind::Comma, ","),
                (TokenKind::LeftBracket, "["),
                (TokenKind::Null, "null"),
                (TokenKind::RightBracket, "]"),
                (TokenKind::RightBracket, "]"),
            ],
            Value::Array(vec![Value::Null, Value::Array(vec![Value::Null])]),
        );
    }

    #[test]
    fn parses_object() {
        let expected: Value = vec![("key".to_string(), Value::String("value".to_string()))]
            .into_iter()
            .collect();

        assert_eq!(parse(r#"{"key": "value"}"#).unwrap(), expected);
        assert_eq!(parse("{}").unwrap(), Value::Object(HashMap::new()));
    }

    #[test]
    fn last_duplicate_key_wins() {
        let value = parse(r#"{"a":1,"b":true,"a":2}"#).unwrap();

        assert_eq!(value.as_object().map(HashMap::len), Some(2));
        assert_eq!(value.get("a"), Some(&Value::Number(Number::Integer(2))));
    }

    #[test]
    fn inconsistent_keyword_text() {
        let error = Parser::new(tokens(&[(TokenKind::Boolean, "yes")]), Config::default())
            .parse()
            .unwrap_err();

        assert_eq!(
            error.kind,
            Kind::Inconsistent("boolean token spelled 'yes'".into())
        );

        let error = Parser::new(tokens(&[(TokenKind::Null, "nil")]), Config::default())
            .parse()
            .unwrap_err();

        assert!(matches!(error.kind, Kind::Inconsistent(_)));
    }

    #[test]
    fn empty_token_sequence_is_missing_value() {
        let error = Parser::new(vec![], Config::default()).parse().unwrap_err();

        assert_eq!(
            error.kind,
            Kind::Expected {
                expected: "value".into(),
                found: "end of input".into()
            }
        );
    }

    #[test]
    fn missing_comma() {
        assert_eq!(
            error_kind(r#"{"name":"B" "age":25}"#),
            Kind::Expected {
                expected: "',' or '}'".into(),
                found: "string \"age\"".into()
            }
        );
        assert_eq!(
            error_kind("[1 2]"),
            Kind::Expected {
                expected: "',' or ']'".into(),
                found: "number 2".into()
            }
        );
    }

    #[test]
    fn missing_colon() {
        assert_eq!(
            error_kind(r#"{"a" 1}"#),
            Kind::Expected {
                expected: "':'".into(),
                found: "number 1".into()
            }
        );
    }

    #[test]
    fn trailing_commas() {
        assert_eq!(error_kind("[1,2,3,]"), Kind::TrailingComma);
        assert_eq!(error_kind(r#"{"a":1,}"#), Kind::TrailingComma);
    }

    #[test]
    fn keys_must_be_strings() {
        assert_eq!(
            error_kind("{1: 2}"),
            Kind::Expected {
                expected: "object key".into(),
                found: "number 1".into()
            }
        );
    }

    #[test]
    fn leading_comma() {
        assert_eq!(
            error_kind("[,1]"),
            Kind::Expected {
                expected: "value".into(),
                found: "','".into()
            }
        );
    }

    #[test]
    fn trailing_data() {
        assert_eq!(error_kind("null extra"), Kind::UnknownKeyword("extra".into()));
        assert_eq!(error_kind("[1] 2"), Kind::TrailingData("number 2".into()));
        assert_eq!(error_kind("{} {}"), Kind::TrailingData("'{'".into()));
    }

    #[test]
    fn unclosed_containers() {
        assert_eq!(
            error_kind("[1, 2"),
            Kind::Expected {
                expected: "',' or ']'".into(),
                found: "end of input".into()
            }
        );
        assert_eq!(
            error_kind(r#"{"a": "#),
            Kind::Expected {
                expected: "value".into(),
                found: "end of input".into()
            }
        );
    }

    #[test]
    fn integer_out_of_range() {
        let error = parse("[9223372036854775808]").unwrap_err();

        assert!(matches!(error.kind, Kind::InvalidNumber(_)));
        assert_eq!(error.start, Position::new(1, 2));
        assert_eq!(parse("-9223372036854775808").unwrap().as_i64(), Some(i64::MIN));
    }

    #[test]
    fn nesting_limit() {
        let config = Config::default().with_max_depth(2);

        assert!(parse_with_config("[[1]]", config).is_ok());
        assert!(parse_with_config(r#"{"a":[1]}"#, config).is_ok());
        assert_eq!(
            parse_with_config("[[[1]]]", config).unwrap_err().kind,
            Kind::NestingTooDeep(2)
        );
        assert_eq!(
            parse_with_config(r#"[{"a":{}}]"#, config).unwrap_err().kind,
            Kind::NestingTooDeep(2)
        );
    }

    #[test]
    fn depth_is_released_between_siblings() {
        let config = Config::default().with_max_depth(2);

        assert!(parse_with_config("[[1],[2],[3]]", config).is_ok());
    }

    #[test]
    fn errors_point_at_offending_token() {
        let error = parse("[1,\n 2,\n ]").unwrap_err();

        assert_eq!(error.kind, Kind::TrailingComma);
        assert_eq!(error.start, Position::new(3, 2));
    }
}
