//! Parser configuration.
//!
//! There is no configuration file or environment lookup, a [`Config`] is built
//! in code and handed to the `*_with_config` entry points.

/// How the lexer treats escapes that RFC 8259 does not allow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EscapePolicy {
    /// An unknown `\X` is taken as the literal `X` and a lone low surrogate
    /// becomes U+FFFD. Both emit a warning.
    #[default]
    Lenient,
    /// Both cases are lexical errors.
    Strict,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Maximum nesting of arrays and objects
    pub max_depth: usize,
    pub escapes: EscapePolicy,
}

impl Config {
    pub const DEFAULT_MAX_DEPTH: usize = 128;

    pub const fn lenient() -> Self {
        Self {
            max_depth: Self::DEFAULT_MAX_DEPTH,
            escapes: EscapePolicy::Lenient,
        }
    }

    pub const fn strict() -> Self {
        Self {
            max_depth: Self::DEFAULT_MAX_DEPTH,
            escapes: EscapePolicy::Strict,
        }
    }

    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::lenient()
    }
}
