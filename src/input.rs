use bytecount::num_chars;
use memchr::{memchr_iter, memrchr};
use nom::{
    Compare, Err, InputIter, InputLength, InputTake, InputTakeAtPosition, Offset, Slice,
};
use std::{
    fmt::Display,
    ops::{RangeFrom, RangeTo},
    str::{CharIndices, Chars},
};

/// A location in the source text. Lines and columns start at 1, columns count
/// unicode scalar values. The default value (0, 0) means "unknown".
#[derive(Debug, Default, PartialEq, Eq, Clone, Copy, PartialOrd, Ord)]
pub struct Position {
    pub line: usize,
    pub col: usize,
}

impl Position {
    pub fn new(line: usize, col: usize) -> Self {
        Self { line, col }
    }

    pub fn is_known(&self) -> bool {
        self.line != 0
    }

    /// Position reached after reading `text` starting from `self`.
    pub fn advanced_by(self, text: &str) -> Self {
        let bytes = text.as_bytes();

        if bytes.is_empty() {
            return self;
        }

        let lines = memchr_iter(b'\n', bytes).count();

        match memrchr(b'\n', bytes) {
            None => Self {
                line: self.line,
                col: self.col + num_chars(bytes),
            },
            Some(last) => Self {
                line: self.line + lines,
                // The column restarts after the last newline
                col: num_chars(&bytes[last + 1..]) + 1,
            },
        }
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}, column {}", self.line, self.col)
    }
}

impl<'a> From<Input<'a>> for Position {
    fn from(input: Input<'a>) -> Self {
        input.location()
    }
}

/// Cursor over the decoded document. Slicing keeps the line and column of
/// the first character up to date, so a token's position is always the
/// position of the remaining input when its scan starts.
#[derive(Clone, Debug, Copy)]
pub struct Input<'a> {
    data: &'a str,
    line: usize,
    col: usize,
}

impl<'a> Input<'a> {
    pub fn new(data: &'a str) -> Self {
        Self {
            data,
            line: 1,
            col: 1,
        }
    }

    pub fn location(&self) -> Position {
        Position::new(self.line, self.col)
    }

    pub fn fragment(&self) -> &'a str {
        self.data
    }

    /// The lookahead character, if any input is left.
    pub fn current(&self) -> Option<char> {
        self.data.chars().next()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    fn slice_common(&self, next_data: &'a str) -> Self {
        let offset = self.data.offset(next_data);

        if offset == 0 {
            return Self {
                data: next_data,
                line: self.line,
                col: self.col,
            };
        }

        let Position { line, col } = self.location().advanced_by(&self.data[..offset]);

        Self {
            data: next_data,
            line,
            col,
        }
    }
}

impl<'a, 'b> Compare<&'b str> for Input<'a> {
    fn compare(&self, t: &'b str) -> nom::CompareResult {
        self.data.compare(t)
    }

    fn compare_no_case(&self, t: &'b str) -> nom::CompareResult {
        self.data.compare_no_case(t)
    }
}

impl<'a> InputIter for Input<'a> {
    type Item = char;

    type Iter = CharIndices<'a>;

    type IterElem = Chars<'a>;

    fn iter_indices(&self) -> Self::Iter {
        self.data.iter_indices()
    }

    fn iter_elements(&self) -> Self::IterElem {
        self.data.iter_elements()
    }

    fn position<P>(&self, predicate: P) -> Option<usize>
    where
        P: Fn(Self::Item) -> bool,
    {
        self.data.position(predicate)
    }

    fn slice_index(&self, count: usize) -> Result<usize, nom::Needed> {
        self.data.slice_index(count)
    }
}

impl<'a> InputLength for Input<'a> {
    fn input_len(&self) -> usize {
        self.data.len()
    }
}

impl<'a> InputTake for Input<'a> {
    fn take(&self, count: usize) -> Self {
        self.slice(..count)
    }

    fn take_split(&self, count: usize) -> (Self, Self) {
        (self.slice(count..), self.slice(..count))
    }
}

impl<'a> InputTakeAtPosition for Input<'a> {
    type Item = char;

    fn split_at_position<P, E: nom::error::ParseError<Self>>(
        &self,
        predicate: P,
    ) -> nom::IResult<Self, Self, E>
    where
        P: Fn(Self::Item) -> bool,
    {
        match self.data.position(predicate) {
            Some(n) => Ok(self.take_split(n)),
            None => Err(Err::Incomplete(nom::Needed::new(1))),
        }
    }

    fn split_at_position1<P, E: nom::error::ParseError<Self>>(
        &self,
        predicate: P,
        e: nom::error::ErrorKind,
    ) -> nom::IResult<Self, Self, E>
    where
        P: Fn(Self::Item) -> bool,
    {
        match self.data.position(predicate) {
            Some(0) => Err(Err::Error(E::from_error_kind(*self, e))),
            Some(n) => Ok(self.take_split(n)),
            None => Err(Err::Incomplete(nom::Needed::new(1))),
        }
    }

    fn split_at_position_complete<P, E: nom::error::ParseError<Self>>(
        &self,
        predicate: P,
    ) -> nom::IResult<Self, Self, E>
    where
        P: Fn(Self::Item) -> bool,
    {
        match self.split_at_position(predicate) {
            Err(Err::Incomplete(_)) => Ok(self.take_split(self.input_len())),
            res => res,
        }
    }

    fn split_at_position1_complete<P, E: nom::error::ParseError<Self>>(
        &self,
        predicate: P,
        e: nom::error::ErrorKind,
    ) -> nom::IResult<Self, Self, E>
    where
        P: Fn(Self::Item) -> bool,
    {
        match self.data.position(predicate) {
            Some(0) => Err(Err::Error(E::from_error_kind(*self, e))),
            Some(n) => Ok(self.take_split(n)),
            None => {
                if self.data.is_empty() {
                    Err(Err::Error(E::from_error_kind(*self, e)))
                } else {
                    Ok(self.take_split(self.input_len()))
                }
            }
        }
    }
}

impl<'a> Offset for Input<'a> {
    fn offset(&self, second: &Self) -> usize {
        self.data.offset(second.data)
    }
}

impl<'a> Slice<RangeTo<usize>> for Input<'a> {
    fn slice(&self, range: RangeTo<usize>) -> Self {
        let next_data = self.data.slice(range);

        self.slice_common(next_data)
    }
}

impl<'a> Slice<RangeFrom<usize>> for Input<'a> {
    fn slice(&self, range: RangeFrom<usize>) -> Self {
        let next_data = self.data.slice(range);

        self.slice_common(next_data)
    }
}
