use nom;

use nom_locate::LocatedSpan;

pub type Span<'a> = LocatedSpan<&'a str>;

pub type IResult<'a, O> = nom::IResult<Span<'a>, O, ParseError<'a>>;

#[derive(Debug, PartialEq)]
pub struct ParseError<'a> {
    message: String,
    wherein: Span<'a>,
}

impl<'a> ParseError<'a> {
    pub fn new(message: String, wherein: Span<'a>) -> Self {
        Self { message, wherein }
    }

    // (wherein, expected)
    pub fn partial(wherein: &'static str, expected: &'static str, rest: Span<'a>) -> Self {
        Self::new(format!("{} in {}", unexpected(&rest), wherein), rest)
            .with_expected(expected)
    }

    fn with_expected(mut self, expected: &str) -> Self {
        self.message = format!("{}, expected {}", self.message, expected);
        self
    }

    pub fn offset(&self) -> usize {
        self.wherein.location_offset()
    }
}

impl<'a> nom::error::ParseError<Span<'a>> for ParseError<'a> {
    fn from_error_kind(input: Span<'a>, kind: nom::error::ErrorKind) -> Self {
        match kind {
            nom::error::ErrorKind::Eof => {
                Self::new(format!("{} after the last value", unexpected(&input)), input)
            }
            _ => Self::new(format!("{} ({:?})", unexpected(&input), kind), input),
        }
    }

    fn append(_input: Span<'a>, _kind: nom::error::ErrorKind, other: Self) -> Self {
        other
    }

    fn from_char(input: Span<'a>, c: char) -> Self {
        Self::new(format!("{}, expected '{}'", unexpected(&input), c), input)
    }
}

impl<'a> From<nom::Err<ParseError<'a>>> for ParseError<'a> {
    fn from(err: nom::Err<ParseError<'a>>) -> Self {
        match err {
            nom::Err::Error(e) | nom::Err::Failure(e) => e,
            nom::Err::Incomplete(_) => unreachable!(),
        }
    }
}

impl<'a> From<ParseError<'a>> for String {
    fn from(err: ParseError<'a>) -> Self {
        format!("{}: {}", err.offset(), err.message)
    }
}

fn unexpected(rest: &Span<'_>) -> String {
    match rest.fragment().chars().next() {
        Some(c) => format!("unexpected '{}'", c),
        None => String::from("unexpected end of input"),
    }
}
