use std::fmt::{Debug, Display, Formatter};

use nom::IResult;
use nom::character::complete::digit1;
use nom::combinator::{all_consuming, map_res};
use nom::error::{ErrorKind, FromExternalError, ParseError};

pub enum ParserError<I> {
    Custom(anyhow::Error),
    Nom(I, ErrorKind),
}

impl<I: Debug> Debug for ParserError<I> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Custom(error) => write!(f, "Semantic error at {error}"),
            Self::Nom(input, error) => {
                write!(f, "Parser error at {input:?}: expecting {error:?}")
            }
        }
    }
}

impl<I> ParseError<I> for ParserError<I> {
    fn from_error_kind(input: I, kind: ErrorKind) -> Self {
        ParserError::Nom(input, kind)
    }

    fn append(_: I, _: ErrorKind, other: Self) -> Self {
        other
    }
}

impl<I: Display, E: Into<anyhow::Error>> FromExternalError<I, E> for ParserError<I> {
    fn from_external_error(input: I, _: ErrorKind, error: E) -> Self {
        ParserError::Custom(anyhow::anyhow!("'{input}': {}", error.into()))
    }
}

pub(crate) fn format_parse_error<I: Debug>(error: nom::Err<ParserError<I>>) -> anyhow::Error {
    match error {
        nom::Err::Error(e) | nom::Err::Failure(e) => anyhow::anyhow!("{e:?}"),
        nom::Err::Incomplete(_) => anyhow::anyhow!("Unexpected end of input"),
    }
}

pub type NomResult<'a, Ret> = IResult<&'a str, Ret, ParserError<&'a str>>;

pub fn p_u64(input: &str) -> NomResult<u64> {
    map_res(digit1, |number: &str| number.parse::<u64>())(input)
}

/// Runs `parser` and fails unless the whole `input` was consumed.
pub fn consume_all<'a, O>(
    parser: impl FnMut(&'a str) -> NomResult<'a, O>,
    input: &'a str,
) -> anyhow::Result<O> {
    all_consuming(parser)(input)
        .map(|(_, output)| output)
        .map_err(format_parse_error)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_u64() {
        assert_eq!(consume_all(p_u64, "0").unwrap(), 0);
        assert_eq!(consume_all(p_u64, "1019").unwrap(), 1019);
        assert_eq!(
            consume_all(p_u64, "18446744073709551615").unwrap(),
            u64::MAX
        );
    }

    #[test]
    fn test_parse_u64_invalid() {
        assert!(consume_all(p_u64, "").is_err());
        assert!(consume_all(p_u64, "x").is_err());
        assert!(consume_all(p_u64, "1x").is_err());
        assert!(consume_all(p_u64, "18446744073709551616").is_err());
    }

    #[test]
    fn test_parse_error_message() {
        let error = consume_all(p_u64, "12a").unwrap_err();
        assert_eq!(error.to_string(), "Parser error at \"a\": expecting Eof");
    }
}
