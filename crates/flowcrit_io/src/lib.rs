//! This crate provides parsing of criteria from their rendered text form
//! (`UDP_DST{udpPort=53}`), one criterion at a time or as a whitespace/comma separated list.
mod default;

use nom::{
    error::{ErrorKind, FromExternalError, ParseError},
    {Finish, IResult},
};
use thiserror::Error;

use flowcrit_core::error::CriterionError;

pub use default::{parse, parse_criterion, CriteriaLoader, SelectorLoader};

/// LoadError is the error every loader reports. Syntax errors keep the nom [ErrorKind], while
/// well-formed text that names an invalid criterion keeps the [CriterionError].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    #[error("syntax error ({kind:?}) near `{near}`")]
    Syntax { near: String, kind: ErrorKind },

    #[error("invalid criterion near `{near}`: {source}")]
    Criterion {
        near: String,
        #[source]
        source: CriterionError,
    },
}

const SNIPPET_LEN: usize = 32;

fn snippet(input: &str) -> String {
    input.chars().take(SNIPPET_LEN).collect()
}

impl<'a> ParseError<&'a str> for LoadError {
    fn from_error_kind(input: &'a str, kind: ErrorKind) -> Self {
        LoadError::Syntax {
            near: snippet(input),
            kind,
        }
    }

    fn append(_: &'a str, _: ErrorKind, other: Self) -> Self {
        other
    }
}

impl<'a> FromExternalError<&'a str, CriterionError> for LoadError {
    fn from_external_error(input: &'a str, _: ErrorKind, e: CriterionError) -> Self {
        LoadError::Criterion {
            near: snippet(input),
            source: e,
        }
    }
}

/// CriterionLoader parses text content into some collection of criteria.
pub trait CriterionLoader<T> {
    // Required method
    fn _load<'x, Err>(&self, content: &'x str) -> IResult<(), T, Err>
    where
        Err: ParseError<&'x str> + FromExternalError<&'x str, CriterionError>;

    // Provided method
    fn load(&self, content: &str) -> Result<T, LoadError> {
        self._load::<LoadError>(content)
            .finish()
            .map(|(_, loaded)| loaded)
    }
}

/// Basics for io
pub mod basic {
    /// Basic helper functions for parsing
    pub mod parser {
        use nom::bytes::complete::{tag, take_while1};
        use nom::character::complete::{char, digit1, hex_digit1};
        use nom::error::{ErrorKind, ParseError};
        use nom::sequence::{preceded, tuple};
        use nom::Err::Error;
        use nom::IResult;

        /// r"[A-Z0-9_]+"
        pub fn parse_type_name<'a, E: ParseError<&'a str>>(
            input: &'a str,
        ) -> IResult<&'a str, &'a str, E> {
            take_while1(|chr: char| chr.is_ascii_uppercase() || chr.is_ascii_digit() || chr == '_')(
                input,
            )
        }

        /// r"0x[0-9a-fA-F]+|[0-9]+" as u128
        pub fn parse_number<'a, E: ParseError<&'a str>>(
            input: &'a str,
        ) -> IResult<&'a str, u128, E> {
            if let Ok((rest, hex)) =
                preceded(tag::<_, _, E>("0x"), hex_digit1::<_, E>)(input)
            {
                return match u128::from_str_radix(hex, 16) {
                    Ok(num) => Ok((rest, num)),
                    Err(_) => Err(Error(E::from_error_kind(input, ErrorKind::HexDigit))),
                };
            }
            let (rest, num) = digit1(input)?;
            match num.parse::<u128>() {
                Ok(num) => Ok((rest, num)),
                Err(_) => Err(Error(E::from_error_kind(input, ErrorKind::Digit))),
            }
        }

        /// r"[<=255]"
        pub fn parse_u8<'a, E: ParseError<&'a str>>(input: &'a str) -> IResult<&'a str, u8, E> {
            let (rest, num) = digit1(input)?;
            if let Ok(num) = num.parse::<u8>() {
                Ok((rest, num))
            } else {
                Err(Error(E::from_error_kind(input, ErrorKind::Digit)))
            }
        }

        /// r"[<=255].[<=255].[<=255].[<=255]"
        pub fn parse_ipv4_dotted<'a, E: ParseError<&'a str>>(
            input: &'a str,
        ) -> IResult<&'a str, u32, E> {
            let (rest, (o1, _, o2, _, o3, _, o4)) = tuple((
                parse_u8,
                char('.'),
                parse_u8,
                char('.'),
                parse_u8,
                char('.'),
                parse_u8,
            ))(input)?;
            Ok((
                rest,
                (o1 as u32) << 24 | (o2 as u32) << 16 | (o3 as u32) << 8 | o4 as u32,
            ))
        }

        /// r"[<=u32::MAX]"
        pub fn parse_ipv4_num<'a, E: ParseError<&'a str>>(
            input: &'a str,
        ) -> IResult<&'a str, u32, E> {
            let (rest, num) = digit1(input)?;
            if let Ok(num) = num.parse::<u32>() {
                Ok((rest, num))
            } else {
                Err(Error(E::from_error_kind(input, ErrorKind::Digit)))
            }
        }

    }
}

#[allow(missing_docs)]
pub mod prelude {
    #[doc(hidden)]
    pub use crate::{parse, CriteriaLoader, CriterionLoader, LoadError, SelectorLoader};
}
