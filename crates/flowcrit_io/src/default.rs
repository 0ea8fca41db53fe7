use std::str::FromStr;

use nom::{
    branch::alt,
    character::complete::{alpha1, char, multispace0, multispace1},
    combinator::{all_consuming, cut, map, map_res, verify},
    error::{FromExternalError, ParseError},
    multi::separated_list1,
    sequence::{delimited, separated_pair, tuple},
    Finish, IResult,
};
use tracing::debug;

use flowcrit_core::{
    criterion::{criteria::Criteria, types::CriterionType, Criterion, Ipv4Prefix},
    error::CriterionError,
    selector::TrafficSelector,
};

use crate::{
    basic::parser::{parse_ipv4_dotted, parse_ipv4_num, parse_number, parse_type_name, parse_u8},
    CriterionLoader, LoadError,
};

/// Parses one criterion in its rendered form, e.g. `UDP_DST{udpPort=8080}`,
/// `ETH_TYPE{ethType=0x0800}` or `IPV4_SRC{ip=10.0.0.0/8}`.
///
/// The label must be the one the type renders with. Numeric values go through the strict
/// factory, so `UDP_DST{udpPort=70000}` is rejected rather than truncated.
pub fn parse_criterion<'a, E>(input: &'a str) -> IResult<&'a str, Criterion, E>
where
    E: ParseError<&'a str> + FromExternalError<&'a str, CriterionError>,
{
    let (rest, ty) = map_res(parse_type_name, CriterionType::from_str)(input)?;
    let (rest, _) = tuple((
        char('{'),
        verify(alpha1, |label: &str| label == ty.label()),
        char('='),
    ))(rest)?;
    let (rest, criterion) = if ty.is_ipv4() {
        map_res(
            separated_pair(
                alt((parse_ipv4_dotted, parse_ipv4_num)),
                char('/'),
                parse_u8,
            ),
            |(addr, len): (u32, u8)| {
                Ipv4Prefix::new(addr, len).and_then(|prefix| Criteria::ipv4(ty, prefix))
            },
        )(rest)?
    } else {
        map_res(parse_number, |value: u128| Criteria::checked(ty, value))(rest)?
    };
    let (rest, _) = char('}')(rest)?;
    Ok((rest, criterion))
}

/// Parses a whole string as exactly one criterion.
pub fn parse(content: &str) -> Result<Criterion, LoadError> {
    all_consuming(parse_criterion::<LoadError>)(content.trim())
        .finish()
        .map(|(_, c)| c)
}

fn parse_separator<'a, E: ParseError<&'a str>>(input: &'a str) -> IResult<&'a str, (), E> {
    alt((
        map(delimited(multispace0, char(','), multispace0), |_| ()),
        map(multispace1, |_| ()),
    ))(input)
}

fn parse_criteria<'a, E>(content: &'a str) -> IResult<(), Vec<Criterion>, E>
where
    E: ParseError<&'a str> + FromExternalError<&'a str, CriterionError>,
{
    let content = content.trim();
    if content.is_empty() {
        return Ok(((), vec![]));
    }
    let (_, criteria) =
        all_consuming(separated_list1(parse_separator, cut(parse_criterion)))(content)?;
    Ok(((), criteria))
}

/// Loads every listed criterion, keeping duplicates and order.
#[derive(Default)]
pub struct CriteriaLoader {}

impl CriterionLoader<Vec<Criterion>> for CriteriaLoader {
    fn _load<'x, E>(&self, content: &'x str) -> IResult<(), Vec<Criterion>, E>
    where
        E: ParseError<&'x str> + FromExternalError<&'x str, CriterionError>,
    {
        let (_, criteria) = parse_criteria(content)?;
        debug!(count = criteria.len(), "loaded criteria");
        Ok(((), criteria))
    }
}

/// Loads the listed criteria into a [TrafficSelector]; a later criterion replaces an earlier
/// one of the same type.
#[derive(Default)]
pub struct SelectorLoader {}

impl CriterionLoader<TrafficSelector> for SelectorLoader {
    fn _load<'x, E>(&self, content: &'x str) -> IResult<(), TrafficSelector, E>
    where
        E: ParseError<&'x str> + FromExternalError<&'x str, CriterionError>,
    {
        let (_, criteria) = parse_criteria(content)?;
        let listed = criteria.len();
        let selector: TrafficSelector = criteria.into_iter().collect();
        debug!(listed, kept = selector.len(), "loaded traffic selector");
        Ok(((), selector))
    }
}
