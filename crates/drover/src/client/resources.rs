use nom::branch::alt;
use nom::bytes::complete::{tag, take_while1};
use nom::character::complete::{char, digit1, multispace0};
use nom::combinator::{cut, map, map_res, opt};
use nom::multi::separated_list1;
use nom::sequence::{delimited, pair, preceded, separated_pair, terminated, tuple};

use drover_core::resources::{
    FRACTIONS_MAX_DIGITS, MAX_RESOURCE_UNITS, Resource, ResourceAmount, ResourceValue,
    Resources, ValueRange, ValueRanges, ValueSet,
};

use crate::common::parser::{NomResult, consume_all, p_u64};

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '/' | '.')
}

fn p_name(input: &str) -> NomResult<&str> {
    take_while1(is_name_char)(input)
}

fn p_role(input: &str) -> NomResult<&str> {
    alt((tag("*"), p_name))(input)
}

/// `(role)` or `(role,shared)`
fn p_reservation(input: &str) -> NomResult<(&str, bool)> {
    delimited(
        char('('),
        pair(
            delimited(multispace0, p_role, multispace0),
            map(
                opt(preceded(
                    pair(char(','), multispace0),
                    terminated(tag("shared"), multispace0),
                )),
                |shared| shared.is_some(),
            ),
        ),
        char(')'),
    )(input)
}

pub fn p_amount(input: &str) -> NomResult<ResourceAmount> {
    map_res(
        pair(digit1, opt(preceded(char('.'), digit1))),
        |(units, fractions): (&str, Option<&str>)| -> anyhow::Result<ResourceAmount> {
            let units: u64 = units.parse()?;
            let fractions = match fractions {
                None => 0,
                Some(digits) if digits.len() <= FRACTIONS_MAX_DIGITS => {
                    format!("{digits:0<FRACTIONS_MAX_DIGITS$}").parse::<u32>()?
                }
                Some(_) => anyhow::bail!(
                    "Resource amount can have at most {FRACTIONS_MAX_DIGITS} decimal digits"
                ),
            };
            if units > MAX_RESOURCE_UNITS || (units == MAX_RESOURCE_UNITS && fractions > 0) {
                anyhow::bail!("Resource amount is too large");
            }
            Ok(ResourceAmount::new(units, fractions))
        },
    )(input)
}

/// `a-b` or a single value `a`
fn p_range(input: &str) -> NomResult<ValueRange> {
    map_res(
        pair(p_u64, opt(preceded(char('-'), p_u64))),
        |(begin, end)| -> anyhow::Result<ValueRange> {
            let end = end.unwrap_or(begin);
            if begin > end {
                anyhow::bail!("Range start {begin} is greater than its end {end}");
            }
            Ok(ValueRange::new(begin, end))
        },
    )(input)
}

// Once the opening bracket matches, errors are not recovered by other value kinds
fn p_ranges(input: &str) -> NomResult<ValueRanges> {
    map(
        preceded(
            char('['),
            cut(terminated(
                separated_list1(char(','), delimited(multispace0, p_range, multispace0)),
                char(']'),
            )),
        ),
        |ranges| ValueRanges::new(ranges),
    )(input)
}

fn p_set(input: &str) -> NomResult<ValueSet> {
    map(
        preceded(
            char('{'),
            cut(terminated(
                separated_list1(char(','), delimited(multispace0, p_name, multispace0)),
                char('}'),
            )),
        ),
        |items| ValueSet::new(items),
    )(input)
}

fn p_value(input: &str) -> NomResult<ResourceValue> {
    alt((
        map(p_ranges, ResourceValue::Ranges),
        map(p_set, ResourceValue::Set),
        map(p_amount, ResourceValue::Scalar),
    ))(input)
}

/// `name[(role[,shared])]:value`
fn p_resource(input: &str) -> NomResult<Resource> {
    map(
        separated_pair(
            pair(p_name, opt(p_reservation)),
            tuple((multispace0, char(':'), multispace0)),
            p_value,
        ),
        |((name, reservation), value)| {
            let resource = Resource::new(name, value);
            match reservation {
                None => resource,
                Some((role, false)) => resource.with_role(role),
                Some((role, true)) => resource.with_role(role).into_shared(),
            }
        },
    )(input)
}

fn p_resources(input: &str) -> NomResult<Resources> {
    map(
        delimited(
            multispace0,
            terminated(
                separated_list1(tuple((multispace0, char(';'), multispace0)), p_resource),
                opt(pair(multispace0, char(';'))),
            ),
            multispace0,
        ),
        |items| items.into_iter().collect(),
    )(input)
}

/// Parses a `;` separated list of resources, e.g.
/// `cpus:4;mem(web):512;ports:[31000-32000];disk(*,shared):100`.
/// An empty (or whitespace only) input yields no resources.
pub fn parse_resources(input: &str) -> anyhow::Result<Resources> {
    if input.trim().is_empty() {
        return Ok(Resources::new());
    }
    consume_all(p_resources, input)
}

pub fn parse_resource(input: &str) -> anyhow::Result<Resource> {
    consume_all(p_resource, input.trim())
}
