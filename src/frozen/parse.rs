use std::str::FromStr;

use anyhow::{anyhow, bail};
use winnow::{
    ascii::{digit1, space0, space1},
    combinator::{alt, delimited, preceded},
    prelude::*,
    token::{take_till, take_while},
};

use crate::frozen::FrozenVersion;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Value<'a> {
    Str(&'a str),
    Int(u32),
    Bool(bool),
}

/// Pick the `pub const` items out of a generated version file, ignoring everything else.
pub(crate) fn frozen_version(text: &str) -> anyhow::Result<FrozenVersion> {
    let mut version = None;
    let mut numbers = [None::<u32>; 3];
    let mut flags = [None::<bool>; 2];
    for line in text.lines() {
        let Ok((name, value)) = constant.parse(line.trim()) else {
            continue;
        };
        match (name, value) {
            ("VERSION", Value::Str(v)) => version = Some(v.to_owned()),
            ("MAJOR", Value::Int(n)) => numbers[0] = Some(n),
            ("MINOR", Value::Int(n)) => numbers[1] = Some(n),
            ("BUGFIX", Value::Int(n)) => numbers[2] = Some(n),
            ("RELEASE", Value::Bool(b)) => flags[0] = Some(b),
            ("DEBUG", Value::Bool(b)) => flags[1] = Some(b),
            (name, value) => bail!("Unexpected value {value:?} for constant {name}"),
        }
    }

    let missing = |name: &str| anyhow!("Constant {name} is missing");
    let frozen = version.ok_or_else(|| missing("VERSION"))?;
    Ok(FrozenVersion {
        version: frozen.clone(),
        frozen,
        major: numbers[0].ok_or_else(|| missing("MAJOR"))?,
        minor: numbers[1].ok_or_else(|| missing("MINOR"))?,
        bugfix: numbers[2].ok_or_else(|| missing("BUGFIX"))?,
        release: flags[0].ok_or_else(|| missing("RELEASE"))?,
        debug: flags[1].ok_or_else(|| missing("DEBUG"))?,
    })
}

/// `pub const NAME: <type> = <value>;`
fn constant<'a>(i: &mut &'a str) -> ModalResult<(&'a str, Value<'a>)> {
    (
        preceded(
            ("pub", space1, "const", space1),
            take_while(1.., |c: char| c.is_ascii_uppercase() || c == '_'),
        ),
        preceded((space0, ":", space0), take_till(1.., |c: char| c == ' ' || c == '=')),
        preceded((space0, "=", space0), value),
        (space0, ";"),
    )
        .map(|(name, _type, value, _semicolon)| (name, value))
        .parse_next(i)
}

fn value<'a>(i: &mut &'a str) -> ModalResult<Value<'a>> {
    alt((
        delimited('"', take_till(0.., '"'), '"').map(Value::Str),
        "true".value(Value::Bool(true)),
        "false".value(Value::Bool(false)),
        digit1.try_map(u32::from_str).map(Value::Int),
    ))
    .parse_next(i)
}
