use lazy_static::lazy_static;
use regex::Regex;
use rust_decimal::Decimal;
use std::str::FromStr;

use super::{Comparison, HandicapFilter};
use crate::error::{Result, ScoringError};
use crate::models::HandicapTag;

lazy_static! {
    // <class><op><value>[ and <value>]<tag>
    static ref FILTER_PATTERN: Regex = Regex::new(concat!(
        r"(?i)^(?P<class>[^<=>]+?)",
        r"(?P<op><|=|>|\s+between\s+)",
        r"(?P<values>[\d.\s]+?(?:\s+and\s+[\d.\s]+?)?)",
        r"\s*(?P<tag>PY|IRC|YTC)$",
    ))
    .expect("filter pattern is a valid regex");
    static ref AND_SEPARATOR: Regex =
        Regex::new(r"(?i)\s+and\s+").expect("separator pattern is a valid regex");
}

/// Parses a handicap filter. Matching is case-insensitive and tolerates
/// whitespace around the operator and tag.
pub fn parse(text: &str) -> Result<HandicapFilter> {
    let input = text.trim();
    if input.is_empty() {
        return Err(ScoringError::MalformedFilter("filter is empty".to_string()));
    }

    let captures = FILTER_PATTERN.captures(input).ok_or_else(|| {
        ScoringError::MalformedFilter(format!(
            "'{}' does not match <class><op><value(s)><PY|IRC|YTC>",
            input
        ))
    })?;

    let class_name = captures["class"].trim().to_string();
    let tag = HandicapTag::from_str(&captures["tag"]).map_err(ScoringError::MalformedFilter)?;
    let values: Vec<&str> = AND_SEPARATOR
        .split(captures["values"].trim())
        .map(str::trim)
        .collect();

    let comparison = match (captures["op"].trim().to_lowercase().as_str(), values.as_slice()) {
        ("between", [lower, upper]) => Comparison::Between(number(lower)?, number(upper)?),
        ("between", _) => {
            return Err(ScoringError::MalformedFilter(
                "between requires two values separated by 'and'".to_string(),
            ));
        }
        (_, [_, _, ..]) => {
            return Err(ScoringError::MalformedFilter(
                "only between takes two values".to_string(),
            ));
        }
        ("<", [value]) => Comparison::LessThan(number(value)?),
        ("=", [value]) => Comparison::Equal(number(value)?),
        (">", [value]) => Comparison::GreaterThan(number(value)?),
        (op, _) => {
            return Err(ScoringError::MalformedFilter(format!("unknown operator '{}'", op)));
        }
    };

    Ok(HandicapFilter {
        class_name,
        comparison,
        tag,
    })
}

fn number(raw: &str) -> Result<Decimal> {
    Decimal::from_str(raw)
        .map_err(|_| ScoringError::MalformedFilter(format!("'{}' is not a number", raw)))
}
