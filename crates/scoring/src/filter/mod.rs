//! Compact handicap filter queries such as `Laser<1000PY`,
//! `Cruiser=1.2IRC` or `Dinghy between 900 and 1100 PY`.

pub mod apply;
pub mod parser;

use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;

use crate::models::HandicapTag;

pub use apply::{apply_filter, refine};
pub use parser::parse;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterOp {
    LessThan,
    Equal,
    GreaterThan,
    Between,
}

impl FilterOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LessThan => "<",
            Self::Equal => "=",
            Self::GreaterThan => ">",
            Self::Between => "between",
        }
    }
}

impl fmt::Display for FilterOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Comparison against a class rating. `Between` is inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Comparison {
    LessThan(Decimal),
    Equal(Decimal),
    GreaterThan(Decimal),
    Between(Decimal, Decimal),
}

impl Comparison {
    pub fn op(&self) -> FilterOp {
        match self {
            Self::LessThan(_) => FilterOp::LessThan,
            Self::Equal(_) => FilterOp::Equal,
            Self::GreaterThan(_) => FilterOp::GreaterThan,
            Self::Between(_, _) => FilterOp::Between,
        }
    }

    pub fn value1(&self) -> Decimal {
        match *self {
            Self::LessThan(v) | Self::Equal(v) | Self::GreaterThan(v) | Self::Between(v, _) => v,
        }
    }

    pub fn value2(&self) -> Option<Decimal> {
        match *self {
            Self::Between(_, upper) => Some(upper),
            _ => None,
        }
    }

    pub fn matches(&self, rating: Decimal) -> bool {
        match *self {
            Self::LessThan(v) => rating < v,
            Self::Equal(v) => rating == v,
            Self::GreaterThan(v) => rating > v,
            Self::Between(lower, upper) => rating >= lower && rating <= upper,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HandicapFilter {
    pub class_name: String,
    pub comparison: Comparison,
    pub tag: HandicapTag,
}

impl std::str::FromStr for HandicapFilter {
    type Err = crate::error::ScoringError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}
