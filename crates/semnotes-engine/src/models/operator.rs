use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Operator of a property widget.
///
/// `Is` asserts a concrete value; every other operator turns the note into
/// a query ("imaginary" note). Unknown operator strings are preserved in
/// `Other` so they survive a parse/serialize round trip.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ComparisonOperator {
    Is,
    IsNot,
    Contains,
    DoesNotContain,
    GreaterThan,
    LessThan,
    GreaterOrEqual,
    LessOrEqual,
    /// Proximity, typically of places
    IsNear,
    IsAfter,
    IsBefore,
    /// Inclusive range; takes two values, low then high
    Between,
    Other(String),
}

impl ComparisonOperator {
    /// Canonical attribute spelling.
    pub fn as_str(&self) -> &str {
        match self {
            ComparisonOperator::Is => "is",
            ComparisonOperator::IsNot => "is not",
            ComparisonOperator::Contains => "contains",
            ComparisonOperator::DoesNotContain => "does not contain",
            ComparisonOperator::GreaterThan => ">",
            ComparisonOperator::LessThan => "<",
            ComparisonOperator::GreaterOrEqual => ">=",
            ComparisonOperator::LessOrEqual => "<=",
            ComparisonOperator::IsNear => "is near",
            ComparisonOperator::IsAfter => "is after",
            ComparisonOperator::IsBefore => "is before",
            ComparisonOperator::Between => "between",
            ComparisonOperator::Other(op) => op,
        }
    }

    /// Symbol shown between key and values inside a rendered widget.
    pub fn symbol(&self) -> &str {
        match self {
            ComparisonOperator::Is => ":",
            ComparisonOperator::IsNot => "≠",
            ComparisonOperator::Contains => "∋",
            ComparisonOperator::DoesNotContain => "∌",
            ComparisonOperator::IsNear => "≈",
            ComparisonOperator::IsAfter => ">",
            ComparisonOperator::IsBefore => "<",
            ComparisonOperator::Between => "↔",
            other => other.as_str(),
        }
    }

    /// True only for `is`, the single operator that states a fact rather
    /// than a query.
    pub fn is_equality(&self) -> bool {
        matches!(self, ComparisonOperator::Is)
    }
}

impl FromStr for ComparisonOperator {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "is" => ComparisonOperator::Is,
            "is not" => ComparisonOperator::IsNot,
            "contains" => ComparisonOperator::Contains,
            "does not contain" => ComparisonOperator::DoesNotContain,
            ">" | "is greater than" | "greater than" => ComparisonOperator::GreaterThan,
            "<" | "is less than" | "less than" => ComparisonOperator::LessThan,
            ">=" => ComparisonOperator::GreaterOrEqual,
            "<=" => ComparisonOperator::LessOrEqual,
            "is near" => ComparisonOperator::IsNear,
            "is after" => ComparisonOperator::IsAfter,
            "is before" => ComparisonOperator::IsBefore,
            "between" => ComparisonOperator::Between,
            other => ComparisonOperator::Other(other.to_string()),
        })
    }
}

impl From<&str> for ComparisonOperator {
    fn from(s: &str) -> Self {
        match s.parse() {
            Ok(op) => op,
            Err(never) => match never {},
        }
    }
}

impl From<String> for ComparisonOperator {
    fn from(s: String) -> Self {
        ComparisonOperator::from(s.as_str())
    }
}

impl From<ComparisonOperator> for String {
    fn from(op: ComparisonOperator) -> Self {
        match op {
            ComparisonOperator::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for ComparisonOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
