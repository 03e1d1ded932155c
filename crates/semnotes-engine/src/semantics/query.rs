use std::cmp::Ordering;

use crate::models::{ComparisonOperator, Property};

/// Whether a note with `source` properties satisfies a query made of
/// `query` properties.
///
/// Every query property needs at least one source property with the same
/// key that it accepts. Only the first value on each side is compared,
/// except that `between` reads its low and high bounds from the first two
/// query values. An empty query matches anything.
pub fn match_notes(source: &[Property], query: &[Property]) -> bool {
    query
        .iter()
        .all(|wanted| source.iter().any(|real| match_property(real, wanted)))
}

fn match_property(real: &Property, wanted: &Property) -> bool {
    if real.key != wanted.key {
        return false;
    }
    let real_value = real.values.first().map(String::as_str);
    let wanted_value = wanted.values.first().map(String::as_str);

    match &wanted.operator {
        ComparisonOperator::Is => real_value == wanted_value,
        ComparisonOperator::IsNot => real_value != wanted_value,
        ComparisonOperator::Contains => {
            matches!((real_value, wanted_value), (Some(r), Some(w)) if r.contains(w))
        }
        ComparisonOperator::DoesNotContain => {
            matches!((real_value, wanted_value), (Some(r), Some(w)) if !r.contains(w))
        }
        ComparisonOperator::GreaterThan => compare_numbers(real_value, wanted_value, |r, w| r > w),
        ComparisonOperator::LessThan => compare_numbers(real_value, wanted_value, |r, w| r < w),
        ComparisonOperator::GreaterOrEqual => {
            compare_numbers(real_value, wanted_value, |r, w| r >= w)
        }
        ComparisonOperator::LessOrEqual => compare_numbers(real_value, wanted_value, |r, w| r <= w),
        ComparisonOperator::IsAfter => order_values(real_value, wanted_value, Ordering::is_gt),
        ComparisonOperator::IsBefore => order_values(real_value, wanted_value, Ordering::is_lt),
        ComparisonOperator::Between => match wanted.values.as_slice() {
            [low, high, ..] => {
                order_values(real_value, Some(low.as_str()), Ordering::is_ge)
                    && order_values(real_value, Some(high.as_str()), Ordering::is_le)
            }
            _ => false,
        },
        // No distance model for places
        ComparisonOperator::IsNear | ComparisonOperator::Other(_) => false,
    }
}

/// Orders numerically when both sides are numbers, otherwise as trimmed
/// strings (ISO dates sort correctly that way).
fn order_values(real: Option<&str>, wanted: Option<&str>, accept: fn(Ordering) -> bool) -> bool {
    let (Some(real), Some(wanted)) = (real.map(str::trim), wanted.map(str::trim)) else {
        return false;
    };
    let ordering = match (real.parse::<f64>(), wanted.parse::<f64>()) {
        (Ok(r), Ok(w)) => r.partial_cmp(&w),
        _ => Some(real.cmp(wanted)),
    };
    ordering.is_some_and(accept)
}

fn compare_numbers(real: Option<&str>, wanted: Option<&str>, cmp: fn(f64, f64) -> bool) -> bool {
    let parse = |v: Option<&str>| v.and_then(|s| s.trim().parse::<f64>().ok());
    match (parse(real), parse(wanted)) {
        (Some(r), Some(w)) => cmp(r, w),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn prop(key: &str, operator: &str, value: &str) -> Property {
        Property::new(key, operator.into(), [value])
    }

    #[rstest]
    #[case("is", "done", "done", true)]
    #[case("is", "done", "todo", false)]
    #[case("is not", "done", "todo", true)]
    #[case("is not", "done", "done", false)]
    #[case("contains", "in progress", "prog", true)]
    #[case("contains", "done", "prog", false)]
    #[case("does not contain", "done", "prog", true)]
    #[case(">", "150", "100", true)]
    #[case(">", "50", "100", false)]
    #[case("is greater than", "150", "100", true)]
    #[case("<", "50", "100", true)]
    #[case(">=", "100", "100", true)]
    #[case("<=", "100.5", "100", false)]
    #[case(">", "cheap", "100", false)]
    #[case("~=", "done", "done", false)]
    #[case("is after", "2024-03-01", "2024-01-15", true)]
    #[case("is after", "2023-12-31", "2024-01-15", false)]
    #[case("is before", "2023-12-31", "2024-01-15", true)]
    #[case("is before", "9", "10", true)]
    #[case("is near", "harbour", "harbour", false)]
    fn single_property(
        #[case] operator: &str,
        #[case] real: &str,
        #[case] wanted: &str,
        #[case] expected: bool,
    ) {
        let source = [prop("status", "is", real)];
        let query = [prop("status", operator, wanted)];
        assert_eq!(match_notes(&source, &query), expected);
    }

    #[rstest]
    #[case("15", true)]
    #[case("10", true)]
    #[case("20", true)]
    #[case("9.5", false)]
    #[case("21", false)]
    fn between_is_inclusive(#[case] real: &str, #[case] expected: bool) {
        let source = [prop("price", "is", real)];
        let query = [Property::new("price", ComparisonOperator::Between, ["10", "20"])];
        assert_eq!(match_notes(&source, &query), expected);
    }

    #[test]
    fn between_needs_both_bounds() {
        let source = [prop("price", "is", "15")];
        assert!(!match_notes(&source, &[prop("price", "between", "10")]));
    }

    #[test]
    fn keys_must_match() {
        let source = [prop("price", "is", "10")];
        assert!(!match_notes(&source, &[prop("cost", "is", "10")]));
    }

    #[test]
    fn every_query_property_needs_a_match() {
        let source = [prop("price", "is", "120"), prop("color", "is", "red")];
        assert!(match_notes(
            &source,
            &[prop("price", ">", "100"), prop("color", "is", "red")]
        ));
        assert!(!match_notes(
            &source,
            &[prop("price", ">", "100"), prop("color", "is", "blue")]
        ));
    }

    #[test]
    fn any_source_property_may_satisfy() {
        let source = [prop("tag", "is", "a"), prop("tag", "is", "b")];
        assert!(match_notes(&source, &[prop("tag", "is", "b")]));
    }

    #[test]
    fn empty_query_matches_everything() {
        assert!(match_notes(&[], &[]));
        assert!(match_notes(&[prop("a", "is", "b")], &[]));
    }

    #[test]
    fn only_first_value_is_compared() {
        let source = [Property::new("size", ComparisonOperator::Is, ["s", "m"])];
        assert!(match_notes(&source, &[prop("size", "is", "s")]));
        assert!(!match_notes(&source, &[prop("size", "is", "m")]));
    }
}
