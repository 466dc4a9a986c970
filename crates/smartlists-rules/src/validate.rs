//! Advisory input validation and the string helpers shared with the
//! compiler.
//!
//! Validation is meant for editors: it answers whether a raw parameter string
//! looks right for a field. The compiler never calls it.

use crate::field::{Field, Validator};

/// Separator used between multiple parameters in a single input string.
pub const PARAMETER_SEPARATOR: &str = " / ";

/// Check a raw input string against the validator of `field`.
///
/// The input is split on `" / "` and every part must pass. Fields without a
/// validator accept any input.
pub fn validate(field: Field, input: &str) -> bool {
    let Some(validator) = field.validator() else {
        return true;
    };
    input
        .split(PARAMETER_SEPARATOR)
        .all(|value| check(validator, value))
}

fn check(validator: Validator, value: &str) -> bool {
    let value = value.trim();
    match validator {
        Validator::Rating => value
            .parse::<f64>()
            .map(|rating| (0.0..=10.0).contains(&rating))
            .unwrap_or(false),
        Validator::Count => value.parse::<u64>().is_ok(),
        Validator::Time => time_string_to_seconds(value).is_some(),
    }
}

/// Convert a time string to seconds.
///
/// Accepts `"<n> min"`, `h:m:s`, `m:s` and plain seconds. Returns `None` for
/// anything else.
pub fn time_string_to_seconds(value: &str) -> Option<u64> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Some(minutes) = value.strip_suffix("min") {
        return minutes
            .trim()
            .parse::<u64>()
            .ok()
            .and_then(|m| m.checked_mul(60));
    }

    let parts: Vec<&str> = value.split(':').collect();
    if parts.len() > 3 {
        return None;
    }
    parts.iter().try_fold(0u64, |secs, part| {
        let part = part.trim();
        let n = part.parse::<u64>().ok()?;
        secs.checked_mul(60)?.checked_add(n)
    })
}

/// Length of a relative date period such as `"2 weeks"`, in days.
///
/// The unit is recognized by prefix: `wee` (7 days), `mon` (31 days), `yea`
/// (365 days). Any other unit, or none, means days. An unparsable count
/// yields zero; periods too long to represent saturate.
pub fn period_in_days(period: &str) -> i64 {
    let period = period.trim();
    let split = period
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(period.len());
    let (count, unit) = period.split_at(split);
    let count: i64 = count.parse().unwrap_or(0);

    let unit = unit.trim().to_ascii_lowercase();
    let multiplier = if unit.starts_with("wee") {
        7
    } else if unit.starts_with("mon") {
        31
    } else if unit.starts_with("yea") {
        365
    } else {
        1
    };
    count.saturating_mul(multiplier)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rating_bounds() {
        assert!(validate(Field::Rating, "7.5"));
        assert!(validate(Field::Rating, "0"));
        assert!(validate(Field::Rating, "10"));
        assert!(!validate(Field::Rating, "11"));
        assert!(!validate(Field::Rating, "-1"));
        assert!(!validate(Field::Rating, "good"));
    }

    #[test]
    fn counts_are_non_negative_integers() {
        assert!(validate(Field::PlayCount, "3"));
        assert!(validate(Field::Year, "1999 / 2004"));
        assert!(!validate(Field::Year, "1999 / soon"));
        assert!(!validate(Field::Season, "-2"));
        assert!(!validate(Field::TrackNumber, "1.5"));
    }

    #[test]
    fn unvalidated_fields_accept_anything() {
        assert!(validate(Field::Genre, "anything at all"));
        assert!(validate(Field::LastPlayed, ""));
    }

    #[test]
    fn time_strings() {
        assert_eq!(time_string_to_seconds("90"), Some(90));
        assert_eq!(time_string_to_seconds("3:30"), Some(210));
        assert_eq!(time_string_to_seconds("1:02:03"), Some(3723));
        assert_eq!(time_string_to_seconds("5 min"), Some(300));
        assert_eq!(time_string_to_seconds("5min"), Some(300));
        assert_eq!(time_string_to_seconds("1:2:3:4"), None);
        assert_eq!(time_string_to_seconds("soon"), None);
        assert_eq!(time_string_to_seconds(""), None);
        assert!(validate(Field::Time, "3:30 / 4:00"));
        assert!(!validate(Field::Time, "3:xx"));
    }

    #[test]
    fn periods() {
        assert_eq!(period_in_days("3"), 3);
        assert_eq!(period_in_days("3 days"), 3);
        assert_eq!(period_in_days("2 weeks"), 14);
        assert_eq!(period_in_days("1 month"), 31);
        assert_eq!(period_in_days("2 years"), 730);
        assert_eq!(period_in_days("someday"), 0);
    }

    #[test]
    fn oversized_inputs_do_not_overflow() {
        assert_eq!(time_string_to_seconds("307445734561825861 min"), None);
        assert_eq!(time_string_to_seconds("18446744073709551615:00:00"), None);
        assert!(!validate(Field::Time, "307445734561825861 min"));
        assert_eq!(period_in_days("9223372036854775807 years"), i64::MAX);
        assert_eq!(period_in_days("9223372036854775807 weeks"), i64::MAX);
    }
}
