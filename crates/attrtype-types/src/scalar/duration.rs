use super::{DomainError, Scalar, ScalarDomain, SemanticDomain};
use chrono::TimeDelta;

/// Signed duration such as `300ms`, `-1.5h` or `2h45m`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Duration;

/// Tri-state duration
pub type DurationValue = Scalar<Duration>;

const NANOSECOND: u128 = 1;
const MICROSECOND: u128 = 1_000 * NANOSECOND;
const MILLISECOND: u128 = 1_000 * MICROSECOND;
const SECOND: u128 = 1_000 * MILLISECOND;
const MINUTE: u128 = 60 * SECOND;
const HOUR: u128 = 60 * MINUTE;

impl ScalarDomain for Duration {
    const NAME: &'static str = "Duration";

    type Parsed = TimeDelta;
    type Error = DomainError;

    fn parse(raw: &str) -> Result<TimeDelta, DomainError> {
        let invalid = || DomainError::new(format!("time: invalid duration {:?}", raw));

        let (negative, mut rest) = match raw.as_bytes().first() {
            Some(b'-') => (true, &raw[1..]),
            Some(b'+') => (false, &raw[1..]),
            _ => (false, raw),
        };
        if rest == "0" {
            return Ok(TimeDelta::zero());
        }
        if rest.is_empty() {
            return Err(invalid());
        }

        let mut total: u128 = 0;
        while !rest.is_empty() {
            let (whole, after) = split_digits(rest);
            let (fraction, after) = match after.strip_prefix('.') {
                Some(after) => split_digits(after),
                None => ("", after),
            };
            if whole.is_empty() && fraction.is_empty() {
                return Err(invalid());
            }

            let unit_end = after
                .find(|c: char| c == '.' || c.is_ascii_digit())
                .unwrap_or(after.len());
            let (unit, after) = after.split_at(unit_end);
            let scale = match unit {
                "ns" => NANOSECOND,
                "us" | "\u{b5}s" | "\u{3bc}s" => MICROSECOND,
                "ms" => MILLISECOND,
                "s" => SECOND,
                "m" => MINUTE,
                "h" => HOUR,
                "" => {
                    return Err(DomainError::new(format!(
                        "time: missing unit in duration {:?}",
                        raw
                    )));
                }
                other => {
                    return Err(DomainError::new(format!(
                        "time: unknown unit {:?} in duration {:?}",
                        other, raw
                    )));
                }
            };

            let whole: u128 = if whole.is_empty() {
                0
            } else {
                whole.parse().map_err(|_| invalid())?
            };
            let mut nanos = whole.checked_mul(scale).ok_or_else(invalid)?;
            let mut digit_scale = scale;
            for digit in fraction.bytes() {
                digit_scale /= 10;
                if digit_scale == 0 {
                    break;
                }
                nanos = nanos
                    .checked_add(u128::from(digit - b'0') * digit_scale)
                    .ok_or_else(invalid)?;
            }
            total = total.checked_add(nanos).ok_or_else(invalid)?;
            rest = after;
        }

        let nanos = i64::try_from(total).map_err(|_| invalid())?;
        Ok(TimeDelta::nanoseconds(if negative { -nanos } else { nanos }))
    }
}

impl SemanticDomain for Duration {
    fn equivalent(a: &str, b: &str) -> bool {
        matches!((Self::parse(a), Self::parse(b)), (Ok(a), Ok(b)) if a == b)
    }
}

fn split_digits(s: &str) -> (&str, &str) {
    s.split_at(s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len()))
}
