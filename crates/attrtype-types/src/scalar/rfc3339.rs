use super::{DomainError, Scalar, ScalarDomain, SemanticDomain};
use chrono::{DateTime, FixedOffset};
use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use std::fmt;

/// RFC 3339 calendar timestamp such as `2023-06-01T12:00:00Z`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Timestamp;

/// Tri-state timestamp
pub type TimestampValue = Scalar<Timestamp>;

impl ScalarDomain for Timestamp {
    const NAME: &'static str = "RFC3339";

    type Parsed = DateTime<FixedOffset>;
    type Error = chrono::ParseError;

    fn parse(raw: &str) -> Result<DateTime<FixedOffset>, chrono::ParseError> {
        DateTime::parse_from_rfc3339(raw)
    }
}

impl SemanticDomain for Timestamp {
    fn equivalent(a: &str, b: &str) -> bool {
        matches!((Self::parse(a), Self::parse(b)), (Ok(a), Ok(b)) if a == b)
    }
}

/// ISO 8601 duration such as `P1Y2M10DT2H30M` or `P3W`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CalendarDuration;

/// Tri-state calendar duration
pub type CalendarDurationValue = Scalar<CalendarDuration>;

/// Components of a parsed ISO 8601 duration
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct IsoDuration {
    pub years: u32,
    pub months: u32,
    pub weeks: u32,
    pub days: u32,
    pub hours: u32,
    pub minutes: u32,
    /// Seconds, possibly fractional
    pub seconds: Decimal,
}

impl IsoDuration {
    /// Check if every component is zero
    pub fn is_zero(&self) -> bool {
        *self == Self::default()
    }
}

impl fmt::Display for IsoDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.weeks > 0 {
            return write!(f, "P{}W", self.weeks);
        }
        write!(f, "P")?;
        for (n, unit) in [(self.years, 'Y'), (self.months, 'M'), (self.days, 'D')] {
            if n > 0 {
                write!(f, "{}{}", n, unit)?;
            }
        }
        if self.hours > 0 || self.minutes > 0 || !self.seconds.is_zero() {
            write!(f, "T")?;
            for (n, unit) in [(self.hours, 'H'), (self.minutes, 'M')] {
                if n > 0 {
                    write!(f, "{}{}", n, unit)?;
                }
            }
            if !self.seconds.is_zero() {
                write!(f, "{}S", self.seconds.normalize())?;
            }
        } else if self.years == 0 && self.months == 0 && self.days == 0 {
            write!(f, "T0S")?;
        }
        Ok(())
    }
}

static ISO_DURATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^P(?:(\d+)Y)?(?:(\d+)M)?(?:(\d+)D)?(?:T(?:(\d+)H)?(?:(\d+)M)?(?:(\d+(?:[.,]\d+)?)S)?)?$",
    )
    .unwrap_or_else(|e| panic!("invalid duration pattern: {e}"))
});

static ISO_WEEKS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^P(\d+)W$").unwrap_or_else(|e| panic!("invalid weeks pattern: {e}")));

impl ScalarDomain for CalendarDuration {
    const NAME: &'static str = "CalendarDuration";

    type Parsed = IsoDuration;
    type Error = DomainError;

    fn parse(raw: &str) -> Result<IsoDuration, DomainError> {
        let invalid = || DomainError::new(format!("invalid ISO 8601 duration {:?}", raw));

        if let Some(caps) = ISO_WEEKS.captures(raw) {
            return Ok(IsoDuration {
                weeks: caps[1].parse().map_err(|_| invalid())?,
                ..IsoDuration::default()
            });
        }

        let caps = ISO_DURATION.captures(raw).ok_or_else(invalid)?;
        if raw == "P" || raw.ends_with('T') {
            return Err(invalid());
        }
        let component = |i: usize| -> Result<u32, DomainError> {
            caps.get(i)
                .map_or(Ok(0), |m| m.as_str().parse().map_err(|_| invalid()))
        };
        let seconds = match caps.get(6) {
            Some(m) => m.as_str().replace(',', ".").parse().map_err(|_| invalid())?,
            None => Decimal::ZERO,
        };
        Ok(IsoDuration {
            years: component(1)?,
            months: component(2)?,
            weeks: 0,
            days: component(3)?,
            hours: component(4)?,
            minutes: component(5)?,
            seconds,
        })
    }
}
