use super::{DomainError, Scalar, ScalarDomain, SemanticDomain};
use chrono::{NaiveTime, Weekday};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

/// Weekly maintenance window `ddd:hh24:mi-ddd:hh24:mi`, e.g. `sun:04:00-sun:06:30`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OnceAWeekWindow;

/// Tri-state weekly window
pub type OnceAWeekWindowValue = Scalar<OnceAWeekWindow>;

/// One end of a weekly window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WeeklyTime {
    pub day: Weekday,
    pub time: NaiveTime,
}

/// A parsed weekly window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WeeklyWindow {
    pub start: WeeklyTime,
    pub end: WeeklyTime,
}

impl fmt::Display for WeeklyTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let day = self.day.to_string().to_lowercase();
        write!(f, "{}:{}", day, self.time.format("%H:%M"))
    }
}

impl fmt::Display for WeeklyWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

static WINDOW: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)^(mon|tue|wed|thu|fri|sat|sun):([01]\d|2[0-3]):([0-5]\d)-(mon|tue|wed|thu|fri|sat|sun):([01]\d|2[0-3]):([0-5]\d)$",
    )
    .unwrap_or_else(|e| panic!("invalid window pattern: {e}"))
});

impl ScalarDomain for OnceAWeekWindow {
    const NAME: &'static str = "OnceAWeekWindow";

    type Parsed = WeeklyWindow;
    type Error = DomainError;

    fn parse(raw: &str) -> Result<WeeklyWindow, DomainError> {
        let invalid = || {
            DomainError::new(format!(
                "{:?} must satisfy the format of \"ddd:hh24:mi-ddd:hh24:mi\"",
                raw
            ))
        };
        let caps = WINDOW.captures(raw).ok_or_else(invalid)?;
        let end_point = |day: usize| -> Result<WeeklyTime, DomainError> {
            let weekday = caps[day].parse::<Weekday>().map_err(|_| invalid())?;
            let hour = caps[day + 1].parse().map_err(|_| invalid())?;
            let minute = caps[day + 2].parse().map_err(|_| invalid())?;
            let time = NaiveTime::from_hms_opt(hour, minute, 0).ok_or_else(invalid)?;
            Ok(WeeklyTime { day: weekday, time })
        };
        Ok(WeeklyWindow {
            start: end_point(1)?,
            end: end_point(4)?,
        })
    }
}

impl SemanticDomain for OnceAWeekWindow {
    fn equivalent(a: &str, b: &str) -> bool {
        a.eq_ignore_ascii_case(b)
    }
}
