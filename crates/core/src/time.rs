//! SRT timestamps (`HH:MM:SS,mmm`) and time-of-day arithmetic.
//! Only the time of day is tracked, so every shift wraps around midnight.

use crate::error::{Error, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Separator between the start and end time on a timing line.
pub const TIME_DELIMITER: &str = " --> ";

const MS_PER_SECOND: i64 = 1000;
const MS_PER_MINUTE: i64 = 60 * MS_PER_SECOND;
const MS_PER_HOUR: i64 = 60 * MS_PER_MINUTE;
const MS_PER_DAY: i64 = 24 * MS_PER_HOUR;

static TIME_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([01][0-9]|2[0-3]):([0-5][0-9]):([0-5][0-9]),([0-9]{3})$")
        .expect("time pattern is valid")
});

/// Field of a timestamp that a shift is applied to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeUnit {
    Hour,
    Minute,
    Second,
    Millisecond,
}

impl TimeUnit {
    fn millis(self) -> i64 {
        match self {
            TimeUnit::Hour => MS_PER_HOUR,
            TimeUnit::Minute => MS_PER_MINUTE,
            TimeUnit::Second => MS_PER_SECOND,
            TimeUnit::Millisecond => 1,
        }
    }
}

/// A time of day with millisecond resolution, stored as milliseconds since
/// midnight.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SrtTime(u32);

impl SrtTime {
    pub const MIDNIGHT: SrtTime = SrtTime(0);

    /// Build a time from its fields, rejecting out-of-range values.
    pub fn from_hms_milli(hour: u32, minute: u32, second: u32, milli: u32) -> Option<Self> {
        if hour > 23 || minute > 59 || second > 59 || milli > 999 {
            return None;
        }
        let ms = ((hour * 60 + minute) * 60 + second) * 1000 + milli;
        Some(SrtTime(ms))
    }

    /// Build a time from a millisecond offset, wrapping at 24 hours.
    pub fn from_millis(ms: i64) -> Self {
        SrtTime(ms.rem_euclid(MS_PER_DAY) as u32)
    }

    pub fn as_millis(self) -> u32 {
        self.0
    }

    pub fn hour(self) -> u32 {
        self.0 / MS_PER_HOUR as u32
    }

    pub fn minute(self) -> u32 {
        (self.0 % MS_PER_HOUR as u32) / MS_PER_MINUTE as u32
    }

    pub fn second(self) -> u32 {
        (self.0 % MS_PER_MINUTE as u32) / MS_PER_SECOND as u32
    }

    pub fn millisecond(self) -> u32 {
        self.0 % MS_PER_SECOND as u32
    }

    /// `(hour, minute, second, millisecond)`.
    pub fn components(self) -> (u32, u32, u32, u32) {
        (self.hour(), self.minute(), self.second(), self.millisecond())
    }

    /// Add `delta` units of `unit`, carrying into the other fields and
    /// wrapping at midnight in either direction.
    pub fn shift(self, unit: TimeUnit, delta: i32) -> Self {
        SrtTime::from_millis(i64::from(self.0) + i64::from(delta) * unit.millis())
    }
}

impl fmt::Display for SrtTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (h, m, s, ms) = self.components();
        write!(f, "{h:02}:{m:02}:{s:02},{ms:03}")
    }
}

impl FromStr for SrtTime {
    type Err = Error;

    /// Parse an exact `HH:MM:SS,mmm` string.
    fn from_str(s: &str) -> Result<Self> {
        let caps = TIME_PATTERN
            .captures(s)
            .ok_or_else(|| Error::InvalidTime(s.to_string()))?;
        let field = |i: usize| -> Result<u32> {
            caps[i]
                .parse()
                .map_err(|_| Error::InvalidTime(s.to_string()))
        };
        SrtTime::from_hms_milli(field(1)?, field(2)?, field(3)?, field(4)?)
            .ok_or_else(|| Error::InvalidTime(s.to_string()))
    }
}

impl TryFrom<String> for SrtTime {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<SrtTime> for String {
    fn from(time: SrtTime) -> Self {
        time.to_string()
    }
}

/// Render a time as `HH:MM:SS,mmm`.
pub fn format(time: SrtTime) -> String {
    time.to_string()
}

/// Parse a time from `HH:MM:SS,mmm`.
pub fn parse(s: &str) -> Result<SrtTime> {
    s.parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(s: &str) -> SrtTime {
        s.parse().unwrap()
    }

    #[test]
    fn formats_zero_padded() {
        let time = SrtTime::from_hms_milli(1, 2, 3, 4).unwrap();
        assert_eq!(format(time), "01:02:03,004");
        assert_eq!(SrtTime::MIDNIGHT.to_string(), "00:00:00,000");
        assert_eq!(SrtTime::from_millis(-1).to_string(), "23:59:59,999");
    }

    #[test]
    fn parses_exact_pattern() {
        let time = t("00:11:24,600");
        assert_eq!(time.components(), (0, 11, 24, 600));
        assert_eq!(time.as_millis(), 684_600);
        assert_eq!(parse("23:59:59,999").unwrap().to_string(), "23:59:59,999");
    }

    #[test]
    fn rejects_deviations() {
        for bad in [
            "00:11:24.600",
            "0:11:24,600",
            "00:11:24,60",
            "00:11:24,6000",
            "00-11-24,600",
            " 00:11:24,600",
            "00:11:24,600 ",
            "aa:11:24,600",
            "24:00:00,000",
            "00:60:00,000",
            "00:00:60,000",
            "",
        ] {
            let err = parse(bad).unwrap_err();
            assert!(matches!(err, Error::InvalidTime(_)), "accepted {bad:?}");
        }
    }

    #[test]
    fn shift_carries_between_fields() {
        assert_eq!(t("00:11:24,600").shift(TimeUnit::Minute, -2), t("00:09:24,600"));
        assert_eq!(t("00:00:24,600").shift(TimeUnit::Hour, 13), t("13:00:24,600"));
        assert_eq!(t("00:00:24,600").shift(TimeUnit::Second, 2), t("00:00:26,600"));
        assert_eq!(t("00:00:24,600").shift(TimeUnit::Millisecond, -200), t("00:00:24,400"));
        assert_eq!(t("00:00:59,900").shift(TimeUnit::Millisecond, 250), t("00:01:00,150"));
        assert_eq!(t("00:59:30,000").shift(TimeUnit::Second, 45), t("01:00:15,000"));
    }

    #[test]
    fn shift_wraps_at_midnight() {
        assert_eq!(t("00:00:24,600").shift(TimeUnit::Minute, -2), t("23:58:24,600"));
        assert_eq!(t("23:30:00,000").shift(TimeUnit::Hour, 1), t("00:30:00,000"));
        assert_eq!(t("12:00:00,000").shift(TimeUnit::Hour, 48), t("12:00:00,000"));
    }

    #[test]
    fn serializes_as_string() {
        let json = serde_json::to_string(&t("01:02:03,004")).unwrap();
        assert_eq!(json, "\"01:02:03,004\"");
        let back: SrtTime = serde_json::from_str(&json).unwrap();
        assert_eq!(back, t("01:02:03,004"));
        assert!(serde_json::from_str::<SrtTime>("\"1:2:3,4\"").is_err());
    }
}
