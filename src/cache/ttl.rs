//! TTL Module
//!
//! Converts caller-supplied lifetimes into the engine's integer-seconds model.

use std::str::FromStr;

use chrono::{DateTime, Months, TimeDelta, Utc};

use crate::error::{CacheError, Result};

// == Interval ==
/// A calendar interval: whole months plus a signed time delta.
///
/// Months are applied first, so `P1M` means "same day next month" and its
/// length in seconds depends on the anchor date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval {
    months: i32,
    delta: TimeDelta,
}

impl Default for Interval {
    fn default() -> Self {
        Self::months(0)
    }
}

impl Interval {
    /// An interval of whole calendar months.
    pub fn months(months: i32) -> Self {
        Self {
            months,
            delta: TimeDelta::zero(),
        }
    }

    /// An interval of fixed length.
    pub fn from_delta(delta: TimeDelta) -> Self {
        Self { months: 0, delta }
    }

    /// Adds a fixed-length part to this interval, saturating at
    /// `TimeDelta::MIN` / `TimeDelta::MAX`.
    pub fn with_delta(self, delta: TimeDelta) -> Self {
        let bound = if delta < TimeDelta::zero() {
            TimeDelta::MIN
        } else {
            TimeDelta::MAX
        };
        Self {
            delta: self.delta.checked_add(&delta).unwrap_or(bound),
            ..self
        }
    }

    /// Returns the moment this interval ends when started at `start`,
    /// or None if the result falls outside the representable range.
    pub fn end_from(&self, start: DateTime<Utc>) -> Option<DateTime<Utc>> {
        self.shift_months(start)?.checked_add_signed(self.delta)
    }

    /// Number of whole seconds this interval spans from `now`.
    ///
    /// Saturates to `i64::MAX` / `i64::MIN` when calendar arithmetic overflows,
    /// in the direction of whichever step overflowed.
    pub fn seconds_from(&self, now: DateTime<Utc>) -> i64 {
        let Some(shifted) = self.shift_months(now) else {
            return saturated(self.months < 0);
        };
        match shifted.checked_add_signed(self.delta) {
            Some(end) => end.timestamp() - now.timestamp(),
            None => saturated(self.delta < TimeDelta::zero()),
        }
    }

    fn shift_months(&self, start: DateTime<Utc>) -> Option<DateTime<Utc>> {
        let months = Months::new(self.months.unsigned_abs());
        if self.months >= 0 {
            start.checked_add_months(months)
        } else {
            start.checked_sub_months(months)
        }
    }
}

fn saturated(negative: bool) -> i64 {
    if negative {
        i64::MIN
    } else {
        i64::MAX
    }
}

impl FromStr for Interval {
    type Err = CacheError;

    /// Parses an ISO-8601 duration such as `PT1S`, `P1M`, `P1Y2M3DT4H5M6S`
    /// or `P2W`, with an optional leading `-` to invert it.
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || CacheError::InvalidInterval(s.to_string());

        let (negative, rest) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };
        let rest = rest.strip_prefix('P').ok_or_else(invalid)?;
        let (date_part, time_part) = match rest.split_once('T') {
            Some((date, time)) if !time.is_empty() => (date, time),
            Some(_) => return Err(invalid()),
            None => (rest, ""),
        };
        if date_part.is_empty() && time_part.is_empty() {
            return Err(invalid());
        }

        let mut months: i64 = 0;
        let mut seconds: i64 = 0;

        for (value, unit) in components(date_part, "YMWD").ok_or_else(invalid)? {
            match unit {
                'Y' => months = add_scaled(months, value, 12).ok_or_else(invalid)?,
                'M' => months = add_scaled(months, value, 1).ok_or_else(invalid)?,
                'W' => seconds = add_scaled(seconds, value, 7 * 86_400).ok_or_else(invalid)?,
                _ => seconds = add_scaled(seconds, value, 86_400).ok_or_else(invalid)?,
            }
        }
        for (value, unit) in components(time_part, "HMS").ok_or_else(invalid)? {
            let scale = match unit {
                'H' => 3_600,
                'M' => 60,
                _ => 1,
            };
            seconds = add_scaled(seconds, value, scale).ok_or_else(invalid)?;
        }

        let months = i32::try_from(months).map_err(|_| invalid())?;
        let delta = TimeDelta::try_seconds(seconds).ok_or_else(invalid)?;
        Ok(if negative {
            Self {
                months: -months,
                delta: -delta,
            }
        } else {
            Self { months, delta }
        })
    }
}

/// Splits `7D` style segments. Units must appear at most once and in the
/// order given by `units`.
fn components(part: &str, units: &str) -> Option<Vec<(i64, char)>> {
    let mut out = Vec::new();
    let mut digits = String::new();
    let mut last_unit: Option<usize> = None;

    for c in part.chars() {
        if c.is_ascii_digit() {
            digits.push(c);
            continue;
        }
        let position = units.find(c)?;
        if digits.is_empty() || last_unit.is_some_and(|last| position <= last) {
            return None;
        }
        out.push((digits.parse().ok()?, c));
        digits.clear();
        last_unit = Some(position);
    }

    digits.is_empty().then_some(out)
}

fn add_scaled(total: i64, value: i64, scale: i64) -> Option<i64> {
    value.checked_mul(scale).and_then(|v| total.checked_add(v))
}

// == Ttl ==
/// A caller-supplied lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ttl {
    /// Whole seconds; zero or negative means already expired
    Seconds(i64),
    /// Calendar interval measured from "now"
    Interval(Interval),
}

impl From<i64> for Ttl {
    fn from(seconds: i64) -> Self {
        Ttl::Seconds(seconds)
    }
}

impl From<Interval> for Ttl {
    fn from(interval: Interval) -> Self {
        Ttl::Interval(interval)
    }
}

impl From<TimeDelta> for Ttl {
    fn from(delta: TimeDelta) -> Self {
        Ttl::Interval(Interval::from_delta(delta))
    }
}

/// Whole seconds only: sub-second precision is truncated, so anything
/// shorter than one second becomes `Seconds(0)` and counts as expired.
impl From<std::time::Duration> for Ttl {
    fn from(duration: std::time::Duration) -> Self {
        Ttl::Seconds(i64::try_from(duration.as_secs()).unwrap_or(i64::MAX))
    }
}

impl FromStr for Ttl {
    type Err = CacheError;

    /// Accepts either an integer number of seconds or an ISO-8601 duration.
    fn from_str(s: &str) -> Result<Self> {
        match s.parse::<i64>() {
            Ok(seconds) => Ok(Ttl::Seconds(seconds)),
            Err(_) => s.parse::<Interval>().map(Ttl::Interval),
        }
    }
}

// == Expiry ==
/// A normalized lifetime in the engine's terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expiry {
    /// Never expires (engine lifetime 0)
    Forever,
    /// Expires after this many seconds, always > 0
    Seconds(u64),
    /// Already expired; the key must be deleted instead of written
    Expired,
}

impl Expiry {
    /// Engine lifetime for a write, or None if nothing should be written.
    pub fn engine_seconds(&self) -> Option<u64> {
        match self {
            Expiry::Forever => Some(0),
            Expiry::Seconds(seconds) => Some(*seconds),
            Expiry::Expired => None,
        }
    }

    fn from_seconds(seconds: i64) -> Self {
        if seconds > 0 {
            Expiry::Seconds(seconds.unsigned_abs())
        } else {
            Expiry::Expired
        }
    }
}

// == Normalize ==
/// Normalizes a TTL against the current wall clock.
pub fn normalize(ttl: Option<&Ttl>) -> Expiry {
    normalize_at(ttl, Utc::now())
}

/// Normalizes a TTL against a fixed `now`, used once for both ends of an interval.
pub fn normalize_at(ttl: Option<&Ttl>, now: DateTime<Utc>) -> Expiry {
    match ttl {
        None => Expiry::Forever,
        Some(Ttl::Seconds(seconds)) => Expiry::from_seconds(*seconds),
        Some(Ttl::Interval(interval)) => Expiry::from_seconds(interval.seconds_from(now)),
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn anchor() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 31, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_absent_ttl_is_forever() {
        assert_eq!(normalize(None), Expiry::Forever);
        assert_eq!(Expiry::Forever.engine_seconds(), Some(0));
    }

    #[test]
    fn test_integer_ttl() {
        assert_eq!(normalize(Some(&Ttl::Seconds(60))), Expiry::Seconds(60));
        assert_eq!(normalize(Some(&Ttl::Seconds(0))), Expiry::Expired);
        assert_eq!(normalize(Some(&Ttl::Seconds(-1))), Expiry::Expired);
        assert_eq!(Expiry::Expired.engine_seconds(), None);
    }

    #[test]
    fn test_interval_ttl() {
        let ttl = Ttl::from(TimeDelta::seconds(90));
        assert_eq!(normalize_at(Some(&ttl), anchor()), Expiry::Seconds(90));

        let ttl = Ttl::from(TimeDelta::seconds(-5));
        assert_eq!(normalize_at(Some(&ttl), anchor()), Expiry::Expired);

        let ttl = Ttl::from(Interval::default());
        assert_eq!(normalize_at(Some(&ttl), anchor()), Expiry::Expired);
    }

    #[test]
    fn test_calendar_month_depends_on_anchor() {
        // Jan 31 + 1 month clamps to Feb 29 in a leap year
        let ttl = Ttl::from(Interval::months(1));
        assert_eq!(
            normalize_at(Some(&ttl), anchor()),
            Expiry::Seconds(29 * 86_400)
        );

        let march = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
        assert_eq!(normalize_at(Some(&ttl), march), Expiry::Seconds(31 * 86_400));
    }

    #[test]
    fn test_interval_overflow_saturates() {
        let far = Interval::months(i32::MAX);
        assert_eq!(far.seconds_from(anchor()), i64::MAX);
        assert_eq!(
            normalize_at(Some(&Ttl::Interval(far)), anchor()),
            Expiry::Seconds(i64::MAX as u64)
        );

        let past = Interval::months(i32::MIN);
        assert_eq!(normalize_at(Some(&Ttl::Interval(past)), anchor()), Expiry::Expired);
    }

    #[test]
    fn test_interval_overflow_follows_delta_sign() {
        // Months land in range, the delta pushes the end far into the past
        let past = Interval::months(1).with_delta(TimeDelta::MIN);
        assert_eq!(past.seconds_from(anchor()), i64::MIN);
        assert_eq!(normalize_at(Some(&Ttl::Interval(past)), anchor()), Expiry::Expired);

        let future = Interval::months(-1).with_delta(TimeDelta::MAX);
        assert_eq!(future.seconds_from(anchor()), i64::MAX);
    }

    #[test]
    fn test_with_delta_saturates() {
        let max = Interval::from_delta(TimeDelta::MAX).with_delta(TimeDelta::MAX);
        assert_eq!(max, Interval::from_delta(TimeDelta::MAX));

        let min = Interval::from_delta(TimeDelta::MIN).with_delta(TimeDelta::MIN);
        assert_eq!(min, Interval::from_delta(TimeDelta::MIN));
    }

    #[test]
    fn test_parse_interval() {
        let one_second: Interval = "PT1S".parse().unwrap();
        assert_eq!(one_second, Interval::from_delta(TimeDelta::seconds(1)));

        let mixed: Interval = "P1Y2M3DT4H5M6S".parse().unwrap();
        let time = TimeDelta::seconds(3 * 86_400 + 4 * 3_600 + 5 * 60 + 6);
        assert_eq!(mixed, Interval::months(14).with_delta(time));

        let weeks: Interval = "P2W".parse().unwrap();
        assert_eq!(weeks, Interval::from_delta(TimeDelta::days(14)));

        let inverted: Interval = "-P1MT1M".parse().unwrap();
        assert_eq!(inverted, Interval::months(-1).with_delta(TimeDelta::seconds(-60)));
    }

    #[test]
    fn test_parse_interval_rejects_garbage() {
        for input in ["", "P", "PT", "1S", "PT1", "P1S", "PT1D", "P1M1Y", "PT1S1S", "PXD", "P-1D"] {
            assert!(
                matches!(input.parse::<Interval>(), Err(CacheError::InvalidInterval(_))),
                "{:?} should not parse",
                input
            );
        }
    }

    #[test]
    fn test_parse_ttl() {
        assert_eq!("30".parse::<Ttl>().unwrap(), Ttl::Seconds(30));
        assert_eq!("-1".parse::<Ttl>().unwrap(), Ttl::Seconds(-1));
        assert_eq!(
            "PT1M".parse::<Ttl>().unwrap(),
            Ttl::Interval(Interval::from_delta(TimeDelta::seconds(60)))
        );
        assert!("soon".parse::<Ttl>().is_err());
    }

    #[test]
    fn test_std_duration_ttl() {
        let ttl = Ttl::from(std::time::Duration::from_secs(5));
        assert_eq!(ttl, Ttl::Seconds(5));

        // Sub-second parts are truncated
        let ttl = Ttl::from(std::time::Duration::from_millis(1_500));
        assert_eq!(ttl, Ttl::Seconds(1));
        let ttl = Ttl::from(std::time::Duration::from_millis(500));
        assert_eq!(ttl, Ttl::Seconds(0));
        assert_eq!(normalize(Some(&ttl)), Expiry::Expired);
    }
}
