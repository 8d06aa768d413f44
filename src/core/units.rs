//! Unit-count functions for the key axis.
//!
//! A unit function answers "how many bars fit between these two keys", which
//! in turn sizes bar thickness on continuous axes.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::core::ScaleDomain;
use crate::core::primitives::unix_seconds_to_datetime;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub enum KeyUnits {
    /// One unit per integer step.
    #[default]
    Integers,
    /// One unit per distinct ordinal key.
    Ordinal,
    /// One unit per `resolution` step; exposes its resolution.
    Precision(f64),
    /// Calendar day boundaries (UTC, keys in unix seconds).
    Days,
    /// Calendar month boundaries (UTC, keys in unix seconds).
    Months,
    /// Calendar year boundaries (UTC, keys in unix seconds).
    Years,
}

impl KeyUnits {
    /// Step size when the unit function has a fixed numeric resolution.
    #[must_use]
    pub fn resolution(self) -> Option<f64> {
        match self {
            Self::Precision(resolution) => Some(resolution),
            _ => None,
        }
    }

    /// Counts units across `domain`. Unset or mismatched domains count zero.
    #[must_use]
    pub fn count(self, domain: &ScaleDomain) -> usize {
        match (self, domain) {
            (_, ScaleDomain::Unset) => 0,
            (_, ScaleDomain::Ordinal(values)) => values.len(),
            (Self::Ordinal, ScaleDomain::Continuous { .. }) => 0,
            (units, ScaleDomain::Continuous { min, max }) => units.count_between(*min, *max),
        }
    }

    /// Counts units between two continuous keys.
    #[must_use]
    pub fn count_between(self, start: f64, end: f64) -> usize {
        if !start.is_finite() || !end.is_finite() {
            return 0;
        }
        let (start, end) = (start.min(end), start.max(end));
        match self {
            Self::Integers => to_count((end - start).floor()),
            Self::Ordinal => 0,
            Self::Precision(resolution) => {
                if !resolution.is_finite() || resolution <= 0.0 {
                    return 0;
                }
                to_count(((end - start) / resolution).ceil())
            }
            Self::Days => calendar_boundaries(start, end, CalendarStep::Day),
            Self::Months => calendar_boundaries(start, end, CalendarStep::Month),
            Self::Years => calendar_boundaries(start, end, CalendarStep::Year),
        }
    }
}

fn to_count(value: f64) -> usize {
    if value.is_finite() && value > 0.0 {
        value.min(usize::MAX as f64) as usize
    } else {
        0
    }
}

#[derive(Clone, Copy)]
enum CalendarStep {
    Day,
    Month,
    Year,
}

/// Number of calendar boundaries `b` with `start <= b < end`.
fn calendar_boundaries(start: f64, end: f64, step: CalendarStep) -> usize {
    let (Some(start_time), Some(end_time)) = (
        unix_seconds_to_datetime(start),
        unix_seconds_to_datetime(end),
    ) else {
        return 0;
    };
    if start_time >= end_time {
        return 0;
    }

    let start_date = start_time.date_naive();
    let end_date = end_time.date_naive();
    let start_on_boundary = start_time == start_of(start_date, step);
    let end_on_boundary = end_time == start_of(end_date, step);

    let between = match step {
        CalendarStep::Day => (end_date - start_date).num_days(),
        CalendarStep::Month => {
            i64::from(end_date.year() - start_date.year()) * 12
                + i64::from(end_date.month()) - i64::from(start_date.month())
        }
        CalendarStep::Year => i64::from(end_date.year() - start_date.year()),
    };

    // `between` counts boundaries in (start, end]; shift to [start, end).
    let mut count = between;
    if start_on_boundary {
        count += 1;
    }
    if end_on_boundary {
        count -= 1;
    }
    usize::try_from(count).unwrap_or(0)
}

fn start_of(date: NaiveDate, step: CalendarStep) -> chrono::DateTime<chrono::Utc> {
    let floored = match step {
        CalendarStep::Day => Some(date),
        CalendarStep::Month => NaiveDate::from_ymd_opt(date.year(), date.month(), 1),
        CalendarStep::Year => NaiveDate::from_ymd_opt(date.year(), 1, 1),
    }
    .unwrap_or(date);
    floored.and_time(chrono::NaiveTime::MIN).and_utc()
}

#[cfg(test)]
mod tests {
    use super::*;

    const DAY: f64 = 86_400.0;

    #[test]
    fn integers_count_whole_steps() {
        assert_eq!(KeyUnits::Integers.count_between(0.0, 10.0), 10);
        assert_eq!(KeyUnits::Integers.count_between(10.0, 0.0), 10);
        assert_eq!(KeyUnits::Integers.count_between(0.0, 0.5), 0);
    }

    #[test]
    fn precision_rounds_up_and_exposes_resolution() {
        let units = KeyUnits::Precision(0.5);
        assert_eq!(units.count_between(0.0, 1.2), 3);
        assert_eq!(units.resolution(), Some(0.5));
        assert_eq!(KeyUnits::Integers.resolution(), None);
        assert_eq!(KeyUnits::Precision(0.0).count_between(0.0, 1.0), 0);
    }

    #[test]
    fn days_count_midnights_in_half_open_interval() {
        // 1970-01-01T00:00 .. 1970-01-04T00:00 -> Jan 1, 2, 3
        assert_eq!(KeyUnits::Days.count_between(0.0, 3.0 * DAY), 3);
        // 1970-01-01T12:00 .. 1970-01-03T12:00 -> Jan 2, 3
        assert_eq!(KeyUnits::Days.count_between(0.5 * DAY, 2.5 * DAY), 2);
    }

    #[test]
    fn months_and_years_count_calendar_starts() {
        // 1970-01-01 .. 1970-04-01
        let april = 90.0 * DAY;
        assert_eq!(KeyUnits::Months.count_between(0.0, april), 3);
        // 1970-01-01 .. 1973-01-01
        let jan_1973 = (365.0 * 3.0 + 1.0) * DAY;
        assert_eq!(KeyUnits::Years.count_between(0.0, jan_1973), 3);
    }

    #[test]
    fn ordinal_units_follow_domain_length() {
        let domain = ScaleDomain::ordinal(["a", "b", "c"]);
        assert_eq!(KeyUnits::Ordinal.count(&domain), 3);
        assert_eq!(KeyUnits::Ordinal.count(&ScaleDomain::Unset), 0);
        assert_eq!(KeyUnits::Integers.count(&ScaleDomain::continuous(0.0, 4.0)), 4);
    }
}
