//! Interval helpers for meal timestamps. Keep logic minimal and
//! deterministic.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

/// True when `value` falls in the half-open interval `[start, end)`:
/// the start boundary is included, the end boundary is not.
pub fn is_between_half_open(
    value: NaiveDateTime,
    start: NaiveDateTime,
    end: NaiveDateTime,
) -> bool {
    value >= start && value < end
}

/// Lower bound for a day filter: midnight of `date`, or the minimum
/// representable datetime when the bound is open.
pub fn at_start_of_day_or_min(date: Option<NaiveDate>) -> NaiveDateTime {
    date.map_or(NaiveDateTime::MIN, |d| d.and_time(NaiveTime::MIN))
}

/// Upper bound for a day filter: midnight of the day after `date`, or the
/// maximum representable datetime when the bound is open. Keeping the
/// bound exclusive means a filter on `[start_date, end_date]` days still
/// covers the whole end day.
pub fn at_start_of_next_day_or_max(date: Option<NaiveDate>) -> NaiveDateTime {
    date.and_then(|d| d.succ_opt())
        .map_or(NaiveDateTime::MAX, |d| d.and_time(NaiveTime::MIN))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dt(d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    #[test]
    fn start_inclusive_end_exclusive() {
        let start = dt(1, 10);
        let end = dt(2, 10);
        assert!(is_between_half_open(start, start, end));
        assert!(is_between_half_open(dt(1, 23), start, end));
        assert!(!is_between_half_open(end, start, end));
        assert!(!is_between_half_open(dt(2, 11), start, end));
    }

    #[test]
    fn open_bounds_extend_to_extremes() {
        assert_eq!(at_start_of_day_or_min(None), NaiveDateTime::MIN);
        assert_eq!(at_start_of_next_day_or_max(None), NaiveDateTime::MAX);
    }

    #[test]
    fn day_bounds_wrap_the_whole_day() {
        let day = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        assert_eq!(at_start_of_day_or_min(Some(day)), dt(1, 0));
        assert_eq!(at_start_of_next_day_or_max(Some(day)), dt(2, 0));
    }

    #[test]
    fn next_day_of_max_date_saturates() {
        assert_eq!(
            at_start_of_next_day_or_max(Some(NaiveDate::MAX)),
            NaiveDateTime::MAX
        );
    }
}
