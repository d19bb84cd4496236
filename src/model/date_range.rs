use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// An inclusive range of calendar days.
///
/// Construction orders the endpoints, so `start <= end` holds everywhere a
/// range travels. All arithmetic is whole-day; time of day never enters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Build a range from two days given in either order.
    pub fn new(a: NaiveDate, b: NaiveDate) -> Self {
        if a <= b {
            Self { start: a, end: b }
        } else {
            Self { start: b, end: a }
        }
    }

    /// The range covering exactly one day.
    pub fn single(day: NaiveDate) -> Self {
        Self { start: day, end: day }
    }

    /// Inclusive on both endpoints.
    pub fn contains(&self, day: NaiveDate) -> bool {
        self.start <= day && day <= self.end
    }

    /// Inclusive intersection test. Single-day ranges participate normally.
    pub fn overlaps(&self, other: &DateRange) -> bool {
        !(self.end < other.start || self.start > other.end)
    }

    /// Days between the endpoints; 0 for a single-day range.
    pub fn duration_days(&self) -> i64 {
        (self.end - self.start).num_days()
    }

    /// Both endpoints moved by the same signed day count.
    pub fn shifted(&self, days: i64) -> Self {
        Self {
            start: self.start + Duration::days(days),
            end: self.end + Duration::days(days),
        }
    }
}

// ── Calendar helpers ─────────────────────────────────────────────────────────

/// The inclusive seven-day week beginning at `week_start`.
pub fn week_of(week_start: NaiveDate) -> DateRange {
    DateRange {
        start: week_start,
        end: week_start + Duration::days(6),
    }
}

/// Monday of the week containing `day`.
pub fn week_start_of(day: NaiveDate) -> NaiveDate {
    day - Duration::days(day.weekday().num_days_from_monday() as i64)
}

/// Lookahead window: `today` through `today + weeks * 7` days, inclusive.
/// Callers pass whatever "today" means to them; tests inject fixed dates.
pub fn rolling_window(today: NaiveDate, weeks: i64) -> DateRange {
    DateRange {
        start: today,
        end: today + Duration::days(weeks * 7),
    }
}

/// Last calendar day of the given month, or `None` for an invalid month.
pub fn last_day_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1).map(|first| first - Duration::days(1))
}

/// Monday week-starts for every calendar row of the given month. The edge
/// rows carry leading/trailing days of the adjacent months.
pub fn month_week_starts(year: i32, month: u32) -> Vec<NaiveDate> {
    let mut rows = Vec::new();
    if let (Some(first), Some(last)) = (
        NaiveDate::from_ymd_opt(year, month, 1),
        last_day_of_month(year, month),
    ) {
        let mut row = week_start_of(first);
        while row <= last {
            rows.push(row);
            row += Duration::days(7);
        }
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).expect("valid date")
    }

    #[test]
    fn new_orders_endpoints() {
        let range = DateRange::new(d(2024, 6, 15), d(2024, 6, 13));
        assert_eq!(range.start, d(2024, 6, 13));
        assert_eq!(range.end, d(2024, 6, 15));
    }

    #[test]
    fn contains_is_inclusive_on_both_ends() {
        let range = DateRange::new(d(2024, 6, 10), d(2024, 6, 12));
        assert!(range.contains(d(2024, 6, 10)));
        assert!(range.contains(d(2024, 6, 11)));
        assert!(range.contains(d(2024, 6, 12)));
        assert!(!range.contains(d(2024, 6, 9)));
        assert!(!range.contains(d(2024, 6, 13)));
    }

    #[test]
    fn overlap_counts_shared_edges() {
        let a = DateRange::new(d(2024, 6, 10), d(2024, 6, 12));
        let b = DateRange::new(d(2024, 6, 12), d(2024, 6, 20));
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn disjoint_ranges_do_not_overlap() {
        let a = DateRange::new(d(2024, 6, 10), d(2024, 6, 12));
        let b = DateRange::new(d(2024, 6, 13), d(2024, 6, 20));
        assert!(!a.overlaps(&b));
        assert!(!b.overlaps(&a));
    }

    #[test]
    fn single_day_ranges_overlap_normally() {
        let day = DateRange::single(d(2024, 6, 12));
        let around = DateRange::new(d(2024, 6, 10), d(2024, 6, 14));
        assert!(day.overlaps(&around));
        assert!(day.overlaps(&day));
        assert_eq!(day.duration_days(), 0);
    }

    #[test]
    fn rolling_window_spans_whole_weeks() {
        let window = rolling_window(d(2024, 6, 20), 1);
        assert_eq!(window.start, d(2024, 6, 20));
        assert_eq!(window.end, d(2024, 6, 27));
        assert_eq!(rolling_window(d(2024, 6, 20), 3).end, d(2024, 7, 11));
    }

    #[test]
    fn week_start_lands_on_monday() {
        assert_eq!(week_start_of(d(2024, 6, 12)), d(2024, 6, 10)); // Wednesday
        assert_eq!(week_start_of(d(2024, 6, 10)), d(2024, 6, 10)); // Monday itself
        assert_eq!(week_start_of(d(2024, 6, 16)), d(2024, 6, 10)); // Sunday
    }

    #[test]
    fn june_2024_has_five_grid_rows() {
        let rows = month_week_starts(2024, 6);
        assert_eq!(rows.first().copied(), Some(d(2024, 5, 27)));
        assert_eq!(rows.last().copied(), Some(d(2024, 6, 24)));
        assert_eq!(rows.len(), 5);
    }

    #[test]
    fn leap_february_grid_covers_the_29th() {
        let rows = month_week_starts(2024, 2);
        assert_eq!(rows.first().copied(), Some(d(2024, 1, 29)));
        assert_eq!(rows.len(), 5);
        assert!(week_of(rows[4]).contains(d(2024, 2, 29)));
    }

    #[test]
    fn invalid_month_yields_no_rows() {
        assert!(month_week_starts(2024, 13).is_empty());
    }

    proptest! {
        #[test]
        fn construction_is_symmetric(a in 0i64..4000, b in 0i64..4000) {
            let base = d(2020, 1, 1);
            let (a, b) = (base + Duration::days(a), base + Duration::days(b));
            prop_assert_eq!(DateRange::new(a, b), DateRange::new(b, a));
        }

        #[test]
        fn shift_preserves_duration(a in 0i64..4000, b in 0i64..4000, delta in -400i64..400) {
            let base = d(2020, 1, 1);
            let range = DateRange::new(base + Duration::days(a), base + Duration::days(b));
            prop_assert_eq!(range.shifted(delta).duration_days(), range.duration_days());
        }

        #[test]
        fn overlap_is_symmetric(a in 0i64..600, b in 0i64..600, c in 0i64..600, e in 0i64..600) {
            let base = d(2024, 1, 1);
            let first = DateRange::new(base + Duration::days(a), base + Duration::days(b));
            let second = DateRange::new(base + Duration::days(c), base + Duration::days(e));
            prop_assert_eq!(first.overlaps(&second), second.overlaps(&first));
        }
    }
}
