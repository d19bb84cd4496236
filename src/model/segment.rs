use chrono::NaiveDate;

use super::date_range::{week_of, DateRange};

/// Where a task bar sits within one calendar week row.
///
/// Fractions are sevenths of the row width, so rendering reduces to a
/// multiply against the row rect. The flags say whether this row shows the
/// task's real first or last day, which is where end caps and resize
/// handles belong.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeekSegment {
    /// Offset of the bar's left edge, in `[0, 6/7]`.
    pub left_fraction: f32,
    /// Bar width, in `[1/7, 1]`.
    pub width_fraction: f32,
    /// First day column the bar covers, 0-based within the week.
    pub start_col: usize,
    /// Last day column the bar covers, inclusive.
    pub end_col: usize,
    pub is_first_day_of_task: bool,
    pub is_last_day_of_task: bool,
}

impl WeekSegment {
    /// A continuation row: the task starts before this week and ends after it.
    pub fn is_middle(&self) -> bool {
        !self.is_first_day_of_task && !self.is_last_day_of_task
    }
}

/// Clip `range` to the week beginning at `week_start`.
///
/// `None` when the range does not touch the week at all; otherwise a
/// segment spanning at least one day cell. Weeks are computed
/// independently, so a range crossing week or month boundaries yields one
/// segment per row it touches.
pub fn week_segment(range: DateRange, week_start: NaiveDate) -> Option<WeekSegment> {
    let week = week_of(week_start);
    let visible_start = range.start.max(week.start);
    let visible_end = range.end.min(week.end);
    if visible_start > visible_end {
        return None;
    }

    let start_col = (visible_start - week.start).num_days() as usize;
    let end_col = (visible_end - week.start).num_days() as usize;

    let mut left = start_col as f32 / 7.0;
    let width = ((end_col - start_col + 1) as f32 / 7.0).max(1.0 / 7.0);
    if left + width > 1.0 {
        left = 1.0 - width;
    }

    Some(WeekSegment {
        left_fraction: left,
        width_fraction: width,
        start_col,
        end_col,
        is_first_day_of_task: visible_start == range.start,
        is_last_day_of_task: visible_end == range.end,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use proptest::prelude::*;

    const EPS: f32 = 1e-6;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).expect("valid date")
    }

    #[test]
    fn three_day_task_in_a_sunday_start_week() {
        // Week of Sunday 2024-06-09; the task runs Monday 10th..Wednesday 12th.
        let range = DateRange::new(d(2024, 6, 10), d(2024, 6, 12));
        let seg = week_segment(range, d(2024, 6, 9)).expect("segment");
        assert!((seg.left_fraction - 1.0 / 7.0).abs() < EPS);
        assert!((seg.width_fraction - 3.0 / 7.0).abs() < EPS);
        assert!(seg.is_first_day_of_task);
        assert!(seg.is_last_day_of_task);
        assert_eq!(seg.start_col, 1);
        assert_eq!(seg.end_col, 3);
    }

    #[test]
    fn weeks_the_range_never_touches_yield_nothing() {
        let range = DateRange::new(d(2024, 6, 10), d(2024, 6, 12));
        assert!(week_segment(range, d(2024, 6, 3)).is_none());
        assert!(week_segment(range, d(2024, 6, 13)).is_none());
    }

    #[test]
    fn single_day_task_is_first_and_last_at_once() {
        let range = DateRange::single(d(2024, 6, 14));
        let seg = week_segment(range, d(2024, 6, 10)).expect("segment");
        assert!((seg.width_fraction - 1.0 / 7.0).abs() < EPS);
        assert!(seg.is_first_day_of_task && seg.is_last_day_of_task);
        assert!(!seg.is_middle());
        assert_eq!(seg.start_col, 4);
        assert_eq!(seg.end_col, 4);
    }

    #[test]
    fn month_boundary_yields_one_segment_per_row() {
        // Friday Jun 28 .. Wednesday Jul 3, across the June/July 2024 boundary.
        let range = DateRange::new(d(2024, 6, 28), d(2024, 7, 3));
        let first = week_segment(range, d(2024, 6, 24)).expect("first row");
        let second = week_segment(range, d(2024, 7, 1)).expect("second row");

        assert!(first.is_first_day_of_task);
        assert!(!first.is_last_day_of_task);
        assert_eq!(first.start_col, 4);
        assert_eq!(first.end_col, 6);

        assert!(!second.is_first_day_of_task);
        assert!(second.is_last_day_of_task);
        assert_eq!(second.start_col, 0);
        assert_eq!(second.end_col, 2);
    }

    #[test]
    fn continuation_week_is_middle_and_spans_the_row() {
        let range = DateRange::new(d(2024, 6, 3), d(2024, 6, 23));
        let seg = week_segment(range, d(2024, 6, 10)).expect("segment");
        assert!(seg.is_middle());
        assert!(seg.left_fraction.abs() < EPS);
        assert!((seg.width_fraction - 1.0).abs() < EPS);
    }

    #[test]
    fn adjacent_month_days_in_an_edge_row_segment_normally() {
        // May 30 .. Jun 2 sits entirely in June's first grid row (week of May 27).
        let range = DateRange::new(d(2024, 5, 30), d(2024, 6, 2));
        let seg = week_segment(range, d(2024, 5, 27)).expect("segment");
        assert_eq!(seg.start_col, 3);
        assert_eq!(seg.end_col, 6);
        assert!(seg.is_first_day_of_task && seg.is_last_day_of_task);
    }

    proptest! {
        #[test]
        fn segment_exists_iff_range_touches_week(
            start_off in 0i64..60, len in 0i64..30, week_off in 0i64..9,
        ) {
            let base = d(2024, 1, 1); // a Monday
            let range = DateRange::new(
                base + Duration::days(start_off),
                base + Duration::days(start_off + len),
            );
            let week_start = base + Duration::days(week_off * 7);
            let touches = range.overlaps(&week_of(week_start));
            prop_assert_eq!(week_segment(range, week_start).is_some(), touches);
        }

        #[test]
        fn segment_geometry_stays_in_bounds(
            start_off in 0i64..60, len in 0i64..30, week_off in 0i64..9,
        ) {
            let base = d(2024, 1, 1);
            let range = DateRange::new(
                base + Duration::days(start_off),
                base + Duration::days(start_off + len),
            );
            let week_start = base + Duration::days(week_off * 7);
            if let Some(seg) = week_segment(range, week_start) {
                prop_assert!(seg.width_fraction >= 1.0 / 7.0 - EPS);
                prop_assert!(seg.width_fraction <= 1.0 + EPS);
                prop_assert!(seg.left_fraction >= -EPS);
                prop_assert!(seg.left_fraction + seg.width_fraction <= 1.0 + EPS);
                prop_assert!(seg.start_col <= seg.end_col);
                prop_assert!(seg.end_col <= 6);
            }
        }
    }
}
