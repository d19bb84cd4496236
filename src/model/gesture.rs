use chrono::{Duration, NaiveDate};
use uuid::Uuid;

use super::date_range::DateRange;

/// Which part of a bar a pointer grabbed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragKind {
    Move,
    ResizeStart,
    ResizeEnd,
}

/// Resolve a drag against the range captured when the gesture began.
///
/// `days_delta` is already quantized to whole days by the caller; pixels
/// never reach this layer. A zero delta returns the origin unchanged.
/// Resizes clamp so the result keeps at least one day between the
/// endpoints, and the edge that was not grabbed never moves.
pub fn resolve_drag(kind: DragKind, origin: DateRange, days_delta: i64) -> DateRange {
    if days_delta == 0 {
        // Identity even for single-day ranges, where the resize clamps
        // below would otherwise kick in.
        return origin;
    }
    match kind {
        DragKind::Move => origin.shifted(days_delta),
        DragKind::ResizeStart => {
            let mut new_start = origin.start + Duration::days(days_delta);
            if new_start >= origin.end {
                new_start = origin.end - Duration::days(1);
            }
            DateRange {
                start: new_start,
                end: origin.end,
            }
        }
        DragKind::ResizeEnd => {
            let mut new_end = origin.end + Duration::days(days_delta);
            if new_end <= origin.start {
                new_end = origin.start + Duration::days(1);
            }
            DateRange {
                start: origin.start,
                end: new_end,
            }
        }
    }
}

/// A live move or resize gesture over an existing task.
///
/// The range is snapshotted once when the drag begins and every hover
/// re-resolves from that snapshot, so intermediate ticks cannot accumulate
/// drift.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TaskDrag {
    pub task_id: Uuid,
    pub kind: DragKind,
    pub origin: DateRange,
    pub press_day: NaiveDate,
    pub preview: DateRange,
}

impl TaskDrag {
    pub fn begin(task_id: Uuid, kind: DragKind, origin: DateRange, press_day: NaiveDate) -> Self {
        Self {
            task_id,
            kind,
            origin,
            press_day,
            preview: origin,
        }
    }

    /// Feed the day cell currently under the pointer. Frames where no cell
    /// is under the pointer skip this call and the preview holds.
    pub fn hover(&mut self, day: NaiveDate) {
        let delta = (day - self.press_day).num_days();
        self.preview = resolve_drag(self.kind, self.origin, delta);
    }

    /// True when releasing now would change nothing.
    pub fn is_noop(&self) -> bool {
        self.preview == self.origin
    }
}

/// Drag-to-create selection across empty day cells.
///
/// Owned by the rendering layer and never persisted. The candidate is
/// always the normalized pair of anchor and hovered day.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DragSelection {
    anchor: Option<NaiveDate>,
    hover: Option<NaiveDate>,
}

impl DragSelection {
    pub fn begin(&mut self, day: NaiveDate) {
        self.anchor = Some(day);
        self.hover = Some(day);
    }

    /// Update the hovered day; ignored while idle.
    pub fn extend(&mut self, day: NaiveDate) {
        if self.anchor.is_some() {
            self.hover = Some(day);
        }
    }

    pub fn is_selecting(&self) -> bool {
        self.anchor.is_some()
    }

    /// The normalized range selected so far.
    pub fn candidate(&self) -> Option<DateRange> {
        match (self.anchor, self.hover) {
            (Some(anchor), Some(hover)) => Some(DateRange::new(anchor, hover)),
            _ => None,
        }
    }

    /// Finish the gesture: yield the candidate and return to idle. The
    /// reset is unconditional, so an abandoned creation leaves no residue.
    pub fn release(&mut self) -> Option<DateRange> {
        let candidate = self.candidate();
        *self = Self::default();
        candidate
    }

    /// Abandon without yielding a range.
    pub fn cancel(&mut self) {
        *self = Self::default();
    }
}
