use chrono::{Datelike, Duration, NaiveDate};
use egui::{Align2, Color32, CursorIcon, Pos2, Rect, Rounding, Sense, Stroke, Ui, Vec2};
use uuid::Uuid;

use crate::model::date_range::month_week_starts;
use crate::model::{
    week_segment, DateRange, DragKind, DragSelection, Task, TaskDrag, WeekSegment,
};
use crate::ui::theme;

const WEEKDAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// The one pointer gesture the grid allows at a time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ActiveGesture {
    /// Sweeping empty day cells to create a task.
    Select(DragSelection),
    /// Moving or resizing an existing bar.
    Task(TaskDrag),
}

/// What the grid wants the app to do after this frame.
#[derive(Debug, Default, Clone)]
pub struct GridInteraction {
    /// A move/resize finished; commit this range through the store.
    pub task_dragged: Option<(Uuid, DateRange)>,
    /// A drag-select finished over these days; open the creation flow.
    pub range_selected: Option<DateRange>,
    pub select_task: Option<Uuid>,
    pub clear_selection: bool,
}

/// Pixel layout for one rendered month: maps pointer positions to days
/// and day coordinates to rects. Rebuilt every frame from the panel rect.
struct GridGeometry {
    rect: Rect,
    week_starts: Vec<NaiveDate>,
    cell_w: f32,
    row_h: f32,
}

impl GridGeometry {
    fn new(rect: Rect, year: i32, month: u32) -> Self {
        let week_starts = month_week_starts(year, month);
        let rows = week_starts.len().max(1) as f32;
        Self {
            rect,
            week_starts,
            cell_w: rect.width() / 7.0,
            row_h: (rect.height() - theme::WEEKDAY_HEADER_HEIGHT) / rows,
        }
    }

    /// The day cell under `pos`, if any. The weekday header and anything
    /// outside the grid map to `None`.
    fn day_at(&self, pos: Pos2) -> Option<NaiveDate> {
        if !self.rect.contains(pos) || pos.y < self.rect.top() + theme::WEEKDAY_HEADER_HEIGHT {
            return None;
        }
        let col = ((pos.x - self.rect.left()) / self.cell_w).floor() as i64;
        if !(0..7).contains(&col) {
            return None;
        }
        let row = ((pos.y - self.rect.top() - theme::WEEKDAY_HEADER_HEIGHT) / self.row_h).floor();
        if row < 0.0 {
            return None;
        }
        self.week_starts
            .get(row as usize)
            .map(|ws| *ws + Duration::days(col))
    }

    fn row_rect(&self, row: usize) -> Rect {
        Rect::from_min_size(
            Pos2::new(
                self.rect.left(),
                self.rect.top() + theme::WEEKDAY_HEADER_HEIGHT + row as f32 * self.row_h,
            ),
            Vec2::new(self.rect.width(), self.row_h),
        )
    }

    fn cell_rect(&self, row: usize, col: usize) -> Rect {
        let row_rect = self.row_rect(row);
        Rect::from_min_size(
            Pos2::new(row_rect.left() + col as f32 * self.cell_w, row_rect.top()),
            Vec2::new(self.cell_w, self.row_h),
        )
    }

    /// Bar rect for a segment inside a row, at the given stacking lane.
    fn bar_rect(&self, row: usize, seg: &WeekSegment, lane: usize) -> Rect {
        let row_rect = self.row_rect(row);
        let x = row_rect.left() + seg.left_fraction * row_rect.width();
        let w = seg.width_fraction * row_rect.width();
        let y = row_rect.top()
            + theme::DAY_NUMBER_HEIGHT
            + lane as f32 * (theme::BAR_HEIGHT + theme::BAR_GAP);
        Rect::from_min_size(
            Pos2::new(x + theme::BAR_INSET, y),
            Vec2::new((w - theme::BAR_INSET * 2.0).max(2.0), theme::BAR_HEIGHT),
        )
    }

    /// How many bar lanes fit in a row before the overflow label takes over.
    fn max_lanes(&self) -> usize {
        let space = self.row_h - theme::DAY_NUMBER_HEIGHT - theme::BAR_HEIGHT;
        ((space / (theme::BAR_HEIGHT + theme::BAR_GAP)).floor() as usize + 1).max(1)
    }
}

/// One bar as laid out this frame.
struct BarLayout<'a> {
    task: &'a Task,
    rect: Rect,
    seg: WeekSegment,
}

/// First-fit lane stacking: each segment takes the lowest lane where it
/// does not collide with a segment already placed there. Input order is
/// the store order, so earlier tasks keep the upper lanes.
fn assign_lanes(segments: &[WeekSegment]) -> Vec<usize> {
    let mut lane_spans: Vec<Vec<(usize, usize)>> = Vec::new();
    let mut lanes = Vec::with_capacity(segments.len());
    for seg in segments {
        let mut lane = 0;
        while lane_spans.get(lane).map_or(false, |spans| {
            spans
                .iter()
                .any(|(s, e)| seg.start_col <= *e && *s <= seg.end_col)
        }) {
            lane += 1;
        }
        if lane == lane_spans.len() {
            lane_spans.push(Vec::new());
        }
        lane_spans[lane].push((seg.start_col, seg.end_col));
        lanes.push(lane);
    }
    lanes
}

/// Lay out every visible bar for the month. A live drag substitutes its
/// preview range for the dragged task. Segments past the last lane that
/// fits the row are dropped and counted for the overflow label.
fn layout_bars<'a>(
    tasks: &[&'a Task],
    drag: Option<&TaskDrag>,
    geom: &GridGeometry,
) -> (Vec<BarLayout<'a>>, Vec<usize>) {
    let mut bars = Vec::new();
    let mut hidden = vec![0usize; geom.week_starts.len()];
    let max_lanes = geom.max_lanes();

    for (row, week_start) in geom.week_starts.iter().enumerate() {
        let mut row_tasks: Vec<&Task> = Vec::new();
        let mut row_segments: Vec<WeekSegment> = Vec::new();
        for task in tasks {
            let range = match drag {
                Some(d) if d.task_id == task.id => d.preview,
                _ => task.range(),
            };
            if let Some(seg) = week_segment(range, *week_start) {
                row_tasks.push(task);
                row_segments.push(seg);
            }
        }
        let lanes = assign_lanes(&row_segments);
        for ((task, seg), lane) in row_tasks.into_iter().zip(row_segments).zip(lanes) {
            if lane >= max_lanes {
                hidden[row] += 1;
                continue;
            }
            bars.push(BarLayout {
                task,
                rect: geom.bar_rect(row, &seg, lane),
                seg,
            });
        }
    }
    (bars, hidden)
}

fn left_handle_rect(bar: Rect) -> Rect {
    Rect::from_min_max(
        Pos2::new(bar.left() - theme::HANDLE_WIDTH * 0.5, bar.top()),
        Pos2::new(bar.left() + theme::HANDLE_WIDTH * 0.5, bar.bottom()),
    )
    .expand(4.0)
}

fn right_handle_rect(bar: Rect) -> Rect {
    Rect::from_min_max(
        Pos2::new(bar.right() - theme::HANDLE_WIDTH * 0.5, bar.top()),
        Pos2::new(bar.right() + theme::HANDLE_WIDTH * 0.5, bar.bottom()),
    )
    .expand(4.0)
}

/// What a press at `pos` grabs. Resize handles win over bar bodies, so a
/// press near an edge never turns into an accidental move; handles only
/// exist on rows showing the task's real first/last day.
fn hit_bar(bars: &[BarLayout], pos: Pos2) -> Option<(Uuid, DragKind)> {
    for bar in bars {
        if bar.seg.is_first_day_of_task && left_handle_rect(bar.rect).contains(pos) {
            return Some((bar.task.id, DragKind::ResizeStart));
        }
        if bar.seg.is_last_day_of_task && right_handle_rect(bar.rect).contains(pos) {
            return Some((bar.task.id, DragKind::ResizeEnd));
        }
    }
    for bar in bars {
        if bar.rect.contains(pos) {
            return Some((bar.task.id, DragKind::Move));
        }
    }
    None
}

fn task_drag_of(gesture: &Option<ActiveGesture>) -> Option<TaskDrag> {
    match gesture {
        Some(ActiveGesture::Task(drag)) => Some(*drag),
        _ => None,
    }
}

fn select_candidate(gesture: &Option<ActiveGesture>) -> Option<DateRange> {
    match gesture {
        Some(ActiveGesture::Select(sel)) => sel.candidate(),
        _ => None,
    }
}

/// Render one month of the board and run its pointer interactions.
///
/// `tasks` is the already-filtered visible set in store order. The grid
/// never mutates tasks itself; finished gestures come back in the
/// returned `GridInteraction` for the app to commit.
pub fn show_month_grid(
    tasks: &[&Task],
    anchor: NaiveDate,
    today: NaiveDate,
    selected: Option<Uuid>,
    gesture: &mut Option<ActiveGesture>,
    ui: &mut Ui,
) -> GridInteraction {
    let mut interaction = GridInteraction::default();

    let (response, painter) = ui.allocate_painter(ui.available_size(), Sense::click_and_drag());
    let geom = GridGeometry::new(response.rect, anchor.year(), anchor.month());

    // Layout pass for hit-testing, before this frame's input moves anything.
    let (bars, _) = layout_bars(tasks, task_drag_of(gesture).as_ref(), &geom);

    // ── Input ────────────────────────────────────────────────────────────

    if response.drag_started() {
        let press = ui
            .input(|i| i.pointer.press_origin())
            .or_else(|| response.interact_pointer_pos());
        if let Some(pos) = press {
            if let Some((id, kind)) = hit_bar(&bars, pos) {
                if let Some(task) = tasks.iter().find(|t| t.id == id) {
                    let origin = task.range();
                    let press_day = geom.day_at(pos).unwrap_or(origin.start);
                    *gesture = Some(ActiveGesture::Task(TaskDrag::begin(
                        id, kind, origin, press_day,
                    )));
                    interaction.select_task = Some(id);
                }
            } else if let Some(day) = geom.day_at(pos) {
                let mut sel = DragSelection::default();
                sel.begin(day);
                *gesture = Some(ActiveGesture::Select(sel));
            }
        }
    }

    if response.dragged() {
        let hover_day = response.interact_pointer_pos().and_then(|p| geom.day_at(p));
        match gesture {
            Some(ActiveGesture::Select(sel)) => {
                if let Some(day) = hover_day {
                    sel.extend(day);
                }
                ui.ctx().set_cursor_icon(CursorIcon::Crosshair);
            }
            Some(ActiveGesture::Task(drag)) => {
                if let Some(day) = hover_day {
                    drag.hover(day);
                }
                let icon = match drag.kind {
                    DragKind::Move => CursorIcon::Grabbing,
                    _ => CursorIcon::ResizeHorizontal,
                };
                ui.ctx().set_cursor_icon(icon);
            }
            None => {}
        }
    }

    if response.drag_stopped() {
        let released_on_grid = ui
            .input(|i| i.pointer.hover_pos())
            .and_then(|p| geom.day_at(p))
            .is_some();
        match gesture.take() {
            Some(ActiveGesture::Select(mut sel)) => {
                // The reset happens either way; only a release over the
                // grid turns the sweep into a creation.
                let candidate = sel.release();
                if released_on_grid {
                    interaction.range_selected = candidate;
                }
            }
            Some(ActiveGesture::Task(drag)) => {
                if released_on_grid && !drag.is_noop() {
                    interaction.task_dragged = Some((drag.task_id, drag.preview));
                }
                interaction.select_task = Some(drag.task_id);
            }
            None => {}
        }
    }

    if response.clicked() {
        if let Some(pos) = response.interact_pointer_pos() {
            if let Some((id, _)) = hit_bar(&bars, pos) {
                interaction.select_task = Some(id);
            } else if geom.day_at(pos).is_some() {
                interaction.clear_selection = true;
            }
        }
    }

    // ── Painting ─────────────────────────────────────────────────────────

    // Second layout pass so a live drag draws at this frame's preview.
    let live_drag = task_drag_of(gesture);
    let (bars, hidden) = layout_bars(tasks, live_drag.as_ref(), &geom);

    painter.rect_filled(response.rect, 0.0, theme::BG_DARK);
    draw_weekday_header(&painter, &geom);
    draw_day_cells(&painter, &geom, anchor, today);

    if let Some(candidate) = select_candidate(gesture) {
        draw_selection_preview(&painter, &geom, candidate);
    }

    for bar in &bars {
        let dragging = live_drag.map_or(false, |d| d.task_id == bar.task.id);
        let is_selected = selected == Some(bar.task.id);
        draw_bar(&painter, bar, is_selected, dragging);
    }

    for (row, count) in hidden.iter().enumerate() {
        if *count > 0 {
            let row_rect = geom.row_rect(row);
            painter.text(
                Pos2::new(row_rect.right() - 6.0, row_rect.bottom() - 3.0),
                Align2::RIGHT_BOTTOM,
                format!("+{} more", count),
                theme::font_small(),
                theme::TEXT_DIM,
            );
        }
    }

    // ── Idle hover affordances ───────────────────────────────────────────

    if gesture.is_none() && response.hovered() {
        if let Some(pos) = ui.input(|i| i.pointer.hover_pos()) {
            if let Some((id, kind)) = hit_bar(&bars, pos) {
                let icon = match kind {
                    DragKind::Move => CursorIcon::PointingHand,
                    _ => CursorIcon::ResizeHorizontal,
                };
                ui.ctx().set_cursor_icon(icon);
                if let Some(task) = tasks.iter().find(|t| t.id == id) {
                    show_task_tooltip(ui, task);
                }
            }
        }
    }

    interaction
}

fn show_task_tooltip(ui: &Ui, task: &Task) {
    egui::show_tooltip_at_pointer(
        ui.ctx(),
        ui.layer_id(),
        egui::Id::new("task_tooltip"),
        |ui| {
            ui.label(egui::RichText::new(&task.name).font(theme::font_header()).strong());
            ui.label(
                egui::RichText::new(format!(
                    "{}  →  {}",
                    task.start.format("%b %d, %Y"),
                    task.end.format("%b %d, %Y")
                ))
                .font(theme::font_sub())
                .color(theme::TEXT_SECONDARY),
            );
            ui.label(
                egui::RichText::new(task.category.label())
                    .font(theme::font_sub())
                    .color(theme::category_color(task.category)),
            );
        },
    );
}

fn draw_weekday_header(painter: &egui::Painter, geom: &GridGeometry) {
    let header = Rect::from_min_size(
        geom.rect.min,
        Vec2::new(geom.rect.width(), theme::WEEKDAY_HEADER_HEIGHT),
    );
    painter.rect_filled(header, 0.0, theme::BG_HEADER);
    for (col, label) in WEEKDAYS.iter().enumerate() {
        let x = geom.rect.left() + (col as f32 + 0.5) * geom.cell_w;
        painter.text(
            Pos2::new(x, header.center().y),
            Align2::CENTER_CENTER,
            *label,
            theme::font_sub(),
            theme::TEXT_SECONDARY,
        );
    }
    painter.line_segment(
        [
            Pos2::new(geom.rect.left(), header.bottom()),
            Pos2::new(geom.rect.right(), header.bottom()),
        ],
        Stroke::new(1.0, theme::BORDER_SUBTLE),
    );
}

fn draw_day_cells(painter: &egui::Painter, geom: &GridGeometry, anchor: NaiveDate, today: NaiveDate) {
    for (row, week_start) in geom.week_starts.iter().enumerate() {
        for col in 0..7usize {
            let day = *week_start + Duration::days(col as i64);
            let cell = geom.cell_rect(row, col);
            let in_month = day.month() == anchor.month() && day.year() == anchor.year();

            if col >= 5 {
                painter.rect_filled(cell, 0.0, theme::BG_ROW_EVEN);
            }
            painter.rect_stroke(cell, 0.0, Stroke::new(1.0, theme::GRID_LINE));

            let number_pos = Pos2::new(cell.left() + 14.0, cell.top() + 11.0);
            if day == today {
                painter.circle_filled(number_pos, 9.0, theme::TODAY_ACCENT);
                painter.text(
                    number_pos,
                    Align2::CENTER_CENTER,
                    day.day().to_string(),
                    theme::font_sub(),
                    Color32::WHITE,
                );
            } else {
                let color = if in_month {
                    theme::TEXT_SECONDARY
                } else {
                    theme::TEXT_DIM
                };
                painter.text(
                    number_pos,
                    Align2::CENTER_CENTER,
                    day.day().to_string(),
                    theme::font_sub(),
                    color,
                );
            }
        }
    }
}

fn draw_selection_preview(painter: &egui::Painter, geom: &GridGeometry, candidate: DateRange) {
    for (row, week_start) in geom.week_starts.iter().enumerate() {
        if let Some(seg) = week_segment(candidate, *week_start) {
            let row_rect = geom.row_rect(row);
            let slab = Rect::from_min_max(
                Pos2::new(
                    row_rect.left() + seg.left_fraction * row_rect.width() + 1.0,
                    row_rect.top() + 1.0,
                ),
                Pos2::new(
                    row_rect.left()
                        + (seg.left_fraction + seg.width_fraction) * row_rect.width()
                        - 1.0,
                    row_rect.bottom() - 1.0,
                ),
            );
            painter.rect_filled(slab, Rounding::same(3.0), theme::BG_SELECTED);
            painter.rect_stroke(slab, Rounding::same(3.0), Stroke::new(1.0, theme::ACCENT));
        }
    }
}

fn draw_bar(painter: &egui::Painter, bar: &BarLayout, selected: bool, dragging: bool) {
    let color = theme::category_color(bar.task.category);
    let fill = if dragging {
        color.gamma_multiply(0.65)
    } else {
        color
    };
    // Square off the side where the task continues into another week.
    let rounding = Rounding {
        nw: if bar.seg.is_first_day_of_task { theme::BAR_ROUNDING } else { 0.0 },
        sw: if bar.seg.is_first_day_of_task { theme::BAR_ROUNDING } else { 0.0 },
        ne: if bar.seg.is_last_day_of_task { theme::BAR_ROUNDING } else { 0.0 },
        se: if bar.seg.is_last_day_of_task { theme::BAR_ROUNDING } else { 0.0 },
    };
    painter.rect_filled(bar.rect, rounding, fill);

    if selected {
        painter.rect_stroke(
            bar.rect.expand(1.0),
            rounding,
            Stroke::new(1.5, theme::HANDLE_COLOR),
        );
    }

    painter.with_clip_rect(bar.rect.shrink(2.0)).text(
        Pos2::new(bar.rect.left() + 6.0, bar.rect.center().y),
        Align2::LEFT_CENTER,
        &bar.task.name,
        theme::font_bar(),
        theme::TEXT_ON_BAR,
    );

    // Resize grips live only on the rows carrying the true endpoints.
    if selected || dragging {
        let grip = |edge_x: f32| {
            Rect::from_center_size(
                Pos2::new(edge_x, bar.rect.center().y),
                Vec2::new(theme::HANDLE_WIDTH - 2.0, bar.rect.height() - 6.0),
            )
        };
        if bar.seg.is_first_day_of_task {
            painter.rect_filled(grip(bar.rect.left() + 3.0), Rounding::same(2.0), theme::HANDLE_COLOR);
        }
        if bar.seg.is_last_day_of_task {
            painter.rect_filled(grip(bar.rect.right() - 3.0), Rounding::same(2.0), theme::HANDLE_COLOR);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).expect("valid date")
    }

    fn seg(start_col: usize, end_col: usize) -> WeekSegment {
        WeekSegment {
            left_fraction: start_col as f32 / 7.0,
            width_fraction: (end_col - start_col + 1) as f32 / 7.0,
            start_col,
            end_col,
            is_first_day_of_task: true,
            is_last_day_of_task: true,
        }
    }

    #[test]
    fn overlapping_segments_stack_into_lanes() {
        let lanes = assign_lanes(&[seg(0, 3), seg(2, 5), seg(4, 6)]);
        assert_eq!(lanes, [0, 1, 0]);
    }

    #[test]
    fn disjoint_segments_share_the_first_lane() {
        let lanes = assign_lanes(&[seg(0, 1), seg(2, 3), seg(4, 6)]);
        assert_eq!(lanes, [0, 0, 0]);
    }

    #[test]
    fn day_hit_testing_respects_grid_bounds() {
        let rect = Rect::from_min_size(Pos2::new(0.0, 0.0), Vec2::new(700.0, 524.0));
        let geom = GridGeometry::new(rect, 2024, 6); // five rows, 100px row height

        // Header row maps to nothing.
        assert_eq!(geom.day_at(Pos2::new(350.0, 10.0)), None);
        // First cell of the first row is Monday May 27.
        assert_eq!(
            geom.day_at(Pos2::new(50.0, theme::WEEKDAY_HEADER_HEIGHT + 10.0)),
            Some(d(2024, 5, 27))
        );
        // Fourth column, second row.
        assert_eq!(
            geom.day_at(Pos2::new(350.0, theme::WEEKDAY_HEADER_HEIGHT + 150.0)),
            Some(d(2024, 6, 6))
        );
        // Outside the rect maps to nothing.
        assert_eq!(geom.day_at(Pos2::new(750.0, 200.0)), None);
        assert_eq!(geom.day_at(Pos2::new(-5.0, 200.0)), None);
    }
}
