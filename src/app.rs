use std::path::PathBuf;
use std::time::{Duration as StdDuration, Instant};

use chrono::{Datelike, Duration, Local, NaiveDate};
use uuid::Uuid;

use crate::io;
use crate::model::{Category, Task, TaskStore};
use crate::ui;
use crate::ui::month_grid::ActiveGesture;
use crate::ui::theme;

/// How long the board must sit untouched before it is flushed to disk.
const AUTOSAVE_DEBOUNCE: StdDuration = StdDuration::from_millis(1500);

/// Main application state.
pub struct TaskBoardApp {
    pub store: TaskStore,
    /// First day of the month the grid is currently showing.
    pub anchor_month: NaiveDate,
    pub file_path: Option<PathBuf>,
    pub autosave_path: PathBuf,

    /// In-flight pointer gesture on the grid, if any.
    pub gesture: Option<ActiveGesture>,
    /// Working copy of the selected task, edited in the side panel and
    /// committed through the store on every change.
    pub editor_draft: Option<Task>,

    // Dialog state
    pub show_add_task: bool,
    pub show_about: bool,
    pub show_csv_help: bool,
    pub new_task_name: String,
    pub new_task_category: Category,
    pub new_task_start_date: NaiveDate,
    pub new_task_end_date: NaiveDate,

    // Status message
    pub status_message: String,

    // Autosave bookkeeping
    dirty: bool,
    last_change: Instant,
}

impl TaskBoardApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        // Register Phosphor icon font as a fallback so icons render inline with text
        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);
        theme::apply_theme(&cc.egui_ctx);

        let autosave_path = io::default_board_path();
        let store = if autosave_path.exists() {
            io::load_or_default(&autosave_path)
        } else {
            Self::sample_board()
        };

        let today = Local::now().date_naive();
        Self {
            store,
            anchor_month: first_of_month(today),
            file_path: None,
            autosave_path,
            gesture: None,
            editor_draft: None,
            show_add_task: false,
            show_about: false,
            show_csv_help: false,
            new_task_name: String::new(),
            new_task_category: Category::Todo,
            new_task_start_date: today,
            new_task_end_date: today + Duration::days(1),
            status_message: "Ready".to_string(),
            dirty: false,
            last_change: Instant::now(),
        }
    }

    /// Seed board shown on first launch, before any autosave exists.
    fn sample_board() -> TaskStore {
        let today = Local::now().date_naive();
        let mut store = TaskStore::new("Sample Board");

        let mut sprint = Task::new(
            "Sprint planning",
            today - Duration::days(1),
            today + Duration::days(1),
        );
        sprint.category = Category::InProgress;

        let api = Task::new(
            "API integration",
            today + Duration::days(2),
            today + Duration::days(9),
        );

        let mut design = Task::new(
            "Design review",
            today + Duration::days(3),
            today + Duration::days(4),
        );
        design.category = Category::Review;

        let mut retro = Task::new(
            "Retro notes",
            today - Duration::days(6),
            today - Duration::days(5),
        );
        retro.category = Category::Completed;

        for task in [sprint, api, design, retro] {
            let _ = store.create(task);
        }
        store
    }

    // --- File operations ---

    pub fn new_board(&mut self) {
        if !self.store.tasks.is_empty() {
            let confirm = rfd::MessageDialog::new()
                .set_title("New Board")
                .set_description("Discard the current board and start fresh?")
                .set_buttons(rfd::MessageButtons::YesNo)
                .show();
            if confirm != rfd::MessageDialogResult::Yes {
                return;
            }
        }
        self.store = TaskStore::new("Untitled Board");
        self.file_path = None;
        self.editor_draft = None;
        self.gesture = None;
        self.mark_dirty();
        self.status_message = "New board created".to_string();
    }

    pub fn open_board(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Board Files", &["json"])
            .pick_file()
        {
            match io::load_store(&path) {
                Ok(store) => {
                    self.store = store;
                    self.file_path = Some(path);
                    self.editor_draft = None;
                    self.gesture = None;
                    self.mark_dirty();
                    self.status_message = "Board loaded".to_string();
                }
                Err(e) => {
                    self.status_message = format!("Error loading: {}", e);
                }
            }
        }
    }

    pub fn save_board(&mut self) {
        if let Some(path) = self.file_path.clone() {
            self.store.touch();
            match io::save_store(&self.store, &path) {
                Ok(()) => self.status_message = "Board saved".to_string(),
                Err(e) => self.status_message = format!("Error saving: {}", e),
            }
        } else {
            self.save_board_as();
        }
    }

    pub fn save_board_as(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Board Files", &["json"])
            .set_file_name(format!("{}.json", self.store.name))
            .save_file()
        {
            self.file_path = Some(path.clone());
            self.store.touch();
            match io::save_store(&self.store, &path) {
                Ok(()) => self.status_message = "Board saved".to_string(),
                Err(e) => self.status_message = format!("Error saving: {}", e),
            }
        }
    }

    pub fn import_csv(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv", "txt"])
            .pick_file()
        {
            match io::csv_import::import_csv(&path) {
                Ok((tasks, skipped)) => {
                    let count = tasks.len();
                    for task in tasks {
                        let _ = self.store.create(task);
                    }
                    self.mark_dirty();
                    if skipped > 0 {
                        self.status_message =
                            format!("Imported {} tasks ({} rows skipped)", count, skipped);
                    } else {
                        self.status_message = format!("Imported {} tasks", count);
                    }
                }
                Err(e) => {
                    self.status_message = format!("CSV import failed: {}", e);
                }
            }
        }
    }

    pub fn export_csv(&mut self) {
        if self.store.tasks.is_empty() {
            self.status_message = "Nothing to export — board has no tasks".to_string();
            return;
        }

        let default_name = format!("{}.csv", self.store.name);
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .set_file_name(default_name)
            .save_file()
        {
            match io::csv_export::export_csv(&self.store.tasks, &path) {
                Ok(count) => {
                    self.status_message = format!("Exported {} tasks to CSV", count);
                }
                Err(e) => {
                    self.status_message = format!("CSV export failed: {}", e);
                }
            }
        }
    }

    // --- Month navigation ---

    pub fn prev_month(&mut self) {
        self.anchor_month = add_months(self.anchor_month, -1);
    }

    pub fn next_month(&mut self) {
        self.anchor_month = add_months(self.anchor_month, 1);
    }

    pub fn go_to_today(&mut self) {
        self.anchor_month = first_of_month(Local::now().date_naive());
    }

    // --- Task operations ---

    pub fn create_task_from_dialog(&mut self) {
        let name = if self.new_task_name.trim().is_empty() {
            "New Task".to_string()
        } else {
            self.new_task_name.clone()
        };

        let mut task = Task::new(name, self.new_task_start_date, self.new_task_end_date);
        task.category = self.new_task_category;
        let id = task.id;
        match self.store.create(task) {
            Ok(()) => {
                self.store.set_selected(Some(id));
                self.editor_draft = self.store.selected_task().cloned();
                self.mark_dirty();
                self.status_message = "Task added".to_string();
            }
            Err(e) => {
                self.status_message = format!("Not added: {}", e);
            }
        }
        self.reset_dialog_fields();
    }

    pub fn delete_task(&mut self, id: Uuid) {
        if let Some(name) = self.store.get(id).map(|t| t.name.clone()) {
            self.store.delete(id);
            if self.editor_draft.as_ref().map(|t| t.id) == Some(id) {
                self.editor_draft = None;
            }
            self.mark_dirty();
            self.status_message = format!("Deleted '{}'", name);
        }
    }

    fn reset_dialog_fields(&mut self) {
        let today = Local::now().date_naive();
        self.new_task_name = String::new();
        self.new_task_category = Category::Todo;
        self.new_task_start_date = today;
        self.new_task_end_date = today + Duration::days(1);
    }

    /// Push the editor's working copy through the store. Invalid drafts are
    /// reported but stay in the editor so the user can keep typing.
    fn apply_editor_draft(&mut self) {
        if let Some(draft) = self.editor_draft.clone() {
            match self.store.update(draft) {
                Ok(true) => {
                    self.mark_dirty();
                    self.status_message = "Task updated".to_string();
                }
                Ok(false) => {}
                Err(e) => {
                    self.status_message = format!("Not saved: {}", e);
                }
            }
        }
    }

    /// Reload the draft whenever the selection moved to a different task.
    fn sync_editor_draft(&mut self) {
        let draft_id = self.editor_draft.as_ref().map(|t| t.id);
        if draft_id != self.store.selected {
            self.editor_draft = self.store.selected_task().cloned();
        }
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
        self.last_change = Instant::now();
    }

    /// Debounced autosave: waits until edits stop, then writes once. A failed
    /// write is logged, not retried every frame.
    fn maybe_autosave(&mut self, ctx: &egui::Context) {
        if !self.dirty {
            return;
        }
        if self.last_change.elapsed() >= AUTOSAVE_DEBOUNCE {
            self.dirty = false;
            match io::save_store(&self.store, &self.autosave_path) {
                Ok(()) => log::info!("autosaved board to {}", self.autosave_path.display()),
                Err(e) => log::warn!("autosave failed: {}", e),
            }
        } else {
            // Wake up again once the debounce window has passed.
            ctx.request_repaint_after(AUTOSAVE_DEBOUNCE);
        }
    }
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(date.year(), date.month(), 1).unwrap_or(date)
}

fn add_months(anchor: NaiveDate, delta: i32) -> NaiveDate {
    let mut year = anchor.year();
    let mut month = anchor.month() as i32 + delta;
    while month < 1 {
        month += 12;
        year -= 1;
    }
    while month > 12 {
        month -= 12;
        year += 1;
    }
    NaiveDate::from_ymd_opt(year, month as u32, 1).unwrap_or(anchor)
}

impl eframe::App for TaskBoardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Keyboard shortcuts, handled outside panel closures to avoid borrow issues
        if ctx.input(|i| i.modifiers.ctrl && i.key_pressed(egui::Key::S)) {
            self.save_board();
        }
        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) && self.gesture.is_some() {
            self.gesture = None;
            self.status_message = "Gesture cancelled".to_string();
        }

        // Keep the editor draft pointed at the current selection.
        self.sync_editor_draft();

        let today = Local::now().date_naive();

        // Top panel: toolbar
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui::toolbar::show_toolbar(self, ui);
        });

        // Bottom panel: status bar
        egui::TopBottomPanel::bottom("status_bar")
            .exact_height(24.0)
            .frame(
                egui::Frame::default()
                    .fill(theme::BG_HEADER)
                    .inner_margin(egui::Margin::symmetric(10.0, 0.0)),
            )
            .show(ctx, |ui| {
                ui.horizontal_centered(|ui| {
                    ui.label(
                        egui::RichText::new(&self.status_message)
                            .size(11.0)
                            .color(theme::TEXT_SECONDARY),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let visible = self.store.visible_tasks(today).len();
                        let total = self.store.tasks.len();
                        let counts = if visible == total {
                            format!("Tasks: {}", total)
                        } else {
                            format!("Tasks: {} of {}", visible, total)
                        };
                        ui.label(
                            egui::RichText::new(counts)
                                .size(10.5)
                                .color(theme::TEXT_DIM),
                        );
                    });
                });
            });

        // Left panel: editor + filters + task list
        let mut panel_action = ui::task_panel::TaskPanelAction::None;
        let mut editor_action = ui::task_editor::EditorAction::None;
        let mut filter_update = None;
        egui::SidePanel::left("task_panel")
            .default_width(280.0)
            .min_width(220.0)
            .max_width(420.0)
            .resizable(true)
            .frame(
                egui::Frame::default()
                    .fill(theme::BG_PANEL)
                    .inner_margin(egui::Margin::same(8.0))
                    .stroke(egui::Stroke::new(1.0, theme::BORDER_SUBTLE)),
            )
            .show(ctx, |ui| {
                if let Some(draft) = self.editor_draft.as_mut() {
                    editor_action = ui::task_editor::show_task_editor(draft, ui);
                    ui.add_space(4.0);
                    ui.separator();
                    ui.add_space(2.0);
                }

                filter_update = ui::filter_bar::show_filter_bar(&self.store.filter, ui);
                ui.add_space(2.0);

                let visible = self.store.visible_tasks(today);
                panel_action = ui::task_panel::show_task_panel(
                    &visible,
                    self.store.tasks.len(),
                    self.store.selected,
                    ui,
                );
            });

        // Handle task list actions
        match panel_action {
            ui::task_panel::TaskPanelAction::Select(id) => {
                self.store.set_selected(Some(id));
                self.sync_editor_draft();
            }
            ui::task_panel::TaskPanelAction::Delete(id) => {
                self.delete_task(id);
            }
            ui::task_panel::TaskPanelAction::Add => {
                self.show_add_task = true;
            }
            ui::task_panel::TaskPanelAction::None => {}
        }

        match editor_action {
            ui::task_editor::EditorAction::Changed => {
                self.apply_editor_draft();
            }
            ui::task_editor::EditorAction::Delete(id) => {
                self.delete_task(id);
            }
            ui::task_editor::EditorAction::None => {}
        }

        if let Some(update) = filter_update {
            self.store.set_filters(update);
            self.mark_dirty();
        }

        // Central panel: month grid
        let grid_frame = egui::Frame::default()
            .fill(theme::BG_DARK)
            .inner_margin(egui::Margin::same(8.0));
        let interaction = egui::CentralPanel::default()
            .frame(grid_frame)
            .show(ctx, |ui| {
                let visible = self.store.visible_tasks(today);
                ui::month_grid::show_month_grid(
                    &visible,
                    self.anchor_month,
                    today,
                    self.store.selected,
                    &mut self.gesture,
                    ui,
                )
            })
            .inner;

        if let Some(id) = interaction.select_task {
            self.store.set_selected(Some(id));
            self.sync_editor_draft();
        }
        if interaction.clear_selection {
            self.store.set_selected(None);
            self.editor_draft = None;
        }
        if let Some((id, range)) = interaction.task_dragged {
            if let Some(mut task) = self.store.get(id).cloned() {
                task.set_range(range);
                match self.store.update(task) {
                    Ok(true) => {
                        self.mark_dirty();
                        // The stored dates moved under the draft; reload it.
                        self.editor_draft = self.store.selected_task().cloned();
                        if let Some(task) = self.store.get(id) {
                            self.status_message = format!(
                                "Updated '{}' ({} → {})",
                                task.name,
                                task.start.format("%Y-%m-%d"),
                                task.end.format("%Y-%m-%d")
                            );
                        }
                    }
                    Ok(false) => {}
                    Err(e) => {
                        self.status_message = format!("Not saved: {}", e);
                    }
                }
            }
        }
        if let Some(range) = interaction.range_selected {
            self.new_task_start_date = range.start;
            self.new_task_end_date = range.end;
            self.show_add_task = true;
        }

        // Dialogs
        if self.show_add_task {
            ui::dialogs::show_add_task_dialog(self, ctx);
        }
        if self.show_about {
            ui::dialogs::show_about_dialog(self, ctx);
        }
        if self.show_csv_help {
            ui::dialogs::show_csv_help_dialog(self, ctx);
        }

        self.maybe_autosave(ctx);
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        if self.dirty {
            if let Err(e) = io::save_store(&self.store, &self.autosave_path) {
                log::warn!("final autosave failed: {}", e);
            }
        }
    }
}
