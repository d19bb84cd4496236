use egui::{Color32, Context, RichText, Window};

use crate::app::TaskBoardApp;
use crate::model::Category;
use crate::ui::theme;

/// Render the "Add Task" dialog. Opens prefilled when a drag-select on the
/// grid finishes; the same dialog serves the Add Task button.
pub fn show_add_task_dialog(app: &mut TaskBoardApp, ctx: &Context) {
    let mut should_close = false;
    Window::new(RichText::new("Add Task").strong().size(14.0))
        .resizable(false)
        .collapsible(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .fixed_size([320.0, 0.0])
        .show(ctx, |ui| {
            ui.visuals_mut().faint_bg_color = Color32::TRANSPARENT;
            ui.visuals_mut().striped = false;

            ui.add_space(4.0);

            egui::Grid::new("add_task_grid")
                .num_columns(2)
                .striped(false)
                .spacing([12.0, 8.0])
                .show(ui, |ui| {
                    ui.label(RichText::new("Name").color(theme::TEXT_SECONDARY));
                    ui.add_sized(
                        [220.0, 24.0],
                        egui::TextEdit::singleline(&mut app.new_task_name)
                            .hint_text("Task name...")
                            .text_color(theme::TEXT_PRIMARY),
                    );
                    ui.end_row();

                    ui.label(RichText::new("Category").color(theme::TEXT_SECONDARY));
                    let current = RichText::new(app.new_task_category.label())
                        .color(theme::category_color(app.new_task_category));
                    egui::ComboBox::from_id_salt("dlg_category")
                        .selected_text(current)
                        .show_ui(ui, |ui| {
                            for category in Category::ALL {
                                let label = RichText::new(category.label())
                                    .color(theme::category_color(category));
                                ui.selectable_value(&mut app.new_task_category, category, label);
                            }
                        });
                    ui.end_row();

                    ui.label(RichText::new("Start").color(theme::TEXT_SECONDARY));
                    let start = ui.add(
                        egui_extras::DatePickerButton::new(&mut app.new_task_start_date)
                            .id_salt("dlg_dp_start"),
                    );
                    if start.changed() && app.new_task_start_date > app.new_task_end_date {
                        app.new_task_end_date = app.new_task_start_date;
                    }
                    ui.end_row();

                    ui.label(RichText::new("End").color(theme::TEXT_SECONDARY));
                    let end = ui.add(
                        egui_extras::DatePickerButton::new(&mut app.new_task_end_date)
                            .id_salt("dlg_dp_end"),
                    );
                    if end.changed() && app.new_task_end_date < app.new_task_start_date {
                        app.new_task_start_date = app.new_task_end_date;
                    }
                    ui.end_row();
                });

            ui.add_space(6.0);
            ui.separator();
            ui.add_space(4.0);

            ui.horizontal(|ui| {
                let create_btn = egui::Button::new(RichText::new("Create").color(Color32::WHITE))
                    .fill(theme::ACCENT)
                    .rounding(egui::Rounding::same(4.0));
                if ui.add_sized([80.0, 28.0], create_btn).clicked() {
                    app.create_task_from_dialog();
                    should_close = true;
                }
                if ui
                    .add_sized([80.0, 28.0], egui::Button::new("Cancel"))
                    .clicked()
                {
                    should_close = true;
                }
            });
            ui.add_space(2.0);
        });

    if should_close || ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        app.show_add_task = false;
    }
}

/// Render the "About" dialog.
pub fn show_about_dialog(app: &mut TaskBoardApp, ctx: &Context) {
    let mut should_close = false;
    Window::new("About")
        .resizable(false)
        .collapsible(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .fixed_size([260.0, 150.0])
        .show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(12.0);
                ui.heading(RichText::new("Rust Task Board").strong());
                ui.add_space(2.0);
                ui.label(
                    RichText::new(format!("Version {}", env!("CARGO_PKG_VERSION")))
                        .color(theme::TEXT_SECONDARY),
                );
                ui.add_space(10.0);
                ui.label("A calendar task board");
                ui.label("built with Rust and egui.");
                ui.add_space(14.0);
                if ui
                    .add_sized([100.0, 28.0], egui::Button::new("Close"))
                    .clicked()
                {
                    should_close = true;
                }
            });
        });
    if should_close || ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        app.show_about = false;
    }
}

/// Render the "CSV Import Format" help dialog.
pub fn show_csv_help_dialog(app: &mut TaskBoardApp, ctx: &Context) {
    let mut should_close = false;

    Window::new(RichText::new("CSV Import Format").strong().size(14.0))
        .resizable(true)
        .collapsible(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .default_size([520.0, 420.0])
        .show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.add_space(4.0);

                ui.label(RichText::new("Delimiters").strong());
                ui.label("The delimiter is auto-detected: comma (,), semicolon (;), or tab.");
                ui.add_space(8.0);

                ui.label(RichText::new("Required Columns").strong());
                ui.add_space(2.0);
                egui::Grid::new("csv_required")
                    .num_columns(2)
                    .striped(true)
                    .spacing([12.0, 4.0])
                    .show(ui, |ui| {
                        ui.label(RichText::new("Column").underline());
                        ui.label(RichText::new("Accepted headers (case-insensitive)").underline());
                        ui.end_row();

                        ui.label(RichText::new("Task Name").strong());
                        ui.label("Name, Task, Task Name, Task Label, Label, Title, Activity");
                        ui.end_row();

                        ui.label(RichText::new("Start Date").strong());
                        ui.label("Start, Start Date, From, Begin, Begin Date");
                        ui.end_row();

                        ui.label(RichText::new("End Date").strong());
                        ui.label("End, End Date, To, Finish, Finish Date, Due, Due Date");
                        ui.end_row();
                    });
                ui.add_space(8.0);

                ui.label(RichText::new("Optional Columns").strong());
                ui.add_space(2.0);
                egui::Grid::new("csv_optional")
                    .num_columns(3)
                    .striped(true)
                    .spacing([12.0, 4.0])
                    .show(ui, |ui| {
                        ui.label(RichText::new("Column").underline());
                        ui.label(RichText::new("Accepted headers").underline());
                        ui.label(RichText::new("Accepted values").underline());
                        ui.end_row();

                        ui.label(RichText::new("Category").strong());
                        ui.label("Category, Status, State, Lane, Column, Stage");
                        ui.label("To Do / In Progress / Doing / Review / QA / Done / Completed");
                        ui.end_row();
                    });
                ui.add_space(8.0);

                ui.label(RichText::new("Supported Date Formats").strong());
                ui.add_space(2.0);
                for fmt in &[
                    "YYYY-MM-DD   (e.g. 2025-06-15)",
                    "DD/MM/YYYY   (e.g. 15/06/2025)",
                    "MM/DD/YYYY   (e.g. 06/15/2025)",
                    "DD-MM-YYYY   (e.g. 15-06-2025)",
                    "DD.MM.YYYY   (e.g. 15.06.2025)",
                    "YYYY/MM/DD   (e.g. 2025/06/15)",
                    "MM-DD-YYYY   (e.g. 06-15-2025)",
                ] {
                    ui.label(RichText::new(*fmt).monospace().size(11.0));
                }
                ui.add_space(8.0);

                ui.label(RichText::new("Notes").strong());
                ui.add_space(2.0);
                let notes = [
                    "• Header matching is case-insensitive and ignores spaces, hyphens and underscores.",
                    "• An unrecognized category value falls back to To Do.",
                    "• A start date after the end date is swapped, not refused.",
                    "• Rows with a missing name or an invalid start or end date are skipped and counted.",
                ];
                for note in &notes {
                    ui.label(RichText::new(*note).small());
                }
                ui.add_space(10.0);

                ui.label(RichText::new("Minimal Example (semicolon-delimited)").strong());
                ui.add_space(2.0);
                let example = "Name;Start;End;Category\n\
                               Design review;2025-06-02;2025-06-04;Review\n\
                               Fix login bug;2025-06-03;2025-06-06;In Progress\n\
                               Ship release;2025-06-10;2025-06-10;To Do";
                egui::Frame::dark_canvas(ui.style()).show(ui, |ui| {
                    ui.add(
                        egui::TextEdit::multiline(&mut example.to_string())
                            .font(egui::TextStyle::Monospace)
                            .desired_width(f32::INFINITY)
                            .interactive(false),
                    );
                });
                ui.add_space(8.0);
            });

            ui.separator();
            ui.add_space(4.0);
            ui.horizontal(|ui| {
                if ui
                    .add_sized([80.0, 28.0], egui::Button::new("Close"))
                    .clicked()
                {
                    should_close = true;
                }
            });
            ui.add_space(2.0);
        });

    if should_close || ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        app.show_csv_help = false;
    }
}
