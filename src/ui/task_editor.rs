use egui::{Color32, RichText, Ui};
use uuid::Uuid;

use crate::model::{Category, Task};
use crate::ui::theme;

/// Actions the editor can request.
pub enum EditorAction {
    None,
    Changed,
    Delete(Uuid),
}

/// Render the inline editor for the selected task.
///
/// `task` is the app's draft copy, not the stored task: the caller
/// commits it through the store on `Changed` and a refused commit keeps
/// the draft on screen so the user can fix it.
pub fn show_task_editor(task: &mut Task, ui: &mut Ui) -> EditorAction {
    let mut action = EditorAction::None;

    ui.add_space(6.0);
    ui.horizontal(|ui| {
        ui.label(
            RichText::new("Edit Task")
                .strong()
                .size(13.0)
                .color(theme::TEXT_PRIMARY),
        );
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let del = ui.add(
                egui::Button::new(
                    RichText::new(egui_phosphor::regular::TRASH)
                        .size(12.0)
                        .color(theme::TEXT_DIM),
                )
                .frame(false),
            );
            if del.on_hover_text("Delete task").clicked() {
                action = EditorAction::Delete(task.id);
            }
        });
    });
    ui.add_space(4.0);

    let frame = egui::Frame {
        fill: theme::BG_DARK,
        rounding: egui::Rounding::same(4.0),
        inner_margin: egui::Margin::same(8.0),
        outer_margin: egui::Margin::ZERO,
        stroke: egui::Stroke::new(1.0, theme::BORDER_SUBTLE),
        shadow: egui::epaint::Shadow::NONE,
    };

    frame.show(ui, |ui| {
        ui.spacing_mut().item_spacing.y = 6.0;

        // ── Task Name ──────────────────────────────────────────────────
        ui.label(
            RichText::new("Name")
                .size(10.0)
                .color(theme::TEXT_DIM)
                .strong(),
        );
        let name_edit = ui.add_sized(
            [ui.available_width(), 24.0],
            egui::TextEdit::singleline(&mut task.name)
                .font(egui::FontId::proportional(12.0))
                .text_color(theme::TEXT_PRIMARY),
        );
        if name_edit.changed() {
            action = EditorAction::Changed;
        }

        ui.add_space(2.0);

        // ── Category ──────────────────────────────────────────────────
        ui.label(
            RichText::new("Category")
                .size(10.0)
                .color(theme::TEXT_DIM)
                .strong(),
        );
        let current = RichText::new(task.category.label())
            .size(11.0)
            .color(theme::category_color(task.category));
        egui::ComboBox::from_id_salt("category_combo")
            .selected_text(current)
            .width(ui.available_width())
            .show_ui(ui, |ui| {
                for category in Category::ALL {
                    let label = RichText::new(category.label())
                        .size(11.0)
                        .color(theme::category_color(category));
                    if ui
                        .selectable_value(&mut task.category, category, label)
                        .changed()
                    {
                        action = EditorAction::Changed;
                    }
                }
            });

        ui.add_space(2.0);

        // ── Dates ──────────────────────────────────────────────────────
        ui.horizontal(|ui| {
            ui.vertical(|ui| {
                ui.label(
                    RichText::new("Start")
                        .size(10.0)
                        .color(theme::TEXT_DIM)
                        .strong(),
                );
                let resp = ui.add(
                    egui_extras::DatePickerButton::new(&mut task.start).id_salt("dp_start"),
                );
                if resp.changed() {
                    if task.start > task.end {
                        task.end = task.start;
                    }
                    action = EditorAction::Changed;
                }
            });

            ui.add_space(8.0);

            ui.vertical(|ui| {
                ui.label(
                    RichText::new("End")
                        .size(10.0)
                        .color(theme::TEXT_DIM)
                        .strong(),
                );
                let resp =
                    ui.add(egui_extras::DatePickerButton::new(&mut task.end).id_salt("dp_end"));
                if resp.changed() {
                    if task.end < task.start {
                        task.start = task.end;
                    }
                    action = EditorAction::Changed;
                }
            });
        });

        ui.add_space(2.0);

        ui.label(
            RichText::new(format!("Created {}", task.created.format("%Y-%m-%d")))
                .size(9.5)
                .color(theme::TEXT_DIM),
        );

        if task.name.trim().is_empty() {
            ui.label(
                RichText::new("Name cannot be empty — changes are not saved")
                    .size(9.5)
                    .color(Color32::from_rgb(240, 160, 80)),
            );
        }
    });

    action
}
