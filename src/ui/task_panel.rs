use egui::{Color32, RichText, Ui};
use uuid::Uuid;

use crate::model::Task;
use crate::ui::theme;

/// Actions that the task list panel can request.
pub enum TaskPanelAction {
    None,
    Select(Uuid),
    Delete(Uuid),
    Add,
}

/// Render the left-side task list. `tasks` is the filtered visible set;
/// `total` is the board size, so the header can show "3 of 7".
pub fn show_task_panel(
    tasks: &[&Task],
    total: usize,
    selected_task: Option<Uuid>,
    ui: &mut Ui,
) -> TaskPanelAction {
    let mut action = TaskPanelAction::None;

    ui.add_space(2.0);
    ui.horizontal(|ui| {
        ui.label(
            RichText::new("Tasks")
                .strong()
                .size(15.0)
                .color(theme::TEXT_PRIMARY),
        );
        ui.add_space(4.0);
        let count = if tasks.len() == total {
            format!("({})", total)
        } else {
            format!("({} of {})", tasks.len(), total)
        };
        ui.label(RichText::new(count).size(11.0).color(theme::TEXT_DIM));
    });
    ui.add_space(4.0);

    // Accent-styled add button
    let btn = egui::Button::new(
        RichText::new(format!("{}  Add Task", egui_phosphor::regular::PLUS))
            .color(Color32::WHITE)
            .size(12.0),
    )
    .fill(theme::ACCENT)
    .rounding(egui::Rounding::same(5.0));
    if ui.add_sized([ui.available_width(), 30.0], btn).clicked() {
        action = TaskPanelAction::Add;
    }

    ui.add_space(6.0);
    ui.separator();
    ui.add_space(2.0);

    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            for (i, task) in tasks.iter().enumerate() {
                let is_selected = selected_task == Some(task.id);

                let row_bg = if is_selected {
                    theme::BG_SELECTED
                } else if i % 2 == 0 {
                    theme::BG_PANEL
                } else {
                    theme::BG_DARK
                };

                let frame = egui::Frame {
                    fill: row_bg,
                    rounding: egui::Rounding::same(4.0),
                    inner_margin: egui::Margin::symmetric(6.0, 4.0),
                    outer_margin: egui::Margin::ZERO,
                    stroke: egui::Stroke::NONE,
                    shadow: egui::epaint::Shadow::NONE,
                };

                let frame_resp = frame.show(ui, |ui| {
                    ui.horizontal(|ui| {
                        ui.spacing_mut().item_spacing.x = 6.0;

                        // Category dot
                        let (dot_rect, _) =
                            ui.allocate_exact_size(egui::vec2(6.0, 6.0), egui::Sense::hover());
                        ui.painter().circle_filled(
                            dot_rect.center(),
                            3.0,
                            theme::category_color(task.category),
                        );

                        let name_text =
                            RichText::new(&task.name).size(12.0).color(if is_selected {
                                Color32::WHITE
                            } else {
                                theme::TEXT_PRIMARY
                            });
                        ui.add(egui::Label::new(name_text).truncate());

                        ui.with_layout(
                            egui::Layout::right_to_left(egui::Align::Center),
                            |ui| {
                                ui.spacing_mut().item_spacing.x = 4.0;

                                let del_btn = ui.add(
                                    egui::Button::new(
                                        RichText::new("✕").size(10.0).color(theme::TEXT_DIM),
                                    )
                                    .frame(false),
                                );
                                if del_btn.on_hover_text("Delete task").clicked() {
                                    action = TaskPanelAction::Delete(task.id);
                                }

                                // Dates (compact)
                                ui.label(
                                    RichText::new(task.end.format("%m/%d").to_string())
                                        .size(10.0)
                                        .color(theme::TEXT_SECONDARY),
                                );
                                ui.label(RichText::new("→").size(9.0).color(theme::TEXT_DIM));
                                ui.label(
                                    RichText::new(task.start.format("%m/%d").to_string())
                                        .size(10.0)
                                        .color(theme::TEXT_SECONDARY),
                                );
                            },
                        );
                    });
                });

                let row_rect = frame_resp.response.rect;
                let row_click = ui.interact(
                    row_rect,
                    egui::Id::new(("task-row", task.id)),
                    egui::Sense::click(),
                );
                if row_click.hovered() && !is_selected {
                    ui.painter()
                        .rect_filled(row_rect, 4.0, theme::BG_ROW_HOVER);
                }
                if row_click.clicked() {
                    action = TaskPanelAction::Select(task.id);
                }
                row_click.on_hover_text(task.category.label());

                ui.add_space(1.0);
            }

            if tasks.is_empty() {
                ui.add_space(8.0);
                let hint = if total == 0 {
                    "No tasks yet. Drag across days\nin the calendar to create one."
                } else {
                    "No tasks match the current filters."
                };
                ui.vertical_centered(|ui| {
                    ui.label(RichText::new(hint).size(11.0).color(theme::TEXT_DIM));
                });
            }
        });

    action
}
