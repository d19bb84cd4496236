use egui::{menu, RichText, Ui};

use crate::app::TaskBoardApp;
use crate::ui::theme;

/// Render the top toolbar: menus, month navigation, board name.
pub fn show_toolbar(app: &mut TaskBoardApp, ui: &mut Ui) {
    menu::bar(ui, |ui| {
        ui.menu_button(RichText::new("  File  ").font(theme::font_menu()), |ui| {
            if ui.button("  New Board").clicked() {
                app.new_board();
                ui.close_menu();
            }
            if ui.button("  Open...").clicked() {
                app.open_board();
                ui.close_menu();
            }
            ui.separator();
            if ui.button("  Save          Ctrl+S").clicked() {
                app.save_board();
                ui.close_menu();
            }
            if ui.button("  Save As...").clicked() {
                app.save_board_as();
                ui.close_menu();
            }
            ui.separator();
            if ui.button("  Import CSV...").clicked() {
                app.import_csv();
                ui.close_menu();
            }
            if ui.button("  Export CSV...").clicked() {
                app.export_csv();
                ui.close_menu();
            }
            if ui.button("  CSV Format Help").clicked() {
                app.show_csv_help = true;
                ui.close_menu();
            }
            ui.separator();
            if ui.button("  Open Data Folder").clicked() {
                if let Some(dir) = app.autosave_path.parent() {
                    let _ = open::that(dir);
                }
                ui.close_menu();
            }
        });

        ui.menu_button(RichText::new("  View  ").font(theme::font_menu()), |ui| {
            if ui.button("  Previous Month").clicked() {
                app.prev_month();
                ui.close_menu();
            }
            if ui.button("  Today").clicked() {
                app.go_to_today();
                ui.close_menu();
            }
            if ui.button("  Next Month").clicked() {
                app.next_month();
                ui.close_menu();
            }
        });

        ui.menu_button(RichText::new("  Help  ").font(theme::font_menu()), |ui| {
            if ui.button("About").clicked() {
                app.show_about = true;
                ui.close_menu();
            }
        });

        ui.separator();

        // Inline month navigation
        if ui
            .button(RichText::new(egui_phosphor::regular::CARET_LEFT).size(12.0))
            .on_hover_text("Previous month")
            .clicked()
        {
            app.prev_month();
        }
        if ui
            .button(RichText::new("Today").size(11.0))
            .on_hover_text("Jump to the current month")
            .clicked()
        {
            app.go_to_today();
        }
        if ui
            .button(RichText::new(egui_phosphor::regular::CARET_RIGHT).size(12.0))
            .on_hover_text("Next month")
            .clicked()
        {
            app.next_month();
        }
        ui.label(
            RichText::new(app.anchor_month.format("%B %Y").to_string())
                .font(theme::font_header())
                .strong(),
        );

        // Right-aligned board name
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let modified = if app.file_path.is_some() { "" } else { " (unsaved)" };
            ui.label(
                RichText::new(format!("{}{}", app.store.name, modified))
                    .size(11.0)
                    .weak(),
            );
        });
    });
}
