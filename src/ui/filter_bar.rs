use egui::{RichText, Ui};

use crate::model::{Category, DurationWindow, FilterState, FilterUpdate};
use crate::ui::theme;

/// Render the filter controls. Returns a partial update when anything
/// changed this frame; untouched criteria stay `None` so the store keeps
/// their current values.
pub fn show_filter_bar(filter: &FilterState, ui: &mut Ui) -> Option<FilterUpdate> {
    let mut update = FilterUpdate::default();
    let mut changed = false;

    let mut query = filter.search_query.clone();
    let search = ui.add(
        egui::TextEdit::singleline(&mut query)
            .hint_text(format!(
                "{} Search tasks...",
                egui_phosphor::regular::MAGNIFYING_GLASS
            ))
            .desired_width(f32::INFINITY),
    );
    if search.changed() {
        update.search_query = Some(query);
        changed = true;
    }

    ui.add_space(2.0);

    ui.horizontal_wrapped(|ui| {
        for category in Category::ALL {
            let active = filter.categories.contains(&category);
            let text = RichText::new(category.label())
                .font(theme::font_sub())
                .color(if active {
                    theme::category_color(category)
                } else {
                    theme::TEXT_SECONDARY
                });
            if ui.selectable_label(active, text).clicked() {
                let mut categories = filter.categories.clone();
                if active {
                    categories.remove(&category);
                } else {
                    categories.insert(category);
                }
                update.categories = Some(categories);
                changed = true;
            }
        }
    });

    ui.horizontal(|ui| {
        ui.label(
            RichText::new("Show")
                .font(theme::font_sub())
                .color(theme::TEXT_DIM),
        );
        let current = filter.duration.map(|w| w.label()).unwrap_or("Any time");
        egui::ComboBox::from_id_salt("duration_filter")
            .selected_text(RichText::new(current).font(theme::font_header()))
            .show_ui(ui, |ui| {
                if ui
                    .selectable_label(filter.duration.is_none(), "Any time")
                    .clicked()
                {
                    update.duration = Some(None);
                    changed = true;
                }
                for window in DurationWindow::ALL {
                    if ui
                        .selectable_label(filter.duration == Some(window), window.label())
                        .clicked()
                    {
                        update.duration = Some(Some(window));
                        changed = true;
                    }
                }
            });
    });

    if changed {
        Some(update)
    } else {
        None
    }
}
