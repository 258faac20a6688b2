//! Search box and sort selector

use eframe::egui;

use crate::core::catalog::SortKey;
use crate::core::session::Controls;

/// Controls bar shown above the grid
pub struct ControlsBar;

impl ControlsBar {
    /// Show the controls. Returns true when the query or sort changed.
    pub fn show(ui: &mut egui::Ui, controls: &mut Controls) -> bool {
        let mut changed = false;

        ui.horizontal(|ui| {
            ui.label("\u{1F50D}");
            changed |= ui
                .add(
                    egui::TextEdit::singleline(&mut controls.query)
                        .hint_text("Search by title or author...")
                        .desired_width(280.0),
                )
                .changed();

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                egui::ComboBox::from_id_salt("sort_select")
                    .selected_text(controls.sort.label())
                    .show_ui(ui, |ui| {
                        for key in SortKey::ALL {
                            changed |= ui
                                .selectable_value(&mut controls.sort, key, key.label())
                                .changed();
                        }
                    });
                ui.label("Sort:");
            });
        });

        changed
    }
}
