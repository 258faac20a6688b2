//! Main content area: dispatches a view-model to the matching panel

use eframe::egui;

use super::detail::{BodyCache, DetailPanel};
use super::grid::GridPanel;
use crate::core::view::View;

pub struct ContentPanel;

impl ContentPanel {
    /// Show `view`. Returns a location to navigate to, if one was clicked.
    pub fn show(
        ui: &mut egui::Ui,
        view: &View,
        cache: &mut BodyCache,
        card_width: f32,
    ) -> Option<String> {
        match view {
            View::Grid(cards) => GridPanel::show(ui, cards, card_width),
            View::Detail(detail) => DetailPanel::show(ui, detail, cache),
            View::NoResults { message } | View::LoadFailed { message } => {
                Self::show_message(ui, message);
                None
            }
            View::NotFound {
                message,
                link_href,
                link_label,
            } => {
                let mut navigate = None;
                ui.vertical_centered(|ui| {
                    ui.add_space(50.0);
                    ui.horizontal(|ui| {
                        ui.label(message);
                        if ui.link(link_label).clicked() {
                            navigate = Some(link_href.clone());
                        }
                    });
                });
                navigate
            }
        }
    }

    fn show_message(ui: &mut egui::Ui, message: &str) {
        ui.vertical_centered(|ui| {
            ui.add_space(50.0);
            ui.label(message);
        });
    }
}
