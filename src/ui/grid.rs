//! Card grid

use eframe::egui;

use super::image::ArticleImage;
use crate::core::view::Card;

/// Grid of article cards
pub struct GridPanel;

impl GridPanel {
    /// Show the cards. Returns the location of a clicked card.
    pub fn show(ui: &mut egui::Ui, cards: &[Card], card_width: f32) -> Option<String> {
        let mut clicked = None;

        ui.horizontal_wrapped(|ui| {
            ui.spacing_mut().item_spacing = egui::vec2(16.0, 16.0);
            for card in cards {
                if Self::show_card(ui, card, card_width).clicked() {
                    clicked = card.href.clone();
                }
            }
        });

        clicked
    }

    fn show_card(ui: &mut egui::Ui, card: &Card, width: f32) -> egui::Response {
        let frame = egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.vertical(|ui| {
                ui.set_width(width);
                ArticleImage::show(ui, &card.image, egui::vec2(width, width * 0.6));
                ui.add_space(6.0);
                ui.label(egui::RichText::new(&card.date).small().weak());
                ui.add(egui::Label::new(egui::RichText::new(&card.title).strong().size(16.0)).wrap());
            });
        });

        // Articles without an identifier have nowhere to go
        if card.href.is_none() {
            return frame.response;
        }

        frame
            .response
            .interact(egui::Sense::click())
            .on_hover_cursor(egui::CursorIcon::PointingHand)
    }
}
