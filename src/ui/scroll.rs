//! Scroll-to-top control

use eframe::egui;

/// Visibility and pending request of the scroll-to-top control
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollToTop {
    threshold: f32,
    visible: bool,
    requested: bool,
}

impl ScrollToTop {
    pub fn new(threshold: f32) -> Self {
        Self {
            threshold,
            visible: false,
            requested: false,
        }
    }

    /// Track the content's vertical scroll offset
    pub fn update(&mut self, offset: f32) {
        self.visible = offset > self.threshold;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn request(&mut self) {
        self.requested = true;
    }

    /// Consume a pending request
    pub fn take_request(&mut self) -> bool {
        std::mem::take(&mut self.requested)
    }

    /// Floating button in the bottom-right corner, shown when visible
    pub fn show(&mut self, ctx: &egui::Context) {
        if !self.is_visible() {
            return;
        }

        egui::Area::new(egui::Id::new("scroll_to_top"))
            .anchor(egui::Align2::RIGHT_BOTTOM, egui::vec2(-24.0, -24.0))
            .show(ctx, |ui| {
                if ui
                    .button(egui::RichText::new("\u{2B06}").size(20.0))
                    .on_hover_text("Back to top")
                    .clicked()
                {
                    self.request();
                }
            });
    }
}
