//! Single-article view

use eframe::egui;
use egui_commonmark::{CommonMarkCache, CommonMarkViewer};

use super::image::ArticleImage;
use crate::core::markup;
use crate::core::view::DetailView;

/// Rendering state for article bodies, kept across frames
#[derive(Default)]
pub struct BodyCache {
    commonmark: CommonMarkCache,
    source: String,
    markdown: String,
}

impl BodyCache {
    /// Markdown for `content`, converting HTML bodies only when the body changes
    fn markdown_for(&mut self, content: &str) -> &str {
        if self.source != content {
            self.markdown = markup::to_markdown(content).into_owned();
            self.source = content.to_string();
        }
        &self.markdown
    }
}

/// Article detail panel
pub struct DetailPanel;

impl DetailPanel {
    /// Show the article. Returns the back link location when clicked.
    pub fn show(ui: &mut egui::Ui, detail: &DetailView, cache: &mut BodyCache) -> Option<String> {
        let mut navigate = None;

        ui.vertical(|ui| {
            if ui.link(&detail.back_label).clicked() {
                navigate = Some(detail.back_href.clone());
            }
            ui.add_space(12.0);

            ui.heading(egui::RichText::new(&detail.title).size(28.0));
            ui.label(egui::RichText::new(&detail.meta).weak());
            ui.add_space(12.0);

            let width = ui.available_width().min(800.0);
            ArticleImage::show(ui, &detail.image, egui::vec2(width, width * 0.5));
            ui.add_space(12.0);

            cache.markdown_for(&detail.content);
            CommonMarkViewer::new().show(ui, &mut cache.commonmark, &cache.markdown);
        });

        navigate
    }
}
