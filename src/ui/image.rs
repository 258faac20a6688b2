//! Article images with placeholder fallback

use std::fmt::Display;

use eframe::egui;

use crate::core::view::ImageRef;

/// Article image widget
pub struct ArticleImage;

impl ArticleImage {
    /// Show `image`, or its fallback once the source has failed to load
    pub fn show(ui: &mut egui::Ui, image: &ImageRef, max_size: egui::Vec2) -> egui::Response {
        let attempt = ui.ctx().try_load_image(&image.src, egui::load::SizeHint::default());
        let uri = choose_uri(image, &attempt);
        ui.add(
            egui::Image::from_uri(uri)
                .max_size(max_size)
                .maintain_aspect_ratio(true)
                .show_loading_spinner(true),
        )
        .on_hover_text(&image.alt)
    }
}

/// The source while it loads or has loaded; the fallback once it failed
fn choose_uri<'a, T, E: Display>(image: &'a ImageRef, attempt: &Result<T, E>) -> &'a str {
    match attempt {
        Err(e) => {
            tracing::debug!("Image {} unavailable ({}), using placeholder", image.src, e);
            image.fallback.as_str()
        }
        Ok(_) => image.src.as_str(),
    }
}
