//! Presentation adapters: egui panels and an HTML writer

pub mod content;
pub mod controls;
pub mod detail;
pub mod grid;
pub mod html;
pub mod image;
pub mod scroll;
