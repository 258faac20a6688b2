//! Catalog loading, filtering, routing and view-models

pub mod article;
pub mod catalog;
pub mod collate;
pub mod config;
pub mod markup;
pub mod route;
pub mod session;
pub mod source;
pub mod theme;
pub mod view;
