//! Article Browser - searchable, sortable article grid with detail views
//!
//! Loads a JSON article catalog once, then shows either the filtered and
//! sorted grid or a single article, depending on the `id` location parameter.

mod app;
mod core;
mod ui;

use std::path::PathBuf;

use anyhow::{Context, Result};
use app::{AppParts, ArticleBrowserApp};
use clap::Parser;
use eframe::egui;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::core::catalog::{self, SortKey};
use crate::core::config::AppConfig;
use crate::core::route::Route;
use crate::core::session::{Controls, Session};
use crate::core::source::DataSource;
use crate::core::theme::{JsonPreferenceStore, MemoryPreferenceStore, PreferenceStore};
use crate::core::view::ViewBuilder;

#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Catalog document: a file path or an http(s) URL
    #[arg(long)]
    data: Option<String>,
    /// Location to open, e.g. `?id=2` or `index.html`
    #[arg(long)]
    location: Option<String>,
    /// Initial search text
    #[arg(long, default_value = "")]
    query: String,
    /// Initial sort: date-desc, date-asc, title-asc or title-desc
    #[arg(long, default_value = "date-desc")]
    sort: String,
    /// Print the page as HTML to stdout instead of opening a window
    #[arg(long)]
    render_html: bool,
    /// Read configuration from this file instead of the platform config dir
    #[arg(long)]
    config: Option<PathBuf>,
    /// Write the effective configuration to the config file and exit
    #[arg(long)]
    init_config: bool,
}

fn main() -> Result<()> {
    // Initialize logging; stdout is reserved for --render-html output
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let config_path = cli.config.clone().or_else(AppConfig::config_path);
    let mut config = match &config_path {
        Some(path) => AppConfig::load_from(path).unwrap_or_else(|e| {
            tracing::warn!("Using default config, failed to read {}: {}", path.display(), e);
            AppConfig::default()
        }),
        None => AppConfig::default(),
    };

    if let Some(data) = &cli.data {
        config.data_source = data.clone();
    }
    if let Some(location) = &cli.location {
        config.start_location = location.clone();
    }

    if cli.init_config {
        let path = config_path.context("Could not determine config directory")?;
        return config.save_to(&path);
    }

    let source = DataSource::parse(&config.data_source)?;
    let controls = Controls {
        query: cli.query.clone(),
        sort: cli.sort.parse::<SortKey>().unwrap_or_default(),
    };

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;

    // The catalog is loaded before any mode is chosen
    let outcome = runtime.block_on(catalog::load(&source));

    if cli.render_html {
        let views = ViewBuilder::new(source, config.ui.placeholders());
        let session = Session::start(
            outcome,
            Route::from_location(&config.start_location),
            controls,
            views,
        );
        print!("{}", ui::html::render_document(&session.page(), "Articles"));
        return Ok(());
    }

    tracing::info!("Starting Article Browser...");

    let prefs: Box<dyn PreferenceStore> = match JsonPreferenceStore::default_path() {
        Some(path) => Box::new(JsonPreferenceStore::open(path)),
        None => {
            tracing::warn!("No data directory available, theme preference will not persist");
            Box::new(MemoryPreferenceStore::default())
        }
    };

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.ui.window_width, config.ui.window_height])
            .with_min_inner_size([480.0, 360.0])
            .with_title("Articles"),
        ..Default::default()
    };

    let parts = AppParts {
        runtime: runtime.handle().clone(),
        location: config.start_location.clone(),
        config,
        source,
        controls,
        outcome,
        prefs,
    };

    eframe::run_native(
        "Article Browser",
        native_options,
        Box::new(|cc| Ok(Box::new(ArticleBrowserApp::new(cc, parts)))),
    )
    .map_err(|e| anyhow::anyhow!("Failed to run the application: {e}"))
}
