//! Main application state and UI coordination

use eframe::egui;
use tokio::sync::oneshot;

use crate::core::catalog::{self, LoadOutcome};
use crate::core::config::AppConfig;
use crate::core::route::Route;
use crate::core::session::{Controls, Session};
use crate::core::source::DataSource;
use crate::core::theme::{PreferenceStore, Theme, ThemeToggle};
use crate::core::view::{Page, View, ViewBuilder};
use crate::ui::{content::ContentPanel, controls::ControlsBar, detail::BodyCache, scroll::ScrollToTop};

const APP_TITLE: &str = "Articles";

/// What the window currently shows
enum PageState {
    /// Catalog fetch in flight for `location`; nothing else is observable
    Loading {
        location: String,
        pending: oneshot::Receiver<LoadOutcome>,
    },
    Ready { session: Session, page: Page },
}

/// Everything the app needs from startup
pub struct AppParts {
    pub runtime: tokio::runtime::Handle,
    pub config: AppConfig,
    pub source: DataSource,
    pub location: String,
    pub controls: Controls,
    /// Finished initial load
    pub outcome: LoadOutcome,
    pub prefs: Box<dyn PreferenceStore>,
}

/// Main application state
pub struct ArticleBrowserApp {
    runtime: tokio::runtime::Handle,
    source: DataSource,
    views: ViewBuilder,
    config: AppConfig,
    state: PageState,
    theme: ThemeToggle,
    prefs: Box<dyn PreferenceStore>,
    scroll: ScrollToTop,
    /// Last title sent to the viewport
    title: String,
    /// Rendering state for article bodies
    body_cache: BodyCache,
}

impl ArticleBrowserApp {
    /// Create a new application instance
    pub fn new(cc: &eframe::CreationContext<'_>, parts: AppParts) -> Self {
        egui_extras::install_image_loaders(&cc.egui_ctx);

        let theme = ThemeToggle::load(parts.prefs.as_ref());
        apply_theme(&cc.egui_ctx, theme.theme());

        let views = ViewBuilder::new(parts.source.clone(), parts.config.ui.placeholders());
        let session = Session::start(
            parts.outcome,
            Route::from_location(&parts.location),
            parts.controls,
            views.clone(),
        );
        let page = session.page();

        Self {
            runtime: parts.runtime,
            source: parts.source,
            views,
            scroll: ScrollToTop::new(parts.config.ui.scroll_top_threshold),
            config: parts.config,
            state: PageState::Ready { session, page },
            theme,
            prefs: parts.prefs,
            title: String::new(),
            body_cache: BodyCache::default(),
        }
    }

    /// Go to `location`. Like a page reload: the catalog is fetched again and
    /// the mode is chosen afresh once it arrives.
    pub fn navigate(&mut self, ctx: &egui::Context, location: String) {
        tracing::info!("Navigating to {}", location);

        let (tx, rx) = oneshot::channel();
        let source = self.source.clone();
        let ctx = ctx.clone();
        self.runtime.spawn(async move {
            let outcome = catalog::load(&source).await;
            let _ = tx.send(outcome);
            ctx.request_repaint();
        });

        self.state = PageState::Loading {
            location,
            pending: rx,
        };
        self.scroll.update(0.0);
    }

    /// Switch to the ready state once the pending load finishes
    fn poll_loading(&mut self) {
        let PageState::Loading { location, pending } = &mut self.state else {
            return;
        };

        let outcome = match pending.try_recv() {
            Ok(outcome) => outcome,
            Err(oneshot::error::TryRecvError::Empty) => return,
            Err(oneshot::error::TryRecvError::Closed) => {
                tracing::error!("Catalog load task ended without a result");
                LoadOutcome {
                    failure: Some("load task ended without a result".to_string()),
                    ..Default::default()
                }
            }
        };

        let session = Session::start(
            outcome,
            Route::from_location(location),
            Controls::default(),
            self.views.clone(),
        );
        let page = session.page();
        self.state = PageState::Ready { session, page };
    }

    fn toggle_theme(&mut self, ctx: &egui::Context) {
        match self.theme.toggle(self.prefs.as_mut()) {
            Ok(theme) => tracing::info!("Theme set to {}", theme.as_str()),
            Err(e) => tracing::error!("Failed to save theme preference: {}", e),
        }
        apply_theme(ctx, self.theme.theme());
    }

    fn window_title(&self) -> String {
        match &self.state {
            PageState::Ready { page, .. } => match &page.view {
                View::Detail(detail) => format!("{} - {}", detail.title, APP_TITLE),
                _ => APP_TITLE.to_string(),
            },
            PageState::Loading { .. } => APP_TITLE.to_string(),
        }
    }

    /// Render the top bar with the title, controls and theme toggle
    fn render_top_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading(APP_TITLE);
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui
                        .button(self.theme.icon())
                        .on_hover_text("Toggle theme")
                        .clicked()
                    {
                        self.toggle_theme(ctx);
                    }
                });
            });

            if let PageState::Ready { session, page } = &mut self.state {
                if session.controls_visible() {
                    ui.separator();
                    let mut controls = session.controls().clone();
                    if ControlsBar::show(ui, &mut controls) {
                        session.set_query(controls.query);
                        session.set_sort(controls.sort);
                        *page = session.page();
                    }
                }
            }
        });
    }

    /// Render the main content area. Returns a location to navigate to.
    fn render_content(&mut self, ctx: &egui::Context) -> Option<String> {
        let mut navigate = None;

        egui::CentralPanel::default().show(ctx, |ui| {
            let page = match &self.state {
                PageState::Ready { page, .. } => page,
                PageState::Loading { .. } => {
                    ui.centered_and_justified(|ui| ui.spinner());
                    return;
                }
            };

            let mut scroll_area = egui::ScrollArea::vertical()
                .id_salt("content_scroll")
                .auto_shrink([false, false]);
            if self.scroll.take_request() {
                scroll_area = scroll_area.vertical_scroll_offset(0.0);
            }

            let output = scroll_area.show(ui, |ui| {
                ContentPanel::show(
                    ui,
                    &page.view,
                    &mut self.body_cache,
                    self.config.ui.card_width,
                )
            });
            self.scroll.update(output.state.offset.y);
            navigate = output.inner;
        });

        navigate
    }
}

impl eframe::App for ArticleBrowserApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_loading();

        let in_detail = matches!(&self.state, PageState::Ready { session, .. } if session.route().is_detail());

        // Handle keyboard shortcuts
        let (back, top) = ctx.input(|i| (i.key_pressed(egui::Key::Escape), i.key_pressed(egui::Key::Home)));
        if top {
            self.scroll.request();
        }

        let title = self.window_title();
        if title != self.title {
            ctx.send_viewport_cmd(egui::ViewportCommand::Title(title.clone()));
            self.title = title;
        }

        self.render_top_bar(ctx);
        let clicked = self.render_content(ctx);
        self.scroll.show(ctx);

        let target = clicked.or_else(|| (back && in_detail).then(|| Route::GRID_HREF.to_string()));
        if let Some(location) = target {
            self.navigate(ctx, location);
        }
    }
}

fn apply_theme(ctx: &egui::Context, theme: Theme) {
    let visuals = match theme {
        Theme::Light => egui::Visuals::light(),
        Theme::Dark => egui::Visuals::dark(),
    };
    ctx.set_visuals(visuals);
}
