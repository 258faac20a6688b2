//! Rendering-agnostic view-models for the two display modes
//!
//! Everything here is a plain description of what to show. Presentation
//! adapters (the egui panels and the HTML writer) materialize a [`Page`].

use super::article::Article;
use super::route::Route;
use super::source::DataSource;

pub const LOAD_FAILED_MESSAGE: &str = "Error loading the articles.";
pub const NO_RESULTS_MESSAGE: &str = "No articles found.";
pub const NOT_FOUND_MESSAGE: &str = "Article not found.";
pub const NOT_FOUND_LINK_LABEL: &str = "Back";
pub const BACK_LINK_LABEL: &str = "\u{2190} Back to home";

/// Placeholder images shown when an article image fails to load
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholders {
    pub card: String,
    pub detail: String,
}

impl Default for Placeholders {
    fn default() -> Self {
        Self {
            card: "https://via.placeholder.com/300".to_string(),
            detail: "https://via.placeholder.com/800".to_string(),
        }
    }
}

/// An image with its fallback
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRef {
    /// Resolved asset location
    pub src: String,
    /// Shown instead when `src` fails to load
    pub fallback: String,
    pub alt: String,
}

/// One grid card, linking to its article
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    /// Detail location; `None` for an article without an identifier
    pub href: Option<String>,
    pub image: ImageRef,
    pub date: String,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailView {
    pub back_href: String,
    pub back_label: String,
    pub title: String,
    /// "By <author> | <date>"
    pub meta: String,
    pub image: ImageRef,
    /// Trusted markup, displayed as-is
    pub content: String,
}

/// Main content area
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    Grid(Vec<Card>),
    NoResults { message: String },
    Detail(Box<DetailView>),
    NotFound {
        message: String,
        link_href: String,
        link_label: String,
    },
    LoadFailed { message: String },
}

/// Everything the surface displays for one render
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// Whether the search and sort controls are shown
    pub controls_visible: bool,
    pub view: View,
}

/// Turns articles into view-models, resolving assets against the source
#[derive(Debug, Clone, Default)]
pub struct ViewBuilder {
    source: DataSource,
    placeholders: Placeholders,
}

impl ViewBuilder {
    pub fn new(source: DataSource, placeholders: Placeholders) -> Self {
        Self {
            source,
            placeholders,
        }
    }

    /// Grid content; an empty selection yields the no-results message
    pub fn grid<'a>(&self, articles: impl IntoIterator<Item = &'a Article>) -> View {
        let cards: Vec<Card> = articles.into_iter().map(|a| self.card(a)).collect();
        if cards.is_empty() {
            return View::NoResults {
                message: NO_RESULTS_MESSAGE.to_string(),
            };
        }
        View::Grid(cards)
    }

    pub fn card(&self, article: &Article) -> Card {
        Card {
            href: article.id_param().map(|id| Route::detail_href(&id)),
            image: self.image(article, &self.placeholders.card),
            date: article.date.clone(),
            title: article.title.clone(),
        }
    }

    /// Detail content, or the not-found message when nothing matched
    pub fn detail(&self, article: Option<&Article>) -> View {
        match article {
            Some(article) => View::Detail(Box::new(DetailView {
                back_href: Route::GRID_HREF.to_string(),
                back_label: BACK_LINK_LABEL.to_string(),
                title: article.title.clone(),
                meta: format!("By {} | {}", article.author, article.date),
                image: self.image(article, &self.placeholders.detail),
                content: article.content.clone(),
            })),
            None => View::NotFound {
                message: NOT_FOUND_MESSAGE.to_string(),
                link_href: Route::GRID_HREF.to_string(),
                link_label: NOT_FOUND_LINK_LABEL.to_string(),
            },
        }
    }

    pub fn load_failed(&self) -> View {
        View::LoadFailed {
            message: LOAD_FAILED_MESSAGE.to_string(),
        }
    }

    fn image(&self, article: &Article, fallback: &str) -> ImageRef {
        ImageRef {
            src: self.source.resolve_asset(&article.image_path()),
            fallback: fallback.to_string(),
            alt: article.title.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::article::ArticleId;

    fn builder() -> ViewBuilder {
        ViewBuilder::new(
            DataSource::parse("https://example.com/blog/data.json").unwrap(),
            Placeholders::default(),
        )
    }

    fn rust_article() -> Article {
        Article {
            id: Some(ArticleId::from(2)),
            title: "Rust Deep Dive".into(),
            author: "Ben".into(),
            date: "2024-03-01".into(),
            image: "images/rust".into(),
            content: "<p>Ownership</p>".into(),
        }
    }

    #[test]
    fn test_empty_grid_is_no_results() {
        let view = builder().grid(std::iter::empty());
        assert_eq!(
            view,
            View::NoResults {
                message: NO_RESULTS_MESSAGE.to_string()
            }
        );
    }

    #[test]
    fn test_card_links_to_detail() {
        let card = builder().card(&rust_article());
        assert_eq!(card.href.as_deref(), Some("?id=2"));
        assert_eq!(card.image.src, "https://example.com/blog/images/rust.png");
        assert_eq!(card.image.fallback, "https://via.placeholder.com/300");
        assert_eq!(card.date, "2024-03-01");
        assert_eq!(card.title, "Rust Deep Dive");
    }

    #[test]
    fn test_card_without_id_links_nowhere() {
        let article = Article {
            id: None,
            ..rust_article()
        };
        assert_eq!(builder().card(&article).href, None);
    }

    #[test]
    fn test_detail_view_fields() {
        let article = rust_article();
        let View::Detail(detail) = builder().detail(Some(&article)) else {
            panic!("expected detail view");
        };
        assert_eq!(detail.back_href, "index.html");
        assert_eq!(detail.meta, "By Ben | 2024-03-01");
        assert_eq!(detail.image.fallback, "https://via.placeholder.com/800");
        assert_eq!(detail.content, "<p>Ownership</p>");
    }

    #[test]
    fn test_missing_article_is_not_found() {
        let view = builder().detail(None);
        assert!(matches!(view, View::NotFound { ref link_href, .. } if link_href == "index.html"));
    }
}
