//! The article catalog: loading, lookup, filtering and sorting

use std::cmp::Reverse;
use std::str::FromStr;
use std::sync::Arc;

use super::article::Article;
use super::collate::CollationKey;
use super::source::{DataSource, LoadError};

/// Sort order applied to the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    DateDesc,
    DateAsc,
    TitleAsc,
    TitleDesc,
    /// Keep catalog order
    Unsorted,
}

impl SortKey {
    /// The selectable sort modes, in menu order
    pub const ALL: [SortKey; 4] = [
        SortKey::DateDesc,
        SortKey::DateAsc,
        SortKey::TitleAsc,
        SortKey::TitleDesc,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::DateDesc => "date-desc",
            SortKey::DateAsc => "date-asc",
            SortKey::TitleAsc => "title-asc",
            SortKey::TitleDesc => "title-desc",
            SortKey::Unsorted => "none",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortKey::DateDesc => "Newest first",
            SortKey::DateAsc => "Oldest first",
            SortKey::TitleAsc => "Title (A-Z)",
            SortKey::TitleDesc => "Title (Z-A)",
            SortKey::Unsorted => "Catalog order",
        }
    }

    /// Stable sort, computing each article's key once
    fn apply(self, articles: &mut [&Article]) {
        match self {
            // Undated articles go last in either direction
            SortKey::DateDesc => articles.sort_by_cached_key(|a| {
                let date = a.parsed_date();
                (date.is_none(), Reverse(date))
            }),
            SortKey::DateAsc => articles.sort_by_cached_key(|a| {
                let date = a.parsed_date();
                (date.is_none(), date)
            }),
            SortKey::TitleAsc => articles.sort_by_cached_key(|a| CollationKey::new(&a.title)),
            SortKey::TitleDesc => articles.sort_by_cached_key(|a| Reverse(CollationKey::new(&a.title))),
            SortKey::Unsorted => {}
        }
    }
}

/// Unrecognised keys fall back to catalog order
impl FromStr for SortKey {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "date-desc" => SortKey::DateDesc,
            "date-asc" => SortKey::DateAsc,
            "title-asc" => SortKey::TitleAsc,
            "title-desc" => SortKey::TitleDesc,
            _ => SortKey::Unsorted,
        })
    }
}

/// Immutable snapshot of every loaded article, cheap to clone
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    articles: Arc<[Article]>,
}

impl Catalog {
    pub fn new(articles: Vec<Article>) -> Self {
        Self {
            articles: articles.into(),
        }
    }

    pub fn articles(&self) -> &[Article] {
        &self.articles
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }

    /// First article whose identifier loosely matches `id`
    pub fn resolve_by_id(&self, id: &str) -> Option<&Article> {
        self.articles.iter().find(|article| article.matches_id(id))
    }

    /// Articles whose title or author contains `query` (case-insensitive),
    /// ordered by `sort`. An empty query keeps every article. Ties keep
    /// catalog order.
    pub fn filter_and_sort(&self, query: &str, sort: SortKey) -> Vec<&Article> {
        let needle = query.to_lowercase();
        let mut selected: Vec<&Article> = if needle.is_empty() {
            self.articles.iter().collect()
        } else {
            self.articles
                .iter()
                .filter(|article| article.matches_query(&needle))
                .collect()
        };

        sort.apply(&mut selected);
        selected
    }
}

/// Result of the one-time catalog load
#[derive(Debug, Clone, Default)]
pub struct LoadOutcome {
    pub catalog: Catalog,
    /// Set when the document could not be fetched or decoded
    pub failure: Option<String>,
}

impl LoadOutcome {
    pub fn loaded(catalog: Catalog) -> Self {
        Self {
            catalog,
            failure: None,
        }
    }

    pub fn failed(error: &LoadError) -> Self {
        Self {
            catalog: Catalog::default(),
            failure: Some(error.to_string()),
        }
    }

    pub fn is_failure(&self) -> bool {
        self.failure.is_some()
    }
}

/// Load the catalog once. Failures are logged and degrade to an empty
/// catalog; they are not retried.
pub async fn load(source: &DataSource) -> LoadOutcome {
    tracing::info!("Loading catalog from: {}", source);

    match source.fetch().await {
        Ok(articles) => {
            tracing::info!("Loaded {} articles", articles.len());
            LoadOutcome::loaded(Catalog::new(articles))
        }
        Err(e) => {
            tracing::error!("Error loading catalog: {}", e);
            LoadOutcome::failed(&e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::article::ArticleId;

    fn article(id: i64, title: &str, author: &str, date: &str) -> Article {
        Article {
            id: Some(ArticleId::from(id)),
            title: title.to_string(),
            author: author.to_string(),
            date: date.to_string(),
            ..Default::default()
        }
    }

    fn sample() -> Catalog {
        Catalog::new(vec![
            article(1, "Go Basics", "Ana", "2024-01-01"),
            article(2, "Rust Deep Dive", "Ben", "2024-03-01"),
        ])
    }

    fn titles(articles: &[&Article]) -> Vec<String> {
        articles.iter().map(|a| a.title.clone()).collect()
    }

    #[test]
    fn test_query_filters_by_title() {
        let catalog = sample();
        let result = catalog.filter_and_sort("rust", SortKey::Unsorted);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, Some(ArticleId::from(2)));
    }

    #[test]
    fn test_query_filter_is_exact_partition() {
        let catalog = Catalog::new(vec![
            article(1, "Go Basics", "Ana", "2024-01-01"),
            article(2, "Rust Deep Dive", "Ben", "2024-03-01"),
            article(3, "Anatomy of a Parser", "Carla", "2023-07-12"),
            article(4, "Testing", "Anabel", "2022-02-02"),
        ]);
        let query = "ANA";
        let result = catalog.filter_and_sort(query, SortKey::DateAsc);
        let needle = query.to_lowercase();

        for a in &result {
            assert!(a.title.to_lowercase().contains(&needle) || a.author.to_lowercase().contains(&needle));
        }
        for a in catalog.articles() {
            if !result.iter().any(|r| std::ptr::eq(*r, a)) {
                assert!(!a.title.to_lowercase().contains(&needle));
                assert!(!a.author.to_lowercase().contains(&needle));
            }
        }
        assert_eq!(result.len(), 3);
    }

    #[test]
    fn test_empty_query_keeps_everything() {
        let catalog = sample();
        assert_eq!(catalog.filter_and_sort("", SortKey::Unsorted).len(), 2);
    }

    #[test]
    fn test_title_sorts() {
        let catalog = Catalog::new(vec![
            article(2, "Rust Deep Dive", "Ben", "2024-03-01"),
            article(1, "Go Basics", "Ana", "2024-01-01"),
        ]);
        assert_eq!(
            titles(&catalog.filter_and_sort("", SortKey::TitleAsc)),
            vec!["Go Basics", "Rust Deep Dive"]
        );
        assert_eq!(
            titles(&catalog.filter_and_sort("", SortKey::TitleDesc)),
            vec!["Rust Deep Dive", "Go Basics"]
        );
    }

    #[test]
    fn test_date_sort_directions_are_symmetric() {
        let catalog = Catalog::new(vec![
            article(1, "B", "x", "2024-01-01"),
            article(2, "A", "x", "2023-06-15"),
            article(3, "C", "x", "2024-03-01"),
            article(4, "D", "x", "2021-11-30"),
        ]);
        let desc = catalog.filter_and_sort("", SortKey::DateDesc);
        let mut asc = catalog.filter_and_sort("", SortKey::DateAsc);
        asc.reverse();
        assert_eq!(titles(&desc), titles(&asc));
        assert_eq!(titles(&desc), vec!["C", "B", "A", "D"]);
    }

    #[test]
    fn test_undated_articles_sort_last() {
        let catalog = Catalog::new(vec![
            article(1, "Undated", "x", "soon"),
            article(2, "Old", "x", "2020-01-01"),
            article(3, "New", "x", "2024-01-01"),
        ]);
        assert_eq!(
            titles(&catalog.filter_and_sort("", SortKey::DateDesc)),
            vec!["New", "Old", "Undated"]
        );
        assert_eq!(
            titles(&catalog.filter_and_sort("", SortKey::DateAsc)),
            vec!["Old", "New", "Undated"]
        );
    }

    #[test]
    fn test_ties_keep_catalog_order() {
        let catalog = Catalog::new(vec![
            article(1, "First", "x", "2024-01-01"),
            article(2, "Second", "x", "2024-01-01"),
            article(3, "Third", "x", "2024-01-01"),
        ]);
        assert_eq!(
            titles(&catalog.filter_and_sort("", SortKey::DateDesc)),
            vec!["First", "Second", "Third"]
        );
    }

    #[test]
    fn test_title_sorts_collate_and_keep_ties_stable() {
        let catalog = Catalog::new(vec![
            article(1, "Éclair", "x", "2024-01-01"),
            article(2, "Dune", "x", ""),
            article(3, "eclair", "y", "2023-01-01"),
            article(4, "Dune", "z", "2022-01-01"),
        ]);
        let ids = |key| {
            catalog
                .filter_and_sort("", key)
                .iter()
                .map(|a| a.id_param().unwrap_or_default())
                .collect::<Vec<_>>()
        };
        assert_eq!(ids(SortKey::TitleAsc), ["2", "4", "3", "1"]);
        assert_eq!(ids(SortKey::TitleDesc), ["1", "3", "2", "4"]);
    }

    #[test]
    fn test_unknown_sort_key_keeps_order() {
        let key: SortKey = "popularity".parse().unwrap();
        assert_eq!(key, SortKey::Unsorted);
        let catalog = Catalog::new(vec![
            article(2, "Rust Deep Dive", "Ben", "2024-03-01"),
            article(1, "Go Basics", "Ana", "2024-01-01"),
        ]);
        assert_eq!(
            titles(&catalog.filter_and_sort("", key)),
            vec!["Rust Deep Dive", "Go Basics"]
        );
    }

    #[test]
    fn test_filter_and_sort_does_not_mutate_catalog() {
        let catalog = Catalog::new(vec![
            article(2, "Rust Deep Dive", "Ben", "2024-03-01"),
            article(1, "Go Basics", "Ana", "2024-01-01"),
        ]);
        let before = catalog.articles().to_vec();
        for key in SortKey::ALL {
            let _ = catalog.filter_and_sort("a", key);
        }
        assert_eq!(catalog.articles(), before.as_slice());
    }

    #[test]
    fn test_resolve_by_id_is_loose() {
        let catalog = sample();
        assert_eq!(catalog.resolve_by_id("2").map(|a| a.title.as_str()), Some("Rust Deep Dive"));
        assert!(catalog.resolve_by_id("99").is_none());
    }

    #[test]
    fn test_sort_key_round_trips_through_str() {
        for key in SortKey::ALL {
            assert_eq!(key.as_str().parse::<SortKey>().unwrap(), key);
        }
    }

    #[test]
    fn test_load_failure_degrades_to_empty() {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        let dir = tempfile::tempdir().unwrap();
        let source = DataSource::File(dir.path().join("nope.json"));

        let outcome = runtime.block_on(load(&source));
        assert!(outcome.is_failure());
        assert!(outcome.catalog.is_empty());
    }
}
