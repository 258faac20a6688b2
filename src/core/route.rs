//! Location handling: which view a location string selects

use url::form_urlencoded;

/// Query parameter that selects a single article
pub const ID_PARAM: &str = "id";

/// The two display modes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// All articles as cards, with search and sort controls
    Grid,
    /// One article, selected by the raw identifier parameter
    Detail(String),
}

impl Route {
    /// Location of the grid view
    pub const GRID_HREF: &'static str = "index.html";

    /// Select a route from a location such as `index.html`, `?id=2` or
    /// `https://host/blog/?id=2#top`. Only the first `id` parameter counts;
    /// its presence alone selects detail mode, even when empty.
    pub fn from_location(location: &str) -> Self {
        let without_fragment = location.split('#').next().unwrap_or_default();
        let query = match without_fragment.split_once('?') {
            Some((_, query)) => query,
            None => return Route::Grid,
        };

        form_urlencoded::parse(query.as_bytes())
            .find(|(key, _)| key == ID_PARAM)
            .map(|(_, value)| Route::Detail(value.into_owned()))
            .unwrap_or(Route::Grid)
    }

    /// Location of the detail view for `id`
    pub fn detail_href(id: &str) -> String {
        let encoded: String = form_urlencoded::byte_serialize(id.as_bytes()).collect();
        format!("?{ID_PARAM}={encoded}")
    }

    pub fn is_detail(&self) -> bool {
        matches!(self, Route::Detail(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_query_is_grid() {
        assert_eq!(Route::from_location(""), Route::Grid);
        assert_eq!(Route::from_location("index.html"), Route::Grid);
        assert_eq!(Route::from_location("?sort=title-asc"), Route::Grid);
    }

    #[test]
    fn test_id_param_selects_detail() {
        assert_eq!(Route::from_location("?id=2"), Route::Detail("2".into()));
        assert_eq!(
            Route::from_location("https://example.com/blog/index.html?x=1&id=abc#top"),
            Route::Detail("abc".into())
        );
        assert_eq!(Route::from_location("?id="), Route::Detail(String::new()));
    }

    #[test]
    fn test_first_id_param_wins() {
        assert_eq!(Route::from_location("?id=1&id=2"), Route::Detail("1".into()));
    }

    #[test]
    fn test_detail_href_round_trips() {
        for id in ["2", "hello world", "a&b=c"] {
            let href = Route::detail_href(id);
            assert_eq!(Route::from_location(&href), Route::Detail(id.to_string()));
        }
        assert_eq!(Route::detail_href("2"), "?id=2");
    }
}
