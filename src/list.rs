//! Listing pages: search results and the top-ranked chart.
//!
//! Both parse the same way: every anchor pointing at a title page yields
//! a lightweight (id, title) reference, deduplicated by id with the
//! first non-empty title winning. No further page is fetched for a
//! reference until the caller opens it as a full [`crate::Movie`].

use std::collections::HashSet;
use std::rc::Rc;

use dom_query::{Document, Selection};
use serde::{Deserialize, Serialize};

use crate::dom;
use crate::page::PageSlot;
use crate::patterns::TITLE_ID;
use crate::sanitize;
use crate::Site;

/// Lightweight reference to a movie: id and title only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieRef {
    pub id: String,
    pub title: String,
}

/// Parse all title references out of a listing document.
pub(crate) fn movie_refs(doc: &Document) -> Vec<MovieRef> {
    let mut seen = HashSet::new();
    let mut refs = Vec::new();

    for node in doc.select("a[href*='/title/tt']").nodes() {
        let link = Selection::from(*node);
        let Some(href) = dom::get_attribute(&link, "href") else {
            continue;
        };
        let Some(caps) = TITLE_ID.captures(&href) else {
            continue;
        };
        let id = caps[1].to_string();

        let title = sanitize::clean(&dom::text_content(&link));
        // Thumbnail and rank anchors carry no usable text.
        if title.is_empty() {
            continue;
        }

        if seen.insert(id.clone()) {
            refs.push(MovieRef {
                id,
                title: sanitize::unquote(&title).into_owned(),
            });
        }
    }
    refs
}

/// Title search bound to a free-text query.
pub struct Search {
    site: Rc<Site>,
    query: String,
    results: PageSlot,
}

impl Search {
    pub(crate) fn new(site: Rc<Site>, query: &str) -> Self {
        Self {
            site,
            query: query.to_string(),
            results: PageSlot::new(),
        }
    }

    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Matching movies from the single results page.
    #[must_use]
    pub fn movies(&self) -> Vec<MovieRef> {
        let url = self.site.endpoints().search(&self.query);
        self.results
            .with(self.site.fetcher(), &url, |doc| Some(movie_refs(doc)))
            .unwrap_or_default()
    }
}

/// The current top-ranked movie chart.
pub struct Top250 {
    site: Rc<Site>,
    chart: PageSlot,
}

impl Top250 {
    pub(crate) fn new(site: Rc<Site>) -> Self {
        Self {
            site,
            chart: PageSlot::new(),
        }
    }

    /// Ranked movies, in chart order.
    #[must_use]
    pub fn movies(&self) -> Vec<MovieRef> {
        let url = self.site.endpoints().top_chart();
        self.chart
            .with(self.site.fetcher(), &url, |doc| Some(movie_refs(doc)))
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::parse;
    use crate::endpoints::Endpoints;
    use crate::fetch::testing::MockFetcher;

    const CHART_HTML: &str = r#"<html><body><table>
        <tr>
            <td><a href="/title/tt0111161/"><img src="/poster1.jpg"></a></td>
            <td><a href="/title/tt0111161/">The Shawshank Redemption</a> (1994)</td>
        </tr>
        <tr>
            <td><a href="/title/tt0068646/"><img src="/poster2.jpg"></a></td>
            <td><a href="/title/tt0068646/">The Godfather</a> (1972)</td>
        </tr>
        <tr>
            <td><a href="/chart/bottom">Bottom 100</a></td>
        </tr>
    </table></body></html>"#;

    #[test]
    fn refs_dedupe_by_id_and_skip_textless_anchors() {
        let doc = parse(CHART_HTML);
        let refs = movie_refs(&doc);

        assert_eq!(
            refs,
            vec![
                MovieRef {
                    id: "0111161".to_string(),
                    title: "The Shawshank Redemption".to_string(),
                },
                MovieRef {
                    id: "0068646".to_string(),
                    title: "The Godfather".to_string(),
                },
            ]
        );
    }

    #[test]
    fn refs_unquote_tv_titles() {
        let doc = parse(r#"<a href="/title/tt0306414/">&quot;The Wire&quot;</a>"#);
        let refs = movie_refs(&doc);
        assert_eq!(refs[0].title, "The Wire");
    }

    #[test]
    fn search_fetches_encoded_query_once() {
        let fetcher = Rc::new(MockFetcher::new());
        let endpoints = Endpoints {
            title_base: "http://test".to_string(),
            name_base: "http://test".to_string(),
        };
        fetcher.insert(&endpoints.search("die hard"), CHART_HTML);
        let site = Site::with_fetcher(Rc::clone(&fetcher) as Rc<dyn crate::fetch::Fetcher>, endpoints);

        let search = site.search("die hard");
        assert_eq!(search.movies().len(), 2);
        let _ = search.movies();
        assert_eq!(fetcher.calls(), 1);
    }

    #[test]
    fn failed_chart_fetch_yields_empty_list() {
        let fetcher = Rc::new(MockFetcher::new());
        let endpoints = Endpoints {
            title_base: "http://test".to_string(),
            name_base: "http://test".to_string(),
        };
        let site = Site::with_fetcher(fetcher, endpoints);

        assert!(site.top_250().movies().is_empty());
    }
}
