//! Integration tests driving the facades through a canned fetcher.
//!
//! These exercise the engine's contract end to end: per-field fail-soft
//! isolation, lazy single-fetch caching, dependency short-circuiting and
//! entity-decoded output.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use imdb_scrape::dom::Document;
use imdb_scrape::{Endpoints, FetchError, Fetcher, PageKind, PageStatus, Site};

/// Canned fetcher counting every call.
#[derive(Default)]
struct CannedFetcher {
    pages: RefCell<HashMap<String, String>>,
    calls: Cell<usize>,
}

impl CannedFetcher {
    fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    fn insert(&self, url: &str, html: &str) {
        self.pages.borrow_mut().insert(url.to_string(), html.to_string());
    }

    fn calls(&self) -> usize {
        self.calls.get()
    }
}

impl Fetcher for CannedFetcher {
    fn fetch(&self, url: &str) -> Result<Document, FetchError> {
        self.calls.set(self.calls.get() + 1);
        self.pages
            .borrow()
            .get(url)
            .map(|html| Document::from(html.clone()))
            .ok_or(FetchError::EmptyBody)
    }
}

fn test_endpoints() -> Endpoints {
    Endpoints {
        title_base: "http://films.test".to_string(),
        name_base: "http://films.test".to_string(),
    }
}

const PRIMARY_HTML: &str = r#"<html><body>
    <h1>Die Hard <span>(<a href="/year/1988/">1988</a>)</span></h1>
    <div class="info"><h5>Genre:</h5><div class="info-content">
        <a href="/Sections/Genres/Action/">Action</a>
        <a href="/Sections/Genres/Adventure/">Adventure</a></div></div>
    <div class="info"><h5>Plot:</h5><div class="info-content">
        A New York cop &amp; a tower full of thieves.
        <a href="/plotsummary">See full summary</a>&nbsp;&raquo;</div></div>
    <div id="tn15rating"><div class="starbar-meta"><b>8.2/10</b></div></div>
</body></html>"#;

#[test]
fn genres_extract_in_document_order_and_decoded() {
    let fetcher = CannedFetcher::new();
    let endpoints = test_endpoints();
    fetcher.insert(&endpoints.movie_primary("0095016"), PRIMARY_HTML);
    let site = Site::with_fetcher(Rc::clone(&fetcher) as Rc<dyn Fetcher>, endpoints);

    let movie = site.movie("0095016");
    assert_eq!(movie.genres(), vec!["Action", "Adventure"]);
    assert_eq!(
        movie.plot().as_deref(),
        Some("A New York cop & a tower full of thieves.")
    );
}

#[test]
fn one_fetch_serves_every_primary_field() {
    let fetcher = CannedFetcher::new();
    let endpoints = test_endpoints();
    fetcher.insert(&endpoints.movie_primary("0095016"), PRIMARY_HTML);
    let site = Site::with_fetcher(Rc::clone(&fetcher) as Rc<dyn Fetcher>, endpoints);

    let movie = site.movie("0095016");
    let _ = movie.title(false);
    let _ = movie.year();
    let _ = movie.genres();
    let _ = movie.rating();
    let _ = movie.plot();

    assert_eq!(fetcher.calls(), 1);
}

#[test]
fn failed_primary_fetch_degrades_to_absent_everywhere() {
    let fetcher = CannedFetcher::new();
    let site = Site::with_fetcher(Rc::clone(&fetcher) as Rc<dyn Fetcher>, test_endpoints());

    let movie = site.movie("0000404");
    assert!(movie.title(false).is_none());
    assert!(movie.year().is_none());
    assert!(movie.rating().is_none());
    assert!(movie.genres().is_empty());
    assert!(movie.cast().is_empty());
    assert!(movie.cast_members_characters().is_empty());
    assert_eq!(
        movie.page_status(PageKind::Primary),
        Some(PageStatus::Failed)
    );
    // The failed fetch itself is also memoized.
    assert_eq!(fetcher.calls(), 1);
}

#[test]
fn one_movie_failing_does_not_disturb_another() {
    let fetcher = CannedFetcher::new();
    let endpoints = test_endpoints();
    fetcher.insert(&endpoints.movie_primary("0095016"), PRIMARY_HTML);
    let site = Site::with_fetcher(Rc::clone(&fetcher) as Rc<dyn Fetcher>, endpoints);

    let broken = site.movie("0000404");
    let healthy = site.movie("0095016");

    assert!(broken.genres().is_empty());
    assert_eq!(healthy.genres(), vec!["Action", "Adventure"]);
}

#[test]
fn absent_headshot_never_triggers_a_dependent_fetch() {
    let fetcher = CannedFetcher::new();
    let endpoints = test_endpoints();
    fetcher.insert(
        &endpoints.person_biography("0000001"),
        "<html><body><a class=\"main\" href=\"/name/nm0000001/\">Someone</a></body></html>",
    );
    let site = Site::with_fetcher(Rc::clone(&fetcher) as Rc<dyn Fetcher>, endpoints);

    let person = site.person("0000001");
    assert_eq!(person.name().as_deref(), Some("Someone"));
    assert!(person.photo().is_none());

    // Exactly one fetch: the biography page. No photo page request.
    assert_eq!(fetcher.calls(), 1);
}

#[test]
fn search_results_are_id_title_pairs() {
    let fetcher = CannedFetcher::new();
    let endpoints = test_endpoints();
    fetcher.insert(
        &endpoints.search("die hard"),
        r#"<html><body>
            <a href="/title/tt0095016/">Die Hard</a>
            <a href="/title/tt0095016/">Die Hard</a>
            <a href="/title/tt0099423/">Die Hard 2</a>
        </body></html>"#,
    );
    let site = Site::with_fetcher(Rc::clone(&fetcher) as Rc<dyn Fetcher>, endpoints);

    let results = site.search("die hard").movies();
    let pairs: Vec<(&str, &str)> = results
        .iter()
        .map(|r| (r.id.as_str(), r.title.as_str()))
        .collect();
    assert_eq!(
        pairs,
        vec![("0095016", "Die Hard"), ("0099423", "Die Hard 2")]
    );
}

#[test]
fn listing_reference_opens_as_lazy_movie() {
    let fetcher = CannedFetcher::new();
    let endpoints = test_endpoints();
    fetcher.insert(&endpoints.movie_primary("0095016"), PRIMARY_HTML);
    let site = Site::with_fetcher(Rc::clone(&fetcher) as Rc<dyn Fetcher>, endpoints);

    let movie = site.movie_titled("0095016", "\"Die Hard\"", vec!["Stirb langsam".to_string()]);
    // Constructor title answers without any fetch, quotes stripped.
    assert_eq!(movie.title(false).as_deref(), Some("Die Hard"));
    assert_eq!(movie.also_known_as().to_vec(), vec!["Stirb langsam".to_string()]);
    assert_eq!(fetcher.calls(), 0);

    // Forcing a refresh goes to the page.
    assert_eq!(movie.title(true).as_deref(), Some("Die Hard"));
    assert_eq!(fetcher.calls(), 1);
}
