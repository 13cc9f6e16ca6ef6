//! Document Provider: fetches a URL and returns a parsed, queryable tree.
//!
//! Transport and HTML parsing live behind the [`Fetcher`] trait so the
//! extraction engine can treat fetching as a pure `url -> Document`
//! collaborator. The engine never embeds transport logic and tests swap
//! in an in-memory fetcher.

use std::time::Duration;

use dom_query::Document;

use crate::error::FetchError;

/// User-Agent string identifying this scraper.
const USER_AGENT: &str = concat!("imdb-scrape/", env!("CARGO_PKG_VERSION"));

/// Default timeout for HTTP requests.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Fetches a URL and returns the parsed document.
///
/// Implementations are expected to be synchronous and blocking: the
/// scraped site rate-limits concurrent fetches of per-entity
/// sub-resources, so callers fetch one page at a time.
pub trait Fetcher {
    fn fetch(&self, url: &str) -> Result<Document, FetchError>;
}

/// HTTP-backed [`Fetcher`] using a blocking reqwest client.
///
/// Requests carry a fixed User-Agent, a 30s timeout and an English
/// `Accept-Language` header (field labels on the scraped pages are
/// locale-dependent).
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self, FetchError> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self { client })
    }
}

impl Fetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<Document, FetchError> {
        tracing::debug!(url, "fetching document");
        let body = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT_LANGUAGE, "en-US,en;q=0.8")
            .send()?
            .error_for_status()?
            .text()?;

        if body.trim().is_empty() {
            return Err(FetchError::EmptyBody);
        }

        Ok(Document::from(body))
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::cell::{Cell, RefCell};
    use std::collections::HashMap;

    use super::{Document, FetchError, Fetcher};

    /// In-memory fetcher mapping URLs to canned HTML bodies.
    ///
    /// Counts every fetch call so tests can assert that lazy caching
    /// and dependency short-circuiting avoid network round trips.
    #[derive(Default)]
    pub struct MockFetcher {
        pages: RefCell<HashMap<String, String>>,
        calls: Cell<usize>,
    }

    impl MockFetcher {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn insert(&self, url: &str, html: &str) {
            self.pages.borrow_mut().insert(url.to_string(), html.to_string());
        }

        pub fn calls(&self) -> usize {
            self.calls.get()
        }
    }

    impl Fetcher for MockFetcher {
        fn fetch(&self, url: &str) -> Result<Document, FetchError> {
            self.calls.set(self.calls.get() + 1);
            self.pages
                .borrow()
                .get(url)
                .map(|html| Document::from(html.clone()))
                .ok_or(FetchError::EmptyBody)
        }
    }
}
