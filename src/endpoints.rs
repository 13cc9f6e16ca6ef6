//! Page kinds and the URL templates that map an entity id to each of its
//! source pages.
//!
//! Templates are fixed per page kind and parameterized only by entity id
//! and, for the paginated media index, a page number. Base hosts are
//! configurable so tests can point the scraper at canned documents.

use url::Url;

/// Which of an entity's source pages a field depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageKind {
    /// Main movie page with most labeled field blocks.
    Primary,
    /// Movie awards page.
    Awards,
    /// Movie release information page.
    ReleaseInfo,
    /// Person main page (filmography listing).
    Listing,
    /// Person biography page.
    Biography,
    /// Paginated index of a movie's images.
    MediaIndex,
    /// Single media item page, reached from the index or a biography.
    Photo,
}

/// URL templates for the scraped site.
///
/// All fields are public for easy configuration; use `Default::default()`
/// for the live site.
#[derive(Debug, Clone)]
pub struct Endpoints {
    /// Base host for title pages (movies, charts, search).
    pub title_base: String,
    /// Base host for name pages (people).
    pub name_base: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            title_base: "https://www.imdb.com".to_string(),
            name_base: "https://www.imdb.com".to_string(),
        }
    }
}

impl Endpoints {
    /// Main movie page (the `combined` view carries all labeled blocks).
    #[must_use]
    pub fn movie_primary(&self, id: &str) -> String {
        format!("{}/title/tt{id}/combined", self.title_base)
    }

    #[must_use]
    pub fn movie_awards(&self, id: &str) -> String {
        format!("{}/title/tt{id}/awards", self.title_base)
    }

    #[must_use]
    pub fn movie_release_info(&self, id: &str) -> String {
        format!("{}/title/tt{id}/releaseinfo", self.title_base)
    }

    /// Media index for a movie; `page` selects one slice of the
    /// paginated listing.
    #[must_use]
    pub fn media_index(&self, id: &str, page: Option<u32>) -> String {
        match page {
            Some(n) => format!("{}/title/tt{id}/mediaindex?page={n}", self.title_base),
            None => format!("{}/title/tt{id}/mediaindex", self.title_base),
        }
    }

    #[must_use]
    pub fn person_listing(&self, id: &str) -> String {
        format!("{}/name/nm{id}/", self.name_base)
    }

    #[must_use]
    pub fn person_biography(&self, id: &str) -> String {
        format!("{}/name/nm{id}/bio", self.name_base)
    }

    /// Search results page for a free-text query.
    ///
    /// Falls back to an unencoded query only if the base host itself is
    /// unparsable, which a default-constructed instance never is.
    #[must_use]
    pub fn search(&self, query: &str) -> String {
        let raw = format!("{}/find", self.title_base);
        match Url::parse(&raw) {
            Ok(mut url) => {
                url.query_pairs_mut().append_pair("q", query).append_pair("s", "tt");
                url.into()
            }
            Err(_) => format!("{raw}?q={query}&s=tt"),
        }
    }

    /// Current top-ranked movie chart.
    #[must_use]
    pub fn top_chart(&self) -> String {
        format!("{}/chart/top", self.title_base)
    }

    /// Resolve an href discovered inside a page against the title host.
    ///
    /// Discovered links are usually host-relative; absolute ones pass
    /// through untouched.
    #[must_use]
    pub fn resolve(&self, href: &str) -> String {
        if href.starts_with("http://") || href.starts_with("https://") {
            return href.to_string();
        }
        match Url::parse(&self.title_base).and_then(|base| base.join(href)) {
            Ok(url) => url.into(),
            Err(_) => format!("{}{href}", self.title_base),
        }
    }
}
