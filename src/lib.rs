//! # imdb-scrape
//!
//! Typed, fail-soft scraping of movie and person pages from a public
//! film database.
//!
//! The crate extracts structured records (movies, people, filmographies,
//! images) from loosely-structured HTML. Each field is an independent
//! extraction rule — locate a node, coerce its text to a typed value,
//! sanitize — and a rule that finds nothing resolves to `None` or an
//! empty `Vec` instead of erroring, so broken markup degrades
//! field-by-field rather than page-by-page.
//!
//! ## Quick Start
//!
//! ```no_run
//! use imdb_scrape::Site;
//!
//! let site = Site::new()?;
//! let movie = site.movie("0095016");
//!
//! println!("Title:  {:?}", movie.title(false));
//! println!("Genres: {:?}", movie.genres());
//! println!("Rating: {:?}", movie.rating());
//! # Ok::<(), imdb_scrape::FetchError>(())
//! ```
//!
//! ## Model
//!
//! - Entities are lazy: constructing one performs no fetch. The first
//!   accessor needing a page fetches it once; the parsed document is
//!   cached for the entity's lifetime (success and failure alike).
//! - Everything is single-threaded and blocking, deliberately — the
//!   scraped site rate-limits concurrent fetches of per-entity
//!   sub-resources. Parallelism across independent entities is the
//!   caller's business.
//! - Extraction is best-effort against unstable markup; absence is a
//!   first-class result, not an error.

mod coerce;
mod endpoints;
mod error;
mod fetch;
mod images;
mod list;
mod locate;
mod movie;
mod page;
mod patterns;
mod person;
mod sanitize;

/// DOM operations adapter over `dom_query`.
pub mod dom;

pub use endpoints::{Endpoints, PageKind};
pub use error::FetchError;
pub use fetch::{Fetcher, HttpFetcher};
pub use images::{ImageDescriptor, MovieImages};
pub use list::{MovieRef, Search, Top250};
pub use movie::{Award, CastMember, Movie};
pub use page::PageStatus;
pub use person::{Credit, Person};
pub use sanitize::clean;

use std::rc::Rc;

/// Handle to the scraped site: one fetcher plus the URL templates.
///
/// Entities created from the same handle share its fetcher, so a
/// movie's directors or a person's filmography reuse the caller's
/// transport configuration. The handle is `Rc`-shared and
/// single-threaded by design.
pub struct Site {
    fetcher: Rc<dyn Fetcher>,
    endpoints: Endpoints,
}

impl Site {
    /// Handle backed by the default HTTP fetcher and live endpoints.
    pub fn new() -> Result<Rc<Self>, FetchError> {
        let fetcher = Rc::new(HttpFetcher::new()?);
        Ok(Self::with_fetcher(fetcher, Endpoints::default()))
    }

    /// Handle with a caller-supplied fetcher and endpoints.
    ///
    /// This is the seam tests use to serve canned documents.
    #[must_use]
    pub fn with_fetcher(fetcher: Rc<dyn Fetcher>, endpoints: Endpoints) -> Rc<Self> {
        Rc::new(Self { fetcher, endpoints })
    }

    /// A movie by its numeric id, e.g. `"0095016"`.
    #[must_use]
    pub fn movie(self: &Rc<Self>, id: &str) -> Movie {
        Movie::new(Rc::clone(self), id, None, Vec::new())
    }

    /// A movie with a known title and alternative titles, as listing
    /// pages supply them.
    #[must_use]
    pub fn movie_titled(
        self: &Rc<Self>,
        id: &str,
        title: &str,
        also_known_as: Vec<String>,
    ) -> Movie {
        Movie::new(Rc::clone(self), id, Some(title), also_known_as)
    }

    /// A person by their numeric id, e.g. `"0000216"`.
    #[must_use]
    pub fn person(self: &Rc<Self>, id: &str) -> Person {
        Person::new(Rc::clone(self), id)
    }

    /// The image collection of a movie.
    #[must_use]
    pub fn movie_images(self: &Rc<Self>, id: &str) -> MovieImages {
        MovieImages::new(Rc::clone(self), id)
    }

    /// A title search for a free-text query.
    #[must_use]
    pub fn search(self: &Rc<Self>, query: &str) -> Search {
        Search::new(Rc::clone(self), query)
    }

    /// The current top-ranked movie chart.
    #[must_use]
    pub fn top_250(self: &Rc<Self>) -> Top250 {
        Top250::new(Rc::clone(self))
    }

    pub(crate) fn fetcher(&self) -> &dyn Fetcher {
        self.fetcher.as_ref()
    }

    #[must_use]
    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }
}
