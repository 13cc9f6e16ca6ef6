//! Person facade: biography fields, headshot and filmography.
//!
//! A person reads up to three pages: the main listing page (filmography
//! rows), the biography page (most labeled fields) and a photo page
//! whose URL is itself extracted from the biography page. That last pair
//! forms the system's only dependency chain: an absent headshot link
//! short-circuits without fetching anything further.

use std::collections::BTreeMap;
use std::rc::Rc;

use chrono::NaiveDate;
use dom_query::{Document, Selection};

use crate::coerce;
use crate::dom;
use crate::error::Miss;
use crate::locate::{self, Adjacent, LabelMatch};
use crate::movie::Movie;
use crate::page::PageSlot;
use crate::patterns::{PARENTHESIZED, TITLE_ID};
use crate::sanitize;
use crate::Site;

/// Filmography roles the listing page indexes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Credit {
    Actor,
    Actress,
    Director,
    Writer,
    Composer,
    Producer,
    SelfAppearance,
    Soundtrack,
}

impl Credit {
    /// All credits, in the order the listing page presents them.
    pub const ALL: [Credit; 8] = [
        Credit::Actor,
        Credit::Actress,
        Credit::Director,
        Credit::Writer,
        Credit::Composer,
        Credit::Producer,
        Credit::SelfAppearance,
        Credit::Soundtrack,
    ];

    /// Section anchor used by the listing page's heading ids.
    #[must_use]
    pub fn section(self) -> &'static str {
        match self {
            Credit::Actor => "Actor",
            Credit::Actress => "Actress",
            Credit::Director => "Director",
            Credit::Writer => "Writer",
            Credit::Composer => "Composer",
            Credit::Producer => "Producer",
            Credit::SelfAppearance => "Self",
            Credit::Soundtrack => "Soundtrack",
        }
    }
}

/// A person on the scraped site, identified by their numeric id.
pub struct Person {
    site: Rc<Site>,
    id: String,
    listing: PageSlot,
    biography: PageSlot,
    photo_page: PageSlot,
}

impl Person {
    pub(crate) fn new(site: Rc<Site>, id: &str) -> Self {
        Self {
            site,
            id: id.to_string(),
            listing: PageSlot::new(),
            biography: PageSlot::new(),
            photo_page: PageSlot::new(),
        }
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Credited name.
    #[must_use]
    pub fn name(&self) -> Option<String> {
        self.with_biography(|doc| {
            let link = dom::first_match(&doc.select("html"), "a.main")?;
            non_empty(sanitize::clean(&dom::text_content(&link)))
        })
    }

    /// Birth name, from the bare text node after its heading.
    #[must_use]
    pub fn real_name(&self) -> Option<String> {
        self.with_biography(|doc| {
            let raw = locate::labeled_text(
                doc,
                "h5",
                "Birth Name",
                LabelMatch::Contains,
                Adjacent::NextNode,
            )?;
            non_empty(sanitize::clean(&raw))
        })
    }

    /// Birth date, joined from a day-month block and a year link found
    /// by separate queries.
    #[must_use]
    pub fn birthdate(&self) -> Option<NaiveDate> {
        self.labeled_date("Date of Birth", "a[href*='birth_year']")
    }

    /// Death date; absent for the living.
    #[must_use]
    pub fn deathdate(&self) -> Option<NaiveDate> {
        self.labeled_date("Date of Death", "a[href*='death_date']")
    }

    /// Birth place.
    #[must_use]
    pub fn nationality(&self) -> Option<String> {
        self.with_biography(|doc| {
            let link = dom::first_match(&doc.select("html"), "a[href*='birth_place']")?;
            non_empty(sanitize::clean(&dom::text_content(&link)))
        })
    }

    /// Height as the site's parenthesized metric fragment, e.g.
    /// `"(1.83 m)"`.
    #[must_use]
    pub fn height(&self) -> Option<String> {
        self.with_biography(|doc| {
            let raw = locate::labeled_text(
                doc,
                "h5",
                "Height",
                LabelMatch::Contains,
                Adjacent::NextNode,
            )?;
            PARENTHESIZED
                .find(&raw)
                .map(|m| m.as_str().to_string())
        })
    }

    /// Mini biography text.
    #[must_use]
    pub fn biography(&self) -> Option<String> {
        self.with_biography(|doc| {
            let raw = locate::labeled_text(
                doc,
                "h5",
                "Biography",
                LabelMatch::Contains,
                Adjacent::NextElement,
            )?;
            non_empty(sanitize::clean(&raw))
        })
    }

    /// Headshot URL, via the two-stage dependent fetch.
    ///
    /// Stage one extracts the photo page URL from the biography page;
    /// when that link is absent the photo page is never fetched and the
    /// field resolves to absent.
    #[must_use]
    pub fn photo(&self) -> Option<String> {
        let Some(href) = self.photo_page_url() else {
            tracing::debug!(id = %self.id, miss = ?Miss::Dependency, "no headshot link");
            return None;
        };

        let url = self.site.endpoints().resolve(&href);
        self.photo_page.with(self.site.fetcher(), &url, |doc| {
            let img = dom::first_match(&doc.select("html"), "img#primary-img")?;
            dom::get_attribute(&img, "src")
        })
    }

    /// Movie ids credited under one role section of the listing page.
    #[must_use]
    pub fn credit_ids(&self, credit: Credit) -> Vec<String> {
        let selector = format!("#filmo-head-{}", credit.section());
        self.with_listing(|doc| {
            let heading = dom::first_match(&doc.select("html"), &selector)?;
            let section = dom::next_element_sibling(&heading)?;
            let mut ids = Vec::new();
            for node in section.select(".filmo-row b a").nodes() {
                let link = Selection::from(*node);
                if let Some(href) = dom::get_attribute(&link, "href") {
                    if let Some(caps) = TITLE_ID.captures(&href) {
                        ids.push(caps[1].to_string());
                    }
                }
            }
            Some(ids)
        })
        .unwrap_or_default()
    }

    /// All appearances, keyed by role.
    ///
    /// Movies are lightweight handles sharing this person's fetcher; no
    /// page is fetched for them until one of their accessors is used.
    #[must_use]
    pub fn filmography(&self) -> BTreeMap<Credit, Vec<Movie>> {
        Credit::ALL
            .iter()
            .map(|&credit| {
                let movies = self
                    .credit_ids(credit)
                    .iter()
                    .map(|id| self.site.movie(id))
                    .collect();
                (credit, movies)
            })
            .collect()
    }

    fn photo_page_url(&self) -> Option<String> {
        self.with_biography(|doc| {
            let link = dom::first_match(&doc.select("html"), ".photo a[name='headshot']")?;
            dom::get_attribute(&link, "href")
        })
    }

    fn labeled_date(&self, label: &str, year_selector: &str) -> Option<NaiveDate> {
        self.with_biography(|doc| {
            let day_month = locate::labeled_text(
                doc,
                "h5",
                label,
                LabelMatch::Contains,
                Adjacent::NextElement,
            )
            .unwrap_or_default();
            let year = dom::first_match(&doc.select("html"), year_selector)
                .map(|link| dom::text_content(&link).trim().to_string())
                .unwrap_or_default();
            coerce::date_from_parts(&day_month, &year)
        })
    }

    fn with_biography<T>(&self, f: impl FnOnce(&Document) -> Option<T>) -> Option<T> {
        let url = self.site.endpoints().person_biography(&self.id);
        self.biography.with(self.site.fetcher(), &url, f)
    }

    fn with_listing<T>(&self, f: impl FnOnce(&Document) -> Option<T>) -> Option<T> {
        let url = self.site.endpoints().person_listing(&self.id);
        self.listing.with(self.site.fetcher(), &url, f)
    }
}

fn non_empty(text: String) -> Option<String> {
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}
