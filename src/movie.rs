//! Movie facade: binds one movie id to its pages and exposes each field
//! as an independent extraction rule.
//!
//! Every accessor is isolated: a page missing its "Tagline" block still
//! lets "Genres" and "Rating" succeed, and a failed page fetch makes all
//! dependent fields absent instead of raising. Derived fields are not
//! memoized — repeated calls re-run the rule against the cached document,
//! which is cheap, and only the raw document is cached.

use std::cell::RefCell;
use std::rc::Rc;

use chrono::NaiveDate;
use dom_query::{Document, Selection};
use serde::{Deserialize, Serialize};

use crate::coerce;
use crate::dom;
use crate::endpoints::PageKind;
use crate::locate::{self, Adjacent, LabelMatch};
use crate::page::{PageSlot, PageStatus};
use crate::patterns::{NAME_ID, POSTER_CROP, POSTER_STEM, RUNTIME_MINUTES};
use crate::person::Person;
use crate::sanitize;
use crate::Site;

/// One row of a movie's awards table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Award {
    /// Award year; absent on table layouts without a year column.
    pub year: Option<i32>,
    /// Lowercased award category ("won", "nominated", …).
    pub category: String,
    /// Award name.
    pub award: String,
}

/// One row of the cast table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CastMember {
    /// Person id of the actor.
    pub person_id: String,
    /// Actor name.
    pub name: String,
    /// Character text; empty when the row carries none.
    pub character: String,
}

/// A movie on the scraped site, identified by its numeric id.
///
/// Lazy loading: constructing a `Movie` performs no fetch; the first
/// accessor needing remote data fetches its page once.
pub struct Movie {
    site: Rc<Site>,
    id: String,
    url: String,
    title: RefCell<Option<String>>,
    also_known_as: Vec<String>,
    primary: PageSlot,
    awards: PageSlot,
    release_info: PageSlot,
}

impl Movie {
    pub(crate) fn new(
        site: Rc<Site>,
        id: &str,
        title: Option<&str>,
        also_known_as: Vec<String>,
    ) -> Self {
        let url = site.endpoints().movie_primary(id);
        Self {
            site,
            id: id.to_string(),
            url,
            title: RefCell::new(title.map(|t| sanitize::unquote(t).into_owned())),
            also_known_as,
            primary: PageSlot::new(),
            awards: PageSlot::new(),
            release_info: PageSlot::new(),
        }
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// URL of the movie's primary page.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Alternative titles supplied at construction (listing pages carry
    /// them); never fetched.
    #[must_use]
    pub fn also_known_as(&self) -> &[String] {
        &self.also_known_as
    }

    /// Fetch diagnostics for one of the movie's pages.
    ///
    /// `None` for page kinds a movie does not read. This is the only
    /// place a fetch failure remains distinguishable from a missing
    /// field.
    #[must_use]
    pub fn page_status(&self, kind: PageKind) -> Option<PageStatus> {
        match kind {
            PageKind::Primary => Some(self.primary.status()),
            PageKind::Awards => Some(self.awards.status()),
            PageKind::ReleaseInfo => Some(self.release_info.status()),
            _ => None,
        }
    }

    /// Movie title.
    ///
    /// A constructor-supplied title is returned as-is unless
    /// `force_refresh` is set, which drops the cached primary document
    /// and re-extracts from the page heading.
    #[must_use]
    pub fn title(&self, force_refresh: bool) -> Option<String> {
        if !force_refresh {
            if let Some(title) = self.title.borrow().clone() {
                return Some(title);
            }
        } else {
            self.primary.force_reload();
        }

        let extracted = self.with_primary(|doc| {
            let h1 = dom::first_match(&doc.select("html"), "h1")?;
            let raw = dom::inner_html(&h1);
            let raw = raw.as_ref();
            // The heading carries the year in a trailing <span>.
            let own = raw.split("<span").next().unwrap_or(raw);
            let title = sanitize::clean(own);
            if title.is_empty() {
                None
            } else {
                Some(title)
            }
        });

        if extracted.is_some() {
            *self.title.borrow_mut() = extracted.clone();
        }
        extracted
    }

    /// Release year from the heading's year link.
    #[must_use]
    pub fn year(&self) -> Option<i32> {
        self.with_primary(|doc| {
            let link = dom::first_match(&doc.select("html"), "a[href^='/year/']")?;
            coerce::year(&dom::text_content(&link))
        })
    }

    /// Genres, in document order.
    #[must_use]
    pub fn genres(&self) -> Vec<String> {
        self.labeled_link_texts("Genre:", Some("/Sections/Genres/"))
    }

    /// Spoken languages.
    #[must_use]
    pub fn languages(&self) -> Vec<String> {
        self.labeled_link_texts("Language:", Some("/language/"))
    }

    /// Production countries.
    #[must_use]
    pub fn countries(&self) -> Vec<String> {
        self.labeled_link_texts("Country:", Some("/country/"))
    }

    /// Runtime in minutes.
    #[must_use]
    pub fn length(&self) -> Option<u32> {
        self.with_primary(|doc| {
            let heading = locate::find_label(doc, "h5", "Runtime:", LabelMatch::Exact)?;
            let block = dom::text_content(&dom::parent(&heading));
            let caps = RUNTIME_MINUTES.captures(&block)?;
            caps[1].parse().ok()
        })
    }

    /// Plot summary, sanitized of the site's summary prompts.
    #[must_use]
    pub fn plot(&self) -> Option<String> {
        self.labeled_block_text("Plot:")
    }

    /// Tagline.
    #[must_use]
    pub fn tagline(&self) -> Option<String> {
        self.labeled_block_text("Tagline:")
    }

    /// MPAA rating with its reason text.
    #[must_use]
    pub fn mpaa_rating(&self) -> Option<String> {
        self.labeled_block_text("MPAA:")
    }

    /// Bare certification code from the USA certification entry.
    #[must_use]
    pub fn mpaa_rating_code(&self) -> Option<String> {
        self.with_primary(|doc| {
            locate::labeled_anchors(doc, "h5", "Certification:", LabelMatch::Exact, None)
                .iter()
                .map(|a| sanitize::clean(&dom::text_content(a)))
                .find_map(|text| text.strip_prefix("USA:").map(str::to_string))
        })
    }

    /// Average user rating; `"7.4/10"` yields `7.4`.
    #[must_use]
    pub fn rating(&self) -> Option<f32> {
        self.with_primary(|doc| {
            let node = dom::first_match(&doc.select("html"), ".starbar-meta b")?;
            coerce::float_before_slash(&sanitize::clean(&dom::text_content(&node)))
        })
    }

    /// Number of user ratings.
    #[must_use]
    pub fn votes(&self) -> Option<u32> {
        self.with_primary(|doc| {
            let node = dom::first_match(&doc.select("html"), "#tn15rating .tn15more")?;
            coerce::int_from_digits(&dom::text_content(&node))
        })
    }

    /// Poster URL, normalized past the site's crop markers.
    #[must_use]
    pub fn poster(&self) -> Option<String> {
        self.with_primary(|doc| {
            let img = dom::first_match(&doc.select("html"), "a[name='poster'] img")?;
            let src = dom::get_attribute(&img, "src")?;
            poster_url(&src)
        })
    }

    /// URL of the "watch the trailer" page.
    #[must_use]
    pub fn trailer_url(&self) -> Option<String> {
        self.with_primary(|doc| {
            let link = dom::first_match(&doc.select("html"), "a[href*='/video/screenplay/']")?;
            let href = dom::get_attribute(&link, "href")?;
            Some(self.site.endpoints().resolve(&href))
        })
    }

    /// Release date, from the release-info page's first data row.
    #[must_use]
    pub fn release_date(&self) -> Option<NaiveDate> {
        let url = self.site.endpoints().movie_release_info(&self.id);
        self.release_info.with(self.site.fetcher(), &url, |doc| {
            let table = dom::first_match(&doc.select("html"), "#tn15content table")?;
            let rows = table.select("tr");
            let row = Selection::from(*rows.nodes().get(1)?);
            let cells = row.select("td");
            let cell = Selection::from(*cells.nodes().get(1)?);
            coerce::date_from_text(&dom::text_content(&cell))
        })
    }

    /// Awards, keeping only rows whose shape identifies them.
    ///
    /// The awards table has no semantic markers, so rows disambiguate by
    /// shape alone: 3 cells with a bold marker in cell 0 form a
    /// category+award pair, 4 cells with the marker in cell 1 add a year
    /// column. Anything else (headers, spacers) is dropped.
    #[must_use]
    pub fn awards(&self) -> Vec<Award> {
        let url = self.site.endpoints().movie_awards(&self.id);
        self.awards
            .with(self.site.fetcher(), &url, |doc| {
                let mut found = Vec::new();
                for node in doc.select(".awards table tr").nodes() {
                    if let Some(award) = award_from_row(&Selection::from(*node)) {
                        found.push(award);
                    }
                }
                Some(found)
            })
            .unwrap_or_default()
    }

    /// Cast members, one per cast-table row that links a person.
    ///
    /// Name and character come from the same row, so a row missing its
    /// character cell still contributes a member with empty character
    /// text.
    #[must_use]
    pub fn cast(&self) -> Vec<CastMember> {
        self.with_primary(|doc| {
            let mut members = Vec::new();
            for node in doc.select("table.cast tr").nodes() {
                let row = Selection::from(*node);
                let Some(link) = dom::first_match(&row, "td.nm a") else {
                    continue;
                };
                let Some(person_id) = person_id_from(&link) else {
                    continue;
                };
                let character = dom::first_match(&row, "td.char")
                    .map(|cell| sanitize::clean(&dom::text_content(&cell)))
                    .unwrap_or_default();
                members.push(CastMember {
                    person_id,
                    name: sanitize::clean(&dom::text_content(&link)),
                    character,
                });
            }
            Some(members)
        })
        .unwrap_or_default()
    }

    /// Cast member names, in billing order.
    #[must_use]
    pub fn cast_members(&self) -> Vec<String> {
        self.cast_column_texts("td.nm a")
    }

    /// Cast member person ids, in billing order.
    #[must_use]
    pub fn cast_member_ids(&self) -> Vec<String> {
        self.with_primary(|doc| {
            let mut ids = Vec::new();
            for node in doc.select("table.cast td.nm a").nodes() {
                if let Some(id) = person_id_from(&Selection::from(*node)) {
                    ids.push(id);
                }
            }
            Some(ids)
        })
        .unwrap_or_default()
    }

    /// Character texts, in billing order.
    #[must_use]
    pub fn cast_characters(&self) -> Vec<String> {
        self.cast_column_texts("td.char")
    }

    /// Names paired with characters index-by-index.
    ///
    /// Pairing stops at the shorter column when the two queries disagree
    /// in count; prefer [`Movie::cast`], which reads both values from
    /// the same row.
    #[must_use]
    pub fn cast_members_characters(&self) -> Vec<(String, String)> {
        locate::zip_parallel(self.cast_members(), self.cast_characters())
    }

    /// Director names.
    #[must_use]
    pub fn director(&self) -> Vec<String> {
        self.with_primary(|doc| {
            let anchors =
                locate::labeled_anchors(doc, "h5", "Director", LabelMatch::Prefix, Some("/name/"));
            Some(
                anchors
                    .iter()
                    .map(|a| sanitize::clean(&dom::text_content(a)))
                    .filter(|name| !name.is_empty())
                    .collect(),
            )
        })
        .unwrap_or_default()
    }

    /// Directors as person entities sharing this movie's fetcher.
    #[must_use]
    pub fn directors(&self) -> Vec<Person> {
        self.with_primary(|doc| {
            let anchors =
                locate::labeled_anchors(doc, "h5", "Director", LabelMatch::Prefix, Some("/name/"));
            Some(
                anchors
                    .iter()
                    .filter_map(person_id_from)
                    .map(|id| self.site.person(&id))
                    .collect(),
            )
        })
        .unwrap_or_default()
    }

    fn with_primary<T>(&self, f: impl FnOnce(&Document) -> Option<T>) -> Option<T> {
        self.primary.with(self.site.fetcher(), &self.url, f)
    }

    fn labeled_link_texts(&self, label: &str, fragment: Option<&str>) -> Vec<String> {
        self.with_primary(|doc| {
            let anchors = locate::labeled_anchors(doc, "h5", label, LabelMatch::Exact, fragment);
            Some(
                anchors
                    .iter()
                    .map(|a| sanitize::clean(&dom::text_content(a)))
                    .filter(|text| !text.is_empty())
                    .collect(),
            )
        })
        .unwrap_or_default()
    }

    fn labeled_block_text(&self, label: &str) -> Option<String> {
        self.with_primary(|doc| {
            let raw = locate::labeled_text(
                doc,
                "h5",
                label,
                LabelMatch::Exact,
                Adjacent::FollowingTag("div"),
            )?;
            let text = sanitize::clean(&raw);
            if text.is_empty() {
                None
            } else {
                Some(text)
            }
        })
    }

    fn cast_column_texts(&self, selector: &str) -> Vec<String> {
        self.with_primary(|doc| {
            let full = format!("table.cast {selector}");
            let mut texts = Vec::new();
            for node in doc.select(&full).nodes() {
                texts.push(sanitize::clean(&dom::text_content(&Selection::from(*node))));
            }
            Some(texts)
        })
        .unwrap_or_default()
    }
}

fn person_id_from(link: &Selection) -> Option<String> {
    let href = dom::get_attribute(link, "href")?;
    NAME_ID.captures(&href).map(|caps| caps[1].to_string())
}

fn poster_url(src: &str) -> Option<String> {
    if let Some(caps) = POSTER_CROP.captures(src) {
        return Some(format!("{}.jpg", &caps[1]));
    }
    POSTER_STEM.captures(src).map(|caps| format!("{}.jpg", &caps[1]))
}

fn award_from_row(row: &Selection) -> Option<Award> {
    let cells: Vec<Selection> = row.select("td").nodes().iter().map(|n| Selection::from(*n)).collect();

    let has_marker = |cell: &Selection| cell.select("b").nodes().len() == 1;

    let (year, category_cell, award_cell) = match cells.as_slice() {
        [c0, c1, _] if has_marker(c0) => (None, c0, c1),
        [c0, c1, c2, _] if has_marker(c1) => {
            let year = coerce::int_from_digits(&dom::text_content(c0))
                .and_then(|y| i32::try_from(y).ok());
            (year, c1, c2)
        }
        _ => return None,
    };

    Some(Award {
        year,
        category: dom::text_content(category_cell).trim().to_lowercase(),
        award: dom::text_content(award_cell).trim().to_string(),
    })
}
