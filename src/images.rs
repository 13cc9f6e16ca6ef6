//! Movie image collection: paginated media index plus per-image pages.
//!
//! The index page advertises a photo count; every 48 images live on one
//! index slice, each thumbnail linking to a media item page that carries
//! the high-resolution URL and caption. Fetching stays strictly
//! sequential: the site answers 503 to concurrent media fetches.

use std::rc::Rc;

use dom_query::Selection;
use serde::{Deserialize, Serialize};

use crate::dom;
use crate::page::PageSlot;
use crate::patterns::PHOTO_COUNT;
use crate::sanitize;
use crate::Site;

/// Images per media index slice.
const INDEX_PAGE_SIZE: u32 = 48;

/// One image attached to a movie.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageDescriptor {
    /// High-resolution image URL.
    pub url: String,
    /// Caption text; empty when the page carries none.
    pub caption: String,
}

/// The image collection of one movie.
pub struct MovieImages {
    site: Rc<Site>,
    id: String,
    index: PageSlot,
}

impl MovieImages {
    pub(crate) fn new(site: Rc<Site>, id: &str) -> Self {
        Self {
            site,
            id: id.to_string(),
            index: PageSlot::new(),
        }
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Total number of photos the media index advertises.
    #[must_use]
    pub fn count(&self) -> Option<u32> {
        let url = self.site.endpoints().media_index(&self.id, None);
        self.index.with(self.site.fetcher(), &url, |doc| {
            let header = dom::first_match(&doc.select("html"), "div.leftright #left")?;
            let text = dom::text_content(&header);
            let caps = PHOTO_COUNT.captures(&text)?;
            caps[1].parse().ok()
        })
    }

    /// Descriptors for every image, fetched one page at a time.
    ///
    /// Index slices or media pages that fail to fetch or parse are
    /// skipped; the rest of the collection still comes back.
    #[must_use]
    pub fn links(&self) -> Vec<ImageDescriptor> {
        self.media_page_hrefs()
            .iter()
            .filter_map(|href| self.image_from_page(href))
            .collect()
    }

    /// Hrefs of all media item pages, gathered across index slices.
    fn media_page_hrefs(&self) -> Vec<String> {
        let Some(count) = self.count() else {
            return Vec::new();
        };

        let mut hrefs = Vec::new();
        for page in 1..=(count / INDEX_PAGE_SIZE + 1) {
            let url = self.site.endpoints().media_index(&self.id, Some(page));
            let Ok(doc) = self.site.fetcher().fetch(&url) else {
                continue;
            };
            for node in doc.select("div.thumb_list a").nodes() {
                if let Some(href) = dom::get_attribute(&Selection::from(*node), "href") {
                    hrefs.push(href);
                }
            }
        }
        hrefs
    }

    fn image_from_page(&self, href: &str) -> Option<ImageDescriptor> {
        let url = self.site.endpoints().resolve(href);
        let doc = self.site.fetcher().fetch(&url).ok()?;

        let img = dom::first_match(&doc.select("html"), "img#primary-img")?;
        let src = dom::get_attribute(&img, "src")?;
        let caption = dom::first_match(&doc.select("html"), "div#photo-caption")
            .map(|sel| sanitize::clean(&dom::text_content(&sel)))
            .unwrap_or_default();

        Some(ImageDescriptor { url: src, caption })
    }
}
