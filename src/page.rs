//! Lazy document cache.
//!
//! Each entity owns one [`PageSlot`] per page kind it reads. The first
//! field accessor touching a slot triggers the fetch; the outcome
//! (fetched tree or failure) is memoized for the entity's lifetime, so
//! repeated accessor calls are cheap and a dead page is not re-requested
//! per field. There is no expiry and no cross-entity sharing; access is
//! single-threaded by design.

use std::cell::RefCell;

use dom_query::Document;

use crate::error::Miss;
use crate::fetch::Fetcher;

enum PageState {
    Unfetched,
    Fetched(Document),
    Failed,
}

/// Fetch outcome of a page slot, for callers querying diagnostics.
///
/// Accessors surface a failed fetch as plain absence; this is the only
/// place the fetch-failure cause remains observable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageStatus {
    Unfetched,
    Fetched,
    Failed,
}

/// Memoized holder for one (entity, page kind) document.
pub(crate) struct PageSlot {
    state: RefCell<PageState>,
}

impl PageSlot {
    pub fn new() -> Self {
        Self {
            state: RefCell::new(PageState::Unfetched),
        }
    }

    /// Run `f` against the slot's document, fetching it first if this is
    /// the initial access. Returns `None` when the fetch failed (now or
    /// on a previous access) or when `f` itself comes up empty.
    pub fn with<T>(
        &self,
        fetcher: &dyn Fetcher,
        url: &str,
        f: impl FnOnce(&Document) -> Option<T>,
    ) -> Option<T> {
        self.ensure_fetched(fetcher, url);

        let state = self.state.borrow();
        match &*state {
            PageState::Fetched(doc) => f(doc),
            _ => None,
        }
    }

    /// Drop the memoized document so the next access re-fetches.
    ///
    /// Used by `Movie::title` when the caller asks for a forced refresh
    /// of a constructor-supplied title.
    pub fn force_reload(&self) {
        *self.state.borrow_mut() = PageState::Unfetched;
    }

    pub fn status(&self) -> PageStatus {
        match &*self.state.borrow() {
            PageState::Unfetched => PageStatus::Unfetched,
            PageState::Fetched(_) => PageStatus::Fetched,
            PageState::Failed => PageStatus::Failed,
        }
    }

    fn ensure_fetched(&self, fetcher: &dyn Fetcher, url: &str) {
        let mut state = self.state.borrow_mut();
        if let PageState::Unfetched = &*state {
            *state = match fetcher.fetch(url) {
                Ok(doc) => PageState::Fetched(doc),
                Err(err) => {
                    tracing::warn!(url, %err, miss = ?Miss::Fetch, "document unavailable");
                    PageState::Failed
                }
            };
        }
    }
}
