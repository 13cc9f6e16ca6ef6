//! DOM operations adapter.
//!
//! Thin wrappers over the `dom_query` crate exposing the handful of tree
//! operations the extraction rules use: text content, attribute lookup,
//! first-match queries and sibling navigation. Keeping these behind one
//! module pins the engine's collaborator contract to a small surface.

pub use dom_query::{Document, Selection};
pub use tendril::StrTendril;

/// Parse an HTML string into a queryable document.
#[inline]
#[must_use]
pub fn parse(html: &str) -> Document {
    Document::from(html)
}

/// All text content of the selection's nodes and descendants.
#[inline]
#[must_use]
pub fn text_content(sel: &Selection) -> StrTendril {
    sel.text()
}

/// Inner HTML of the selection's first node.
#[inline]
#[must_use]
pub fn inner_html(sel: &Selection) -> StrTendril {
    sel.inner_html()
}

/// Attribute value, if present on the selection's first node.
#[inline]
#[must_use]
pub fn get_attribute(sel: &Selection, name: &str) -> Option<String> {
    sel.attr(name).map(|v| v.to_string())
}

/// First element matching `selector`, or `None` when nothing matches.
#[must_use]
pub fn first_match<'a>(root: &Selection<'a>, selector: &str) -> Option<Selection<'a>> {
    let found = root.select(selector);
    if found.exists() {
        Some(found.first())
    } else {
        None
    }
}

/// Next element sibling, skipping interleaved text nodes.
#[must_use]
pub fn next_element_sibling<'a>(sel: &Selection<'a>) -> Option<Selection<'a>> {
    sel.nodes().first().and_then(|node| {
        let mut sibling = node.next_sibling();
        while let Some(s) = sibling {
            if s.is_element() {
                return Some(Selection::from(s));
            }
            sibling = s.next_sibling();
        }
        None
    })
}

/// Text of the node immediately following the selection's first node.
///
/// Labeled headings on the scraped pages are frequently followed by a
/// bare text node rather than a wrapping element; this reads that raw
/// sibling, whatever its node type.
#[must_use]
pub fn next_node_text(sel: &Selection) -> Option<String> {
    sel.nodes()
        .first()
        .and_then(dom_query::NodeRef::next_sibling)
        .map(|node| node.text().to_string())
}

/// Parent element of the selection's first node.
#[inline]
#[must_use]
pub fn parent<'a>(sel: &Selection<'a>) -> Selection<'a> {
    sel.parent()
}
