//! Labeled-field locators.
//!
//! The scraped pages carry no stable field-level identifiers; a field's
//! value sits next to a labeled heading ("Genre:", "Date of Birth", …)
//! and only the layout relates the two. This module isolates that fragile
//! coupling behind one configurable strategy per field: find the label,
//! then read adjacent content according to an explicit policy, instead of
//! duplicating ad-hoc sibling navigation in every accessor.

use dom_query::{Document, Selection};

use crate::dom;
use crate::error::Miss;

/// How a heading's text must relate to the field label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelMatch {
    /// Heading text equals the label (after trimming).
    Exact,
    /// Heading text starts with the label.
    Prefix,
    /// Heading text contains the label.
    Contains,
}

impl LabelMatch {
    fn matches(self, text: &str, label: &str) -> bool {
        let text = text.trim();
        match self {
            Self::Exact => text == label,
            Self::Prefix => text.starts_with(label),
            Self::Contains => text.contains(label),
        }
    }
}

/// Where a label's content block sits relative to the heading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Adjacent {
    /// The raw next sibling node, element or bare text.
    NextNode,
    /// The next element sibling, skipping text nodes.
    NextElement,
    /// The first following element sibling with the given tag name.
    FollowingTag(&'static str),
}

/// Find the first heading of `tag` whose text matches `label`.
///
/// Scans in document order, the way the engine's rule predicates always
/// resolve ambiguity.
#[must_use]
pub fn find_label<'a>(
    doc: &'a Document,
    tag: &str,
    label: &str,
    mode: LabelMatch,
) -> Option<Selection<'a>> {
    for node in doc.select(tag).nodes() {
        let sel = Selection::from(*node);
        if mode.matches(&dom::text_content(&sel), label) {
            return Some(sel);
        }
    }
    None
}

/// Locate the content block adjacent to a labeled heading.
///
/// Returns the block's full text, already trimmed, or `None` when either
/// the label or the adjacent content is missing.
#[must_use]
pub fn labeled_text(
    doc: &Document,
    tag: &str,
    label: &str,
    mode: LabelMatch,
    adjacent: Adjacent,
) -> Option<String> {
    let Some(heading) = find_label(doc, tag, label, mode) else {
        tracing::trace!(label, miss = ?Miss::MissingNode, "labeled heading not found");
        return None;
    };
    let text = match adjacent {
        Adjacent::NextNode => dom::next_node_text(&heading)?,
        Adjacent::NextElement => {
            dom::text_content(&dom::next_element_sibling(&heading)?).to_string()
        }
        Adjacent::FollowingTag(want) => {
            dom::inner_html(&following_tag(&heading, want)?).to_string()
        }
    };
    let text = text.trim().to_string();
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Collect anchors from every element sibling following a labeled
/// heading, optionally keeping only hrefs containing `fragment`.
///
/// Mirrors the page layout where a label heading and its content block
/// share a parent: all anchors of the field live in the siblings after
/// the heading.
#[must_use]
pub fn labeled_anchors<'a>(
    doc: &'a Document,
    tag: &str,
    label: &str,
    mode: LabelMatch,
    fragment: Option<&str>,
) -> Vec<Selection<'a>> {
    let Some(heading) = find_label(doc, tag, label, mode) else {
        return Vec::new();
    };

    let selector = match fragment {
        Some(f) => format!("a[href*='{f}']"),
        None => "a[href]".to_string(),
    };

    let mut anchors = Vec::new();
    let mut current = dom::next_element_sibling(&heading);
    while let Some(block) = current {
        for node in block.select(&selector).nodes() {
            anchors.push(Selection::from(*node));
        }
        current = dom::next_element_sibling(&block);
    }
    anchors
}

fn following_tag<'a>(heading: &Selection<'a>, want: &str) -> Option<Selection<'a>> {
    let mut current = dom::next_element_sibling(heading);
    while let Some(block) = current {
        if block
            .nodes()
            .first()
            .and_then(dom_query::NodeRef::node_name)
            .is_some_and(|name| name.as_ref() == want)
        {
            return Some(block);
        }
        current = dom::next_element_sibling(&block);
    }
    None
}

/// Pair two parallel sequences index-by-index.
///
/// When the source queries disagree in length, pairing stops at the
/// shorter sequence; the extra entries are dropped, matching the legacy
/// behavior of the upstream markup's consumers.
#[must_use]
pub fn zip_parallel<A, B>(left: Vec<A>, right: Vec<B>) -> Vec<(A, B)> {
    left.into_iter().zip(right).collect()
}
