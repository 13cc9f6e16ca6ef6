//! Text sanitizer for extracted fragments.
//!
//! A fixed four-step pipeline: strip residual markup tags, drop known
//! boilerplate phrases, decode HTML character references, then collapse
//! whitespace and trim. The order matters — tags are stripped first so
//! boilerplate phrases cannot hide inside markup, and entity decoding
//! runs after boilerplate removal because the phrase patterns match the
//! still-encoded text.

use std::borrow::Cow;

use crate::patterns::{BOILERPLATE, ENTITY_REF, MARKUP_TAG, WHITESPACE};

/// Run the full sanitizer pipeline over one extracted fragment.
///
/// Idempotent: sanitized output passes through unchanged.
#[must_use]
pub fn clean(fragment: &str) -> String {
    let stripped = strip_tags(fragment);
    let without_noise = BOILERPLATE.replace_all(&stripped, "");
    let decoded = decode_entities(&without_noise);
    let collapsed = WHITESPACE.replace_all(&decoded, " ");
    collapsed.trim().to_string()
}

/// Remove markup tags, keeping their text content.
#[must_use]
pub fn strip_tags(fragment: &str) -> String {
    MARKUP_TAG.replace_all(fragment, "").into_owned()
}

/// Decode HTML character references in a single pass.
///
/// Covers the named entities the site actually emits plus numeric
/// references; unknown names are left untouched rather than guessed at.
#[must_use]
pub fn decode_entities(fragment: &str) -> String {
    ENTITY_REF
        .replace_all(fragment, |caps: &regex::Captures<'_>| {
            decode_one(&caps[1]).unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

fn decode_one(name: &str) -> Option<String> {
    let named = match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some(' '),
        "raquo" => Some('»'),
        "laquo" => Some('«'),
        "mdash" => Some('—'),
        "ndash" => Some('–'),
        _ => None,
    };
    if let Some(ch) = named {
        return Some(ch.to_string());
    }

    let code = if let Some(hex) = name.strip_prefix("#x").or_else(|| name.strip_prefix("#X")) {
        u32::from_str_radix(hex, 16).ok()?
    } else {
        name.strip_prefix('#')?.parse::<u32>().ok()?
    };
    char::from_u32(code).map(|ch| ch.to_string())
}

/// Strip surrounding double quotes, as listing pages quote TV titles.
#[must_use]
pub fn unquote(title: &str) -> Cow<'_, str> {
    if title.contains('"') {
        Cow::Owned(title.replace('"', ""))
    } else {
        Cow::Borrowed(title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_strips_tags_before_matching_boilerplate() {
        let input = "An agent fights thieves.<a href=\"/plotsummary\">See full summary</a>&nbsp;&raquo;";
        assert_eq!(clean(input), "An agent fights thieves.");
    }

    #[test]
    fn clean_decodes_entities_and_collapses_whitespace() {
        let input = "Action &amp;   Adventure &#233;";
        assert_eq!(clean(input), "Action & Adventure é");
    }

    #[test]
    fn clean_removes_pipe_separators() {
        assert_eq!(clean("Action | Adventure"), "Action Adventure");
    }

    #[test]
    fn clean_is_idempotent() {
        let inputs = [
            "  <b>Die Hard</b> | full summary &amp; more&nbsp;",
            "Tagline with &quot;quotes&quot; and &#39;apostrophes&#39;",
            "plain text",
            "",
        ];
        for input in inputs {
            let once = clean(input);
            assert_eq!(clean(&once), once, "not idempotent for {input:?}");
        }
    }

    #[test]
    fn decode_leaves_unknown_references_alone() {
        assert_eq!(decode_entities("&bogus123;"), "&bogus123;");
        assert_eq!(decode_entities("&#x48;i"), "Hi");
    }

    #[test]
    fn unquote_drops_embedded_quotes() {
        assert_eq!(unquote("\"The Wire\""), "The Wire");
        assert_eq!(unquote("Die Hard"), "Die Hard");
    }
}
