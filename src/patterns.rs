//! Compiled regex patterns shared across extraction rules.
//!
//! All patterns are compiled once at startup using `LazyLock`.

#![allow(clippy::expect_used)]

use std::sync::LazyLock;

use regex::Regex;

/// Matches residual markup tags inside an extracted HTML fragment.
pub static MARKUP_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("MARKUP_TAG regex"));

/// Boilerplate phrases the site embeds next to field values: summary and
/// synopsis prompts, "see more" link text, pipe separators and the raw
/// `&nbsp;`/`&raquo;` remnants that survive tag stripping.
///
/// Matched case-insensitively against tag-stripped, still-encoded text;
/// entity decoding runs after this so phrases cannot hide behind markup
/// or encoding.
pub static BOILERPLATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)see\s+full\s+(?:summary|synopsis)|(?:add|full)\s+(?:summary|synopsis)|see\s+more|&nbsp;|&raquo;|»|\|",
    )
    .expect("BOILERPLATE regex")
});

/// Matches one HTML character reference, named or numeric.
pub static ENTITY_REF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&(#x[0-9a-fA-F]+|#\d+|[a-zA-Z][a-zA-Z0-9]{1,7});").expect("ENTITY_REF regex")
});

/// Matches runs of whitespace for normalization.
pub static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("WHITESPACE regex"));

/// Captures the numeric movie id out of a `/title/tt…` href.
pub static TITLE_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/title/tt(\d+)").expect("TITLE_ID regex"));

/// Captures the numeric person id out of a `/name/nm…` href.
pub static NAME_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/name/nm(\d+)").expect("NAME_ID regex"));

/// Captures the runtime in minutes out of a labeled block's text.
pub static RUNTIME_MINUTES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\s*min").expect("RUNTIME_MINUTES regex"));

/// Captures the total photo count from the media index header.
pub static PHOTO_COUNT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\s+photo").expect("PHOTO_COUNT regex"));

/// Matches the first parenthesized fragment, e.g. a metric height.
pub static PARENTHESIZED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\([^)]+\)").expect("PARENTHESIZED regex"));

/// Captures the crop-marker prefix of a poster image URL.
pub static POSTER_CROP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(https?:.+@@)").expect("POSTER_CROP regex"));

/// Captures a poster URL up to its final extension segment.
pub static POSTER_STEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(https?:.+?)\.[^/.]+$").expect("POSTER_STEM regex"));
