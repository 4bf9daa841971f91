// ABOUTME: Ingredient text canonicalization and category label normalization
// ABOUTME: Strips markup, decodes entities, Unicode-normalizes and removes diacritics before matching
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! Text canonicalization
//!
//! Every pattern in the processing classifier and the combiner guardrails is
//! written against the canonical form produced here: lower-case ASCII-folded
//! Spanish, no markup, commas as the only list separator, single spaces.

use scraper::{Html, Node};
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Elements whose text is never ingredient content
const SKIPPED_ELEMENTS: [&str; 2] = ["script", "style"];

/// Remove combining marks after canonical decomposition (`á` -> `a`, `ñ` -> `n`)
#[must_use]
pub fn strip_diacritics(text: &str) -> String {
    text.nfd().filter(|c| !is_combining_mark(*c)).collect()
}

/// Normalize a category label for whitelist comparison: trimmed, lower-case, no diacritics
#[must_use]
pub fn normalize_label(label: &str) -> String {
    strip_diacritics(&label.trim().to_lowercase())
}

/// Parse as an HTML fragment and keep the text nodes, separated by spaces.
///
/// The parser decodes entities and leaves stray `<`/`>` (as in `<5%`) as text.
fn strip_markup(raw: &str) -> String {
    let fragment = Html::parse_fragment(raw);
    let mut text = String::with_capacity(raw.len());

    for node in fragment.tree.root().descendants() {
        let Node::Text(piece) = node.value() else {
            continue;
        };
        let skipped = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .is_some_and(|element| SKIPPED_ELEMENTS.contains(&element.name()))
        });
        if !skipped {
            text.push_str(piece);
            text.push(' ');
        }
    }
    text
}

/// Canonicalize an ingredient list for pattern matching.
///
/// Steps, in order: parse markup (decoding entities), NFKC, lower-case,
/// strip diacritics, semicolons to commas, collapse whitespace.
#[must_use]
pub fn canonicalize_ingredients(raw: &str) -> String {
    if raw.trim().is_empty() {
        return String::new();
    }

    let text: String = strip_markup(raw).nfkc().collect();
    let text = strip_diacritics(&text.to_lowercase()).replace(';', ",");

    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
