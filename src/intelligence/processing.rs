// ABOUTME: Ultra-processing classifier inferring a NOVA-like level from ingredient list text
// ABOUTME: E-code extraction, named additive dictionary, technological classes and keyword scoring
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! Ultra-Processing Text Classifier
//!
//! Heuristic approximation of the NOVA classification from Spanish ingredient
//! lists. All matching runs on the canonical text from
//! [`canonicalize_ingredients`].
//!
//! # References
//!
//! - Monteiro, C.A., et al. (2019). Ultra-processed foods: what they are and how
//!   to identify them. Public Health Nutrition, 22(5), 936-941.
//!   DOI: 10.1017/S1368980018003762

use crate::config::ProcessingConfig;
use crate::intelligence::text::canonicalize_ingredients;
use grocery_core::models::{ProcessingClassification, ProcessingLabel, ProcessingTriggers};
use regex::{Captures, Regex};
use std::collections::BTreeSet;
use std::sync::LazyLock;

/// E-codes with optional letter suffix and roman subscript (`e-330`, `E 150d`, `e160a(ii)`)
static E_CODE_PATTERN: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(
        r"(?ix)
        \b
        e
        [\s\-]?
        (?P<num>\d{3,4})
        (?P<letter>[a-d])?
        (?:
            [\s\-]*
            (?:\(|\-)?
            (?P<roman>i{1,3}|iv|v|vi{0,3})
            \)?
        )?
        \b",
    )
    .ok()
});

/// Technological class words declaring an additive without its code
static TECH_CLASS_PATTERN: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(conservador(?:es)?|antioxidante(?:s)?|colorante(?:s)?|estabilizante(?:s)?|emulgente(?:s)?|espesante(?:s)?|gelificante(?:s)?|potenciador(?:es)?\s+del\s+sabor|aromas?|acidulante(?:s)?|corrector(?:es)?\s+de\s+la?\s*acidez|regulador(?:es)?\s+de\s+acidez|gasificante(?:s)?)\b",
    )
    .ok()
});

/// Flavourings mentioned as a word
static FLAVOURING_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"\baromas?\b|\bflavou?r(ings?)?\b").ok());

/// What a named additive maps to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AdditiveCode {
    /// One E-code
    Single(&'static str),
    /// A contiguous E-code family
    Family(&'static str),
    /// Recognised name without an E-code
    NameOnly,
}

/// Spanish additive names and what they declare
const NAMED_ADDITIVES: &[(&str, AdditiveCode)] = &[
    // Preservatives
    (r"\bsorbato\s+potasico[s]?\b", AdditiveCode::Single("E-202")),
    (r"\bacido\s+sorbico\b", AdditiveCode::Single("E-200")),
    (r"\bbenzoato\s+sodico[s]?\b", AdditiveCode::Single("E-211")),
    (r"\bacido\s+benzoico\b", AdditiveCode::Single("E-210")),
    (r"\bnitrito\s+sodico\b", AdditiveCode::Single("E-250")),
    (r"\bnitrito\s+potasico\b", AdditiveCode::Single("E-249")),
    (r"\bnitrato\s+sodico\b", AdditiveCode::Single("E-251")),
    (r"\bnitrato\s+potasico\b", AdditiveCode::Single("E-252")),
    (r"\bsulfitos?\b", AdditiveCode::Family("E-220..E-228")),
    // Antioxidants
    (r"\bascorbato\s+sodico\b", AdditiveCode::Single("E-301")),
    (r"\bascorbato\s+calcico\b", AdditiveCode::Single("E-302")),
    (r"\bacido\s+ascorbico\b", AdditiveCode::Single("E-300")),
    (r"\beritorbato\s+sodico\b", AdditiveCode::Single("E-316")),
    (r"\btocoferol(?:es)?\b", AdditiveCode::Single("E-306")),
    // Colours
    (r"\bcaramelo\s+amonico\b", AdditiveCode::Single("E-150c")),
    (r"\bcaramelo\s+natural\b", AdditiveCode::Single("E-150a")),
    (r"\bcarbon\s+vegetal\b", AdditiveCode::Single("E-153")),
    (r"\bbeta?-?caroten[oa]?\b", AdditiveCode::Single("E-160a")),
    // Thickeners and stabilisers
    (r"\bgoma\s+xantana\b", AdditiveCode::Single("E-415")),
    (r"\bcarragenan(?:o|os|atos)?\b", AdditiveCode::Single("E-407")),
    (r"\bagar-?agar\b", AdditiveCode::Single("E-406")),
    (r"\bgoma\s+guar\b", AdditiveCode::Single("E-412")),
    (r"\bpectinas?\b", AdditiveCode::Single("E-440")),
    (r"\balginato(?:s)?\b", AdditiveCode::Family("E-401..E-405")),
    // Emulsifiers
    (r"\blecitina(?:s)?(?:\s+de\s+soja)?\b", AdditiveCode::Single("E-322")),
    (
        r"\bmonogliceridos\s+y\s+digliceridos(?:\s+de\s+[^\s]+)?\s*de\s+acidos\s+grasos\b",
        AdditiveCode::Single("E-471"),
    ),
    (
        r"\bacetato\s+de\s+mono\s+y\s+digliceridos\b",
        AdditiveCode::Single("E-472e"),
    ),
    // Other
    (
        r"\bedta\s+de\s+calcio\s+y\s+disodio\b",
        AdditiveCode::Single("E-385"),
    ),
    (r"\bglutamato\s+monosodico\b", AdditiveCode::Single("E-621")),
    (r"\baroma\s+de\s+humo\b", AdditiveCode::NameOnly),
];

/// Compiled additive dictionary; patterns that fail to compile are skipped
static NAMED_ADDITIVE_PATTERNS: LazyLock<Vec<(Regex, AdditiveCode)>> = LazyLock::new(|| {
    NAMED_ADDITIVES
        .iter()
        .filter_map(|(pattern, code)| {
            Regex::new(&format!("(?i){pattern}"))
                .ok()
                .map(|re| (re, *code))
        })
        .collect()
});

/// Non-nutritive and polyol sweeteners
pub const SWEETENERS: &[&str] = &[
    "aspartame",
    "acesulfame",
    "sucralosa",
    "sacarina",
    "ciclamato",
    "neotame",
    "advantame",
    "stevia",
    "esteviosido",
    "glucosidos de esteviol",
    "eritritol",
    "xilitol",
    "maltitol",
    "sorbitol",
    "edulcorante",
    "sweetener",
];

/// Additives whose purpose is appearance, taste or texture
pub const COSMETIC_ADDITIVES: &[&str] = &[
    "aroma",
    "aromas",
    "saborizante",
    "flavor",
    "flavour",
    "humo liquido",
    "smoke flavour",
    "colorante",
    "color",
    "color added",
    "estabilizante",
    "emulgente",
    "espesante",
    "gelificante",
    "potenciador del sabor",
];

/// Ingredients only produced by industrial fractionation or modification
pub const INDUSTRIAL_INGREDIENTS: &[&str] = &[
    "jarabe de glucosa",
    "jarabe de fructosa",
    "jarabe de glucosa-fructosa",
    "jarabe de maiz",
    "proteina aislada",
    "proteina texturizada",
    "maltodextrina",
    "dextrosa",
    "aceites refinados",
    "aceite refinado",
    "grasa vegetal",
    "aceite vegetal",
    "grasas hidrogenadas",
    "parcialmente hidrogenad",
    "interesterificad",
];

/// Traditional preservation methods (NOVA 3)
pub const CULINARY_PROCESSING: &[&str] = &[
    "en salmuera",
    "en vinagre",
    "curado",
    "fermentado",
    "ahumado",
    "salado",
    "conserva de",
    "encurtido",
];

/// Canonical token for one E-code match: `E-{num}{letter}{roman}`, suffixes lower-case
fn normalize_e_code(caps: &Captures<'_>) -> Option<String> {
    let num = caps.name("num")?.as_str();
    let letter = caps
        .name("letter")
        .map_or_else(String::new, |m| m.as_str().to_lowercase());
    let roman = caps
        .name("roman")
        .map_or_else(String::new, |m| m.as_str().to_lowercase());
    Some(format!("E-{num}{letter}{roman}"))
}

/// Distinct E-codes written explicitly in canonical text
#[must_use]
pub fn extract_e_codes(canonical: &str) -> BTreeSet<String> {
    E_CODE_PATTERN.as_ref().map_or_else(BTreeSet::new, |re| {
        re.captures_iter(canonical)
            .filter_map(|caps| normalize_e_code(&caps))
            .collect()
    })
}

/// Keywords from `list` occurring as substrings of `text`, in list order
fn keywords_in(text: &str, list: &[&str]) -> Vec<String> {
    list.iter()
        .filter(|keyword| text.contains(*keyword))
        .map(|keyword| (*keyword).to_owned())
        .collect()
}

/// Collect all evidence from canonical text
#[must_use]
pub fn collect_triggers(canonical: &str) -> ProcessingTriggers {
    let mut e_numbers = extract_e_codes(canonical);
    let mut named_additives = BTreeSet::new();
    let mut families = BTreeSet::new();

    for (pattern, code) in NAMED_ADDITIVE_PATTERNS.iter() {
        for found in pattern.find_iter(canonical) {
            named_additives.insert(found.as_str().to_owned());
            match code {
                AdditiveCode::Single(e_code) => {
                    e_numbers.insert((*e_code).to_owned());
                }
                AdditiveCode::Family(family) => {
                    families.insert((*family).to_owned());
                }
                AdditiveCode::NameOnly => {}
            }
        }
    }

    let classes: BTreeSet<String> = TECH_CLASS_PATTERN.as_ref().map_or_else(BTreeSet::new, |re| {
        re.find_iter(canonical)
            .map(|m| m.as_str().to_lowercase())
            .collect()
    });

    ProcessingTriggers {
        e_numbers: e_numbers.into_iter().collect(),
        families: families.into_iter().collect(),
        named_additives: named_additives.into_iter().collect(),
        classes: classes.into_iter().collect(),
        sweeteners: keywords_in(canonical, SWEETENERS),
        cosmetic_additives: keywords_in(canonical, COSMETIC_ADDITIVES),
        industrial_ingredients: keywords_in(canonical, INDUSTRIAL_INGREDIENTS),
        culinary_processing: keywords_in(canonical, CULINARY_PROCESSING),
        mentions_flavourings: FLAVOURING_PATTERN
            .as_ref()
            .is_some_and(|re| re.is_match(canonical)),
    }
}

/// Additive score from collected evidence
#[must_use]
pub fn score_triggers(triggers: &ProcessingTriggers) -> u32 {
    let e_count = triggers.e_numbers.len();
    let cosmetic_count = triggers.cosmetic_additives.len();
    let mut score = 0;

    // Strong signals
    if !triggers.sweeteners.is_empty() {
        score += 2;
    }
    if !triggers.industrial_ingredients.is_empty() {
        score += 1;
    }
    // Medium signals
    if cosmetic_count >= 1 {
        score += 1;
    }
    if cosmetic_count >= 2 {
        score += 1;
    }
    // Additive count
    if e_count >= 2 {
        score += 1;
    }
    if e_count >= 4 {
        score += 1;
    }
    if !triggers.families.is_empty() {
        score += 1;
    }
    // Declared but uncoded additives
    if !triggers.classes.is_empty() && e_count == 0 {
        score += 1;
    }

    score
}

/// Culinary preservation without any cosmetic, industrial or sweetener evidence
fn is_culinary_only(triggers: &ProcessingTriggers) -> bool {
    !triggers.culinary_processing.is_empty()
        && triggers.cosmetic_additives.is_empty()
        && triggers.industrial_ingredients.is_empty()
        && triggers.sweeteners.is_empty()
}

/// Classify an ingredient list
#[must_use]
pub fn classify_ingredients(text: &str, config: &ProcessingConfig) -> ProcessingClassification {
    let canonical = canonicalize_ingredients(text);
    let triggers = collect_triggers(&canonical);

    if is_culinary_only(&triggers) {
        return ProcessingClassification {
            label: ProcessingLabel::Processed,
            score: 0,
            triggers,
        };
    }

    let score = score_triggers(&triggers);
    let label = if score >= config.ultra_processed_min_score {
        ProcessingLabel::UltraProcessed
    } else if score >= config.processed_min_score {
        ProcessingLabel::Processed
    } else {
        ProcessingLabel::Minimal
    };

    ProcessingClassification {
        label,
        score,
        triggers,
    }
}
