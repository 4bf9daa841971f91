// ABOUTME: Vision extraction payloads and selection of nutrient readings per product image
// ABOUTME: Filename validation, datos coercion, strict source matching with fallback, extractor trait
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! Vision extraction
//!
//! The vision collaborator reads nutrition tables from label photos and returns
//! one `datos` block per image. This module validates the image set, models the
//! response, and turns it into [`RawNutrientReading`]s for the consensus resolver.
//! The model call itself lives behind [`NutrientExtractor`].

use crate::utils::values::reading_from_map;
use grocery_core::errors::AppResult;
use grocery_core::models::{NutrientField, RawNutrientReading};
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::{BTreeSet, HashMap};
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use tracing::{info, warn};

/// Image file names written by the crawler: `{product_id}_img_{index}.jpg`
static PRODUCT_FILENAME_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?i)^(\d+)_img_\d+\.jpg$").ok());

/// Nutrition values read from one image
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VisionResult {
    /// Image the values were read from (path or file name)
    #[serde(default)]
    pub source: String,
    /// Values keyed by Spanish nutrient name
    #[serde(default)]
    pub datos: Map<String, Value>,
}

/// Diagnostic note emitted by the vision model
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisionLogEntry {
    /// Image the note refers to
    #[serde(default)]
    pub source: String,
    /// Note text
    #[serde(default)]
    pub mensaje: String,
}

/// Structured response for one product's image set
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VisionResponse {
    /// One entry per image with a readable table
    #[serde(default)]
    pub resultados: Vec<VisionResult>,
    /// Diagnostic notes
    #[serde(default)]
    pub log: Vec<VisionLogEntry>,
}

impl VisionResponse {
    /// Parse the model's JSON-mode reply
    ///
    /// # Errors
    ///
    /// Returns `SerializationError` if the reply is not a JSON object of the expected shape
    pub fn from_json(reply: &str) -> AppResult<Self> {
        Ok(serde_json::from_str(reply)?)
    }
}

/// Vision call over one product's label images
pub trait NutrientExtractor {
    /// Read nutrition tables from existing image files of one product
    ///
    /// # Errors
    ///
    /// Returns an error when the underlying call fails or its payload is malformed
    fn extract(&self, product_id: &str, images: &[PathBuf]) -> AppResult<VisionResponse>;
}

/// Key of a nutrient inside a `datos` block
#[must_use]
pub const fn datos_key(field: NutrientField) -> &'static str {
    match field {
        NutrientField::Energy => "valor_energético",
        NutrientField::Fat => "grasas",
        NutrientField::SaturatedFat => "grasas_saturadas",
        NutrientField::Carbohydrates => "carbohidratos",
        NutrientField::Sugars => "azúcares",
        NutrientField::Protein => "proteinas",
        NutrientField::Salt => "sal",
    }
}

/// Reading from one `datos` block; malformed values become absent with a warning
#[must_use]
pub fn reading_from_datos(datos: &Map<String, Value>, product_id: &str) -> RawNutrientReading {
    reading_from_map(datos, datos_key, product_id)
}

/// Shared product id of an image set, `None` if any name is off-pattern or ids differ
#[must_use]
pub fn product_id_from_filenames<S: AsRef<str>>(names: &[S]) -> Option<String> {
    let pattern = PRODUCT_FILENAME_PATTERN.as_ref()?;
    let mut ids = BTreeSet::new();
    for name in names {
        let caps = pattern.captures(name.as_ref())?;
        ids.insert(caps.get(1)?.as_str().to_owned());
    }
    if ids.len() == 1 {
        ids.pop_first()
    } else {
        None
    }
}

/// Final path component of a source, as written by the model
fn basename(source: &str) -> &str {
    Path::new(source)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(source)
}

/// Pick the readings for the images that were sent.
///
/// `datos` are matched to `sent` by file name. When nothing matches but the
/// response carries data, every non-empty `datos` block is used instead.
#[must_use]
pub fn select_readings<S: AsRef<str>>(
    product_id: &str,
    sent: &[S],
    response: &VisionResponse,
) -> Vec<RawNutrientReading> {
    let by_file: HashMap<&str, &Map<String, Value>> = response
        .resultados
        .iter()
        .filter(|result| !result.datos.is_empty())
        .map(|result| (basename(&result.source), &result.datos))
        .collect();

    let mut selected = Vec::new();
    let mut unmatched = Vec::new();
    for name in sent {
        let name = basename(name.as_ref());
        match by_file.get(name) {
            Some(datos) => selected.push(reading_from_datos(datos, product_id)),
            None => unmatched.push(name),
        }
    }

    if selected.is_empty() && !response.resultados.is_empty() {
        if !unmatched.is_empty() {
            warn!(
                product_id,
                unmatched = ?unmatched.iter().take(2).collect::<Vec<_>>(),
                "Source names did not match sent images, using all datos"
            );
        }
        selected = response
            .resultados
            .iter()
            .filter(|result| !result.datos.is_empty())
            .map(|result| reading_from_datos(&result.datos, product_id))
            .collect();
    }

    selected
}

/// Validate an image set, run the extractor and select its readings.
///
/// Returns no readings (with a warning) when the file names do not share one
/// product id or none of the files exist.
///
/// # Errors
///
/// Propagates extractor failures, tagged with the product id
pub fn extract_readings(
    extractor: &dyn NutrientExtractor,
    product_id: &str,
    images: &[PathBuf],
) -> AppResult<Vec<RawNutrientReading>> {
    let mut seen = BTreeSet::new();
    let images: Vec<&PathBuf> = images.iter().filter(|path| seen.insert(*path)).collect();
    let names: Vec<&str> = images
        .iter()
        .map(|path| path.file_name().and_then(|name| name.to_str()).unwrap_or_default())
        .collect();

    let Some(id_from_names) = product_id_from_filenames(&names) else {
        warn!(product_id, files = ?names, "Image names do not share one product id, skipping");
        return Ok(Vec::new());
    };
    if id_from_names != product_id {
        warn!(
            product_id,
            id_from_names = %id_from_names,
            "Image names belong to another product id, proceeding"
        );
    }

    let (existing, missing): (Vec<&PathBuf>, Vec<&PathBuf>) =
        images.into_iter().partition(|path| path.exists());
    if !missing.is_empty() {
        warn!(product_id, missing = ?missing, "Missing image files skipped");
    }
    if existing.is_empty() {
        warn!(product_id, "No existing image files, skipping");
        return Ok(Vec::new());
    }

    let existing: Vec<PathBuf> = existing.into_iter().cloned().collect();
    let response = extractor
        .extract(product_id, &existing)
        .map_err(|e| e.with_product_id(product_id))?;

    for entry in response.log.iter().filter(|entry| !entry.mensaje.is_empty()) {
        info!(
            product_id,
            source = basename(&entry.source),
            message = %entry.mensaje,
            "Vision log"
        );
    }

    let sent: Vec<&str> = existing
        .iter()
        .filter_map(|path| path.file_name().and_then(|name| name.to_str()))
        .collect();
    Ok(select_readings(product_id, &sent, &response))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basename_handles_paths_and_bare_names() {
        assert_eq!(basename("../data/img/4241_img_0.jpg"), "4241_img_0.jpg");
        assert_eq!(basename("4241_img_0.jpg"), "4241_img_0.jpg");
    }
}
