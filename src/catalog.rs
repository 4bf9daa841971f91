// ABOUTME: Typed catalogue payloads from the crawl collaborator and their conversion to classification inputs
// ABOUTME: Recursive category-tree traversal, product-detail flattening and flat-row column mapping
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! Catalogue payloads
//!
//! The crawl collaborator delivers the category tree and per-product detail
//! documents. No network access happens here: these are pure transformations
//! over already-fetched JSON.

use crate::config::ColumnMapping;
use crate::utils::values::{coerce_f64, coerce_text, reading_from_map};
use grocery_core::errors::{AppError, AppResult};
use grocery_core::models::{
    CanonicalNutrientRecord, CategoryNode, ProductClassificationInput, ProductRef,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::{BTreeMap, BTreeSet};

/// Every category id in a forest, deduplicated
#[must_use]
pub fn collect_category_ids(nodes: &[CategoryNode]) -> BTreeSet<u64> {
    let mut ids = BTreeSet::new();
    for node in nodes {
        ids.insert(node.id);
        ids.extend(collect_category_ids(&node.children));
    }
    ids
}

/// Every product id listed anywhere in a forest, deduplicated
#[must_use]
pub fn collect_product_ids(nodes: &[CategoryNode]) -> BTreeSet<String> {
    let mut ids = BTreeSet::new();
    for node in nodes {
        ids.extend(node.products.iter().filter_map(ProductRef::id_string));
        ids.extend(collect_product_ids(&node.children));
    }
    ids
}

/// One category level of a product's path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelEntry {
    /// Category id
    pub id: u64,
    /// Category name
    pub name: Option<String>,
    /// Sort order within the parent
    pub order: Option<i64>,
}

/// Map each level to the category found at it; later and deeper nodes win
#[must_use]
pub fn flatten_levels(nodes: &[CategoryNode]) -> BTreeMap<u32, LevelEntry> {
    let mut levels = BTreeMap::new();
    for node in nodes {
        levels.insert(
            node.level.unwrap_or(0),
            LevelEntry {
                id: node.id,
                name: node.name.clone(),
                order: node.order,
            },
        );
        levels.extend(flatten_levels(&node.children));
    }
    levels
}

/// Product photo reference
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Photo {
    /// Full-resolution image URL
    #[serde(default)]
    pub zoom: Option<String>,
    /// Photo perspective index
    #[serde(default)]
    pub perspective: Option<i64>,
}

/// Product detail document as served by the catalogue
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductDetail {
    /// Product identifier
    pub id: Value,
    /// EAN barcode
    pub ean: Option<String>,
    /// Display name
    pub display_name: Option<String>,
    /// Packaging description
    pub packaging: Option<String>,
    /// Free-form detail fields
    pub details: Map<String, Value>,
    /// Price fields (`size_format` carries the package-size unit)
    pub price_instructions: Map<String, Value>,
    /// Nutrition fields (`ingredients`, `allergens`)
    pub nutrition_information: Map<String, Value>,
    /// Category path
    pub categories: Vec<CategoryNode>,
    /// Photos in display order
    pub photos: Vec<Photo>,
}

impl ProductDetail {
    /// Identifier rendered as a string
    ///
    /// # Errors
    ///
    /// Returns `MissingRequiredField` if the id is absent or not a scalar
    pub fn product_id(&self) -> AppResult<String> {
        coerce_text(Some(&self.id)).ok_or_else(|| AppError::missing_field("id"))
    }

    /// Image file names for photos with a full-resolution URL: `{id}_img_{index}.jpg`
    ///
    /// # Errors
    ///
    /// Returns `MissingRequiredField` if the id is absent
    pub fn image_filenames(&self) -> AppResult<Vec<String>> {
        let id = self.product_id()?;
        Ok(self
            .photos
            .iter()
            .enumerate()
            .filter(|(_, photo)| photo.zoom.is_some())
            .map(|(index, _)| format!("{id}_img_{index}.jpg"))
            .collect())
    }

    /// Flatten into the row shape used for the dataset
    #[must_use]
    pub fn flatten(&self) -> ProductRow {
        let mut row = ProductRow::default();
        row.insert("id", self.id.clone());
        row.insert("ean", json_text(self.ean.as_deref()));
        row.insert("display_name", json_text(self.display_name.as_deref()));
        row.insert("packaging", json_text(self.packaging.as_deref()));

        for (key, value) in &self.details {
            row.insert(&format!("details_{key}"), value.clone());
        }
        for (key, value) in &self.price_instructions {
            row.insert(&format!("price_{key}"), value.clone());
        }
        for (key, value) in &self.nutrition_information {
            row.insert(key, value.clone());
        }
        for (level, entry) in flatten_levels(&self.categories) {
            row.insert(&format!("level_{level}_cat_id"), Value::from(entry.id));
            row.insert(
                &format!("level_{level}_cat_name"),
                json_text(entry.name.as_deref()),
            );
            row.insert(
                &format!("level_{level}_cat_order"),
                entry.order.map_or(Value::Null, Value::from),
            );
        }
        for (index, photo) in self.photos.iter().enumerate() {
            row.insert(&format!("img_{index}_url"), json_text(photo.zoom.as_deref()));
            row.insert(
                &format!("img_{index}_perspective"),
                photo.perspective.map_or(Value::Null, Value::from),
            );
        }
        row
    }

    /// Convert into a classification input through the flattened row
    ///
    /// # Errors
    ///
    /// Returns `MissingRequiredField` if the id is absent
    pub fn to_classification_input(
        &self,
        columns: &ColumnMapping,
    ) -> AppResult<ProductClassificationInput> {
        self.flatten().to_classification_input(columns)
    }
}

fn json_text(text: Option<&str>) -> Value {
    text.map_or(Value::Null, Value::from)
}

/// Flat key/value product record (one dataset row)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductRow(pub Map<String, Value>);

impl ProductRow {
    /// Cell by column name
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Set a cell
    pub fn insert(&mut self, key: &str, value: Value) {
        self.0.insert(key.to_owned(), value);
    }

    /// Convert into a classification input; malformed cells become absent with a warning
    ///
    /// # Errors
    ///
    /// Returns `MissingRequiredField` if the id column is missing or blank
    pub fn to_classification_input(
        &self,
        columns: &ColumnMapping,
    ) -> AppResult<ProductClassificationInput> {
        let product_id =
            coerce_text(self.get(&columns.id)).ok_or_else(|| AppError::missing_field(&columns.id))?;

        let reading = reading_from_map(&self.0, |field| columns.nutrient(field), &product_id);

        Ok(ProductClassificationInput {
            nutrients: CanonicalNutrientRecord::from(reading),
            sodium_g: coerce_f64(self.get(&columns.sodium_g), &product_id, &columns.sodium_g),
            category: coerce_text(self.get(&columns.category)),
            package_size_unit: coerce_text(self.get(&columns.package_size_unit)),
            level0_category: coerce_text(self.get(&columns.level0_category)),
            level2_category: coerce_text(self.get(&columns.level2_category)),
            ingredients_text: coerce_text(self.get(&columns.ingredients)).unwrap_or_default(),
            product_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flatten_levels_deeper_duplicate_wins() {
        let tree: Vec<CategoryNode> = serde_json::from_value(serde_json::json!([
            {"id": 1, "name": "Aceite", "level": 0, "categories": [
                {"id": 2, "name": "Aceite de oliva", "level": 1},
                {"id": 3, "name": "Aceite de girasol", "level": 1}
            ]}
        ]))
        .unwrap();

        let levels = flatten_levels(&tree);
        assert_eq!(levels[&0].id, 1);
        assert_eq!(levels[&1].name.as_deref(), Some("Aceite de girasol"));
    }
}
