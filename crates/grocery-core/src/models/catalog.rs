// ABOUTME: Typed category tree as served by the product catalogue
// ABOUTME: CategoryNode with nested children and ProductRef entries listed under a category
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Reference to a product listed under a category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRef {
    /// Product identifier (the catalogue emits both strings and numbers)
    pub id: Value,
}

impl ProductRef {
    /// Identifier rendered as a string, `None` for non-scalar ids
    #[must_use]
    pub fn id_string(&self) -> Option<String> {
        match &self.id {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }
}

/// One node of the nested category tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryNode {
    /// Category identifier
    pub id: u64,
    /// Display name
    #[serde(default)]
    pub name: Option<String>,
    /// Depth in the catalogue (0 = top level)
    #[serde(default)]
    pub level: Option<u32>,
    /// Sort order within the parent
    #[serde(default)]
    pub order: Option<i64>,
    /// Nested sub-categories
    #[serde(default, rename = "categories")]
    pub children: Vec<CategoryNode>,
    /// Products listed directly under this category
    #[serde(default)]
    pub products: Vec<ProductRef>,
}
