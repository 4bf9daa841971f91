// ABOUTME: Utility modules for common functionality across the application
// ABOUTME: Contains value coercion shared by the catalogue and extraction payload readers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

/// Lenient JSON value to number coercion
pub mod values;
