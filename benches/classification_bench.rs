// ABOUTME: Criterion benchmarks for the classification engines and the batch pipeline
// ABOUTME: Measures ingredient parsing, consensus resolution and parallel batch throughput
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! Criterion benchmarks for the classification pipeline.

#![allow(clippy::missing_docs_in_private_items, missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use grocery_health::config::HealthConfig;
use grocery_health::intelligence::{classify_ingredients, resolve};
use grocery_health::models::{
    CanonicalNutrientRecord, ProductClassificationInput, RawNutrientReading,
};
use grocery_health::pipeline::{classify_batch, BatchItem};

const INGREDIENT_LISTS: [&str; 4] = [
    "agua, sal",
    "<p>Harina de <b>trigo</b>, az&uacute;car, aceite vegetal (palma), E-322, e471, aroma</p>",
    "Agua carbonatada, acidulante (E-338), edulcorantes (aspartamo, acesulfame K), colorante E-150d",
    "jamón de cerdo, sal, dextrosa, antioxidante (ascorbato sódico), conservador (nitrito sódico)",
];

/// Synthetic batch cycling through the sample ingredient lists
#[allow(clippy::cast_precision_loss, clippy::cast_possible_wrap)]
fn generate_batch(count: usize) -> Vec<BatchItem> {
    (0..count)
        .map(|index| {
            let base = (index % 17) as f64;
            let readings = (0..index % 4)
                .map(|offset| RawNutrientReading {
                    energy_kcal: Some(200 + (offset as i64)),
                    fat_g: Some(base + offset as f64 * 0.5),
                    sat_fat_g: Some(base / 3.0),
                    sugars_g: Some(base * 1.5),
                    salt_g: Some(0.1 * offset as f64),
                    ..RawNutrientReading::default()
                })
                .collect();
            let input = ProductClassificationInput {
                nutrients: CanonicalNutrientRecord {
                    fat_g: Some(base),
                    ..CanonicalNutrientRecord::default()
                },
                category: Some(if index % 3 == 0 { "drink" } else { "food" }.to_owned()),
                level2_category: Some("Pollo".to_owned()),
                ..ProductClassificationInput::new(
                    index.to_string(),
                    INGREDIENT_LISTS[index % INGREDIENT_LISTS.len()],
                )
            };
            BatchItem { input, readings }
        })
        .collect()
}

fn bench_ingredient_classification(c: &mut Criterion) {
    let mut group = c.benchmark_group("processing");
    let config = HealthConfig::default();

    for (index, text) in INGREDIENT_LISTS.iter().enumerate() {
        group.bench_with_input(BenchmarkId::new("classify_ingredients", index), text, |b, text| {
            b.iter(|| classify_ingredients(black_box(text), &config.processing));
        });
    }

    group.finish();
}

fn bench_consensus(c: &mut Criterion) {
    let config = HealthConfig::default();
    let readings: Vec<RawNutrientReading> = (0..6)
        .map(|i| RawNutrientReading {
            energy_kcal: Some(250),
            fat_g: Some(12.0 + f64::from(i % 2)),
            sugars_g: Some(3.1),
            salt_g: Some(1.07),
            ..RawNutrientReading::default()
        })
        .collect();

    c.bench_function("consensus/resolve_six_readings", |b| {
        b.iter(|| resolve(black_box(&readings), &config.consensus));
    });
}

fn bench_batch_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline");
    let config = HealthConfig::default();

    for count in [100_usize, 1_000, 10_000] {
        let batch = generate_batch(count);
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::new("classify_batch", count), &batch, |b, batch| {
            b.iter(|| classify_batch(black_box(batch.clone()), &config));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_ingredient_classification,
    bench_consensus,
    bench_batch_pipeline
);
criterion_main!(benches);
