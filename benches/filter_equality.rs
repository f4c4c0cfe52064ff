// SPDX-License-Identifier: MPL-2.0
//! Benchmarks for the filter comparator.
//!
//! The clear button's visibility rule runs a structural comparison against
//! the default state on every render, so it has to stay cheap even for
//! unusually large criteria lists.

use criterion::{criterion_group, criterion_main, Criterion};
use signal_desk::filters::{FilterCriterion, FilterOperator, FilterState, FilterValue};
use std::hint::black_box;

/// Builds a state with `n` criteria.
fn state_with_criteria(n: usize) -> FilterState {
    FilterState {
        criteria: (0..n)
            .map(|i| {
                FilterCriterion::new(
                    format!("field-{i}"),
                    FilterOperator::Eq,
                    FilterValue::Scalar(format!("value-{i}")),
                )
            })
            .collect(),
        ..FilterState::default()
    }
}

fn bench_is_default(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter_equality");

    let empty = FilterState::default();
    group.bench_function("is_default_empty", |b| {
        b.iter(|| black_box(&empty).is_default());
    });

    let large = state_with_criteria(100);
    group.bench_function("is_default_100_criteria", |b| {
        b.iter(|| black_box(&large).is_default());
    });

    group.finish();
}

fn bench_structural_equality(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter_equality");

    let a = state_with_criteria(100);
    let b_state = state_with_criteria(100);
    group.bench_function("eq_100_criteria", |bench| {
        bench.iter(|| black_box(&a) == black_box(&b_state));
    });

    group.finish();
}

criterion_group!(benches, bench_is_default, bench_structural_equality);
criterion_main!(benches);
