//! Shared test helpers for unit tests, integration tests, and benchmarks.
//!
//! Gated behind `#[cfg(any(test, feature = "test-utils"))]` so downstream
//! crates can opt in via the `test-utils` feature.

use crate::item::{ItemDef, Requirement, requirements};

/// A raw material producing `output` units every `time` seconds.
pub fn raw(name: &str, output: f64, time: f64) -> ItemDef {
    ItemDef::raw(name, output, time)
}

/// A concrete item with a recipe given as `(name, count)` pairs.
pub fn concrete(name: &str, output: f64, time: f64, reqs: &[(&str, f64)]) -> ItemDef {
    ItemDef::concrete(name, output, time, requirements(reqs))
}

/// A placeholder leaf.
pub fn placeholder(name: &str) -> ItemDef {
    ItemDef::placeholder(name)
}

/// A deleted-but-referenced leaf.
pub fn tombstone(name: &str) -> ItemDef {
    ItemDef::tombstone(name)
}

/// A linear chain `t0 <- t1 <- ... <- t{depth-1}`, each level consuming
/// `count` units of the level below, all rates 1 unit/s.
pub fn chain(depth: usize, count: f64) -> Vec<ItemDef> {
    (0..depth)
        .map(|i| {
            let required = if i == 0 {
                Vec::new()
            } else {
                vec![Requirement {
                    item: format!("t{}", i - 1),
                    count,
                }]
            };
            ItemDef::concrete(format!("t{i}"), 1.0, 1.0, required)
        })
        .collect()
}

/// A fan: `width` final products all consuming the same raw material.
pub fn fan(width: usize, count: f64) -> Vec<ItemDef> {
    let mut items = vec![raw("shared", 1.0, 1.0)];
    for i in 0..width {
        items.push(concrete(&format!("product{i}"), 1.0, 1.0, &[("shared", count)]));
    }
    items
}
