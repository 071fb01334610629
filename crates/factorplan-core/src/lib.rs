//! Factorplan Core -- demand propagation for production chains.
//!
//! Given a list of item definitions (name, output rate, cycle time, required
//! sub-items), this crate computes how many factories of every item are
//! needed so that each consumer's input demand is exactly met, plus the
//! per-edge flow between producers and consumers used for display.
//!
//! # How planning works
//!
//! [`plan::compute`] runs a single worklist pass over the dependency graph,
//! consumer-side-in:
//!
//! 1. Items nothing consumes are **final products**; each is seeded at one
//!    factory and enqueued.
//! 2. Popping an item propagates its finalized demand to each requirement,
//!    rounding per edge in [`plan::RoundingMode::Ceiling`] (a factory cannot
//!    be split between unrelated consumers).
//! 3. An item joins the worklist exactly when its last consumer has been
//!    processed, so every item is finalized once, with no fixpoint iteration.
//!
//! Cycles never drain their remaining-consumer counters and are reported in
//! [`plan::Plan::unresolved`]; demanded items that cannot produce reject the
//! run with [`plan::PlanError::UnsatisfiableDemand`].
//!
//! # Key types
//!
//! - [`item::ItemDef`] / [`item::ItemKind`] -- the input data model; leaves,
//!   placeholders, and tombstones are distinct variants.
//! - [`graph::DependencyGraph`] -- interned consumer index over a definition
//!   list, with a level-grouping helper for display layout.
//! - [`plan::Plan`] -- the result snapshot: factory counts, edge
//!   contributions, final products, unresolved diagnostics.
//! - [`trace::PlanTrace`] -- observer hooks for watching a run.

pub mod graph;
pub mod item;
pub mod plan;
pub mod trace;

#[cfg(feature = "data-loader")]
pub mod data_loader;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
