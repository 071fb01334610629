//! Factory-requirement propagation.
//!
//! Given a list of item definitions, computes how many factories of every
//! item are needed so that each consumer's input demand is met, starting from
//! one factory of each final product (an item nothing else consumes).
//!
//! Demand flows consumer-side-in: an item is processed only once every one
//! of its consumers has a finalized factory count, so each item is resolved
//! exactly once with no fixpoint iteration -- a single O(items + edges) pass
//! driven by a FIFO worklist and per-item remaining-consumer counters.
//!
//! The rounding policy is the load-bearing detail: in [`RoundingMode::Ceiling`]
//! every per-edge demand is rounded up *before* accumulation, never after.
//! A factory cannot be split between unrelated consumers, so two consumers
//! that each need 0.3 of a shared input cost `ceil(0.3) + ceil(0.3) = 2`
//! factories, not `ceil(0.6) = 1`.

use crate::graph::DependencyGraph;
use crate::item::ItemDef;
use crate::trace::{EdgeTrace, PlanTrace};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that reject a planning run outright.
#[derive(Debug, thiserror::Error)]
pub enum PlanError {
    /// A demanded item has a zero or undefined production rate, so no number
    /// of its factories can satisfy the consumer. Raised instead of letting
    /// an infinite per-factory need poison the result maps.
    #[error("'{producer}' cannot produce (zero or undefined rate) but '{consumer}' requires it")]
    UnsatisfiableDemand { producer: String, consumer: String },

    /// An item has requirements but a zero or non-finite cycle time, making
    /// its consumption rate undefined.
    #[error("'{item}' has requirements but no valid cycle time")]
    InvalidCycleTime { item: String },
}

// ---------------------------------------------------------------------------
// Rounding policy
// ---------------------------------------------------------------------------

/// How per-edge factory demands are treated before accumulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundingMode {
    /// Keep fractional factory requirements as-is.
    Exact,
    /// Round every per-edge requirement up to the next whole factory.
    Ceiling,
}

impl RoundingMode {
    /// Apply this policy to one edge's raw demand.
    #[inline]
    pub fn apply(self, raw: f64) -> f64 {
        match self {
            RoundingMode::Exact => raw,
            RoundingMode::Ceiling => raw.ceil(),
        }
    }
}

// ---------------------------------------------------------------------------
// Result snapshot
// ---------------------------------------------------------------------------

/// The demand one specific consumer places on one producer, in producer
/// factories. Duplicate requirement entries in a single recipe yield one
/// contribution each.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeContribution {
    pub producer: String,
    pub consumer: String,
    pub factories: f64,
}

/// Result of one planning run. Recomputed from scratch on every call;
/// carries no state between calls.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    /// Finalized factory count per item. Items never finalized (cycle
    /// members and their suppliers) are absent; see `unresolved`.
    pub factory_counts: HashMap<String, f64>,
    /// Per-edge demands, in processing order.
    pub edge_contributions: Vec<EdgeContribution>,
    /// Items with zero consumers, in input order. Each is seeded at exactly
    /// one factory.
    pub final_products: Vec<String>,
    /// Items whose remaining-consumer counter never reached zero: members of
    /// a dependency cycle, or items consumed only through one. In input
    /// order. Empty for well-formed acyclic input.
    pub unresolved: Vec<String>,
}

impl Plan {
    /// Finalized factory count for an item, if it was resolved.
    pub fn factories(&self, name: &str) -> Option<f64> {
        self.factory_counts.get(name).copied()
    }

    /// Total producer factories dedicated to one consumer, if that edge was
    /// processed. Sums duplicate requirement entries.
    pub fn edge(&self, producer: &str, consumer: &str) -> Option<f64> {
        let mut total = None;
        for contribution in &self.edge_contributions {
            if contribution.producer == producer && contribution.consumer == consumer {
                *total.get_or_insert(0.0) += contribution.factories;
            }
        }
        total
    }

    /// True if the item has zero consumers in the planned list.
    pub fn is_final_product(&self, name: &str) -> bool {
        self.final_products.iter().any(|p| p == name)
    }
}

// ---------------------------------------------------------------------------
// Propagation
// ---------------------------------------------------------------------------

/// Compute factory requirements for a definition list.
///
/// See the module docs for the processing order and rounding policy. The
/// input list is never mutated; calling twice with identical input yields
/// identical output.
pub fn compute(items: &[ItemDef], mode: RoundingMode) -> Result<Plan, PlanError> {
    compute_with_trace(items, mode, &mut ())
}

/// [`compute`], with an observer invoked at each edge-processing step.
pub fn compute_with_trace(
    items: &[ItemDef],
    mode: RoundingMode,
    trace: &mut dyn PlanTrace,
) -> Result<Plan, PlanError> {
    let graph = DependencyGraph::build(items);

    // Accumulated factory counts, None until the first demand (or seed)
    // touches an item.
    let mut counts: Vec<Option<f64>> = vec![None; graph.len()];
    let mut remaining = graph.consumer_counts();
    let mut enqueued: Vec<bool> = vec![false; graph.len()];
    let mut worklist: VecDeque<_> = VecDeque::with_capacity(graph.final_products().len());
    let mut edge_contributions: Vec<EdgeContribution> = Vec::new();

    // Seed: one factory of each final product.
    for &id in graph.final_products() {
        counts[id.index()] = Some(1.0);
        enqueued[id.index()] = true;
        worklist.push_back(id);
        trace.ready(graph.name(id), 1.0);
    }

    while let Some(consumer) = worklist.pop_front() {
        let consumer_def = graph.item(consumer);
        if consumer_def.is_leaf() {
            // Raw material, placeholder, or tombstone: no demand to propagate.
            continue;
        }
        let Some(cycle_time) = consumer_def.cycle_time() else {
            return Err(PlanError::InvalidCycleTime {
                item: consumer_def.name.clone(),
            });
        };

        // Finalized by construction: every consumer of `consumer` has
        // already contributed before it was enqueued.
        let consumer_factories = counts[consumer.index()].unwrap_or(0.0);

        for req in consumer_def.required() {
            let Some(producer) = graph.id_of(&req.item) else {
                // Dangling reference: tolerated, never an error.
                continue;
            };
            let producer_def = graph.item(producer);
            let producer_rate = producer_def.rate();
            if producer_rate <= 0.0 {
                return Err(PlanError::UnsatisfiableDemand {
                    producer: producer_def.name.clone(),
                    consumer: consumer_def.name.clone(),
                });
            }

            let consumption_rate = req.count / cycle_time;
            let per_factory = consumption_rate / producer_rate;
            let raw_demand = per_factory * consumer_factories;
            // Rounded per edge, before accumulation -- never on the total.
            let demand = mode.apply(raw_demand);

            trace.edge(&EdgeTrace {
                producer: &producer_def.name,
                consumer: &consumer_def.name,
                consumption_rate,
                producer_rate,
                per_factory,
                raw_demand,
                demand,
            });

            edge_contributions.push(EdgeContribution {
                producer: producer_def.name.clone(),
                consumer: consumer_def.name.clone(),
                factories: demand,
            });

            *counts[producer.index()].get_or_insert(0.0) += demand;

            remaining[producer.index()] -= 1;
            if remaining[producer.index()] == 0 && !enqueued[producer.index()] {
                enqueued[producer.index()] = true;
                worklist.push_back(producer);
                trace.ready(
                    graph.name(producer),
                    counts[producer.index()].unwrap_or(0.0),
                );
            }
        }
    }

    // Anything whose counter never drained sits in or behind a cycle.
    // Reported explicitly rather than silently dropped.
    let unresolved: Vec<String> = (0..graph.len())
        .filter(|&idx| remaining[idx] > 0)
        .map(|idx| items[idx].name.clone())
        .collect();

    let mut factory_counts = HashMap::new();
    for (idx, item) in items.iter().enumerate() {
        if enqueued[idx]
            && let Some(count) = counts[idx]
        {
            factory_counts.insert(item.name.clone(), count);
        }
    }

    let final_products = graph
        .final_products()
        .iter()
        .map(|&id| graph.name(id).to_string())
        .collect();

    Ok(Plan {
        factory_counts,
        edge_contributions,
        final_products,
        unresolved,
    })
}

// ===========================================================================
// Tests
// ===========================================================================


// ===========================================================================
// Property tests
// ===========================================================================
