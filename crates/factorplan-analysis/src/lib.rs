//! Read-only analysis over a computed production plan.
//!
//! Everything here consumes a [`Plan`] and the item list it was computed
//! from; nothing mutates either. Three surfaces:
//!
//! - [`total_production_rate`] -- aggregate throughput of a factory group.
//! - [`analyze`] -- per-item balance check: does each item's input supply
//!   keep up with the demand its own factories place on it?
//! - [`target_flows`] -- per-edge factory breakdown for a single target
//!   item, for visualizing one product's supply tree in isolation.

use factorplan_core::item::ItemDef;
use factorplan_core::plan::Plan;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Supply below this fraction of demand counts as a bottleneck. The 1%
/// slack absorbs float rounding in ceiling-mode plans.
const BALANCE_TOLERANCE: f64 = 0.99;

// ---------------------------------------------------------------------------
// Throughput
// ---------------------------------------------------------------------------

/// Units per second produced by `factories` factories of the named item.
/// Returns 0.0 for unknown names and zero-rate items.
pub fn total_production_rate(items: &[ItemDef], name: &str, factories: f64) -> f64 {
    find_item(items, name).map_or(0.0, |item| item.rate() * factories)
}

fn find_item<'a>(items: &'a [ItemDef], name: &str) -> Option<&'a ItemDef> {
    items.iter().find(|item| item.name == name)
}

// ---------------------------------------------------------------------------
// Bottleneck analysis
// ---------------------------------------------------------------------------

/// Balance state of one planned item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemStatus {
    /// No inputs: a raw material or leaf, trivially balanced.
    RawResource,
    /// Every input keeps up with demand.
    Balanced,
    /// At least one input falls short.
    Bottleneck,
}

/// Supply-versus-demand numbers for one input of one item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequirementLoad {
    /// The input item.
    pub item: String,
    /// Units per second the analyzed item's factories demand.
    pub required_rate: f64,
    /// Units per second the input's planned factories supply.
    pub available_rate: f64,
    /// `available_rate / required_rate`. Infinite when nothing is demanded.
    pub efficiency: f64,
    /// True when efficiency falls below the balance tolerance.
    pub bottleneck: bool,
}

/// Full balance report for one planned item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemAnalysis {
    pub status: ItemStatus,
    pub balanced: bool,
    pub requirements: Vec<RequirementLoad>,
}

/// Check every planned item's inputs against the supply its plan provides.
///
/// An exact-mode plan is balanced by construction; this is mainly useful for
/// hand-edited factory counts and for confirming that ceiling-mode
/// over-provisioning never dips below demand.
pub fn analyze(plan: &Plan, items: &[ItemDef]) -> HashMap<String, ItemAnalysis> {
    let mut report = HashMap::with_capacity(plan.factory_counts.len());

    for (name, &factories) in &plan.factory_counts {
        let Some(item) = find_item(items, name) else {
            continue;
        };
        let Some(cycle_time) = item.cycle_time().filter(|_| !item.is_leaf()) else {
            report.insert(
                name.clone(),
                ItemAnalysis {
                    status: ItemStatus::RawResource,
                    balanced: true,
                    requirements: Vec::new(),
                },
            );
            continue;
        };

        let mut requirements = Vec::with_capacity(item.required().len());
        let mut bottlenecked = false;

        for req in item.required() {
            let Some(input) = find_item(items, &req.item) else {
                continue;
            };
            let input_factories = plan.factories(&req.item).unwrap_or(0.0);
            let available_rate = input.rate() * input_factories;
            let required_rate = (req.count / cycle_time) * factories;
            // Zero demand never bottlenecks, whatever the supply.
            let efficiency = if required_rate > 0.0 {
                available_rate / required_rate
            } else {
                f64::INFINITY
            };
            let bottleneck = efficiency < BALANCE_TOLERANCE;
            bottlenecked |= bottleneck;

            requirements.push(RequirementLoad {
                item: req.item.clone(),
                required_rate,
                available_rate,
                efficiency,
                bottleneck,
            });
        }

        report.insert(
            name.clone(),
            ItemAnalysis {
                status: if bottlenecked {
                    ItemStatus::Bottleneck
                } else {
                    ItemStatus::Balanced
                },
                balanced: !bottlenecked,
                requirements,
            },
        );
    }

    report
}

// ---------------------------------------------------------------------------
// Single-target flow breakdown
// ---------------------------------------------------------------------------

/// One edge of a single target's supply tree, pointing from the consumer
/// down to the item it requires.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetFlow {
    pub from: String,
    pub to: String,
    pub factories: f64,
}

/// Break down how many factories each edge of `target`'s supply tree needs
/// when running `factories` factories of the target.
///
/// Unlike a full plan, this walks just one product's tree and aggregates
/// per-visit: a subtree shared by two branches is costed once per branch,
/// each branch's demand ceiled independently, and the edge totals summed.
/// Requirement edges that would close a cycle back onto the current walk
/// path are not descended into. Inputs with a zero or undefined production
/// rate are omitted from the breakdown entirely; unlike the planner, this
/// helper never rejects the walk over an unsatisfiable edge.
pub fn target_flows(items: &[ItemDef], target: &str, factories: f64) -> Vec<TargetFlow> {
    let mut by_name: HashMap<&str, &ItemDef> = HashMap::with_capacity(items.len());
    for item in items {
        by_name.entry(item.name.as_str()).or_insert(item);
    }

    let mut flows: Vec<TargetFlow> = Vec::new();
    let mut edge_index: HashMap<(String, String), usize> = HashMap::new();
    let mut path: Vec<String> = Vec::new();

    walk(
        &by_name,
        target,
        factories,
        None,
        &mut flows,
        &mut edge_index,
        &mut path,
    );
    flows
}

fn walk(
    by_name: &HashMap<&str, &ItemDef>,
    name: &str,
    factories: f64,
    parent: Option<&str>,
    flows: &mut Vec<TargetFlow>,
    edge_index: &mut HashMap<(String, String), usize>,
    path: &mut Vec<String>,
) {
    let Some(item) = by_name.get(name) else {
        return;
    };

    if let Some(parent) = parent {
        let key = (parent.to_string(), name.to_string());
        match edge_index.get(&key) {
            Some(&idx) => flows[idx].factories += factories,
            None => {
                edge_index.insert(key, flows.len());
                flows.push(TargetFlow {
                    from: parent.to_string(),
                    to: name.to_string(),
                    factories,
                });
            }
        }
    }

    let Some(cycle_time) = item.cycle_time() else {
        return;
    };
    if path.iter().any(|p| p == name) {
        return;
    }
    path.push(name.to_string());

    for req in item.required() {
        let Some(input) = by_name.get(req.item.as_str()) else {
            continue;
        };
        let input_rate = input.rate();
        if input_rate <= 0.0 {
            continue;
        }
        let per_factory = (req.count / cycle_time) / input_rate;
        let needed = (per_factory * factories).ceil();
        walk(by_name, &req.item, needed, Some(name), flows, edge_index, path);
    }

    path.pop();
}

// ===========================================================================
// Tests
// ===========================================================================
