//! Consumer index over a list of item definitions.
//!
//! The planner never walks name references directly: this module interns
//! every defined name to a dense [`ItemId`] and derives, for each item, the
//! list of items that consume it. Dangling requirement references (names
//! absent from the list) are skipped when the index is built, so the rest of
//! the crate only ever deals in resolved IDs.

use crate::item::{ItemDef, ItemId};
use std::collections::HashMap;

/// Dependency graph view over a borrowed definition list.
///
/// Edges run from the required item (producer) to the requiring item
/// (consumer), weighted by the requirement count stored on the consumer.
/// Built fresh for every planning call; holds no state between calls.
#[derive(Debug)]
pub struct DependencyGraph<'a> {
    items: &'a [ItemDef],
    name_to_id: HashMap<&'a str, ItemId>,
    /// For each item, the items that list it as a requirement. A consumer
    /// appears once per requirement entry, so a recipe that lists the same
    /// input twice contributes two edges.
    consumers: Vec<Vec<ItemId>>,
    /// `consumers[i].len()`, kept separately so callers can copy it into a
    /// mutable countdown without cloning the lists.
    consumer_count: Vec<usize>,
    /// Items with zero consumers, in input order.
    final_products: Vec<ItemId>,
}

impl<'a> DependencyGraph<'a> {
    /// Build the consumer index for a definition list.
    ///
    /// Duplicate names are not rejected; the first definition wins and later
    /// ones are unreachable through name resolution.
    pub fn build(items: &'a [ItemDef]) -> Self {
        let mut name_to_id: HashMap<&'a str, ItemId> = HashMap::with_capacity(items.len());
        for (idx, item) in items.iter().enumerate() {
            name_to_id
                .entry(item.name.as_str())
                .or_insert(ItemId(idx as u32));
        }

        let mut consumers: Vec<Vec<ItemId>> = vec![Vec::new(); items.len()];
        for (idx, item) in items.iter().enumerate() {
            let consumer = ItemId(idx as u32);
            for req in item.required() {
                // Dangling references are tolerated by design.
                if let Some(&producer) = name_to_id.get(req.item.as_str()) {
                    consumers[producer.index()].push(consumer);
                }
            }
        }

        let consumer_count: Vec<usize> = consumers.iter().map(Vec::len).collect();
        let final_products: Vec<ItemId> = consumer_count
            .iter()
            .enumerate()
            .filter(|&(_, &count)| count == 0)
            .map(|(idx, _)| ItemId(idx as u32))
            .collect();

        Self {
            items,
            name_to_id,
            consumers,
            consumer_count,
            final_products,
        }
    }

    /// Number of items in the underlying list.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True if the underlying list is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Resolve a name to its ID, if defined.
    pub fn id_of(&self, name: &str) -> Option<ItemId> {
        self.name_to_id.get(name).copied()
    }

    /// The definition behind an ID.
    pub fn item(&self, id: ItemId) -> &'a ItemDef {
        &self.items[id.index()]
    }

    /// The name behind an ID.
    pub fn name(&self, id: ItemId) -> &'a str {
        &self.items[id.index()].name
    }

    /// Items that consume `id`, one entry per requirement edge.
    pub fn consumers_of(&self, id: ItemId) -> &[ItemId] {
        &self.consumers[id.index()]
    }

    /// Number of consumer edges pointing at `id`.
    pub fn consumer_count(&self, id: ItemId) -> usize {
        self.consumer_count[id.index()]
    }

    /// A copy of all consumer counts, indexed by `ItemId`. The planner
    /// decrements this as consumers finish.
    pub fn consumer_counts(&self) -> Vec<usize> {
        self.consumer_count.clone()
    }

    /// Items with zero consumers -- the demand roots everything is anchored to.
    pub fn final_products(&self) -> &[ItemId] {
        &self.final_products
    }

    /// Group items by demand depth for display layout.
    ///
    /// Level 0 holds the final products; an item lands one level below its
    /// deepest consumer, and only once every consumer has been placed. Items
    /// that can never be placed (cycle members and anything consumed only by
    /// them) collect in a trailing catch-all level, sorted by ID.
    pub fn levels(&self) -> Vec<Vec<ItemId>> {
        let mut remaining = self.consumer_counts();
        let mut depth: Vec<usize> = vec![0; self.items.len()];
        let mut placed: Vec<bool> = vec![false; self.items.len()];

        let mut queue: std::collections::VecDeque<ItemId> =
            self.final_products.iter().copied().collect();
        for &id in &self.final_products {
            placed[id.index()] = true;
        }

        let mut max_depth = 0usize;
        while let Some(id) = queue.pop_front() {
            let d = depth[id.index()];
            max_depth = max_depth.max(d);

            for req in self.items[id.index()].required() {
                let Some(producer) = self.id_of(&req.item) else {
                    continue;
                };
                let p = producer.index();
                depth[p] = depth[p].max(d + 1);
                remaining[p] -= 1;
                if remaining[p] == 0 && !placed[p] {
                    placed[p] = true;
                    queue.push_back(producer);
                }
            }
        }

        let mut levels: Vec<Vec<ItemId>> = vec![Vec::new(); max_depth + 1];
        for idx in 0..self.items.len() {
            if placed[idx] {
                levels[depth[idx]].push(ItemId(idx as u32));
            }
        }

        let unplaced: Vec<ItemId> = (0..self.items.len())
            .filter(|&idx| !placed[idx])
            .map(|idx| ItemId(idx as u32))
            .collect();
        if !unplaced.is_empty() {
            levels.push(unplaced);
        }

        levels.retain(|level| !level.is_empty());
        levels
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::requirements;

    fn chain() -> Vec<ItemDef> {
        vec![
            ItemDef::raw("ore", 1.0, 1.0),
            ItemDef::concrete("plate", 1.0, 1.0, requirements(&[("ore", 1.0)])),
            ItemDef::concrete("gear", 1.0, 1.0, requirements(&[("plate", 2.0)])),
        ]
    }

    #[test]
    fn consumer_index_linear_chain() {
        let items = chain();
        let graph = DependencyGraph::build(&items);

        let ore = graph.id_of("ore").unwrap();
        let plate = graph.id_of("plate").unwrap();
        let gear = graph.id_of("gear").unwrap();

        assert_eq!(graph.consumers_of(ore), &[plate]);
        assert_eq!(graph.consumers_of(plate), &[gear]);
        assert_eq!(graph.consumer_count(gear), 0);
        assert_eq!(graph.final_products(), &[gear]);
    }

    #[test]
    fn dangling_reference_is_skipped() {
        let items = vec![ItemDef::concrete(
            "gadget",
            1.0,
            1.0,
            requirements(&[("missing", 3.0)]),
        )];
        let graph = DependencyGraph::build(&items);

        assert!(graph.id_of("missing").is_none());
        let gadget = graph.id_of("gadget").unwrap();
        assert_eq!(graph.consumer_count(gadget), 0);
        assert_eq!(graph.final_products(), &[gadget]);
    }

    #[test]
    fn shared_input_counts_each_consumer() {
        let items = vec![
            ItemDef::raw("ore", 1.0, 1.0),
            ItemDef::concrete("plate", 1.0, 1.0, requirements(&[("ore", 1.0)])),
            ItemDef::concrete("wire", 1.0, 1.0, requirements(&[("ore", 1.0)])),
        ];
        let graph = DependencyGraph::build(&items);
        let ore = graph.id_of("ore").unwrap();
        assert_eq!(graph.consumer_count(ore), 2);
        assert_eq!(graph.final_products().len(), 2);
    }

    #[test]
    fn duplicate_requirement_entries_are_separate_edges() {
        let items = vec![
            ItemDef::raw("rod", 1.0, 1.0),
            ItemDef::concrete(
                "frame",
                1.0,
                1.0,
                requirements(&[("rod", 1.0), ("rod", 1.0)]),
            ),
        ];
        let graph = DependencyGraph::build(&items);
        let rod = graph.id_of("rod").unwrap();
        let frame = graph.id_of("frame").unwrap();
        assert_eq!(graph.consumers_of(rod), &[frame, frame]);
        assert_eq!(graph.consumer_count(rod), 2);
    }

    #[test]
    fn self_reference_is_never_final() {
        let items = vec![ItemDef::concrete(
            "ouroboros",
            1.0,
            1.0,
            requirements(&[("ouroboros", 1.0)]),
        )];
        let graph = DependencyGraph::build(&items);
        assert!(graph.final_products().is_empty());
    }

    #[test]
    fn empty_list() {
        let items: Vec<ItemDef> = Vec::new();
        let graph = DependencyGraph::build(&items);
        assert!(graph.is_empty());
        assert!(graph.final_products().is_empty());
        assert!(graph.levels().is_empty());
    }

    #[test]
    fn levels_linear_chain() {
        let items = chain();
        let graph = DependencyGraph::build(&items);
        let levels = graph.levels();

        assert_eq!(levels.len(), 3);
        assert_eq!(levels[0], vec![graph.id_of("gear").unwrap()]);
        assert_eq!(levels[1], vec![graph.id_of("plate").unwrap()]);
        assert_eq!(levels[2], vec![graph.id_of("ore").unwrap()]);
    }

    #[test]
    fn levels_diamond_places_shared_input_deepest() {
        // gear and wire both feed "motor"; ore feeds both. Ore must sit one
        // level below the deeper of its two consumers.
        let items = vec![
            ItemDef::raw("ore", 1.0, 1.0),
            ItemDef::concrete("gear", 1.0, 1.0, requirements(&[("ore", 1.0)])),
            ItemDef::concrete("wire", 1.0, 1.0, requirements(&[("ore", 1.0)])),
            ItemDef::concrete(
                "motor",
                1.0,
                1.0,
                requirements(&[("gear", 1.0), ("wire", 1.0)]),
            ),
        ];
        let graph = DependencyGraph::build(&items);
        let levels = graph.levels();

        assert_eq!(levels.len(), 3);
        assert_eq!(levels[0], vec![graph.id_of("motor").unwrap()]);
        assert_eq!(levels[1].len(), 2);
        assert_eq!(levels[2], vec![graph.id_of("ore").unwrap()]);
    }

    #[test]
    fn levels_cycle_members_in_trailing_level() {
        let items = vec![
            ItemDef::concrete("a", 1.0, 1.0, requirements(&[("b", 1.0)])),
            ItemDef::concrete("b", 1.0, 1.0, requirements(&[("a", 1.0)])),
            ItemDef::raw("lone", 1.0, 1.0),
        ];
        let graph = DependencyGraph::build(&items);
        let levels = graph.levels();

        // "lone" is a final product at level 0; the a/b cycle trails.
        assert_eq!(levels.len(), 2);
        assert_eq!(levels[0], vec![graph.id_of("lone").unwrap()]);
        assert_eq!(levels[1].len(), 2);
    }
}
