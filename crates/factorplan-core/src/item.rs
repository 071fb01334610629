use serde::{Deserialize, Serialize};

/// Identifies an item by its position in the definition list. Cheap to copy
/// and compare; valid only for the list it was derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ItemId(pub u32);

impl ItemId {
    /// The index this ID corresponds to in the originating definition list.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// One input requirement of an item: `count` units of `item` are consumed
/// per production cycle of the requiring item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Requirement {
    /// Name reference to the required item. May dangle; dangling references
    /// are skipped during planning.
    pub item: String,
    /// Units consumed per production cycle.
    pub count: f64,
}

/// What a definition actually describes.
///
/// Placeholders (referenced but not yet authored) and tombstones (deleted but
/// still referenced) structurally cannot carry requirements or a production
/// rate, so a "placeholder with inputs" is unrepresentable rather than a
/// convention the planner has to re-check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ItemKind {
    /// A fully-authored item with a production rate and input recipe.
    Concrete {
        /// Units produced per production cycle.
        output: f64,
        /// Seconds per production cycle.
        time: f64,
        /// Input recipe. Empty means raw material.
        required: Vec<Requirement>,
    },
    /// Referenced by some recipe but not yet defined. Behaves as a
    /// zero-rate leaf.
    Placeholder,
    /// Deleted but still referenced elsewhere. Behaves as a zero-rate leaf.
    Tombstone,
}

/// A single item definition, the unit of input to the planner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemDef {
    /// Unique name within one definition list. Duplicates are not rejected,
    /// but only the first definition is ever resolved.
    pub name: String,
    pub kind: ItemKind,
}

impl ItemDef {
    /// A concrete item with a recipe.
    pub fn concrete(
        name: impl Into<String>,
        output: f64,
        time: f64,
        required: Vec<Requirement>,
    ) -> Self {
        Self {
            name: name.into(),
            kind: ItemKind::Concrete {
                output,
                time,
                required,
            },
        }
    }

    /// A raw material: concrete, but with no inputs.
    pub fn raw(name: impl Into<String>, output: f64, time: f64) -> Self {
        Self::concrete(name, output, time, Vec::new())
    }

    /// A placeholder leaf.
    pub fn placeholder(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ItemKind::Placeholder,
        }
    }

    /// A deleted-but-referenced leaf.
    pub fn tombstone(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ItemKind::Tombstone,
        }
    }

    /// The input recipe. Empty for raw materials, placeholders, and tombstones.
    pub fn required(&self) -> &[Requirement] {
        match &self.kind {
            ItemKind::Concrete { required, .. } => required,
            ItemKind::Placeholder | ItemKind::Tombstone => &[],
        }
    }

    /// Seconds per production cycle, if this item can produce at all.
    pub fn cycle_time(&self) -> Option<f64> {
        match &self.kind {
            ItemKind::Concrete { time, .. } if *time > 0.0 && time.is_finite() => Some(*time),
            _ => None,
        }
    }

    /// Units produced per second by one factory of this item.
    ///
    /// Returns 0.0 for placeholders, tombstones, and any degenerate cycle
    /// time, so callers never see `Infinity` or `NaN` from this helper.
    pub fn rate(&self) -> f64 {
        match &self.kind {
            ItemKind::Concrete { output, time, .. } if *time > 0.0 && time.is_finite() => {
                output / time
            }
            _ => 0.0,
        }
    }

    /// True if the item has no inputs (raw material or leaf).
    pub fn is_leaf(&self) -> bool {
        self.required().is_empty()
    }
}

/// Build a requirement list from `(name, count)` pairs.
pub fn requirements(entries: &[(&str, f64)]) -> Vec<Requirement> {
    entries
        .iter()
        .map(|(item, count)| Requirement {
            item: (*item).to_string(),
            count: *count,
        })
        .collect()
}
