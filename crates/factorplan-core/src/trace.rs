//! Observer hooks for the planner.
//!
//! The planner itself is a pure function; anything that wants to watch the
//! computation (debug output, test assertions, UI progress) implements
//! [`PlanTrace`] and gets called at each edge-processing step instead of the
//! planner printing as it goes.

/// Everything known about one producer->consumer edge at the moment its
/// demand is resolved. All rates are units per second.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeTrace<'a> {
    /// The required item.
    pub producer: &'a str,
    /// The item whose recipe demands it.
    pub consumer: &'a str,
    /// Units of the producer consumed per second by one consumer factory.
    pub consumption_rate: f64,
    /// Units produced per second by one producer factory.
    pub producer_rate: f64,
    /// Producer factories needed per consumer factory.
    pub per_factory: f64,
    /// `per_factory` times the consumer's finalized factory count.
    pub raw_demand: f64,
    /// `raw_demand` after the rounding policy was applied.
    pub demand: f64,
}

/// Callback surface invoked by [`crate::plan::compute_with_trace`].
///
/// All hooks default to no-ops, so implementors override only what they need.
pub trait PlanTrace {
    /// An edge's demand was resolved and accumulated onto the producer.
    fn edge(&mut self, _edge: &EdgeTrace<'_>) {}

    /// An item's factory count was finalized (all of its consumers have been
    /// processed) and it joined the worklist.
    fn ready(&mut self, _item: &str, _factories: f64) {}
}

/// The silent trace used by [`crate::plan::compute`].
impl PlanTrace for () {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_trace_is_silent() {
        let mut trace = ();
        trace.edge(&EdgeTrace {
            producer: "a",
            consumer: "b",
            consumption_rate: 1.0,
            producer_rate: 1.0,
            per_factory: 1.0,
            raw_demand: 1.0,
            demand: 1.0,
        });
        trace.ready("a", 1.0);
    }
}
