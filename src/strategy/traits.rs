// src/strategy/traits.rs

use std::fmt::Debug;

/// Defines the replenishment decision made once per period.
///
/// We require `Send` + `Sync` so independent runs can go on separate threads.
pub trait OrderPolicy: Debug + Send + Sync {
    /// Calculates how much to order this period.
    ///
    /// # Arguments
    /// * `inventory_position` - On hand minus backlog plus everything in transit.
    ///
    /// The result is never negative.
    fn order_quantity(&self, inventory_position: f64) -> f64;

    /// The level the policy steers the inventory position towards
    /// (reorder point, base-stock level or newsvendor quantile).
    fn target_level(&self) -> f64;
}
