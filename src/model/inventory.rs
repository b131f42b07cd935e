// src/model/inventory.rs

/// Stock held at the single stocking point.
///
/// Between periods at most one of `on_hand` and `backlog` is non-zero: stock on hand
/// always goes to outstanding demand before it is kept.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InventoryState {
    pub on_hand: f64,
    pub backlog: f64,
}

impl InventoryState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Goods arriving from the pipeline.
    pub fn receive(&mut self, quantity: f64) {
        self.on_hand += quantity;
    }

    /// Ships against this period's demand plus everything owed from earlier periods.
    ///
    /// Returns the quantity shipped, which never exceeds what was on hand nor what was owed.
    pub fn fulfill(&mut self, demand: f64) -> f64 {
        let owed = demand + self.backlog;
        let shipped = self.on_hand.min(owed);

        self.on_hand -= shipped;
        self.backlog = (owed - shipped).max(0.0);
        shipped
    }

    /// Goods that arrive with no delay after the period's shipments are settled.
    ///
    /// Outstanding backlog is served first; the rest goes on the shelf. Returns the
    /// quantity used to clear backlog.
    pub fn receive_immediate(&mut self, quantity: f64) -> f64 {
        self.receive(quantity);
        self.fulfill(0.0)
    }

    /// On hand minus backlog.
    pub fn net_stock(&self) -> f64 {
        self.on_hand - self.backlog
    }

    /// Net stock plus everything still in transit.
    pub fn position(&self, in_transit: f64) -> f64 {
        self.net_stock() + in_transit
    }
}
