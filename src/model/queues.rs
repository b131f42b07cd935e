// src/model/queues.rs

use std::collections::VecDeque;

/// Orders in transit, one slot per period of lead time.
///
/// The head is the order that arrives next; new orders join the tail. With a lead
/// time of zero there is nothing to delay and orders pass straight through.
#[derive(Debug, Clone)]
pub struct Pipeline {
    slots: VecDeque<f64>,
    lead_time: usize,
    injected: f64,
    delivered: f64,
}

impl Pipeline {
    pub fn new(lead_time: usize) -> Self {
        // Pre-fill with 0s so the first orders take the full lead time to arrive.
        let mut slots = VecDeque::with_capacity(lead_time + 1);
        slots.resize(lead_time, 0.0);

        Self {
            slots,
            lead_time,
            injected: 0.0,
            delivered: 0.0,
        }
    }

    /// Start of period: removes and returns the head slot (0 with no lead time).
    pub fn advance(&mut self) -> f64 {
        let arrived = self.slots.pop_front().unwrap_or(0.0);
        self.delivered += arrived;
        arrived
    }

    /// End of period: queues an order at the tail.
    ///
    /// Returns the quantity that bypasses the delay and must go to on-hand right away,
    /// which is the whole order when the lead time is zero and nothing otherwise.
    pub fn inject(&mut self, quantity: f64) -> f64 {
        self.injected += quantity;
        if self.lead_time == 0 {
            self.delivered += quantity;
            quantity
        } else {
            self.slots.push_back(quantity);
            0.0
        }
    }

    /// Units ordered but not yet arrived.
    pub fn in_transit(&self) -> f64 {
        self.slots.iter().sum()
    }

    pub fn total_injected(&self) -> f64 {
        self.injected
    }

    pub fn total_delivered(&self) -> f64 {
        self.delivered
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &f64> {
        self.slots.iter()
    }
}
