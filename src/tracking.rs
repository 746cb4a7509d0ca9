//! Order tracking: order lookup, the per-order status map and the
//! simulated courier that moves orders along.

use chrono::{DateTime, Local};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::data;
use crate::progress::stage::{DELIVERED, OUT_FOR_DELIVERY, PREPARING};
use crate::progress::{
    derive, render, Orientation, Stage, StageCatalog, StageStatus, StatusMap, StepperView,
};
use crate::types::OrderDetails;

/// Supplies order details by id
pub trait OrderSource {
    fn fetch(&self, order_id: &str) -> Option<OrderDetails>;
}

/// Orders held in memory: the samples plus anything placed this session
#[derive(Debug, Clone, Default)]
pub struct InMemoryOrders {
    orders: Vec<OrderDetails>,
}

impl InMemoryOrders {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_samples() -> Self {
        let mut orders = vec![data::sample_order()];
        orders.extend(data::past_order_details());
        Self { orders }
    }

    /// Insert or replace by order id
    pub fn insert(&mut self, order: OrderDetails) {
        match self.orders.iter_mut().find(|o| o.order_id == order.order_id) {
            Some(existing) => *existing = order,
            None => self.orders.push(order),
        }
    }

    /// Record a new current stage for an order. Returns false for unknown orders.
    pub fn update_stage(&mut self, order_id: &str, stage_id: &str) -> bool {
        match self.orders.iter_mut().find(|o| o.order_id == order_id) {
            Some(order) => {
                order.current_stage_id = stage_id.to_string();
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}

impl OrderSource for InMemoryOrders {
    fn fetch(&self, order_id: &str) -> Option<OrderDetails> {
        self.orders.iter().find(|o| o.order_id == order_id).cloned()
    }
}

/// One line in the tracking page's live update feed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiveUpdate {
    pub text: String,
    pub emphasized: bool,
}

/// Tracks one order and keeps its status map in step with the current stage
#[derive(Debug, Clone)]
pub struct OrderTracker {
    catalog: Arc<StageCatalog>,
    order: OrderDetails,
    statuses: StatusMap,
    stage_entered_at: DateTime<Local>,
}

impl OrderTracker {
    pub fn new(catalog: Arc<StageCatalog>, order: OrderDetails, now: DateTime<Local>) -> Self {
        let statuses = derive(&catalog, &order.current_stage_id);
        Self {
            catalog,
            order,
            statuses,
            stage_entered_at: now,
        }
    }

    pub fn open(
        source: &dyn OrderSource,
        catalog: Arc<StageCatalog>,
        order_id: &str,
        now: DateTime<Local>,
    ) -> Option<Self> {
        let Some(order) = source.fetch(order_id) else {
            tracing::warn!(order_id, "Could not find order details");
            return None;
        };
        tracing::debug!(order_id, stage = %order.current_stage_id, "Tracking order");
        Some(Self::new(catalog, order, now))
    }

    pub fn order(&self) -> &OrderDetails {
        &self.order
    }

    pub fn order_id(&self) -> &str {
        &self.order.order_id
    }

    pub fn catalog(&self) -> &StageCatalog {
        &self.catalog
    }

    pub fn statuses(&self) -> &StatusMap {
        &self.statuses
    }

    pub fn current_stage_id(&self) -> &str {
        &self.order.current_stage_id
    }

    pub fn current_stage(&self) -> Option<&Stage> {
        self.catalog
            .position(&self.order.current_stage_id)
            .and_then(|i| self.catalog.get(i))
    }

    /// Move the order to `stage_id` and rebuild the status map.
    /// Returns false when the stage is unchanged.
    pub fn set_current_stage(&mut self, stage_id: &str, now: DateTime<Local>) -> bool {
        if self.order.current_stage_id == stage_id {
            return false;
        }
        tracing::info!(
            order_id = %self.order.order_id,
            from = %self.order.current_stage_id,
            to = stage_id,
            "Order stage changed"
        );
        self.order.current_stage_id = stage_id.to_string();
        self.statuses = derive(&self.catalog, stage_id);
        self.stage_entered_at = now;
        true
    }

    /// Pick up the latest stage from `source`
    pub fn refresh(&mut self, source: &dyn OrderSource, now: DateTime<Local>) -> bool {
        match source.fetch(&self.order.order_id) {
            Some(latest) => self.set_current_stage(&latest.current_stage_id, now),
            None => false,
        }
    }

    /// The last stage is in progress
    pub fn is_finished(&self) -> bool {
        self.catalog
            .stages()
            .last()
            .is_some_and(|s| s.id == self.order.current_stage_id)
    }

    pub fn stepper(&self, orientation: Orientation) -> StepperView {
        render(
            &self.catalog,
            &self.order.current_stage_id,
            &self.statuses,
            orientation,
        )
    }

    /// Newest first: stage message, recorded history, then the placement note
    pub fn live_updates(&self) -> Vec<LiveUpdate> {
        let time = self.stage_entered_at.format("%-I:%M:%S %p");
        let mut updates = Vec::new();

        let in_progress = |id: &str| self.statuses.get(id) == Some(StageStatus::InProgress);
        if in_progress(DELIVERED) {
            updates.push(LiveUpdate {
                text: format!("Delivered! - Enjoy your meal. ({})", time),
                emphasized: true,
            });
        }
        if in_progress(OUT_FOR_DELIVERY) {
            updates.push(LiveUpdate {
                text: format!("Driver is near your location. ({})", time),
                emphasized: false,
            });
        }
        if in_progress(PREPARING) {
            updates.push(LiveUpdate {
                text: format!(
                    "Restaurant is putting the final touches on your order. ({})",
                    time
                ),
                emphasized: false,
            });
        }

        updates.extend(self.order.status_history.iter().map(|u| LiveUpdate {
            text: format!("{} ({})", u.status, u.timestamp),
            emphasized: false,
        }));
        updates.push(LiveUpdate {
            text: "Order placed successfully. Awaiting confirmation.".to_string(),
            emphasized: false,
        });
        updates
    }
}

/// Stand-in for the delivery backend: advances an order one stage per interval
#[derive(Debug, Clone)]
pub struct Courier {
    interval: Option<Duration>,
    last_step: Instant,
}

impl Courier {
    /// `interval_secs == 0` disables the courier
    pub fn new(interval_secs: u64, now: Instant) -> Self {
        Self {
            interval: (interval_secs > 0).then(|| Duration::from_secs(interval_secs)),
            last_step: now,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.interval.is_some()
    }

    /// Restart the interval, e.g. when a different order is opened
    pub fn reset(&mut self, now: Instant) {
        self.last_step = now;
    }

    /// True once per elapsed interval
    pub fn due(&mut self, now: Instant) -> bool {
        match self.interval {
            Some(interval) if now.duration_since(self.last_step) >= interval => {
                self.last_step = now;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::SAMPLE_ORDER_ID;
    use crate::progress::stage::CONFIRMED;

    fn tracker(order_id: &str) -> OrderTracker {
        let source = InMemoryOrders::with_samples();
        OrderTracker::open(&source, Arc::new(StageCatalog::delivery()), order_id, Local::now())
            .unwrap()
    }

    #[test]
    fn test_open_unknown_order() {
        let source = InMemoryOrders::with_samples();
        let catalog = Arc::new(StageCatalog::delivery());
        assert!(OrderTracker::open(&source, catalog, "missing", Local::now()).is_none());
    }

    #[test]
    fn test_sample_order_statuses() {
        let tracker = tracker(SAMPLE_ORDER_ID);
        assert_eq!(tracker.statuses().get(CONFIRMED), Some(StageStatus::Completed));
        assert_eq!(tracker.statuses().in_progress(), Some(PREPARING));
        assert_eq!(tracker.current_stage().unwrap().name, "Preparing Food");
    }

    #[test]
    fn test_set_stage_rebuilds_map() {
        let mut tracker = tracker(SAMPLE_ORDER_ID);
        let before = tracker.statuses().clone();
        assert!(tracker.set_current_stage(DELIVERED, Local::now()));
        assert_ne!(&before, tracker.statuses());
        assert_eq!(tracker.statuses(), &derive(tracker.catalog(), DELIVERED));
        assert!(!tracker.set_current_stage(DELIVERED, Local::now()));
    }

    #[test]
    fn test_refresh_until_finished() {
        let mut source = InMemoryOrders::with_samples();
        let catalog = Arc::new(StageCatalog::delivery());
        let mut tracker =
            OrderTracker::open(&source, catalog, SAMPLE_ORDER_ID, Local::now()).unwrap();

        source.update_stage(SAMPLE_ORDER_ID, OUT_FOR_DELIVERY);
        assert!(tracker.refresh(&source, Local::now()));
        assert!(!tracker.is_finished());
        source.update_stage(SAMPLE_ORDER_ID, DELIVERED);
        assert!(tracker.refresh(&source, Local::now()));
        assert!(tracker.is_finished());
    }

    #[test]
    fn test_cancelled_order_all_pending_and_stuck() {
        let tracker = tracker("order789");
        assert_eq!(tracker.statuses().count(StageStatus::Pending), 4);
        assert!(tracker.current_stage().is_none());
        assert!(tracker.catalog().next_after(tracker.current_stage_id()).is_none());
        let view = tracker.stepper(Orientation::Horizontal);
        assert!(view.track().unwrap().connectors.iter().all(|c| !c.active));
    }

    #[test]
    fn test_refresh_picks_up_source_changes() {
        let mut source = InMemoryOrders::with_samples();
        let catalog = Arc::new(StageCatalog::delivery());
        let mut tracker =
            OrderTracker::open(&source, catalog, SAMPLE_ORDER_ID, Local::now()).unwrap();

        assert!(!tracker.refresh(&source, Local::now()));
        assert!(source.update_stage(SAMPLE_ORDER_ID, OUT_FOR_DELIVERY));
        assert!(tracker.refresh(&source, Local::now()));
        assert_eq!(tracker.statuses().in_progress(), Some(OUT_FOR_DELIVERY));
    }

    #[test]
    fn test_live_updates_follow_stage() {
        let mut tracker = tracker(SAMPLE_ORDER_ID);
        let updates = tracker.live_updates();
        assert!(updates[0].text.starts_with("Restaurant is putting"));
        assert_eq!(updates.len(), 4);
        assert!(updates.last().unwrap().text.starts_with("Order placed"));

        tracker.set_current_stage(DELIVERED, Local::now());
        let updates = tracker.live_updates();
        assert!(updates[0].text.starts_with("Delivered!"));
        assert!(updates[0].emphasized);
    }

    #[test]
    fn test_insert_replaces_existing() {
        let mut source = InMemoryOrders::new();
        let mut order = data::sample_order();
        source.insert(order.clone());
        order.total = 1;
        source.insert(order);
        assert_eq!(source.len(), 1);
        assert_eq!(source.fetch(SAMPLE_ORDER_ID).unwrap().total, 1);
        assert!(!source.update_stage("missing", DELIVERED));
    }

    #[test]
    fn test_courier_interval() {
        let start = Instant::now();
        let mut courier = Courier::new(5, start);
        assert!(courier.is_enabled());
        assert!(!courier.due(start + Duration::from_secs(4)));
        assert!(courier.due(start + Duration::from_secs(5)));
        assert!(!courier.due(start + Duration::from_secs(6)));
        assert!(courier.due(start + Duration::from_secs(10)));
    }

    #[test]
    fn test_courier_disabled() {
        let start = Instant::now();
        let mut courier = Courier::new(0, start);
        assert!(!courier.is_enabled());
        assert!(!courier.due(start + Duration::from_secs(3600)));
    }
}
