use serde::{Deserialize, Serialize};

use super::Cents;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    pub name: String,
    pub quantity: u32,
    pub price: Cents,
}

impl OrderLine {
    pub fn line_total(&self) -> Cents {
        self.price * Cents::from(self.quantity)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusUpdate {
    pub status: String,
    pub timestamp: String,
}

/// Everything the tracking page shows for one order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderDetails {
    pub order_id: String,
    pub items: Vec<OrderLine>,
    pub total: Cents,
    pub estimated_delivery: String,
    pub delivery_address: String,
    /// Id of the stage the order is currently in; may name no known stage
    pub current_stage_id: String,
    #[serde(default)]
    pub status_history: Vec<StatusUpdate>,
}

impl OrderDetails {
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|i| i.quantity).sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PastOrderStatus {
    Delivered,
    Cancelled,
    InProgress,
}

impl PastOrderStatus {
    pub fn label(&self) -> &'static str {
        match self {
            PastOrderStatus::Delivered => "Delivered",
            PastOrderStatus::Cancelled => "Cancelled",
            PastOrderStatus::InProgress => "In Progress",
        }
    }
}

/// Summary row in the profile's order history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PastOrder {
    pub id: String,
    pub date: String,
    pub total: Cents,
    pub status: PastOrderStatus,
    pub items: u32,
}
