//! Shopping cart: line items, quantity edits, promo codes and totals.

use chrono::{DateTime, Duration, Local};
use thiserror::Error;
use uuid::Uuid;

use crate::config::CartConfig;
use crate::progress::StageCatalog;
use crate::types::{Cents, MenuItem, OrderDetails, OrderLine, StatusUpdate};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartItem {
    pub id: String,
    pub name: String,
    pub price: Cents,
    pub quantity: u32,
    pub restaurant: Option<String>,
}

impl CartItem {
    pub fn line_total(&self) -> Cents {
        self.price * Cents::from(self.quantity)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CartError {
    #[error("Please add items to your cart before proceeding.")]
    Empty,

    #[error("no item '{0}' in the cart")]
    UnknownItem(String),
}

/// What a quantity edit did to the line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityChange {
    Updated(u32),
    Removed,
}

/// Result of pressing "apply" on the promo field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromoOutcome {
    Applied { percent: u64 },
    Invalid,
    WrongLength { required: usize },
    /// Nothing typed; no feedback
    Blank,
}

impl PromoOutcome {
    /// Toast title and description, or `None` when nothing should be shown
    pub fn message(&self) -> Option<(&'static str, String)> {
        match self {
            PromoOutcome::Applied { percent } => {
                Some(("Promo Applied!", format!("{}% discount applied.", percent)))
            }
            PromoOutcome::Invalid => Some((
                "Invalid Promo Code",
                "The promo code entered is not valid.".to_string(),
            )),
            PromoOutcome::WrongLength { required } => Some((
                "Invalid Promo Code",
                format!("Promo code must be {} characters.", required),
            )),
            PromoOutcome::Blank => None,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, PromoOutcome::Invalid | PromoOutcome::WrongLength { .. })
    }
}

#[derive(Debug, Clone)]
pub struct Cart {
    items: Vec<CartItem>,
    promo_code: String,
    pricing: CartConfig,
}

impl Cart {
    pub fn new(pricing: CartConfig) -> Self {
        Self {
            items: Vec::new(),
            promo_code: String::new(),
            pricing,
        }
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, item_id: &str) -> Option<&CartItem> {
        self.items.iter().find(|i| i.id == item_id)
    }

    /// Add one of `item`, merging with an existing line. Returns the new quantity.
    pub fn add(&mut self, item: &MenuItem, restaurant: &str) -> u32 {
        self.add_quantity(item, restaurant, 1)
    }

    pub fn add_quantity(&mut self, item: &MenuItem, restaurant: &str, quantity: u32) -> u32 {
        if let Some(existing) = self.items.iter_mut().find(|i| i.id == item.id) {
            existing.quantity += quantity;
            return existing.quantity;
        }
        self.items.push(CartItem {
            id: item.id.clone(),
            name: item.name.clone(),
            price: item.price,
            quantity,
            restaurant: Some(restaurant.to_string()),
        });
        quantity
    }

    /// Set a line's quantity; anything below 1 removes the line
    pub fn set_quantity(
        &mut self,
        item_id: &str,
        quantity: i64,
    ) -> Result<QuantityChange, CartError> {
        if quantity < 1 {
            self.remove(item_id)?;
            return Ok(QuantityChange::Removed);
        }
        let item = self
            .items
            .iter_mut()
            .find(|i| i.id == item_id)
            .ok_or_else(|| CartError::UnknownItem(item_id.to_string()))?;
        item.quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        Ok(QuantityChange::Updated(item.quantity))
    }

    pub fn increment(&mut self, item_id: &str) -> Result<QuantityChange, CartError> {
        let current = self.quantity_of(item_id)?;
        self.set_quantity(item_id, i64::from(current) + 1)
    }

    pub fn decrement(&mut self, item_id: &str) -> Result<QuantityChange, CartError> {
        let current = self.quantity_of(item_id)?;
        self.set_quantity(item_id, i64::from(current) - 1)
    }

    fn quantity_of(&self, item_id: &str) -> Result<u32, CartError> {
        self.get(item_id)
            .map(|i| i.quantity)
            .ok_or_else(|| CartError::UnknownItem(item_id.to_string()))
    }

    pub fn remove(&mut self, item_id: &str) -> Result<CartItem, CartError> {
        let index = self
            .items
            .iter()
            .position(|i| i.id == item_id)
            .ok_or_else(|| CartError::UnknownItem(item_id.to_string()))?;
        Ok(self.items.remove(index))
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.promo_code.clear();
    }

    /// Total quantity across all lines (the header badge)
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    pub fn subtotal(&self) -> Cents {
        self.items.iter().map(CartItem::line_total).sum()
    }

    pub fn delivery_fee(&self) -> Cents {
        if self.items.is_empty() {
            0
        } else {
            self.pricing.delivery_fee
        }
    }

    pub fn promo_discount(&self) -> Cents {
        if self.promo_matches() {
            // Round half up to the nearest cent
            (self.subtotal() * self.pricing.promo_percent + 50) / 100
        } else {
            0
        }
    }

    pub fn total(&self) -> Cents {
        (self.subtotal() + self.delivery_fee()).saturating_sub(self.promo_discount())
    }

    pub fn promo_code(&self) -> &str {
        &self.promo_code
    }

    /// Replace the typed promo code, keeping at most the configured length
    pub fn set_promo_code(&mut self, code: &str) {
        self.promo_code = code.chars().take(self.pricing.promo_length).collect();
    }

    fn promo_matches(&self) -> bool {
        !self.promo_code.is_empty() && self.promo_code == self.pricing.promo_code
    }

    pub fn apply_promo(&self) -> PromoOutcome {
        let length = self.promo_code.chars().count();
        if self.promo_matches() {
            PromoOutcome::Applied {
                percent: self.pricing.promo_percent,
            }
        } else if length == 0 {
            PromoOutcome::Blank
        } else if length == self.pricing.promo_length {
            PromoOutcome::Invalid
        } else {
            PromoOutcome::WrongLength {
                required: self.pricing.promo_length,
            }
        }
    }

    /// Place an order for the current contents and empty the cart.
    ///
    /// The new order starts at the first stage of `catalog`.
    pub fn checkout(
        &mut self,
        catalog: &StageCatalog,
        delivery_address: &str,
        now: DateTime<Local>,
    ) -> Result<OrderDetails, CartError> {
        if self.items.is_empty() {
            return Err(CartError::Empty);
        }

        let order_id = format!("order-{}", &Uuid::new_v4().simple().to_string()[..8]);
        let window_start = now + Duration::minutes(30);
        let window_end = now + Duration::minutes(45);

        let order = OrderDetails {
            order_id,
            items: self
                .items
                .iter()
                .map(|i| OrderLine {
                    name: i.name.clone(),
                    quantity: i.quantity,
                    price: i.price,
                })
                .collect(),
            total: self.total(),
            estimated_delivery: format!(
                "{} - {}",
                window_start.format("%-I:%M %p"),
                window_end.format("%-I:%M %p")
            ),
            delivery_address: delivery_address.to_string(),
            current_stage_id: catalog
                .first()
                .map(|s| s.id.clone())
                .unwrap_or_default(),
            status_history: vec![StatusUpdate {
                status: "Payment Successful".to_string(),
                timestamp: format!("{}, Today", now.format("%-I:%M %p")),
            }],
        };

        tracing::info!(
            order_id = %order.order_id,
            items = self.item_count(),
            total = order.total,
            "Order placed"
        );
        self.clear();
        Ok(order)
    }
}
