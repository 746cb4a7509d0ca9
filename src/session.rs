//! Everything one run of the front end keeps in memory.

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use std::sync::Arc;

use crate::cart::{Cart, CartError};
use crate::config::Config;
use crate::data;
use crate::profile::ProfileForm;
use crate::progress::StageCatalog;
use crate::tracking::{InMemoryOrders, OrderSource, OrderTracker};
use crate::types::{CarouselSlide, PastOrder, PaymentMethod, Restaurant, SavedAddress};

pub struct Session {
    pub config: Config,
    pub catalog: Arc<StageCatalog>,
    pub restaurants: Vec<Restaurant>,
    pub slides: Vec<CarouselSlide>,
    pub cart: Cart,
    pub orders: InMemoryOrders,
    pub profile: ProfileForm,
    pub addresses: Vec<SavedAddress>,
    pub payment_methods: Vec<PaymentMethod>,
    pub order_history: Vec<PastOrder>,
}

impl Session {
    /// Build a session from sample data. Fails if the configured stage list is invalid.
    pub fn new(config: Config) -> Result<Self> {
        let catalog = config
            .stage_catalog()
            .context("Invalid [tracking] stage configuration")?;
        let restaurants = data::restaurants();

        let mut cart = Cart::new(config.cart.clone());
        for (restaurant_id, item_id, quantity) in data::INITIAL_CART {
            let Some(restaurant) = data::find_restaurant(&restaurants, restaurant_id) else {
                continue;
            };
            if let Some(item) = restaurant.menu_item(item_id) {
                cart.add_quantity(item, &restaurant.name, *quantity);
            }
        }

        Ok(Self {
            config,
            catalog: Arc::new(catalog),
            restaurants,
            slides: data::carousel_slides(),
            cart,
            orders: InMemoryOrders::with_samples(),
            profile: ProfileForm::default(),
            addresses: data::saved_addresses(),
            payment_methods: data::payment_methods(),
            order_history: data::order_history(),
        })
    }

    pub fn restaurant(&self, id: &str) -> Option<&Restaurant> {
        data::find_restaurant(&self.restaurants, id)
    }

    /// Add one menu item to the cart. Returns the item name and its new quantity.
    pub fn add_to_cart(&mut self, restaurant_id: &str, item_id: &str) -> Option<(String, u32)> {
        let restaurant = data::find_restaurant(&self.restaurants, restaurant_id)?;
        let item = restaurant.menu_item(item_id)?;
        let quantity = self.cart.add(item, &restaurant.name);
        tracing::debug!(restaurant_id, item_id, quantity, "Added to cart");
        Some((item.name.clone(), quantity))
    }

    /// Address new orders are delivered to
    pub fn delivery_address(&self) -> String {
        self.addresses
            .iter()
            .find(|a| a.is_default)
            .or_else(|| self.addresses.first())
            .map(|a| a.address.clone())
            .unwrap_or_default()
    }

    /// Place the cart as a new order. Returns the new order id.
    pub fn checkout(&mut self, now: DateTime<Local>) -> Result<String, CartError> {
        let address = self.delivery_address();
        let order = self.cart.checkout(&self.catalog, &address, now)?;
        let order_id = order.order_id.clone();
        self.orders.insert(order);
        Ok(order_id)
    }

    pub fn track(&self, order_id: &str, now: DateTime<Local>) -> Option<OrderTracker> {
        OrderTracker::open(&self.orders, Arc::clone(&self.catalog), order_id, now)
    }

    /// Advance an order in the backing store (the courier's job)
    pub fn advance_order(&mut self, order_id: &str) -> Option<String> {
        let order = self.orders.fetch(order_id)?;
        let next = self.catalog.next_after(&order.current_stage_id)?.id.clone();
        self.orders.update_stage(order_id, &next);
        Some(next)
    }
}
