//! In-memory placeholder data backing every page.

use crate::progress::stage::{DELIVERED, PREPARING};
use crate::types::{
    CarouselSlide, MenuItem, OrderDetails, OrderLine, PastOrder, PastOrderStatus, PaymentMethod,
    Restaurant, SavedAddress, StatusUpdate,
};

/// Order id the checkout demo and the sample tracking page share
pub const SAMPLE_ORDER_ID: &str = "new-order-123";

/// Cuisine filter that matches every restaurant
pub const ALL_CUISINES: &str = "All";

pub const CUISINE_CATEGORIES: &[&str] = &[
    ALL_CUISINES,
    "Italian",
    "American",
    "Japanese",
    "Indian",
    "Mexican",
    "Chinese",
];

fn tags(values: &[&str]) -> Vec<String> {
    values.iter().map(|t| (*t).to_string()).collect()
}

fn item(
    id: &str,
    name: &str,
    description: &str,
    price: u64,
    category: &str,
    t: &[&str],
) -> MenuItem {
    MenuItem {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        price,
        category: category.to_string(),
        tags: tags(t),
    }
}

pub fn carousel_slides() -> Vec<CarouselSlide> {
    vec![
        CarouselSlide {
            id: "promo1".to_string(),
            title: "Get 20% Off Your First Order!".to_string(),
            alt_text: "Delicious Food Offer".to_string(),
            description: None,
        },
        CarouselSlide {
            id: "promo2".to_string(),
            title: "Explore New Cuisines".to_string(),
            alt_text: "New Restaurant Spotlight".to_string(),
            description: None,
        },
        CarouselSlide {
            id: "promo3".to_string(),
            title: "Weekend Feast Deals".to_string(),
            alt_text: "Weekend Special".to_string(),
            description: None,
        },
    ]
}

pub fn restaurants() -> Vec<Restaurant> {
    vec![
        Restaurant {
            id: "1".to_string(),
            name: "The Pizza Place".to_string(),
            cuisine: "Italian".to_string(),
            rating: 4.5,
            delivery_time: "25-35 min".to_string(),
            price_range: "$$".to_string(),
            address: "123 Pizza St, Foodville".to_string(),
            tags: tags(&["Popular", "Pizza"]),
            menu: vec![
                item(
                    "m1",
                    "Margherita Pizza",
                    "Classic cheese and tomato pizza.",
                    1299,
                    "Pizza",
                    &["Vegetarian", "Classic"],
                ),
                item(
                    "m2",
                    "Pepperoni Pizza",
                    "Pizza with spicy pepperoni slices.",
                    1499,
                    "Pizza",
                    &["Popular"],
                ),
                item(
                    "m3",
                    "Garlic Bread",
                    "Toasted bread with garlic butter.",
                    599,
                    "Sides",
                    &[],
                ),
            ],
        },
        Restaurant {
            id: "2".to_string(),
            name: "Burger Hub".to_string(),
            cuisine: "American".to_string(),
            rating: 4.2,
            delivery_time: "20-30 min".to_string(),
            price_range: "$$".to_string(),
            address: "45 Grill Ave, Foodville".to_string(),
            tags: tags(&["New", "Fast Food"]),
            menu: vec![
                item(
                    "b1",
                    "Cheeseburger",
                    "Beef patty with cheddar, pickles and onion.",
                    950,
                    "Burgers",
                    &["Popular"],
                ),
                item(
                    "b2",
                    "Classic Burger",
                    "Beef patty, lettuce, tomato and house sauce.",
                    850,
                    "Burgers",
                    &["Classic"],
                ),
                item(
                    "b3",
                    "Fries",
                    "Crispy skin-on fries.",
                    350,
                    "Sides",
                    &["Vegetarian"],
                ),
            ],
        },
        Restaurant {
            id: "3".to_string(),
            name: "Sushi Central".to_string(),
            cuisine: "Japanese".to_string(),
            rating: 4.8,
            delivery_time: "30-40 min".to_string(),
            price_range: "$$$".to_string(),
            address: "8 Harbor Rd, Foodville".to_string(),
            tags: tags(&["Authentic"]),
            menu: vec![
                item(
                    "s1",
                    "Salmon Nigiri",
                    "Two pieces of fresh salmon over rice.",
                    700,
                    "Nigiri",
                    &[],
                ),
                item(
                    "s2",
                    "Dragon Roll",
                    "Eel and cucumber topped with avocado.",
                    1450,
                    "Rolls",
                    &["Popular"],
                ),
            ],
        },
        Restaurant {
            id: "4".to_string(),
            name: "Curry Kingdom".to_string(),
            cuisine: "Indian".to_string(),
            rating: 4.6,
            delivery_time: "35-45 min".to_string(),
            price_range: "$$".to_string(),
            address: "77 Spice Ln, Foodville".to_string(),
            tags: tags(&["Spicy"]),
            menu: vec![
                item(
                    "c1",
                    "Chicken Tikka Masala",
                    "Grilled chicken in a creamy tomato sauce.",
                    1399,
                    "Curries",
                    &["Popular", "Spicy"],
                ),
                item(
                    "c2",
                    "Garlic Naan",
                    "Flatbread brushed with garlic butter.",
                    399,
                    "Breads",
                    &["Vegetarian"],
                ),
            ],
        },
    ]
}

pub fn find_restaurant<'a>(restaurants: &'a [Restaurant], id: &str) -> Option<&'a Restaurant> {
    restaurants.iter().find(|r| r.id == id)
}

/// Items the cart page starts with: (restaurant id, menu item id, quantity)
pub const INITIAL_CART: &[(&str, &str, u32)] = &[("1", "m1", 1), ("1", "m3", 2), ("2", "b2", 1)];

fn line(name: &str, quantity: u32, price: u64) -> OrderLine {
    OrderLine {
        name: name.to_string(),
        quantity,
        price,
    }
}

/// The order shown right after checkout in the demo flow
pub fn sample_order() -> OrderDetails {
    OrderDetails {
        order_id: SAMPLE_ORDER_ID.to_string(),
        items: vec![line("Margherita Pizza", 1, 1299), line("Garlic Bread", 2, 599)],
        total: 2497,
        estimated_delivery: "4:30 PM - 4:45 PM".to_string(),
        delivery_address: "123 Main St, Anytown, USA".to_string(),
        current_stage_id: PREPARING.to_string(),
        status_history: vec![
            StatusUpdate {
                status: "Order Confirmed".to_string(),
                timestamp: "3:45 PM, Today".to_string(),
            },
            StatusUpdate {
                status: "Payment Successful".to_string(),
                timestamp: "3:44 PM, Today".to_string(),
            },
        ],
    }
}

pub fn order_history() -> Vec<PastOrder> {
    vec![
        PastOrder {
            id: "order123".to_string(),
            date: "2024-07-20".to_string(),
            total: 2599,
            status: PastOrderStatus::Delivered,
            items: 2,
        },
        PastOrder {
            id: "order456".to_string(),
            date: "2024-07-15".to_string(),
            total: 1550,
            status: PastOrderStatus::Delivered,
            items: 1,
        },
        PastOrder {
            id: "order789".to_string(),
            date: "2024-07-10".to_string(),
            total: 3200,
            status: PastOrderStatus::Cancelled,
            items: 3,
        },
    ]
}

/// Tracking details for the profile's past orders.
///
/// Cancelled orders carry a stage id outside the delivery flow.
pub fn past_order_details() -> Vec<OrderDetails> {
    let address = "123 Main St, Anytown, USA".to_string();
    vec![
        OrderDetails {
            order_id: "order123".to_string(),
            items: vec![line("Pepperoni Pizza", 1, 1499), line("Garlic Bread", 1, 599)],
            total: 2599,
            estimated_delivery: "Delivered 7:10 PM".to_string(),
            delivery_address: address.clone(),
            current_stage_id: DELIVERED.to_string(),
            status_history: Vec::new(),
        },
        OrderDetails {
            order_id: "order456".to_string(),
            items: vec![line("Chicken Tikka Masala", 1, 1399)],
            total: 1550,
            estimated_delivery: "Delivered 12:40 PM".to_string(),
            delivery_address: address.clone(),
            current_stage_id: DELIVERED.to_string(),
            status_history: Vec::new(),
        },
        OrderDetails {
            order_id: "order789".to_string(),
            items: vec![
                line("Salmon Nigiri", 2, 700),
                line("Dragon Roll", 1, 1450),
            ],
            total: 3200,
            estimated_delivery: "Cancelled".to_string(),
            delivery_address: address,
            current_stage_id: "cancelled".to_string(),
            status_history: vec![StatusUpdate {
                status: "Order Cancelled".to_string(),
                timestamp: "6:02 PM, Jul 10".to_string(),
            }],
        },
    ]
}

pub fn saved_addresses() -> Vec<SavedAddress> {
    vec![
        SavedAddress {
            id: "addr1".to_string(),
            label: "Home".to_string(),
            address: "123 Main St, Anytown, USA".to_string(),
            is_default: true,
        },
        SavedAddress {
            id: "addr2".to_string(),
            label: "Work".to_string(),
            address: "456 Business Rd, Workcity, USA".to_string(),
            is_default: false,
        },
    ]
}

pub fn payment_methods() -> Vec<PaymentMethod> {
    vec![
        PaymentMethod {
            id: "pay1".to_string(),
            brand: "Visa".to_string(),
            last4: "1234".to_string(),
            expiry: "12/25".to_string(),
            is_default: true,
        },
        PaymentMethod {
            id: "pay2".to_string(),
            brand: "Mastercard".to_string(),
            last4: "5678".to_string(),
            expiry: "10/26".to_string(),
            is_default: false,
        },
    ]
}
