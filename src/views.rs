//! Plain-text renderings for the non-interactive subcommands.

use crate::cart::{Cart, PromoOutcome};
use crate::profile::ProfileForm;
use crate::progress::{NodeMarker, Orientation, StepperView};
use crate::tracking::OrderTracker;
use crate::types::{format_price, PastOrder, PaymentMethod, Restaurant, SavedAddress};

const RULE_WIDTH: usize = 60;

fn rule() -> String {
    "─".repeat(RULE_WIDTH)
}

fn marker_text(marker: NodeMarker) -> &'static str {
    match marker {
        NodeMarker::Check => "[✓]",
        NodeMarker::Active => "[●]",
        NodeMarker::Empty => "[ ]",
    }
}

pub fn restaurant_list(restaurants: &[&Restaurant]) -> String {
    if restaurants.is_empty() {
        return "No restaurants found matching your criteria.\n".to_string();
    }
    let mut out = format!("Restaurants ({})\n{}\n", restaurants.len(), rule());
    for r in restaurants {
        let tags = r
            .card_tags()
            .iter()
            .map(|t| format!("[{}]", t))
            .collect::<Vec<_>>()
            .join(" ");
        out.push_str(&format!(
            "{:>3}  {:<18} {:<10} ★ {:.1}  {:<10} {:<4} {}\n",
            r.id, r.name, r.cuisine, r.rating, r.delivery_time, r.price_range, tags
        ));
    }
    out
}

pub fn menu(restaurant_id: &str, restaurant: Option<&Restaurant>) -> String {
    let Some(restaurant) = restaurant else {
        return format!("Restaurant not found: {}\n", restaurant_id);
    };
    let mut out = format!(
        "{}\n{} · ★ {:.1} · {} · {}\n",
        restaurant.name,
        restaurant.cuisine,
        restaurant.rating,
        restaurant.delivery_time,
        restaurant.address
    );
    for category in restaurant.menu_categories() {
        out.push_str(&format!("\n{}\n{}\n", category, rule()));
        for item in restaurant.menu.iter().filter(|m| m.category == category) {
            out.push_str(&format!(
                "{:<4} {:<40} {:>8}\n",
                item.id,
                item.name,
                format_price(item.price)
            ));
            out.push_str(&format!("     {}\n", item.description));
        }
    }
    out
}

fn summary_row(label: &str, amount: &str) -> String {
    format!("{:<29}{:>8}\n", label, amount)
}

pub fn cart_summary(cart: &Cart, promo: Option<&PromoOutcome>) -> String {
    if cart.is_empty() {
        return "Your cart is empty.\n".to_string();
    }
    let mut out = format!("Your Cart ({} items)\n{}\n", cart.item_count(), rule());
    for item in cart.items() {
        out.push_str(&format!(
            "{:<24} x{:<3} {:>8}\n",
            item.name,
            item.quantity,
            format_price(item.line_total())
        ));
    }
    out.push_str(&rule());
    out.push('\n');
    out.push_str(&summary_row("Subtotal", &format_price(cart.subtotal())));
    out.push_str(&summary_row("Delivery Fee", &format_price(cart.delivery_fee())));
    if cart.promo_discount() > 0 {
        let discount = format!("-{}", format_price(cart.promo_discount()));
        out.push_str(&summary_row("Promo", &discount));
    }
    out.push_str(&summary_row("Total", &format_price(cart.total())));
    if let Some((title, description)) = promo.and_then(PromoOutcome::message) {
        out.push_str(&format!("\n{}: {}\n", title, description));
    }
    out
}

/// Text form of the stepper: one line across, or one stage per line
pub fn stepper(view: &StepperView) -> String {
    let track = match view {
        StepperView::Placeholder { message } => return format!("{}\n", message),
        StepperView::Track(track) => track,
    };

    let mut out = String::new();
    match track.orientation {
        Orientation::Horizontal => {
            for (i, node) in track.nodes.iter().enumerate() {
                if let Some(c) = i.checked_sub(1).and_then(|j| track.connectors.get(j)) {
                    out.push_str(if c.active { " ━━ " } else { " ── " });
                }
                out.push_str(&format!("{} {}", marker_text(node.marker), node.label));
            }
            out.push('\n');
        }
        Orientation::Vertical => {
            let last = track.nodes.len().saturating_sub(1);
            for (i, node) in track.nodes.iter().enumerate() {
                out.push_str(&format!("{} {}\n", marker_text(node.marker), node.label));
                if let Some(description) = &node.description {
                    out.push_str(&format!(" │  {}\n", description));
                }
                if i < last {
                    let active = track.connectors.get(i).is_some_and(|c| c.active);
                    out.push_str(if active { " ┃\n" } else { " │\n" });
                }
            }
        }
    }
    out
}

pub fn tracking(
    order_id: &str,
    tracker: Option<&OrderTracker>,
    orientation: Orientation,
) -> String {
    let Some(tracker) = tracker else {
        return format!("Order not found: {}\n", order_id);
    };
    let order = tracker.order();
    let mut out = format!(
        "Order #{}\nEstimated delivery: {}\n{}\n",
        order.order_id,
        order.estimated_delivery,
        rule()
    );
    out.push_str(&stepper(&tracker.stepper(orientation)));
    out.push_str(&rule());
    out.push('\n');
    for line in &order.items {
        out.push_str(&format!(
            "{} x {:<30} {:>8}\n",
            line.quantity,
            line.name,
            format_price(line.line_total())
        ));
    }
    out.push_str(&format!("Total Amount: {}\n", format_price(order.total)));
    out.push_str(&format!("Delivering to: {}\n", order.delivery_address));
    out.push_str("\nLive Updates\n");
    for update in tracker.live_updates() {
        out.push_str(&format!("  • {}\n", update.text));
    }
    out
}

pub fn profile(
    form: &ProfileForm,
    addresses: &[SavedAddress],
    payment_methods: &[PaymentMethod],
    history: &[PastOrder],
) -> String {
    let mut out = format!(
        "{} ({})\n{}\nPhone: {}\n",
        form.name,
        form.initials(),
        form.email,
        form.phone.as_deref().unwrap_or("-")
    );
    let default_badge = |is_default: bool| if is_default { " (Default)" } else { "" };

    out.push_str(&format!("\nSaved Addresses\n{}\n", rule()));
    for a in addresses {
        out.push_str(&format!(
            "{}: {}{}\n",
            a.label,
            a.address,
            default_badge(a.is_default)
        ));
    }
    out.push_str(&format!("\nPayment Methods\n{}\n", rule()));
    for p in payment_methods {
        out.push_str(&format!(
            "{}  exp {}{}\n",
            p.masked(),
            p.expiry,
            default_badge(p.is_default)
        ));
    }
    out.push_str(&format!("\nOrder History\n{}\n", rule()));
    for o in history {
        out.push_str(&format!(
            "#{:<10} {:<14} {:>8}  {:<11} {} item(s)\n",
            o.id,
            o.date,
            format_price(o.total),
            o.status.label(),
            o.items
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::data;
    use crate::progress::{derive, render, Stage, StageCatalog};
    use crate::tracking::InMemoryOrders;
    use chrono::Local;
    use std::sync::Arc;

    fn view(catalog: &StageCatalog, current: &str, orientation: Orientation) -> StepperView {
        render(catalog, current, &derive(catalog, current), orientation)
    }

    #[test]
    fn test_horizontal_stepper_text() {
        let text = stepper(&view(&StageCatalog::delivery(), "preparing", Orientation::Horizontal));
        assert_eq!(
            text,
            "[✓] Order Confirmed ━━ [●] Preparing Food ── [ ] Out for Delivery ── [ ] Delivered\n"
        );
    }

    #[test]
    fn test_vertical_stepper_text() {
        let catalog = StageCatalog::new(vec![
            Stage::new("a", "Alpha").with_description("first"),
            Stage::new("b", "Beta"),
        ])
        .unwrap();
        let text = stepper(&view(&catalog, "b", Orientation::Vertical));
        assert_eq!(text, "[✓] Alpha\n │  first\n ┃\n[●] Beta\n");
    }

    #[test]
    fn test_empty_catalog_placeholder() {
        let text = stepper(&view(&StageCatalog::default(), "x", Orientation::Vertical));
        assert_eq!(text, "No order steps defined.\n");
    }

    #[test]
    fn test_tracking_text() {
        let tracker = OrderTracker::open(
            &InMemoryOrders::with_samples(),
            Arc::new(StageCatalog::delivery()),
            data::SAMPLE_ORDER_ID,
            Local::now(),
        );
        let text = tracking(data::SAMPLE_ORDER_ID, tracker.as_ref(), Orientation::Horizontal);
        assert!(text.starts_with("Order #new-order-123\n"));
        assert!(text.contains("Total Amount: $24.97"));
        assert!(text.contains("Order placed successfully."));

        assert_eq!(
            tracking("missing", None, Orientation::Horizontal),
            "Order not found: missing\n"
        );
    }

    #[test]
    fn test_cart_summary_with_promo() {
        let restaurants = data::restaurants();
        let mut cart = Cart::new(Config::default().cart);
        cart.add(&restaurants[0].menu[0], &restaurants[0].name);
        cart.set_promo_code("SAVE10");
        let outcome = cart.apply_promo();
        let text = cart_summary(&cart, Some(&outcome));
        assert!(text.contains("Promo"));
        assert!(text.contains("-$1.30"));
        assert!(text.contains("Promo Applied!: 10% discount applied."));
        assert_eq!(
            cart_summary(&Cart::new(Config::default().cart), None),
            "Your cart is empty.\n"
        );
    }

    #[test]
    fn test_restaurant_list_and_menu() {
        let restaurants = data::restaurants();
        let all: Vec<&Restaurant> = restaurants.iter().collect();
        let text = restaurant_list(&all);
        assert!(text.starts_with("Restaurants (4)"));
        assert!(text.contains("Curry Kingdom"));
        assert!(restaurant_list(&[]).contains("No restaurants found"));

        let text = menu("1", restaurants.first());
        assert!(text.contains("Margherita Pizza"));
        assert!(text.contains("$12.99"));
        assert_eq!(menu("42", None), "Restaurant not found: 42\n");
    }

    #[test]
    fn test_profile_text() {
        let text = profile(
            &ProfileForm::default(),
            &data::saved_addresses(),
            &data::payment_methods(),
            &data::order_history(),
        );
        assert!(text.starts_with("John Doe (JD)\n"));
        assert!(text.contains("(Default)"));
        assert!(text.contains("#order789"));
        assert!(text.contains("Cancelled"));
    }
}
