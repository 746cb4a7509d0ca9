//! Plain data types shared by pages, the cart and the CLI views.

mod account;
mod order;
mod restaurant;

pub use account::{PaymentMethod, SavedAddress};
pub use order::{OrderDetails, OrderLine, PastOrder, PastOrderStatus, StatusUpdate};
pub use restaurant::{CarouselSlide, MenuItem, Restaurant};

/// Money is kept in integer cents everywhere
pub type Cents = u64;

/// Format cents as dollars, e.g. `1299` -> `$12.99`
pub fn format_price(cents: Cents) -> String {
    format!("${}.{:02}", cents / 100, cents % 100)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(1299), "$12.99");
        assert_eq!(format_price(5), "$0.05");
        assert_eq!(format_price(0), "$0.00");
        assert_eq!(format_price(250_000), "$2500.00");
    }
}
