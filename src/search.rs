//! Restaurant listing filters: name substring plus cuisine category.

use crate::data::ALL_CUISINES;
use crate::types::Restaurant;

/// Restaurants whose name contains `term` (case-insensitive) and whose
/// cuisine matches `category`. [`ALL_CUISINES`] matches every cuisine.
pub fn filter_restaurants<'a>(
    restaurants: &'a [Restaurant],
    term: &str,
    category: &str,
) -> Vec<&'a Restaurant> {
    let term = term.to_lowercase();
    restaurants
        .iter()
        .filter(|r| r.name.to_lowercase().contains(&term))
        .filter(|r| category_matches(&r.cuisine, category))
        .collect()
}

fn category_matches(cuisine: &str, category: &str) -> bool {
    category == ALL_CUISINES || cuisine.eq_ignore_ascii_case(category)
}
