use serde::{Deserialize, Serialize};

use super::Cents;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Restaurant {
    pub id: String,
    pub name: String,
    pub cuisine: String,
    /// Out of 5
    pub rating: f32,
    pub delivery_time: String,
    pub price_range: String,
    pub address: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub menu: Vec<MenuItem>,
}

impl Restaurant {
    /// Tags shown on a listing card (at most two)
    pub fn card_tags(&self) -> &[String] {
        &self.tags[..self.tags.len().min(2)]
    }

    pub fn menu_item(&self, item_id: &str) -> Option<&MenuItem> {
        self.menu.iter().find(|m| m.id == item_id)
    }

    /// Menu categories in first-seen order
    pub fn menu_categories(&self) -> Vec<&str> {
        let mut categories: Vec<&str> = Vec::new();
        for item in &self.menu {
            if !categories.contains(&item.category.as_str()) {
                categories.push(&item.category);
            }
        }
        categories
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: Cents,
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarouselSlide {
    pub id: String,
    pub title: String,
    pub alt_text: String,
    #[serde(default)]
    pub description: Option<String>,
}
