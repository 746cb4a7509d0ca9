use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedAddress {
    pub id: String,
    /// "Home", "Work", ...
    pub label: String,
    pub address: String,
    pub is_default: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentMethod {
    pub id: String,
    pub brand: String,
    pub last4: String,
    pub expiry: String,
    pub is_default: bool,
}

impl PaymentMethod {
    pub fn masked(&self) -> String {
        format!("{} ending in •••• {}", self.brand, self.last4)
    }
}
