// Catalog Item Selection: the experience or accommodation a visitor picked

use crate::currency::Currency;
use crate::error::FlowError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Experience,
    Accommodation,
}

impl ItemKind {
    // Accommodation is always quoted per night
    pub fn is_per_night(&self) -> bool {
        matches!(self, ItemKind::Accommodation)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricedItem {
    #[serde(rename = "type")]
    pub kind: ItemKind,
    pub name: String,
    #[serde(rename = "priceINR")]
    pub price_inr: u32,
    #[serde(rename = "priceUSD")]
    pub price_usd: u32,
}

impl PricedItem {
    pub fn new(
        kind: ItemKind,
        name: &str,
        price_inr: u32,
        price_usd: u32,
    ) -> Result<Self, FlowError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(FlowError::InvalidItem("name must not be empty".to_string()));
        }
        if price_inr == 0 || price_usd == 0 {
            return Err(FlowError::InvalidItem(format!(
                "prices for '{}' must be positive (INR {}, USD {})",
                name, price_inr, price_usd
            )));
        }

        Ok(Self {
            kind,
            name: name.to_string(),
            price_inr,
            price_usd,
        })
    }

    pub fn experience(name: &str, price_inr: u32, price_usd: u32) -> Result<Self, FlowError> {
        Self::new(ItemKind::Experience, name, price_inr, price_usd)
    }

    pub fn accommodation(name: &str, price_inr: u32, price_usd: u32) -> Result<Self, FlowError> {
        Self::new(ItemKind::Accommodation, name, price_inr, price_usd)
    }

    pub fn format_price(&self, currency: Currency) -> String {
        currency.format_amount(self.price_inr, self.price_usd, self.kind.is_per_night())
    }
}
