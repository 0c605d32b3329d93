// Currency Model: the active display currency and price formatting
// INR and USD figures are independent quotes, never converted into each other

use crate::error::FlowError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Currency {
    #[default]
    #[serde(rename = "INR")]
    Inr,
    #[serde(rename = "USD")]
    Usd,
}

pub const PER_NIGHT_SUFFIX: &str = "/night";

impl Currency {
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Inr => "INR",
            Currency::Usd => "USD",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::Inr => "₹",
            Currency::Usd => "$",
        }
    }

    // Pick the quote for this currency and render it
    pub fn format_amount(&self, inr: u32, usd: u32, per_night: bool) -> String {
        let figure = match self {
            Currency::Inr => group_thousands(inr),
            Currency::Usd => usd.to_string(),
        };
        let suffix = if per_night { PER_NIGHT_SUFFIX } else { "" };
        format!("{}{}{}", self.symbol(), figure, suffix)
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = FlowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "INR" => Ok(Currency::Inr),
            "USD" => Ok(Currency::Usd),
            other => Err(FlowError::InvalidField {
                field: "currency".to_string(),
                reason: format!("unsupported currency code '{}'", other),
            }),
        }
    }
}

// 5000 -> "5,000"
pub fn group_thousands(value: u32) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    grouped
}

// A priced node on the page, carrying both quotes supplied by the content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceTag {
    pub id: String,
    pub inr: u32,
    pub usd: u32,
    pub per_night: bool,
}

impl PriceTag {
    pub fn render(&self, currency: Currency) -> String {
        currency.format_amount(self.inr, self.usd, self.per_night)
    }
}
