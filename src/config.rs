// Flow configuration: storage slot, required booking fields and simulated delays

use crate::currency::Currency;
use crate::error::FlowError;
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FlowConfig {
    pub storage_key: String,
    pub required_booking_fields: Vec<String>,
    pub payment_delay_ms: u64,
    pub quick_booking_delay_ms: u64,
    pub contact_delay_ms: u64,
    pub newsletter_delay_ms: u64,
    // chrono format string used for the payment summary date
    pub date_display_format: String,
    pub default_currency: Currency,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            storage_key: "bookingData".to_string(),
            required_booking_fields: ["name", "email", "date", "guests"]
                .iter()
                .map(|f| f.to_string())
                .collect(),
            payment_delay_ms: 2000,
            quick_booking_delay_ms: 1500,
            contact_delay_ms: 1000,
            newsletter_delay_ms: 1000,
            date_display_format: "%-m/%-d/%Y".to_string(),
            default_currency: Currency::Inr,
        }
    }
}

impl FlowConfig {
    // Parse an override document; missing keys fall back to the defaults
    pub fn from_json(json: &str) -> Result<Self, FlowError> {
        let config: FlowConfig =
            serde_json::from_str(json).map_err(|e| FlowError::Config(e.to_string()))?;

        if config.storage_key.trim().is_empty() {
            return Err(FlowError::Config("storage_key must not be empty".to_string()));
        }

        Ok(config)
    }

    pub fn payment_delay(&self) -> Duration {
        Duration::from_millis(self.payment_delay_ms)
    }

    // Zeroed delays, for tests and previews
    pub fn instant() -> Self {
        Self {
            payment_delay_ms: 0,
            quick_booking_delay_ms: 0,
            contact_delay_ms: 0,
            newsletter_delay_ms: 0,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_site_behaviour() {
        let config = FlowConfig::default();
        assert_eq!(config.storage_key, "bookingData");
        assert_eq!(config.required_booking_fields.len(), 4);
        assert_eq!(config.payment_delay(), Duration::from_secs(2));
        assert_eq!(config.default_currency, Currency::Inr);
    }

    #[test]
    fn test_partial_override_keeps_defaults() {
        let config =
            FlowConfig::from_json(r#"{"payment_delay_ms": 10, "default_currency": "USD"}"#)
                .unwrap();
        assert_eq!(config.payment_delay_ms, 10);
        assert_eq!(config.default_currency, Currency::Usd);
        assert_eq!(config.contact_delay_ms, 1000);
        assert_eq!(config.storage_key, "bookingData");
    }

    #[test]
    fn test_rejects_blank_storage_key() {
        let result = FlowConfig::from_json(r#"{"storage_key": "  "}"#);
        assert!(matches!(result, Err(FlowError::Config(_))));
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(FlowConfig::from_json("{not json").is_err());
    }
}
