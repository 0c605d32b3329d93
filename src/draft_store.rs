// Booking Draft Store: guest details plus the selected service, kept in the
// session slot between the booking step and the payment step

use crate::catalog::PricedItem;
use crate::error::FlowError;
use crate::storage::SessionStorage;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

// Raw values of a submitted form, keyed by field name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookingForm {
    fields: BTreeMap<String, String>,
}

impl BookingForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, field: &str, value: &str) -> Self {
        self.set(field, value);
        self
    }

    pub fn set(&mut self, field: &str, value: &str) {
        self.fields.insert(field.to_string(), value.to_string());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    pub fn is_blank(&self, field: &str) -> bool {
        self.get(field).map_or(true, |v| v.trim().is_empty())
    }

    // Required fields that are absent or whitespace only, in the given order
    pub fn missing_fields(&self, required: &[String]) -> Vec<String> {
        required
            .iter()
            .filter(|field| self.is_blank(field))
            .cloned()
            .collect()
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

const CORE_FIELDS: [&str; 4] = ["name", "email", "date", "guests"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingDraft {
    pub name: String,
    pub email: String,
    pub date: String,
    pub guests: u32,
    // Any other inputs the booking form carries (phone, requests, ...)
    #[serde(flatten)]
    pub extra: BTreeMap<String, String>,
    pub service: PricedItem,
}

impl BookingDraft {
    pub fn from_form(
        form: &BookingForm,
        required: &[String],
        service: PricedItem,
    ) -> Result<Self, FlowError> {
        let missing = form.missing_fields(required);
        if !missing.is_empty() {
            return Err(FlowError::Validation { missing });
        }

        let guests = match form.get("guests").map(str::trim) {
            None | Some("") => 1,
            Some(raw) => match raw.parse::<u32>() {
                Ok(count) if count > 0 => count,
                _ => {
                    return Err(FlowError::InvalidField {
                        field: "guests".to_string(),
                        reason: format!("'{}' is not a positive number", raw),
                    })
                }
            },
        };

        let text = |field: &str| form.get(field).unwrap_or_default().trim().to_string();

        let extra = form
            .fields()
            .filter(|(k, _)| !CORE_FIELDS.contains(k) && *k != "service")
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        Ok(Self {
            name: text("name"),
            email: text("email"),
            date: text("date"),
            guests,
            extra,
            service,
        })
    }

    // Form values for repopulating the booking step
    pub fn to_form(&self) -> BookingForm {
        let mut form = BookingForm::new()
            .with("name", &self.name)
            .with("email", &self.email)
            .with("date", &self.date)
            .with("guests", &self.guests.to_string());
        for (k, v) in &self.extra {
            form.set(k, v);
        }
        form
    }
}

pub struct DraftStore {
    storage: Arc<dyn SessionStorage>,
    key: String,
}

impl DraftStore {
    pub fn new(storage: Arc<dyn SessionStorage>, key: &str) -> Self {
        Self {
            storage,
            key: key.to_string(),
        }
    }

    pub fn save(&self, draft: &BookingDraft) -> Result<(), FlowError> {
        let json =
            serde_json::to_string(draft).map_err(|e| FlowError::Storage(e.to_string()))?;
        self.storage.set(&self.key, json);
        tracing::debug!(key = %self.key, service = %draft.service.name, "booking draft saved");
        Ok(())
    }

    // An unreadable record counts as no draft at all
    pub fn load(&self) -> Option<BookingDraft> {
        let raw = self.storage.get(&self.key)?;
        match serde_json::from_str(&raw) {
            Ok(draft) => Some(draft),
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "discarding unreadable booking draft");
                None
            }
        }
    }

    pub fn clear(&self) -> bool {
        let removed = self.storage.remove(&self.key);
        if removed {
            tracing::debug!(key = %self.key, "booking draft cleared");
        }
        removed
    }
}
