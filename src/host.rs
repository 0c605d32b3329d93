// Presentation host: the page regions and controls the core drives.
// A missing region is reported as HostElementMissing, never a panic.

use crate::currency::PriceTag;
use crate::draft_store::BookingForm;
use crate::error::FlowError;
use crate::flow::PaymentSummary;
use crate::gallery::GalleryVisibility;
use crate::submission::FormKind;
use chrono::NaiveDate;
use parking_lot::Mutex;
use std::collections::{HashMap, HashSet};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Region {
    BookingModal,
    PaymentPage,
    SelectedService,
    TotalAmount,
    PaymentSummary,
    DateInputs,
    Gallery,
    PriceTag(String),
    Form(FormKind),
    SubmitControl(FormKind),
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Region::BookingModal => f.write_str("bookingModal"),
            Region::PaymentPage => f.write_str("paymentPage"),
            Region::SelectedService => f.write_str("selectedService"),
            Region::TotalAmount => f.write_str("totalAmount"),
            Region::PaymentSummary => f.write_str("paymentSummary"),
            Region::DateInputs => f.write_str("dateInputs"),
            Region::Gallery => f.write_str("gallery"),
            Region::PriceTag(id) => write!(f, "price[{}]", id),
            Region::Form(form) => write!(f, "{}", form),
            Region::SubmitControl(form) => write!(f, "{} submit", form),
        }
    }
}

impl From<Region> for FlowError {
    fn from(region: Region) -> Self {
        FlowError::HostElementMissing(region.to_string())
    }
}

pub trait PresentationHost: Send + Sync {
    fn show_booking_modal(&self) -> Result<(), FlowError>;
    fn hide_booking_modal(&self) -> Result<(), FlowError>;

    fn show_payment_page(&self) -> Result<(), FlowError>;
    fn hide_payment_page(&self) -> Result<(), FlowError>;

    fn set_selected_service(&self, name: &str) -> Result<(), FlowError>;
    fn set_total_amount(&self, label: &str) -> Result<(), FlowError>;
    fn render_payment_summary(&self, summary: &PaymentSummary) -> Result<(), FlowError>;

    // Every priced node currently on the page
    fn price_tags(&self) -> Vec<PriceTag>;
    fn set_price_text(&self, tag_id: &str, text: &str) -> Result<(), FlowError>;

    fn prefill_booking_form(&self, form: &BookingForm) -> Result<(), FlowError>;

    // Some(label) disables the control and shows the label, None restores it
    fn set_submit_busy(&self, form: FormKind, busy_label: Option<&str>)
        -> Result<(), FlowError>;
    fn reset_form(&self, form: FormKind) -> Result<(), FlowError>;

    fn set_min_booking_date(&self, date: NaiveDate) -> Result<(), FlowError>;
    fn apply_gallery(&self, visibility: &[GalleryVisibility]) -> Result<(), FlowError>;
}

#[derive(Debug, Default, Clone)]
pub struct HostSnapshot {
    pub booking_open: bool,
    pub payment_open: bool,
    pub selected_service: Option<String>,
    pub total_amount: Option<String>,
    pub summary: Option<PaymentSummary>,
    pub prices: HashMap<String, String>,
    pub prefilled: Option<BookingForm>,
    pub resets: Vec<FormKind>,
    pub min_booking_date: Option<NaiveDate>,
    pub gallery: Vec<GalleryVisibility>,
}

#[derive(Debug, Default)]
struct RecordingState {
    view: HostSnapshot,
    busy: HashMap<FormKind, String>,
    tags: Vec<PriceTag>,
    missing: HashSet<Region>,
}

// In-memory page used by tests and headless embedders
#[derive(Debug, Default)]
pub struct RecordingHost {
    state: Mutex<RecordingState>,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_price_tags(tags: Vec<PriceTag>) -> Self {
        let host = Self::default();
        host.state.lock().tags = tags;
        host
    }

    pub fn remove_region(&self, region: Region) {
        self.state.lock().missing.insert(region);
    }

    pub fn restore_region(&self, region: &Region) {
        self.state.lock().missing.remove(region);
    }

    pub fn snapshot(&self) -> HostSnapshot {
        self.state.lock().view.clone()
    }

    pub fn busy_label(&self, form: FormKind) -> Option<String> {
        self.state.lock().busy.get(&form).cloned()
    }

    pub fn price_text(&self, tag_id: &str) -> Option<String> {
        self.state.lock().view.prices.get(tag_id).cloned()
    }

    fn update<F>(&self, region: Region, apply: F) -> Result<(), FlowError>
    where
        F: FnOnce(&mut RecordingState),
    {
        let mut state = self.state.lock();
        if state.missing.contains(&region) {
            return Err(region.into());
        }
        apply(&mut state);
        Ok(())
    }
}

impl PresentationHost for RecordingHost {
    fn show_booking_modal(&self) -> Result<(), FlowError> {
        self.update(Region::BookingModal, |s| s.view.booking_open = true)
    }

    fn hide_booking_modal(&self) -> Result<(), FlowError> {
        self.update(Region::BookingModal, |s| s.view.booking_open = false)
    }

    fn show_payment_page(&self) -> Result<(), FlowError> {
        self.update(Region::PaymentPage, |s| s.view.payment_open = true)
    }

    fn hide_payment_page(&self) -> Result<(), FlowError> {
        self.update(Region::PaymentPage, |s| s.view.payment_open = false)
    }

    fn set_selected_service(&self, name: &str) -> Result<(), FlowError> {
        self.update(Region::SelectedService, |s| {
            s.view.selected_service = Some(name.to_string())
        })
    }

    fn set_total_amount(&self, label: &str) -> Result<(), FlowError> {
        self.update(Region::TotalAmount, |s| {
            s.view.total_amount = Some(label.to_string())
        })
    }

    fn render_payment_summary(&self, summary: &PaymentSummary) -> Result<(), FlowError> {
        self.update(Region::PaymentSummary, |s| {
            s.view.summary = Some(summary.clone())
        })
    }

    fn price_tags(&self) -> Vec<PriceTag> {
        self.state.lock().tags.clone()
    }

    fn set_price_text(&self, tag_id: &str, text: &str) -> Result<(), FlowError> {
        self.update(Region::PriceTag(tag_id.to_string()), |s| {
            s.view.prices.insert(tag_id.to_string(), text.to_string());
        })
    }

    fn prefill_booking_form(&self, form: &BookingForm) -> Result<(), FlowError> {
        self.update(Region::Form(FormKind::Booking), |s| {
            s.view.prefilled = Some(form.clone())
        })
    }

    fn set_submit_busy(
        &self,
        form: FormKind,
        busy_label: Option<&str>,
    ) -> Result<(), FlowError> {
        self.update(Region::SubmitControl(form), |s| match busy_label {
            Some(label) => {
                s.busy.insert(form, label.to_string());
            }
            None => {
                s.busy.remove(&form);
            }
        })
    }

    fn reset_form(&self, form: FormKind) -> Result<(), FlowError> {
        self.update(Region::Form(form), |s| s.view.resets.push(form))
    }

    fn set_min_booking_date(&self, date: NaiveDate) -> Result<(), FlowError> {
        self.update(Region::DateInputs, |s| s.view.min_booking_date = Some(date))
    }

    fn apply_gallery(&self, visibility: &[GalleryVisibility]) -> Result<(), FlowError> {
        self.update(Region::Gallery, |s| s.view.gallery = visibility.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_region_is_reported_by_name() {
        let host = RecordingHost::new();
        host.remove_region(Region::BookingModal);

        assert_eq!(
            host.show_booking_modal(),
            Err(FlowError::HostElementMissing("bookingModal".to_string()))
        );
        assert!(!host.snapshot().booking_open);

        host.restore_region(&Region::BookingModal);
        assert!(host.show_booking_modal().is_ok());
        assert!(host.snapshot().booking_open);
    }

    #[test]
    fn test_region_names() {
        assert_eq!(Region::PriceTag("camp".into()).to_string(), "price[camp]");
        assert_eq!(
            Region::SubmitControl(FormKind::Payment).to_string(),
            "paymentForm submit"
        );
    }
}
