// Double-submission guard: a form's submit control stays disabled while its
// simulated call is pending, and a second submit is refused

use crate::error::FlowError;
use crate::host::PresentationHost;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormKind {
    QuickBooking,
    Contact,
    Booking,
    Payment,
    Newsletter,
}

impl FormKind {
    // Label shown on the submit control while busy
    pub fn busy_label(&self) -> &'static str {
        match self {
            FormKind::QuickBooking | FormKind::Contact | FormKind::Booking => "Sending...",
            FormKind::Payment => "Processing Payment...",
            FormKind::Newsletter => "Subscribing...",
        }
    }
}

impl fmt::Display for FormKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FormKind::QuickBooking => "quickBookingForm",
            FormKind::Contact => "contactForm",
            FormKind::Booking => "bookingForm",
            FormKind::Payment => "paymentForm",
            FormKind::Newsletter => "newsletterForm",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Default)]
pub struct SubmissionGuard {
    in_flight: Mutex<HashSet<FormKind>>,
}

impl SubmissionGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_pending(&self, form: FormKind) -> bool {
        self.in_flight.lock().contains(&form)
    }

    pub fn acquire<'a>(
        &'a self,
        form: FormKind,
        host: &'a dyn PresentationHost,
    ) -> Result<SubmitLease<'a>, FlowError> {
        if !self.in_flight.lock().insert(form) {
            tracing::debug!(%form, "submit ignored, already in flight");
            return Err(FlowError::SubmissionInProgress(form));
        }

        // No submit control means nothing to submit from
        if let Err(e) = host.set_submit_busy(form, Some(form.busy_label())) {
            self.in_flight.lock().remove(&form);
            tracing::error!(%form, error = %e, "submit control not found");
            return Err(e);
        }

        Ok(SubmitLease {
            guard: self,
            host,
            form,
        })
    }
}

// Restores the submit control when dropped
pub struct SubmitLease<'a> {
    guard: &'a SubmissionGuard,
    host: &'a dyn PresentationHost,
    form: FormKind,
}

impl SubmitLease<'_> {
    pub fn form(&self) -> FormKind {
        self.form
    }
}

impl Drop for SubmitLease<'_> {
    fn drop(&mut self) {
        if let Err(e) = self.host.set_submit_busy(self.form, None) {
            tracing::warn!(form = %self.form, error = %e, "could not restore submit control");
        }
        self.guard.in_flight.lock().remove(&self.form);
    }
}
