// Inquiry forms outside the booking flow: quick booking, contact and newsletter.
// Each is a guarded submit, a simulated call, a success notice and a form reset.

use crate::error::FlowError;
use crate::gateway::{SubmissionGateway, SubmissionKind};
use crate::host::PresentationHost;
use crate::notifications::{NotificationSink, Severity};
use crate::submission::{FormKind, SubmissionGuard};
use std::sync::Arc;

pub const MSG_QUICK_BOOKING_SENT: &str =
    "Thank you! We will contact you within 24 hours to confirm your booking.";
pub const MSG_CONTACT_SENT: &str = "Message sent successfully! We will get back to you soon.";
pub const MSG_SUBSCRIBED: &str = "Successfully subscribed to our newsletter!";
pub const MSG_INVALID_EMAIL: &str = "Please enter a valid email address.";

pub struct InquiryDesk {
    host: Arc<dyn PresentationHost>,
    notifier: Arc<dyn NotificationSink>,
    gateway: Arc<dyn SubmissionGateway>,
    guard: SubmissionGuard,
}

impl InquiryDesk {
    pub fn new(
        host: Arc<dyn PresentationHost>,
        notifier: Arc<dyn NotificationSink>,
        gateway: Arc<dyn SubmissionGateway>,
    ) -> Self {
        Self {
            host,
            notifier,
            gateway,
            guard: SubmissionGuard::new(),
        }
    }

    pub fn is_pending(&self, form: FormKind) -> bool {
        self.guard.is_pending(form)
    }

    pub async fn submit_quick_booking(&self) -> Result<(), FlowError> {
        self.send(
            FormKind::QuickBooking,
            SubmissionKind::QuickBooking,
            MSG_QUICK_BOOKING_SENT,
        )
        .await
    }

    pub async fn submit_contact(&self) -> Result<(), FlowError> {
        self.send(FormKind::Contact, SubmissionKind::Contact, MSG_CONTACT_SENT)
            .await
    }

    pub async fn subscribe_newsletter(&self, email: &str) -> Result<(), FlowError> {
        if email.trim().is_empty() {
            self.notifier.notify(MSG_INVALID_EMAIL, Severity::Error);
            return Err(FlowError::Validation {
                missing: vec!["email".to_string()],
            });
        }

        self.send(FormKind::Newsletter, SubmissionKind::Newsletter, MSG_SUBSCRIBED)
            .await
    }

    async fn send(
        &self,
        form: FormKind,
        kind: SubmissionKind,
        success: &str,
    ) -> Result<(), FlowError> {
        let lease = self.guard.acquire(form, self.host.as_ref())?;
        tracing::info!(%form, "submitting form");

        self.gateway.submit(kind).await;

        self.notifier.notify(success, Severity::Success);
        if let Err(e) = self.host.reset_form(form) {
            tracing::warn!(%form, error = %e, "form not found for reset");
        }
        drop(lease);
        Ok(())
    }
}
