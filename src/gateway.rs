// Simulated submission gateway: every "API call" of the site is a fixed delay
// that always succeeds; no retry, no cancellation

use crate::config::FlowConfig;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::time::Duration;
use tokio::time::sleep;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubmissionKind {
    QuickBooking,
    Contact,
    Payment,
    Newsletter,
}

#[async_trait]
pub trait SubmissionGateway: Send + Sync {
    async fn submit(&self, kind: SubmissionKind);
}

#[derive(Debug, Clone)]
pub struct DelayedGateway {
    quick_booking: Duration,
    contact: Duration,
    payment: Duration,
    newsletter: Duration,
}

impl DelayedGateway {
    pub fn from_config(config: &FlowConfig) -> Self {
        Self {
            quick_booking: Duration::from_millis(config.quick_booking_delay_ms),
            contact: Duration::from_millis(config.contact_delay_ms),
            payment: config.payment_delay(),
            newsletter: Duration::from_millis(config.newsletter_delay_ms),
        }
    }

    pub fn delay_for(&self, kind: SubmissionKind) -> Duration {
        match kind {
            SubmissionKind::QuickBooking => self.quick_booking,
            SubmissionKind::Contact => self.contact,
            SubmissionKind::Payment => self.payment,
            SubmissionKind::Newsletter => self.newsletter,
        }
    }
}

impl Default for DelayedGateway {
    fn default() -> Self {
        Self::from_config(&FlowConfig::default())
    }
}

#[async_trait]
impl SubmissionGateway for DelayedGateway {
    async fn submit(&self, kind: SubmissionKind) {
        let delay = self.delay_for(kind);
        tracing::debug!(?kind, delay_ms = delay.as_millis() as u64, "simulating request");
        sleep(delay).await;
    }
}

// Resolves at once and remembers what was submitted
#[derive(Debug, Default)]
pub struct ImmediateGateway {
    calls: Mutex<Vec<SubmissionKind>>,
}

impl ImmediateGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<SubmissionKind> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl SubmissionGateway for ImmediateGateway {
    async fn submit(&self, kind: SubmissionKind) {
        self.calls.lock().push(kind);
    }
}
