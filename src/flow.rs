// Booking/Payment Flow Controller
// Idle -> BookingOpen -> PaymentOpen -> Idle, with back navigation from payment
// to booking and abandon from anywhere. Only this controller writes the draft slot.

use crate::catalog::{ItemKind, PricedItem};
use crate::config::FlowConfig;
use crate::currency::Currency;
use crate::draft_store::{BookingDraft, BookingForm, DraftStore};
use crate::error::FlowError;
use crate::gateway::{SubmissionGateway, SubmissionKind};
use crate::host::PresentationHost;
use crate::notifications::{NotificationSink, Severity};
use crate::session::SessionContext;
use crate::storage::SessionStorage;
use crate::submission::{FormKind, SubmissionGuard};
use chrono::{Local, NaiveDate};
use parking_lot::Mutex;
use std::fmt::{self, Write};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

pub const MSG_REQUIRED_FIELDS: &str = "Please fill in all required fields.";
pub const MSG_INVALID_GUESTS: &str = "Please enter a valid number of guests.";
pub const MSG_NO_SELECTION: &str = "Please choose an experience or accommodation first.";
pub const MSG_PAYMENT_LOAD_ERROR: &str = "Error loading payment page. Please try again.";
pub const MSG_PAYMENT_SUCCESS: &str =
    "Payment successful! Booking confirmation sent to your email.";
pub const MSG_STORAGE_ERROR: &str = "Could not save your booking. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlowState {
    #[default]
    Idle,
    BookingOpen,
    PaymentOpen,
}

impl fmt::Display for FlowState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FlowState::Idle => "idle",
            FlowState::BookingOpen => "booking open",
            FlowState::PaymentOpen => "payment open",
        };
        f.write_str(label)
    }
}

// Read-only view of a draft, as shown on the payment step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentSummary {
    pub service: String,
    pub guest_name: String,
    pub email: String,
    pub date: String,
    pub guests: u32,
    pub total: String,
}

impl PaymentSummary {
    pub fn from_draft(draft: &BookingDraft, currency: Currency, date_format: &str) -> Self {
        Self {
            service: draft.service.name.clone(),
            guest_name: draft.name.clone(),
            email: draft.email.clone(),
            date: localize_date(&draft.date, date_format),
            guests: draft.guests,
            total: draft.service.format_price(currency),
        }
    }
}

impl fmt::Display for PaymentSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Service: {}", self.service)?;
        writeln!(f, "Guest Name: {}", self.guest_name)?;
        writeln!(f, "Email: {}", self.email)?;
        writeln!(f, "Date: {}", self.date)?;
        writeln!(f, "Guests: {}", self.guests)?;
        write!(f, "Total Amount: {}", self.total)
    }
}

// ISO date from the form, re-rendered for display; anything else is shown as typed
pub fn localize_date(raw: &str, format: &str) -> String {
    let Ok(date) = NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d") else {
        return raw.to_string();
    };

    // an invalid format string surfaces as fmt::Error instead of a panic
    let mut out = String::new();
    match write!(out, "{}", date.format(format)) {
        Ok(()) => out,
        Err(_) => raw.to_string(),
    }
}

#[derive(Debug, Default)]
struct FlowInner {
    state: FlowState,
    session: SessionContext,
    // Bumped whenever the visitor leaves the current payment step
    round: u64,
}

pub struct FlowController {
    config: FlowConfig,
    inner: Mutex<FlowInner>,
    drafts: DraftStore,
    host: Arc<dyn PresentationHost>,
    notifier: Arc<dyn NotificationSink>,
    gateway: Arc<dyn SubmissionGateway>,
    guard: SubmissionGuard,
}

impl FlowController {
    pub fn new(
        config: FlowConfig,
        host: Arc<dyn PresentationHost>,
        notifier: Arc<dyn NotificationSink>,
        gateway: Arc<dyn SubmissionGateway>,
        storage: Arc<dyn SessionStorage>,
    ) -> Self {
        let drafts = DraftStore::new(storage, &config.storage_key);
        let inner = FlowInner {
            state: FlowState::Idle,
            session: SessionContext::new(config.default_currency),
            round: 0,
        };

        Self {
            config,
            inner: Mutex::new(inner),
            drafts,
            host,
            notifier,
            gateway,
            guard: SubmissionGuard::new(),
        }
    }

    pub fn state(&self) -> FlowState {
        self.inner.lock().state
    }

    pub fn currency(&self) -> Currency {
        self.inner.lock().session.currency
    }

    pub fn selection(&self) -> Option<PricedItem> {
        self.inner.lock().session.selection.clone()
    }

    pub fn draft(&self) -> Option<BookingDraft> {
        self.drafts.load()
    }

    pub fn format_price(&self, item: &PricedItem) -> String {
        self.inner.lock().session.format_price(item)
    }

    // Page load: earliest bookable date is today, prices in the default currency
    pub fn initialize(&self) -> Result<(), FlowError> {
        let today = Local::now().date_naive();
        if let Err(e) = self.host.set_min_booking_date(today) {
            warn!(error = %e, "date inputs not found");
        }
        let rendered = self.render_prices();
        info!(currency = %self.currency(), prices = rendered, "booking flow initialized");
        Ok(())
    }

    // Re-renders every priced node on the page; returns how many were updated
    pub fn render_prices(&self) -> usize {
        let currency = self.currency();
        let mut updated = 0;

        for tag in self.host.price_tags() {
            match self.host.set_price_text(&tag.id, &tag.render(currency)) {
                Ok(()) => updated += 1,
                Err(e) => warn!(tag = %tag.id, error = %e, "price node vanished"),
            }
        }

        updated
    }

    pub fn set_currency(&self, currency: Currency) -> Result<(), FlowError> {
        let (total, state) = {
            let mut inner = self.inner.lock();
            inner.session.set_currency(currency);
            (inner.session.total_label(), inner.state)
        };
        info!(%currency, "currency changed");

        self.render_prices();

        if let Some(total) = total {
            if let Err(e) = self.host.set_total_amount(&total) {
                warn!(error = %e, "total amount display not found");
            }
        }

        if state == FlowState::PaymentOpen {
            if let Some(draft) = self.drafts.load() {
                let summary =
                    PaymentSummary::from_draft(&draft, currency, &self.config.date_display_format);
                if let Err(e) = self.host.render_payment_summary(&summary) {
                    warn!(error = %e, "payment summary not found");
                }
            }
        }

        Ok(())
    }

    pub fn set_currency_code(&self, code: &str) -> Result<(), FlowError> {
        self.set_currency(code.parse()?)
    }

    pub fn select_item(
        &self,
        kind: ItemKind,
        name: &str,
        price_inr: u32,
        price_usd: u32,
    ) -> Result<PricedItem, FlowError> {
        let item = PricedItem::new(kind, name, price_inr, price_usd).map_err(|e| {
            error!(error = %e, "rejected catalog selection");
            e
        })?;
        info!(?kind, name = %item.name, price_inr, price_usd, "item selected");

        let (total, previous) = {
            let mut inner = self.inner.lock();
            inner.session.select(item.clone());
            inner.round += 1;
            (inner.session.format_price(&item), inner.state)
        };

        if previous == FlowState::PaymentOpen {
            if let Err(e) = self.host.hide_payment_page() {
                debug!(error = %e, "payment page already gone");
            }
        }

        if let Err(e) = self.host.set_selected_service(&item.name) {
            warn!(error = %e, "selected service field not found");
        }
        if let Err(e) = self.host.set_total_amount(&total) {
            warn!(error = %e, "total amount display not found");
        }

        match self.host.show_booking_modal() {
            Ok(()) => {
                self.inner.lock().state = FlowState::BookingOpen;
                Ok(item)
            }
            Err(e) => {
                error!(error = %e, "booking modal not found");
                if previous == FlowState::PaymentOpen {
                    self.inner.lock().state = FlowState::Idle;
                }
                Err(e)
            }
        }
    }

    pub fn book_experience(
        &self,
        name: &str,
        price_inr: u32,
        price_usd: u32,
    ) -> Result<PricedItem, FlowError> {
        self.select_item(ItemKind::Experience, name, price_inr, price_usd)
    }

    pub fn book_accommodation(
        &self,
        name: &str,
        price_inr: u32,
        price_usd: u32,
    ) -> Result<PricedItem, FlowError> {
        self.select_item(ItemKind::Accommodation, name, price_inr, price_usd)
    }

    // Validates the booking form, stores the draft and moves on to payment
    pub fn submit_booking(&self, form: &BookingForm) -> Result<PaymentSummary, FlowError> {
        let (state, selection) = {
            let inner = self.inner.lock();
            (inner.state, inner.session.selection.clone())
        };

        if selection.is_none() {
            error!("booking submitted without a selected service");
            self.notifier.notify(MSG_NO_SELECTION, Severity::Error);
            return Err(FlowError::MissingSelection);
        }

        if state != FlowState::BookingOpen {
            return Err(self.invalid_transition(state, "submit the booking form"));
        }

        let missing = form.missing_fields(&self.config.required_booking_fields);
        if !missing.is_empty() {
            debug!(?missing, "booking form incomplete");
            self.notifier.notify(MSG_REQUIRED_FIELDS, Severity::Error);
            return Err(FlowError::Validation { missing });
        }

        let Some(service) = selection else {
            return Err(FlowError::MissingSelection);
        };

        let draft =
            match BookingDraft::from_form(form, &self.config.required_booking_fields, service) {
                Ok(draft) => draft,
                Err(e) => {
                    debug!(error = %e, "booking form rejected");
                    self.notifier.notify(MSG_INVALID_GUESTS, Severity::Error);
                    return Err(e);
                }
            };

        if let Err(e) = self.drafts.save(&draft) {
            error!(error = %e, "failed to persist booking draft");
            self.notifier.notify(MSG_STORAGE_ERROR, Severity::Error);
            return Err(e);
        }

        if let Err(e) = self.host.hide_booking_modal() {
            warn!(error = %e, "booking modal not found");
        }

        match self.open_payment() {
            Ok(summary) => Ok(summary),
            Err(e) => {
                // back to the booking step; the stored draft stays for a retry
                if let Err(e) = self.host.show_booking_modal() {
                    warn!(error = %e, "booking modal not found");
                }
                Err(e)
            }
        }
    }

    // Same as the booking form's submit; wired to the "proceed to payment" button
    pub fn proceed_to_payment(&self, form: &BookingForm) -> Result<PaymentSummary, FlowError> {
        self.submit_booking(form)
    }

    // Opens the payment step from the stored draft; fails closed without one
    pub fn open_payment(&self) -> Result<PaymentSummary, FlowError> {
        let Some(draft) = self.drafts.load() else {
            error!("payment page or booking data not found");
            self.notifier.notify(MSG_PAYMENT_LOAD_ERROR, Severity::Error);
            return Err(FlowError::MissingSelection);
        };

        let currency = {
            let mut inner = self.inner.lock();
            if inner.session.selection.is_none() {
                inner.session.select(draft.service.clone());
            }
            inner.session.currency
        };

        let summary = PaymentSummary::from_draft(&draft, currency, &self.config.date_display_format);

        if let Err(e) = self.host.show_payment_page() {
            error!(error = %e, "payment page not found");
            self.notifier.notify(MSG_PAYMENT_LOAD_ERROR, Severity::Error);
            return Err(e);
        }
        if let Err(e) = self.host.render_payment_summary(&summary) {
            warn!(error = %e, "payment summary not found");
        }

        self.inner.lock().state = FlowState::PaymentOpen;
        info!(service = %summary.service, total = %summary.total, "payment step opened");
        Ok(summary)
    }

    // Completes only if the visitor is still on the payment step this call started from
    pub async fn submit_payment(&self) -> Result<(), FlowError> {
        let (state, round) = {
            let inner = self.inner.lock();
            (inner.state, inner.round)
        };
        if state != FlowState::PaymentOpen {
            return Err(self.invalid_transition(state, "submit payment"));
        }

        let lease = self.guard.acquire(FormKind::Payment, self.host.as_ref())?;
        info!(round, "processing payment");

        self.gateway.submit(SubmissionKind::Payment).await;

        let current = {
            let mut inner = self.inner.lock();
            if inner.state == FlowState::PaymentOpen && inner.round == round {
                inner.session.clear_selection();
                inner.state = FlowState::Idle;
                inner.round += 1;
                None
            } else {
                Some(inner.state)
            }
        };
        if let Some(state) = current {
            drop(lease);
            warn!(%state, round, "payment resolved after the visitor left the payment step");
            return Err(FlowError::InvalidTransition {
                state: state.to_string(),
                action: "complete payment".to_string(),
            });
        }

        self.notifier.notify(MSG_PAYMENT_SUCCESS, Severity::Success);
        if let Err(e) = self.host.reset_form(FormKind::Payment) {
            warn!(error = %e, "payment form not found");
        }
        if let Err(e) = self.host.hide_payment_page() {
            warn!(error = %e, "payment page not found");
        }
        drop(lease);

        self.drafts.clear();
        info!("payment completed, booking draft cleared");
        Ok(())
    }

    // Payment -> booking. The draft is kept and the booking form is refilled from it.
    pub fn go_back(&self) -> Result<Option<BookingForm>, FlowError> {
        let state = self.state();
        if state != FlowState::PaymentOpen {
            return Err(self.invalid_transition(state, "go back to booking"));
        }

        if let Err(e) = self.host.hide_payment_page() {
            warn!(error = %e, "payment page not found");
        }

        if let Err(e) = self.host.show_booking_modal() {
            error!(error = %e, "booking modal not found");
            if self.host.show_payment_page().is_err() {
                self.inner.lock().state = FlowState::Idle;
            }
            return Err(e);
        }

        let prefilled = self.drafts.load().map(|draft| draft.to_form());
        if let Some(form) = &prefilled {
            if let Err(e) = self.host.prefill_booking_form(form) {
                warn!(error = %e, "booking form not found");
            }
        }

        {
            let mut inner = self.inner.lock();
            inner.state = FlowState::BookingOpen;
            inner.round += 1;
        }
        debug!(prefilled = prefilled.is_some(), "returned to booking step");
        Ok(prefilled)
    }

    // Escape key / dismiss: close everything and forget the booking
    pub fn abandon(&self) -> FlowState {
        let previous = {
            let mut inner = self.inner.lock();
            inner.session.clear_selection();
            inner.round += 1;
            std::mem::replace(&mut inner.state, FlowState::Idle)
        };

        if let Err(e) = self.host.hide_booking_modal() {
            debug!(error = %e, "booking modal not present");
        }
        if let Err(e) = self.host.hide_payment_page() {
            debug!(error = %e, "payment page not present");
        }
        self.drafts.clear();

        info!(%previous, "booking flow abandoned");
        previous
    }

    fn invalid_transition(&self, state: FlowState, action: &str) -> FlowError {
        warn!(%state, action, "ignored out-of-order action");
        FlowError::InvalidTransition {
            state: state.to_string(),
            action: action.to_string(),
        }
    }
}
