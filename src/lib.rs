// Interactive core of the desert village retreat site: currency display,
// item selection, the booking -> payment flow, inquiry forms and the gallery

pub mod catalog;
pub mod config;
pub mod currency;
pub mod draft_store;
pub mod error;
pub mod flow;
pub mod gallery;
pub mod gateway;
pub mod host;
pub mod inquiries;
pub mod notifications;
pub mod session;
pub mod storage;
pub mod submission;

// Re-export key types for convenience
pub use catalog::{ItemKind, PricedItem};
pub use config::FlowConfig;
pub use currency::{Currency, PriceTag};
pub use draft_store::{BookingDraft, BookingForm, DraftStore};
pub use error::FlowError;
pub use flow::{FlowController, FlowState, PaymentSummary};
pub use gallery::{Gallery, GalleryFilter, GalleryItem, GalleryVisibility, VideoFormat};
pub use gateway::{DelayedGateway, ImmediateGateway, SubmissionGateway, SubmissionKind};
pub use host::{PresentationHost, RecordingHost, Region};
pub use inquiries::InquiryDesk;
pub use notifications::{NotificationSink, RecordingNotifier, Severity, TracingNotifier};
pub use session::SessionContext;
pub use storage::{MemorySessionStorage, SessionStorage};
pub use submission::{FormKind, SubmissionGuard};
