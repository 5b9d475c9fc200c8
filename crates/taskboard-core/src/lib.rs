//! Taskboard Core - page controllers for the taskboard task tracker
//!
//! The task pages are rendered by the server; this crate provides the pieces
//! that run on top of them:
//!
//! - **Panel**: notification dropdown that fetches `/get_notifications` on open and
//!   renders one link per notification
//! - **Autocomplete**: assignee/assigner name suggestions from `/get_users`
//! - **Date field**: due-date input initialized to today
//! - **Sequence**: latest-request-wins ordering for overlapping fetches
//! - **Http**: reqwest client for the server endpoints (feature `native`)
//!
//! Controllers never surface fetch errors to their host. A failed request leaves
//! what is displayed untouched and sets an inline notice.

pub mod autocomplete;
pub mod config;
pub mod date_field;
pub mod error;
pub mod http;
pub mod notification;
pub mod panel;
pub mod render;
pub mod sequence;
pub mod source;

pub use autocomplete::{NameAutocomplete, NameField, SuggestOutcome, SuggestionList};
pub use config::ClientConfig;
pub use date_field::{due_date_input, DateInput};
pub use error::{ConfigError, FetchError, Result, TaskboardError};
pub use notification::{Notification, TaskId};
pub use panel::{NotificationPanel, PanelContainer, PanelEvent, PanelView, RefreshOutcome};
pub use render::PanelEntry;
pub use sequence::{RequestSequencer, SequencedTarget, Ticket};
pub use source::{NotificationSource, UserDirectory};

#[cfg(feature = "native")]
pub use http::TaskboardClient;
