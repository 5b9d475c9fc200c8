//! Notification panel controller
//!
//! Owns the dropdown container behind the notification toggle. Opening the
//! dropdown fetches the current user's notifications and replaces the rendered
//! entries with one link per record, in server order.
//!
//! Failures never escape [`NotificationPanel::refresh`]: the rendered entries stay
//! exactly as they were and an inline notice is shown in the panel.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::error::FetchError;
use crate::render::{escape_html, render_entries, PanelEntry};
use crate::sequence::SequencedTarget;
use crate::source::NotificationSource;

/// Element id of the dropdown container in the page
pub const CONTAINER_ID: &str = "notification-container";

/// Inline notice shown when notifications cannot be loaded
pub const LOAD_FAILED_NOTICE: &str = "Unable to load notifications";

/// Default time allowed for one fetch
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Something that can display the panel's entries
pub trait PanelContainer: Send {
    /// Remove every rendered entry and show `entries` instead
    fn replace_entries(&mut self, entries: Vec<PanelEntry>);

    fn show_notice(&mut self, notice: &str);

    fn clear_notice(&mut self);
}

/// In-memory panel container
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PanelView {
    entries: Vec<PanelEntry>,
    notice: Option<String>,
}

impl PanelView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[PanelEntry] {
        &self.entries
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Markup for the dropdown container and everything in it
    pub fn to_html(&self) -> String {
        let mut html = format!("<div id=\"{}\">", CONTAINER_ID);
        for entry in &self.entries {
            html.push_str(&entry.to_html());
        }
        if let Some(notice) = &self.notice {
            html.push_str(&format!(
                "<p class=\"dropdown-item-text notification-notice\">{}</p>",
                escape_html(notice)
            ));
        }
        html.push_str("</div>");
        html
    }
}

impl PanelContainer for PanelView {
    fn replace_entries(&mut self, entries: Vec<PanelEntry>) {
        self.entries = entries;
    }

    fn show_notice(&mut self, notice: &str) {
        self.notice = Some(notice.to_string());
    }

    fn clear_notice(&mut self) {
        self.notice = None;
    }
}

/// User interaction with the notification toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelEvent {
    Open,
    Close,
}

/// Result of one refresh
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// The panel now shows this many entries
    Rendered(usize),
    /// A newer refresh was issued before this one resolved; nothing was applied
    Superseded,
    /// The fetch failed; entries are unchanged and the notice is shown
    Failed(FetchError),
}

/// Controller for the notification dropdown
pub struct NotificationPanel<S, C = PanelView> {
    source: S,
    container: SequencedTarget<C>,
    timeout: Duration,
}

impl<S, C> NotificationPanel<S, C>
where
    S: NotificationSource,
    C: PanelContainer,
{
    pub fn new(source: S, container: C) -> Self {
        Self {
            source,
            container: SequencedTarget::new(container),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Shared handle to the container, for hosts that display it
    pub fn container(&self) -> Arc<Mutex<C>> {
        self.container.handle()
    }

    /// Copy of the container as it is right now
    pub fn snapshot(&self) -> C
    where
        C: Clone,
    {
        self.container.lock().clone()
    }

    /// Dispatch a toggle event. Only `Open` triggers a refresh.
    pub async fn handle(&self, event: PanelEvent) -> Option<RefreshOutcome> {
        match event {
            PanelEvent::Open => Some(self.refresh().await),
            PanelEvent::Close => None,
        }
    }

    /// Fetch notifications and replace the panel's entries with them
    pub async fn refresh(&self) -> RefreshOutcome {
        let ticket = self.container.issue();
        tracing::debug!("Refreshing notifications (request {})", ticket.value());

        let result = match tokio::time::timeout(self.timeout, self.source.fetch_notifications())
            .await
        {
            Ok(result) => result,
            Err(_) => Err(FetchError::timeout(self.timeout)),
        };

        match result {
            Ok(notifications) => {
                let entries = render_entries(&notifications);
                let count = entries.len();
                let applied = self.container.apply_if_current(ticket, |panel| {
                    panel.replace_entries(entries);
                    panel.clear_notice();
                });
                if applied {
                    tracing::debug!("Rendered {} notifications", count);
                    RefreshOutcome::Rendered(count)
                } else {
                    tracing::debug!("Dropped stale response for request {}", ticket.value());
                    RefreshOutcome::Superseded
                }
            }
            Err(err) => {
                let applied = self
                    .container
                    .apply_if_current(ticket, |panel| panel.show_notice(LOAD_FAILED_NOTICE));
                if applied {
                    tracing::warn!("Failed to load notifications: {}", err);
                    RefreshOutcome::Failed(err)
                } else {
                    RefreshOutcome::Superseded
                }
            }
        }
    }
}
