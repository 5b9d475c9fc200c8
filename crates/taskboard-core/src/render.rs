//! Markup for notification entries and suggestion lists
//!
//! All server-supplied strings pass through [`escape_html`] before they reach
//! markup; task ids are additionally percent-encoded into the link's query.

use crate::notification::{Notification, TaskId};

/// Path of the task page each notification links to
pub const SHOW_TASK_PATH: &str = "/show_task";

/// Escape text for use in element content or a quoted attribute value
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Build the navigation target for a task: `/show_task?id=<id>`
pub fn task_link(task_id: &TaskId) -> String {
    format!(
        "{}?id={}",
        SHOW_TASK_PATH,
        urlencoding::encode(task_id.as_str())
    )
}

/// One rendered entry of the notification panel.
///
/// Fields hold raw (unescaped) values; escaping happens in [`PanelEntry::to_html`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelEntry {
    pub href: String,
    pub timestamp: String,
    pub text: String,
}

impl PanelEntry {
    pub fn from_notification(notification: &Notification) -> Self {
        Self {
            href: task_link(&notification.task_id),
            timestamp: notification.timestamp.clone(),
            text: notification.text.clone(),
        }
    }

    pub fn to_html(&self) -> String {
        format!(
            "<a class=\"dropdown-item\" href=\"{}\"><div class=\"notification\">{}<h6>{}</h6></div></a>",
            escape_html(&self.href),
            escape_html(&self.timestamp),
            escape_html(&self.text),
        )
    }
}

/// Render a list of notifications, preserving their order
pub fn render_entries(notifications: &[Notification]) -> Vec<PanelEntry> {
    notifications.iter().map(PanelEntry::from_notification).collect()
}

/// Render suggestions as a `<datalist>` bound to the input with `field_id`
pub fn render_suggestions(field_id: &str, suggestions: &[String]) -> String {
    let mut html = format!("<datalist id=\"{}-suggestions\">", escape_html(field_id));
    for name in suggestions {
        html.push_str(&format!("<option value=\"{}\">", escape_html(name)));
    }
    html.push_str("</datalist>");
    html
}
