//! User-name autocomplete for the assignee and assigner inputs
//!
//! Each input gets its own [`NameAutocomplete`]. Typing fetches the names that
//! contain the trimmed input and replaces the field's suggestion list.

use std::fmt;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::error::FetchError;
use crate::render::render_suggestions;
use crate::sequence::SequencedTarget;
use crate::source::UserDirectory;

/// Inline notice shown when suggestions cannot be loaded
pub const SUGGESTIONS_FAILED_NOTICE: &str = "Unable to load suggestions";

/// The name inputs that offer suggestions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NameField {
    Assignee,
    Assigner,
}

impl NameField {
    /// Element id of the input in the page
    pub fn element_id(&self) -> &'static str {
        match self {
            NameField::Assignee => "assignee",
            NameField::Assigner => "assigner",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "assignee" => Some(NameField::Assignee),
            "assigner" => Some(NameField::Assigner),
            _ => None,
        }
    }
}

impl fmt::Display for NameField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.element_id())
    }
}

/// Suggestions currently attached to one input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionList {
    field: NameField,
    suggestions: Vec<String>,
    notice: Option<String>,
}

impl SuggestionList {
    pub fn new(field: NameField) -> Self {
        Self {
            field,
            suggestions: Vec::new(),
            notice: None,
        }
    }

    pub fn field(&self) -> NameField {
        self.field
    }

    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn to_html(&self) -> String {
        render_suggestions(self.field.element_id(), &self.suggestions)
    }
}

/// Result of one input event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuggestOutcome {
    /// Input was blank after trimming; no request was issued
    Skipped,
    /// The field now offers this many suggestions
    Updated(usize),
    /// A newer input was issued before this one resolved
    Superseded,
    /// The lookup failed; suggestions are unchanged and the notice is shown
    Failed(FetchError),
}

/// Autocomplete controller for one name input
pub struct NameAutocomplete<D> {
    directory: D,
    list: SequencedTarget<SuggestionList>,
    timeout: Duration,
}

impl<D: UserDirectory> NameAutocomplete<D> {
    pub fn new(field: NameField, directory: D) -> Self {
        Self {
            directory,
            list: SequencedTarget::new(SuggestionList::new(field)),
            timeout: crate::panel::DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn suggestions(&self) -> Arc<Mutex<SuggestionList>> {
        self.list.handle()
    }

    pub fn snapshot(&self) -> SuggestionList {
        self.list.lock().clone()
    }

    /// React to the input's value changing
    pub async fn on_input(&self, value: &str) -> SuggestOutcome {
        let partial = value.trim();
        if partial.is_empty() {
            return SuggestOutcome::Skipped;
        }

        let ticket = self.list.issue();
        let result = match tokio::time::timeout(self.timeout, self.directory.find_users(partial))
            .await
        {
            Ok(result) => result,
            Err(_) => Err(FetchError::timeout(self.timeout)),
        };

        match result {
            Ok(names) => {
                let count = names.len();
                let applied = self.list.apply_if_current(ticket, |list| {
                    list.suggestions = names;
                    list.notice = None;
                });
                if applied {
                    tracing::debug!("{} suggestions for {:?}", count, partial);
                    SuggestOutcome::Updated(count)
                } else {
                    SuggestOutcome::Superseded
                }
            }
            Err(err) => {
                let applied = self.list.apply_if_current(ticket, |list| {
                    list.notice = Some(SUGGESTIONS_FAILED_NOTICE.to_string());
                });
                if applied {
                    tracing::warn!("Failed to load suggestions for {:?}: {}", partial, err);
                    SuggestOutcome::Failed(err)
                } else {
                    SuggestOutcome::Superseded
                }
            }
        }
    }
}
