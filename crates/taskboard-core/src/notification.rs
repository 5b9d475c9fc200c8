//! Notification records as delivered by `/get_notifications`

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Opaque task identifier.
///
/// The server may encode it as a JSON number or a JSON string; both are kept in
/// their textual form and only ever used to build a navigation link. The wire
/// kind is remembered so the id is written back exactly as it arrived.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TaskId {
    text: String,
    numeric: bool,
}

impl TaskId {
    /// An id carried as a JSON string
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            text: id.into(),
            numeric: false,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Whether the id travels as a JSON number
    pub fn is_numeric(&self) -> bool {
        self.numeric
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl From<u64> for TaskId {
    fn from(id: u64) -> Self {
        Self {
            text: id.to_string(),
            numeric: true,
        }
    }
}

impl From<&str> for TaskId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for TaskId {
    fn from(id: String) -> Self {
        Self::new(id)
    }
}

impl<'de> Deserialize<'de> for TaskId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Wire {
            Number(serde_json::Number),
            Text(String),
        }

        match Wire::deserialize(deserializer)? {
            Wire::Number(n) => Ok(TaskId {
                text: n.to_string(),
                numeric: true,
            }),
            Wire::Text(s) => Ok(TaskId::new(s)),
        }
    }
}

impl Serialize for TaskId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if !self.numeric {
            return serializer.serialize_str(&self.text);
        }
        // The text came from a JSON number, so one of these parses
        if let Ok(n) = self.text.parse::<u64>() {
            serializer.serialize_u64(n)
        } else if let Ok(n) = self.text.parse::<i64>() {
            serializer.serialize_i64(n)
        } else if let Ok(n) = self.text.parse::<f64>() {
            serializer.serialize_f64(n)
        } else {
            serializer.serialize_str(&self.text)
        }
    }
}

/// A notification about a task, pre-formatted by the server for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub task_id: TaskId,
    pub timestamp: String,
    pub text: String,
}

impl Notification {
    pub fn new(task_id: impl Into<TaskId>, timestamp: &str, text: &str) -> Self {
        Self {
            task_id: task_id.into(),
            timestamp: timestamp.to_string(),
            text: text.to_string(),
        }
    }
}

/// Parse the `/get_notifications` payload.
///
/// The payload must be a JSON array; anything else (including the server's
/// `{"error": ...}` objects) is a schema mismatch.
pub fn parse_notifications(body: &str) -> Result<Vec<Notification>, serde_json::Error> {
    serde_json::from_str(body)
}

/// Parse the `/get_users` payload: a JSON array of user names.
pub fn parse_user_names(body: &str) -> Result<Vec<String>, serde_json::Error> {
    serde_json::from_str(body)
}
