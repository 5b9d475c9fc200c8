//! In-memory users and notifications

use chrono::{DateTime, Utc};
use thiserror::Error;

use taskboard_core::{Notification, TaskId};

/// Display format for notification timestamps
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Unknown user: {0}")]
    UnknownUser(String),

    #[error("Username taken: {0}")]
    UsernameTaken(String),

    #[error("Invalid username: {0:?}")]
    InvalidUsername(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: u64,
    pub username: String,
}

#[derive(Debug, Clone)]
pub struct StoredNotification {
    pub id: u64,
    pub user_id: u64,
    pub task_id: TaskId,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl StoredNotification {
    pub fn to_wire(&self) -> Notification {
        Notification {
            task_id: self.task_id.clone(),
            timestamp: self.created_at.format(TIMESTAMP_FORMAT).to_string(),
            text: self.text.clone(),
        }
    }
}

#[derive(Debug, Default)]
pub struct Store {
    users: Vec<User>,
    notifications: Vec<StoredNotification>,
    next_user_id: u64,
    next_notification_id: u64,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store with the given users registered in order
    pub fn with_users<'a>(usernames: impl IntoIterator<Item = &'a str>) -> Result<Self, StoreError> {
        let mut store = Self::new();
        for name in usernames {
            store.add_user(name)?;
        }
        Ok(store)
    }

    pub fn add_user(&mut self, username: &str) -> Result<u64, StoreError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(StoreError::InvalidUsername(username.to_string()));
        }
        if self.user_by_name(username).is_some() {
            return Err(StoreError::UsernameTaken(username.to_string()));
        }
        self.next_user_id += 1;
        self.users.push(User {
            id: self.next_user_id,
            username: username.to_string(),
        });
        Ok(self.next_user_id)
    }

    pub fn user_by_name(&self, username: &str) -> Option<&User> {
        self.users.iter().find(|u| u.username == username)
    }

    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    /// Usernames containing `partial`, ignoring case, in registration order
    pub fn search_users(&self, partial: &str) -> Vec<String> {
        let needle = partial.to_lowercase();
        self.users
            .iter()
            .filter(|u| u.username.to_lowercase().contains(&needle))
            .map(|u| u.username.clone())
            .collect()
    }

    pub fn notify(&mut self, user_id: u64, task_id: TaskId, text: String) -> u64 {
        self.notify_at(user_id, task_id, text, Utc::now())
    }

    pub fn notify_at(
        &mut self,
        user_id: u64,
        task_id: TaskId,
        text: String,
        created_at: DateTime<Utc>,
    ) -> u64 {
        self.next_notification_id += 1;
        self.notifications.push(StoredNotification {
            id: self.next_notification_id,
            user_id,
            task_id,
            text,
            created_at,
        });
        self.next_notification_id
    }

    /// A user's notifications, newest first
    pub fn notifications_for(&self, user_id: u64) -> Vec<Notification> {
        let mut mine: Vec<&StoredNotification> = self
            .notifications
            .iter()
            .filter(|n| n.user_id == user_id)
            .collect();
        mine.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        mine.into_iter().map(StoredNotification::to_wire).collect()
    }
}
