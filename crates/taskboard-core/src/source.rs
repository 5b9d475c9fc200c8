//! Data sources the page controllers read from
//!
//! The HTTP client in [`crate::http`] implements both traits against a running
//! server; tests plug in their own implementations.

use async_trait::async_trait;

use crate::error::FetchError;
use crate::notification::Notification;

/// Endpoint path for the current user's notifications
pub const NOTIFICATIONS_PATH: &str = "/get_notifications";

/// Endpoint path for user-name lookups
pub const USERS_PATH: &str = "/get_users";

/// Supplies the current user's notifications, newest first as the server orders them
#[async_trait]
pub trait NotificationSource: Send + Sync {
    async fn fetch_notifications(&self) -> Result<Vec<Notification>, FetchError>;
}

/// Looks up user names containing a partial name
#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn find_users(&self, partial: &str) -> Result<Vec<String>, FetchError>;
}

#[async_trait]
impl<T: NotificationSource + ?Sized> NotificationSource for std::sync::Arc<T> {
    async fn fetch_notifications(&self) -> Result<Vec<Notification>, FetchError> {
        (**self).fetch_notifications().await
    }
}

#[async_trait]
impl<T: UserDirectory + ?Sized> UserDirectory for std::sync::Arc<T> {
    async fn find_users(&self, partial: &str) -> Result<Vec<String>, FetchError> {
        (**self).find_users(partial).await
    }
}
