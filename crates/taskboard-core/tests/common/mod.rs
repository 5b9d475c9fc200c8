//! Test doubles whose responses are released by the test

#![allow(dead_code)]

use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot};

use taskboard_core::{FetchError, Notification, NotificationSource, UserDirectory};

pub type Responder<T> = oneshot::Sender<Result<T, FetchError>>;

/// Source that hands each request to the test and waits for the test to answer it
pub struct Scripted<T> {
    requests: mpsc::UnboundedSender<(String, Responder<T>)>,
}

impl<T> Scripted<T> {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<(String, Responder<T>)>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { requests: tx }, rx)
    }

    async fn ask(&self, query: &str) -> Result<T, FetchError> {
        let (tx, rx) = oneshot::channel();
        self.requests
            .send((query.to_string(), tx))
            .map_err(|_| FetchError::NetworkFailure("test dropped receiver".into()))?;
        rx.await
            .map_err(|_| FetchError::NetworkFailure("test dropped responder".into()))?
    }
}

#[async_trait]
impl NotificationSource for Scripted<Vec<Notification>> {
    async fn fetch_notifications(&self) -> Result<Vec<Notification>, FetchError> {
        self.ask("").await
    }
}

#[async_trait]
impl UserDirectory for Scripted<Vec<String>> {
    async fn find_users(&self, partial: &str) -> Result<Vec<String>, FetchError> {
        self.ask(partial).await
    }
}

pub fn notification(id: u64, timestamp: &str, text: &str) -> Notification {
    Notification::new(id, timestamp, text)
}
