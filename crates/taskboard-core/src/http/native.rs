//! Native HTTP client using reqwest

use async_trait::async_trait;
use reqwest::Client;
use url::Url;

use super::SESSION_HEADER;
use crate::config::ClientConfig;
use crate::error::FetchError;
use crate::notification::{parse_notifications, parse_user_names, Notification};
use crate::source::{NotificationSource, UserDirectory, NOTIFICATIONS_PATH, USERS_PATH};

/// Client for the taskboard JSON endpoints
#[derive(Debug, Clone)]
pub struct TaskboardClient {
    client: Client,
    base_url: Url,
    session_user: Option<String>,
}

impl TaskboardClient {
    pub fn new(config: &ClientConfig) -> Result<Self, FetchError> {
        let mut base_url = Url::parse(&config.base_url)
            .map_err(|e| FetchError::NetworkFailure(format!("invalid base url: {}", e)))?;
        // Endpoints resolve under the base path, so it must end in a slash
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| FetchError::NetworkFailure(e.to_string()))?;

        Ok(Self {
            client,
            base_url,
            session_user: config.session_user.clone(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, FetchError> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| FetchError::NetworkFailure(format!("invalid endpoint {}: {}", path, e)))
    }

    /// GET `url` and return the body of a success response
    async fn get(&self, url: Url) -> Result<String, FetchError> {
        tracing::debug!("GET {}", url);

        let mut request = self.client.get(url.clone());
        if let Some(user) = &self.session_user {
            request = request.header(SESSION_HEADER, user);
        }

        let response = request.send().await.map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!("GET {} answered {}", url, status);
            return Err(FetchError::status(status.as_u16()));
        }

        response.text().await.map_err(map_reqwest_error)
    }
}

fn map_reqwest_error(err: reqwest::Error) -> FetchError {
    if err.is_decode() || err.is_body() {
        FetchError::InvalidResponse(err.to_string())
    } else {
        FetchError::NetworkFailure(err.to_string())
    }
}

#[async_trait]
impl NotificationSource for TaskboardClient {
    async fn fetch_notifications(&self) -> Result<Vec<Notification>, FetchError> {
        let body = self.get(self.endpoint(NOTIFICATIONS_PATH)?).await?;
        Ok(parse_notifications(&body)?)
    }
}

#[async_trait]
impl UserDirectory for TaskboardClient {
    async fn find_users(&self, partial: &str) -> Result<Vec<String>, FetchError> {
        let mut url = self.endpoint(USERS_PATH)?;
        url.query_pairs_mut().append_pair("name", partial);
        let body = self.get(url).await?;
        Ok(parse_user_names(&body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_resolution() {
        let config = ClientConfig {
            base_url: "http://tasks.local:8000/".to_string(),
            ..Default::default()
        };
        let client = TaskboardClient::new(&config).unwrap();
        assert_eq!(
            client.endpoint(NOTIFICATIONS_PATH).unwrap().as_str(),
            "http://tasks.local:8000/get_notifications"
        );
    }

    #[test]
    fn test_endpoint_keeps_base_path_prefix() {
        for base in ["http://tasks.local/app", "http://tasks.local/app/"] {
            let config = ClientConfig {
                base_url: base.to_string(),
                ..Default::default()
            };
            let client = TaskboardClient::new(&config).unwrap();
            assert_eq!(
                client.endpoint(USERS_PATH).unwrap().as_str(),
                "http://tasks.local/app/get_users"
            );
        }
    }

    #[tokio::test]
    async fn test_unreachable_server_is_network_failure() {
        // Bind then drop a listener to get a port nothing is listening on
        let port = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();
        let config = ClientConfig {
            base_url: format!("http://127.0.0.1:{}", port),
            timeout_ms: 2_000,
            ..Default::default()
        };
        let client = TaskboardClient::new(&config).unwrap();
        let err = client.fetch_notifications().await.unwrap_err();
        assert!(matches!(err, FetchError::NetworkFailure(_)));
    }
}
