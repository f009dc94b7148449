mod types;

pub use types::{CheckInHistoryPayload, RetryConfig, StreakProfilePayload};

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use log::{debug, info, warn};
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tokio::time::sleep;
use url::Url;

use crate::config::TimeoutConfig;
use fitstreak_domain::shared::{DomainError, UserId};
use fitstreak_domain::streak::{StreakProfileSource, UserStreakProfile};
use types::USER_AGENT;

/// REST client for the platform's streak endpoints
pub struct HttpStreakProfileClient {
    client: Client,
    base_url: Url,
    api_token: Option<String>,
    retry_config: RetryConfig,
}

impl HttpStreakProfileClient {
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_retry_config(base_url, RetryConfig::default())
    }

    pub fn with_retry_config(base_url: &str, retry_config: RetryConfig) -> Result<Self> {
        let mut base_url =
            Url::parse(base_url).with_context(|| format!("Invalid base URL: {}", base_url))?;
        // join() replaces the last segment unless the path ends with '/'
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(TimeoutConfig::global().http_request)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url,
            api_token: None,
            retry_config,
        })
    }

    pub fn with_api_token(mut self, token: impl Into<String>) -> Self {
        self.api_token = Some(token.into());
        self
    }

    pub fn endpoint(&self, user_id: UserId, resource: &str) -> Result<Url, DomainError> {
        self.base_url
            .join(&format!("users/{}/{}", user_id, resource))
            .map_err(|e| DomainError::InvalidInput(format!("Invalid endpoint: {}", e)))
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn get_json<T>(&self, operation_name: &str, url: Url) -> Result<T, DomainError>
    where
        T: serde::de::DeserializeOwned,
    {
        self.execute_with_retry(operation_name, move || {
            let request = self.authorize(self.client.get(url.clone()));

            async move {
                let response = request.send().await?.error_for_status()?;
                let payload = response.json::<T>().await?;
                Ok::<T, anyhow::Error>(payload)
            }
        })
        .await
        .map_err(|e| to_domain_error(operation_name, e))
    }

    /// Execute a request with retry logic
    ///
    /// Retries on connection failures, timeouts, 5xx and 429. Other 4xx and
    /// decoding failures are returned immediately.
    async fn execute_with_retry<F, Fut, T>(
        &self,
        operation_name: &str,
        mut request_fn: F,
    ) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: std::future::Future<Output = Result<T>>,
    {
        let mut attempt = 0;
        let mut backoff_ms = self.retry_config.initial_backoff_ms;

        loop {
            attempt += 1;

            match request_fn().await {
                Ok(response) => {
                    if attempt > 1 {
                        debug!(
                            "[profile] {} succeeded after {} attempts",
                            operation_name, attempt
                        );
                    }
                    return Ok(response);
                }
                Err(e) => {
                    let should_retry =
                        attempt <= self.retry_config.max_retries && is_retryable_error(&e);

                    if !should_retry {
                        return Err(e);
                    }

                    warn!(
                        "[profile] {} failed (attempt {}/{}): {}. Retrying in {}ms",
                        operation_name,
                        attempt,
                        self.retry_config.max_retries + 1,
                        e,
                        backoff_ms
                    );
                    sleep(Duration::from_millis(backoff_ms)).await;

                    backoff_ms = ((backoff_ms as f64 * self.retry_config.backoff_multiplier)
                        as u64)
                        .min(self.retry_config.max_backoff_ms);
                }
            }
        }
    }
}

#[async_trait]
impl StreakProfileSource for HttpStreakProfileClient {
    async fn fetch_profile(&self, user_id: UserId) -> Result<UserStreakProfile, DomainError> {
        let url = self.endpoint(user_id, "streak")?;
        let payload: StreakProfilePayload = self.get_json("fetch_profile", url).await?;
        let profile = payload.into_profile(user_id)?;

        info!(
            "[profile] fetched user_id={} current_streak={} last={:?}",
            user_id, profile.current_streak, profile.last_check_in_date
        );
        Ok(profile)
    }

    async fn fetch_check_in_history(
        &self,
        user_id: UserId,
    ) -> Result<Vec<NaiveDate>, DomainError> {
        let url = self.endpoint(user_id, "check-ins")?;
        let payload: CheckInHistoryPayload = self.get_json("fetch_check_in_history", url).await?;
        let dates = payload.into_dates()?;

        info!(
            "[profile] fetched history user_id={} dates={}",
            user_id,
            dates.len()
        );
        Ok(dates)
    }

    async fn submit_check_in(&self, user_id: UserId) -> Result<(), DomainError> {
        let url = self.endpoint(user_id, "check-in")?;

        self.execute_with_retry("submit_check_in", move || {
            let request = self.authorize(self.client.post(url.clone()));

            async move {
                request.send().await?.error_for_status()?;
                Ok::<(), anyhow::Error>(())
            }
        })
        .await
        .map_err(|e| to_domain_error("submit_check_in", e))?;

        info!("[profile] submitted check-in user_id={}", user_id);
        Ok(())
    }
}

fn is_retryable_error(error: &anyhow::Error) -> bool {
    if let Some(reqwest_err) = error.downcast_ref::<reqwest::Error>() {
        if reqwest_err.is_connect() || reqwest_err.is_timeout() {
            return true;
        }

        if let Some(status) = reqwest_err.status() {
            return status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS;
        }
    }

    false
}

fn to_domain_error(operation_name: &str, error: anyhow::Error) -> DomainError {
    let status = error
        .downcast_ref::<reqwest::Error>()
        .and_then(|e| e.status());

    match status {
        Some(StatusCode::NOT_FOUND) => {
            DomainError::NotFound(format!("{}: remote resource not found", operation_name))
        }
        _ => DomainError::ExternalService(format!("{}: {:#}", operation_name, error)),
    }
}
