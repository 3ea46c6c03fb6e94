//! The MindBridge server seam.

use std::time::Duration;

use async_trait::async_trait;
use mindbridge_shared::constants::{CHAT_ENDPOINT, CHECKIN_ENDPOINT, SPEAK_ENDPOINT};
use mindbridge_shared::protocol::{
    ChatRequest, ChatResponse, CheckinRequest, CheckinResponse, SpeakRequest, SpeakResponse,
};
use serde::de::DeserializeOwned;

use crate::error::{ClientError, Result};

/// Remote operations the client depends on.
#[async_trait]
pub trait WellnessBackend: Send + Sync {
    async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse>;

    async fn checkin(&self, request: &CheckinRequest) -> Result<CheckinResponse>;

    async fn speak(&self, request: &SpeakRequest) -> Result<SpeakResponse>;
}

/// [`WellnessBackend`] over HTTP.
pub struct HttpBackend {
    client: reqwest::Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }
}

async fn decode<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T> {
    let status = resp.status();
    if !status.is_success() {
        return Err(ClientError::Status(status));
    }
    Ok(resp.json().await?)
}

#[async_trait]
impl WellnessBackend for HttpBackend {
    async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse> {
        tracing::debug!(language = %request.language, "POST {}", CHAT_ENDPOINT);
        let resp = self
            .client
            .post(self.url(CHAT_ENDPOINT))
            .json(request)
            .send()
            .await?;
        decode(resp).await
    }

    async fn checkin(&self, request: &CheckinRequest) -> Result<CheckinResponse> {
        tracing::debug!(mood = %request.mood, "POST {}", CHECKIN_ENDPOINT);
        let resp = self
            .client
            .post(self.url(CHECKIN_ENDPOINT))
            .form(request)
            .send()
            .await?;
        decode(resp).await
    }

    async fn speak(&self, request: &SpeakRequest) -> Result<SpeakResponse> {
        let resp = self
            .client
            .post(self.url(SPEAK_ENDPOINT))
            .json(request)
            .send()
            .await?;
        decode(resp).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joins_without_double_slash() {
        let backend = HttpBackend::new("http://localhost:5000/", Duration::from_secs(1)).unwrap();
        assert_eq!(backend.url(CHAT_ENDPOINT), "http://localhost:5000/session");
        assert_eq!(backend.url(SPEAK_ENDPOINT), "http://localhost:5000/api/speak");
    }
}
