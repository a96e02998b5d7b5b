use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::models::{
    AdStyle, EmailContext, Lead, MatchResult, Property, ValuationInput, ValuationResult,
};
use crate::services::driver::{AiDriver, EngineError};

/// HTTP-backed engine driver.
///
/// Every operation is a JSON POST to the remote engine. Failures are not
/// retried; a non-success status surfaces as a generic "operation failed"
/// error and the caller decides whether to re-trigger the action.
pub struct RemoteDriver {
    base_url: String,
    api_key: Option<String>,
    client: Client,
}

impl RemoteDriver {
    pub fn new(base_url: String, api_key: Option<String>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url,
            api_key,
            client,
        }
    }

    async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, EngineError>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        let url = format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        );

        tracing::debug!("POST {}", url);

        let mut request = self.client.post(&url).json(body);
        if let Some(key) = &self.api_key {
            request = request.header("X-Api-Key", key);
        }

        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(EngineError::OperationFailed(format!(
                "remote engine returned {}",
                status
            )));
        }

        response
            .json()
            .await
            .map_err(|e| EngineError::InvalidResponse(e.to_string()))
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MatchBody<'a> {
    lead: &'a Lead,
    properties: &'a [Property],
}

#[derive(Deserialize)]
struct MatchReply {
    results: Vec<MatchResult>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AdBody<'a> {
    property: &'a Property,
    style: AdStyle,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ReelBody<'a> {
    property: &'a Property,
    duration_seconds: u16,
}

#[derive(Deserialize)]
struct TextReply {
    text: String,
}

#[async_trait]
impl AiDriver for RemoteDriver {
    async fn match_lead(
        &self,
        lead: &Lead,
        properties: &[Property],
    ) -> Result<Vec<MatchResult>, EngineError> {
        let reply: MatchReply = self.post("v1/match", &MatchBody { lead, properties }).await?;
        Ok(reply.results)
    }

    async fn estimate_price(&self, input: &ValuationInput) -> Result<ValuationResult, EngineError> {
        self.post("v1/valuation", input).await
    }

    async fn write_ad(&self, property: &Property, style: AdStyle) -> Result<String, EngineError> {
        let reply: TextReply = self.post("v1/copy/ad", &AdBody { property, style }).await?;
        Ok(reply.text)
    }

    async fn write_email(&self, context: &EmailContext) -> Result<String, EngineError> {
        let reply: TextReply = self.post("v1/copy/email", context).await?;
        Ok(reply.text)
    }

    async fn write_reel_script(
        &self,
        property: &Property,
        duration_secs: u16,
    ) -> Result<String, EngineError> {
        let reply: TextReply = self
            .post(
                "v1/copy/reel",
                &ReelBody {
                    property,
                    duration_seconds: duration_secs,
                },
            )
            .await?;
        Ok(reply.text)
    }
}
