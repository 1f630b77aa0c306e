use crate::models::{HitTally, ModelType, PrizeTable};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when calling the number generator
#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("generator returned error: {0}")]
    ApiError(String),

    #[error("invalid response format: {0}")]
    InvalidResponse(String),
}

/// One generated set as returned by the generator endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedSet {
    pub numbers: Vec<u8>,
    #[serde(default)]
    pub historical_hit_rates: HitTally,
}

/// Winning numbers of the latest draw as the generator reports them,
/// without a draw number (the number travels separately in the envelope).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LatestDrawDetails {
    pub winning_numbers: Vec<u8>,
    pub bonus_number: u8,
    #[serde(default)]
    pub prizes: PrizeTable,
}

/// Response envelope of the generator endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorResponse {
    pub lotto_numbers: Vec<GeneratedSet>,
    #[serde(default)]
    pub latest_draw_number: Option<u32>,
    #[serde(default)]
    pub latest_draw_details: Option<LatestDrawDetails>,
}

/// Client for the remote number-generation function.
///
/// The generation algorithm is opaque to this service; we only speak its
/// query-parameter protocol and parse the JSON envelope.
pub struct GeneratorClient {
    endpoint: String,
    client: Client,
}

impl GeneratorClient {
    /// Create a new generator client
    pub fn new(endpoint: String, timeout_secs: u64) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self { endpoint, client }
    }

    /// Request `num_sets` recommended sets from the given model.
    pub async fn generate(
        &self,
        model_type: ModelType,
        num_sets: u8,
    ) -> Result<GeneratorResponse, GeneratorError> {
        let url = format!(
            "{}?model_type={}&num_sets={}",
            self.endpoint.trim_end_matches('/'),
            model_type.as_query_param(),
            num_sets
        );

        tracing::debug!("Requesting {} set(s) from generator: {}", num_sets, url);

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read body".to_string());
            return Err(GeneratorError::ApiError(format!("{} - {}", status, body)));
        }

        let envelope: GeneratorResponse = response
            .json()
            .await
            .map_err(|e| GeneratorError::InvalidResponse(e.to_string()))?;

        if envelope.lotto_numbers.is_empty() {
            return Err(GeneratorError::InvalidResponse(
                "generator returned no number sets".into(),
            ));
        }

        tracing::debug!(
            "Generator returned {} set(s), latest draw: {:?}",
            envelope.lotto_numbers.len(),
            envelope.latest_draw_number
        );

        Ok(envelope)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_generate_parses_envelope() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/get-lotto-numbers")
            .match_query(mockito::Matcher::AllOf(vec![
                mockito::Matcher::UrlEncoded("model_type".into(), "statistical".into()),
                mockito::Matcher::UrlEncoded("num_sets".into(), "2".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{
                    "lotto_numbers": [
                        {"numbers": [3, 8, 14, 22, 31, 42], "historical_hit_rates": {"5th": 2}},
                        {"numbers": [1, 9, 17, 25, 33, 45]}
                    ],
                    "latest_draw_number": 1175
                }"#,
            )
            .create_async()
            .await;

        let client = GeneratorClient::new(format!("{}/get-lotto-numbers", server.url()), 5);
        let envelope = client.generate(ModelType::Statistical, 2).await.unwrap();

        mock.assert_async().await;
        assert_eq!(envelope.lotto_numbers.len(), 2);
        assert_eq!(envelope.latest_draw_number, Some(1175));
        assert_eq!(envelope.lotto_numbers[0].numbers, vec![3, 8, 14, 22, 31, 42]);
        assert!(envelope.lotto_numbers[1].historical_hit_rates.is_empty());
    }

    #[tokio::test]
    async fn test_generate_surfaces_api_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", mockito::Matcher::Any)
            .with_status(500)
            .with_body(r#"{"error": "lotto.csv not found"}"#)
            .create_async()
            .await;

        let client = GeneratorClient::new(server.url(), 5);
        let err = client.generate(ModelType::Ml, 1).await.unwrap_err();
        assert!(matches!(err, GeneratorError::ApiError(_)));
    }

    #[tokio::test]
    async fn test_generate_rejects_empty_set_list() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", mockito::Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"lotto_numbers": []}"#)
            .create_async()
            .await;

        let client = GeneratorClient::new(server.url(), 5);
        let err = client.generate(ModelType::Statistical, 1).await.unwrap_err();
        assert!(matches!(err, GeneratorError::InvalidResponse(_)));
    }
}
