use crate::models::{DrawResult, RecommendedSet};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when interacting with Appwrite
#[derive(Debug, Error)]
pub enum AppwriteError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Appwrite API client
///
/// Handles all communication with the Appwrite backend including:
/// - Reading and recording official draw results
/// - Persisting and listing recommended number sets
pub struct AppwriteClient {
    base_url: String,
    api_key: String,
    project_id: String,
    database_id: String,
    client: Client,
    collections: AppwriteCollections,
}

/// Collection IDs in Appwrite
#[derive(Debug, Clone)]
pub struct AppwriteCollections {
    pub lotto_draws: String,
    pub recommendations: String,
}

impl AppwriteClient {
    /// Create a new Appwrite client
    pub fn new(
        base_url: String,
        api_key: String,
        project_id: String,
        database_id: String,
        collections: AppwriteCollections,
    ) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url,
            api_key,
            project_id,
            database_id,
            client,
            collections,
        }
    }

    fn documents_url(&self, collection: &str) -> String {
        format!(
            "{}/databases/{}/collections/{}/documents",
            self.base_url.trim_end_matches('/'),
            self.database_id,
            collection
        )
    }

    async fn list_documents(
        &self,
        collection: &str,
        queries: &[String],
    ) -> Result<Vec<Value>, AppwriteError> {
        let mut url = self.documents_url(collection);
        if !queries.is_empty() {
            let queries_json = serde_json::to_string(queries)
                .map_err(|e| AppwriteError::InvalidResponse(e.to_string()))?;
            url = format!("{}?query={}", url, urlencoding::encode(&queries_json));
        }

        tracing::debug!("Listing documents from: {}", url);

        let response = self
            .client
            .get(&url)
            .header("X-Appwrite-Key", &self.api_key)
            .header("X-Appwrite-Project", &self.project_id)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AppwriteError::ApiError(format!(
                "Failed to list documents in {}: {}",
                collection,
                response.status()
            )));
        }

        let json: Value = response.json().await?;

        let documents = json
            .get("documents")
            .and_then(|d| d.as_array())
            .ok_or_else(|| AppwriteError::InvalidResponse("Missing documents array".into()))?;

        Ok(documents.clone())
    }

    /// Fetch every recorded draw result.
    pub async fn list_draws(&self) -> Result<Vec<DrawResult>, AppwriteError> {
        let documents = self
            .list_documents(&self.collections.lotto_draws, &[])
            .await?;

        let draws: Vec<DrawResult> = documents
            .iter()
            .filter_map(|doc| {
                let data = doc.get("data").unwrap_or(doc);
                serde_json::from_value(data.clone()).ok()
            })
            .collect();

        tracing::debug!("Listed {} draw(s)", draws.len());

        Ok(draws)
    }

    /// Fetch the most recent draw result.
    ///
    /// The store offers no ordering on this path, so the maximum draw number
    /// is selected client-side over the listing.
    pub async fn latest_draw(&self) -> Result<DrawResult, AppwriteError> {
        let draws = self.list_draws().await?;

        draws
            .into_iter()
            .max_by_key(|draw| draw.draw_number)
            .ok_or_else(|| AppwriteError::NotFound("No draws recorded yet".into()))
    }

    /// Record an official draw result, keyed by its draw number.
    ///
    /// Draw documents are immutable: re-recording an existing draw number is
    /// rejected by the store's id conflict and surfaces as an API error.
    pub async fn record_draw(&self, draw: &DrawResult) -> Result<(), AppwriteError> {
        let url = self.documents_url(&self.collections.lotto_draws);

        let mut payload = serde_json::to_value(draw)
            .map_err(|e| AppwriteError::InvalidResponse(e.to_string()))?;
        if let Some(obj) = payload.as_object_mut() {
            obj.insert(
                "$id".to_string(),
                Value::String(draw.draw_number.to_string()),
            );
        }

        let response = self
            .client
            .post(&url)
            .header("X-Appwrite-Key", &self.api_key)
            .header("X-Appwrite-Project", &self.project_id)
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AppwriteError::ApiError(format!(
                "Failed to record draw {}: {}",
                draw.draw_number,
                response.status()
            )));
        }

        tracing::debug!("Recorded draw {}", draw.draw_number);

        Ok(())
    }

    /// List the recommended sets stored for one user.
    pub async fn list_recommendations(
        &self,
        user_id: &str,
    ) -> Result<Vec<RecommendedSet>, AppwriteError> {
        let queries = vec![format!("equal(\"userId\", \"{}\")", user_id)];
        let documents = self
            .list_documents(&self.collections.recommendations, &queries)
            .await?;

        let sets = parse_recommendations(&documents);

        tracing::debug!("Listed {} recommendation(s) for user {}", sets.len(), user_id);

        Ok(sets)
    }

    /// List every stored recommended set, for the administrative view.
    pub async fn list_all_recommendations(&self) -> Result<Vec<RecommendedSet>, AppwriteError> {
        let documents = self
            .list_documents(&self.collections.recommendations, &[])
            .await?;

        Ok(parse_recommendations(&documents))
    }

    /// Persist a recommended set and return its document id.
    pub async fn create_recommendation(
        &self,
        set: &RecommendedSet,
    ) -> Result<String, AppwriteError> {
        let url = self.documents_url(&self.collections.recommendations);

        let id = uuid::Uuid::new_v4().to_string();
        let mut payload = serde_json::to_value(set)
            .map_err(|e| AppwriteError::InvalidResponse(e.to_string()))?;
        if let Some(obj) = payload.as_object_mut() {
            obj.insert("$id".to_string(), Value::String(id.clone()));
        }

        let response = self
            .client
            .post(&url)
            .header("X-Appwrite-Key", &self.api_key)
            .header("X-Appwrite-Project", &self.project_id)
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AppwriteError::ApiError(format!(
                "Failed to create recommendation: {}",
                response.status()
            )));
        }

        tracing::debug!("Created recommendation {} for user {}", id, set.user_id);

        Ok(id)
    }

    /// Delete a recommended set after checking it belongs to `user_id`.
    pub async fn delete_recommendation(
        &self,
        id: &str,
        user_id: &str,
    ) -> Result<(), AppwriteError> {
        let doc_url = format!("{}/{}", self.documents_url(&self.collections.recommendations), id);

        let response = self
            .client
            .get(&doc_url)
            .header("X-Appwrite-Key", &self.api_key)
            .header("X-Appwrite-Project", &self.project_id)
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(AppwriteError::NotFound(format!(
                "Recommendation {} not found",
                id
            )));
        }
        if !response.status().is_success() {
            return Err(AppwriteError::ApiError(format!(
                "Failed to fetch recommendation {}: {}",
                id,
                response.status()
            )));
        }

        let json: Value = response.json().await?;
        let data = json.get("data").unwrap_or(&json);
        let owner = data.get("userId").and_then(|v| v.as_str()).unwrap_or("");
        if owner != user_id {
            return Err(AppwriteError::Unauthorized(format!(
                "Recommendation {} does not belong to user {}",
                id, user_id
            )));
        }

        let response = self
            .client
            .delete(&doc_url)
            .header("X-Appwrite-Key", &self.api_key)
            .header("X-Appwrite-Project", &self.project_id)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AppwriteError::ApiError(format!(
                "Failed to delete recommendation {}: {}",
                id,
                response.status()
            )));
        }

        tracing::debug!("Deleted recommendation {} for user {}", id, user_id);

        Ok(())
    }
}

fn parse_recommendations(documents: &[Value]) -> Vec<RecommendedSet> {
    documents
        .iter()
        .filter_map(|doc| {
            // Flatten the Appwrite envelope: the document id lives next to
            // the data fields, which RecommendedSet picks up via `$id`.
            let mut data = doc.get("data").unwrap_or(doc).clone();
            if let (Some(obj), Some(id)) = (data.as_object_mut(), doc.get("$id")) {
                obj.entry("$id".to_string()).or_insert(id.clone());
            }
            serde_json::from_value(data).ok()
        })
        .collect()
}
