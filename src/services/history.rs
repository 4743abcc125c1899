use crate::models::{NewPredictionRecord, PredictionRecord};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Default table holding prediction history rows
pub const DEFAULT_HISTORY_TABLE: &str = "prediction_history";

/// Errors that can occur when interacting with the history backend
#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Supabase history client
///
/// Persists prediction history through the hosted PostgREST API:
/// - Inserting one row per completed prediction
/// - Fetching a user's rows, newest first
pub struct HistoryClient {
    base_url: String,
    anon_key: String,
    table: String,
    client: Client,
}

impl HistoryClient {
    /// Create a new history client
    pub fn new(base_url: String, anon_key: String, table: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url,
            anon_key,
            table,
            client,
        }
    }

    /// Insert one prediction into the history table
    pub async fn save_prediction(&self, record: &NewPredictionRecord) -> Result<(), HistoryError> {
        let url = self.table_url();

        tracing::debug!(
            "Saving {} prediction for user {}",
            record.module.as_str(),
            record.user_id
        );

        let response = self
            .client
            .post(&url)
            .header("apikey", &self.anon_key)
            .header("Authorization", format!("Bearer {}", self.anon_key))
            .header("Prefer", "return=minimal")
            .json(record)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(HistoryError::ApiError(format!(
                "Failed to save prediction: {}",
                response.status()
            )));
        }

        Ok(())
    }

    /// Fetch a user's prediction history, newest first
    pub async fn fetch_history(&self, user_id: &str) -> Result<Vec<PredictionRecord>, HistoryError> {
        let url = format!(
            "{}?select=*&user_id=eq.{}&order=created_at.desc",
            self.table_url(),
            urlencoding::encode(user_id)
        );

        tracing::debug!("Fetching history from: {}", url);

        let response = self
            .client
            .get(&url)
            .header("apikey", &self.anon_key)
            .header("Authorization", format!("Bearer {}", self.anon_key))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(HistoryError::ApiError(format!(
                "Failed to fetch history: {}",
                response.status()
            )));
        }

        let json: Value = response.json().await?;

        let records: Vec<PredictionRecord> = serde_json::from_value(json)
            .map_err(|e| HistoryError::InvalidResponse(format!("Failed to parse history rows: {}", e)))?;

        tracing::debug!("Fetched {} history rows for user {}", records.len(), user_id);

        Ok(records)
    }

    fn table_url(&self) -> String {
        format!(
            "{}/rest/v1/{}",
            self.base_url.trim_end_matches('/'),
            self.table
        )
    }
}
