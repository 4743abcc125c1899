use crate::core::normalizer::{self, ParseError};
use crate::models::{CropInput, DiseaseResult, FertilizerInput, FertilizerRecommendation, Prediction};
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde_json::Value;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Largest accepted plant image upload, in bytes (10 MiB)
pub const MAX_IMAGE_BYTES: usize = 10 * 1024 * 1024;

/// File extensions accepted for disease detection uploads
const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp", "bmp", "gif"];

/// Keys probed, in priority order, for the recommended fertilizer name
const FERTILIZER_KEYS: &[&str] = &["Predicted fertilizer", "predictedFertilizer", "prediction"];

/// Errors that can occur when calling the prediction service
#[derive(Debug, Error)]
pub enum PredictorError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("Missing field in response: {0}")]
    MissingField(String),

    #[error("Invalid image: {0}")]
    InvalidImage(String),
}

/// Prediction service client
///
/// Handles all communication with the external prediction service:
/// - Crop recommendation from soil and climate readings
/// - Fertilizer recommendation from field conditions
/// - Plant disease detection from leaf images
///
/// Each call issues exactly one request; there is no retry and no
/// client-side caching.
pub struct PredictorClient {
    base_url: String,
    client: Client,
}

impl PredictorClient {
    /// Create a new prediction client
    pub fn new(base_url: String, timeout_secs: u64) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self { base_url, client }
    }

    /// Request a ranked crop recommendation for the given readings
    ///
    /// The response body is run through the shape-sniffing normalizer, so
    /// any of the service's historical response formats yields the same
    /// ranked list of at most three predictions.
    pub async fn predict_crop(&self, input: &CropInput) -> Result<Vec<Prediction>, PredictorError> {
        let url = self.endpoint("predict/crop");

        tracing::debug!("Requesting crop recommendation from: {}", url);

        let response = self.client.post(&url).json(input).send().await?;

        if !response.status().is_success() {
            return Err(PredictorError::ApiError(format!(
                "Crop prediction failed: {}",
                response.status()
            )));
        }

        let json: Value = response.json().await?;
        let predictions = normalizer::normalize_predictions(&json)?;

        tracing::debug!("Parsed {} crop predictions", predictions.len());

        Ok(predictions)
    }

    /// Request a fertilizer recommendation for the given field conditions
    pub async fn predict_fertilizer(
        &self,
        input: &FertilizerInput,
    ) -> Result<FertilizerRecommendation, PredictorError> {
        let url = self.endpoint("predict/fertilizer");

        tracing::debug!("Requesting fertilizer recommendation from: {}", url);

        let response = self.client.post(&url).json(input).send().await?;

        if !response.status().is_success() {
            return Err(PredictorError::ApiError(format!(
                "Fertilizer prediction failed: {}",
                response.status()
            )));
        }

        let json: Value = response.json().await?;
        let name = extract_fertilizer_name(&json).ok_or_else(|| {
            PredictorError::MissingField("Predicted fertilizer".to_string())
        })?;

        Ok(FertilizerRecommendation { name })
    }

    /// Upload a plant image for disease detection
    ///
    /// The image is validated before any bytes go on the wire; the service
    /// replies with the detected class and a percentage confidence.
    pub async fn detect_disease(
        &self,
        image: Vec<u8>,
        filename: &str,
    ) -> Result<DiseaseResult, PredictorError> {
        validate_image(filename, image.len())?;

        let url = self.endpoint("predict/disease");

        tracing::debug!("Uploading {} ({} bytes) to: {}", filename, image.len(), url);

        let part = Part::bytes(image).file_name(filename.to_string());
        let form = Form::new().part("file", part);

        let response = self.client.post(&url).multipart(form).send().await?;

        if !response.status().is_success() {
            return Err(PredictorError::ApiError(format!(
                "Disease detection failed: {}",
                response.status()
            )));
        }

        let result: DiseaseResult = response.json().await?;

        tracing::debug!(
            "Detected {} at {:.1}% confidence",
            result.predicted_class,
            result.confidence
        );

        Ok(result)
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }
}

/// Probe the known fertilizer-name keys, tolerating the same label drift as
/// the crop endpoint
fn extract_fertilizer_name(response: &Value) -> Option<String> {
    let object = response.as_object()?;

    for key in FERTILIZER_KEYS {
        match object.get(*key) {
            Some(Value::String(name)) if !name.is_empty() => return Some(name.clone()),
            _ => {}
        }
    }

    None
}

/// Reject uploads the service would not accept before spending a request
fn validate_image(filename: &str, size: usize) -> Result<(), PredictorError> {
    if size == 0 {
        return Err(PredictorError::InvalidImage("empty file".to_string()));
    }

    if size > MAX_IMAGE_BYTES {
        return Err(PredictorError::InvalidImage(format!(
            "file is {} bytes, limit is {}",
            size, MAX_IMAGE_BYTES
        )));
    }

    let extension = Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some(ext) if IMAGE_EXTENSIONS.contains(&ext) => Ok(()),
        _ => Err(PredictorError::InvalidImage(format!(
            "unsupported file type: {}",
            filename
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_client_creation() {
        let client = PredictorClient::new("http://localhost:8000".to_string(), 30);
        assert_eq!(client.base_url, "http://localhost:8000");
    }

    #[test]
    fn test_endpoint_joins_cleanly() {
        let client = PredictorClient::new("http://localhost:8000/".to_string(), 30);
        assert_eq!(
            client.endpoint("predict/crop"),
            "http://localhost:8000/predict/crop"
        );
    }

    #[test]
    fn test_extract_fertilizer_name_aliases() {
        assert_eq!(
            extract_fertilizer_name(&json!({"Predicted fertilizer": "Urea"})),
            Some("Urea".to_string())
        );
        assert_eq!(
            extract_fertilizer_name(&json!({"predictedFertilizer": "DAP"})),
            Some("DAP".to_string())
        );
        assert_eq!(
            extract_fertilizer_name(&json!({"prediction": "14-35-14"})),
            Some("14-35-14".to_string())
        );
        assert_eq!(extract_fertilizer_name(&json!({"status": "ok"})), None);
    }

    #[test]
    fn test_validate_image_accepts_common_types() {
        assert!(validate_image("leaf.jpg", 1024).is_ok());
        assert!(validate_image("leaf.PNG", 1024).is_ok());
        assert!(validate_image("field photo.jpeg", 1024).is_ok());
    }

    #[test]
    fn test_validate_image_rejects_bad_uploads() {
        assert!(validate_image("notes.txt", 1024).is_err());
        assert!(validate_image("no_extension", 1024).is_err());
        assert!(validate_image("leaf.jpg", 0).is_err());
        assert!(validate_image("leaf.jpg", MAX_IMAGE_BYTES + 1).is_err());
    }
}
