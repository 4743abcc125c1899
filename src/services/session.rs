use crate::models::{
    CropInput, DiseaseResult, FertilizerInput, FertilizerRecommendation, NewPredictionRecord,
    Prediction, PredictionModule,
};
use crate::services::history::HistoryClient;
use crate::services::predictor::{PredictorClient, PredictorError};
use serde_json::json;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use thiserror::Error;
use validator::Validate;

/// Errors surfaced by a prediction session
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("another prediction is already in flight")]
    Busy,

    #[error("validation failed: {0}")]
    Invalid(#[from] validator::ValidationErrors),

    #[error(transparent)]
    Predictor(#[from] PredictorError),
}

/// One user's prediction workflow
///
/// Validates input, runs a single prediction at a time, and records the
/// outcome to the history backend when one is attached. Persistence is
/// best-effort: a failed save is logged and the prediction still returned.
pub struct PredictionSession {
    predictor: Arc<PredictorClient>,
    history: Option<Arc<HistoryClient>>,
    user_id: Option<String>,
    busy: AtomicBool,
}

impl PredictionSession {
    pub fn new(predictor: Arc<PredictorClient>) -> Self {
        Self {
            predictor,
            history: None,
            user_id: None,
            busy: AtomicBool::new(false),
        }
    }

    /// Attach a history backend and the user the session belongs to
    pub fn with_history(mut self, history: Arc<HistoryClient>, user_id: impl Into<String>) -> Self {
        self.history = Some(history);
        self.user_id = Some(user_id.into());
        self
    }

    /// Whether a prediction request is currently in flight
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Run the crop recommendation flow
    pub async fn recommend_crop(
        &self,
        input: &CropInput,
    ) -> Result<Vec<Prediction>, SessionError> {
        input.validate()?;
        let _guard = self.acquire()?;

        let predictions = self.predictor.predict_crop(input).await?;

        self.record(
            PredictionModule::Crop,
            json!(input),
            json!({ "predictions": &predictions }),
        )
        .await;

        Ok(predictions)
    }

    /// Run the fertilizer recommendation flow
    pub async fn recommend_fertilizer(
        &self,
        input: &FertilizerInput,
    ) -> Result<FertilizerRecommendation, SessionError> {
        input.validate()?;
        let _guard = self.acquire()?;

        let recommendation = self.predictor.predict_fertilizer(input).await?;

        self.record(
            PredictionModule::Fertilizer,
            json!(input),
            json!({ "Predicted fertilizer": &recommendation.name }),
        )
        .await;

        Ok(recommendation)
    }

    /// Run the disease detection flow on an uploaded image
    pub async fn diagnose_disease(
        &self,
        image: Vec<u8>,
        filename: &str,
    ) -> Result<DiseaseResult, SessionError> {
        let size_bytes = image.len();
        let _guard = self.acquire()?;

        let result = self.predictor.detect_disease(image, filename).await?;

        self.record(
            PredictionModule::Disease,
            json!({ "filename": filename, "size_bytes": size_bytes }),
            json!(&result),
        )
        .await;

        Ok(result)
    }

    /// Flip the busy flag for the duration of one request
    fn acquire(&self) -> Result<BusyGuard<'_>, SessionError> {
        if self.busy.swap(true, Ordering::AcqRel) {
            return Err(SessionError::Busy);
        }
        Ok(BusyGuard { flag: &self.busy })
    }

    /// Best-effort history write; failures are logged, never propagated
    async fn record(
        &self,
        module: PredictionModule,
        input: serde_json::Value,
        output: serde_json::Value,
    ) {
        let (Some(history), Some(user_id)) = (&self.history, &self.user_id) else {
            return;
        };

        let record = NewPredictionRecord {
            user_id: user_id.clone(),
            module,
            input,
            output,
        };

        if let Err(e) = history.save_prediction(&record).await {
            tracing::warn!(
                "Failed to save {} prediction for user {}: {}",
                module.as_str(),
                user_id,
                e
            );
        }
    }
}

struct BusyGuard<'a> {
    flag: &'a AtomicBool,
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> PredictionSession {
        let predictor = Arc::new(PredictorClient::new("http://localhost:8000".to_string(), 5));
        PredictionSession::new(predictor)
    }

    #[test]
    fn test_busy_flag_blocks_second_acquire() {
        let session = session();

        let guard = session.acquire();
        assert!(guard.is_ok());
        assert!(session.is_busy());

        assert!(matches!(session.acquire(), Err(SessionError::Busy)));
    }

    #[test]
    fn test_busy_flag_released_on_drop() {
        let session = session();

        {
            let _guard = session.acquire().unwrap();
            assert!(session.is_busy());
        }

        assert!(!session.is_busy());
        assert!(session.acquire().is_ok());
    }

    #[tokio::test]
    async fn test_invalid_input_rejected_before_request() {
        let session = session();
        let input = CropInput {
            ph: 20.0,
            ..CropInput::default()
        };

        // Fails on validation, not on the unreachable endpoint
        let result = session.recommend_crop(&input).await;
        assert!(matches!(result, Err(SessionError::Invalid(_))));
        assert!(!session.is_busy());
    }
}
