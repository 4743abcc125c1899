use serde::{Deserialize, Serialize};

/// A ranked prediction with a normalized confidence score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub label: String,
    pub confidence: f64,
}

impl Prediction {
    pub fn new(label: impl Into<String>, confidence: f64) -> Self {
        Self {
            label: label.into(),
            confidence,
        }
    }
}

/// Which prediction flow produced a history entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PredictionModule {
    Crop,
    Fertilizer,
    Disease,
    Other,
}

impl PredictionModule {
    /// Stable name used in log lines and history rows
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Crop => "crop",
            Self::Fertilizer => "fertilizer",
            Self::Disease => "disease",
            Self::Other => "other",
        }
    }
}

/// Qualitative bucket for a percentage confidence score
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfidenceBand {
    High,
    Moderate,
    Low,
}

impl ConfidenceBand {
    /// Bucket a percentage confidence (0-100)
    pub fn from_percent(confidence: f64) -> Self {
        if confidence >= 80.0 {
            Self::High
        } else if confidence >= 60.0 {
            Self::Moderate
        } else {
            Self::Low
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::High => "High Confidence",
            Self::Moderate => "Moderate Confidence",
            Self::Low => "Low Confidence",
        }
    }
}

/// Stored prediction history row, as returned by the hosted backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionRecord {
    pub id: uuid::Uuid,
    pub user_id: String,
    pub module: PredictionModule,
    pub input: serde_json::Value,
    pub output: serde_json::Value,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Insert payload for a new history row
///
/// `id` and `created_at` are assigned by the backend.
#[derive(Debug, Clone, Serialize)]
pub struct NewPredictionRecord {
    pub user_id: String,
    pub module: PredictionModule,
    pub input: serde_json::Value,
    pub output: serde_json::Value,
}
