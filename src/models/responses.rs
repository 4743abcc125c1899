use crate::core::format::npk_parts;
use crate::models::domain::ConfidenceBand;
use serde::{Deserialize, Serialize};

/// Disease detection result
///
/// `confidence` is a percentage in [0, 100], as returned by the detector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiseaseResult {
    pub predicted_class: String,
    pub confidence: f64,
}

impl DiseaseResult {
    pub fn confidence_band(&self) -> ConfidenceBand {
        ConfidenceBand::from_percent(self.confidence)
    }
}

/// Fertilizer recommendation extracted from the service response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FertilizerRecommendation {
    pub name: String,
}

impl FertilizerRecommendation {
    /// N-P-K components when the recommendation is a hyphenated grade
    /// like "10-26-26"
    pub fn npk(&self) -> Option<(String, String, String)> {
        npk_parts(&self.name)
    }
}
