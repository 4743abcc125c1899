pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    ConfidenceBand, NewPredictionRecord, Prediction, PredictionModule, PredictionRecord,
};
pub use requests::{CropInput, FertilizerInput};
pub use responses::{DiseaseResult, FertilizerRecommendation};
