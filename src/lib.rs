//! AgriPredict - prediction client for the AgriPredict farming assistant
//!
//! This library provides the client-side core of the assistant: typed
//! clients for the external prediction service (crop recommendation,
//! fertilizer recommendation, plant disease detection), a normalizer that
//! absorbs the service's drifting response shapes, and optional history
//! persistence through Supabase.

pub mod config;
pub mod core;
pub mod models;
pub mod services;

// Re-export commonly used types
pub use core::normalizer::{normalize_predictions, parse_predictions, ParseError, ResponseShape};
pub use models::{
    ConfidenceBand, CropInput, DiseaseResult, FertilizerInput, FertilizerRecommendation,
    Prediction, PredictionModule, PredictionRecord,
};
pub use services::{HistoryClient, PredictionSession, PredictorClient};
