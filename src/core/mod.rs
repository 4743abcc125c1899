// Core normalization and formatting exports
pub mod format;
pub mod normalizer;

pub use format::{buy_link, format_label, market_link, npk_parts, split_disease_label, DiseaseLabel};
pub use normalizer::{
    detect_shape, normalize_predictions, parse_predictions, ParseError, ResponseShape,
    MAX_PREDICTIONS,
};
