// Service exports
pub mod history;
pub mod predictor;
pub mod session;

pub use history::{HistoryClient, HistoryError, DEFAULT_HISTORY_TABLE};
pub use predictor::{PredictorClient, PredictorError, MAX_IMAGE_BYTES};
pub use session::{PredictionSession, SessionError};
