use crate::models::Prediction;
use serde_json::Value;
use thiserror::Error;

/// Maximum number of ranked predictions surfaced to the caller
pub const MAX_PREDICTIONS: usize = 3;

/// Keys probed, in priority order, for an array of ranked predictions
const RANKED_LIST_KEYS: &[&str] = &[
    "predictions",
    "prediction",
    "top_k",
    "top3",
    "topK",
    "top_predictions",
    "results",
    "predictions_list",
];

/// Keys probed, in priority order, for a single predicted-label value
const SINGLE_LABEL_KEYS: &[&str] = &["Predicted crop", "predictedCrop", "prediction"];

/// Label field names accepted inside ranked-list entries
const ENTRY_LABEL_KEYS: &[&str] = &["crop", "label", "class"];

/// Confidence field names accepted inside ranked-list entries
const ENTRY_CONFIDENCE_KEYS: &[&str] = &["confidence", "score", "probability"];

/// Raised when a response yields no usable prediction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("unable to parse predictions from API response")]
pub struct ParseError;

/// Response formats the prediction service has been observed to return
///
/// The service's response shape is not contractually fixed, so each known
/// format gets its own matcher. Matchers are tried in declaration order and
/// the first success wins.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseShape {
    /// An array of ranked predictions under a well-known key
    RankedList(Vec<Prediction>),
    /// A single predicted label with no score attached
    SingleLabel(String),
    /// A flat mapping from candidate label to numeric score
    ScoreMap(Vec<Prediction>),
}

/// Detect which known shape the response takes, first match wins
pub fn detect_shape(response: &Value) -> Option<ResponseShape> {
    if let Some(ranked) = match_ranked_list(response) {
        return Some(ResponseShape::RankedList(ranked));
    }
    if let Some(label) = match_single_label(response) {
        return Some(ResponseShape::SingleLabel(label));
    }
    if let Some(scored) = match_score_map(response) {
        return Some(ResponseShape::ScoreMap(scored));
    }
    None
}

/// Extract up to [`MAX_PREDICTIONS`] raw predictions from an arbitrary response
///
/// Total over any JSON value: unrecognized shapes produce an empty list
/// rather than an error. Confidence values are passed through as received;
/// [`normalize_predictions`] applies the caller-side contract.
pub fn parse_predictions(response: &Value) -> Vec<Prediction> {
    match detect_shape(response) {
        Some(ResponseShape::RankedList(predictions))
        | Some(ResponseShape::ScoreMap(predictions)) => predictions,
        Some(ResponseShape::SingleLabel(label)) => vec![Prediction::new(label, 1.0)],
        None => Vec::new(),
    }
}

/// Normalize a raw response into a ranked list of at most three predictions
///
/// Percentage-like confidences (> 1) are rescaled and every value is
/// clamped into [0, 1]. An empty parse falls back to the single-label probe
/// before failing with [`ParseError`].
pub fn normalize_predictions(response: &Value) -> Result<Vec<Prediction>, ParseError> {
    let mut predictions: Vec<Prediction> = parse_predictions(response)
        .into_iter()
        .map(|p| Prediction::new(p.label, clamp_confidence(p.confidence)))
        .collect();

    if predictions.is_empty() {
        if let Some(label) = match_single_label(response) {
            predictions.push(Prediction::new(label, 1.0));
        }
    }

    if predictions.is_empty() {
        return Err(ParseError);
    }

    predictions.truncate(MAX_PREDICTIONS);
    Ok(predictions)
}

/// Percentage-like values are rescaled, then everything is clamped to [0, 1]
fn clamp_confidence(raw: f64) -> f64 {
    let scaled = if raw > 1.0 { raw / 100.0 } else { raw };
    scaled.clamp(0.0, 1.0)
}

/// Matcher 1: a non-empty array of ranked entries under a known key
///
/// The first key holding a non-empty array claims the response, even when
/// none of its entries turn out to be usable.
fn match_ranked_list(response: &Value) -> Option<Vec<Prediction>> {
    let object = response.as_object()?;

    for key in RANKED_LIST_KEYS {
        let Some(items) = object.get(*key).and_then(Value::as_array) else {
            continue;
        };
        if items.is_empty() {
            continue;
        }

        let predictions = items
            .iter()
            .filter_map(parse_entry)
            .take(MAX_PREDICTIONS)
            .collect();
        return Some(predictions);
    }

    None
}

/// Matcher 2: a single predicted-label field
fn match_single_label(response: &Value) -> Option<String> {
    let object = response.as_object()?;

    for key in SINGLE_LABEL_KEYS {
        match object.get(*key) {
            Some(Value::String(label)) if !label.is_empty() => return Some(label.clone()),
            Some(Value::Number(label)) => return Some(label.to_string()),
            _ => {}
        }
    }

    None
}

/// Matcher 3: a flat label-to-score mapping
///
/// Last resort: any object with numeric values matches, so unrelated
/// numeric fields can surface as bogus candidates. Kept because some
/// deployments return exactly this shape for the full class distribution.
fn match_score_map(response: &Value) -> Option<Vec<Prediction>> {
    let object = response.as_object()?;

    let mut entries: Vec<Prediction> = object
        .iter()
        .filter_map(|(label, value)| {
            value
                .as_f64()
                .map(|score| Prediction::new(label.clone(), score))
        })
        .collect();

    if entries.is_empty() {
        return None;
    }

    // Stable sort keeps the decoded key order for equal scores
    entries.sort_by(|a, b| {
        b.confidence
            .partial_cmp(&a.confidence)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    entries.truncate(MAX_PREDICTIONS);

    Some(entries)
}

/// Interpret one ranked-list entry, tolerating the element shapes the
/// service has been observed to emit
fn parse_entry(item: &Value) -> Option<Prediction> {
    match item {
        Value::String(label) => Some(Prediction::new(label.clone(), 1.0)),
        Value::Object(fields) => {
            let label = ENTRY_LABEL_KEYS
                .iter()
                .find_map(|key| fields.get(*key).and_then(value_as_label))?;
            let confidence = ENTRY_CONFIDENCE_KEYS
                .iter()
                .find_map(|key| fields.get(*key).and_then(value_as_number))
                .unwrap_or(1.0);
            Some(Prediction::new(label, confidence))
        }
        Value::Array(pair) if pair.len() >= 2 => {
            let label = value_as_label(&pair[0])?;
            let confidence = value_as_number(&pair[1]).unwrap_or(1.0);
            Some(Prediction::new(label, confidence))
        }
        _ => None,
    }
}

fn value_as_label(value: &Value) -> Option<String> {
    match value {
        Value::String(label) if !label.is_empty() => Some(label.clone()),
        Value::Number(label) => Some(label.to_string()),
        _ => None,
    }
}

fn value_as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}
