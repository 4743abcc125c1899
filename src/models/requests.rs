use serde::{Deserialize, Serialize};
use validator::Validate;

/// Soil and climate readings for a crop recommendation
///
/// Serialized field names follow the prediction API's payload, with the
/// nutrient levels sent as uppercase `N`/`P`/`K`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CropInput {
    #[validate(range(min = 0.0))]
    #[serde(rename = "N")]
    pub n: f64,
    #[validate(range(min = 0.0))]
    #[serde(rename = "P")]
    pub p: f64,
    #[validate(range(min = 0.0))]
    #[serde(rename = "K")]
    pub k: f64,
    pub temperature: f64,
    #[validate(range(min = 0.0, max = 100.0))]
    pub humidity: f64,
    #[validate(range(min = 0.0, max = 14.0))]
    pub ph: f64,
    #[validate(range(min = 1.0))]
    pub rainfall: f64,
}

impl Default for CropInput {
    fn default() -> Self {
        Self {
            n: 50.0,
            p: 50.0,
            k: 50.0,
            temperature: 25.0,
            humidity: 60.0,
            ph: 6.5,
            rainfall: 100.0,
        }
    }
}

/// Field conditions for a fertilizer recommendation
///
/// Serialized field names follow the prediction API's historical payload,
/// including its `Temparature` spelling and `croptype`/`phosphorous` casing.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct FertilizerInput {
    #[serde(rename = "Temparature")]
    pub temperature: f64,
    #[validate(range(min = 0.0, max = 100.0))]
    #[serde(rename = "Humidity")]
    pub humidity: f64,
    #[validate(range(min = 0.0, max = 100.0))]
    #[serde(rename = "Moisture")]
    pub moisture: f64,
    #[validate(length(min = 1))]
    #[serde(rename = "soilType")]
    pub soil_type: String,
    #[validate(length(min = 1))]
    #[serde(rename = "croptype")]
    pub crop_type: String,
    #[validate(range(min = 0.0))]
    pub nitrogen: f64,
    #[validate(range(min = 0.0))]
    #[serde(rename = "phosphorous")]
    pub phosphorus: f64,
    #[validate(range(min = 0.0))]
    pub potassium: f64,
}

impl Default for FertilizerInput {
    fn default() -> Self {
        Self {
            temperature: 25.0,
            humidity: 60.0,
            moisture: 50.0,
            soil_type: String::new(),
            crop_type: String::new(),
            nitrogen: 50.0,
            phosphorus: 50.0,
            potassium: 50.0,
        }
    }
}
