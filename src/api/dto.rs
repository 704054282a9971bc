//! Data Transfer Objects
//!
//! Request and response types for the prediction service endpoints.
//! Model-keyed mappings keep the order the backend sent them in, since
//! tables and charts list models in that order.

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// One row of a dataset or history listing (column name -> value)
pub type Record = Map<String, Value>;

// ============================================
// AUTH DTOs
// ============================================

/// Login request body
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Registration request body
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Successful login payload
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginReply {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Successful registration payload
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegisterReply {
    #[serde(default)]
    pub message: Option<String>,
}

// ============================================
// TRAINING DTOs
// ============================================

/// Training request: held-out fraction in 0..=1
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrainRequest {
    pub test_size: f64,
}

impl TrainRequest {
    /// Build from the percentage shown on the test-size slider
    pub fn from_percent(percent: u8) -> Self {
        Self {
            test_size: f64::from(percent) / 100.0,
        }
    }
}

/// Evaluation metrics for one trained model
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Scores {
    pub r2: f64,
    pub mae: f64,
    pub rmse: f64,
}

/// Per-model evaluation results, in backend order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModelResults {
    pub models: Vec<(String, Scores)>,
}

impl ModelResults {
    pub fn names(&self) -> Vec<String> {
        self.models.iter().map(|(name, _)| name.clone()).collect()
    }

    pub fn get(&self, name: &str) -> Option<&Scores> {
        self.models
            .iter()
            .find(|(model, _)| model == name)
            .map(|(_, scores)| scores)
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

impl<'de> Deserialize<'de> for ModelResults {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let map = Map::<String, Value>::deserialize(deserializer)?;
        let mut models = Vec::with_capacity(map.len());
        for (name, value) in map {
            let scores = Scores::deserialize(value)
                .map_err(|e| de::Error::custom(format!("scores for {}: {}", name, e)))?;
            models.push((name, scores));
        }
        Ok(Self { models })
    }
}

/// Successful training payload
#[derive(Debug, Clone, Deserialize)]
pub struct TrainReply {
    pub results: ModelResults,
}

// ============================================
// PREDICTION DTOs
// ============================================

macro_rules! choice_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
        #[cfg_attr(feature = "native", derive(clap::ValueEnum))]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => stringify!($variant)),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $name::ALL
                    .iter()
                    .copied()
                    .find(|choice| choice.as_str().eq_ignore_ascii_case(s))
                    .ok_or_else(|| format!("unknown {}: {}", stringify!($name), s))
            }
        }
    };
}

choice_enum!(
    /// Crop grown on the farm
    Crop { Wheat, Rice, Cotton }
);

choice_enum!(
    /// Irrigation method
    Irrigation { Drip, Manual, Flood }
);

choice_enum!(
    /// Soil composition
    Soil { Loamy, Sandy, Clay }
);

choice_enum!(
    /// Growing season
    Season { Kharif, Rabi, Zaid }
);

/// Prediction form fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionForm {
    /// Farm area (acres)
    pub farm_area: f64,
    /// Fertilizer used (kg)
    pub fertilizer: f64,
    /// Pesticide used (kg)
    pub pesticide: f64,
    /// Water usage (cubic meters)
    pub water: f64,
    pub crop: Crop,
    pub irrigation: Irrigation,
    pub soil: Soil,
    pub season: Season,
}

impl Default for PredictionForm {
    fn default() -> Self {
        Self {
            farm_area: 25.0,
            fertilizer: 250.0,
            pesticide: 25.0,
            water: 5000.0,
            crop: Crop::Wheat,
            irrigation: Irrigation::Drip,
            soil: Soil::Loamy,
            season: Season::Kharif,
        }
    }
}

/// Prediction request: form fields plus the save flag
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictRequest {
    #[serde(flatten)]
    pub form: PredictionForm,
    pub save: bool,
}

/// Per-model predicted yield plus the average across models
#[derive(Debug, Clone, PartialEq)]
pub struct Predictions {
    pub by_model: Vec<(String, f64)>,
    pub average: f64,
}

impl<'de> Deserialize<'de> for Predictions {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let map = Map::<String, Value>::deserialize(deserializer)?;
        let mut by_model = Vec::with_capacity(map.len());
        let mut average = None;

        for (name, value) in map {
            let yield_value = value.as_f64().ok_or_else(|| {
                de::Error::custom(format!("prediction for {} is not a number", name))
            })?;
            if name == "average" {
                average = Some(yield_value);
            } else {
                by_model.push((name, yield_value));
            }
        }

        let average = average.ok_or_else(|| de::Error::missing_field("average"))?;
        Ok(Self { by_model, average })
    }
}

/// Successful prediction payload
#[derive(Debug, Clone, Deserialize)]
pub struct PredictReply {
    pub predictions: Predictions,
}

// ============================================
// CHART DTOs
// ============================================

/// Exploratory chart image references
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EdaCharts {
    pub crop_yield: String,
    pub soil_yield: String,
    pub correlation: String,
}

impl EdaCharts {
    /// (image, alt text) pairs in display order
    pub fn images(&self) -> [(&str, &'static str); 3] {
        [
            (&self.crop_yield, "Crop Yield"),
            (&self.soil_yield, "Soil Yield"),
            (&self.correlation, "Correlation"),
        ]
    }
}

/// Actual-vs-predicted image per model, in backend order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EvaluationCharts {
    pub charts: Vec<(String, String)>,
}

impl<'de> Deserialize<'de> for EvaluationCharts {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let map = Map::<String, Value>::deserialize(deserializer)?;
        let charts = map
            .into_iter()
            .map(|(name, value)| match value {
                Value::String(image) => Ok((name, image)),
                other => Err(de::Error::custom(format!(
                    "chart for {} is not an image reference: {}",
                    name, other
                ))),
            })
            .collect::<Result<Vec<_>, D::Error>>()?;
        Ok(Self { charts })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChartsReply {
    pub charts: EdaCharts,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EvaluationChartsReply {
    pub charts: EvaluationCharts,
}

// ============================================
// LISTING DTOs
// ============================================

#[derive(Debug, Clone, Deserialize)]
pub struct DatasetReply {
    #[serde(default)]
    pub data: Vec<Record>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HistoryReply {
    #[serde(default)]
    pub predictions: Vec<Record>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_predictions_split_average() {
        let value = json!({
            "Linear Regression": 7.25,
            "Random Forest": 7.5,
            "average": 7.375
        });
        let predictions: Predictions = serde_json::from_value(value).unwrap();

        assert_eq!(predictions.average, 7.375);
        assert_eq!(
            predictions.by_model,
            vec![
                ("Linear Regression".to_string(), 7.25),
                ("Random Forest".to_string(), 7.5),
            ]
        );
    }

    #[test]
    fn test_predictions_require_average() {
        let value = json!({ "XGBoost": 6.0 });
        assert!(serde_json::from_value::<Predictions>(value).is_err());
    }

    #[test]
    fn test_model_results_keep_backend_order() {
        let value = json!({
            "XGBoost": { "r2": 0.91, "mae": 0.7, "rmse": 0.9 },
            "CatBoost": { "r2": 0.93, "mae": 0.6, "rmse": 0.8 },
            "Linear Regression": { "r2": 0.88, "mae": 0.8, "rmse": 1.0 }
        });
        let results: ModelResults = serde_json::from_value(value).unwrap();

        assert_eq!(results.names(), vec!["XGBoost", "CatBoost", "Linear Regression"]);
        assert_eq!(results.get("CatBoost").unwrap().r2, 0.93);
        assert!(results.get("LightGBM").is_none());
    }

    #[test]
    fn test_predict_request_flattens_form() {
        let request = PredictRequest {
            form: PredictionForm::default(),
            save: true,
        };
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(value["farm_area"], json!(25.0));
        assert_eq!(value["crop"], json!("Wheat"));
        assert_eq!(value["irrigation"], json!("Drip"));
        assert_eq!(value["season"], json!("Kharif"));
        assert_eq!(value["save"], json!(true));
    }

    #[test]
    fn test_train_request_from_percent() {
        assert_eq!(TrainRequest::from_percent(20).test_size, 0.2);
        assert_eq!(TrainRequest::from_percent(35).test_size, 0.35);
    }

    #[test]
    fn test_choice_parsing() {
        assert_eq!("rice".parse::<Crop>().unwrap(), Crop::Rice);
        assert_eq!("Zaid".parse::<Season>().unwrap(), Season::Zaid);
        assert!("Peat".parse::<Soil>().is_err());
    }

    #[test]
    fn test_evaluation_charts_reject_non_strings() {
        let value = json!({ "XGBoost": 3 });
        assert!(serde_json::from_value::<EvaluationCharts>(value).is_err());
    }
}
