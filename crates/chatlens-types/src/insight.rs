use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use uuid::Uuid;

use crate::domain::{Model, Project};

/// Insight payload variants
///
/// Wire format: a JSON object with a `type` discriminator and variant fields
/// inline, optionally wrapped in a fenced code block within chat text. The
/// discriminator set is closed: an unknown `type` fails deserialization so
/// the extraction layer can discard the candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
#[serde(rename_all = "snake_case")]
pub enum InsightData {
    /// Per-feature importance ranking for one model
    FeatureImpact(FeatureImpactPayload),

    /// Named validation metrics for one model
    ModelMetrics(ModelMetricsPayload),

    /// Project inventory listing
    ProjectList(ProjectListPayload),

    /// Leaderboard slice comparing models under one metric
    ModelComparison(ModelComparisonPayload),

    /// ROC curve points plus area under curve
    RocCurve(RocCurvePayload),

    /// Lift chart bins (actual vs. predicted per decile)
    LiftChart(LiftChartPayload),

    /// Partial-dependence style effect of a single feature
    FeatureEffects(FeatureEffectsPayload),

    /// Row-level explanation of one prediction
    PredictionExplanation(PredictionExplanationPayload),

    /// Class confusion counts for a classifier
    ConfusionMatrix(ConfusionMatrixPayload),

    /// Residual scatter for a regressor
    Residuals(ResidualsPayload),

    /// Forecast horizon with actuals where known
    TimeSeriesForecast(TimeSeriesForecastPayload),
}

impl InsightData {
    /// Stable discriminator label, identical to the wire `type` value
    pub fn kind(&self) -> &'static str {
        match self {
            InsightData::FeatureImpact(_) => "feature_impact",
            InsightData::ModelMetrics(_) => "model_metrics",
            InsightData::ProjectList(_) => "project_list",
            InsightData::ModelComparison(_) => "model_comparison",
            InsightData::RocCurve(_) => "roc_curve",
            InsightData::LiftChart(_) => "lift_chart",
            InsightData::FeatureEffects(_) => "feature_effects",
            InsightData::PredictionExplanation(_) => "prediction_explanation",
            InsightData::ConfusionMatrix(_) => "confusion_matrix",
            InsightData::Residuals(_) => "residuals",
            InsightData::TimeSeriesForecast(_) => "time_series_forecast",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureImpactPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_id: Option<String>,
    pub features: Vec<FeatureImpactRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureImpactRow {
    pub feature_name: String,
    /// Impact scaled so the top feature is 1.0
    pub impact_normalized: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub impact_unnormalized: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelMetricsPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_name: Option<String>,
    /// Metric name to value (e.g. "AUC" -> 0.87)
    pub metrics: BTreeMap<String, f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectListPayload {
    pub projects: Vec<Project>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelComparisonPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metric: Option<String>,
    pub models: Vec<Model>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RocCurvePayload {
    pub auc: f64,
    pub data: Vec<RocPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RocPoint {
    pub threshold: f64,
    pub fpr: f64,
    pub tpr: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiftChartPayload {
    pub bins: Vec<LiftBin>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiftBin {
    pub actual: f64,
    pub predicted: f64,
    pub bin_weight: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureEffectsPayload {
    pub feature_name: String,
    pub data: Vec<EffectPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EffectPoint {
    /// Feature value or bin label on the x axis
    pub label: String,
    pub dependence: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionExplanationPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prediction: Option<f64>,
    pub explanations: Vec<Explanation>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Explanation {
    pub feature: String,
    /// Signed contribution toward the prediction
    pub strength: f64,
    /// Coarse label like "+++" / "--"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qualitative_strength: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature_value: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfusionMatrixPayload {
    pub classes: Vec<String>,
    /// Row-major counts, rows = actual class, columns = predicted class
    pub matrix: Vec<Vec<f64>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResidualsPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coefficient_of_determination: Option<f64>,
    pub points: Vec<ResidualPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResidualPoint {
    pub actual: f64,
    pub predicted: f64,
    pub residual: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSeriesForecastPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forecast_start: Option<String>,
    pub points: Vec<ForecastPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub timestamp: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual: Option<f64>,
    pub predicted: f64,
}

/// A pinned-able card in the insight feed.
///
/// Created when a parse succeeds, removed by explicit user action, never
/// otherwise expired.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightItem {
    pub id: Uuid,
    pub data: InsightData,
    #[serde(default)]
    pub is_pinned: bool,
    pub created_at: DateTime<Utc>,
}

impl InsightItem {
    pub fn new(data: InsightData) -> Self {
        Self {
            id: Uuid::new_v4(),
            data,
            is_pinned: false,
            created_at: Utc::now(),
        }
    }
}
