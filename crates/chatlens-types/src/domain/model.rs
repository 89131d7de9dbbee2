use serde::{Deserialize, Serialize};

/// A trained model within a project.
///
/// Like [`crate::Project`], ephemeral and replaced wholesale on
/// re-extraction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Model {
    pub id: String,
    pub name: String,

    /// Blueprint/model type label (e.g. "Light Gradient Boosting on ElasticNet Predictions")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_type: Option<String>,

    /// Validation score under the project metric
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metric: Option<String>,

    #[serde(default)]
    pub is_recommended: bool,
}

impl Model {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            model_type: None,
            score: None,
            metric: None,
            is_recommended: false,
        }
    }
}
