use serde::{Deserialize, Serialize};

/// A modeling project as surfaced in chat output.
///
/// Ephemeral: replaced wholesale whenever a fresh extraction produces a new
/// list. The `id` is an opaque string, often regex-extracted from prose and
/// therefore unverified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub name: String,

    /// Target column the project predicts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,

    /// Optimization metric (e.g. "LogLoss", "RMSE")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metric: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_count: Option<u32>,
}

impl Project {
    /// Minimal project with only the fields every extraction site can supply
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            target: None,
            metric: None,
            created_at: None,
            model_count: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camel_case_wire_format() {
        let project = Project {
            id: "5f3e9a7b2c1d8e4f6a0b9c8d".to_string(),
            name: "churn".to_string(),
            target: Some("churned".to_string()),
            metric: None,
            created_at: Some("2025-06-01T12:00:00Z".to_string()),
            model_count: Some(24),
        };

        let json = serde_json::to_value(&project).unwrap();
        assert_eq!(json["createdAt"], "2025-06-01T12:00:00Z");
        assert_eq!(json["modelCount"], 24);
        assert!(json.get("metric").is_none());
    }
}
