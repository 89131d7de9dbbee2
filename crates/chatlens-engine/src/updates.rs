use chatlens_extract::{ModelRow, ProjectRef, parse_insight};
use chatlens_types::{ChatEvent, ChatPayload, InsightData, Model, Project};
use std::collections::BTreeMap;

/// Pure data extracted from one chat event, before any state is touched.
///
/// Separating extraction from application keeps the heuristics testable
/// without a store and keeps side effects in one place.
#[derive(Debug, Default)]
pub struct ContextUpdates {
    pub insight: Option<InsightData>,
    pub project_refs: Vec<ProjectRef>,
    pub model_rows: Vec<ModelRow>,
    pub key_values: BTreeMap<String, String>,
}

impl ContextUpdates {
    pub fn is_empty(&self) -> bool {
        self.insight.is_none()
            && self.project_refs.is_empty()
            && self.model_rows.is_empty()
            && self.key_values.is_empty()
    }

    /// Best candidate for "the project this conversation is about now".
    ///
    /// Typed key/value pairs from tool results win over prose regex hits;
    /// named refs win over bare ids.
    pub fn inferred_project(&self) -> Option<Project> {
        if let Some(id) = self.key_values.get("project_id") {
            let name = self
                .key_values
                .get("project_name")
                .cloned()
                .unwrap_or_else(|| id.clone());
            let mut project = Project::new(id.clone(), name);
            project.target = self.key_values.get("target").cloned();
            project.metric = self.key_values.get("metric").cloned();
            return Some(project);
        }

        let best = self
            .project_refs
            .iter()
            .find(|r| r.name.is_some())
            .or_else(|| self.project_refs.first())?;
        Some(Project::new(
            best.id.clone(),
            best.name.clone().unwrap_or_else(|| best.id.clone()),
        ))
    }

    /// Model selected via tool-result key/value pairs, if any
    pub fn inferred_model(&self) -> Option<Model> {
        let id = self.key_values.get("model_id")?;
        let name = self
            .key_values
            .get("model_name")
            .or_else(|| self.key_values.get("model_type"))
            .cloned()
            .unwrap_or_else(|| id.clone());
        Some(Model::new(id.clone(), name))
    }

    /// Leaderboard rows converted to the model list shape
    pub fn models_from_rows(&self) -> Vec<Model> {
        self.model_rows
            .iter()
            .map(|row| Model {
                id: row
                    .id
                    .clone()
                    .unwrap_or_else(|| row.model_type.clone()),
                name: row.model_type.clone(),
                model_type: Some(row.model_type.clone()),
                score: row.score,
                metric: None,
                is_recommended: row.is_recommended,
            })
            .collect()
    }
}

/// Extract updates from a single event without performing I/O or side
/// effects.
pub fn extract_context_updates(event: &ChatEvent) -> ContextUpdates {
    let mut updates = ContextUpdates::default();

    match &event.payload {
        ChatPayload::Message(message) => {
            updates.insight = parse_insight(&message.text);
            updates.project_refs = chatlens_extract::extract_project_refs(&message.text);
            updates.model_rows = chatlens_extract::extract_model_rows(&message.text);
        }
        ChatPayload::ToolResult(result) => {
            updates.insight = parse_insight(&result.output);
            updates.project_refs = chatlens_extract::extract_project_refs(&result.output);
            updates.model_rows = chatlens_extract::extract_model_rows(&result.output);
            updates.key_values = chatlens_extract::extract_key_values(&result.output);
        }
    }

    updates
}
