use crate::insights::InsightFeed;
use crate::updates::{ContextUpdates, extract_context_updates};
use chatlens_state::ContextStore;
use chatlens_types::{ActivityKind, ChatEvent, InsightData, InsightItem, RecentActivity};
use std::collections::HashSet;
use tracing::debug;

/// Outcome of one scan pass, for incremental rendering
#[derive(Debug, Default)]
pub struct ScanReport {
    pub events_processed: usize,
    pub events_skipped: usize,
    pub new_insights: Vec<InsightItem>,
}

/// Iterates newly-arrived chat events and folds what they yield into the
/// context store and insight feed.
///
/// The dedup guard is a set of processed event ids: an event id is never
/// processed twice, no matter how often the transport re-delivers it.
#[derive(Debug, Default)]
pub struct MessageScanner {
    seen: HashSet<String>,
}

impl MessageScanner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scan a batch of events (typically the tail of the chat stream).
    pub fn scan(
        &mut self,
        events: &[ChatEvent],
        store: &mut ContextStore,
        feed: &mut InsightFeed,
    ) -> ScanReport {
        let mut report = ScanReport::default();

        for event in events {
            if !self.seen.insert(event.id.clone()) {
                report.events_skipped += 1;
                continue;
            }
            report.events_processed += 1;

            let updates = extract_context_updates(event);
            if updates.is_empty() {
                continue;
            }

            debug!(event_id = %event.id, "applying context updates");
            apply_updates(updates, store, feed, &mut report);
        }

        report
    }

    /// Number of distinct event ids processed so far
    pub fn seen_count(&self) -> usize {
        self.seen.len()
    }
}

fn apply_updates(
    updates: ContextUpdates,
    store: &mut ContextStore,
    feed: &mut InsightFeed,
    report: &mut ScanReport,
) {
    // Project first: selecting one clears dependent model state, so the
    // model inference below must come after.
    if let Some(project) = updates.inferred_project() {
        let changed = store
            .current_project()
            .map(|current| current.id != project.id)
            .unwrap_or(true);
        if changed {
            store.push_activity(RecentActivity::new(
                ActivityKind::Project,
                project.id.clone(),
                project.name.clone(),
            ));
            store.set_current_project(Some(project));
        }
    }

    if !updates.model_rows.is_empty() {
        store.set_model_list(updates.models_from_rows());
    }

    if let Some(model) = updates.inferred_model() {
        let changed = store
            .current_model()
            .map(|current| current.id != model.id)
            .unwrap_or(true);
        if changed {
            store.push_activity(RecentActivity::new(
                ActivityKind::Model,
                model.id.clone(),
                model.name.clone(),
            ));
            store.set_current_model(Some(model));
        }
    }

    if let Some(insight) = updates.insight {
        // List-shaped payloads also refresh the candidate lists
        match &insight {
            InsightData::ProjectList(payload) => {
                store.set_project_list(payload.projects.clone());
            }
            InsightData::ModelComparison(payload) => {
                store.set_model_list(payload.models.clone());
            }
            _ => {}
        }

        let item = feed.push(insight);
        store.push_activity(RecentActivity::new(
            ActivityKind::Insight,
            item.id.to_string(),
            item.data.kind().to_string(),
        ));
        report.new_insights.push(item);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chatlens_state::MemoryStorage;

    fn fixtures() -> (MessageScanner, ContextStore, InsightFeed) {
        (
            MessageScanner::new(),
            ContextStore::load(Box::new(MemoryStorage::new())),
            InsightFeed::new(),
        )
    }

    #[test]
    fn test_same_event_id_is_never_reprocessed() {
        let (mut scanner, mut store, mut feed) = fixtures();
        let event = ChatEvent::message(
            "msg-1",
            "```json\n{\"type\":\"roc_curve\",\"auc\":0.87,\"data\":[]}\n```",
        );

        let first = scanner.scan(std::slice::from_ref(&event), &mut store, &mut feed);
        let second = scanner.scan(std::slice::from_ref(&event), &mut store, &mut feed);

        assert_eq!(first.events_processed, 1);
        assert_eq!(first.new_insights.len(), 1);
        assert_eq!(second.events_processed, 0);
        assert_eq!(second.events_skipped, 1);
        assert_eq!(feed.len(), 1);
    }

    #[test]
    fn test_project_mention_becomes_current_project() {
        let (mut scanner, mut store, mut feed) = fixtures();
        let event = ChatEvent::message(
            "msg-1",
            "Created project \"Churn Q3\" (68a1b2c3d4e5f6a7b8c9d0e1).",
        );

        scanner.scan(&[event], &mut store, &mut feed);

        assert_eq!(store.current_project().unwrap().name, "Churn Q3");
        assert_eq!(store.recent_activities().len(), 1);
    }

    #[test]
    fn test_repeated_project_mention_does_not_reclear_model_state() {
        let (mut scanner, mut store, mut feed) = fixtures();
        scanner.scan(
            &[ChatEvent::message(
                "msg-1",
                "project 68a1b2c3d4e5f6a7b8c9d0e1 ready",
            )],
            &mut store,
            &mut feed,
        );
        store.set_current_model(Some(chatlens_types::Model::new("m-1", "GBT")));

        // Same project id mentioned again in a later event
        scanner.scan(
            &[ChatEvent::message(
                "msg-2",
                "project 68a1b2c3d4e5f6a7b8c9d0e1 still training",
            )],
            &mut store,
            &mut feed,
        );

        assert_eq!(store.current_model().unwrap().id, "m-1");
    }

    #[test]
    fn test_tool_result_selects_model() {
        let (mut scanner, mut store, mut feed) = fixtures();
        let event = ChatEvent::tool_result(
            "tool-1",
            Some("get_best_model".into()),
            r#"{"modelId": "68ffffffffffffffffffffff", "modelType": "Light Gradient Boosted Trees"}"#,
        );

        scanner.scan(&[event], &mut store, &mut feed);

        let model = store.current_model().unwrap();
        assert_eq!(model.id, "68ffffffffffffffffffffff");
        assert_eq!(model.name, "Light Gradient Boosted Trees");
    }

    #[test]
    fn test_leaderboard_rows_replace_model_list() {
        let (mut scanner, mut store, mut feed) = fixtures();
        let event = ChatEvent::message(
            "msg-1",
            "Leaderboard:\nLight Gradient Boosted Trees 0.2248 (recommended)\nElastic-Net Classifier 0.2391",
        );

        scanner.scan(&[event], &mut store, &mut feed);

        assert_eq!(store.model_list().len(), 2);
        assert!(store.model_list()[0].is_recommended);
    }

    #[test]
    fn test_project_list_insight_refreshes_candidates() {
        let (mut scanner, mut store, mut feed) = fixtures();
        let event = ChatEvent::tool_result(
            "tool-1",
            Some("list_projects".into()),
            r#"{"type":"project_list","projects":[{"id":"68a1b2c3d4e5f6a7b8c9d0e1","name":"Churn Q3"},{"id":"68a1b2c3d4e5f6a7b8c9d0e2","name":"LTV"}]}"#,
        );

        let report = scanner.scan(&[event], &mut store, &mut feed);

        assert_eq!(store.project_list().len(), 2);
        assert_eq!(report.new_insights.len(), 1);
        assert_eq!(feed.len(), 1);
    }
}
