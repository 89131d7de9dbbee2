//! Full pipeline: transcript in, context + insight feed out.

use chatlens_engine::{InsightFeed, MessageScanner};
use chatlens_state::{ContextStore, MemoryStorage};
use chatlens_types::{ActivityKind, ChatEvent, InsightData};

fn transcript() -> Vec<ChatEvent> {
    vec![
        ChatEvent::message(
            "msg-1",
            "I uploaded your dataset and created project \"Churn Q3\" (68a1b2c3d4e5f6a7b8c9d0e1).",
        ),
        ChatEvent::tool_result(
            "tool-1",
            Some("start_autopilot".into()),
            r#"{"projectId": "68a1b2c3d4e5f6a7b8c9d0e1", "target": "churned", "metric": "LogLoss"}"#,
        ),
        ChatEvent::message(
            "msg-2",
            "AutoPilot finished. Leaderboard:\n\
             1. Light Gradient Boosted Trees    0.2248  (recommended)\n\
             2. Elastic-Net Classifier          0.2391",
        ),
        ChatEvent::message(
            "msg-3",
            "Here is the ROC curve:\n```json\n{\"type\":\"roc_curve\",\"auc\":0.87,\"data\":[{\"threshold\":0.5,\"fpr\":0.1,\"tpr\":0.8}]}\n```",
        ),
    ]
}

#[test]
fn transcript_builds_context_and_feed() {
    let mut scanner = MessageScanner::new();
    let mut store = ContextStore::load(Box::new(MemoryStorage::new()));
    let mut feed = InsightFeed::new();

    let events = transcript();
    let report = scanner.scan(&events, &mut store, &mut feed);

    assert_eq!(report.events_processed, 4);
    assert_eq!(report.new_insights.len(), 1);

    let project = store.current_project().expect("project inferred");
    assert_eq!(project.id, "68a1b2c3d4e5f6a7b8c9d0e1");
    assert_eq!(project.name, "Churn Q3");

    assert_eq!(store.model_list().len(), 2);
    assert!(store.model_list()[0].is_recommended);

    assert_eq!(feed.len(), 1);
    match &feed.items()[0].data {
        InsightData::RocCurve(payload) => assert_eq!(payload.auc, 0.87),
        other => panic!("expected roc_curve, got {}", other.kind()),
    }
}

#[test]
fn rescanning_grown_stream_only_processes_the_tail() {
    let mut scanner = MessageScanner::new();
    let mut store = ContextStore::load(Box::new(MemoryStorage::new()));
    let mut feed = InsightFeed::new();

    let mut events = transcript();
    scanner.scan(&events, &mut store, &mut feed);

    events.push(ChatEvent::message(
        "msg-4",
        "```json\n{\"type\":\"lift_chart\",\"bins\":[{\"actual\":1.1,\"predicted\":1.0,\"binWeight\":100.0}]}\n```",
    ));
    let report = scanner.scan(&events, &mut store, &mut feed);

    assert_eq!(report.events_processed, 1);
    assert_eq!(report.events_skipped, 4);
    assert_eq!(feed.len(), 2);
}

#[test]
fn activity_log_records_each_context_change_once() {
    let mut scanner = MessageScanner::new();
    let mut store = ContextStore::load(Box::new(MemoryStorage::new()));
    let mut feed = InsightFeed::new();

    scanner.scan(&transcript(), &mut store, &mut feed);

    let kinds: Vec<ActivityKind> = store
        .recent_activities()
        .iter()
        .map(|a| a.kind)
        .collect();
    assert!(kinds.contains(&ActivityKind::Project));
    assert!(kinds.contains(&ActivityKind::Insight));
}
