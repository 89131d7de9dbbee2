use crate::storage::Storage;
use chatlens_types::{Model, Project, RecentActivity};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Maximum entries the recent-activity log retains
pub const MAX_ACTIVITIES: usize = 10;

/// How many of the most recent entries participate in (kind, name) dedup
const DEDUP_WINDOW: usize = 5;

/// The persisted shape of the context state.
///
/// Serialized as one camelCase JSON blob under a single storage key, so a
/// blob written by any earlier client version loads unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextSnapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_project: Option<Project>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_model: Option<Model>,

    #[serde(default)]
    pub recent_activities: Vec<RecentActivity>,

    #[serde(default)]
    pub project_list: Vec<Project>,

    #[serde(default)]
    pub model_list: Vec<Model>,
}

/// Holds the current project/model selections, candidate lists and activity
/// log.
///
/// Mutation is synchronous and last-write-wins; callers are expected to
/// mutate from a single UI update queue, so there is no internal locking.
/// Every mutation persists the snapshot best-effort: save failures are
/// logged and swallowed, never surfaced.
pub struct ContextStore {
    snapshot: ContextSnapshot,
    storage: Box<dyn Storage>,
}

impl ContextStore {
    /// Start from whatever the backing storage holds; a missing or
    /// unreadable blob degrades to the empty snapshot.
    pub fn load(storage: Box<dyn Storage>) -> Self {
        let snapshot = match storage.load() {
            Ok(Some(blob)) => match serde_json::from_str(&blob) {
                Ok(snapshot) => snapshot,
                Err(err) => {
                    warn!("discarding unreadable context snapshot: {}", err);
                    ContextSnapshot::default()
                }
            },
            Ok(None) => ContextSnapshot::default(),
            Err(err) => {
                warn!("context storage unavailable: {}", err);
                ContextSnapshot::default()
            }
        };

        Self { snapshot, storage }
    }

    /// Select a project. Dependent model state (current model and model
    /// list) is always cleared, even when re-selecting the same project.
    pub fn set_current_project(&mut self, project: Option<Project>) {
        self.snapshot.current_project = project;
        self.snapshot.current_model = None;
        self.snapshot.model_list.clear();
        self.persist();
    }

    pub fn set_current_model(&mut self, model: Option<Model>) {
        self.snapshot.current_model = model;
        self.persist();
    }

    /// Replace the project list wholesale
    pub fn set_project_list(&mut self, projects: Vec<Project>) {
        self.snapshot.project_list = projects;
        self.persist();
    }

    /// Replace the model list wholesale
    pub fn set_model_list(&mut self, models: Vec<Model>) {
        self.snapshot.model_list = models;
        self.persist();
    }

    /// Prepend an activity entry.
    ///
    /// Dropped if one of the [`DEDUP_WINDOW`] most recent entries already
    /// carries the same (kind, name); the log is capped at
    /// [`MAX_ACTIVITIES`], oldest evicted.
    pub fn push_activity(&mut self, activity: RecentActivity) {
        let duplicate = self
            .snapshot
            .recent_activities
            .iter()
            .take(DEDUP_WINDOW)
            .any(|a| a.kind == activity.kind && a.name == activity.name);
        if duplicate {
            return;
        }

        self.snapshot.recent_activities.insert(0, activity);
        self.snapshot.recent_activities.truncate(MAX_ACTIVITIES);
        self.persist();
    }

    /// Clear all state and the backing storage
    pub fn reset(&mut self) {
        self.snapshot = ContextSnapshot::default();
        if let Err(err) = self.storage.clear() {
            warn!("failed to clear context storage: {}", err);
        }
    }

    pub fn current_project(&self) -> Option<&Project> {
        self.snapshot.current_project.as_ref()
    }

    pub fn current_model(&self) -> Option<&Model> {
        self.snapshot.current_model.as_ref()
    }

    pub fn project_list(&self) -> &[Project] {
        &self.snapshot.project_list
    }

    pub fn model_list(&self) -> &[Model] {
        &self.snapshot.model_list
    }

    /// Most recent first
    pub fn recent_activities(&self) -> &[RecentActivity] {
        &self.snapshot.recent_activities
    }

    pub fn snapshot(&self) -> &ContextSnapshot {
        &self.snapshot
    }

    fn persist(&self) {
        let blob = match serde_json::to_string(&self.snapshot) {
            Ok(blob) => blob,
            Err(err) => {
                warn!("failed to serialize context snapshot: {}", err);
                return;
            }
        };

        if let Err(err) = self.storage.save(&blob) {
            warn!("failed to persist context snapshot: {}", err);
        }
    }
}
