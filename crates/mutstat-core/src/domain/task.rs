use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Category under which history tasks are grouped and executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HistoryTaskCategory {
    Transfer,
    Timer,
    Replication,
}

impl HistoryTaskCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            HistoryTaskCategory::Transfer => "transfer",
            HistoryTaskCategory::Timer => "timer",
            HistoryTaskCategory::Replication => "replication",
        }
    }
}

impl fmt::Display for HistoryTaskCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A history task generated alongside a state change.
///
/// Stats only count tasks, so the payload stays opaque JSON.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Task {
    #[serde(default)]
    pub task_id: i64,
    #[serde(default)]
    pub task_type: String,
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub payload: serde_json::Value,
}

impl Task {
    pub fn new(task_id: i64, task_type: impl Into<String>) -> Self {
        Self {
            task_id,
            task_type: task_type.into(),
            payload: serde_json::Value::Null,
        }
    }
}

/// Tasks grouped by category, as written with a mutation or snapshot.
pub type TasksByCategory = BTreeMap<HistoryTaskCategory, Vec<Task>>;
