//! State - workflow の mutable state とその差分
//!
//! - `WorkflowMutableState`: 読み出された全状態（buffered events を含む）
//! - `WorkflowSnapshot`: ある時点の全状態（書き込み用、buffered events なし）
//! - `WorkflowMutation`: 既存状態への差分（upsert + delete）
//!
//! Keyed collections use the same keys the persistence layer uses:
//! schedule id for activities, timer id for timers, initiated id for the rest.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use super::execution::{
    ActivityInfo, ChildExecutionInfo, DataBlob, ExecutionInfo, RequestCancelInfo, SignalInfo,
    TimerInfo,
};
use super::task::TasksByCategory;

/// Full mutable state of one workflow run, as loaded from storage.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WorkflowMutableState {
    pub execution_info: ExecutionInfo,
    #[serde(default)]
    pub activity_infos: BTreeMap<i64, ActivityInfo>,
    #[serde(default)]
    pub timer_infos: BTreeMap<String, TimerInfo>,
    #[serde(default)]
    pub child_execution_infos: BTreeMap<i64, ChildExecutionInfo>,
    #[serde(default)]
    pub request_cancel_infos: BTreeMap<i64, RequestCancelInfo>,
    #[serde(default)]
    pub signal_infos: BTreeMap<i64, SignalInfo>,
    #[serde(default)]
    pub buffered_events: Vec<DataBlob>,
}

/// Complete point-in-time state written for a run.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WorkflowSnapshot {
    pub execution_info: ExecutionInfo,
    #[serde(default)]
    pub activity_infos: Vec<ActivityInfo>,
    #[serde(default)]
    pub timer_infos: Vec<TimerInfo>,
    #[serde(default)]
    pub child_execution_infos: Vec<ChildExecutionInfo>,
    #[serde(default)]
    pub signal_infos: Vec<SignalInfo>,
    #[serde(default)]
    pub request_cancel_infos: Vec<RequestCancelInfo>,
    #[serde(default)]
    pub tasks_by_category: TasksByCategory,
}

impl WorkflowSnapshot {
    pub fn new(execution_info: ExecutionInfo) -> Self {
        Self {
            execution_info,
            ..Self::default()
        }
    }
}

/// Incremental change set applied to an existing run.
///
/// Deletes only retain the key of the removed row, so they can be counted
/// but not sized.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WorkflowMutation {
    pub execution_info: ExecutionInfo,

    #[serde(default)]
    pub upsert_activity_infos: Vec<ActivityInfo>,
    #[serde(default)]
    pub delete_activity_infos: BTreeSet<i64>,

    #[serde(default)]
    pub upsert_timer_infos: Vec<TimerInfo>,
    #[serde(default)]
    pub delete_timer_infos: BTreeSet<String>,

    #[serde(default)]
    pub upsert_child_execution_infos: Vec<ChildExecutionInfo>,
    #[serde(default)]
    pub delete_child_execution_infos: BTreeSet<i64>,

    #[serde(default)]
    pub upsert_request_cancel_infos: Vec<RequestCancelInfo>,
    #[serde(default)]
    pub delete_request_cancel_infos: BTreeSet<i64>,

    #[serde(default)]
    pub upsert_signal_infos: Vec<SignalInfo>,
    #[serde(default)]
    pub delete_signal_infos: BTreeSet<i64>,

    /// At most one pending buffered event per mutation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_buffered_events: Option<DataBlob>,

    #[serde(default)]
    pub tasks_by_category: TasksByCategory,
}

impl WorkflowMutation {
    pub fn new(execution_info: ExecutionInfo) -> Self {
        Self {
            execution_info,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mutation_decodes_with_only_execution_info() {
        let json = r#"
        {
          "execution_info": {
            "workflow_id": "wf",
            "task_list": "tl",
            "workflow_type_name": "type"
          }
        }"#;
        let m: WorkflowMutation = serde_json::from_str(json).expect("deserialize");
        assert_eq!(m.execution_info.workflow_id, "wf");
        assert!(m.upsert_activity_infos.is_empty());
        assert!(m.delete_timer_infos.is_empty());
        assert!(m.new_buffered_events.is_none());
    }

    #[test]
    fn mutable_state_decodes_integer_keyed_maps() {
        let json = r#"
        {
          "execution_info": {
            "workflow_id": "wf",
            "task_list": "tl",
            "workflow_type_name": "type"
          },
          "activity_infos": { "5": { "schedule_id": 5, "activity_id": "act" } },
          "buffered_events": [{ "data": [1, 2, 3] }]
        }"#;
        let state: WorkflowMutableState = serde_json::from_str(json).expect("deserialize");
        assert_eq!(state.activity_infos[&5].activity_id, "act");
        assert_eq!(state.buffered_events[0].len(), 3);
    }
}
