//! Persistence requests whose payloads get measured.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::state::{WorkflowMutableState, WorkflowMutation, WorkflowSnapshot};

/// Result of loading a workflow execution.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GetWorkflowExecutionResponse {
    pub state: WorkflowMutableState,
}

/// Create a brand new run.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CreateWorkflowExecutionRequest {
    pub new_workflow_snapshot: WorkflowSnapshot,
}

/// Update the current run, optionally starting a new run (continue-as-new).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UpdateWorkflowExecutionRequest {
    pub update_workflow_mutation: WorkflowMutation,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_workflow_snapshot: Option<WorkflowSnapshot>,
}

/// Reset a run, optionally creating a new run and mutating the current one.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ConflictResolveWorkflowExecutionRequest {
    pub reset_workflow_snapshot: WorkflowSnapshot,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_workflow_snapshot: Option<WorkflowSnapshot>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_workflow_mutation: Option<WorkflowMutation>,
}

/// The persistence operation a measurement belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PersistenceOp {
    Get,
    Create,
    Update,
    ConflictResolve,
}

impl PersistenceOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            PersistenceOp::Get => "get",
            PersistenceOp::Create => "create",
            PersistenceOp::Update => "update",
            PersistenceOp::ConflictResolve => "conflict_resolve",
        }
    }
}

impl fmt::Display for PersistenceOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Any request the stats computer knows how to measure.
///
/// Serialized externally tagged by op name, e.g. `{"create": {"new_workflow_snapshot": {...}}}`.
/// Keep it externally tagged: integer map keys in `WorkflowMutableState` do not
/// decode through serde's buffered internal tagging.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PersistenceRequest {
    Get(GetWorkflowExecutionResponse),
    Create(CreateWorkflowExecutionRequest),
    Update(UpdateWorkflowExecutionRequest),
    ConflictResolve(ConflictResolveWorkflowExecutionRequest),
}

impl PersistenceRequest {
    pub fn op(&self) -> PersistenceOp {
        match self {
            PersistenceRequest::Get(_) => PersistenceOp::Get,
            PersistenceRequest::Create(_) => PersistenceOp::Create,
            PersistenceRequest::Update(_) => PersistenceOp::Update,
            PersistenceRequest::ConflictResolve(_) => PersistenceOp::ConflictResolve,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::get(PersistenceRequest::Get(Default::default()), "get")]
    #[case::create(PersistenceRequest::Create(Default::default()), "create")]
    #[case::update(PersistenceRequest::Update(Default::default()), "update")]
    #[case::conflict_resolve(
        PersistenceRequest::ConflictResolve(Default::default()),
        "conflict_resolve"
    )]
    fn request_is_keyed_by_op(#[case] request: PersistenceRequest, #[case] op: &str) {
        assert_eq!(request.op().as_str(), op);

        let v = serde_json::to_value(&request).unwrap();
        assert!(v.get(op).is_some());
    }

    #[test]
    fn update_without_new_snapshot_decodes() {
        let json = r#"
        {
          "update": {
            "update_workflow_mutation": {
              "execution_info": {
                "workflow_id": "wf",
                "task_list": "tl",
                "workflow_type_name": "type"
              }
            }
          }
        }"#;
        let request: PersistenceRequest = serde_json::from_str(json).expect("deserialize");
        match request {
            PersistenceRequest::Update(req) => assert!(req.new_workflow_snapshot.is_none()),
            other => panic!("unexpected request: {other:?}"),
        }
    }
}
