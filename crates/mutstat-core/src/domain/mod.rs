//! Domain model: the workflow state shapes the persistence layer hands over.
//!
//! - ids: RunId / DomainId
//! - execution: execution info と各 info レコード、DataBlob
//! - task: HistoryTaskCategory と Task
//! - state: WorkflowMutableState / WorkflowSnapshot / WorkflowMutation
//! - request: get / create / update / conflict-resolve の各リクエスト

pub mod execution;
pub mod ids;
pub mod request;
pub mod state;
pub mod task;

pub use execution::{
    ActivityInfo, ChildExecutionInfo, DataBlob, Encoding, ExecutionInfo, RequestCancelInfo,
    SignalInfo, TimerInfo,
};
pub use ids::{DomainId, RunId};
pub use request::{
    ConflictResolveWorkflowExecutionRequest, CreateWorkflowExecutionRequest,
    GetWorkflowExecutionResponse, PersistenceOp, PersistenceRequest,
    UpdateWorkflowExecutionRequest,
};
pub use state::{WorkflowMutableState, WorkflowMutation, WorkflowSnapshot};
pub use task::{HistoryTaskCategory, Task, TasksByCategory};
