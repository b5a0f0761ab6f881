//! Execution records as read back from the persistence layer.
//!
//! These are the row shapes that make up a workflow's mutable state. Only the
//! byte lengths of their string and blob fields matter to the stats computer;
//! everything else is carried so the shapes stay faithful to storage.

use serde::{Deserialize, Serialize};

use super::ids::{DomainId, RunId};

/// Encoding tag of a serialized payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Encoding {
    Json,
    #[serde(rename = "thriftrw")]
    ThriftRw,
    #[default]
    Unknown,
}

/// Raw serialized payload (history event, buffered event, ...).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DataBlob {
    #[serde(default)]
    pub encoding: Encoding,
    #[serde(default)]
    pub data: Vec<u8>,
}

impl DataBlob {
    pub fn new(encoding: Encoding, data: impl Into<Vec<u8>>) -> Self {
        Self {
            encoding,
            data: data.into(),
        }
    }

    /// Payload length in bytes.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Identifying metadata of a workflow execution.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ExecutionInfo {
    #[serde(default)]
    pub domain_id: DomainId,
    pub workflow_id: String,
    #[serde(default)]
    pub run_id: RunId,
    #[serde(default)]
    pub parent_workflow_id: String,
    pub task_list: String,
    pub workflow_type_name: String,
}

impl ExecutionInfo {
    pub fn new(
        workflow_id: impl Into<String>,
        task_list: impl Into<String>,
        workflow_type_name: impl Into<String>,
    ) -> Self {
        Self {
            workflow_id: workflow_id.into(),
            task_list: task_list.into(),
            workflow_type_name: workflow_type_name.into(),
            ..Self::default()
        }
    }

    pub fn with_parent(mut self, parent_workflow_id: impl Into<String>) -> Self {
        self.parent_workflow_id = parent_workflow_id.into();
        self
    }

    pub fn with_run_id(mut self, run_id: RunId) -> Self {
        self.run_id = run_id;
        self
    }

    pub fn with_domain_id(mut self, domain_id: DomainId) -> Self {
        self.domain_id = domain_id;
        self
    }
}

/// Pending activity.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ActivityInfo {
    #[serde(default)]
    pub schedule_id: i64,
    pub activity_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled_event: Option<DataBlob>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_event: Option<DataBlob>,
    #[serde(default)]
    pub details: Vec<u8>,
}

impl ActivityInfo {
    pub fn new(activity_id: impl Into<String>) -> Self {
        Self {
            activity_id: activity_id.into(),
            ..Self::default()
        }
    }

    pub fn with_scheduled_event(mut self, event: DataBlob) -> Self {
        self.scheduled_event = Some(event);
        self
    }

    pub fn with_started_event(mut self, event: DataBlob) -> Self {
        self.started_event = Some(event);
        self
    }

    pub fn with_details(mut self, details: impl Into<Vec<u8>>) -> Self {
        self.details = details.into();
        self
    }
}

/// User timer.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TimerInfo {
    pub timer_id: String,
    #[serde(default)]
    pub started_id: i64,
}

impl TimerInfo {
    pub fn new(timer_id: impl Into<String>) -> Self {
        Self {
            timer_id: timer_id.into(),
            started_id: 0,
        }
    }
}

/// Pending child workflow execution.
///
/// The identifiers are kept for storage fidelity but are not part of the
/// measured size; only the two event payloads are.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ChildExecutionInfo {
    #[serde(default)]
    pub initiated_id: i64,
    #[serde(default)]
    pub started_workflow_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initiated_event: Option<DataBlob>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_event: Option<DataBlob>,
}

impl ChildExecutionInfo {
    pub fn new(initiated_id: i64) -> Self {
        Self {
            initiated_id,
            ..Self::default()
        }
    }

    pub fn with_initiated_event(mut self, event: DataBlob) -> Self {
        self.initiated_event = Some(event);
        self
    }

    pub fn with_started_event(mut self, event: DataBlob) -> Self {
        self.started_event = Some(event);
        self
    }
}

/// Outgoing signal awaiting delivery.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SignalInfo {
    #[serde(default)]
    pub initiated_id: i64,
    pub signal_name: String,
    #[serde(default)]
    pub input: Vec<u8>,
    #[serde(default)]
    pub control: Vec<u8>,
}

impl SignalInfo {
    pub fn new(
        signal_name: impl Into<String>,
        input: impl Into<Vec<u8>>,
        control: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            initiated_id: 0,
            signal_name: signal_name.into(),
            input: input.into(),
            control: control.into(),
        }
    }
}

/// Outgoing cancellation request. Counted, never sized.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RequestCancelInfo {
    #[serde(default)]
    pub initiated_id: i64,
    #[serde(default)]
    pub cancel_request_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_blob_len_is_payload_length() {
        let blob = DataBlob::new(Encoding::Json, b"{}".to_vec());
        assert_eq!(blob.len(), 2);
        assert!(!blob.is_empty());
        assert!(DataBlob::default().is_empty());
    }

    #[test]
    fn encoding_serializes_as_storage_names() {
        assert_eq!(serde_json::to_string(&Encoding::ThriftRw).unwrap(), "\"thriftrw\"");
        assert_eq!(serde_json::to_string(&Encoding::Json).unwrap(), "\"json\"");
    }

    #[test]
    fn activity_without_events_decodes_with_defaults() {
        let json = r#"{ "activity_id": "a1" }"#;
        let ai: ActivityInfo = serde_json::from_str(json).expect("deserialize");
        assert_eq!(ai.activity_id, "a1");
        assert!(ai.scheduled_event.is_none());
        assert!(ai.started_event.is_none());
        assert!(ai.details.is_empty());
    }

    #[test]
    fn execution_info_builder_sets_parent() {
        let info = ExecutionInfo::new("wf", "tl", "type").with_parent("parent");
        assert_eq!(info.parent_workflow_id, "parent");
        assert_eq!(info.run_id, RunId::default());
    }
}
