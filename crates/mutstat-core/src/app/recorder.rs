//! StatsRecorder - 計測して記録する
//!
//! StatsComputer と StatsSink をつなぐ接着剤。

use crate::domain::PersistenceRequest;
use crate::ports::{StatsScope, StatsSink};
use crate::stats::{ComputedStats, StatsComputer};

pub struct StatsRecorder<S: StatsSink> {
    computer: StatsComputer,
    sink: S,
}

impl<S: StatsSink> StatsRecorder<S> {
    pub fn new(sink: S) -> Self {
        Self {
            computer: StatsComputer::new(),
            sink,
        }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Measure `request`, hand the result to the sink and return it.
    pub fn observe(&self, request: &PersistenceRequest, domain: Option<&str>) -> ComputedStats {
        let mut scope = StatsScope::new(request.op());
        if let Some(domain) = domain {
            scope = scope.with_domain(domain);
        }

        let stats = self.computer.compute(request);
        match &stats {
            ComputedStats::MutableState(s) => self.sink.record_mutable_state(&scope, s),
            ComputedStats::UpdateSession(s) => self.sink.record_update_session(&scope, s),
        }
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        ConflictResolveWorkflowExecutionRequest, ExecutionInfo, PersistenceOp,
        UpdateWorkflowExecutionRequest, WorkflowMutation,
    };
    use crate::impls::InMemoryStatsSink;

    #[test]
    fn observe_records_what_it_returns() {
        let recorder = StatsRecorder::new(InMemoryStatsSink::new());
        let request = PersistenceRequest::Update(UpdateWorkflowExecutionRequest {
            update_workflow_mutation: WorkflowMutation::new(ExecutionInfo::new("wf", "tl", "t")),
            new_workflow_snapshot: None,
        });

        let stats = recorder.observe(&request, Some("orders"));
        assert_eq!(stats.mutable_state_size(), 5);

        let records = recorder.sink().records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].scope.op, PersistenceOp::Update);
        assert_eq!(records[0].scope.domain.as_deref(), Some("orders"));
        assert_eq!(records[0].stats, stats);
    }

    #[test]
    fn observe_without_domain_leaves_scope_domain_empty() {
        let recorder = StatsRecorder::new(InMemoryStatsSink::new());
        let request =
            PersistenceRequest::ConflictResolve(ConflictResolveWorkflowExecutionRequest::default());

        recorder.observe(&request, None);

        let records = recorder.sink().records();
        assert_eq!(records[0].scope.op, PersistenceOp::ConflictResolve);
        assert!(records[0].scope.domain.is_none());
    }
}
