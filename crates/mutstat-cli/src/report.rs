//! Report - CLI が出力する JSON の形

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use mutstat_core::codec;
use mutstat_core::domain::PersistenceRequest;
use mutstat_core::ports::StatsSink;
use mutstat_core::{ComputedStats, MutableStateUpdateSessionStats, StatsRecorder};

#[derive(Debug, Error)]
pub enum ReportError {
    #[error(transparent)]
    Codec(#[from] codec::CodecError),

    #[error("report for op={0} does not hold session stats")]
    NotSessionStats(String),
}

/// Stats plus when and for what they were computed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsReport {
    pub computed_at: DateTime<Utc>,
    pub op: String,
    pub stats: ComputedStats,
}

impl StatsReport {
    pub fn new(op: impl Into<String>, stats: ComputedStats) -> Self {
        Self {
            computed_at: Utc::now(),
            op: op.into(),
            stats,
        }
    }
}

/// Measure one persisted request.
pub fn compute_report<S: StatsSink>(
    recorder: &StatsRecorder<S>,
    request: &PersistenceRequest,
    domain: Option<&str>,
) -> StatsReport {
    let stats = recorder.observe(request, domain);
    StatsReport::new(request.op().as_str(), stats)
}

/// Read session stats to merge: either bare session stats or a full
/// [`StatsReport`] produced by `compute`.
pub fn decode_session_stats(bytes: &[u8]) -> Result<MutableStateUpdateSessionStats, ReportError> {
    let value: serde_json::Value = codec::decode(bytes)?;
    if value.get("stats").is_none() {
        return Ok(codec::decode(bytes)?);
    }

    let report: StatsReport = codec::decode(bytes)?;
    match report.stats {
        ComputedStats::UpdateSession(stats) => Ok(stats),
        ComputedStats::MutableState(_) => Err(ReportError::NotSessionStats(report.op)),
    }
}

pub fn merge_report(stats: Vec<MutableStateUpdateSessionStats>) -> StatsReport {
    let merged = mutstat_core::merge_update_session_stats(stats);
    StatsReport::new("merge", ComputedStats::UpdateSession(merged))
}

#[cfg(test)]
mod tests {
    use super::*;
    use mutstat_core::domain::{
        CreateWorkflowExecutionRequest, ExecutionInfo, HistoryTaskCategory, WorkflowSnapshot,
    };
    use mutstat_core::impls::InMemoryStatsSink;
    use rstest::rstest;

    #[test]
    fn compute_report_names_the_op() {
        let recorder = StatsRecorder::new(InMemoryStatsSink::new());
        let request = PersistenceRequest::Create(CreateWorkflowExecutionRequest {
            new_workflow_snapshot: WorkflowSnapshot::new(ExecutionInfo::new("wf", "tl", "type")),
        });

        let report = compute_report(&recorder, &request, None);
        assert_eq!(report.op, "create");
        assert_eq!(report.stats.mutable_state_size(), 8);
        assert_eq!(recorder.sink().records().len(), 1);
    }

    #[test]
    fn update_fixture_computes() {
        let request = codec::decode_request(include_bytes!("../fixtures/update.json"))
            .expect("fixture decodes");
        let recorder = StatsRecorder::new(InMemoryStatsSink::new());

        let report = compute_report(&recorder, &request, Some("orders"));
        assert_eq!(report.op, "update");
        match report.stats {
            ComputedStats::UpdateSession(stats) => {
                assert_eq!(stats.execution_info_size, 10 + 6 + 13);
                assert_eq!(stats.activity_info_size, 11 + 4 + 2);
                assert_eq!(stats.buffered_events_size, 3);
                assert_eq!(stats.delete_timer_info_count, 1);
                assert_eq!(stats.task_count(), 2);
                assert_eq!(stats.mutable_state_size, 49);
            }
            other => panic!("unexpected stats: {other:?}"),
        }
    }

    #[test]
    fn sink_fixture_is_a_valid_config() {
        let config: mutstat_core::SinkConfig =
            codec::decode(include_bytes!("../fixtures/sink.json")).expect("fixture decodes");
        assert_eq!(config.warn_buffered_events_count, 50);
    }

    #[rstest]
    #[case::bare(r#"{ "activity_info_size": 4, "task_count_by_category": { "transfer": 1 } }"#)]
    #[case::report(
        r#"{
          "computed_at": "2026-01-01T00:00:00Z",
          "op": "update",
          "stats": { "update_session": { "activity_info_size": 4, "task_count_by_category": { "transfer": 1 } } }
        }"#
    )]
    fn session_stats_decode_from_either_shape(#[case] json: &str) {
        let stats = decode_session_stats(json.as_bytes()).expect("decode");
        assert_eq!(stats.activity_info_size, 4);
        assert_eq!(stats.task_count_by_category[&HistoryTaskCategory::Transfer], 1);
    }

    #[test]
    fn full_state_report_cannot_be_merged() {
        let json = r#"{
          "computed_at": "2026-01-01T00:00:00Z",
          "op": "get",
          "stats": { "mutable_state": { "mutable_state_size": 10 } }
        }"#;
        let err = decode_session_stats(json.as_bytes()).unwrap_err();
        assert!(matches!(err, ReportError::NotSessionStats(op) if op == "get"));
    }

    #[test]
    fn merge_report_sums_inputs() {
        let one = MutableStateUpdateSessionStats {
            mutable_state_size: 3,
            timer_info_size: 3,
            ..Default::default()
        };
        let report = merge_report(vec![one.clone(), one]);
        assert_eq!(report.op, "merge");
        assert_eq!(report.stats.mutable_state_size(), 6);
    }

    #[test]
    fn merge_report_of_nothing_is_zero() {
        let report = merge_report(Vec::new());
        assert_eq!(
            report.stats,
            ComputedStats::UpdateSession(MutableStateUpdateSessionStats::default())
        );
    }
}
