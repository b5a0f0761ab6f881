//! StatsComputer - mutable state のサイズ計測
//!
//! Stateless: every method takes the request by reference and returns a fresh
//! stats value. Nothing here can fail.

use serde::{Deserialize, Serialize};

use super::model::{MutableStateStats, MutableStateUpdateSessionStats};
use super::size::{
    Tally, activity_info_size, child_info_size, execution_info_size, signal_info_size,
    task_count_by_category, timer_info_size,
};
use crate::domain::{
    ConflictResolveWorkflowExecutionRequest, CreateWorkflowExecutionRequest, DataBlob,
    GetWorkflowExecutionResponse, PersistenceRequest, UpdateWorkflowExecutionRequest,
    WorkflowMutation, WorkflowSnapshot,
};

/// Computes serialized-size statistics for workflow state.
#[derive(Debug, Clone, Copy, Default)]
pub struct StatsComputer;

/// Stats produced for one [`PersistenceRequest`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComputedStats {
    MutableState(MutableStateStats),
    UpdateSession(MutableStateUpdateSessionStats),
}

impl ComputedStats {
    pub fn mutable_state_size(&self) -> usize {
        match self {
            ComputedStats::MutableState(stats) => stats.mutable_state_size,
            ComputedStats::UpdateSession(stats) => stats.mutable_state_size,
        }
    }
}

impl StatsComputer {
    pub fn new() -> Self {
        Self
    }

    /// Dispatch to the entry point matching the request's operation.
    pub fn compute(&self, request: &PersistenceRequest) -> ComputedStats {
        match request {
            PersistenceRequest::Get(resp) => {
                ComputedStats::MutableState(self.compute_mutable_state_stats(resp))
            }
            PersistenceRequest::Create(req) => {
                ComputedStats::UpdateSession(self.compute_mutable_state_create_stats(req))
            }
            PersistenceRequest::Update(req) => {
                ComputedStats::UpdateSession(self.compute_mutable_state_update_stats(req))
            }
            PersistenceRequest::ConflictResolve(req) => ComputedStats::UpdateSession(
                self.compute_mutable_state_conflict_resolve_stats(req),
            ),
        }
    }

    /// Stats of a full state loaded from storage, buffered events included.
    pub fn compute_mutable_state_stats(
        &self,
        resp: &GetWorkflowExecutionResponse,
    ) -> MutableStateStats {
        let state = &resp.state;

        let execution_info_size = execution_info_size(&state.execution_info);
        let activities = Tally::of(state.activity_infos.values(), activity_info_size);
        let timers = Tally::of(state.timer_infos.values(), timer_info_size);
        let children = Tally::of(state.child_execution_infos.values(), child_info_size);
        let signals = Tally::of(state.signal_infos.values(), signal_info_size);
        let buffered_events = Tally::of(&state.buffered_events, DataBlob::len);

        let mutable_state_size = execution_info_size
            + activities.size
            + timers.size
            + children.size
            + signals.size
            + buffered_events.size;

        MutableStateStats {
            mutable_state_size,
            execution_info_size,
            activity_info_size: activities.size,
            timer_info_size: timers.size,
            child_info_size: children.size,
            signal_info_size: signals.size,
            buffered_events_size: buffered_events.size,
            activity_info_count: activities.count,
            timer_info_count: timers.count,
            child_info_count: children.count,
            signal_info_count: signals.count,
            request_cancel_info_count: state.request_cancel_infos.len(),
            buffered_events_count: buffered_events.count,
        }
    }

    /// Mutation of the current run, plus the new run's snapshot when the
    /// update also starts one.
    pub fn compute_mutable_state_update_stats(
        &self,
        req: &UpdateWorkflowExecutionRequest,
    ) -> MutableStateUpdateSessionStats {
        let mutation = self.compute_workflow_mutation_stats(&req.update_workflow_mutation);
        match &req.new_workflow_snapshot {
            Some(snapshot) => mutation + self.compute_workflow_snapshot_stats(snapshot),
            None => mutation,
        }
    }

    pub fn compute_mutable_state_create_stats(
        &self,
        req: &CreateWorkflowExecutionRequest,
    ) -> MutableStateUpdateSessionStats {
        self.compute_workflow_snapshot_stats(&req.new_workflow_snapshot)
    }

    /// Reset snapshot, then the optional new snapshot and current mutation.
    pub fn compute_mutable_state_conflict_resolve_stats(
        &self,
        req: &ConflictResolveWorkflowExecutionRequest,
    ) -> MutableStateUpdateSessionStats {
        let reset = self.compute_workflow_snapshot_stats(&req.reset_workflow_snapshot);
        let new_run = req
            .new_workflow_snapshot
            .as_ref()
            .map(|snapshot| self.compute_workflow_snapshot_stats(snapshot));
        let current = req
            .current_workflow_mutation
            .as_ref()
            .map(|mutation| self.compute_workflow_mutation_stats(mutation));

        std::iter::once(reset).chain(new_run).chain(current).sum()
    }

    /// Upserts are sized, deletes are only counted.
    pub fn compute_workflow_mutation_stats(
        &self,
        mutation: &WorkflowMutation,
    ) -> MutableStateUpdateSessionStats {
        let execution_info_size = execution_info_size(&mutation.execution_info);
        let activities = Tally::of(&mutation.upsert_activity_infos, activity_info_size);
        let timers = Tally::of(&mutation.upsert_timer_infos, timer_info_size);
        let children = Tally::of(&mutation.upsert_child_execution_infos, child_info_size);
        let signals = Tally::of(&mutation.upsert_signal_infos, signal_info_size);
        let buffered_events_size = mutation
            .new_buffered_events
            .as_ref()
            .map_or(0, DataBlob::len);

        let mutable_state_size = execution_info_size
            + activities.size
            + timers.size
            + children.size
            + signals.size
            + buffered_events_size;

        MutableStateUpdateSessionStats {
            mutable_state_size,
            execution_info_size,
            activity_info_size: activities.size,
            timer_info_size: timers.size,
            child_info_size: children.size,
            signal_info_size: signals.size,
            buffered_events_size,
            activity_info_count: activities.count,
            timer_info_count: timers.count,
            child_info_count: children.count,
            signal_info_count: signals.count,
            request_cancel_info_count: mutation.upsert_request_cancel_infos.len(),
            delete_activity_info_count: mutation.delete_activity_infos.len(),
            delete_timer_info_count: mutation.delete_timer_infos.len(),
            delete_child_info_count: mutation.delete_child_execution_infos.len(),
            delete_signal_info_count: mutation.delete_signal_infos.len(),
            delete_request_cancel_info_count: mutation.delete_request_cancel_infos.len(),
            task_count_by_category: task_count_by_category(&mutation.tasks_by_category),
        }
    }

    /// Snapshots carry neither buffered events nor deletes; those stay zero.
    pub fn compute_workflow_snapshot_stats(
        &self,
        snapshot: &WorkflowSnapshot,
    ) -> MutableStateUpdateSessionStats {
        let execution_info_size = execution_info_size(&snapshot.execution_info);
        let activities = Tally::of(&snapshot.activity_infos, activity_info_size);
        let timers = Tally::of(&snapshot.timer_infos, timer_info_size);
        let children = Tally::of(&snapshot.child_execution_infos, child_info_size);
        let signals = Tally::of(&snapshot.signal_infos, signal_info_size);

        let mutable_state_size =
            execution_info_size + activities.size + timers.size + children.size + signals.size;

        MutableStateUpdateSessionStats {
            mutable_state_size,
            execution_info_size,
            activity_info_size: activities.size,
            timer_info_size: timers.size,
            child_info_size: children.size,
            signal_info_size: signals.size,
            activity_info_count: activities.count,
            timer_info_count: timers.count,
            child_info_count: children.count,
            signal_info_count: signals.count,
            request_cancel_info_count: snapshot.request_cancel_infos.len(),
            task_count_by_category: task_count_by_category(&snapshot.tasks_by_category),
            ..Default::default()
        }
    }
}
