//! Per-entity size rules.
//!
//! Sizes approximate the serialized footprint of each row: the byte length of
//! its strings and payloads. Absent payloads count as zero.

use std::collections::BTreeMap;

use crate::domain::{
    ActivityInfo, ChildExecutionInfo, DataBlob, ExecutionInfo, HistoryTaskCategory, SignalInfo,
    TasksByCategory, TimerInfo,
};

fn blob_size(blob: Option<&DataBlob>) -> usize {
    blob.map_or(0, DataBlob::len)
}

pub fn execution_info_size(info: &ExecutionInfo) -> usize {
    info.workflow_id.len()
        + info.task_list.len()
        + info.workflow_type_name.len()
        + info.parent_workflow_id.len()
}

pub fn activity_info_size(ai: &ActivityInfo) -> usize {
    ai.activity_id.len()
        + blob_size(ai.scheduled_event.as_ref())
        + blob_size(ai.started_event.as_ref())
        + ai.details.len()
}

pub fn timer_info_size(ti: &TimerInfo) -> usize {
    ti.timer_id.len()
}

/// Only the event payloads count; the child's identifiers are not measured.
pub fn child_info_size(ci: &ChildExecutionInfo) -> usize {
    blob_size(ci.initiated_event.as_ref()) + blob_size(ci.started_event.as_ref())
}

pub fn signal_info_size(si: &SignalInfo) -> usize {
    si.signal_name.len() + si.input.len() + si.control.len()
}

pub fn task_count_by_category(tasks: &TasksByCategory) -> BTreeMap<HistoryTaskCategory, usize> {
    tasks
        .iter()
        .map(|(category, tasks)| (*category, tasks.len()))
        .collect()
}

/// Running count + size for one entity kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Tally {
    pub count: usize,
    pub size: usize,
}

impl Tally {
    pub fn of<'a, T: 'a>(items: impl IntoIterator<Item = &'a T>, size_of: fn(&T) -> usize) -> Self {
        items.into_iter().fold(Self::default(), |mut tally, item| {
            tally.count += 1;
            tally.size += size_of(item);
            tally
        })
    }
}
