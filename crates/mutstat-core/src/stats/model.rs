//! Stats model: the values handed to the telemetry path.
//!
//! Both shapes keep `mutable_state_size` equal to the sum of their per-kind
//! sizes. Merging is a field-wise sum, so the invariant survives any merge.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::iter::Sum;
use std::ops::{Add, AddAssign};

use crate::domain::HistoryTaskCategory;

/// Size and shape of a full mutable state, as loaded from storage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MutableStateStats {
    pub mutable_state_size: usize,

    pub execution_info_size: usize,
    pub activity_info_size: usize,
    pub timer_info_size: usize,
    pub child_info_size: usize,
    pub signal_info_size: usize,
    pub buffered_events_size: usize,

    pub activity_info_count: usize,
    pub timer_info_count: usize,
    pub child_info_count: usize,
    pub signal_info_count: usize,
    pub request_cancel_info_count: usize,
    pub buffered_events_count: usize,
}

impl MutableStateStats {
    /// Sum of the per-kind sizes.
    pub fn component_size(&self) -> usize {
        self.execution_info_size
            + self.activity_info_size
            + self.timer_info_size
            + self.child_info_size
            + self.signal_info_size
            + self.buffered_events_size
    }
}

impl AddAssign<&MutableStateStats> for MutableStateStats {
    fn add_assign(&mut self, other: &MutableStateStats) {
        self.mutable_state_size += other.mutable_state_size;

        self.execution_info_size += other.execution_info_size;
        self.activity_info_size += other.activity_info_size;
        self.timer_info_size += other.timer_info_size;
        self.child_info_size += other.child_info_size;
        self.signal_info_size += other.signal_info_size;
        self.buffered_events_size += other.buffered_events_size;

        self.activity_info_count += other.activity_info_count;
        self.timer_info_count += other.timer_info_count;
        self.child_info_count += other.child_info_count;
        self.signal_info_count += other.signal_info_count;
        self.request_cancel_info_count += other.request_cancel_info_count;
        self.buffered_events_count += other.buffered_events_count;
    }
}

impl Add for MutableStateStats {
    type Output = Self;

    fn add(mut self, other: Self) -> Self {
        self += &other;
        self
    }
}

impl Sum for MutableStateStats {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

/// Size and shape of what one persistence write session touches.
///
/// Upsert counts and sizes describe rows written; delete counts describe rows
/// removed (only keys are known for those, so they carry no size).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MutableStateUpdateSessionStats {
    pub mutable_state_size: usize,

    pub execution_info_size: usize,
    pub activity_info_size: usize,
    pub timer_info_size: usize,
    pub child_info_size: usize,
    pub signal_info_size: usize,
    pub buffered_events_size: usize,

    pub activity_info_count: usize,
    pub timer_info_count: usize,
    pub child_info_count: usize,
    pub signal_info_count: usize,
    pub request_cancel_info_count: usize,

    pub delete_activity_info_count: usize,
    pub delete_timer_info_count: usize,
    pub delete_child_info_count: usize,
    pub delete_signal_info_count: usize,
    pub delete_request_cancel_info_count: usize,

    pub task_count_by_category: BTreeMap<HistoryTaskCategory, usize>,
}

impl MutableStateUpdateSessionStats {
    /// Sum of the per-kind sizes.
    pub fn component_size(&self) -> usize {
        self.execution_info_size
            + self.activity_info_size
            + self.timer_info_size
            + self.child_info_size
            + self.signal_info_size
            + self.buffered_events_size
    }

    /// Total number of history tasks across categories.
    pub fn task_count(&self) -> usize {
        self.task_count_by_category.values().sum()
    }
}

impl AddAssign<&MutableStateUpdateSessionStats> for MutableStateUpdateSessionStats {
    fn add_assign(&mut self, other: &MutableStateUpdateSessionStats) {
        self.mutable_state_size += other.mutable_state_size;

        self.execution_info_size += other.execution_info_size;
        self.activity_info_size += other.activity_info_size;
        self.timer_info_size += other.timer_info_size;
        self.child_info_size += other.child_info_size;
        self.signal_info_size += other.signal_info_size;
        self.buffered_events_size += other.buffered_events_size;

        self.activity_info_count += other.activity_info_count;
        self.timer_info_count += other.timer_info_count;
        self.child_info_count += other.child_info_count;
        self.signal_info_count += other.signal_info_count;
        self.request_cancel_info_count += other.request_cancel_info_count;

        self.delete_activity_info_count += other.delete_activity_info_count;
        self.delete_timer_info_count += other.delete_timer_info_count;
        self.delete_child_info_count += other.delete_child_info_count;
        self.delete_signal_info_count += other.delete_signal_info_count;
        self.delete_request_cancel_info_count += other.delete_request_cancel_info_count;

        for (category, count) in &other.task_count_by_category {
            *self.task_count_by_category.entry(*category).or_default() += count;
        }
    }
}

impl Add for MutableStateUpdateSessionStats {
    type Output = Self;

    fn add(mut self, other: Self) -> Self {
        self += &other;
        self
    }
}

impl Sum for MutableStateUpdateSessionStats {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

/// Merge any number of session stats into one. Empty input gives all zeros.
pub fn merge_update_session_stats<I>(stats: I) -> MutableStateUpdateSessionStats
where
    I: IntoIterator<Item = MutableStateUpdateSessionStats>,
{
    stats.into_iter().sum()
}
