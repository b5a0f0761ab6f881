//! InMemoryStatsSink - テスト用の記録先
//!
//! Mutex<Vec<_>> に記録を積むだけ。

use std::sync::{Mutex, PoisonError};

use crate::ports::{StatsScope, StatsSink};
use crate::stats::{ComputedStats, MutableStateStats, MutableStateUpdateSessionStats};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedStats {
    pub scope: StatsScope,
    pub stats: ComputedStats,
}

#[derive(Debug, Default)]
pub struct InMemoryStatsSink {
    records: Mutex<Vec<RecordedStats>>,
}

impl InMemoryStatsSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of everything recorded so far, oldest first.
    pub fn records(&self) -> Vec<RecordedStats> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn push(&self, scope: &StatsScope, stats: ComputedStats) {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(RecordedStats {
                scope: scope.clone(),
                stats,
            });
    }
}

impl StatsSink for InMemoryStatsSink {
    fn record_mutable_state(&self, scope: &StatsScope, stats: &MutableStateStats) {
        self.push(scope, ComputedStats::MutableState(stats.clone()));
    }

    fn record_update_session(&self, scope: &StatsScope, stats: &MutableStateUpdateSessionStats) {
        self.push(scope, ComputedStats::UpdateSession(stats.clone()));
    }
}
