//! TracingStatsSink - 計測結果を tracing の構造化イベントとして出力
//!
//! 通常の記録は debug、閾値超過は warn。

use crate::config::SinkConfig;
use crate::ports::{StatsScope, StatsSink};
use crate::stats::{MutableStateStats, MutableStateUpdateSessionStats};

/// A threshold a measurement went over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Breach {
    MutableStateSize { size: usize, limit: usize },
    BufferedEventsCount { count: usize, limit: usize },
    BufferedEventsSize { size: usize, limit: usize },
}

#[derive(Debug, Clone, Default)]
pub struct TracingStatsSink {
    config: SinkConfig,
}

impl TracingStatsSink {
    pub fn new(config: SinkConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SinkConfig {
        &self.config
    }

    /// Thresholds exceeded by the given totals.
    ///
    /// `buffered_events_count` is `None` for writes, which carry at most one
    /// buffered event and are not checked against the count limit.
    pub fn breaches(
        &self,
        mutable_state_size: usize,
        buffered_events_size: usize,
        buffered_events_count: Option<usize>,
    ) -> Vec<Breach> {
        let c = &self.config;
        let mut out = Vec::new();
        if mutable_state_size > c.warn_mutable_state_size_bytes {
            out.push(Breach::MutableStateSize {
                size: mutable_state_size,
                limit: c.warn_mutable_state_size_bytes,
            });
        }
        if let Some(count) = buffered_events_count {
            if count > c.warn_buffered_events_count {
                out.push(Breach::BufferedEventsCount {
                    count,
                    limit: c.warn_buffered_events_count,
                });
            }
        }
        if buffered_events_size > c.warn_buffered_events_size_bytes {
            out.push(Breach::BufferedEventsSize {
                size: buffered_events_size,
                limit: c.warn_buffered_events_size_bytes,
            });
        }
        out
    }

    fn warn_breaches(&self, scope: &StatsScope, breaches: &[Breach]) {
        let domain = scope.domain.as_deref().unwrap_or("");
        for breach in breaches {
            match *breach {
                Breach::MutableStateSize { size, limit } => tracing::warn!(
                    op = %scope.op,
                    domain,
                    size,
                    limit,
                    "mutable state size over limit"
                ),
                Breach::BufferedEventsCount { count, limit } => tracing::warn!(
                    op = %scope.op,
                    domain,
                    count,
                    limit,
                    "buffered events count over limit"
                ),
                Breach::BufferedEventsSize { size, limit } => tracing::warn!(
                    op = %scope.op,
                    domain,
                    size,
                    limit,
                    "buffered events size over limit"
                ),
            }
        }
    }
}

impl StatsSink for TracingStatsSink {
    fn record_mutable_state(&self, scope: &StatsScope, stats: &MutableStateStats) {
        tracing::debug!(
            op = %scope.op,
            domain = scope.domain.as_deref().unwrap_or(""),
            mutable_state_size = stats.mutable_state_size,
            execution_info_size = stats.execution_info_size,
            activity_info_size = stats.activity_info_size,
            timer_info_size = stats.timer_info_size,
            child_info_size = stats.child_info_size,
            signal_info_size = stats.signal_info_size,
            buffered_events_size = stats.buffered_events_size,
            activity_info_count = stats.activity_info_count,
            timer_info_count = stats.timer_info_count,
            child_info_count = stats.child_info_count,
            signal_info_count = stats.signal_info_count,
            request_cancel_info_count = stats.request_cancel_info_count,
            buffered_events_count = stats.buffered_events_count,
            "mutable state stats"
        );

        let breaches = self.breaches(
            stats.mutable_state_size,
            stats.buffered_events_size,
            Some(stats.buffered_events_count),
        );
        self.warn_breaches(scope, &breaches);
    }

    fn record_update_session(&self, scope: &StatsScope, stats: &MutableStateUpdateSessionStats) {
        tracing::debug!(
            op = %scope.op,
            domain = scope.domain.as_deref().unwrap_or(""),
            mutable_state_size = stats.mutable_state_size,
            execution_info_size = stats.execution_info_size,
            activity_info_size = stats.activity_info_size,
            timer_info_size = stats.timer_info_size,
            child_info_size = stats.child_info_size,
            signal_info_size = stats.signal_info_size,
            buffered_events_size = stats.buffered_events_size,
            activity_info_count = stats.activity_info_count,
            timer_info_count = stats.timer_info_count,
            child_info_count = stats.child_info_count,
            signal_info_count = stats.signal_info_count,
            request_cancel_info_count = stats.request_cancel_info_count,
            delete_activity_info_count = stats.delete_activity_info_count,
            delete_timer_info_count = stats.delete_timer_info_count,
            delete_child_info_count = stats.delete_child_info_count,
            delete_signal_info_count = stats.delete_signal_info_count,
            delete_request_cancel_info_count = stats.delete_request_cancel_info_count,
            task_count = stats.task_count(),
            "mutable state update session stats"
        );
        for (category, count) in &stats.task_count_by_category {
            tracing::trace!(op = %scope.op, %category, count, "task count by category");
        }

        let breaches = self.breaches(stats.mutable_state_size, stats.buffered_events_size, None);
        self.warn_breaches(scope, &breaches);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PersistenceOp;
    use rstest::rstest;

    fn sink() -> TracingStatsSink {
        TracingStatsSink::new(SinkConfig {
            warn_mutable_state_size_bytes: 100,
            warn_buffered_events_count: 3,
            warn_buffered_events_size_bytes: 50,
        })
    }

    #[rstest]
    #[case::under(100, 50, Some(3), vec![])]
    #[case::size(101, 0, Some(0), vec![Breach::MutableStateSize { size: 101, limit: 100 }])]
    #[case::count(0, 0, Some(4), vec![Breach::BufferedEventsCount { count: 4, limit: 3 }])]
    #[case::count_unchecked_for_writes(0, 0, None, vec![])]
    #[case::buffered_size(60, 51, None, vec![Breach::BufferedEventsSize { size: 51, limit: 50 }])]
    fn breaches_follow_thresholds(
        #[case] size: usize,
        #[case] buffered_size: usize,
        #[case] buffered_count: Option<usize>,
        #[case] expected: Vec<Breach>,
    ) {
        assert_eq!(sink().breaches(size, buffered_size, buffered_count), expected);
    }

    #[test]
    fn all_breaches_are_reported_together() {
        let breaches = sink().breaches(1_000, 1_000, Some(1_000));
        assert_eq!(breaches.len(), 3);
    }

    #[test]
    fn recording_without_subscriber_is_harmless() {
        let scope = StatsScope::new(PersistenceOp::Update);
        let stats = MutableStateUpdateSessionStats {
            mutable_state_size: 1_000,
            buffered_events_size: 1_000,
            ..Default::default()
        };
        sink().record_update_session(&scope, &stats);
        sink().record_mutable_state(&StatsScope::new(PersistenceOp::Get), &Default::default());
    }
}
