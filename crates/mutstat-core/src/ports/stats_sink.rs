//! StatsSink port - 計測結果の記録先の抽象化
//!
//! 実装:
//! - TracingStatsSink: tracing へ構造化イベントとして出力
//! - InMemoryStatsSink: テスト用に記録を保持
//!
//! 将来: メトリクス backend (statsd, Prometheus など) への送信

use serde::{Deserialize, Serialize};

use crate::domain::PersistenceOp;
use crate::stats::{MutableStateStats, MutableStateUpdateSessionStats};

/// Which persistence operation (and optionally which domain) a record is for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsScope {
    pub op: PersistenceOp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
}

impl StatsScope {
    pub fn new(op: PersistenceOp) -> Self {
        Self { op, domain: None }
    }

    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }
}

/// Whoever records the numbers.
///
/// Recording is fire-and-forget: a sink must not fail the caller.
pub trait StatsSink: Send + Sync {
    fn record_mutable_state(&self, scope: &StatsScope, stats: &MutableStateStats);

    fn record_update_session(&self, scope: &StatsScope, stats: &MutableStateUpdateSessionStats);
}
