//! mutstat-core
//!
//! Size and shape statistics for workflow mutable state.
//!
//! # モジュール構成
//! - **domain**: 永続化層から渡される workflow state の形（ids, execution, task, state, request）
//! - **stats**: サイズ規則、統計値、StatsComputer
//! - **ports**: 記録先の抽象化（StatsSink）
//! - **impls**: StatsSink の実装（tracing, in-memory）
//! - **app**: StatsRecorder
//! - **codec**: JSON との変換
//! - **config**: SinkConfig

pub mod app;
pub mod codec;
pub mod config;
pub mod domain;
pub mod impls;
pub mod ports;
pub mod stats;

pub use app::StatsRecorder;
pub use config::SinkConfig;
pub use stats::{
    ComputedStats, MutableStateStats, MutableStateUpdateSessionStats, StatsComputer,
    merge_update_session_stats,
};
