//! Stats - mutable state のサイズと件数の集計
//!
//! - size: エンティティごとのサイズ規則
//! - model: 出力する統計値とマージ
//! - computer: get / create / update / conflict-resolve ごとの集計

pub mod computer;
pub mod model;
pub mod size;

pub use computer::{ComputedStats, StatsComputer};
pub use model::{MutableStateStats, MutableStateUpdateSessionStats, merge_update_session_stats};
