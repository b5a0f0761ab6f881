//! Ports - 外部への出口の抽象化
//!
//! 計測結果を受け取る側（telemetry）はこの crate の外にあります。

pub mod stats_sink;

pub use self::stats_sink::{StatsScope, StatsSink};
