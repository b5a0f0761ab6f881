//! Impls - ports の実装
//!
//! # 含まれる実装
//! - **TracingStatsSink**: tracing への出力（閾値超過は warn）
//! - **InMemoryStatsSink**: テスト用

pub mod inmem_sink;
pub mod tracing_sink;

pub use self::inmem_sink::{InMemoryStatsSink, RecordedStats};
pub use self::tracing_sink::{Breach, TracingStatsSink};
