//! App - アプリケーション層
//!
//! # 主要コンポーネント
//! - **StatsRecorder**: 計測（StatsComputer）と記録（StatsSink）の組み合わせ

pub mod recorder;

pub use self::recorder::StatsRecorder;
