//! 時間記録の分析結果を計算するライブラリ。
//!
//! 集計エンジン([`Aggregator`])は入出力を持たない純粋な計算で、
//! タイムエントリーの取得や期間による絞り込みは呼び出し側([`repository`])の責務とする。

pub mod aggregator;
pub mod config;
pub mod console;
pub mod datetime;
pub mod logger;
pub mod range;
pub mod report;
pub mod report_command;
pub mod repository;
pub mod stats_command;
pub mod streak;
pub mod summary;
pub mod time_entry;
pub mod window;

pub use aggregator::Aggregator;
pub use config::AnalyticsConfig;
pub use report::{AnalyticsReport, QuickStats};
pub use time_entry::TimeEntry;
