use anyhow::Result;
use chrono::TimeZone;
use log::info;

use crate::aggregator::Aggregator;
use crate::report::AnalyticsReport;
use crate::repository::EntryRepository;
use crate::window::{read_window, WindowArgs};

/// `report`サブコマンド。期間内のタイムエントリーから分析結果を計算する。
pub struct ReportCommand<'a, R: EntryRepository, Tz: TimeZone> {
    repository: &'a R,
    aggregator: &'a Aggregator<Tz>,
}

impl<'a, R: EntryRepository, Tz: TimeZone> ReportCommand<'a, R, Tz> {
    /// 新しい`ReportCommand`を返す。
    ///
    /// # Arguments
    /// * `repository` - タイムエントリーを取得するためのリポジトリ
    /// * `aggregator` - 集計エンジン
    pub fn new(repository: &'a R, aggregator: &'a Aggregator<Tz>) -> Self {
        Self {
            repository,
            aggregator,
        }
    }

    /// `report`サブコマンドの処理を行う。
    ///
    /// 期間が指定されていない場合は設定の既定の期間、基準時刻が指定されていない場合は現在時刻を利用する。
    pub fn run(&self, args: &WindowArgs) -> Result<AnalyticsReport> {
        let (now, entries) = read_window(self.repository, self.aggregator, args)?;

        let report = self.aggregator.aggregate(&entries, &now);
        info!(
            "Report computed: {} entries, {} minutes",
            report.total_entries, report.total_time_tracked
        );

        Ok(report)
    }
}
