use anyhow::Result;
use chrono::TimeZone;
use log::info;

use crate::aggregator::Aggregator;
use crate::report::QuickStats;
use crate::repository::EntryRepository;
use crate::window::{read_window, WindowArgs};

/// `stats`サブコマンド。ダッシュボード用の簡易統計を計算する。
pub struct StatsCommand<'a, R: EntryRepository, Tz: TimeZone> {
    repository: &'a R,
    aggregator: &'a Aggregator<Tz>,
}

impl<'a, R: EntryRepository, Tz: TimeZone> StatsCommand<'a, R, Tz> {
    /// 新しい`StatsCommand`を返す。
    pub fn new(repository: &'a R, aggregator: &'a Aggregator<Tz>) -> Self {
        Self {
            repository,
            aggregator,
        }
    }

    /// `stats`サブコマンドの処理を行う。
    pub fn run(&self, args: &WindowArgs) -> Result<QuickStats> {
        let (now, entries) = read_window(self.repository, self.aggregator, args)?;

        let stats = self.aggregator.summarize(&entries, &now);
        info!("Stats computed: streak {} days", stats.streak_days);

        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};

    use super::StatsCommand;
    use crate::aggregator::Aggregator;
    use crate::config::AnalyticsConfig;
    use crate::repository::MockEntryRepository;
    use crate::time_entry::TimeEntry;
    use crate::window::{OutputFormat, WindowArgs};

    /// 分析結果と簡易統計で連続記録日数が一致することを確認する。
    #[test]
    fn test_stats_command_streak_matches_report() {
        let entries: Vec<TimeEntry> = (0..3)
            .map(|days_ago| {
                let start = Utc.with_ymd_and_hms(2024, 3, 6, 9, 0, 0).unwrap()
                    - Duration::days(days_ago);
                TimeEntry {
                    id: days_ago.to_string(),
                    user_id: "user".to_string(),
                    activity: "Write".to_string(),
                    category: "work".to_string(),
                    duration: 20,
                    start_time: start,
                    end_time: start + Duration::minutes(20),
                    mood: Some("focused".to_string()),
                }
            })
            .collect();
        let returned = entries.clone();
        let mut repository = MockEntryRepository::new();
        repository
            .expect_read_entries()
            .times(1)
            .returning(move |_, _| Ok(returned.clone()));
        let aggregator = Aggregator::new(Utc, AnalyticsConfig::default());
        let args = WindowArgs {
            input: "-".to_string(),
            range: None,
            now: Some("2024-03-06T18:00:00Z".to_string()),
            format: OutputFormat::Markdown,
            pretty: false,
        };

        let command = StatsCommand::new(&repository, &aggregator);
        let stats = command.run(&args).unwrap();

        let now = Utc.with_ymd_and_hms(2024, 3, 6, 18, 0, 0).unwrap();
        assert_eq!(stats.streak_days, 3);
        assert_eq!(stats.streak_days, aggregator.aggregate(&entries, &now).streak_days);
        assert_eq!(stats.today_minutes, 20);
        assert_eq!(stats.week_minutes, 60);
        assert_eq!(stats.top_category.as_deref(), Some("work"));
    }
}
