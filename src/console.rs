use std::io::Write;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::report::{AnalyticsReport, QuickStats};

/// Consoleに分析結果を表示するためのtrait。
pub trait ReportPresenter {
    /// 分析結果を表示する。
    ///
    /// # Arguments
    ///
    /// * `report` - 表示する分析結果
    fn show_report(&mut self, report: &AnalyticsReport) -> Result<()>;

    /// 簡易統計を表示する。
    fn show_stats(&mut self, stats: &QuickStats) -> Result<()>;
}

/// 分析結果をJSONで表示する。フィールド名はUIが参照する形式のまま出力する。
pub struct ConsoleJson<'a, W: Write> {
    writer: &'a mut W,
    pretty: bool,
}

impl<'a, W: Write> ConsoleJson<'a, W> {
    /// 新しい`ConsoleJson`を返す。
    pub fn new(writer: &'a mut W, pretty: bool) -> Self {
        Self { writer, pretty }
    }

    fn write_json<T: Serialize>(&mut self, value: &T) -> Result<()> {
        if self.pretty {
            serde_json::to_writer_pretty(&mut *self.writer, value)
        } else {
            serde_json::to_writer(&mut *self.writer, value)
        }
        .context("Failed to serialize output")?;
        writeln!(self.writer).context("Failed to write output")?;

        Ok(())
    }
}

impl<'a, W: Write> ReportPresenter for ConsoleJson<'a, W> {
    fn show_report(&mut self, report: &AnalyticsReport) -> Result<()> {
        self.write_json(report)
    }

    fn show_stats(&mut self, stats: &QuickStats) -> Result<()> {
        self.write_json(stats)
    }
}

/// 分析結果をMarkdownのlist形式で表示する。
pub struct ConsoleMarkdown<'a, W: Write> {
    writer: &'a mut W,
}

impl<'a, W: Write> ConsoleMarkdown<'a, W> {
    /// 新しい`ConsoleMarkdown`を返す。
    pub fn new(writer: &'a mut W) -> Self {
        Self { writer }
    }
}

impl<'a, W: Write> ReportPresenter for ConsoleMarkdown<'a, W> {
    fn show_report(&mut self, report: &AnalyticsReport) -> Result<()> {
        let w = &mut self.writer;
        writeln!(w, "## Summary")?;
        writeln!(
            w,
            "- Total: {} min ({} entries)",
            report.total_time_tracked, report.total_entries
        )?;
        writeln!(w, "- Streak: {} days", report.streak_days)?;
        writeln!(w, "- Productivity: {}%", report.productivity_score)?;

        writeln!(w, "## Categories")?;
        for share in &report.category_breakdown {
            writeln!(
                w,
                "- {}: {} min ({}%)",
                share.category, share.duration, share.percentage
            )
            .with_context(|| format!("Failed to write category: {:?}", share))?;
        }

        writeln!(w, "## Daily")?;
        for day in &report.category_by_date {
            writeln!(w, "- {}", day.date)?;
            for category in &day.categories {
                writeln!(
                    w,
                    "  - {}: {} min ({})",
                    category.category,
                    category.duration,
                    category.activities.join(", ")
                )
                .with_context(|| format!("Failed to write daily category: {:?}", category))?;
            }
        }

        writeln!(w, "## Moods")?;
        for mood in &report.mood_trends {
            writeln!(w, "- {}: {}", mood.mood, mood.count)?;
        }

        writeln!(w, "## Peak hours")?;
        for hour in &report.peak_hours {
            writeln!(w, "- {:02}:00: {} min", hour.hour, hour.duration)?;
        }

        writeln!(w, "## Weekly")?;
        for week in &report.weekly_comparison {
            writeln!(w, "- {}: {} min", week.week, week.duration)?;
        }

        Ok(())
    }

    fn show_stats(&mut self, stats: &QuickStats) -> Result<()> {
        let w = &mut self.writer;
        writeln!(w, "- Today: {} min", stats.today_minutes)?;
        writeln!(w, "- This week: {} min", stats.week_minutes)?;
        writeln!(w, "- Average session: {} min", stats.average_session_minutes)?;
        writeln!(w, "- Longest session: {} min", stats.longest_session_minutes)?;
        writeln!(
            w,
            "- Top category: {}",
            stats.top_category.as_deref().unwrap_or("-")
        )?;
        writeln!(w, "- Streak: {} days", stats.streak_days)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{ConsoleJson, ConsoleMarkdown, ReportPresenter};
    use crate::report::{
        AnalyticsReport, CategoryActivities, CategoryShare, DateCategories, HourDuration,
        MoodCount, QuickStats, WeekDuration,
    };

    /// テスト用にダミーの分析結果を作成する。
    fn dummy_report() -> AnalyticsReport {
        AnalyticsReport {
            total_time_tracked: 90,
            total_entries: 2,
            streak_days: 1,
            productivity_score: 67,
            category_by_date: vec![DateCategories {
                date: "2024-03-06".to_string(),
                categories: vec![
                    CategoryActivities {
                        category: "work".to_string(),
                        duration: 60,
                        activities: vec!["Write".to_string()],
                    },
                    CategoryActivities {
                        category: "personal".to_string(),
                        duration: 30,
                        activities: vec!["Walk".to_string()],
                    },
                ],
            }],
            mood_trends: vec![MoodCount {
                mood: "focused".to_string(),
                count: 1,
            }],
            peak_hours: vec![
                HourDuration {
                    hour: 9,
                    duration: 60,
                },
                HourDuration {
                    hour: 10,
                    duration: 30,
                },
            ],
            weekly_comparison: vec![WeekDuration {
                week: "Mar 4".to_string(),
                duration: 90,
            }],
            category_breakdown: vec![
                CategoryShare {
                    category: "work".to_string(),
                    duration: 60,
                    percentage: 67,
                },
                CategoryShare {
                    category: "personal".to_string(),
                    duration: 30,
                    percentage: 33,
                },
            ],
        }
    }

    #[rstest]
    #[case::compact(false)]
    #[case::pretty(true)]
    fn test_json_show_report(#[case] pretty: bool) {
        let mut writer = Vec::new();
        let mut presenter = ConsoleJson::new(&mut writer, pretty);

        presenter.show_report(&dummy_report()).unwrap();

        let output = String::from_utf8(writer).unwrap();
        let parsed: AnalyticsReport = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed, dummy_report());
        assert!(output.ends_with('\n'));
    }

    #[test]
    fn test_json_show_stats_omits_missing_top_category() {
        let mut writer = Vec::new();
        let mut presenter = ConsoleJson::new(&mut writer, false);

        presenter.show_stats(&QuickStats::default()).unwrap();

        assert_eq!(
            String::from_utf8(writer).unwrap(),
            "{\"todayMinutes\":0,\"weekMinutes\":0,\"averageSessionMinutes\":0,\"longestSessionMinutes\":0,\"streakDays\":0}\n"
        );
    }

    #[test]
    fn test_markdown_show_report() {
        let mut writer = Vec::new();
        let mut presenter = ConsoleMarkdown::new(&mut writer);

        presenter.show_report(&dummy_report()).unwrap();

        let expected = [
            "## Summary",
            "- Total: 90 min (2 entries)",
            "- Streak: 1 days",
            "- Productivity: 67%",
            "## Categories",
            "- work: 60 min (67%)",
            "- personal: 30 min (33%)",
            "## Daily",
            "- 2024-03-06",
            "  - work: 60 min (Write)",
            "  - personal: 30 min (Walk)",
            "## Moods",
            "- focused: 1",
            "## Peak hours",
            "- 09:00: 60 min",
            "- 10:00: 30 min",
            "## Weekly",
            "- Mar 4: 90 min",
            "",
        ]
        .join("\n");
        assert_eq!(String::from_utf8(writer).unwrap(), expected);
    }

    #[test]
    fn test_markdown_show_stats() {
        let mut writer = Vec::new();
        let mut presenter = ConsoleMarkdown::new(&mut writer);
        let stats = QuickStats {
            today_minutes: 85,
            week_minutes: 125,
            average_session_minutes: 33,
            longest_session_minutes: 60,
            top_category: Some("work".to_string()),
            streak_days: 2,
        };

        presenter.show_stats(&stats).unwrap();

        let expected = [
            "- Today: 85 min",
            "- This week: 125 min",
            "- Average session: 33 min",
            "- Longest session: 60 min",
            "- Top category: work",
            "- Streak: 2 days",
            "",
        ]
        .join("\n");
        assert_eq!(String::from_utf8(writer).unwrap(), expected);
    }
}
