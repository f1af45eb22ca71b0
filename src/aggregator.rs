use std::collections::BTreeMap;

use chrono::{DateTime, Local, NaiveDate, TimeZone, Timelike, Utc};
use indexmap::IndexMap;
use log::debug;

use crate::config::AnalyticsConfig;
use crate::datetime::{local_date, week_start};
use crate::report::{
    AnalyticsReport, CategoryActivities, CategoryShare, DateCategories, HourDuration, MoodCount,
    QuickStats, WeekDuration,
};
use crate::streak::calculate_streak;
use crate::summary::summarize;
use crate::time_entry::TimeEntry;

/// 週単位の比較で表示する週の数。
const WEEKLY_WINDOW: usize = 4;

/// タイムエントリーから分析結果を計算する集計エンジン。
///
/// 状態を持たず、入出力も行わない。同じ入力と基準時刻に対しては常に同じ結果を返す。
/// 入力は1人の利用者の、期間で絞り込み済みのエントリーであることを前提とする。
///
/// # Examples
///
/// ```
/// use timelog_analytics::{Aggregator, AnalyticsConfig};
///
/// let aggregator = Aggregator::local(AnalyticsConfig::default());
/// let report = aggregator.aggregate(&[], &chrono::Utc::now());
/// assert_eq!(report.total_entries, 0);
/// ```
#[derive(Clone, Debug)]
pub struct Aggregator<Tz: TimeZone> {
    tz: Tz,
    config: AnalyticsConfig,
}

impl Aggregator<Local> {
    /// ローカルタイムゾーンで暦日を判定する`Aggregator`を返す。
    pub fn local(config: AnalyticsConfig) -> Self {
        Self::new(Local, config)
    }
}

impl<Tz: TimeZone> Aggregator<Tz> {
    /// 新しい`Aggregator`を返す。
    ///
    /// # Arguments
    ///
    /// * `tz` - 日付、時刻、週を判定するタイムゾーン
    /// * `config` - 生産的なカテゴリなどの設定
    pub fn new(tz: Tz, config: AnalyticsConfig) -> Self {
        Self { tz, config }
    }

    pub fn config(&self) -> &AnalyticsConfig {
        &self.config
    }

    pub fn timezone(&self) -> &Tz {
        &self.tz
    }

    /// 全ての指標を計算する。
    ///
    /// # Arguments
    ///
    /// * `entries` - 集計対象のタイムエントリー。活動名の順序は入力順に従う
    /// * `now` - 連続記録日数の起点となる基準時刻
    pub fn aggregate(&self, entries: &[TimeEntry], now: &DateTime<Utc>) -> AnalyticsReport {
        debug!("Aggregating {} entries", entries.len());

        let report = AnalyticsReport {
            total_time_tracked: total_duration(entries),
            total_entries: entries.len(),
            streak_days: self.streak_days(entries, now),
            productivity_score: self.productivity_score(entries),
            category_by_date: self.category_by_date(entries),
            mood_trends: self.mood_trends(entries),
            peak_hours: self.peak_hours(entries),
            weekly_comparison: self.weekly_comparison(entries),
            category_breakdown: self.category_breakdown(entries),
        };
        debug!(
            "Aggregated: total={}, streak={}, score={}, dates={}, weeks={}",
            report.total_time_tracked,
            report.streak_days,
            report.productivity_score,
            report.category_by_date.len(),
            report.weekly_comparison.len()
        );

        report
    }

    /// ダッシュボード用の簡易統計を計算する。連続記録日数は`aggregate`と同じ計算を用いる。
    pub fn summarize(&self, entries: &[TimeEntry], now: &DateTime<Utc>) -> QuickStats {
        summarize(entries, now, &self.tz)
    }

    /// 今日を終点とする連続記録日数。
    pub fn streak_days(&self, entries: &[TimeEntry], now: &DateTime<Utc>) -> u32 {
        calculate_streak(entries, now, &self.tz)
    }

    /// 全記録時間に対する生産的なカテゴリの記録時間の割合(0から100)。
    pub fn productivity_score(&self, entries: &[TimeEntry]) -> i64 {
        let productive = sum_durations(
            entries
                .iter()
                .filter(|entry| self.config.is_productive(&entry.category))
                .map(|entry| entry.duration),
        );

        percentage(productive, total_duration(entries))
    }

    /// 日付ごと、かつカテゴリごとの記録時間と活動名。日付の昇順で返す。
    pub fn category_by_date(&self, entries: &[TimeEntry]) -> Vec<DateCategories> {
        let by_date: BTreeMap<String, IndexMap<String, CategoryActivities>> =
            entries.iter().fold(BTreeMap::new(), |mut acc, entry| {
                let date = local_date(&entry.start_time, &self.tz)
                    .format("%Y-%m-%d")
                    .to_string();
                let bucket = acc
                    .entry(date)
                    .or_insert_with(IndexMap::new)
                    .entry(entry.category.clone())
                    .or_default();
                bucket.duration = bucket.duration.saturating_add(entry.duration);
                bucket.activities.push(entry.activity.clone());
                acc
            });

        by_date
            .into_iter()
            .map(|(date, categories)| DateCategories {
                date,
                categories: categories
                    .into_iter()
                    .map(|(category, bucket)| CategoryActivities {
                        category,
                        ..bucket
                    })
                    .collect(),
            })
            .collect()
    }

    /// 気分ごとの出現回数。最初に現れた順で返し、気分の無いエントリーは数えない。
    pub fn mood_trends(&self, entries: &[TimeEntry]) -> Vec<MoodCount> {
        let moods: IndexMap<&str, u32> = entries
            .iter()
            .filter_map(|entry| entry.mood.as_deref())
            .fold(IndexMap::new(), |mut acc, mood| {
                *acc.entry(mood).or_default() += 1;
                acc
            });

        moods
            .into_iter()
            .map(|(mood, count)| MoodCount {
                mood: mood.to_string(),
                count,
            })
            .collect()
    }

    /// 開始時刻の時間帯ごとの記録時間。記録のある時間帯だけを時刻の昇順で返す。
    pub fn peak_hours(&self, entries: &[TimeEntry]) -> Vec<HourDuration> {
        let hours: BTreeMap<u32, i64> = entries.iter().fold(BTreeMap::new(), |mut acc, entry| {
            let hour = entry.start_time.with_timezone(&self.tz).hour();
            let duration = acc.entry(hour).or_insert(0);
            *duration = duration.saturating_add(entry.duration);
            acc
        });

        hours
            .into_iter()
            .map(|(hour, duration)| HourDuration { hour, duration })
            .collect()
    }

    /// 月曜日始まりの週ごとの記録時間。直近4週だけを古い順で返す。
    ///
    /// 記録の無い週は補完しない。
    pub fn weekly_comparison(&self, entries: &[TimeEntry]) -> Vec<WeekDuration> {
        let weeks: BTreeMap<NaiveDate, i64> =
            entries.iter().fold(BTreeMap::new(), |mut acc, entry| {
                let week = week_start(local_date(&entry.start_time, &self.tz));
                let duration = acc.entry(week).or_insert(0);
                *duration = duration.saturating_add(entry.duration);
                acc
            });

        let skip = weeks.len().saturating_sub(WEEKLY_WINDOW);
        weeks
            .into_iter()
            .skip(skip)
            .map(|(week, duration)| WeekDuration {
                week: week.format("%b %-d").to_string(),
                duration,
            })
            .collect()
    }

    /// カテゴリごとの記録時間と全体に対する割合。記録時間の降順で返す。
    ///
    /// 記録時間が同じ場合は最初に現れたカテゴリを先にする。
    pub fn category_breakdown(&self, entries: &[TimeEntry]) -> Vec<CategoryShare> {
        let categories: IndexMap<&str, i64> =
            entries.iter().fold(IndexMap::new(), |mut acc, entry| {
                let duration = acc.entry(entry.category.as_str()).or_default();
                *duration = duration.saturating_add(entry.duration);
                acc
            });
        let total = sum_durations(categories.values().copied());

        let mut breakdown: Vec<CategoryShare> = categories
            .into_iter()
            .map(|(category, duration)| CategoryShare {
                category: category.to_string(),
                duration,
                percentage: percentage(duration, total),
            })
            .collect();
        breakdown.sort_by(|a, b| b.duration.cmp(&a.duration));

        breakdown
    }
}

/// 記録時間の合計。
pub fn total_duration(entries: &[TimeEntry]) -> i64 {
    sum_durations(entries.iter().map(|entry| entry.duration))
}

/// 記録時間を足し合わせる。`i64`の範囲を超える場合は上限または下限で止める。
pub fn sum_durations<I: IntoIterator<Item = i64>>(durations: I) -> i64 {
    durations.into_iter().fold(0, i64::saturating_add)
}

/// `part / total * 100`を四捨五入した値を返す。`total`が0の場合は0を返す。
pub fn percentage(part: i64, total: i64) -> i64 {
    if total == 0 {
        return 0;
    }
    (part as f64 / total as f64 * 100.0).round() as i64
}
