use chrono::{DateTime, TimeZone, Utc};
use indexmap::IndexMap;

use crate::aggregator::total_duration;
use crate::datetime::{local_date, week_start};
use crate::report::QuickStats;
use crate::streak::calculate_streak;
use crate::time_entry::TimeEntry;

/// ダッシュボード用の簡易統計を計算する。
///
/// 連続記録日数は分析結果と同じ`calculate_streak`で計算するため、両者が食い違うことはない。
pub fn summarize<Tz: TimeZone>(entries: &[TimeEntry], now: &DateTime<Utc>, tz: &Tz) -> QuickStats {
    let today = local_date(now, tz);
    let this_week = week_start(today);

    let mut today_minutes: i64 = 0;
    let mut week_minutes: i64 = 0;
    let mut categories: IndexMap<&str, i64> = IndexMap::new();
    for entry in entries {
        let date = local_date(&entry.start_time, tz);
        if date == today {
            today_minutes = today_minutes.saturating_add(entry.duration);
        }
        if week_start(date) == this_week {
            week_minutes = week_minutes.saturating_add(entry.duration);
        }
        let duration = categories.entry(entry.category.as_str()).or_default();
        *duration = duration.saturating_add(entry.duration);
    }

    let total = total_duration(entries);
    let average_session_minutes = if entries.is_empty() {
        0
    } else {
        (total as f64 / entries.len() as f64).round() as i64
    };

    // 同じ記録時間の場合は先に現れたカテゴリを優先する
    let top_category = categories
        .into_iter()
        .fold(None, |top: Option<(&str, i64)>, (category, duration)| match top {
            Some((_, best)) if best >= duration => top,
            _ => Some((category, duration)),
        })
        .map(|(category, _)| category.to_string());

    QuickStats {
        today_minutes,
        week_minutes,
        average_session_minutes,
        longest_session_minutes: entries.iter().map(|entry| entry.duration).max().unwrap_or(0),
        top_category,
        streak_days: calculate_streak(entries, now, tz),
    }
}
