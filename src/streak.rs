use std::collections::HashSet;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};

use crate::datetime::local_date;
use crate::time_entry::TimeEntry;

/// 遡る日数の上限。異常な入力で無限に近いループにならないようにするためのもの。
const MAX_STREAK_DAYS: u32 = 365;

/// 今日を終点とする連続記録日数を計算する。
///
/// 今日から1日ずつ遡り、記録のある日が途切れた時点で終了する。
/// 今日の記録が無い場合は、昨日までに連続した記録があっても0を返す。
///
/// # Arguments
///
/// * `entries` - 集計対象のタイムエントリー
/// * `now` - 基準時刻
/// * `tz` - 暦日を判定するタイムゾーン
pub fn calculate_streak<Tz: TimeZone>(entries: &[TimeEntry], now: &DateTime<Utc>, tz: &Tz) -> u32 {
    let active_dates: HashSet<NaiveDate> = entries
        .iter()
        .map(|entry| local_date(&entry.start_time, tz))
        .collect();

    let mut streak = 0;
    let mut current = local_date(now, tz);
    while streak < MAX_STREAK_DAYS && active_dates.contains(&current) {
        streak += 1;
        current = match current.pred_opt() {
            Some(previous) => previous,
            None => break,
        };
    }

    streak
}
