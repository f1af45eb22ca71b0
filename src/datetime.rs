use anyhow::{Context, Result};
use chrono::{DateTime, Datelike, Duration, FixedOffset, NaiveDate, TimeZone, Utc};

#[cfg(not(test))]
/// 基準時刻として利用する現在のUTC時間を取得する。
pub fn now() -> DateTime<Utc> {
    Utc::now()
}


#[cfg(test)]
pub use mock_clock::now;

/// 指定したタイムゾーンでの暦日を返す。
pub fn local_date<Tz: TimeZone>(instant: &DateTime<Utc>, tz: &Tz) -> NaiveDate {
    instant.with_timezone(tz).date_naive()
}

/// 日付が属する週の開始日(月曜日)を返す。
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}

/// 基準時刻を表す文字列をパースする。
///
/// RFC3339形式の日時、または`YYYY-MM-DD`形式の日付を受け付ける。
/// 日付のみの場合は指定したタイムゾーンでのその日の終わり(23:59:59)とする。
pub fn parse_instant<Tz: TimeZone>(s: &str, tz: &Tz) -> Result<DateTime<Utc>> {
    if let Ok(datetime) = DateTime::parse_from_rfc3339(s) {
        return Ok(datetime.to_utc());
    }

    let naive_date = NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("Failed to parse date: {}", s))?;
    let naive_datetime = naive_date
        .and_hms_opt(23, 59, 59)
        .context("Failed to set hour, minute, and second")?;
    let datetime = tz
        .from_local_datetime(&naive_datetime)
        .earliest()
        .context("Failed to convert to local datetime")?
        .to_utc();

    Ok(datetime)
}

/// `+09:00`や`-05:30`の形式でUTCからのオフセットをパースする。
pub fn parse_offset(s: &str) -> Result<FixedOffset> {
    s.parse::<FixedOffset>()
        .with_context(|| format!("Failed to parse offset (expected +HH:MM): {}", s))
}

/// 指定した日付の00:00:00をUTCで返す。
pub fn start_of_day<Tz: TimeZone>(date: NaiveDate, tz: &Tz) -> Result<DateTime<Utc>> {
    let naive_datetime = date
        .and_hms_opt(0, 0, 0)
        .context("Failed to set hour, minute, and second")?;
    let datetime = tz
        .from_local_datetime(&naive_datetime)
        .earliest()
        .with_context(|| format!("Failed to resolve start of day: {}", date))?
        .to_utc();

    Ok(datetime)
}
