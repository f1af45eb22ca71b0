use std::fmt;
use std::str::FromStr;

use anyhow::{bail, Result};
use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::datetime::{local_date, start_of_day};

/// 集計対象とする期間のプリセット。
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportRange {
    #[serde(rename = "7d")]
    Week,
    #[default]
    #[serde(rename = "30d")]
    Month,
    #[serde(rename = "90d")]
    Quarter,
    #[serde(rename = "365d")]
    Year,
    #[serde(rename = "all")]
    All,
}

impl ReportRange {
    /// 期間に含まれる日数を返す。`All`の場合は`None`。
    pub fn days(&self) -> Option<i64> {
        match self {
            Self::Week => Some(7),
            Self::Month => Some(30),
            Self::Quarter => Some(90),
            Self::Year => Some(365),
            Self::All => None,
        }
    }

    /// 基準時刻で終わる期間を返す。
    ///
    /// 開始は今日を含めて`days`日前のローカル時刻00:00:00とする。
    /// `All`の場合は開始日時を`None`とする。
    pub fn window<Tz: TimeZone>(
        &self,
        now: &DateTime<Utc>,
        tz: &Tz,
    ) -> Result<(Option<DateTime<Utc>>, DateTime<Utc>)> {
        let start = match self.days() {
            Some(days) => {
                let first_day = local_date(now, tz) - Duration::days(days - 1);
                Some(start_of_day(first_day, tz)?)
            }
            None => None,
        };

        Ok((start, *now))
    }
}

impl FromStr for ReportRange {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "7d" => Ok(Self::Week),
            "30d" => Ok(Self::Month),
            "90d" => Ok(Self::Quarter),
            "365d" => Ok(Self::Year),
            "all" => Ok(Self::All),
            _ => bail!("Unknown range: {} (expected 7d, 30d, 90d, 365d or all)", s),
        }
    }
}

impl fmt::Display for ReportRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Week => "7d",
            Self::Month => "30d",
            Self::Quarter => "90d",
            Self::Year => "365d",
            Self::All => "all",
        };
        write!(f, "{}", label)
    }
}
