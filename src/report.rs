use serde::{Deserialize, Serialize};

/// 集計エンジンが返す分析結果。
///
/// フィールド名とネストはUI側がキーで参照するため変更しないこと。
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsReport {
    pub total_time_tracked: i64,
    pub total_entries: usize,
    pub streak_days: u32,
    pub productivity_score: i64,
    pub category_by_date: Vec<DateCategories>,
    pub mood_trends: Vec<MoodCount>,
    pub peak_hours: Vec<HourDuration>,
    pub weekly_comparison: Vec<WeekDuration>,
    pub category_breakdown: Vec<CategoryShare>,
}

/// 1日分のカテゴリ別集計。
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateCategories {
    /// `yyyy-MM-dd`形式の日付
    pub date: String,
    pub categories: Vec<CategoryActivities>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryActivities {
    pub category: String,
    pub duration: i64,
    pub activities: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoodCount {
    pub mood: String,
    pub count: u32,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourDuration {
    /// 0から23の時刻
    pub hour: u32,
    pub duration: i64,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekDuration {
    /// 週の開始日(月曜日)を`Oct 13`のように表したラベル
    pub week: String,
    pub duration: i64,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryShare {
    pub category: String,
    pub duration: i64,
    pub percentage: i64,
}

/// ダッシュボード上部に表示する簡易統計。
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuickStats {
    pub today_minutes: i64,
    pub week_minutes: i64,
    pub average_session_minutes: i64,
    pub longest_session_minutes: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_category: Option<String>,
    pub streak_days: u32,
}
