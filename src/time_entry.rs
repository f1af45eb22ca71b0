use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 1件の活動記録を表す構造体。
///
/// 集計処理では値を検証しない。`duration`が負の値であったり、`end_time`が`start_time`より前であっても
/// そのまま計算に利用する。
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeEntry {
    pub id: String,
    pub user_id: String,
    pub activity: String,
    pub category: String,
    /// 分単位の記録時間
    pub duration: i64,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mood: Option<String>,
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::TimeEntry;

    /// camelCaseのJSONから読み込めることを確認する。
    #[test]
    fn test_deserialize_camel_case() {
        let json = r#"{
            "id": "e1",
            "userId": "u1",
            "activity": "Write report",
            "category": "work",
            "duration": 45,
            "startTime": "2024-03-04T09:00:00Z",
            "endTime": "2024-03-04T09:45:00Z",
            "mood": "focused"
        }"#;

        let entry: TimeEntry = serde_json::from_str(json).unwrap();

        assert_eq!(entry.user_id, "u1");
        assert_eq!(entry.duration, 45);
        assert_eq!(
            entry.start_time,
            Utc.with_ymd_and_hms(2024, 3, 4, 9, 0, 0).unwrap()
        );
        assert_eq!(entry.mood.as_deref(), Some("focused"));
    }

    /// moodが無い場合は`None`になることを確認する。
    #[test]
    fn test_deserialize_without_mood() {
        let json = r#"{
            "id": "e2",
            "userId": "u1",
            "activity": "Run",
            "category": "health",
            "duration": 30,
            "startTime": "2024-03-04T07:00:00+09:00",
            "endTime": "2024-03-04T07:30:00+09:00"
        }"#;

        let entry: TimeEntry = serde_json::from_str(json).unwrap();

        assert_eq!(entry.mood, None);
        assert_eq!(
            entry.start_time,
            Utc.with_ymd_and_hms(2024, 3, 3, 22, 0, 0).unwrap()
        );
    }
}
