use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use log::info;

#[cfg(test)]
use mockall::automock;

use crate::time_entry::TimeEntry;

/// タイムエントリーを取得するためのtrait。
///
/// 利用者による絞り込みと期間による絞り込みは実装側の責務とし、集計エンジンでは行わない。
#[cfg_attr(test, automock)]
pub trait EntryRepository {
    /// 指定された期間に開始したタイムエントリーを開始時刻順に取得する。
    ///
    /// # Arguments
    ///
    /// * `start_at` - 取得するタイムエントリーの開始日時。`None`の場合は下限なし
    /// * `end_at` - 取得するタイムエントリーの終了日時
    fn read_entries(
        &self,
        start_at: Option<DateTime<Utc>>,
        end_at: DateTime<Utc>,
    ) -> Result<Vec<TimeEntry>>;
}

/// エントリーの読み込み元。
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EntrySource {
    Stdin,
    File(PathBuf),
}

impl From<&str> for EntrySource {
    fn from(s: &str) -> Self {
        match s {
            "-" => Self::Stdin,
            path => Self::File(PathBuf::from(path)),
        }
    }
}

/// JSON配列で書かれたタイムエントリーを読み込むリポジトリ。
///
/// # Examples
///
/// ```no_run
/// use timelog_analytics::repository::{EntryRepository, JsonFileRepository};
///
/// let repository = JsonFileRepository::new("entries.json".into());
/// let entries = repository.read_entries(None, chrono::Utc::now()).unwrap();
/// ```
pub struct JsonFileRepository {
    source: EntrySource,
}

impl JsonFileRepository {
    /// 新しい`JsonFileRepository`を返す。
    pub fn new(source: EntrySource) -> Self {
        Self { source }
    }

    fn load(&self) -> Result<Vec<TimeEntry>> {
        match &self.source {
            EntrySource::Stdin => {
                parse_entries(io::stdin().lock()).context("Failed to read entries from stdin")
            }
            EntrySource::File(path) => {
                let file = File::open(path)
                    .with_context(|| format!("Failed to open entries file: {}", path.display()))?;
                parse_entries(BufReader::new(file))
                    .with_context(|| format!("Failed to read entries from {}", path.display()))
            }
        }
    }
}

impl EntryRepository for JsonFileRepository {
    fn read_entries(
        &self,
        start_at: Option<DateTime<Utc>>,
        end_at: DateTime<Utc>,
    ) -> Result<Vec<TimeEntry>> {
        let entries = self.load()?;
        let loaded = entries.len();

        let mut entries = filter_window(entries, start_at, end_at);
        entries.sort_by_key(|entry| entry.start_time);
        info!("Entries in window: {} of {}", entries.len(), loaded);

        Ok(entries)
    }
}

/// JSON配列をタイムエントリーとして読み込む。
pub fn parse_entries<R: Read>(reader: R) -> Result<Vec<TimeEntry>> {
    let entries: Vec<TimeEntry> =
        serde_json::from_reader(reader).context("Failed to deserialize time entries")?;

    Ok(entries)
}

/// 開始時刻が期間内のエントリーだけを残す。
fn filter_window(
    entries: Vec<TimeEntry>,
    start_at: Option<DateTime<Utc>>,
    end_at: DateTime<Utc>,
) -> Vec<TimeEntry> {
    entries
        .into_iter()
        .filter(|entry| start_at.map_or(true, |start| entry.start_time >= start))
        .filter(|entry| entry.start_time <= end_at)
        .collect()
}
