use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::range::ReportRange;

const APP_DIR_NAME: &str = "timelog-analytics";
const CONFIG_FILE_NAME: &str = "config.json";

/// 集計処理の設定。
///
/// 生産的とみなすカテゴリは利用者ごとに拡張できるよう、コードに埋め込まずに設定で渡す。
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnalyticsConfig {
    pub productive_categories: BTreeSet<String>,
    pub default_range: ReportRange,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            productive_categories: ["work", "education"]
                .into_iter()
                .map(String::from)
                .collect(),
            default_range: ReportRange::default(),
        }
    }
}

impl AnalyticsConfig {
    /// 設定を読み込む。
    ///
    /// `path`が指定された場合はそのファイルを読み込み、存在しなければエラーとする。
    /// 指定されない場合は既定の場所を探し、ファイルが無ければ既定値を返す。
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => match default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path),
                _ => {
                    debug!("No config file found, using defaults");
                    Ok(Self::default())
                }
            },
        }
    }

    /// 指定したJSONファイルから設定を読み込む。
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        info!("Loaded config from {}", path.display());

        Ok(config)
    }

    /// 生産的なカテゴリを上書きする。
    pub fn with_productive_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.productive_categories = categories.into_iter().map(Into::into).collect();
        self
    }

    /// カテゴリが生産的なカテゴリに含まれるかを返す。
    pub fn is_productive(&self, category: &str) -> bool {
        self.productive_categories.contains(category)
    }
}

/// 既定の設定ファイルのパスを返す。
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
}
