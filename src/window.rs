use anyhow::{Context, Result};
use chrono::{DateTime, TimeZone, Utc};
use log::info;

use crate::aggregator::Aggregator;
use crate::datetime::{self, parse_instant};
use crate::range::ReportRange;
use crate::repository::EntryRepository;
use crate::time_entry::TimeEntry;

/// 出力形式。
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ArgEnum)]
pub enum OutputFormat {
    Json,
    Markdown,
}

/// `report`と`stats`サブコマンドに共通の引数。
#[derive(Clone, Debug, clap::Args)]
pub struct WindowArgs {
    #[clap(
        short = 'i',
        long = "input",
        default_value = "-",
        help = "JSON file with time entries, or - for stdin"
    )]
    pub input: String,

    #[clap(
        short = 'r',
        long = "range",
        help = "Reporting window: 7d, 30d, 90d, 365d or all"
    )]
    pub range: Option<ReportRange>,

    #[clap(
        short = 'n',
        long = "now",
        help = "Reference time in RFC3339 or YYYY-MM-DD (defaults to the current time)"
    )]
    pub now: Option<String>,

    #[clap(
        short = 'f',
        long = "format",
        arg_enum,
        default_value = "json",
        help = "Output format"
    )]
    pub format: OutputFormat,

    #[clap(long = "pretty", help = "Pretty-print JSON output")]
    pub pretty: bool,
}

/// 基準時刻を決め、期間内のタイムエントリーを取得する。
///
/// 期間が指定されていない場合は設定の既定の期間を利用する。
pub fn read_window<R, Tz>(
    repository: &R,
    aggregator: &Aggregator<Tz>,
    args: &WindowArgs,
) -> Result<(DateTime<Utc>, Vec<TimeEntry>)>
where
    R: EntryRepository,
    Tz: TimeZone,
{
    let now = match &args.now {
        Some(s) => parse_instant(s, aggregator.timezone()).context("Failed to parse --now")?,
        None => datetime::now(),
    };
    let range = args.range.unwrap_or(aggregator.config().default_range);
    let (start_at, end_at) = range
        .window(&now, aggregator.timezone())
        .with_context(|| format!("Failed to resolve range: {}", range))?;
    info!("Range: {}, Start at: {:?}, End at: {}", range, start_at, end_at);

    let entries = repository
        .read_entries(start_at, end_at)
        .context("Failed to compute analytics: could not retrieve time entries")?;
    info!("Time entries retrieved successfully.");

    Ok((now, entries))
}
