use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{FixedOffset, TimeZone};
use clap::{Parser, Subcommand};
use log::info;

use timelog_analytics::console::{ConsoleJson, ConsoleMarkdown, ReportPresenter};
use timelog_analytics::datetime::parse_offset;
use timelog_analytics::logger;
use timelog_analytics::report_command::ReportCommand;
use timelog_analytics::repository::JsonFileRepository;
use timelog_analytics::stats_command::StatsCommand;
use timelog_analytics::window::{OutputFormat, WindowArgs};
use timelog_analytics::{Aggregator, AnalyticsConfig};

/// 時間記録から分析結果を計算するCLIアプリケーション。
///
/// # Examples
/// ```
/// $ cargo run -- report --input entries.json --range 7d
/// $ cat entries.json | cargo run -- stats --format markdown
/// ```
#[derive(Debug, Parser)]
#[clap(version, about)]
struct Args {
    #[clap(subcommand)]
    subcommand: SubCommands,

    #[clap(short = 'v', long = "verbose", global = true, help = "Show debug logs")]
    verbose: bool,

    #[clap(
        short = 'c',
        long = "config",
        global = true,
        help = "Path to a JSON config file"
    )]
    config: Option<PathBuf>,

    #[clap(
        long = "productive",
        global = true,
        use_value_delimiter = true,
        help = "Comma separated productive categories (overrides the config)"
    )]
    productive: Vec<String>,

    #[clap(
        long = "offset",
        global = true,
        allow_hyphen_values = true,
        parse(try_from_str = parse_offset),
        help = "Fixed UTC offset such as +09:00 (defaults to the local timezone)"
    )]
    offset: Option<FixedOffset>,
}

/// サブコマンドを表す列挙型。
#[derive(Debug, Subcommand)]
enum SubCommands {
    /// Compute the full analytics report
    Report(WindowArgs),
    /// Compute the dashboard quick stats
    Stats(WindowArgs),
}

fn main() -> Result<()> {
    let args = Args::parse();

    logger::init(args.verbose)?;

    let mut config =
        AnalyticsConfig::load(args.config.as_deref()).context("Failed to load config")?;
    if !args.productive.is_empty() {
        config = config.with_productive_categories(args.productive.clone());
    }
    info!("Productive categories: {:?}", config.productive_categories);

    match args.offset {
        Some(offset) => run(&Aggregator::new(offset, config), &args.subcommand),
        None => run(&Aggregator::local(config), &args.subcommand),
    }
}

/// サブコマンドを実行し、結果を標準出力に表示する。
fn run<Tz: TimeZone>(aggregator: &Aggregator<Tz>, subcommand: &SubCommands) -> Result<()> {
    let stdout = io::stdout();
    let mut writer = stdout.lock();

    match subcommand {
        SubCommands::Report(window) => {
            let repository = JsonFileRepository::new(window.input.as_str().into());
            let report = ReportCommand::new(&repository, aggregator).run(window)?;
            presenter(&mut writer, window).show_report(&report)?;
        }
        SubCommands::Stats(window) => {
            let repository = JsonFileRepository::new(window.input.as_str().into());
            let stats = StatsCommand::new(&repository, aggregator).run(window)?;
            presenter(&mut writer, window).show_stats(&stats)?;
        }
    }

    writer.flush().context("Failed to flush stdout")?;
    Ok(())
}

/// 出力形式に応じた`ReportPresenter`を返す。
fn presenter<'a, W: Write>(
    writer: &'a mut W,
    window: &WindowArgs,
) -> Box<dyn ReportPresenter + 'a> {
    match window.format {
        OutputFormat::Json => Box::new(ConsoleJson::new(writer, window.pretty)),
        OutputFormat::Markdown => Box::new(ConsoleMarkdown::new(writer)),
    }
}
