//! Argument definitions.

use chrono::NaiveDate;
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use daybook_core::{parse_date, TransactionKind, WeekStart};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "daybook",
    version,
    about = "Local calendar and ledger",
    disable_help_subcommand = true
)]
pub struct Cli {
    /// Configuration file (default: per-user config.toml when present).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Database file, overriding the configured data directory.
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Raise log verbosity (-v debug, -vv trace).
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Calendar events.
    Event {
        #[command(subcommand)]
        action: EventCommand,
    },
    /// Ledger transactions.
    Tx {
        #[command(subcommand)]
        action: TxCommand,
    },
    /// Dashboard aggregations.
    Stats {
        #[command(subcommand)]
        action: StatsCommand,
    },
    /// Month grid with stacked event bars.
    Month(MonthArgs),
    Ping,
    Version,
}

#[derive(Subcommand, Debug)]
pub enum EventCommand {
    Add(EventFields),
    Update {
        id: i64,
        #[command(flatten)]
        fields: EventFields,
    },
    Delete {
        id: i64,
    },
    Get {
        id: i64,
    },
    /// Events starting within a date range.
    List(DateRange),
    /// Events covering one day.
    Day {
        #[arg(value_parser = date_arg)]
        date: NaiveDate,
    },
}

#[derive(Args, Debug)]
pub struct EventFields {
    #[arg(long)]
    pub title: String,
    #[arg(long, value_parser = date_arg)]
    pub start: NaiveDate,
    /// Defaults to the start date.
    #[arg(long, value_parser = date_arg)]
    pub end: Option<NaiveDate>,
    #[arg(long)]
    pub description: Option<String>,
    /// `#rrggbb`; the configured default is used when omitted.
    #[arg(long)]
    pub color: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum TxCommand {
    Add(TxFields),
    Update {
        id: i64,
        #[command(flatten)]
        fields: TxFields,
    },
    Delete {
        id: i64,
    },
    Get {
        id: i64,
    },
    List(DateRange),
    /// Newest transactions first.
    Recent {
        #[arg(long)]
        limit: Option<u32>,
    },
}

#[derive(Args, Debug)]
pub struct TxFields {
    #[arg(long, value_parser = date_arg)]
    pub date: NaiveDate,
    #[arg(long)]
    pub amount: i64,
    #[arg(long = "type", value_enum)]
    pub kind: KindArg,
    #[arg(long)]
    pub category: String,
    #[arg(long)]
    pub description: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum StatsCommand {
    /// Monthly totals, change against the previous month, event counts.
    Month(MonthSelector),
    /// Per-day income/expense points of a month.
    Daily(MonthSelector),
    /// Expense totals per category for the last 7 days.
    Categories(TodayArg),
    /// Events covering today.
    Today(TodayArg),
}

#[derive(Args, Debug)]
pub struct DateRange {
    #[arg(long, value_parser = date_arg)]
    pub from: NaiveDate,
    #[arg(long, value_parser = date_arg)]
    pub to: NaiveDate,
}

#[derive(Args, Debug)]
pub struct MonthSelector {
    /// Defaults to the current year.
    #[arg(long)]
    pub year: Option<i32>,
    /// 1-12; defaults to the current month.
    #[arg(long)]
    pub month: Option<u32>,
    /// Reference day for "today" counts.
    #[arg(long, value_parser = date_arg)]
    pub today: Option<NaiveDate>,
}

#[derive(Args, Debug)]
pub struct TodayArg {
    #[arg(long, value_parser = date_arg)]
    pub today: Option<NaiveDate>,
}

#[derive(Args, Debug)]
pub struct MonthArgs {
    #[command(flatten)]
    pub selector: MonthSelector,
    /// Overrides the configured first weekday.
    #[arg(long, value_enum)]
    pub week_start: Option<WeekStartArg>,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum KindArg {
    Income,
    Expense,
}

impl From<KindArg> for TransactionKind {
    fn from(value: KindArg) -> Self {
        match value {
            KindArg::Income => Self::Income,
            KindArg::Expense => Self::Expense,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum WeekStartArg {
    Sunday,
    Monday,
}

impl From<WeekStartArg> for WeekStart {
    fn from(value: WeekStartArg) -> Self {
        match value {
            WeekStartArg::Sunday => Self::Sunday,
            WeekStartArg::Monday => Self::Monday,
        }
    }
}

fn date_arg(value: &str) -> Result<NaiveDate, String> {
    parse_date(value).map_err(|err| err.to_string())
}
