//! Command execution over `daybook_core` services.

use crate::cli::{
    Cli, Command, EventCommand, EventFields, MonthSelector, StatsCommand, TxCommand, TxFields,
};
use crate::render::render_month;
use anyhow::{anyhow, Context};
use chrono::{Datelike, Local, NaiveDate};
use daybook_core::db::open_db;
use daybook_core::{
    core_version, init_logging, ping, AppConfig, DashboardService, EventDraft, EventService,
    LedgerService, SqliteEventRepository, SqliteStatsRepository, SqliteTransactionRepository,
    TransactionDraft,
};
use log::info;
use rusqlite::Connection;
use serde::Serialize;

pub fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Ping => {
            println!("{}", ping());
            return Ok(());
        }
        Command::Version => {
            println!("daybook {}", core_version());
            return Ok(());
        }
        _ => {}
    }

    let config = AppConfig::load(cli.config.as_deref()).context("loading configuration")?;
    let level = log_level(&config.log_level, cli.verbose);
    if let Err(err) = init_logging(level, &config.log_dir) {
        eprintln!("warning: file logging disabled: {err}");
    }

    let db_path = cli.db.clone().unwrap_or_else(|| config.db_path());
    let conn = open_db(&db_path)
        .with_context(|| format!("opening database `{}`", db_path.display()))?;
    info!(
        "event=cli_ready module=cli status=ok db={}",
        db_path.display()
    );

    match cli.command {
        Command::Event { action } => run_event(&conn, &config, action),
        Command::Tx { action } => run_tx(&conn, &config, action),
        Command::Stats { action } => run_stats(&conn, &config, action),
        Command::Month(args) => {
            let (year, month) = resolve_month(&args.selector)?;
            let week_start = args.week_start.map_or(config.week_start, Into::into);
            let events = EventService::with_default_color(
                SqliteEventRepository::new(&conn),
                &config.default_event_color,
            );
            let ledger = LedgerService::new(SqliteTransactionRepository::new(&conn));

            let layout = events.month_layout(year, month, week_start)?;
            let totals = ledger.day_totals_for_month(year, month)?;
            let highlight = args.selector.today.unwrap_or_else(today);
            print!("{}", render_month(&layout, &totals, highlight));
            Ok(())
        }
        Command::Ping | Command::Version => Ok(()),
    }
}

fn run_event(conn: &Connection, config: &AppConfig, action: EventCommand) -> anyhow::Result<()> {
    let service = EventService::with_default_color(
        SqliteEventRepository::new(conn),
        &config.default_event_color,
    );
    match action {
        EventCommand::Add(fields) => print_json(&service.create_event(event_draft(fields))?),
        EventCommand::Update { id, fields } => {
            print_json(&service.update_event(id, event_draft(fields))?)
        }
        EventCommand::Delete { id } => {
            service.delete_event(id)?;
            print_json(&serde_json::json!({ "deleted": id }))
        }
        EventCommand::Get { id } => {
            let event = service
                .get_event(id)?
                .ok_or_else(|| anyhow!("event not found: {id}"))?;
            print_json(&event)
        }
        EventCommand::List(range) => print_json(&service.list_events(range.from, range.to)?),
        EventCommand::Day { date } => print_json(&service.events_on(date)?),
    }
}

fn run_tx(conn: &Connection, config: &AppConfig, action: TxCommand) -> anyhow::Result<()> {
    let service = LedgerService::new(SqliteTransactionRepository::new(conn));
    match action {
        TxCommand::Add(fields) => print_json(&service.create_transaction(tx_draft(fields))?),
        TxCommand::Update { id, fields } => {
            print_json(&service.update_transaction(id, tx_draft(fields))?)
        }
        TxCommand::Delete { id } => {
            service.delete_transaction(id)?;
            print_json(&serde_json::json!({ "deleted": id }))
        }
        TxCommand::Get { id } => {
            let transaction = service
                .get_transaction(id)?
                .ok_or_else(|| anyhow!("transaction not found: {id}"))?;
            print_json(&transaction)
        }
        TxCommand::List(range) => print_json(&service.list_transactions(range.from, range.to)?),
        TxCommand::Recent { limit } => {
            print_json(&dashboard(conn, config).recent_transactions(limit)?)
        }
    }
}

fn run_stats(conn: &Connection, config: &AppConfig, action: StatsCommand) -> anyhow::Result<()> {
    let service = dashboard(conn, config);

    match action {
        StatsCommand::Month(selector) => {
            let (year, month) = resolve_month(&selector)?;
            let reference_day = selector.today.unwrap_or_else(today);
            print_json(&service.monthly_stats(year, month, reference_day)?)
        }
        StatsCommand::Daily(selector) => {
            let (year, month) = resolve_month(&selector)?;
            print_json(&service.daily_chart(year, month)?)
        }
        StatsCommand::Categories(arg) => {
            print_json(&service.weekly_category_stats(arg.today.unwrap_or_else(today))?)
        }
        StatsCommand::Today(arg) => {
            print_json(&service.today_events(arg.today.unwrap_or_else(today))?)
        }
    }
}

type SqliteDashboard<'conn> = DashboardService<
    SqliteStatsRepository<'conn>,
    SqliteTransactionRepository<'conn>,
    SqliteEventRepository<'conn>,
>;

fn dashboard<'conn>(conn: &'conn Connection, config: &AppConfig) -> SqliteDashboard<'conn> {
    DashboardService::new(
        SqliteStatsRepository::new(conn),
        SqliteTransactionRepository::new(conn),
        SqliteEventRepository::new(conn),
    )
    .with_recent_limit(config.recent_limit)
}

fn event_draft(fields: EventFields) -> EventDraft {
    EventDraft {
        title: fields.title,
        end_date: fields.end.unwrap_or(fields.start),
        start_date: fields.start,
        description: fields.description,
        color: fields.color,
    }
}

fn tx_draft(fields: TxFields) -> TransactionDraft {
    TransactionDraft {
        date: fields.date,
        amount: fields.amount,
        kind: fields.kind.into(),
        category: fields.category,
        description: fields.description,
    }
}

fn resolve_month(selector: &MonthSelector) -> anyhow::Result<(i32, u32)> {
    let now = today();
    let year = selector.year.unwrap_or(now.year());
    let month = selector.month.unwrap_or(now.month());
    if !(1..=12).contains(&month) {
        return Err(anyhow!("month must be within 1..=12, got {month}"));
    }
    Ok((year, month))
}

/// `-v` overrides the configured level; it never lowers verbosity below it.
fn log_level(configured: &str, verbose: u8) -> &str {
    match verbose {
        0 => configured,
        1 if configured == "trace" => configured,
        1 => "debug",
        _ => "trace",
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    let text = serde_json::to_string_pretty(value).context("serializing output")?;
    println!("{text}");
    Ok(())
}
