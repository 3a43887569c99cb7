//! Core domain logic for Daybook, a local calendar and ledger.
//! This crate owns storage, business invariants and the month-view layout.

pub mod calendar;
pub mod config;
pub mod db;
pub mod layout;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use calendar::{format_date, month_bounds, month_weeks, parse_date, DateError, Week, WeekStart};
pub use config::{AppConfig, ConfigError};
pub use layout::{compute_week_layout, MonthLayout, RenderFlags, SlotBar, WeekLayout, WeekRow};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::event::{CalendarEvent, EventDraft, EventId, EventValidationError};
pub use model::transaction::{
    Transaction, TransactionDraft, TransactionId, TransactionKind, TransactionValidationError,
};
pub use repo::event_repo::{EventRepository, SqliteEventRepository};
pub use repo::stats_repo::{
    CategoryTotal, DailyTotal, KindTotals, SqliteStatsRepository, StatsRepository,
};
pub use repo::transaction_repo::{SqliteTransactionRepository, TransactionRepository};
pub use repo::{EntityKind, RepoError, RepoResult};
pub use service::dashboard_service::{DailyChartPoint, DashboardService, MonthlyStats};
pub use service::event_service::EventService;
pub use service::ledger_service::LedgerService;
pub use service::{ServiceError, ServiceResult};

/// Minimal health-check API.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
