//! Event repository contract and SQLite implementation.
//!
//! # Invariants
//! - `list_events` selects by start date only, matching the month fetch of
//!   the calendar view; `list_events_overlapping` selects by range overlap.
//! - Results are ordered by `start_date ASC, id ASC`.
//! - Deletes are hard deletes.

use super::{date_from_db, date_to_db, EntityKind, RepoError, RepoResult};
use crate::model::event::{CalendarEvent, EventDraft, EventId};
use chrono::NaiveDate;
use rusqlite::{params, Connection, Row};

const EVENT_SELECT_SQL: &str = "SELECT
    id,
    title,
    start_date,
    end_date,
    description,
    color
FROM events";

/// Repository interface for calendar events.
pub trait EventRepository {
    fn create_event(&self, draft: &EventDraft) -> RepoResult<EventId>;
    fn update_event(&self, id: EventId, draft: &EventDraft) -> RepoResult<()>;
    fn get_event(&self, id: EventId) -> RepoResult<Option<CalendarEvent>>;
    /// Events whose start date lies in `start..=end`.
    fn list_events(&self, start: NaiveDate, end: NaiveDate) -> RepoResult<Vec<CalendarEvent>>;
    /// Events whose range intersects `start..=end`.
    fn list_events_overlapping(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> RepoResult<Vec<CalendarEvent>>;
    fn delete_event(&self, id: EventId) -> RepoResult<()>;
}

pub struct SqliteEventRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteEventRepository<'conn> {
    /// Wraps a migrated connection (see [`crate::db::open_db`]).
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn query_events(
        &self,
        filter_sql: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> RepoResult<Vec<CalendarEvent>> {
        let mut stmt = self.conn.prepare(&format!(
            "{EVENT_SELECT_SQL} WHERE {filter_sql} ORDER BY start_date ASC, id ASC;"
        ))?;
        let mut rows = stmt.query(params![date_to_db(start), date_to_db(end)])?;
        let mut events = Vec::new();
        while let Some(row) = rows.next()? {
            events.push(parse_event_row(row)?);
        }
        Ok(events)
    }
}

impl EventRepository for SqliteEventRepository<'_> {
    fn create_event(&self, draft: &EventDraft) -> RepoResult<EventId> {
        draft.validate()?;

        self.conn.execute(
            "INSERT INTO events (title, start_date, end_date, description, color)
             VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                draft.title.as_str(),
                date_to_db(draft.start_date),
                date_to_db(draft.end_date),
                draft.description.as_deref(),
                draft.color.as_deref(),
            ],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn update_event(&self, id: EventId, draft: &EventDraft) -> RepoResult<()> {
        draft.validate()?;

        let changed = self.conn.execute(
            "UPDATE events
             SET
                title = ?1,
                start_date = ?2,
                end_date = ?3,
                description = ?4,
                color = ?5
             WHERE id = ?6;",
            params![
                draft.title.as_str(),
                date_to_db(draft.start_date),
                date_to_db(draft.end_date),
                draft.description.as_deref(),
                draft.color.as_deref(),
                id,
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                kind: EntityKind::Event,
                id,
            });
        }
        Ok(())
    }

    fn get_event(&self, id: EventId) -> RepoResult<Option<CalendarEvent>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{EVENT_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_event_row(row)?));
        }
        Ok(None)
    }

    fn list_events(&self, start: NaiveDate, end: NaiveDate) -> RepoResult<Vec<CalendarEvent>> {
        self.query_events("start_date >= ?1 AND start_date <= ?2", start, end)
    }

    fn list_events_overlapping(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> RepoResult<Vec<CalendarEvent>> {
        self.query_events("start_date <= ?2 AND end_date >= ?1", start, end)
    }

    fn delete_event(&self, id: EventId) -> RepoResult<()> {
        let changed = self.conn.execute("DELETE FROM events WHERE id = ?1;", [id])?;
        if changed == 0 {
            return Err(RepoError::NotFound {
                kind: EntityKind::Event,
                id,
            });
        }
        Ok(())
    }
}

fn parse_event_row(row: &Row<'_>) -> RepoResult<CalendarEvent> {
    let start_text: String = row.get("start_date")?;
    let end_text: String = row.get("end_date")?;

    let event = CalendarEvent {
        id: row.get("id")?,
        title: row.get("title")?,
        start_date: date_from_db(&start_text, "events.start_date")?,
        end_date: date_from_db(&end_text, "events.end_date")?,
        description: row.get("description")?,
        color: row.get("color")?,
    };
    event.validate()?;
    Ok(event)
}
