//! Calendar event use-cases.
//!
//! # Invariants
//! - Events created without a color get the service's default color.
//! - Month views fetch by range overlap so events that began in an earlier
//!   month still appear in the grid.

use super::{ServiceError, ServiceResult};
use crate::calendar::{month_bounds, WeekStart};
use crate::layout::MonthLayout;
use crate::model::event::{CalendarEvent, EventDraft, EventId, DEFAULT_EVENT_COLOR};
use crate::repo::event_repo::EventRepository;
use crate::repo::RepoResult;
use chrono::NaiveDate;
use log::{debug, info};

pub struct EventService<R: EventRepository> {
    repo: R,
    default_color: String,
}

impl<R: EventRepository> EventService<R> {
    pub fn new(repo: R) -> Self {
        Self::with_default_color(repo, DEFAULT_EVENT_COLOR)
    }

    pub fn with_default_color(repo: R, default_color: impl Into<String>) -> Self {
        Self {
            repo,
            default_color: default_color.into(),
        }
    }

    /// Stores a new event and returns the stored record.
    pub fn create_event(&self, mut draft: EventDraft) -> ServiceResult<CalendarEvent> {
        if draft.color.is_none() {
            draft.color = Some(self.default_color.clone());
        }
        let id = self.repo.create_event(&draft)?;
        info!("event=event_create module=service status=ok id={id}");
        self.read_back(id, "created event not found in read-back")
    }

    /// Replaces every writable field of event `id`.
    pub fn update_event(&self, id: EventId, draft: EventDraft) -> ServiceResult<CalendarEvent> {
        self.repo.update_event(id, &draft)?;
        info!("event=event_update module=service status=ok id={id}");
        self.read_back(id, "updated event not found in read-back")
    }

    pub fn get_event(&self, id: EventId) -> RepoResult<Option<CalendarEvent>> {
        self.repo.get_event(id)
    }

    pub fn delete_event(&self, id: EventId) -> RepoResult<()> {
        self.repo.delete_event(id)?;
        info!("event=event_delete module=service status=ok id={id}");
        Ok(())
    }

    /// Events starting within `start..=end`.
    pub fn list_events(&self, start: NaiveDate, end: NaiveDate) -> RepoResult<Vec<CalendarEvent>> {
        self.repo.list_events(start, end)
    }

    /// Events intersecting `year`-`month`.
    pub fn events_for_month(&self, year: i32, month: u32) -> ServiceResult<Vec<CalendarEvent>> {
        let (first, last) = month_bounds(year, month)?;
        Ok(self.repo.list_events_overlapping(first, last)?)
    }

    /// Events covering `day`, ordered by start date.
    pub fn events_on(&self, day: NaiveDate) -> RepoResult<Vec<CalendarEvent>> {
        self.repo.list_events_overlapping(day, day)
    }

    /// Loads the month's events and lays out every grid week.
    pub fn month_layout(
        &self,
        year: i32,
        month: u32,
        week_start: WeekStart,
    ) -> ServiceResult<MonthLayout> {
        let events = self.events_for_month(year, month)?;
        let layout = MonthLayout::compute(year, month, week_start, &events)?;
        debug!(
            "event=month_layout module=service status=ok year={year} month={month} events={} weeks={}",
            events.len(),
            layout.weeks.len()
        );
        Ok(layout)
    }

    fn read_back(&self, id: EventId, details: &'static str) -> ServiceResult<CalendarEvent> {
        self.repo
            .get_event(id)?
            .ok_or(ServiceError::InconsistentState(details))
    }
}
