use chrono::NaiveDate;
use daybook_core::db::open_db_in_memory;
use daybook_core::{
    EntityKind, EventDraft, EventRepository, EventService, RepoError, ServiceError,
    SqliteEventRepository, WeekStart,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn create_and_get_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEventRepository::new(&conn);

    let mut draft = EventDraft::spanning("conference", date(2024, 5, 1), date(2024, 5, 3));
    draft.description = Some("hall B".to_string());
    draft.color = Some("#ef4444".to_string());
    let id = repo.create_event(&draft).unwrap();

    let loaded = repo.get_event(id).unwrap().unwrap();
    assert_eq!(loaded, draft.into_event(id));
}

#[test]
fn update_replaces_all_fields() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEventRepository::new(&conn);

    let mut draft = EventDraft::single_day("draft", date(2024, 5, 1));
    draft.description = Some("old".to_string());
    let id = repo.create_event(&draft).unwrap();

    let replacement = EventDraft::spanning("final", date(2024, 5, 2), date(2024, 5, 4));
    repo.update_event(id, &replacement).unwrap();

    let loaded = repo.get_event(id).unwrap().unwrap();
    assert_eq!(loaded.title, "final");
    assert_eq!(loaded.end_date, date(2024, 5, 4));
    assert_eq!(loaded.description, None);
}

#[test]
fn update_and_delete_missing_return_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEventRepository::new(&conn);
    let draft = EventDraft::single_day("ghost", date(2024, 5, 1));

    let update_err = repo.update_event(404, &draft).unwrap_err();
    assert!(matches!(
        update_err,
        RepoError::NotFound {
            kind: EntityKind::Event,
            id: 404
        }
    ));
    let delete_err = repo.delete_event(404).unwrap_err();
    assert!(matches!(delete_err, RepoError::NotFound { id: 404, .. }));
}

#[test]
fn delete_removes_row() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEventRepository::new(&conn);
    let id = repo
        .create_event(&EventDraft::single_day("gone", date(2024, 5, 1)))
        .unwrap();

    repo.delete_event(id).unwrap();
    assert!(repo.get_event(id).unwrap().is_none());
}

#[test]
fn validation_failure_blocks_create_and_update() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEventRepository::new(&conn);

    let inverted = EventDraft::spanning("bad", date(2024, 5, 3), date(2024, 5, 1));
    assert!(matches!(
        repo.create_event(&inverted).unwrap_err(),
        RepoError::EventValidation(_)
    ));

    let id = repo
        .create_event(&EventDraft::single_day("ok", date(2024, 5, 1)))
        .unwrap();
    let mut bad_color = EventDraft::single_day("ok", date(2024, 5, 1));
    bad_color.color = Some("red".to_string());
    assert!(matches!(
        repo.update_event(id, &bad_color).unwrap_err(),
        RepoError::EventValidation(_)
    ));
}

#[test]
fn list_events_selects_by_start_date_only() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEventRepository::new(&conn);

    let spanning_in = repo
        .create_event(&EventDraft::spanning(
            "spanning in",
            date(2024, 4, 28),
            date(2024, 5, 2),
        ))
        .unwrap();
    let late = repo
        .create_event(&EventDraft::single_day("late", date(2024, 5, 20)))
        .unwrap();
    let early = repo
        .create_event(&EventDraft::single_day("early", date(2024, 5, 1)))
        .unwrap();
    repo.create_event(&EventDraft::single_day("june", date(2024, 6, 1)))
        .unwrap();

    let by_start: Vec<i64> = repo
        .list_events(date(2024, 5, 1), date(2024, 5, 31))
        .unwrap()
        .into_iter()
        .map(|event| event.id)
        .collect();
    assert_eq!(by_start, vec![early, late]);

    let overlapping: Vec<i64> = repo
        .list_events_overlapping(date(2024, 5, 1), date(2024, 5, 31))
        .unwrap()
        .into_iter()
        .map(|event| event.id)
        .collect();
    assert_eq!(overlapping, vec![spanning_in, early, late]);
}

#[test]
fn corrupt_persisted_row_is_reported_as_invalid_data() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO events (id, title, start_date, end_date) VALUES (7, 'broken', 'soon', '2024-05-01');",
        [],
    )
    .unwrap();
    let repo = SqliteEventRepository::new(&conn);

    let err = repo.get_event(7).unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(_)));
}

#[test]
fn service_applies_default_color_and_keeps_explicit_one() {
    let conn = open_db_in_memory().unwrap();
    let service = EventService::with_default_color(SqliteEventRepository::new(&conn), "#8b5cf6");

    let plain = service
        .create_event(EventDraft::single_day("plain", date(2024, 5, 1)))
        .unwrap();
    assert_eq!(plain.color.as_deref(), Some("#8b5cf6"));

    let mut colored = EventDraft::single_day("colored", date(2024, 5, 1));
    colored.color = Some("#10b981".to_string());
    let colored = service.create_event(colored).unwrap();
    assert_eq!(colored.color.as_deref(), Some("#10b981"));
}

#[test]
fn service_update_of_missing_event_surfaces_repo_not_found() {
    let conn = open_db_in_memory().unwrap();
    let service = EventService::new(SqliteEventRepository::new(&conn));

    let err = service
        .update_event(99, EventDraft::single_day("x", date(2024, 5, 1)))
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Repo(RepoError::NotFound { id: 99, .. })
    ));
}

#[test]
fn events_on_day_include_spanning_events() {
    let conn = open_db_in_memory().unwrap();
    let service = EventService::new(SqliteEventRepository::new(&conn));
    let trip = service
        .create_event(EventDraft::spanning("trip", date(2024, 5, 1), date(2024, 5, 5)))
        .unwrap();
    service
        .create_event(EventDraft::single_day("other day", date(2024, 5, 6)))
        .unwrap();

    let on_third = service.events_on(date(2024, 5, 3)).unwrap();
    assert_eq!(on_third, vec![trip]);
}

#[test]
fn month_layout_includes_events_started_last_month() {
    let conn = open_db_in_memory().unwrap();
    let service = EventService::new(SqliteEventRepository::new(&conn));
    let carried = service
        .create_event(EventDraft::spanning(
            "carried over",
            date(2024, 4, 28),
            date(2024, 5, 2),
        ))
        .unwrap();
    let local = service
        .create_event(EventDraft::single_day("local", date(2024, 5, 2)))
        .unwrap();

    let layout = service.month_layout(2024, 5, WeekStart::Monday).unwrap();

    // Monday grid for May 2024: [_, _, 1, 2, 3, 4, 5].
    let first_week = &layout.weeks[0];
    assert_eq!(first_week.week.first_date(), Some(date(2024, 5, 1)));
    assert_eq!(first_week.layout.row(carried.id), Some(0));
    assert_eq!(first_week.layout.row(local.id), Some(1));

    let edge = first_week.layout.flags(carried.id, 2).unwrap();
    assert!(edge.is_week_start && !edge.is_start && edge.shows_title());
    assert_eq!(layout.visible_event_count(), 2);
}

#[test]
fn month_layout_rejects_invalid_month() {
    let conn = open_db_in_memory().unwrap();
    let service = EventService::new(SqliteEventRepository::new(&conn));

    let err = service.month_layout(2024, 13, WeekStart::Sunday).unwrap_err();
    assert!(matches!(err, ServiceError::Date(_)));
}
