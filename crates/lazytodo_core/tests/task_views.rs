use chrono::{Duration, NaiveDate, TimeZone, Utc};
use lazytodo_core::{
    table_rows, trash_entries, BadgeTone, DisplayStatus, FormField, FormMode, NewTask,
    RowEditError, TaskForm, TaskRequest, TaskStore, TaskTable,
};

#[test]
fn overdue_status_for_deadline_yesterday() {
    let now = Utc::now();
    let yesterday = now.date_naive() - Duration::days(1);

    let mut store = TaskStore::default();
    store.add(NewTask::new("Buy milk").with_deadline(yesterday));

    let rows = table_rows(store.active(), now);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].status, DisplayStatus::Overdue);
    assert_eq!(rows[0].status.to_string(), "Overdue");
    assert_eq!(rows[0].status.tone(), BadgeTone::Error);
}

#[test]
fn status_comes_from_completed_and_deadline_not_stored_flag() {
    let now = Utc.with_ymd_and_hms(2026, 10, 16, 8, 0, 0).unwrap();
    let mut store = TaskStore::default();
    store.add(NewTask::new("flagged only").with_overdue(true));
    store.add(NewTask::new("done").with_completed(true));
    store.add(
        NewTask::new("future").with_deadline(NaiveDate::from_ymd_opt(2026, 10, 20).unwrap()),
    );

    let statuses: Vec<_> = table_rows(store.active(), now)
        .into_iter()
        .map(|row| row.status)
        .collect();
    assert_eq!(
        statuses,
        vec![
            DisplayStatus::Pending,
            DisplayStatus::Completed,
            DisplayStatus::Pending
        ]
    );
}

#[test]
fn form_create_builds_add_request_with_optional_fields() {
    let mut form = TaskForm::create();
    form.draft_mut().title = "  Buy milk ".to_string();
    form.draft_mut().deadline = "2026-10-15".to_string();

    let request = form.submit().unwrap();
    let TaskRequest::Add(new_task) = request else {
        panic!("create form must produce an add request");
    };
    assert_eq!(new_task.title, "Buy milk");
    assert_eq!(new_task.description, None);
    assert_eq!(
        new_task.deadline,
        Some(NaiveDate::from_ymd_opt(2026, 10, 15).unwrap())
    );
    assert!(!new_task.completed && !new_task.overdue && !new_task.removed);
}

#[test]
fn form_rejects_missing_title_without_touching_store() {
    let form = TaskForm::create();
    let err = form.submit().unwrap_err();
    assert_eq!(err.message_for(FormField::Title), Some("Title is required"));
    assert_eq!(err.to_string(), "Title is required");
}

#[test]
fn form_edit_mode_prefills_and_emits_edit_request() {
    let mut store = TaskStore::default();
    store.add(NewTask::new("old").with_description("keep me"));

    let mut form = TaskForm::edit(&store.active()[0]);
    assert_eq!(form.mode(), FormMode::Edit(1));
    assert_eq!(form.draft().description, "keep me");

    form.draft_mut().title = "new".to_string();
    store.apply(&form.submit().unwrap());

    let task = &store.active()[0];
    assert_eq!(task.title, "new");
    assert_eq!(task.description.as_deref(), Some("keep me"));
}

#[test]
fn table_allows_one_row_in_edit_mode() {
    let mut store = TaskStore::default();
    store.add(NewTask::new("a"));
    store.add(NewTask::new("b"));
    let mut table = TaskTable::new();

    table.begin_edit(&store.active()[0]).unwrap();
    let err = table.begin_edit(&store.active()[1]).unwrap_err();
    assert_eq!(err, RowEditError::AlreadyEditing(1));

    table.cancel_edit();
    assert_eq!(table.editing_id(), None);
    table.begin_edit(&store.active()[1]).unwrap();
    assert!(table.is_editing(2));
}

#[test]
fn invalid_row_save_keeps_edit_mode() {
    let mut store = TaskStore::default();
    store.add(NewTask::new("a"));
    let mut table = TaskTable::new();

    let mut draft = table.begin_edit(&store.active()[0]).unwrap();
    let err = table.save_edit(&draft).unwrap_err();
    assert!(matches!(err, RowEditError::Invalid(_)));
    assert!(table.is_editing(1));

    draft.description = "now filled".to_string();
    draft.deadline = "2027-01-01".to_string();
    let request = table.save_edit(&draft).unwrap();
    assert!(matches!(request, TaskRequest::Edit { id: 1, .. }));
    assert_eq!(table.editing_id(), None);
}

#[test]
fn save_without_edit_mode_is_an_error() {
    let mut table = TaskTable::new();
    let draft = lazytodo_core::TaskDraft::default();
    assert_eq!(table.save_edit(&draft), Err(RowEditError::NotEditing));
}

#[test]
fn page_change_cancels_editing() {
    let mut store = TaskStore::default();
    store.add(NewTask::new("a"));
    let mut table = TaskTable::new();
    table.begin_edit(&store.active()[0]).unwrap();

    table.change_page(2);
    assert_eq!(table.page(), 2);
    assert_eq!(table.editing_id(), None);
}

#[test]
fn selection_change_emits_full_mark_complete() {
    let mut table = TaskTable::new();
    let request = table.select(vec![1, 3]);
    assert_eq!(request, TaskRequest::mark_complete(vec![1, 3]));
    assert_eq!(table.selection(), &[1, 3]);
}

#[test]
fn trash_lists_removed_tasks_in_removal_order() {
    let mut store = TaskStore::default();
    store.add(NewTask::new("first").with_description("one"));
    store.add(NewTask::new("second"));
    store.remove(2);
    store.remove(1);

    let summaries: Vec<_> = trash_entries(store.trash())
        .iter()
        .map(|entry| entry.summary())
        .collect();
    assert_eq!(summaries, vec!["second", "first one"]);
}
