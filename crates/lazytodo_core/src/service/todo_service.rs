//! Todo use-case service.
//!
//! # Responsibility
//! - Own the session's `TaskStore` and table interaction state.
//! - Route form, table and selection actions through the store reducer.
//!
//! # Invariants
//! - Every mutation goes through `TaskStore::apply`.
//! - Validation failures are returned to the caller and never reach the store.

use crate::config::TodoConfig;
use crate::model::task::{Task, TaskId};
use crate::store::request::{Applied, TaskRequest};
use crate::store::task_store::TaskStore;
use crate::view::form::{FormError, TaskDraft, TaskForm};
use crate::view::table::{table_rows, RowEditError, TaskRow, TaskTable};
use crate::view::trash::{trash_entries, TrashEntry};
use chrono::{DateTime, Utc};
use log::debug;

/// Application controller for one todo session.
#[derive(Debug, Clone, Default)]
pub struct TodoService {
    store: TaskStore,
    table: TaskTable,
}

impl TodoService {
    pub fn new(config: &TodoConfig) -> Self {
        Self::with_store(TaskStore::new(config.id_policy))
    }

    /// Wraps an existing store, e.g. one built with `reduce` in tests.
    pub fn with_store(store: TaskStore) -> Self {
        Self {
            store,
            table: TaskTable::new(),
        }
    }

    pub fn store(&self) -> &TaskStore {
        &self.store
    }

    pub fn table(&self) -> &TaskTable {
        &self.table
    }

    pub fn active(&self) -> &[Task] {
        self.store.active()
    }

    pub fn trash(&self) -> &[Task] {
        self.store.trash()
    }

    /// Applies a prebuilt request.
    pub fn dispatch(&mut self, request: &TaskRequest) -> Applied {
        self.store.apply(request)
    }

    /// Validates and applies the form's add or edit request.
    pub fn submit_form(&mut self, form: &TaskForm) -> Result<Applied, FormError> {
        let request = form.submit().map_err(|err| {
            debug!(
                "event=form_submit module=service status=rejected errors={}",
                err.errors().len()
            );
            err
        })?;
        Ok(self.store.apply(&request))
    }

    /// Enters edit mode for an active row.
    pub fn begin_row_edit(&mut self, id: TaskId) -> Result<TaskDraft, RowEditError> {
        let task = self.store.get(id).ok_or(RowEditError::UnknownTask(id))?;
        self.table.begin_edit(task)
    }

    pub fn cancel_row_edit(&mut self) {
        self.table.cancel_edit();
    }

    /// Saves the row in edit mode. Invalid drafts keep the row editing.
    pub fn save_row(&mut self, draft: &TaskDraft) -> Result<Applied, RowEditError> {
        let request = self.table.save_edit(draft)?;
        Ok(self.store.apply(&request))
    }

    pub fn delete_row(&mut self, id: TaskId) -> Applied {
        let request = self.table.delete(id);
        self.store.apply(&request)
    }

    /// Replaces the table selection and recomputes completion.
    pub fn change_selection(&mut self, ids: Vec<TaskId>) -> Applied {
        let request = self.table.select(ids);
        self.store.apply(&request)
    }

    pub fn change_page(&mut self, page: usize) {
        self.table.change_page(page);
    }

    pub fn toggle(&mut self, id: TaskId) -> Applied {
        self.store.apply(&TaskRequest::Toggle(id))
    }

    /// Table rows with status derived against `now`.
    pub fn table_rows(&self, now: DateTime<Utc>) -> Vec<TaskRow> {
        table_rows(self.store.active(), now)
    }

    pub fn trash_entries(&self) -> Vec<TrashEntry> {
        trash_entries(self.store.trash())
    }
}
