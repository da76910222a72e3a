//! Active/trash task store and its reducer.
//!
//! # Responsibility
//! - Hold the ordered active and trash sequences.
//! - Apply add, edit, remove, mark-complete and toggle transitions.
//!
//! # Invariants
//! - A task lives in at most one sequence; remove moves it, never copies it.
//! - Nothing moves a task from trash back to active.
//! - No transition completes a task whose `overdue` flag is set.
//! - Lookups that miss are silent no-ops reported as `Applied::Ignored`.

use crate::config::IdPolicy;
use crate::model::task::{NewTask, Task, TaskId, TaskPatch};
use crate::store::request::{Applied, IdSelection, TaskRequest};
use log::debug;
use serde::Serialize;

/// In-memory task store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TaskStore {
    active: Vec<Task>,
    trash: Vec<Task>,
    #[serde(skip)]
    last_id: TaskId,
    #[serde(skip)]
    id_policy: IdPolicy,
}

impl TaskStore {
    pub fn new(id_policy: IdPolicy) -> Self {
        Self {
            id_policy,
            ..Self::default()
        }
    }

    pub fn id_policy(&self) -> IdPolicy {
        self.id_policy
    }

    /// Active tasks in insertion order.
    pub fn active(&self) -> &[Task] {
        &self.active
    }

    /// Trashed tasks in removal order.
    pub fn trash(&self) -> &[Task] {
        &self.trash
    }

    /// Finds an active task by id.
    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.active.iter().find(|task| task.id == id)
    }

    fn position(&self, id: TaskId) -> Option<usize> {
        self.active.iter().position(|task| task.id == id)
    }

    /// Applies one request in place and logs the outcome.
    pub fn apply(&mut self, request: &TaskRequest) -> Applied {
        let applied = match request {
            TaskRequest::Add(new_task) => Applied::Added(self.add(new_task.clone()).id),
            TaskRequest::Edit { id, patch } => self.edit(*id, patch),
            TaskRequest::Remove(id) => self.remove(*id),
            TaskRequest::MarkComplete(ids) => self.mark_as_complete(ids),
            TaskRequest::Toggle(id) => self.toggle(*id),
        };

        match applied {
            Applied::Ignored(id) => debug!(
                "event={} module=store status=noop id={} reason=not_active",
                request.kind(),
                id
            ),
            Applied::CompletionRecomputed { completed } => debug!(
                "event={} module=store status=ok completed={} active={}",
                request.kind(),
                completed,
                self.active.len()
            ),
            _ => debug!(
                "event={} module=store status=ok active={} trash={}",
                request.kind(),
                self.active.len(),
                self.trash.len()
            ),
        }

        applied
    }

    /// Appends a new task to the active sequence.
    pub fn add(&mut self, new_task: NewTask) -> &Task {
        let id = self.next_id();
        self.last_id = self.last_id.max(id);
        self.active.push(Task::from_new(id, new_task));
        &self.active[self.active.len() - 1]
    }

    fn next_id(&self) -> TaskId {
        match self.id_policy {
            IdPolicy::Monotonic => self.last_id + 1,
            IdPolicy::ActiveCountPlusOne => self.active.len() as TaskId + 1,
        }
    }

    /// Overwrites the fields named by `patch`, keeping position.
    pub fn edit(&mut self, id: TaskId, patch: &TaskPatch) -> Applied {
        match self.active.iter_mut().find(|task| task.id == id) {
            Some(task) => {
                patch.apply_to(task);
                Applied::Edited(id)
            }
            None => Applied::Ignored(id),
        }
    }

    /// Moves the task to the end of the trash sequence.
    pub fn remove(&mut self, id: TaskId) -> Applied {
        let Some(index) = self.position(id) else {
            return Applied::Ignored(id);
        };
        let mut task = self.active.remove(index);
        task.soft_delete();
        self.trash.push(task);
        Applied::Removed(id)
    }

    /// Recomputes `completed` for every active task.
    ///
    /// A task ends up completed iff its id is selected and it is not overdue;
    /// tasks outside the selection are reset to not completed.
    pub fn mark_as_complete(&mut self, ids: &IdSelection) -> Applied {
        let selected = ids.to_set();
        let mut completed = 0;
        for task in &mut self.active {
            task.completed = selected.contains(&task.id) && !task.overdue;
            if task.completed {
                completed += 1;
            }
        }
        Applied::CompletionRecomputed { completed }
    }

    /// Flips `completed` on one active task. Overdue tasks only flip off.
    pub fn toggle(&mut self, id: TaskId) -> Applied {
        match self.active.iter_mut().find(|task| task.id == id) {
            Some(task) => {
                task.completed = !task.completed && !task.overdue;
                Applied::Toggled {
                    id,
                    completed: task.completed,
                }
            }
            None => Applied::Ignored(id),
        }
    }
}

/// Pure transition: consumes the old state and returns the new one.
pub fn reduce(mut state: TaskStore, request: &TaskRequest) -> TaskStore {
    state.apply(request);
    state
}

#[cfg(test)]
mod tests {
    use super::{reduce, TaskStore};
    use crate::config::IdPolicy;
    use crate::model::task::{NewTask, TaskPatch};
    use crate::store::request::{Applied, TaskRequest};

    #[test]
    fn monotonic_ids_are_never_reused() {
        let mut store = TaskStore::new(IdPolicy::Monotonic);
        store.add(NewTask::new("a"));
        store.add(NewTask::new("b"));
        store.remove(1);
        let id = store.add(NewTask::new("c")).id;
        assert_eq!(id, 3);
    }

    #[test]
    fn active_count_policy_reproduces_legacy_collision() {
        let mut store = TaskStore::new(IdPolicy::ActiveCountPlusOne);
        store.add(NewTask::new("a"));
        store.add(NewTask::new("b"));
        store.remove(1);
        store.add(NewTask::new("c"));

        let ids: Vec<_> = store.active().iter().map(|task| task.id).collect();
        assert_eq!(ids, vec![2, 2]);
    }

    #[test]
    fn reduce_leaves_input_untouched_when_cloned() {
        let before = reduce(TaskStore::default(), &TaskRequest::Add(NewTask::new("a")));
        let after = reduce(
            before.clone(),
            &TaskRequest::Edit {
                id: 1,
                patch: TaskPatch::default().title("b"),
            },
        );
        assert_eq!(before.active()[0].title, "a");
        assert_eq!(after.active()[0].title, "b");
    }

    #[test]
    fn toggle_flips_and_misses_are_ignored() {
        let mut store = TaskStore::default();
        store.add(NewTask::new("a"));
        assert_eq!(
            store.toggle(1),
            Applied::Toggled {
                id: 1,
                completed: true
            }
        );
        assert_eq!(
            store.toggle(1),
            Applied::Toggled {
                id: 1,
                completed: false
            }
        );
        assert_eq!(store.toggle(9), Applied::Ignored(9));
    }

    #[test]
    fn toggle_never_completes_overdue_task() {
        let mut store = TaskStore::default();
        store.add(NewTask::new("late").with_overdue(true));
        assert_eq!(
            store.apply(&TaskRequest::Toggle(1)),
            Applied::Toggled {
                id: 1,
                completed: false
            }
        );
        assert!(!store.active()[0].completed);
    }
}
