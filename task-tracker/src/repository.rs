use crate::clock::Clock;
use crate::storage::{KeyValueStore, TaskStore, generate_id};
use crate::task::{Task, TaskError, TaskFields};

/// The task collection of the active session.
///
/// Tasks are kept most-recently-created first. Every mutation is written
/// through to the store before the call returns; a failed write is logged
/// and the in-memory collection stays authoritative until the next write.
pub struct TaskRepository<S, C> {
    tasks: Vec<Task>,
    store: TaskStore<S>,
    clock: C,
}

impl<S: KeyValueStore, C: Clock> TaskRepository<S, C> {
    pub fn new(store: TaskStore<S>, clock: C) -> Self {
        Self {
            tasks: Vec::new(),
            store,
            clock,
        }
    }

    /// Replaces the in-memory collection with whatever the store holds.
    #[tracing::instrument(skip(self))]
    pub fn hydrate(&mut self) {
        self.tasks = self.store.load_tasks();
    }

    /// Drops the in-memory collection without touching the store.
    pub fn clear(&mut self) {
        self.tasks.clear();
    }

    pub fn list(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    #[tracing::instrument(skip(self))]
    pub fn create(&mut self, fields: TaskFields) -> Result<Task, TaskError> {
        let fields = fields.normalized()?;
        let now = self.clock.now();
        let task = Task::new(self.fresh_id(now), fields, now);
        self.tasks.insert(0, task.clone());
        tracing::debug!("Created task {}", task.id);
        self.persist();
        Ok(task)
    }

    /// Replaces the editable fields of a task. Returns `Ok(None)` if no task
    /// has the given id.
    #[tracing::instrument(skip(self))]
    pub fn update(&mut self, id: &str, fields: TaskFields) -> Result<Option<Task>, TaskError> {
        let fields = fields.normalized()?;
        let now = self.clock.now();
        let Some(task) = self.tasks.iter_mut().find(|task| task.id == id) else {
            tracing::debug!("No task {} to update", id);
            return Ok(None);
        };
        task.apply(fields, now);
        let updated = task.clone();
        self.persist();
        Ok(Some(updated))
    }

    #[tracing::instrument(skip(self))]
    pub fn toggle_complete(&mut self, id: &str) -> Option<Task> {
        let now = self.clock.now();
        let task = self.tasks.iter_mut().find(|task| task.id == id)?;
        task.toggle_complete(now);
        let toggled = task.clone();
        self.persist();
        Some(toggled)
    }

    #[tracing::instrument(skip(self))]
    pub fn delete(&mut self, id: &str) -> Option<Task> {
        let index = self.tasks.iter().position(|task| task.id == id)?;
        let removed = self.tasks.remove(index);
        self.persist();
        Some(removed)
    }

    fn fresh_id(&self, now: chrono::DateTime<chrono::Utc>) -> String {
        loop {
            let id = generate_id(now);
            if self.get(&id).is_none() {
                return id;
            }
        }
    }

    fn persist(&self) {
        if let Err(err) = self.store.save_tasks(&self.tasks) {
            tracing::warn!("Failed to persist {} tasks: {}", self.tasks.len(), err);
        }
    }
}
