//! In-memory adapters for engine and HTTP tests.

use std::collections::{BTreeSet, HashMap};
use std::sync::Mutex;

use async_trait::async_trait;

use twtodo_core::{IdentityKey, ListId, LocalTask, LocalUuid, Task, TaskStatus};
use twtodo_mstodo::{RemoteError, RemoteSource};
use twtodo_taskwarrior::{LocalStore, StoreError};

#[derive(Default)]
struct StoreState {
    tasks: Vec<LocalTask>,
    udas: BTreeSet<String>,
    next_id: usize,
    create_calls: usize,
    update_calls: usize,
    fail_export: bool,
    fail_exists: bool,
    fail_updates: bool,
    fail_create_titles: BTreeSet<String>,
}

/// A `LocalStore` backed by a vector.
#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<StoreState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, task: Task) -> LocalUuid {
        let mut state = self.state.lock().unwrap();
        state.next_id += 1;
        let uuid = LocalUuid::new(format!("uuid-{}", state.next_id));
        state.tasks.push(LocalTask::new(uuid.clone(), task));
        uuid
    }

    pub fn tasks(&self) -> Vec<LocalTask> {
        self.state.lock().unwrap().tasks.clone()
    }

    pub fn create_calls(&self) -> usize {
        self.state.lock().unwrap().create_calls
    }

    pub fn update_calls(&self) -> usize {
        self.state.lock().unwrap().update_calls
    }

    pub fn define_uda(&self, name: &str) {
        self.state.lock().unwrap().udas.insert(name.to_string());
    }

    pub fn fail_export(&self) {
        self.state.lock().unwrap().fail_export = true;
    }

    pub fn fail_exists(&self) {
        self.state.lock().unwrap().fail_exists = true;
    }

    pub fn fail_updates(&self) {
        self.state.lock().unwrap().fail_updates = true;
    }

    pub fn fail_create_for(&self, title: &str) {
        self.state
            .lock()
            .unwrap()
            .fail_create_titles
            .insert(title.to_string());
    }
}

fn injected(command: &str) -> StoreError {
    StoreError::CommandFailed {
        command: command.to_string(),
        code: 2,
        stderr: "injected failure".to_string(),
    }
}

#[async_trait]
impl LocalStore for MemoryStore {
    async fn exists(&self, key: &IdentityKey) -> Result<bool, StoreError> {
        let state = self.state.lock().unwrap();
        if state.fail_exists {
            return Err(injected("task all"));
        }
        Ok(state.tasks.iter().any(|t| t.key() == key))
    }

    async fn create(&self, title: &str, key: &IdentityKey) -> Result<LocalUuid, StoreError> {
        {
            let mut state = self.state.lock().unwrap();
            state.create_calls += 1;
            if state.fail_create_titles.contains(title) {
                return Err(injected("task add"));
            }
        }
        Ok(self.insert(Task::new(key.clone(), title)))
    }

    async fn update(&self, task: &LocalTask) -> Result<(), StoreError> {
        let mut state = self.state.lock().unwrap();
        state.update_calls += 1;
        if state.fail_updates {
            return Err(injected("task modify"));
        }
        let slot = state
            .tasks
            .iter_mut()
            .find(|t| t.uuid == task.uuid)
            .ok_or_else(|| StoreError::NotFound(task.uuid.to_string()))?;
        *slot = task.clone();
        Ok(())
    }

    async fn export_all(&self) -> Result<Vec<LocalTask>, StoreError> {
        let state = self.state.lock().unwrap();
        if state.fail_export {
            return Err(injected("task export"));
        }
        Ok(state.tasks.clone())
    }

    async fn uda_exists(&self, name: &str) -> Result<bool, StoreError> {
        Ok(self.state.lock().unwrap().udas.contains(name))
    }

    async fn create_uda(&self, name: &str, _label: &str) -> Result<(), StoreError> {
        self.define_uda(name);
        Ok(())
    }
}

#[derive(Default)]
struct RemoteState {
    tasks: HashMap<IdentityKey, Task>,
    raw_status: HashMap<IdentityKey, String>,
    open: Vec<Task>,
    fail_open: bool,
}

/// A `RemoteSource` serving canned tasks.
#[derive(Default)]
pub struct FakeRemote {
    state: Mutex<RemoteState>,
}

impl FakeRemote {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `task` from `fetch_task`.
    pub fn set_task(&self, task: Task) {
        self.state
            .lock()
            .unwrap()
            .tasks
            .insert(task.key.clone(), task);
    }

    /// Report `status` verbatim for `key`, as Graph would.
    pub fn set_raw_status(&self, key: &IdentityKey, status: &str) {
        self.state
            .lock()
            .unwrap()
            .raw_status
            .insert(key.clone(), status.to_string());
    }

    /// Serve `task` from `fetch_open_tasks`.
    pub fn add_open(&self, task: Task) {
        self.state.lock().unwrap().open.push(task);
    }

    pub fn fail_open(&self) {
        self.state.lock().unwrap().fail_open = true;
    }
}

#[async_trait]
impl RemoteSource for FakeRemote {
    async fn fetch_open_tasks(&self, list_id: &ListId) -> Result<Vec<Task>, RemoteError> {
        let state = self.state.lock().unwrap();
        if state.fail_open {
            return Err(RemoteError::UnexpectedStatus {
                status: 503,
                path: format!("/me/todo/lists/{}/tasks", list_id),
                body: "unavailable".to_string(),
            });
        }
        Ok(state
            .open
            .iter()
            .filter(|t| &t.key.list_id == list_id)
            .cloned()
            .collect())
    }

    async fn fetch_task(&self, key: &IdentityKey) -> Result<Task, RemoteError> {
        let state = self.state.lock().unwrap();
        let task = state
            .tasks
            .get(key)
            .cloned()
            .ok_or_else(|| RemoteError::NotFound(key.to_string()))?;

        match state.raw_status.get(key) {
            Some(raw) => {
                let status =
                    TaskStatus::from_remote(raw).map_err(|source| RemoteError::Mapping {
                        task_id: key.task_id.to_string(),
                        source,
                    })?;
                Ok(task.with_status(status))
            }
            None => Ok(task),
        }
    }
}
