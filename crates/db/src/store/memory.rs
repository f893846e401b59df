//! In-memory command store.
//!
//! Backs the test suites and ad-hoc runs without PostgreSQL. Ids come from
//! a monotonically increasing counter and are never reused after a delete,
//! matching BIGSERIAL behaviour.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use commander_core::types::DbId;

use super::{CommandChangeSet, CommandStore, SaveOutcome, StagedChange};
use crate::models::command::{Command, CreateCommand};

#[derive(Debug, Default)]
struct MemoryInner {
    rows: BTreeMap<DbId, Command>,
    last_id: DbId,
}

/// Command store over a locked map.
#[derive(Clone, Default)]
pub struct MemoryCommandStore {
    inner: Arc<Mutex<MemoryInner>>,
}

impl MemoryCommandStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CommandStore for MemoryCommandStore {
    async fn list(&self) -> anyhow::Result<Vec<Command>> {
        let inner = self.inner.lock().expect("command store lock poisoned");
        Ok(inner.rows.values().cloned().collect())
    }

    async fn get_by_id(&self, id: DbId) -> anyhow::Result<Option<Command>> {
        let inner = self.inner.lock().expect("command store lock poisoned");
        Ok(inner.rows.get(&id).cloned())
    }

    fn begin(&self) -> Box<dyn CommandChangeSet> {
        Box::new(MemoryChangeSet {
            inner: Arc::clone(&self.inner),
            staged: Vec::new(),
        })
    }
}

struct MemoryChangeSet {
    inner: Arc<Mutex<MemoryInner>>,
    staged: Vec<StagedChange>,
}

#[async_trait]
impl CommandChangeSet for MemoryChangeSet {
    fn create(&mut self, draft: CreateCommand) {
        debug_assert!(!draft.name.is_empty(), "staged a command with no name");
        self.staged.push(StagedChange::Create(draft));
    }

    fn update(&mut self, command: Command) {
        debug_assert!(!command.name.is_empty(), "staged a command with no name");
        self.staged.push(StagedChange::Update(command));
    }

    fn delete(&mut self, command: Command) {
        self.staged.push(StagedChange::Delete(command.id));
    }

    async fn save_changes(self: Box<Self>) -> anyhow::Result<SaveOutcome> {
        let MemoryChangeSet { inner, staged } = *self;

        let mut outcome = SaveOutcome::default();
        // One lock span for the whole drain keeps the save atomic.
        let mut inner = inner.lock().expect("command store lock poisoned");
        for change in staged {
            match change {
                StagedChange::Create(draft) => {
                    inner.last_id += 1;
                    let command = Command::from_draft(inner.last_id, draft);
                    inner.rows.insert(command.id, command.clone());
                    outcome.rows_affected += 1;
                    outcome.created.push(command);
                }
                StagedChange::Update(command) => {
                    if inner.rows.contains_key(&command.id) {
                        inner.rows.insert(command.id, command);
                        outcome.rows_affected += 1;
                    }
                }
                StagedChange::Delete(id) => {
                    if inner.rows.remove(&id).is_some() {
                        outcome.rows_affected += 1;
                    }
                }
            }
        }
        Ok(outcome)
    }
}
