//! Storage abstraction for the command catalog.
//!
//! [`CommandStore`] is the narrow read interface plus a factory for
//! [`CommandChangeSet`], the request-scoped unit of work. Mutations are
//! staged on a changeset and applied atomically by `save_changes`; a
//! created row's id exists only after the save.

use async_trait::async_trait;
use commander_core::types::DbId;

use crate::models::command::{Command, CreateCommand};

mod memory;
mod postgres;

pub use memory::MemoryCommandStore;
pub use postgres::PgCommandStore;

/// What a `save_changes` call did.
#[derive(Debug, Default)]
pub struct SaveOutcome {
    /// Rows inserted by this save, in staging order, with assigned ids.
    pub created: Vec<Command>,
    /// Total rows the staged changes touched.
    pub rows_affected: u64,
}

impl SaveOutcome {
    /// Whether at least one staged change was applied.
    pub fn applied(&self) -> bool {
        self.rows_affected > 0
    }
}

#[async_trait]
pub trait CommandStore: Send + Sync {
    /// All records, in storage-native order.
    async fn list(&self) -> anyhow::Result<Vec<Command>>;

    /// The matching record, or `None`. A missing id is not an error.
    async fn get_by_id(&self, id: DbId) -> anyhow::Result<Option<Command>>;

    /// Open an empty changeset against this store.
    fn begin(&self) -> Box<dyn CommandChangeSet>;
}

/// A request-scoped set of staged mutations against a [`CommandStore`].
#[async_trait]
pub trait CommandChangeSet: Send {
    /// Stage an insert. The id is assigned when the changeset is saved.
    fn create(&mut self, draft: CreateCommand);

    /// Stage a full write-back of a record fetched from the store and
    /// mutated in place.
    fn update(&mut self, command: Command);

    /// Stage removal of a record fetched from the store.
    fn delete(&mut self, command: Command);

    /// Apply all staged changes atomically. Storage failures propagate
    /// unmodified; nothing is retried.
    async fn save_changes(self: Box<Self>) -> anyhow::Result<SaveOutcome>;
}

/// A staged mutation, shared by the store implementations.
#[derive(Debug, Clone)]
enum StagedChange {
    Create(CreateCommand),
    Update(Command),
    Delete(DbId),
}
