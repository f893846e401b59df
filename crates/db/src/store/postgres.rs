//! PostgreSQL-backed command store.

use async_trait::async_trait;
use commander_core::types::DbId;
use sqlx::PgPool;

use super::{CommandChangeSet, CommandStore, SaveOutcome, StagedChange};
use crate::models::command::{Command, CreateCommand};

const COLUMNS: &str = "id, name, description, platform";

/// Command store over a `sqlx` connection pool.
///
/// The store itself is stateless; each changeset buffers its own staged
/// changes and drains them inside a single transaction.
#[derive(Clone)]
pub struct PgCommandStore {
    pool: PgPool,
}

impl PgCommandStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CommandStore for PgCommandStore {
    async fn list(&self) -> anyhow::Result<Vec<Command>> {
        let query = format!("SELECT {COLUMNS} FROM commands");
        let rows = sqlx::query_as::<_, Command>(&query)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn get_by_id(&self, id: DbId) -> anyhow::Result<Option<Command>> {
        let query = format!("SELECT {COLUMNS} FROM commands WHERE id = $1");
        let row = sqlx::query_as::<_, Command>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    fn begin(&self) -> Box<dyn CommandChangeSet> {
        Box::new(PgChangeSet {
            pool: self.pool.clone(),
            staged: Vec::new(),
        })
    }
}

struct PgChangeSet {
    pool: PgPool,
    staged: Vec<StagedChange>,
}

#[async_trait]
impl CommandChangeSet for PgChangeSet {
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
        let PgChangeSet { pool, staged } = *self;

        let mut outcome = SaveOutcome::default();
        if staged.is_empty() {
            return Ok(outcome);
        }

        let mut tx = pool.begin().await?;
        for change in staged {
            match change {
                StagedChange::Create(draft) => {
                    let query = format!(
                        "INSERT INTO commands (name, description, platform) \
                         VALUES ($1, $2, $3) \
                         RETURNING {COLUMNS}"
                    );
                    let row = sqlx::query_as::<_, Command>(&query)
                        .bind(&draft.name)
                        .bind(&draft.description)
                        .bind(&draft.platform)
                        .fetch_one(&mut *tx)
                        .await?;
                    outcome.rows_affected += 1;
                    outcome.created.push(row);
                }
                StagedChange::Update(command) => {
                    let result = sqlx::query(
                        "UPDATE commands \
                         SET name = $2, description = $3, platform = $4 \
                         WHERE id = $1",
                    )
                    .bind(command.id)
                    .bind(&command.name)
                    .bind(&command.description)
                    .bind(&command.platform)
                    .execute(&mut *tx)
                    .await?;
                    outcome.rows_affected += result.rows_affected();
                }
                StagedChange::Delete(id) => {
                    let result = sqlx::query("DELETE FROM commands WHERE id = $1")
                        .bind(id)
                        .execute(&mut *tx)
                        .await?;
                    outcome.rows_affected += result.rows_affected();
                }
            }
        }
        tx.commit().await?;

        Ok(outcome)
    }
}
