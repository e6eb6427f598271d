//! Offline store: records committed statements in a SQLite journal instead
//! of sending them to a graph server.

use std::path::Path;

use rusqlite::{params, Connection};
use tracing::debug;
use uuid::Uuid;

use super::{Session, Transaction};
use crate::error::MigrateResult;

/// Initialize the journal schema. Creates all tables if they don't exist.
pub fn initialize(conn: &Connection) -> MigrateResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS runs (
            id TEXT PRIMARY KEY NOT NULL,
            keyspace TEXT NOT NULL,
            started_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE TABLE IF NOT EXISTS statements (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            run_id TEXT NOT NULL REFERENCES runs(id),
            keyspace TEXT NOT NULL,
            statement TEXT NOT NULL,
            executed_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE INDEX IF NOT EXISTS statements_keyspace ON statements(keyspace);

        PRAGMA foreign_keys = ON;
        ",
    )?;
    Ok(())
}

/// A session that journals into a SQLite connection. Each session is one run.
pub struct JournalSession {
    conn: Connection,
    keyspace: String,
    run_id: Uuid,
}

impl JournalSession {
    pub fn open(path: &Path, keyspace: &str) -> MigrateResult<Self> {
        Self::with_connection(Connection::open(path)?, keyspace)
    }

    /// A journal that lives only as long as the session. Used by tests.
    pub fn in_memory(keyspace: &str) -> MigrateResult<Self> {
        Self::with_connection(Connection::open_in_memory()?, keyspace)
    }

    fn with_connection(conn: Connection, keyspace: &str) -> MigrateResult<Self> {
        initialize(&conn)?;
        let run_id = Uuid::new_v4();
        conn.execute(
            "INSERT INTO runs (id, keyspace) VALUES (?1, ?2)",
            params![run_id.to_string(), keyspace],
        )?;
        debug!(%run_id, keyspace, "opened journal session");

        Ok(Self {
            conn,
            keyspace: keyspace.to_string(),
            run_id,
        })
    }

    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

impl Session for JournalSession {
    fn keyspace(&self) -> &str {
        &self.keyspace
    }

    fn transaction(&mut self) -> MigrateResult<Box<dyn Transaction + '_>> {
        let tx = self.conn.transaction()?;
        Ok(Box::new(JournalTransaction {
            tx,
            keyspace: &self.keyspace,
            run_id: self.run_id,
        }))
    }
}

impl Drop for JournalSession {
    fn drop(&mut self) {
        debug!(run_id = %self.run_id, "closed journal session");
    }
}

/// Wraps a SQLite transaction; rusqlite rolls it back on drop unless committed.
pub struct JournalTransaction<'s> {
    tx: rusqlite::Transaction<'s>,
    keyspace: &'s str,
    run_id: Uuid,
}

impl Transaction for JournalTransaction<'_> {
    fn query(&mut self, query: &str) -> MigrateResult<()> {
        self.tx.execute(
            "INSERT INTO statements (run_id, keyspace, statement) VALUES (?1, ?2, ?3)",
            params![self.run_id.to_string(), self.keyspace, query],
        )?;
        Ok(())
    }

    fn commit(self: Box<Self>) -> MigrateResult<()> {
        self.tx.commit()?;
        Ok(())
    }
}

/// Statements journaled for a keyspace, oldest first.
pub fn statements(conn: &Connection, keyspace: &str) -> MigrateResult<Vec<String>> {
    let mut stmt =
        conn.prepare("SELECT statement FROM statements WHERE keyspace = ?1 ORDER BY id")?;

    let statements = stmt
        .query_map(params![keyspace], |row| row.get(0))?
        .collect::<Result<Vec<String>, _>>()?;

    Ok(statements)
}

/// Number of statements journaled by one run.
pub fn count_for_run(conn: &Connection, run_id: Uuid) -> MigrateResult<usize> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM statements WHERE run_id = ?1",
        params![run_id.to_string()],
        |row| row.get(0),
    )?;
    Ok(count as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn committed_statement_is_journaled() {
        let mut session = JournalSession::in_memory("phone_calls").unwrap();
        let mut tx = session.transaction().unwrap();
        tx.query("insert $company isa company, has name \"Telecom\";").unwrap();
        tx.commit().unwrap();

        let recorded = statements(session.connection(), "phone_calls").unwrap();
        assert_eq!(recorded, vec!["insert $company isa company, has name \"Telecom\";"]);
    }

    #[test]
    fn dropped_transaction_rolls_back() {
        let mut session = JournalSession::in_memory("phone_calls").unwrap();
        {
            let mut tx = session.transaction().unwrap();
            tx.query("insert $company isa company, has name \"Unity\";").unwrap();
        }
        assert!(statements(session.connection(), "phone_calls").unwrap().is_empty());
    }

    #[test]
    fn statements_are_scoped_by_keyspace() {
        let mut session = JournalSession::in_memory("phone_calls").unwrap();
        let mut tx = session.transaction().unwrap();
        tx.query("insert $x isa company, has name \"A\";").unwrap();
        tx.commit().unwrap();

        assert!(statements(session.connection(), "other").unwrap().is_empty());
        assert_eq!(count_for_run(session.connection(), session.run_id()).unwrap(), 1);
    }

    #[test]
    fn reopening_a_journal_file_starts_a_new_run() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("journal.db");

        let first = JournalSession::open(&path, "phone_calls").unwrap();
        let first_run = first.run_id();
        drop(first);

        let second = JournalSession::open(&path, "phone_calls").unwrap();
        assert_ne!(second.run_id(), first_run);

        let runs: i64 = second
            .connection()
            .query_row("SELECT COUNT(*) FROM runs", [], |row| row.get(0))
            .unwrap();
        assert_eq!(runs, 2);
    }
}
