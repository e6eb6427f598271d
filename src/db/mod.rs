pub mod journal;
pub mod remote;

use crate::error::MigrateResult;

pub use journal::JournalSession;
pub use remote::{GraphClient, RemoteSession};

/// An open session on one keyspace. Dropping it releases the session.
pub trait Session {
    fn keyspace(&self) -> &str;

    /// Opens a write transaction. It must be committed for its queries to
    /// take effect; dropping it uncommitted discards them.
    fn transaction(&mut self) -> MigrateResult<Box<dyn Transaction + '_>>;
}

pub trait Transaction {
    fn query(&mut self, query: &str) -> MigrateResult<()>;

    fn commit(self: Box<Self>) -> MigrateResult<()>;
}
