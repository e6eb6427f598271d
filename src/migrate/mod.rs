use tracing::info;

use crate::config::Config;
use crate::db::{GraphClient, JournalSession, Session};
use crate::error::MigrateResult;
use crate::model::RecordKind;
use crate::source::Input;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ImportStats {
    pub companies: usize,
    pub people: usize,
    pub contracts: usize,
    pub calls: usize,
}

impl ImportStats {
    pub fn record(&mut self, kind: RecordKind, count: usize) {
        match kind {
            RecordKind::Company => self.companies += count,
            RecordKind::Person => self.people += count,
            RecordKind::Contract => self.contracts += count,
            RecordKind::Call => self.calls += count,
        }
    }

    pub fn total(&self) -> usize {
        self.companies + self.people + self.contracts + self.calls
    }
}

/// Runs the whole migration described by `config`: opens one session on the
/// configured store and loads the four phone-call inputs through it.
pub fn run(config: &Config) -> MigrateResult<ImportStats> {
    info!(
        uri = %config.uri,
        keyspace = %config.keyspace,
        data_dir = %config.data_dir.display(),
        journal = ?config.journal,
        "Starting migration"
    );
    let inputs = Input::phone_calls(&config.data_dir);

    match &config.journal {
        Some(path) => {
            info!("Journaling into {}", path.display());
            let mut session = JournalSession::open(path, &config.keyspace)?;
            build_phone_call_graph(&mut session, &inputs)
        }
        None => {
            info!("Connecting to graph store at {}", config.uri);
            let client = GraphClient::new(&config.uri);
            let mut session = client.session(&config.keyspace)?;
            build_phone_call_graph(&mut session, &inputs)
        }
    }
}

/// Loads every input into the session's keyspace, in order.
/// Stops at the first failure; rows committed before it stay committed.
pub fn build_phone_call_graph(
    session: &mut dyn Session,
    inputs: &[Input],
) -> MigrateResult<ImportStats> {
    let mut stats = ImportStats::default();

    for input in inputs {
        info!(
            "Loading from [{}] into keyspace {} ...",
            input.path.display(),
            session.keyspace()
        );
        let count = load_input(session, input)?;
        stats.record(input.kind, count);
    }

    Ok(stats)
}

/// Inserts each row of one input in its own write transaction.
/// Returns the number of rows inserted.
pub fn load_input(session: &mut dyn Session, input: &Input) -> MigrateResult<usize> {
    let mut count = 0;

    for row in input.open()? {
        let query = input.kind.render(&row?)?;
        info!("Executing Graql Query: {}", query);

        let mut tx = session.transaction()?;
        tx.query(&query)?;
        tx.commit()?;
        count += 1;
    }

    info!("Inserted {} items from [{}]", count, input.path.display());
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stats_record_by_kind() {
        let mut stats = ImportStats::default();
        stats.record(RecordKind::Company, 3);
        stats.record(RecordKind::Person, 10);
        stats.record(RecordKind::Call, 5);
        stats.record(RecordKind::Call, 1);

        assert_eq!(stats.companies, 3);
        assert_eq!(stats.people, 10);
        assert_eq!(stats.contracts, 0);
        assert_eq!(stats.calls, 6);
        assert_eq!(stats.total(), 19);
    }
}
