use crate::error::MigrateResult;
use crate::source::Row;

/// A phone company, keyed by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Company {
    pub name: String,
}

impl Company {
    pub fn from_row(row: &Row) -> MigrateResult<Self> {
        Ok(Self {
            name: row.require("name")?.to_string(),
        })
    }
}
