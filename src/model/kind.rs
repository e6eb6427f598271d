use std::fmt;

use crate::error::MigrateResult;
use crate::model::{Call, Company, Contract, Person};
use crate::source::Row;
use crate::templates;

/// The kind of record held by one input file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Company,
    Person,
    Contract,
    Call,
}

impl RecordKind {
    /// Load order: entities before the relations that match them.
    pub const ALL: [RecordKind; 4] = [
        RecordKind::Company,
        RecordKind::Person,
        RecordKind::Contract,
        RecordKind::Call,
    ];

    /// File name (without extension) the records are read from.
    pub fn file_stem(self) -> &'static str {
        match self {
            RecordKind::Company => "companies",
            RecordKind::Person => "people",
            RecordKind::Contract => "contracts",
            RecordKind::Call => "calls",
        }
    }

    /// Builds the insert statement for one row of this kind.
    pub fn render(self, row: &Row) -> MigrateResult<String> {
        Ok(match self {
            RecordKind::Company => templates::company(&Company::from_row(row)?),
            RecordKind::Person => templates::person(&Person::from_row(row)?),
            RecordKind::Contract => templates::contract(&Contract::from_row(row)?),
            RecordKind::Call => templates::call(&Call::from_row(row)?),
        })
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_stem())
    }
}
