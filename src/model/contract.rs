use crate::error::MigrateResult;
use crate::source::Row;

/// A company providing service to a person. Both ends must already exist
/// in the keyspace; they are matched by company name and phone number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contract {
    pub company_name: String,
    pub person_id: String,
}

impl Contract {
    pub fn from_row(row: &Row) -> MigrateResult<Self> {
        Ok(Self {
            company_name: row.require("company_name")?.to_string(),
            person_id: row.require("person_id")?.to_string(),
        })
    }
}
