use crate::error::MigrateResult;
use crate::source::Row;

/// A call between two people, matched by phone number.
///
/// `started_at` and `duration` are kept as the raw cell text; the store
/// parses them as datetime and long literals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub caller_id: String,
    pub callee_id: String,
    pub started_at: String,
    pub duration: String,
}

impl Call {
    pub fn from_row(row: &Row) -> MigrateResult<Self> {
        Ok(Self {
            caller_id: row.require("caller_id")?.to_string(),
            callee_id: row.require("callee_id")?.to_string(),
            started_at: row.require("started_at")?.to_string(),
            duration: row.require("duration")?.to_string(),
        })
    }
}
