use crate::error::MigrateResult;
use crate::source::Row;

/// Details only known for people who are customers of a company.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer {
    pub first_name: String,
    pub last_name: String,
    pub city: String,
    /// Raw cell text, written to the statement unquoted.
    pub age: String,
}

/// A person identified by phone number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Person {
    pub phone_number: String,
    pub customer: Option<Customer>,
}

impl Person {
    pub fn create(phone_number: String) -> Self {
        Self {
            phone_number,
            customer: None,
        }
    }

    /// A person is a customer iff the first_name cell is non-empty. Rows
    /// with a blank first name don't need the last_name, city or age columns.
    pub fn from_row(row: &Row) -> MigrateResult<Self> {
        let phone_number = row.require("phone_number")?.to_string();
        let first_name = row.require("first_name")?;

        if first_name.is_empty() {
            return Ok(Self::create(phone_number));
        }

        Ok(Self {
            phone_number,
            customer: Some(Customer {
                first_name: first_name.to_string(),
                last_name: row.require("last_name")?.to_string(),
                city: row.require("city")?.to_string(),
                age: row.require("age")?.to_string(),
            }),
        })
    }

    pub fn is_customer(&self) -> bool {
        self.customer.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MigrateError;

    #[test]
    fn blank_first_name_is_not_a_customer() {
        let row: Row = [("phone_number", "+86 921 547 9004"), ("first_name", "")]
            .into_iter()
            .collect();
        let person = Person::from_row(&row).unwrap();
        assert!(!person.is_customer());
        assert_eq!(person.phone_number, "+86 921 547 9004");
    }

    #[test]
    fn first_name_makes_a_customer() {
        let row: Row = [
            ("first_name", "Melli"),
            ("last_name", "Winchcum"),
            ("phone_number", "+7 171 898 0853"),
            ("city", "London"),
            ("age", "55"),
        ]
        .into_iter()
        .collect();
        let person = Person::from_row(&row).unwrap();
        let customer = person.customer.unwrap();
        assert_eq!(customer.first_name, "Melli");
        assert_eq!(customer.age, "55");
    }

    #[test]
    fn customer_without_city_column_fails() {
        let row: Row = [
            ("first_name", "Melli"),
            ("last_name", "Winchcum"),
            ("phone_number", "+7 171 898 0853"),
            ("age", "55"),
        ]
        .into_iter()
        .collect();
        assert!(matches!(
            Person::from_row(&row),
            Err(MigrateError::MissingColumn { column }) if column == "city"
        ));
    }

    #[test]
    fn phone_number_is_required() {
        let row: Row = [("first_name", "")].into_iter().collect();
        assert!(Person::from_row(&row).is_err());
    }
}
