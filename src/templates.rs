//! Graql statement templates, one per record kind.
//!
//! Values are interpolated as-is. A value containing `"` yields a malformed
//! statement, which the store will reject.

use crate::model::{Call, Company, Contract, Person};

pub fn company(company: &Company) -> String {
    format!(r#"insert $company isa company, has name "{}";"#, company.name)
}

pub fn person(person: &Person) -> String {
    let mut query = format!(
        r#"insert $person isa person, has phone-number "{}""#,
        person.phone_number
    );

    match &person.customer {
        None => query.push_str(", has is-customer false"),
        Some(c) => {
            query.push_str(", has is-customer true");
            query.push_str(&format!(r#", has first-name "{}""#, c.first_name));
            query.push_str(&format!(r#", has last-name "{}""#, c.last_name));
            query.push_str(&format!(r#", has city "{}""#, c.city));
            query.push_str(&format!(", has age {}", c.age));
        }
    }

    query.push(';');
    query
}

pub fn contract(contract: &Contract) -> String {
    format!(
        concat!(
            r#"match $company isa company, has name "{}";"#,
            r#" $customer isa person, has phone-number "{}";"#,
            " insert (provider: $company, customer: $customer) isa contract;",
        ),
        contract.company_name, contract.person_id
    )
}

pub fn call(call: &Call) -> String {
    format!(
        concat!(
            r#"match $caller isa person, has phone-number "{}";"#,
            r#" $callee isa person, has phone-number "{}";"#,
            " insert $call(caller: $caller, callee: $callee) isa call;",
            " $call has started-at {};",
            " $call has duration {};",
        ),
        call.caller_id, call.callee_id, call.started_at, call.duration
    )
}
