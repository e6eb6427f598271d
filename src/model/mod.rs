pub mod company;
pub mod person;
pub mod contract;
pub mod call;
pub mod kind;

// Re-exports for convenience
pub use company::Company;
pub use person::{Customer, Person};
pub use contract::Contract;
pub use call::Call;
pub use kind::RecordKind;
