//! The token → accounts/roles → credentials pipeline
//!
//! Stages communicate only through records: the enumerator turns an
//! access token into a lazy stream of [`AccountRoleRecord`]s, and the
//! exchanger turns each record into a [`CredentialRecord`]. No stage
//! holds state beyond its inputs.

pub mod enumerate;
pub mod exchange;
pub mod filter;

pub use enumerate::{account_roles, AccountRoleRecord};
pub use exchange::{exchange_credential, CredentialRecord, ExchangeRequest};
pub use filter::NameFilters;
