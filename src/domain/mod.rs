//! Domain layer: the account entity, its rules, and the storage port.

pub mod account;
pub mod date;
pub mod filter;
pub mod page;
pub mod ports;
pub mod validation;
