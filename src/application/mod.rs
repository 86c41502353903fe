//! Application layer containing the account use cases.
//!
//! `AccountService` is the façade callers use. It delegates reads to the
//! `QueryEngine` and bulk loads to the `ImportPipeline`, all against a boxed
//! `AccountStore`.

pub mod import;
pub mod query;
pub mod service;
