//! Adapters between the outside world's formats and the domain.

pub mod csv;
