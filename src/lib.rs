//! Data-access core for the schoolbook records manager.
//!
//! The interactive shell lives in the binary. Everything observable through
//! the database (schema, integrity rules, queries, CSV export) is here, so
//! the scenario tests under `tests/` can drive it directly.

pub mod db;
pub mod store;
