//! Storage adapters implementing the repository port.
//!
//! Only the in-memory adapter lives here today; persistent adapters would
//! be separate crates depending on this one.

pub mod memory_repo;
