//! # cn-infra
//!
//! Infrastructure adapters for Clipnest: the three history backends
//! (memory, JSON file, SQLite) and the system clock.

pub mod db;
pub mod fs;
pub mod memory;
pub mod time;

pub use fs::JsonFileHistoryRepository;
pub use memory::InMemoryHistoryRepository;
pub use time::SystemClock;
