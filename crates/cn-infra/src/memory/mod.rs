//! In-process history storage.
//!
//! [`HistoryTable`] holds the ordered entries plus a hash index and is reused
//! by the JSON file backend as its working set.

mod repository;
mod table;

pub use repository::InMemoryHistoryRepository;
pub use table::HistoryTable;
