mod document;
mod json_history_repo;

pub use json_history_repo::JsonFileHistoryRepository;
