//! Clipnest Application Orchestration Layer
//!
//! This crate contains the history store, the panel state machine and the
//! use cases that connect them to the platform.

pub mod deps;
pub mod history;
pub mod panel;
pub mod usecases;

pub use deps::AppDeps;
pub use history::HistoryStore;
pub use panel::{PanelBehavior, PanelController};
