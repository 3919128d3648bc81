//! # cn-tauri
//!
//! Tauri integration layer for Clipnest.
//!
//! ## Modules
//!
//! - **adapters**: Tauri-backed implementations of the panel, display, hotkey and UI event ports
//! - **bootstrap**: configuration, tracing, dependency wiring and the Tauri run loop
//! - **commands**: IPC command handlers invoked by the frontend
//! - **events**: event names and payloads pushed to the frontend

pub mod adapters;
pub mod bootstrap;
pub mod commands;
pub mod events;

pub use bootstrap::run_app;
