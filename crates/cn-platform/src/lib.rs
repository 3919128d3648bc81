//! # cn-platform
//!
//! Platform-specific implementations for Clipnest.
//!
//! This crate contains the adapters that talk to the operating system: the
//! clipboard, the polling watcher with its event/command runtime, and the
//! application directory layout.

pub mod adapters;
pub mod app_dirs;
pub mod clipboard;
pub mod ipc;
pub mod runtime;
