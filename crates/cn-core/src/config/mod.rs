//! Typed settings for Clipnest. / 配置数据结构。
//!
//! This module only maps TOML text onto [`AppConfig`]; reading the file is left
//! to bootstrap code.
//!
//! Missing keys keep the value of the base config they are merged over, so a
//! partial `config.toml` is always valid.
//! 缺失的键沿用基础配置中的值，因此部分填写的 `config.toml` 总是合法的。

pub mod app_config;

pub use app_config::{AppConfig, StorageBackendKind};
