//! # Configuration Loader / 配置加载器
//!
//! ## Responsibilities / 职责
//!
//! - ✅ Read the optional TOML configuration file / 读取可选的 TOML 配置文件
//! - ✅ Overlay present keys on the system defaults / 将已有键覆盖到系统默认值上
//! - ✅ Report I/O and parsing errors with context / 报告带上下文的 I/O 和解析错误

use std::path::Path;

use anyhow::Context;
use cn_core::config::AppConfig;

/// Load configuration from a TOML file
/// 从 TOML 文件加载配置
///
/// A missing file is not an error: `base` is returned unchanged. Keys absent
/// from the file keep their value from `base`.
///
/// # Errors / 错误
///
/// Returns error if:
/// - File exists but cannot be read (I/O error)
/// - Content is not valid TOML (parse error)
/// - A known key holds an unusable value (e.g. unknown storage backend)
pub fn load_config(config_path: &Path, base: AppConfig) -> anyhow::Result<AppConfig> {
    if !config_path.exists() {
        tracing::info!(path = %config_path.display(), "No config file, using defaults");
        return Ok(base);
    }

    let content = std::fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
    let toml_value: toml::Value =
        toml::from_str(&content).context("Failed to parse config as TOML")?;
    AppConfig::from_toml(&toml_value, base)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cn_core::StorageBackendKind;
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::NamedTempFile;

    fn base() -> AppConfig {
        AppConfig::with_system_defaults(PathBuf::from("/data/clipnest"))
    }

    /// Test that valid TOML is parsed correctly
    /// 测试有效 TOML 被正确解析
    #[test]
    fn test_load_config_reads_valid_toml() {
        let toml_content = r#"
            [storage]
            backend = "file"
            history_file_path = "/tmp/h.json"

            [clipboard]
            poll_interval_ms = 250

            [hotkeys]
            toggle_panel = "Alt+Space"
        "#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = load_config(temp_file.path(), base()).unwrap();

        assert_eq!(config.storage_backend, StorageBackendKind::File);
        assert_eq!(config.history_file_path, PathBuf::from("/tmp/h.json"));
        assert_eq!(config.poll_interval_ms, 250);
        assert_eq!(config.toggle_panel_hotkey, "Alt+Space");
        assert_eq!(config.hide_panel_hotkey, "Escape");
        assert_eq!(config.max_preview_chars, 100);
    }

    /// Test that a missing file yields the defaults
    /// 测试缺失文件时返回默认值
    #[test]
    fn test_load_config_missing_file_returns_base() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(&dir.path().join("config.toml"), base()).unwrap();
        assert_eq!(config, base());
    }

    /// Test that invalid TOML returns error
    /// 测试无效 TOML 返回错误
    #[test]
    fn test_load_config_rejects_invalid_toml() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(b"[storage\nbackend = ").unwrap();

        let result = load_config(temp_file.path(), base());
        assert!(result.is_err());
    }
}
