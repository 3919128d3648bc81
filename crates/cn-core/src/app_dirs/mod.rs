use std::path::PathBuf;

/// Resolved application directories (facts only, nothing is created here).
///
/// 已解析的应用目录（仅为事实，不在此创建目录）。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppDirs {
    pub app_data_root: PathBuf,
}

impl AppDirs {
    pub fn logs_dir(&self) -> PathBuf {
        self.app_data_root.join("logs")
    }

    pub fn config_path(&self) -> PathBuf {
        self.app_data_root.join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derived_paths_live_under_data_root() {
        let dirs = AppDirs {
            app_data_root: PathBuf::from("/tmp/clipnest"),
        };
        assert_eq!(dirs.logs_dir(), PathBuf::from("/tmp/clipnest/logs"));
        assert_eq!(dirs.config_path(), PathBuf::from("/tmp/clipnest/config.toml"));
    }
}
