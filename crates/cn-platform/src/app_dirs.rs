use std::path::PathBuf;

use cn_core::{
    app_dirs::AppDirs,
    ports::{AppDirsError, AppDirsPort},
};

const APP_DIR_NAME: &str = "clipnest";
const PROFILE_ENV: &str = "CN_PROFILE";

/// `clipnest`, or `clipnest-<profile>` when `CN_PROFILE` is set, so several
/// instances can run side by side with isolated data.
fn resolved_app_dir_name() -> String {
    match std::env::var(PROFILE_ENV) {
        Ok(profile) if !profile.is_empty() => format!("{APP_DIR_NAME}-{profile}"),
        _ => APP_DIR_NAME.to_string(),
    }
}

/// Resolves application directories from the `dirs` crate.
pub struct DirsAppDirsAdapter {
    base_data_local_dir_override: Option<PathBuf>,
}

impl Default for DirsAppDirsAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl DirsAppDirsAdapter {
    pub fn new() -> Self {
        Self {
            base_data_local_dir_override: None,
        }
    }

    /// Use `base` instead of the system data-local directory.
    pub fn with_base_data_local_dir(base: PathBuf) -> Self {
        Self {
            base_data_local_dir_override: Some(base),
        }
    }

    pub fn base_data_local_dir(&self) -> Option<PathBuf> {
        if let Some(base) = &self.base_data_local_dir_override {
            return Some(base.clone());
        }
        dirs::data_local_dir()
    }
}

impl AppDirsPort for DirsAppDirsAdapter {
    fn get_app_dirs(&self) -> Result<AppDirs, AppDirsError> {
        let base_data = self
            .base_data_local_dir()
            .ok_or(AppDirsError::DataLocalDirUnavailable)?;

        Ok(AppDirs {
            app_data_root: base_data.join(resolved_app_dir_name()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    static CN_PROFILE_ENV_LOCK: Mutex<()> = Mutex::new(());

    fn with_cn_profile<T>(value: Option<&str>, f: impl FnOnce() -> T) -> T {
        let _guard = CN_PROFILE_ENV_LOCK.lock().unwrap();
        let previous = std::env::var(PROFILE_ENV).ok();

        match value {
            Some(profile) => std::env::set_var(PROFILE_ENV, profile),
            None => std::env::remove_var(PROFILE_ENV),
        }

        let result = f();

        match previous {
            Some(profile) => std::env::set_var(PROFILE_ENV, profile),
            None => std::env::remove_var(PROFILE_ENV),
        }

        result
    }

    #[test]
    fn adapter_appends_clipnest_dir_name() {
        with_cn_profile(None, || {
            let adapter = DirsAppDirsAdapter::with_base_data_local_dir(PathBuf::from("/tmp"));
            let dirs = adapter.get_app_dirs().unwrap();
            assert_eq!(dirs.app_data_root, PathBuf::from("/tmp/clipnest"));
        });
    }

    #[test]
    fn empty_profile_is_ignored() {
        with_cn_profile(Some(""), || {
            let adapter = DirsAppDirsAdapter::with_base_data_local_dir(PathBuf::from("/tmp"));
            let dirs = adapter.get_app_dirs().unwrap();
            assert_eq!(dirs.app_data_root, PathBuf::from("/tmp/clipnest"));
        });
    }

    #[test]
    fn profiles_get_isolated_dirs() {
        let dirs_a = with_cn_profile(Some("a"), || {
            DirsAppDirsAdapter::with_base_data_local_dir(PathBuf::from("/tmp"))
                .get_app_dirs()
                .unwrap()
        });
        let dirs_b = with_cn_profile(Some("b"), || {
            DirsAppDirsAdapter::with_base_data_local_dir(PathBuf::from("/tmp"))
                .get_app_dirs()
                .unwrap()
        });

        assert_eq!(dirs_a.app_data_root, PathBuf::from("/tmp/clipnest-a"));
        assert_eq!(dirs_b.app_data_root, PathBuf::from("/tmp/clipnest-b"));
    }
}
