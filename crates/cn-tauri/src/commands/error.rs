use std::fmt::Display;

/// Centralized failure handling for commands.
///
/// IPC commands never reject: a failure is logged and the caller receives
/// `fallback` (`false`, an empty list, `None`).
pub fn or_fallback<T, E: Display>(command: &'static str, result: Result<T, E>, fallback: T) -> T {
    match result {
        Ok(value) => value,
        Err(e) => {
            tracing::error!(command, error = %e, "Command failed");
            fallback
        }
    }
}
