pub mod config;
pub mod run;
pub mod runtime;
pub mod tracing;
pub mod wiring;

pub use config::load_config;
pub use run::{run_app, PANEL_WINDOW_LABEL};
pub use runtime::{create_runtime, AppRuntime, AppRuntimeSeed, UseCases};
pub use wiring::{WiringError, WiringResult};
