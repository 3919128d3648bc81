pub mod event_bus;
mod runtime;

pub use runtime::PlatformRuntime;
