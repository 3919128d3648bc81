//! Logging setup for the desktop shell.
//!
//! 日志初始化：终端输出 + 日志文件。
//!
//! Every record goes to stdout and, when the logs directory is writable, to
//! `clipnest.log` through a non-blocking appender. `RUST_LOG` replaces the
//! built-in directives entirely when set.

use std::{fs, io, sync::OnceLock};

use cn_core::ports::AppDirsPort;
use cn_platform::app_dirs::DirsAppDirsAdapter;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::fmt::format::{DefaultFields, Format, Full};
use tracing_subscriber::fmt::time::ChronoUtc;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{fmt, prelude::*, registry, EnvFilter};

const LOG_FILE_NAME: &str = "clipnest.log";

/// `2026-01-15 10:30:45.123`
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

static FILE_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

type LineLayer<S, W> = fmt::Layer<S, DefaultFields, Format<Full, ChronoUtc>, W>;

/// Directives used when `RUST_LOG` is absent.
///
/// Debug builds log our crates at `debug`, release builds at `info`. The
/// webview and IPC plumbing of tauri is kept quiet either way.
fn build_filter_directives(is_dev: bool) -> Vec<String> {
    let level = if is_dev { "debug" } else { "info" };
    let mut directives = vec![level.to_string()];
    directives.extend(
        ["tauri=warn", "wry=off", "ipc::request=off", "diesel=warn"]
            .into_iter()
            .map(String::from),
    );
    directives.extend(["cn_platform", "cn_infra"].map(|target| format!("{target}={level}")));
    directives
}

fn line_layer<S, W>(writer: W, ansi: bool) -> LineLayer<S, W>
where
    W: for<'w> MakeWriter<'w> + 'static,
{
    fmt::layer()
        .with_timer(ChronoUtc::new(TIMESTAMP_FORMAT.to_string()))
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .with_ansi(ansi)
        .with_writer(writer)
}

/// Install the global subscriber and route `log` records into it.
///
/// Must run before the Tauri builder so setup hooks are captured. Fails if
/// another subscriber or logger was installed first.
pub fn init_tracing_subscriber() -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(build_filter_directives(cfg!(debug_assertions)).join(","))
    });

    let file_layer = match open_log_file() {
        Ok(writer) => Some(line_layer(writer, false)),
        Err(err) => {
            eprintln!("file logging disabled, stdout only: {err}");
            None
        }
    };

    let subscriber = registry()
        .with(env_filter)
        .with(line_layer(io::stdout, cfg!(not(test))))
        .with(file_layer);
    tracing::subscriber::set_global_default(subscriber)?;
    tracing_log::LogTracer::init()?;

    Ok(())
}

fn open_log_file() -> anyhow::Result<NonBlocking> {
    let logs_dir = DirsAppDirsAdapter::new().get_app_dirs()?.logs_dir();
    fs::create_dir_all(&logs_dir)?;

    let (writer, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::never(&logs_dir, LOG_FILE_NAME));
    FILE_GUARD
        .set(guard)
        .map_err(|_| anyhow::anyhow!("log file writer initialized twice"))?;

    Ok(writer)
}
