use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// File logging, opt-in via `WIRELOG_LOG=<path>`. The TUI owns the
/// terminal, so diagnostics never go to stdout/stderr; without the env var
/// nothing is recorded at all.
pub fn init() -> Option<WorkerGuard> {
    let path = std::env::var("WIRELOG_LOG").ok()?;
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .ok()?;

    let (writer, guard) = tracing_appender::non_blocking(file);
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(writer)
        .with_ansi(false)
        .init();

    Some(guard)
}
