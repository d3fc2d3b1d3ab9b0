use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "wirelog",
    version,
    about = "Live terminal console for a streamed structured-log feed",
    long_about = "Follow a server's structured log stream live: bounded in-memory history, \
pause/resume, free-text filtering, and automatic reconnect when the feed drops."
)]
pub struct Cli {
    /// host[:port] of the serving instance (overrides the config file)
    #[arg(long)]
    pub host: Option<String>,

    /// Connect with the secure transport scheme (wss)
    #[arg(long)]
    pub secure: bool,

    /// Path to a config file (default: $WIRELOG_CONFIG, then the platform
    /// config directory)
    #[arg(long)]
    pub config: Option<PathBuf>,
}
