use anyhow::{Context, Result};
use bugmap::cli::Cli;
use std::fs::OpenOptions;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG, when set, overrides the -v/-q level.
    let mut builder = env_logger::Builder::new();
    builder.filter_level(cli.log_filter()).parse_default_env();

    // The TUI draws on stderr's terminal, so its logs go to a file instead.
    let target = match cli.log_file() {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            env_logger::Target::Pipe(Box::new(file))
        }
        None => env_logger::Target::Stderr,
    };
    builder.target(target).init();

    cli.execute()
}
