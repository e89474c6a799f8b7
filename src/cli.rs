use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "bugmap")]
#[command(about = "Browse where bug-fixing commits land in a source tree")]
#[command(version)]
pub struct Cli {
    #[clap(flatten)]
    pub common: CommonArgs,

    #[arg(short, long, global = true, help = "Enable debug logging")]
    pub verbose: bool,

    #[arg(short, long, global = true, conflicts_with = "verbose", help = "Only log errors")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Clone)]
pub struct CommonArgs {
    #[arg(long, global = true, default_value = "bugs.csv", help = "Path to the path,date bug CSV")]
    pub data: PathBuf,

    #[arg(long, global = true, help = "Only count fixes at or after this date (RFC3339, YYYY-MM-DD, or a duration like 90d)")]
    pub since: Option<String>,

    #[arg(long, global = true, help = "Only count fixes at or before this date (RFC3339, YYYY-MM-DD, or a duration like 90d)")]
    pub until: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print one directory level of the bug distribution
    Breakdown {
        #[arg(long, help = "Output as JSON")]
        json: bool,

        #[arg(long, conflicts_with = "json", help = "Output as NDJSON")]
        ndjson: bool,

        #[arg(long, help = "Only show the N busiest entries")]
        top: Option<usize>,

        #[arg(help = "Directory to break down (defaults to the root)")]
        path: Option<String>,
    },
    /// Browse the distribution interactively
    #[command(alias = "tui", alias = "ui")]
    Explore {
        #[arg(help = "Directory to start in")]
        path: Option<String>,

        #[arg(long, help = "Where to write logs while the browser owns the terminal (defaults to the data path with a .log extension)")]
        log_file: Option<PathBuf>,
    },
    /// Build the bug CSV from git history
    Generate {
        #[arg(long, help = "Path to git repository")]
        repo: Option<PathBuf>,

        #[arg(long, default_value = "BUGS-[0-9]", help = "Regex a commit message must match to count as a bug fix")]
        pattern: String,

        #[arg(long, default_value = "/test*", help = "Gitignore-style pattern of paths to leave out (repeatable)")]
        exclude: Vec<String>,

        #[arg(long, help = "Include merge commits", default_value_t = false)]
        include_merges: bool,

        #[arg(long, help = "Scan commits reachable from any branch, tag or remote ref, not just HEAD")]
        all: bool,

        #[arg(short, long, help = "Where to write the CSV ('-' for stdout, defaults to --data)")]
        output: Option<PathBuf>,
    },
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    pub fn log_filter(&self) -> log::LevelFilter {
        if self.quiet {
            log::LevelFilter::Error
        } else if self.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Warn
        }
    }

    /// Log destination for commands that take over the terminal.
    pub fn log_file(&self) -> Option<PathBuf> {
        match &self.command {
            Commands::Explore { log_file, .. } => Some(
                log_file
                    .clone()
                    .unwrap_or_else(|| self.common.data.with_extension("log")),
            ),
            _ => None,
        }
    }

    pub fn execute(self) -> Result<()> {
        match self.command {
            Commands::Breakdown { json, ndjson, top, path } => {
                crate::breakdown::exec(self.common, json, ndjson, top, path)
            }
            Commands::Explore { path, .. } => {
                crate::tui::run(&self.common, path).map_err(|e| anyhow::anyhow!(e))
            }
            Commands::Generate {
                repo,
                pattern,
                exclude,
                include_merges,
                all,
                output,
            } => crate::generate::exec(
                self.common,
                repo,
                &pattern,
                &exclude,
                include_merges,
                all,
                output,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn common_flags_work_after_the_subcommand() {
        let cli = Cli::try_parse_from(["bugmap", "breakdown", "--data", "x.csv", "--since", "90d", "src"]).unwrap();
        assert_eq!(cli.common.data, PathBuf::from("x.csv"));
        assert_eq!(cli.common.since.as_deref(), Some("90d"));
        assert!(matches!(cli.command, Commands::Breakdown { path: Some(ref p), .. } if p == "src"));
    }

    #[test]
    fn generate_defaults_mirror_the_classic_pipeline() {
        let cli = Cli::try_parse_from(["bugmap", "generate"]).unwrap();
        match cli.command {
            Commands::Generate { pattern, exclude, include_merges, all, output, .. } => {
                assert_eq!(pattern, "BUGS-[0-9]");
                assert_eq!(exclude, vec!["/test*".to_string()]);
                assert!(!include_merges);
                assert!(!all);
                assert!(output.is_none());
            }
            _ => panic!("expected generate"),
        }
    }

    #[test]
    fn verbosity_maps_to_log_levels() {
        let cli = Cli::try_parse_from(["bugmap", "-v", "explore"]).unwrap();
        assert_eq!(cli.log_filter(), log::LevelFilter::Debug);
        let cli = Cli::try_parse_from(["bugmap", "explore", "-q"]).unwrap();
        assert_eq!(cli.log_filter(), log::LevelFilter::Error);
    }

    #[test]
    fn explore_logs_beside_the_data_file() {
        let cli = Cli::try_parse_from(["bugmap", "explore", "--data", "out/bugs.csv"]).unwrap();
        assert_eq!(cli.log_file(), Some(PathBuf::from("out/bugs.log")));

        let cli = Cli::try_parse_from(["bugmap", "explore", "--log-file", "/tmp/b.log"]).unwrap();
        assert_eq!(cli.log_file(), Some(PathBuf::from("/tmp/b.log")));

        let cli = Cli::try_parse_from(["bugmap", "breakdown"]).unwrap();
        assert_eq!(cli.log_file(), None);
    }
}
