use crate::cli::CommonArgs;
use crate::error::Result;
use crate::git::GitRepo;
use crate::model::{BugFix, Record};
use crate::records::write_records;
use anyhow::Context;
use console::style;
use ignore::gitignore::{Gitignore, GitignoreBuilder};
use regex::Regex;
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};

/// Gitignore-style matcher for paths that should not count as bug sites.
pub struct ExcludeMatcher {
    gitignore: Gitignore,
}

impl ExcludeMatcher {
    pub fn new<P: AsRef<Path>>(root: P, patterns: &[String]) -> Result<Self> {
        let mut builder = GitignoreBuilder::new(root);
        for pattern in patterns.iter().filter(|p| !p.trim().is_empty()) {
            builder.add_line(None, pattern)?;
        }
        Ok(Self {
            gitignore: builder.build()?,
        })
    }

    pub fn is_excluded(&self, path: &str) -> bool {
        self.gitignore
            .matched_path_or_any_parents(path, false)
            .is_ignore()
    }
}

pub fn exec(
    common: CommonArgs,
    repo: Option<PathBuf>,
    pattern: &str,
    exclude: &[String],
    include_merges: bool,
    all_refs: bool,
    output: Option<PathBuf>,
) -> anyhow::Result<()> {
    let repo = GitRepo::open(repo.as_ref()).context("Failed to open git repository")?;

    let range = repo
        .resolve_range(common.since.as_deref(), common.until.as_deref())
        .context("Failed to resolve date range")?;

    let pattern = Regex::new(pattern).context("Invalid --pattern")?;
    let matcher = ExcludeMatcher::new(repo.path(), exclude).context("Invalid --exclude")?;

    let output = output.unwrap_or_else(|| common.data.clone());
    let to_stdout = output.as_os_str() == "-";

    let fixes = repo
        .collect_bug_fixes(&range, include_merges, all_refs, &pattern, !to_stdout)
        .context("Failed to collect bug-fix commits")?;

    for fix in &fixes {
        log::debug!("{}", describe_fix(fix));
    }

    let records = fixes_to_records(&fixes, &matcher);

    if to_stdout {
        write_records(io::stdout().lock(), &records)?;
    } else {
        let file = File::create(&output)
            .with_context(|| format!("Failed to create {}", output.display()))?;
        write_records(BufWriter::new(file), &records)?;
    }

    eprintln!(
        "Wrote {} records from {} bug-fix commits to {}",
        style(records.len()).cyan(),
        style(fixes.len()).cyan(),
        if to_stdout {
            "stdout".to_string()
        } else {
            output.display().to_string()
        }
    );

    Ok(())
}

fn describe_fix(fix: &BugFix) -> String {
    format!("{} {} ({} files)", fix.short_id(), fix.title, fix.paths.len())
}

/// One record per (commit, path), oldest first.
pub fn fixes_to_records(fixes: &[BugFix], matcher: &ExcludeMatcher) -> Vec<Record> {
    let mut records: Vec<Record> = fixes
        .iter()
        .flat_map(|fix| {
            fix.paths
                .iter()
                .filter(|path| !matcher.is_excluded(path))
                .map(move |path| Record::new(path.clone(), fix.timestamp))
        })
        .collect();

    records.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.path.cmp(&b.path)));
    records
}
