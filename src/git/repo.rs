use crate::error::{BugmapError, Result};
use crate::model::{BugFix, DateRange};
use crate::util::{build_range, parse_date_arg};
use chrono::{DateTime, Utc};
use gix::object::tree::diff::ChangeDetached;
use gix::{discover, ObjectId, Repository};
use indicatif::{ProgressBar, ProgressStyle};
use regex::Regex;
use std::collections::{HashSet, VecDeque};
use std::path::{Path, PathBuf};

pub struct GitRepo {
    repo: Repository,
    path: PathBuf,
}

impl GitRepo {
    /// Open a repository at `path`, or current dir if `None`
    pub fn open<P: AsRef<Path>>(path: Option<P>) -> Result<Self> {
        let repo_path = path
            .map(|p| p.as_ref().to_path_buf())
            .unwrap_or(std::env::current_dir()?);

        let repo = discover(&repo_path)?;
        let path = repo.workdir().unwrap_or_else(|| repo.path()).to_path_buf();

        Ok(Self { repo, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Like [`crate::util::resolve_range`], but bounds may also name a commit.
    pub fn resolve_range(&self, since: Option<&str>, until: Option<&str>) -> Result<DateRange> {
        let since_dt = since.map(|s| self.parse_commit_or_date(s)).transpose()?;
        let until_dt = until.map(|u| self.parse_commit_or_date(u)).transpose()?;
        build_range(since_dt, until_dt)
    }

    fn parse_commit_or_date(&self, input: &str) -> Result<DateTime<Utc>> {
        if let Ok(dt) = parse_date_arg(input) {
            return Ok(dt);
        }

        // Fallback to Git ref
        let id = self
            .repo
            .rev_parse_single(input)
            .map_err(|e| BugmapError::Parse(format!("Invalid commit or date '{input}': {e}")))?;

        let commit = id
            .object()?
            .try_into_commit()
            .map_err(|_| BugmapError::Parse(format!("Not a commit: {input}")))?;

        let secs = commit.time()?.seconds;
        DateTime::<Utc>::from_timestamp(secs, 0)
            .ok_or_else(|| BugmapError::InvalidDate(format!("Invalid timestamp: {secs}")))
    }

    /// Commits the history walk starts from: HEAD, plus the tip of every
    /// branch, tag and remote ref when `all_refs` is set.
    fn walk_tips(&self, all_refs: bool) -> Result<Vec<ObjectId>> {
        let mut head = self.repo.head()?;
        let mut tips = vec![head.peel_to_commit_in_place()?.id];
        if !all_refs {
            return Ok(tips);
        }

        let platform = self
            .repo
            .references()
            .map_err(|e| BugmapError::Parse(format!("Cannot list references: {e}")))?;
        let refs = platform
            .all()
            .map_err(|e| BugmapError::Parse(format!("Cannot list references: {e}")))?;

        for reference in refs {
            let mut reference =
                reference.map_err(|e| BugmapError::Parse(format!("Bad reference: {e}")))?;
            let id = match reference.peel_to_id_in_place() {
                Ok(id) => id.detach(),
                Err(e) => {
                    log::warn!("Skipping reference {}: {e}", reference.name().as_bstr());
                    continue;
                }
            };
            // Tags may point at trees or blobs.
            if self.repo.find_object(id)?.kind == gix::object::Kind::Commit {
                tips.push(id);
            }
        }
        Ok(tips)
    }

    /// Walk history from HEAD (or from every ref with `all_refs`) and return
    /// every commit whose message matches `pattern`, with the file paths it changed.
    pub fn collect_bug_fixes(
        &self,
        range: &DateRange,
        include_merges: bool,
        all_refs: bool,
        pattern: &Regex,
        show_progress: bool,
    ) -> Result<Vec<BugFix>> {
        let mut fixes = Vec::new();
        let mut seen: HashSet<ObjectId> = HashSet::new();
        let mut stack: VecDeque<ObjectId> = self.walk_tips(all_refs)?.into();

        let pb = if show_progress {
            ProgressBar::new_spinner()
        } else {
            ProgressBar::hidden()
        };
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg} ({pos} commits)")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message("Scanning history for bug fixes...");

        while let Some(commit_id) = stack.pop_back() {
            if !seen.insert(commit_id) {
                continue;
            }

            let commit = self.repo.find_commit(commit_id)?;
            let parents: Vec<ObjectId> = commit.parent_ids().map(|id| id.into()).collect();
            stack.extend(parents.iter().copied());
            pb.inc(1);

            let secs = commit.time()?.seconds;
            let timestamp = DateTime::from_timestamp(secs, 0)
                .ok_or_else(|| BugmapError::InvalidDate(format!("Invalid timestamp: {secs}")))?;

            if !range.contains(&timestamp) {
                continue;
            }
            if !include_merges && parents.len() > 1 {
                continue;
            }

            let message = commit.message_raw()?.to_string();
            if !pattern.is_match(&message) {
                continue;
            }

            let paths = self.changed_paths(commit_id, parents.first().copied())?;
            fixes.push(BugFix {
                commit_id: commit_id.to_string(),
                title: message.lines().next().unwrap_or("").trim().to_string(),
                timestamp,
                paths,
            });
        }

        pb.finish_with_message(format!("Found {} bug-fix commits", fixes.len()));
        Ok(fixes)
    }

    /// Paths of blobs changed against the first parent (or all blobs of a root commit).
    fn changed_paths(&self, commit_id: ObjectId, parent_id: Option<ObjectId>) -> Result<Vec<String>> {
        let commit_tree = self.repo.find_commit(commit_id)?.tree()?;
        let parent_tree = match parent_id {
            Some(pid) => Some(self.repo.find_commit(pid)?.tree()?),
            None => None,
        };

        let changes: Vec<ChangeDetached> =
            self.repo
                .diff_tree_to_tree(parent_tree.as_ref(), Some(&commit_tree), None)?;

        let mut paths = Vec::new();
        for change in changes {
            match change {
                ChangeDetached::Addition { location, entry_mode, .. }
                | ChangeDetached::Deletion { location, entry_mode, .. }
                | ChangeDetached::Modification { location, entry_mode, .. }
                | ChangeDetached::Rewrite { location, entry_mode, .. } => {
                    if !entry_mode.is_tree() {
                        paths.push(location.to_string());
                    }
                }
            }
        }
        Ok(paths)
    }
}
