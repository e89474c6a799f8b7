use crate::model::DateRange;
use chrono::{DateTime, Utc};

/// Where the user is looking: a base path (`""` or ending in `/`) and the
/// date threshold records must meet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Navigation {
    base_path: String,
    since: Option<DateTime<Utc>>,
}

impl Navigation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start at an arbitrary user-supplied path, e.g. `src`, `/src/` or `src//ui`.
    pub fn at(path: &str) -> Self {
        let mut nav = Self::new();
        for segment in path.split('/').filter(|s| !s.is_empty()) {
            nav.descend(segment);
        }
        nav
    }

    pub fn with_since(mut self, since: Option<DateTime<Utc>>) -> Self {
        self.since = since;
        self
    }

    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    pub fn since(&self) -> Option<DateTime<Utc>> {
        self.since
    }

    pub fn is_root(&self) -> bool {
        self.base_path.is_empty()
    }

    pub fn range(&self) -> DateRange {
        DateRange {
            since: self.since,
            until: None,
        }
    }

    pub fn descend(&mut self, name: &str) {
        if name.is_empty() || name.contains('/') {
            return;
        }
        self.base_path.push_str(name);
        self.base_path.push('/');
    }

    /// Go up one level. Returns the segment that was left, `None` at the root.
    pub fn ascend(&mut self) -> Option<String> {
        let mut parts: Vec<&str> = self.base_path.split('/').filter(|p| !p.is_empty()).collect();
        let left = parts.pop()?.to_string();
        self.base_path = if parts.is_empty() {
            String::new()
        } else {
            format!("{}/", parts.join("/"))
        };
        Some(left)
    }

    pub fn set_since(&mut self, since: Option<DateTime<Utc>>) {
        self.since = since;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    #[test]
    fn descend_appends_a_trailing_slash() {
        let mut nav = Navigation::new();
        nav.descend("src");
        nav.descend("ui");
        assert_eq!(nav.base_path(), "src/ui/");
    }

    #[test]
    fn descend_rejects_names_that_break_the_format() {
        let mut nav = Navigation::new();
        nav.descend("");
        nav.descend("a/b");
        assert!(nav.is_root());
    }

    #[test]
    fn ascend_walks_back_to_root_and_clamps() {
        let mut nav = Navigation::at("src/ui");
        assert_eq!(nav.ascend().as_deref(), Some("ui"));
        assert_eq!(nav.base_path(), "src/");
        assert_eq!(nav.ascend().as_deref(), Some("src"));
        assert_eq!(nav.base_path(), "");
        assert_eq!(nav.ascend(), None);
        assert_eq!(nav.base_path(), "");
    }

    #[test]
    fn at_normalizes_user_paths() {
        assert_eq!(Navigation::at("").base_path(), "");
        assert_eq!(Navigation::at("/").base_path(), "");
        assert_eq!(Navigation::at("src").base_path(), "src/");
        assert_eq!(Navigation::at("/src//ui/").base_path(), "src/ui/");
    }

    #[test]
    fn since_feeds_the_range() {
        let t = Utc.with_ymd_and_hms(2020, 5, 1, 0, 0, 0).unwrap();
        let mut nav = Navigation::new();
        assert_eq!(nav.range(), DateRange::new());
        nav.set_since(Some(t));
        assert_eq!(nav.since(), Some(t));
        assert_eq!(nav.range(), DateRange::new().with_since(t));
    }
}
