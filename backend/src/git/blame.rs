use std::path::{Component, Path};

use chrono::{DateTime, SecondsFormat};
use tracing::debug;

use crate::error::{AppError, Operation, Result};
use crate::git::repository::GitRepository;
use crate::models::BlameLine;

impl GitRepository {
    /// Per-line attribution for `path` at HEAD.
    pub async fn get_blame(&self, path: &str) -> Result<Vec<BlameLine>> {
        check_repo_relative(path)?;

        let text = self
            .client
            .blame(path)
            .await
            .map_err(AppError::during(Operation::GetBlame))?;

        let lines = parse_blame(&text);
        debug!(path, lines = lines.len(), "parsed blame");
        Ok(lines)
    }
}

/// Blame paths must name something inside the work tree.
fn check_repo_relative(path: &str) -> Result<()> {
    let escapes = Path::new(path).components().any(|c| {
        matches!(
            c,
            Component::ParentDir | Component::RootDir | Component::Prefix(_)
        )
    });

    if path.trim().is_empty() || escapes {
        return Err(AppError::InvalidPath(path.to_string()));
    }
    Ok(())
}

#[derive(Debug, PartialEq, Eq)]
enum LineKind<'a> {
    /// `<hash> <origLine> <finalLine> [<groupSize>]`
    Header(&'a str),
    Author(&'a str),
    AuthorTime(&'a str),
    Content(&'a str),
    Other,
}

fn classify(line: &str) -> LineKind<'_> {
    if let Some(content) = line.strip_prefix('\t') {
        LineKind::Content(content)
    } else if let Some(secs) = line.strip_prefix("author-time ") {
        LineKind::AuthorTime(secs)
    } else if let Some(name) = line.strip_prefix("author ") {
        LineKind::Author(name)
    } else if let Some(hash) = header_hash(line) {
        LineKind::Header(hash)
    } else {
        LineKind::Other
    }
}

fn header_hash(line: &str) -> Option<&str> {
    let mut tokens = line.split(' ');
    let hash = tokens.next().filter(|h| !h.is_empty())?;
    if !hash.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }

    let numbers: Vec<&str> = tokens.collect();
    let numeric = numbers.iter().all(|n| n.parse::<u32>().is_ok());
    (matches!(numbers.len(), 2 | 3) && numeric).then_some(hash)
}

/// `author-time` seconds as ISO-8601 UTC with milliseconds.
fn iso_date(secs: &str) -> Option<String> {
    let secs = secs.trim().parse::<i64>().ok()?;
    DateTime::from_timestamp(secs, 0).map(|dt| dt.to_rfc3339_opts(SecondsFormat::Millis, true))
}

#[derive(Default)]
struct BlameState<'a> {
    /// Hash from the most recent header line.
    header_hash: &'a str,
    pending: Option<BlameLine>,
    emitted: usize,
}

impl<'a> BlameState<'a> {
    /// Consumes one line, returning a record when a new block closes the previous one.
    fn step(&mut self, line: &'a str) -> Option<BlameLine> {
        match classify(line) {
            LineKind::Header(hash) => {
                self.header_hash = hash;
                None
            }
            LineKind::Author(name) => {
                let finished = self.pending.take();
                if finished.is_some() {
                    self.emitted += 1;
                }
                self.pending = Some(BlameLine {
                    line: self.emitted + 1,
                    hash: self.header_hash.to_string(),
                    author: name.to_string(),
                    ..Default::default()
                });
                finished
            }
            LineKind::AuthorTime(secs) => {
                if let Some(pending) = self.pending.as_mut() {
                    pending.date = iso_date(secs).unwrap_or_default();
                }
                None
            }
            LineKind::Content(content) => {
                if let Some(pending) = self.pending.as_mut() {
                    pending.content = content.to_string();
                }
                None
            }
            LineKind::Other => None,
        }
    }

    fn finish(self) -> Option<BlameLine> {
        self.pending
    }
}

/// Converts porcelain blame output into sequentially numbered records.
///
/// One record is produced per `author` block; line numbers embedded in the
/// headers are ignored. Input without `author ` lines yields nothing.
pub fn parse_blame(text: &str) -> Vec<BlameLine> {
    let mut state = BlameState::default();
    let mut lines: Vec<BlameLine> = text.lines().filter_map(|line| state.step(line)).collect();
    lines.extend(state.finish());
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_block_without_author_time() {
        let lines = parse_blame("abc123 1 1 1\nauthor Test Author\n\tline1");
        assert_eq!(lines.len(), 1);
        assert_eq!(
            lines[0],
            BlameLine {
                line: 1,
                hash: "abc123".into(),
                author: "Test Author".into(),
                date: String::new(),
                content: "line1".into(),
            }
        );
    }

    #[test]
    fn author_time_becomes_iso_date() {
        let blame = "abc123 1 1 1
author Test Author
author-time 1640995200
\tline1";

        let lines = parse_blame(blame);
        assert_eq!(lines[0].date, "2022-01-01T00:00:00.000Z");
    }

    #[test]
    fn output_lines_are_renumbered_from_one() {
        let blame = "abc123 7 40 1
author Test Author
author-time 1640995200
\tline1
def456 3 41 1
author Another Author
\tline2";

        let lines = parse_blame(blame);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].line, 1);
        assert_eq!(lines[0].hash, "abc123");
        assert_eq!(lines[1].line, 2);
        assert_eq!(lines[1].hash, "def456");
        assert_eq!(lines[1].author, "Another Author");
        assert_eq!(lines[1].date, "");
        assert_eq!(lines[1].content, "line2");
    }

    #[test]
    fn full_porcelain_metadata_is_skipped() {
        let blame = "4a5b6c7d8e9f 1 1 2
author Alice
author-mail <alice@example.com>
author-time 1700000000
author-tz +0100
committer Bob
committer-mail <bob@example.com>
committer-time 1700000100
committer-tz +0100
summary Initial commit
previous 0123abcd src/old.rs
filename src/lib.rs
\tfn main() {}";

        let lines = parse_blame(blame);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].hash, "4a5b6c7d8e9f");
        assert_eq!(lines[0].author, "Alice");
        assert_eq!(lines[0].date, "2023-11-14T22:13:20.000Z");
        assert_eq!(lines[0].content, "fn main() {}");
    }

    #[test]
    fn malformed_input_is_empty() {
        assert!(parse_blame("").is_empty());
        assert!(parse_blame("invalid blame data without proper format").is_empty());
    }

    #[test]
    fn unparseable_author_time_leaves_date_empty() {
        let lines = parse_blame("abc 1 1 1\nauthor A\nauthor-time soon\n\tx");
        assert_eq!(lines[0].date, "");
    }

    #[test]
    fn content_keeps_inner_tabs_and_spaces() {
        let lines = parse_blame("abc 1 1 1\nauthor A\n\t\tindented  ");
        assert_eq!(lines[0].content, "\tindented  ");
    }

    #[test]
    fn blame_paths_must_stay_inside_the_repository() {
        assert!(check_repo_relative("src/main.rs").is_ok());
        assert!(check_repo_relative("./README.md").is_ok());
        assert!(matches!(
            check_repo_relative("../secret"),
            Err(AppError::InvalidPath(_))
        ));
        assert!(check_repo_relative("/etc/passwd").is_err());
        assert!(check_repo_relative("").is_err());
    }
}
