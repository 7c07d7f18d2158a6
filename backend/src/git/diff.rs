use tracing::debug;

use crate::error::{AppError, Operation, Result};
use crate::git::repository::GitRepository;
use crate::models::DiffFile;

impl GitRepository {
    /// Per-file changes of `hash` against its first parent.
    pub async fn get_diff(&self, hash: &str) -> Result<Vec<DiffFile>> {
        let text = self
            .client
            .diff(hash)
            .await
            .map_err(AppError::during(Operation::GetDiff))?;

        let files = parse_diff(&text);
        debug!(hash, files = files.len(), "parsed diff");
        Ok(files)
    }
}

/// How a single diff line affects the file being accumulated.
#[derive(Debug, PartialEq, Eq)]
enum LineKind<'a> {
    /// `diff --git a/... b/...`, carrying the `b/` path.
    FileHeader(&'a str),
    Addition,
    Deletion,
    /// Kept in the change body without touching the counts.
    Body,
    /// `index`, mode changes, binary markers and anything else git emits.
    Ignored,
}

fn classify(line: &str) -> LineKind<'_> {
    if line.starts_with("diff --git") {
        LineKind::FileHeader(header_path(line))
    } else if line.starts_with("+++") || line.starts_with("---") {
        LineKind::Body
    } else if line.starts_with('+') {
        LineKind::Addition
    } else if line.starts_with('-') {
        LineKind::Deletion
    } else if line.starts_with("@@") || line.starts_with(' ') || line.trim().is_empty() {
        LineKind::Body
    } else {
        LineKind::Ignored
    }
}

/// Path after the last ` b/` of a section header, or empty.
fn header_path(line: &str) -> &str {
    let line = line.trim_end_matches('\r');
    line.rfind(" b/").map(|idx| &line[idx + 3..]).unwrap_or("")
}

struct FileAccumulator<'a> {
    file: &'a str,
    additions: usize,
    deletions: usize,
    lines: Vec<&'a str>,
}

impl<'a> FileAccumulator<'a> {
    fn new(file: &'a str) -> Self {
        Self {
            file,
            additions: 0,
            deletions: 0,
            lines: Vec::new(),
        }
    }

    fn finish(self) -> DiffFile {
        DiffFile {
            file: self.file.to_string(),
            additions: self.additions,
            deletions: self.deletions,
            changes: self.lines.join("\n"),
        }
    }
}

enum DiffState<'a> {
    Idle,
    InFile(FileAccumulator<'a>),
}

/// Advances the parser by one line, returning a file when its section closes.
fn step<'a>(state: DiffState<'a>, line: &'a str) -> (DiffState<'a>, Option<DiffFile>) {
    match (classify(line), state) {
        (LineKind::FileHeader(path), DiffState::InFile(done)) => (
            DiffState::InFile(FileAccumulator::new(path)),
            Some(done.finish()),
        ),
        (LineKind::FileHeader(path), DiffState::Idle) => {
            (DiffState::InFile(FileAccumulator::new(path)), None)
        }
        (LineKind::Ignored, state) | (_, state @ DiffState::Idle) => (state, None),
        (kind, DiffState::InFile(mut acc)) => {
            match kind {
                LineKind::Addition => acc.additions += 1,
                LineKind::Deletion => acc.deletions += 1,
                _ => {}
            }
            acc.lines.push(line);
            (DiffState::InFile(acc), None)
        }
    }
}

/// Splits a unified diff into per-file records, in input order.
///
/// Never fails: unrecognized lines are skipped and a header without a `b/`
/// path yields a record with an empty `file`.
pub fn parse_diff(text: &str) -> Vec<DiffFile> {
    let mut files = Vec::new();
    let mut state = DiffState::Idle;

    // Split on `\n` only so a CRLF file's `\r` stays in its change body.
    let body = text.strip_suffix('\n').unwrap_or(text);
    for line in body.split('\n') {
        let (next, finished) = step(state, line);
        files.extend(finished);
        state = next;
    }

    if let DiffState::InFile(acc) = state {
        files.push(acc.finish());
    }

    files
}
