//! Line diff between profile documents
//!
//! `gantry diff` renders the profile as it would look after a sync and
//! compares it line-by-line against the document on disk.

use similar::{ChangeTag, TextDiff};

/// A single line change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffLine {
    pub tag: DiffTag,
    /// Line number in the on-disk document, for deletions and context.
    pub old_line: Option<usize>,
    /// Line number in the rendered document, for insertions and context.
    pub new_line: Option<usize>,
    pub content: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffTag {
    Delete,
    Insert,
    Equal,
}

impl From<ChangeTag> for DiffTag {
    fn from(tag: ChangeTag) -> Self {
        match tag {
            ChangeTag::Delete => DiffTag::Delete,
            ChangeTag::Insert => DiffTag::Insert,
            ChangeTag::Equal => DiffTag::Equal,
        }
    }
}

/// All lines of a document comparison plus change counts.
#[derive(Debug, Clone, Default)]
pub struct DiffResult {
    pub lines: Vec<DiffLine>,
    pub additions: usize,
    pub deletions: usize,
}

impl DiffResult {
    /// True when both documents render identically.
    pub fn is_empty(&self) -> bool {
        self.additions == 0 && self.deletions == 0
    }

    /// Only the insertions and deletions.
    pub fn changed_lines(&self) -> Vec<&DiffLine> {
        self.lines
            .iter()
            .filter(|l| l.tag != DiffTag::Equal)
            .collect()
    }

    /// Short summary, e.g. `+5, -3`.
    pub fn summary(&self) -> String {
        format!("+{}, -{}", self.additions, self.deletions)
    }
}

/// Compute the line diff from the on-disk document to the rendered one.
pub fn diff_documents(on_disk: &str, rendered: &str) -> DiffResult {
    let text_diff = TextDiff::from_lines(on_disk, rendered);

    let mut result = DiffResult::default();
    for change in text_diff.iter_all_changes() {
        let tag = DiffTag::from(change.tag());
        match tag {
            DiffTag::Delete => result.deletions += 1,
            DiffTag::Insert => result.additions += 1,
            DiffTag::Equal => {}
        }

        result.lines.push(DiffLine {
            tag,
            old_line: change.old_index().map(|i| i + 1),
            new_line: change.new_index().map(|i| i + 1),
            content: change.value().to_string(),
        });
    }

    result
}
