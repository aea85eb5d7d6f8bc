//! Comparison of two versions of one file
//!
//! The old version is the content recorded by head (empty when head does not
//! track the file) and the new one is the working-directory content. Text is
//! compared line by line; anything that is not UTF-8 is reported as binary.

use crate::artifacts::diff::diff_algorithm::{DiffAlgorithm, Edit, MyersDiff};
use crate::artifacts::diff::hunk::Hunk;
use serde::Serialize;
use std::fmt::Write;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileDiff {
    path: String,
    binary: bool,
    #[serde(skip)]
    hunks: Vec<Hunk<String>>,
    /// Unified rendering, empty when both versions are identical
    diff: String,
    additions: usize,
    deletions: usize,
}

impl FileDiff {
    pub fn compute(path: &str, old: &[u8], new: &[u8]) -> Self {
        let mut file_diff = FileDiff {
            path: path.to_string(),
            binary: false,
            hunks: vec![],
            diff: String::new(),
            additions: 0,
            deletions: 0,
        };

        if old == new {
            return file_diff;
        }

        let (Ok(old), Ok(new)) = (std::str::from_utf8(old), std::str::from_utf8(new)) else {
            file_diff.binary = true;
            file_diff.diff = format!("Binary files a/{path} and b/{path} differ\n");
            return file_diff;
        };

        let old_lines = split_lines(old);
        let new_lines = split_lines(new);
        file_diff.hunks = MyersDiff::new(&old_lines, &new_lines).hunks();

        for edit in file_diff.hunks.iter().flat_map(|hunk| hunk.edits()) {
            match edit {
                Edit::Insert { .. } => file_diff.additions += 1,
                Edit::Delete { .. } => file_diff.deletions += 1,
                Edit::Equal { .. } => {}
            }
        }

        // only a trailing newline changed, which line splitting cannot see
        if file_diff.hunks.is_empty() {
            return file_diff;
        }

        file_diff.diff = file_diff.render_with(|line| line.to_string(), |line| line.to_string());
        file_diff
    }

    /// Render the diff, passing file headers and hunk headers through
    /// `style_header` and edit lines through `style_edit`
    pub fn render_with(
        &self,
        style_header: impl Fn(&str) -> String,
        style_edit: impl Fn(&str) -> String,
    ) -> String {
        if self.binary {
            return self.diff.clone();
        }
        if self.hunks.is_empty() {
            return String::new();
        }

        let mut output = String::new();
        let _ = writeln!(output, "{}", style_header(&format!("--- a/{}", self.path)));
        let _ = writeln!(output, "{}", style_header(&format!("+++ b/{}", self.path)));

        for hunk in &self.hunks {
            let _ = writeln!(output, "{}", style_header(&hunk.header()));
            for edit in hunk.edits() {
                let _ = writeln!(output, "{}", style_edit(&edit.as_string()));
            }
        }

        output
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn is_binary(&self) -> bool {
        self.binary
    }

    pub fn is_empty(&self) -> bool {
        self.diff.is_empty()
    }

    pub fn hunks(&self) -> &[Hunk<String>] {
        &self.hunks
    }

    /// Unified rendering without styling
    pub fn unified(&self) -> &str {
        &self.diff
    }

    pub fn additions(&self) -> usize {
        self.additions
    }

    pub fn deletions(&self) -> usize {
        self.deletions
    }
}

/// Split on `\n` only, so a `\r` stays part of its line
fn split_lines(text: &str) -> Vec<String> {
    let text = text.strip_suffix('\n').unwrap_or(text);
    if text.is_empty() {
        return Vec::new();
    }

    text.split('\n').map(String::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn identical_content_has_an_empty_diff() {
        let diff = FileDiff::compute("a.txt", b"same\n", b"same\n");

        assert!(diff.is_empty());
        assert!(!diff.is_binary());
        assert_eq!(diff.additions(), 0);
    }

    #[test]
    fn one_line_change() {
        let diff = FileDiff::compute("a.txt", b"hello", b"hello!");

        assert_eq!(
            diff.unified(),
            "--- a/a.txt\n+++ b/a.txt\n@@ -1,1 +1,1 @@\n-hello\n+hello!\n"
        );
        assert_eq!((diff.additions(), diff.deletions()), (1, 1));
    }

    #[test]
    fn new_file_diffs_against_nothing() {
        let diff = FileDiff::compute("new.txt", b"", b"one\ntwo\n");

        assert_eq!(
            diff.unified(),
            "--- a/new.txt\n+++ b/new.txt\n@@ -0,0 +1,2 @@\n+one\n+two\n"
        );
    }

    #[test]
    fn line_ending_changes_show_up() {
        let diff = FileDiff::compute("a.txt", b"one\ntwo\n", b"one\r\ntwo\r\n");

        assert!(!diff.is_empty());
        assert_eq!((diff.additions(), diff.deletions()), (2, 2));
    }

    #[test]
    fn trailing_newline_alone_is_not_a_change() {
        let diff = FileDiff::compute("a.txt", b"one\ntwo", b"one\ntwo\n");

        assert!(diff.is_empty());
    }

    #[test]
    fn non_utf8_content_is_binary() {
        let diff = FileDiff::compute("img.bin", b"text", &[0xff, 0xfe, 0x00]);

        assert!(diff.is_binary());
        assert!(diff.hunks().is_empty());
        assert_eq!(diff.unified(), "Binary files a/img.bin and b/img.bin differ\n");
    }

    #[test]
    fn serializes_rendered_form() -> anyhow::Result<()> {
        let diff = FileDiff::compute("a.txt", b"a\n", b"b\n");

        let json = serde_json::to_value(&diff)?;
        assert_eq!(json["path"], "a.txt");
        assert_eq!(json["binary"], false);
        assert_eq!(json["additions"], 1);
        assert_eq!(json["deletions"], 1);
        assert!(json["diff"].as_str().unwrap_or_default().contains("+b"));
        assert!(json.get("hunks").is_none());

        Ok(())
    }
}
