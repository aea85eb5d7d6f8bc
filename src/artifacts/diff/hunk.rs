//! Unified-diff hunks
//!
//! A hunk is a run of edits containing at least one change, padded with up to
//! `context` unchanged lines on each side. Changes separated by at most
//! `2 * context` unchanged lines share a hunk.

use crate::artifacts::diff::diff_algorithm::Edit;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hunk<T> {
    a_start: usize,
    a_size: usize,
    b_start: usize,
    b_size: usize,
    edits: Vec<Edit<T>>,
}

impl<T: Clone> Hunk<T> {
    /// Group an edit script into hunks
    pub fn build(edits: Vec<Edit<T>>, context: usize) -> Vec<Hunk<T>> {
        // lines of each side consumed before edit i
        let mut a_before = Vec::with_capacity(edits.len());
        let mut b_before = Vec::with_capacity(edits.len());
        let (mut a_line, mut b_line) = (0, 0);
        for edit in &edits {
            a_before.push(a_line);
            b_before.push(b_line);
            a_line += edit.touches_a() as usize;
            b_line += edit.touches_b() as usize;
        }

        let next_change = |from: usize| (from..edits.len()).find(|&i| edits[i].is_change());

        let mut hunks = Vec::new();
        let mut search_from = 0;

        while let Some(first) = next_change(search_from) {
            let mut last = first;
            while let Some(next) = next_change(last + 1) {
                if next - last - 1 > 2 * context {
                    break;
                }
                last = next;
            }

            let start = first.saturating_sub(context);
            let end = (last + context).min(edits.len() - 1);
            let hunk_edits = edits[start..=end].to_vec();

            let a_size = hunk_edits.iter().filter(|edit| edit.touches_a()).count();
            let b_size = hunk_edits.iter().filter(|edit| edit.touches_b()).count();

            hunks.push(Hunk {
                // an empty side is reported at the line before the hunk
                a_start: a_before[start] + (a_size > 0) as usize,
                a_size,
                b_start: b_before[start] + (b_size > 0) as usize,
                b_size,
                edits: hunk_edits,
            });

            search_from = last + 1;
        }

        hunks
    }
}

impl<T> Hunk<T> {
    pub fn a_start(&self) -> usize {
        self.a_start
    }

    pub fn a_size(&self) -> usize {
        self.a_size
    }

    pub fn b_start(&self) -> usize {
        self.b_start
    }

    pub fn b_size(&self) -> usize {
        self.b_size
    }

    pub fn edits(&self) -> &[Edit<T>] {
        &self.edits
    }

    /// `@@ -a,b +c,d @@`
    pub fn header(&self) -> String {
        format!(
            "@@ -{},{} +{},{} @@",
            self.a_start, self.a_size, self.b_start, self.b_size
        )
    }
}
