//! Text rendering of command results

use crate::artifacts::diff::file_diff::FileDiff;
use crate::artifacts::log::commit_view::{CommitDetails, CommitSummary};
use crate::artifacts::status::file_change::labelled;
use crate::artifacts::status::status_info::StatusInfo;
use chrono::{DateTime, FixedOffset};
use colored::Colorize;
use std::fmt::Write;

const STATUS_INDENT: &str = "        ";

fn readable(timestamp: &DateTime<FixedOffset>) -> String {
    timestamp.format("%a %b %-d %H:%M:%S %Y %z").to_string()
}

fn message_block(output: &mut String, message: &str) {
    for line in message.lines() {
        let _ = writeln!(output, "    {line}");
    }
}

pub fn commit_created(summary: &CommitSummary) -> String {
    let root = if summary.parent.is_none() {
        "(root-commit) "
    } else {
        ""
    };
    let files = if summary.file_count == 1 { "file" } else { "files" };

    format!(
        "[{root}{}] {}\n {} {files} committed\n",
        summary.short_id,
        summary.title(),
        summary.file_count
    )
}

pub fn status(status: &StatusInfo) -> String {
    let mut output = String::new();

    match &status.head {
        Some(head) => {
            let _ = writeln!(output, "On commit {}", head.to_short_oid());
        }
        None => {
            let _ = writeln!(output, "No commits yet");
        }
    }

    let staged = status
        .index_changes()
        .map(|(path, change)| labelled(change.into(), path).green().to_string())
        .collect::<Vec<_>>();
    let unstaged = status
        .workspace_changes()
        .into_iter()
        .map(|(path, change)| labelled((&change).into(), path).red().to_string())
        .collect::<Vec<_>>();
    let untracked = status
        .untracked
        .iter()
        .map(|path| path.red().to_string())
        .collect::<Vec<_>>();

    for (title, lines) in [
        ("Changes to be committed:", staged),
        ("Changes not staged for commit:", unstaged),
        ("Untracked files:", untracked),
    ] {
        if lines.is_empty() {
            continue;
        }
        let _ = writeln!(output, "\n{title}");
        for line in lines {
            let _ = writeln!(output, "{STATUS_INDENT}{line}");
        }
    }

    output.push('\n');
    if status.clean {
        let _ = writeln!(output, "nothing to commit, working tree clean");
    } else if status.staged.is_empty() {
        let _ = writeln!(output, "no changes added to commit (use \"minigit add\")");
    }

    output
}

pub fn log_medium(commits: &[CommitSummary]) -> String {
    let mut output = String::new();

    for (position, commit) in commits.iter().enumerate() {
        if position > 0 {
            output.push('\n');
        }
        let _ = writeln!(output, "{}", format!("commit {}", commit.id).yellow());
        let _ = writeln!(output, "Date:   {}", readable(&commit.timestamp));
        let _ = writeln!(output, "Files:  {}", commit.file_count);
        output.push('\n');
        message_block(&mut output, &commit.message);
    }

    output
}

pub fn log_oneline(commits: &[CommitSummary]) -> String {
    commits
        .iter()
        .map(|commit| format!("{} {}\n", commit.short_id.yellow(), commit.title()))
        .collect()
}

pub fn show(details: &CommitDetails) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "{}", format!("commit {}", details.id).yellow());
    if let Some(parent) = &details.parent {
        let _ = writeln!(output, "Parent: {parent}");
    }
    let _ = writeln!(output, "Date:   {}", readable(&details.timestamp));
    output.push('\n');
    message_block(&mut output, &details.message);
    output.push('\n');

    for entry in &details.files {
        let _ = writeln!(output, "{} {}", entry.blob.to_short_oid(), entry.path);
    }

    output
}

pub fn diff(file_diff: &FileDiff) -> String {
    file_diff.render_with(
        |line| {
            if line.starts_with("@@") {
                line.cyan().to_string()
            } else {
                line.bold().to_string()
            }
        },
        |line| match line.chars().next() {
            Some('+') => line.green().to_string(),
            Some('-') => line.red().to_string(),
            _ => line.to_string(),
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::objects::commit::{Commit, Manifest};
    use crate::artifacts::objects::object::Object;
    use crate::artifacts::objects::object_id::ObjectId;
    use pretty_assertions::assert_eq;

    fn plain() {
        colored::control::set_override(false);
    }

    fn summary(parent: Option<ObjectId>, message: &str, files: usize) -> CommitSummary {
        let manifest = (0..files)
            .map(|n| (format!("f{n}.txt"), ObjectId::from_hash([n as u8; 32])))
            .collect::<Manifest>();
        let commit = Commit::new(
            parent,
            manifest,
            message.to_string(),
            DateTime::parse_from_rfc3339("2023-01-01T12:00:00+00:00").unwrap(),
        );

        CommitSummary::new(commit.object_id().unwrap(), &commit)
    }

    #[test]
    fn root_commit_is_marked() {
        let first = summary(None, "first\n\nbody", 2);
        let second = summary(Some(first.id.clone()), "second", 1);

        assert_eq!(
            commit_created(&first),
            format!("[(root-commit) {}] first\n 2 files committed\n", first.short_id)
        );
        assert_eq!(
            commit_created(&second),
            format!("[{}] second\n 1 file committed\n", second.short_id)
        );
    }

    #[test]
    fn medium_log_indents_messages() {
        plain();
        let commit = summary(None, "subject\nbody", 1);

        let expected = format!(
            "commit {}\nDate:   Sun Jan 1 12:00:00 2023 +0000\nFiles:  1\n\n    subject\n    body\n",
            commit.id
        );
        assert_eq!(log_medium(&[commit]), expected);
    }

    #[test]
    fn oneline_log_uses_short_ids_and_titles() {
        plain();
        let older = summary(None, "m1", 1);
        let newer = summary(Some(older.id.clone()), "m2\nmore", 1);

        assert_eq!(
            log_oneline(&[newer.clone(), older.clone()]),
            format!("{} m2\n{} m1\n", newer.short_id, older.short_id)
        );
    }

    #[test]
    fn diff_rendering_without_color_matches_unified_form() {
        plain();
        let file_diff = FileDiff::compute("a.txt", b"a\nb\n", b"a\nc\n");

        assert_eq!(diff(&file_diff), file_diff.unified());
    }
}
