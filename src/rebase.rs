//! Rewriting action keywords in rebase-todo lines.

use std::fmt;

use crate::document::{Document, Span};

/// The seven actions an interactive-rebase todo line can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RebaseCommand {
    Drop,
    Edit,
    Exec,
    Fixup,
    Pick,
    Reword,
    Squash,
}

impl RebaseCommand {
    pub const ALL: [RebaseCommand; 7] = [
        RebaseCommand::Drop,
        RebaseCommand::Edit,
        RebaseCommand::Exec,
        RebaseCommand::Fixup,
        RebaseCommand::Pick,
        RebaseCommand::Reword,
        RebaseCommand::Squash,
    ];

    /// Parse a rebase command from a string. Keywords are matched
    /// exactly as `git rebase -i` spells them.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "drop" => Some(RebaseCommand::Drop),
            "edit" => Some(RebaseCommand::Edit),
            "exec" => Some(RebaseCommand::Exec),
            "fixup" => Some(RebaseCommand::Fixup),
            "pick" => Some(RebaseCommand::Pick),
            "reword" => Some(RebaseCommand::Reword),
            "squash" => Some(RebaseCommand::Squash),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RebaseCommand::Drop => "drop",
            RebaseCommand::Edit => "edit",
            RebaseCommand::Exec => "exec",
            RebaseCommand::Fixup => "fixup",
            RebaseCommand::Pick => "pick",
            RebaseCommand::Reword => "reword",
            RebaseCommand::Squash => "squash",
        }
    }
}

impl fmt::Display for RebaseCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Replace the first word of every selected line with `command`.
///
/// Each selection contributes the line containing its start; a selection
/// spanning several lines only affects its first. Lines are rewritten
/// from the bottom of the document upward so earlier line starts stay
/// valid while later text shifts. Line terminators are never touched,
/// and rewriting a line twice is idempotent.
pub fn apply(doc: &mut dyn Document, selections: &[Span], command: RebaseCommand) {
    let mut line_starts: Vec<usize> = selections
        .iter()
        .map(|sel| doc.line_span(sel.start).start)
        .collect();
    line_starts.sort_unstable_by(|a, b| b.cmp(a));
    line_starts.dedup();
    for start in line_starts {
        rewrite_line(doc, start, command);
    }
}

fn rewrite_line(doc: &mut dyn Document, line_start: usize, command: RebaseCommand) {
    let line = doc.line_span(line_start);
    let content = doc.slice(line);
    let indent = content.len() - content.trim_start_matches([' ', '\t']).len();
    let word = doc.word_span(line.start + indent);
    doc.replace(word, command.as_str());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::TextDocument;

    #[test]
    fn test_parse_accepts_the_seven_keywords() {
        for command in RebaseCommand::ALL {
            assert_eq!(RebaseCommand::parse(command.as_str()), Some(command));
        }
    }

    #[test]
    fn test_parse_rejects_everything_else() {
        assert_eq!(RebaseCommand::parse("bogus"), None);
        assert_eq!(RebaseCommand::parse("Pick"), None);
        assert_eq!(RebaseCommand::parse("pick "), None);
        assert_eq!(RebaseCommand::parse(""), None);
    }

    #[test]
    fn test_apply_replaces_first_word() {
        let mut doc = TextDocument::new("pick 1a2b3c first commit\n");
        apply(&mut doc, &[Span::cursor(9)], RebaseCommand::Squash);
        assert_eq!(doc.text(), "squash 1a2b3c first commit\n");
    }

    #[test]
    fn test_apply_preserves_indentation() {
        let mut doc = TextDocument::new("\t pick 1a2b3c indented\n");
        apply(&mut doc, &[Span::cursor(4)], RebaseCommand::Drop);
        assert_eq!(doc.text(), "\t drop 1a2b3c indented\n");
    }

    #[test]
    fn test_apply_multiple_selections_bottom_up() {
        let mut doc = TextDocument::new("pick aaa one\npick bbb two\npick ccc three\n");
        let selections = [Span::cursor(2), Span::cursor(15), Span::cursor(30)];
        apply(&mut doc, &selections, RebaseCommand::Fixup);
        assert_eq!(doc.text(), "fixup aaa one\nfixup bbb two\nfixup ccc three\n");
    }

    #[test]
    fn test_apply_two_cursors_on_one_line() {
        let mut doc = TextDocument::new("reword 1a2b3c message\n");
        let selections = [Span::cursor(1), Span::cursor(10)];
        apply(&mut doc, &selections, RebaseCommand::Pick);
        assert_eq!(doc.text(), "pick 1a2b3c message\n");
    }

    #[test]
    fn test_apply_multiline_selection_touches_first_line_only() {
        let mut doc = TextDocument::new("pick aaa one\npick bbb two\n");
        apply(&mut doc, &[Span::new(2, 20)], RebaseCommand::Edit);
        assert_eq!(doc.text(), "edit aaa one\npick bbb two\n");
    }

    #[test]
    fn test_apply_keeps_crlf_terminators() {
        let mut doc = TextDocument::new("pick aaa one\r\npick bbb two\r\n");
        apply(
            &mut doc,
            &[Span::cursor(0), Span::cursor(16)],
            RebaseCommand::Squash,
        );
        assert_eq!(doc.text(), "squash aaa one\r\nsquash bbb two\r\n");
    }

    #[test]
    fn test_apply_inserts_on_blank_line() {
        let mut doc = TextDocument::new("\n");
        apply(&mut doc, &[Span::cursor(0)], RebaseCommand::Exec);
        assert_eq!(doc.text(), "exec\n");
    }

    #[test]
    fn test_apply_is_idempotent() {
        let mut doc = TextDocument::new("pick aaa one\n");
        apply(&mut doc, &[Span::cursor(0)], RebaseCommand::Pick);
        apply(&mut doc, &[Span::cursor(0)], RebaseCommand::Pick);
        assert_eq!(doc.text(), "pick aaa one\n");
    }

    #[test]
    fn test_apply_shrinking_keyword_keeps_other_lines() {
        let mut doc = TextDocument::new("squash aaa one\nsquash bbb two\n");
        let selections = [Span::cursor(3), Span::cursor(18)];
        apply(&mut doc, &selections, RebaseCommand::Pick);
        assert_eq!(doc.text(), "pick aaa one\npick bbb two\n");
    }
}
