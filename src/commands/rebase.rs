/// Rewriting rebase-todo action keywords in a file
///
/// Replaces the first word of selected lines with one of the seven
/// interactive-rebase keywords and writes the file back in place.
/// Selections are given as 1-based line numbers or byte offsets.
use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::path::PathBuf;

use crate::{
    document::{Document, Span, TextDocument},
    host::{CliHost, Host},
    log_warning,
    logging::init_logging,
    rebase::{self, RebaseCommand},
};

#[derive(Parser)]
#[command(name = "quill rebase")]
#[command(version)]
#[command(about = "Rewrite the action keyword of selected rebase-todo lines")]
#[command(long_about = r#"
Sets the leading word of each selected line to COMMAND, which must be
one of: drop, edit, exec, fixup, pick, reword, squash. Anything else is
rejected and the file is left untouched.
"#)]
pub struct Args {
    #[arg(
        value_name = "COMMAND",
        help = "One of: drop, edit, exec, fixup, pick, reword, squash"
    )]
    pub command: String,

    #[arg(value_name = "FILE", help = "Rebase todo file to rewrite in place")]
    pub file: PathBuf,

    #[arg(
        long = "line",
        value_name = "N",
        help = "1-based line number to rewrite; repeat for several lines"
    )]
    pub lines: Vec<usize>,

    #[arg(
        long = "at",
        value_name = "OFFSET",
        help = "Byte offset of a selection start; repeat for several selections"
    )]
    pub at: Vec<usize>,

    #[arg(long, help = "Print the rewritten document instead of saving it")]
    pub dry_run: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

pub fn run() -> Result<()> {
    let mut argv: Vec<String> = std::env::args().collect();
    if argv.len() >= 2 && argv[1] == "rebase" {
        argv.remove(1);
    }
    let args = Args::parse_from(&argv);

    init_logging(args.verbose);

    // Validate before touching the file; an unknown keyword must leave
    // it byte-for-byte intact.
    let Some(command) = RebaseCommand::parse(&args.command) else {
        CliHost::new().error_message(&format!("Invalid command: {}", args.command));
        std::process::exit(1);
    };

    rewrite_file(&args, command)
}

fn rewrite_file(args: &Args, command: RebaseCommand) -> Result<()> {
    if args.lines.is_empty() && args.at.is_empty() {
        anyhow::bail!("no selections given; use --line or --at at least once");
    }

    let text = fs::read_to_string(&args.file)
        .with_context(|| format!("Failed to read todo file: {}", args.file.display()))?;
    let mut doc = TextDocument::new(text);

    let mut selections: Vec<Span> = args.at.iter().map(|&offset| Span::cursor(offset)).collect();
    for &line in &args.lines {
        match line_start(doc.text(), line) {
            Some(offset) => selections.push(Span::cursor(offset)),
            None => log_warning!("line {} is past the end of the file, skipping", line),
        }
    }

    rebase::apply(&mut doc, &selections, command);

    if args.dry_run {
        print!("{}", doc.text());
    } else {
        fs::write(&args.file, doc.text())
            .with_context(|| format!("Failed to write todo file: {}", args.file.display()))?;
    }
    Ok(())
}

/// Byte offset where 1-based `line` starts, or `None` past the last line.
fn line_start(text: &str, line: usize) -> Option<usize> {
    if line == 0 {
        return None;
    }
    let mut start = 0;
    for _ in 1..line {
        let rest = &text[start..];
        start += rest.find('\n')? + 1;
    }
    if start >= text.len() && !text.is_empty() {
        return None;
    }
    Some(start)
}
