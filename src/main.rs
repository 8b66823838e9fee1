/// quill - editor-side Git assistant
///
/// Invocable as `quill` or, through a symlink, as `git-quill` so the
/// same subcommands are reachable via `git quill ...`. The first
/// argument selects the command.
use anyhow::Result;
use std::path::Path;

use quill::commands;

fn main() -> Result<()> {
    let program_path = std::env::args()
        .next()
        .unwrap_or_else(|| "quill".to_string());
    let program_name = Path::new(&program_path)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("quill");

    let args: Vec<String> = std::env::args().collect();
    match args.get(1).map(String::as_str) {
        Some("rev-parse") => commands::rev_parse::run(),
        Some("open-file") => commands::open_file::run(),
        Some("complete") => commands::complete::run(),
        Some("rebase") => commands::rebase::run(),
        Some("completions") => commands::completions::run(),
        Some("--version" | "-V") => {
            println!("{program_name} {}", quill::VERSION_DISPLAY);
            Ok(())
        }
        Some("--help" | "-h") | None => {
            print_usage(program_name);
            Ok(())
        }
        Some(other) => {
            eprintln!("Unknown command: {other}");
            eprintln!("Run '{program_name} --help' for usage.");
            std::process::exit(1);
        }
    }
}

fn print_usage(program_name: &str) {
    println!("{program_name} {}", quill::VERSION_DISPLAY);
    println!();
    println!("Editor-side Git assistant: config-key completions, worktree");
    println!("resolution, and rebase-todo rewriting.");
    println!();
    println!("Usage: {program_name} <COMMAND> [OPTIONS]");
    println!();
    println!("Commands:");
    println!("  rev-parse    Resolve the Git repository layout around a path");
    println!("  open-file    Open a file addressed relative to the resolved repository");
    println!("  complete     List config completions at cursor positions in a file");
    println!("  rebase       Rewrite the action keyword of selected rebase-todo lines");
    println!("  completions  Generate shell completion scripts");
    println!();
    println!("See '{program_name} <COMMAND> --help' for command details.");
}
