/// Shell completion generation for the quill CLI
///
/// Generates completion scripts for bash, zsh and fish covering the
/// quill subcommands and their flags.
use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::{generate, Shell};
use std::io;

#[derive(Parser)]
#[command(name = "quill completions")]
#[command(about = "Generate shell completion scripts for quill")]
pub struct Args {
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// The full quill command tree, assembled from the per-command parsers.
pub fn cli() -> clap::Command {
    clap::Command::new("quill")
        .about("Editor-side Git assistant")
        .subcommand(super::rev_parse::Args::command().name("rev-parse"))
        .subcommand(super::open_file::Args::command().name("open-file"))
        .subcommand(super::complete::Args::command().name("complete"))
        .subcommand(super::rebase::Args::command().name("rebase"))
        .subcommand(Args::command().name("completions"))
}

pub fn run() -> Result<()> {
    let mut argv: Vec<String> = std::env::args().collect();
    if argv.len() >= 2 && argv[1] == "completions" {
        argv.remove(1);
    }
    let args = Args::parse_from(&argv);

    generate(args.shell, &mut cli(), "quill", &mut io::stdout());
    Ok(())
}
