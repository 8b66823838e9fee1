/// Config-name completion queries over a file
///
/// Reads a git config document, places one or more cursors at byte
/// offsets, and prints the completions quill would offer there. One line
/// per item: label, kind annotation and insertion text, tab-separated.
use anyhow::{Context, Result};
use clap::Parser;
use std::io::Read;
use std::path::PathBuf;

use crate::{
    completions::GitConfigCompletions,
    document::TextDocument,
    log_debug,
    logging::init_logging,
};

#[derive(Parser)]
#[command(name = "quill complete")]
#[command(version)]
#[command(about = "List config completions at cursor positions in a file")]
#[command(long_about = r#"
Prints the completion items the config provider offers at the given
byte offsets. Inside a [section] header the known section names are
offered; in key position the keys of the enclosing section. With more
than one offset nothing is offered, matching the editor behavior for
multiple cursors.
"#)]
pub struct Args {
    #[arg(value_name = "FILE", help = "Git config file to read, or - for stdin")]
    pub file: PathBuf,

    #[arg(
        long = "at",
        value_name = "OFFSET",
        required = true,
        help = "Byte offset of a cursor; repeat for multiple cursors"
    )]
    pub at: Vec<usize>,

    #[arg(long, help = "Print the completion result as JSON")]
    pub json: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

pub fn run() -> Result<()> {
    let mut argv: Vec<String> = std::env::args().collect();
    if argv.len() >= 2 && argv[1] == "complete" {
        argv.remove(1);
    }
    let args = Args::parse_from(&argv);

    init_logging(args.verbose);

    let text = read_document(&args.file)?;
    let doc = TextDocument::new(text);

    let result = GitConfigCompletions::completions(&doc, &args.at);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    match result {
        Some(result) => {
            log_debug!(
                "{} items, inhibit_word_completions={}",
                result.items.len(),
                result.inhibit_word_completions
            );
            for item in result.items {
                println!("{}\t{}\t{}", item.label, item.annotation, item.insert);
            }
        }
        None => log_debug!("no completions for these cursors"),
    }
    Ok(())
}

fn read_document(file: &PathBuf) -> Result<String> {
    if file.as_os_str() == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read document from stdin")?;
        Ok(text)
    } else {
        std::fs::read_to_string(file)
            .with_context(|| format!("Failed to read document: {}", file.display()))
    }
}
