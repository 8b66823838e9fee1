//! xtask - Development automation tasks for quill
//!
//! Development-time generators for man pages and CLI reference docs,
//! kept out of the distributed binary.

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_mangen::Man;
use std::fs;
use std::path::{Path, PathBuf};

/// Commands that ship a man page and a CLI reference page.
const COMMANDS: &[&str] = &[
    "quill-rev-parse",
    "quill-open-file",
    "quill-complete",
    "quill-rebase",
];

/// The clap definition behind a documented command name.
fn command_for(name: &str) -> Option<clap::Command> {
    match name {
        "quill-rev-parse" => Some(quill::commands::rev_parse::Args::command()),
        "quill-open-file" => Some(quill::commands::open_file::Args::command()),
        "quill-complete" => Some(quill::commands::complete::Args::command()),
        "quill-rebase" => Some(quill::commands::rebase::Args::command()),
        _ => None,
    }
}

/// Cross-links for the See Also section of each page.
fn related(name: &str) -> &'static [&'static str] {
    match name {
        "quill-rev-parse" => &["quill-open-file"],
        "quill-open-file" => &["quill-rev-parse", "quill-complete"],
        "quill-complete" => &["quill-rebase"],
        "quill-rebase" => &["quill-complete"],
        _ => &[],
    }
}

/// `quill-rev-parse` reads as `quill rev-parse` in page titles.
fn display_name(name: &str) -> String {
    match name.strip_prefix("quill-") {
        Some(suffix) => format!("quill {suffix}"),
        None => name.to_string(),
    }
}

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Development automation tasks for quill")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate man pages for quill commands
    GenMan {
        /// Directory to write man pages into
        #[arg(long, default_value = "man")]
        output_dir: PathBuf,

        /// Specific command to generate (default: all commands)
        #[arg(long)]
        command: Option<String>,
    },

    /// Generate CLI reference markdown docs for quill commands
    GenCliDocs {
        /// Directory to write markdown docs into
        #[arg(long, default_value = "docs/cli")]
        output_dir: PathBuf,

        /// Specific command to generate (default: all commands)
        #[arg(long)]
        command: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::GenMan {
            output_dir,
            command,
        } => generate_man_pages(&output_dir, command.as_deref()),
        Commands::GenCliDocs {
            output_dir,
            command,
        } => generate_cli_docs(&output_dir, command.as_deref()),
    }
}

fn selected(command: Option<&str>) -> Vec<&str> {
    match command {
        Some(name) => vec![name],
        None => COMMANDS.to_vec(),
    }
}

fn generate_man_pages(output_dir: &Path, command: Option<&str>) -> Result<()> {
    fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create {}", output_dir.display()))?;

    for name in selected(command) {
        let cmd = command_for(name).with_context(|| format!("Unknown command: {name}"))?;

        let mut buffer = Vec::new();
        Man::new(cmd).render(&mut buffer)?;

        let path = output_dir.join(format!("{name}.1"));
        fs::write(&path, &buffer)
            .with_context(|| format!("Failed to write man page: {}", path.display()))?;
        eprintln!("Generated: {}", path.display());
    }

    eprintln!("\nWrote man pages to {}", output_dir.display());
    Ok(())
}

fn generate_cli_docs(output_dir: &Path, command: Option<&str>) -> Result<()> {
    fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create {}", output_dir.display()))?;

    for name in selected(command) {
        let cmd = command_for(name).with_context(|| format!("Unknown command: {name}"))?;

        let path = output_dir.join(format!("{name}.md"));
        fs::write(&path, render_markdown(name, &cmd))
            .with_context(|| format!("Failed to write CLI doc: {}", path.display()))?;
        eprintln!("Generated: {}", path.display());
    }

    eprintln!("\nWrote CLI docs to {}", output_dir.display());
    Ok(())
}

/// Arguments worth documenting: everything except clap's built-ins.
fn visible_args(cmd: &clap::Command) -> impl Iterator<Item = &clap::Arg> {
    cmd.get_arguments()
        .filter(|arg| arg.get_id() != "help" && arg.get_id() != "version")
}

fn value_name(arg: &clap::Arg) -> String {
    arg.get_value_names()
        .and_then(|names| names.first())
        .map(|name| name.to_string())
        .unwrap_or_else(|| arg.get_id().as_str().to_uppercase())
}

/// Render a clap Command as a markdown CLI reference page.
fn render_markdown(name: &str, cmd: &clap::Command) -> String {
    let display = display_name(name);
    let about = cmd
        .get_about()
        .map(|text| text.to_string())
        .unwrap_or_default();
    let mut md = String::new();

    md.push_str(&format!(
        "---\ntitle: {name}\ndescription: {about}\n---\n\n"
    ));
    md.push_str(&format!("# {display}\n\n{about}\n\n"));

    if let Some(long_about) = cmd.get_long_about() {
        let text = long_about.to_string();
        let text = text.trim();
        if !text.is_empty() {
            md.push_str("## Description\n\n");
            md.push_str(text);
            md.push_str("\n\n");
        }
    }

    md.push_str(&format!("## Usage\n\n```\n{}\n```\n\n", usage_line(cmd, &display)));

    let positionals: Vec<_> = visible_args(cmd).filter(|arg| arg.is_positional()).collect();
    if !positionals.is_empty() {
        md.push_str("## Arguments\n\n");
        for arg in positionals {
            let help = arg
                .get_help()
                .map(|text| text.to_string())
                .unwrap_or_default();
            md.push_str(&format!("- `<{}>`: {help}\n", value_name(arg)));
        }
        md.push('\n');
    }

    let options: Vec<_> = visible_args(cmd)
        .filter(|arg| !arg.is_positional())
        .collect();
    if !options.is_empty() {
        md.push_str("## Options\n\n");
        for arg in options {
            let mut flag = String::new();
            if let Some(short) = arg.get_short() {
                flag.push_str(&format!("-{short}, "));
            }
            if let Some(long) = arg.get_long() {
                flag.push_str(&format!("--{long}"));
            }
            let takes_value = !matches!(
                arg.get_action(),
                clap::ArgAction::SetTrue | clap::ArgAction::SetFalse | clap::ArgAction::Count
            );
            if takes_value {
                flag.push_str(&format!(" <{}>", value_name(arg)));
            }
            let help = arg
                .get_help()
                .map(|text| text.to_string())
                .unwrap_or_default();
            md.push_str(&format!("- `{flag}`: {help}\n"));
        }
        md.push('\n');
    }

    let links = related(name);
    if !links.is_empty() {
        md.push_str("## See Also\n\n");
        for link in links {
            md.push_str(&format!("- [{link}](./{link}.md)\n"));
        }
        md.push('\n');
    }

    md
}

fn usage_line(cmd: &clap::Command, display: &str) -> String {
    let mut parts = vec![display.to_string()];

    if visible_args(cmd).any(|arg| !arg.is_positional()) {
        parts.push("[OPTIONS]".to_string());
    }
    for arg in visible_args(cmd).filter(|arg| arg.is_positional()) {
        let value = value_name(arg);
        if arg.is_required_set() {
            parts.push(format!("<{value}>"));
        } else {
            parts.push(format!("[{value}]"));
        }
    }

    parts.join(" ")
}
