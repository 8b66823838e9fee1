/// Repository layout resolution for a path
///
/// The filesystem-only counterpart of `git rev-parse`: prints the
/// worktree root, git directory, common directory and super-worktree of
/// the repository enclosing a path, without running Git.
use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use crate::{log_error, logging::init_logging, revparse::WorktreeLocation, variables};

#[derive(Parser)]
#[command(name = "quill rev-parse")]
#[command(version)]
#[command(about = "Resolve the Git repository layout around a path")]
#[command(long_about = r#"
Walks the filesystem upward from PATH until a directory carrying a .git
entry appears, follows a possible gitdir redirect, and prints the
repository variables. No git binary is invoked.
"#)]
pub struct Args {
    #[arg(
        value_name = "PATH",
        help = "File whose enclosing repository to resolve (default: current directory)"
    )]
    pub path: Option<PathBuf>,

    #[arg(
        long,
        value_name = "NAME",
        help = "Print only the value of one variable (GIT_WORK_TREE, GIT_DIR, GIT_COMMON_DIR, GIT_SUPER_WORK_TREE)"
    )]
    pub var: Option<String>,

    #[arg(long, help = "Print the variables as a JSON object")]
    pub json: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

pub fn run() -> Result<()> {
    let mut argv: Vec<String> = std::env::args().collect();
    if argv.len() >= 2 && argv[1] == "rev-parse" {
        argv.remove(1);
    }
    let args = Args::parse_from(&argv);

    init_logging(args.verbose);

    let path = args.path.clone().unwrap_or_else(|| PathBuf::from("."));
    let Some(location) = WorktreeLocation::resolve(&path) else {
        log_error!(
            "not a git repository (or any parent directory): {}",
            path.display()
        );
        std::process::exit(1);
    };

    print_location(&args, &location)
}

fn print_location(args: &Args, location: &WorktreeLocation) -> Result<()> {
    let vars = variables::variables(location);

    if let Some(name) = &args.var {
        match vars.iter().find(|(key, _)| *key == name.as_str()) {
            Some((_, value)) => println!("{value}"),
            None => anyhow::bail!("unknown variable: {name}"),
        }
        return Ok(());
    }

    if args.json {
        let map: serde_json::Map<String, serde_json::Value> = vars
            .into_iter()
            .map(|(key, value)| (key.to_string(), serde_json::Value::String(value)))
            .collect();
        println!("{}", serde_json::to_string_pretty(&map)?);
    } else {
        for (key, value) in vars {
            println!("{key}={value}");
        }
    }
    Ok(())
}
