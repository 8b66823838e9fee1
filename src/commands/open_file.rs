/// Opening repository files through path templates
///
/// Expands $GIT_* variables in a path template against the repository
/// resolved for a file, then hands the result to the host to open.
/// `quill open-file '$GIT_DIR/config' --path src/main.rs` opens the
/// config of whatever repository contains src/main.rs, including linked
/// worktrees and submodules.
use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use crate::{
    host::{CliHost, Host, OpenRequest},
    logging::init_logging,
    revparse::WorktreeLocation,
    variables,
};

#[derive(Parser)]
#[command(name = "quill open-file")]
#[command(version)]
#[command(about = "Open a file addressed relative to the resolved repository")]
#[command(long_about = r#"
Resolves the repository around --path, expands the $GIT_WORK_TREE,
$GIT_DIR, $GIT_COMMON_DIR and $GIT_SUPER_WORK_TREE variables in the
template, and opens the resulting file in the host.
"#)]
pub struct Args {
    #[arg(
        value_name = "TEMPLATE",
        help = "Path template with repository variables, e.g. \"$GIT_DIR/config\""
    )]
    pub template: String,

    #[arg(
        long,
        value_name = "FILE",
        help = "File whose enclosing repository anchors the variables"
    )]
    pub path: PathBuf,

    #[arg(
        long,
        value_name = "ID",
        help = "Syntax identifier to assign to the opened view"
    )]
    pub syntax: Option<String>,

    #[arg(long, help = "Open as a transient preview view")]
    pub transient: bool,

    #[arg(long, help = "Print the open request as JSON instead of opening")]
    pub json: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

pub fn run() -> Result<()> {
    let mut argv: Vec<String> = std::env::args().collect();
    if argv.len() >= 2 && argv[1] == "open-file" {
        argv.remove(1);
    }
    let args = Args::parse_from(&argv);

    init_logging(args.verbose);

    let mut host = CliHost::new();
    run_with_host(args, &mut host)
}

/// Command body, separated from argument parsing so tests can drive it
/// with a capturing host.
pub fn run_with_host(args: Args, host: &mut dyn Host) -> Result<()> {
    let Some(location) = WorktreeLocation::resolve(&args.path) else {
        anyhow::bail!(
            "not a git repository (or any parent directory): {}",
            args.path.display()
        );
    };

    let expanded = variables::expand(&args.template, &location);
    let mut request = OpenRequest::new(PathBuf::from(expanded)).transient(args.transient);
    if let Some(syntax) = args.syntax {
        request = request.with_syntax(syntax);
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&request)?);
    } else {
        host.open_file(request);
    }
    Ok(())
}
