use std::process::Command;

fn main() {
    let version = std::env::var("CARGO_PKG_VERSION").unwrap();

    // QUILL_VERSION backs the library's version constant.
    println!("cargo:rustc-env=QUILL_VERSION={version}");

    // QUILL_VERSION_DISPLAY adds branch/commit context for dev builds.
    let display = match dev_suffix() {
        Some(suffix) if std::env::var("QUILL_BUILD_RELEASE").is_err() => {
            format!("{version} ({suffix})")
        }
        _ => version,
    };
    println!("cargo:rustc-env=QUILL_VERSION_DISPLAY={display}");

    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-env-changed=QUILL_BUILD_RELEASE");
}

fn dev_suffix() -> Option<String> {
    let hash = git(&["rev-parse", "--short", "HEAD"])?;
    Some(match git(&["rev-parse", "--abbrev-ref", "HEAD"]) {
        Some(branch) => format!("dev {branch} {hash}"),
        None => format!("dev {hash}"),
    })
}

fn git(args: &[&str]) -> Option<String> {
    let output = Command::new("git").args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    let text = String::from_utf8(output.stdout).ok()?;
    Some(text.trim().to_string())
}
