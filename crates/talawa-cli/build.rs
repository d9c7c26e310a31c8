//! Embeds the git version as `TALAWA_VERSION`.

use std::path::Path;
use std::process::Command;

fn main() {
    let git_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../.git");
    for tracked in ["HEAD", "refs/tags"] {
        println!("cargo:rerun-if-changed={}", git_dir.join(tracked).display());
    }

    let version = git_describe()
        .map(|described| format!("{} ({})", env!("CARGO_PKG_VERSION"), described))
        .unwrap_or_else(|| env!("CARGO_PKG_VERSION").to_string());

    println!("cargo:rustc-env=TALAWA_VERSION={}", version);
}

fn git_describe() -> Option<String> {
    let output = Command::new("git")
        .args(["describe", "--tags", "--always", "--dirty"])
        .current_dir(env!("CARGO_MANIFEST_DIR"))
        .output()
        .ok()?;

    if !output.status.success() {
        return None;
    }

    let described = String::from_utf8(output.stdout).ok()?;
    let described = described.trim();
    (!described.is_empty()).then(|| described.to_string())
}
