#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use serde_json::{Value, json};
use url::Url;

/// Convert a snapshot directory to the `file://` URL the CLI expects.
pub fn snapshot_url(path: &Path) -> String {
    Url::from_directory_path(path)
        .expect("Failed to convert path to file URL")
        .to_string()
}

/// Run the CLI with a custom HOME directory for isolated config storage.
pub fn run_cli_with_home(args: &[&str], home: &Path) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_talawa"));
    cmd.args(args);
    cmd.env("HOME", home);
    cmd.env("XDG_DATA_HOME", home.join("data"));
    cmd.env_remove("TALAWA_API_URL");
    cmd.env_remove("TALAWA_TOKEN");
    cmd.env_remove("RUST_LOG");
    cmd.output().expect("Failed to execute CLI")
}

/// Run the CLI with a custom HOME and expect success.
pub fn run_cli_with_home_success(args: &[&str], home: &Path) -> (String, String) {
    let output = run_cli_with_home(args, home);
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    if !output.status.success() {
        panic!("CLI command failed: {:?}\nstderr: {}", args, stderr);
    }
    (String::from_utf8_lossy(&output.stdout).to_string(), stderr)
}

/// Parse stdout as one JSON value per line.
pub fn json_lines(stdout: &str) -> Vec<Value> {
    stdout
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| serde_json::from_str(line).expect("stdout line is not JSON"))
        .collect()
}

/// Ids of the JSON items printed to stdout.
pub fn ids(stdout: &str) -> Vec<String> {
    json_lines(stdout)
        .into_iter()
        .map(|v| v["id"].as_str().expect("item has no id").to_string())
        .collect()
}

/// A snapshot directory with a home directory beside it.
pub struct Fixture {
    pub root: PathBuf,
    pub home: PathBuf,
    pub url: String,
}

impl Fixture {
    pub fn new(dir: &Path) -> Self {
        let root = dir.join("snapshot");
        let home = dir.join("home");
        std::fs::create_dir_all(&root).unwrap();
        std::fs::create_dir_all(&home).unwrap();
        let url = snapshot_url(&root);
        Self { root, home, url }
    }

    /// Write a connection file, e.g. `write("comments", "post-1", ...)`.
    pub fn write(&self, kind: &str, parent: &str, items: &[Value]) {
        let dir = self.root.join(kind);
        std::fs::create_dir_all(&dir).unwrap();
        let json = serde_json::to_string_pretty(items).unwrap();
        std::fs::write(dir.join(format!("{}.json", parent)), json).unwrap();
    }
}

pub fn post(id: &str) -> Value {
    json!({
        "id": id,
        "caption": format!("caption of {}", id),
        "creator": { "id": "user-1", "name": "Ada" },
        "createdAt": "2024-05-01T12:00:00Z",
        "upVotesCount": 1,
        "commentsCount": 0
    })
}

pub fn comment(id: &str) -> Value {
    json!({
        "id": id,
        "body": format!("body of {}", id),
        "creator": { "id": "user-2", "name": "Grace" },
        "createdAt": "2024-05-01T13:00:00Z",
        "upVotesCount": 0
    })
}

pub fn voter(id: &str) -> Value {
    json!({ "id": id, "name": id.to_uppercase() })
}
