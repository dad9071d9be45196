//! Stamps the myco-api binary with the identity it logs at startup
//!
//! `main` prints `GIT_HASH`, `BUILD_TIMESTAMP` and `BUILD_PROFILE` next to
//! the package version so a running catalog service can be traced back to
//! the commit that produced it.

use std::process::Command;

const UNKNOWN: &str = "unknown";

fn main() {
    let build_timestamp = chrono::Local::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, false);
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| UNKNOWN.to_string());

    println!("cargo:rustc-env=GIT_HASH={}", git_short_hash());
    println!("cargo:rustc-env=BUILD_TIMESTAMP={}", build_timestamp);
    println!("cargo:rustc-env=BUILD_PROFILE={}", profile);
}

/// Eight-character commit hash; builds from a source tarball have none
fn git_short_hash() -> String {
    let Ok(output) = Command::new("git").args(["rev-parse", "--short=8", "HEAD"]).output() else {
        return UNKNOWN.to_string();
    };
    if !output.status.success() {
        return UNKNOWN.to_string();
    }
    String::from_utf8(output.stdout)
        .map(|hash| hash.trim().to_string())
        .unwrap_or_else(|_| UNKNOWN.to_string())
}
