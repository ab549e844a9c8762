use std::process::Command;

fn git_describe() -> Option<String> {
    Command::new("git")
        .args(["describe", "--tags", "--always", "--dirty"])
        .output()
        .ok()
        .filter(|o| o.status.success())
        .and_then(|o| String::from_utf8(o.stdout).ok())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn main() {
    // Rebuild when git state changes
    println!("cargo:rerun-if-changed=./.git/HEAD");
    println!("cargo:rerun-if-changed=./.git/refs");

    let pkg_version = std::env::var("CARGO_PKG_VERSION").unwrap_or_else(|_| "0.0.0".into());
    let full_version = match git_describe() {
        Some(describe) => format!("{pkg_version} ({describe})"),
        None => pkg_version,
    };

    println!("cargo:rustc-env=APP_VERSION={full_version}");
}
