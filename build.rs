use std::process::Command;

fn git(args: &[&str]) -> Option<String> {
    let output = Command::new("git").args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    String::from_utf8(output.stdout)
        .ok()
        .map(|s| s.trim().to_string())
}

fn main() {
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/index");

    let version = env!("CARGO_PKG_VERSION");

    // Tagged, clean checkouts get the bare version; anything else gets
    // "<version>@<short hash> <commit date>".
    let full = match git(&["rev-parse", "--short", "HEAD"]).filter(|h| !h.is_empty()) {
        None => version.to_string(),
        Some(hash) => {
            let clean = git(&["status", "--porcelain"]).is_some_and(|s| s.is_empty());
            let tagged = git(&["tag", "--points-at", "HEAD"]).is_some_and(|tags| {
                tags.lines()
                    .any(|tag| tag == version || tag.strip_prefix('v') == Some(version))
            });
            if clean && tagged {
                version.to_string()
            } else {
                let date = git(&["log", "-1", "--format=%cd", "--date=format:%Y-%m-%d %H:%M"])
                    .unwrap_or_default();
                format!("{}@{} {}", version, hash, date).trim_end().to_string()
            }
        }
    };

    println!("cargo:rustc-env=ROSTER_VERSION={}", full);
}
