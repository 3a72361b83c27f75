use colored::*;
use std::path::PathBuf;

use crate::git::GitQuery;

/// Best-effort identity of the current checkout. Tries the remote origin
/// URL first, then the repository top-level path, then the working
/// directory. Each failure falls through to the next source; this never
/// fails the invocation.
pub fn repository_identity(git: &dyn GitQuery) -> String {
    if let Ok(url) = git.remote_url() {
        return url;
    }

    if let Ok(toplevel) = git.toplevel() {
        return toplevel.display().to_string();
    }

    eprintln!(
        "{} Failed to identify git repository. Using current directory.",
        "⚠️".yellow()
    );
    working_directory().display().to_string()
}

/// Current branch name, or an empty string when git can't tell us.
/// An empty branch is a valid low-entropy seed component, so callers
/// never need to treat this as an error.
pub fn branch_name(git: &dyn GitQuery) -> String {
    match git.current_branch() {
        Ok(branch) => branch,
        Err(_) => {
            eprintln!(
                "{} Failed to get git branch. Using repository identity only.",
                "⚠️".yellow()
            );
            String::new()
        }
    }
}

/// The hash input: repository identity and branch joined by `-`.
pub fn seed_string(repository: &str, branch: &str) -> String {
    format!("{repository}-{branch}")
}

fn working_directory() -> PathBuf {
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}
