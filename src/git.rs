use anyhow::{bail, Context, Result};
use std::path::PathBuf;
use std::process::Command;

/// The three git lookups the identity resolver needs. Behind a trait so
/// tests can supply canned answers instead of a real checkout.
pub trait GitQuery {
    fn remote_url(&self) -> Result<String>;
    fn toplevel(&self) -> Result<PathBuf>;
    fn current_branch(&self) -> Result<String>;
}

/// Queries git by shelling out to the `git` binary.
pub struct GitCli {
    work_dir: Option<PathBuf>,
}

impl GitCli {
    pub fn new() -> Self {
        Self { work_dir: None }
    }

    /// Run git inside a specific directory instead of the process cwd.
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            work_dir: Some(dir.into()),
        }
    }

    fn run(&self, args: &[&str]) -> Result<String> {
        let mut command = Command::new("git");
        command.args(args);
        if let Some(dir) = &self.work_dir {
            command.current_dir(dir);
        }

        let output = command
            .output()
            .with_context(|| format!("Failed to run git {}", args.join(" ")))?;

        if !output.status.success() {
            bail!("git {} exited with {}", args.join(" "), output.status);
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

impl Default for GitCli {
    fn default() -> Self {
        Self::new()
    }
}

impl GitQuery for GitCli {
    fn remote_url(&self) -> Result<String> {
        self.run(&["remote", "get-url", "origin"])
    }

    fn toplevel(&self) -> Result<PathBuf> {
        Ok(PathBuf::from(self.run(&["rev-parse", "--show-toplevel"])?))
    }

    fn current_branch(&self) -> Result<String> {
        self.run(&["rev-parse", "--abbrev-ref", "HEAD"])
    }
}

/// Whether a `git` binary is on PATH at all. Used to warn once up front
/// instead of spawning subprocesses that are bound to fail.
pub fn git_available() -> bool {
    which::which("git").is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::process::Command;
    use tempfile::TempDir;

    fn setup_test_repo() -> Result<(TempDir, GitCli)> {
        let temp_dir = TempDir::new()?;
        let repo_path = temp_dir.path();

        Command::new("git")
            .args(["init"])
            .current_dir(repo_path)
            .output()?;

        // Set git config to avoid errors
        Command::new("git")
            .args(["config", "user.email", "test@example.com"])
            .current_dir(repo_path)
            .output()?;

        Command::new("git")
            .args(["config", "user.name", "Test User"])
            .current_dir(repo_path)
            .output()?;

        Command::new("git")
            .args(["commit", "--allow-empty", "-m", "Initial commit"])
            .current_dir(repo_path)
            .output()?;

        Command::new("git")
            .args(["branch", "-M", "main"])
            .current_dir(repo_path)
            .output()?;

        let git = GitCli::in_dir(repo_path);
        Ok((temp_dir, git))
    }

    #[test]
    fn test_current_branch() -> Result<()> {
        let (_temp_dir, git) = setup_test_repo()?;

        assert_eq!(git.current_branch()?, "main");

        Ok(())
    }

    #[test]
    fn test_toplevel_points_at_repo() -> Result<()> {
        let (temp_dir, git) = setup_test_repo()?;

        // Canonicalize both sides; the temp path may contain symlinks
        let toplevel = git.toplevel()?.canonicalize()?;
        assert_eq!(toplevel, temp_dir.path().canonicalize()?);

        Ok(())
    }

    #[test]
    fn test_remote_url_fails_without_remote() -> Result<()> {
        let (_temp_dir, git) = setup_test_repo()?;

        assert!(git.remote_url().is_err());

        Ok(())
    }

    #[test]
    fn test_remote_url_returns_configured_origin() -> Result<()> {
        let (temp_dir, git) = setup_test_repo()?;

        Command::new("git")
            .args(["remote", "add", "origin", "https://github.com/test/repo.git"])
            .current_dir(temp_dir.path())
            .output()?;

        assert_eq!(git.remote_url()?, "https://github.com/test/repo.git");

        Ok(())
    }

    #[test]
    fn test_queries_fail_outside_a_repository() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let git = GitCli::in_dir(temp_dir.path());

        assert!(git.remote_url().is_err());
        assert!(git.toplevel().is_err());
        assert!(git.current_branch().is_err());

        Ok(())
    }
}
