use anyhow::Result;
use colored::*;
use std::path::Path;

use crate::config::Config;
use crate::git::{self, GitCli, GitQuery};
use crate::{env_file, identity, port};

/// Resolve identity, derive the offset, and write the env file.
pub fn execute(config_path: &str, output: Option<&str>) -> Result<()> {
    let config_path = shellexpand::tilde(config_path).into_owned();
    let config = Config::load(Path::new(&config_path));

    let output_file = match output {
        Some(path) => shellexpand::tilde(path).into_owned(),
        None => config.output_file.clone(),
    };

    if !git::git_available() {
        eprintln!(
            "{} git not found on PATH. Ports will be derived from the current directory.",
            "⚠️".yellow()
        );
    }

    let git = GitCli::new();
    let results = generate_ports(&git, &config)?;

    env_file::write(&results, Path::new(&output_file))?;

    println!();
    println!("{} Port generation completed successfully", "✅".green());

    Ok(())
}

/// The core pipeline, separated from file writing so tests can run it
/// against a fake `GitQuery`.
pub fn generate_ports(git: &dyn GitQuery, config: &Config) -> Result<Vec<port::PortResult>> {
    let repository = identity::repository_identity(git);
    let branch = identity::branch_name(git);
    let seed = identity::seed_string(&repository, &branch);

    let branch_display = if branch.is_empty() { "(unknown)" } else { branch.as_str() };
    println!("Repository: {}", repository.cyan());
    println!("Branch: {}", branch_display.cyan());
    println!("Seed string: {seed}");

    let offset = port::calculate_offset(&seed, config.offset_range)?;
    println!("Offset: {}", offset.to_string().cyan());

    Ok(port::apply_offset(&config.base_port, offset))
}
