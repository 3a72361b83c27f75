use anyhow::{Context, Result};
use colored::*;
use std::fs;
use std::path::Path;

use crate::port::PortResult;

/// Render assignments as env-file lines, one `ENVVAR=PORT` per result, in
/// input order, newline-terminated. An empty result set renders as a bare
/// newline so the output file is never zero bytes.
pub fn render(ports: &[PortResult]) -> String {
    let lines: Vec<String> = ports
        .iter()
        .map(|port| format!("{}={}", port.env_var, port.port))
        .collect();

    format!("{}\n", lines.join("\n"))
}

pub fn write(ports: &[PortResult], output_path: &Path) -> Result<()> {
    let content = render(ports);

    fs::write(output_path, content)
        .with_context(|| format!("Failed to write {}", output_path.display()))?;

    println!(
        "{} Port settings written to {}:",
        "📝".green(),
        output_path.display()
    );
    for port in ports {
        println!("  {}={} ({})", port.env_var, port.port, port.service.cyan());
    }

    Ok(())
}
