use anyhow::Result;
use colored::*;
use indexmap::IndexMap;
use std::io::{self, BufRead, Write};
use std::path::Path;

use crate::config::Config;

const SUGGESTED_SERVICES: [(&str, u32); 3] =
    [("frontend", 3000), ("backend", 5000), ("database", 5432)];

pub fn execute(config_path: &str) -> Result<()> {
    let config_path = shellexpand::tilde(config_path).into_owned();
    let stdin = io::stdin();
    run_wizard(&mut stdin.lock(), Path::new(&config_path))
}

/// Walk the user through building a config file. Takes the input stream as
/// a parameter so tests can drive it with a scripted reader.
fn run_wizard(input: &mut impl BufRead, config_path: &Path) -> Result<()> {
    println!("{} Creating branch2ports configuration file", "🚀".green());
    println!();

    if config_path.exists() {
        let overwrite = ask(
            input,
            &format!(
                "Configuration file {} already exists. Overwrite? (y/N): ",
                config_path.display()
            ),
        )?;
        if !is_yes(&overwrite) {
            println!("Configuration file creation cancelled.");
            return Ok(());
        }
    }

    let output_file = match ask(input, "Specify output file name (.env): ")? {
        answer if answer.is_empty() => ".env".to_string(),
        answer => answer,
    };

    let offset_range = ask(input, "Specify offset range (1000): ")?
        .parse::<u32>()
        .ok()
        .filter(|&range| range > 0)
        .unwrap_or(1000);

    println!();
    println!("{} Configure service ports", "📋".blue());
    println!("Press Enter without input to use default values");
    println!();

    let mut base_port = IndexMap::new();

    for (name, port) in SUGGESTED_SERVICES {
        let service = match ask(input, &format!("Service name ({name}): "))? {
            answer if answer.is_empty() => name.to_string(),
            answer => answer,
        };
        let service_port = ask(input, &format!("Port number ({port}): "))?
            .parse::<u32>()
            .ok()
            .filter(|&p| is_valid_port(p))
            .unwrap_or(port);
        base_port.insert(service, service_port);
    }

    loop {
        let add_more = ask(input, "\nAdd another service? (y/N): ")?;
        if !is_yes(&add_more) {
            break;
        }

        let service = ask(input, "Service name: ")?;
        if service.is_empty() {
            println!("No service name entered. Skipping.");
            continue;
        }

        let port = ask(input, "Port number: ")?.parse::<u32>().ok();
        match port.filter(|&p| is_valid_port(p)) {
            Some(port) => {
                base_port.insert(service, port);
            }
            None => {
                println!("Invalid port number. Skipping.");
            }
        }
    }

    let config = Config {
        base_port,
        output_file,
        offset_range,
    };
    config.save(config_path)?;

    println!();
    println!(
        "{} Configuration file {} created!",
        "✅".green().bold(),
        config_path.display()
    );
    println!();
    println!("{} Configuration:", "📝".blue());
    println!("  Output file: {}", config.output_file);
    println!("  Offset range: {}", config.offset_range);
    println!("  Services:");
    for (service, port) in &config.base_port {
        println!("    {service}: {port}");
    }
    println!();
    println!("{} Ready! Run branch2ports to generate port numbers.", "🎉".green());

    Ok(())
}

fn ask(input: &mut impl BufRead, prompt: &str) -> Result<String> {
    print!("{prompt}");
    io::stdout().flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(answer.trim().to_string())
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.to_lowercase().as_str(), "y" | "yes")
}

fn is_valid_port(port: u32) -> bool {
    (1..=65535).contains(&port)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tempfile::TempDir;

    fn wizard_with_input(script: &str, config_path: &Path) -> Result<()> {
        run_wizard(&mut Cursor::new(script.as_bytes()), config_path)
    }

    #[test]
    fn test_wizard_accepts_all_defaults() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join(".branch2ports");

        // Empty answers everywhere, no extra services
        wizard_with_input("\n\n\n\n\n\n\n\nn\n", &config_path)?;

        let config = Config::load(&config_path);
        assert_eq!(config, Config::default());

        Ok(())
    }

    #[test]
    fn test_wizard_custom_values() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join(".branch2ports");

        let script = ".env.test\n500\nweb\n8080\n\n\n\n\ny\ncache\n6379\nn\n";
        wizard_with_input(script, &config_path)?;

        let config = Config::load(&config_path);
        assert_eq!(config.output_file, ".env.test");
        assert_eq!(config.offset_range, 500);
        assert_eq!(config.base_port["web"], 8080);
        assert_eq!(config.base_port["backend"], 5000);
        assert_eq!(config.base_port["cache"], 6379);
        assert!(!config.base_port.contains_key("frontend"));

        Ok(())
    }

    #[test]
    fn test_wizard_skips_invalid_extra_port() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join(".branch2ports");

        let script = "\n\n\n\n\n\n\n\ny\nbroken\n99999\nn\n";
        wizard_with_input(script, &config_path)?;

        let config = Config::load(&config_path);
        assert!(!config.base_port.contains_key("broken"));

        Ok(())
    }

    #[test]
    fn test_wizard_declines_overwrite() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join(".branch2ports");
        std::fs::write(&config_path, r#"{ "offsetRange": 77 }"#)?;

        wizard_with_input("n\n", &config_path)?;

        // Existing file untouched
        let config = Config::load(&config_path);
        assert_eq!(config.offset_range, 77);

        Ok(())
    }

    #[test]
    fn test_wizard_eof_falls_back_to_defaults() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join(".branch2ports");

        // No input at all, as in `branch2ports init < /dev/null`
        wizard_with_input("", &config_path)?;

        let config = Config::load(&config_path);
        assert_eq!(config, Config::default());

        Ok(())
    }
}
