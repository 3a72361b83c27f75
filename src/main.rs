use anyhow::Result;
use clap::{Parser, Subcommand};

use branch2ports::commands::{generate, init};
use branch2ports::config::DEFAULT_CONFIG_FILE;

#[derive(Parser)]
#[command(
    author,
    version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("GIT_HASH"), ")"),
    about = "Generate deterministic service ports from the current git repository and branch",
    long_about = None
)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Generate port numbers and write them to the output file", visible_alias = "g")]
    Generate {
        #[arg(short, long, value_name = "FILE", default_value = DEFAULT_CONFIG_FILE, help = "Configuration file path")]
        config: String,

        #[arg(short, long, value_name = "FILE", help = "Output file path (overrides the configured one)")]
        output: Option<String>,
    },

    #[command(about = "Create a configuration file interactively", visible_alias = "i")]
    Init {
        #[arg(short, long, value_name = "FILE", default_value = DEFAULT_CONFIG_FILE, help = "Configuration file path")]
        config: String,
    },
}

fn main() -> Result<()> {
    colored::control::set_override(should_use_color());

    let cli = Cli::parse();

    // Bare `branch2ports` means generate with defaults
    match cli.command.unwrap_or(Commands::Generate {
        config: DEFAULT_CONFIG_FILE.to_string(),
        output: None,
    }) {
        Commands::Generate { config, output } => {
            generate::execute(&config, output.as_deref())?;
        }
        Commands::Init { config } => {
            init::execute(&config)?;
        }
    }

    Ok(())
}

fn should_use_color() -> bool {
    if std::env::var("NO_COLOR").is_ok() || std::env::var("CLICOLOR").map(|v| v == "0").unwrap_or(false) {
        return false;
    }
    true
}
