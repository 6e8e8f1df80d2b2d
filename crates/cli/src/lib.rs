pub mod commands;
pub mod logging;
pub mod menu;
pub mod render;
pub mod session;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use storefront_core::config::{ConfigOverrides, LoadOptions};

#[derive(Debug, Parser)]
#[command(
    name = "storefront",
    about = "Command-line shopping simulator",
    long_about = "Browse an in-memory product catalog, check total stock, and place orders from an interactive menu.",
    after_help = "Examples:\n  storefront\n  storefront products --json\n  storefront total --json\n  storefront config"
)]
pub struct Cli {
    #[arg(long, global = true, help = "Read configuration from this TOML file")]
    config: Option<PathBuf>,
    #[arg(long, global = true, help = "Disable ANSI colors in menu output")]
    no_color: bool,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Open the interactive shopping menu (default)")]
    Shop,
    #[command(about = "Print the active product listing and exit")]
    Products {
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
    },
    #[command(about = "Print the total quantity of items in store and exit")]
    Total {
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
    },
    #[command(about = "Inspect effective configuration values with source attribution")]
    Config,
}

impl Cli {
    fn load_options(&self) -> LoadOptions {
        LoadOptions {
            config_path: self.config.clone(),
            require_file: false,
            overrides: ConfigOverrides {
                color: self.no_color.then_some(false),
                ..ConfigOverrides::default()
            },
        }
    }
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();
    let options = cli.load_options();

    let result = match cli.command.unwrap_or(Command::Shop) {
        Command::Shop => commands::shop::run(&options),
        Command::Products { json } => commands::products::run(&options, json),
        Command::Total { json } => commands::total::run(&options, json),
        Command::Config => commands::config::run(&options),
    };

    if !result.output.is_empty() {
        println!("{}", result.output);
    }
    ExitCode::from(result.exit_code)
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::{Cli, Command};

    #[test]
    fn no_subcommand_means_shop() {
        let cli = Cli::try_parse_from(["storefront"]).expect("bare invocation parses");
        assert!(cli.command.is_none());
        assert!(cli.load_options().overrides.color.is_none());
    }

    #[test]
    fn global_flags_feed_load_options() {
        let cli = Cli::try_parse_from([
            "storefront",
            "products",
            "--json",
            "--no-color",
            "--config",
            "shop.toml",
        ])
        .expect("flags parse");

        assert!(matches!(cli.command, Some(Command::Products { json: true })));
        let options = cli.load_options();
        assert_eq!(options.overrides.color, Some(false));
        assert_eq!(options.config_path.as_deref(), Some(std::path::Path::new("shop.toml")));
    }

    #[test]
    fn total_accepts_json_switch() {
        let cli = Cli::try_parse_from(["storefront", "total", "--json"]).expect("flag parses");
        assert!(matches!(cli.command, Some(Command::Total { json: true })));

        let cli = Cli::try_parse_from(["storefront", "total"]).expect("bare total parses");
        assert!(matches!(cli.command, Some(Command::Total { json: false })));
    }
}
