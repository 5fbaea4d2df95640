use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "btc-tracker")]
#[command(about = "Bitcoin address balance and transaction tracker", long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub config: ConfigArgs,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Look up the balance and transaction history of an address
    Lookup {
        #[arg(help = "The Bitcoin address to look up")]
        address: String,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Show the current BTC price in the configured fiat currency
    Price,
    /// Read addresses from stdin, one per line, and look each one up.
    /// A new address cancels the lookup still in flight
    Track {
        #[command(flatten)]
        output: OutputArgs,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct ConfigArgs {
    #[arg(
        short,
        long,
        global = true,
        help = "Path to the configuration file",
        default_value = "data/config.toml"
    )]
    pub config_file: PathBuf,
    #[arg(long, global = true, help = "Base URL of the BlockCypher chain API")]
    pub api_url: Option<String>,
    #[arg(long, global = true, help = "BlockCypher API token")]
    pub api_token: Option<String>,
    #[arg(long, global = true, help = "URL of the Bitcoin price index")]
    pub price_url: Option<String>,
    #[arg(long, global = true, help = "Fiat currency code, e.g. USD or EUR")]
    pub currency: Option<String>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct OutputArgs {
    #[arg(short, long, value_enum, help = "Output format", default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
    #[arg(short, long, help = "Maximum number of transactions to show")]
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_lookup_with_overrides() {
        let cli = Cli::try_parse_from([
            "btc-tracker",
            "lookup",
            "1DEP8i3QJCsomS4BSMY2RpU1upv62aGvhD",
            "--format",
            "json",
            "--limit",
            "5",
            "--currency",
            "EUR",
        ])
        .unwrap();

        assert_eq!(cli.config.currency.as_deref(), Some("EUR"));
        assert_eq!(cli.config.config_file, PathBuf::from("data/config.toml"));
        match cli.command {
            Commands::Lookup { address, output } => {
                assert_eq!(address, "1DEP8i3QJCsomS4BSMY2RpU1upv62aGvhD");
                assert_eq!(output.format, OutputFormat::Json);
                assert_eq!(output.limit, Some(5));
            },
            _ => panic!("expected lookup command"),
        }
    }

    #[test]
    fn test_lookup_requires_address() {
        assert!(Cli::try_parse_from(["btc-tracker", "lookup"]).is_err());
    }
}
