use clap::{Parser, Subcommand, ValueEnum};

#[derive(Debug, Clone, Parser)]
#[command(name = "mcc")]
#[command(about = "Day part lookup and upstream client wiring for the MCC backend")]
pub struct CliConfig {
    /// Path to TOML configuration file
    #[arg(short, long, global = true, default_value = "mcc.toml")]
    pub config: String,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Compact,
    Json,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List every day part with its window
    DayParts,

    /// Classify a time of day (HH:MM[:SS]) or an RFC 3339 datetime
    Classify {
        /// Defaults to now in the venue's offset
        time: Option<String>,
    },

    /// Wire the tagged HTTP clients from the config and list them
    Clients {
        /// Send one GET through a client, e.g. `feeds:/showtimes.json`
        #[arg(long)]
        fetch: Option<String>,
    },
}

impl CliConfig {
    pub fn init_logger(&self) {
        match self.log_format {
            LogFormat::Compact => crate::utils::logger::init_cli_logger(self.verbose),
            LogFormat::Json => crate::utils::logger::init_json_logger(self.verbose),
        }
    }
}
