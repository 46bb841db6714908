use clap::Parser;
use mcc_domain::app::commands;
use mcc_domain::config::cli::Command;
use mcc_domain::{CliConfig, Result};

#[tokio::main]
async fn main() {
    let config = CliConfig::parse();

    // 初始化日誌
    config.init_logger();
    tracing::debug!("CLI config: {:?}", config);

    if let Err(e) = run(&config).await {
        tracing::error!(
            "❌ Command failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        std::process::exit(e.exit_code());
    }
}

async fn run(config: &CliConfig) -> Result<()> {
    match &config.command {
        Command::DayParts => {
            for row in commands::day_part_rows() {
                println!("{}", row);
            }
        }
        Command::Classify { time } => {
            let classification = commands::classify(time.as_deref(), &config.config)?;
            println!("{}", classification.render());
        }
        Command::Clients { fetch } => {
            let toml_config = commands::load_config(&config.config)?;
            let registry = commands::wire_clients(&toml_config)?;

            for row in commands::client_rows(&registry)? {
                println!("{}", row);
            }

            if let Some(spec) = fetch {
                let body = commands::fetch(&registry, spec).await?;
                println!("{}", serde_json::to_string_pretty(&body)?);
            }
        }
    }

    Ok(())
}
