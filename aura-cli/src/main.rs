//! Aura CLI Entry Point
//!
//! Runs the briefing HTTP service or any of its operations once from the
//! terminal.

use anyhow::{bail, Context, Result};
use aura_core::{extract_icao, normalize_identifiers, BriefingRequest, BriefingResult, PirepSubmission};
use aura_llm::PirepConverter;
use aura_server::AppState;
use aura_utils::{init_logging, AppConfig, LoggerConfig};
use chrono::Utc;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "aura")]
#[command(about = "Aura - AI-assisted aviation weather briefings")]
#[command(version)]
struct Cli {
    /// Configuration file path (defaults to ./aura.toml when present)
    #[arg(short = 'c', long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging with source locations
    #[arg(short = 'v', long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the briefing HTTP service
    Serve {
        /// Address to listen on, overriding server.listen_addr
        #[arg(short = 'l', long)]
        listen: Option<String>,

        /// Directory of static front-end assets
        #[arg(long)]
        static_dir: Option<PathBuf>,
    },

    /// Produce a single route briefing
    Brief {
        /// Comma-separated ICAO codes, e.g. KSFO,KOAK
        #[arg(long)]
        codes: String,

        /// Include active NOTAMs
        #[arg(long)]
        notams: bool,

        /// Print the full JSON response instead of the summary
        #[arg(long)]
        json: bool,
    },

    /// Convert a plain-English pilot report to a standard PIREP line
    Convert {
        /// The pilot's own words
        #[arg(short = 't', long)]
        text: String,

        /// Airport to file under when the PIREP has no /OV location
        #[arg(long)]
        icao: Option<String>,

        /// Aircraft model flown
        #[arg(long)]
        aircraft: Option<String>,

        /// Also write the converted PIREP to the report store
        #[arg(long)]
        record: bool,
    },

    /// Print the ICAO identifier from a PIREP's /OV group
    ExtractIcao {
        /// PIREP text
        text: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            eprintln!("warning: failed to read .env file: {e}");
        }
    }

    let cli = Cli::parse();

    let mut config = AppConfig::load(cli.config.as_deref()).context("failed to load configuration")?;
    let mut logger = LoggerConfig::from_settings(&config.logging)?;
    if cli.verbose {
        logger = logger.verbose();
    }
    init_logging(&logger)?;

    match cli.command {
        Commands::Serve { listen, static_dir } => {
            if let Some(listen) = listen {
                config.server.listen_addr = listen;
            }
            if static_dir.is_some() {
                config.server.static_dir = static_dir;
            }
            aura_server::serve(&config).await?;
        }

        Commands::Brief { codes, notams, json } => {
            let airports = normalize_identifiers(&codes);
            if airports.is_empty() {
                bail!("No ICAO codes provided");
            }
            let state = AppState::from_config(&config)?;
            let result = state
                .briefing
                .brief(&BriefingRequest::new(airports, notams))
                .await;

            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                print_briefing(&result);
            }
        }

        Commands::Convert {
            text,
            icao,
            aircraft,
            record,
        } => {
            if text.trim().is_empty() {
                bail!("No text provided");
            }
            let state = AppState::from_config(&config)?;
            let pirep = state.converter.convert(text.trim()).await?;
            println!("{pirep}");

            if record {
                let submission = PirepSubmission {
                    received_at: Utc::now(),
                    pirep,
                    icao_hint: icao,
                    aircraft_name: aircraft,
                };
                let outcome = state.recorder.record(&submission).await;
                println!("{}", serde_json::to_string(&outcome)?);
            }
        }

        Commands::ExtractIcao { text } => match extract_icao(&text) {
            Some(icao) => println!("{icao}"),
            None => bail!("no /OV location found"),
        },
    }

    Ok(())
}

fn print_briefing(result: &BriefingResult) {
    tracing::debug!(narrative = %result.narrative_source, "Printing briefing");
    println!("{}", result.summary);
    println!();
    println!(
        "METARs: {}  TAFs: {}  PIREPs: {}  NOTAMs: {}",
        result.data.observations.len(),
        result.data.forecasts.len(),
        result.data.pilot_reports.len(),
        result.data.notices.len()
    );
    for metar in &result.data.observations {
        println!("  {}", metar.raw_text);
    }
    for taf in &result.data.forecasts {
        println!("  {}", taf.raw_text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_brief_arguments() {
        let cli = Cli::try_parse_from(["aura", "brief", "--codes", "KSFO,KOAK", "--notams"]).unwrap();
        match cli.command {
            Commands::Brief { codes, notams, json } => {
                assert_eq!(codes, "KSFO,KOAK");
                assert!(notams);
                assert!(!json);
            }
            _ => panic!("expected brief"),
        }
    }

    #[test]
    fn test_global_config_after_subcommand() {
        let cli = Cli::try_parse_from(["aura", "serve", "--listen", "0.0.0.0:8080", "--config", "aura.toml"])
            .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("aura.toml")));
        match cli.command {
            Commands::Serve { listen, static_dir } => {
                assert_eq!(listen.as_deref(), Some("0.0.0.0:8080"));
                assert!(static_dir.is_none());
            }
            _ => panic!("expected serve"),
        }
    }

    #[test]
    fn test_convert_requires_text() {
        assert!(Cli::try_parse_from(["aura", "convert"]).is_err());
        let cli = Cli::try_parse_from(["aura", "convert", "-t", "light chop", "--record"]).unwrap();
        assert!(matches!(cli.command, Commands::Convert { record: true, .. }));
    }
}
