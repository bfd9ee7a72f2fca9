use std::path::PathBuf;

use clap::{Parser, Subcommand};
use costdraft::{AppError, PromptOptions, ReportEnvelope, ReportOptions, ServeOptions};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "costdraft")]
#[command(version)]
#[command(
    about = "Draft feasibility and cost reports from architectural drawings",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Send drawings and survey answers to the model and print its report
    #[clap(visible_alias = "r")]
    Report {
        /// JSON file with project_info_payload and cost_info_payload
        #[arg(short, long)]
        data: Option<PathBuf>,
        /// Configuration file (defaults to ./costdraft.toml when present)
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Do not call the completion endpoint
        #[arg(long)]
        mock: bool,
        /// Print the {"result"} / {"error"} envelope instead of plain text
        #[arg(long)]
        json: bool,
        /// PDF drawings
        files: Vec<PathBuf>,
    },
    /// Print the composed question without calling the endpoint
    #[clap(visible_alias = "p")]
    Prompt {
        #[arg(short, long)]
        data: Option<PathBuf>,
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// List available prompt templates
    #[clap(visible_alias = "t")]
    Templates {
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Serve POST /report and GET /health
    #[clap(visible_alias = "s")]
    Serve {
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Listen address, overriding server.bind
        #[arg(short, long)]
        bind: Option<String>,
        /// Answer every report with the mock client
        #[arg(long)]
        mock: bool,
    },
}

fn main() {
    dotenvy::dotenv().ok();
    // stdout carries report text only.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("costdraft=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result: Result<(), AppError> = match cli.command {
        Commands::Report { data, config, mock, json, files } => {
            let options = ReportOptions { files, data_path: data, config_path: config, mock };
            let outcome = costdraft::report(options);
            if json {
                print_envelope(&outcome);
            }
            outcome.map(|text| {
                if !json {
                    println!("{}", text);
                }
            })
        }
        Commands::Prompt { data, config } => {
            costdraft::prompt(PromptOptions { data_path: data, config_path: config })
                .map(|question| println!("{}", question))
        }
        Commands::Templates { config } => costdraft::templates(config.as_deref()).map(|list| {
            for template in list {
                let marker = if template.active { "*" } else { " " };
                println!("{} {}", marker, template.name);
            }
        }),
        Commands::Serve { config, bind, mock } => {
            costdraft::serve(ServeOptions { config_path: config, bind, mock })
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(e.exit_code());
    }
}

fn print_envelope(outcome: &Result<String, AppError>) {
    match serde_json::to_string(&ReportEnvelope::from_outcome(outcome)) {
        Ok(line) => println!("{}", line),
        Err(e) => eprintln!("Error: failed to encode envelope: {}", e),
    }
}
