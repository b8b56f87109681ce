//! userload CLI - ingest CSV user records into Postgres
//!
//! # Main Commands
//!
//! ```bash
//! userload serve                   # Start HTTP server (PORT env, default 3050)
//! userload parse input.csv         # Parse + normalize a CSV file (no database)
//! userload report                  # Print the current age distribution
//! ```

use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use userload::{
    age_distribution, parse_file_auto, parse_str, transform_rows, AppConfig, PgUserStore,
    UserStore,
};

#[derive(Parser)]
#[command(name = "userload")]
#[command(about = "Ingest CSV user records and report age distribution", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Port to listen on (overrides the PORT env var)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Parse and normalize a CSV file, emit records as JSON (no database)
    Parse {
        /// Input CSV file
        input: PathBuf,

        /// CSV delimiter (auto-detect if not specified)
        #[arg(short, long)]
        delimiter: Option<char>,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the age distribution over the stored population
    Report,
}

#[tokio::main]
async fn main() {
    // Load .env file (if present)
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Serve { port } => cmd_serve(port).await,
        Commands::Parse {
            input,
            delimiter,
            output,
        } => cmd_parse(&input, delimiter, output.as_deref()),
        Commands::Report => cmd_report().await,
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn cmd_serve(port: Option<u16>) -> Result<(), Box<dyn std::error::Error>> {
    let cfg = AppConfig::from_env()?;
    let port = port.unwrap_or(cfg.port);

    let store = PgUserStore::connect(&cfg.database_url).await?;
    println!("Database connected, users table synced");

    userload::server::start_server(port, Arc::new(store)).await
}

fn cmd_parse(
    input: &Path,
    delimiter: Option<char>,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("Parsing CSV: {}", input.display());

    let parsed = match delimiter {
        Some(d) => {
            let content = fs::read_to_string(input)?;
            parse_str(&content, d)?
        }
        None => parse_file_auto(input)?,
    };

    eprintln!("   Encoding: {}", parsed.encoding);
    eprintln!(
        "   Delimiter: '{}'{}",
        match parsed.delimiter {
            '\t' => "\\t".to_string(),
            c => c.to_string(),
        },
        if delimiter.is_none() { " (auto-detected)" } else { "" }
    );
    eprintln!("   Columns: {}", parsed.headers.join(", "));

    let records = transform_rows(&parsed.rows)?;
    eprintln!("Normalized {} records", records.len());

    let json = serde_json::to_string_pretty(&records)?;
    write_output(&json, output)?;

    Ok(())
}

async fn cmd_report() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = AppConfig::from_env()?;
    let store = PgUserStore::connect(&cfg.database_url).await?;

    let users = store.fetch_all().await?;
    let dist = age_distribution(&users);

    println!("Age Distribution Report:");
    println!("-------------------------");
    if dist.is_empty() {
        println!("No users stored yet.");
    } else {
        println!("Total users: {}", dist.total_users);
        println!("Age Group < 20: {:.2}%", dist.lt20);
        println!("Age Group 20-40: {:.2}%", dist.between_20_and_40);
        println!("Age Group 40-60: {:.2}%", dist.between_40_and_60);
        println!("Age Group > 60: {:.2}%", dist.gt60);
    }
    println!("-------------------------");

    Ok(())
}

fn write_output(content: &str, path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    match path {
        Some(p) => {
            fs::write(p, content)?;
            eprintln!("Output written to: {}", p.display());
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
