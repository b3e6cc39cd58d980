mod client;
mod commands;
mod config;
mod render;
mod utils;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use owo_colors::OwoColorize;

#[derive(Parser)]
#[command(name = "hevhub")]
#[command(about = "Submit and manage Highland Events Hub listings from the command line")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in with a Highland Events Hub API token
    Auth,
    /// Check whether a postcode or coordinate pair is inside the service region
    Check {
        /// Postcode to check (e.g. "IV1 1AA")
        postcode: Option<String>,
        /// Latitude, used with --lng when no postcode is available
        #[arg(long, requires = "lng")]
        lat: Option<f64>,
        /// Longitude, used with --lat
        #[arg(long, requires = "lat")]
        lng: Option<f64>,
    },
    /// Validate an event form file without submitting it
    Validate {
        /// Path to the event form (TOML)
        form: PathBuf,
    },
    /// Preview the occurrences a recurring event will generate
    Preview {
        /// Path to the event form (TOML)
        form: PathBuf,
    },
    /// Validate an event form and create the event
    Submit {
        /// Path to the event form (TOML)
        form: PathBuf,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Validate an event form and update an existing event
    Update {
        /// Event id
        id: String,
        /// Path to the event form (TOML)
        form: PathBuf,
        /// Skip confirmation prompts (including the destructive
        /// recurrence-disable confirmation)
        #[arg(long)]
        yes: bool,
    },
    /// Show a stored event
    Show {
        /// Event id
        id: String,
        /// Open the public event page in a browser
        #[arg(long)]
        open: bool,
    },
    /// Delete an event
    Delete {
        /// Event id
        id: String,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Stop a recurring series, deleting instances that have not yet occurred
    StopRecurrence {
        /// Event id
        id: String,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Export an event as an .ics calendar file
    Export {
        /// Event id
        id: String,
        /// Output path (defaults to <slug>.ics)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// List event categories
    Categories,
    /// List venues
    Venues,
    /// Upload an event image
    Upload {
        /// Path to the image file
        image: PathBuf,
        /// Media folder classifier
        #[arg(long, default_value = "events")]
        folder: String,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Auth => commands::auth::run().await,
        Commands::Check { postcode, lat, lng } => commands::check::run(postcode, lat, lng),
        Commands::Validate { form } => commands::validate::run(form),
        Commands::Preview { form } => commands::preview::run(form),
        Commands::Submit { form, yes } => commands::submit::run(form, yes).await,
        Commands::Update { id, form, yes } => commands::update::run(id, form, yes).await,
        Commands::Show { id, open } => commands::show::run(id, open).await,
        Commands::Delete { id, yes } => commands::delete::run(id, yes).await,
        Commands::StopRecurrence { id, yes } => commands::stop::run(id, yes).await,
        Commands::Export { id, output } => commands::export::run(id, output).await,
        Commands::Categories => commands::categories::run().await,
        Commands::Venues => commands::venues::run().await,
        Commands::Upload { image, folder } => commands::upload::run(image, folder).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}
