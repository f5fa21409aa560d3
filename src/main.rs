use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use convoy_roster::config::ServerConfig;
use convoy_roster::models::*;
use convoy_roster::transfer::EXPORT_FILE_NAME;
use convoy_roster::{api, report, RosterStore};

#[derive(Parser)]
#[command(name = "convoy")]
#[command(about = "Organize a convoy: people, vehicles and who rides where")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP API
    Serve {
        /// Port for HTTP API (defaults to CONVOY_ROSTER_PORT or 17020)
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Add or remove people
    Person {
        #[command(subcommand)]
        action: PersonCommand,
    },
    /// Add or remove vehicles
    Vehicle {
        #[command(subcommand)]
        action: VehicleCommand,
    },
    /// Seat a person in a vehicle (re-assigning updates the stay flag)
    Assign {
        vehicle_id: String,
        person_id: String,
        /// The person stays overnight
        #[arg(long)]
        stay: bool,
    },
    /// Remove a person from a vehicle
    Unassign { vehicle_id: String, person_id: String },
    /// Set the convoy goal, date and time
    Convoy {
        #[arg(long)]
        goal: String,
        #[arg(long)]
        date: String,
        #[arg(long)]
        time: String,
    },
    /// Clear the roster
    Clear {
        /// Only clear assignments and convoy info
        #[arg(long)]
        assignments: bool,
    },
    /// Print the grouped report
    Report,
    /// Write the roster as JSON
    Export {
        /// Output file (defaults to the downloads directory)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Replace the roster with a previously exported JSON file
    Import { file: PathBuf },
}

#[derive(Subcommand)]
enum PersonCommand {
    /// Add a person by 7-digit ID number
    Add { id_number: String, full_name: String },
    /// Remove a person and their assignments
    Remove { id_number: String },
}

#[derive(Subcommand)]
enum VehicleCommand {
    /// Add a vehicle by 5 to 9 digit vehicle ID
    Add { vehicle_id: String, designation: String },
    /// Remove a vehicle and its assignments
    Remove { vehicle_id: String },
}

/// Initialize tracing with output to stderr (for one-shot commands) or stdout
fn init_tracing(use_stderr: bool) {
    let filter = tracing_subscriber::EnvFilter::new(std::env::var("RUST_LOG").unwrap_or_else(
        |_| "convoy_roster=debug,roster_core=debug,tower_http=debug".into(),
    ));

    if use_stderr {
        // One-shot commands print reports and paths on stdout
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

fn default_export_path() -> PathBuf {
    dirs::download_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(EXPORT_FILE_NAME)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let serving = matches!(cli.command, Commands::Serve { .. });
    init_tracing(!serving);

    let config = ServerConfig::from_env();
    let db = config.open_database()?;
    let store = RosterStore::open(Arc::new(db));

    match cli.command {
        Commands::Serve { port } => {
            let port = port.unwrap_or(config.port);
            let app = api::create_router_with_config(store, &config);

            let listener = tokio::net::TcpListener::bind(format!("127.0.0.1:{}", port)).await?;
            tracing::info!("Convoy roster listening on http://127.0.0.1:{}", port);

            axum::serve(listener, app).await?;
        }
        Commands::Person { action } => match action {
            PersonCommand::Add {
                id_number,
                full_name,
            } => {
                anyhow::ensure!(
                    is_valid_id_number(&id_number),
                    "ID number must be exactly {} digits: {}",
                    ID_NUMBER_LEN,
                    id_number
                );
                anyhow::ensure!(
                    store.add_person_if_absent(Person::new(id_number.clone(), full_name)),
                    "Person {} already exists",
                    id_number
                );
            }
            PersonCommand::Remove { id_number } => store.remove_person(&id_number),
        },
        Commands::Vehicle { action } => match action {
            VehicleCommand::Add {
                vehicle_id,
                designation,
            } => {
                anyhow::ensure!(
                    is_valid_vehicle_id(&vehicle_id),
                    "Vehicle ID must be {} to {} digits: {}",
                    VEHICLE_ID_LEN.start(),
                    VEHICLE_ID_LEN.end(),
                    vehicle_id
                );
                anyhow::ensure!(
                    store.add_vehicle_if_absent(Vehicle::new(vehicle_id.clone(), designation)),
                    "Vehicle {} already exists",
                    vehicle_id
                );
            }
            VehicleCommand::Remove { vehicle_id } => store.remove_vehicle(&vehicle_id),
        },
        Commands::Assign {
            vehicle_id,
            person_id,
            stay,
        } => {
            anyhow::ensure!(
                is_valid_vehicle_id(&vehicle_id),
                "Invalid vehicle ID: {}",
                vehicle_id
            );
            anyhow::ensure!(
                is_valid_id_number(&person_id),
                "Invalid person ID: {}",
                person_id
            );
            store.add_assignment(Assignment::new(vehicle_id, person_id, stay));
        }
        Commands::Unassign {
            vehicle_id,
            person_id,
        } => store.remove_assignment(&vehicle_id, &person_id),
        Commands::Convoy { goal, date, time } => {
            store.set_convoy_info(ConvoyInfo { goal, date, time });
        }
        Commands::Clear { assignments } => {
            if assignments {
                store.clear_assignments();
            } else {
                store.clear_all();
            }
        }
        Commands::Report => {
            println!("{}", report::generate(&store.snapshot()));
        }
        Commands::Export { output } => {
            let path = output.unwrap_or_else(default_export_path);
            std::fs::write(&path, store.export_json()?)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!("Exported roster to {}", path.display());
            println!("{}", path.display());
        }
        Commands::Import { file } => {
            let text = std::fs::read_to_string(&file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            store.import_json(&text)?;
        }
    }

    Ok(())
}
