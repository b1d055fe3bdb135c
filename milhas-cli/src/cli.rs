use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use uuid::Uuid;

#[derive(Parser, Debug)]
#[command(name = "milhas")]
#[command(about = "Organize trip plans priced in airline miles")]
pub struct Cli {
    /// Extra configuration file, layered over config/default and friends
    #[arg(long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Where records are kept (overrides storage.data_dir)
    #[arg(long, value_name = "DIR", env = "MILHAS_DATA_DIR", global = true)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Manage airlines and their mile rates
    #[command(subcommand)]
    Airline(AirlineCommand),

    /// Manage trip plans
    #[command(subcommand)]
    Workspace(WorkspaceCommand),

    /// Manage the flights of a trip plan
    #[command(subcommand)]
    Flight(FlightCommand),

    /// Print a share link for a trip plan (default: the active one)
    Export {
        workspace: Option<Uuid>,
    },

    /// Import a trip plan from a bare share token
    Import {
        token: String,
    },

    /// Open an application link; imports the plan in its `workspace` parameter
    Open {
        url: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum AirlineCommand {
    List,
    Add {
        name: String,
        /// BRL per thousand miles
        rate: f64,
    },
    Update {
        id: Uuid,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        rate: Option<f64>,
    },
    Remove {
        id: Uuid,
    },
    /// Price a mileage count with an airline's current rate
    Estimate {
        airline: String,
        miles: u64,
    },
}

#[derive(Subcommand, Debug)]
pub enum WorkspaceCommand {
    List,
    Add {
        name: String,
    },
    Rename {
        id: Uuid,
        name: String,
    },
    Remove {
        id: Uuid,
    },
    /// Make a trip plan the active one
    Select {
        id: Uuid,
    },
    /// Flights and totals of a trip plan (default: the active one)
    Show {
        id: Option<Uuid>,
    },
}

#[derive(Subcommand, Debug)]
pub enum FlightCommand {
    Add {
        #[arg(long)]
        workspace: Option<Uuid>,
        #[command(flatten)]
        fields: FlightFields,
    },
    /// Re-submit a flight; given fields replace the stored ones and the price is derived again
    Edit {
        flight: Uuid,
        #[arg(long)]
        workspace: Option<Uuid>,
        #[command(flatten)]
        fields: FlightFields,
    },
    Remove {
        flight: Uuid,
        #[arg(long)]
        workspace: Option<Uuid>,
    },
}

#[derive(Args, Debug, Default)]
pub struct FlightFields {
    #[arg(long)]
    pub origin: Option<String>,
    #[arg(long)]
    pub destination: Option<String>,
    /// Local date-time, e.g. 2024-01-01T10:00
    #[arg(long)]
    pub date: Option<String>,
    #[arg(long)]
    pub airline: Option<String>,
    /// Price the flight from its mileage
    #[arg(long, conflicts_with = "price")]
    pub miles: Option<u64>,
    /// Enter the price directly, e.g. "R$ 500,00"
    #[arg(long)]
    pub price: Option<String>,
    #[arg(long)]
    pub ticket_link: Option<String>,
    #[arg(long)]
    pub taxes: Option<String>,
}
