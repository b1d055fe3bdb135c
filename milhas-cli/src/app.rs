use std::fmt::Write as _;
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use milhas_catalog::{estimate_price, AirlinePatch};
use milhas_core::datetime::format_flight_date;
use milhas_core::KeyValueStore;
use milhas_planner::{FlightInput, PricingMode, WorkspacePatch, WorkspaceSummary};
use milhas_shared::Workspace;
use milhas_store::app_config::Config;
use milhas_store::{AirlineStore, JsonFileStore, WorkspaceStore};
use tracing::{info, warn};
use url::Url;
use uuid::Uuid;

use crate::cli::{AirlineCommand, Command, FlightCommand, FlightFields, WorkspaceCommand};
use crate::share_link::{share_url, take_share_token};

/// The two stores plus what the commands need to talk about them.
pub struct App {
    pub airlines: AirlineStore,
    pub workspaces: WorkspaceStore,
    base_url: Url,
}

impl App {
    pub fn open(config: &Config) -> Result<Self> {
        let data_dir = config.storage.resolved_data_dir();
        let backend = JsonFileStore::open(&data_dir)
            .with_context(|| format!("Failed to open data directory {}", data_dir.display()))?;
        info!("Using data directory {}", data_dir.display());

        Self::with_backend(
            Arc::new(backend),
            config.catalog.seed_defaults,
            &config.sharing.base_url,
        )
    }

    pub fn with_backend(
        backend: Arc<dyn KeyValueStore>,
        seed_defaults: bool,
        base_url: &str,
    ) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .with_context(|| format!("Invalid sharing.base_url {base_url:?}"))?;
        let airlines = AirlineStore::load(Arc::clone(&backend), seed_defaults)?;
        let mut workspaces = WorkspaceStore::load(backend)?;
        workspaces.ensure_active()?;

        Ok(Self {
            airlines,
            workspaces,
            base_url,
        })
    }

    /// Runs one command and returns what should be printed.
    pub fn run(&mut self, command: Command) -> Result<String> {
        match command {
            Command::Airline(command) => self.run_airline(command),
            Command::Workspace(command) => self.run_workspace(command),
            Command::Flight(command) => self.run_flight(command),
            Command::Export { workspace } => {
                let id = self.resolve_workspace(workspace)?;
                let token = self.workspaces.export_workspace(&id)?;
                Ok(share_url(&self.base_url, &token).to_string())
            }
            Command::Import { token } => {
                let (book, id) = self.workspaces.import_workspace(&token)?;
                let name = book.get(&id).map(|w| w.name.as_str()).unwrap_or_default();
                Ok(format!("Imported trip plan {name} ({id})"))
            }
            Command::Open { url } => self.open_link(&url),
        }
    }

    fn run_airline(&mut self, command: AirlineCommand) -> Result<String> {
        match command {
            AirlineCommand::List => {
                let catalog = self.airlines.snapshot();
                if catalog.is_empty() {
                    return Ok("No airlines registered".to_string());
                }

                let mut out = String::new();
                for airline in &catalog.airlines {
                    writeln!(
                        out,
                        "{}  {:<20} {} / 1000 miles",
                        airline.id,
                        airline.name,
                        milhas_core::currency::format_brl(airline.price_per_thousand_miles)
                    )?;
                }
                Ok(out.trim_end().to_string())
            }
            AirlineCommand::Add { name, rate } => {
                let (_, airline) = self.airlines.add_airline(name, rate)?;
                Ok(format!("Added airline {} ({})", airline.name, airline.id))
            }
            AirlineCommand::Update { id, name, rate } => {
                let patch = AirlinePatch {
                    name,
                    price_per_thousand_miles: rate,
                };
                self.airlines.update_airline(&id, patch)?;
                Ok(format!("Updated airline {id}"))
            }
            AirlineCommand::Remove { id } => {
                self.airlines.remove_airline(&id)?;
                Ok(format!("Removed airline {id}"))
            }
            AirlineCommand::Estimate { airline, miles } => {
                Ok(estimate_price(&self.airlines.snapshot(), miles, &airline))
            }
        }
    }

    fn run_workspace(&mut self, command: WorkspaceCommand) -> Result<String> {
        match command {
            WorkspaceCommand::List => {
                let book = self.workspaces.snapshot();
                if book.is_empty() {
                    return Ok(
                        "No trip plans yet; create one with `milhas workspace add <name>`"
                            .to_string(),
                    );
                }

                let mut out = String::new();
                for workspace in &book.workspaces {
                    let marker = if book.active_workspace_id == Some(workspace.id) {
                        "*"
                    } else {
                        " "
                    };
                    writeln!(
                        out,
                        "{marker} {}  {} ({} flights)",
                        workspace.id,
                        workspace.name,
                        workspace.flights.len()
                    )?;
                }
                Ok(out.trim_end().to_string())
            }
            WorkspaceCommand::Add { name } => {
                let (_, id) = self.workspaces.add_workspace(name.clone())?;
                self.workspaces.ensure_active()?;
                Ok(format!("Created trip plan {name} ({id})"))
            }
            WorkspaceCommand::Rename { id, name } => {
                let patch = WorkspacePatch {
                    name: Some(name),
                    ..WorkspacePatch::default()
                };
                self.workspaces.update_workspace(&id, patch)?;
                Ok(format!("Renamed trip plan {id}"))
            }
            WorkspaceCommand::Remove { id } => {
                self.workspaces.remove_workspace(&id)?;
                self.workspaces.ensure_active()?;
                Ok(format!("Removed trip plan {id}"))
            }
            WorkspaceCommand::Select { id } => {
                self.workspaces.set_active_workspace(&id)?;
                Ok(format!("Active trip plan is now {id}"))
            }
            WorkspaceCommand::Show { id } => {
                let id = self.resolve_workspace(id)?;
                let book = self.workspaces.snapshot();
                let workspace = book
                    .get(&id)
                    .ok_or_else(|| anyhow!("Workspace not found: {id}"))?;
                render_workspace(workspace)
            }
        }
    }

    fn run_flight(&mut self, command: FlightCommand) -> Result<String> {
        match command {
            FlightCommand::Add { workspace, fields } => {
                let workspace_id = self.resolve_workspace(workspace)?;
                let input = fields.into_input(None);
                let catalog = self.airlines.snapshot();

                let (book, flight_id) = self.workspaces.add_flight(&workspace_id, input, &catalog)?;
                let price = book
                    .get(&workspace_id)
                    .and_then(|w| w.flight(&flight_id))
                    .map(|f| f.details.price.clone())
                    .unwrap_or_default();
                Ok(format!("Added flight {flight_id} at {price}"))
            }
            FlightCommand::Edit {
                flight,
                workspace,
                fields,
            } => {
                let workspace_id = self.resolve_workspace(workspace)?;
                let book = self.workspaces.snapshot();
                let existing = book
                    .get(&workspace_id)
                    .and_then(|w| w.flight(&flight))
                    .ok_or_else(|| {
                        anyhow!("Flight {flight} not found in workspace {workspace_id}")
                    })?;

                let input = fields.into_input(Some(FlightInput::from_details(&existing.details)));
                let catalog = self.airlines.snapshot();
                self.workspaces.edit_flight(&workspace_id, &flight, input, &catalog)?;
                Ok(format!("Updated flight {flight}"))
            }
            FlightCommand::Remove { flight, workspace } => {
                let workspace_id = self.resolve_workspace(workspace)?;
                self.workspaces.remove_flight(&workspace_id, &flight)?;
                Ok(format!("Removed flight {flight}"))
            }
        }
    }

    /// Imports the link's shared plan, if any. The returned text always ends
    /// with the link minus its `workspace` parameter, whether or not the import worked.
    fn open_link(&mut self, link: &str) -> Result<String> {
        let url = Url::parse(link).with_context(|| format!("Invalid link {link:?}"))?;
        let (token, cleaned) = take_share_token(&url);

        let Some(token) = token else {
            return Ok(format!("No shared trip plan in link\n{cleaned}"));
        };

        match self.workspaces.import_workspace(&token) {
            Ok((book, id)) => {
                let name = book.get(&id).map(|w| w.name.as_str()).unwrap_or_default();
                Ok(format!("Imported trip plan {name} ({id})\n{cleaned}"))
            }
            Err(e) => {
                warn!("Shared trip plan could not be imported: {}", e);
                Err(anyhow!("Failed to import trip plan: {e}\n{cleaned}"))
            }
        }
    }

    fn resolve_workspace(&self, explicit: Option<Uuid>) -> Result<Uuid> {
        explicit
            .or(self.workspaces.snapshot().active_workspace_id)
            .ok_or_else(|| {
                anyhow!("No trip plan selected; pass one or run `milhas workspace select <id>`")
            })
    }
}

impl FlightFields {
    /// Overlays the given fields on `base` (or on an empty input).
    ///
    /// `--price` switches to direct pricing and `--miles` back to mileage.
    pub fn into_input(self, base: Option<FlightInput>) -> FlightInput {
        let mut input = base.unwrap_or_else(|| FlightInput {
            origin: String::new(),
            destination: String::new(),
            date: String::new(),
            airline: String::new(),
            pricing: PricingMode::Miles(0),
            ticket_link: String::new(),
            taxes: None,
        });

        if let Some(origin) = self.origin {
            input.origin = origin;
        }
        if let Some(destination) = self.destination {
            input.destination = destination;
        }
        if let Some(date) = self.date {
            input.date = date;
        }
        if let Some(airline) = self.airline {
            input.airline = airline;
        }
        if let Some(price) = self.price {
            input.pricing = PricingMode::Direct(price);
        }
        if let Some(miles) = self.miles {
            input.pricing = PricingMode::Miles(miles);
        }
        if let Some(ticket_link) = self.ticket_link {
            input.ticket_link = ticket_link;
        }
        if let Some(taxes) = self.taxes {
            input.taxes = Some(taxes);
        }
        input
    }
}

fn render_workspace(workspace: &Workspace) -> Result<String> {
    let mut out = String::new();
    writeln!(out, "{} ({})", workspace.name, workspace.id)?;

    if workspace.flights.is_empty() {
        writeln!(out, "No flights recorded in this trip plan yet")?;
        return Ok(out.trim_end().to_string());
    }

    for flight in &workspace.flights {
        let d = &flight.details;
        let miles = if d.use_direct_price {
            "-".to_string()
        } else {
            d.miles.to_string()
        };
        writeln!(
            out,
            "{}  {} -> {}  {}  {}  miles: {}  {}  taxes: {}  {}",
            flight.id,
            d.origin,
            d.destination,
            format_flight_date(&d.date),
            d.airline,
            miles,
            d.price,
            d.taxes.as_deref().unwrap_or("-"),
            d.ticket_link
        )?;
    }

    let summary = WorkspaceSummary::for_workspace(workspace);
    writeln!(
        out,
        "Total: {} flights, {} miles, {} + taxes",
        summary.flight_count,
        summary.total_miles,
        summary.formatted_total_price()
    )?;
    Ok(out.trim_end().to_string())
}
