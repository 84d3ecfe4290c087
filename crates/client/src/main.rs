//! `ecoleta` command-line client.
//!
//! Browses the directory and registers new collection points. Reference
//! data comes from the directory API (`/items`) and from the IBGE
//! localities catalog (states and cities).

use std::io::Write;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ecoleta_client::directory::DirectoryClient;
use ecoleta_client::form::{Photo, RegistrationForm, TextField};
use ecoleta_client::geography::{self, GeographyClient, DEFAULT_IBGE_URL};
use ecoleta_client::models::{PointQuery, Registration};
use ecoleta_core::types::DbId;

/// Ecoleta directory client
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Base URL of the directory API
    #[arg(long, env = "ECOLETA_API_URL", default_value = "http://localhost:3333")]
    api_url: String,

    /// Base URL of the IBGE localities API
    #[arg(long, env = "IBGE_API_URL", default_value = DEFAULT_IBGE_URL)]
    ibge_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the item categories a point can accept
    Items,
    /// List Brazilian states
    States,
    /// List the cities of a state
    Cities {
        /// State code, e.g. RJ
        uf: String,
    },
    /// Search points by city, state and items
    Points {
        #[arg(long)]
        city: String,
        #[arg(long)]
        uf: String,
        /// Comma-separated item ids
        #[arg(long, value_delimiter = ',', required = true)]
        items: Vec<DbId>,
    },
    /// Show one point with the items it accepts
    Show {
        id: DbId,
    },
    /// Register a new collection point
    Register(RegisterArgs),
}

#[derive(Args, Debug)]
struct RegisterArgs {
    #[arg(long)]
    name: String,
    #[arg(long)]
    email: String,
    #[arg(long)]
    whatsapp: String,
    /// State code, checked against the IBGE catalog
    #[arg(long)]
    uf: String,
    /// City name, checked against the state's municipalities
    #[arg(long)]
    city: String,
    #[arg(long, allow_hyphen_values = true, default_value_t = 0.0)]
    latitude: f64,
    #[arg(long, allow_hyphen_values = true, default_value_t = 0.0)]
    longitude: f64,
    /// Comma-separated item ids
    #[arg(long, value_delimiter = ',', required = true)]
    items: Vec<DbId>,
    /// Photo of the point (.jpg, .jpeg, .png or .webp)
    #[arg(long)]
    image: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Logs and status lines go to stderr; stdout carries only JSON.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ecoleta_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let directory = DirectoryClient::new(cli.api_url);
    let geography = GeographyClient::new(cli.ibge_url);

    match cli.command {
        Command::Items => print_json(&directory.list_items().await?),
        Command::States => print_json(&geography.states().await?),
        Command::Cities { uf } => print_json(&geography.cities(&uf.to_uppercase()).await?),
        Command::Points { city, uf, items } => {
            let query = PointQuery { city, uf, items };
            print_json(&directory.list_points(&query).await?)
        }
        Command::Show { id } => print_json(&directory.show_point(id).await?),
        Command::Register(args) => register(&directory, &geography, args).await,
    }
}

async fn register(
    directory: &DirectoryClient,
    geography: &GeographyClient,
    args: RegisterArgs,
) -> Result<()> {
    let mut form = RegistrationForm::new();
    form.set_text(TextField::Name, args.name);
    form.set_text(TextField::Email, args.email);
    form.set_text(TextField::Whatsapp, args.whatsapp);

    // State, then the city list for that state.
    let states = geography
        .states()
        .await
        .context("Failed to load states")?;
    let Some(state) = geography::find_state(&states, &args.uf) else {
        bail!("Unknown state '{}'", args.uf);
    };
    form.select_uf(state.code.clone());

    let cities = geography
        .cities(&state.code)
        .await
        .with_context(|| format!("Failed to load cities of {}", state.code))?;
    let Some(city) = geography::find_city(&cities, &args.city) else {
        bail!("'{}' is not a city of {}", args.city, state.name);
    };
    form.select_city(city.name.clone());

    form.pick_location(args.latitude, args.longitude);

    let available = directory
        .list_items()
        .await
        .context("Failed to load item categories")?;
    for id in args.items {
        if !available.iter().any(|item| item.id == id) {
            bail!("Unknown item id {id}");
        }
        if !form.is_selected(id) {
            form.toggle_item(id);
        }
    }

    form.attach_photo(Photo::from_path(&args.image).await?);

    let registration = directory.register(form).await?;
    report_registration(
        &registration,
        &mut std::io::stdout().lock(),
        &mut std::io::stderr().lock(),
    )
}

/// The success notice goes to `status`, the JSON record to `out`.
fn report_registration(
    registration: &Registration,
    out: &mut impl Write,
    status: &mut impl Write,
) -> Result<()> {
    writeln!(status, "Point registered with id {}.", registration.id)?;
    write_json(out, registration)
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    write_json(&mut std::io::stdout().lock(), value)
}

fn write_json<T: Serialize>(out: &mut impl Write, value: &T) -> Result<()> {
    writeln!(out, "{}", serde_json::to_string_pretty(value)?)?;
    Ok(())
}
