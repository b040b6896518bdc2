use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use inquire::{CustomType, Select, Text};
use weathernow_core::{
    Config, Dashboard, DataSourceKind, LocationParams, QueryError, Session, TemperatureUnit,
    aggregator::INVALID_SEARCH_MESSAGE, source::source_from_config,
};

use crate::render::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weathernow", version, about = "Weather and news dashboard")]
pub struct Cli {
    /// Name to greet on the dashboard.
    #[arg(long, global = true)]
    pub user: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Choose the data source and gateway address.
    Configure,

    /// Print the dashboard once for a location.
    Show(LocationArgs),

    /// Interactive dashboard: search cities and toggle units.
    Dashboard(LocationArgs),
}

/// Navigation parameters: a city name or a coordinate pair.
#[derive(Debug, Args)]
pub struct LocationArgs {
    /// City or place name.
    #[arg(conflicts_with_all = ["lat", "lon"])]
    pub city: Option<String>,

    #[arg(long, requires = "lon", allow_hyphen_values = true)]
    pub lat: Option<f64>,

    #[arg(long, requires = "lat", allow_hyphen_values = true)]
    pub lon: Option<f64>,

    /// Start in Celsius instead of Fahrenheit.
    #[arg(long)]
    pub celsius: bool,
}

impl LocationArgs {
    fn params(&self) -> LocationParams {
        match (self.lat, self.lon, &self.city) {
            (Some(lat), Some(lon), _) => LocationParams::from_coordinates(lat, lon),
            (_, _, Some(city)) => LocationParams::from_place(city.as_str()),
            _ => LocationParams::default(),
        }
    }

    fn unit(&self) -> TemperatureUnit {
        if self.celsius { TemperatureUnit::Celsius } else { TemperatureUnit::Fahrenheit }
    }
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let session = self.user.as_deref().map(Session::named).unwrap_or_default();

        match self.command {
            Command::Configure => configure(),
            Command::Show(args) => {
                let mut dashboard = open_dashboard(&args)?;
                dashboard.open(&args.params()).await;
                println!("{}", render(&dashboard, &session));
                Ok(())
            }
            Command::Dashboard(args) => {
                let mut dashboard = open_dashboard(&args)?;
                dashboard.open(&args.params()).await;
                interactive(&mut dashboard, &session).await
            }
        }
    }
}

fn open_dashboard(args: &LocationArgs) -> anyhow::Result<Dashboard> {
    let config = Config::load()?;
    tracing::debug!(
        gateway = config.gateway_url(),
        source = ?config.data_source,
        "loaded configuration"
    );
    let source = source_from_config(&config)?;

    let mut dashboard = Dashboard::new(source);
    dashboard.set_unit(args.unit());
    Ok(dashboard)
}

async fn interactive(dashboard: &mut Dashboard, session: &Session) -> anyhow::Result<()> {
    loop {
        println!("{}", render(dashboard, session));

        let input = Text::new("City name (:u toggles °F/°C, :q quits):")
            .prompt()
            .context("Failed to read search input")?;

        match input.trim() {
            ":q" | ":quit" => return Ok(()),
            ":u" | ":unit" => dashboard.toggle_unit(),
            city => match dashboard.search(city).await {
                Ok(()) => {}
                Err(QueryError::MissingLocation) => println!("{INVALID_SEARCH_MESSAGE}"),
                Err(err) => println!("{err}"),
            },
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let current = config.data_source_kind().unwrap_or_default();
    let kinds = DataSourceKind::all().to_vec();
    let cursor = kinds.iter().position(|k| *k == current).unwrap_or(0);
    let kind = Select::new("Data source:", kinds)
        .with_starting_cursor(cursor)
        .prompt()
        .context("Failed to read data source")?;
    config.set_data_source(kind);

    if kind == DataSourceKind::Live {
        let url = Text::new("Gateway URL:")
            .with_default(config.gateway_url())
            .prompt()
            .context("Failed to read gateway URL")?;
        config.set_gateway_url(&url);

        let timeout = CustomType::<u64>::new("Request timeout (seconds):")
            .with_default(config.request_timeout().as_secs())
            .with_error_message("Please enter a whole number of seconds")
            .prompt()
            .context("Failed to read request timeout")?;
        config.request_timeout_secs = Some(timeout.max(1));
    }

    let path = config.save()?;
    println!("Saved configuration to {}", path.display());
    Ok(())
}
