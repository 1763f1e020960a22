use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "cropsense",
    version,
    about = "Crop recommendation from live weather and soil data"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to config.yaml
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run interactive setup
    Init,
    /// Validate config, model artifacts, and provider connectivity
    Check,
    /// Detect the current location via IP geolocation
    Locate,
    /// Live mode: detect location, fetch weather, recommend a crop
    Live(LiveArgs),
    /// Manual mode: recommend a crop from fully specified values
    Manual(ManualArgs),
}

#[derive(Args)]
pub struct LiveArgs {
    /// Soil nitrogen (kg/ha); prompted for when omitted
    #[arg(long)]
    pub n: Option<f64>,

    /// Soil phosphorus (kg/ha)
    #[arg(long)]
    pub p: Option<f64>,

    /// Soil potassium (kg/ha)
    #[arg(long)]
    pub k: Option<f64>,

    /// Soil pH
    #[arg(long)]
    pub ph: Option<f64>,

    /// Skip IP geolocation and use this latitude
    #[arg(long, requires = "longitude")]
    pub latitude: Option<f64>,

    /// Skip IP geolocation and use this longitude
    #[arg(long, requires = "latitude")]
    pub longitude: Option<f64>,

    /// JSON file with IoT sensor readings; present fields override manual soil
    /// values per field
    #[arg(long)]
    pub iot_file: Option<PathBuf>,
}

#[derive(Args)]
pub struct ManualArgs {
    /// Soil nitrogen (kg/ha); prompted for when omitted
    #[arg(long)]
    pub n: Option<f64>,

    /// Soil phosphorus (kg/ha)
    #[arg(long)]
    pub p: Option<f64>,

    /// Soil potassium (kg/ha)
    #[arg(long)]
    pub k: Option<f64>,

    /// Soil pH
    #[arg(long)]
    pub ph: Option<f64>,

    /// Temperature (°C)
    #[arg(long)]
    pub temperature: Option<f64>,

    /// Relative humidity (%)
    #[arg(long)]
    pub humidity: Option<f64>,

    /// Rainfall (mm/day)
    #[arg(long)]
    pub rainfall: Option<f64>,
}
