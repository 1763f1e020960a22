mod cli;
mod config;
mod datasources;
mod error;
mod logic;
mod models;
mod predict;

use clap::Parser;
use cli::{Cli, Commands, LiveArgs, ManualArgs};
use config::Config;
use datasources::GeoLocator;
use dialoguer::Input;
use error::{CropSenseError, Result};
use logic::{LiveRequest, ManualRequest, RecommendationEngine, WeatherService};
use models::{Coordinate, IotSoilReading, RecommendationResult, SoilInput};
use predict::ModelArtifacts;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Initialize logging
    let default_filter = match cli.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    if matches!(cli.command, Commands::Init) {
        Config::setup_interactive()?;
        return Ok(());
    }

    // First run without a config file drops into interactive setup.
    let config = if Config::exists(cli.config.as_ref()) {
        match Config::load(cli.config) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Configuration error: {}", e);
                eprintln!("Run `cropsense init` to set up.");
                std::process::exit(1);
            }
        }
    } else {
        let (config, _) = Config::setup_interactive()?;
        config
    };

    match cli.command {
        Commands::Init => unreachable!("handled above"),
        Commands::Check => run_check(&config).await,
        Commands::Locate => run_locate(&config).await,
        Commands::Live(args) => run_live(&config, args).await,
        Commands::Manual(args) => run_manual(&config, args).await,
    }
}

async fn run_check(config: &Config) -> Result<()> {
    match ModelArtifacts::load(&config.model) {
        Ok(_) => println!("Model artifacts: OK"),
        Err(e) => println!("Model artifacts: FAILED ({})", e),
    }

    let weather = WeatherService::new(config.openweathermap.clone(), config.rainfall);
    if weather.test_connection().await {
        println!("OpenWeatherMap: OK");
    } else {
        println!("OpenWeatherMap: OFFLINE");
    }

    let location = GeoLocator::new(config.geolocation.clone()).locate().await;
    println!("Geolocation: {}", location.source);

    Ok(())
}

async fn run_locate(config: &Config) -> Result<()> {
    let location = GeoLocator::new(config.geolocation.clone()).locate().await;

    println!(
        "Location: {}, {} ({})",
        location.city, location.country, location.source
    );
    println!(
        "Coordinates: lat {}, lon {}",
        location.coordinate.latitude, location.coordinate.longitude
    );

    Ok(())
}

async fn run_live(config: &Config, args: LiveArgs) -> Result<()> {
    let soil = SoilInput {
        n: prompt_or(args.n, "Nitrogen (N)")?,
        p: prompt_or(args.p, "Phosphorus (P)")?,
        k: prompt_or(args.k, "Potassium (K)")?,
        ph: prompt_or(args.ph, "pH value")?,
    };

    let geo_hint = match (args.latitude, args.longitude) {
        (Some(latitude), Some(longitude)) => Some(Coordinate::new(latitude, longitude)?),
        _ => None,
    };

    let iot = match args.iot_file {
        Some(path) => {
            let raw = std::fs::read_to_string(&path)?;
            let reading: IotSoilReading = serde_json::from_str(&raw)?;
            Some(reading)
        }
        None => None,
    };

    println!("Fetching live weather data...");
    let engine = build_engine(config);
    let result = engine
        .recommend_live(LiveRequest {
            soil,
            iot,
            geo_hint,
        })
        .await?;

    print_result(&result);
    Ok(())
}

async fn run_manual(config: &Config, args: ManualArgs) -> Result<()> {
    let request = ManualRequest {
        n: prompt_or(args.n, "Nitrogen (N)")?,
        p: prompt_or(args.p, "Phosphorus (P)")?,
        k: prompt_or(args.k, "Potassium (K)")?,
        ph: prompt_or(args.ph, "pH value")?,
        temperature: prompt_or(args.temperature, "Temperature (°C)")?,
        humidity: prompt_or(args.humidity, "Humidity (%)")?,
        rainfall: prompt_or(args.rainfall, "Rainfall (mm/day)")?,
    };

    let engine = build_engine(config);
    let result = engine.recommend_manual(request).await?;

    print_result(&result);
    Ok(())
}

fn build_engine(config: &Config) -> RecommendationEngine {
    // Artifacts load once here; a failure is reported per request as
    // MissingModelArtifacts rather than re-attempted.
    let artifacts = match ModelArtifacts::load(&config.model) {
        Ok(a) => Some(Arc::new(a)),
        Err(e) => {
            tracing::error!("failed to load model artifacts: {}", e);
            None
        }
    };

    RecommendationEngine::new(
        artifacts,
        GeoLocator::new(config.geolocation.clone()),
        WeatherService::new(config.openweathermap.clone(), config.rainfall),
    )
}

fn prompt_or(value: Option<f64>, prompt: &str) -> Result<f64> {
    match value {
        Some(v) => Ok(v),
        None => Input::new()
            .with_prompt(format!("  {}", prompt))
            .interact_text()
            .map_err(|e| CropSenseError::Config(format!("Input error: {}", e))),
    }
}

fn print_result(result: &RecommendationResult) {
    println!();
    println!("Recommended crop: {}", result.crop.to_uppercase());
    println!();
    println!("Mode: {}", result.mode);

    if let Some(ref location) = result.location {
        println!(
            "Location: {}, {} ({})",
            location.city, location.country, location.source
        );
        println!(
            "Coordinates: lat {}, lon {}",
            location.coordinate.latitude, location.coordinate.longitude
        );
    }

    println!();
    println!("Weather ({}):", result.weather.source);
    println!("  Temperature: {} °C", result.weather.temperature_c);
    println!("  Humidity: {} %", result.weather.humidity_pct);
    println!("  Rainfall: {} mm/day", result.weather.rainfall_mm_per_day);

    println!();
    println!("Soil ({}):", result.soil.source);
    println!("  Nitrogen (N): {}", result.soil.n);
    println!("  Phosphorus (P): {}", result.soil.p);
    println!("  Potassium (K): {}", result.soil.k);
    println!("  pH: {}", result.soil.ph);
}
