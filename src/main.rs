use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, Level};
use tracing_subscriber::EnvFilter;

use ad_image_analyzer::{
    analysis::AnalysisEngine,
    config::Config,
    imaging::{DecodedImage, ImageDecoder},
    server,
};

#[derive(Parser)]
#[command(
    name = "ad-image-analyzer",
    version,
    about = "Score ad images on composition and color heuristics",
    long_about = "Ad-Image-Analyzer scores uploaded images on symmetry, rule-of-thirds \
                  variance, dominant color and brand-color match, either over HTTP or \
                  directly on local files."
)]
struct Cli {
    /// Configuration file (optional)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP service (default)
    Serve {
        /// Interface to bind, overrides the configuration file
        #[arg(long)]
        host: Option<String>,

        /// Port to bind, overrides the configuration file
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Print composition scores for a local image as JSON
    Composition {
        /// Image file (PNG, JPEG, BMP, GIF, WebP)
        path: PathBuf,
    },

    /// Print color analysis for a local image as JSON
    Color {
        /// Image file (PNG, JPEG, BMP, GIF, WebP)
        path: PathBuf,

        /// Brand color as #RRGGBB
        #[arg(short, long)]
        brand_color: Option<String>,
    },

    /// Write the default configuration to a TOML file
    InitConfig {
        /// Destination path
        path: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging; RUST_LOG takes precedence over --verbose
    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level.as_str()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    // Load configuration
    let config = match &cli.config {
        Some(config_path) => {
            info!("Loading configuration from {:?}", config_path);
            Config::from_file(config_path)?
        }
        None => Config::default(),
    };

    let command = cli.command.unwrap_or(Command::Serve {
        host: None,
        port: None,
    });
    config.validate()?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(config.server.worker_threads)
        .enable_all()
        .build()
        .context("failed to build async runtime")?;

    runtime.block_on(run(command, config))
}

async fn run(command: Command, config: Config) -> Result<()> {
    match command {
        Command::Serve { host, port } => serve(config, host, port).await,
        Command::Composition { path } => {
            let image = decode_image(&path).await?;
            let result = AnalysisEngine::new(&config).composition_of(&image)?;
            println!("{}", serde_json::to_string_pretty(&result)?);
            Ok(())
        }
        Command::Color { path, brand_color } => {
            let image = decode_image(&path).await?;
            let result = AnalysisEngine::new(&config).color_of(&image, brand_color.as_deref())?;
            println!("{}", serde_json::to_string_pretty(&result)?);
            Ok(())
        }
        Command::InitConfig { path } => {
            config.save_to_file(&path)?;
            info!("Configuration written to {:?}", path);
            Ok(())
        }
    }
}

async fn serve(mut config: Config, host: Option<String>, port: Option<u16>) -> Result<()> {
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }
    config.validate()?;

    info!("Starting Ad-Image-Analyzer v{}", env!("CARGO_PKG_VERSION"));
    info!("Worker threads: {}", config.server.worker_threads);

    server::serve(config).await?;
    Ok(())
}

async fn decode_image(path: &Path) -> Result<DecodedImage> {
    ImageDecoder::decode_file(path)
        .await
        .with_context(|| format!("failed to decode image {:?}", path))
}
