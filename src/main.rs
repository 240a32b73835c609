//! # Grotto Command Line Tool
//!
//! Generates a cave from flags or a JSON configuration, optionally finds a
//! path through it, and prints the result as ASCII art or JSON.

use clap::Parser;
use grotto::pathfinding::PathfindingConfig;
use grotto::{
    AsciiRenderer, CaveConfig, Connection, Coord, Coord2, Coord3, GeneratedCave, GrottoError,
    GrottoResult, PathOutcome, PathRequest, PathService, PostProcess,
};
use serde::Serialize;
use std::path::PathBuf;
#[cfg(feature = "dev-tools")]
use tracing::Level;

/// Command line arguments for the Grotto cave generator.
#[derive(Parser, Debug)]
#[command(name = "grotto")]
#[command(about = "Procedural cave generation and grid pathfinding")]
#[command(version)]
struct Args {
    /// Seed text for cave generation
    #[arg(short, long)]
    seed: Option<String>,

    /// JSON file with a cave configuration; flags override its fields
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Generate a 3D cave
    #[arg(long = "3d")]
    three_d: bool,

    /// Grid width in tiles
    #[arg(long)]
    width: Option<u32>,

    /// Grid height in tiles
    #[arg(long)]
    height: Option<u32>,

    /// Grid depth in tiles (3D only)
    #[arg(long)]
    depth: Option<u32>,

    /// Path start as x,y or x,y,z
    #[arg(long, value_parser = parse_components, requires = "target")]
    start: Option<Components>,

    /// Path target as x,y or x,y,z
    #[arg(long, value_parser = parse_components, requires = "start")]
    target: Option<Components>,

    /// Agent footprint in tiles
    #[arg(long, default_value_t = 1)]
    agent_size: u32,

    /// Return a path to the closest reachable tile if the target is unreachable
    #[arg(long)]
    partial: bool,

    /// Reduce the path to its turning points
    #[arg(long)]
    trim: bool,

    /// Skip waypoints reachable in a straight line
    #[arg(long)]
    smooth: bool,

    /// Print a JSON summary instead of ASCII art
    #[arg(long)]
    json: bool,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,
}

/// Integer components of a tile coordinate as typed on the command line.
#[derive(Debug, Clone)]
struct Components(Vec<i32>);

/// JSON output of a run.
#[derive(Serialize)]
struct Summary<'a, C> {
    seed: &'a str,
    seed_value: u64,
    size: C,
    open_tiles: usize,
    rooms: usize,
    connections: &'a [Connection<C>],
    path: Option<&'a PathOutcome<C>>,
}

#[tokio::main]
async fn main() -> GrottoResult<()> {
    let args = Args::parse();

    initialize_logging(&args.log_level)?;
    log::info!("Starting Grotto v{}", grotto::VERSION);

    let config = build_config(&args)?;
    if args.three_d {
        run::<Coord3>(&args, &config).await
    } else {
        run::<Coord2>(&args, &config).await
    }
}

/// Initializes the logging system based on the specified log level.
fn initialize_logging(log_level: &str) -> GrottoResult<()> {
    #[cfg(feature = "dev-tools")]
    {
        let level = match log_level.to_lowercase().as_str() {
            "error" => Level::ERROR,
            "warn" => Level::WARN,
            "info" => Level::INFO,
            "debug" => Level::DEBUG,
            "trace" => Level::TRACE,
            _ => Level::INFO,
        };

        tracing_subscriber::fmt()
            .with_max_level(level)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
    }

    #[cfg(not(feature = "dev-tools"))]
    {
        let level: log::LevelFilter = log_level.parse().map_err(|_| {
            GrottoError::InvalidConfig(format!("unknown log level '{}'", log_level))
        })?;
        env_logger::Builder::new().filter_level(level).init();
    }

    Ok(())
}

/// Merges the configuration file, if any, with command line overrides.
fn build_config(args: &Args) -> GrottoResult<CaveConfig> {
    let seed = args
        .seed
        .clone()
        .unwrap_or_else(|| grotto::config::DEFAULT_SEED.to_string());

    let mut config = match &args.config {
        Some(path) => {
            log::info!("Loading configuration from {}", path.display());
            CaveConfig::from_json_file(path)?
        }
        None if args.three_d => CaveConfig::new_3d(seed.clone()),
        None => CaveConfig::new(seed.clone()),
    };

    if args.seed.is_some() {
        config.seed = seed;
    }
    if let Some(width) = args.width {
        config.width = width;
    }
    if let Some(height) = args.height {
        config.height = height;
    }
    if let Some(depth) = args.depth {
        config.depth = depth;
    }

    config.validate()?;
    Ok(config)
}

/// Generates the cave, runs the optional path request and prints the result.
async fn run<C: Coord + Serialize>(args: &Args, config: &CaveConfig) -> GrottoResult<()> {
    let cave: GeneratedCave<C> = grotto::generate_cave(config)?;

    let outcome = match (&args.start, &args.target) {
        (Some(start), Some(target)) => {
            let path_config = PathfindingConfig {
                agent_size: args.agent_size,
                allow_partial_path: args.partial,
                ..PathfindingConfig::new()
            };
            let service = PathService::new(cave.grid.clone(), path_config)?;
            let request = PathRequest::new(to_coord::<C>(start)?, to_coord::<C>(target)?).with_post(
                PostProcess {
                    trim: args.trim,
                    smooth: args.smooth,
                },
            );
            let response = service.request(request).await?;
            match &response.outcome {
                PathOutcome::Found(path) => log::info!("Path found with cost {}", path.cost),
                PathOutcome::Partial(path) => {
                    log::warn!("Target unreachable; partial path with cost {}", path.cost)
                }
                PathOutcome::NoPath(reason) => log::warn!("No path: {:?}", reason),
            }
            Some(response.outcome)
        }
        _ => None,
    };

    if args.json {
        let summary = Summary {
            seed: &config.seed,
            seed_value: cave.seed,
            size: cave.grid.size(),
            open_tiles: cave.open_tiles(),
            rooms: cave.rooms.len(),
            connections: &cave.connections,
            path: outcome.as_ref(),
        };
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        let tiles = outcome
            .as_ref()
            .and_then(|o| o.path())
            .map(|p| p.tiles.clone())
            .unwrap_or_default();
        print!("{}", AsciiRenderer::new().render(&cave.grid, &tiles));
    }

    Ok(())
}

/// Parses comma separated integer components.
fn parse_components(value: &str) -> Result<Components, String> {
    value
        .split(',')
        .map(|part| {
            part.trim()
                .parse::<i32>()
                .map_err(|e| format!("invalid coordinate component '{}': {}", part, e))
        })
        .collect::<Result<Vec<_>, _>>()
        .map(Components)
}

/// Builds a coordinate, checking the number of components.
fn to_coord<C: Coord>(Components(components): &Components) -> GrottoResult<C> {
    if components.len() != C::DIMENSIONS {
        return Err(GrottoError::InvalidPosition(format!(
            "expected {} components, got {:?}",
            C::DIMENSIONS,
            components
        )));
    }
    let mut c = [0i32; 3];
    c[..components.len()].copy_from_slice(components);
    Ok(C::from_components(c))
}
