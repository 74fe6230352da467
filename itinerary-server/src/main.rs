use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::info;
use tracing_subscriber::EnvFilter;

use itinerary_server::cache::{CacheConfig, SearchCache};
use itinerary_server::domain::DEFAULT_PRICE_PER_KM;
use itinerary_server::planner::{DEFAULT_MAX_TRANSFER_STATIONS, SearchConfig};
use itinerary_server::store::seed::{self, RandomNetwork};
use itinerary_server::store::{Schedule, SqliteStore};
use itinerary_server::web::{AppState, create_router};

/// Rail itinerary planner
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// SQLite database file
    #[arg(long, env = "DATABASE_PATH", default_value = "trains.db", global = true)]
    database: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the HTTP API
    Serve {
        #[arg(long, env = "PORT", default_value_t = 3000)]
        port: u16,

        /// Directory of static files served for unmatched paths
        #[arg(long, env = "STATIC_DIR")]
        static_dir: Option<PathBuf>,

        #[arg(long, default_value_t = DEFAULT_PRICE_PER_KM)]
        price_per_km: f64,

        /// Cap on interchange stations examined per search
        #[arg(long, default_value_t = DEFAULT_MAX_TRANSFER_STATIONS)]
        max_transfer_stations: usize,

        #[arg(long, default_value_t = 60)]
        cache_ttl_secs: u64,
    },

    /// Replace the schedule with sample data
    Seed {
        #[command(subcommand)]
        data: SeedData,
    },
}

#[derive(Subcommand)]
enum SeedData {
    /// The three-train Chennai / Bangalore / Mangalore example
    Example,

    /// A large random network
    Random {
        #[arg(long, default_value_t = 1000)]
        trains: usize,

        #[arg(long, default_value_t = 200)]
        stations: usize,

        /// RNG seed, for a reproducible network
        #[arg(long)]
        seed: Option<u64>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Seed { data } => {
            let mut store = SqliteStore::open(&cli.database)?;
            match data {
                SeedData::Example => seed::example(&mut store)?,
                SeedData::Random {
                    trains,
                    stations,
                    seed: rng_seed,
                } => {
                    let mut rng = match rng_seed {
                        Some(s) => StdRng::seed_from_u64(s),
                        None => StdRng::from_entropy(),
                    };
                    seed::random(&mut store, RandomNetwork { trains, stations }, &mut rng)?;
                }
            }
            info!(database = %cli.database.display(), "Seeding complete");
        }

        Command::Serve {
            port,
            static_dir,
            price_per_km,
            max_transfer_stations,
            cache_ttl_secs,
        } => {
            let schedule = Schedule::new(SqliteStore::open(&cli.database)?)?;

            let cache_config = CacheConfig {
                ttl: Duration::from_secs(cache_ttl_secs),
                ..CacheConfig::default()
            };
            let search_config = SearchConfig::new(price_per_km, max_transfer_stations);

            let state = AppState::new(schedule, SearchCache::new(&cache_config), search_config);
            let app = create_router(state, static_dir.as_deref());

            let addr = SocketAddr::from(([0, 0, 0, 0], port));
            let listener = tokio::net::TcpListener::bind(addr).await?;
            info!(%addr, database = %cli.database.display(), "Itinerary planner listening");

            axum::serve(listener, app)
                .with_graceful_shutdown(shutdown_signal())
                .await?;
            info!("Server stopped");
        }
    }

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
}
