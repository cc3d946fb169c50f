use clap::{Parser, Subcommand};
use recall_client::{ApiClient, MemoryApi};
use recall_core::config::AppConfig;
use recall_core::state::AppState;
use recall_tui::views::search::{parse_limit, parse_vector};
use std::sync::Arc;
use tracing::{error, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Recall - search stored memories by vector", long_about = None)]
struct Args {
    /// Base URL of the memory API (overrides API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// GraphQL endpoint (overrides GRAPHQL_URL)
    #[arg(long, global = true)]
    graphql_url: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the terminal UI
    Start {
        /// Route to open, e.g. / or /about
        #[arg(long)]
        route: Option<String>,
    },
    /// One-shot vector search
    Search {
        /// Comma separated floats, e.g. "0.1,0.2"
        #[arg(long)]
        vector: String,
        /// Maximum number of results
        #[arg(long, default_value = "5")]
        limit: String,
    },
    /// Show a single memory by id
    Show {
        #[arg(index = 1)]
        id: i64,
    },
    /// Print the resolved configuration
    Config,
}

fn init_logging(tui: bool) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if tui {
        // TUI mode: only log to file, keep the terminal clean
        let root = recall_core::path_utils::get_app_root();
        let appender = RollingFileAppender::builder()
            .rotation(Rotation::NEVER)
            .filename_prefix("recall.log")
            .build(&root);

        let (non_blocking, guard) = match appender {
            Ok(appender) => tracing_appender::non_blocking(appender),
            Err(e) => {
                eprintln!("⚠️ Logging disabled: cannot write to {}: {}", root.display(), e);
                tracing_appender::non_blocking(std::io::sink())
            }
        };

        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(non_blocking)
            .with_ansi(false)
            .init();
        Some(guard)
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_ansi(true)
            .init();
        None
    }
}

async fn run_tui(config: AppConfig, client: ApiClient, route: Option<String>) -> Result<(), String> {
    let config = config.with_initial_route(route).map_err(|e| format!("❌ Error: {}", e))?;
    let state = AppState::new(config);
    recall_tui::run(state, Arc::new(client))
        .await
        .map_err(|e| format!("TUI Error: {}", e))
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let log_guard = init_logging(matches!(args.command, Some(Commands::Start { .. }) | None));
    recall_core::init();

    let config = match AppConfig::load().and_then(|c| c.with_overrides(args.api_url, args.graphql_url)) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("❌ Error: {}", e);
            eprintln!("   Check API_URL / GRAPHQL_URL in your environment or ~/.recall/.env");
            std::process::exit(1);
        }
    };

    let client = match ApiClient::new(&config) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("❌ Could not build HTTP client: {}", e);
            std::process::exit(1);
        }
    };

    match args.command {
        Some(Commands::Start { route }) => {
            if let Err(e) = run_tui(config, client, route).await {
                eprintln!("{}", e);
                // Flush the log file before exiting
                drop(log_guard);
                std::process::exit(1);
            }
        }
        None => {
            if let Err(e) = run_tui(config, client, None).await {
                eprintln!("{}", e);
                drop(log_guard);
                std::process::exit(1);
            }
        }
        Some(Commands::Search { vector, limit }) => {
            let limit = match parse_limit(&limit) {
                Ok(limit) => limit,
                Err(e) => {
                    eprintln!("❌ {}", e);
                    std::process::exit(2);
                }
            };
            let query = recall_core::SearchQuery { vector: parse_vector(&vector), limit };
            info!("Searching {} with {:?}", config.graphql_endpoint(), query);

            match client.search(&query).await {
                Ok(results) if results.is_empty() => println!("No results."),
                Ok(results) => {
                    for r in results {
                        println!("{}", r);
                    }
                }
                Err(e) => {
                    error!("Search failed: {}", e);
                    eprintln!("❌ {}", e);
                    std::process::exit(1);
                }
            }
        }
        Some(Commands::Show { id }) => match client.fetch_memory(id).await {
            Ok(record) => {
                println!("Memory {}", record.id);
                println!("{}", record.content);
                println!("User {}", record.user_id);
                println!("Created {}", record.created_at);
            }
            Err(e) => {
                error!("Fetch of memory {} failed: {}", id, e);
                eprintln!("❌ {}", e);
                std::process::exit(1);
            }
        },
        Some(Commands::Config) => match serde_json::to_string_pretty(&config) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("❌ {}", e);
                std::process::exit(1);
            }
        },
    }
}
