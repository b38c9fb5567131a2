use clap::{Parser, Subcommand};
use std::io;
use std::process::ExitCode;

use voyage_log::config::Config;
use voyage_log::tracker::Tracker;
use voyage_log::web::AppState;

#[derive(Parser)]
#[command(name = "voyage-log")]
#[command(about = "Manual vessel position log with distance, bearing and ETA")]
struct Cli {
    /// YAML configuration file
    #[arg(long, global = true)]
    config: Option<String>,
    /// Origin as "lat, lon", overrides the configuration
    #[arg(long, global = true, allow_hyphen_values = true)]
    origin: Option<String>,
    /// Destination as "lat, lon", overrides the configuration
    #[arg(long, global = true, allow_hyphen_values = true)]
    destination: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the web form, map and API
    Serve {
        /// Listen address, overrides the configuration
        #[arg(long)]
        bind: Option<String>,
    },
    /// Keep a log from the terminal
    Console,
    /// Validate the configuration and print the resolved voyage
    Check,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = match load_config(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match cli.command {
        Commands::Serve { bind } => {
            if let Some(bind) = bind {
                config.web.bind = bind;
            }
            serve(config)
        }
        Commands::Console => console(config),
        Commands::Check => check(&config),
    }
}

fn load_config(cli: &Cli) -> Result<Config, voyage_log::ConfigError> {
    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    if let Some(origin) = &cli.origin {
        config.route.origin = origin.clone();
    }
    if let Some(destination) = &cli.destination {
        config.route.destination = destination.clone();
    }
    config.waypoints()?;
    config.session_limits()?;
    Ok(config)
}

fn serve(config: Config) -> ExitCode {
    let state = match AppState::new(config) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Failed to start runtime: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(voyage_log::web::run_server(state)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Server error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn console(config: Config) -> ExitCode {
    let waypoints = match config.waypoints() {
        Ok(w) => w,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    let tracker = Tracker::new(waypoints, config.tracker_settings());

    let stdin = io::stdin();
    let stdout = io::stdout();
    match voyage_log::console::run(&tracker, &config.labels(), stdin.lock(), stdout.lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("I/O error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn check(config: &Config) -> ExitCode {
    let waypoints = match config.waypoints() {
        Ok(w) => w,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    let labels = config.labels();
    let settings = config.tracker_settings();

    println!("Configuration is valid");
    println!("  origin:      {} ({})", waypoints.origin, labels.origin);
    println!("  destination: {} ({})", waypoints.destination, labels.destination);
    println!(
        "  great-circle distance: {:.2} km, initial bearing {:.2}°",
        voyage_log::navigation::distance_km(waypoints.origin, waypoints.destination),
        voyage_log::navigation::initial_bearing_deg(waypoints.origin, waypoints.destination)
    );
    println!("  input policy: {:?}", settings.input_policy);
    match settings.max_entries {
        Some(max) => println!("  max entries: {}", max),
        None => println!("  max entries: unlimited"),
    }
    println!("  web bind: {}", config.web.bind);
    if let Ok(limits) = config.session_limits() {
        println!(
            "  web sessions: at most {}, idle timeout {}",
            limits.max_sessions,
            humantime::format_duration(limits.idle_timeout)
        );
    }
    ExitCode::SUCCESS
}
