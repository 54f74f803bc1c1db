/* 3rd party libraries */
use clap::Parser;
use crossbeam_channel as cbc;
use env_logger::Env;
use log::{error, info};
use std::io::BufRead;
use std::path::PathBuf;
use std::thread::{sleep, Builder};
use std::time::Duration;

/* Custom libraries */
use console::Flow;
use elevator::{CarController, Driver, Simulator};
use shared::{Algorithm, LogEntry, SystemClock};

/* Modules */
mod config;
mod console;
mod elevator;
mod shared;

mod console_tests;

/* Command line */
#[derive(Parser, Debug)]
#[clap(name = "elevator-sim", about = "Single-car elevator dispatch simulator")]
struct Cli {
    /// Configuration file; defaults apply when it does not exist
    #[clap(long, default_value = "config.toml")]
    config: PathBuf,

    /// Number of floors (3-20), overrides the configuration file
    #[clap(long)]
    floors: Option<u8>,

    /// Milliseconds per floor (100-2000), overrides the configuration file
    #[clap(long)]
    tick_period: Option<u64>,

    /// Dispatch algorithm: fifo, scan or direction-based
    #[clap(long)]
    algorithm: Option<Algorithm>,

    /// Floor to request at startup, may be repeated
    #[clap(short = 'r', long = "request")]
    requests: Vec<u8>,

    /// Print log entries and status as JSON
    #[clap(long)]
    json: bool,

    /// Log filter used when RUST_LOG is not set
    #[clap(long, default_value = "info")]
    log_level: String,
}

/* Main */
fn main() {
    let cli = Cli::parse();
    env_logger::Builder::from_env(Env::default().default_filter_or(cli.log_level.as_str())).init();

    // Load the configuration, command line wins
    let mut config = unwrap_or_exit!(config::load_config(&cli.config));
    if let Some(n_floors) = cli.floors {
        config.simulator.n_floors = n_floors;
    }
    if let Some(tick_period) = cli.tick_period {
        config.simulator.tick_period = tick_period;
    }
    if let Some(algorithm) = cli.algorithm {
        config.simulator.algorithm = algorithm;
    }
    unwrap_or_exit!(config.simulator.validate());
    info!(
        "{} floors, {} ms per floor, {} dispatch",
        config.simulator.n_floors, config.simulator.tick_period, config.simulator.algorithm
    );

    // Initialize channels
    let (log_tx, log_rx) = cbc::unbounded::<LogEntry>();
    let (terminate_tx, terminate_rx) = cbc::unbounded::<()>();

    // Create the simulator
    let controller = CarController::new(&config.simulator, Box::new(SystemClock), log_tx);
    let simulator = Simulator::new(controller);

    // Start the tick driver
    let driver_thread = unwrap_or_exit!(Driver::new(simulator.clone(), terminate_rx).spawn());

    // Start the event log printer
    let json = cli.json;
    let event_thread = unwrap_or_exit!(Builder::new().name("event_log".into()).spawn(move || {
        for entry in log_rx.iter() {
            println!("{}", console::render_entry(&entry, json));
        }
    }));

    for floor in cli.requests {
        simulator.submit_request(floor);
    }

    // Console loop
    let mut quit = false;
    for line in std::io::stdin().lock().lines() {
        match line {
            Ok(line) => {
                if console::handle_line(&line, &simulator, json) == Flow::Quit {
                    quit = true;
                    break;
                }
            }
            Err(e) => {
                error!("Failed to read from stdin: {}", e);
                break;
            }
        }
    }

    // Input closed, let the car finish its calls
    if !quit {
        loop {
            let snapshot = simulator.snapshot();
            if !snapshot.running || snapshot.paused {
                break;
            }
            sleep(Duration::from_millis(snapshot.tick_period));
        }
    }

    // Cleanup
    let _ = terminate_tx.send(());
    if driver_thread.join().is_err() {
        error!("Tick driver panicked");
    }
    let final_snapshot = simulator.snapshot();
    drop(simulator);
    if event_thread.join().is_err() {
        error!("Event log printer panicked");
    }
    println!("{}", console::render_snapshot(&final_snapshot, json));
}
