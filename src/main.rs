/* 3rd party libraries */
use clap::{Arg, Command};
use crossbeam_channel as cbc;
use log::{debug, error, info, warn};
use std::io;
use std::thread::Builder;

/* Custom libraries */
use elevator_dispatch::config::{self, Config, ConfigError};
use elevator_dispatch::control;
use elevator_dispatch::dispatcher::Dispatcher;
use elevator_dispatch::elevator::ElevatorEvent;
use elevator_dispatch::unwrap_or_exit;

/* Main */
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let matches = Command::new("elevator-dispatch")
        .about("Simulates a bank of elevators driven from an operator console")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .takes_value(true)
                .value_parser(clap::value_parser!(String))
                .default_value("config.toml")
                .help("Path to the TOML configuration file"),
        )
        .arg(
            Arg::new("elevators")
                .long("elevators")
                .takes_value(true)
                .value_parser(clap::value_parser!(usize))
                .help("Number of elevators, overrides the configuration file"),
        )
        .arg(
            Arg::new("floors")
                .long("floors")
                .takes_value(true)
                .value_parser(clap::value_parser!(u8))
                .help("Number of floors, overrides the configuration file"),
        )
        .get_matches();

    // Load the configuration
    let config_path = matches
        .get_one::<String>("config")
        .map(String::as_str)
        .unwrap_or("config.toml");
    let mut config = match config::load_config(config_path) {
        Ok(config) => config,
        Err(ConfigError::Io(e)) if e.kind() == io::ErrorKind::NotFound => {
            warn!("{} not found, using default configuration", config_path);
            Config::default()
        }
        Err(e) => {
            error!("ERROR: {}", e);
            std::process::exit(1);
        }
    };
    if let Some(n_elevators) = matches.get_one::<usize>("elevators") {
        config.fleet.n_elevators = *n_elevators;
    }
    if let Some(n_floors) = matches.get_one::<u8>("floors") {
        config.fleet.n_floors = *n_floors;
    }
    unwrap_or_exit!(config.validate());

    // Start the fleet
    let (event_tx, event_rx) = cbc::unbounded::<ElevatorEvent>();
    let dispatcher = unwrap_or_exit!(Dispatcher::new(&config, event_tx));

    // Report elevator progress
    let event_logger_thread = Builder::new().name("event_logger".into());
    unwrap_or_exit!(event_logger_thread.spawn(move || {
        for event in event_rx.iter() {
            match event {
                ElevatorEvent::FloorPassed { .. } => debug!("{:?}", event),
                ElevatorEvent::StopServed { elevator, stop } => info!(
                    "Elevator {} served floor {} (score {:.5})",
                    elevator,
                    stop.request().destination_floor(),
                    stop.proximity_score()
                ),
                ElevatorEvent::Idle { elevator } => info!("Elevator {} is idle", elevator),
            }
        }
    }));

    // Hand over to the operator
    let stdin = io::stdin();
    let stdout = io::stdout();
    unwrap_or_exit!(control::run(&dispatcher, stdin.lock(), stdout.lock()));
}
