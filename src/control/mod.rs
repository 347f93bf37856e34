/***************************************/
/*        3rd party libraries          */
/***************************************/
use log::debug;
use std::fmt;
use std::io::{self, BufRead, Write};

/***************************************/
/*           Local modules             */
/***************************************/
use crate::dispatcher::Dispatcher;
use crate::shared::floor_in_range;


/***************************************/
/*             Constants               */
/***************************************/
const WELCOME_MESSAGE: &str = "Welcome to the elevator control panel. Please input a command.";
const EXIT_MESSAGE: &str = "Goodbye!";
const ERROR_MESSAGE: &str =
    "Error: please input a proper command. See the README file for a list of proper commands.";

/***************************************/
/*       Public data structures        */
/***************************************/

/**
 * Operator commands understood by the console.
 *
 * - `request <floor>`:                 send an elevator to `floor`
 * - `pickup <pickup> <dropoff>`:       pick a passenger up and drop them off
 * - `status`:                          status of every elevator
 * - `status <elevator>`:               status of one elevator
 * - `log <elevator>`:                  requests accepted by one elevator
 * - `exit`:                            leave the console
 */
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Request(i32),
    Pickup(i32, i32),
    StatusAll,
    Status(usize),
    Log(usize),
    Exit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    Unknown(String),
    WrongArguments(String),
    InvalidNumber(String),
    InvalidFloor(i32),
    InvalidElevator(usize),
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandError::Unknown(line) => write!(f, "unknown command '{}'", line),
            CommandError::WrongArguments(line) => write!(f, "wrong arguments in '{}'", line),
            CommandError::InvalidNumber(arg) => write!(f, "'{}' is not a number", arg),
            CommandError::InvalidFloor(floor) => write!(f, "floor {} is out of range", floor),
            CommandError::InvalidElevator(index) => write!(f, "elevator {} does not exist", index),
        }
    }
}

impl std::error::Error for CommandError {}

/***************************************/
/*             Public API              */
/***************************************/
pub fn parse_command(line: &str, n_elevators: usize, n_floors: u8) -> Result<Command, CommandError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();

    let floor = |arg: &str| -> Result<i32, CommandError> {
        let floor = arg
            .parse::<i32>()
            .map_err(|_| CommandError::InvalidNumber(arg.to_string()))?;
        if floor_in_range(floor, n_floors) {
            Ok(floor)
        } else {
            Err(CommandError::InvalidFloor(floor))
        }
    };
    let elevator = |arg: &str| -> Result<usize, CommandError> {
        let index = arg
            .parse::<usize>()
            .map_err(|_| CommandError::InvalidNumber(arg.to_string()))?;
        if index < n_elevators {
            Ok(index)
        } else {
            Err(CommandError::InvalidElevator(index))
        }
    };

    match tokens.as_slice() {
        ["request", target] => Ok(Command::Request(floor(*target)?)),
        ["pickup", pickup, dropoff] => Ok(Command::Pickup(floor(*pickup)?, floor(*dropoff)?)),
        ["status"] => Ok(Command::StatusAll),
        ["status", index] => Ok(Command::Status(elevator(*index)?)),
        ["log", index] => Ok(Command::Log(elevator(*index)?)),
        ["exit"] => Ok(Command::Exit),
        ["request", ..] | ["pickup", ..] | ["status", ..] | ["log", ..] | ["exit", ..] => {
            Err(CommandError::WrongArguments(line.trim().to_string()))
        }
        _ => Err(CommandError::Unknown(line.trim().to_string())),
    }
}

/// Runs one command against the fleet. Returns `false` once the operator asks to exit.
pub fn execute<W: Write>(dispatcher: &Dispatcher, command: &Command, out: &mut W) -> io::Result<bool> {
    match command {
        Command::Request(floor) => {
            // Floors were range checked while parsing
            let _ = dispatcher.submit_direct_request(*floor);
            writeln!(out, "Request added.")?;
        }
        Command::Pickup(pickup, dropoff) => {
            let _ = dispatcher.submit_pickup(*pickup, *dropoff);
            writeln!(out, "Pickup and dropoff added.")?;
        }
        Command::StatusAll => {
            for (index, status) in dispatcher.statuses().iter().enumerate() {
                writeln!(out, "Elevator {}: ", index)?;
                writeln!(out, "{}", status)?;
                writeln!(out)?;
            }
        }
        Command::Status(index) => {
            if let Ok(status) = dispatcher.status(*index) {
                writeln!(out, "Elevator {}: ", index)?;
                writeln!(out, "{}", status)?;
                writeln!(out)?;
            }
        }
        Command::Log(index) => {
            let history = dispatcher.history(*index).unwrap_or_default();
            if history.is_empty() {
                writeln!(out, "Elevator {} has not received any requests.", index)?;
            }
            for request in history.iter() {
                writeln!(out, "{}", request)?;
            }
        }
        Command::Exit => {
            writeln!(out, "{}", EXIT_MESSAGE)?;
            return Ok(false);
        }
    }
    Ok(true)
}

/// Reads commands line by line until `exit` or end of input.
pub fn run<R: BufRead, W: Write>(dispatcher: &Dispatcher, input: R, mut out: W) -> io::Result<()> {
    writeln!(out, "{}", WELCOME_MESSAGE)?;

    for line in input.lines() {
        let line = line?;
        match parse_command(&line, dispatcher.n_elevators(), dispatcher.n_floors()) {
            Ok(command) => {
                if !execute(dispatcher, &command, &mut out)? {
                    return Ok(());
                }
            }
            Err(e) => {
                debug!("Rejected command: {}", e);
                writeln!(out, "{}", ERROR_MESSAGE)?;
            }
        }
        out.flush()?;
    }
    Ok(())
}
