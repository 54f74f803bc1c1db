/***************************************/
/*        3rd party libraries          */
/***************************************/
use log::warn;
use std::fmt;
use std::str::FromStr;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::elevator::Simulator;
use crate::shared::{Algorithm, LogEntry, Snapshot};

/***************************************/
/*               Enums                 */
/***************************************/
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Call(u8),
    Start,
    Pause,
    Reset,
    Step,
    Basic,
    Floors(u8),
    Speed(u64),
    Configure(u8, u64),
    Algorithm(Algorithm),
    Status,
    Log,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    Empty,
    Unknown(String),
    MissingArgument(&'static str),
    InvalidNumber(String),
    InvalidAlgorithm(String),
}

#[derive(Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Empty => write!(f, "empty command"),
            ParseError::Unknown(word) => write!(f, "unknown command '{}' (try 'help')", word),
            ParseError::MissingArgument(what) => write!(f, "missing {}", what),
            ParseError::InvalidNumber(value) => write!(f, "'{}' is not a valid number", value),
            ParseError::InvalidAlgorithm(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for ParseError {}

const HELP: &str = "\
commands:
  <floor> | call <floor>    request a floor
  start | pause | reset     control the car
  step                      advance one tick now
  basic                     10 floors, 500 ms per floor, then reset
  floors <n>                set the number of floors (3-20)
  speed <ms>                set milliseconds per floor (100-2000)
  configure <n> <ms>        set both in one step
  algorithm <name>          fifo, scan or direction-based
  status | log | help | quit";

/***************************************/
/*             Public API              */
/***************************************/
impl FromStr for Command {
    type Err = ParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let head = words.next().ok_or(ParseError::Empty)?;
        let arg = words.next();
        let second = words.next();

        // A bare number is a floor call
        if head.chars().all(|c| c.is_ascii_digit()) {
            return parse_number(head).map(Command::Call);
        }

        match head.to_ascii_lowercase().as_str() {
            "call" => parse_number(arg.ok_or(ParseError::MissingArgument("floor"))?)
                .map(Command::Call),
            "start" | "resume" => Ok(Command::Start),
            "pause" | "stop" => Ok(Command::Pause),
            "reset" => Ok(Command::Reset),
            "step" | "tick" => Ok(Command::Step),
            "basic" => Ok(Command::Basic),
            "floors" => parse_number(arg.ok_or(ParseError::MissingArgument("floor count"))?)
                .map(Command::Floors),
            "speed" => parse_number(arg.ok_or(ParseError::MissingArgument("tick period"))?)
                .map(Command::Speed),
            "configure" | "settings" => {
                let n_floors = parse_number(arg.ok_or(ParseError::MissingArgument("floor count"))?)?;
                let tick_period =
                    parse_number(second.ok_or(ParseError::MissingArgument("tick period"))?)?;
                Ok(Command::Configure(n_floors, tick_period))
            }
            "algorithm" | "algo" => arg
                .ok_or(ParseError::MissingArgument("algorithm name"))?
                .parse::<Algorithm>()
                .map(Command::Algorithm)
                .map_err(ParseError::InvalidAlgorithm),
            "status" => Ok(Command::Status),
            "log" => Ok(Command::Log),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" => Ok(Command::Quit),
            other => Err(ParseError::Unknown(other.to_string())),
        }
    }
}

pub fn execute(command: Command, simulator: &Simulator, json: bool) -> Flow {
    match command {
        Command::Call(floor) => {
            if !simulator.submit_request(floor) {
                println!("Floor {} not accepted", floor);
            }
        }
        Command::Start => simulator.start(),
        Command::Pause => simulator.pause(),
        Command::Reset => simulator.reset(),
        Command::Step => simulator.tick(),
        Command::Basic => simulator.apply_basic_settings(),
        Command::Floors(n_floors) => simulator.configure_floors(n_floors),
        Command::Speed(tick_period) => simulator.configure_tick_period(tick_period),
        Command::Configure(n_floors, tick_period) => simulator.configure(n_floors, tick_period),
        Command::Algorithm(algorithm) => simulator.set_algorithm(algorithm),
        Command::Status => println!("{}", render_snapshot(&simulator.snapshot(), json)),
        Command::Log => {
            for entry in simulator.history().iter().rev() {
                println!("{}", render_entry(entry, json));
            }
        }
        Command::Help => println!("{}", HELP),
        Command::Quit => return Flow::Quit,
    }
    Flow::Continue
}

/// Parses and runs one console line. Bad input is reported and otherwise ignored.
pub fn handle_line(line: &str, simulator: &Simulator, json: bool) -> Flow {
    match line.parse::<Command>() {
        Ok(command) => execute(command, simulator, json),
        Err(ParseError::Empty) => Flow::Continue,
        Err(e) => {
            warn!("{}", e);
            Flow::Continue
        }
    }
}

pub fn render_entry(entry: &LogEntry, json: bool) -> String {
    if json {
        return serde_json::to_string(entry).unwrap_or_else(|e| format!("{{\"error\":\"{}\"}}", e));
    }
    format!("[{}] {}", entry.time_of_day(), entry.message())
}

pub fn render_snapshot(snapshot: &Snapshot, json: bool) -> String {
    if json {
        return serde_json::to_string(snapshot)
            .unwrap_or_else(|e| format!("{{\"error\":\"{}\"}}", e));
    }

    let target = match snapshot.target_floor {
        Some(floor) => floor.to_string(),
        None => "-".to_string(),
    };
    let pending: Vec<String> = snapshot
        .pending_requests
        .iter()
        .map(|r| r.floor.to_string())
        .collect();

    format!(
        "{} | floor {}/{} | direction {} | target {} | pending [{}] ({}) | {} @ {} ms",
        snapshot.status(),
        snapshot.current_floor,
        snapshot.n_floors,
        snapshot.direction,
        target,
        pending.join(", "),
        pending.len(),
        snapshot.algorithm,
        snapshot.tick_period
    )
}

/***************************************/
/*          Private functions          */
/***************************************/
fn parse_number<T: FromStr>(value: &str) -> Result<T, ParseError> {
    value
        .parse::<T>()
        .map_err(|_| ParseError::InvalidNumber(value.to_string()))
}
